//! Wallet connect and mint-to-play bridge
//!
//! The bridge talks to three seams: the wallet app ([`WalletAdapter`]),
//! HTTP ([`HttpTransport`]) and time ([`Clock`]). Browser implementations
//! live in `js`; tests drive the bridge with scripted fakes.

mod adapter;
mod backend;
mod bridge;
mod config;
mod error;
mod gate;
mod http;
#[cfg(target_arch = "wasm32")]
mod js;
mod rpc;

#[cfg(test)]
mod test_support;

pub use adapter::{AdapterError, AuthorizeRequest, Authorization, SignInPayload, WalletAdapter};
pub use backend::MintBackend;
pub use bridge::{
    Capabilities, ConnectResult, GateResult, MintResult, SendResult, Session, WalletBridge,
};
pub use config::{AppIdentity, ConfigureOptions, WalletConfig};
pub use error::WalletError;
pub use gate::{PassGate, PassState};
pub use http::{Clock, HttpError, HttpTransport, redact_headers};
#[cfg(target_arch = "wasm32")]
pub use js::{BrowserClock, FetchTransport, JsWalletAdapter, PROVIDER_GLOBAL};
pub use rpc::{Asset, Grouping, RpcClient, owns_collection_asset};

/// Bridge wired to the browser seams
#[cfg(target_arch = "wasm32")]
pub type BrowserWallet = WalletBridge<JsWalletAdapter, FetchTransport, BrowserClock>;
