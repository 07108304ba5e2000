//! Seam to the external wallet app (authorize, sign)

use async_trait::async_trait;
use std::fmt;

use super::config::AppIdentity;

/// Sign-in-with-message payload offered during authorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInPayload {
    pub domain: String,
    pub statement: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizeRequest {
    pub identity: AppIdentity,
    /// CAIP-2 style chain id, e.g. `solana:mainnet`
    pub chain: String,
    pub sign_in: Option<SignInPayload>,
}

/// What the wallet hands back after a successful authorization
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Authorization {
    /// Raw 32-byte account public key
    pub public_key: Vec<u8>,
    pub auth_token: String,
    pub wallet_label: Option<String>,
    pub account_label: Option<String>,
    /// Present when the wallet honoured the sign-in payload
    pub sign_in_signature: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    NoWalletFound,
    Cancelled,
    Failure(String),
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterError::NoWalletFound => write!(f, "no compatible wallet found"),
            AdapterError::Cancelled => write!(f, "cancelled by user"),
            AdapterError::Failure(message) => write!(f, "wallet failure: {message}"),
        }
    }
}

impl std::error::Error for AdapterError {}

/// The bridge depends on this trait, not on the host wallet SDK.
#[async_trait(?Send)]
pub trait WalletAdapter {
    async fn authorize(&self, request: &AuthorizeRequest) -> Result<Authorization, AdapterError>;

    /// Sign serialized transactions without submitting them
    async fn sign_transactions(
        &self,
        transactions: Vec<Vec<u8>>,
    ) -> Result<Vec<Vec<u8>>, AdapterError>;
}
