//! Wallet bridge: connect, sign-and-send, pass gating and minting.
//!
//! Only one wallet interaction runs at a time. Operations that hand control
//! to the wallet app take the busy flag and fail fast with
//! [`WalletError::AlreadyInProgress`] when it is already held.

use std::cell::{Cell, RefCell};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;

use super::adapter::{AuthorizeRequest, Authorization, SignInPayload, WalletAdapter};
use super::backend::MintBackend;
use super::config::{ConfigureOptions, WalletConfig};
use super::error::WalletError;
use super::http::{Clock, HttpTransport};
use super::rpc::{CONFIRMED, FINALIZED, RpcClient, owns_collection_asset};

/// Authorized account kept between calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub public_key: String,
    pub public_key_base64: String,
    pub auth_token: String,
    pub wallet_label: Option<String>,
    pub account_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResult {
    /// Base58 address
    pub public_key: String,
    pub public_key_base64: String,
    pub auth_token: String,
    pub wallet_label: Option<String>,
    pub account_label: Option<String>,
    /// Base64 sign-in signature, if the wallet produced one
    pub signature: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendResult {
    pub tx_signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateResult {
    pub passed: bool,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintResult {
    pub signature: String,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub supports_sign_and_send: bool,
    pub max_messages: Option<u32>,
}

struct BusyGuard<'a>(&'a Cell<bool>);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Result<Self, WalletError> {
        if flag.replace(true) {
            log::warn!("Wallet operation rejected: another one is in progress");
            return Err(WalletError::AlreadyInProgress);
        }
        Ok(Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct WalletBridge<A, T, C> {
    adapter: A,
    transport: T,
    clock: C,
    config: RefCell<WalletConfig>,
    session: RefCell<Option<Session>>,
    busy: Cell<bool>,
}

impl<A, T, C> WalletBridge<A, T, C>
where
    A: WalletAdapter,
    T: HttpTransport,
    C: Clock,
{
    pub fn new(adapter: A, transport: T, clock: C, config: WalletConfig) -> Self {
        Self {
            adapter,
            transport,
            clock,
            config: RefCell::new(config),
            session: RefCell::new(None),
            busy: Cell::new(false),
        }
    }

    pub fn config(&self) -> WalletConfig {
        self.config.borrow().clone()
    }

    pub fn session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    pub fn configure(&self, options: ConfigureOptions) {
        let mut config = self.config.borrow_mut();
        config.merge(options);
        log::info!(
            "Wallet configured: rpc={} backend={} anon_key={} gate={} mint={}",
            config.rpc_url,
            config.backend_url,
            !config.backend_anon_key.is_empty(),
            config.enable_gate_check,
            config.enable_mint_pass
        );
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            supports_sign_and_send: true,
            max_messages: None,
        }
    }

    /// Authorize with sign-in, falling back once to a plain authorize
    pub async fn connect(&self) -> Result<ConnectResult, WalletError> {
        let _busy = BusyGuard::acquire(&self.busy)?;
        let config = self.config();

        let sign_in = config.identity.domain().map(|domain| SignInPayload {
            domain,
            statement: config.sign_in_statement.clone(),
        });
        let mut request = AuthorizeRequest {
            identity: config.identity.clone(),
            chain: config.chain.clone(),
            sign_in,
        };

        log::info!("Connecting wallet on {}", config.chain);
        let authorization = match self.adapter.authorize(&request).await {
            Ok(authorization) => authorization,
            Err(err) => {
                let err = WalletError::from_connect(err);
                if err == WalletError::NoWalletFound {
                    return Err(err);
                }
                log::warn!("Sign-in authorize failed ({err}), retrying without sign-in");
                self.clock.sleep_ms(config.retry_delay_ms).await;
                request.sign_in = None;
                self.adapter
                    .authorize(&request)
                    .await
                    .map_err(WalletError::from_connect)?
            }
        };

        let result = Self::connect_result(authorization)?;
        log::info!(
            "Wallet connected: {}",
            crate::hud::short_address(&result.public_key)
        );
        *self.session.borrow_mut() = Some(Session {
            public_key: result.public_key.clone(),
            public_key_base64: result.public_key_base64.clone(),
            auth_token: result.auth_token.clone(),
            wallet_label: result.wallet_label.clone(),
            account_label: result.account_label.clone(),
        });
        Ok(result)
    }

    fn connect_result(authorization: Authorization) -> Result<ConnectResult, WalletError> {
        if authorization.public_key.is_empty() {
            return Err(WalletError::ConnectFailed(
                "wallet returned no accounts".to_string(),
            ));
        }
        Ok(ConnectResult {
            public_key: bs58::encode(&authorization.public_key).into_string(),
            public_key_base64: BASE64.encode(&authorization.public_key),
            auth_token: authorization.auth_token,
            wallet_label: authorization.wallet_label,
            account_label: authorization.account_label,
            signature: authorization
                .sign_in_signature
                .map(|signature| BASE64.encode(signature)),
        })
    }

    pub fn disconnect(&self) {
        if self.session.borrow_mut().take().is_some() {
            log::info!("Wallet disconnected");
        }
    }

    /// Sign a base64 transaction in the wallet, submit it and wait for confirmation
    pub async fn sign_and_send_transaction(
        &self,
        tx_base64: &str,
    ) -> Result<SendResult, WalletError> {
        let unsigned = decode_transaction(tx_base64)?;
        let _busy = BusyGuard::acquire(&self.busy)?;
        let config = self.config();

        let tx_signature = self.sign_submit_confirm(&config, unsigned).await?;
        Ok(SendResult { tx_signature })
    }

    async fn sign_submit_confirm(
        &self,
        config: &WalletConfig,
        unsigned: Vec<u8>,
    ) -> Result<String, WalletError> {
        let signed = self
            .adapter
            .sign_transactions(vec![unsigned])
            .await
            .map_err(WalletError::from_sign)?
            .into_iter()
            .next()
            .filter(|signed| !signed.is_empty())
            .ok_or_else(|| WalletError::SignFailed("wallet returned no signed payload".to_string()))?;

        let rpc = RpcClient::new(&self.transport, &config.rpc_url);
        let signature = rpc.send_transaction(&BASE64.encode(signed)).await?;
        log::info!("Transaction submitted: {signature}");

        if !self.confirm(&rpc, config, &signature).await {
            log::warn!("Transaction {signature} not confirmed in time");
            return Err(WalletError::ConfirmationTimeout);
        }
        Ok(signature)
    }

    /// Poll until the signature is confirmed or finalized
    async fn confirm(&self, rpc: &RpcClient<'_>, config: &WalletConfig, signature: &str) -> bool {
        let start = self.clock.now_ms();
        let timeout = f64::from(config.confirm_timeout_ms);
        while self.clock.now_ms() - start < timeout {
            self.clock.sleep_ms(config.confirm_interval_ms).await;
            match rpc.signature_status(signature).await {
                Ok(Some(status)) if status == CONFIRMED || status == FINALIZED => {
                    log::info!("Transaction {signature} {status}");
                    return true;
                }
                Ok(_) => {}
                Err(err) => log::debug!("Status poll failed: {err}"),
            }
        }
        false
    }

    /// Does `public_key` hold an asset from the configured collection?
    pub async fn gate_check(&self, public_key: &str) -> Result<GateResult, WalletError> {
        let config = self.config();
        if !config.enable_gate_check {
            return Ok(GateResult {
                passed: true,
                reason: Some("GateCheck disabled".to_string()),
            });
        }
        if public_key.is_empty() {
            return Err(WalletError::InvalidInput("missing public key".to_string()));
        }
        if config.collection_mint.is_empty() {
            log::warn!("Gate check enabled without a collection mint");
            return Ok(GateResult {
                passed: false,
                reason: None,
            });
        }

        // A failed lookup locks the gate
        match self.owns_pass(&config, public_key).await {
            Ok(passed) => {
                log::info!("Gate check for {}: {}", crate::hud::short_address(public_key), passed);
                Ok(GateResult {
                    passed,
                    reason: None,
                })
            }
            Err(err) => {
                log::warn!("Gate check lookup failed: {err}");
                Ok(GateResult {
                    passed: false,
                    reason: Some(err.to_string()),
                })
            }
        }
    }

    async fn owns_pass(&self, config: &WalletConfig, public_key: &str) -> Result<bool, WalletError> {
        let rpc = RpcClient::new(&self.transport, &config.rpc_url);
        let assets = rpc.get_assets_by_owner(public_key).await?;
        Ok(owns_collection_asset(&assets, &config.collection_mint))
    }

    /// Fetch, sign and submit a pass mint, then re-check ownership
    pub async fn mint_pass(&self, public_key: &str) -> Result<MintResult, WalletError> {
        let config = self.config();
        if !config.enable_mint_pass {
            return Err(WalletError::MintDisabled);
        }
        if public_key.is_empty() {
            return Err(WalletError::InvalidInput("missing public key".to_string()));
        }
        let auth_token = self
            .session()
            .map(|session| session.auth_token)
            .ok_or(WalletError::MissingSession)?;
        if config.backend_url.is_empty() {
            return Err(WalletError::Backend("backend URL not configured".to_string()));
        }

        let _busy = BusyGuard::acquire(&self.busy)?;
        let backend = MintBackend::new(
            &self.transport,
            config.mint_tx_url(),
            &config.backend_anon_key,
        );
        let tx_base64 = backend
            .fetch_mint_transaction(public_key, &auth_token)
            .await?;
        let unsigned = decode_transaction(&tx_base64)
            .map_err(|_| WalletError::Backend("txBase64 is not valid base64".to_string()))?;

        let signature = self.sign_submit_confirm(&config, unsigned).await?;
        let passed = match self.owns_pass(&config, public_key).await {
            Ok(passed) => passed,
            Err(err) => {
                log::warn!("Ownership re-check failed after mint: {err}");
                false
            }
        };
        Ok(MintResult { signature, passed })
    }

    pub async fn sol_balance(&self, account: &str) -> Result<u64, WalletError> {
        let config = self.config();
        RpcClient::new(&self.transport, &config.rpc_url)
            .get_balance(account)
            .await
    }

    pub async fn sign_message(&self, _message: &str) -> Result<String, WalletError> {
        Err(WalletError::NotImplemented("signMessage"))
    }

    pub async fn sign_transaction(&self, _tx_base64: &str) -> Result<String, WalletError> {
        Err(WalletError::NotImplemented("signTransaction"))
    }
}

fn decode_transaction(tx_base64: &str) -> Result<Vec<u8>, WalletError> {
    if tx_base64.trim().is_empty() {
        return Err(WalletError::InvalidInput("missing txBase64".to_string()));
    }
    BASE64
        .decode(tx_base64.trim())
        .map_err(|err| WalletError::InvalidInput(format!("txBase64 is not valid base64: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::adapter::AdapterError;
    use crate::wallet::test_support::{ManualClock, ScriptedAdapter, ScriptedTransport};
    use futures::executor::block_on;
    use serde_json::json;

    const KEY: [u8; 4] = [1, 2, 3, 4];

    type TestBridge = WalletBridge<ScriptedAdapter, ScriptedTransport, ManualClock>;

    fn harness(config: WalletConfig) -> (TestBridge, ScriptedAdapter, ScriptedTransport, ManualClock) {
        let adapter = ScriptedAdapter::default();
        let transport = ScriptedTransport::default();
        let clock = ManualClock::default();
        let bridge = WalletBridge::new(adapter.clone(), transport.clone(), clock.clone(), config);
        (bridge, adapter, transport, clock)
    }

    fn authorization() -> Authorization {
        Authorization {
            public_key: KEY.to_vec(),
            auth_token: "token-1".to_string(),
            wallet_label: Some("Phantom".to_string()),
            account_label: None,
            sign_in_signature: Some(vec![9, 9]),
        }
    }

    fn mint_config() -> WalletConfig {
        WalletConfig {
            backend_url: "https://fn.test".to_string(),
            backend_anon_key: "anon".to_string(),
            collection_mint: "Coll".to_string(),
            enable_gate_check: true,
            enable_mint_pass: true,
            ..WalletConfig::default()
        }
    }

    fn script_confirmed_send(transport: &ScriptedTransport) {
        transport.push("sendTransaction", Ok(json!({ "result": "sig-1" })));
        transport.push("getSignatureStatuses", Ok(json!({ "result": { "value": [null] } })));
        transport.push(
            "getSignatureStatuses",
            Ok(json!({ "result": { "value": [{ "confirmationStatus": "confirmed" }] } })),
        );
    }

    #[test]
    fn test_connect_with_sign_in() {
        let (bridge, adapter, _, clock) = harness(WalletConfig::default());
        adapter.push_authorize(Ok(authorization()));

        let result = block_on(bridge.connect()).unwrap();
        assert_eq!(result.public_key, bs58::encode(KEY).into_string());
        assert_eq!(result.public_key_base64, "AQIDBA==");
        assert_eq!(result.signature.as_deref(), Some("CQk="));
        assert_eq!(bridge.session().unwrap().auth_token, "token-1");

        let calls = adapter.authorize_calls();
        assert_eq!(calls.len(), 1);
        let sign_in = calls[0].sign_in.clone().unwrap();
        assert_eq!(sign_in.domain, "comicbonk.com");
        assert_eq!(sign_in.statement, "Sign in to Comic Bonk to connect your wallet.");
        assert_eq!(calls[0].chain, "solana:mainnet");
        assert!(clock.sleeps().is_empty());
        assert!(!bridge.is_busy());
    }

    #[test]
    fn test_connect_retries_without_sign_in() {
        let (bridge, adapter, _, clock) = harness(WalletConfig::default());
        adapter.push_authorize(Err(AdapterError::Failure("siws unsupported".to_string())));
        adapter.push_authorize(Ok(Authorization {
            sign_in_signature: None,
            ..authorization()
        }));

        let result = block_on(bridge.connect()).unwrap();
        assert_eq!(result.signature, None);

        let calls = adapter.authorize_calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].sign_in.is_some());
        assert!(calls[1].sign_in.is_none());
        assert_eq!(clock.sleeps(), vec![500]);
    }

    #[test]
    fn test_connect_failure_releases_guard() {
        let (bridge, adapter, _, _) = harness(WalletConfig::default());
        adapter.push_authorize(Err(AdapterError::Cancelled));
        adapter.push_authorize(Err(AdapterError::Failure("declined".to_string())));

        let err = block_on(bridge.connect()).unwrap_err();
        assert_eq!(err.code(), "CONNECT_FAILED");
        assert!(!bridge.is_busy());
        assert!(bridge.session().is_none());

        adapter.push_authorize(Ok(authorization()));
        assert!(block_on(bridge.connect()).is_ok());
    }

    #[test]
    fn test_no_wallet_is_not_retried() {
        let (bridge, adapter, _, clock) = harness(WalletConfig::default());
        adapter.push_authorize(Err(AdapterError::NoWalletFound));

        assert_eq!(block_on(bridge.connect()), Err(WalletError::NoWalletFound));
        assert_eq!(adapter.authorize_calls().len(), 1);
        assert!(clock.sleeps().is_empty());
    }

    #[test]
    fn test_empty_account_list_fails() {
        let (bridge, adapter, _, _) = harness(WalletConfig::default());
        adapter.push_authorize(Ok(Authorization::default()));
        assert_eq!(block_on(bridge.connect()).unwrap_err().code(), "CONNECT_FAILED");
    }

    #[test]
    fn test_busy_bridge_rejects_reentry() {
        let (bridge, adapter, _, _) = harness(WalletConfig::default());
        adapter.push_authorize(Ok(authorization()));

        let held = BusyGuard::acquire(&bridge.busy).unwrap();
        assert_eq!(block_on(bridge.connect()), Err(WalletError::AlreadyInProgress));
        assert_eq!(
            block_on(bridge.sign_and_send_transaction("AQID")),
            Err(WalletError::AlreadyInProgress)
        );
        assert!(adapter.authorize_calls().is_empty());
        drop(held);

        assert!(block_on(bridge.connect()).is_ok());
    }

    #[test]
    fn test_disconnect_clears_session() {
        let (bridge, adapter, _, _) = harness(WalletConfig::default());
        adapter.push_authorize(Ok(authorization()));
        block_on(bridge.connect()).unwrap();
        bridge.disconnect();
        assert!(bridge.session().is_none());
    }

    #[test]
    fn test_sign_and_send_confirms() {
        let (bridge, adapter, transport, clock) = harness(WalletConfig::default());
        adapter.push_sign(Ok(vec![vec![7, 7, 7]]));
        script_confirmed_send(&transport);

        let result = block_on(bridge.sign_and_send_transaction("AQID")).unwrap();
        assert_eq!(result.tx_signature, "sig-1");
        assert_eq!(adapter.sign_calls(), vec![vec![vec![1, 2, 3]]]);
        assert_eq!(clock.sleeps(), vec![2000, 2000]);

        let requests = transport.requests();
        assert_eq!(requests[0].url, "https://api.mainnet-beta.solana.com");
        assert_eq!(requests[0].body["params"][0], "BwcH");
        assert_eq!(transport.count("getSignatureStatuses"), 2);
    }

    #[test]
    fn test_confirmation_times_out() {
        let (bridge, adapter, transport, _) = harness(WalletConfig::default());
        adapter.push_sign(Ok(vec![vec![7]]));
        transport.push("sendTransaction", Ok(json!({ "result": "sig-1" })));
        transport.push("getSignatureStatuses", Ok(json!({ "result": { "value": [null] } })));

        assert_eq!(
            block_on(bridge.sign_and_send_transaction("AQID")),
            Err(WalletError::ConfirmationTimeout)
        );
        assert_eq!(transport.count("getSignatureStatuses"), 30);
        assert!(!bridge.is_busy());
    }

    #[test]
    fn test_status_poll_errors_keep_polling() {
        let (bridge, adapter, transport, _) = harness(WalletConfig::default());
        adapter.push_sign(Ok(vec![vec![7]]));
        transport.push("sendTransaction", Ok(json!({ "result": "sig-1" })));
        transport.push(
            "getSignatureStatuses",
            Err(crate::wallet::http::HttpError::Network("offline".to_string())),
        );
        transport.push(
            "getSignatureStatuses",
            Ok(json!({ "result": { "value": [{ "confirmationStatus": "finalized" }] } })),
        );

        assert!(block_on(bridge.sign_and_send_transaction("AQID")).is_ok());
    }

    #[test]
    fn test_send_rejects_bad_input_before_wallet() {
        let (bridge, adapter, _, _) = harness(WalletConfig::default());
        assert_eq!(block_on(bridge.sign_and_send_transaction("  ")).unwrap_err().code(), "INVALID_INPUT");
        assert_eq!(block_on(bridge.sign_and_send_transaction("%%%")).unwrap_err().code(), "INVALID_INPUT");
        assert!(adapter.sign_calls().is_empty());
    }

    #[test]
    fn test_wallet_rejection_is_sign_failure() {
        let (bridge, adapter, transport, _) = harness(WalletConfig::default());
        adapter.push_sign(Err(AdapterError::Cancelled));

        let err = block_on(bridge.sign_and_send_transaction("AQID")).unwrap_err();
        assert_eq!(err.code(), "SIGN_FAILED");
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_rpc_error_surfaces() {
        let (bridge, adapter, transport, _) = harness(WalletConfig::default());
        adapter.push_sign(Ok(vec![vec![7]]));
        transport.push(
            "sendTransaction",
            Ok(json!({ "error": { "message": "Blockhash not found" } })),
        );

        let err = block_on(bridge.sign_and_send_transaction("AQID")).unwrap_err();
        assert_eq!(err.to_string(), "RPC Error: Blockhash not found");
    }

    #[test]
    fn test_gate_check_modes() {
        let (bridge, _, transport, _) = harness(WalletConfig::default());
        let open = block_on(bridge.gate_check("Owner")).unwrap();
        assert!(open.passed);
        assert_eq!(open.reason.as_deref(), Some("GateCheck disabled"));
        assert!(transport.requests().is_empty());

        bridge.configure(ConfigureOptions {
            enable_gate_check: Some(true),
            ..Default::default()
        });
        assert!(!block_on(bridge.gate_check("Owner")).unwrap().passed);
        assert_eq!(block_on(bridge.gate_check("")).unwrap_err().code(), "INVALID_INPUT");

        bridge.configure(ConfigureOptions {
            collection_mint: Some("Coll".to_string()),
            ..Default::default()
        });
        transport.push(
            "getAssetsByOwner",
            Ok(json!({ "result": { "items": [
                { "grouping": [{ "group_key": "collection", "group_value": "Other" }] }
            ] } })),
        );
        transport.push(
            "getAssetsByOwner",
            Ok(json!({ "result": { "items": [
                { "grouping": [{ "group_key": "collection", "group_value": "Coll" }] }
            ] } })),
        );
        assert!(!block_on(bridge.gate_check("Owner")).unwrap().passed);
        assert!(block_on(bridge.gate_check("Owner")).unwrap().passed);
    }

    #[test]
    fn test_gate_check_lookup_failure_locks() {
        let (bridge, _, transport, _) = harness(WalletConfig {
            enable_gate_check: true,
            collection_mint: "Coll".to_string(),
            ..Default::default()
        });

        let offline = block_on(bridge.gate_check("Owner")).unwrap();
        assert!(!offline.passed);
        let reason = offline.reason.unwrap_or_default();
        assert!(reason.starts_with("Network error"), "{reason}");
        assert!(reason.contains("no script for getAssetsByOwner"), "{reason}");

        transport.push(
            "getAssetsByOwner",
            Ok(json!({ "error": { "code": -32000, "message": "DAS unavailable" } })),
        );
        let rejected = block_on(bridge.gate_check("Owner")).unwrap();
        assert!(!rejected.passed);
        assert_eq!(rejected.reason.as_deref(), Some("RPC Error: DAS unavailable"));

        assert_eq!(block_on(bridge.gate_check("")).unwrap_err().code(), "INVALID_INPUT");
    }

    #[test]
    fn test_mint_preconditions() {
        let (bridge, _, _, _) = harness(WalletConfig::default());
        assert_eq!(block_on(bridge.mint_pass("Owner")), Err(WalletError::MintDisabled));

        let (bridge, _, transport, _) = harness(mint_config());
        assert_eq!(block_on(bridge.mint_pass("Owner")), Err(WalletError::MissingSession));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_mint_pass_end_to_end() {
        let (bridge, adapter, transport, _) = harness(mint_config());
        adapter.push_authorize(Ok(authorization()));
        let owner = block_on(bridge.connect()).unwrap().public_key;

        transport.push(
            "https://fn.test/functions/v1/mint-tx",
            Ok(json!({ "txBase64": "AQID" })),
        );
        adapter.push_sign(Ok(vec![vec![5, 5]]));
        script_confirmed_send(&transport);
        transport.push(
            "getAssetsByOwner",
            Ok(json!({ "result": { "items": [
                { "grouping": [{ "group_key": "collection", "group_value": "Coll" }] }
            ] } })),
        );

        let minted = block_on(bridge.mint_pass(&owner)).unwrap();
        assert_eq!(
            minted,
            MintResult {
                signature: "sig-1".to_string(),
                passed: true
            }
        );

        let requests = transport.requests();
        assert_eq!(requests[0].url, "https://fn.test/functions/v1/mint-tx");
        assert!(requests[0].has_header("Authorization", "Bearer token-1"));
        assert_eq!(requests[0].body["walletPublicKey"], owner.as_str());
        assert_eq!(adapter.sign_calls(), vec![vec![vec![1, 2, 3]]]);
        assert!(!bridge.is_busy());
    }

    #[test]
    fn test_mint_backend_error() {
        let (bridge, adapter, transport, _) = harness(mint_config());
        adapter.push_authorize(Ok(authorization()));
        let owner = block_on(bridge.connect()).unwrap().public_key;
        transport.push(
            "https://fn.test/functions/v1/mint-tx",
            Ok(json!({ "error": "Sold out" })),
        );

        assert_eq!(
            block_on(bridge.mint_pass(&owner)),
            Err(WalletError::Backend("Sold out".to_string()))
        );
        assert!(adapter.sign_calls().is_empty());
    }

    #[test]
    fn test_unsupported_operations() {
        let (bridge, _, _, _) = harness(WalletConfig::default());
        assert_eq!(block_on(bridge.sign_message("hi")).unwrap_err().code(), "NOT_IMPLEMENTED");
        assert_eq!(block_on(bridge.sign_transaction("AQID")).unwrap_err().code(), "NOT_IMPLEMENTED");
        assert!(bridge.capabilities().supports_sign_and_send);
    }

    #[test]
    fn test_sol_balance() {
        let (bridge, _, transport, _) = harness(WalletConfig::default());
        transport.push("getBalance", Ok(json!({ "result": { "context": {}, "value": 42 } })));
        assert_eq!(block_on(bridge.sol_balance("Owner")).unwrap(), 42);
    }
}
