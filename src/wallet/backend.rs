use serde::Deserialize;
use serde_json::json;

use super::error::WalletError;
use super::http::{HttpTransport, redact_headers};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MintTxResponse {
    tx_base64: Option<String>,
    error: Option<String>,
}

/// Client for the serverless function that builds unsigned mint transactions
pub struct MintBackend<'a> {
    transport: &'a dyn HttpTransport,
    url: String,
    anon_key: &'a str,
}

impl<'a> MintBackend<'a> {
    pub fn new(transport: &'a dyn HttpTransport, url: String, anon_key: &'a str) -> Self {
        Self {
            transport,
            url,
            anon_key,
        }
    }

    fn headers(&self, auth_token: &str) -> Vec<(String, String)> {
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if !self.anon_key.is_empty() {
            headers.push(("apikey".to_string(), self.anon_key.to_string()));
            headers.push(("Authorization".to_string(), format!("Bearer {auth_token}")));
        }
        headers
    }

    /// Ask for an unsigned mint transaction for `wallet_public_key`; returns base64
    pub async fn fetch_mint_transaction(
        &self,
        wallet_public_key: &str,
        auth_token: &str,
    ) -> Result<String, WalletError> {
        let headers = self.headers(auth_token);
        log::debug!("POST {} headers={:?}", self.url, redact_headers(&headers));

        let body = json!({ "walletPublicKey": wallet_public_key });
        let response = self
            .transport
            .post_json(&self.url, &body, &headers)
            .await
            .map_err(|err| WalletError::Backend(err.to_string()))?;
        let response: MintTxResponse = serde_json::from_value(response)
            .map_err(|err| WalletError::Backend(format!("malformed response: {err}")))?;

        if let Some(error) = response.error {
            return Err(WalletError::Backend(error));
        }
        match response.tx_base64 {
            Some(tx) if !tx.is_empty() => Ok(tx),
            _ => Err(WalletError::Backend("response missing txBase64".to_string())),
        }
    }
}
