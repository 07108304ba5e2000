//! JSON-RPC calls against a Solana node (plus the DAS asset index)

use serde::Deserialize;
use serde_json::{Value, json};

use super::error::WalletError;
use super::http::HttpTransport;

pub const CONFIRMED: &str = "confirmed";
pub const FINALIZED: &str = "finalized";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Grouping {
    #[serde(default)]
    pub group_key: String,
    #[serde(default)]
    pub group_value: String,
}

/// The slice of a DAS asset the pass check needs
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub grouping: Vec<Grouping>,
}

#[derive(Debug, Default, Deserialize)]
struct AssetPage {
    #[serde(default)]
    items: Vec<Asset>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignatureStatus {
    confirmation_status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ValueWrapper<T> {
    value: T,
}

/// True when any asset belongs to the collection `mint`
pub fn owns_collection_asset(assets: &[Asset], mint: &str) -> bool {
    !mint.is_empty()
        && assets.iter().any(|asset| {
            asset
                .grouping
                .iter()
                .any(|group| group.group_key == "collection" && group.group_value == mint)
        })
}

pub struct RpcClient<'a> {
    transport: &'a dyn HttpTransport,
    url: &'a str,
}

impl<'a> RpcClient<'a> {
    pub fn new(transport: &'a dyn HttpTransport, url: &'a str) -> Self {
        Self { transport, url }
    }

    /// Issue one request and return its `result` member
    pub async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let headers = [("Content-Type".to_string(), "application/json".to_string())];
        log::debug!("RPC {} -> {}", method, self.url);
        let mut response = self.transport.post_json(self.url, &body, &headers).await?;

        if let Some(error) = response.get("error").filter(|e| !e.is_null()) {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown RPC error")
                .to_string();
            log::warn!("RPC {} failed: {}", method, message);
            return Err(WalletError::Rpc(message));
        }
        Ok(response
            .get_mut("result")
            .map(Value::take)
            .unwrap_or(Value::Null))
    }

    fn decode<T: serde::de::DeserializeOwned>(method: &str, value: Value) -> Result<T, WalletError> {
        serde_json::from_value(value)
            .map_err(|err| WalletError::Rpc(format!("unexpected {method} response: {err}")))
    }

    /// Submit a signed transaction; returns its signature
    pub async fn send_transaction(&self, signed_base64: &str) -> Result<String, WalletError> {
        let result = self
            .request(
                "sendTransaction",
                json!([signed_base64, { "encoding": "base64" }]),
            )
            .await?;
        result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| WalletError::Rpc("sendTransaction returned no signature".to_string()))
    }

    /// Confirmation level of one signature, `None` while unknown
    pub async fn signature_status(&self, signature: &str) -> Result<Option<String>, WalletError> {
        let result = self
            .request("getSignatureStatuses", json!([[signature]]))
            .await?;
        let statuses: ValueWrapper<Vec<Option<SignatureStatus>>> =
            Self::decode("getSignatureStatuses", result)?;
        Ok(statuses
            .value
            .into_iter()
            .next()
            .flatten()
            .and_then(|status| status.confirmation_status))
    }

    /// Lamport balance of `account`
    pub async fn get_balance(&self, account: &str) -> Result<u64, WalletError> {
        let result = self.request("getBalance", json!([account])).await?;
        let balance: ValueWrapper<u64> = Self::decode("getBalance", result)?;
        Ok(balance.value)
    }

    /// First page (up to 1000) of assets held by `owner`
    pub async fn get_assets_by_owner(&self, owner: &str) -> Result<Vec<Asset>, WalletError> {
        let result = self
            .request(
                "getAssetsByOwner",
                json!({
                    "ownerAddress": owner,
                    "page": 1,
                    "limit": 1000,
                    "options": { "showCollectionMetadata": true },
                }),
            )
            .await?;
        if result.is_null() {
            return Ok(Vec::new());
        }
        let page: AssetPage = Self::decode("getAssetsByOwner", result)?;
        Ok(page.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::test_support::ScriptedTransport;
    use futures::executor::block_on;

    fn asset(key: &str, value: &str) -> Asset {
        Asset {
            id: "asset".to_string(),
            grouping: vec![Grouping {
                group_key: key.to_string(),
                group_value: value.to_string(),
            }],
        }
    }

    #[test]
    fn test_owns_collection_asset() {
        let assets = vec![asset("creator", "Mint1"), asset("collection", "Mint2")];
        assert!(owns_collection_asset(&assets, "Mint2"));
        assert!(!owns_collection_asset(&assets, "Mint1"));
        assert!(!owns_collection_asset(&assets, ""));
        assert!(!owns_collection_asset(&[], "Mint2"));
    }

    #[test]
    fn test_request_shape_and_error() {
        let transport = ScriptedTransport::default();
        transport.push(
            "sendTransaction",
            Ok(json!({ "error": { "code": -32002, "message": "Blockhash not found" } })),
        );
        let rpc = RpcClient::new(&transport, "https://rpc.test");

        let err = block_on(rpc.send_transaction("AQID")).unwrap_err();
        assert_eq!(err, WalletError::Rpc("Blockhash not found".to_string()));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://rpc.test");
        assert_eq!(requests[0].body["jsonrpc"], "2.0");
        assert_eq!(requests[0].body["params"][0], "AQID");
        assert_eq!(requests[0].body["params"][1]["encoding"], "base64");
    }

    #[test]
    fn test_status_and_balance_parsing() {
        let transport = ScriptedTransport::default();
        transport.push(
            "getSignatureStatuses",
            Ok(json!({ "result": { "value": [{ "confirmationStatus": "finalized", "slot": 5 }] } })),
        );
        transport.push("getBalance", Ok(json!({ "result": { "value": 1_500_000_000u64 } })));
        let rpc = RpcClient::new(&transport, "https://rpc.test");

        assert_eq!(
            block_on(rpc.signature_status("sig")).unwrap().as_deref(),
            Some(FINALIZED)
        );
        assert_eq!(block_on(rpc.get_balance("acct")).unwrap(), 1_500_000_000);
    }

    #[test]
    fn test_unknown_signature_is_none() {
        let transport = ScriptedTransport::default();
        transport.push("getSignatureStatuses", Ok(json!({ "result": { "value": [null] } })));
        let rpc = RpcClient::new(&transport, "https://rpc.test");
        assert_eq!(block_on(rpc.signature_status("sig")).unwrap(), None);
    }

    #[test]
    fn test_assets_request_pages_with_collection_metadata() {
        let transport = ScriptedTransport::default();
        transport.push(
            "getAssetsByOwner",
            Ok(json!({ "result": { "total": 1, "items": [
                { "id": "a1", "grouping": [{ "group_key": "collection", "group_value": "Coll" }] }
            ] } })),
        );
        let rpc = RpcClient::new(&transport, "https://rpc.test");

        let assets = block_on(rpc.get_assets_by_owner("Owner")).unwrap();
        assert!(owns_collection_asset(&assets, "Coll"));

        let params = &transport.requests()[0].body["params"];
        assert_eq!(params["ownerAddress"], "Owner");
        assert_eq!(params["limit"], 1000);
        assert_eq!(params["options"]["showCollectionMetadata"], true);
    }
}
