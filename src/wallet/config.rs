//! Bridge configuration
//!
//! Defaults cover a plain mainnet setup; `configure` overrides individual
//! fields at runtime (from the page or a config file).

use serde::{Deserialize, Serialize};

/// Who the wallet is asked to trust
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppIdentity {
    pub name: String,
    pub uri: String,
    pub icon: String,
}

impl Default for AppIdentity {
    fn default() -> Self {
        Self {
            name: "Comic Bonk".to_string(),
            uri: "https://comicbonk.com/".to_string(),
            icon: "favicon.ico".to_string(),
        }
    }
}

impl AppIdentity {
    /// Host part of the identity URI, used as the sign-in domain
    pub fn domain(&self) -> Option<String> {
        let rest = self.uri.split_once("://").map(|(_, rest)| rest)?;
        let host = rest
            .split(['/', '?', '#'])
            .next()
            .unwrap_or_default()
            .rsplit('@')
            .next()
            .unwrap_or_default();
        let host = host.split(':').next().unwrap_or_default();
        (!host.is_empty()).then(|| host.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    pub rpc_url: String,
    /// Base URL of the serverless functions host
    pub backend_url: String,
    /// Anonymous key for the functions host; when empty no auth headers are sent
    pub backend_anon_key: String,
    /// Collection whose members count as a game pass
    pub collection_mint: String,
    pub enable_gate_check: bool,
    pub enable_mint_pass: bool,
    pub identity: AppIdentity,
    pub chain: String,
    pub sign_in_statement: String,
    /// Pause before the plain-authorize retry
    pub retry_delay_ms: u32,
    pub confirm_interval_ms: u32,
    pub confirm_timeout_ms: u32,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
            backend_url: String::new(),
            backend_anon_key: String::new(),
            collection_mint: String::new(),
            enable_gate_check: false,
            enable_mint_pass: false,
            identity: AppIdentity::default(),
            chain: "solana:mainnet".to_string(),
            sign_in_statement: "Sign in to Comic Bonk to connect your wallet.".to_string(),
            retry_delay_ms: 500,
            confirm_interval_ms: 2_000,
            confirm_timeout_ms: 60_000,
        }
    }
}

/// Partial update; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigureOptions {
    #[serde(alias = "customRpcMainnet")]
    pub rpc_url: Option<String>,
    #[serde(alias = "supabaseUrl")]
    pub backend_url: Option<String>,
    #[serde(alias = "supabaseAnonKey")]
    pub backend_anon_key: Option<String>,
    pub collection_mint: Option<String>,
    pub enable_gate_check: Option<bool>,
    pub enable_mint_pass: Option<bool>,
}

impl WalletConfig {
    pub fn merge(&mut self, options: ConfigureOptions) {
        if let Some(url) = options.rpc_url {
            self.rpc_url = url;
        }
        if let Some(url) = options.backend_url {
            self.backend_url = url.trim_end_matches('/').to_string();
        }
        if let Some(key) = options.backend_anon_key {
            self.backend_anon_key = key;
        }
        if let Some(mint) = options.collection_mint {
            self.collection_mint = mint;
        }
        if let Some(enabled) = options.enable_gate_check {
            self.enable_gate_check = enabled;
        }
        if let Some(enabled) = options.enable_mint_pass {
            self.enable_mint_pass = enabled;
        }
    }

    pub fn mint_tx_url(&self) -> String {
        format!("{}/functions/v1/mint-tx", self.backend_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_domain() {
        assert_eq!(AppIdentity::default().domain().as_deref(), Some("comicbonk.com"));
        let identity = AppIdentity {
            uri: "https://user@play.example.org:8443/app?x=1".to_string(),
            ..Default::default()
        };
        assert_eq!(identity.domain().as_deref(), Some("play.example.org"));
        let bad = AppIdentity {
            uri: "favicon.ico".to_string(),
            ..Default::default()
        };
        assert_eq!(bad.domain(), None);
    }

    #[test]
    fn test_merge_only_overrides_given_fields() {
        let mut config = WalletConfig::default();
        config.merge(ConfigureOptions {
            collection_mint: Some("Coll1111".to_string()),
            enable_gate_check: Some(true),
            ..Default::default()
        });
        assert_eq!(config.collection_mint, "Coll1111");
        assert!(config.enable_gate_check);
        assert!(!config.enable_mint_pass);
        assert_eq!(config.rpc_url, "https://api.mainnet-beta.solana.com");
    }

    #[test]
    fn test_options_accept_host_names() {
        let options: ConfigureOptions = serde_json::from_str(
            r#"{"customRpcMainnet":"https://rpc.example","supabaseUrl":"https://fn.example/","enableMintPass":true}"#,
        )
        .unwrap();
        let mut config = WalletConfig::default();
        config.merge(options);
        assert_eq!(config.rpc_url, "https://rpc.example");
        assert_eq!(config.mint_tx_url(), "https://fn.example/functions/v1/mint-tx");
        assert!(config.enable_mint_pass);
    }
}
