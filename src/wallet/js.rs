//! Browser implementations of the bridge seams

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use js_sys::{Function, JSON, Promise, Reflect};
use serde::Deserialize;
use serde_json::{Value, json};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

use super::adapter::{AdapterError, AuthorizeRequest, Authorization, WalletAdapter};
use super::http::{Clock, HttpError, HttpTransport};

/// Global the host page (or native shell) installs the wallet provider under
pub const PROVIDER_GLOBAL: &str = "comicBonkWallet";

fn js_message(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

fn adapter_error(value: JsValue) -> AdapterError {
    let code = Reflect::get(&value, &JsValue::from_str("code"))
        .ok()
        .and_then(|code| code.as_string())
        .unwrap_or_default();
    let message = js_message(&value);
    match code.as_str() {
        "NO_WALLET_FOUND" => AdapterError::NoWalletFound,
        "CANCELLED" | "USER_CANCELLED" => AdapterError::Cancelled,
        _ if message.to_ascii_lowercase().contains("cancel") => AdapterError::Cancelled,
        _ => AdapterError::Failure(message),
    }
}

fn to_js(value: &Value) -> Result<JsValue, JsValue> {
    JSON::parse(&value.to_string())
}

fn from_js(value: &JsValue) -> Result<Value, String> {
    if value.is_undefined() || value.is_null() {
        return Ok(Value::Null);
    }
    let text: String = JSON::stringify(value).map_err(|err| js_message(&err))?.into();
    serde_json::from_str(&text).map_err(|err| err.to_string())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorizeResponse {
    /// Base64 account key
    public_key: String,
    #[serde(default)]
    auth_token: String,
    wallet_label: Option<String>,
    account_label: Option<String>,
    sign_in_signature: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignResponse {
    #[serde(default)]
    signed_payloads: Vec<String>,
}

/// Calls into a JS wallet provider object exposing promise-returning
/// `authorize(request)` and `signTransactions({ payloads })`.
pub struct JsWalletAdapter {
    provider: JsValue,
}

impl JsWalletAdapter {
    pub fn new(provider: JsValue) -> Self {
        Self { provider }
    }

    /// Provider from `window[PROVIDER_GLOBAL]`; calls fail with no-wallet when absent
    pub fn detect() -> Self {
        let provider = web_sys::window()
            .and_then(|window| Reflect::get(&window, &JsValue::from_str(PROVIDER_GLOBAL)).ok())
            .unwrap_or(JsValue::UNDEFINED);
        if provider.is_undefined() {
            log::info!("No wallet provider installed at window.{PROVIDER_GLOBAL}");
        }
        Self::new(provider)
    }

    async fn call(&self, method: &str, arg: &Value) -> Result<Value, AdapterError> {
        if self.provider.is_undefined() || self.provider.is_null() {
            return Err(AdapterError::NoWalletFound);
        }
        let function = Reflect::get(&self.provider, &JsValue::from_str(method))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or(AdapterError::NoWalletFound)?;
        let arg = to_js(arg).map_err(adapter_error)?;
        let promise = function
            .call1(&self.provider, &arg)
            .map_err(adapter_error)?
            .dyn_into::<Promise>()
            .map_err(|_| AdapterError::Failure(format!("{method} did not return a promise")))?;
        let value = JsFuture::from(promise).await.map_err(adapter_error)?;
        from_js(&value).map_err(|err| AdapterError::Failure(format!("bad {method} response: {err}")))
    }
}

fn decode_b64(field: &str, value: &str) -> Result<Vec<u8>, AdapterError> {
    BASE64
        .decode(value)
        .map_err(|err| AdapterError::Failure(format!("{field} is not base64: {err}")))
}

#[async_trait(?Send)]
impl WalletAdapter for JsWalletAdapter {
    async fn authorize(&self, request: &AuthorizeRequest) -> Result<Authorization, AdapterError> {
        let sign_in = request.sign_in.as_ref().map(|payload| {
            json!({ "domain": payload.domain, "statement": payload.statement })
        });
        let arg = json!({
            "identity": {
                "name": request.identity.name,
                "uri": request.identity.uri,
                "icon": request.identity.icon,
            },
            "chain": request.chain,
            "signInPayload": sign_in,
        });
        let response: AuthorizeResponse = serde_json::from_value(self.call("authorize", &arg).await?)
            .map_err(|err| AdapterError::Failure(format!("failed to parse wallet response: {err}")))?;

        Ok(Authorization {
            public_key: decode_b64("publicKey", &response.public_key)?,
            auth_token: response.auth_token,
            wallet_label: response.wallet_label,
            account_label: response.account_label,
            sign_in_signature: response
                .sign_in_signature
                .map(|signature| decode_b64("signInSignature", &signature))
                .transpose()?,
        })
    }

    async fn sign_transactions(
        &self,
        transactions: Vec<Vec<u8>>,
    ) -> Result<Vec<Vec<u8>>, AdapterError> {
        let payloads: Vec<String> = transactions.iter().map(|tx| BASE64.encode(tx)).collect();
        let response: SignResponse =
            serde_json::from_value(self.call("signTransactions", &json!({ "payloads": payloads })).await?)
                .map_err(|err| AdapterError::Failure(format!("failed to parse signed payloads: {err}")))?;
        response
            .signed_payloads
            .iter()
            .map(|payload| decode_b64("signedPayloads", payload))
            .collect()
    }
}

/// `window.fetch` as an [`HttpTransport`]
#[derive(Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        headers: &[(String, String)],
    ) -> Result<Value, HttpError> {
        let network = |err: JsValue| HttpError::Network(js_message(&err));
        let window = web_sys::window().ok_or_else(|| HttpError::Network("no window".to_string()))?;

        let request_headers = Headers::new().map_err(network)?;
        request_headers
            .set("Content-Type", "application/json")
            .map_err(network)?;
        for (name, value) in headers {
            request_headers.set(name, value).map_err(network)?;
        }

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_mode(RequestMode::Cors);
        init.set_headers(&request_headers);
        init.set_body(&JsValue::from_str(&body.to_string()));
        let request = Request::new_with_str_and_init(url, &init).map_err(network)?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network)?
            .dyn_into()
            .map_err(network)?;
        let text = JsFuture::from(response.text().map_err(network)?)
            .await
            .map_err(network)?
            .as_string()
            .unwrap_or_default();

        if !response.ok() {
            return Err(HttpError::Status {
                status: response.status(),
                body: text,
            });
        }
        serde_json::from_str(&text).map_err(|err| HttpError::Decode(err.to_string()))
    }
}

/// Wall clock plus `setTimeout`-backed sleeps
#[derive(Default)]
pub struct BrowserClock;

#[async_trait(?Send)]
impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    async fn sleep_ms(&self, ms: u32) {
        let promise = Promise::new(&mut |resolve, _reject| {
            let scheduled = web_sys::window().map(|window| {
                window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    &resolve,
                    i32::try_from(ms).unwrap_or(i32::MAX),
                )
            });
            if !matches!(scheduled, Some(Ok(_))) {
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        let _ = JsFuture::from(promise).await;
    }
}
