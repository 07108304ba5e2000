use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

use super::adapter::{AdapterError, AuthorizeRequest, Authorization, WalletAdapter};
use super::http::{Clock, HttpError, HttpTransport};

type Script<T> = Rc<RefCell<VecDeque<T>>>;

// Pops scripted answers in order; an empty script is a wallet that never shows up.
#[derive(Clone, Default)]
pub(crate) struct ScriptedAdapter {
    authorize: Script<Result<Authorization, AdapterError>>,
    sign: Script<Result<Vec<Vec<u8>>, AdapterError>>,
    authorize_calls: Rc<RefCell<Vec<AuthorizeRequest>>>,
    sign_calls: Rc<RefCell<Vec<Vec<Vec<u8>>>>>,
}

impl ScriptedAdapter {
    pub(crate) fn push_authorize(&self, result: Result<Authorization, AdapterError>) {
        self.authorize.borrow_mut().push_back(result);
    }

    pub(crate) fn push_sign(&self, result: Result<Vec<Vec<u8>>, AdapterError>) {
        self.sign.borrow_mut().push_back(result);
    }

    pub(crate) fn authorize_calls(&self) -> Vec<AuthorizeRequest> {
        self.authorize_calls.borrow().clone()
    }

    pub(crate) fn sign_calls(&self) -> Vec<Vec<Vec<u8>>> {
        self.sign_calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl WalletAdapter for ScriptedAdapter {
    async fn authorize(&self, request: &AuthorizeRequest) -> Result<Authorization, AdapterError> {
        self.authorize_calls.borrow_mut().push(request.clone());
        self.authorize
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(AdapterError::NoWalletFound))
    }

    async fn sign_transactions(
        &self,
        transactions: Vec<Vec<u8>>,
    ) -> Result<Vec<Vec<u8>>, AdapterError> {
        self.sign_calls.borrow_mut().push(transactions);
        self.sign
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(AdapterError::NoWalletFound))
    }
}

#[derive(Clone, Debug)]
pub(crate) struct RecordedRequest {
    pub url: String,
    pub body: Value,
    pub headers: Vec<(String, String)>,
}

impl RecordedRequest {
    pub(crate) fn has_header(&self, name: &str, value: &str) -> bool {
        self.headers.iter().any(|(n, v)| n == name && v == value)
    }

    pub(crate) fn method(&self) -> Option<&str> {
        self.body.get("method").and_then(Value::as_str)
    }
}

// Answers keyed by JSON-RPC method, or by URL for plain endpoints.
// The last answer of a script repeats forever.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    scripts: Rc<RefCell<HashMap<String, VecDeque<Result<Value, HttpError>>>>>,
    requests: Rc<RefCell<Vec<RecordedRequest>>>,
}

impl ScriptedTransport {
    pub(crate) fn push(&self, key: &str, response: Result<Value, HttpError>) {
        self.scripts
            .borrow_mut()
            .entry(key.to_string())
            .or_default()
            .push_back(response);
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn count(&self, method: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.method() == Some(method))
            .count()
    }
}

#[async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &Value,
        headers: &[(String, String)],
    ) -> Result<Value, HttpError> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: url.to_string(),
            body: body.clone(),
            headers: headers.to_vec(),
        });
        let key = body
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or(url)
            .to_string();
        let mut scripts = self.scripts.borrow_mut();
        let Some(script) = scripts.get_mut(&key) else {
            return Err(HttpError::Network(format!("no script for {key}")));
        };
        if script.len() > 1 {
            script.pop_front().unwrap_or(Err(HttpError::Network("empty".to_string())))
        } else {
            script
                .front()
                .cloned()
                .unwrap_or(Err(HttpError::Network("empty".to_string())))
        }
    }
}

// Virtual time: sleeping just advances the clock.
#[derive(Clone, Default)]
pub(crate) struct ManualClock {
    now: Rc<Cell<f64>>,
    sleeps: Rc<RefCell<Vec<u32>>>,
}

impl ManualClock {
    pub(crate) fn sleeps(&self) -> Vec<u32> {
        self.sleeps.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }

    async fn sleep_ms(&self, ms: u32) {
        self.sleeps.borrow_mut().push(ms);
        self.now.set(self.now.get() + f64::from(ms));
    }
}
