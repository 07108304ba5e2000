use std::fmt;

use super::adapter::AdapterError;
use super::http::HttpError;

/// Failure of a wallet bridge operation, surfaced to the UI as a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    AlreadyInProgress,
    NoWalletFound,
    ConnectFailed(String),
    SignFailed(String),
    Rpc(String),
    Backend(String),
    ConfirmationTimeout,
    MintDisabled,
    MissingSession,
    InvalidInput(String),
    NotImplemented(&'static str),
    Transport(String),
}

impl WalletError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            WalletError::AlreadyInProgress => "ALREADY_IN_PROGRESS",
            WalletError::NoWalletFound => "NO_WALLET_FOUND",
            WalletError::ConnectFailed(_) => "CONNECT_FAILED",
            WalletError::SignFailed(_) => "SIGN_FAILED",
            WalletError::Rpc(_) => "RPC_ERROR",
            WalletError::Backend(_) => "BACKEND_ERROR",
            WalletError::ConfirmationTimeout => "CONFIRMATION_TIMEOUT",
            WalletError::MintDisabled => "MINT_DISABLED",
            WalletError::MissingSession => "MISSING_SESSION",
            WalletError::InvalidInput(_) => "INVALID_INPUT",
            WalletError::NotImplemented(_) => "NOT_IMPLEMENTED",
            WalletError::Transport(_) => "TRANSPORT",
        }
    }

    /// Map an adapter failure during authorization
    pub(crate) fn from_connect(err: AdapterError) -> Self {
        match err {
            AdapterError::NoWalletFound => WalletError::NoWalletFound,
            AdapterError::Cancelled => {
                WalletError::ConnectFailed("connection cancelled by user".to_string())
            }
            AdapterError::Failure(message) => WalletError::ConnectFailed(message),
        }
    }

    /// Map an adapter failure during signing
    pub(crate) fn from_sign(err: AdapterError) -> Self {
        match err {
            AdapterError::NoWalletFound => WalletError::NoWalletFound,
            AdapterError::Cancelled => WalletError::SignFailed("cancelled in wallet".to_string()),
            AdapterError::Failure(message) => WalletError::SignFailed(message),
        }
    }
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::AlreadyInProgress => write!(f, "Wallet operation already in progress"),
            WalletError::NoWalletFound => write!(f, "No compatible wallet found."),
            WalletError::ConnectFailed(message) => write!(f, "Wallet connection failed: {message}"),
            WalletError::SignFailed(message) => write!(f, "Signing failed: {message}"),
            WalletError::Rpc(message) => write!(f, "RPC Error: {message}"),
            WalletError::Backend(message) => write!(f, "Backend error: {message}"),
            WalletError::ConfirmationTimeout => write!(f, "Transaction confirmation timeout"),
            WalletError::MintDisabled => write!(f, "MintPass disabled"),
            WalletError::MissingSession => write!(f, "Wallet not connected"),
            WalletError::InvalidInput(message) => write!(f, "Invalid input: {message}"),
            WalletError::NotImplemented(op) => write!(f, "{op} is not implemented"),
            WalletError::Transport(message) => write!(f, "Network error: {message}"),
        }
    }
}

impl std::error::Error for WalletError {}

impl From<HttpError> for WalletError {
    fn from(err: HttpError) -> Self {
        WalletError::Transport(err.to_string())
    }
}
