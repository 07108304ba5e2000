//! Game pass state shown next to the wallet controls

use super::bridge::{GateResult, MintResult};
use super::error::WalletError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PassState {
    #[default]
    Idle,
    Checking,
    Active,
    PassRequired,
    Minting,
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub struct PassGate {
    state: PassState,
    status: String,
}

impl PassGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PassState {
        &self.state
    }

    pub fn status_text(&self) -> &str {
        &self.status
    }

    fn set(&mut self, state: PassState, status: impl Into<String>) {
        self.state = state;
        self.status = status.into();
    }

    pub fn begin_check(&mut self) {
        self.set(PassState::Checking, "Checking for Game Pass...");
    }

    pub fn finish_check(&mut self, result: Result<GateResult, WalletError>) {
        match result {
            Ok(gate) if gate.passed => self.set(PassState::Active, "Game Pass activated!"),
            Ok(_) => self.set(PassState::PassRequired, "Pass required to play."),
            Err(err) => {
                log::warn!("Gate check failed: {err}");
                let message = err.to_string();
                self.set(
                    PassState::Error(message.clone()),
                    format!("Gate Check Error: {message}"),
                );
            }
        }
    }

    /// False while a mint is already pending
    pub fn begin_mint(&mut self) -> bool {
        if self.state == PassState::Minting {
            return false;
        }
        self.set(PassState::Minting, "Confirm in wallet...");
        true
    }

    pub fn finish_mint(&mut self, result: Result<MintResult, WalletError>) {
        match result {
            Ok(minted) if minted.passed => {
                self.set(PassState::Active, "Mint successful! Pass is now active.")
            }
            Ok(minted) => {
                log::info!("Mint {} confirmed but pass not indexed yet", minted.signature);
                self.set(
                    PassState::PassRequired,
                    "Mint confirmed. Pass not visible yet, check again shortly.",
                );
            }
            Err(err) => {
                log::warn!("Mint failed: {err}");
                let message = err.to_string();
                self.set(PassState::Error(message.clone()), format!("Mint failed: {message}"));
            }
        }
    }

    pub fn reset(&mut self) {
        self.set(PassState::Idle, "");
    }

    pub fn has_pass(&self) -> bool {
        self.state == PassState::Active
    }

    /// Whether the mint button should be offered
    pub fn can_mint(&self) -> bool {
        matches!(self.state, PassState::PassRequired | PassState::Error(_))
    }
}
