//! Install prompt state machine.
//!
//! # Invariants
//! - A prompt token is handed out at most once.
//! - `Installed` is terminal for the session.

use log::info;

/// Result of showing the platform install prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
}

impl InstallOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Dismissed => "dismissed",
        }
    }
}

/// Platform side of the install flow.
///
/// `Token` is whatever the platform hands over with an install offer; it is
/// never inspected here.
pub trait InstallPromptBroker {
    type Token;

    fn prompt_install(&mut self, token: Self::Token) -> InstallOutcome;

    /// Whether the app already runs in standalone/installed display mode.
    fn is_standalone(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallState<T> {
    NotAvailable,
    Available(T),
    Installed,
}

/// Tracks whether the "install app" affordance should be shown.
#[derive(Debug, Clone)]
pub struct InstallAffordance<T> {
    state: InstallState<T>,
}

impl<T> InstallAffordance<T> {
    /// Starts `Installed` when already running standalone.
    pub fn new(standalone: bool) -> Self {
        let state = if standalone {
            InstallState::Installed
        } else {
            InstallState::NotAvailable
        };
        Self { state }
    }

    pub fn from_broker<B: InstallPromptBroker<Token = T>>(broker: &B) -> Self {
        Self::new(broker.is_standalone())
    }

    pub fn state(&self) -> &InstallState<T> {
        &self.state
    }

    /// Records a platform install offer.
    ///
    /// A newer offer replaces an unused older token. Returns `false` once
    /// installed, since offers are ignored from then on.
    pub fn offer_available(&mut self, token: T) -> bool {
        if self.is_installed() {
            return false;
        }
        self.state = InstallState::Available(token);
        true
    }

    /// Consumes the pending token, moving back to `NotAvailable`.
    pub fn take_prompt_token(&mut self) -> Option<T> {
        match std::mem::replace(&mut self.state, InstallState::NotAvailable) {
            InstallState::Available(token) => Some(token),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Shows the prompt for the pending offer, if any.
    ///
    /// The token is consumed whatever the user answers.
    pub fn prompt<B: InstallPromptBroker<Token = T>>(
        &mut self,
        broker: &mut B,
    ) -> Option<InstallOutcome> {
        let token = self.take_prompt_token()?;
        let outcome = broker.prompt_install(token);
        info!(
            "event=install_prompt module=install status=ok outcome={}",
            outcome.as_str()
        );
        Some(outcome)
    }

    pub fn mark_installed(&mut self) {
        if !self.is_installed() {
            info!("event=app_installed module=install status=ok");
        }
        self.state = InstallState::Installed;
    }

    /// Whether the install button should be offered.
    pub fn can_prompt(&self) -> bool {
        matches!(self.state, InstallState::Available(_))
    }

    pub fn is_installed(&self) -> bool {
        matches!(self.state, InstallState::Installed)
    }
}
