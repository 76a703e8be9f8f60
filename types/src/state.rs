//! Wallet connection state and the small value types around it.

use serde::{Deserialize, Serialize};

/// Whether the wallet extension currently has an authorized session with the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WalletConnectionState {
    #[default]
    Disconnected,
    Connected,
}

impl WalletConnectionState {
    pub fn from_connected(connected: bool) -> Self {
        if connected {
            Self::Connected
        } else {
            Self::Disconnected
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// Options passed to the wallet's `connect` capability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectOptions {
    /// Only reconnect when the user already trusted this site; never prompt.
    pub only_if_trusted: bool,
}

impl ConnectOptions {
    pub const TRUSTED_ONLY: Self = Self {
        only_if_trusted: true,
    };
}

/// Result of a wallet-side sign-and-broadcast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendReceipt {
    /// Network transaction signature reported by the wallet.
    pub signature: String,
}

/// Connection changes the wallet extension may emit on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletEvent {
    Connected,
    Disconnected,
    AccountChanged(Option<String>),
}
