//! Keeps connect/disconnect controls in step with the wallet's connection.

use std::rc::Rc;

use tracing::{debug, error, info, warn};

use bridge_types::{BridgeError, ConnectOptions, WalletConnectionState, WalletEvent};

use crate::config::DomConfig;
use crate::page::Page;
use crate::wallet::Wallet;

pub struct ConnectionSync<W, P> {
    wallet: Rc<W>,
    page: Rc<P>,
    dom: DomConfig,
}

impl<W: Wallet, P: Page> ConnectionSync<W, P> {
    pub fn new(wallet: Rc<W>, page: Rc<P>, dom: DomConfig) -> Self {
        Self { wallet, page, dom }
    }

    /// Reconnect without prompting; only succeeds for a previously trusted site.
    pub async fn connect(&self) -> Result<(), BridgeError> {
        let result = self.wallet.connect(ConnectOptions::TRUSTED_ONLY).await;
        match &result {
            Ok(()) => info!("Connected to wallet"),
            Err(e) => error!("Failed to connect to the wallet: {e}"),
        }
        self.refresh_ui();
        result
    }

    pub async fn disconnect(&self) -> Result<(), BridgeError> {
        let result = self.wallet.disconnect().await;
        match &result {
            Ok(()) => info!("Disconnected from wallet"),
            Err(e) => error!("Failed to disconnect the wallet: {e}"),
        }
        self.refresh_ui();
        result
    }

    /// Show exactly the controls that fit the current connection state.
    pub fn refresh_ui(&self) -> WalletConnectionState {
        let state = self.wallet.connection_state();
        let connected = state.is_connected();

        self.set_visible_by_id(&self.dom.connect_button_id, !connected);
        self.set_visible_by_id(&self.dom.disconnect_button_id, connected);
        for element in self
            .page
            .query_selector_all(self.page.root(), &self.dom.gated_selector())
        {
            self.page.set_visible(element, connected);
        }

        debug!(?state, "refreshed wallet controls");
        state
    }

    /// Connection changes raised by the extension itself.
    pub fn on_wallet_event(&self, event: &WalletEvent) -> WalletConnectionState {
        debug!(?event, "wallet event");
        self.refresh_ui()
    }

    fn set_visible_by_id(&self, id: &str, visible: bool) {
        match self.page.element_by_id(id) {
            Some(element) => self.page.set_visible(element, visible),
            None => warn!(id, "wallet control missing from page"),
        }
    }
}
