//! The page-facing entry point that owns the wallet, backend and page handles.

use std::rc::Rc;

use serde_json::json;
use tracing::{debug, warn};

use bridge_types::{BridgeError, SendReceipt, WalletConnectionState, WalletEvent};

use crate::backend::Backend;
use crate::config::BridgeConfig;
use crate::connection::ConnectionSync;
use crate::mount::{Action, Bindings};
use crate::orchestrator::{SigningOrchestrator, SubmitOutcome};
use crate::page::{ElementId, Page};
use crate::wallet::{public_key_of, Wallet};

pub struct Bridge<W, B, P> {
    config: BridgeConfig,
    wallet: Rc<W>,
    page: Rc<P>,
    sync: ConnectionSync<W, P>,
    orchestrator: SigningOrchestrator<W, B, P>,
    bindings: Bindings,
}

impl<W: Wallet, B: Backend, P: Page> Bridge<W, B, P> {
    /// Wire the page once it has loaded.
    ///
    /// Without a wallet extension nothing is wired and
    /// [`BridgeError::WalletAbsent`] is returned.
    pub fn init(
        wallet: Option<W>,
        backend: B,
        page: P,
        config: BridgeConfig,
    ) -> Result<Self, BridgeError> {
        let Some(wallet) = wallet else {
            let err = BridgeError::WalletAbsent;
            tracing::info!("{err}.");
            return Err(err);
        };

        let wallet = Rc::new(wallet);
        let page = Rc::new(page);
        let bridge = Self {
            sync: ConnectionSync::new(wallet.clone(), page.clone(), config.dom.clone()),
            orchestrator: SigningOrchestrator::new(
                wallet.clone(),
                backend,
                page.clone(),
                config.dom.clone(),
            ),
            bindings: Bindings::new(),
            config,
            wallet,
            page,
        };

        for (id, action) in [
            (&bridge.config.dom.connect_button_id, Action::Connect),
            (&bridge.config.dom.disconnect_button_id, Action::Disconnect),
        ] {
            match bridge.page.element_by_id(id) {
                Some(element) => {
                    bridge.bindings.bind(element, action);
                }
                None => warn!(id = %id, "wallet control missing from page"),
            }
        }

        bridge.sync.refresh_ui();
        Ok(bridge)
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn backend(&self) -> &B {
        self.orchestrator.backend()
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// No signing flow is currently waiting on the wallet or backend.
    pub fn is_idle(&self) -> bool {
        self.orchestrator.in_flight().is_empty()
    }

    /// Mount hook for freshly inserted content.
    ///
    /// When the transaction modal is on the page, binds the action buttons
    /// and sign triggers inside `container`. Returns how many elements were
    /// newly bound; calling it again for the same content returns 0.
    pub fn attach(&self, container: ElementId) -> usize {
        self.bindings.retain(|element| self.page.contains(element));

        let dom = &self.config.dom;
        if self
            .page
            .query_selector(self.page.root(), &dom.modal_selector)
            .is_none()
        {
            return 0;
        }
        debug!("Found the modal");

        // Triggers go first: a button carrying both a payload and an endpoint
        // signs its payload.
        let mut bound = 0;
        for trigger in self
            .page
            .query_selector_all(container, &dom.sign_trigger_selector())
        {
            bound += usize::from(self.bindings.bind(trigger, Action::SignAndSubmit));
        }
        for button in self
            .page
            .query_selector_all(container, &dom.action_button_selector())
        {
            debug!(?button, "Found action button");
            bound += usize::from(self.bindings.bind(button, Action::SignAndSend));
        }
        bound
    }

    /// Run whatever is bound to `element`. Failures are already logged by the flows.
    pub async fn click(&self, element: ElementId) -> Option<Action> {
        let Some(action) = self.bindings.action_for(element) else {
            debug!(?element, "click on unbound element");
            return None;
        };

        match action {
            Action::Connect => {
                let _ = self.connect().await;
            }
            Action::Disconnect => {
                let _ = self.disconnect().await;
            }
            Action::SignAndSubmit => {
                let _ = self.sign_and_submit(element).await;
            }
            Action::SignAndSend => match self
                .page
                .attribute(element, &self.config.dom.endpoint_attr)
            {
                Some(endpoint) => {
                    let _ = self.sign_and_send(&endpoint).await;
                }
                None => warn!(?element, "action button has no endpoint"),
            },
        }
        Some(action)
    }

    pub async fn connect(&self) -> Result<(), BridgeError> {
        self.sync.connect().await
    }

    pub async fn disconnect(&self) -> Result<(), BridgeError> {
        self.sync.disconnect().await
    }

    pub fn refresh_ui(&self) -> WalletConnectionState {
        self.sync.refresh_ui()
    }

    /// Forward an event the extension emitted on its own.
    pub fn on_wallet_event(&self, event: &WalletEvent) -> WalletConnectionState {
        self.sync.on_wallet_event(event)
    }

    /// Sign-and-submit, then mount whatever the backend swapped in.
    pub async fn sign_and_submit(&self, trigger: ElementId) -> Result<SubmitOutcome, BridgeError> {
        let outcome = self.orchestrator.sign_and_submit(trigger).await?;
        if let Some(content) = outcome.swapped {
            self.attach(content);
        }
        Ok(outcome)
    }

    pub async fn sign_and_send(&self, endpoint: &str) -> Result<SendReceipt, BridgeError> {
        self.orchestrator.sign_and_send(endpoint).await
    }

    /// Current public key, or an empty string while disconnected.
    pub fn public_key(&self) -> String {
        public_key_of(Some(self.wallet.as_ref()))
    }

    /// Extra request values the page framework attaches to modal requests.
    pub fn request_values(&self) -> serde_json::Value {
        json!({ "pubkey": self.public_key() })
    }
}
