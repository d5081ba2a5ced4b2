//! Wallet analysis controller
//!
//! Single-address flow: one result at a time, each submit replaces the last.
//! Every submit takes a sequence number; a response is committed only if no
//! newer submit has started since, so late responses never overwrite newer state.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};
use underwriter_core::WalletAnalysisPayload;

use crate::error::validate_identifier;
use crate::remote::RemoteAnalysisClient;
use crate::state::{Dispatch, RequestState};

/// Preset wallets offered as one-click examples
pub const EXAMPLE_WALLETS: [&str; 3] = [
    "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045",
    "0xBE0eB53F46cd790Cd13851d5EFf43D12404d33E8",
    "0x47ac0Fb4F2D84898e4D9E7b4DaB3C24507a6D503",
];

/// Everything the wallet view renders from
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WalletSnapshot {
    /// Current contents of the address field
    pub input: String,
    pub request: RequestState<WalletAnalysisPayload>,
    /// Sequence number of the most recently issued request
    pub request_seq: u64,
}

pub struct WalletAnalysisController<C: RemoteAnalysisClient + ?Sized> {
    client: Arc<C>,
    state: watch::Sender<WalletSnapshot>,
}

impl<C: RemoteAnalysisClient + ?Sized> WalletAnalysisController<C> {
    pub fn new(client: Arc<C>) -> Self {
        let (state, _) = watch::channel(WalletSnapshot::default());
        Self { client, state }
    }

    pub fn snapshot(&self) -> WalletSnapshot {
        self.state.borrow().clone()
    }

    pub fn state(&self) -> RequestState<WalletAnalysisPayload> {
        self.state.borrow().request.clone()
    }

    /// Receive a notification on every state change.
    pub fn subscribe(&self) -> watch::Receiver<WalletSnapshot> {
        self.state.subscribe()
    }

    pub fn examples(&self) -> &'static [&'static str] {
        &EXAMPLE_WALLETS
    }

    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_if_modified(|s| {
            if s.input == text {
                return false;
            }
            s.input = text;
            true
        });
    }

    /// Submission is disabled while loading or while the field is blank.
    pub fn can_submit(&self) -> bool {
        let s = self.state.borrow();
        !s.request.is_loading() && !s.input.trim().is_empty()
    }

    /// Submit whatever is in the address field.
    pub async fn submit_input(&self) -> Dispatch {
        let input = self.state.borrow().input.clone();
        self.submit(&input).await
    }

    /// Fill the field with a preset address and submit it immediately.
    pub async fn choose_example(&self, address: &str) -> Dispatch {
        self.set_input(address);
        self.submit(address).await
    }

    /// Analyze `address`. Blank input is a no-op; failures are not retried.
    pub async fn submit(&self, address: &str) -> Dispatch {
        let address = match validate_identifier(address) {
            Ok(address) => address.to_string(),
            Err(_) => {
                debug!("Ignoring blank wallet address");
                return Dispatch::Skipped;
            }
        };

        let mut seq = 0;
        self.state.send_modify(|s| {
            s.request_seq += 1;
            seq = s.request_seq;
            s.request = RequestState::Loading;
        });
        debug!(wallet = %address, seq, "Dispatching wallet analysis");

        let (next, outcome) = match self.client.analyze_wallet(&address).await {
            Ok(payload) => (RequestState::Succeeded(payload), Dispatch::Applied),
            Err(e) => {
                warn!(wallet = %address, seq, error = %e, "Wallet analysis failed");
                (RequestState::Failed(e.user_message()), Dispatch::Failed)
            }
        };

        let committed = self.state.send_if_modified(|s| {
            if s.request_seq != seq {
                return false;
            }
            s.request = next;
            true
        });

        if !committed {
            debug!(wallet = %address, seq, "Discarding stale wallet analysis response");
            return Dispatch::Stale;
        }

        info!(wallet = %address, seq, outcome = outcome.as_str(), "Wallet analysis settled");
        outcome
    }
}
