//! Protocol list controller
//!
//! Loads the catalog once, filters it client-side and expands at most one
//! protocol at a time to fetch its deep analysis. Detail responses are fenced
//! by both a sequence number and the id they were requested for, so a late
//! answer for an abandoned protocol never lands on the current one.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};
use underwriter_core::{Category, ProtocolCatalogEntry, ProtocolDetail};

use crate::config::ErrorPolicy;
use crate::error::validate_identifier;
use crate::remote::RemoteAnalysisClient;
use crate::state::Dispatch;

/// Label of the synthetic "no filter" category
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, entry: &ProtocolCatalogEntry) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => entry.category == *category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(label: &str) -> Self {
        if label == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(Category::from(label))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

/// "All" followed by each distinct category in first-seen order.
pub fn derive_categories(catalog: &[ProtocolCatalogEntry]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for entry in catalog {
        let label = entry.category.as_str();
        if !categories.iter().any(|c| c == label) {
            categories.push(label.to_string());
        }
    }
    categories
}

/// Entries matching `filter`, in catalog order.
pub fn filter_catalog(
    catalog: &[ProtocolCatalogEntry],
    filter: &CategoryFilter,
) -> Vec<ProtocolCatalogEntry> {
    catalog.iter().filter(|e| filter.matches(e)).cloned().collect()
}

/// Everything the protocol explorer renders from
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProtocolSnapshot {
    /// Catalog in the order the service returned it
    pub catalog: Vec<ProtocolCatalogEntry>,
    pub catalog_loading: bool,
    /// Only set when protocol errors are surfaced
    pub catalog_error: Option<String>,
    pub filter: CategoryFilter,
    /// Id of the expanded protocol, if any
    pub expanded: Option<String>,
    /// Deep analysis for `expanded`
    pub detail: Option<ProtocolDetail>,
    pub detail_loading: bool,
    /// Only set when protocol errors are surfaced
    pub detail_error: Option<String>,
    pub catalog_seq: u64,
    pub detail_seq: u64,
}

pub struct ProtocolListController<C: RemoteAnalysisClient + ?Sized> {
    client: Arc<C>,
    policy: ErrorPolicy,
    state: watch::Sender<ProtocolSnapshot>,
}

impl<C: RemoteAnalysisClient + ?Sized> ProtocolListController<C> {
    /// Create a controller whose catalog is still loading. Call `load_catalog` next.
    pub fn new(client: Arc<C>, policy: ErrorPolicy) -> Self {
        let (state, _) = watch::channel(ProtocolSnapshot {
            catalog_loading: true,
            ..ProtocolSnapshot::default()
        });
        Self {
            client,
            policy,
            state,
        }
    }

    /// Create a controller and load the catalog.
    pub async fn mount(client: Arc<C>, policy: ErrorPolicy) -> Self {
        let controller = Self::new(client, policy);
        controller.load_catalog().await;
        controller
    }

    pub fn snapshot(&self) -> ProtocolSnapshot {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProtocolSnapshot> {
        self.state.subscribe()
    }

    /// Fetch the catalog. A failure leaves an empty catalog.
    pub async fn load_catalog(&self) -> Dispatch {
        let mut seq = 0;
        self.state.send_modify(|s| {
            s.catalog_seq += 1;
            seq = s.catalog_seq;
            s.catalog_loading = true;
            s.catalog_error = None;
        });
        debug!(seq, "Loading protocol catalog");

        let (catalog, error, outcome) = match self.client.list_protocols().await {
            Ok(catalog) => (catalog, None, Dispatch::Applied),
            Err(e) => {
                warn!(error = %e, "Protocol catalog unavailable");
                let message = self.policy.surface_protocol_errors.then(|| e.user_message());
                (Vec::new(), message, Dispatch::Failed)
            }
        };

        let count = catalog.len();
        let committed = self.state.send_if_modified(|s| {
            if s.catalog_seq != seq {
                return false;
            }
            s.catalog = catalog;
            s.catalog_error = error;
            s.catalog_loading = false;
            true
        });

        if !committed {
            debug!(seq, "Discarding stale catalog response");
            return Dispatch::Stale;
        }

        info!(count, outcome = outcome.as_str(), "Protocol catalog settled");
        outcome
    }

    /// Filter the loaded catalog by a category label, or "All". Never re-fetches.
    pub fn set_filter(&self, label: &str) {
        let filter = CategoryFilter::from(label);
        self.state.send_if_modified(|s| {
            if s.filter == filter {
                return false;
            }
            s.filter = filter;
            true
        });
    }

    pub fn selected_filter(&self) -> CategoryFilter {
        self.state.borrow().filter.clone()
    }

    pub fn categories(&self) -> Vec<String> {
        derive_categories(&self.state.borrow().catalog)
    }

    pub fn filtered(&self) -> Vec<ProtocolCatalogEntry> {
        let s = self.state.borrow();
        filter_catalog(&s.catalog, &s.filter)
    }

    pub fn is_expanded(&self, protocol_id: &str) -> bool {
        self.state.borrow().expanded.as_deref() == Some(protocol_id)
    }

    /// Deep analysis currently shown for `protocol_id`, if it is the expanded one.
    pub fn detail_for(&self, protocol_id: &str) -> Option<ProtocolDetail> {
        let s = self.state.borrow();
        if s.expanded.as_deref() != Some(protocol_id) {
            return None;
        }
        s.detail.clone()
    }

    /// Collapse `protocol_id` if it is expanded, otherwise expand it and fetch its deep analysis.
    pub async fn toggle(&self, protocol_id: &str) -> Dispatch {
        let protocol_id = match validate_identifier(protocol_id) {
            Ok(id) => id.to_string(),
            Err(_) => {
                debug!("Ignoring blank protocol id");
                return Dispatch::Skipped;
            }
        };

        let mut issued = None;
        self.state.send_modify(|s| {
            s.detail_seq += 1;
            s.detail = None;
            s.detail_error = None;
            if s.expanded.as_deref() == Some(protocol_id.as_str()) {
                s.expanded = None;
                s.detail_loading = false;
            } else {
                s.expanded = Some(protocol_id.clone());
                s.detail_loading = true;
                issued = Some(s.detail_seq);
            }
        });

        let Some(seq) = issued else {
            debug!(protocol_id = %protocol_id, "Collapsed protocol");
            return Dispatch::Collapsed;
        };
        debug!(protocol_id = %protocol_id, seq, "Dispatching protocol deep analysis");

        let (detail, error, outcome) = match self.client.analyze_protocol(&protocol_id).await {
            Ok(detail) => (Some(detail), None, Dispatch::Applied),
            Err(e) => {
                warn!(protocol_id = %protocol_id, seq, error = %e, "Protocol deep analysis failed");
                let message = self.policy.surface_protocol_errors.then(|| e.user_message());
                (None, message, Dispatch::Failed)
            }
        };

        let committed = self.state.send_if_modified(|s| {
            if s.detail_seq != seq || s.expanded.as_deref() != Some(protocol_id.as_str()) {
                return false;
            }
            s.detail = detail;
            s.detail_error = error;
            s.detail_loading = false;
            true
        });

        if !committed {
            debug!(protocol_id = %protocol_id, seq, "Discarding stale deep analysis response");
            return Dispatch::Stale;
        }

        info!(protocol_id = %protocol_id, seq, outcome = outcome.as_str(), "Protocol deep analysis settled");
        outcome
    }
}
