//! # Underwriter Core
//!
//! Data models and pure presentation logic for the ERC-8004 Risk Underwriter client.
//!
//! Risk scores are computed by the remote analysis service. This crate only
//! describes what the service returns, checks that it is well formed, and maps
//! it to the bands, labels and strings a view draws.

pub mod error;
pub mod models;
pub mod presentation;
pub mod render;

pub use error::*;
pub use models::*;
pub use presentation::*;
pub use render::*;
