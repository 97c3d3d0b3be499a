//! In-memory catalog of mobile-telephony tariff plans.
//!
//! Tariffs are kept in a singly-linked [`TariffList`] and queried through a
//! [`TariffManager`].

pub mod domain;
pub use domain::{CatalogFile, Plan, Tariff};

/// Singly-linked sequence container.
pub mod list;
pub use list::TariffList;

pub mod manager;
pub use manager::TariffManager;
