//! Domain models for the tariff catalog.
//!
//! This module contains the tariff variants with their cost model, and the
//! TOML catalog file used to seed a manager.

/// Tariff records and their cost model.
pub mod tariff;
pub use tariff::{BasicPlan, FamilyPlan, Plan, PremiumPlan, Tariff};

mod catalog;
pub use catalog::{CatalogFile, DEFAULT_RANGE, LoadError};
