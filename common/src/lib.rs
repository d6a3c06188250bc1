//! # Pricecut Common
//!
//! Shared vocabulary of the price-cut engine.
//!
//! * **[`models`]**: the records that cross layer boundaries ([`models::item::Item`],
//!   [`models::prediction::PredictionResult`], [`models::decision::Decision`]).
//! * **[`config`]**: the validated, immutable pricing configuration.
//!
//! Nothing in this crate performs IO. Reading files, talking to prediction
//! services and storing decisions are adapter concerns.

pub mod config;
pub mod models;
