//! # Ports (Boundaries)
//!
//! Traits isolating the application from infrastructure. The application
//! depends on these; `pricecut-adapters` implements them; the composition root
//! picks which implementation goes where.
//!
//! ## Inputs to an evaluation
//! * [`prediction::PredictionPort`]: fair-value estimate for an item.
//! * [`clock::Clock`]: the current time.
//! * [`items::ItemSource`]: the item snapshots to evaluate.
//!
//! ## Outputs of an evaluation
//! * [`repository::DecisionRepository`]: persists decisions.
//! * [`notification::NotificationPort`]: tells someone a price was cut.
//!
//! ## Rules
//! 1. All items here are traits, no concrete implementations.
//! 2. Signatures use the named records from `pricecut_common::models`.
//! 3. Transport failures are the implementation's problem: a prediction source
//!    answers [`PredictionResult::Failed`](pricecut_common::models::prediction::PredictionResult)
//!    instead of returning an error.

pub mod clock;
pub mod items;
pub mod notification;
pub mod prediction;
pub mod repository;
