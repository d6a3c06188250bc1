//! # Domain Models
//!
//! Explicit named records exchanged between the engine and its collaborators.
//!
//! * [`item::Item`]: a priced listing snapshot, supplied per evaluation.
//! * [`prediction::PredictionResult`]: what the prediction source answered.
//! * [`decision::Decision`]: the engine's verdict, created fresh per call.

pub mod decision;
pub mod item;
pub mod prediction;
