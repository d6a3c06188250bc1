//! # Pricing Rules
//!
//! Each submodule answers one question about an item:
//!
//! * [`band`]: which price band governs the current price?
//! * [`cooldown`]: has the band's cooldown passed since the last cut?
//! * [`prediction`]: is there a prediction the engine can use?
//! * [`engine`]: given all of that, how much should the price drop?
//!
//! Everything here is a synchronous function of its arguments. Evaluations for
//! different items can run in parallel without coordination.

pub mod band;
pub mod cooldown;
pub mod engine;
pub mod prediction;
