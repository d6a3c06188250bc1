//! # Application Layer
//!
//! Use cases built on top of [`crate::pricing`] and [`crate::ports`].
//!
//! It holds no pricing rules of its own. It:
//! 1. reads the current configuration from the [`config_store::ConfigStore`];
//! 2. gathers inputs through the outbound ports;
//! 3. calls the engine;
//! 4. hands the result to the output ports.
//!
//! ## Contents
//! * [`pricing::PricingService`]: evaluates items end to end.
//! * [`config_store::ConfigStore`]: shared, atomically replaceable configuration.

pub mod config_store;
pub mod pricing;
