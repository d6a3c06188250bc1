//! # Pricecut Core
//!
//! The decision engine and the application layer around it.
//!
//! * **[`pricing`]**: pure rules. Band lookup, cooldown, prediction gate and the
//!   engine that composes them. No IO, no wall clock.
//! * **[`ports`]**: traits the application needs from the outside world
//!   (predictions, time, notifications, storage).
//! * **[`application`]**: the pricing service that drives one evaluation
//!   through the ports, and the atomically reloadable config store.
//!
//! Concrete port implementations live in `pricecut-adapters`; this crate never
//! depends on them.

pub mod application;
pub mod ports;
pub mod pricing;
