//! # Pricecut Adapters
//!
//! Concrete implementations of the ports declared in `pricecut_core::ports`.
//! This is the only crate of the engine allowed to touch files, the wall clock
//! or timers.
//!
//! * [`clock`]: [`clock::SystemClock`] and the replayable [`clock::FixedClock`].
//! * [`config_file`]: reads and validates the TOML pricing document.
//! * [`items`]: item snapshots from a JSON file.
//! * [`predictions`]: in-memory and file-backed prediction sources.
//! * [`timeout`]: bounds any prediction source in time.
//! * [`notifier`]: reports cuts through `tracing`.
//! * [`repository`]: JSON-lines and in-memory decision storage.

pub mod clock;
pub mod config_file;
pub mod items;
pub mod notifier;
pub mod predictions;
pub mod repository;
pub mod timeout;
