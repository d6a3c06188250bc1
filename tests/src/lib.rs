//! Cross-crate checks: pricing scenarios driven through real adapters, and
//! the dependency direction between the workspace layers.

mod layering;
mod scenarios;
