//! # select_core
//!
//! UI-agnostic semantics for the searchable select widget:
//! - [`WidgetConfig`]: per-instance configuration read from root-element
//!   attributes
//! - [`classify`]: the minimum-length gate deciding between a debounced
//!   search and an immediate clear
//! - [`DebounceGate`]: deadline-based coalescing of search text
//!
//! ## Design Principles
//!
//! This crate does not depend on the DOM model, the message bus, or any
//! timer facility. Time enters only as `Instant` arguments supplied by the
//! integration layer, which makes every guarantee here testable without
//! sleeping.

mod config;
mod debounce;
mod search;

pub use config::{DEFAULT_DEBOUNCE_MS, DEFAULT_MIN_LEN, WidgetConfig};
pub use debounce::DebounceGate;
pub use search::{SearchAction, classify};
