//! # Emitter
//!
//! A small synchronous publish/subscribe utility. Listeners are registered
//! against event names, optionally as one-shot, and are called in
//! registration order when the event is triggered.
//!
//! ## Key Features
//!
//! - **Explicit registries**: create as many independent [`Registry`] values as needed
//! - **Process-wide default**: [`on`], [`once`], [`off`] and [`trigger`] share one lazily built registry
//! - **Snapshot dispatch**: listeners may subscribe, unsubscribe or trigger while a dispatch runs
//! - **Fail fast**: bad arguments return [`InvalidArgument`] instead of a sentinel
//!
//! ## Usage
//!
//! ```rust
//! use emitter::{Listener, Registry, Unsubscribe};
//! use serde_json::json;
//!
//! let registry = Registry::new();
//! let greet = Listener::infallible(|args: &[serde_json::Value]| {
//!     println!("hello {:?}", args);
//! });
//!
//! assert_eq!(registry.on("greet", greet.clone())?, 1);
//! assert!(registry.trigger("greet", &[json!("world")])?);
//! assert_eq!(registry.off("greet", Unsubscribe::One(greet))?, 0);
//! assert!(!registry.trigger("greet", &[])?);
//! # Ok::<(), emitter::EmitterError>(())
//! ```
//!
//! Listeners return `Result`: the first `Err` stops the dispatch and is
//! handed back to the caller of `trigger`.

pub mod command;
pub mod error;
pub mod global;
pub mod listener;
pub mod registry;
pub mod validation;


pub use command::{Command, ListenerTable, Outcome, Script};
pub use error::{EmitterError, InvalidArgument, Operation};
pub use global::{default_registry, off, off_all, off_one, on, once, trigger};
pub use listener::{Listener, ListenerFn};
pub use registry::{EventEntry, Registry, Subscriptions, Unsubscribe};
pub use validation::{count_listeners, has_event, is_valid_event_name, is_valid_listener};

/// Version of this crate
pub const EMITTER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, EmitterError>;
