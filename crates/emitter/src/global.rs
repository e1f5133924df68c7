//! Process-wide default registry and module-level shortcuts.
//!
//! These wrap one lazily created [`Registry`] that lives for the rest of the
//! process. Code that needs isolation should create its own `Registry`.

use crate::error::EmitterError;
use crate::listener::Listener;
use crate::registry::{Registry, Unsubscribe};
use serde_json::Value;
use std::sync::OnceLock;

static DEFAULT_REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The shared registry behind [`on`], [`once`], [`off`] and [`trigger`].
pub fn default_registry() -> &'static Registry {
    DEFAULT_REGISTRY.get_or_init(Registry::new)
}

/// Subscribe `listener` to every trigger of `event_name`.
pub fn on(event_name: &str, listener: Listener) -> Result<usize, EmitterError> {
    default_registry().on(event_name, listener)
}

/// Subscribe `listener` for the next trigger of `event_name` only.
pub fn once(event_name: &str, listener: Listener) -> Result<usize, EmitterError> {
    default_registry().once(event_name, listener)
}

/// Remove all listeners of `event_name`, or a single one.
pub fn off(event_name: &str, which: Unsubscribe) -> Result<usize, EmitterError> {
    default_registry().off(event_name, which)
}

pub fn off_all(event_name: &str) -> Result<usize, EmitterError> {
    default_registry().off_all(event_name)
}

pub fn off_one(event_name: &str, listener: &Listener) -> Result<usize, EmitterError> {
    default_registry().off_one(event_name, listener)
}

/// Trigger `event_name` with optional arguments.
pub fn trigger(event_name: &str, args: &[Value]) -> Result<bool, EmitterError> {
    default_registry().trigger(event_name, args)
}
