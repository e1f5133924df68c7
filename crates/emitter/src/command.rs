//! Registry commands with dynamically typed arguments.
//!
//! A [`Command`] carries its event name and listener as raw JSON values, so a
//! script may hand the registry a number where a name belongs or a listener
//! that does not exist. Those inputs are rejected with
//! [`InvalidArgument`](crate::error::InvalidArgument) before the registry is
//! touched.
//!
//! ```toml
//! [[commands]]
//! op = "on"
//! event = "emitter.example"
//! listener = "log"
//!
//! [[commands]]
//! op = "trigger"
//! event = "emitter.example"
//! args = ["A", "B", "C"]
//!
//! [[commands]]
//! op = "off"
//! event = "emitter.example"
//! ```

use crate::error::{EmitterError, Operation};
use crate::listener::Listener;
use crate::registry::{Registry, Unsubscribe};
use crate::validation::{describe, is_valid_event_name_value, is_valid_listener};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Named listeners a command can refer to.
#[derive(Debug, Clone, Default)]
pub struct ListenerTable {
    listeners: HashMap<String, Listener>,
}

impl ListenerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a named listener, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, listener: Listener) -> Option<Listener> {
        self.listeners.insert(name.into(), listener)
    }

    pub fn with(mut self, name: impl Into<String>, listener: Listener) -> Self {
        self.insert(name, listener);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Listener> {
        self.listeners.get(name)
    }

    /// Resolves a listener reference. Only a string naming a known listener
    /// resolves to a callable.
    pub fn resolve(&self, reference: &Value) -> Option<Listener> {
        reference.as_str().and_then(|name| self.get(name)).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.listeners.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

// Distinguishes an explicit `null` from an omitted field: a present value,
// null included, becomes `Some`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// One registry call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Command {
    On {
        event: Value,
        #[serde(default)]
        listener: Value,
    },
    Once {
        event: Value,
        #[serde(default)]
        listener: Value,
    },
    /// Without `listener` every listener of the event goes; with one (even
    /// `null`) only that listener does.
    Off {
        event: Value,
        #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
        listener: Option<Value>,
    },
    Trigger {
        event: Value,
        #[serde(default)]
        args: Vec<Value>,
    },
}

/// What a command returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// Listener count reported by `on`, `once` and `off`
    Count(usize),
    /// Whether `trigger` reached any listener
    Triggered(bool),
}

impl Command {
    pub fn operation(&self) -> Operation {
        match self {
            Command::On { .. } => Operation::On,
            Command::Once { .. } => Operation::Once,
            Command::Off { .. } => Operation::Off,
            Command::Trigger { .. } => Operation::Trigger,
        }
    }

    /// Validates the arguments and runs the command against `registry`.
    pub fn apply(&self, registry: &Registry, table: &ListenerTable) -> Result<Outcome, EmitterError> {
        let operation = self.operation();
        match self {
            Command::On { event, listener } | Command::Once { event, listener } => {
                let name = event_name(operation, event)?;
                let listener = resolve_listener(operation, table, listener)?;
                registry
                    .subscribe(name, listener, operation == Operation::Once)
                    .map(Outcome::Count)
            }
            Command::Off { event, listener } => {
                let name = event_name(operation, event)?;
                let which = match listener {
                    None => Unsubscribe::All,
                    Some(reference) => {
                        Unsubscribe::One(resolve_listener(operation, table, reference)?)
                    }
                };
                registry.unsubscribe(name, which).map(Outcome::Count)
            }
            Command::Trigger { event, args } => {
                let name = event_name(operation, event)?;
                registry.trigger(name, args).map(Outcome::Triggered)
            }
        }
    }
}

fn event_name(operation: Operation, value: &Value) -> Result<&str, EmitterError> {
    value
        .as_str()
        .filter(|_| is_valid_event_name_value(value))
        .ok_or_else(|| EmitterError::event_name(operation, describe(value)))
}

fn resolve_listener(
    operation: Operation,
    table: &ListenerTable,
    reference: &Value,
) -> Result<Listener, EmitterError> {
    match table.resolve(reference) {
        Some(listener) if is_valid_listener(Some(&listener)) => Ok(listener),
        _ => Err(EmitterError::bad_listener(operation, describe(reference))),
    }
}

/// An ordered list of commands loaded from TOML or JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub commands: Vec<Command>,
}

impl Script {
    /// Parses a TOML document with a `[[commands]]` array.
    pub fn from_toml_str(source: &str) -> Result<Self, EmitterError> {
        Ok(toml::from_str(source)?)
    }

    /// Parses a JSON array of commands.
    pub fn from_json_str(source: &str) -> Result<Self, EmitterError> {
        let commands: Vec<Command> = serde_json::from_str(source)?;
        Ok(Self { commands })
    }

    /// Applies every command in order, stopping at the first error.
    pub fn run(&self, registry: &Registry, table: &ListenerTable) -> Result<Vec<Outcome>, EmitterError> {
        self.commands
            .iter()
            .map(|command| command.apply(registry, table))
            .collect()
    }
}
