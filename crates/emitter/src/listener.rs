//! Listener handles with identity semantics

use crate::error::EmitterError;
use std::fmt;
use std::sync::Arc;

/// Signature every listener callable satisfies.
pub type ListenerFn<A> = dyn Fn(&[A]) -> Result<(), EmitterError> + Send + Sync;

/// A registered callable.
///
/// Cloning a `Listener` yields the *same* listener: equality is pointer
/// identity of the shared callable, never structural equality of its body.
/// Two listeners built from identical closures are different listeners.
pub struct Listener<A = serde_json::Value> {
    callback: Arc<ListenerFn<A>>,
}

impl<A> Listener<A> {
    /// Wrap a fallible callable. Returning `Err` aborts the current dispatch.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&[A]) -> Result<(), EmitterError> + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Wrap a callable that cannot fail.
    pub fn infallible<F>(callback: F) -> Self
    where
        F: Fn(&[A]) + Send + Sync + 'static,
    {
        Self::new(move |args: &[A]| {
            callback(args);
            Ok(())
        })
    }

    pub fn call(&self, args: &[A]) -> Result<(), EmitterError> {
        (self.callback)(args)
    }

    /// True when both handles point at the same callable.
    pub fn same_as(&self, other: &Listener<A>) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<A> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<A> PartialEq for Listener<A> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<A> Eq for Listener<A> {}

impl<A> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("callback", &Arc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}
