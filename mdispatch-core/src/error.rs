//! Error types for mdispatch.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`MultiDispatchError`] - Top-level error type for all mdispatch operations
//! - [`RegistryError`] - Errors raised while registering dispatchers
//! - [`DispatchError`] - Errors raised while resolving or running a dispatcher

use crate::namespace::Namespace;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
///
/// Route blocks and dispatcher operations report failures with this type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all mdispatch operations.
#[derive(Error, Debug)]
pub enum MultiDispatchError {
    /// An error occurred while registering a dispatcher.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// An error occurred while dispatching a request.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}

/// Errors raised at setup time by the dispatcher registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry was frozen; no dispatcher can be added or reopened.
    #[error("cannot register dispatcher `{name}` in {namespace}: registry is frozen")]
    Frozen {
        /// Namespace the registration targeted.
        namespace: Namespace,
        /// Dispatcher name the registration targeted.
        name: String,
    },

    /// The segment pattern for a namespace could not be compiled.
    #[error("cannot compile dispatcher pattern for {namespace}: {reason}")]
    Pattern {
        /// Namespace whose pattern failed.
        namespace: Namespace,
        /// Compiler diagnostic.
        reason: String,
    },
}

/// Errors raised at request time while resolving or running a dispatcher.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No dispatcher was registered under the given name.
    #[error("no dispatcher named `{name}` in {namespace}")]
    NotFound {
        /// Namespace that was searched.
        namespace: Namespace,
        /// Requested dispatcher name.
        name: String,
    },

    /// The selected dispatcher never had a route block attached.
    #[error("dispatcher `{name}` in {namespace} has no route block")]
    MissingRoute {
        /// Namespace of the dispatcher.
        namespace: Namespace,
        /// Name of the dispatcher.
        name: String,
    },

    /// A route block called an operation the dispatcher does not define.
    #[error("dispatcher has no operation named `{name}`")]
    MissingOperation {
        /// Requested operation name.
        name: String,
    },

    /// A route block or operation failed. The inner error is carried as-is.
    #[error(transparent)]
    Handler(BoxError),
}

impl DispatchError {
    /// Convert an error raised inside a route block.
    ///
    /// A `DispatchError` that bubbled up through a nested dispatch is returned
    /// unchanged instead of being wrapped a second time.
    pub fn from_handler(err: BoxError) -> Self {
        match err.downcast::<DispatchError>() {
            Ok(inner) => *inner,
            Err(err) => DispatchError::Handler(err),
        }
    }

    /// Returns `true` for the unregistered-dispatcher case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DispatchError::NotFound { .. })
    }

    /// Take the handler failure out, if this error came from a route block.
    pub fn into_handler_error(self) -> Option<BoxError> {
        match self {
            DispatchError::Handler(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BoxError> for DispatchError {
    fn from(err: BoxError) -> Self {
        DispatchError::from_handler(err)
    }
}
