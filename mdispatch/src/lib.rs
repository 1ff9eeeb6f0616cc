//! # mdispatch - Path-Segment Dispatch
//!
//! `mdispatch` lets a single request-handling entry point delegate matched
//! path segments to independently defined dispatchers. Each dispatcher bundles
//! its own route block and helper operations, can live in a namespace, and
//! borrows the caller's request, response, env and session through an action
//! delegate instead of inheriting from the application.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mdispatch::prelude::*;
//!
//! let mut app = App::<MyScope>::new();
//! app.define_dispatcher("hello", |d| {
//!     d.define("say_hello", |_| Ok(Some("hello".to_string())));
//!     d.route(|a| {
//!         if a.request().is_get() {
//!             return a.call("say_hello");
//!         }
//!         Ok(None)
//!     });
//! })?;
//! app.freeze();
//!
//! // inside the framework's route block
//! match app.multi_dispatch(&mut scope, Namespace::ROOT)? {
//!     DispatchOutcome::Handled(body) => body,
//!     DispatchOutcome::Unmatched => fallback_routing(&mut scope),
//! }
//! ```
//!
//! ## Features
//!
//! - `tracing` (default): structured logs for registration, pattern
//!   compilation and dispatch.
//! - `macros` (default): `#[derive(Scope)]` for framework scope structs.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use mdispatch_core::{
    // Error types
    BoxError,
    DispatchError,
    // Outcomes
    DispatchOutcome,
    MultiDispatchError,
    // Namespaces
    Namespace,
    RegistryError,
    RouteResult,
    // Collaborator contracts
    RoutingRequest,
    Scope,
};

pub use mdispatch_std::{
    // Delegation
    Action,
    // Application
    App,
    // Patterns
    CompiledPattern,
    Delegate,
    // Dispatcher units
    Dispatcher,
    // Registry
    Names,
    Operation,
    PatternCompiler,
    Registered,
    Registration,
    Registry,
    RouteBlock,
    SegmentMatch,
};

/// Request-time entry points operating directly on a [`Registry`].
pub mod resolver {
    pub use mdispatch_std::resolver::{dispatch, multi_dispatch, multi_dispatch_or};
}

/// Testing utilities.
pub mod testing {
    pub use mdispatch_std::testing::{MockRequest, MockResponse, MockScope};
}

/// Prelude module - common imports for mdispatch.
///
/// # Usage
///
/// ```rust,ignore
/// use mdispatch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Action, App, Delegate, DispatchError, DispatchOutcome, Dispatcher, Namespace,
        RegistryError, RouteResult, RoutingRequest, Scope,
    };
}

#[cfg(feature = "macros")]
pub use mdispatch_macros::Scope;
