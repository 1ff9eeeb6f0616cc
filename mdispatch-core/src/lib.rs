//! # mdispatch-core
//!
//! Core contracts for the mdispatch path-segment dispatch layer.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! framework adapters that only need to describe their request scope, without
//! pulling in the registry and pattern machinery of `mdispatch-std`.
//!
//! # Collaborator Contracts
//!
//! The dispatch layer never tokenizes paths, matches verbs or builds responses
//! itself. It consumes the surrounding framework through two narrow traits:
//!
//! - [`RoutingRequest`] - the routing primitive: exposes the unconsumed part of
//!   the request path and lets the dispatcher consume a matched segment.
//! - [`Scope`] - the ambient capability set (request, response, environment,
//!   session) a dispatcher borrows while it handles a request.
//!
//! # Outcomes
//!
//! [`DispatchOutcome`] tells the caller whether a registered dispatcher claimed
//! the current segment, or whether its own routing should continue.
//!
//! # Error Types
//!
//! - [`MultiDispatchError`] - Top-level error type
//! - [`RegistryError`] - Setup-time registration errors
//! - [`DispatchError`] - Request-time resolution and handler errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod namespace;
mod outcome;
mod scope;

// Re-exports
pub use error::{BoxError, DispatchError, MultiDispatchError, RegistryError};
pub use namespace::Namespace;
pub use outcome::{DispatchOutcome, RouteResult};
pub use scope::{RoutingRequest, Scope};
