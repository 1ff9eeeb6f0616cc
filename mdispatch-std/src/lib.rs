//! # mdispatch-std
//!
//! Standard implementation of the mdispatch segment dispatch layer.
//!
//! This crate provides:
//! - **Dispatcher units**: [`Dispatcher`], route blocks and named operations
//! - **Delegation**: [`Action`] and the [`Delegate`] capability forwarders
//! - **Pattern compilation**: [`PatternCompiler`], [`CompiledPattern`]
//! - **Registry**: [`Registry`] with reopen, inherit and freeze semantics
//! - **Resolution**: [`resolver::multi_dispatch`], [`resolver::dispatch`]
//! - **Application owner**: [`App`]
//! - **Testing**: a mock framework scope in [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core contracts
pub use mdispatch_core;

// Modules
pub mod action;
pub mod app;
pub mod dispatcher;
pub mod pattern;
pub mod registry;
pub mod resolver;
pub mod testing;

pub use action::{Action, Delegate};
pub use app::App;
pub use dispatcher::{Dispatcher, Operation, RouteBlock};
pub use pattern::{CompiledPattern, PatternCompiler, SegmentMatch};
pub use registry::{Names, Registered, Registration, Registry};
