//! # Dispatcher Units
//!
//! A dispatcher is a named, reusable bundle of one route block and any number
//! of named operations. It is selected by path segment and then executed in an
//! [`Action`] that borrows the caller's scope.
//!
//! Dispatchers can be reopened: attaching an operation under an existing name
//! overrides it, attaching a route block replaces the previous one, and every
//! other operation is kept.
//!
//! ```rust,ignore
//! let mut hello = Dispatcher::new();
//! hello
//!     .define("say_hello", |_| Ok(Some("hello".to_string())))
//!     .route(|a| {
//!         if a.request().is_get() {
//!             return a.call("say_hello");
//!         }
//!         Ok(None)
//!     });
//! ```

use crate::action::Action;
use mdispatch_core::{RouteResult, Scope};
use std::{collections::HashMap, fmt, sync::Arc};

/// The route block of a dispatcher.
pub type RouteBlock<S> =
    Arc<dyn Fn(&mut Action<'_, S>) -> RouteResult<<S as Scope>::Output> + Send + Sync>;

/// A named operation attached to a dispatcher.
///
/// Operations run in the same action as the route block, so they can use the
/// borrowed scope and call each other.
pub type Operation<S> =
    Arc<dyn Fn(&mut Action<'_, S>) -> RouteResult<<S as Scope>::Output> + Send + Sync>;

/// A dispatcher unit.
///
/// `Clone` duplicates the operation table: a clone can be reopened without
/// affecting the original.
pub struct Dispatcher<S: Scope> {
    route: Option<RouteBlock<S>>,
    operations: HashMap<String, Operation<S>>,
}

impl<S: Scope> Dispatcher<S> {
    /// Create an empty dispatcher with no route block.
    pub fn new() -> Self {
        Self {
            route: None,
            operations: HashMap::new(),
        }
    }

    /// Attach the route block, replacing any previous one.
    pub fn route<F>(&mut self, block: F) -> &mut Self
    where
        F: Fn(&mut Action<'_, S>) -> RouteResult<S::Output> + Send + Sync + 'static,
    {
        self.route = Some(Arc::new(block));
        self
    }

    /// Attach a named operation. A previous operation of the same name is
    /// overridden.
    pub fn define<F>(&mut self, name: impl Into<String>, operation: F) -> &mut Self
    where
        F: Fn(&mut Action<'_, S>) -> RouteResult<S::Output> + Send + Sync + 'static,
    {
        self.operations.insert(name.into(), Arc::new(operation));
        self
    }

    /// Builder form of [`route`](Self::route), for standalone dispatchers.
    pub fn with_route<F>(mut self, block: F) -> Self
    where
        F: Fn(&mut Action<'_, S>) -> RouteResult<S::Output> + Send + Sync + 'static,
    {
        self.route(block);
        self
    }

    /// Builder form of [`define`](Self::define), for standalone dispatchers.
    pub fn with_operation<F>(mut self, name: impl Into<String>, operation: F) -> Self
    where
        F: Fn(&mut Action<'_, S>) -> RouteResult<S::Output> + Send + Sync + 'static,
    {
        self.define(name, operation);
        self
    }

    /// Reopen the dispatcher with more operations and optionally a new route
    /// block.
    ///
    /// Operations accumulate; a reattached name wins. The route block is only
    /// replaced when one is given.
    pub fn extend<I>(&mut self, operations: I, route: Option<RouteBlock<S>>) -> &mut Self
    where
        I: IntoIterator<Item = (String, Operation<S>)>,
    {
        self.operations.extend(operations);
        if let Some(route) = route {
            self.route = Some(route);
        }
        self
    }

    /// Returns `true` if a route block is attached.
    pub fn has_route(&self) -> bool {
        self.route.is_some()
    }

    /// The current route block.
    pub fn route_block(&self) -> Option<&RouteBlock<S>> {
        self.route.as_ref()
    }

    /// Look up an operation by name.
    pub fn operation(&self, name: &str) -> Option<&Operation<S>> {
        self.operations.get(name)
    }

    /// Names of all attached operations, in no particular order.
    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }
}

impl<S: Scope> Default for Dispatcher<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scope> Clone for Dispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            route: self.route.clone(),
            operations: self.operations.clone(),
        }
    }
}

impl<S: Scope> fmt::Debug for Dispatcher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut operations: Vec<_> = self.operation_names().collect();
        operations.sort_unstable();
        f.debug_struct("Dispatcher")
            .field("has_route", &self.has_route())
            .field("operations", &operations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockScope;
    use std::sync::Arc;

    fn text(body: &'static str) -> Operation<MockScope> {
        Arc::new(move |_| Ok(Some(body.to_string())))
    }

    #[test]
    fn new_dispatcher_has_no_route() {
        let unit = Dispatcher::<MockScope>::new();
        assert!(!unit.has_route());
        assert_eq!(unit.operation_names().count(), 0);
    }

    #[test]
    fn reattached_operation_wins_and_others_accumulate() {
        let mut unit = Dispatcher::<MockScope>::new();
        unit.define("a", |_| Ok(Some("a1".into())));
        unit.extend(
            [("a".to_string(), text("a2")), ("b".to_string(), text("b"))],
            None,
        );

        let mut names: Vec<_> = unit.operation_names().collect();
        names.sort_unstable();
        assert_eq!(names, ["a", "b"]);
        assert!(!unit.has_route());
    }

    #[test]
    fn extend_replaces_route_only_when_given() {
        let mut unit = Dispatcher::<MockScope>::new().with_route(|_| Ok(Some("old".into())));
        let before = Arc::clone(unit.route_block().unwrap());

        unit.extend(Vec::new(), None);
        assert!(Arc::ptr_eq(unit.route_block().unwrap(), &before));

        unit.extend(Vec::new(), Some(text("new")));
        assert!(!Arc::ptr_eq(unit.route_block().unwrap(), &before));
    }

    #[test]
    fn clone_has_an_independent_operation_table() {
        let original = Dispatcher::<MockScope>::new().with_operation("a", |_| Ok(None));
        let mut copy = original.clone();
        copy.define("b", |_| Ok(None));

        assert!(original.operation("b").is_none());
        assert!(copy.operation("a").is_some());
    }
}
