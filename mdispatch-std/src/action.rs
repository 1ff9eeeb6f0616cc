//! # Action Delegates
//!
//! An [`Action`] is the short-lived execution context of one dispatch. It binds
//! the caller's scope for exactly as long as the dispatcher runs, and gives
//! the route block access to the scope's capabilities without the dispatcher
//! inheriting from the application.
//!
//! Capability forwarding is done by the [`Delegate`] trait: implementors
//! provide access to the bound scope and get pass-through forwarders for the
//! fixed capability set (request, response, env, session) for free. Anything
//! else the concrete scope exposes is reached through [`Delegate::scope_mut`].

use crate::{dispatcher::Dispatcher, registry::Registry, resolver};
use mdispatch_core::{DispatchError, DispatchOutcome, Namespace, RouteResult, Scope};

/// Forwards the scope capabilities onto a delegate.
///
/// Every forwarder is a pure pass-through to the same-named [`Scope`] method.
/// Implementing this trait never touches the scope type itself.
pub trait Delegate<S: Scope> {
    /// The bound scope.
    fn scope(&self) -> &S;

    /// The bound scope, mutably.
    fn scope_mut(&mut self) -> &mut S;

    /// Forwards to [`Scope::request`].
    fn request<'s>(&'s mut self) -> &'s mut S::Request
    where
        S: 's,
    {
        self.scope_mut().request()
    }

    /// Forwards to [`Scope::response`].
    fn response<'s>(&'s mut self) -> &'s mut S::Response
    where
        S: 's,
    {
        self.scope_mut().response()
    }

    /// Forwards to [`Scope::env`].
    fn env<'s>(&'s self) -> &'s S::Env
    where
        S: 's,
    {
        self.scope().env()
    }

    /// Forwards to [`Scope::session`].
    fn session<'s>(&'s mut self) -> &'s mut S::Session
    where
        S: 's,
    {
        self.scope_mut().session()
    }
}

/// The execution context of one dispatch.
///
/// Created by the resolver for every dispatch and dropped when
/// [`finish`](Action::finish) returns; it is never cached across requests.
pub struct Action<'a, S: Scope> {
    scope: &'a mut S,
    unit: &'a Dispatcher<S>,
    registry: &'a Registry<S>,
    namespace: &'a Namespace,
    name: &'a str,
}

impl<'a, S: Scope> Action<'a, S> {
    pub(crate) fn new(
        scope: &'a mut S,
        unit: &'a Dispatcher<S>,
        registry: &'a Registry<S>,
        namespace: &'a Namespace,
        name: &'a str,
    ) -> Self {
        Self {
            scope,
            unit,
            registry,
            namespace,
            name,
        }
    }

    /// Run the dispatcher's route block against the bound scope.
    ///
    /// Failures raised by the block are propagated unmodified.
    pub fn finish(&mut self) -> Result<Option<S::Output>, DispatchError> {
        let unit = self.unit;
        let Some(route) = unit.route_block() else {
            return Err(DispatchError::MissingRoute {
                namespace: self.namespace.clone(),
                name: self.name.to_owned(),
            });
        };
        route(self).map_err(DispatchError::from_handler)
    }

    /// Invoke a named operation of the dispatcher.
    pub fn call(&mut self, operation: &str) -> RouteResult<S::Output> {
        let unit = self.unit;
        match unit.operation(operation) {
            Some(op) => op(self),
            None => Err(Box::new(DispatchError::MissingOperation {
                name: operation.to_owned(),
            })),
        }
    }

    /// Dispatch unconditionally to another registered dispatcher.
    pub fn dispatch(
        &mut self,
        name: &str,
        namespace: impl Into<Namespace>,
    ) -> Result<Option<S::Output>, DispatchError> {
        resolver::dispatch(self.registry, &mut *self.scope, name, &namespace.into())
    }

    /// Offer the current path segment to the dispatchers of `namespace`.
    pub fn multi_dispatch(
        &mut self,
        namespace: impl Into<Namespace>,
    ) -> Result<DispatchOutcome<S::Output>, DispatchError> {
        resolver::multi_dispatch(self.registry, &mut *self.scope, &namespace.into())
    }

    /// The name this dispatcher was selected under.
    pub fn name(&self) -> &str {
        self.name
    }

    /// The namespace this dispatcher was selected from.
    pub fn namespace(&self) -> &Namespace {
        self.namespace
    }
}

impl<S: Scope> Delegate<S> for Action<'_, S> {
    fn scope(&self) -> &S {
        &*self.scope
    }

    fn scope_mut(&mut self) -> &mut S {
        &mut *self.scope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockRequest, MockScope};
    use mdispatch_core::RoutingRequest;

    fn run(
        unit: &Dispatcher<MockScope>,
        scope: &mut MockScope,
    ) -> Result<Option<String>, DispatchError> {
        let registry = Registry::new();
        let namespace = Namespace::ROOT;
        Action::new(scope, unit, &registry, &namespace, "unit").finish()
    }

    #[test]
    fn finish_runs_the_route_block() {
        let unit = Dispatcher::<MockScope>::new().with_route(|_| Ok(Some("hi".into())));
        let mut scope = MockScope::new(MockRequest::new("GET", "/"));
        assert_eq!(run(&unit, &mut scope).unwrap().as_deref(), Some("hi"));
    }

    #[test]
    fn forwarders_reach_the_bound_scope() {
        let unit = Dispatcher::<MockScope>::new().with_route(|a| {
            a.session().insert("seen".into(), "yes".into());
            a.response().set_header("x-dispatcher", "unit");
            let user = a.env().get("REMOTE_USER").cloned();
            let path = a.request().remaining_path().to_owned();
            Ok(Some(format!("{}:{}", user.unwrap_or_default(), path)))
        });

        let mut scope = MockScope::new(MockRequest::new("GET", "/rest"));
        scope.env_mut().insert("REMOTE_USER".into(), "alice".into());

        assert_eq!(run(&unit, &mut scope).unwrap().as_deref(), Some("alice:/rest"));
        assert_eq!(scope.session().get("seen").map(String::as_str), Some("yes"));
        assert_eq!(scope.response().header("x-dispatcher"), Some("unit"));
    }

    #[test]
    fn missing_route_is_reported() {
        let unit = Dispatcher::<MockScope>::new();
        let mut scope = MockScope::new(MockRequest::new("GET", "/"));
        let err = run(&unit, &mut scope).unwrap_err();
        assert!(matches!(err, DispatchError::MissingRoute { .. }));
    }

    #[test]
    fn missing_operation_surfaces_as_dispatch_error() {
        let unit = Dispatcher::<MockScope>::new().with_route(|a| a.call("nope"));
        let mut scope = MockScope::new(MockRequest::new("GET", "/"));
        let err = run(&unit, &mut scope).unwrap_err();
        assert!(matches!(err, DispatchError::MissingOperation { ref name } if name == "nope"));
    }

    #[test]
    fn operations_can_use_the_scope() {
        let unit = Dispatcher::<MockScope>::new()
            .with_operation("escaped", |a| Ok(Some(a.scope().h("<a>"))))
            .with_route(|a| a.call("escaped"));
        let mut scope = MockScope::new(MockRequest::new("POST", "/"));
        assert_eq!(run(&unit, &mut scope).unwrap().as_deref(), Some("&lt;a&gt;"));
    }
}
