//! The application-side owner of a dispatcher registry.
//!
//! An [`App`] is set up once (dispatchers defined, reopened or mounted), then
//! optionally frozen and shared. Derived applications start from a deep copy
//! of their base via [`App::inherit`].

use crate::{
    dispatcher::Dispatcher,
    registry::{Names, Registered, Registration, Registry},
    resolver,
};
use mdispatch_core::{DispatchError, DispatchOutcome, Namespace, RegistryError, Scope};

/// An application that delegates path segments to named dispatchers.
///
/// # Example
///
/// ```rust,ignore
/// let mut app = App::new();
/// app.define_dispatcher("hello", |d| {
///     d.define("say_hello", |_| Ok(Some("hello".into())));
///     d.route(|a| a.call("say_hello"));
/// })?;
/// app.define_dispatcher_in("somebody", "yarn", |d| {
///     d.route(|_| Ok(Some("somebody yarned".into())));
/// })?;
/// app.freeze();
///
/// // per request
/// match app.multi_dispatch(&mut scope, Namespace::ROOT)? {
///     DispatchOutcome::Handled(body) => body,
///     DispatchOutcome::Unmatched => Some("hi".into()),
/// }
/// ```
pub struct App<S: Scope> {
    registry: Registry<S>,
}

impl<S: Scope> App<S> {
    /// Create an application with no dispatchers.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Define `name` in the root namespace, or reopen it if it exists.
    pub fn define_dispatcher<F>(
        &mut self,
        name: impl Into<String>,
        block: F,
    ) -> Result<Registered, RegistryError>
    where
        F: FnOnce(&mut Dispatcher<S>) + 'static,
    {
        self.define_dispatcher_in(Namespace::ROOT, name, block)
    }

    /// Define `name` in `namespace`, or reopen it if it exists.
    pub fn define_dispatcher_in<F>(
        &mut self,
        namespace: impl Into<Namespace>,
        name: impl Into<String>,
        block: F,
    ) -> Result<Registered, RegistryError>
    where
        F: FnOnce(&mut Dispatcher<S>) + 'static,
    {
        self.registry
            .register(namespace.into(), name, Registration::block(block))
    }

    /// Mount a standalone dispatcher under `name` in the root namespace.
    pub fn mount_dispatcher(
        &mut self,
        name: impl Into<String>,
        unit: Dispatcher<S>,
    ) -> Result<Registered, RegistryError> {
        self.mount_dispatcher_in(Namespace::ROOT, name, unit)
    }

    /// Mount a standalone dispatcher under `name` in `namespace`, replacing
    /// whatever was there.
    pub fn mount_dispatcher_in(
        &mut self,
        namespace: impl Into<Namespace>,
        name: impl Into<String>,
        unit: Dispatcher<S>,
    ) -> Result<Registered, RegistryError> {
        self.registry
            .register(namespace.into(), name, Registration::unit(unit))
    }

    /// Mount `unit` if `name` is free in `namespace`; otherwise reopen the
    /// existing dispatcher with `block` and drop `unit`.
    pub fn mount_or_reopen_in<F>(
        &mut self,
        namespace: impl Into<Namespace>,
        name: impl Into<String>,
        unit: Dispatcher<S>,
        block: F,
    ) -> Result<Registered, RegistryError>
    where
        F: FnOnce(&mut Dispatcher<S>) + 'static,
    {
        self.registry.register(
            namespace.into(),
            name,
            Registration::unit_or_block(unit, block),
        )
    }

    /// Names registered in `namespace`.
    pub fn dispatcher_names(&self, namespace: impl Into<Namespace>) -> Names<'_, S> {
        self.registry.names(&namespace.into())
    }

    /// The dispatcher registered as `name` in `namespace`.
    pub fn dispatcher(
        &self,
        name: &str,
        namespace: impl Into<Namespace>,
    ) -> Option<&Dispatcher<S>> {
        self.registry.lookup(&namespace.into(), name)
    }

    /// Check that every registered dispatcher has a route block.
    pub fn validate(&self) -> Result<(), DispatchError> {
        match self.registry.unrouted().next() {
            Some((namespace, name)) => Err(DispatchError::MissingRoute {
                namespace: namespace.clone(),
                name: name.to_owned(),
            }),
            None => Ok(()),
        }
    }

    /// Create a derived application with its own copy of every dispatcher.
    pub fn inherit(&self) -> Self {
        Self {
            registry: self.registry.inherit(),
        }
    }

    /// End setup: every later registration fails.
    pub fn freeze(&mut self) {
        self.registry.freeze();
    }

    /// Returns `true` once frozen.
    pub fn is_frozen(&self) -> bool {
        self.registry.is_frozen()
    }

    /// The underlying registry.
    pub fn registry(&self) -> &Registry<S> {
        &self.registry
    }

    /// Offer the next path segment to the dispatchers of `namespace`.
    pub fn multi_dispatch(
        &self,
        scope: &mut S,
        namespace: impl Into<Namespace>,
    ) -> Result<DispatchOutcome<S::Output>, DispatchError> {
        resolver::multi_dispatch(&self.registry, scope, &namespace.into())
    }

    /// Offer the next path segment, answering a match with `fallback`.
    pub fn multi_dispatch_or<F>(
        &self,
        scope: &mut S,
        namespace: impl Into<Namespace>,
        fallback: F,
    ) -> Result<DispatchOutcome<S::Output>, DispatchError>
    where
        F: FnOnce(&mut S) -> Option<S::Output>,
    {
        resolver::multi_dispatch_or(&self.registry, scope, &namespace.into(), fallback)
    }

    /// Run the dispatcher `name` of `namespace` unconditionally.
    pub fn dispatch(
        &self,
        scope: &mut S,
        name: &str,
        namespace: impl Into<Namespace>,
    ) -> Result<Option<S::Output>, DispatchError> {
        resolver::dispatch(&self.registry, scope, name, &namespace.into())
    }
}

impl<S: Scope> Default for App<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scope> std::fmt::Debug for App<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App").field("registry", &self.registry).finish()
    }
}
