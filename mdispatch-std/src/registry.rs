//! # Dispatcher Registry
//!
//! Maps namespace -> name -> [`Dispatcher`], and keeps one
//! [`CompiledPattern`] per namespace in sync with the registered names.
//!
//! Patterns are recompiled eagerly on every mutation, so a reader never sees
//! a pattern that disagrees with the name set. Registration is a setup-time,
//! single-threaded activity; [`freeze`](Registry::freeze) marks the end of
//! setup, after which the registry only serves reads and can be shared freely.

use crate::{
    dispatcher::Dispatcher,
    pattern::{CompiledPattern, PatternCompiler},
};
use mdispatch_core::{DispatchError, Namespace, RegistryError, Scope};
use std::{
    collections::{BTreeMap, HashMap, hash_map},
    fmt,
};

/// A block applied to a new or reopened dispatcher.
pub type ReopenBlock<S> = Box<dyn FnOnce(&mut Dispatcher<S>)>;

/// What to register under a name.
pub enum Registration<S: Scope> {
    /// Define a new dispatcher with the block, or reopen the existing one.
    Block(ReopenBlock<S>),
    /// Mount an externally built dispatcher, replacing any existing one.
    Unit(Dispatcher<S>),
    /// Reopen the existing dispatcher with the block if the name is taken
    /// (the unit is dropped), otherwise mount the unit (the block is dropped).
    UnitOrBlock {
        /// Dispatcher mounted when the name is free.
        unit: Dispatcher<S>,
        /// Block applied when the name is taken.
        block: ReopenBlock<S>,
    },
}

impl<S: Scope> Registration<S> {
    /// Define or reopen with a block.
    pub fn block<F>(block: F) -> Self
    where
        F: FnOnce(&mut Dispatcher<S>) + 'static,
    {
        Registration::Block(Box::new(block))
    }

    /// Mount a standalone dispatcher.
    pub fn unit(unit: Dispatcher<S>) -> Self {
        Registration::Unit(unit)
    }

    /// Mount a standalone dispatcher unless the name is taken, in which case
    /// reopen the existing one with the block.
    pub fn unit_or_block<F>(unit: Dispatcher<S>, block: F) -> Self
    where
        F: FnOnce(&mut Dispatcher<S>) + 'static,
    {
        Registration::UnitOrBlock {
            unit,
            block: Box::new(block),
        }
    }
}

/// How a registration changed the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registered {
    /// A new dispatcher was created from a block.
    Defined,
    /// An existing dispatcher was reopened with a block.
    Reopened,
    /// An external dispatcher was mounted under a free name.
    Mounted,
    /// An external dispatcher replaced the existing one.
    Replaced,
}

/// The dispatcher registry of one application.
pub struct Registry<S: Scope> {
    namespaces: BTreeMap<Namespace, HashMap<String, Dispatcher<S>>>,
    patterns: HashMap<Namespace, CompiledPattern>,
    compiler: PatternCompiler,
    frozen: bool,
}

impl<S: Scope> Registry<S> {
    /// Create an empty, unfrozen registry.
    pub fn new() -> Self {
        Self {
            namespaces: BTreeMap::new(),
            patterns: HashMap::new(),
            compiler: PatternCompiler::new(),
            frozen: false,
        }
    }

    /// Register, reopen or replace the dispatcher `name` in `namespace`.
    ///
    /// The namespace pattern is recompiled before this returns. On error the
    /// registry is left unchanged.
    pub fn register(
        &mut self,
        namespace: Namespace,
        name: impl Into<String>,
        registration: Registration<S>,
    ) -> Result<Registered, RegistryError> {
        let name = name.into();
        if self.frozen {
            return Err(RegistryError::Frozen { namespace, name });
        }

        let pattern = self.compile_with(&namespace, &name)?;
        let units = self.namespaces.entry(namespace.clone()).or_default();

        let registered = match (units.entry(name.clone()), registration) {
            (
                hash_map::Entry::Occupied(mut slot),
                Registration::Block(block) | Registration::UnitOrBlock { block, .. },
            ) => {
                block(slot.get_mut());
                Registered::Reopened
            }
            (hash_map::Entry::Occupied(mut slot), Registration::Unit(unit)) => {
                slot.insert(unit);
                Registered::Replaced
            }
            (hash_map::Entry::Vacant(slot), Registration::Block(block)) => {
                let mut unit = Dispatcher::new();
                block(&mut unit);
                slot.insert(unit);
                Registered::Defined
            }
            (
                hash_map::Entry::Vacant(slot),
                Registration::Unit(unit) | Registration::UnitOrBlock { unit, .. },
            ) => {
                slot.insert(unit);
                Registered::Mounted
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            namespace = ?namespace.as_str(),
            name = %name,
            kind = ?registered,
            names = pattern.names().len(),
            "Registered dispatcher"
        );

        self.patterns.insert(namespace, pattern);
        Ok(registered)
    }

    /// All names registered in `namespace`, in no particular order.
    ///
    /// An unknown namespace yields nothing. Call again to restart.
    pub fn names(&self, namespace: &Namespace) -> Names<'_, S> {
        Names {
            inner: self.namespaces.get(namespace).map(HashMap::keys),
        }
    }

    /// Look up a dispatcher.
    pub fn lookup(&self, namespace: &Namespace, name: &str) -> Option<&Dispatcher<S>> {
        self.namespaces.get(namespace)?.get(name)
    }

    /// Look up a dispatcher, failing with [`DispatchError::NotFound`].
    pub fn resolve(
        &self,
        namespace: &Namespace,
        name: &str,
    ) -> Result<&Dispatcher<S>, DispatchError> {
        self.lookup(namespace, name).ok_or_else(|| DispatchError::NotFound {
            namespace: namespace.clone(),
            name: name.to_owned(),
        })
    }

    /// The compiled segment pattern of `namespace`, if anything was ever
    /// registered there.
    pub fn pattern(&self, namespace: &Namespace) -> Option<&CompiledPattern> {
        self.patterns.get(namespace)
    }

    /// Every namespace with at least one registration.
    pub fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        self.namespaces.keys()
    }

    /// Dispatchers that were never given a route block.
    pub fn unrouted(&self) -> impl Iterator<Item = (&Namespace, &str)> {
        self.namespaces.iter().flat_map(|(namespace, units)| {
            units
                .iter()
                .filter(|(_, unit)| !unit.has_route())
                .map(move |(name, _)| (namespace, name.as_str()))
        })
    }

    /// Create the registry of a derived application.
    ///
    /// Every dispatcher is duplicated, so later registrations on either side
    /// are invisible to the other. The copy starts unfrozen.
    pub fn inherit(&self) -> Self {
        Self {
            namespaces: self.namespaces.clone(),
            // Patterns derive from the names alone, and the names are copied as-is.
            patterns: self.patterns.clone(),
            compiler: self.compiler,
            frozen: false,
        }
    }

    /// Reject every further registration. Reads keep working.
    pub fn freeze(&mut self) {
        if !self.frozen {
            #[cfg(feature = "tracing")]
            tracing::info!(dispatchers = self.len(), "Dispatcher registry frozen");
        }
        self.frozen = true;
    }

    /// Returns `true` once [`freeze`](Self::freeze) was called.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Total number of dispatchers across all namespaces.
    pub fn len(&self) -> usize {
        self.namespaces.values().map(HashMap::len).sum()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn compile_with(
        &self,
        namespace: &Namespace,
        name: &str,
    ) -> Result<CompiledPattern, RegistryError> {
        let pattern = self
            .compiler
            .compile(self.names(namespace).chain(std::iter::once(name)))
            .map_err(|e| RegistryError::Pattern {
                namespace: namespace.clone(),
                reason: e.to_string(),
            })?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            namespace = ?namespace.as_str(),
            pattern = ?pattern.as_str(),
            "Compiled dispatcher pattern"
        );

        Ok(pattern)
    }
}

impl<S: Scope> Default for Registry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scope> fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("namespaces", &self.namespaces)
            .field("frozen", &self.frozen)
            .finish()
    }
}

/// Iterator over the names of one namespace. See [`Registry::names`].
pub struct Names<'a, S: Scope> {
    inner: Option<hash_map::Keys<'a, String, Dispatcher<S>>>,
}

impl<'a, S: Scope> Iterator for Names<'a, S> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.as_mut()?.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Some(keys) => keys.size_hint(),
            None => (0, Some(0)),
        }
    }
}

impl<S: Scope> Clone for Names<'_, S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
