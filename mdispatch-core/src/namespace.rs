//! Namespaces partition dispatcher names into independent groups.

use std::{borrow::Cow, fmt};

/// A grouping key for dispatcher names.
///
/// The root namespace (no namespace at all) is a group of its own. Names must
/// be unique within a namespace but may repeat across namespaces.
///
/// Static names borrow their string, so `Namespace::from("admin")` does not
/// allocate on the request path. A name only known at runtime goes through
/// `From<String>` or [`Namespace::named`] with an owned string, for example
/// `Namespace::named(segment.to_owned())`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(Option<Cow<'static, str>>);

impl Namespace {
    /// The absence-of-namespace group.
    pub const ROOT: Namespace = Namespace(None);

    /// The root namespace.
    pub const fn root() -> Self {
        Self::ROOT
    }

    /// A named namespace.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self(Some(name.into()))
    }

    /// The namespace name, or `None` for the root namespace.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Returns `true` for the root namespace.
    pub fn is_root(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(name) => write!(f, "namespace `{}`", name),
            None => f.write_str("the root namespace"),
        }
    }
}

impl From<&'static str> for Namespace {
    fn from(name: &'static str) -> Self {
        Self::named(name)
    }
}

impl From<String> for Namespace {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}

impl From<Option<&'static str>> for Namespace {
    fn from(name: Option<&'static str>) -> Self {
        Self(name.map(Cow::Borrowed))
    }
}

impl From<&Namespace> for Namespace {
    fn from(namespace: &Namespace) -> Self {
        namespace.clone()
    }
}
