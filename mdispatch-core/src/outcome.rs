//! Results produced by route blocks and by segment dispatch.

use crate::error::BoxError;

/// What a route block or dispatcher operation returns.
///
/// `Ok(None)` means the block ran but contributed no body (for instance no
/// verb matched inside it).
pub type RouteResult<O> = Result<Option<O>, BoxError>;

/// The result of offering the current path segment to the registered
/// dispatchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome<O> {
    /// A dispatcher claimed the segment and ran; carries its contribution.
    Handled(Option<O>),
    /// No registered name matched; the path was left unconsumed.
    Unmatched,
}

impl<O> DispatchOutcome<O> {
    /// Returns `true` if a dispatcher ran.
    pub fn is_handled(&self) -> bool {
        matches!(self, DispatchOutcome::Handled(_))
    }

    /// Returns `true` if no dispatcher matched.
    pub fn is_unmatched(&self) -> bool {
        matches!(self, DispatchOutcome::Unmatched)
    }

    /// The body contributed by the dispatcher, if one ran and produced one.
    pub fn into_body(self) -> Option<O> {
        match self {
            DispatchOutcome::Handled(body) => body,
            DispatchOutcome::Unmatched => None,
        }
    }

    /// Map the carried body.
    pub fn map<U>(self, f: impl FnOnce(O) -> U) -> DispatchOutcome<U> {
        match self {
            DispatchOutcome::Handled(body) => DispatchOutcome::Handled(body.map(f)),
            DispatchOutcome::Unmatched => DispatchOutcome::Unmatched,
        }
    }
}
