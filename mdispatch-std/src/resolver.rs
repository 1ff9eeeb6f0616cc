//! # Dispatch Resolution
//!
//! Request-time entry points. Both run synchronously inside the caller's own
//! routing and return before the caller proceeds.
//!
//! - [`multi_dispatch`] offers the next path segment to every dispatcher of a
//!   namespace; on a match the segment is consumed and the dispatcher runs.
//! - [`dispatch`] runs a dispatcher by name, bypassing pattern matching.
//!
//! Per call the flow is `matching -> resolved -> delegating -> done`, or
//! `matching -> unmatched -> done`. Failures raised by route blocks travel
//! back to the caller untouched.

use crate::{action::Action, registry::Registry};
use mdispatch_core::{DispatchError, DispatchOutcome, Namespace, RoutingRequest, Scope};

/// Run the dispatcher `name` of `namespace` against `scope`.
pub fn dispatch<S: Scope>(
    registry: &Registry<S>,
    scope: &mut S,
    name: &str,
    namespace: &Namespace,
) -> Result<Option<S::Output>, DispatchError> {
    let unit = registry.resolve(namespace, name)?;

    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("dispatch", namespace = ?namespace.as_str(), name).entered();
    #[cfg(feature = "tracing")]
    tracing::debug!("Dispatching");

    Action::new(scope, unit, registry, namespace, name).finish()
}

/// Offer the next path segment to the dispatchers of `namespace`.
///
/// Returns [`DispatchOutcome::Unmatched`] and leaves the path alone when the
/// segment is not a registered name.
pub fn multi_dispatch<S: Scope>(
    registry: &Registry<S>,
    scope: &mut S,
    namespace: &Namespace,
) -> Result<DispatchOutcome<S::Output>, DispatchError> {
    let Some(name) = claim_segment(registry, scope, namespace) else {
        return Ok(DispatchOutcome::Unmatched);
    };
    dispatch(registry, scope, name, namespace).map(DispatchOutcome::Handled)
}

/// Like [`multi_dispatch`], but a matched dispatch answers with `fallback`
/// instead of the dispatcher's own result.
///
/// The dispatcher still runs, so its side effects on the scope are visible
/// to the fallback. A dispatcher failure is returned and the fallback is
/// skipped.
pub fn multi_dispatch_or<S, F>(
    registry: &Registry<S>,
    scope: &mut S,
    namespace: &Namespace,
    fallback: F,
) -> Result<DispatchOutcome<S::Output>, DispatchError>
where
    S: Scope,
    F: FnOnce(&mut S) -> Option<S::Output>,
{
    let Some(name) = claim_segment(registry, scope, namespace) else {
        return Ok(DispatchOutcome::Unmatched);
    };
    dispatch(registry, scope, name, namespace)?;
    Ok(DispatchOutcome::Handled(fallback(scope)))
}

/// Match the next segment and consume it on success.
fn claim_segment<'r, S: Scope>(
    registry: &'r Registry<S>,
    scope: &mut S,
    namespace: &Namespace,
) -> Option<&'r str> {
    let request = scope.request();
    let matched = registry
        .pattern(namespace)?
        .match_segment(request.remaining_path());

    let Some(segment) = matched else {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            namespace = ?namespace.as_str(),
            path = request.remaining_path(),
            "No dispatcher matched"
        );
        return None;
    };

    request.consume(segment.consumed);
    Some(segment.name)
}
