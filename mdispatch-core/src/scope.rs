//! # Collaborator Contracts
//!
//! The surrounding web framework owns path tokenizing, verb matching and
//! response construction. A dispatcher only ever sees it through the two
//! traits in this module.
//!
//! - [`RoutingRequest`] is the routing primitive: "match the current
//!   unconsumed segment, consume it, continue".
//! - [`Scope`] is the fixed capability set a dispatcher borrows from the
//!   calling context: request, response, environment and session.

/// The routing primitive of the surrounding framework.
///
/// Segment dispatch is implemented purely in terms of these two calls; it adds
/// no wire-level behavior of its own.
pub trait RoutingRequest {
    /// The part of the request path not yet consumed by routing, including
    /// its leading `/` (empty once the whole path is consumed).
    fn remaining_path(&self) -> &str;

    /// Mark the first `len` bytes of [`remaining_path`](Self::remaining_path)
    /// as consumed.
    fn consume(&mut self, len: usize);
}

/// The ambient capabilities of one request.
///
/// A dispatcher never inherits from the application; it borrows exactly these
/// capabilities through its action delegate for the duration of one dispatch.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as a dispatch scope",
    label = "missing `Scope` implementation",
    note = "Implement `Scope` (or `#[derive(Scope)]`) to expose request, response, env and session."
)]
pub trait Scope {
    /// The request routing primitive.
    type Request: RoutingRequest;
    /// The response-building object.
    type Response;
    /// The environment mapping.
    type Env;
    /// The session mapping.
    type Session;
    /// The response contribution a route block produces (usually a body).
    type Output;

    /// The active request.
    fn request(&mut self) -> &mut Self::Request;

    /// The response under construction.
    fn response(&mut self) -> &mut Self::Response;

    /// The request environment.
    fn env(&self) -> &Self::Env;

    /// The session.
    fn session(&mut self) -> &mut Self::Session;
}
