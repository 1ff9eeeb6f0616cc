#![allow(dead_code)]

use mdispatch::{prelude::*, testing::MockScope};

// ============================================================================
// Fixture Dispatchers
// ============================================================================

/// `GET` says hello through an operation, `POST` uses the scope's `h` helper.
pub fn hello(d: &mut Dispatcher<MockScope>) {
    d.define("say_hello", |_| Ok(Some("hello".into())));
    d.route(|a| {
        if a.request().is_get() {
            return a.call("say_hello");
        }
        if a.request().is_post() {
            return Ok(Some(a.scope().h("<a>")));
        }
        Ok(None)
    });
}

/// A standalone dispatcher built outside any application.
pub fn goodbye() -> Dispatcher<MockScope> {
    Dispatcher::<MockScope>::new()
        .with_operation("say_goodbye", |_| Ok(Some("goodbye".into())))
        .with_route(|a| {
            if a.request().is_get() {
                a.call("say_goodbye")
            } else {
                Ok(None)
            }
        })
}

/// A dispatcher answering `GET` with a fixed body.
pub fn text(body: &'static str) -> impl FnOnce(&mut Dispatcher<MockScope>) + 'static {
    move |d: &mut Dispatcher<MockScope>| {
        d.route(move |a| Ok(a.request().get(|| body.to_string())));
    }
}

// ============================================================================
// Fixture Application Route
// ============================================================================

/// The application's own route block: offer the first segment to the
/// dispatchers of `namespace`, answer `hi` when none matches.
pub fn serve(
    app: &App<MockScope>,
    namespace: &Namespace,
    method: &str,
    path: &str,
) -> Result<String, DispatchError> {
    let mut scope = MockScope::request_to(method, path);
    match app.multi_dispatch(&mut scope, namespace)? {
        DispatchOutcome::Handled(body) => Ok(body.unwrap_or_default()),
        DispatchOutcome::Unmatched => Ok("hi".into()),
    }
}

pub fn get(app: &App<MockScope>, namespace: &Namespace, path: &str) -> String {
    serve(app, namespace, "GET", path).unwrap()
}
