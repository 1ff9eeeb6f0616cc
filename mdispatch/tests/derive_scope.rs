//! `#[derive(Scope)]` on a framework scope struct.

#![cfg(feature = "macros")]

use mdispatch::{
    prelude::*,
    testing::{MockRequest, MockResponse},
};
use std::collections::HashMap;

#[derive(Scope)]
#[scope(output = String)]
struct AppScope {
    #[scope(request)]
    req: MockRequest,
    #[scope(response)]
    res: MockResponse,
    #[scope(env)]
    env: HashMap<String, String>,
    #[scope(session)]
    session: HashMap<String, String>,
    greeting: &'static str,
}

impl AppScope {
    fn new(method: &str, path: &str) -> Self {
        Self {
            req: MockRequest::new(method, path),
            res: MockResponse::default(),
            env: HashMap::from([("SERVER_NAME".to_string(), "example.org".to_string())]),
            session: HashMap::new(),
            greeting: "hello",
        }
    }
}

#[derive(Scope)]
#[scope(output = Vec<u8>)]
struct TupleScope(
    #[scope(request)] MockRequest,
    #[scope(response)] MockResponse,
    #[scope(env)] (),
    #[scope(session)] Vec<String>,
);

#[test]
fn test_derived_scope_forwards_capabilities() {
    let mut app = App::<AppScope>::new();
    app.define_dispatcher("hello", |d| {
        d.route(|a| {
            a.session().insert("user".into(), "alice".into());
            let server = a.env()["SERVER_NAME"].clone();
            a.response().set_header("x-server", server);
            let greeting = a.scope().greeting;
            Ok(a.request().get(|| greeting.to_string()))
        });
    })
    .unwrap();

    let mut scope = AppScope::new("GET", "/hello");
    let outcome = app.multi_dispatch(&mut scope, Namespace::ROOT).unwrap();

    assert_eq!(outcome.into_body().as_deref(), Some("hello"));
    assert_eq!(scope.session["user"], "alice");
    assert_eq!(scope.res.header("x-server"), Some("example.org"));
    assert_eq!(scope.req.remaining_path(), "");
}

#[test]
fn test_derive_supports_tuple_structs() {
    let mut app = App::<TupleScope>::new();
    app.define_dispatcher_in("bytes", "log", |d| {
        d.route(|a| {
            a.session().push("logged".into());
            Ok(Some(b"ok".to_vec()))
        });
    })
    .unwrap();

    let mut scope = TupleScope(
        MockRequest::new("GET", "/log"),
        MockResponse::default(),
        (),
        Vec::new(),
    );
    let body = app.multi_dispatch(&mut scope, "bytes").unwrap().into_body();

    assert_eq!(body, Some(b"ok".to_vec()));
    assert_eq!(scope.3, ["logged"]);
}
