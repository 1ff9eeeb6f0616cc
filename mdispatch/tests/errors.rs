//! Failures inside dispatchers reach the caller unmodified.

use mdispatch::{prelude::*, testing::MockScope, MultiDispatchError};
use std::fmt;

mod common;
use common::{serve, text};

#[derive(Debug, PartialEq)]
struct Halt(u16);

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "halted with {}", self.0)
    }
}

impl std::error::Error for Halt {}

fn halting_app() -> App<MockScope> {
    let mut app = App::new();
    app.define_dispatcher("halt", |d| {
        d.define("deny", |_| Err(Halt(403).into()));
        d.route(|a| a.call("deny"));
    })
    .unwrap();
    app
}

#[test]
fn test_handler_error_propagates_through_multi_dispatch() {
    let app = halting_app();
    let err = serve(&app, &Namespace::ROOT, "GET", "/halt").unwrap_err();

    assert_eq!(err.to_string(), "halted with 403");
    let inner = err.into_handler_error().unwrap();
    assert_eq!(inner.downcast_ref::<Halt>(), Some(&Halt(403)));
}

#[test]
fn test_handler_error_propagates_through_dispatch_by_name() {
    let app = halting_app();
    let mut scope = MockScope::request_to("GET", "/");
    let err = app.dispatch(&mut scope, "halt", Namespace::ROOT).unwrap_err();
    assert!(matches!(err, DispatchError::Handler(ref e) if e.is::<Halt>()));
}

#[test]
fn test_nested_lookup_error_is_not_rewrapped() {
    let mut app = App::<MockScope>::new();
    app.define_dispatcher("admin", |d| {
        d.route(|a| Ok(a.dispatch("missing", "admin")?));
    })
    .unwrap();

    let err = serve(&app, &Namespace::ROOT, "GET", "/admin").unwrap_err();
    assert!(matches!(
        err,
        DispatchError::NotFound { ref name, .. } if name == "missing"
    ));
}

#[test]
fn test_dispatcher_without_route_is_reported() {
    let mut app = App::<MockScope>::new();
    app.mount_dispatcher("bare", Dispatcher::new()).unwrap();
    assert!(app.validate().is_err());

    let err = serve(&app, &Namespace::ROOT, "GET", "/bare").unwrap_err();
    assert!(matches!(err, DispatchError::MissingRoute { .. }));
}

#[test]
fn test_errors_convert_into_the_top_level_type() {
    fn setup_and_dispatch() -> Result<Option<String>, MultiDispatchError> {
        let mut app = App::<MockScope>::new();
        app.define_dispatcher("hello", text("hello"))?;
        app.freeze();
        app.define_dispatcher("late", text("late"))?;
        let mut scope = MockScope::request_to("GET", "/hello");
        Ok(app.multi_dispatch(&mut scope, Namespace::ROOT)?.into_body())
    }

    let err = setup_and_dispatch().unwrap_err();
    assert!(matches!(err, MultiDispatchError::Registry(RegistryError::Frozen { .. })));
}
