//! Testing utilities for mdispatch.
//!
//! A tiny stand-in for a web framework, enough to drive dispatchers in tests.
//!
//! # Features
//!
//! - [`MockRequest`]: verb + path with segment consumption and Roda-style
//!   `on`/`is`/`get`/`post` helpers
//! - [`MockResponse`]: status and headers
//! - [`MockScope`]: request, response, env and session, plus an `h` HTML
//!   escaping helper as an example of a scope-specific capability

use mdispatch_core::{RoutingRequest, Scope};
use std::collections::HashMap;

// ============================================================================
// Mock Request
// ============================================================================

/// A request with a method and a path that routing consumes left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    method: String,
    path: String,
    consumed: usize,
}

impl MockRequest {
    /// Create a request. A path without a leading `/` gets one.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        let mut path = path.into();
        if !path.starts_with('/') {
            path.insert(0, '/');
        }
        Self {
            method: method.into().to_ascii_uppercase(),
            path,
            consumed: 0,
        }
    }

    /// The request method, upper case.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The full request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The part of the path consumed so far.
    pub fn matched_path(&self) -> &str {
        &self.path[..self.consumed]
    }

    /// Returns `true` for `GET` requests.
    pub fn is_get(&self) -> bool {
        self.method == "GET"
    }

    /// Returns `true` for `POST` requests.
    pub fn is_post(&self) -> bool {
        self.method == "POST"
    }

    /// Run `f` if the next segment is `segment`, consuming it.
    pub fn on<O>(&mut self, segment: &str, f: impl FnOnce(&mut Self) -> O) -> Option<O> {
        let len = self.segment_len(segment)?;
        self.consumed += len;
        Some(f(self))
    }

    /// Run `f` if the remaining path is exactly `/segment`.
    pub fn is<O>(&mut self, segment: &str, f: impl FnOnce(&mut Self) -> O) -> Option<O> {
        let len = self.segment_len(segment)?;
        if len != self.remaining_path().len() {
            return None;
        }
        self.consumed += len;
        Some(f(self))
    }

    /// Run `f` for a `GET` request, whatever path remains.
    pub fn get<O>(&self, f: impl FnOnce() -> O) -> Option<O> {
        self.is_get().then(f)
    }

    /// Run `f` for a `POST` request, whatever path remains.
    pub fn post<O>(&self, f: impl FnOnce() -> O) -> Option<O> {
        self.is_post().then(f)
    }

    fn segment_len(&self, segment: &str) -> Option<usize> {
        let rest = self.remaining_path().strip_prefix('/')?;
        let after = rest.strip_prefix(segment)?;
        (after.is_empty() || after.starts_with('/')).then_some(segment.len() + 1)
    }
}

impl RoutingRequest for MockRequest {
    fn remaining_path(&self) -> &str {
        &self.path[self.consumed..]
    }

    /// Advances past `len` bytes. An end inside a multi-byte character is
    /// moved forward to the next character boundary.
    fn consume(&mut self, len: usize) {
        let mut end = (self.consumed + len).min(self.path.len());
        while !self.path.is_char_boundary(end) {
            end += 1;
        }
        self.consumed = end;
    }
}

// ============================================================================
// Mock Response
// ============================================================================

/// A response with a status code and headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    /// HTTP status.
    pub status: u16,
    headers: HashMap<String, String>,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            status: 200,
            headers: HashMap::new(),
        }
    }
}

impl MockResponse {
    /// Set a header, replacing any previous value.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into().to_ascii_lowercase(), value.into());
    }

    /// Read a header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

// ============================================================================
// Mock Scope
// ============================================================================

/// A request scope for tests. Produces `String` bodies.
#[derive(Debug, Clone)]
pub struct MockScope {
    request: MockRequest,
    response: MockResponse,
    env: HashMap<String, String>,
    session: HashMap<String, String>,
}

impl MockScope {
    /// Create a scope around a request.
    pub fn new(request: MockRequest) -> Self {
        Self {
            request,
            response: MockResponse::default(),
            env: HashMap::new(),
            session: HashMap::new(),
        }
    }

    /// Shorthand for `MockScope::new(MockRequest::new(method, path))`.
    pub fn request_to(method: &str, path: &str) -> Self {
        Self::new(MockRequest::new(method, path))
    }

    /// Mutable access to the environment, for test setup.
    pub fn env_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.env
    }

    /// Escape HTML special characters.
    pub fn h(&self, text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                c => escaped.push(c),
            }
        }
        escaped
    }
}

impl Scope for MockScope {
    type Request = MockRequest;
    type Response = MockResponse;
    type Env = HashMap<String, String>;
    type Session = HashMap<String, String>;
    type Output = String;

    fn request(&mut self) -> &mut MockRequest {
        &mut self.request
    }

    fn response(&mut self) -> &mut MockResponse {
        &mut self.response
    }

    fn env(&self) -> &HashMap<String, String> {
        &self.env
    }

    fn session(&mut self) -> &mut HashMap<String, String> {
        &mut self.session
    }
}
