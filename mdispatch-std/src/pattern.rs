//! # Segment Patterns
//!
//! Compiles the registered dispatcher names of one namespace into a single
//! alternation that recognizes any of them as the next path segment.
//!
//! Names are sorted longest first (then in descending byte order) before they
//! are joined, so a name that is a prefix of another (`a` and `ab`) can never
//! shadow the longer one. Names are escaped; they are matched literally.
//!
//! A pattern anchors at the start of the unconsumed path: it expects a `/`,
//! one of the names, then either another `/` or the end of the path.

use regex::Regex;
use std::cmp::Ordering;

/// Compiles name sets into [`CompiledPattern`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternCompiler;

impl PatternCompiler {
    /// Create a compiler.
    pub const fn new() -> Self {
        Self
    }

    /// Compile a set of names into one segment pattern.
    ///
    /// Deterministic for a given set regardless of input order. Duplicate
    /// names are collapsed. An empty set compiles to a pattern that never
    /// matches.
    pub fn compile<I, N>(&self, names: I) -> Result<CompiledPattern, regex::Error>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort_unstable_by(|a, b| longest_first(a, b));
        names.dedup();

        if names.is_empty() {
            return Ok(CompiledPattern::never());
        }

        let alternation = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&format!("^/({})(?:/|$)", alternation))?;

        Ok(CompiledPattern {
            regex: Some(regex),
            names,
        })
    }
}

fn longest_first(a: &str, b: &str) -> Ordering {
    b.len().cmp(&a.len()).then_with(|| b.cmp(a))
}

/// A compiled segment pattern for one namespace.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Option<Regex>,
    names: Vec<String>,
}

/// A segment recognized by a [`CompiledPattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentMatch<'p> {
    /// The registered name that matched.
    pub name: &'p str,
    /// Bytes of the path to consume: the leading `/` and the name.
    pub consumed: usize,
}

impl CompiledPattern {
    /// A pattern that never matches anything.
    pub const fn never() -> Self {
        Self {
            regex: None,
            names: Vec::new(),
        }
    }

    /// Match the next segment of `path`.
    ///
    /// The returned name borrows from the pattern, not from `path`, so the
    /// caller is free to consume the path afterwards.
    pub fn match_segment(&self, path: &str) -> Option<SegmentMatch<'_>> {
        let regex = self.regex.as_ref()?;
        let captured = regex.captures(path)?.get(1)?;
        let name = self.names.iter().find(|n| n.as_str() == captured.as_str())?;
        Some(SegmentMatch {
            name: name.as_str(),
            consumed: captured.end(),
        })
    }

    /// Returns `true` if the next segment of `path` is a registered name.
    pub fn is_match(&self, path: &str) -> bool {
        self.match_segment(path).is_some()
    }

    /// The names in match order (longest first).
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The regular expression source, or `None` for the never-matching
    /// pattern.
    pub fn as_str(&self) -> Option<&str> {
        self.regex.as_ref().map(Regex::as_str)
    }
}

impl Default for CompiledPattern {
    fn default() -> Self {
        Self::never()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(names: &[&str]) -> CompiledPattern {
        PatternCompiler::new()
            .compile(names.iter().copied())
            .unwrap()
    }

    #[test]
    fn orders_longest_names_first() {
        let pattern = compile(&["a", "abc", "ab", "b"]);
        assert_eq!(pattern.names(), ["abc", "ab", "b", "a"]);
    }

    #[test]
    fn prefix_never_shadows_longer_name() {
        for names in [["a", "ab"], ["ab", "a"]] {
            let pattern = compile(&names);
            let hit = pattern.match_segment("/ab").unwrap();
            assert_eq!(hit.name, "ab");
            assert_eq!(hit.consumed, 3);
        }
    }

    #[test]
    fn matches_whole_segments_only() {
        let pattern = compile(&["hello"]);
        assert_eq!(pattern.match_segment("/hello").unwrap().consumed, 6);
        assert_eq!(pattern.match_segment("/hello/world").unwrap().consumed, 6);
        assert!(!pattern.is_match("/hellothere"));
        assert!(!pattern.is_match("hello"));
        assert!(!pattern.is_match("/x/hello"));
        assert!(!pattern.is_match(""));
    }

    #[test]
    fn names_are_matched_literally() {
        let pattern = compile(&["a.b", "c+"]);
        assert!(pattern.is_match("/a.b"));
        assert!(!pattern.is_match("/axb"));
        assert!(pattern.is_match("/c+"));
        assert!(!pattern.is_match("/cc"));
    }

    #[test]
    fn empty_set_never_matches() {
        let pattern = compile(&[]);
        assert!(pattern.as_str().is_none());
        assert!(!pattern.is_match("/"));
        assert!(!pattern.is_match("/anything"));
        assert!(!pattern.is_match(""));
    }

    #[test]
    fn recompiling_is_stable() {
        let first = compile(&["yarn", "hello", "hi"]);
        let second = compile(&["hi", "yarn", "hello"]);
        assert_eq!(first.as_str(), second.as_str());
        for path in ["/hello", "/hi", "/yarn/x", "/h", "/", "/dwa"] {
            assert_eq!(first.is_match(path), second.is_match(path), "{path}");
        }
    }
}
