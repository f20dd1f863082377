// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Current browser location (path, query, fragment).

use reqwest::Url;
use std::sync::{Arc, RwLock};

/// Placeholder origin in-app hrefs are resolved against.
const APP_ORIGIN: &str = "http://localhost/";

/// A parsed in-app href.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path component, always starting with `/`.
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
    /// Fragment including the leading `#`, or empty.
    pub hash: String,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            pathname: "/".to_string(),
            search: String::new(),
            hash: String::new(),
        }
    }
}

impl Location {
    /// Split an href such as `/ideas/3?tab=votos#top`.
    ///
    /// The href is resolved against the app origin, so relative paths are
    /// anchored at the root, dot segments collapse and unsafe characters are
    /// percent-encoded. Anything that fails to parse is the root.
    pub fn parse(href: &str) -> Self {
        let url = match Url::parse(APP_ORIGIN).and_then(|base| base.join(href)) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(href, error = %e, "Unparseable href");
                return Self::default();
            }
        };

        Self {
            pathname: url.path().to_string(),
            search: url
                .query()
                .filter(|q| !q.is_empty())
                .map(|q| format!("?{}", q))
                .unwrap_or_default(),
            hash: url
                .fragment()
                .filter(|f| !f.is_empty())
                .map(|f| format!("#{}", f))
                .unwrap_or_default(),
        }
    }

    /// Path plus query: what a login redirect should bring the user back to.
    pub fn path_and_query(&self) -> String {
        format!("{}{}", self.pathname, self.search)
    }

    /// Full href including the fragment.
    pub fn href(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }
}

/// Shared handle on the current location.
///
/// The router writes it on every navigation; the auth guard reads it to
/// build the return-to link.
#[derive(Clone, Default)]
pub struct CurrentLocation {
    inner: Arc<RwLock<Location>>,
}

impl CurrentLocation {
    pub fn new(initial: Location) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn get(&self) -> Location {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn set(&self, location: Location) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = location;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_href() {
        let loc = Location::parse("/ideas/3?tab=votos&x=1#comentarios");
        assert_eq!(loc.pathname, "/ideas/3");
        assert_eq!(loc.search, "?tab=votos&x=1");
        assert_eq!(loc.hash, "#comentarios");
        assert_eq!(loc.path_and_query(), "/ideas/3?tab=votos&x=1");
    }

    #[test]
    fn test_parse_bare_and_relative() {
        assert_eq!(Location::parse(""), Location::default());
        assert_eq!(Location::parse("?q=1").pathname, "/");
        assert_eq!(Location::parse("ideas").pathname, "/ideas");
        assert_eq!(Location::parse("/ideas?").search, "");
    }

    #[test]
    fn test_parse_normalizes_path() {
        assert_eq!(Location::parse("/ideas/../propuestas/./3").pathname, "/propuestas/3");
        assert_eq!(
            Location::parse("/ideas/parque central").pathname,
            "/ideas/parque%20central"
        );
        assert_eq!(Location::parse("https://otro.example/usuario?x=1").path_and_query(), "/usuario?x=1");
    }

    #[test]
    fn test_shared_handle() {
        let a = CurrentLocation::default();
        let b = a.clone();
        a.set(Location::parse("/usuario"));
        assert_eq!(b.get().pathname, "/usuario");
    }
}
