// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-side router: URL paths to published view state.

pub mod location;
pub mod table;

use crate::middleware::AuthGuard;
use crate::models::event::{ClickEvent, PRIMARY_BUTTON};
use crate::models::{RouteName, RouteState};
use location::{CurrentLocation, Location};
use std::sync::Arc;
use table::{RouteTable, RouteTableError};
use tokio::sync::watch;

pub use table::{RouteMatch, PROTECTED_ROUTES, ROUTES};

/// What happened to a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// A route matched and its state was published.
    Routed(RouteState),
    /// A protected route matched without a session; the login prompt was shown.
    Blocked(RouteName),
    /// No route matched; the published state is unchanged.
    NotFound,
}

/// Maps paths to [`RouteState`] and publishes the latest one.
///
/// Clones share the same state, location and subscribers.
#[derive(Clone)]
pub struct Router {
    table: Arc<RouteTable>,
    state: Arc<watch::Sender<RouteState>>,
    location: CurrentLocation,
    guard: AuthGuard,
}

impl Router {
    /// Router over the built-in route table.
    pub fn new(guard: AuthGuard, location: CurrentLocation) -> Self {
        Self::with_table(RouteTable::standard(), guard, location)
    }

    /// Router over a custom route list, validated for literal precedence.
    pub fn with_routes(
        routes: &[(RouteName, &str)],
        protected: &[RouteName],
        guard: AuthGuard,
        location: CurrentLocation,
    ) -> Result<Self, RouteTableError> {
        Ok(Self::with_table(
            RouteTable::new(routes, protected)?,
            guard,
            location,
        ))
    }

    fn with_table(table: RouteTable, guard: AuthGuard, location: CurrentLocation) -> Self {
        let (state, _) = watch::channel(RouteState::home());
        Self {
            table: Arc::new(table),
            state: Arc::new(state),
            location,
            guard,
        }
    }

    /// Resolve the initial location (typically the page's URL at load).
    pub fn start(&self, initial_href: &str) -> Navigation {
        tracing::debug!(href = initial_href, "Starting router");
        self.navigate(initial_href)
    }

    /// Match a path without any side effect.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        self.table.resolve(path)
    }

    /// Navigate to an in-app href.
    ///
    /// The location always follows the href. The route state only advances
    /// when a route matches and, for protected routes, a session exists.
    pub fn navigate(&self, href: &str) -> Navigation {
        let location = Location::parse(href);
        self.location.set(location.clone());

        let Some(matched) = self.table.resolve(&location.pathname) else {
            tracing::debug!(path = %location.pathname, "No route matched");
            return Navigation::NotFound;
        };

        if matched.protected && !self.guard.is_authenticated() {
            tracing::info!(route = %matched.name, "Protected route requires a session");
            self.guard.prompt_login();
            return Navigation::Blocked(matched.name);
        }

        let state = RouteState {
            name: matched.name,
            params: matched.params,
            path: location.pathname,
        };
        tracing::debug!(route = %state.name, path = %state.path, "Route changed");
        self.state.send_replace(state.clone());
        Navigation::Routed(state)
    }

    /// Handle a click on an in-app anchor without a full page load.
    ///
    /// Returns `None` when the browser should handle the click itself:
    /// already handled, non-primary button, modifier keys, missing href,
    /// or an external / `mailto:` link.
    pub fn intercept_click(&self, event: &mut ClickEvent) -> Option<Navigation> {
        if event.default_prevented() || event.button != PRIMARY_BUTTON || event.has_modifier() {
            return None;
        }

        let href = event.href.clone()?;
        if href.is_empty() || href.starts_with("http") || href.starts_with("mailto:") {
            return None;
        }

        event.prevent_default();
        Some(self.navigate(&href))
    }

    /// Navigate only if the auth guard allows it.
    pub fn guarded_goto(&self, href: &str, event: Option<&mut ClickEvent>) -> Option<Navigation> {
        self.guard.guarded_goto(self, href, event)
    }

    /// Latest published route.
    pub fn current(&self) -> RouteState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RouteState> {
        self.state.subscribe()
    }

    pub fn location(&self) -> Location {
        self.location.get()
    }
}
