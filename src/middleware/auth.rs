// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication guard for clicks and protected navigation.

use crate::models::event::ClickEvent;
use crate::routes::location::CurrentLocation;
use crate::routes::{Navigation, Router};
use crate::services::toast::{ToastLink, ToastOptions, Toaster};
use crate::services::SessionStore;

/// Login page path.
pub const LOGIN_PATH: &str = "/auth/login";

const LOGIN_PROMPT_MESSAGE: &str = "No hay usuario autenticado";
const LOGIN_PROMPT_LINK: &str = "Iniciar sesión/Registrarse";

/// Login link that returns the user to `return_to` afterwards.
pub fn login_href(return_to: &str) -> String {
    format!("{}?returnTo={}", LOGIN_PATH, urlencoding::encode(return_to))
}

/// Decides whether an action needing a session may proceed.
///
/// When it may not, the guard swallows the triggering event and shows a
/// login prompt pointing back at the current location.
#[derive(Clone)]
pub struct AuthGuard {
    session: SessionStore,
    toaster: Toaster,
    location: CurrentLocation,
}

impl AuthGuard {
    pub fn new(session: SessionStore, toaster: Toaster, location: CurrentLocation) -> Self {
        Self {
            session,
            toaster,
            location,
        }
    }

    /// Guard a user click. Returns `true` if the caller may continue.
    ///
    /// `target_href` only adds context to logs; the login prompt always
    /// returns to where the user currently is.
    pub fn require_auth_click(
        &self,
        event: Option<&mut ClickEvent>,
        target_href: Option<&str>,
    ) -> bool {
        if self.session.is_authenticated() {
            return true;
        }

        let target = target_href
            .map(str::to_string)
            .or_else(|| event.as_ref().and_then(|e| e.href.clone()));

        if let Some(event) = event {
            event.prevent_default();
            event.stop_propagation();
        }

        tracing::info!(target = ?target, "Blocked action that requires a session");
        self.prompt_login();
        false
    }

    /// Navigate through the router only when the guard allows it.
    ///
    /// Returns `None` when the guard blocked the navigation.
    pub fn guarded_goto(
        &self,
        router: &Router,
        href: &str,
        event: Option<&mut ClickEvent>,
    ) -> Option<Navigation> {
        if !self.require_auth_click(event, Some(href)) {
            return None;
        }
        Some(router.navigate(href))
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Show the login toast for the current location. Returns the toast id.
    pub fn prompt_login(&self) -> u64 {
        let return_to = self.location.get().path_and_query();
        self.toaster.push(
            LOGIN_PROMPT_MESSAGE,
            ToastOptions {
                link: Some(ToastLink {
                    label: LOGIN_PROMPT_LINK.to_string(),
                    href: login_href(&return_to),
                }),
                ..Default::default()
            },
        )
    }
}
