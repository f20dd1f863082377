// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! QCI client: routing, session and presentation helpers for the civic
//! participation web app.
//!
//! This crate is the headless layer under the views. It maps URL paths to
//! view states, guards actions that need a logged-in user, persists the
//! session, talks to the backend API and normalizes the many polygon
//! shapes the backend hands out.

pub mod config;
pub mod date_utils;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod person;
pub mod routes;
pub mod services;
pub mod theme;

use config::Config;
use db::KeyValueStore;
use middleware::AuthGuard;
use models::ClickEvent;
use routes::location::CurrentLocation;
use routes::{Navigation, Router};
use services::{ApiClient, SessionStore, Toaster};
use std::sync::Arc;

/// Shared application state.
///
/// Every field is a cheap clone handle; views take what they need.
#[derive(Clone)]
pub struct App {
    pub config: Config,
    pub session: SessionStore,
    pub toaster: Toaster,
    pub location: CurrentLocation,
    pub guard: AuthGuard,
    pub router: Router,
    pub api: ApiClient,
}

impl App {
    pub fn new(config: Config, storage: Arc<dyn KeyValueStore>) -> error::Result<Self> {
        let session = SessionStore::new(storage);
        let toaster = Toaster::new();
        let location = CurrentLocation::default();
        let guard = AuthGuard::new(session.clone(), toaster.clone(), location.clone());
        let router = Router::new(guard.clone(), location.clone());
        let api = ApiClient::new(&config, session.clone())?;

        tracing::debug!(api_base = %config.api_base, "Application state initialized");

        Ok(Self {
            config,
            session,
            toaster,
            location,
            guard,
            router,
            api,
        })
    }

    /// Navigate to `href` only if the user is logged in.
    pub fn guarded_goto(&self, href: &str, event: Option<&mut ClickEvent>) -> Option<Navigation> {
        self.guard.guarded_goto(&self.router, href, event)
    }
}
