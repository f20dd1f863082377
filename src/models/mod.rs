// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod event;
pub mod geometry;
pub mod route;
pub mod session;

pub use event::ClickEvent;
pub use geometry::{LatLng, Ring};
pub use route::{RouteGroup, RouteName, RouteState};
pub use session::{AuthUser, Session, UserId};
