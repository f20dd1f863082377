// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Navigation middleware (authentication guard).

pub mod auth;

pub use auth::{login_href, AuthGuard};
