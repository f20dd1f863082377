// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - client state and backend access.

pub mod api;
pub mod geo;
pub mod session;
pub mod toast;

pub use api::{ApiClient, ApiResponse, RequestOptions};
pub use session::SessionStore;
pub use toast::{Toast, ToastKind, ToastOptions, Toaster};
