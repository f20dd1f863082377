// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! UI interaction events that the router and auth guard inspect.

/// Primary (left) mouse button.
pub const PRIMARY_BUTTON: i16 = 0;

/// A click on a link or button, reduced to what navigation cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickEvent {
    pub button: i16,
    pub meta_key: bool,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
    /// `href` attribute of the element the handler is attached to.
    pub href: Option<String>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl ClickEvent {
    /// Plain left click on an element with the given `href`.
    pub fn on_link(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Default::default()
        }
    }

    /// Plain left click on an element without an `href` (e.g. a button).
    pub fn on_button() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Any modifier key held (open in new tab/window and friends).
    pub fn has_modifier(&self) -> bool {
        self.meta_key || self.ctrl_key || self.shift_key || self.alt_key
    }
}
