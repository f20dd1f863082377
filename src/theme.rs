// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Brand palette, serialized with daisyUI theme key names.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub neutral: &'static str,
    #[serde(rename = "base-100")]
    pub base_100: &'static str,
    pub info: &'static str,
    pub success: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
}

pub const THEME: Theme = Theme {
    primary: "#37AA56",
    secondary: "#ecd06f",
    accent: "#F8F8F8",
    neutral: "#A63F02",
    base_100: "#F2F0EB",
    info: "#0093dc",
    success: "#00b156",
    warning: "#facc15",
    error: "#f25776",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daisyui_keys() {
        let json = serde_json::to_value(THEME).unwrap();
        assert_eq!(json["primary"], "#37AA56");
        assert_eq!(json["base-100"], "#F2F0EB");
        assert_eq!(json.as_object().unwrap().len(), 9);
    }
}
