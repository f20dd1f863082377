// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Path patterns and the ordered route table.
//!
//! Matching is done by `matchit` (the engine under axum), which already
//! prefers static segments over `{param}` captures. The registration order
//! is still checked so the table reads the way it resolves.

use crate::models::RouteName;
use std::collections::BTreeMap;

/// Application routes in registration order.
///
/// For each resource the literal-segment routes (`crear`, `editar`,
/// `recomendar`) come before the bare `{id}` route.
pub const ROUTES: &[(RouteName, &str)] = &[
    (RouteName::Inicio, "/"),
    // Ideas
    (RouteName::Ideas, "/ideas"),
    (RouteName::IdeaCrear, "/ideas/crear"),
    (RouteName::IdeaEditar, "/ideas/{ideaId}/editar"),
    (RouteName::IdeaDetalle, "/ideas/{ideaId}"),
    // Propuestas
    (RouteName::Propuestas, "/propuestas"),
    (RouteName::PropuestaCrear, "/propuestas/crear"),
    (RouteName::PropuestaEditar, "/propuestas/{propuestaId}/editar"),
    (RouteName::PropuestaDetalle, "/propuestas/{propuestaId}"),
    // Actividades
    (RouteName::Actividades, "/actividades"),
    (RouteName::ActividadCrear, "/actividades/crear"),
    (RouteName::ActividadEditar, "/actividades/{actividadId}/editar"),
    (RouteName::ActividadDetalle, "/actividades/{actividadId}"),
    // Comunidades
    (RouteName::Comunidades, "/comunidades"),
    (RouteName::ComunidadCrear, "/comunidades/crear"),
    (RouteName::ComunidadEditar, "/comunidades/{comunidadId}/editar"),
    (
        RouteName::ComunidadRecomendar,
        "/comunidades/{comunidadId}/recomendar",
    ),
    (RouteName::ComunidadDetalle, "/comunidades/{comunidadId}"),
    // Auth / usuario
    (RouteName::AuthLogin, "/auth/login"),
    (RouteName::AuthRegistrar, "/auth/registrar"),
    (RouteName::UsuarioDetalle, "/usuario"),
    (RouteName::UsuarioEditar, "/usuario/editar"),
    (RouteName::Participacion, "/participacion"),
];

/// Routes whose view may only be entered with a session.
pub const PROTECTED_ROUTES: &[RouteName] = &[RouteName::PropuestaCrear, RouteName::ActividadCrear];

/// A registered `/a/{b}/c` pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    name: RouteName,
    pattern: String,
}

impl RoutePattern {
    pub fn new(name: RouteName, pattern: &str) -> Result<Self, RouteTableError> {
        if !pattern.starts_with('/') || !segments(pattern).all(valid_segment) {
            return Err(RouteTableError::InvalidPattern(pattern.to_string()));
        }

        Ok(Self {
            name,
            pattern: pattern.to_string(),
        })
    }

    pub fn name(&self) -> RouteName {
        self.name
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// True if this pattern, registered earlier, has a capture where `later`
    /// has a literal and would otherwise accept the same paths.
    fn shadows(&self, later: &RoutePattern) -> bool {
        let a: Vec<&str> = segments(&self.pattern).collect();
        let b: Vec<&str> = segments(&later.pattern).collect();
        if a.len() != b.len() {
            return false;
        }

        let mut hides_literal = false;
        for (x, y) in a.iter().zip(&b) {
            match (is_param(x), is_param(y)) {
                (false, false) if x != y => return false,
                (false, true) => return false,
                (true, false) => hides_literal = true,
                _ => {}
            }
        }
        hides_literal
    }
}

/// Result of matching a path against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: RouteName,
    pub params: BTreeMap<String, String>,
    pub protected: bool,
}

/// Ordered, validated list of route patterns.
pub struct RouteTable {
    patterns: Vec<RoutePattern>,
    matcher: matchit::Router<RouteName>,
    protected: Vec<RouteName>,
}

impl RouteTable {
    /// Build a table, rejecting any order where a `{param}` route registered
    /// earlier would swallow a later literal route.
    pub fn new(
        routes: &[(RouteName, &str)],
        protected: &[RouteName],
    ) -> Result<Self, RouteTableError> {
        let patterns = routes
            .iter()
            .map(|(name, pattern)| RoutePattern::new(*name, pattern))
            .collect::<Result<Vec<_>, _>>()?;

        for (i, earlier) in patterns.iter().enumerate() {
            if let Some(later) = patterns[i + 1..].iter().find(|p| earlier.shadows(p)) {
                return Err(RouteTableError::Shadowed {
                    earlier: earlier.pattern.clone(),
                    later: later.pattern.clone(),
                });
            }
        }

        let mut matcher = matchit::Router::new();
        for p in &patterns {
            matcher
                .insert(p.pattern.as_str(), p.name)
                .map_err(|e| RouteTableError::Conflict(format!("{}: {}", p.pattern, e)))?;
        }

        Ok(Self {
            patterns,
            matcher,
            protected: protected.to_vec(),
        })
    }

    /// The built-in application routes.
    pub fn standard() -> Self {
        Self::new(ROUTES, PROTECTED_ROUTES).expect("built-in route table is valid")
    }

    /// Match a path (no query/fragment). One trailing slash is ignored and
    /// parameters are percent-decoded.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let path = normalize_path(path);
        let matched = self.matcher.at(path).ok()?;

        let params = matched
            .params
            .iter()
            .map(|(key, raw)| {
                let value = urlencoding::decode(raw)
                    .map(|v| v.into_owned())
                    .unwrap_or_else(|_| raw.to_string());
                (key.to_string(), value)
            })
            .collect();

        let name = *matched.value;
        Some(RouteMatch {
            name,
            params,
            protected: self.protected.contains(&name),
        })
    }

    pub fn is_protected(&self, name: RouteName) -> bool {
        self.protected.contains(&name)
    }

    pub fn patterns(&self) -> &[RoutePattern] {
        &self.patterns
    }
}

/// Route table construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
    #[error("Invalid route pattern: {0}")]
    InvalidPattern(String),

    #[error("Route {earlier} is registered before {later} and would capture it")]
    Shadowed { earlier: String, later: String },

    #[error("Conflicting route: {0}")]
    Conflict(String),
}

fn segments(pattern: &str) -> impl Iterator<Item = &str> {
    pattern.split('/').filter(|s| !s.is_empty())
}

/// A literal, or a whole-segment `{name}` capture.
fn valid_segment(segment: &str) -> bool {
    match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        Some(name) => !name.is_empty() && !name.contains(['{', '}']),
        None => !segment.contains(['{', '}']),
    }
}

fn is_param(segment: &str) -> bool {
    segment.starts_with('{')
}

/// `""` becomes `/`; one trailing slash is dropped.
fn normalize_path(path: &str) -> &str {
    match path {
        "" => "/",
        "/" => path,
        _ => path.strip_suffix('/').unwrap_or(path),
    }
}
