// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Named application routes and the published route state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Every view state the router can publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "kebab-case")]
pub enum RouteName {
    Inicio,
    Ideas,
    IdeaCrear,
    IdeaDetalle,
    IdeaEditar,
    Propuestas,
    PropuestaCrear,
    PropuestaDetalle,
    PropuestaEditar,
    Actividades,
    ActividadCrear,
    ActividadDetalle,
    ActividadEditar,
    Comunidades,
    ComunidadCrear,
    ComunidadDetalle,
    ComunidadEditar,
    ComunidadRecomendar,
    AuthLogin,
    AuthRegistrar,
    UsuarioDetalle,
    UsuarioEditar,
    Participacion,
}

/// Top-level section a route belongs to (drives nav highlighting).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteGroup {
    Home,
    Ideas,
    Proposals,
    Activities,
    Communities,
    User,
    Auth,
    Participation,
}

/// Community section routes.
pub const COMMUNITY_ROUTES: &[RouteName] = &[
    RouteName::Comunidades,
    RouteName::ComunidadCrear,
    RouteName::ComunidadDetalle,
    RouteName::ComunidadEditar,
];

/// Signed-in user pages.
pub const USER_ROUTES: &[RouteName] = &[RouteName::UsuarioEditar, RouteName::UsuarioDetalle];

/// Login and registration pages.
pub const AUTH_ROUTES: &[RouteName] = &[RouteName::AuthLogin, RouteName::AuthRegistrar];

/// User and auth pages share the account menu entry.
pub const USER_AUTH_ROUTES: &[RouteName] = &[
    RouteName::UsuarioEditar,
    RouteName::UsuarioDetalle,
    RouteName::AuthLogin,
    RouteName::AuthRegistrar,
];

impl RouteName {
    /// Stable identifier, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            RouteName::Inicio => "inicio",
            RouteName::Ideas => "ideas",
            RouteName::IdeaCrear => "idea-crear",
            RouteName::IdeaDetalle => "idea-detalle",
            RouteName::IdeaEditar => "idea-editar",
            RouteName::Propuestas => "propuestas",
            RouteName::PropuestaCrear => "propuesta-crear",
            RouteName::PropuestaDetalle => "propuesta-detalle",
            RouteName::PropuestaEditar => "propuesta-editar",
            RouteName::Actividades => "actividades",
            RouteName::ActividadCrear => "actividad-crear",
            RouteName::ActividadDetalle => "actividad-detalle",
            RouteName::ActividadEditar => "actividad-editar",
            RouteName::Comunidades => "comunidades",
            RouteName::ComunidadCrear => "comunidad-crear",
            RouteName::ComunidadDetalle => "comunidad-detalle",
            RouteName::ComunidadEditar => "comunidad-editar",
            RouteName::ComunidadRecomendar => "comunidad-recomendar",
            RouteName::AuthLogin => "auth-login",
            RouteName::AuthRegistrar => "auth-registrar",
            RouteName::UsuarioDetalle => "usuario-detalle",
            RouteName::UsuarioEditar => "usuario-editar",
            RouteName::Participacion => "participacion",
        }
    }

    pub fn group(self) -> RouteGroup {
        use RouteName::*;
        match self {
            Inicio => RouteGroup::Home,
            Ideas | IdeaCrear | IdeaDetalle | IdeaEditar => RouteGroup::Ideas,
            Propuestas | PropuestaCrear | PropuestaDetalle | PropuestaEditar => {
                RouteGroup::Proposals
            }
            Actividades | ActividadCrear | ActividadDetalle | ActividadEditar => {
                RouteGroup::Activities
            }
            Comunidades | ComunidadCrear | ComunidadDetalle | ComunidadEditar
            | ComunidadRecomendar => RouteGroup::Communities,
            AuthLogin | AuthRegistrar => RouteGroup::Auth,
            UsuarioDetalle | UsuarioEditar => RouteGroup::User,
            Participacion => RouteGroup::Participation,
        }
    }
}

impl std::fmt::Display for RouteName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current view state published by the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RouteState {
    pub name: RouteName,
    pub params: BTreeMap<String, String>,
    pub path: String,
}

impl RouteState {
    /// State before any navigation has happened.
    pub fn home() -> Self {
        Self {
            name: RouteName::Inicio,
            params: BTreeMap::new(),
            path: "/".to_string(),
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

impl Default for RouteState {
    fn default() -> Self {
        Self::home()
    }
}
