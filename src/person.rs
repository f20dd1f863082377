// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display helpers for people: accounts and community members.

use crate::models::UserId;
use serde::Deserialize;
use serde_json::Value;

/// Account fields used for display. All optional; backend rows are sparse.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cuenta {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub apellido: Option<String>,
    #[serde(default)]
    pub identificador: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    /// Account id carried by membership rows that arrive without `cuenta`.
    #[serde(default)]
    pub cuenta_id: Option<UserId>,
}

/// Membership row wrapping the member's account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Miembro {
    pub cuenta: Cuenta,
    #[serde(default)]
    pub cuenta_id: Option<UserId>,
}

/// Either a community member or a bare account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Persona {
    Miembro(Miembro),
    Cuenta(Cuenta),
}

impl Persona {
    /// Decode a backend record; `None` for anything that is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        Persona::deserialize(value).ok()
    }

    pub fn cuenta(&self) -> &Cuenta {
        match self {
            Persona::Miembro(m) => &m.cuenta,
            Persona::Cuenta(c) => c,
        }
    }

    fn fallback_id(&self) -> Option<&UserId> {
        let cuenta = self.cuenta();
        let outer = match self {
            Persona::Miembro(m) => m.cuenta_id.as_ref(),
            Persona::Cuenta(c) => c.cuenta_id.as_ref(),
        };
        cuenta.id.as_ref().or(outer)
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Best available display name.
///
/// Full name first, then identifier, username and email, and finally
/// `Usuario <id>`.
pub fn persona_nombre(persona: &Persona) -> String {
    let c = persona.cuenta();

    let full = [non_empty(&c.nombre), non_empty(&c.apellido)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    let full = full.trim();
    if !full.is_empty() {
        return full.to_string();
    }

    if let Some(name) = non_empty(&c.identificador)
        .or_else(|| non_empty(&c.username))
        .or_else(|| non_empty(&c.correo))
    {
        return name.to_string();
    }

    match persona.fallback_id() {
        Some(id) => format!("Usuario {}", id),
        None => "Usuario ".to_string(),
    }
}

/// Email address or an empty string.
pub fn persona_correo(persona: &Persona) -> String {
    non_empty(&persona.cuenta().correo)
        .unwrap_or_default()
        .to_string()
}

/// Uppercased first character for avatars; `U` when there is no text.
pub fn inicial(texto: Option<&str>) -> String {
    texto
        .map(str::trim)
        .and_then(|t| t.chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "U".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn persona(value: Value) -> Persona {
        Persona::from_value(&value).expect("object")
    }

    #[test]
    fn test_member_and_bare_account() {
        let miembro = persona(json!({
            "cuentaId": 9,
            "cuenta": {"nombre": "Ana", "apellido": "Ruiz", "correo": "ana@example.org"}
        }));
        assert!(matches!(miembro, Persona::Miembro(_)));
        assert_eq!(persona_nombre(&miembro), "Ana Ruiz");
        assert_eq!(persona_correo(&miembro), "ana@example.org");

        let cuenta = persona(json!({"nombre": "Luis"}));
        assert!(matches!(cuenta, Persona::Cuenta(_)));
        assert_eq!(persona_nombre(&cuenta), "Luis");
        assert_eq!(persona_correo(&cuenta), "");
    }

    #[test]
    fn test_name_fallbacks() {
        assert_eq!(
            persona_nombre(&persona(json!({"nombre": "", "identificador": "ana.r"}))),
            "ana.r"
        );
        assert_eq!(
            persona_nombre(&persona(json!({"username": "luis88", "correo": "l@example.org"}))),
            "luis88"
        );
        assert_eq!(
            persona_nombre(&persona(json!({"correo": "l@example.org"}))),
            "l@example.org"
        );
        assert_eq!(persona_nombre(&persona(json!({"id": 12}))), "Usuario 12");
        assert_eq!(
            persona_nombre(&persona(json!({"cuentaId": "abc", "cuenta": {}}))),
            "Usuario abc"
        );
        assert_eq!(persona_nombre(&persona(json!({"cuentaId": 5}))), "Usuario 5");
        assert_eq!(persona_nombre(&persona(json!({}))), "Usuario ");
    }

    #[test]
    fn test_apellido_only() {
        assert_eq!(persona_nombre(&persona(json!({"apellido": "Soto"}))), "Soto");
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        assert!(Persona::from_value(&json!(null)).is_none());
        assert!(Persona::from_value(&json!("Ana")).is_none());
    }

    #[test]
    fn test_inicial() {
        assert_eq!(inicial(Some("ana")), "A");
        assert_eq!(inicial(Some("  émile ")), "É");
        assert_eq!(inicial(Some("   ")), "U");
        assert_eq!(inicial(None), "U");
    }
}
