use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A registered customer as seen by the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub correo: String,
    /// ISO-8601 registration timestamp.
    #[serde(default)]
    pub fecha_registro: String,
    /// Upstream document timestamp, used when `fechaRegistro` is missing.
    #[serde(default, rename = "createdAt", skip_serializing)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub suscripcion_activa: bool,
    /// Opaque subscription details forwarded by the remote API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suscripcion: Option<Value>,
}

/// Derived aggregate returned by the admin listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryStats {
    pub total_users: usize,
    pub total_subscriptions: usize,
    pub total_value: u64,
    pub usuarios: Vec<Usuario>,
}

impl Usuario {
    /// Fill `fechaRegistro` from `createdAt` when the upstream left it blank.
    pub fn normalized(mut self) -> Self {
        if self.fecha_registro.is_empty() {
            if let Some(created_at) = self.created_at.take() {
                self.fecha_registro = created_at;
            }
        }
        self
    }
}

impl DirectoryStats {
    pub fn from_users(usuarios: Vec<Usuario>, unit_value: u64) -> Self {
        let total_subscriptions = usuarios.iter().filter(|u| u.suscripcion_activa).count();
        Self {
            total_users: usuarios.len(),
            total_subscriptions,
            total_value: estimated_value(total_subscriptions, unit_value),
            usuarios,
        }
    }
}

/// `subscriptions × unit_value`, saturating instead of overflowing.
pub fn estimated_value(subscriptions: usize, unit_value: u64) -> u64 {
    (subscriptions as u64).saturating_mul(unit_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(id: &str, active: bool) -> Usuario {
        Usuario {
            id: id.to_string(),
            nombre: id.to_uppercase(),
            correo: format!("{id}@example.com"),
            fecha_registro: "2024-01-15T00:00:00.000Z".to_string(),
            created_at: None,
            suscripcion_activa: active,
            suscripcion: None,
        }
    }

    #[test]
    fn stats_multiply_active_by_unit_value() {
        let stats = DirectoryStats::from_users(vec![user("a", true), user("b", false), user("c", true)], 45);
        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.total_subscriptions, 2);
        assert_eq!(stats.total_value, 90);
    }

    #[test]
    fn wire_format_is_camel_case() {
        let value = serde_json::to_value(DirectoryStats::from_users(vec![user("a", true)], 45)).unwrap();
        assert_eq!(value["totalUsers"], 1);
        assert_eq!(value["usuarios"][0]["_id"], "a");
        assert_eq!(value["usuarios"][0]["suscripcionActiva"], true);
        assert!(value["usuarios"][0].get("suscripcion").is_none());
    }

    #[test]
    fn normalizes_created_at_fallback() {
        let u = serde_json::from_value::<Usuario>(json!({
            "_id": "x",
            "nombre": "X",
            "correo": "x@example.com",
            "createdAt": "2024-05-01T00:00:00Z"
        }))
        .unwrap()
        .normalized();
        assert_eq!(u.fecha_registro, "2024-05-01T00:00:00Z");
        assert!(!u.suscripcion_activa);
    }

    #[test]
    fn registration_date_wins_over_created_at() {
        let u = serde_json::from_value::<Usuario>(json!({
            "_id": "x",
            "fechaRegistro": "2024-01-01T00:00:00Z",
            "createdAt": "2023-12-31T00:00:00Z"
        }))
        .unwrap()
        .normalized();
        assert_eq!(u.fecha_registro, "2024-01-01T00:00:00Z");
    }
}
