//! Quality rules and their workflow statuses

use serde::{Deserialize, Serialize};

use super::nullable;

/// Quality rule (`api/rules/reglas/`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub codigo_regla: String,
    #[serde(deserialize_with = "nullable")]
    pub descripcion: String,
    pub status: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub status_nombre: String,
    #[serde(deserialize_with = "nullable")]
    pub fecha_creacion: String,
    #[serde(deserialize_with = "nullable")]
    pub fecha_modificacion: String,
}

crate::table_row!(Rule {
    id,
    codigo_regla,
    descripcion,
    status,
    status_nombre,
    fecha_creacion,
    fecha_modificacion,
});

/// Rule status (`api/rules/status-reglas/`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleStatus {
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub nombre: String,
    pub b_activo: bool,
    #[serde(deserialize_with = "nullable")]
    pub fecha_creacion: String,
    #[serde(deserialize_with = "nullable")]
    pub fecha_modificacion: String,
}

crate::table_row!(RuleStatus { id, nombre, b_activo, fecha_creacion, fecha_modificacion });
