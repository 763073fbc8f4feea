//! Scenarios and scenario statuses

use serde::{Deserialize, Serialize};

use super::nullable;

/// Test scenario (`api/scenarios/scenarios/`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub codigo_escenario: String,
    #[serde(deserialize_with = "nullable")]
    pub estado_detalle: String,
    #[serde(deserialize_with = "nullable")]
    pub descripcion: String,
    pub estado: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub fecha_creacion: String,
    #[serde(deserialize_with = "nullable")]
    pub fecha_modificacion: String,
}

crate::table_row!(Scenario {
    id,
    codigo_escenario,
    estado_detalle,
    descripcion,
    estado,
    fecha_creacion,
    fecha_modificacion,
});

/// Scenario status (`api/scenarios/status-esc/`); drives the business
/// table's status filter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioStatus {
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub nombre: String,
    pub b_activo: bool,
    #[serde(deserialize_with = "nullable")]
    pub fecha_creacion: String,
    #[serde(deserialize_with = "nullable")]
    pub fecha_modificacion: String,
}

crate::table_row!(ScenarioStatus { id, nombre, b_activo, fecha_creacion, fecha_modificacion });
