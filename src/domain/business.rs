//! Business - a quality rule applied to a business process

use serde::{Deserialize, Serialize};

use super::nullable;

/// Business rule record (`/api/business/business/`)
///
/// The foreign keys come with denormalised display fields the list view
/// shows directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Business {
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub nombre: String,

    pub proceso: Option<i64>,
    pub requerimiento: Option<i64>,
    pub regla_calidad: Option<i64>,
    pub escenarios: Option<i64>,
    pub scripts: Option<i64>,

    #[serde(deserialize_with = "nullable")]
    pub proceso_nombre: String,
    #[serde(deserialize_with = "nullable")]
    pub requerimiento_descripcion: String,
    #[serde(deserialize_with = "nullable")]
    pub regla_calidad_codigo: String,
    #[serde(deserialize_with = "nullable")]
    pub regla_calidad_descripcion: String,
    pub dimension_calidad_id: Option<i64>,
    #[serde(deserialize_with = "nullable")]
    pub dimension_calidad_nombre: String,
    #[serde(deserialize_with = "nullable")]
    pub escenario_nombre: String,
    #[serde(deserialize_with = "nullable")]
    pub script_nombre: String,

    #[serde(deserialize_with = "nullable")]
    pub fecha_creacion: String,
    #[serde(deserialize_with = "nullable")]
    pub fecha_modificacion: String,
}

crate::table_row!(Business {
    id,
    nombre,
    proceso,
    requerimiento,
    regla_calidad,
    escenarios,
    scripts,
    proceso_nombre,
    requerimiento_descripcion,
    regla_calidad_codigo,
    regla_calidad_descripcion,
    dimension_calidad_id,
    dimension_calidad_nombre,
    escenario_nombre,
    script_nombre,
    fecha_creacion,
    fecha_modificacion,
});
