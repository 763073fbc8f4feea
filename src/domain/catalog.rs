//! Reference catalogs: dimensions, processes, requirements, scripts

use serde::{Deserialize, Serialize};

use super::nullable;

/// Quality dimension (`/api/rules/dimension-calidad/`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimension {
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub nombre: String,
    #[serde(deserialize_with = "nullable")]
    pub descripcion: String,
    pub b_activo: bool,
    #[serde(deserialize_with = "nullable")]
    pub fecha_creacion: String,
    #[serde(deserialize_with = "nullable")]
    pub fecha_modificacion: String,
}

crate::table_row!(Dimension {
    id,
    nombre,
    descripcion,
    b_activo,
    fecha_creacion,
    fecha_modificacion,
});

/// Business process (`api/business/process/`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Process {
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub nombre: String,
    #[serde(deserialize_with = "nullable")]
    pub descripcion: String,
    #[serde(rename = "bActivo")]
    pub b_activo: bool,
    #[serde(deserialize_with = "nullable")]
    pub fecha_creacion: String,
    #[serde(deserialize_with = "nullable")]
    pub fecha_modificacion: String,
}

crate::table_row!(Process {
    id,
    nombre,
    descripcion,
    b_activo,
    fecha_creacion,
    fecha_modificacion,
});

/// Quality requirement (`/api/business/requirement-quality/`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Requirement {
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub descripcion: String,
    pub prioridad: bool,
    #[serde(deserialize_with = "nullable")]
    pub fecha_creacion: String,
    #[serde(deserialize_with = "nullable")]
    pub fecha_modificacion: String,
}

crate::table_row!(Requirement { id, descripcion, prioridad, fecha_creacion, fecha_modificacion });

/// Script bundle for a rule (`api/scripts/scripts/`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityScript {
    pub id: i64,
    #[serde(deserialize_with = "nullable")]
    pub nombre: String,
    pub script_inconsistencia: Option<String>,
    pub script_correccion: Option<String>,
    pub script_scala: Option<String>,
    pub scripts_completos: bool,
    #[serde(deserialize_with = "nullable")]
    pub descripcion: String,
    #[serde(deserialize_with = "nullable")]
    pub fecha_creacion: String,
    #[serde(deserialize_with = "nullable")]
    pub fecha_modificacion: String,
}

crate::table_row!(QualityScript {
    id,
    nombre,
    script_inconsistencia,
    script_correccion,
    script_scala,
    scripts_completos,
    descripcion,
    fecha_creacion,
    fecha_modificacion,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_uses_camel_case_flag() {
        let json = r#"{"id":1,"nombre":"Migraciones","bActivo":true}"#;
        let p: Process = serde_json::from_str(json).unwrap();
        assert!(p.b_activo);
        assert_eq!(p.descripcion, "");
    }

    #[test]
    fn test_script_optional_bodies() {
        let json = r#"{"id":3,"script_scala":null,"script_correccion":"UPDATE t"}"#;
        let s: QualityScript = serde_json::from_str(json).unwrap();
        assert_eq!(s.script_scala, None);
        assert_eq!(s.script_correccion.as_deref(), Some("UPDATE t"));
        assert!(!s.scripts_completos);
    }
}
