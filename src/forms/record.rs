//! RecordForm - headless state behind the create and edit surfaces

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::fetch::Draft;
use crate::i18n::{Locale, tr};

/// Input widget a field is rendered with
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldKind {
    #[default]
    Text,
    Multiline,
    /// Filled by a select; the value is a numeric id
    Choice,
    /// Shown but not editable
    ReadOnly,
}

/// One form field
#[derive(Debug, Clone)]
pub struct FormField {
    pub key: &'static str,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FormField {
    pub fn new(key: &'static str, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
            kind: FieldKind::Text,
            required: false,
        }
    }

    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Number(n)) => n.as_i64() == Some(0),
        _ => false,
    }
}

/// Values being edited plus validation state
#[derive(Debug, Clone)]
pub struct RecordForm {
    fields: Vec<FormField>,
    values: Draft,
    /// Edited record as JSON; `None` for a create form
    original: Option<Map<String, Value>>,
    submitted: bool,
    required_message: String,
}

impl RecordForm {
    /// Empty form for a new record
    pub fn create(fields: Vec<FormField>, locale: Locale) -> Self {
        Self {
            fields,
            values: Draft::new(),
            original: None,
            submitted: false,
            required_message: tr(locale, "form.required"),
        }
    }

    /// Form seeded from an existing record
    pub fn edit<R: Serialize>(fields: Vec<FormField>, row: &R, locale: Locale) -> Result<Self> {
        let original = match serde_json::to_value(row)? {
            Value::Object(map) => map,
            _ => {
                return Err(Error::Invalid {
                    message: "record does not serialize to an object".to_string(),
                });
            }
        };
        let mut form = Self::create(fields, locale);
        form.values = original
            .iter()
            .filter(|(key, _)| form.fields.iter().any(|f| f.key == key.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        form.original = Some(original);
        Ok(form)
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn is_edit(&self) -> bool {
        self.original.is_some()
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Text form of a value for inputs; null and missing are empty
    pub fn text(&self, key: &str) -> String {
        match self.values.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_i64)
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// Set or clear an id chosen in a select
    pub fn set_choice(&mut self, key: &str, id: Option<i64>) {
        match id {
            Some(id) => self.set(key, id),
            None => self.set(key, Value::Null),
        }
    }

    /// Fill a value only when it is still blank
    pub fn set_default(&mut self, key: &str, value: impl Into<Value>) {
        if is_blank(self.values.get(key)) {
            self.set(key, value);
        }
    }

    /// Required fields that are still blank
    pub fn missing(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.required && is_blank(self.values.get(f.key)))
            .map(|f| f.key)
            .collect()
    }

    /// Mark the form as submitted and report whether it may be sent
    pub fn validate(&mut self) -> bool {
        self.submitted = true;
        self.missing().is_empty()
    }

    /// Error under a field; only shown after a submit attempt
    pub fn field_error(&self, key: &str) -> Option<&str> {
        let missing = self.submitted
            && self
                .fields
                .iter()
                .any(|f| f.key == key && f.required && is_blank(self.values.get(key)));
        missing.then_some(self.required_message.as_str())
    }

    /// Partial record for the create callback
    pub fn to_draft(&self) -> Draft {
        self.values
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Typed record: current values merged over the original
    pub fn to_row<R: DeserializeOwned>(&self) -> Result<R> {
        let mut merged = self.original.clone().unwrap_or_default();
        for (k, v) in &self.values {
            merged.insert(k.clone(), v.clone());
        }
        Ok(serde_json::from_value(Value::Object(merged))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Record {
        id: i64,
        nombre: String,
        proceso: Option<i64>,
        nota: String,
    }

    fn fields() -> Vec<FormField> {
        vec![
            FormField::new("nombre", "Nombre").required(),
            FormField::new("proceso", "Proceso")
                .kind(FieldKind::Choice)
                .required(),
        ]
    }

    #[test]
    fn test_errors_only_after_submit() {
        let mut form = RecordForm::create(fields(), Locale::En);
        assert_eq!(form.field_error("nombre"), None);
        assert!(!form.validate());
        assert_eq!(form.field_error("nombre"), Some("This field is required"));
        assert_eq!(form.missing(), vec!["nombre", "proceso"]);

        form.set("nombre", "Validez de correo");
        form.set_choice("proceso", Some(3));
        assert!(form.validate());
        assert_eq!(form.field_error("nombre"), None);
    }

    #[test]
    fn test_zero_and_blank_count_as_missing() {
        let mut form = RecordForm::create(fields(), Locale::En);
        form.set("nombre", "   ");
        form.set_choice("proceso", Some(0));
        assert_eq!(form.missing(), vec!["nombre", "proceso"]);
    }

    #[test]
    fn test_draft_skips_nulls() {
        let mut form = RecordForm::create(fields(), Locale::En);
        form.set("nombre", "N");
        form.set_choice("proceso", None);
        let draft = form.to_draft();
        assert_eq!(draft.get("nombre"), Some(&Value::from("N")));
        assert!(!draft.contains_key("proceso"));
    }

    #[test]
    fn test_edit_round_trip_keeps_untouched_fields() {
        let row = Record {
            id: 5,
            nombre: "Viejo".to_string(),
            proceso: Some(1),
            nota: "sin cambios".to_string(),
        };
        let mut form = RecordForm::edit(fields(), &row, Locale::En).unwrap();
        assert!(form.is_edit());
        assert_eq!(form.text("nombre"), "Viejo");
        assert_eq!(form.int("proceso"), Some(1));
        assert_eq!(form.value("nota"), None);

        form.set("nombre", "Nuevo");
        form.set_default("proceso", 9);
        let updated: Record = form.to_row().unwrap();
        assert_eq!(
            updated,
            Record {
                nombre: "Nuevo".to_string(),
                ..row
            }
        );
    }
}
