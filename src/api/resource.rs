//! REST resources and their CRUD calls

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use super::http::ApiClient;
use crate::domain::{
    Business, Dimension, Process, QualityScript, Requirement, Rule, RuleStatus, Scenario,
    ScenarioStatus,
};
use crate::error::{Error, Result};
use crate::fetch::Draft;

/// A record type served under a collection path
pub trait Resource: DeserializeOwned + Serialize + Send + Sync + 'static {
    /// Collection path, e.g. `/api/business/business/`
    const PATH: &'static str;

    /// Server-side identity, used for item paths
    fn id(&self) -> i64;
}

macro_rules! resource {
    ($($ty:ty => $path:literal),* $(,)?) => {
        $(
            impl Resource for $ty {
                const PATH: &'static str = $path;

                fn id(&self) -> i64 {
                    self.id
                }
            }
        )*
    };
}

resource! {
    Business => "/api/business/business/",
    Process => "api/business/process/",
    Requirement => "/api/business/requirement-quality/",
    Rule => "api/rules/reglas/",
    RuleStatus => "api/rules/status-reglas/",
    Dimension => "/api/rules/dimension-calidad/",
    Scenario => "api/scenarios/scenarios/",
    ScenarioStatus => "api/scenarios/status-esc/",
    QualityScript => "api/scripts/scripts/",
}

/// Item path `{PATH}{id}/`
pub fn item_path<R: Resource>(id: i64) -> String {
    format!("{}/{id}/", R::PATH.trim_end_matches('/'))
}

impl ApiClient {
    pub async fn list<R: Resource>(&self) -> Result<Vec<R>> {
        let rows: Vec<R> = self.get_json(R::PATH).await?;
        info!(path = R::PATH, count = rows.len(), "Listed records");
        Ok(rows)
    }

    pub async fn create<R: Resource>(&self, draft: &Draft) -> Result<()> {
        self.post(R::PATH, draft).await?;
        info!(path = R::PATH, "Created record");
        Ok(())
    }

    pub async fn update<R: Resource>(&self, row: &R) -> Result<()> {
        let id = checked_id(row)?;
        self.put(&item_path::<R>(id), row).await?;
        info!(path = R::PATH, id, "Updated record");
        Ok(())
    }

    pub async fn delete_record<R: Resource>(&self, row: &R) -> Result<()> {
        let id = checked_id(row)?;
        self.delete(&item_path::<R>(id)).await?;
        info!(path = R::PATH, id, "Deleted record");
        Ok(())
    }

    /// Business rules, optionally narrowed to one process on the client
    pub async fn list_business(&self, process: Option<i64>) -> Result<Vec<Business>> {
        let rows = self.list::<Business>().await?;
        Ok(filter_by_process(rows, process))
    }
}

fn checked_id<R: Resource>(row: &R) -> Result<i64> {
    match row.id() {
        id if id > 0 => Ok(id),
        _ => Err(Error::MissingIdentity {
            field: "id".to_string(),
        }),
    }
}

fn filter_by_process(rows: Vec<Business>, process: Option<i64>) -> Vec<Business> {
    match process {
        Some(process) => rows
            .into_iter()
            .filter(|row| row.proceso == Some(process))
            .collect(),
        None => rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_paths() {
        assert_eq!(item_path::<Business>(7), "/api/business/business/7/");
        assert_eq!(item_path::<Rule>(3), "api/rules/reglas/3/");
    }

    #[test]
    fn test_unsaved_row_has_no_identity() {
        assert!(matches!(
            checked_id(&Business::default()),
            Err(Error::MissingIdentity { .. })
        ));
        let saved = Business {
            id: 9,
            ..Default::default()
        };
        assert_eq!(checked_id(&saved).unwrap(), 9);
    }

    #[test]
    fn test_filter_by_process() {
        let rows = vec![
            Business {
                id: 1,
                proceso: Some(1),
                ..Default::default()
            },
            Business {
                id: 2,
                proceso: Some(2),
                ..Default::default()
            },
            Business {
                id: 3,
                proceso: None,
                ..Default::default()
            },
        ];
        let ids = |rows: Vec<Business>| rows.iter().map(|r| r.id).collect::<Vec<_>>();
        assert_eq!(ids(filter_by_process(rows.clone(), Some(2))), vec![2]);
        assert_eq!(ids(filter_by_process(rows, None)), vec![1, 2, 3]);
    }
}
