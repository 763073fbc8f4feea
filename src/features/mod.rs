//! Features - one module per screen
//!
//! Each module describes its table (columns, options, data source) and, for
//! editable entities, its form. Views in the GUI layer only render these.

pub mod business;
pub mod catalog;
pub mod rules;
pub mod scenarios;

use std::cmp::Ordering;
use std::future::Future;

use crate::api::{ApiClient, Resource};
use crate::error::Result;
use crate::fetch::{Fetcher, Mutation, fetcher, mutation};
use crate::services::run_in_tokio;

/// Fetcher listing `R` on the tokio runtime
pub fn api_fetcher<R: Resource>(client: &ApiClient) -> Fetcher<R> {
    let client = client.clone();
    fetcher(move || {
        let client = client.clone();
        run_in_tokio(async move { client.list::<R>().await })
    })
}

/// Mutation running `f` with a client clone on the tokio runtime
pub fn api_mutation<A, F, Fut>(client: &ApiClient, f: F) -> Mutation<A>
where
    A: Send + 'static,
    F: Fn(ApiClient, A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    let client = client.clone();
    mutation(move |arg| run_in_tokio(f(client.clone(), arg)))
}

/// Case-insensitive ordering on a text field
pub fn by_text<T, F>(key: F) -> impl Fn(&T, &T) -> Ordering + 'static
where
    T: 'static,
    F: Fn(&T) -> &str + 'static,
{
    move |a, b| key(a).to_lowercase().cmp(&key(b).to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(String);

    #[test]
    fn test_by_text_ignores_case() {
        let cmp = by_text(|n: &Named| n.0.as_str());
        let mut names = vec![Named("beta".into()), Named("Alfa".into()), Named("gamma".into())];
        names.sort_by(|a, b| cmp(a, b));
        let sorted: Vec<&str> = names.iter().map(|n| n.0.as_str()).collect();
        assert_eq!(sorted, vec!["Alfa", "beta", "gamma"]);
    }
}
