//! Owner-supplied async callbacks shared by tables and selects.

use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;

use crate::error::Result;

/// Partial record handed to a create callback
pub type Draft = serde_json::Map<String, serde_json::Value>;

/// Zero-argument async function returning an ordered collection
pub type Fetcher<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<Vec<T>>> + Send + Sync>;

/// Async mutation taking one argument
pub type Mutation<A> = Arc<dyn Fn(A) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// Box a closure returning a future into a [`Fetcher`]
pub fn fetcher<T, F, Fut>(f: F) -> Fetcher<T>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<T>>> + Send + 'static,
{
    Arc::new(move || f().boxed())
}

/// Box a closure returning a future into a [`Mutation`]
pub fn mutation<A, F, Fut>(f: F) -> Mutation<A>
where
    F: Fn(A) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    Arc::new(move |arg| f(arg).boxed())
}
