//! Tokio Runtime Bridge
//!
//! The table and select drivers run on the UI executor, which is not a tokio
//! reactor, while `reqwest` needs one. HTTP futures are handed to a
//! process-wide tokio runtime and their output is awaited from the caller's
//! executor.
//!
//! ```text
//! UI task ──► run_in_tokio(client.list()) ──► tokio worker
//!    ▲                                          │
//!    └────────── Result<Vec<T>> ◄───────────────┘
//! ```

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Builder, Runtime};

static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn runtime() -> &'static Runtime {
    TOKIO_RUNTIME.get_or_init(|| {
        Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("quality-io")
            .enable_all()
            .build()
            .expect("failed to start the tokio runtime")
    })
}

/// Run `future` on the tokio runtime and await its output from any executor
pub async fn run_in_tokio<F, T>(future: F) -> T
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    match runtime().spawn(future).await {
        Ok(result) => result,
        Err(e) => std::panic::resume_unwind(e.into_panic()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_in_tokio_from_foreign_executor() {
        let value = futures::executor::block_on(run_in_tokio(async {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
            21 * 2
        }));
        assert_eq!(value, 42);
    }
}
