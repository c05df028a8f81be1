//! Best-effort side effects.

use std::future::Future;

/// Await `fut`, logging and discarding any error.
///
/// Returns `None` when the side effect failed.
pub async fn non_fatal<T, E, F>(context: &'static str, fut: F) -> Option<T>
where
    F: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    match fut.await {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, context, "Non-fatal side effect failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn passes_through_success() {
        let out = non_fatal("test", async { Ok::<_, String>(7) }).await;
        assert_eq!(out, Some(7));
    }

    #[tokio::test]
    async fn swallows_errors() {
        let out: Option<i32> = non_fatal("test", async { Err("boom".to_string()) }).await;
        assert_eq!(out, None);
    }
}
