/// Sequential bulk mutation runner
///
/// Applies a single-item mutation to every identifier in a list, one
/// in-flight request at a time. Sequential on purpose: the server
/// never sees a write storm, and every failure maps unambiguously to
/// one input item. Latency is O(n), which is fine for the small,
/// administrator-driven batches this console deals with.

use std::future::Future;

use crate::error::Error;

/// Aggregated result of one batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub succeeded: usize,
    /// (item label, error) per failed item, in batch order
    pub failed: Vec<(String, Error)>,
}

impl BatchOutcome {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// One-line status text, e.g. "Deleted 3 item(s), 1 failed"
    pub fn summary(&self, verb: &str) -> String {
        if let Some((label, error)) = self.failed.first() {
            format!(
                "⚠️  {} {} of {} item(s); {} failed (first: {}: {})",
                verb,
                self.succeeded,
                self.total(),
                self.failed.len(),
                label,
                error
            )
        } else {
            format!("✅ {} {} item(s)", verb, self.succeeded)
        }
    }
}

/// Run `mutate` once per identifier, strictly in order
///
/// Awaits each call before issuing the next. A failure does not stop
/// the batch; it is recorded and the remaining items still run.
/// Returns `EmptySelection` without invoking `mutate` at all when
/// `ids` is empty, so an empty bulk action never touches the server.
pub async fn run_all<F, Fut>(ids: Vec<String>, mutate: F) -> Result<BatchOutcome, Error>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = Result<(), Error>>,
{
    if ids.is_empty() {
        return Err(Error::EmptySelection);
    }

    let mut outcome = BatchOutcome::default();
    for id in ids {
        match mutate(id.clone()).await {
            Ok(()) => outcome.succeeded += 1,
            Err(error) => {
                eprintln!("⚠️  Batch item {} failed: {}", id, error);
                outcome.failed.push((id, error));
            }
        }
    }

    println!(
        "✅ Batch complete: {} ok, {} failed",
        outcome.succeeded,
        outcome.failed.len()
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_invokes_once_per_id_in_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let recorded = calls.clone();

        let outcome = run_all(ids(&["b", "a", "c"]), move |id| {
            let calls = recorded.clone();
            async move {
                calls.lock().unwrap().push(id);
                Ok(())
            }
        })
        .await
        .unwrap();

        assert_eq!(outcome.succeeded, 3);
        assert!(outcome.is_clean());
        assert_eq!(*calls.lock().unwrap(), ids(&["b", "a", "c"]));
    }

    #[tokio::test]
    async fn test_empty_input_signals_empty_selection() {
        let calls = Arc::new(Mutex::new(0usize));
        let recorded = calls.clone();

        let result = run_all(Vec::new(), move |_id| {
            let calls = recorded.clone();
            async move {
                *calls.lock().unwrap() += 1;
                Ok(())
            }
        })
        .await;

        assert_eq!(result, Err(Error::EmptySelection));
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failure_does_not_stop_the_batch() {
        let outcome = run_all(ids(&["u1", "u2", "u3"]), |id| async move {
            if id == "u2" {
                Err(Error::Server("not found".to_string()))
            } else {
                Ok(())
            }
        })
        .await
        .unwrap();

        assert_eq!(outcome.succeeded, 2);
        assert_eq!(
            outcome.failed,
            vec![("u2".to_string(), Error::Server("not found".to_string()))]
        );
    }

    /// End-to-end shape of a bulk delete: two selected rows run in
    /// page order, one fails server-side, and the summary names the
    /// failed item.
    #[tokio::test]
    async fn test_bulk_delete_scenario() {
        use crate::state::selection::Selection;

        let mut selection = Selection::default();
        selection.toggle("u1");
        selection.toggle("u2");

        let page = vec!["u1".to_string(), "u2".to_string()];
        let batch = selection.in_page_order(&page);

        let outcome = run_all(batch, |id| async move {
            if id == "u2" {
                Err(Error::Server("not found".to_string()))
            } else {
                Ok(())
            }
        })
        .await
        .unwrap();

        assert_eq!(outcome.succeeded, 1);
        assert_eq!(
            outcome.failed,
            vec![("u2".to_string(), Error::Server("not found".to_string()))]
        );
        assert!(outcome.summary("Deleted").contains("not found"));
    }
}
