//! Best-effort teardown of created resources
//!
//! Scenarios register each created resource's path as soon as the server
//! returns an id. The runner drains the stack after every scenario, pass
//! or fail, in reverse creation order so dependents go before their
//! dependencies. Deletion failures are logged and swallowed: one
//! scenario's teardown must never mask another scenario's outcome.

use tracing::{debug, warn};

use crate::http::ApiClient;

#[derive(Debug, Default)]
pub struct CleanupStack {
    paths: Vec<String>,
}

impl CleanupStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource path (e.g. `/clients/42`) for deletion.
    pub fn defer(&mut self, path: impl Into<String>) {
        self.paths.push(path.into());
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Pending paths in deletion order (reverse of creation order).
    fn take_paths(&mut self) -> Vec<String> {
        let mut paths = std::mem::take(&mut self.paths);
        paths.reverse();
        paths
    }

    /// Delete everything registered so far. Returns the number of
    /// deletions that did not land (transport error or non-2xx other
    /// than 404 — a 404 just means the scenario already deleted it).
    pub async fn run(&mut self, api: &ApiClient) -> usize {
        let mut failures = 0;

        for path in self.take_paths() {
            match api.delete(&path).await {
                Ok(response)
                    if response.is_success()
                        || response.status == reqwest::StatusCode::NOT_FOUND =>
                {
                    debug!("cleaned up {path}");
                }
                Ok(response) => {
                    warn!("cleanup of {path} returned {}", response.status);
                    failures += 1;
                }
                Err(e) => {
                    warn!("cleanup of {path} failed: {e}");
                    failures += 1;
                }
            }
        }

        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_drain_in_reverse_creation_order() {
        let mut stack = CleanupStack::new();
        stack.defer("/clients/1");
        stack.defer("/projects/2");
        stack.defer("/projects/2/team/3");
        assert_eq!(stack.len(), 3);

        assert_eq!(
            stack.take_paths(),
            vec!["/projects/2/team/3", "/projects/2", "/clients/1"]
        );
        assert!(stack.is_empty());
    }

    #[test]
    fn draining_twice_is_a_no_op() {
        let mut stack = CleanupStack::new();
        stack.defer("/equipments/9");
        assert_eq!(stack.take_paths().len(), 1);
        assert!(stack.take_paths().is_empty());
    }
}
