//! Single-flight coordination for token refresh

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use std::future::Future;
use tracing::debug;

type InFlight = Shared<BoxFuture<'static, bool>>;

/// Runs at most one refresh at a time
///
/// The first caller to find the slot empty starts the refresh; every caller
/// that arrives while it is pending awaits the same shared future and sees
/// the same outcome. The slot is cleared as soon as the refresh resolves, so
/// a later authentication failure starts a new one.
///
/// If every waiter is dropped before completion the future stays in the slot
/// and the next caller resumes it instead of starting another.
#[derive(Default)]
pub struct RefreshCoordinator {
    in_flight: Mutex<Option<InFlight>>,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Await the pending refresh, or start one with `start`
    pub async fn run<F, Fut>(&self, start: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = bool> + Send + 'static,
    {
        let shared = {
            let mut slot = self.in_flight.lock();
            match slot.as_ref() {
                Some(pending) => {
                    debug!("Joining in-flight token refresh");
                    pending.clone()
                }
                None => {
                    let fresh = start().boxed().shared();
                    *slot = Some(fresh.clone());
                    fresh
                }
            }
        };

        let outcome = shared.clone().await;

        let mut slot = self.in_flight.lock();
        if slot.as_ref().is_some_and(|pending| pending.ptr_eq(&shared)) {
            *slot = None;
        }

        outcome
    }

    /// Whether a refresh is currently pending
    pub fn is_refreshing(&self) -> bool {
        self.in_flight.lock().is_some()
    }
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("refreshing", &self.is_refreshing())
            .finish()
    }
}
