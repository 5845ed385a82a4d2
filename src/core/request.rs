//! Request tracking - bridges async daemon calls back onto the UI thread

use std::future::Future;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::daemon::ClientError;

/// Lifecycle of one kind of request as seen by a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestPhase {
    #[default]
    Idle,
    Pending,
    /// The final outstanding request succeeded (lasts one poll)
    Succeeded,
    /// The final outstanding request failed (lasts one poll)
    Failed,
}

/// Tracks in-flight requests of a single kind.
///
/// Requests are neither deduplicated nor cancelled. Outcomes come back in
/// the order they resolved, so applying them in sequence means the last
/// response to arrive wins. Dropping the tracker closes the channel and any
/// late outcome is discarded instead of reaching a view that no longer exists.
pub struct RequestTracker<T> {
    tx: UnboundedSender<Result<T, ClientError>>,
    rx: UnboundedReceiver<Result<T, ClientError>>,
    in_flight: usize,
    phase: RequestPhase,
}

impl<T: Send + 'static> RequestTracker<T> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            in_flight: 0,
            phase: RequestPhase::Idle,
        }
    }

    pub fn spawn<F>(&mut self, runtime: &Handle, request: F)
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.in_flight += 1;
        self.phase = RequestPhase::Pending;
        runtime.spawn(async move {
            // Receiver gone means the view was torn down
            let _ = tx.send(request.await);
        });
    }

    /// Drain completed outcomes in resolution order
    pub fn poll(&mut self) -> Vec<Result<T, ClientError>> {
        let mut done = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            self.in_flight = self.in_flight.saturating_sub(1);
            done.push(outcome);
        }

        self.phase = match (self.in_flight, done.last()) {
            (0, Some(Ok(_))) => RequestPhase::Succeeded,
            (0, Some(Err(_))) => RequestPhase::Failed,
            (0, None) => RequestPhase::Idle,
            _ => RequestPhase::Pending,
        };
        done
    }

    pub fn phase(&self) -> RequestPhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

impl<T: Send + 'static> Default for RequestTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use tokio::runtime::Runtime;
    use tokio::sync::oneshot;

    fn runtime() -> Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap()
    }

    fn drain<T: Send + 'static>(tracker: &mut RequestTracker<T>) -> Vec<Result<T, ClientError>> {
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut all = Vec::new();
        while tracker.is_pending() && Instant::now() < deadline {
            all.extend(tracker.poll());
            std::thread::sleep(Duration::from_millis(5));
        }
        all
    }

    #[test]
    fn pending_then_succeeded_then_idle() {
        let rt = runtime();
        let mut tracker: RequestTracker<u32> = RequestTracker::new();
        assert_eq!(tracker.phase(), RequestPhase::Idle);

        let (release, wait) = oneshot::channel::<()>();
        tracker.spawn(rt.handle(), async move {
            let _ = wait.await;
            Ok(7)
        });
        assert_eq!(tracker.phase(), RequestPhase::Pending);
        assert!(tracker.poll().is_empty());
        assert_eq!(tracker.phase(), RequestPhase::Pending);

        release.send(()).unwrap();
        let outcomes = drain(&mut tracker);
        assert_eq!(outcomes, vec![Ok(7)]);
        assert_eq!(tracker.phase(), RequestPhase::Succeeded);

        assert!(tracker.poll().is_empty());
        assert_eq!(tracker.phase(), RequestPhase::Idle);
    }

    #[test]
    fn failure_is_reported() {
        let rt = runtime();
        let mut tracker: RequestTracker<()> = RequestTracker::new();
        tracker.spawn(rt.handle(), async { Err(ClientError::Timeout) });

        let outcomes = drain(&mut tracker);
        assert_eq!(outcomes, vec![Err(ClientError::Timeout)]);
        assert_eq!(tracker.phase(), RequestPhase::Failed);
    }

    #[test]
    fn overlapping_requests_resolve_in_completion_order() {
        let rt = runtime();
        let mut tracker: RequestTracker<&'static str> = RequestTracker::new();
        let (first_tx, first_rx) = oneshot::channel::<()>();
        let (second_tx, second_rx) = oneshot::channel::<()>();

        tracker.spawn(rt.handle(), async move {
            let _ = first_rx.await;
            Ok("first")
        });
        tracker.spawn(rt.handle(), async move {
            let _ = second_rx.await;
            Ok("second")
        });
        assert_eq!(tracker.in_flight(), 2);

        // Second request resolves first; the older response lands last and wins
        second_tx.send(()).unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        let mut outcomes = Vec::new();
        while outcomes.is_empty() && Instant::now() < deadline {
            outcomes.extend(tracker.poll());
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(tracker.phase(), RequestPhase::Pending);

        first_tx.send(()).unwrap();
        outcomes.extend(drain(&mut tracker));

        assert_eq!(outcomes, vec![Ok("second"), Ok("first")]);
        assert_eq!(tracker.in_flight(), 0);
    }

    #[test]
    fn dropped_tracker_discards_late_outcome() {
        let rt = runtime();
        let mut tracker: RequestTracker<u8> = RequestTracker::new();
        let (release, wait) = oneshot::channel::<()>();
        let (finished_tx, finished_rx) = std::sync::mpsc::channel();

        tracker.spawn(rt.handle(), async move {
            let _ = wait.await;
            let _ = finished_tx.send(());
            Ok(1)
        });
        drop(tracker);

        release.send(()).unwrap();
        // The task still runs to completion; its send simply goes nowhere
        finished_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    }
}
