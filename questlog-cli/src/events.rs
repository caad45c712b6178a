//! Drive an async task while draining its event channel.

use std::future::Future;

use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};

/// Maximum time to drain remaining events after the task completes.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Run `task` to completion, calling `on_event` for each event received on
/// `event_rx`.
///
/// The task should own the sending half so the channel closes when it
/// finishes; otherwise draining stops after [`DRAIN_TIMEOUT`].
pub(crate) async fn run_with_events<F, E, R>(
    task: F,
    mut event_rx: mpsc::UnboundedReceiver<E>,
    mut on_event: impl FnMut(E),
) -> R
where
    F: Future<Output = R>,
{
    tokio::pin!(task);
    let mut result = None;

    loop {
        tokio::select! {
            r = &mut task, if result.is_none() => {
                result = Some(r);
                break;
            }
            event = event_rx.recv() => {
                match event {
                    Some(e) => on_event(e),
                    None => break,
                }
            }
        }
    }

    if result.is_some() {
        let deadline = Instant::now() + DRAIN_TIMEOUT;
        loop {
            match tokio::time::timeout_at(deadline, event_rx.recv()).await {
                Ok(Some(e)) => on_event(e),
                Ok(None) => break,
                Err(_) => {
                    log::debug!("Event drain timed out, sender still alive");
                    break;
                }
            }
        }
    }

    match result {
        Some(r) => r,
        None => task.await,
    }
}

#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod tests;
