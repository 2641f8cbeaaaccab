//! Network quiescence detection for rendered pages.
//!
//! The page counts as settled once no more than `max_in_flight` requests have
//! been outstanding for a full `window`. The window opens when the count
//! drops to the limit and only restarts after the count goes above it, so
//! short requests that keep the count within the limit do not delay settling.

use std::collections::HashSet;
use std::time::Duration;

use futures_lite::{Stream, StreamExt};
use tokio::time::{sleep_until, Instant};

/// Request lifecycle event reported by the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum NetworkEvent {
    /// A request with this id was issued.
    Started(String),
    /// The request finished or failed.
    Finished(String),
}

/// Outstanding request ids.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    pending: HashSet<String>,
}

impl InFlight {
    pub(crate) fn apply(&mut self, event: NetworkEvent) {
        match event {
            NetworkEvent::Started(id) => {
                self.pending.insert(id);
            }
            NetworkEvent::Finished(id) => {
                self.pending.remove(&id);
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }
}

/// Consume `events` until the network has been quiet for `window`.
///
/// Returns the number of requests still in flight when it settled. If the
/// event stream ends the page is gone and waiting is over.
pub(crate) async fn wait_for_idle<S>(mut events: S, max_in_flight: usize, window: Duration) -> usize
where
    S: Stream<Item = NetworkEvent> + Unpin,
{
    let mut in_flight = InFlight::default();
    let mut quiet_since = Some(Instant::now());

    loop {
        let settles_at = quiet_since.map_or_else(Instant::now, |since| since + window);

        tokio::select! {
            event = events.next() => match event {
                Some(event) => {
                    in_flight.apply(event);
                    if in_flight.len() > max_in_flight {
                        quiet_since = None;
                    } else if quiet_since.is_none() {
                        quiet_since = Some(Instant::now());
                    }
                }
                None => return in_flight.len(),
            },
            () = sleep_until(settles_at), if quiet_since.is_some() => return in_flight.len(),
        }
    }
}
