use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::{
    sync::{mpsc, Semaphore},
    task::{JoinHandle, JoinSet},
    time::{self, MissedTickBehavior},
};

/// A task repeated on a fixed period, such as polling the live results.
///
/// The first run starts immediately. Each tick starts an independent run
/// unless `max_in_flight` runs are still outstanding, in which case the tick
/// is skipped. Outputs arrive on the receiver returned by [`start`](Self::start).
/// Cancelling or dropping the poll aborts the ticker and every run in flight.
pub struct ScheduledPoll {
    ticker: Option<JoinHandle<()>>,
}

impl ScheduledPoll {
    pub fn start<F, Fut, T>(
        period: Duration,
        max_in_flight: usize,
        task: F,
    ) -> (Self, mpsc::UnboundedReceiver<T>)
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (sender, receiver) = mpsc::unbounded_channel();
        let permits = Arc::new(Semaphore::new(max_in_flight.max(1)));

        let ticker = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // Dropping the set, when this task is aborted, aborts the runs too.
            let mut in_flight = JoinSet::new();

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let Ok(permit) = permits.clone().try_acquire_owned() else {
                            debug!("Previous poll still in flight, skipping tick");
                            continue;
                        };
                        let run = task();
                        let sender = sender.clone();
                        in_flight.spawn(async move {
                            let output = run.await;
                            drop(permit);
                            // The receiver may be gone; the ticker notices below.
                            let _ = sender.send(output);
                        });
                    }
                    Some(_) = in_flight.join_next() => {}
                    _ = sender.closed() => break,
                }
            }
        });

        (
            Self {
                ticker: Some(ticker),
            },
            receiver,
        )
    }

    /// Stop polling. Returns true iff the poll had already stopped by itself
    /// because its receiver was dropped.
    pub async fn cancel(mut self) -> bool {
        match self.ticker.take() {
            Some(ticker) => {
                ticker.abort();
                ticker.await.is_ok()
            }
            None => true,
        }
    }
}

impl Drop for ScheduledPoll {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}
