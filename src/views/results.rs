use log::warn;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    aggregate::{self, PositionTally},
    api::ApiClient,
    config::Config,
    error::Result,
    model::common::ElectionResults,
    scheduled_task::ScheduledPoll,
};

/// The live results page. Results are polled on the configured interval for
/// as long as the view exists; dropping it stops the polling.
pub struct ResultsView {
    poll: ScheduledPoll,
    updates: UnboundedReceiver<Result<Vec<ElectionResults>>>,
    tallies: Option<Vec<PositionTally>>,
}

impl ResultsView {
    pub fn open(api: &ApiClient, config: &Config) -> Self {
        let api = api.clone();
        let (poll, updates) = ScheduledPoll::start(
            config.poll_interval(),
            config.max_in_flight_polls(),
            move || {
                let api = api.clone();
                async move { api.results().await }
            },
        );
        Self {
            poll,
            updates,
            tallies: None,
        }
    }

    /// Wait for the next successful poll and return the refreshed tallies.
    /// Failed polls are logged and the previous tallies stay on display.
    /// Returns `None` once polling has stopped.
    pub async fn refresh(&mut self) -> Option<&[PositionTally]> {
        loop {
            match self.updates.recv().await? {
                Ok(results) => {
                    self.tallies = Some(aggregate::tally(&results));
                    break;
                }
                Err(err) => warn!("Failed to load results ({err})"),
            }
        }
        self.tallies.as_deref()
    }

    /// The last results shown, or `None` while still loading.
    pub fn tallies(&self) -> Option<&[PositionTally]> {
        self.tallies.as_deref()
    }

    /// Stop polling, abandoning any request in flight.
    pub async fn close(self) {
        self.poll.cancel().await;
    }
}

/// Render tallies as the results page shows them.
pub fn render(tallies: &[PositionTally]) -> String {
    tallies
        .iter()
        .map(PositionTally::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
