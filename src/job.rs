use std::time::Duration;

use crate::cache::NotificationCache;
use crate::client::{FetchError, JourneySource};
use crate::composer;
use crate::config::{Config, RunSnapshot};
use crate::filter::matching_solutions;
use crate::mailer::MailTransport;
use crate::models::TicketSolution;
use crate::query::build_search_request;

pub const MAIL_SUBJECT: &str = "Available Trains Found";

/// Recurring watch job: on every tick it re-reads the configuration,
/// fetches solutions for each watched date, and mails every recipient the
/// journeys they have not seen yet.
pub struct TrainWatchJob<S, M> {
    source: S,
    mailer: M,
    cache: NotificationCache,
    config_path: String,
}

impl<S: JourneySource, M: MailTransport> TrainWatchJob<S, M> {
    pub fn new(source: S, mailer: M, config_path: String) -> Self {
        Self {
            source,
            mailer,
            cache: NotificationCache::new(),
            config_path,
        }
    }

    /// Ticks until ctrl-c. A tick runs the full cycle to completion before
    /// the next one is observed; cycles never overlap, and only one run at a
    /// time ever touches the cache.
    pub async fn run_forever(&mut self, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.run_once().await,
                _ = tokio::signal::ctrl_c() => {
                    log::info!("Shutting down");
                    break;
                }
            }
        }
    }

    /// One full recipient-by-date cycle. Never fails: configuration gaps end
    /// the run early, while fetch and delivery errors are logged at the
    /// narrowest scope and the run continues.
    pub async fn run_once(&mut self) {
        log::info!("Train job started");

        let config = match Config::from_file(&self.config_path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to reload configuration: {e}");
                return;
            }
        };
        let snapshot = config.snapshot();
        if !snapshot.is_complete() {
            log::warn!("Missing configuration data");
            return;
        }

        self.cache.prune_stale(chrono::Local::now().date_naive());

        for recipient in &snapshot.recipients {
            let mut content = composer::email_header();
            let mut has_new_content = false;

            for date in &snapshot.dates {
                match self.check_date(&snapshot, recipient, date).await {
                    Ok(new_trains) if !new_trains.is_empty() => {
                        content.push_str(&composer::date_section(&new_trains, date));
                        self.cache.record(recipient, date, &new_trains);
                        has_new_content = true;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        log::error!("Error fetching data for date {date}: {e}");
                    }
                }
            }

            if has_new_content {
                content.push_str(&composer::email_footer());
                match self
                    .mailer
                    .send(recipient, MAIL_SUBJECT, "", Some(&content))
                    .await
                {
                    Ok(()) => log::info!("Email sent to {recipient}"),
                    Err(e) => log::error!("Failed to send email to {recipient}: {e}"),
                }
            } else {
                log::info!("No new trains found for recipient {recipient}");
            }
        }

        log::info!("Train job completed");
    }

    async fn check_date(
        &self,
        snapshot: &RunSnapshot,
        recipient: &str,
        date: &str,
    ) -> Result<Vec<TicketSolution>, FetchError> {
        let request = build_search_request(date, &snapshot.route);
        let response = self.source.search(&request).await?;
        let matching = matching_solutions(
            response.solutions,
            &snapshot.categories,
            &snapshot.denominations,
        );
        Ok(self.cache.new_for(recipient, date, matching))
    }
}
