pub mod cache;
pub mod client;
pub mod composer;
pub mod config;
pub mod filter;
pub mod job;
pub mod mailer;
pub mod models;
pub mod query;

pub use cache::NotificationCache;
pub use client::{FetchError, JourneySource, TrenitaliaClient};
pub use config::{Config, RunSnapshot};
pub use job::TrainWatchJob;
pub use mailer::{HttpApiMailer, LogMailer, MailError, MailTransport};
