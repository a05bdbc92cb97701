use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::config::MailConfig;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail provider returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("mail delivery failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Delivers one notification. The dispatcher treats delivery as
/// fire-and-forget: a failure is logged, never retried.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        text: &str,
        html: Option<&str>,
    ) -> Result<(), MailError>;
}

#[async_trait]
impl<T: MailTransport + ?Sized> MailTransport for Box<T> {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        text: &str,
        html: Option<&str>,
    ) -> Result<(), MailError> {
        (**self).send(to, subject, text, html).await
    }
}

#[derive(Serialize)]
struct OutgoingMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
}

/// Mail transport that posts messages to a provider's HTTP send API with a
/// bearer token.
pub struct HttpApiMailer {
    client: Client,
    endpoint: String,
    token: String,
    from: String,
}

impl HttpApiMailer {
    pub fn new(config: &MailConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("treno-watch/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.api_url.clone(),
            token: config.api_token.clone(),
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl MailTransport for HttpApiMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        text: &str,
        html: Option<&str>,
    ) -> Result<(), MailError> {
        let message = OutgoingMessage {
            from: &self.from,
            to,
            subject,
            text,
            html,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

/// Logs deliveries instead of sending them. Used by `--dry-run`.
pub struct LogMailer;

#[async_trait]
impl MailTransport for LogMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        _text: &str,
        html: Option<&str>,
    ) -> Result<(), MailError> {
        log::info!(
            "Dry run: would send \"{subject}\" to {to} ({} bytes of html)",
            html.map_or(0, str::len)
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn mail_config(server: &MockServer) -> MailConfig {
        MailConfig {
            api_url: server.url("/messages"),
            api_token: "secret-token".to_string(),
            from: "\"Train Scraper\" <noreply@example.com>".to_string(),
        }
    }

    #[tokio::test]
    async fn posts_message_with_bearer_token() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/messages")
                .header("authorization", "Bearer secret-token")
                .json_body_partial(
                    r#"{
                        "to": "a@x.com",
                        "subject": "Available Trains Found",
                        "html": "<html></html>"
                    }"#,
                );
            then.status(200);
        });

        let mailer = HttpApiMailer::new(&mail_config(&server)).unwrap();
        mailer
            .send("a@x.com", "Available Trains Found", "", Some("<html></html>"))
            .await
            .unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn provider_rejection_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/messages");
            then.status(401).body("bad token");
        });

        let mailer = HttpApiMailer::new(&mail_config(&server)).unwrap();
        let error = mailer
            .send("a@x.com", "Available Trains Found", "", None)
            .await
            .unwrap_err();

        match error {
            MailError::Status { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad token");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn log_mailer_never_fails() {
        assert!(LogMailer.send("a@x.com", "s", "", None).await.is_ok());
    }
}
