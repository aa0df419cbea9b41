//! Contact form notifications sent through the Resend email API.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use maud::{html, Markup};
use reqwest::Client as ReqwestClient;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::models::ContactSubmission;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("email request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("email API returned status {0}")]
    Status(u16),
}

#[derive(Debug, Serialize)]
struct OutgoingEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: String,
    html: String,
}

#[derive(Clone)]
pub struct EmailNotifier {
    http: ReqwestClient,
    api_url: Arc<str>,
    api_key: Arc<str>,
    from: Arc<str>,
    to: Arc<str>,
}

impl EmailNotifier {
    pub fn new(http: ReqwestClient, api_url: &str, api_key: &str, from: &str, to: &str) -> Self {
        Self {
            http,
            api_url: Arc::from(api_url.trim_end_matches('/')),
            api_key: Arc::from(api_key),
            from: Arc::from(from),
            to: Arc::from(to),
        }
    }

    /// `None` when no API key is configured; notifications are then skipped.
    pub fn from_config(config: &Config, http: ReqwestClient) -> Option<Self> {
        let key = config.resend_api_key.as_deref()?;
        Some(Self::new(
            http,
            &config.resend_api_url,
            key,
            &config.contact_email_from,
            &config.contact_email_to,
        ))
    }

    pub async fn notify_contact(&self, submission: &ContactSubmission) -> Result<(), NotifyError> {
        let email = OutgoingEmail {
            from: &*self.from,
            to: [&*self.to],
            reply_to: &submission.email,
            subject: contact_subject(submission),
            html: contact_email(submission, Utc::now()).into_string(),
        };

        let response = self
            .http
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&email)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}

pub fn contact_subject(submission: &ContactSubmission) -> String {
    match &submission.company {
        Some(company) => format!("New enquiry from {} ({})", submission.name, company),
        None => format!("New enquiry from {}", submission.name),
    }
}

pub fn contact_email(submission: &ContactSubmission, received_at: DateTime<Utc>) -> Markup {
    let optional = [
        ("Phone", submission.phone.as_deref()),
        ("Company", submission.company.as_deref()),
        ("Service", submission.service.as_deref()),
    ];

    html! {
        h2 { "New contact form submission" }
        table {
            tr { th align="left" { "Name" } td { (submission.name) } }
            tr { th align="left" { "Email" } td { (submission.email) } }
            @for (label, value) in optional {
                @if let Some(value) = value {
                    tr { th align="left" { (label) } td { (value) } }
                }
            }
        }
        h3 { "Message" }
        p style="white-space: pre-wrap" { (submission.message) }
        p { small { "Received " (received_at.format("%Y-%m-%d %H:%M UTC").to_string()) } }
    }
}
