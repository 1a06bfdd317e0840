//! Static HTTP status pages: forbidden, rate limited, maintenance
//!
//! Whether to show a page, and with which parameters, is decided by the
//! caller; these only turn parameters into content.

use chrono::{DateTime, Utc};

use crate::domain::broadcast::format_timestamp;
use crate::domain::countdown::Countdown;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Forbidden {
    pub role: Option<String>,
    pub resource: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimited {
    pub countdown: Countdown,
}

impl RateLimited {
    pub fn new(retry_after_secs: u64) -> Self {
        Self {
            countdown: Countdown::new(retry_after_secs),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Maintenance {
    pub estimated_return: Option<DateTime<Utc>>,
    pub message: Option<String>,
    pub support_contact: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusPage {
    Forbidden(Forbidden),
    RateLimited(RateLimited),
    Maintenance(Maintenance),
}

/// Content of a status page, independent of display technology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub status_code: u16,
    pub title: String,
    pub lines: Vec<String>,
}

impl StatusPage {
    pub fn status_code(&self) -> u16 {
        match self {
            StatusPage::Forbidden(_) => 403,
            StatusPage::RateLimited(_) => 429,
            StatusPage::Maintenance(_) => 503,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StatusPage::Forbidden(_) => "Access denied",
            StatusPage::RateLimited(_) => "Too many requests",
            StatusPage::Maintenance(_) => "Down for maintenance",
        }
    }

    pub fn render(&self, date_format: &str) -> RenderedPage {
        let lines = match self {
            StatusPage::Forbidden(page) => forbidden_lines(page),
            StatusPage::RateLimited(page) => rate_limited_lines(&page.countdown),
            StatusPage::Maintenance(page) => maintenance_lines(page, date_format),
        };
        RenderedPage {
            status_code: self.status_code(),
            title: self.title().to_string(),
            lines,
        }
    }
}

fn forbidden_lines(page: &Forbidden) -> Vec<String> {
    let mut lines = vec![match &page.resource {
        Some(resource) => format!("You don't have permission to access {resource}."),
        None => "You don't have permission to access this page.".to_string(),
    }];
    if let Some(role) = &page.role {
        lines.push(format!("Your current role is {role}."));
    }
    lines.push("Contact your administrator if you believe this is a mistake.".to_string());
    lines
}

/// Lines for the current countdown state; re-render after every tick.
pub fn rate_limited_lines(countdown: &Countdown) -> Vec<String> {
    let mut lines = vec!["You have sent too many requests in a short time.".to_string()];
    if countdown.can_retry() {
        lines.push("You can retry now.".to_string());
    } else {
        let secs = countdown.remaining();
        let unit = if secs == 1 { "second" } else { "seconds" };
        lines.push(format!("Please wait {secs} {unit} before retrying."));
    }
    lines
}

fn maintenance_lines(page: &Maintenance, date_format: &str) -> Vec<String> {
    let mut lines = vec![page
        .message
        .clone()
        .unwrap_or_else(|| "We are performing scheduled maintenance.".to_string())];
    match &page.estimated_return {
        Some(ts) => lines.push(format!(
            "We expect to be back by {}.",
            format_timestamp(ts, date_format)
        )),
        None => lines.push("We'll be back shortly.".to_string()),
    }
    if let Some(contact) = &page.support_contact {
        lines.push(format!("Need help? Contact {contact}."));
    }
    lines
}
