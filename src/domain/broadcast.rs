//! Broadcast campaign table

use std::fmt::{self, Write};

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastStatus {
    Draft,
    Scheduled,
    Sent,
    Failed,
}

impl BroadcastStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BroadcastStatus::Draft => "Draft",
            BroadcastStatus::Scheduled => "Scheduled",
            BroadcastStatus::Sent => "Sent",
            BroadcastStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for BroadcastStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A broadcast campaign as delivered by the data layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Broadcast {
    pub id: String,
    pub name: String,
    /// Audience descriptor, e.g. "All contacts" or a segment name
    pub audience: String,
    #[serde(default)]
    pub channels: Vec<String>,
    pub status: BroadcastStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sent_at: Option<DateTime<Utc>>,
}

impl Broadcast {
    /// The timestamp the table shows for the current status.
    pub fn display_timestamp(&self) -> DateTime<Utc> {
        let relevant = match self.status {
            BroadcastStatus::Scheduled => self.scheduled_at,
            BroadcastStatus::Sent => self.sent_at,
            BroadcastStatus::Draft | BroadcastStatus::Failed => None,
        };
        relevant.unwrap_or(self.created_at)
    }
}

/// One line of the broadcast table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastRow {
    pub id: String,
    pub name: String,
    pub audience: String,
    pub channels: String,
    pub status: BroadcastStatus,
    pub date: String,
}

/// Format with a strftime pattern, falling back to RFC 3339 when the
/// pattern is invalid.
pub fn format_timestamp(ts: &DateTime<Utc>, pattern: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", ts.format(pattern)) {
        Ok(()) => out,
        Err(_) => ts.to_rfc3339(),
    }
}

/// Build table rows in input order, optionally keeping one status only.
pub fn present_broadcasts(
    broadcasts: &[Broadcast],
    status: Option<BroadcastStatus>,
    date_format: &str,
) -> Vec<BroadcastRow> {
    broadcasts
        .iter()
        .filter(|b| status.map_or(true, |s| b.status == s))
        .map(|b| BroadcastRow {
            id: b.id.clone(),
            name: b.name.clone(),
            audience: b.audience.clone(),
            channels: b.channels.iter().join(", "),
            status: b.status,
            date: format_timestamp(&b.display_timestamp(), date_format),
        })
        .collect()
}
