use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::datetime;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Pending,
    InProgress,
    Completed,
}

impl Status {
    /// Statuses a render layer should offer as explicit actions from the
    /// current one. The update operation itself accepts any target status;
    /// this only drives which buttons appear.
    pub fn allowed_transitions(self) -> &'static [Status] {
        match self {
            Status::Pending => &[Status::InProgress, Status::Completed],
            Status::InProgress => &[Status::Completed],
            Status::Completed => &[Status::Pending],
        }
    }

    /// Quick-toggle semantics: completed flips back to pending, anything
    /// else completes.
    pub fn toggled(self) -> Status {
        match self {
            Status::Completed => Status::Pending,
            _ => Status::Completed,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

/// Display data for the owning user, joined in by the task store at read
/// time. Never written back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Owner {
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Owner {
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect();
        if initials.is_empty() {
            return "?".to_string();
        }
        initials.to_uppercase().chars().take(2).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub uuid: Uuid,

    #[serde(default)]
    pub id: Option<u64>,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub status: Status,

    pub priority: Priority,

    /// Calendar anchor, kept as the raw wire value. Normalization happens
    /// at bucketing time so a malformed value degrades to absence instead
    /// of poisoning deserialization.
    #[serde(default)]
    pub start_date: Option<String>,

    /// Deadline; drives overdue marking only, never calendar placement.
    #[serde(default)]
    pub due_date: Option<String>,

    /// Free-form time-of-day text, used for ordering within a day view.
    #[serde(default)]
    pub time: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub created_by: Option<Owner>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Task {
    pub fn new_pending(title: String, now: DateTime<Utc>, id: u64) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            id: Some(id),
            title,
            description: String::new(),
            status: Status::Pending,
            priority: Priority::Medium,
            start_date: None,
            due_date: None,
            time: None,
            created_at: Some(now),
            updated_at: Some(now),
            created_by: None,
            extra: BTreeMap::new(),
        }
    }

    /// Wall-clock date of the anchor in `tz`, or `None` when the anchor is
    /// missing or unparseable.
    pub fn start_date_in(&self, tz: Tz) -> Option<NaiveDate> {
        self.start_date
            .as_deref()
            .and_then(|raw| datetime::wall_date_in(tz, raw))
    }

    /// Overdue means the due date reads strictly before today in `tz` and
    /// the task is not completed.
    pub fn is_overdue(&self, tz: Tz, now: DateTime<Utc>) -> bool {
        if self.status == Status::Completed {
            return false;
        }
        self.due_date
            .as_deref()
            .map(|raw| datetime::is_overdue_in(tz, raw, now))
            .unwrap_or(false)
    }
}
