use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::KindnessError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityStatus {
    Pending,
    Submitted,
    Graded,
    Overdue,
}

impl ActivityStatus {
    pub const ALL: [ActivityStatus; 4] = [
        ActivityStatus::Pending,
        ActivityStatus::Submitted,
        ActivityStatus::Graded,
        ActivityStatus::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "Pending",
            ActivityStatus::Submitted => "Submitted",
            ActivityStatus::Graded => "Graded",
            ActivityStatus::Overdue => "Overdue",
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityStatus {
    type Err = KindnessError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        ActivityStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| KindnessError::UnknownStatus(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub status: ActivityStatus,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assignee: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentStats {
    pub total_points: f64,
    pub badges: u32,
    pub kindness_score: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("graded".parse::<ActivityStatus>(), Ok(ActivityStatus::Graded));
        assert_eq!(" Overdue ".parse::<ActivityStatus>(), Ok(ActivityStatus::Overdue));
        assert_eq!(
            "Late".parse::<ActivityStatus>(),
            Err(KindnessError::UnknownStatus("Late".to_string()))
        );
    }

    #[test]
    fn activity_reads_camel_case_json_with_missing_optionals() {
        let raw = r#"{
            "id": "3d7f5d6f-24f7-4e8e-8b4b-3e7e44b4a7b2",
            "title": "Kindness Tree",
            "status": "Pending",
            "dueDate": "2026-03-01T09:00:00Z"
        }"#;

        let activity: Activity = serde_json::from_str(raw).unwrap();
        assert_eq!(activity.title, "Kindness Tree");
        assert_eq!(activity.subject, None);
        assert_eq!(activity.assignee, None);
        assert_eq!(activity.description, "");
        assert_eq!(activity.status, ActivityStatus::Pending);
    }
}
