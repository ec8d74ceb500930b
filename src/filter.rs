use chrono::{DateTime, Utc};

use crate::errors::KindnessResult;
use crate::models::{Activity, ActivityStatus};

pub const ALL_SENTINEL: &str = "all";

/// A criterion that either passes everything through or requires equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// `None` fields never match an `Only` criterion.
    pub fn accepts(&self, value: Option<&T>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(expected) => value == Some(expected),
        }
    }
}

impl Selection<String> {
    /// Empty input and the `all` sentinel both mean no restriction.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SENTINEL) {
            Selection::All
        } else {
            Selection::Only(trimmed.to_string())
        }
    }
}

impl Selection<ActivityStatus> {
    pub fn parse_status(raw: &str) -> KindnessResult<Self> {
        match Selection::<String>::parse(raw) {
            Selection::All => Ok(Selection::All),
            Selection::Only(value) => Ok(Selection::Only(value.parse()?)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub query: String,
    pub subject: Selection<String>,
    pub status: Selection<ActivityStatus>,
    pub assignee: Selection<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Selection::Only(subject.into());
        self
    }

    pub fn with_status(mut self, status: ActivityStatus) -> Self {
        self.status = Selection::Only(status);
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Selection::Only(assignee.into());
        self
    }

    /// Builds criteria from raw form values where `all` or blank disables a field.
    pub fn from_raw(
        query: &str,
        subject: &str,
        status: &str,
        assignee: &str,
    ) -> KindnessResult<Self> {
        let mut criteria = Self::new().with_query(query);

        if let Selection::Only(subject) = Selection::<String>::parse(subject) {
            criteria = criteria.with_subject(subject);
        }
        if let Selection::Only(status) = Selection::<ActivityStatus>::parse_status(status)? {
            criteria = criteria.with_status(status);
        }
        if let Selection::Only(assignee) = Selection::<String>::parse(assignee) {
            criteria = criteria.with_assignee(assignee);
        }

        Ok(criteria)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.query.trim().is_empty()
            && self.subject == Selection::All
            && self.status == Selection::All
            && self.assignee == Selection::All
    }

    /// The query only activates once it has non-blank text, but matches as typed.
    pub fn matches(&self, activity: &Activity) -> bool {
        let title_matches = self.query.trim().is_empty()
            || activity
                .title
                .to_lowercase()
                .contains(&self.query.to_lowercase());

        title_matches
            && self.subject.accepts(activity.subject.as_ref())
            && self.status.accepts(Some(&activity.status))
            && self.assignee.accepts(activity.assignee.as_ref())
    }
}

pub fn filter_activities(records: &[Activity], criteria: &FilterCriteria) -> Vec<Activity> {
    records
        .iter()
        .filter(|activity| criteria.matches(activity))
        .cloned()
        .collect()
}

/// Unique subjects in first-seen order.
pub fn distinct_subjects(records: &[Activity]) -> Vec<String> {
    distinct(records.iter().filter_map(|activity| activity.subject.as_deref()))
}

pub fn distinct_assignees(records: &[Activity]) -> Vec<String> {
    distinct(records.iter().filter_map(|activity| activity.assignee.as_deref()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

/// Activities due strictly after `now`.
pub fn upcoming(records: &[Activity], now: DateTime<Utc>) -> Vec<Activity> {
    records
        .iter()
        .filter(|activity| activity.due_date > now)
        .cloned()
        .collect()
}
