//! Snippet data model and expiry choices.

use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stored snippet. Rows are written once and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

impl Snippet {
    /// Build a snippet stamped at `created` that lives for `expiry_days` days.
    pub fn new(
        id: u64,
        title: impl Into<String>,
        content: impl Into<String>,
        created: DateTime<Utc>,
        expiry_days: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            created,
            expires: created + Duration::days(i64::from(expiry_days)),
        }
    }

    /// Whether the snippet may be shown at `now`.
    ///
    /// Rows created "in the future" (clock skew between writers) are hidden
    /// until their creation time is reached.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        self.created <= now && now < self.expires
    }
}

/// The expiry durations offered by the create form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpiryChoice {
    OneDay,
    OneWeek,
    OneYear,
}

impl ExpiryChoice {
    /// Every accepted choice, shortest first.
    pub const ALL: [ExpiryChoice; 3] = [Self::OneDay, Self::OneWeek, Self::OneYear];

    pub const fn days(self) -> u32 {
        match self {
            Self::OneDay => 1,
            Self::OneWeek => 7,
            Self::OneYear => 365,
        }
    }

    /// Form value for this choice.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1",
            Self::OneWeek => "7",
            Self::OneYear => "365",
        }
    }
}

impl fmt::Display for ExpiryChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpiryChoice {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|choice| choice.as_str() == trimmed)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Unsupported expiry '{}'; expected one of 1, 7 or 365 days",
                    trimmed
                ))
            })
    }
}

/// Submitted create form.
///
/// Missing fields deserialize as empty strings so they fail validation the
/// same way as blank ones.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateSnippetForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub expires: String,
}

/// Query string accepted by the show page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowSnippetQuery {
    pub id: Option<String>,
}
