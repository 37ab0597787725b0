use std::{fmt, path::PathBuf, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of leading identifier characters that make up a reference code.
pub const REFERENCE_CODE_LEN: usize = 8;

/// The urgency of a service request.
///
/// Smaller values are more urgent: `1` is the most urgent, `5` the least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// The most urgent priority level.
    pub const MOST_URGENT: Self = Self(1);

    /// The least urgent priority level.
    pub const LEAST_URGENT: Self = Self(5);

    /// Creates a new priority level.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPriority`] if the value is outside `1..=5`.
    pub const fn new(value: u8) -> Result<Self, InvalidPriority> {
        if value < Self::MOST_URGENT.0 || value > Self::LEAST_URGENT.0 {
            return Err(InvalidPriority(value));
        }
        Ok(Self(value))
    }

    /// Returns the numeric level.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Priority {
    type Error = InvalidPriority;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Priority {
    type Err = InvalidPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Anything that doesn't fit a u8 is certainly out of range.
        let value = s.trim().parse::<u8>().map_err(|_| InvalidPriority(0))?;
        Self::new(value)
    }
}

/// Error returned when a priority level falls outside `1..=5`.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid priority {0}: must be between 1 (most urgent) and 5 (least urgent)")]
pub struct InvalidPriority(u8);

/// The kind of problem a service request reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    /// Refuse collection, illegal dumping and similar.
    Sanitation,
    /// Potholes, signage, road markings.
    Roads,
    /// Water, electricity and sewerage.
    Utilities,
    /// Street lighting, hazards and public safety.
    Safety,
    /// Anything else.
    #[default]
    Other,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Self; 5] = [
        Self::Sanitation,
        Self::Roads,
        Self::Utilities,
        Self::Safety,
        Self::Other,
    ];

    /// Returns the display name of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sanitation => "Sanitation",
            Self::Roads => "Roads",
            Self::Utilities => "Utilities",
            Self::Safety => "Safety",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(trimmed.to_string()))
    }
}

/// Error returned when a string names no known [`Category`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown category '{0}': expected one of Sanitation, Roads, Utilities, Safety, Other")]
pub struct UnknownCategory(String);

/// Where a service request is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    /// Logged and queued for assessment.
    #[default]
    Pending,
    /// Assigned to a crew.
    InProgress,
    /// Closed.
    Resolved,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Resolved => "Resolved",
        })
    }
}

/// A single municipal service request.
///
/// The index only ever looks at [`id`](Self::id),
/// [`location`](Self::location) and [`priority`](Self::priority). Everything
/// else is payload carried along for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    id: String,
    location: String,
    priority: Priority,
    #[serde(default)]
    category: Category,
    #[serde(default)]
    description: String,
    #[serde(default)]
    status: Status,
    created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attachment: Option<PathBuf>,
}

impl RequestRecord {
    /// Construct a new [`RequestRecord`] reported now.
    ///
    /// A new identifier (32 lowercase hex characters) is generated. Location
    /// and description are trimmed.
    #[must_use]
    pub fn new(
        location: &str,
        category: Category,
        priority: Priority,
        description: &str,
    ) -> Self {
        Self::new_with_id(
            Uuid::new_v4().simple().to_string(),
            location,
            category,
            priority,
            description,
        )
    }

    /// Construct a new [`RequestRecord`] with an explicit identifier.
    #[must_use]
    pub fn new_with_id(
        id: impl Into<String>,
        location: &str,
        category: Category,
        priority: Priority,
        description: &str,
    ) -> Self {
        Self {
            id: id.into(),
            location: location.trim().to_string(),
            priority,
            category,
            description: description.trim().to_string(),
            status: Status::default(),
            created: Utc::now(),
            attachment: None,
        }
    }

    /// Sets the lifecycle status.
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Sets the path of an attachment uploaded with the report.
    #[must_use]
    pub fn with_attachment(mut self, attachment: impl Into<PathBuf>) -> Self {
        self.attachment = Some(attachment.into());
        self
    }

    /// Overrides the creation timestamp.
    #[must_use]
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    /// The unique identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The reported location, as entered.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The urgency of the request.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// The category of the request.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Free-text description of the problem.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The lifecycle status.
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// When the request was reported.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Path of the attachment, if one was uploaded.
    #[must_use]
    pub fn attachment(&self) -> Option<&std::path::Path> {
        self.attachment.as_deref()
    }

    /// The short reference code handed to the reporter.
    ///
    /// This is the first eight characters of the identifier, upper-cased. An
    /// identifier shorter than that is returned whole.
    #[must_use]
    pub fn reference_code(&self) -> String {
        self.id
            .chars()
            .take(REFERENCE_CODE_LEN)
            .collect::<String>()
            .to_uppercase()
    }
}
