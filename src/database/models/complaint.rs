use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::user::OwnerProfile;
use crate::types::ParseEnumError;

/// Fixed set of civic issue categories a complaint can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Road,
    Streetlight,
    Drainage,
    Garbage,
    #[serde(rename = "Water Supply")]
    WaterSupply,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Road,
        Category::Streetlight,
        Category::Drainage,
        Category::Garbage,
        Category::WaterSupply,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Road => "Road",
            Category::Streetlight => "Streetlight",
            Category::Drainage => "Drainage",
            Category::Garbage => "Garbage",
            Category::WaterSupply => "Water Supply",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("category", s))
    }
}

/// Lifecycle status. Any status may move to any other; only admins change it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ComplaintStatus {
    #[default]
    Pending,
    #[serde(rename = "In-Progress")]
    InProgress,
    Resolved,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 3] = [
        ComplaintStatus::Pending,
        ComplaintStatus::InProgress,
        ComplaintStatus::Resolved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "Pending",
            ComplaintStatus::InProgress => "In-Progress",
            ComplaintStatus::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComplaintStatus::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("status", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: Uuid,
    pub citizen_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub location: String,
    pub image_path: Option<String>,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw `complaints` row; enum columns arrive as text and are checked on conversion.
#[derive(Debug, Clone, FromRow)]
pub struct ComplaintRow {
    pub id: Uuid,
    pub citizen_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub image_path: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ComplaintRow> for Complaint {
    type Error = ParseEnumError;

    fn try_from(row: ComplaintRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            citizen_id: row.citizen_id,
            title: row.title,
            description: row.description,
            category: row.category.parse()?,
            location: row.location,
            image_path: row.image_path,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Validated input for a new complaint. The owner is fixed here and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComplaint {
    pub citizen_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub location: String,
    pub image_path: Option<String>,
}

impl NewComplaint {
    /// Materialize the record: fresh id, `Pending`, both timestamps set to `now`.
    pub fn into_complaint(self, now: DateTime<Utc>) -> Complaint {
        Complaint {
            id: Uuid::new_v4(),
            citizen_id: self.citizen_id,
            title: self.title,
            description: self.description,
            category: self.category,
            location: self.location,
            image_path: self.image_path,
            status: ComplaintStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Complaint annotated with its owner's public profile (`null` when the
/// owner has no profile row).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplaintWithOwner {
    #[serde(flatten)]
    pub complaint: Complaint,
    pub citizen: Option<OwnerProfile>,
}
