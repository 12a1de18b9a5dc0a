use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{Complaint, ComplaintStatus, NewComplaint, NewUser, OwnerProfile, User};
use crate::types::ParseEnumError;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Corrupt row: {0}")]
    Corrupt(#[from] ParseEnumError),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence operations behind the complaint service.
///
/// Each method is a single read or write; ownership and role rules live in
/// `services::complaint_service`, never here.
#[async_trait]
pub trait ComplaintStore: Send + Sync {
    async fn insert_complaint(&self, new: NewComplaint) -> Result<Complaint, StoreError>;

    /// Complaints owned by `owner`, newest first.
    async fn complaints_by_owner(&self, owner: Uuid) -> Result<Vec<Complaint>, StoreError>;

    /// Every complaint, newest first.
    async fn all_complaints(&self) -> Result<Vec<Complaint>, StoreError>;

    async fn complaint_by_id(&self, id: Uuid) -> Result<Option<Complaint>, StoreError>;

    /// Set the status and bump `updated_at`. `None` when no record matches.
    async fn set_status(&self, id: Uuid, status: ComplaintStatus) -> Result<Option<Complaint>, StoreError>;

    /// Public profiles for the given user ids; unknown ids are skipped.
    async fn owner_profiles(&self, ids: &[Uuid]) -> Result<Vec<OwnerProfile>, StoreError>;

    async fn insert_user(&self, new: NewUser) -> Result<User, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
