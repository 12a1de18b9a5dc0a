use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use crate::database::models::{Category, Complaint, ComplaintStatus, ComplaintWithOwner, NewComplaint};
use crate::database::{ComplaintStore, StoreError};
use crate::middleware::AuthUser;
use crate::services::access;

#[derive(Debug, thiserror::Error)]
pub enum ComplaintError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("Complaint not found")]
    NotFound,
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Raw fields of a complaint submission, as collected from the multipart form.
#[derive(Debug, Clone, Default)]
pub struct ComplaintForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub image_path: Option<String>,
}

impl ComplaintForm {
    /// Check required fields and the category, fixing `owner` as the complaint's citizen
    pub fn validate(self, owner: Uuid) -> Result<NewComplaint, ComplaintError> {
        let title = required("title", self.title)?;
        let description = required("description", self.description)?;
        let location = required("location", self.location)?;
        let category = required("category", self.category)?
            .parse::<Category>()
            .map_err(|e| ComplaintError::InvalidInput(e.to_string()))?;

        Ok(NewComplaint {
            citizen_id: owner,
            title,
            description,
            category,
            location,
            image_path: self.image_path,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, ComplaintError> {
    match value {
        // stored as submitted; whitespace only counts when checking for blanks
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ComplaintError::InvalidInput(format!("Missing required field: {}", field))),
    }
}

/// Complaint operations with the ownership rules applied.
/// Role gates (admin-only, citizen-only) are enforced by middleware before these run.
#[derive(Clone)]
pub struct ComplaintService {
    store: Arc<dyn ComplaintStore>,
}

impl ComplaintService {
    pub fn new(store: Arc<dyn ComplaintStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, citizen: &AuthUser, form: ComplaintForm) -> Result<Complaint, ComplaintError> {
        let draft = form.validate(citizen.id)?;
        let complaint = self.store.insert_complaint(draft).await?;

        tracing::info!(
            "Complaint {} filed by citizen {} ({})",
            complaint.id,
            complaint.citizen_id,
            complaint.category
        );
        Ok(complaint)
    }

    /// Complaints owned by `target`, visible to that citizen or any admin
    pub async fn list_by_owner(&self, target: &str, requester: &AuthUser) -> Result<Vec<Complaint>, ComplaintError> {
        let owner = Uuid::parse_str(target).ok();

        if !access::can_view(requester, owner) {
            tracing::warn!("User {} denied complaint list of '{}'", requester.id, target);
            return Err(ComplaintError::Forbidden(
                "Unauthorized access to user complaints".to_string(),
            ));
        }

        match owner {
            Some(owner) => Ok(self.store.complaints_by_owner(owner).await?),
            // an id that cannot be an identity owns nothing
            None => Ok(vec![]),
        }
    }

    pub async fn list_all(&self) -> Result<Vec<ComplaintWithOwner>, ComplaintError> {
        let complaints = self.store.all_complaints().await?;
        self.with_owners(complaints).await
    }

    pub async fn get_by_id(&self, id: &str, requester: &AuthUser) -> Result<ComplaintWithOwner, ComplaintError> {
        let complaint = self.find(id).await?;

        if !access::can_view(requester, Some(complaint.citizen_id)) {
            tracing::warn!("User {} denied access to complaint {}", requester.id, complaint.id);
            return Err(ComplaintError::Forbidden("Unauthorized access".to_string()));
        }

        let mut annotated = self.with_owners(vec![complaint]).await?;
        annotated.pop().ok_or(ComplaintError::NotFound)
    }

    /// Validates `status` before touching the store, so a bad value never changes the record
    pub async fn update_status(&self, id: &str, status: Option<&str>) -> Result<Complaint, ComplaintError> {
        let status = status
            .and_then(|s| s.parse::<ComplaintStatus>().ok())
            .ok_or_else(|| ComplaintError::InvalidInput("Invalid status value".to_string()))?;

        let id = Uuid::parse_str(id).map_err(|_| ComplaintError::NotFound)?;
        let complaint = self
            .store
            .set_status(id, status)
            .await?
            .ok_or(ComplaintError::NotFound)?;

        tracing::info!("Complaint {} status set to {}", complaint.id, complaint.status);
        Ok(complaint)
    }

    async fn find(&self, id: &str) -> Result<Complaint, ComplaintError> {
        let id = Uuid::parse_str(id).map_err(|_| ComplaintError::NotFound)?;
        self.store
            .complaint_by_id(id)
            .await?
            .ok_or(ComplaintError::NotFound)
    }

    /// Second read: fetch owner profiles for the given complaints and pair them up
    async fn with_owners(&self, complaints: Vec<Complaint>) -> Result<Vec<ComplaintWithOwner>, ComplaintError> {
        let owner_ids: Vec<Uuid> = complaints
            .iter()
            .map(|c| c.citizen_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let profiles: HashMap<Uuid, _> = self
            .store
            .owner_profiles(&owner_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(complaints
            .into_iter()
            .map(|complaint| {
                let citizen = profiles.get(&complaint.citizen_id).cloned();
                ComplaintWithOwner { complaint, citizen }
            })
            .collect())
    }
}
