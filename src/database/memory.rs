use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{Complaint, ComplaintStatus, NewComplaint, NewUser, OwnerProfile, User};
use crate::database::store::{ComplaintStore, StoreError};

/// In-process store with the same ordering semantics as `PgStore`:
/// newest `created_at` first, later inserts first on equal timestamps.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    // insertion order; readers sort newest first
    complaints: Vec<Complaint>,
    users: HashMap<Uuid, User>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn newest_first<'a>(iter: impl Iterator<Item = &'a Complaint>) -> Vec<Complaint> {
        // reversed first so equal timestamps still list the later insert first
        let mut out: Vec<Complaint> = iter.cloned().collect();
        out.reverse();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }
}

#[async_trait]
impl ComplaintStore for MemoryStore {
    async fn insert_complaint(&self, new: NewComplaint) -> Result<Complaint, StoreError> {
        let complaint = new.into_complaint(Utc::now());
        self.inner.write().await.complaints.push(complaint.clone());
        Ok(complaint)
    }

    async fn complaints_by_owner(&self, owner: Uuid) -> Result<Vec<Complaint>, StoreError> {
        let inner = self.inner.read().await;
        Ok(Self::newest_first(
            inner.complaints.iter().filter(|c| c.citizen_id == owner),
        ))
    }

    async fn all_complaints(&self) -> Result<Vec<Complaint>, StoreError> {
        let inner = self.inner.read().await;
        Ok(Self::newest_first(inner.complaints.iter()))
    }

    async fn complaint_by_id(&self, id: Uuid) -> Result<Option<Complaint>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.complaints.iter().find(|c| c.id == id).cloned())
    }

    async fn set_status(&self, id: Uuid, status: ComplaintStatus) -> Result<Option<Complaint>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.complaints.iter_mut().find(|c| c.id == id).map(|c| {
            c.status = status;
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    async fn owner_profiles(&self, ids: &[Uuid]) -> Result<Vec<OwnerProfile>, StoreError> {
        let inner = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| inner.users.get(id))
            .map(OwnerProfile::from)
            .collect())
    }

    async fn insert_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| u.email == new.email) {
            return Err(StoreError::Conflict(format!(
                "user with email '{}' already exists",
                new.email
            )));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            role: new.role,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Category;
    use crate::types::Role;

    fn draft(owner: Uuid, title: &str) -> NewComplaint {
        NewComplaint {
            citizen_id: owner,
            title: title.to_string(),
            description: "desc".to_string(),
            category: Category::Garbage,
            location: "Elm St".to_string(),
            image_path: None,
        }
    }

    #[tokio::test]
    async fn lists_newest_first_and_filters_by_owner() {
        let store = MemoryStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        store.insert_complaint(draft(a, "first")).await.unwrap();
        store.insert_complaint(draft(b, "other")).await.unwrap();
        store.insert_complaint(draft(a, "second")).await.unwrap();

        let mine = store.complaints_by_owner(a).await.unwrap();
        let titles: Vec<_> = mine.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["second", "first"]);

        let all = store.all_complaints().await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].title, "second");
        assert_eq!(all[2].title, "first");
    }

    #[tokio::test]
    async fn equal_timestamps_list_later_insert_first() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let now = Utc::now();

        {
            let mut inner = store.inner.write().await;
            inner.complaints.push(draft(owner, "earlier").into_complaint(now));
            inner.complaints.push(draft(owner, "later").into_complaint(now));
        }

        let titles: Vec<_> = store
            .complaints_by_owner(owner)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["later", "earlier"]);
    }

    #[tokio::test]
    async fn set_status_keeps_updated_at_after_created_at() {
        let store = MemoryStore::new();
        let created = store.insert_complaint(draft(Uuid::new_v4(), "t")).await.unwrap();

        let updated = store
            .set_status(created.id, ComplaintStatus::InProgress)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, ComplaintStatus::InProgress);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn set_status_on_unknown_id_returns_none() {
        let store = MemoryStore::new();
        let updated = store
            .set_status(Uuid::new_v4(), ComplaintStatus::Resolved)
            .await
            .unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn owner_profiles_skip_unknown_users_and_reject_duplicate_email() {
        let store = MemoryStore::new();
        let user = store
            .insert_user(NewUser {
                name: "Asha".into(),
                email: "asha@example.com".into(),
                role: Role::Citizen,
            })
            .await
            .unwrap();

        let profiles = store.owner_profiles(&[user.id, Uuid::new_v4()]).await.unwrap();
        assert_eq!(profiles, vec![OwnerProfile::from(&user)]);

        let dup = store
            .insert_user(NewUser {
                name: "Other".into(),
                email: "asha@example.com".into(),
                role: Role::Admin,
            })
            .await;
        assert!(matches!(dup, Err(StoreError::Conflict(_))));
    }
}
