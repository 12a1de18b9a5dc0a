use std::sync::Arc;

use crate::database::models::NewUser;
use crate::database::{ComplaintStore, MemoryStore};
use crate::middleware::AuthUser;
use crate::services::ComplaintService;
use crate::types::Role;

/// Service wired to a fresh in-memory store, plus helpers for seeding users
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub service: ComplaintService,
}

impl TestContext {
    pub async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let service = ComplaintService::new(store.clone());
        Self { store, service }
    }

    /// Register a citizen profile named `name` (email derived from it)
    pub async fn citizen(&self, name: &str) -> AuthUser {
        self.user(name, Role::Citizen).await
    }

    pub async fn admin(&self) -> AuthUser {
        self.user("Admin", Role::Admin).await
    }

    async fn user(&self, name: &str, role: Role) -> AuthUser {
        let user = self
            .store
            .insert_user(NewUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                role,
            })
            .await
            .expect("seed user");

        AuthUser { id: user.id, role: user.role }
    }
}
