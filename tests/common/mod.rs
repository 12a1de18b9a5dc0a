#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use uuid::Uuid;
use vcrs_api::auth::{generate_jwt, Claims};
use vcrs_api::config::AppConfig;
use vcrs_api::database::models::NewUser;
use vcrs_api::database::{ComplaintStore, MemoryStore};
use vcrs_api::types::Role;
use vcrs_api::{app, AppState};

pub const SECRET: &str = "integration-test-secret";
pub const AUTH_HEADER: &str = "x-auth-token";

/// A server running in this test's runtime, backed by a fresh in-memory store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub upload_dir: PathBuf,
    pub store: Arc<MemoryStore>,
    pub client: reqwest::Client,
}

/// Caller identity plus the token that proves it
pub struct TestUser {
    pub id: Uuid,
    pub role: Role,
    pub token: String,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let upload_dir = std::env::temp_dir().join(format!("vcrs-test-{}", Uuid::new_v4().simple()));
        tokio::fs::create_dir_all(&upload_dir).await?;

        let mut config = AppConfig::development();
        config.security.jwt_secret = SECRET.to_string();
        config.server.port = port;
        config.server.upload_dir = upload_dir.clone();
        config.api.enable_request_logging = false;

        let store = Arc::new(MemoryStore::new());
        let router = app(AppState::new(config, store.clone()));

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test port")?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                eprintln!("test server exited: {e}");
            }
        });

        let server = Self {
            port,
            base_url,
            upload_dir,
            store,
            client: reqwest::Client::new(),
        };
        server.wait_ready().await?;
        Ok(server)
    }

    async fn wait_ready(&self) -> Result<()> {
        for _ in 0..50 {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        anyhow::bail!("server did not become ready on {}", self.base_url)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register a profile and mint a token for it
    pub async fn user(&self, name: &str, role: Role) -> Result<TestUser> {
        let user = self
            .store
            .insert_user(NewUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                role,
            })
            .await?;

        Ok(TestUser {
            id: user.id,
            role,
            token: token_for(user.id, role)?,
        })
    }

    pub async fn citizen(&self, name: &str) -> Result<TestUser> {
        self.user(name, Role::Citizen).await
    }

    pub async fn admin(&self) -> Result<TestUser> {
        self.user("Admin", Role::Admin).await
    }

    /// Files left in the upload directory
    pub fn uploaded_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.upload_dir)? {
            files.push(entry?.path());
        }
        Ok(files)
    }

    /// POST /api/complaints with the four text fields
    pub async fn file_complaint(
        &self,
        user: &TestUser,
        title: &str,
        category: &str,
    ) -> Result<reqwest::Response> {
        let form = complaint_form(title, category);
        Ok(self
            .client
            .post(self.url("/api/complaints"))
            .header(AUTH_HEADER, &user.token)
            .multipart(form)
            .send()
            .await?)
    }

    pub async fn get(&self, user: &TestUser, path: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(self.url(path))
            .header(AUTH_HEADER, &user.token)
            .send()
            .await?)
    }

    pub async fn put_status(&self, user: &TestUser, id: &str, body: serde_json::Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .put(self.url(&format!("/api/complaints/{}/status", id)))
            .header(AUTH_HEADER, &user.token)
            .json(&body)
            .send()
            .await?)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_dir);
    }
}

pub fn token_for(id: Uuid, role: Role) -> Result<String> {
    Ok(generate_jwt(&Claims::new(id, role, 1), SECRET)?)
}

pub fn complaint_form(title: &str, category: &str) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new()
        .text("title", title.to_string())
        .text("description", "Reported via integration test")
        .text("category", category.to_string())
        .text("location", "Main St & 3rd Ave")
}

/// Parse the envelope and return `data`, asserting `success: true`
pub async fn data(res: reqwest::Response) -> Result<serde_json::Value> {
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true, "expected success envelope: {}", body);
    Ok(body["data"].clone())
}

/// Parse an error envelope and return its `code`
pub async fn error_code(res: reqwest::Response) -> Result<String> {
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], false, "expected error envelope: {}", body);
    Ok(body["code"].as_str().unwrap_or_default().to_string())
}
