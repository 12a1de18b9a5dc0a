use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::database::models::{
    Complaint, ComplaintRow, ComplaintStatus, NewComplaint, NewUser, OwnerProfile, User, UserRow,
};
use crate::database::store::{ComplaintStore, StoreError};

const COMPLAINT_COLUMNS: &str = "id, citizen_id, title, description, category, location, image_path, status, created_at, updated_at";
const USER_COLUMNS: &str = "id, name, email, role, created_at, updated_at";

/// Postgres-backed store. Constructed once at startup and shared through `AppState`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open the connection pool described by `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let url = config
            .url
            .as_deref()
            .ok_or(StoreError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool (max {} connections)", config.max_connections);
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply embedded migrations
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }

    fn into_complaints(rows: Vec<ComplaintRow>) -> Result<Vec<Complaint>, StoreError> {
        rows.into_iter()
            .map(|row| Complaint::try_from(row).map_err(StoreError::from))
            .collect()
    }
}

#[async_trait]
impl ComplaintStore for PgStore {
    async fn insert_complaint(&self, new: NewComplaint) -> Result<Complaint, StoreError> {
        let complaint = new.into_complaint(Utc::now());

        let sql = format!(
            "INSERT INTO complaints ({COMPLAINT_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {COMPLAINT_COLUMNS}"
        );

        let row = sqlx::query_as::<_, ComplaintRow>(&sql)
            .bind(complaint.id)
            .bind(complaint.citizen_id)
            .bind(&complaint.title)
            .bind(&complaint.description)
            .bind(complaint.category.as_str())
            .bind(&complaint.location)
            .bind(&complaint.image_path)
            .bind(complaint.status.as_str())
            .bind(complaint.created_at)
            .bind(complaint.updated_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(Complaint::try_from(row)?)
    }

    async fn complaints_by_owner(&self, owner: Uuid) -> Result<Vec<Complaint>, StoreError> {
        let sql = format!(
            "SELECT {COMPLAINT_COLUMNS} FROM complaints WHERE citizen_id = $1 ORDER BY created_at DESC, seq DESC"
        );

        let rows = sqlx::query_as::<_, ComplaintRow>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;

        Self::into_complaints(rows)
    }

    async fn all_complaints(&self) -> Result<Vec<Complaint>, StoreError> {
        let sql = format!("SELECT {COMPLAINT_COLUMNS} FROM complaints ORDER BY created_at DESC, seq DESC");

        let rows = sqlx::query_as::<_, ComplaintRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Self::into_complaints(rows)
    }

    async fn complaint_by_id(&self, id: Uuid) -> Result<Option<Complaint>, StoreError> {
        let sql = format!("SELECT {COMPLAINT_COLUMNS} FROM complaints WHERE id = $1");

        let row = sqlx::query_as::<_, ComplaintRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Complaint::try_from).transpose().map_err(StoreError::from)
    }

    async fn set_status(&self, id: Uuid, status: ComplaintStatus) -> Result<Option<Complaint>, StoreError> {
        let sql = format!(
            "UPDATE complaints SET status = $2, updated_at = $3 WHERE id = $1 RETURNING {COMPLAINT_COLUMNS}"
        );

        // application clock, same as the insert stamps
        let row = sqlx::query_as::<_, ComplaintRow>(&sql)
            .bind(id)
            .bind(status.as_str())
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Complaint::try_from).transpose().map_err(StoreError::from)
    }

    async fn owner_profiles(&self, ids: &[Uuid]) -> Result<Vec<OwnerProfile>, StoreError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let profiles = sqlx::query_as::<_, OwnerProfile>(
            "SELECT id, name, email FROM users WHERE id = ANY($1)",
        )
        .bind(ids.to_vec())
        .fetch_all(&self.pool)
        .await?;

        Ok(profiles)
    }

    async fn insert_user(&self, new: NewUser) -> Result<User, StoreError> {
        let sql = format!(
            "INSERT INTO users (id, name, email, role) VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        );

        let result = sqlx::query_as::<_, UserRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&new.name)
            .bind(&new.email)
            .bind(new.role.as_str())
            .fetch_one(&self.pool)
            .await;

        match result {
            Ok(row) => Ok(User::try_from(row)?),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                StoreError::Conflict(format!("user with email '{}' already exists", new.email)),
            ),
            Err(other) => Err(other.into()),
        }
    }

    /// Pings the pool to ensure connectivity
    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
