use axum::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use super::repo_types::{NewUser, User, UserPatch};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email already present")]
    DuplicateEmail,
    #[error("row not found")]
    RowNotFound,
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Persistence contract for user records. Injected as a trait object so no
/// operation ever reaches for an ambient handle.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn create(&self, new: NewUser) -> Result<User, StoreError>;
    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, StoreError>;
}

pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn map_sqlx_err(e: sqlx::Error) -> StoreError {
    if matches!(e, sqlx::Error::RowNotFound) {
        return StoreError::RowNotFound;
    }
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return StoreError::DuplicateEmail;
        }
    }
    StoreError::Backend(e.into())
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, image, demo, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .map_err(map_sqlx_err)?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, image, demo, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(map_sqlx_err)?;
        Ok(user)
    }

    // A concurrent writer can slip past the service's pre-check; the unique
    // constraint rejects it here and surfaces as the same conflict.
    async fn create(&self, new: NewUser) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash, image, demo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, password_hash, image, demo, created_at
            "#,
        )
        .bind(&new.username)
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.image)
        .bind(new.demo)
        .fetch_one(&self.db)
        .await
        .map_err(map_sqlx_err)?;
        Ok(user)
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = COALESCE($2, username),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                image = COALESCE($5, image),
                demo = COALESCE($6, demo)
            WHERE id = $1
            RETURNING id, username, email, password_hash, image, demo, created_at
            "#,
        )
        .bind(id)
        .bind(&patch.username)
        .bind(&patch.email)
        .bind(&patch.password_hash)
        .bind(&patch.image)
        .bind(patch.demo)
        .fetch_one(&self.db)
        .await
        .map_err(map_sqlx_err)?;
        Ok(user)
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryUserStore;
