use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Account role - admins manage the catalog and review participations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Student,
}

/// Login account - SQL persistence layer
///
/// Student profile data lives in `students`; this table only carries
/// credentials and the role.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub password_digest: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new account inside an open transaction
    pub async fn insert(
        email: &str,
        password_digest: &str,
        role: Role,
        tx: &mut sqlx::PgConnection,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO accounts (id, email, password_digest, role)
             VALUES ($1, $2, $3, $4)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_digest)
        .bind(role)
        .fetch_one(tx)
        .await
    }
}
