//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, student_id::StudentId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                email,
                name,
                studentid,
                admin,
                created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                email,
                name,
                studentid,
                admin,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.email.as_str())
        .bind(user.name.as_str())
        .bind(user.student_id.as_str())
        .bind(user.is_admin)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AuthError::EmailTaken,
            _ => AuthError::Database(e),
        })?;

        tracing::debug!(email = %user.email, "Inserted user");
        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    email: String,
    name: String,
    studentid: String,
    admin: bool,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            email: Email::from_db(self.email),
            name: UserName::from_db(self.name),
            student_id: StudentId::from_db(self.studentid),
            is_admin: self.admin,
            created_at: self.created_at,
        }
    }
}
