//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, person_name::PersonName, reset_token::ResetToken, user_password::UserPassword,
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    user_id,
    email,
    password_hash,
    role,
    first_name,
    last_name,
    is_blocked,
    reset_token,
    reset_token_expires_at,
    last_login_at,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_by(&self, column: &str, value: &str) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {column} = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let (reset_token, reset_expires_at) = split_reset(user);

        let result = sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                password_hash,
                role,
                first_name,
                last_name,
                is_blocked,
                reset_token,
                reset_token_expires_at,
                last_login_at,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.role.code())
        .bind(user.first_name.as_str())
        .bind(user.last_name.as_str())
        .bind(user.is_blocked)
        .bind(reset_token)
        .bind(reset_expires_at)
        .bind(user.last_login_at)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AuthError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        self.fetch_one_by("email", email.as_str()).await
    }

    async fn find_by_reset_token(&self, token: &str) -> AuthResult<Option<User>> {
        self.fetch_one_by("reset_token", token).await
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn record_login(&self, user_id: &UserId, at: DateTime<Utc>) -> AuthResult<()> {
        let affected = sqlx::query(
            "UPDATE users SET last_login_at = $2, updated_at = $2 WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .bind(at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        require_row(affected)
    }

    async fn set_blocked(
        &self,
        user_id: &UserId,
        is_blocked: bool,
        at: DateTime<Utc>,
    ) -> AuthResult<Option<User>> {
        let sql = format!(
            "UPDATE users SET is_blocked = $2, updated_at = $3 WHERE user_id = $1 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .bind(is_blocked)
            .bind(at)
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn set_password(
        &self,
        user_id: &UserId,
        password_hash: &UserPassword,
        at: DateTime<Utc>,
    ) -> AuthResult<()> {
        // Hash and reset fields are written by the same statement
        let affected = sqlx::query(
            r#"
            UPDATE users SET
                password_hash = $2,
                reset_token = NULL,
                reset_token_expires_at = NULL,
                updated_at = $3
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(password_hash.as_phc_string())
        .bind(at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        require_row(affected)
    }

    async fn set_reset_token(
        &self,
        user_id: &UserId,
        token: &ResetToken,
        at: DateTime<Utc>,
    ) -> AuthResult<()> {
        let affected = sqlx::query(
            r#"
            UPDATE users SET
                reset_token = $2,
                reset_token_expires_at = $3,
                updated_at = $4
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(token.value())
        .bind(token.expires_at())
        .bind(at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        require_row(affected)
    }

    async fn clear_reset_token(
        &self,
        user_id: &UserId,
        token: &str,
        at: DateTime<Utc>,
    ) -> AuthResult<bool> {
        let affected = sqlx::query(
            r#"
            UPDATE users SET
                reset_token = NULL,
                reset_token_expires_at = NULL,
                updated_at = $3
            WHERE user_id = $1 AND reset_token = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(token)
        .bind(at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    async fn list_by_role(&self, role: UserRole) -> AuthResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE role = $1 ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(role.code())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn clear_expired_reset_tokens(&self, now: DateTime<Utc>) -> AuthResult<u64> {
        let cleared = sqlx::query(
            r#"
            UPDATE users SET
                reset_token = NULL,
                reset_token_expires_at = NULL,
                updated_at = $1
            WHERE reset_token_expires_at < $1
            "#,
        )
        .bind(now)
        .execute(&self.pool)
        .await?
        .rows_affected();

        tracing::info!(tokens_cleared = cleared, "Cleared expired password reset tokens");

        Ok(cleared)
    }
}

fn require_row(affected: u64) -> AuthResult<()> {
    if affected == 0 {
        return Err(AuthError::UserNotFound);
    }
    Ok(())
}

fn split_reset(user: &User) -> (Option<&str>, Option<DateTime<Utc>>) {
    match &user.reset_token {
        Some(token) => (Some(token.value()), Some(token.expires_at())),
        None => (None, None),
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    role: String,
    first_name: String,
    last_name: String,
    is_blocked: bool,
    reset_token: Option<String>,
    reset_token_expires_at: Option<DateTime<Utc>>,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role code: {}", self.role)))?;

        // The table constraint keeps both columns set or both null
        let reset_token = match (self.reset_token, self.reset_token_expires_at) {
            (Some(value), Some(expires_at)) => Some(ResetToken::from_db(value, expires_at)),
            _ => None,
        };

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            password_hash: UserPassword::from_phc_string(self.password_hash)?,
            role,
            first_name: PersonName::from_db(self.first_name),
            last_name: PersonName::from_db(self.last_name),
            is_blocked: self.is_blocked,
            reset_token,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
