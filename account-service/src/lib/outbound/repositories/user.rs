use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::user::errors::UserError;
use crate::domain::user::lifecycle::Lifecycle;
use crate::domain::user::models::Cpf;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Telephone;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

const SELECT_COLUMNS: &str = "id, cpf, name, email, telephone, birthday, password_hash, \
     is_active, is_deleted, created_at, last_modified";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw users row. Lifecycle flags are stored as two booleans; the
/// domain state is rebuilt from them on read.
#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    cpf: String,
    name: String,
    email: String,
    telephone: String,
    birthday: Option<NaiveDate>,
    password_hash: String,
    is_active: bool,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    last_modified: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, UserError> {
        Ok(User {
            id: UserId(self.id),
            cpf: Cpf::new(self.cpf)?,
            name: self.name,
            email: EmailAddress::new(self.email)?,
            telephone: Telephone::new(self.telephone)?,
            birthday: self.birthday,
            password_hash: self.password_hash,
            lifecycle: Lifecycle::from_parts(
                self.is_active,
                self.is_deleted,
                self.created_at,
                self.last_modified,
            ),
        })
    }
}

fn map_unique_violation(e: sqlx::Error, user: &User) -> UserError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            if db_err.constraint() == Some("users_cpf_key") {
                return UserError::CpfAlreadyExists(user.cpf.as_str().to_string());
            }
            if db_err.constraint() == Some("users_email_key") {
                return UserError::EmailAlreadyExists(user.email.as_str().to_string());
            }
        }
    }
    UserError::Store(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let (is_active, is_deleted) = user.lifecycle.state.as_flags();

        sqlx::query(
            r#"
            INSERT INTO users
                (id, cpf, name, email, telephone, birthday, password_hash,
                 is_active, is_deleted, created_at, last_modified)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.id.0)
        .bind(user.cpf.as_str())
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(user.telephone.as_str())
        .bind(user.birthday)
        .bind(&user.password_hash)
        .bind(is_active)
        .bind(is_deleted)
        .bind(user.lifecycle.created_at)
        .bind(user.lifecycle.last_modified)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &user))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE id = $1 AND is_deleted = FALSE"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::Store(e.to_string()))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_cpf(&self, cpf: &Cpf) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE cpf = $1 AND is_deleted = FALSE"
        ))
        .bind(cpf.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::Store(e.to_string()))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>, UserError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE is_deleted = FALSE ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::Store(e.to_string()))?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let (is_active, is_deleted) = user.lifecycle.state.as_flags();

        let result = sqlx::query(
            r#"
            UPDATE users
            SET cpf = $2, name = $3, email = $4, telephone = $5, birthday = $6,
                password_hash = $7, is_active = $8, is_deleted = $9,
                last_modified = $10
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(user.id.0)
        .bind(user.cpf.as_str())
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(user.telephone.as_str())
        .bind(user.birthday)
        .bind(&user.password_hash)
        .bind(is_active)
        .bind(is_deleted)
        .bind(user.lifecycle.last_modified)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, &user))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        Ok(user)
    }
}
