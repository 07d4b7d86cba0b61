use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::{
    Account, AccountEmail, AccountId, AccountRepository, Chirp, ChirpId, ChirpRepository,
    CredentialHash, RepositoryError, RepositoryFuture,
};
use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};
use uuid::Uuid;

fn map_sqlx_err(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => RepositoryError::Conflict,
        sqlx::Error::RowNotFound => RepositoryError::NotFound,
        _ => RepositoryError::storage(err.to_string()),
    }
}

fn invalid_data(message: impl Into<String>) -> RepositoryError {
    RepositoryError::storage(message)
}

#[derive(Debug, FromRow)]
struct UserRecord {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    email: String,
    hashed_password: String,
}

impl TryFrom<UserRecord> for Account {
    type Error = RepositoryError;

    fn try_from(value: UserRecord) -> Result<Self, Self::Error> {
        let password = CredentialHash::new(value.hashed_password)
            .map_err(|err| invalid_data(err.to_string()))?;

        Ok(Account {
            id: AccountId::from(value.id),
            email: AccountEmail::new(value.email),
            password,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct ChirpRecord {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    body: String,
    user_id: Uuid,
}

impl From<ChirpRecord> for Chirp {
    fn from(value: ChirpRecord) -> Self {
        Chirp {
            id: ChirpId::from(value.id),
            body: value.body,
            account_id: AccountId::from(value.user_id),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for PgAccountRepository {
    fn create(&self, account: Account) -> RepositoryFuture<Account> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let record = sqlx::query_as::<_, UserRecord>(
                r#"
                INSERT INTO users (id, created_at, updated_at, email, hashed_password)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, created_at, updated_at, email, hashed_password
                "#,
            )
            .bind(Uuid::from(account.id))
            .bind(account.created_at)
            .bind(account.updated_at)
            .bind(account.email.as_str())
            .bind(account.password.as_str())
            .fetch_one(&pool)
            .await
            .map_err(map_sqlx_err)?;

            Account::try_from(record)
        })
    }

    fn find_by_email(&self, email: AccountEmail) -> RepositoryFuture<Option<Account>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let record = sqlx::query_as::<_, UserRecord>(
                r#"SELECT id, created_at, updated_at, email, hashed_password FROM users WHERE email = $1"#,
            )
            .bind(email.as_str())
            .fetch_optional(&pool)
            .await
            .map_err(map_sqlx_err)?;

            record.map(Account::try_from).transpose()
        })
    }

    fn delete_all(&self) -> RepositoryFuture<()> {
        let pool = self.pool.clone();
        Box::pin(async move {
            // chirps 通过外键 ON DELETE CASCADE 一并删除
            sqlx::query("DELETE FROM users")
                .execute(&pool)
                .await
                .map_err(map_sqlx_err)?;

            Ok(())
        })
    }
}

#[derive(Clone)]
pub struct PgChirpRepository {
    pool: PgPool,
}

impl PgChirpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ChirpRepository for PgChirpRepository {
    fn create(&self, chirp: Chirp) -> RepositoryFuture<Chirp> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let record = sqlx::query_as::<_, ChirpRecord>(
                r#"
                INSERT INTO chirps (id, created_at, updated_at, body, user_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, created_at, updated_at, body, user_id
                "#,
            )
            .bind(Uuid::from(chirp.id))
            .bind(chirp.created_at)
            .bind(chirp.updated_at)
            .bind(chirp.body)
            .bind(Uuid::from(chirp.account_id))
            .fetch_one(&pool)
            .await
            .map_err(map_sqlx_err)?;

            Ok(Chirp::from(record))
        })
    }

    fn list_all(&self) -> RepositoryFuture<Vec<Chirp>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let records = sqlx::query_as::<_, ChirpRecord>(
                r#"SELECT id, created_at, updated_at, body, user_id FROM chirps ORDER BY seq ASC"#,
            )
            .fetch_all(&pool)
            .await
            .map_err(map_sqlx_err)?;

            Ok(records.into_iter().map(Chirp::from).collect())
        })
    }

    fn find_by_id(&self, id: ChirpId) -> RepositoryFuture<Option<Chirp>> {
        let pool = self.pool.clone();
        Box::pin(async move {
            let record = sqlx::query_as::<_, ChirpRecord>(
                r#"SELECT id, created_at, updated_at, body, user_id FROM chirps WHERE id = $1"#,
            )
            .bind(Uuid::from(id))
            .fetch_optional(&pool)
            .await
            .map_err(map_sqlx_err)?;

            Ok(record.map(Chirp::from))
        })
    }
}

#[derive(Clone)]
pub struct PgStorage {
    pub pool: PgPool,
    pub account_repository: Arc<PgAccountRepository>,
    pub chirp_repository: Arc<PgChirpRepository>,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self {
            account_repository: Arc::new(PgAccountRepository::new(pool.clone())),
            chirp_repository: Arc::new(PgChirpRepository::new(pool.clone())),
            pool,
        }
    }
}

pub async fn create_pg_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}
