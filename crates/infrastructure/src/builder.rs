use std::sync::Arc;

use application::{PasswordHasher, PasswordHasherError};
use config::AppConfig;
use domain::{AccountRepository, ChirpRepository};
use thiserror::Error;

use crate::{
    memory::MemoryStore,
    migrations::MIGRATOR,
    password::Argon2PasswordHasher,
    repository::{create_pg_pool, PgStorage},
};

#[derive(Debug, Error)]
pub enum InfrastructureError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("password hasher error: {0}")]
    PasswordHasher(#[from] PasswordHasherError),
}

/// 组装好的基础设施：存储与凭证服务。
#[derive(Clone)]
pub struct Infrastructure {
    pub account_repository: Arc<dyn AccountRepository>,
    pub chirp_repository: Arc<dyn ChirpRepository>,
    pub password_hasher: Arc<Argon2PasswordHasher>,
}

impl Infrastructure {
    /// 配置了数据库地址时连接 PostgreSQL 并执行迁移，否则退回内存存储。
    pub async fn connect(config: &AppConfig) -> Result<Self, InfrastructureError> {
        let password_hasher = Arc::new(Argon2PasswordHasher::new(&config.hashing)?);

        match config.database.url.as_deref() {
            Some(url) => {
                let pool = create_pg_pool(url, config.database.max_connections).await?;
                MIGRATOR.run(&pool).await?;
                tracing::info!("connected to postgres and applied migrations");

                let storage = PgStorage::new(pool);
                Ok(Self {
                    account_repository: storage.account_repository,
                    chirp_repository: storage.chirp_repository,
                    password_hasher,
                })
            }
            None => {
                tracing::warn!("no database url configured, using in-memory store");
                let store = Arc::new(MemoryStore::new());
                Ok(Self {
                    account_repository: store.clone(),
                    chirp_repository: store,
                    password_hasher,
                })
            }
        }
    }

    pub fn password_hasher_trait(&self) -> Arc<dyn PasswordHasher> {
        self.password_hasher.clone()
    }
}
