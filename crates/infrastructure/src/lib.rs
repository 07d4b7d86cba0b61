//! 基础设施层实现。
//!
//! 提供数据库仓储、内存仓储、Argon2 密码哈希等适配器，实现应用/领域层定义的接口。

pub mod builder;
pub mod memory;
pub mod migrations;
pub mod password;
pub mod repository;

pub use builder::{Infrastructure, InfrastructureError};
pub use memory::MemoryStore;
pub use migrations::MIGRATOR;
pub use password::Argon2PasswordHasher;
pub use repository::{create_pg_pool, PgAccountRepository, PgChirpRepository, PgStorage};
