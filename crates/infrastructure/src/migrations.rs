use sqlx::migrate::Migrator;

/// 数据库迁移，位于仓库根目录的 `migrations/`。
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");
