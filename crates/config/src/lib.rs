//! 统一配置中心
//!
//! 提供应用的全局配置管理，包括：
//! - 服务监听与静态文件目录
//! - 数据库连接
//! - 运行平台（开发 / 生产）
//! - 密码哈希参数
//!
//! 加载顺序（后者覆盖前者）：内置默认值 → YAML 配置文件 → `CHIRPY_` 前缀环境变量
//! （用 `__` 表示层级）→ `DB_URL` / `PLATFORM` 两个裸环境变量。

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "CHIRPY_CONFIG";
/// 默认配置文件
pub const DEFAULT_CONFIG_FILE: &str = "chirpy.yaml";

/// 全局应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub server: ServerConfig,
    #[validate(nested)]
    pub database: DatabaseConfig,
    /// 运行平台，只有 `"dev"` 允许执行重置操作
    #[serde(default)]
    pub platform: String,
    #[validate(nested)]
    pub hashing: HashingConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    /// `/app` 下提供的静态文件目录
    pub static_dir: String,
}

/// 数据库配置。未设置 `url` 时使用内存存储。
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatabaseConfig {
    #[validate(length(min = 1))]
    pub url: Option<String>,
    #[validate(range(min = 1))]
    pub max_connections: u32,
}

/// Argon2id 参数。
///
/// `parallelism` 有上限，不随机器核数增长；`max_concurrent` 限制同时进行的哈希计算数量。
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_memory_cost"))]
pub struct HashingConfig {
    #[validate(range(max = 1048576))]
    pub memory_kib: u32,
    #[validate(range(min = 1))]
    pub iterations: u32,
    #[validate(range(min = 1, max = 8))]
    pub parallelism: u32,
    #[validate(range(min = 1))]
    pub max_concurrent: usize,
}

fn validate_memory_cost(config: &HashingConfig) -> Result<(), ValidationError> {
    if config.memory_kib < config.parallelism.saturating_mul(8) {
        let mut err = ValidationError::new("memory_cost");
        err.message = Some("memory_kib must be at least 8 * parallelism".into());
        return Err(err);
    }
    Ok(())
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
                static_dir: ".".into(),
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
            },
            platform: String::new(),
            hashing: HashingConfig::default(),
        }
    }
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
            max_concurrent: 4,
        }
    }
}

impl AppConfig {
    /// 从默认位置加载配置并校验
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::from_figment(Self::figment(path))
    }

    /// 组装配置来源，配置文件不存在时忽略
    pub fn figment(path: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("CHIRPY_").split("__"))
            .merge(Env::raw().filter_map(|key| {
                match key.as_str().to_ascii_uppercase().as_str() {
                    "DB_URL" => Some("database.url".into()),
                    "PLATFORM" => Some("platform".into()),
                    _ => None,
                }
            }))
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let mut config: AppConfig = figment.extract()?;
        // `.env` 模板里常见 `DB_URL=`，空值等同于未配置
        config.database.url = config
            .database
            .url
            .filter(|url| !url.trim().is_empty());
        config.validate()?;
        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] figment::Error),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}
