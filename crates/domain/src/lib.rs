//! Chirpy 核心领域模型
//!
//! 包含账户、Chirp 实体，内容审核与长度校验规则，以及存储层的抽象接口。

pub mod account;
pub mod business_rules;
pub mod chirp;
pub mod errors;
pub mod moderation;
pub mod repository;
pub mod value_objects;

// 重新导出常用类型
pub use account::Account;
pub use business_rules::{ChirpValidator, MAX_CHIRP_LENGTH};
pub use chirp::Chirp;
pub use errors::{DomainError, DomainResult, RepositoryError};
pub use moderation::{ProfanityFilter, DEFAULT_BANNED_WORDS, PROFANITY_MASK};
pub use repository::{AccountRepository, ChirpRepository, RepositoryFuture, RepositoryResult};
pub use value_objects::{AccountEmail, AccountId, ChirpId, CredentialHash, Timestamp};
