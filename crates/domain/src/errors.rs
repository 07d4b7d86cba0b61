//! 领域模型错误定义

use thiserror::Error;

/// 领域规则校验失败。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Chirp 正文超出长度限制（按原始正文的字节数计算）
    #[error("chirp is too long: {length} > {max}")]
    ChirpTooLong { length: usize, max: usize },

    /// 创建账户时未提供密码
    #[error("password is required")]
    EmptyPassword,

    #[error("invalid argument {field}: {reason}")]
    InvalidArgument { field: String, reason: String },
}

impl DomainError {
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// 领域模型结果类型
pub type DomainResult<T> = Result<T, DomainError>;

/// 存储层错误。
///
/// 唯一性与外键约束由存储层负责，违反唯一约束时返回 [`RepositoryError::Conflict`]。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("record conflicts with an existing one")]
    Conflict,
    #[error("storage error: {message}")]
    Storage { message: String },
}

impl RepositoryError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
