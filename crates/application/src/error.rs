use domain::{DomainError, RepositoryError};
use thiserror::Error;

use crate::password::PasswordHasherError;

#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 输入校验失败（正文过长、密码为空）
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),
    /// 存储层拒绝写入（例如邮箱重复），属于客户端错误
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("password error: {0}")]
    Password(#[from] PasswordHasherError),
    /// 登录失败，不区分账户不存在还是密码错误
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("resource not found")]
    NotFound,
    #[error("operation forbidden")]
    Forbidden,
}
