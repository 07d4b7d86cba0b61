use async_trait::async_trait;
use domain::CredentialHash;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordHasherError {
    #[error("hash error: {0}")]
    Hash(String),
    #[error("verify error: {0}")]
    Verify(String),
}

impl PasswordHasherError {
    pub fn hash_error(message: impl Into<String>) -> Self {
        Self::Hash(message.into())
    }

    pub fn verify_error(message: impl Into<String>) -> Self {
        Self::Verify(message.into())
    }
}

/// 凭证服务接口。
///
/// `verify` 必须从存储的哈希中取出盐和参数重新派生，再做常量时间比较；
/// 用新盐重新哈希后做字符串比较是错误的实现。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plaintext: &str) -> Result<CredentialHash, PasswordHasherError>;
    async fn verify(
        &self,
        plaintext: &str,
        hashed: &CredentialHash,
    ) -> Result<bool, PasswordHasherError>;
}
