use crate::value_objects::{AccountEmail, AccountId, CredentialHash, Timestamp};

/// 用户账户。
///
/// 密码哈希只在领域内部流转，对外序列化由应用层 DTO 负责，不包含该字段。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub email: AccountEmail,
    pub password: CredentialHash,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Account {
    pub fn register(
        id: AccountId,
        email: AccountEmail,
        password: CredentialHash,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            email,
            password,
            created_at: now,
            updated_at: now,
        }
    }
}
