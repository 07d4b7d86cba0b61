use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain::{Account, Chirp};

/// 对外暴露的账户信息，不包含密码哈希。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDto {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
}

impl From<&Account> for AccountDto {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.into(),
            created_at: account.created_at,
            updated_at: account.updated_at,
            email: account.email.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChirpDto {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub body: String,
    pub user_id: Uuid,
}

impl From<&Chirp> for ChirpDto {
    fn from(chirp: &Chirp) -> Self {
        Self {
            id: chirp.id.into(),
            created_at: chirp.created_at,
            updated_at: chirp.updated_at,
            body: chirp.body.clone(),
            user_id: chirp.account_id.into(),
        }
    }
}
