use crate::value_objects::{AccountId, ChirpId, Timestamp};

/// 一条已经过审核的短消息。创建后归属的账户不可变更。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chirp {
    pub id: ChirpId,
    pub body: String,
    pub account_id: AccountId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Chirp {
    pub fn new(id: ChirpId, body: String, account_id: AccountId, now: Timestamp) -> Self {
        Self {
            id,
            body,
            account_id,
            created_at: now,
            updated_at: now,
        }
    }
}
