use futures::future::BoxFuture;

use crate::account::Account;
use crate::chirp::Chirp;
use crate::errors::RepositoryError;
use crate::value_objects::{AccountEmail, ChirpId};

pub type RepositoryResult<T> = Result<T, RepositoryError>;
pub type RepositoryFuture<T> = BoxFuture<'static, RepositoryResult<T>>;

/// 账户存储。邮箱唯一性由实现方保证，重复时返回 [`RepositoryError::Conflict`]。
pub trait AccountRepository: Send + Sync {
    fn create(&self, account: Account) -> RepositoryFuture<Account>;
    fn find_by_email(&self, email: AccountEmail) -> RepositoryFuture<Option<Account>>;
    /// 批量删除所有账户，关联的 chirp 随之级联删除。
    fn delete_all(&self) -> RepositoryFuture<()>;
}

/// Chirp 存储。
pub trait ChirpRepository: Send + Sync {
    fn create(&self, chirp: Chirp) -> RepositoryFuture<Chirp>;
    /// 按插入顺序返回全部 chirp。
    fn list_all(&self) -> RepositoryFuture<Vec<Chirp>>;
    fn find_by_id(&self, id: ChirpId) -> RepositoryFuture<Option<Chirp>>;
}
