//! 内存存储，用于开发环境与测试。
//!
//! 约束与 PostgreSQL 表结构保持一致：邮箱唯一、chirp 必须引用已存在的账户、
//! 删除账户时级联删除 chirp、列表按插入顺序返回。

use std::sync::Arc;

use domain::{
    Account, AccountEmail, AccountRepository, Chirp, ChirpId, ChirpRepository, RepositoryError,
    RepositoryFuture,
};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryState {
    accounts: Vec<Account>,
    chirps: Vec<Chirp>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountRepository for MemoryStore {
    fn create(&self, account: Account) -> RepositoryFuture<Account> {
        let state = self.state.clone();
        Box::pin(async move {
            let mut guard = state.write().await;
            if guard
                .accounts
                .iter()
                .any(|existing| existing.id == account.id || existing.email == account.email)
            {
                return Err(RepositoryError::Conflict);
            }
            guard.accounts.push(account.clone());
            Ok(account)
        })
    }

    fn find_by_email(&self, email: AccountEmail) -> RepositoryFuture<Option<Account>> {
        let state = self.state.clone();
        Box::pin(async move {
            let guard = state.read().await;
            Ok(guard
                .accounts
                .iter()
                .find(|account| account.email == email)
                .cloned())
        })
    }

    fn delete_all(&self) -> RepositoryFuture<()> {
        let state = self.state.clone();
        Box::pin(async move {
            let mut guard = state.write().await;
            guard.accounts.clear();
            guard.chirps.clear();
            Ok(())
        })
    }
}

impl ChirpRepository for MemoryStore {
    fn create(&self, chirp: Chirp) -> RepositoryFuture<Chirp> {
        let state = self.state.clone();
        Box::pin(async move {
            let mut guard = state.write().await;
            if !guard
                .accounts
                .iter()
                .any(|account| account.id == chirp.account_id)
            {
                return Err(RepositoryError::storage(format!(
                    "chirp references unknown account {}",
                    chirp.account_id
                )));
            }
            if guard.chirps.iter().any(|existing| existing.id == chirp.id) {
                return Err(RepositoryError::Conflict);
            }
            guard.chirps.push(chirp.clone());
            Ok(chirp)
        })
    }

    fn list_all(&self) -> RepositoryFuture<Vec<Chirp>> {
        let state = self.state.clone();
        Box::pin(async move { Ok(state.read().await.chirps.clone()) })
    }

    fn find_by_id(&self, id: ChirpId) -> RepositoryFuture<Option<Chirp>> {
        let state = self.state.clone();
        Box::pin(async move {
            let guard = state.read().await;
            Ok(guard.chirps.iter().find(|chirp| chirp.id == id).cloned())
        })
    }
}
