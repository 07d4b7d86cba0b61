use std::sync::{Arc, OnceLock};

use domain::{
    Account, AccountEmail, AccountId, AccountRepository, Chirp, ChirpId, ChirpRepository,
    ChirpValidator, CredentialHash, DomainError, RepositoryError,
};
use uuid::Uuid;

use crate::{
    clock::Clock, dto::AccountDto, dto::ChirpDto, environment::Environment,
    error::ApplicationError, id_generator::IdGenerator, metrics::HitCounter,
    password::PasswordHasher,
};

/// 生成占位哈希用的固定口令，只用于让未知邮箱的登录也做一次完整校验。
const TIMING_PLACEHOLDER_SECRET: &str = "chirpy-timing-placeholder";

#[derive(Debug, Clone)]
pub struct CreateAccountRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AuthenticateRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct CreateChirpRequest {
    pub body: String,
    pub user_id: Uuid,
}

pub struct ResourceServiceDependencies {
    pub account_repository: Arc<dyn AccountRepository>,
    pub chirp_repository: Arc<dyn ChirpRepository>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub clock: Arc<dyn Clock>,
    pub id_generator: Arc<dyn IdGenerator>,
    pub hit_counter: Arc<HitCounter>,
    pub chirp_validator: ChirpValidator,
    pub environment: Environment,
}

/// 账户与 chirp 的用例服务。
///
/// 每个操作只依赖注入的存储、凭证服务和校验器，不持有任何实体缓存，存储是唯一的数据来源。
pub struct ResourceService {
    deps: ResourceServiceDependencies,
    placeholder_hash: OnceLock<CredentialHash>,
}

impl ResourceService {
    pub fn new(deps: ResourceServiceDependencies) -> Self {
        Self {
            deps,
            placeholder_hash: OnceLock::new(),
        }
    }

    pub fn hit_counter(&self) -> &Arc<HitCounter> {
        &self.deps.hit_counter
    }

    pub async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<AccountDto, ApplicationError> {
        if request.password.is_empty() {
            return Err(DomainError::EmptyPassword.into());
        }

        let password = self.deps.password_hasher.hash(&request.password).await?;

        let now = self.deps.clock.now();
        let account = Account::register(
            AccountId::from(self.deps.id_generator.generate()),
            AccountEmail::new(request.email),
            password,
            now,
        );

        let stored = self
            .deps
            .account_repository
            .create(account)
            .await
            .map_err(|err| match err {
                RepositoryError::Conflict => {
                    ApplicationError::Conflict("account already exists".to_owned())
                }
                other => ApplicationError::Repository(other),
            })?;

        tracing::info!(account_id = %stored.id, "account created");
        Ok(AccountDto::from(&stored))
    }

    pub async fn authenticate(
        &self,
        request: AuthenticateRequest,
    ) -> Result<AccountDto, ApplicationError> {
        let account = match self
            .deps
            .account_repository
            .find_by_email(AccountEmail::new(request.email))
            .await
        {
            Ok(Some(account)) => account,
            Ok(None) => {
                tracing::debug!("login rejected: unknown email");
                self.burn_verification(&request.password).await;
                return Err(ApplicationError::InvalidCredentials);
            }
            Err(err) => {
                tracing::warn!(error = %err, "login rejected: account lookup failed");
                return Err(ApplicationError::InvalidCredentials);
            }
        };

        match self
            .deps
            .password_hasher
            .verify(&request.password, &account.password)
            .await
        {
            Ok(true) => Ok(AccountDto::from(&account)),
            Ok(false) => {
                tracing::debug!(account_id = %account.id, "login rejected: password mismatch");
                Err(ApplicationError::InvalidCredentials)
            }
            Err(err) => {
                tracing::warn!(account_id = %account.id, error = %err, "login rejected: stored hash unusable");
                Err(ApplicationError::InvalidCredentials)
            }
        }
    }

    /// 对占位哈希做一次校验，使未知邮箱与密码错误的耗时相同。
    /// 占位哈希在第一次需要时用当前参数生成，之后复用。
    async fn burn_verification(&self, plaintext: &str) {
        let placeholder = match self.placeholder_hash.get() {
            Some(hash) => hash.clone(),
            None => match self
                .deps
                .password_hasher
                .hash(TIMING_PLACEHOLDER_SECRET)
                .await
            {
                Ok(hash) => self.placeholder_hash.get_or_init(|| hash).clone(),
                Err(err) => {
                    tracing::warn!(error = %err, "failed to derive timing placeholder hash");
                    return;
                }
            },
        };

        if let Err(err) = self
            .deps
            .password_hasher
            .verify(plaintext, &placeholder)
            .await
        {
            tracing::warn!(error = %err, "timing placeholder verification failed");
        }
    }

    pub async fn create_chirp(
        &self,
        request: CreateChirpRequest,
    ) -> Result<ChirpDto, ApplicationError> {
        let body = self.deps.chirp_validator.validate(&request.body)?;

        let now = self.deps.clock.now();
        let chirp = Chirp::new(
            ChirpId::from(self.deps.id_generator.generate()),
            body,
            AccountId::from(request.user_id),
            now,
        );

        let stored = self.deps.chirp_repository.create(chirp).await?;
        tracing::info!(chirp_id = %stored.id, account_id = %stored.account_id, "chirp created");
        Ok(ChirpDto::from(&stored))
    }

    pub async fn list_chirps(&self) -> Result<Vec<ChirpDto>, ApplicationError> {
        let chirps = self.deps.chirp_repository.list_all().await?;
        Ok(chirps.iter().map(ChirpDto::from).collect())
    }

    /// 按标识查询 chirp。标识无法解析与记录不存在一样返回 `NotFound`。
    pub async fn get_chirp(&self, raw_id: &str) -> Result<ChirpDto, ApplicationError> {
        let id: ChirpId = raw_id.parse().map_err(|_| ApplicationError::NotFound)?;

        match self.deps.chirp_repository.find_by_id(id).await {
            Ok(Some(chirp)) => Ok(ChirpDto::from(&chirp)),
            Ok(None) | Err(RepositoryError::NotFound) => Err(ApplicationError::NotFound),
            Err(err) => Err(err.into()),
        }
    }

    /// 删除全部账户并清零访问计数，仅限开发环境。
    pub async fn reset_all(&self) -> Result<(), ApplicationError> {
        if !self.deps.environment.is_development() {
            tracing::warn!("reset refused outside development environment");
            return Err(ApplicationError::Forbidden);
        }

        self.deps.account_repository.delete_all().await?;
        self.deps.hit_counter.reset();
        tracing::warn!("all accounts deleted and hit counter reset");
        Ok(())
    }
}
