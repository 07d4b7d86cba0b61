use std::sync::Arc;

use application::{PasswordHasher, PasswordHasherError};
use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use async_trait::async_trait;
use config::HashingConfig;
use domain::CredentialHash;
use tokio::sync::Semaphore;

/// 派生密钥长度（字节）
pub const OUTPUT_LENGTH: usize = 32;

/// 基于 Argon2id 的凭证服务。
///
/// 哈希结果为 PHC 字符串，内含算法、版本、参数、随机盐与派生密钥。
/// 派生与校验都在阻塞线程池中执行，并用信号量限制同时进行的计算数量，
/// 避免大量并发登录把内存和 CPU 耗尽。
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
    permits: Arc<Semaphore>,
}

impl Argon2PasswordHasher {
    pub fn new(config: &HashingConfig) -> Result<Self, PasswordHasherError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            Some(OUTPUT_LENGTH),
        )
        .map_err(|err| PasswordHasherError::hash_error(err.to_string()))?;

        Ok(Self {
            params,
            permits: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    fn argon2(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }

    async fn run_blocking<T, F>(&self, task: F) -> Result<T, String>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        // 许可随计算一起移入阻塞线程，调用方被取消时仍占用到计算结束
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|err| err.to_string())?;
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            task()
        })
        .await
        .map_err(|err| err.to_string())
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, plaintext: &str) -> Result<CredentialHash, PasswordHasherError> {
        let params = self.params.clone();
        let plaintext = plaintext.to_owned();
        let hashed = self
            .run_blocking(move || {
                let salt = SaltString::generate(&mut OsRng);
                Self::argon2(params)
                    .hash_password(plaintext.as_bytes(), &salt)
                    .map(|hash| hash.to_string())
            })
            .await
            .map_err(PasswordHasherError::hash_error)?
            .map_err(|err| PasswordHasherError::hash_error(err.to_string()))?;

        CredentialHash::new(hashed).map_err(|err| PasswordHasherError::hash_error(err.to_string()))
    }

    /// 用存储哈希中的盐和参数重新派生，并以常量时间比较派生结果。
    async fn verify(
        &self,
        plaintext: &str,
        hashed: &CredentialHash,
    ) -> Result<bool, PasswordHasherError> {
        let plaintext = plaintext.to_owned();
        let hashed = hashed.as_str().to_owned();
        self.run_blocking(move || {
            let parsed = PasswordHash::new(&hashed)
                .map_err(|err| PasswordHasherError::verify_error(err.to_string()))?;

            match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(argon2::password_hash::Error::Password) => Ok(false),
                Err(err) => Err(PasswordHasherError::verify_error(err.to_string())),
            }
        })
        .await
        .map_err(PasswordHasherError::verify_error)?
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn cheap_config() -> HashingConfig {
        HashingConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
            max_concurrent: 2,
        }
    }

    fn hasher() -> Argon2PasswordHasher {
        Argon2PasswordHasher::new(&cheap_config()).unwrap()
    }

    #[tokio::test]
    async fn hash_and_verify() {
        let hasher = hasher();
        let hash = hasher.hash("test_password_123").await.unwrap();

        assert!(hasher.verify("test_password_123", &hash).await.unwrap());
        assert!(!hasher.verify("wrong_password", &hash).await.unwrap());
        assert!(!hasher.verify("", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn same_secret_gets_different_salts() {
        let hasher = hasher();

        let first = hasher.hash("same_password").await.unwrap();
        let second = hasher.hash("same_password").await.unwrap();

        // 盐不同，哈希字符串不同，但都能验证原密码
        assert_ne!(first, second);
        assert!(hasher.verify("same_password", &first).await.unwrap());
        assert!(hasher.verify("same_password", &second).await.unwrap());
    }

    #[tokio::test]
    async fn hash_is_self_describing() {
        let hasher = hasher();
        let hash = hasher.hash("secret").await.unwrap();

        assert!(hash.as_str().starts_with("$argon2id$v=19$m=1024,t=1,p=1$"));

        let parsed = PasswordHash::new(hash.as_str()).unwrap();
        let mut salt = [0u8; 64];
        assert_eq!(parsed.salt.unwrap().decode_b64(&mut salt).unwrap().len(), 16);
        assert_eq!(parsed.hash.unwrap().len(), OUTPUT_LENGTH);
    }

    #[tokio::test]
    async fn verify_uses_parameters_from_stored_hash() {
        let old = Argon2PasswordHasher::new(&HashingConfig {
            memory_kib: 2048,
            iterations: 2,
            parallelism: 2,
            max_concurrent: 1,
        })
        .unwrap();
        let stored = old.hash("rotated").await.unwrap();

        let current = hasher();
        assert!(current.verify("rotated", &stored).await.unwrap());
        assert!(!current.verify("not-rotated", &stored).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        let hasher = hasher();
        let garbage = CredentialHash::new("definitely-not-a-phc-string").unwrap();

        assert!(matches!(
            hasher.verify("secret", &garbage).await,
            Err(PasswordHasherError::Verify(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_hashing_is_bounded_but_completes() {
        let hasher = hasher();
        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let hasher = hasher.clone();
                tokio::spawn(async move {
                    let secret = format!("secret-{i}");
                    let hash = hasher.hash(&secret).await.unwrap();
                    hasher.verify(&secret, &hash).await.unwrap()
                })
            })
            .collect();

        for task in tasks {
            assert!(task.await.unwrap());
        }
    }

    #[tokio::test]
    async fn cancelled_caller_keeps_permit_until_derivation_ends() {
        let hasher = Argon2PasswordHasher::new(&HashingConfig {
            memory_kib: 65536,
            iterations: 8,
            parallelism: 1,
            max_concurrent: 1,
        })
        .unwrap();

        let task = {
            let hasher = hasher.clone();
            tokio::spawn(async move { hasher.hash("slow-secret").await })
        };

        // 等待计算真正开始
        while hasher.permits.available_permits() != 0 {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());

        // 阻塞线程上的派生还在运行，许可不能提前归还
        assert_eq!(hasher.permits.available_permits(), 0);

        tokio::time::timeout(Duration::from_secs(120), async {
            while hasher.permits.available_permits() != 1 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("permit released after derivation");
    }

    #[test]
    fn invalid_params_are_rejected() {
        let config = HashingConfig {
            memory_kib: 1,
            iterations: 1,
            parallelism: 1,
            max_concurrent: 1,
        };
        assert!(Argon2PasswordHasher::new(&config).is_err());
    }
}
