//! 应用层实现。
//!
//! 这里提供围绕领域模型的用例服务，处理输入校验、凭证校验，
//! 以及对外部适配器（例如密码哈希、存储、时钟）的抽象。

pub mod clock;
pub mod dto;
pub mod environment;
pub mod error;
pub mod id_generator;
pub mod metrics;
pub mod password;
pub mod services;

pub use clock::{Clock, SystemClock};
pub use dto::{AccountDto, ChirpDto};
pub use environment::{Environment, DEV_PLATFORM};
pub use error::ApplicationError;
pub use id_generator::{IdGenerator, RandomIdGenerator};
pub use metrics::HitCounter;
pub use password::{PasswordHasher, PasswordHasherError};
pub use services::{
    AuthenticateRequest, CreateAccountRequest, CreateChirpRequest, ResourceService,
    ResourceServiceDependencies,
};
