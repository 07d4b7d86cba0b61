use uuid::Uuid;

/// 全局唯一标识生成器。
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Uuid;
}

/// 基于 UUID v4 的随机标识。
#[derive(Debug, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}
