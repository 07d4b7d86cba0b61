//! 业务规则验证

use crate::errors::{DomainError, DomainResult};
use crate::moderation::ProfanityFilter;

/// chirp 正文的最大字节数。
pub const MAX_CHIRP_LENGTH: usize = 140;

/// Chirp 正文校验。
///
/// 先对原始正文做长度检查，通过后再交给屏蔽词过滤器。空正文是允许的。
#[derive(Debug, Clone)]
pub struct ChirpValidator {
    max_length: usize,
    filter: ProfanityFilter,
}

impl ChirpValidator {
    pub fn new(filter: ProfanityFilter) -> Self {
        Self {
            max_length: MAX_CHIRP_LENGTH,
            filter,
        }
    }

    /// 校验并返回审核后的正文。
    pub fn validate(&self, raw_body: &str) -> DomainResult<String> {
        let length = raw_body.len();
        if length > self.max_length {
            return Err(DomainError::ChirpTooLong {
                length,
                max: self.max_length,
            });
        }

        let (cleaned, _) = self.filter.filter(raw_body);
        Ok(cleaned.into_owned())
    }
}

impl Default for ChirpValidator {
    fn default() -> Self {
        Self::new(ProfanityFilter::default())
    }
}
