/// 唯一被视为开发环境的平台标识
pub const DEV_PLATFORM: &str = "dev";

/// 运行环境。只有开发环境允许执行重置这类破坏性操作。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    /// 按平台标识解析，只有 `"dev"` 被视为开发环境。
    pub fn from_platform(platform: &str) -> Self {
        if platform == DEV_PLATFORM {
            Self::Development
        } else {
            Self::Production
        }
    }

    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_dev_is_development() {
        assert_eq!(Environment::from_platform("dev"), Environment::Development);
        assert_eq!(Environment::from_platform("DEV"), Environment::Production);
        assert_eq!(Environment::from_platform(""), Environment::Production);
        assert_eq!(Environment::from_platform("prod"), Environment::Production);
        assert!(!Environment::default().is_development());
    }
}
