//! 内容审核
//!
//! 对 chirp 正文做整词、大小写不敏感的屏蔽词替换。

use std::borrow::Cow;
use std::collections::HashSet;

/// 命中屏蔽词后替换成的固定掩码。
pub const PROFANITY_MASK: &str = "****";

/// 默认屏蔽词表。
pub const DEFAULT_BANNED_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// 屏蔽词过滤器。
///
/// 词表在构造时确定，之后不可修改，可以在线程间自由共享。
#[derive(Debug, Clone)]
pub struct ProfanityFilter {
    banned: HashSet<String>,
}

impl ProfanityFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            banned: words
                .into_iter()
                .map(|word| word.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// 过滤文本，返回 `(清理后的文本, 是否发生替换)`。
    ///
    /// 按空白切分成词，标点不剥离，词的小写形式与词表完全相等才算命中。
    /// 有命中时用单个空格重新拼接（原有的连续空白不保留）；没有命中时原样返回输入。
    pub fn filter<'a>(&self, text: &'a str) -> (Cow<'a, str>, bool) {
        let mut modified = false;
        let words: Vec<&str> = text
            .split_whitespace()
            .map(|word| {
                if self.banned.contains(&word.to_lowercase()) {
                    modified = true;
                    PROFANITY_MASK
                } else {
                    word
                }
            })
            .collect();

        if modified {
            (Cow::Owned(words.join(" ")), true)
        } else {
            (Cow::Borrowed(text), false)
        }
    }
}

impl Default for ProfanityFilter {
    fn default() -> Self {
        Self::new(DEFAULT_BANNED_WORDS)
    }
}
