use std::cmp::Reverse;
use std::str::FromStr;

use crate::items::separator::Separator;
use crate::items::types::{ItemError, ItemResult};

/// 单个命令行请求项 `key<sep>value` 的解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValueArg {
    /// 原始输入，用于错误提示
    pub orig: String,
    /// 已去除转义标记的 key
    pub key: String,
    pub sep: Separator,
    /// 原样保留的 value
    pub value: String,
}

impl KeyValueArg {
    pub fn new(
        orig: impl Into<String>,
        key: impl Into<String>,
        sep: Separator,
        value: impl Into<String>,
    ) -> Self {
        Self {
            orig: orig.into(),
            key: key.into(),
            sep,
            value: value.into(),
        }
    }

    /// 使用默认分隔符集合解析请求项
    pub fn parse(raw: &str) -> ItemResult<Self> {
        tokenize(raw, Separator::ALL)
    }

    /// 重新转义 key 中的特殊字符并拼接回 `key + sep + value`
    pub fn to_escaped_string(&self) -> String {
        let mut out = String::with_capacity(self.orig.len() + 4);
        for c in self.key.chars() {
            if Separator::is_special_char(Separator::ALL, c) {
                out.push('\\');
            }
            out.push(c);
        }
        out.push_str(self.sep.as_str());
        out.push_str(&self.value);
        out
    }
}

impl FromStr for KeyValueArg {
    type Err = ItemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// 在原始字符串中查找第一个未被转义的分隔符并拆分
///
/// 从左到右扫描，同一位置优先匹配最长的分隔符。
/// 反斜杠只转义紧随其后的一个特殊字符（出现在任一分隔符中的字符），
/// 转义标记会从 key 中去掉；反斜杠后跟其他字符时两者都原样保留，
/// 因此 `c:\windows` 这样的路径不会被误解析。
///
/// value 部分不做任何反转义处理。
pub fn tokenize(raw: &str, seps: &[Separator]) -> ItemResult<KeyValueArg> {
    let mut ordered: Vec<Separator> = seps.to_vec();
    ordered.sort_by_key(|sep| Reverse(sep.as_str().len()));

    let mut key = String::new();
    let mut chars = raw.char_indices();

    while let Some((pos, c)) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some((_, next)) if Separator::is_special_char(seps, next) => key.push(next),
                Some((_, next)) => {
                    key.push('\\');
                    key.push(next);
                }
                None => key.push('\\'),
            }
            continue;
        }

        let rest = &raw[pos..];
        if let Some(sep) = ordered.iter().find(|sep| rest.starts_with(sep.as_str())) {
            let value = &rest[sep.as_str().len()..];
            tracing::trace!(item = raw, key = %key, sep = %sep, "tokenized request item");
            return Ok(KeyValueArg::new(raw, key, *sep, value));
        }

        key.push(c);
    }

    Err(ItemError::ArgumentSyntax(raw.to_string()))
}
