use std::path::PathBuf;

use indexmap::IndexMap;
use serde_json::Value;

/// 请求项解析错误
///
/// 所有错误都会立即中止整个解析，不返回部分结果。
#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    /// 请求项中没有任何未转义的分隔符
    #[error("Invalid request item '{0}': expected one of the separators : ; == = := @ =@ :=@")]
    ArgumentSyntax(String),

    /// `:=` / `:=@` 的值不是合法 JSON
    #[error("Invalid JSON for '{key}' ({text}): {source}")]
    DataFormat {
        key: String,
        /// 原始文本（`:=`）或文件路径（`:=@`）
        text: String,
        #[source]
        source: serde_json::Error,
    },

    /// 文件无法打开、读取或解码
    #[error("Cannot read file '{}': {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 请求项解析结果类型别名
pub type ItemResult<T> = Result<T, ItemError>;

/// 请求体模式，决定重复数据字段是累积还是覆盖
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestMode {
    /// JSON 请求体，重复的 key 后者覆盖前者
    #[default]
    Json,
    /// 表单 / multipart 提交，重复的 key 累积为多个值
    Form,
}

impl RequestMode {
    pub fn from_form_flag(form: bool) -> Self {
        if form { Self::Form } else { Self::Json }
    }

    pub fn is_form(&self) -> bool {
        matches!(self, Self::Form)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Value(String),
    /// 显式移除该 Header（例如默认的 User-Agent）
    Unset,
}

impl HeaderValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HeaderValue::Value(v) => Some(v),
            HeaderValue::Unset => None,
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, HeaderValue::Unset)
    }
}

/// 大小写不敏感、保持插入顺序的 Header 集合
///
/// 以小写 key 作为索引，同时保存第一次出现时的原始大小写用于输出。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Headers {
    entries: IndexMap<String, (String, HeaderValue)>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置 Header，后写覆盖前写，保留首次出现的大小写和位置
    pub fn insert(&mut self, name: &str, value: HeaderValue) {
        let lower = name.to_lowercase();
        match self.entries.get_mut(&lower) {
            Some(entry) => entry.1 = value,
            None => {
                self.entries.insert(lower, (name.to_string(), value));
            }
        }
    }

    /// 标记 Header 为移除，覆盖之前设置过的任何值
    pub fn unset(&mut self, name: &str) {
        self.insert(name, HeaderValue::Unset);
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.entries.get(&name.to_lowercase()).map(|(_, v)| v)
    }

    /// 按插入顺序遍历 `(原始名称, 值)`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries.values().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 数据字段的值
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    String(String),
    /// 表单模式下同名字段的多个值
    List(Vec<String>),
    Json(Value),
}

impl DataValue {
    /// 转为 JSON 值，用于构造 JSON 请求体
    pub fn to_json(&self) -> Value {
        match self {
            DataValue::String(s) => Value::String(s.clone()),
            DataValue::List(items) => {
                Value::Array(items.iter().cloned().map(Value::String).collect())
            }
            DataValue::Json(v) => v.clone(),
        }
    }

    /// 表单提交时的文本值
    fn into_form_values(self) -> Vec<String> {
        match self {
            DataValue::String(s) => vec![s],
            DataValue::List(items) => items,
            DataValue::Json(Value::String(s)) => vec![s],
            DataValue::Json(v) => vec![v.to_string()],
        }
    }
}

/// 保持插入顺序的数据字段集合
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestData {
    fields: IndexMap<String, DataValue>,
}

impl RequestData {
    pub fn new() -> Self {
        Self::default()
    }

    /// 覆盖写入
    pub fn insert(&mut self, key: impl Into<String>, value: DataValue) {
        self.fields.insert(key.into(), value);
    }

    /// 表单模式写入：同名字段按出现顺序累积为列表，
    /// JSON 值以紧凑文本形式加入，与 `pairs()` 的输出一致
    pub fn append(&mut self, key: impl Into<String>, value: DataValue) {
        let key = key.into();
        let Some(slot) = self.fields.get_mut(&key) else {
            self.fields.insert(key, value);
            return;
        };
        let mut values = std::mem::replace(slot, DataValue::List(Vec::new())).into_form_values();
        values.extend(value.into_form_values());
        *slot = DataValue::List(values);
    }

    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.fields.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 展开后的 `(key, 文本值)` 列表，列表字段按出现顺序展开，
    /// JSON 值使用紧凑格式的文本表示
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut out = Vec::with_capacity(self.fields.len());
        for (key, value) in &self.fields {
            match value {
                DataValue::String(s) => out.push((key.clone(), s.clone())),
                DataValue::List(items) => {
                    out.extend(items.iter().map(|s| (key.clone(), s.clone())))
                }
                DataValue::Json(Value::String(s)) => out.push((key.clone(), s.clone())),
                DataValue::Json(v) => out.push((key.clone(), v.to_string())),
            }
        }
        out
    }

    /// 转为 JSON 对象，作为 JSON 请求体
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.fields
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

/// 待上传的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileField {
    /// 磁盘上的文件名（不含目录）
    pub filename: String,
    pub content: Vec<u8>,
}

/// 请求项解析的最终结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestItems {
    pub headers: Headers,
    pub params: IndexMap<String, String>,
    pub data: RequestData,
    /// 每个字段名对应的文件总是列表，即使只有一个文件
    pub files: IndexMap<String, Vec<FileField>>,
}

impl RequestItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
            && self.params.is_empty()
            && self.data.is_empty()
            && self.files.is_empty()
    }

    pub fn has_body(&self) -> bool {
        !self.data.is_empty() || !self.files.is_empty()
    }
}
