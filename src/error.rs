use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReqItemsError {
    #[error("请求项错误: {0}")]
    Item(#[from] crate::items::ItemError),

    #[error("无效的 URL: {0}")]
    InvalidUrl(String),

    #[error("无效的 Header: {0}")]
    InvalidHeader(String),

    #[error("无效的 HTTP 方法: {0}")]
    InvalidMethod(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("URL 解析错误: {0}")]
    UrlParseError(#[from] url::ParseError),

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for ReqItemsError {
    fn from(err: anyhow::Error) -> Self {
        ReqItemsError::Other(err.to_string())
    }
}

impl From<toml::de::Error> for ReqItemsError {
    fn from(err: toml::de::Error) -> Self {
        ReqItemsError::ConfigError(err.to_string())
    }
}

/// Result type for reqitems crate
pub type Result<T> = std::result::Result<T, ReqItemsError>;
