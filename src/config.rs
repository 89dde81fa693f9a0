use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::Result;
use crate::error::ReqItemsError;

/// 命令行默认配置
///
/// ```toml
/// form = true
///
/// [default_headers]
/// X-Api-Key = "dev-key"
/// ```
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Config {
    /// 默认使用表单模式
    #[serde(default)]
    pub form: bool,

    /// 每个请求都附带的 Header，可被请求项覆盖或移除
    #[serde(default)]
    pub default_headers: IndexMap<String, String>,
}

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    const CONFIG_FILE: &'static str = "reqitems.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ReqItemsError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及其父目录
    /// 2. 用户配置目录 ~/.config/reqitems/
    pub fn find_and_load() -> Option<Config> {
        Self::try_load_from_current_dir().or_else(Self::try_load_from_user_dir)
    }

    fn try_load_from_current_dir() -> Option<Config> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.exists() {
                return Self::load_logged(&config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    fn try_load_from_user_dir() -> Option<Config> {
        let home = dirs::home_dir()?;
        let config_path = home
            .join(".config")
            .join("reqitems")
            .join(Self::CONFIG_FILE);

        if config_path.exists() {
            Self::load_logged(&config_path)
        } else {
            None
        }
    }

    /// 自动发现的配置文件出错时只记录警告，不中断请求
    fn load_logged(path: &Path) -> Option<Config> {
        match Self::load_from_path(path) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "ignoring invalid config file"
                );
                None
            }
        }
    }
}
