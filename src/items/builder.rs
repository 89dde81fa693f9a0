use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::items::separator::{Bucket, Separator};
use crate::items::tokenizer::KeyValueArg;
use crate::items::types::{
    DataValue, FileField, HeaderValue, ItemError, ItemResult, RequestItems, RequestMode,
};

impl RequestItems {
    /// 按输入顺序对请求项逐个分类，构建最终的 RequestItems
    ///
    /// 遇到第一个错误立即返回。文件在此处同步读取，
    /// 路径相对于当前工作目录解析。
    pub fn from_args(args: &[KeyValueArg], mode: RequestMode) -> ItemResult<Self> {
        let mut items = RequestItems::new();

        for arg in args {
            tracing::trace!(item = %arg.orig, sep = %arg.sep, "classifying request item");
            match arg.sep.bucket() {
                Bucket::Header => {
                    let value = match arg.sep {
                        Separator::HeaderEmpty => {
                            if !arg.value.is_empty() {
                                tracing::warn!(
                                    item = %arg.orig,
                                    "text after ';' is ignored, header is sent with an empty value"
                                );
                            }
                            HeaderValue::Value(String::new())
                        }
                        _ if arg.value.is_empty() => HeaderValue::Unset,
                        _ => HeaderValue::Value(arg.value.clone()),
                    };
                    items.headers.insert(&arg.key, value);
                }
                Bucket::Param => {
                    items.params.insert(arg.key.clone(), arg.value.clone());
                }
                Bucket::File => {
                    let path = PathBuf::from(&arg.value);
                    let content = read_file(&path)?;
                    let filename = file_name(&path);
                    let field = if arg.key.is_empty() {
                        filename.clone()
                    } else {
                        arg.key.clone()
                    };
                    tracing::debug!(
                        field = %field,
                        path = %path.display(),
                        bytes = content.len(),
                        "loaded upload file"
                    );
                    items
                        .files
                        .entry(field)
                        .or_default()
                        .push(FileField { filename, content });
                }
                Bucket::Data => {
                    let value = data_value(arg)?;
                    match mode {
                        RequestMode::Form => items.data.append(arg.key.clone(), value),
                        RequestMode::Json => items.data.insert(arg.key.clone(), value),
                    }
                }
            }
        }

        tracing::debug!(
            headers = items.headers.len(),
            params = items.params.len(),
            data = items.data.len(),
            files = items.files.len(),
            form = mode.is_form(),
            "request items built"
        );
        Ok(items)
    }

    /// 解析原始字符串并构建，便于命令行直接调用
    pub fn parse<S: AsRef<str>>(raw_items: &[S], mode: RequestMode) -> ItemResult<Self> {
        let args = raw_items
            .iter()
            .map(|raw| KeyValueArg::parse(raw.as_ref()))
            .collect::<ItemResult<Vec<_>>>()?;
        Self::from_args(&args, mode)
    }
}

fn data_value(arg: &KeyValueArg) -> ItemResult<DataValue> {
    match arg.sep {
        Separator::DataRawJson => parse_json(&arg.key, &arg.value, &arg.value).map(DataValue::Json),
        Separator::DataEmbedFile => read_text_file(Path::new(&arg.value)).map(DataValue::String),
        Separator::DataEmbedRawJsonFile => {
            let path = Path::new(&arg.value);
            let text = read_text_file(path)?;
            parse_json(&arg.key, &text, &path.display().to_string()).map(DataValue::Json)
        }
        _ => Ok(DataValue::String(arg.value.clone())),
    }
}

fn parse_json(key: &str, text: &str, origin: &str) -> ItemResult<Value> {
    serde_json::from_str(text).map_err(|source| ItemError::DataFormat {
        key: key.to_string(),
        text: origin.to_string(),
        source,
    })
}

fn read_file(path: &Path) -> ItemResult<Vec<u8>> {
    fs::read(path).map_err(|source| ItemError::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}

/// 严格按 UTF-8 解码，不去除末尾换行
fn read_text_file(path: &Path) -> ItemResult<String> {
    let bytes = read_file(path)?;
    String::from_utf8(bytes).map_err(|e| ItemError::FileAccess {
        path: path.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidData, e),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
