//! 请求项模块 - 解析 httpie 风格的命令行请求项

mod builder;
mod separator;
mod tokenizer;
mod types;

pub use separator::{Bucket, Separator};
pub use tokenizer::{KeyValueArg, tokenize};
pub use types::{
    DataValue, FileField, HeaderValue, Headers, ItemError, ItemResult, RequestData, RequestItems,
    RequestMode,
};
