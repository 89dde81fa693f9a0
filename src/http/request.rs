use reqwest::header::{
    ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue as WireHeaderValue, USER_AGENT,
};

use crate::config::Config;
use crate::http::types::{Method, parse_url};
use crate::items::{FileField, HeaderValue, RequestItems, RequestMode};
use crate::{ReqItemsError, Result};

const DEFAULT_USER_AGENT: &str = concat!("reqitems/", env!("CARGO_PKG_VERSION"));
const JSON_ACCEPT: &str = "application/json, */*;q=0.5";
const JSON_CONTENT_TYPE: &str = "application/json";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=utf-8";
const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

/// 由请求项生成的请求体
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// 序列化后的 JSON 对象
    Json(String),
    /// urlencoded 表单
    Form(String),
    /// 含文件上传时使用 multipart，边界由传输层生成
    Multipart {
        fields: Vec<(String, String)>,
        files: Vec<(String, FileField)>,
    },
}

/// 准备发送的请求，本 crate 不负责实际发送
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: url::Url,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

impl PreparedRequest {
    /// 将 RequestItems 应用到默认请求上
    ///
    /// Header 的优先级：内置默认值 < 配置文件 < 请求项。
    /// 请求项中的 `Header:`（空值）会移除对应的默认 Header。
    /// 未指定方法时，有请求体则为 POST，否则为 GET。
    pub fn build(
        method: Option<Method>,
        url: &str,
        items: &RequestItems,
        mode: RequestMode,
        config: &Config,
    ) -> Result<Self> {
        let mut url = parse_url(url)?;
        if !items.params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in &items.params {
                query.append_pair(key, value);
            }
        }

        let body = build_body(items, mode)?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, WireHeaderValue::from_static(DEFAULT_USER_AGENT));
        let accept = if mode.is_form() { "*/*" } else { JSON_ACCEPT };
        headers.insert(ACCEPT, WireHeaderValue::from_static(accept));
        if let Some(content_type) = body.as_ref().map(content_type_of) {
            headers.insert(CONTENT_TYPE, WireHeaderValue::from_static(content_type));
        }

        for (name, value) in &config.default_headers {
            headers.insert(header_name(name)?, header_value(name, value)?);
        }

        for (name, value) in items.headers.iter() {
            let header = header_name(name)?;
            match value {
                HeaderValue::Value(v) => {
                    headers.insert(header, header_value(name, v)?);
                }
                HeaderValue::Unset => {
                    headers.remove(header);
                }
            }
        }

        let method = method.unwrap_or(if body.is_some() {
            Method::Post
        } else {
            Method::Get
        });

        tracing::debug!(method = %method, url = %url, headers = headers.len(), "request prepared");
        Ok(Self {
            method,
            url,
            headers,
            body,
        })
    }
}

fn build_body(items: &RequestItems, mode: RequestMode) -> Result<Option<RequestBody>> {
    if !items.files.is_empty() {
        let files = items
            .files
            .iter()
            .flat_map(|(field, uploads)| uploads.iter().map(move |f| (field.clone(), f.clone())))
            .collect();
        return Ok(Some(RequestBody::Multipart {
            fields: items.data.pairs(),
            files,
        }));
    }

    if items.data.is_empty() {
        return Ok(None);
    }

    let body = match mode {
        RequestMode::Json => RequestBody::Json(serde_json::to_string(&items.data.to_json())?),
        RequestMode::Form => {
            let mut form = url::form_urlencoded::Serializer::new(String::new());
            for (key, value) in items.data.pairs() {
                form.append_pair(&key, &value);
            }
            RequestBody::Form(form.finish())
        }
    };
    Ok(Some(body))
}

fn content_type_of(body: &RequestBody) -> &'static str {
    match body {
        RequestBody::Json(_) => JSON_CONTENT_TYPE,
        RequestBody::Form(_) => FORM_CONTENT_TYPE,
        RequestBody::Multipart { .. } => MULTIPART_CONTENT_TYPE,
    }
}

fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| ReqItemsError::InvalidHeader(format!("'{}': {}", name, e)))
}

fn header_value(name: &str, value: &str) -> Result<WireHeaderValue> {
    WireHeaderValue::from_str(value)
        .map_err(|e| ReqItemsError::InvalidHeader(format!("'{}: {}': {}", name, value, e)))
}
