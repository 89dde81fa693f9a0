use crate::http::{PreparedRequest, RequestBody};
use anyhow::Result;
use colored::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    /// 只输出请求行和请求体
    Compact,
    /// 输出请求行、Header 和请求体
    Verbose,
}

pub struct RequestFormatter {
    format: RequestFormat,
    color: bool,
}

impl RequestFormatter {
    pub fn new(format: RequestFormat) -> Self {
        Self {
            format,
            color: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn format(&self, request: &PreparedRequest) -> Result<String> {
        let mut output = Vec::new();

        let request_line = format!("{} {}", request.method, request.url);
        if self.color {
            output.push(request_line.green().bold().to_string());
        } else {
            output.push(request_line);
        }

        if matches!(self.format, RequestFormat::Verbose) {
            for (key, value) in request.headers.iter() {
                let value_str = value.to_str().unwrap_or("<invalid utf-8>");
                let line = format!("{}: {}", key, value_str);
                if self.color {
                    output.push(line.blue().to_string());
                } else {
                    output.push(line);
                }
            }
        }

        if let Some(body) = &request.body {
            output.push(String::new());
            output.extend(self.format_body(body)?);
        }

        Ok(output.join("\n"))
    }

    fn format_body(&self, body: &RequestBody) -> Result<Vec<String>> {
        let lines = match body {
            RequestBody::Json(json) => vec![self.try_format_json(json)?],
            RequestBody::Form(form) => vec![form.clone()],
            RequestBody::Multipart { fields, files } => {
                let mut lines: Vec<String> =
                    fields.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                for (field, file) in files {
                    let line = format!(
                        "{}@{} ({} bytes)",
                        field,
                        file.filename,
                        file.content.len()
                    );
                    lines.push(if self.color {
                        line.cyan().to_string()
                    } else {
                        line
                    });
                }
                lines
            }
        };
        Ok(lines)
    }

    /// 将 JSON 请求体格式化为缩进形式
    fn try_format_json(&self, body: &str) -> Result<String> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        serde_json::to_string_pretty(&value).map_err(Into::into)
    }
}
