use std::path::PathBuf;

use clap::Parser;
use reqitems::config::{Config, ConfigLoader};
use reqitems::http::{Method, PreparedRequest};
use reqitems::items::{KeyValueArg, RequestItems, RequestMode};
use reqitems::utils::{RequestFormat, RequestFormatter};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// 以表单方式提交数据字段（重复字段累积为多个值）
    #[arg(short, long)]
    pub form: bool,

    /// 以 JSON 对象提交数据字段（默认）
    #[arg(short, long, conflicts_with = "form")]
    pub json: bool,

    /// 指定配置文件，默认查找 reqitems.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 输出 Header 及调试日志
    #[arg(short, long)]
    pub verbose: bool,

    /// 关闭彩色输出
    #[arg(long)]
    pub no_color: bool,

    /// [METHOD] URL [REQUEST_ITEM ...]
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    pub args: Vec<String>,
}

/// 拆分后的位置参数
#[derive(Debug, PartialEq)]
struct ParsedArgs {
    method: Option<Method>,
    url: String,
    items: Vec<KeyValueArg>,
}

struct CliRunner {
    config: Config,
    mode: RequestMode,
    format: RequestFormat,
    color: bool,
}

impl CliRunner {
    fn new(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => ConfigLoader::load_from_path(path)?,
            None => ConfigLoader::find_and_load().unwrap_or_default(),
        };

        let mode = if cli.form {
            RequestMode::Form
        } else if cli.json {
            RequestMode::Json
        } else {
            RequestMode::from_form_flag(config.form)
        };

        Ok(Self {
            config,
            mode,
            format: if cli.verbose {
                RequestFormat::Verbose
            } else {
                RequestFormat::Compact
            },
            color: !cli.no_color,
        })
    }

    fn run(&self, args: Vec<String>) -> Result<()> {
        let parsed = Self::parse_args(args)?;
        let items = RequestItems::from_args(&parsed.items, self.mode)?;
        let request =
            PreparedRequest::build(parsed.method, &parsed.url, &items, self.mode, &self.config)?;

        let formatter = RequestFormatter::new(self.format).with_color(self.color);
        println!("{}", formatter.format(&request)?);
        Ok(())
    }

    fn parse_args(args: Vec<String>) -> Result<ParsedArgs> {
        let mut args_iter = args.into_iter().peekable();

        // Step 1: 第一个参数可以是 HTTP 方法
        let method = match args_iter.peek() {
            Some(first) if Method::is_method(first) => {
                let method = first.parse::<Method>()?;
                args_iter.next();
                Some(method)
            }
            _ => None,
        };

        // Step 2: 接下来的参数总是 URL，即使其中含有 = @ ; 等分隔符字符
        let url = args_iter
            .next()
            .ok_or_else(|| anyhow::anyhow!("URL is required"))?;

        // Step 3: 剩余参数均为请求项，第一个无效项即报错
        let items = args_iter
            .map(|arg| KeyValueArg::parse(&arg))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::debug!(method = ?method, url = %url, items = items.len(), "command line parsed");
        Ok(ParsedArgs { method, url, items })
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let runner = CliRunner::new(&cli)?;
    runner.run(cli.args)
}
