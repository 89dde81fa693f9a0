mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统，默认只输出警告，--verbose 时输出调试信息
    reqitems::logger::init_logger(if cli.verbose { "debug" } else { "warn" });

    cli::run(cli)
}
