// apps/cf_cli/src/main.rs

//! CanyonFlood 命令行界面
//!
//! 单场风暴山洪模拟的命令行工具：读取运行目录中的风暴配置与 DEM，
//! 运行风暴-退水模拟，导出峰值淹没水深栅格与积水点表。

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// CanyonFlood 山洪模拟命令行工具
#[derive(Parser)]
#[command(name = "cf_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "CanyonFlood flash flood simulation driver", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行风暴模拟
    Run(commands::run::RunArgs),
    /// 显示 DEM 信息
    Info(commands::info::InfoArgs),
    /// 验证运行目录配置
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 执行命令
    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
