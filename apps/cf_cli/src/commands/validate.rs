// apps/cf_cli/src/commands/validate.rs

//! 验证运行目录配置命令
//!
//! 只做配置与 DEM 的加载验证，不运行模拟。

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use cf_config::{SimulationConfig, StormConfig};
use cf_io::AsciiGrid;

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 运行目录（包含 storm_config.json 与 DEM）
    #[arg(short, long)]
    pub folder: PathBuf,
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    let storm = StormConfig::from_folder(&args.folder).context("风暴配置验证失败")?;
    info!("风暴配置有效: severity={}, duration={} h", storm.storm_severity, storm.storm_duration_hours);

    let sim_path = args.folder.join("simulation_config.json");
    if sim_path.exists() {
        let sim = SimulationConfig::from_file(&sim_path).context("模拟配置验证失败")?;
        info!("模拟配置有效: window={} min", sim.total_window_minutes);
    } else {
        info!("未提供模拟配置, 将使用内置默认值");
    }

    let dem_path = storm.dem_path(&args.folder);
    let dem = AsciiGrid::read(&dem_path)
        .map_err(cf_foundation::CfError::from)
        .with_context(|| format!("DEM 验证失败: {}", dem_path.display()))?;
    let mesh = dem.to_mesh().map_err(cf_foundation::CfError::from)?;
    info!("DEM 有效: {} 节点", mesh.n_nodes());

    info!("运行目录验证通过: {}", args.folder.display());
    Ok(())
}
