// apps/cf_cli/src/commands/info.rs

//! 显示 DEM 信息命令

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

use cf_foundation::NumericalTolerance;
use cf_io::AsciiGrid;

/// DEM 信息参数
#[derive(Args)]
pub struct InfoArgs {
    /// DEM 文件路径（ESRI ASCII 格式）
    #[arg(short, long)]
    pub dem: PathBuf,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    let dem = AsciiGrid::read(&args.dem)
        .map_err(cf_foundation::CfError::from)
        .with_context(|| format!("DEM 读取失败: {}", args.dem.display()))?;

    let tol = NumericalTolerance::default();
    let mut z_min = f64::INFINITY;
    let mut z_max = f64::NEG_INFINITY;
    let mut nodata = 0usize;
    for &z in &dem.values {
        if tol.is_nodata(z) {
            nodata += 1;
        } else {
            z_min = z_min.min(z);
            z_max = z_max.max(z);
        }
    }

    info!("DEM: {}", args.dem.display());
    info!("尺寸: {} 列 x {} 行 ({} 节点)", dem.ncols, dem.nrows, dem.ncols * dem.nrows);
    info!("单元边长: {} m", dem.cellsize);
    info!("左下角: ({}, {})", dem.xllcorner, dem.yllcorner);
    info!("无数据节点: {}", nodata);
    if nodata < dem.values.len() {
        info!("高程范围: {z_min} .. {z_max} m");
    }

    Ok(())
}
