// apps/cf_cli/src/commands/run.rs

//! 运行风暴模拟命令
//!
//! 完整的单场风暴流水线：
//!
//! 1. 读取运行目录中的 `storm_config.json` 与 DEM 栅格
//! 2. 设置边界条件（周界开边界 + 无数据封闭）
//! 3. 构建降雨盘面场，写出 `rainfall.asc` 并重新读入，
//!    保证参与模拟的通量值与落盘值逐位一致
//! 4. 运行风暴-退水驱动循环
//! 5. 导出 `peak_flood_depth.asc` 与 `peak_flood_points.csv`

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use cf_config::{SimulationConfig, StormConfig};
use cf_foundation::NumericalTolerance;
use cf_grid::{apply_boundary_conditions, FieldStore};
use cf_io::{collect_flood_points, write_flood_points, AsciiGrid};
use cf_physics::{build_rainfall_field, OverlandFlowSolver, StormRecessionDriver};

/// 模拟参数配置文件名（可选，缺省时使用内置默认值）
const SIMULATION_CONFIG_FILENAME: &str = "simulation_config.json";

/// 运行风暴模拟参数
#[derive(Args)]
pub struct RunArgs {
    /// 运行目录（包含 storm_config.json 与 DEM）
    #[arg(short, long)]
    pub folder: PathBuf,

    /// 输出目录（缺省时写入运行目录）
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== CanyonFlood 风暴模拟启动 ===");
    let start = Instant::now();

    let folder = &args.folder;
    let output = args.output.clone().unwrap_or_else(|| folder.clone());
    std::fs::create_dir_all(&output)
        .with_context(|| format!("创建输出目录失败: {}", output.display()))?;

    // 配置加载
    let storm = StormConfig::from_folder(folder).context("风暴配置加载失败")?;
    let sim_path = folder.join(SIMULATION_CONFIG_FILENAME);
    let sim = if sim_path.exists() {
        SimulationConfig::from_file(&sim_path).context("模拟配置加载失败")?
    } else {
        SimulationConfig::default()
    };
    info!(
        severity = storm.storm_severity,
        duration_h = storm.storm_duration_hours,
        radius_m = storm.storm_radius_m,
        window_min = sim.total_window_minutes,
        "配置加载完成"
    );

    // DEM 加载
    let dem_path = storm.dem_path(folder);
    let dem = AsciiGrid::read(&dem_path)
        .map_err(cf_foundation::CfError::from)
        .with_context(|| format!("DEM 读取失败: {}", dem_path.display()))?;
    let mut mesh = dem.to_mesh().map_err(cf_foundation::CfError::from)?;
    let elevation = dem.values.clone();

    let tol = NumericalTolerance {
        h_dry: sim.physics.h_dry,
        h_seed: sim.initial_depth_m,
        ..NumericalTolerance::default()
    };

    let mut z_min = f64::INFINITY;
    let mut z_max = f64::NEG_INFINITY;
    let mut nodata_nodes = 0usize;
    for &z in &elevation {
        if tol.is_nodata(z) {
            nodata_nodes += 1;
        } else {
            z_min = z_min.min(z);
            z_max = z_max.max(z);
        }
    }
    info!(
        ncols = mesh.ncols(),
        nrows = mesh.nrows(),
        cellsize = mesh.cellsize(),
        z_min,
        z_max,
        nodata_nodes,
        "DEM 加载完成"
    );

    // 边界条件
    let bc = apply_boundary_conditions(&mut mesh, &elevation, &tol)?;
    info!(
        core = bc.core,
        open = bc.open,
        closed = bc.closed,
        nodata = bc.nodata,
        "边界条件设置完成"
    );

    // 降雨场：构建、落盘、重新读入
    let (flux, rain_stats) = build_rainfall_field(&mesh, &storm, sim.base_intensity_m_per_hr)?;
    let rainfall_dir = output.join("rainfall");
    std::fs::create_dir_all(&rainfall_dir)
        .with_context(|| format!("创建降雨目录失败: {}", rainfall_dir.display()))?;
    let rainfall_path = rainfall_dir.join("rainfall.asc");
    AsciiGrid::from_mesh(&mesh, flux)
        .map_err(cf_foundation::CfError::from)?
        .write(&rainfall_path)
        .map_err(cf_foundation::CfError::from)
        .context("降雨栅格写出失败")?;
    let rainfall = AsciiGrid::read(&rainfall_path)
        .map_err(cf_foundation::CfError::from)
        .context("降雨栅格回读失败")?;
    info!(
        wet_nodes = rain_stats.wet_nodes,
        intensity_m_per_hr = rain_stats.intensity_m_per_hr,
        path = %rainfall_path.display(),
        "降雨盘面场就绪"
    );

    // 物理场初始化
    let mut fields = FieldStore::new(mesh.n_nodes());
    fields.set_elevation(elevation.clone())?;
    fields.set_rainfall_flux(rainfall.values)?;
    fields.fill_water_depth(sim.initial_depth_m);
    fields.init_peak_from_depth();

    // 求解与驱动
    let mut solver = OverlandFlowSolver::new(&mesh, &elevation, &sim.physics, tol)?;
    let mut driver = StormRecessionDriver::new(&storm, &sim);
    let report = driver.run(&mut solver, &mut fields)?;

    // 结果导出
    let depth_path = output.join("peak_flood_depth.asc");
    AsciiGrid::from_mesh(&mesh, fields.peak_depth().to_vec())
        .map_err(cf_foundation::CfError::from)?
        .write(&depth_path)
        .map_err(cf_foundation::CfError::from)
        .context("峰值水深栅格写出失败")?;

    let points = collect_flood_points(&mesh, fields.peak_depth(), sim.initial_depth_m)
        .map_err(cf_foundation::CfError::from)?;
    let points_path = output.join("peak_flood_points.csv");
    write_flood_points(&points_path, &points)
        .map_err(cf_foundation::CfError::from)
        .context("积水点表写出失败")?;

    info!("=== 模拟完成 ===");
    info!("迭代次数: {}", report.iterations);
    info!("模拟时长: {:.1} s", report.total_elapsed_s);
    info!("峰值水深最大值: {:.4} m", report.max_peak_depth_m);
    info!("积水点数: {}", points.len());
    info!("计算时间: {:.2} s", start.elapsed().as_secs_f64());
    info!("输出: {}", depth_path.display());
    info!("输出: {}", points_path.display());

    Ok(())
}
