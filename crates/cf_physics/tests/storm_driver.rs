// crates/cf_physics/tests/storm_driver.rs

//! 风暴-退水驱动集成测试
//!
//! 在小型网格上运行完整驱动循环，验证双时钟推进、降雨注入窗口、
//! 峰值追踪与迭代上限行为。

use std::path::PathBuf;

use cf_config::{SimulationConfig, StormConfig};
use cf_foundation::{CfError, NumericalTolerance};
use cf_grid::{apply_boundary_conditions, FieldStore, RasterMesh};
use cf_physics::{build_rainfall_field, OverlandFlowSolver, StormPhase, StormRecessionDriver};

/// 构建平坦地形的测试场景：4x4 网格、全域降雨
fn flat_scene(
    storm_duration_hours: f64,
    severity: u32,
    sim: &SimulationConfig,
) -> (StormConfig, OverlandFlowSolver, FieldStore) {
    let elevation = vec![100.0; 16];
    let mut mesh = RasterMesh::new(4, 4, 10.0, 0.0, 0.0, -9999.0).unwrap();
    let tol = NumericalTolerance::default();
    apply_boundary_conditions(&mut mesh, &elevation, &tol).unwrap();

    let storm = StormConfig {
        dem_ascii: PathBuf::from("dem.asc"),
        storm_center_x: 15.0,
        storm_center_y: 15.0,
        storm_radius_m: 1000.0,
        storm_severity: severity,
        storm_duration_hours,
    };

    let (flux, _) = build_rainfall_field(&mesh, &storm, sim.base_intensity_m_per_hr).unwrap();

    let mut fields = FieldStore::new(mesh.n_nodes());
    fields.set_elevation(elevation.clone()).unwrap();
    fields.set_rainfall_flux(flux).unwrap();
    fields.fill_water_depth(sim.initial_depth_m);
    fields.init_peak_from_depth();

    let solver = OverlandFlowSolver::new(&mesh, &elevation, &sim.physics, tol).unwrap();
    (storm, solver, fields)
}

/// 短窗口配置：10 分钟窗口，其余保持默认
fn short_sim() -> SimulationConfig {
    SimulationConfig {
        total_window_minutes: 10.0,
        ..SimulationConfig::default()
    }
}

#[test]
fn test_window_covered_exactly() {
    let sim = short_sim();
    let (storm, mut solver, mut fields) = flat_scene(0.05, 1, &sim);
    let mut driver = StormRecessionDriver::new(&storm, &sim);

    let report = driver.run(&mut solver, &mut fields).unwrap();

    // 总时钟精确落在窗口终点
    assert_eq!(report.total_elapsed_s, 600.0);
    assert_eq!(driver.phase(), StormPhase::Done);
    // 干态下步长始终为上限 60 s
    assert_eq!(report.iterations, 10);
}

#[test]
fn test_clocks_advance_together() {
    let sim = short_sim();
    let (storm, mut solver, mut fields) = flat_scene(0.05, 1, &sim);
    let mut driver = StormRecessionDriver::new(&storm, &sim);

    let report = driver.run(&mut solver, &mut fields).unwrap();

    // 风暴时钟与总时钟同步推进，结束时相等
    assert_eq!(report.storm_elapsed_s, report.total_elapsed_s);
}

#[test]
fn test_rainfall_window_accounting() {
    // 风暴 0.05 h = 180 s，步长 60 s：降雨注入发生在推进后风暴时钟
    // 仍小于 180 的两步（60、120），精确命中 180 的一步不注入
    let sim = short_sim();
    let (storm, mut solver, mut fields) = flat_scene(0.05, 1, &sim);
    let mut driver = StormRecessionDriver::new(&storm, &sim);

    driver.run(&mut solver, &mut fields).unwrap();

    let flux = sim.base_intensity_m_per_hr;
    let expected = sim.initial_depth_m + flux * 120.0 / 3600.0;
    // 水深低于干阈值，全程无流动，纯降雨累积
    for &h in fields.water_depth() {
        assert!((h - expected).abs() < 1e-15, "h = {h}, 期望 {expected}");
    }
}

#[test]
fn test_zero_duration_storm_stays_at_seed() {
    let sim = short_sim();
    let (storm, mut solver, mut fields) = flat_scene(0.0, 5, &sim);
    let mut driver = StormRecessionDriver::new(&storm, &sim);
    assert_eq!(driver.phase(), StormPhase::Recession);

    driver.run(&mut solver, &mut fields).unwrap();

    // 无降雨、平坦地形：水深与峰值保持种子值
    for (&h, &peak) in fields.water_depth().iter().zip(fields.peak_depth().iter()) {
        assert_eq!(h, sim.initial_depth_m);
        assert_eq!(peak, sim.initial_depth_m);
    }
}

#[test]
fn test_zero_radius_storm_exports_nothing() {
    // 半径 0 且风暴中心不落在任何节点上：降雨掩膜为空，
    // 整个窗口内水深与峰值都停留在种子值，洪水点导出为空
    let sim = short_sim();
    let elevation = vec![100.0; 16];
    let mut mesh = RasterMesh::new(4, 4, 10.0, 0.0, 0.0, -9999.0).unwrap();
    let tol = NumericalTolerance::default();
    apply_boundary_conditions(&mut mesh, &elevation, &tol).unwrap();

    let storm = StormConfig {
        dem_ascii: PathBuf::from("dem.asc"),
        storm_center_x: 15.0,
        storm_center_y: 15.0,
        storm_radius_m: 0.0,
        storm_severity: 5,
        storm_duration_hours: 0.05,
    };
    let (flux, stats) = build_rainfall_field(&mesh, &storm, sim.base_intensity_m_per_hr).unwrap();
    assert_eq!(stats.wet_nodes, 0);

    let mut fields = FieldStore::new(mesh.n_nodes());
    fields.set_elevation(elevation.clone()).unwrap();
    fields.set_rainfall_flux(flux).unwrap();
    fields.fill_water_depth(sim.initial_depth_m);
    fields.init_peak_from_depth();

    let mut solver = OverlandFlowSolver::new(&mesh, &elevation, &sim.physics, tol).unwrap();
    StormRecessionDriver::new(&storm, &sim)
        .run(&mut solver, &mut fields)
        .unwrap();

    for &peak in fields.peak_depth() {
        assert_eq!(peak, sim.initial_depth_m);
    }
    let points =
        cf_io::collect_flood_points(&mesh, fields.peak_depth(), sim.initial_depth_m).unwrap();
    assert!(points.is_empty());
}

#[test]
fn test_severity_doubles_accumulation() {
    let sim = short_sim();

    let (storm1, mut solver1, mut fields1) = flat_scene(0.05, 1, &sim);
    StormRecessionDriver::new(&storm1, &sim)
        .run(&mut solver1, &mut fields1)
        .unwrap();

    let (storm2, mut solver2, mut fields2) = flat_scene(0.05, 2, &sim);
    StormRecessionDriver::new(&storm2, &sim)
        .run(&mut solver2, &mut fields2)
        .unwrap();

    for (&h1, &h2) in fields1.water_depth().iter().zip(fields2.water_depth()) {
        let gain1 = h1 - sim.initial_depth_m;
        let gain2 = h2 - sim.initial_depth_m;
        assert!((gain2 - 2.0 * gain1).abs() < 1e-15);
    }
}

#[test]
fn test_peak_dominates_final_depth() {
    // 向右倾斜的地形，强降雨后退水：峰值场必须逐点不小于终态水深
    let sim = SimulationConfig {
        total_window_minutes: 30.0,
        ..SimulationConfig::default()
    };
    let mut elevation = vec![0.0; 20];
    for row in 0..4 {
        for col in 0..5 {
            elevation[row * 5 + col] = 10.0 - 2.0 * col as f64;
        }
    }
    let mut mesh = RasterMesh::new(5, 4, 10.0, 0.0, 0.0, -9999.0).unwrap();
    let tol = NumericalTolerance::default();
    apply_boundary_conditions(&mut mesh, &elevation, &tol).unwrap();

    let storm = StormConfig {
        dem_ascii: PathBuf::from("dem.asc"),
        storm_center_x: 20.0,
        storm_center_y: 15.0,
        storm_radius_m: 100.0,
        storm_severity: 50,
        storm_duration_hours: 0.2,
    };
    let (flux, _) = build_rainfall_field(&mesh, &storm, sim.base_intensity_m_per_hr).unwrap();

    let mut fields = FieldStore::new(mesh.n_nodes());
    fields.set_elevation(elevation.clone()).unwrap();
    fields.set_rainfall_flux(flux).unwrap();
    fields.fill_water_depth(sim.initial_depth_m);
    fields.init_peak_from_depth();

    let mut solver = OverlandFlowSolver::new(&mesh, &elevation, &sim.physics, tol).unwrap();
    let report = StormRecessionDriver::new(&storm, &sim)
        .run(&mut solver, &mut fields)
        .unwrap();

    assert!(report.max_peak_depth_m > sim.initial_depth_m);
    for (&h, &peak) in fields.water_depth().iter().zip(fields.peak_depth().iter()) {
        assert!(peak >= h);
        assert!(h >= 0.0);
    }
}

#[test]
fn test_iteration_cap_reports_non_convergence() {
    let sim = SimulationConfig {
        total_window_minutes: 10.0,
        max_iterations: 3,
        ..SimulationConfig::default()
    };
    let (storm, mut solver, mut fields) = flat_scene(0.05, 1, &sim);
    let mut driver = StormRecessionDriver::new(&storm, &sim);

    let err = driver.run(&mut solver, &mut fields).unwrap_err();
    match err {
        CfError::NonConvergence {
            iterations,
            window_s,
            ..
        } => {
            assert_eq!(iterations, 3);
            assert_eq!(window_s, 600.0);
        }
        other => panic!("意外错误: {other:?}"),
    }
}
