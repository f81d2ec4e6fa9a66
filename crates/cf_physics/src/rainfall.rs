// crates/cf_physics/src/rainfall.rs

//! 降雨盘面场构建
//!
//! 以风暴中心为圆心、影响半径为半径构建圆盘状均匀降雨通量场：
//! 与中心距离平方不超过半径平方（含边界）的节点取
//! `base_intensity × severity` [m/h]，其余节点为 0。
//! 距离比较使用平方量，避免开方引入的浮点误差。
//!
//! 场值经过十进制往返规范化：数值先按最短往返格式渲染再解析回 f64，
//! 与写出 `.asc` 文件后重新读入得到的值逐位相同。

use cf_config::StormConfig;
use cf_foundation::error::CfResult;
use cf_grid::RasterMesh;
use glam::DVec2;
use tracing::debug;

/// 降雨场构建统计
#[derive(Debug, Clone, Copy)]
pub struct RainfallStats {
    /// 盘面内节点数
    pub wet_nodes: usize,
    /// 盘面内降雨通量 [m/h]
    pub intensity_m_per_hr: f64,
}

/// 构建圆盘降雨通量场
///
/// 返回按节点索引排列的通量数组 [m/h] 及构建统计。
/// 半径为 0 时盘面退化为中心点，仅坐标恰好等于中心的节点（若存在）受雨。
pub fn build_rainfall_field(
    mesh: &RasterMesh,
    storm: &StormConfig,
    base_intensity_m_per_hr: f64,
) -> CfResult<(Vec<f64>, RainfallStats)> {
    let center = DVec2::new(storm.storm_center_x, storm.storm_center_y);
    let radius_sq = storm.storm_radius_m * storm.storm_radius_m;
    let intensity = base_intensity_m_per_hr * f64::from(storm.storm_severity);

    let mut flux = vec![0.0; mesh.n_nodes()];
    let mut wet_nodes = 0;
    for (index, value) in flux.iter_mut().enumerate() {
        let offset = mesh.node_xy(index) - center;
        if offset.length_squared() <= radius_sq {
            *value = intensity;
            wet_nodes += 1;
        }
    }

    canonicalize(&mut flux);

    debug!(
        wet_nodes,
        intensity_m_per_hr = intensity,
        radius_m = storm.storm_radius_m,
        "降雨盘面场构建完成"
    );

    Ok((
        flux,
        RainfallStats {
            wet_nodes,
            intensity_m_per_hr: intensity,
        },
    ))
}

/// 十进制往返规范化
///
/// 将每个值替换为其最短往返十进制表示解析回的 f64。
/// Rust 的默认浮点格式保证解析回原值，本操作实际为恒等，
/// 显式执行以保证内存值与文件往返值的逐位一致性不依赖该前提。
pub fn canonicalize(values: &mut [f64]) {
    for value in values.iter_mut() {
        let rendered = format!("{value}");
        if let Ok(parsed) = rendered.parse::<f64>() {
            *value = parsed;
        }
    }
}

// ============================================================
// 测试
// ============================================================
