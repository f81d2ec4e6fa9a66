// crates/cf_io/src/points.rs

//! 积水点 CSV 导出
//!
//! 将峰值水深严格大于零的节点导出为 `x,y,peak_depth` 三列 CSV，
//! 行顺序与节点索引一致。初始水深种子以下的节点不计为积水。

use std::fmt::Write as _;
use std::path::Path;

use cf_foundation::CfError;
use cf_grid::RasterMesh;

use crate::error::{IoError, IoResult};

/// 单个积水点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloodPoint {
    /// 节点 x 坐标 [m]
    pub x: f64,
    /// 节点 y 坐标 [m]
    pub y: f64,
    /// 峰值水深 [m]
    pub peak_depth: f64,
}

/// 收集峰值水深严格大于阈值的节点
///
/// 阈值通常取初始水深种子，保证仅被种子浸润的节点不被导出。
/// 返回顺序按节点索引递增。
pub fn collect_flood_points(
    mesh: &RasterMesh,
    peak_depth: &[f64],
    threshold: f64,
) -> IoResult<Vec<FloodPoint>> {
    CfError::check_size("peak_depth", mesh.n_nodes(), peak_depth.len())
        .map_err(IoError::Foundation)?;

    let mut points = Vec::new();
    for (index, &depth) in peak_depth.iter().enumerate() {
        if depth > threshold {
            let xy = mesh.node_xy(index);
            points.push(FloodPoint {
                x: xy.x,
                y: xy.y,
                peak_depth: depth,
            });
        }
    }
    Ok(points)
}

/// 渲染积水点为 CSV 文本
pub fn render_flood_points(points: &[FloodPoint]) -> String {
    let mut out = String::from("x,y,peak_depth\n");
    for p in points {
        let _ = writeln!(out, "{},{},{}", p.x, p.y, p.peak_depth);
    }
    out
}

/// 写出积水点 CSV 文件
pub fn write_flood_points<P: AsRef<Path>>(path: P, points: &[FloodPoint]) -> IoResult<()> {
    let path = path.as_ref();
    std::fs::write(path, render_flood_points(points)).map_err(|e| IoError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

// ============================================================
// 测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh_3x3() -> RasterMesh {
        RasterMesh::new(3, 3, 10.0, 100.0, 200.0, -9999.0).unwrap()
    }

    #[test]
    fn test_collect_strictly_above_threshold() {
        let mesh = mesh_3x3();
        let mut peak = vec![0.0; 9];
        peak[0] = 1e-12; // 种子值，不导出
        peak[4] = 0.5;
        peak[8] = 0.02;

        let points = collect_flood_points(&mesh, &peak, 1e-12).unwrap();
        assert_eq!(points.len(), 2);
        // 节点索引顺序
        assert_eq!(points[0].peak_depth, 0.5);
        assert_eq!(points[0].x, 110.0);
        assert_eq!(points[0].y, 210.0);
        assert_eq!(points[1].peak_depth, 0.02);
    }

    #[test]
    fn test_empty_when_dry() {
        let mesh = mesh_3x3();
        let peak = vec![1e-12; 9];
        let points = collect_flood_points(&mesh, &peak, 1e-12).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let mesh = mesh_3x3();
        let peak = vec![0.0; 4];
        assert!(collect_flood_points(&mesh, &peak, 0.0).is_err());
    }

    #[test]
    fn test_render_header_and_rows() {
        let points = vec![FloodPoint {
            x: 110.0,
            y: 210.0,
            peak_depth: 0.25,
        }];
        let csv = render_flood_points(&points);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("x,y,peak_depth"));
        assert_eq!(lines.next(), Some("110,210,0.25"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.csv");
        let points = vec![
            FloodPoint {
                x: 0.0,
                y: 0.0,
                peak_depth: 0.1,
            },
            FloodPoint {
                x: 10.0,
                y: 0.0,
                peak_depth: 0.3,
            },
        ];
        write_flood_points(&path, &points).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}
