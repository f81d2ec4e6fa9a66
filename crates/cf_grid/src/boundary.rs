// crates/cf_grid/src/boundary.rs

//! 边界条件设置
//!
//! 根据网格几何与高程场为每个节点赋边界状态：
//!
//! 1. 周界节点全部标记为开边界（固定值出流），下游右边缘包含在内；
//! 2. 高程接近无数据哨兵值的节点标记为封闭，覆盖此前任何状态。
//!
//! 顺序不可交换：无数据屏蔽在周界标记之后应用，周界上的无数据节点
//! 最终为封闭状态。哨兵值比较使用绝对容差而非精确相等，
//! 以容忍高程经过文件往返后的浮点扰动。

use cf_foundation::error::{CfError, CfResult};
use cf_foundation::tolerance::NumericalTolerance;

use crate::mesh::{NodeStatus, RasterMesh};

/// 边界设置统计
#[derive(Debug, Clone, Copy)]
pub struct BoundaryStats {
    /// 内部计算节点数
    pub core: usize,
    /// 开边界节点数
    pub open: usize,
    /// 封闭节点数（无数据）
    pub closed: usize,
    /// 其中因无数据被封闭的节点数
    pub nodata: usize,
}

/// 为网格赋边界状态
///
/// # 参数
///
/// - `mesh`: 目标网格，状态数组被原地改写
/// - `elevation`: 高程场，长度必须等于节点数
/// - `tol`: 数值容差（无数据哨兵判断）
///
/// # 错误
///
/// 高程场长度与节点数不一致时返回维度不匹配错误。
pub fn apply_boundary_conditions(
    mesh: &mut RasterMesh,
    elevation: &[f64],
    tol: &NumericalTolerance,
) -> CfResult<BoundaryStats> {
    CfError::check_size("elevation", mesh.n_nodes(), elevation.len())?;

    // 1. 周界开边界，内部计算节点
    for index in 0..mesh.n_nodes() {
        if mesh.is_perimeter(index) {
            mesh.set_status(index, NodeStatus::OpenEdge);
        } else {
            mesh.set_status(index, NodeStatus::Core);
        }
    }

    // 2. 无数据封闭，覆盖一切
    let mut nodata = 0;
    for (index, &z) in elevation.iter().enumerate() {
        if tol.is_nodata(z) {
            mesh.set_status(index, NodeStatus::Closed);
            nodata += 1;
        }
    }

    let (core, open, closed) = mesh.status_counts();
    Ok(BoundaryStats {
        core,
        open,
        closed,
        nodata,
    })
}

// ============================================================
// 测试
// ============================================================
