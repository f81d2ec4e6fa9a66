// crates/cf_grid/src/mesh.rs

//! 栅格节点网格
//!
//! 从 DEM 头信息构建的结构化节点网格。拓扑在模拟开始时创建一次，
//! 此后不再发生结构性修改；节点携带的物理场存放在 [`crate::fields::FieldStore`]。
//!
//! # 节点编号约定
//!
//! 节点按行主序编号，原点位于左下角：
//!
//! ```text
//! index = row * ncols + col      (row 0 为最下一行)
//! x = xllcorner + col * cellsize
//! y = yllcorner + row * cellsize
//! ```
//!
//! 该约定与 ESRI ASCII 栅格的行序相反（文件中最上一行在前），
//! 行序翻转由 IO 层负责。

use cf_foundation::error::{CfError, CfResult};
use glam::DVec2;
use serde::{Deserialize, Serialize};

// ============================================================
// 节点边界状态
// ============================================================

/// 节点边界状态
///
/// 每个节点属于以下三类之一。使用 `repr(u8)` 便于紧凑存储。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum NodeStatus {
    /// 内部计算节点
    #[default]
    Core = 0,

    /// 开边界（固定值出流）
    ///
    /// 位于指定下游边缘的节点，水深保持固定，越过该边缘的水量视为流出计算域。
    OpenEdge = 1,

    /// 封闭节点（不可穿透）
    ///
    /// 无数据节点或固壁节点，不参与任何通量交换。
    Closed = 2,
}

impl NodeStatus {
    /// 是否参与水深更新
    #[inline]
    pub fn is_core(&self) -> bool {
        matches!(self, Self::Core)
    }

    /// 是否为开边界
    #[inline]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::OpenEdge)
    }

    /// 是否封闭
    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl std::fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Core => "Core",
            Self::OpenEdge => "OpenEdge",
            Self::Closed => "Closed",
        };
        write!(f, "{}", name)
    }
}

// ============================================================
// 栅格网格
// ============================================================

/// 栅格节点网格
///
/// 由 DEM 头信息（列数、行数、单元尺寸、左下角坐标、无数据值）定义的
/// 规则网格。节点坐标与编号见模块文档。
#[derive(Debug, Clone)]
pub struct RasterMesh {
    ncols: usize,
    nrows: usize,
    cellsize: f64,
    xllcorner: f64,
    yllcorner: f64,
    nodata: f64,
    status: Vec<NodeStatus>,
}

impl RasterMesh {
    /// 创建网格
    ///
    /// # 错误
    ///
    /// 行数或列数小于 2、或单元尺寸非正时返回 `IncompatibleGrid`：
    /// 这样的网格没有内部节点，求解器无法使用。
    pub fn new(
        ncols: usize,
        nrows: usize,
        cellsize: f64,
        xllcorner: f64,
        yllcorner: f64,
        nodata: f64,
    ) -> CfResult<Self> {
        if ncols < 2 || nrows < 2 {
            return Err(CfError::incompatible_grid(format!(
                "网格退化: {}列 x {}行, 至少需要 2x2",
                ncols, nrows
            )));
        }
        if !cellsize.is_finite() || cellsize <= 0.0 {
            return Err(CfError::incompatible_grid(format!(
                "单元尺寸无效: {}",
                cellsize
            )));
        }
        Ok(Self {
            ncols,
            nrows,
            cellsize,
            xllcorner,
            yllcorner,
            nodata,
            status: vec![NodeStatus::Core; ncols * nrows],
        })
    }

    /// 列数
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// 行数
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// 单元尺寸 [m]
    #[inline]
    pub fn cellsize(&self) -> f64 {
        self.cellsize
    }

    /// 左下角 x 坐标
    #[inline]
    pub fn xllcorner(&self) -> f64 {
        self.xllcorner
    }

    /// 左下角 y 坐标
    #[inline]
    pub fn yllcorner(&self) -> f64 {
        self.yllcorner
    }

    /// 无数据哨兵值
    #[inline]
    pub fn nodata(&self) -> f64 {
        self.nodata
    }

    /// 节点总数
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.ncols * self.nrows
    }

    /// 由行列号计算节点索引
    #[inline]
    pub fn node_index(&self, row: usize, col: usize) -> usize {
        row * self.ncols + col
    }

    /// 由节点索引计算行列号
    #[inline]
    pub fn node_row_col(&self, index: usize) -> (usize, usize) {
        (index / self.ncols, index % self.ncols)
    }

    /// 节点 x 坐标
    #[inline]
    pub fn node_x(&self, index: usize) -> f64 {
        let (_, col) = self.node_row_col(index);
        self.xllcorner + col as f64 * self.cellsize
    }

    /// 节点 y 坐标
    #[inline]
    pub fn node_y(&self, index: usize) -> f64 {
        let (row, _) = self.node_row_col(index);
        self.yllcorner + row as f64 * self.cellsize
    }

    /// 节点坐标
    #[inline]
    pub fn node_xy(&self, index: usize) -> DVec2 {
        DVec2::new(self.node_x(index), self.node_y(index))
    }

    /// 节点状态
    #[inline]
    pub fn status(&self, index: usize) -> NodeStatus {
        self.status[index]
    }

    /// 设置节点状态
    #[inline]
    pub fn set_status(&mut self, index: usize, status: NodeStatus) {
        self.status[index] = status;
    }

    /// 全部节点状态切片
    #[inline]
    pub fn status_slice(&self) -> &[NodeStatus] {
        &self.status
    }

    /// 节点是否位于网格周界
    #[inline]
    pub fn is_perimeter(&self, index: usize) -> bool {
        let (row, col) = self.node_row_col(index);
        row == 0 || row == self.nrows - 1 || col == 0 || col == self.ncols - 1
    }

    /// 节点是否位于右边缘（指定的下游边缘）
    #[inline]
    pub fn is_right_edge(&self, index: usize) -> bool {
        let (_, col) = self.node_row_col(index);
        col == self.ncols - 1
    }

    /// 右边缘节点索引迭代器
    pub fn right_edge_nodes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.nrows).map(move |row| self.node_index(row, self.ncols - 1))
    }

    /// 统计各状态节点数量 (core, open, closed)
    pub fn status_counts(&self) -> (usize, usize, usize) {
        let mut core = 0;
        let mut open = 0;
        let mut closed = 0;
        for s in &self.status {
            match s {
                NodeStatus::Core => core += 1,
                NodeStatus::OpenEdge => open += 1,
                NodeStatus::Closed => closed += 1,
            }
        }
        (core, open, closed)
    }
}

// ============================================================
// 测试
// ============================================================
