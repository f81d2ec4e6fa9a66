// crates/cf_grid/src/lib.rs

//! CanyonFlood Grid Layer
//!
//! 栅格节点网格与节点物理场存储。
//!
//! # 模块概览
//!
//! - [`mesh`]: 由 DEM 头信息构建的结构化节点网格与边界状态
//! - [`fields`]: 固定模式的节点标量场存储（高程/降雨通量/水深/峰值水深）
//! - [`boundary`]: 边界条件设置（下游开边界 + 无数据封闭）
//!
//! 网格拓扑在模拟开始时创建一次，运行期间不可变；
//! 物理场由驱动器与求解器通过具名访问器读写。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod fields;
pub mod mesh;

pub use boundary::{apply_boundary_conditions, BoundaryStats};
pub use fields::FieldStore;
pub use mesh::{NodeStatus, RasterMesh};
