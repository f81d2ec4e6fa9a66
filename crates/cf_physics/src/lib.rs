// crates/cf_physics/src/lib.rs

//! CanyonFlood Physics Layer
//!
//! 降雨场构建、地表漫流求解与风暴-退水驱动循环。
//!
//! # 模块概览
//!
//! - [`rainfall`]: 圆盘降雨通量场构建与十进制往返规范化
//! - [`solver`]: 惯性波近似的栅格漫流求解器
//! - [`driver`]: 双时钟自适应步长主循环
//!
//! 本层不做任何文件读写，所有输入输出通过节点场数组传递。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod driver;
pub mod rainfall;
pub mod solver;

pub use driver::{DriverReport, StormPhase, StormRecessionDriver};
pub use rainfall::{build_rainfall_field, canonicalize, RainfallStats};
pub use solver::OverlandFlowSolver;
