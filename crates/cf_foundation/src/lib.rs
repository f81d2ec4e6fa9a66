// crates/cf_foundation/src/lib.rs

//! CanyonFlood Foundation Layer
//!
//! 基础层，提供整个项目的基础抽象。
//!
//! # 模块概览
//!
//! - [`error`]: 统一错误类型
//! - [`tolerance`]: 数值容差配置与无数据哨兵约定
//!
//! # 设计原则
//!
//! 1. **最小依赖**: 仅依赖 thiserror
//! 2. **无全局状态**: 容差通过参数注入传递
//! 3. **单次批处理**: 错误即中止，不提供重试机制

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod tolerance;

// 重导出常用类型
pub use error::{CfError, CfResult};
pub use tolerance::{NumericalTolerance, NODATA_SENTINEL};

/// Prelude 模块，包含常用类型
pub mod prelude {
    pub use crate::error::{CfError, CfResult};
    pub use crate::tolerance::{NumericalTolerance, NODATA_SENTINEL};
}
