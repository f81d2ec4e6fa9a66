// crates/cf_io/src/lib.rs

//! CanyonFlood IO Layer
//!
//! 栅格与点数据的文件读写。
//!
//! # 模块概览
//!
//! - [`ascii`]: ESRI ASCII 栅格（`.asc`）读写，含行翻转与往返一致性保证
//! - [`points`]: 积水点 CSV 导出
//! - [`error`]: IO 错误类型
//!
//! 本层只做格式编解码，不包含任何模拟语义。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ascii;
pub mod error;
pub mod points;

pub use ascii::AsciiGrid;
pub use error::{IoError, IoResult};
pub use points::{collect_flood_points, render_flood_points, write_flood_points, FloodPoint};
