// crates/cf_config/src/lib.rs

//! CanyonFlood Configuration Layer
//!
//! 风暴事件与模拟驱动配置的定义、加载与验证。
//!
//! # 模块概览
//!
//! - [`storm`]: 风暴事件配置（`storm_config.json`）
//! - [`simulation`]: 模拟驱动数值参数配置
//! - [`error`]: 配置错误类型
//!
//! 所有配置均为 JSON 格式，字段缺省时使用内置默认值，
//! 加载后立即验证，非法配置不会进入运行阶段。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod simulation;
pub mod storm;

pub use error::{ConfigError, ConfigResult};
pub use simulation::{PhysicsConfig, SimulationConfig};
pub use storm::{StormConfig, STORM_CONFIG_FILENAME};
