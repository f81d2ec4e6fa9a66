// crates/cf_config/src/error.rs

//! 配置错误类型定义
//!
//! 提供配置层的细化错误枚举，最终可转换为 CfError 以实现跨层错误传递。

use cf_foundation::CfError;
use thiserror::Error;

/// 配置层结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 配置错误枚举
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件不存在
    #[error("配置文件不存在: {path}")]
    NotFound {
        /// 缺失的路径
        path: String,
    },

    /// 配置文件读取失败
    #[error("配置文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    /// 配置文件解析失败
    #[error("配置文件解析失败: {0}")]
    Parse(String),

    /// 配置值无效
    #[error("配置值无效: {key}={value}, 原因: {reason}")]
    InvalidValue {
        /// 配置键名
        key: String,
        /// 配置值
        value: String,
        /// 无效原因说明
        reason: String,
    },

    /// 无效的风暴参数
    #[error("无效的风暴参数: {parameter}={value}, 原因: {reason}")]
    InvalidStormParameter {
        /// 参数名
        parameter: &'static str,
        /// 实际值
        value: f64,
        /// 无效原因说明
        reason: String,
    },
}

impl From<ConfigError> for CfError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { path } => CfError::file_not_found(path),
            ConfigError::Io(e) => CfError::io_with_source("配置文件读取失败", e),
            ConfigError::Parse(msg) => CfError::config(format!("配置文件解析失败: {msg}")),
            ConfigError::InvalidValue { key, value, reason } => {
                CfError::config(format!("配置值无效 [{key}={value}]: {reason}"))
            }
            ConfigError::InvalidStormParameter {
                parameter,
                value,
                reason,
            } => CfError::invalid_storm_parameter(parameter, value, reason),
        }
    }
}
