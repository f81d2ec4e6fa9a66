// crates/cf_foundation/src/error.rs

//! 错误处理模块，定义统一错误类型
//!
//! 提供 `CfError` 枚举和 `CfResult` 类型别名，用于整个项目的错误处理。
//!
//! # 设计原则
//!
//! 1. **层次化**: 基础层只定义核心错误，IO/配置相关错误在各自层中扩展后转换到本类型
//! 2. **易用性**: 提供便捷的构造方法
//! 3. **单次运行**: 本工具为单次批处理计算，任何错误都直接中止运行并报告原因，不做重试
//!
//! # 示例
//!
//! ```
//! use cf_foundation::error::{CfError, CfResult};
//!
//! fn read_dem() -> CfResult<()> {
//!     Err(CfError::file_not_found("/data/dem.asc"))
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// 统一结果类型
pub type CfResult<T> = Result<T, CfError>;

/// CanyonFlood 错误类型
///
/// 核心错误类型，用于整个项目。IO 与配置层在各自模块中定义细化错误并转换到本类型。
#[derive(Error, Debug)]
pub enum CfError {
    // ========================================================================
    // IO 相关错误
    // ========================================================================

    /// IO 错误
    #[error("IO错误: {message}")]
    Io {
        /// 描述性错误信息
        message: String,
        #[source]
        /// 可选的底层 IO 错误
        source: Option<std::io::Error>,
    },

    /// 输入文件不存在（DEM 或配置文件缺失，在构建任何模拟状态之前中止）
    #[error("输入文件不存在: {}", .path.display())]
    FileNotFound {
        /// 未找到的路径
        path: PathBuf,
    },

    /// 文件解析错误
    #[error("文件解析错误: {} 第{line}行: {message}", .file.display())]
    ParseError {
        /// 文件路径
        file: PathBuf,
        /// 行号
        line: usize,
        /// 错误信息
        message: String,
    },

    // ========================================================================
    // 模拟输入错误
    // ========================================================================

    /// 无效的风暴参数（负的严重度/历时等，在主循环开始前拒绝）
    #[error("无效的风暴参数: {parameter}={value}, 原因: {reason}")]
    InvalidStormParameter {
        /// 参数名
        parameter: &'static str,
        /// 实际值
        value: f64,
        /// 无效原因说明
        reason: String,
    },

    /// 网格不可用（分辨率/范围对求解器而言退化，例如单列网格）
    #[error("网格不可用: {message}")]
    IncompatibleGrid {
        /// 具体错误信息
        message: String,
    },

    /// 数组大小不匹配
    #[error("数组大小不匹配: {name} 期望{expected}, 实际{actual}")]
    SizeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望大小
        expected: usize,
        /// 实际大小
        actual: usize,
    },

    /// 配置错误
    #[error("配置错误: {message}")]
    Config {
        /// 具体错误信息
        message: String,
    },

    // ========================================================================
    // 运行期错误
    // ========================================================================

    /// 主循环未在限定迭代次数内到达模拟窗口终点
    #[error("模拟未收敛: 迭代{iterations}次后模拟时间 {simulated_s:.3}s / 窗口 {window_s:.3}s")]
    NonConvergence {
        /// 已执行的迭代次数
        iterations: usize,
        /// 已推进的模拟时间 [s]
        simulated_s: f64,
        /// 目标模拟窗口 [s]
        window_s: f64,
    },

    /// 内部错误
    #[error("内部错误: {message}")]
    Internal {
        /// 内部错误描述
        message: String,
    },
}

// ========================================================================
// 便捷构造方法
// ========================================================================

impl CfError {
    /// 从IO错误创建
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// 从IO错误创建（带源）
    pub fn io_with_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// 输入文件不存在
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// 解析错误
    pub fn parse(file: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// 无效的风暴参数
    pub fn invalid_storm_parameter(
        parameter: &'static str,
        value: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidStormParameter {
            parameter,
            value,
            reason: reason.into(),
        }
    }

    /// 网格不可用
    pub fn incompatible_grid(message: impl Into<String>) -> Self {
        Self::IncompatibleGrid {
            message: message.into(),
        }
    }

    /// 数组大小不匹配
    pub fn size_mismatch(name: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            name,
            expected,
            actual,
        }
    }

    /// 配置错误
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// 未收敛
    pub fn non_convergence(iterations: usize, simulated_s: f64, window_s: f64) -> Self {
        Self::NonConvergence {
            iterations,
            simulated_s,
            window_s,
        }
    }

    /// 内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// ========================================================================
// 验证辅助方法
// ========================================================================

impl CfError {
    /// 检查数组大小是否匹配
    #[inline]
    pub fn check_size(name: &'static str, expected: usize, actual: usize) -> CfResult<()> {
        if expected != actual {
            Err(Self::size_mismatch(name, expected, actual))
        } else {
            Ok(())
        }
    }
}

// ========================================================================
// 标准库错误转换
// ========================================================================

impl From<std::io::Error> for CfError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

// ========================================================================
// 测试
// ========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CfError::config("测试配置错误");
        assert!(err.to_string().contains("配置错误"));
    }

    #[test]
    fn test_file_not_found() {
        let err = CfError::file_not_found("/path/to/dem.asc");
        assert!(err.to_string().contains("/path/to/dem.asc"));
    }

    #[test]
    fn test_invalid_storm_parameter() {
        let err = CfError::invalid_storm_parameter("storm_severity", -3.0, "必须 >= 1");
        let text = err.to_string();
        assert!(text.contains("storm_severity"));
        assert!(text.contains("-3"));
    }

    #[test]
    fn test_non_convergence() {
        let err = CfError::non_convergence(500_000, 3600.0, 7200.0);
        let text = err.to_string();
        assert!(text.contains("500000"));
        assert!(text.contains("7200"));
    }

    #[test]
    fn test_check_size() {
        assert!(CfError::check_size("depth", 10, 10).is_ok());
        assert!(CfError::check_size("depth", 10, 5).is_err());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let cf_err: CfError = io_err.into();
        assert!(matches!(cf_err, CfError::Io { .. }));
    }
}
