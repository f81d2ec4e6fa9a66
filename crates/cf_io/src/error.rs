// crates/cf_io/src/error.rs

//! IO 错误类型定义
//!
//! 提供 IO 模块的统一错误枚举，支持通过 thiserror 自动转换底层错误。
//! 所有错误最终可转换为 CfError 以实现跨层错误传递。

use cf_foundation::CfError;
use thiserror::Error;

/// IO 模块结果类型别名
pub type IoResult<T> = Result<T, IoError>;

/// IO 错误枚举
#[derive(Error, Debug)]
pub enum IoError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    FileNotFound {
        /// 缺失的路径
        path: String,
    },

    /// 文件读写失败
    #[error("文件读写失败 [{path}]: {source}")]
    Io {
        /// 涉及的路径
        path: String,
        /// 底层 IO 错误
        source: std::io::Error,
    },

    /// 栅格头信息缺失
    #[error("栅格头信息缺失: 文件 {file}, 缺少 {key}")]
    MissingHeader {
        /// 涉及的文件
        file: String,
        /// 缺失的头字段名
        key: &'static str,
    },

    /// 解析错误
    #[error("文件解析错误: {file}:{line} - {message}")]
    ParseError {
        /// 涉及的文件
        file: String,
        /// 出错行号（从 1 开始）
        line: usize,
        /// 错误说明
        message: String,
    },

    /// 数据体与头信息不一致
    #[error("栅格数据不一致: 文件 {file}, 期望 {expected} 个值, 实际 {actual} 个")]
    DataShapeMismatch {
        /// 涉及的文件
        file: String,
        /// 头信息声明的数值个数
        expected: usize,
        /// 实际解析出的数值个数
        actual: usize,
    },

    /// 基础层错误转换
    #[error("基础层错误: {0}")]
    Foundation(#[from] CfError),
}

impl From<IoError> for CfError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::FileNotFound { path } => CfError::file_not_found(path),
            IoError::Io { path, source } => {
                CfError::io_with_source(format!("文件读写失败: {path}"), source)
            }
            IoError::MissingHeader { file, key } => {
                CfError::parse(file, 0, format!("栅格头信息缺少 {key}"))
            }
            IoError::ParseError {
                file,
                line,
                message,
            } => CfError::parse(file, line, message),
            IoError::DataShapeMismatch {
                file,
                expected,
                actual,
            } => CfError::parse(
                file,
                0,
                format!("数据体与头信息不一致: 期望 {expected} 个值, 实际 {actual} 个"),
            ),
            IoError::Foundation(cf_err) => cf_err,
        }
    }
}
