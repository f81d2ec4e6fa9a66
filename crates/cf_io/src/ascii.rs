// crates/cf_io/src/ascii.rs

//! ESRI ASCII 栅格读写
//!
//! 解析与写出 ESRI ASCII Grid 格式（`.asc`）。头字段大小写不敏感，
//! `NODATA_value` 可缺省（默认 -9999）。
//!
//! 文件中数据行自上而下排列（第一行为最北的行），内存中的节点顺序
//! 则以左下角为原点自下而上编号。读入时做行翻转，写出时翻转回去，
//! 两者互为逆操作。
//!
//! 浮点值写出使用 Rust 的最短往返十进制格式，保证
//! 写出后重新读入得到逐位相同的 f64。

use std::fmt::Write as _;
use std::path::Path;

use cf_grid::RasterMesh;

use crate::error::{IoError, IoResult};

/// 无数据哨兵的缺省值
const DEFAULT_NODATA: f64 = -9999.0;

/// ESRI ASCII 栅格
///
/// `values` 按节点索引存储（行优先、自下而上），长度恒为 `ncols * nrows`。
#[derive(Debug, Clone)]
pub struct AsciiGrid {
    /// 列数
    pub ncols: usize,
    /// 行数
    pub nrows: usize,
    /// 左下角 x 坐标 [m]
    pub xllcorner: f64,
    /// 左下角 y 坐标 [m]
    pub yllcorner: f64,
    /// 单元边长 [m]
    pub cellsize: f64,
    /// 无数据哨兵值
    pub nodata: f64,
    /// 节点值（自下而上行优先）
    pub values: Vec<f64>,
}

impl AsciiGrid {
    /// 从网格与节点值构造栅格
    pub fn from_mesh(mesh: &RasterMesh, values: Vec<f64>) -> IoResult<Self> {
        cf_foundation::CfError::check_size("values", mesh.n_nodes(), values.len())
            .map_err(IoError::Foundation)?;
        Ok(Self {
            ncols: mesh.ncols(),
            nrows: mesh.nrows(),
            xllcorner: mesh.xllcorner(),
            yllcorner: mesh.yllcorner(),
            cellsize: mesh.cellsize(),
            nodata: mesh.nodata(),
            values,
        })
    }

    /// 由栅格头信息构造节点网格
    pub fn to_mesh(&self) -> IoResult<RasterMesh> {
        RasterMesh::new(
            self.ncols,
            self.nrows,
            self.cellsize,
            self.xllcorner,
            self.yllcorner,
            self.nodata,
        )
        .map_err(IoError::Foundation)
    }

    /// 从文件读入栅格
    pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let file_name = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| IoError::Io {
            path: file_name.clone(),
            source: e,
        })?;
        Self::parse(&content, &file_name)
    }

    /// 从字符串解析栅格
    ///
    /// `file_name` 仅用于错误消息。
    pub fn parse(content: &str, file_name: &str) -> IoResult<Self> {
        let mut ncols: Option<usize> = None;
        let mut nrows: Option<usize> = None;
        let mut xllcorner: Option<f64> = None;
        let mut yllcorner: Option<f64> = None;
        let mut cellsize: Option<f64> = None;
        let mut nodata = DEFAULT_NODATA;

        let mut rows_top_first: Vec<Vec<f64>> = Vec::new();

        for (line_index, line) in content.lines().enumerate() {
            let line_no = line_index + 1;
            let mut tokens = line.split_whitespace();
            let first = match tokens.next() {
                Some(token) => token,
                None => continue,
            };

            // 头行以字母开头，数据行以数字或符号开头
            if first.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
                let value = tokens.next().ok_or_else(|| IoError::ParseError {
                    file: file_name.to_string(),
                    line: line_no,
                    message: format!("头字段 {first} 缺少值"),
                })?;
                match first.to_ascii_lowercase().as_str() {
                    "ncols" => ncols = Some(parse_count(value, file_name, line_no)?),
                    "nrows" => nrows = Some(parse_count(value, file_name, line_no)?),
                    "xllcorner" => xllcorner = Some(parse_float(value, file_name, line_no)?),
                    "yllcorner" => yllcorner = Some(parse_float(value, file_name, line_no)?),
                    "cellsize" => cellsize = Some(parse_float(value, file_name, line_no)?),
                    "nodata_value" => nodata = parse_float(value, file_name, line_no)?,
                    other => {
                        return Err(IoError::ParseError {
                            file: file_name.to_string(),
                            line: line_no,
                            message: format!("未知头字段: {other}"),
                        });
                    }
                }
            } else {
                let mut row = Vec::new();
                row.push(parse_float(first, file_name, line_no)?);
                for token in tokens {
                    row.push(parse_float(token, file_name, line_no)?);
                }
                rows_top_first.push(row);
            }
        }

        let ncols = ncols.ok_or(IoError::MissingHeader {
            file: file_name.to_string(),
            key: "ncols",
        })?;
        let nrows = nrows.ok_or(IoError::MissingHeader {
            file: file_name.to_string(),
            key: "nrows",
        })?;
        let xllcorner = xllcorner.ok_or(IoError::MissingHeader {
            file: file_name.to_string(),
            key: "xllcorner",
        })?;
        let yllcorner = yllcorner.ok_or(IoError::MissingHeader {
            file: file_name.to_string(),
            key: "yllcorner",
        })?;
        let cellsize = cellsize.ok_or(IoError::MissingHeader {
            file: file_name.to_string(),
            key: "cellsize",
        })?;

        let total: usize = rows_top_first.iter().map(|r| r.len()).sum();
        if rows_top_first.len() != nrows || total != ncols * nrows {
            return Err(IoError::DataShapeMismatch {
                file: file_name.to_string(),
                expected: ncols * nrows,
                actual: total,
            });
        }

        // 行翻转：文件首行是最北行，节点顺序从南端开始
        let mut values = vec![0.0; ncols * nrows];
        for (file_row, row) in rows_top_first.iter().enumerate() {
            if row.len() != ncols {
                return Err(IoError::DataShapeMismatch {
                    file: file_name.to_string(),
                    expected: ncols * nrows,
                    actual: total,
                });
            }
            let mesh_row = nrows - 1 - file_row;
            values[mesh_row * ncols..(mesh_row + 1) * ncols].copy_from_slice(row);
        }

        Ok(Self {
            ncols,
            nrows,
            xllcorner,
            yllcorner,
            cellsize,
            nodata,
            values,
        })
    }

    /// 渲染为 ESRI ASCII 文本
    pub fn render(&self) -> String {
        let mut out = String::new();
        // 固定字段顺序，与常见 GIS 工具写出一致
        let _ = writeln!(out, "ncols {}", self.ncols);
        let _ = writeln!(out, "nrows {}", self.nrows);
        let _ = writeln!(out, "xllcorner {}", self.xllcorner);
        let _ = writeln!(out, "yllcorner {}", self.yllcorner);
        let _ = writeln!(out, "cellsize {}", self.cellsize);
        let _ = writeln!(out, "NODATA_value {}", self.nodata);
        for file_row in 0..self.nrows {
            let mesh_row = self.nrows - 1 - file_row;
            let row = &self.values[mesh_row * self.ncols..(mesh_row + 1) * self.ncols];
            for (col, value) in row.iter().enumerate() {
                if col > 0 {
                    out.push(' ');
                }
                let _ = write!(out, "{value}");
            }
            out.push('\n');
        }
        out
    }

    /// 写出到文件
    pub fn write<P: AsRef<Path>>(&self, path: P) -> IoResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.render()).map_err(|e| IoError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }
}

fn parse_count(token: &str, file: &str, line: usize) -> IoResult<usize> {
    token.parse::<usize>().map_err(|_| IoError::ParseError {
        file: file.to_string(),
        line,
        message: format!("无效整数: {token}"),
    })
}

fn parse_float(token: &str, file: &str, line: usize) -> IoResult<f64> {
    token.parse::<f64>().map_err(|_| IoError::ParseError {
        file: file.to_string(),
        line,
        message: format!("无效数值: {token}"),
    })
}

// ============================================================
// 测试
// ============================================================
