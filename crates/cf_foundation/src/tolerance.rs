// crates/cf_foundation/src/tolerance.rs

//! 数值容差配置
//!
//! 集中定义模拟中使用的数值阈值，通过参数注入传递，不使用全局状态。
//!
//! # 关键阈值
//!
//! - `nodata_abs`: DEM 无数据哨兵值的绝对容差。高程经过 ASCII 文件往返后
//!   可能不再精确等于 -9999.0，因此用绝对容差而非精确相等来判断。
//! - `h_dry`: 干单元水深阈值，低于此值的单元不参与通量计算。
//! - `h_seed`: 初始水深种子，非零以避免求解器在全干单元上除零。

/// DEM 约定的无数据哨兵值
pub const NODATA_SENTINEL: f64 = -9999.0;

/// 数值容差配置
///
/// 包含所有数值计算中使用的容差阈值，仅使用 f64。
#[derive(Debug, Clone, Copy)]
pub struct NumericalTolerance {
    /// 无数据哨兵值绝对容差
    pub nodata_abs: f64,
    /// 干单元水深阈值 [m]
    pub h_dry: f64,
    /// 初始水深种子 [m]
    pub h_seed: f64,
    /// 安全除法阈值
    pub safe_div: f64,
}

impl Default for NumericalTolerance {
    fn default() -> Self {
        Self {
            nodata_abs: 1e-6,
            h_dry: 1e-3,
            h_seed: 1e-12,
            safe_div: 1e-14,
        }
    }
}

impl NumericalTolerance {
    /// 判断高程值是否为无数据哨兵
    ///
    /// NaN 同样视为无数据。
    #[inline]
    pub fn is_nodata(&self, z: f64) -> bool {
        z.is_nan() || (z - NODATA_SENTINEL).abs() <= self.nodata_abs
    }

    /// 判断水深是否为干
    #[inline]
    pub fn is_dry(&self, h: f64) -> bool {
        h < self.h_dry
    }

    /// 判断水深是否为湿
    #[inline]
    pub fn is_wet(&self, h: f64) -> bool {
        h >= self.h_dry
    }

    /// 安全除法判断分母是否过小
    #[inline]
    pub fn is_divisor_safe(&self, d: f64) -> bool {
        d.abs() >= self.safe_div
    }
}
