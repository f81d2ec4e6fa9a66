// crates/cf_grid/src/fields.rs

//! 节点物理场存储
//!
//! 为网格节点提供固定模式的标量场存储。与按名称动态注册的属性系统不同，
//! 本模块在构造时一次性创建全部四个场，之后只通过具名访问器读写：
//!
//! - 高程 (elevation)
//! - 降雨通量 (rainfall_flux) [m/h]
//! - 地表水深 (water_depth) [m]
//! - 峰值水深 (peak_depth) [m]
//!
//! 峰值水深与当前水深使用相互独立的底层数组，峰值更新是显式的
//! 逐元素取最大操作，在整个运行期间单调不减。

use cf_foundation::error::{CfError, CfResult};

/// 节点标量场存储
///
/// 所有场均为稠密 `Vec<f64>`，按节点索引寻址，长度恒等于节点总数。
#[derive(Debug, Clone)]
pub struct FieldStore {
    n_nodes: usize,
    elevation: Vec<f64>,
    rainfall_flux: Vec<f64>,
    water_depth: Vec<f64>,
    peak_depth: Vec<f64>,
}

impl FieldStore {
    /// 创建场存储，全部场初始化为 0
    pub fn new(n_nodes: usize) -> Self {
        Self {
            n_nodes,
            elevation: vec![0.0; n_nodes],
            rainfall_flux: vec![0.0; n_nodes],
            water_depth: vec![0.0; n_nodes],
            peak_depth: vec![0.0; n_nodes],
        }
    }

    /// 节点数量
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    // ========================================================================
    // 高程
    // ========================================================================

    /// 高程场（只读）
    #[inline]
    pub fn elevation(&self) -> &[f64] {
        &self.elevation
    }

    /// 设置高程场
    ///
    /// # 错误
    ///
    /// 长度与节点数不一致时返回维度不匹配错误。
    pub fn set_elevation(&mut self, values: Vec<f64>) -> CfResult<()> {
        CfError::check_size("elevation", self.n_nodes, values.len())?;
        self.elevation = values;
        Ok(())
    }

    // ========================================================================
    // 降雨通量
    // ========================================================================

    /// 降雨通量场（只读）[m/h]
    #[inline]
    pub fn rainfall_flux(&self) -> &[f64] {
        &self.rainfall_flux
    }

    /// 设置降雨通量场
    pub fn set_rainfall_flux(&mut self, values: Vec<f64>) -> CfResult<()> {
        CfError::check_size("rainfall_flux", self.n_nodes, values.len())?;
        self.rainfall_flux = values;
        Ok(())
    }

    /// 降雨通量场填充常数
    pub fn fill_rainfall_flux(&mut self, value: f64) {
        self.rainfall_flux.fill(value);
    }

    // ========================================================================
    // 地表水深
    // ========================================================================

    /// 地表水深场（只读）[m]
    #[inline]
    pub fn water_depth(&self) -> &[f64] {
        &self.water_depth
    }

    /// 地表水深场（可变）
    #[inline]
    pub fn water_depth_mut(&mut self) -> &mut [f64] {
        &mut self.water_depth
    }

    /// 水深场填充常数
    pub fn fill_water_depth(&mut self, value: f64) {
        self.water_depth.fill(value);
    }

    /// 降雨注入：水深增加 flux × dt / 3600
    ///
    /// 降雨通量单位为 m/h，步长单位为 s。
    pub fn add_rainfall(&mut self, dt_s: f64) {
        let scale = dt_s / 3600.0;
        for (h, &flux) in self.water_depth.iter_mut().zip(self.rainfall_flux.iter()) {
            *h += flux * scale;
        }
    }

    // ========================================================================
    // 峰值水深
    // ========================================================================

    /// 峰值水深场（只读）[m]
    #[inline]
    pub fn peak_depth(&self) -> &[f64] {
        &self.peak_depth
    }

    /// 用当前水深初始化峰值场
    ///
    /// 在主循环开始前调用一次。
    pub fn init_peak_from_depth(&mut self) {
        self.peak_depth.copy_from_slice(&self.water_depth);
    }

    /// 峰值更新：逐元素取 max(peak, depth)
    ///
    /// 峰值与当前水深为独立数组，本操作后峰值场每个分量都不小于更新前的值。
    pub fn update_peak(&mut self) {
        for (peak, &h) in self.peak_depth.iter_mut().zip(self.water_depth.iter()) {
            if h > *peak {
                *peak = h;
            }
        }
    }
}

// ============================================================
// 测试
// ============================================================
