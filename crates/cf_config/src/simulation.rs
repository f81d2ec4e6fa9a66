// crates/cf_config/src/simulation.rs

//! SimulationConfig - 模拟驱动配置（全 f64）
//!
//! 定义驱动循环与求解器的数值参数。所有字段均有默认值，
//! 缺省配置即可直接运行。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

/// 模拟驱动配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 单位强度等级对应的降雨强度 [m/h]
    #[serde(default = "default_base_intensity")]
    pub base_intensity_m_per_hr: f64,

    /// 模拟总时长窗口 [min]（风暴 + 退水）
    #[serde(default = "default_total_window")]
    pub total_window_minutes: f64,

    /// 单步时长上限 [s]
    #[serde(default = "default_max_step")]
    pub max_step_s: f64,

    /// 初始水深种子 [m]，避免全干初始态下的除零
    #[serde(default = "default_initial_depth")]
    pub initial_depth_m: f64,

    /// 主循环迭代次数上限
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// 物理参数
    #[serde(default)]
    pub physics: PhysicsConfig,
}

fn default_base_intensity() -> f64 {
    0.01
}
fn default_total_window() -> f64 {
    120.0
}
fn default_max_step() -> f64 {
    60.0
}
fn default_initial_depth() -> f64 {
    1e-12
}
fn default_max_iterations() -> usize {
    500_000
}

/// 物理参数配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// 重力加速度 [m/s²]
    #[serde(default = "default_gravity")]
    pub gravity: f64,

    /// 自适应步长的 CFL 系数
    #[serde(default = "default_cfl_alpha")]
    pub cfl_alpha: f64,

    /// Manning 糙率系数
    #[serde(default = "default_manning")]
    pub manning_n: f64,

    /// 干单元水深阈值 [m]
    #[serde(default = "default_h_dry")]
    pub h_dry: f64,
}

fn default_gravity() -> f64 {
    9.81
}
fn default_cfl_alpha() -> f64 {
    0.7
}
fn default_manning() -> f64 {
    0.03
}
fn default_h_dry() -> f64 {
    1e-3
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            cfl_alpha: default_cfl_alpha(),
            manning_n: default_manning(),
            h_dry: default_h_dry(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            base_intensity_m_per_hr: default_base_intensity(),
            total_window_minutes: default_total_window(),
            max_step_s: default_max_step(),
            initial_depth_m: default_initial_depth(),
            max_iterations: default_max_iterations(),
            physics: PhysicsConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// 从文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        let config: SimulationConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 模拟总时长窗口 [s]
    #[inline]
    pub fn total_window_seconds(&self) -> f64 {
        self.total_window_minutes * 60.0
    }

    /// 验证配置有效性
    pub fn validate(&self) -> ConfigResult<()> {
        if self.base_intensity_m_per_hr <= 0.0 || !self.base_intensity_m_per_hr.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "base_intensity_m_per_hr".to_string(),
                value: self.base_intensity_m_per_hr.to_string(),
                reason: "基准降雨强度必须为正有限值".to_string(),
            });
        }

        if self.total_window_minutes <= 0.0 || !self.total_window_minutes.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "total_window_minutes".to_string(),
                value: self.total_window_minutes.to_string(),
                reason: "模拟时长窗口必须为正有限值".to_string(),
            });
        }

        if self.max_step_s <= 0.0 || !self.max_step_s.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "max_step_s".to_string(),
                value: self.max_step_s.to_string(),
                reason: "单步时长上限必须为正有限值".to_string(),
            });
        }

        if self.initial_depth_m <= 0.0 || !self.initial_depth_m.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "initial_depth_m".to_string(),
                value: self.initial_depth_m.to_string(),
                reason: "初始水深种子必须为正有限值".to_string(),
            });
        }

        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_iterations".to_string(),
                value: "0".to_string(),
                reason: "迭代上限必须大于 0".to_string(),
            });
        }

        if self.physics.cfl_alpha <= 0.0 || self.physics.cfl_alpha > 1.0 {
            return Err(ConfigError::InvalidValue {
                key: "physics.cfl_alpha".to_string(),
                value: self.physics.cfl_alpha.to_string(),
                reason: "CFL 系数必须在 (0, 1] 范围内".to_string(),
            });
        }

        if self.physics.gravity <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "physics.gravity".to_string(),
                value: self.physics.gravity.to_string(),
                reason: "重力必须为正".to_string(),
            });
        }

        if self.physics.manning_n <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "physics.manning_n".to_string(),
                value: self.physics.manning_n.to_string(),
                reason: "Manning 糙率必须为正".to_string(),
            });
        }

        if self.physics.h_dry < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "physics.h_dry".to_string(),
                value: self.physics.h_dry.to_string(),
                reason: "h_dry 不能为负".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.total_window_seconds(), 7200.0);
        assert_eq!(config.max_step_s, 60.0);
        assert_eq!(config.base_intensity_m_per_hr, 0.01);
    }

    #[test]
    fn test_invalid_cfl() {
        let mut config = SimulationConfig::default();
        config.physics.cfl_alpha = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let mut config = SimulationConfig::default();
        config.max_iterations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serialize_deserialize() {
        let config = SimulationConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.max_step_s, config.max_step_s);
        assert_eq!(parsed.physics.manning_n, config.physics.manning_n);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed: SimulationConfig = serde_json::from_str(r#"{"max_step_s": 30.0}"#).unwrap();
        assert_eq!(parsed.max_step_s, 30.0);
        assert_eq!(parsed.total_window_minutes, 120.0);
        assert_eq!(parsed.physics.gravity, 9.81);
    }
}
