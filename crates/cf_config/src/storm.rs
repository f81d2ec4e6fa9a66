// crates/cf_config/src/storm.rs

//! StormConfig - 风暴事件配置
//!
//! 描述单场风暴事件：DEM 文件、风暴中心、影响半径、强度等级与持续时间。
//! 从运行目录下的 `storm_config.json` 加载。

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// 运行目录下的风暴配置文件名
pub const STORM_CONFIG_FILENAME: &str = "storm_config.json";

/// 风暴事件配置
///
/// 所有长度单位与 DEM 投影坐标一致（米），持续时间单位为小时。
/// 强度等级为整数倍率，实际降雨强度由
/// `SimulationConfig::base_intensity_m_per_hr` 乘以等级得到。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StormConfig {
    /// DEM 文件路径（ESRI ASCII 格式），相对运行目录解析
    #[serde(default = "default_dem_ascii")]
    pub dem_ascii: PathBuf,

    /// 风暴中心 x 坐标 [m]
    pub storm_center_x: f64,

    /// 风暴中心 y 坐标 [m]
    pub storm_center_y: f64,

    /// 风暴影响半径 [m]，半径为 0 时仅覆盖中心点本身
    pub storm_radius_m: f64,

    /// 风暴强度等级（整数，>= 1）
    pub storm_severity: u32,

    /// 风暴持续时间 [h]
    pub storm_duration_hours: f64,
}

fn default_dem_ascii() -> PathBuf {
    PathBuf::from("dem.asc")
}

impl StormConfig {
    /// 从指定文件加载配置
    ///
    /// 加载后立即验证，非法配置不会返回。
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: StormConfig =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// 从运行目录加载配置（`<folder>/storm_config.json`）
    pub fn from_folder<P: AsRef<Path>>(folder: P) -> ConfigResult<Self> {
        Self::from_file(folder.as_ref().join(STORM_CONFIG_FILENAME))
    }

    /// 相对运行目录解析 DEM 路径
    pub fn dem_path<P: AsRef<Path>>(&self, folder: P) -> PathBuf {
        if self.dem_ascii.is_absolute() {
            self.dem_ascii.clone()
        } else {
            folder.as_ref().join(&self.dem_ascii)
        }
    }

    /// 风暴持续时间 [s]
    #[inline]
    pub fn duration_seconds(&self) -> f64 {
        self.storm_duration_hours * 3600.0
    }

    /// 验证配置有效性
    pub fn validate(&self) -> ConfigResult<()> {
        if self.storm_severity < 1 {
            return Err(ConfigError::InvalidStormParameter {
                parameter: "storm_severity",
                value: self.storm_severity as f64,
                reason: "强度等级必须 >= 1".to_string(),
            });
        }

        if !self.storm_duration_hours.is_finite() || self.storm_duration_hours < 0.0 {
            return Err(ConfigError::InvalidStormParameter {
                parameter: "storm_duration_hours",
                value: self.storm_duration_hours,
                reason: "持续时间必须为非负有限值".to_string(),
            });
        }

        if !self.storm_radius_m.is_finite() || self.storm_radius_m < 0.0 {
            return Err(ConfigError::InvalidStormParameter {
                parameter: "storm_radius_m",
                value: self.storm_radius_m,
                reason: "影响半径必须为非负有限值".to_string(),
            });
        }

        if !self.storm_center_x.is_finite() {
            return Err(ConfigError::InvalidStormParameter {
                parameter: "storm_center_x",
                value: self.storm_center_x,
                reason: "中心坐标必须为有限值".to_string(),
            });
        }

        if !self.storm_center_y.is_finite() {
            return Err(ConfigError::InvalidStormParameter {
                parameter: "storm_center_y",
                value: self.storm_center_y,
                reason: "中心坐标必须为有限值".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> StormConfig {
        StormConfig {
            dem_ascii: PathBuf::from("dem.asc"),
            storm_center_x: 500.0,
            storm_center_y: 300.0,
            storm_radius_m: 200.0,
            storm_severity: 5,
            storm_duration_hours: 1.5,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_zero_radius_valid() {
        let mut config = sample();
        config.storm_radius_m = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_severity_rejected() {
        let mut config = sample();
        config.storm_severity = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_duration_rejected() {
        let mut config = sample();
        config.storm_duration_hours = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_radius_rejected() {
        let mut config = sample();
        config.storm_radius_m = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duration_seconds() {
        assert_eq!(sample().duration_seconds(), 5400.0);
    }

    #[test]
    fn test_from_folder_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORM_CONFIG_FILENAME);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"{{
                "dem_ascii": "terrain.asc",
                "storm_center_x": 100.0,
                "storm_center_y": 200.0,
                "storm_radius_m": 50.0,
                "storm_severity": 3,
                "storm_duration_hours": 0.5
            }}"#
        )
        .unwrap();

        let config = StormConfig::from_folder(dir.path()).unwrap();
        assert_eq!(config.storm_severity, 3);
        assert_eq!(config.dem_path(dir.path()), dir.path().join("terrain.asc"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = StormConfig::from_folder(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_invalid_file_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORM_CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"{
                "storm_center_x": 0.0,
                "storm_center_y": 0.0,
                "storm_radius_m": 10.0,
                "storm_severity": 0,
                "storm_duration_hours": 1.0
            }"#,
        )
        .unwrap();
        assert!(StormConfig::from_file(&path).is_err());
    }
}
