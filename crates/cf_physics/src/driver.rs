// crates/cf_physics/src/driver.rs

//! 风暴-退水模拟驱动
//!
//! 双时钟自适应步长主循环：
//!
//! - 总时钟 `total_elapsed_s` 覆盖整个模拟窗口（风暴 + 退水）；
//! - 风暴时钟 `storm_elapsed_s` 与总时钟同步推进，用于判定降雨是否仍在进行。
//!
//! 每步步长取求解器稳定步长、步长上限、距窗口结束的剩余时间三者最小值；
//! 风暴阶段再与距风暴结束的剩余时间取最小，保证风暴结束时刻被精确命中。
//! 两个时钟均以 `t += (t_end - t)` 形式收敛，循环结束时总时钟精确等于窗口长度。
//!
//! 降雨在求解器推进之后注入，且仅当推进后的风暴时钟仍小于风暴持续时间；
//! 恰好命中风暴结束时刻的那一步不再注入降雨。

use cf_config::{SimulationConfig, StormConfig};
use cf_foundation::error::{CfError, CfResult};
use cf_grid::FieldStore;
use tracing::{debug, info};

use crate::solver::OverlandFlowSolver;

/// 模拟所处阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StormPhase {
    /// 风暴进行中（降雨注入）
    Storm,
    /// 退水阶段（降雨停止，水体继续演进）
    Recession,
    /// 模拟窗口结束
    Done,
}

/// 驱动运行报告
#[derive(Debug, Clone, Copy)]
pub struct DriverReport {
    /// 主循环迭代次数
    pub iterations: usize,
    /// 总时钟终值 [s]
    pub total_elapsed_s: f64,
    /// 风暴时钟终值 [s]
    pub storm_elapsed_s: f64,
    /// 全域峰值水深最大值 [m]
    pub max_peak_depth_m: f64,
}

/// 风暴-退水驱动器
pub struct StormRecessionDriver {
    storm_duration_s: f64,
    total_window_s: f64,
    max_step_s: f64,
    max_iterations: usize,
    total_elapsed_s: f64,
    storm_elapsed_s: f64,
    iterations: usize,
}

impl StormRecessionDriver {
    /// 由风暴与模拟配置创建驱动器
    pub fn new(storm: &StormConfig, sim: &SimulationConfig) -> Self {
        Self {
            storm_duration_s: storm.duration_seconds(),
            total_window_s: sim.total_window_seconds(),
            max_step_s: sim.max_step_s,
            max_iterations: sim.max_iterations,
            total_elapsed_s: 0.0,
            storm_elapsed_s: 0.0,
            iterations: 0,
        }
    }

    /// 当前所处阶段
    pub fn phase(&self) -> StormPhase {
        if self.total_elapsed_s >= self.total_window_s {
            StormPhase::Done
        } else if self.storm_elapsed_s < self.storm_duration_s {
            StormPhase::Storm
        } else {
            StormPhase::Recession
        }
    }

    /// 总时钟 [s]
    #[inline]
    pub fn total_elapsed_s(&self) -> f64 {
        self.total_elapsed_s
    }

    /// 风暴时钟 [s]
    #[inline]
    pub fn storm_elapsed_s(&self) -> f64 {
        self.storm_elapsed_s
    }

    /// 运行主循环直至模拟窗口结束
    ///
    /// # 错误
    ///
    /// 迭代次数达到上限仍未覆盖窗口时返回未收敛错误；
    /// 步长退化为非正值时返回内部错误。
    pub fn run(
        &mut self,
        solver: &mut OverlandFlowSolver,
        fields: &mut FieldStore,
    ) -> CfResult<DriverReport> {
        info!(
            storm_duration_s = self.storm_duration_s,
            total_window_s = self.total_window_s,
            max_step_s = self.max_step_s,
            "风暴-退水模拟开始"
        );

        let mut in_storm = self.storm_elapsed_s < self.storm_duration_s;

        while self.total_elapsed_s < self.total_window_s {
            if self.iterations >= self.max_iterations {
                return Err(CfError::non_convergence(
                    self.iterations,
                    self.total_elapsed_s,
                    self.total_window_s,
                ));
            }

            let mut dt = solver
                .estimate_stable_step(fields.water_depth())
                .min(self.max_step_s);
            dt = dt.min(self.total_window_s - self.total_elapsed_s);
            if self.storm_elapsed_s < self.storm_duration_s {
                dt = dt.min(self.storm_duration_s - self.storm_elapsed_s);
            }
            if !dt.is_finite() || dt <= 0.0 {
                return Err(CfError::internal(format!(
                    "步长退化为 {dt}, 驱动循环无法推进 (迭代 {})",
                    self.iterations
                )));
            }

            solver.advance(dt, fields.water_depth_mut())?;
            self.total_elapsed_s += dt;
            self.storm_elapsed_s += dt;

            // 恰好命中风暴结束时刻的步不再注入降雨
            if self.storm_elapsed_s < self.storm_duration_s {
                fields.add_rainfall(dt);
            } else if in_storm {
                in_storm = false;
                info!(
                    total_elapsed_s = self.total_elapsed_s,
                    iterations = self.iterations,
                    "风暴结束, 进入退水阶段"
                );
            }

            fields.update_peak();
            self.iterations += 1;

            if self.iterations % 1000 == 0 {
                debug!(
                    iterations = self.iterations,
                    total_elapsed_s = self.total_elapsed_s,
                    "驱动循环进行中"
                );
            }
        }

        let max_peak_depth_m = fields.peak_depth().iter().copied().fold(0.0, f64::max);
        info!(
            iterations = self.iterations,
            total_elapsed_s = self.total_elapsed_s,
            max_peak_depth_m,
            "模拟窗口结束"
        );

        Ok(DriverReport {
            iterations: self.iterations,
            total_elapsed_s: self.total_elapsed_s,
            storm_elapsed_s: self.storm_elapsed_s,
            max_peak_depth_m,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn storm(duration_hours: f64) -> StormConfig {
        StormConfig {
            dem_ascii: PathBuf::from("dem.asc"),
            storm_center_x: 0.0,
            storm_center_y: 0.0,
            storm_radius_m: 100.0,
            storm_severity: 1,
            storm_duration_hours: duration_hours,
        }
    }

    #[test]
    fn test_initial_phase() {
        let sim = SimulationConfig::default();
        let driver = StormRecessionDriver::new(&storm(1.0), &sim);
        assert_eq!(driver.phase(), StormPhase::Storm);
    }

    #[test]
    fn test_zero_duration_starts_in_recession() {
        let sim = SimulationConfig::default();
        let driver = StormRecessionDriver::new(&storm(0.0), &sim);
        assert_eq!(driver.phase(), StormPhase::Recession);
    }
}
