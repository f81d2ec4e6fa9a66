// crates/cf_physics/src/solver.rs

//! 地表漫流求解器
//!
//! 基于惯性波近似（Bates et al. 2010）的栅格漫流格式：
//! 在结构化网格的边（link）上存储单宽流量，水深存储在节点上。
//!
//! ## 数值格式
//!
//! 每条边的单宽流量按半隐式 Manning 摩擦更新：
//!
//! $$ q^{n+1} = \frac{q^n - g h_f \Delta t S}{1 + g \Delta t n^2 |q^n| / h_f^{7/3}} $$
//!
//! 其中 $h_f$ 为边上有效水深（两端水面高程最大值减去两端底高程最大值），
//! $S$ 为沿边方向的水面坡度。节点水深按流量散度显式更新，
//! 出流按节点可用水量限幅，保证水深非负。
//!
//! ## 边界处理
//!
//! - 封闭节点：所有相邻边不参与计算（零通量固壁）
//! - 开边界节点：参与边上流量计算（允许出流），但自身水深保持固定
//! - 内部节点：完整参与

use cf_foundation::error::{CfError, CfResult};
use cf_foundation::tolerance::NumericalTolerance;
use cf_grid::{NodeStatus, RasterMesh};
use rayon::prelude::*;

use cf_config::PhysicsConfig;

/// 自适应步长下限 [s]
const DT_MIN: f64 = 1e-6;

/// 自适应步长上限 [s]，静水时直接取该值
const DT_MAX: f64 = 3600.0;

/// 网格边（方向从低索引节点指向高索引节点）
#[derive(Debug, Clone, Copy)]
struct Link {
    /// 上游端节点（+x 或 +y 方向的起点）
    from: usize,
    /// 下游端节点
    to: usize,
}

/// 地表漫流求解器
///
/// 构造时固化网格拓扑、底高程与边界状态，运行期间只更新
/// 边上流量与节点水深。
pub struct OverlandFlowSolver {
    n_nodes: usize,
    cellsize: f64,
    elevation: Vec<f64>,
    status: Vec<NodeStatus>,
    links: Vec<Link>,
    /// 边上单宽流量 [m²/s]，正方向为 from → to
    discharge: Vec<f64>,
    gravity: f64,
    cfl_alpha: f64,
    manning_n: f64,
    tol: NumericalTolerance,
    // 每步复用的散度缓冲
    inflow: Vec<f64>,
    outflow: Vec<f64>,
    limit: Vec<f64>,
}

impl OverlandFlowSolver {
    /// 创建求解器
    ///
    /// 只保留两端均非封闭的边。高程长度必须等于节点数。
    pub fn new(
        mesh: &RasterMesh,
        elevation: &[f64],
        physics: &PhysicsConfig,
        tol: NumericalTolerance,
    ) -> CfResult<Self> {
        CfError::check_size("elevation", mesh.n_nodes(), elevation.len())?;

        let n_nodes = mesh.n_nodes();
        let mut links = Vec::new();
        for row in 0..mesh.nrows() {
            for col in 0..mesh.ncols() {
                let from = mesh.node_index(row, col);
                if mesh.status(from).is_closed() {
                    continue;
                }
                // +x 方向边
                if col + 1 < mesh.ncols() {
                    let to = mesh.node_index(row, col + 1);
                    if !mesh.status(to).is_closed() {
                        links.push(Link { from, to });
                    }
                }
                // +y 方向边
                if row + 1 < mesh.nrows() {
                    let to = mesh.node_index(row + 1, col);
                    if !mesh.status(to).is_closed() {
                        links.push(Link { from, to });
                    }
                }
            }
        }

        let n_links = links.len();
        Ok(Self {
            n_nodes,
            cellsize: mesh.cellsize(),
            elevation: elevation.to_vec(),
            status: mesh.status_slice().to_vec(),
            links,
            discharge: vec![0.0; n_links],
            gravity: physics.gravity,
            cfl_alpha: physics.cfl_alpha,
            manning_n: physics.manning_n,
            tol,
            inflow: vec![0.0; n_nodes],
            outflow: vec![0.0; n_nodes],
            limit: vec![1.0; n_nodes],
        })
    }

    /// 活动边数量
    #[inline]
    pub fn n_links(&self) -> usize {
        self.links.len()
    }

    /// 估计稳定步长 [s]
    ///
    /// 取 `alpha · dx / √(g · h_max)`，h_max 为湿节点最大水深。
    /// 全域静水（无湿节点）时返回步长上限。
    pub fn estimate_stable_step(&self, water_depth: &[f64]) -> f64 {
        let h_max = water_depth
            .par_iter()
            .zip(self.status.par_iter())
            .filter(|(_, status)| !status.is_closed())
            .map(|(&h, _)| h)
            .reduce(|| 0.0, f64::max);

        if !self.tol.is_wet(h_max) {
            return DT_MAX;
        }

        let dt = self.cfl_alpha * self.cellsize / (self.gravity * h_max).sqrt();
        dt.clamp(DT_MIN, DT_MAX)
    }

    /// 推进一个时间步
    ///
    /// 先并行更新边上流量，再按散度更新内部节点水深。
    /// 开边界节点水深保持不变，出流限幅保证非负。
    pub fn advance(&mut self, dt: f64, water_depth: &mut [f64]) -> CfResult<()> {
        CfError::check_size("water_depth", self.n_nodes, water_depth.len())?;

        self.update_link_discharge(dt, water_depth);
        self.limit_outflow(dt, water_depth);
        self.apply_divergence(dt, water_depth);
        Ok(())
    }

    /// 边上流量更新（半隐式 Manning 摩擦）
    fn update_link_discharge(&mut self, dt: f64, water_depth: &[f64]) {
        let elevation = &self.elevation;
        let links = &self.links;
        let g = self.gravity;
        let n_manning = self.manning_n;
        let dx = self.cellsize;
        let tol = self.tol;

        self.discharge
            .par_iter_mut()
            .zip(links.par_iter())
            .for_each(|(q, link)| {
                let z_from = elevation[link.from];
                let z_to = elevation[link.to];
                let eta_from = z_from + water_depth[link.from];
                let eta_to = z_to + water_depth[link.to];

                // 边上有效水深
                let h_flow = eta_from.max(eta_to) - z_from.max(z_to);
                if !tol.is_wet(h_flow) {
                    *q = 0.0;
                    return;
                }

                let slope = (eta_to - eta_from) / dx;
                let numerator = *q - g * h_flow * dt * slope;
                let denominator =
                    1.0 + g * dt * n_manning * n_manning * q.abs() / h_flow.powf(7.0 / 3.0);
                *q = numerator / denominator;
            });
    }

    /// 出流限幅
    ///
    /// 每个节点的出流体积不得超过其当前水量加同步入流，
    /// 超出时按比例缩减该节点所有出流边的流量。
    fn limit_outflow(&mut self, dt: f64, water_depth: &[f64]) {
        self.inflow.fill(0.0);
        self.outflow.fill(0.0);

        for (q, link) in self.discharge.iter().zip(self.links.iter()) {
            if *q >= 0.0 {
                self.outflow[link.from] += *q;
                self.inflow[link.to] += *q;
            } else {
                self.outflow[link.to] += -*q;
                self.inflow[link.from] += -*q;
            }
        }

        let scale = dt / self.cellsize;
        for index in 0..self.n_nodes {
            let out_depth = self.outflow[index] * scale;
            self.limit[index] = if out_depth > self.tol.safe_div {
                let available = water_depth[index] + self.inflow[index] * scale;
                (available / out_depth).min(1.0)
            } else {
                1.0
            };
        }

        for (q, link) in self.discharge.iter_mut().zip(self.links.iter()) {
            let source = if *q >= 0.0 { link.from } else { link.to };
            *q *= self.limit[source];
        }
    }

    /// 散度更新节点水深
    ///
    /// 只更新内部节点；开边界节点水深固定，封闭节点无相邻活动边。
    fn apply_divergence(&mut self, dt: f64, water_depth: &mut [f64]) {
        self.inflow.fill(0.0);
        for (q, link) in self.discharge.iter().zip(self.links.iter()) {
            self.inflow[link.from] -= *q;
            self.inflow[link.to] += *q;
        }

        let scale = dt / self.cellsize;
        for (index, h) in water_depth.iter_mut().enumerate() {
            if self.status[index].is_core() {
                *h = (*h + self.inflow[index] * scale).max(0.0);
            }
        }
    }
}

// ============================================================
// 测试
// ============================================================
