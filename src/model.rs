// src/model.rs

//! Launder-Sharma k-ε + Yap 修正闭合模型
//!
//! 低雷诺数两方程闭合：求解 k 与 ε 的耦合非线性输运方程，
//! 经阻尼函数与 Yap 长度尺度修正后更新涡粘场。每次外层
//! 迭代由外部流动求解器同步调用一次 [`LaunderSharmaKEYap::correct`]。
//!
//! # ε 方程
//!
//! ```text
//! dε/dt + div(phi, ε) − div(Dε_eff·grad ε)
//!   =  C1·G·ε/k                    产生（显式）
//!    − Sp(C2·f2·ε/k)               耗散（隐式，稳定性要求）
//!    + C3·ε·div(U)                 可压缩膨胀项
//!    + 2·ν·ν_t·|∇(∇U)|²           近壁生成项（ε̃ 形式）
//!    + S_yap                       Yap 修正
//! ```
//!
//! # k 方程（使用刚更新的 ε）
//!
//! ```text
//! dk/dt + div(phi, k) − div(Dk_eff·grad k) = G − Sp(ε/k)
//! ```
//!
//! # 涡粘
//!
//! ```text
//! ν_t = Cμ·fMu·k²/ε    （按更新后的 k、ε 重算 fMu，定界到 [0, nut_max]）
//! ```
//!
//! # 失败语义
//!
//! 每个求解阶段先写入临时场，成功后才定界并提交；外部
//! 求解失败时循环中止，k、ε、ν_t 保持循环前的值。

use crate::coeffs::{ClosureConfig, ModelCoeffs};
use crate::damping::{f2_of, f_mu_of, turbulent_reynolds};
use crate::equation::ScalarEquation;
use crate::error::{CorrectionError, CycleStage, KeyapResult};
use crate::field::ScalarField;
use crate::gradient::{divergence_field, VelocityGradient};
use crate::traits::{Discretization, EquationSolver, FlowInputs, RansClosure, TransportModel};
use crate::yap::yap_source;

/// 可压缩膨胀源 C3·ε·div(U)
///
/// C3 = 0 时整项消失（返回 `None`），与 div(U) 取值无关。
pub fn dilatation_source(
    c3: f64,
    epsilon: &ScalarField,
    div_u: &ScalarField,
) -> Option<ScalarField> {
    if c3 == 0.0 {
        return None;
    }
    Some(epsilon.zip_map(div_u, |eps, div| c3 * eps * div))
}

/// Launder-Sharma k-ε + Yap 闭合模型
///
/// 独占持有自身的湍流状态（k、ε、ν_t）；不提供隐式拷贝。
/// 壁面距离与输运模型以借用句柄持有，由外部网格/求解器
/// 保证其存活期覆盖模型。
pub struct LaunderSharmaKEYap<'m> {
    coeffs: ModelCoeffs,
    k: ScalarField,
    epsilon: ScalarField,
    nut: ScalarField,
    /// 壁面距离（只读，外部所有）
    wall_distance: &'m ScalarField,
    transport: &'m dyn TransportModel,
}

impl<'m> LaunderSharmaKEYap<'m> {
    /// 从初始场与配置构造模型
    ///
    /// 初始 k、ε 立即按下界定界，并据此完成一次涡粘更新，
    /// 使 `nut()` 在首次 `correct()` 之前即可用。
    pub fn new(
        k: ScalarField,
        epsilon: ScalarField,
        wall_distance: &'m ScalarField,
        transport: &'m dyn TransportModel,
        config: &ClosureConfig,
    ) -> KeyapResult<Self> {
        let n = k.n_cells();
        check_size("epsilon", n, epsilon.n_cells())?;
        check_size("wall_distance", n, wall_distance.n_cells())?;
        check_size("nu", n, transport.nu().n_cells())?;

        let coeffs = ModelCoeffs::from_config(config);

        let mut model = Self {
            coeffs,
            k,
            epsilon,
            nut: ScalarField::zeros(n),
            wall_distance,
            transport,
        };
        model.k.clamp_min(model.coeffs.k_min);
        model.epsilon.clamp_min(model.coeffs.eps_min);
        model.update_nut();
        Ok(model)
    }

    /// 湍动能场
    pub fn k(&self) -> &ScalarField {
        &self.k
    }

    /// 耗散率场
    pub fn epsilon(&self) -> &ScalarField {
        &self.epsilon
    }

    /// 涡粘场
    pub fn nut(&self) -> &ScalarField {
        &self.nut
    }

    /// 当前有效系数
    pub fn coeffs(&self) -> &ModelCoeffs {
        &self.coeffs
    }

    /// 湍流状态的显式深拷贝 (k, ε, ν_t)
    pub fn clone_state(&self) -> (ScalarField, ScalarField, ScalarField) {
        (self.k.clone(), self.epsilon.clone(), self.nut.clone())
    }

    /// k 的有效扩散率 Dk_eff = ν_t/σ_k + ν
    pub fn dk_eff(&self) -> ScalarField {
        let nu = self.transport.nu();
        self.nut
            .zip_map(nu, |nut, nu| nut / self.coeffs.sigma_k + nu)
    }

    /// ε 的有效扩散率 Dε_eff = ν_t/σ_ε + ν
    pub fn depsilon_eff(&self) -> ScalarField {
        let nu = self.transport.nu();
        self.nut
            .zip_map(nu, |nut, nu| nut / self.coeffs.sigma_eps + nu)
    }

    /// 湍流产生率 G = ν_t·|S|²
    ///
    /// |S| 为应变率张量的模，按外部提供的速度梯度逐单元求出。
    pub fn production(&self, grad_u: &[VelocityGradient]) -> ScalarField {
        debug_assert_eq!(grad_u.len(), self.k.n_cells());
        ScalarField::from_cells(
            self.nut
                .cells()
                .iter()
                .zip(grad_u)
                .map(|(&nut, g)| {
                    let s = g.strain_rate_magnitude();
                    nut * s * s
                })
                .collect(),
        )
    }

    /// 重读系数配置，返回是否有有效系数变化
    pub fn read_config(&mut self, config: &ClosureConfig) -> bool {
        let new = ModelCoeffs::from_config(config);
        let changed = new != self.coeffs;
        if changed {
            log::debug!("闭合模型系数已更新");
        }
        self.coeffs = new;
        changed
    }

    /// 执行一次校正循环
    ///
    /// 阶段顺序固定：阻尼函数 → ε 方程 → 定界 ε → k 方程
    /// → 定界 k → 涡粘更新。任一求解失败即中止，已定界的
    /// 场保持循环前的值。
    pub fn correct(
        &mut self,
        flow: &FlowInputs<'_>,
        ops: &dyn Discretization,
        solver: &mut dyn EquationSolver,
    ) -> KeyapResult<()> {
        let n = self.k.n_cells();
        check_size("grad_u", n, flow.grad_u.len())?;
        check_size("grad_grad_u_mag_sqr", n, flow.grad_grad_u_mag_sqr.n_cells())?;

        let nu = self.transport.nu();

        // 阶段 1: 阻尼函数与逐单元源
        // f2 用循环前的 k、ε；fMu 留待涡粘更新阶段按更新后的场求值
        let f2 = turbulent_reynolds(&self.k, &self.epsilon, nu).map(f2_of);
        let g = self.production(flow.grad_u);
        let yap = yap_source(
            &self.k,
            &self.epsilon,
            self.wall_distance,
            self.coeffs.cyap,
            self.coeffs.kappa,
        );
        let div_u = divergence_field(flow.grad_u);
        let eps_over_k = &self.epsilon / &self.k;

        // 阶段 2: ε 方程
        let mut eps_eqn = ScalarEquation::new(n);
        ops.ddt(&self.epsilon, &mut eps_eqn);
        ops.convection(flow.phi, &self.epsilon, &mut eps_eqn);
        ops.diffusion(&self.depsilon_eff(), &self.epsilon, &mut eps_eqn);

        // 产生项 C1·G·ε/k（显式）
        eps_eqn.add_su(&(&(&g * &eps_over_k) * self.coeffs.c1));
        // 耗散汇 C2·f2·ε/k（隐式：显式处理该量级的汇无条件不稳定）
        eps_eqn.add_sp(&(&(&f2 * &eps_over_k) * self.coeffs.c2));
        // 可压缩膨胀项 C3·ε·div(U)
        if let Some(dilatation) = dilatation_source(self.coeffs.c3, &self.epsilon, &div_u) {
            eps_eqn.add_su(&dilatation);
        }
        // 近壁生成项 2·ν·ν_t·|∇(∇U)|²（ε̃ 形式）
        eps_eqn.add_su(&nu.zip_map3(
            &self.nut,
            flow.grad_grad_u_mag_sqr,
            |nu, nut, gg| 2.0 * nu * nut * gg,
        ));
        // Yap 修正
        eps_eqn.add_su(&yap);

        let mut eps_new = self.epsilon.clone();
        let report = solver
            .solve(&eps_eqn, &mut eps_new)
            .map_err(|source| CorrectionError::SolveFailed {
                stage: CycleStage::EpsilonSolve,
                source,
            })?;
        log::debug!(
            "ε 方程: {} 次迭代, 残差 {:.3e}",
            report.iterations,
            report.residual
        );
        eps_new.clamp_min(self.coeffs.eps_min);
        self.epsilon = eps_new;

        // 阶段 3: k 方程（使用刚更新的 ε）
        let mut k_eqn = ScalarEquation::new(n);
        ops.ddt(&self.k, &mut k_eqn);
        ops.convection(flow.phi, &self.k, &mut k_eqn);
        ops.diffusion(&self.dk_eff(), &self.k, &mut k_eqn);

        k_eqn.add_su(&g);
        k_eqn.add_sp(&(&self.epsilon / &self.k));

        let mut k_new = self.k.clone();
        let report = solver
            .solve(&k_eqn, &mut k_new)
            .map_err(|source| CorrectionError::SolveFailed {
                stage: CycleStage::KSolve,
                source,
            })?;
        log::debug!(
            "k 方程: {} 次迭代, 残差 {:.3e}",
            report.iterations,
            report.residual
        );
        k_new.clamp_min(self.coeffs.k_min);
        self.k = k_new;

        // 阶段 4: 涡粘更新
        self.update_nut();
        Ok(())
    }

    /// 按当前 k、ε 重算涡粘 ν_t = Cμ·fMu·k²/ε，并定界到 [0, nut_max]
    fn update_nut(&mut self) {
        let nu = self.transport.nu();
        let cmu = self.coeffs.cmu;
        self.nut = turbulent_reynolds(&self.k, &self.epsilon, nu)
            .map(f_mu_of)
            .zip_map3(&self.k, &self.epsilon, |f_mu, k, eps| cmu * f_mu * k * k / eps);
        self.nut.clamp_min(0.0);
        self.nut.clamp_max(self.coeffs.nut_max);
    }
}

impl RansClosure for LaunderSharmaKEYap<'_> {
    fn name(&self) -> &'static str {
        "LaunderSharmaKEYap"
    }

    fn k(&self) -> &ScalarField {
        &self.k
    }

    fn epsilon(&self) -> &ScalarField {
        &self.epsilon
    }

    fn nut(&self) -> &ScalarField {
        &self.nut
    }

    fn read(&mut self, config: &ClosureConfig) -> bool {
        self.read_config(config)
    }

    fn correct(
        &mut self,
        flow: &FlowInputs<'_>,
        ops: &dyn Discretization,
        solver: &mut dyn EquationSolver,
    ) -> KeyapResult<()> {
        LaunderSharmaKEYap::correct(self, flow, ops, solver)
    }
}

fn check_size(name: &'static str, expected: usize, actual: usize) -> KeyapResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(CorrectionError::SizeMismatch {
            name,
            expected,
            actual,
        })
    }
}
