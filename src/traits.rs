// src/traits.rs

//! 能力接口
//!
//! 闭合模型与外部协作方之间的抽象边界：
//!
//! - [`Discretization`]: 非结构网格上的空间/时间离散算子，
//!   由外部流动求解器实现并负责跨分区并行与 halo 一致性
//! - [`EquationSolver`]: 已组装方程的线性/非线性求解
//! - [`TransportModel`]: 分子运动粘性来源
//! - [`RansClosure`]: 闭合模型自身对外暴露的能力接口，
//!   以组合替代编译期模板继承
//!
//! 闭合模型从不实现这些算子，只消费它们。

use crate::coeffs::ClosureConfig;
use crate::equation::{ScalarEquation, SolveError, SolveReport};
use crate::error::KeyapResult;
use crate::field::{FaceFlux, ScalarField};
use crate::gradient::VelocityGradient;

/// 外部空间/时间离散算子
///
/// 各方法向方程追加对应项的矩阵/源贡献。实现方可自由
/// 选择格式（迎风、限制器、梯度重构等），闭合模型只
/// 要求加性组合语义。
pub trait Discretization {
    /// 时间导数项 d(φ)/dt
    fn ddt(&self, field: &ScalarField, eqn: &mut ScalarEquation);

    /// 对流项 div(phi, φ)
    fn convection(&self, phi: &FaceFlux, field: &ScalarField, eqn: &mut ScalarEquation);

    /// 扩散项 −div(Γ·grad(φ))
    fn diffusion(&self, gamma: &ScalarField, field: &ScalarField, eqn: &mut ScalarEquation);
}

/// 外部方程求解器
pub trait EquationSolver {
    /// 求解方程并将结果写入 `field`
    ///
    /// 失败时返回错误；调用方（校正循环）保证失败后
    /// 模型状态不受影响。
    fn solve(
        &mut self,
        eqn: &ScalarEquation,
        field: &mut ScalarField,
    ) -> Result<SolveReport, SolveError>;
}

/// 输运模型句柄：提供分子运动粘性
///
/// 由外部求解器持有并保证存活期覆盖闭合模型。
pub trait TransportModel: Send + Sync {
    /// 分子运动粘性场 ν
    fn nu(&self) -> &ScalarField;
}

/// 外部流动求解器在每次校正时提供的只读输入
///
/// 速度、密度、质量通量场均归外部求解器所有；此处仅
/// 借用一次外层迭代期间不变的快照。
#[derive(Debug, Clone, Copy)]
pub struct FlowInputs<'a> {
    /// 面心质量通量（转交给对流算子）
    pub phi: &'a FaceFlux,
    /// 单元中心速度梯度张量
    pub grad_u: &'a [VelocityGradient],
    /// |∇(∇U)|² 场（Launder-Sharma 近壁生成项用，
    /// 由外部梯度算子求出）
    pub grad_grad_u_mag_sqr: &'a ScalarField,
}

/// RANS 闭合模型的能力接口
///
/// 外层求解器通过该接口驱动任意两方程（或其他）闭合，
/// 构造期选定具体模型，运行期经 trait 对象分发。
pub trait RansClosure: Send + Sync {
    /// 模型名称
    fn name(&self) -> &'static str;

    /// 湍动能场
    fn k(&self) -> &ScalarField;

    /// 耗散率场
    fn epsilon(&self) -> &ScalarField;

    /// 涡粘场
    fn nut(&self) -> &ScalarField;

    /// 重读系数配置，返回是否有有效系数发生变化
    ///
    /// 只替换系数，从不触碰循环中的湍流状态。
    fn read(&mut self, config: &ClosureConfig) -> bool;

    /// 执行一次校正循环
    fn correct(
        &mut self,
        flow: &FlowInputs<'_>,
        ops: &dyn Discretization,
        solver: &mut dyn EquationSolver,
    ) -> KeyapResult<()>;
}
