// src/lib.rs

//! 低雷诺数 k-ε 湍流闭合模型（Launder-Sharma + Yap 修正）
//!
//! 为不可压缩/可压缩流动求解器提供涡粘修正：求解湍动能 k
//! 与耗散率 ε 的耦合输运方程，带近壁低雷诺数阻尼与 Yap
//! 长度尺度修正，每次外层迭代更新一次涡粘场。
//!
//! 空间离散（散度、梯度、Laplace 算子）、线性求解、网格
//! 分区与边界条件均为外部协作方职责，模型通过
//! [`traits`] 中的能力接口消费它们。
//!
//! # 模块
//!
//! - [`field`]: 标量场与面通量容器
//! - [`gradient`]: 速度梯度张量
//! - [`coeffs`]: 系数配置与派生
//! - [`damping`]: 低雷诺数阻尼函数 fMu、f2
//! - [`yap`]: Yap 长度尺度修正源
//! - [`equation`]: 标量方程组装容器
//! - [`traits`]: 外部能力接口
//! - [`model`]: 闭合模型与校正循环
//!
//! # 使用示例
//!
//! ```ignore
//! use keyap::{ClosureConfig, FlowInputs, LaunderSharmaKEYap};
//!
//! let mut model = LaunderSharmaKEYap::new(k0, eps0, &wall_distance, &transport, &config)?;
//! loop {
//!     // 外层求解器推进动量方程后……
//!     let flow = FlowInputs { phi: &phi, grad_u: &grad_u, grad_grad_u_mag_sqr: &ggu };
//!     model.correct(&flow, &discretization, &mut solver)?;
//!     momentum.set_eddy_viscosity(model.nut());
//! }
//! ```

pub mod coeffs;
pub mod damping;
pub mod equation;
pub mod error;
pub mod field;
pub mod gradient;
pub mod model;
pub mod traits;
pub mod yap;

pub use coeffs::{ClosureConfig, ModelCoeffs};
pub use damping::{f2_of, f_mu_of, turbulent_reynolds};
pub use equation::{MatrixEntry, ScalarEquation, SolveError, SolveReport, SolveStatus};
pub use error::{CorrectionError, CycleStage, KeyapResult};
pub use field::{FaceFlux, ScalarField};
pub use gradient::{divergence_field, VelocityGradient};
pub use model::{dilatation_source, LaunderSharmaKEYap};
pub use traits::{Discretization, EquationSolver, FlowInputs, RansClosure, TransportModel};
pub use yap::yap_source;
