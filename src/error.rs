// src/error.rs

//! 错误类型
//!
//! 闭合模型的错误分为三类：
//!
//! 1. 配置项缺失/无效 —— 本地回退默认值，不作为错误上报
//!    （见 [`crate::coeffs`]）
//! 2. 近零分母 —— 由 k、ε 的正下界不变量在结构上排除，
//!    不存在运行期异常路径
//! 3. 外部求解失败 —— 包装后向调用方传播，循环在失败
//!    阶段中止，已定界的场保持循环前的值

use crate::equation::SolveError;
use thiserror::Error;

/// 统一结果类型
pub type KeyapResult<T> = Result<T, CorrectionError>;

/// 校正循环的阶段
///
/// 每次调用沿固定线性路径推进，无分支状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStage {
    /// 阻尼函数计算
    Damping,
    /// ε 方程求解
    EpsilonSolve,
    /// k 方程求解
    KSolve,
    /// 涡粘更新
    ViscosityUpdate,
}

impl CycleStage {
    /// 阶段名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Damping => "Damping",
            Self::EpsilonSolve => "EpsilonSolve",
            Self::KSolve => "KSolve",
            Self::ViscosityUpdate => "ViscosityUpdate",
        }
    }
}

impl std::fmt::Display for CycleStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 校正循环错误
#[derive(Debug, Error)]
pub enum CorrectionError {
    /// 外部求解在某一阶段失败，循环中止
    #[error("湍流校正在 {stage} 阶段中止: {source}")]
    SolveFailed {
        /// 失败阶段
        stage: CycleStage,
        /// 外部求解错误
        #[source]
        source: SolveError,
    },

    /// 输入场尺寸不匹配
    #[error("输入场尺寸不匹配: {name} 期望 {expected} 个单元, 实际 {actual}")]
    SizeMismatch {
        /// 不匹配的输入名
        name: &'static str,
        /// 期望单元数
        expected: usize,
        /// 实际单元数
        actual: usize,
    },
}
