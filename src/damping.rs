// src/damping.rs

//! 低雷诺数阻尼函数
//!
//! Launder-Sharma 模型的两个无量纲阻尼场，按湍流雷诺数
//! Ret = k²/(ν·ε) 逐单元求值：
//!
//! ```text
//! fMu = exp(-3.4 / (1 + Ret/50)²)      范围 (0, 1]
//! f2  = 1 - 0.3·exp(-Ret²)             范围 (0.7, 1]
//! ```
//!
//! `fMu` 抑制近壁涡粘，`f2` 抑制 ε 方程的耗散汇。两者在
//! 校正循环的不同阶段求值（f2 用循环前的 k、ε，fMu 用更新
//! 后的），因此只提供标量纯函数，由调用方按需逐场映射。
//! ε 由下界不变量保证严格为正，Ret 恒为有限值。

use crate::field::ScalarField;

/// fMu 的标量形式
#[inline]
pub fn f_mu_of(ret: f64) -> f64 {
    let q = 1.0 + ret / 50.0;
    (-3.4 / (q * q)).exp()
}

/// f2 的标量形式
#[inline]
pub fn f2_of(ret: f64) -> f64 {
    1.0 - 0.3 * (-(ret * ret)).exp()
}

/// 湍流雷诺数场 Ret = k²/(ν·ε)
pub fn turbulent_reynolds(k: &ScalarField, epsilon: &ScalarField, nu: &ScalarField) -> ScalarField {
    k.zip_map3(nu, epsilon, |k, nu, eps| k * k / (nu * eps))
}
