// src/yap.rs

//! Yap 长度尺度修正
//!
//! 近壁区 ε 方程的附加源项，抑制湍流长度尺度超出
//! 平衡长度尺度的过度增长：
//!
//! ```text
//! L     = k^1.5 / ε            实际长度尺度
//! Le    = κ·y                  平衡（近壁）长度尺度
//! S_yap = Cyap · (ε²/k) · max((L/Le − 1)·(L/Le)², 0)
//! ```
//!
//! L ≤ Le 时源项为零；否则严格为正，作为附加耗散
//! 加入 ε 方程右端。任何输入下都不会取负值。

use crate::field::ScalarField;

/// 壁面距离的最小保护值
///
/// 壁面距离由外部网格提供且应严格为正；退化单元按此
/// 下界处理，避免 Le 为零。
const Y_FLOOR: f64 = 1e-12;

/// 单元级 Yap 源
#[inline]
pub fn yap_source_of(k: f64, eps: f64, y: f64, cyap: f64, kappa: f64) -> f64 {
    let l = k.powf(1.5) / eps;
    let le = kappa * y.max(Y_FLOOR);
    let ratio = l / le;
    cyap * (eps * eps / k) * ((ratio - 1.0) * ratio * ratio).max(0.0)
}

/// Yap 修正源场
///
/// 输入场均为只读；k、ε 依赖下界不变量保证分母非零。
pub fn yap_source(
    k: &ScalarField,
    epsilon: &ScalarField,
    wall_distance: &ScalarField,
    cyap: f64,
    kappa: f64,
) -> ScalarField {
    k.zip_map3(epsilon, wall_distance, |k, eps, y| {
        yap_source_of(k, eps, y, cyap, kappa)
    })
}
