// src/gradient.rs

//! 速度梯度张量
//!
//! 三维速度梯度 ∇U，由外部离散引擎在单元中心求出后
//! 以只读方式传入闭合模型。模型用它计算应变率模、
//! 散度（膨胀项）与湍流产生率。
//!
//! # 应变率张量
//!
//! ```text
//! S_ij = (∂u_i/∂x_j + ∂u_j/∂x_i) / 2
//! |S|  = √(2 S_ij S_ij)
//! ```

use crate::field::ScalarField;

/// 单元中心速度梯度张量（3×3）
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VelocityGradient {
    /// ∂u/∂x
    pub du_dx: f64,
    /// ∂u/∂y
    pub du_dy: f64,
    /// ∂u/∂z
    pub du_dz: f64,
    /// ∂v/∂x
    pub dv_dx: f64,
    /// ∂v/∂y
    pub dv_dy: f64,
    /// ∂v/∂z
    pub dv_dz: f64,
    /// ∂w/∂x
    pub dw_dx: f64,
    /// ∂w/∂y
    pub dw_dy: f64,
    /// ∂w/∂z
    pub dw_dz: f64,
}

impl VelocityGradient {
    /// 从九个分量创建
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        du_dx: f64,
        du_dy: f64,
        du_dz: f64,
        dv_dx: f64,
        dv_dy: f64,
        dv_dz: f64,
        dw_dx: f64,
        dw_dy: f64,
        dw_dz: f64,
    ) -> Self {
        Self {
            du_dx,
            du_dy,
            du_dz,
            dv_dx,
            dv_dy,
            dv_dz,
            dw_dx,
            dw_dy,
            dw_dz,
        }
    }

    /// 纯剪切梯度（仅 ∂u/∂y 非零）
    pub fn shear(du_dy: f64) -> Self {
        Self {
            du_dy,
            ..Default::default()
        }
    }

    /// 各向同性膨胀梯度（对角线均为 s/3，散度为 s）
    pub fn dilatation(s: f64) -> Self {
        let d = s / 3.0;
        Self {
            du_dx: d,
            dv_dy: d,
            dw_dz: d,
            ..Default::default()
        }
    }

    /// 应变率张量的模
    ///
    /// |S| = √(2 S_ij S_ij)
    pub fn strain_rate_magnitude(&self) -> f64 {
        let s11 = self.du_dx;
        let s22 = self.dv_dy;
        let s33 = self.dw_dz;
        let s12 = 0.5 * (self.du_dy + self.dv_dx);
        let s13 = 0.5 * (self.du_dz + self.dw_dx);
        let s23 = 0.5 * (self.dv_dz + self.dw_dy);

        let sij_sij =
            s11 * s11 + s22 * s22 + s33 * s33 + 2.0 * (s12 * s12 + s13 * s13 + s23 * s23);
        (2.0 * sij_sij).sqrt()
    }

    /// 散度 div(U) = tr(∇U)
    #[inline]
    pub fn divergence(&self) -> f64 {
        self.du_dx + self.dv_dy + self.dw_dz
    }

    /// 检查所有分量是否有限
    pub fn is_valid(&self) -> bool {
        [
            self.du_dx, self.du_dy, self.du_dz, self.dv_dx, self.dv_dy, self.dv_dz, self.dw_dx,
            self.dw_dy, self.dw_dz,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// 由速度梯度场构造散度标量场
pub fn divergence_field(grad_u: &[VelocityGradient]) -> ScalarField {
    ScalarField::from_cells(grad_u.iter().map(|g| g.divergence()).collect())
}
