// src/field.rs

//! 标量场容器
//!
//! 有限体积离散中的单元中心标量场：每个网格单元一个值，
//! 另附边界面值。闭合模型把它当作支持逐元素运算的数值容器，
//! 空间算子（对流、扩散、梯度）由外部网格库负责。
//!
//! # 设计
//!
//! - 逐元素运算同时作用于单元值和边界面值
//! - 两个场的边界面数不一致时，结果场不携带边界值
//!   （方程组装只消费单元值，边界值仅用于算子插值）
//! - 无跨单元归约，所有运算可按单元独立执行

use serde::{Deserialize, Serialize};

/// 单元中心标量场
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    /// 单元中心值
    cells: Vec<f64>,
    /// 边界面值
    boundary: Vec<f64>,
}

impl ScalarField {
    /// 创建均匀场（无边界值）
    pub fn uniform(n_cells: usize, value: f64) -> Self {
        Self {
            cells: vec![value; n_cells],
            boundary: Vec::new(),
        }
    }

    /// 创建零场
    pub fn zeros(n_cells: usize) -> Self {
        Self::uniform(n_cells, 0.0)
    }

    /// 从单元值数组创建
    pub fn from_cells(cells: Vec<f64>) -> Self {
        Self {
            cells,
            boundary: Vec::new(),
        }
    }

    /// 附加边界面值
    pub fn with_boundary(mut self, boundary: Vec<f64>) -> Self {
        self.boundary = boundary;
        self
    }

    /// 单元数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// 边界面数
    #[inline]
    pub fn n_boundary(&self) -> usize {
        self.boundary.len()
    }

    /// 单元值切片
    #[inline]
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    /// 可变单元值切片
    #[inline]
    pub fn cells_mut(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    /// 边界面值切片
    #[inline]
    pub fn boundary(&self) -> &[f64] {
        &self.boundary
    }

    /// 填充所有值
    pub fn fill(&mut self, value: f64) {
        self.cells.fill(value);
        self.boundary.fill(value);
    }

    /// 下界钳位（原地）
    ///
    /// 用于维持 k、ε 的正下界不变量以及 ν_t 的非负性。
    pub fn clamp_min(&mut self, floor: f64) {
        for v in &mut self.cells {
            if *v < floor {
                *v = floor;
            }
        }
        for v in &mut self.boundary {
            if *v < floor {
                *v = floor;
            }
        }
    }

    /// 上界钳位（原地）
    pub fn clamp_max(&mut self, cap: f64) {
        for v in &mut self.cells {
            if *v > cap {
                *v = cap;
            }
        }
        for v in &mut self.boundary {
            if *v > cap {
                *v = cap;
            }
        }
    }

    /// 逐元素映射
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            cells: self.cells.iter().map(|&v| f(v)).collect(),
            boundary: self.boundary.iter().map(|&v| f(v)).collect(),
        }
    }

    /// 两场逐元素映射
    pub fn zip_map(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        debug_assert_eq!(self.cells.len(), other.cells.len());
        let cells = self
            .cells
            .iter()
            .zip(&other.cells)
            .map(|(&a, &b)| f(a, b))
            .collect();
        let boundary = if self.boundary.len() == other.boundary.len() {
            self.boundary
                .iter()
                .zip(&other.boundary)
                .map(|(&a, &b)| f(a, b))
                .collect()
        } else {
            Vec::new()
        };
        Self { cells, boundary }
    }

    /// 三场逐元素映射
    pub fn zip_map3(&self, b: &Self, c: &Self, f: impl Fn(f64, f64, f64) -> f64) -> Self {
        debug_assert_eq!(self.cells.len(), b.cells.len());
        debug_assert_eq!(self.cells.len(), c.cells.len());
        let cells = self
            .cells
            .iter()
            .zip(&b.cells)
            .zip(&c.cells)
            .map(|((&x, &y), &z)| f(x, y, z))
            .collect();
        let boundary =
            if self.boundary.len() == b.boundary.len() && self.boundary.len() == c.boundary.len() {
                self.boundary
                    .iter()
                    .zip(&b.boundary)
                    .zip(&c.boundary)
                    .map(|((&x, &y), &z)| f(x, y, z))
                    .collect()
            } else {
                Vec::new()
            };
        Self { cells, boundary }
    }

    /// 逐元素幂
    pub fn powf(&self, exponent: f64) -> Self {
        self.map(|v| v.powf(exponent))
    }

    /// 标量缩放
    pub fn scale(&self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    /// 检查所有值是否有限
    pub fn is_finite(&self) -> bool {
        self.cells.iter().all(|v| v.is_finite()) && self.boundary.iter().all(|v| v.is_finite())
    }
}

impl std::ops::Add for &ScalarField {
    type Output = ScalarField;

    fn add(self, rhs: Self) -> ScalarField {
        self.zip_map(rhs, |a, b| a + b)
    }
}

impl std::ops::Sub for &ScalarField {
    type Output = ScalarField;

    fn sub(self, rhs: Self) -> ScalarField {
        self.zip_map(rhs, |a, b| a - b)
    }
}

impl std::ops::Mul for &ScalarField {
    type Output = ScalarField;

    fn mul(self, rhs: Self) -> ScalarField {
        self.zip_map(rhs, |a, b| a * b)
    }
}

impl std::ops::Div for &ScalarField {
    type Output = ScalarField;

    fn div(self, rhs: Self) -> ScalarField {
        self.zip_map(rhs, |a, b| a / b)
    }
}

impl std::ops::Mul<f64> for &ScalarField {
    type Output = ScalarField;

    fn mul(self, rhs: f64) -> ScalarField {
        self.scale(rhs)
    }
}

/// 面心质量通量场
///
/// 由外部流动求解器持有并更新，闭合模型只把它转交给
/// 外部对流算子，从不读取其内部结构。
#[derive(Debug, Clone, PartialEq)]
pub struct FaceFlux {
    values: Vec<f64>,
}

impl FaceFlux {
    /// 从面通量数组创建
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    /// 面数
    #[inline]
    pub fn n_faces(&self) -> usize {
        self.values.len()
    }

    /// 面通量切片
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}
