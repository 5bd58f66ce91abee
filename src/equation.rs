// src/equation.rs

//! 标量输运方程的组装容器
//!
//! 单个标量场的隐式矩阵 + 显式源。闭合模型与外部求解器
//! 之间的契约是求解前的加性组合：
//!
//! - 外部离散算子（时间导数、对流、扩散）写入对角、
//!   非对角与源项
//! - 闭合模型追加隐式汇（`add_sp`，未知量上的系数）与
//!   显式源（`add_su`，右端已知值）
//!
//! 量级较大的耗散汇必须走隐式路径：显式处理在实际时间
//! 步长下无条件不稳定。
//!
//! # 符号约定
//!
//! 方程形式为 `A·x = b`。右端项 `−c·x` 移项后为
//! `diag += c`（OpenFOAM 的 fvm::Sp 约定）；右端已知源
//! 直接累加到 `source`。

use crate::field::ScalarField;

/// 非对角矩阵元（由外部离散算子贡献）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixEntry {
    /// 行（单元索引）
    pub row: usize,
    /// 列（相邻单元索引）
    pub col: usize,
    /// 系数
    pub coeff: f64,
}

/// 单标量场的已组装方程
#[derive(Debug, Clone)]
pub struct ScalarEquation {
    n_cells: usize,
    /// 未知量对角系数
    diag: Vec<f64>,
    /// 显式右端源
    source: Vec<f64>,
    /// 非对角系数（三元组形式，交由外部求解器消费）
    off_diag: Vec<MatrixEntry>,
}

impl ScalarEquation {
    /// 创建空方程
    pub fn new(n_cells: usize) -> Self {
        Self {
            n_cells,
            diag: vec![0.0; n_cells],
            source: vec![0.0; n_cells],
            off_diag: Vec::new(),
        }
    }

    /// 单元数
    #[inline]
    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    /// 追加隐式汇：右端 `−coeff·x` 移项到对角
    ///
    /// `coeff` 须逐单元非负才构成汇；调用方负责符号。
    pub fn add_sp(&mut self, coeff: &ScalarField) {
        debug_assert_eq!(coeff.n_cells(), self.n_cells);
        for (d, &c) in self.diag.iter_mut().zip(coeff.cells()) {
            debug_assert!(c.is_finite());
            *d += c;
        }
    }

    /// 追加显式源：右端已知值
    pub fn add_su(&mut self, source: &ScalarField) {
        debug_assert_eq!(source.n_cells(), self.n_cells);
        for (s, &v) in self.source.iter_mut().zip(source.cells()) {
            debug_assert!(v.is_finite());
            *s += v;
        }
    }

    /// 单元级对角累加（供外部离散算子使用）
    #[inline]
    pub fn add_diag_at(&mut self, cell: usize, coeff: f64) {
        self.diag[cell] += coeff;
    }

    /// 单元级源累加（供外部离散算子使用）
    #[inline]
    pub fn add_source_at(&mut self, cell: usize, value: f64) {
        self.source[cell] += value;
    }

    /// 追加非对角系数（供外部离散算子使用）
    pub fn add_off_diag(&mut self, row: usize, col: usize, coeff: f64) {
        debug_assert!(row < self.n_cells && col < self.n_cells);
        self.off_diag.push(MatrixEntry { row, col, coeff });
    }

    /// 对角系数
    #[inline]
    pub fn diag(&self) -> &[f64] {
        &self.diag
    }

    /// 显式源
    #[inline]
    pub fn source(&self) -> &[f64] {
        &self.source
    }

    /// 非对角系数
    #[inline]
    pub fn off_diag(&self) -> &[MatrixEntry] {
        &self.off_diag
    }
}

/// 外部求解状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// 收敛
    Converged,
    /// 达到最大迭代次数
    MaxIterationsReached,
    /// 发散
    Diverged,
}

/// 外部求解报告
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// 求解状态
    pub status: SolveStatus,
    /// 迭代次数
    pub iterations: usize,
    /// 最终残差范数
    pub residual: f64,
    /// 初始残差范数
    pub initial_residual: f64,
}

/// 外部求解失败
#[derive(Debug, Clone, thiserror::Error)]
pub enum SolveError {
    /// 求解发散
    #[error("线性求解发散: 场 {field}, 残差 {residual:.3e}")]
    Diverged {
        /// 场名
        field: &'static str,
        /// 发散时的残差
        residual: f64,
    },

    /// 迭代未收敛
    #[error("线性求解未收敛: 场 {field}, {iterations} 次迭代后残差 {residual:.3e}")]
    NotConverged {
        /// 场名
        field: &'static str,
        /// 已用迭代次数
        iterations: usize,
        /// 最终残差
        residual: f64,
    },

    /// 外部协作方报告的其他错误
    #[error("外部求解器错误: {0}")]
    External(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_equation() {
        let eqn = ScalarEquation::new(4);
        assert_eq!(eqn.n_cells(), 4);
        assert!(eqn.diag().iter().all(|&d| d == 0.0));
        assert!(eqn.source().iter().all(|&s| s == 0.0));
        assert!(eqn.off_diag().is_empty());
    }

    #[test]
    fn test_add_sp_accumulates_diag() {
        let mut eqn = ScalarEquation::new(3);
        let c = ScalarField::from_cells(vec![1.0, 2.0, 3.0]);
        eqn.add_sp(&c);
        eqn.add_sp(&c);
        assert_eq!(eqn.diag(), &[2.0, 4.0, 6.0]);
        // 隐式汇不触碰源项
        assert!(eqn.source().iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_add_su_accumulates_source() {
        let mut eqn = ScalarEquation::new(3);
        let s = ScalarField::from_cells(vec![0.5, -0.5, 1.0]);
        eqn.add_su(&s);
        eqn.add_su(&s);
        assert_eq!(eqn.source(), &[1.0, -1.0, 2.0]);
        assert!(eqn.diag().iter().all(|&d| d == 0.0));
    }

    #[test]
    fn test_cellwise_composition() {
        let mut eqn = ScalarEquation::new(2);
        eqn.add_diag_at(0, 10.0);
        eqn.add_source_at(0, 5.0);
        eqn.add_off_diag(0, 1, -1.0);

        assert_eq!(eqn.diag()[0], 10.0);
        assert_eq!(eqn.source()[0], 5.0);
        assert_eq!(
            eqn.off_diag()[0],
            MatrixEntry {
                row: 0,
                col: 1,
                coeff: -1.0
            }
        );
    }

    #[test]
    fn test_solve_error_display() {
        let err = SolveError::Diverged {
            field: "epsilon",
            residual: 1.5e3,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("epsilon"));
        assert!(msg.contains("发散"));
    }
}
