// src/coeffs.rs

//! 模型系数
//!
//! Launder-Sharma k-ε + Yap 修正的系数配置与派生。
//!
//! # 默认系数
//!
//! | 参数 | 值 |
//! |----------|---------|
//! | Cmu      | 0.09    |
//! | C1       | 1.44    |
//! | C2       | 1.92    |
//! | C3       | -0.33   |
//! | alphah   | 1.0     |
//! | alphahk  | 1.0     |
//! | alphaEps | 0.76923 |
//! | Cyap     | 0.83    |
//! | kappa    | 0.41    |
//! | nut_max  | 1e3     |
//!
//! `alphahk`/`alphaEps` 为逆 Prandtl 数约定：σ_k = 1/alphahk，
//! σ_ε = 1/alphaEps（默认 σ_ε = 1.3）。`alphah` 仅影响可压缩
//! 求解器的焓方程扩散，此处只做取值校验并原样保留。
//!
//! 无效的配置项（非正的正定系数等）按文档默认值回退，
//! 记录警告而不报错。

use serde::{Deserialize, Serialize};

fn default_cmu() -> f64 {
    0.09
}
fn default_c1() -> f64 {
    1.44
}
fn default_c2() -> f64 {
    1.92
}
fn default_c3() -> f64 {
    -0.33
}
fn default_alphah() -> f64 {
    1.0
}
fn default_alphahk() -> f64 {
    1.0
}
fn default_alpha_eps() -> f64 {
    0.76923
}
fn default_cyap() -> f64 {
    0.83
}
fn default_kappa() -> f64 {
    0.41
}
fn default_k_min() -> f64 {
    1e-10
}
fn default_eps_min() -> f64 {
    1e-14
}
fn default_nut_max() -> f64 {
    1e3
}

/// 闭合模型配置（用户可见条目）
///
/// 缺失条目取文档默认值；每个条目可单独覆盖。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosureConfig {
    /// 涡粘系数 Cμ
    #[serde(default = "default_cmu")]
    pub cmu: f64,
    /// ε 方程产生项系数 C1
    #[serde(default = "default_c1")]
    pub c1: f64,
    /// ε 方程耗散项系数 C2
    #[serde(default = "default_c2")]
    pub c2: f64,
    /// 可压缩膨胀项系数 C3（随流态可为负）
    #[serde(default = "default_c3")]
    pub c3: f64,
    /// 焓方程逆 Prandtl 数（仅可压缩求解器使用）
    #[serde(default = "default_alphah")]
    pub alphah: f64,
    /// k 方程逆 Prandtl 数，σ_k = 1/alphahk
    #[serde(default = "default_alphahk")]
    pub alphahk: f64,
    /// ε 方程逆 Prandtl 数，σ_ε = 1/alphaEps
    #[serde(default = "default_alpha_eps", rename = "alphaEps")]
    pub alpha_eps: f64,
    /// Yap 修正系数
    #[serde(default = "default_cyap")]
    pub cyap: f64,
    /// von Kármán 常数
    #[serde(default = "default_kappa")]
    pub kappa: f64,
    /// k 的正下界
    #[serde(default = "default_k_min")]
    pub k_min: f64,
    /// ε 的正下界
    #[serde(default = "default_eps_min")]
    pub eps_min: f64,
    /// 涡粘上界 [m²/s]
    #[serde(default = "default_nut_max")]
    pub nut_max: f64,
}

impl Default for ClosureConfig {
    fn default() -> Self {
        Self {
            cmu: default_cmu(),
            c1: default_c1(),
            c2: default_c2(),
            c3: default_c3(),
            alphah: default_alphah(),
            alphahk: default_alphahk(),
            alpha_eps: default_alpha_eps(),
            cyap: default_cyap(),
            kappa: default_kappa(),
            k_min: default_k_min(),
            eps_min: default_eps_min(),
            nut_max: default_nut_max(),
        }
    }
}

/// 派生后的有效模型系数
///
/// 每个校正循环内不可变；仅由 [`ModelCoeffs::from_config`]
/// 整体替换。除 `c3` 外均严格为正。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelCoeffs {
    /// 涡粘系数 Cμ
    pub cmu: f64,
    /// ε 方程产生项系数
    pub c1: f64,
    /// ε 方程耗散项系数
    pub c2: f64,
    /// 膨胀项系数（可为负）
    pub c3: f64,
    /// k 方程扩散 Prandtl 数
    pub sigma_k: f64,
    /// ε 方程扩散 Prandtl 数
    pub sigma_eps: f64,
    /// Yap 修正系数
    pub cyap: f64,
    /// von Kármán 常数
    pub kappa: f64,
    /// 焓方程逆 Prandtl 数（原样保留）
    pub alphah: f64,
    /// k 的正下界
    pub k_min: f64,
    /// ε 的正下界
    pub eps_min: f64,
    /// 涡粘上界
    pub nut_max: f64,
}

/// 校验单个正定系数，无效时回退默认值
fn positive_or_default(name: &'static str, value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        log::warn!("系数 {} = {} 无效（需严格为正），回退默认值 {}", name, value, default);
        default
    }
}

impl ModelCoeffs {
    /// 从配置派生有效系数
    ///
    /// 逐项校验：除 `c3` 外所有系数须严格为正，无效项回退
    /// 默认值并记录警告。σ_k、σ_ε 由逆 Prandtl 数取倒数得到。
    pub fn from_config(config: &ClosureConfig) -> Self {
        let c3 = if config.c3.is_finite() {
            config.c3
        } else {
            log::warn!("系数 c3 = {} 无效，回退默认值 {}", config.c3, default_c3());
            default_c3()
        };

        let alphahk = positive_or_default("alphahk", config.alphahk, default_alphahk());
        let alpha_eps = positive_or_default("alphaEps", config.alpha_eps, default_alpha_eps());

        Self {
            cmu: positive_or_default("cmu", config.cmu, default_cmu()),
            c1: positive_or_default("c1", config.c1, default_c1()),
            c2: positive_or_default("c2", config.c2, default_c2()),
            c3,
            sigma_k: 1.0 / alphahk,
            sigma_eps: 1.0 / alpha_eps,
            cyap: positive_or_default("cyap", config.cyap, default_cyap()),
            kappa: positive_or_default("kappa", config.kappa, default_kappa()),
            alphah: positive_or_default("alphah", config.alphah, default_alphah()),
            k_min: positive_or_default("k_min", config.k_min, default_k_min()),
            eps_min: positive_or_default("eps_min", config.eps_min, default_eps_min()),
            nut_max: positive_or_default("nut_max", config.nut_max, default_nut_max()),
        }
    }
}

impl Default for ModelCoeffs {
    fn default() -> Self {
        Self::from_config(&ClosureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClosureConfig::default();
        assert!((config.cmu - 0.09).abs() < 1e-12);
        assert!((config.c1 - 1.44).abs() < 1e-12);
        assert!((config.c2 - 1.92).abs() < 1e-12);
        assert!((config.c3 + 0.33).abs() < 1e-12);
        assert!((config.alpha_eps - 0.76923).abs() < 1e-12);
        assert!((config.cyap - 0.83).abs() < 1e-12);
        assert!((config.kappa - 0.41).abs() < 1e-12);
        assert!((config.nut_max - 1e3).abs() < 1e-9);
    }

    #[test]
    fn test_sigma_derivation() {
        let coeffs = ModelCoeffs::default();
        // σ_k = 1/1.0，σ_ε = 1/0.76923 ≈ 1.3
        assert!((coeffs.sigma_k - 1.0).abs() < 1e-12);
        assert!((coeffs.sigma_eps - 1.3).abs() < 1e-4);
    }

    #[test]
    fn test_invalid_entry_falls_back() {
        let config = ClosureConfig {
            c1: -1.0,
            ..Default::default()
        };
        let coeffs = ModelCoeffs::from_config(&config);
        assert!((coeffs.c1 - 1.44).abs() < 1e-12);
    }

    #[test]
    fn test_c3_may_be_negative_or_zero() {
        let config = ClosureConfig {
            c3: 0.0,
            ..Default::default()
        };
        let coeffs = ModelCoeffs::from_config(&config);
        assert_eq!(coeffs.c3, 0.0);

        let config = ClosureConfig {
            c3: -0.5,
            ..Default::default()
        };
        let coeffs = ModelCoeffs::from_config(&config);
        assert_eq!(coeffs.c3, -0.5);
    }

    #[test]
    fn test_missing_entries_take_defaults() {
        // 空 JSON：全部条目取默认值
        let config: ClosureConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClosureConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config: ClosureConfig = serde_json::from_str(r#"{"cmu": 0.0845, "c2": 1.68}"#).unwrap();
        assert!((config.cmu - 0.0845).abs() < 1e-12);
        assert!((config.c2 - 1.68).abs() < 1e-12);
        assert!((config.c1 - 1.44).abs() < 1e-12);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = ClosureConfig {
            cyap: 1.66,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ClosureConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
