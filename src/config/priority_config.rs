// ==========================================
// 站台股道分配 - 类别排序配置
// ==========================================
// 职责: 每个类别的加权排序准则列表与同号奖励
// 红线: 准则键为封闭枚举,未知键显式落入 Unknown(贡献 0,不报错)
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ==========================================
// CriterionKey - 排序准则
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKey {
    PriorityClass,   // 优先档位
    Proximity,       // 与计划股道的序号距离
    Similarity,      // 与计划股道的站台相似度(越高越优先)
    SameNumber,      // 同号孪生奖励
    LengthDelta,     // 站台长度差
    TrackNumber,     // 序号
    SuffixFlag,      // 是否带后缀
    NoPlatformFirst, // 无站台股道优先
    BisPreference,   // 孪生 (BIS) 股道优先
    #[serde(other)]
    Unknown,
}

impl fmt::Display for CriterionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CriterionKey::PriorityClass => "priority_class",
            CriterionKey::Proximity => "proximity",
            CriterionKey::Similarity => "similarity",
            CriterionKey::SameNumber => "same_number",
            CriterionKey::LengthDelta => "length_delta",
            CriterionKey::TrackNumber => "track_number",
            CriterionKey::SuffixFlag => "suffix_flag",
            CriterionKey::NoPlatformFirst => "no_platform_first",
            CriterionKey::BisPreference => "bis_preference",
            CriterionKey::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

// ==========================================
// Direction - 排序方向
// ==========================================
// JSON 中为带符号数值: >0 升序, <0 降序, 0 非法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Ascending => 1.0,
            Direction::Descending => -1.0,
        }
    }
}

impl TryFrom<f64> for Direction {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value > 0.0 {
            Ok(Direction::Ascending)
        } else if value < 0.0 {
            Ok(Direction::Descending)
        } else {
            Err(format!("direction must be +1 or -1, got {}", value))
        }
    }
}

impl From<Direction> for f64 {
    fn from(direction: Direction) -> Self {
        direction.sign()
    }
}

// ==========================================
// PriorityCriterion / PriorityConfig
// ==========================================

fn default_weight() -> f64 {
    1.0
}

fn default_same_number_bonus() -> f64 {
    -1.0
}

/// 单条加权准则
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityCriterion {
    pub key: CriterionKey,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub direction: Direction,
}

impl PriorityCriterion {
    pub fn new(key: CriterionKey) -> Self {
        Self {
            key,
            weight: 1.0,
            direction: Direction::Ascending,
        }
    }

    pub fn weighted(key: CriterionKey, weight: f64, direction: Direction) -> Self {
        Self {
            key,
            weight,
            direction,
        }
    }

    /// 值 × 权重 × 方向 的系数部分
    pub fn factor(&self) -> f64 {
        self.weight * self.direction.sign()
    }
}

/// 类别排序配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityConfig {
    #[serde(default)]
    pub criteria: Vec<PriorityCriterion>,

    /// 同号孪生奖励(负值使其排前)
    #[serde(default = "default_same_number_bonus")]
    pub same_number_bonus: f64,
}

impl Default for PriorityConfig {
    fn default() -> Self {
        Self {
            criteria: Vec::new(),
            same_number_bonus: default_same_number_bonus(),
        }
    }
}

impl PriorityConfig {
    pub fn new(keys: &[CriterionKey], same_number_bonus: f64) -> Self {
        Self {
            criteria: keys.iter().copied().map(PriorityCriterion::new).collect(),
            same_number_bonus,
        }
    }

    /// 实际生效的准则: 空列表退化为仅按序号排序
    pub fn effective_criteria(&self) -> Vec<PriorityCriterion> {
        if self.criteria.is_empty() {
            vec![PriorityCriterion::new(CriterionKey::TrackNumber)]
        } else {
            self.criteria.clone()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.same_number_bonus.is_finite() {
            return Err(format!(
                "same_number_bonus must be finite, got {}",
                self.same_number_bonus
            ));
        }
        for criterion in &self.criteria {
            if !criterion.weight.is_finite() {
                return Err(format!(
                    "weight of criterion '{}' must be finite, got {}",
                    criterion.key, criterion.weight
                ));
            }
        }
        Ok(())
    }

    // ==========================================
    // 内置默认排序
    // ==========================================

    /// 内置排序表: default / INV
    pub fn builtin_defaults() -> BTreeMap<String, PriorityConfig> {
        use CriterionKey::*;

        let standard = [
            PriorityClass,
            Proximity,
            Similarity,
            SameNumber,
            LengthDelta,
            TrackNumber,
            SuffixFlag,
        ];

        let mut inv = vec![NoPlatformFirst, BisPreference];
        inv.extend_from_slice(&standard);

        let mut configs = BTreeMap::new();
        configs.insert("default".to_string(), PriorityConfig::new(&standard, -1.0));
        configs.insert("INV".to_string(), PriorityConfig::new(&inv, -1.0));
        configs
    }
}
