// ==========================================
// 站台股道分配 - 领域类型定义
// ==========================================
// 职责: 股道序号、邻近度、优先档位、站台剖面等值类型
// 红线: 不可解析的序号必须显式建模,禁止用浮点无穷混入比较
// ==========================================

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ==========================================
// 排序序号 (Sort Ordinal)
// ==========================================
// 数值序号在前,不可解析序号 (NonNumeric) 恒排最后
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrdinal {
    Numeric(u32),
    NonNumeric,
}

impl SortOrdinal {
    pub fn from_ordinal(ordinal: Option<u32>) -> Self {
        match ordinal {
            Some(value) => SortOrdinal::Numeric(value),
            None => SortOrdinal::NonNumeric,
        }
    }

    pub fn value(&self) -> Option<u32> {
        match self {
            SortOrdinal::Numeric(value) => Some(*value),
            SortOrdinal::NonNumeric => None,
        }
    }
}

impl fmt::Display for SortOrdinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrdinal::Numeric(value) => write!(f, "{}", value),
            SortOrdinal::NonNumeric => write!(f, "NON_NUMERIC"),
        }
    }
}

// ==========================================
// 邻近度 (Proximity)
// ==========================================
// Distance(1) 同时表示相邻股道与同号孪生股道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Proximity {
    Distance(u32),
    Incomparable,
}

impl PartialOrd for Proximity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Proximity {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Proximity::Distance(a), Proximity::Distance(b)) => a.cmp(b),
            (Proximity::Distance(_), Proximity::Incomparable) => Ordering::Less,
            (Proximity::Incomparable, Proximity::Distance(_)) => Ordering::Greater,
            (Proximity::Incomparable, Proximity::Incomparable) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Proximity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Proximity::Distance(d) => write!(f, "{}", d),
            Proximity::Incomparable => write!(f, "INCOMPARABLE"),
        }
    }
}

// ==========================================
// 优先档位 (Priority Tier)
// ==========================================
// 顺序: Preferred(0) < Secondary(1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriorityTier {
    Preferred, // 优先区间内
    Secondary, // 仅可用,不在优先区间
}

impl PriorityTier {
    pub fn rank(&self) -> u8 {
        match self {
            PriorityTier::Preferred => 0,
            PriorityTier::Secondary => 1,
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityTier::Preferred => write!(f, "PREFERRED"),
            PriorityTier::Secondary => write!(f, "SECONDARY"),
        }
    }
}

// ==========================================
// 站台剖面 (Platform Profile)
// ==========================================
// (是否有高站台, 是否有低站台)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PlatformProfile {
    pub high: bool,
    pub low: bool,
}

impl PlatformProfile {
    pub fn from_lengths(high_platform_m: u32, low_platform_m: u32) -> Self {
        Self {
            high: high_platform_m > 0,
            low: low_platform_m > 0,
        }
    }
}

impl fmt::Display for PlatformProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.high, self.low) {
            (true, true) => write!(f, "HIGH_LOW"),
            (true, false) => write!(f, "HIGH"),
            (false, true) => write!(f, "LOW"),
            (false, false) => write!(f, "NONE"),
        }
    }
}
