// ==========================================
// 站台股道分配 - 加权字典序排序
// ==========================================
// 职责: 按类别排序配置为候选生成排序键并全排序
// 规则: 排序键 = 各准则 (值 × 权重 × 方向) 按声明顺序组成的元组,升序比较
// 红线: 相同输入必须得到相同顺序;全部准则相等时按规范化名称决胜
// ==========================================

use crate::config::priority_config::{CriterionKey, PriorityConfig, PriorityCriterion};
use crate::domain::candidate::CandidateRecord;
use crate::domain::types::{Proximity, SortOrdinal};
use crate::engine::track_name::TWIN_SUFFIX;
use std::cmp::Ordering;

// ==========================================
// SortValue - 排序键分量
// ==========================================
// 不可比较的邻近度与不可解析的序号取 +∞,乘以负系数后翻转为 -∞
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue {
    NegInfinite,
    Finite(f64),
    PosInfinite,
}

impl SortValue {
    /// 由浮点构造: ±inf 映射为无穷分量,NaN 与 -0.0 统一为 0.0
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() || value == 0.0 {
            SortValue::Finite(0.0)
        } else if value == f64::INFINITY {
            SortValue::PosInfinite
        } else if value == f64::NEG_INFINITY {
            SortValue::NegInfinite
        } else {
            SortValue::Finite(value)
        }
    }

    /// 乘以权重×方向系数;无穷 × 0 取 0
    pub fn scale(self, factor: f64) -> Self {
        match self {
            SortValue::Finite(v) => SortValue::from_f64(v * factor),
            _ if factor == 0.0 || factor.is_nan() => SortValue::Finite(0.0),
            SortValue::PosInfinite if factor > 0.0 => SortValue::PosInfinite,
            SortValue::PosInfinite => SortValue::NegInfinite,
            SortValue::NegInfinite if factor > 0.0 => SortValue::NegInfinite,
            SortValue::NegInfinite => SortValue::PosInfinite,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::NegInfinite => 0,
            SortValue::Finite(_) => 1,
            SortValue::PosInfinite => 2,
        }
    }
}

impl Eq for SortValue {}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Finite(a), SortValue::Finite(b)) => a.total_cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// 单条准则的原始值(未加权)
///
/// 相似度取负值(越相似越靠前);未知准则恒为 0
pub fn criterion_value(key: CriterionKey, record: &CandidateRecord) -> SortValue {
    match key {
        CriterionKey::PriorityClass => SortValue::from_f64(record.priority_tier.rank() as f64),
        CriterionKey::Proximity => match record.proximity {
            Proximity::Distance(d) => SortValue::from_f64(d as f64),
            Proximity::Incomparable => SortValue::PosInfinite,
        },
        CriterionKey::Similarity => SortValue::from_f64(-(record.similarity as f64)),
        CriterionKey::SameNumber => SortValue::from_f64(record.same_number_bonus),
        CriterionKey::LengthDelta => SortValue::from_f64(record.length_delta as f64),
        CriterionKey::TrackNumber => match record.sort_ordinal {
            SortOrdinal::Numeric(n) => SortValue::from_f64(n as f64),
            SortOrdinal::NonNumeric => SortValue::PosInfinite,
        },
        CriterionKey::SuffixFlag => flag(record.has_suffix()),
        CriterionKey::NoPlatformFirst => flag(record.platform_length != 0),
        CriterionKey::BisPreference => flag(record.suffix != TWIN_SUFFIX),
        CriterionKey::Unknown => SortValue::Finite(0.0),
    }
}

fn flag(value: bool) -> SortValue {
    SortValue::Finite(if value { 1.0 } else { 0.0 })
}

// ==========================================
// Ranker
// ==========================================
pub struct Ranker {
    criteria: Vec<PriorityCriterion>,
}

impl Ranker {
    pub fn new(priority: &PriorityConfig) -> Self {
        Self {
            criteria: priority.effective_criteria(),
        }
    }

    /// 候选的排序键
    pub fn sort_key(&self, record: &CandidateRecord) -> Vec<SortValue> {
        self.criteria
            .iter()
            .map(|c| criterion_value(c.key, record).scale(c.factor()))
            .collect()
    }

    /// 全排序(升序,稳定)
    pub fn rank(&self, candidates: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
        let mut keyed: Vec<(Vec<SortValue>, CandidateRecord)> = candidates
            .into_iter()
            .map(|record| (self.sort_key(&record), record))
            .collect();

        keyed.sort_by(|(key_a, a), (key_b, b)| {
            key_a.cmp(key_b).then_with(|| a.name.cmp(&b.name))
        });

        keyed.into_iter().map(|(_, record)| record).collect()
    }
}
