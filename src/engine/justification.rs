// ==========================================
// 站台股道分配 - 说明生成
// ==========================================
// 职责: 由候选的评分数据生成自然语言说明
// 红线: 纯函数,不读写全局语言状态,不会失败
// ==========================================

use crate::config::category_rule::CategoryRuleConfig;
use crate::domain::candidate::CandidateRecord;
use crate::domain::types::{PriorityTier, Proximity};
use crate::engine::planned_track::PlannedTrack;
use crate::engine::track_name::TWIN_SUFFIX;
use crate::i18n::t_in;

pub struct JustificationGenerator<'a> {
    rule: &'a CategoryRuleConfig,
    planned: Option<&'a PlannedTrack>,
    train_length_m: u32,
    locale: &'a str,
}

impl<'a> JustificationGenerator<'a> {
    pub fn new(
        rule: &'a CategoryRuleConfig,
        planned: Option<&'a PlannedTrack>,
        train_length_m: u32,
        locale: &'a str,
    ) -> Self {
        Self {
            rule,
            planned,
            train_length_m,
            locale,
        }
    }

    /// 生成说明文字(各子句以空格连接)
    pub fn reason(&self, record: &CandidateRecord) -> String {
        self.clauses(record).join(" ")
    }

    /// 说明子句
    ///
    /// # 顺序
    /// 1. 站台长度 / 无站台许可(站台短于列车时不出现)
    /// 2. 功能容量(仅在容量足够时)
    /// 3. 孪生股道许可
    /// 4. 优先区间
    /// 5. 与计划股道的邻近度
    /// 6. 与计划股道的相似度
    /// 7. 高/低站台
    /// 8. 以上都没有时的通用子句
    pub fn clauses(&self, record: &CandidateRecord) -> Vec<String> {
        let mut parts = Vec::new();
        let train = self.train_length_m.to_string();

        if self.rule.allow_no_platform && record.platform_length == 0 {
            parts.push(self.t("justification.no_platform", &[]));
        } else if record.platform_length >= self.train_length_m {
            parts.push(self.t(
                "justification.platform_length",
                &[
                    ("platform", record.platform_length.to_string().as_str()),
                    ("train", train.as_str()),
                ],
            ));
        }

        if record.functional_capacity > 0 && record.functional_capacity >= self.train_length_m {
            parts.push(self.t(
                "justification.capacity",
                &[
                    ("capacity", record.functional_capacity.to_string().as_str()),
                    ("train", train.as_str()),
                ],
            ));
        }

        if self.rule.allow_twin_suffix && record.suffix == TWIN_SUFFIX {
            parts.push(self.t("justification.twin_allowed", &[("suffix", TWIN_SUFFIX)]));
        }

        if let Some((min, max)) = self.rule.preferred_band() {
            let key = match record.priority_tier {
                PriorityTier::Preferred => "justification.preferred_band",
                PriorityTier::Secondary => "justification.support_band",
            };
            let (min, max) = (min.to_string(), max.to_string());
            parts.push(self.t(key, &[("min", min.as_str()), ("max", max.as_str())]));
        }

        if let Some(clause) = self.proximity_clause(record) {
            parts.push(clause);
        }

        if record.similarity >= 2 {
            parts.push(self.t("justification.identical_platform", &[]));
        } else if record.similarity == 1 {
            parts.push(self.t("justification.coherent_profile", &[]));
        }

        match (record.profile.high, record.profile.low) {
            (true, false) => parts.push(self.t("justification.high_platform", &[])),
            (false, true) => parts.push(self.t("justification.low_platform", &[])),
            (true, true) => parts.push(self.t("justification.high_low_platform", &[])),
            (false, false) => {}
        }

        if parts.is_empty() {
            parts.push(self.t("justification.fallback", &[]));
        }
        parts
    }

    /// 仅在计划股道序号可解析时生成
    fn proximity_clause(&self, record: &CandidateRecord) -> Option<String> {
        let planned = self.planned.filter(|p| p.ordinal.is_some())?;

        if planned.is_twin_of(record.ordinal(), &record.suffix) {
            return Some(self.t("justification.twin_of_planned", &[]));
        }

        let clause = match record.proximity {
            Proximity::Distance(0) => self.t("justification.same_ordinal", &[]),
            Proximity::Distance(1) => self.t("justification.adjacent", &[]),
            Proximity::Distance(d) => {
                self.t("justification.distance", &[("distance", d.to_string().as_str())])
            }
            Proximity::Incomparable => self.t("justification.not_comparable", &[]),
        };
        Some(clause)
    }

    fn t(&self, key: &str, args: &[(&str, &str)]) -> String {
        t_in(self.locale, key, args)
    }
}
