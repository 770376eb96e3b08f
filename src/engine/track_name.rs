// ==========================================
// 站台股道分配 - 股道名称解析
// ==========================================
// 职责: 自由格式股道名称 → (序号, 后缀, 规范化名称)
// 红线: 全函数,任何输入都不报错
// ==========================================

/// 罗马数字序号表 (I..XXV)
const ROMAN_ORDINALS: [(&str, u32); 25] = [
    ("I", 1),
    ("II", 2),
    ("III", 3),
    ("IV", 4),
    ("V", 5),
    ("VI", 6),
    ("VII", 7),
    ("VIII", 8),
    ("IX", 9),
    ("X", 10),
    ("XI", 11),
    ("XII", 12),
    ("XIII", 13),
    ("XIV", 14),
    ("XV", 15),
    ("XVI", 16),
    ("XVII", 17),
    ("XVIII", 18),
    ("XIX", 19),
    ("XX", 20),
    ("XXI", 21),
    ("XXII", 22),
    ("XXIII", 23),
    ("XXIV", 24),
    ("XXV", 25),
];

/// 孪生股道后缀
pub const TWIN_SUFFIX: &str = "BIS";

/// 全局不可分配股道(规范化名称)
pub const NON_ASSIGNABLE_TRACKS: &[&str] = &["SSE AMB."];

/// 解析后的股道名称
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedTrackName {
    pub ordinal: Option<u32>,
    pub suffix: String,
    pub normalized: String,
}

impl ParsedTrackName {
    pub fn is_twin(&self) -> bool {
        self.suffix == TWIN_SUFFIX
    }
}

/// 解析股道名称
///
/// # 规则
/// 1. 折叠空白 + 大写
/// 2. 首个词: 全数字 → 整数;否则查罗马数字表;都不匹配 → 无序号
/// 3. 第二个词(若有)原样作为后缀,其余词仅保留在规范化名称中
/// 4. 空输入 → (None, "", "")
pub fn parse_track_name(name: &str) -> ParsedTrackName {
    let upper = name.to_uppercase();
    let tokens: Vec<&str> = upper.split_whitespace().collect();

    let Some(first) = tokens.first() else {
        return ParsedTrackName::default();
    };

    ParsedTrackName {
        ordinal: parse_ordinal(first),
        suffix: tokens.get(1).map(|s| s.to_string()).unwrap_or_default(),
        normalized: tokens.join(" "),
    }
}

fn parse_ordinal(token: &str) -> Option<u32> {
    if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
        // 超出 u32 的数字串视为不可解析
        return token.parse::<u32>().ok();
    }
    ROMAN_ORDINALS
        .iter()
        .find(|(roman, _)| *roman == token)
        .map(|(_, value)| *value)
}

/// 是否为全局不可分配股道
pub fn is_non_assignable(normalized: &str) -> bool {
    NON_ASSIGNABLE_TRACKS.contains(&normalized)
}
