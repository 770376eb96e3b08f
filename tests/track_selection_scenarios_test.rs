// ==========================================
// 股道选择引擎 - 场景测试
// ==========================================
// 测试目标: 孪生股道许可、优先区间、无站台类别、自排除、截断
// ==========================================


use admissible_tracks::config::{CategoryRuleConfig, CriterionKey, PriorityConfig};
use admissible_tracks::domain::{TrackRecord, TrainRequest};
use admissible_tracks::engine::{select_tracks, EngineError, MAX_ALTERNATIVES};
use test_helpers::{
    builtin_priority, builtin_rule, run, track_names, twin_allowed_rule, InventoryBuilder,
};

#[test]
fn test_twin_excluded_when_category_disallows_suffix() {
    let inventory = InventoryBuilder::new()
        .track("V", 300)
        .track("V BIS", 280)
        .build();
    let train = TrainRequest::new("2231", 250, "REG").with_planned_track("V");

    let result = run(&train, &inventory, &CategoryRuleConfig::default());

    assert!(!track_names(&result).contains(&"V BIS".to_string()));
    // V 为计划股道自身
    assert!(result.is_empty());
}

#[test]
fn test_twin_admitted_when_category_allows_suffix() {
    let inventory = InventoryBuilder::new()
        .track("V", 300)
        .track("V BIS", 280)
        .build();
    let train = TrainRequest::new("2231", 250, "REG").with_planned_track("V");

    let result = run(&train, &inventory, &twin_allowed_rule());

    assert_eq!(track_names(&result), vec!["V BIS"]);
    let reason = &result[0].reason;
    assert!(reason.contains("Twin (BIS) track admitted by the category rules."));
    assert!(reason.contains("Same ordinal as planned, different suffix."));
    assert!(reason.starts_with("Platform of 280 m >= train length 250 m."));
}

#[test]
fn test_priority_tier_dominates_proximity() {
    let inventory = InventoryBuilder::new().track("I", 300).track("V", 300).build();
    let train = TrainRequest::new("9501", 250, "IC").with_planned_track("I NORD");

    let result = run(&train, &inventory, &builtin_rule("LH"));

    assert_eq!(track_names(&result), vec!["V", "I"]);
    assert!(result[0]
        .reason
        .contains("Track inside the preferred band (2-13)."));
    assert!(result[1]
        .reason
        .contains("Support track outside the preferred band (2-13)."));
}

#[test]
fn test_platform_less_track_admitted_for_capacity_category() {
    let inventory = InventoryBuilder::new()
        .track("XX", 0)
        .track("II", 80)
        .build();
    let train = TrainRequest::new("INV-7", 100, "INV");

    let rule = builtin_rule("INV");
    let priority = builtin_priority("INV");
    let result = select_tracks(&train, &inventory, Some(&rule), Some(&priority), "en").unwrap();

    // II 站台 80 m 不足 100 m
    assert_eq!(track_names(&result), vec!["XX"]);
    assert!(result[0]
        .reason
        .contains("No platform available, permitted for this category."));
}

#[test]
fn test_platform_less_track_rejected_when_platform_required() {
    let inventory = InventoryBuilder::new().track("XX", 0).track("II", 300).build();
    let train = TrainRequest::new("R-1", 100, "REG");

    let result = run(&train, &inventory, &CategoryRuleConfig::default());
    assert_eq!(track_names(&result), vec!["II"]);
}

#[test]
fn test_functional_capacity_governs_platform_less_category() {
    let inventory = InventoryBuilder::new()
        .record("IV", TrackRecord::new(120).with_functional_capacity(450))
        .record("VI", TrackRecord::new(500).with_functional_capacity(200))
        .build();
    let train = TrainRequest::new("INV-8", 400, "INV");

    let result = run(&train, &inventory, &builtin_rule("INV"));

    assert_eq!(track_names(&result), vec!["IV"]);
    assert!(result[0]
        .reason
        .contains("Functional capacity of 450 m sufficient for the 400 m train."));
}

#[test]
fn test_capacity_governed_reason_makes_no_platform_claim() {
    let inventory = InventoryBuilder::new()
        .record("IV", TrackRecord::new(120).with_functional_capacity(450))
        .build();
    let train = TrainRequest::new("INV-9", 400, "INV");

    let result = run(&train, &inventory, &builtin_rule("INV"));

    assert_eq!(track_names(&result), vec!["IV"]);
    assert_eq!(
        result[0].reason,
        "Functional capacity of 450 m sufficient for the 400 m train."
    );
    assert!(!result[0].reason.contains("Platform of 120 m"));
}

#[test]
fn test_planned_track_never_suggested() {
    let inventory = InventoryBuilder::new().numbered(6, 300).build();
    for planned in ["III", "3", " iii "] {
        let train = TrainRequest::new("R-2", 200, "REG").with_planned_track(planned);
        let result = run(&train, &inventory, &CategoryRuleConfig::default());
        assert!(!track_names(&result).contains(&"III".to_string()));
        assert_eq!(result.len(), 5);
    }
}

#[test]
fn test_closest_tracks_follow_planned_track() {
    let inventory = InventoryBuilder::new().numbered(10, 300).build();
    let train = TrainRequest::new("R-3", 200, "REG").with_planned_track("VI");

    let result = run(&train, &inventory, &CategoryRuleConfig::default());

    // 距离 1: V, VII;距离 2: IV, VIII;同距离按序号
    assert_eq!(
        track_names(&result)[..4],
        ["V", "VII", "IV", "VIII"].map(String::from)
    );
    assert!(result[0].reason.contains("Adjacent to the planned track."));
    assert!(result[2]
        .reason
        .contains("2 ordinals away from the planned track."));
}

#[test]
fn test_twin_ranks_ahead_of_farther_candidate() {
    let inventory = InventoryBuilder::new()
        .track("V", 300)
        .track("V BIS", 280)
        .track("VII", 280)
        .build();
    let train = TrainRequest::new("R-4", 250, "REG").with_planned_track("V");

    let result = run(&train, &inventory, &twin_allowed_rule());
    assert_eq!(track_names(&result), vec!["V BIS", "VII"]);
}

#[test]
fn test_same_number_bonus_beats_lower_ordinal() {
    let inventory = InventoryBuilder::new()
        .track("IV", 300)
        .track("V", 300)
        .track("V BIS", 300)
        .build();
    let train = TrainRequest::new("R-5", 250, "REG").with_planned_track("V");
    let priority = PriorityConfig::new(&[CriterionKey::SameNumber, CriterionKey::TrackNumber], -1.0);

    let rule = twin_allowed_rule();
    let result = select_tracks(&train, &inventory, Some(&rule), Some(&priority), "en").unwrap();
    assert_eq!(track_names(&result), vec!["V BIS", "IV"]);

    // 奖励为 0 时退化为按序号
    let priority = PriorityConfig::new(&[CriterionKey::SameNumber, CriterionKey::TrackNumber], 0.0);
    let result = select_tracks(&train, &inventory, Some(&rule), Some(&priority), "en").unwrap();
    assert_eq!(track_names(&result), vec!["IV", "V BIS"]);
}

#[test]
fn test_output_truncated_to_shortlist() {
    let inventory = InventoryBuilder::new().numbered(20, 300).build();
    let train = TrainRequest::new("R-6", 100, "REG");

    let result = run(&train, &inventory, &CategoryRuleConfig::default());

    assert_eq!(result.len(), MAX_ALTERNATIVES);
    assert_eq!(
        track_names(&result),
        ["I", "II", "III", "IV", "V", "VI", "VII"].map(String::from)
    );
}

#[test]
fn test_non_numeric_tracks_sort_last_and_service_track_excluded() {
    let inventory = InventoryBuilder::new()
        .track("DEPOSITO", 300)
        .track("SSE AMB.", 400)
        .track("XII", 300)
        .track("II", 300)
        .build();
    let train = TrainRequest::new("R-7", 100, "REG");

    let result = run(&train, &inventory, &CategoryRuleConfig::default());
    assert_eq!(track_names(&result), vec!["II", "XII", "DEPOSITO"]);
}

#[test]
fn test_long_haul_band_excludes_high_ordinals() {
    let inventory = InventoryBuilder::new().numbered(16, 400).build();
    let train = TrainRequest::new("FR-9", 350, "FR");
    let rule = builtin_rule("LH");

    let result = run(&train, &inventory, &rule);
    let names = track_names(&result);

    assert!(!names.contains(&"XV".to_string()));
    assert!(!names.contains(&"XVI".to_string()));
    // 优先区间 2-13 在前,I 与 XIV 为备选
    assert_eq!(names[0], "II");
    assert_eq!(names.len(), MAX_ALTERNATIVES);
}

#[test]
fn test_invalid_records_dropped_not_zeroed() {
    let inventory = InventoryBuilder::new()
        .record("I", TrackRecord::default())
        .track("II", 300)
        .build();
    let rule = CategoryRuleConfig {
        allow_no_platform: true,
        ..CategoryRuleConfig::default()
    };
    let train = TrainRequest::new("R-8", 100, "REG");

    // 若 I 被补 0,会作为无站台股道通过
    let result = run(&train, &inventory, &rule);
    assert_eq!(track_names(&result), vec!["II"]);
}

#[test]
fn test_empty_inventory_is_configuration_error() {
    let inventory = InventoryBuilder::new()
        .record("I", TrackRecord::default())
        .build();
    let train = TrainRequest::new("R-9", 100, "REG");
    let rule = CategoryRuleConfig::default();
    let priority = PriorityConfig::default();

    let err = select_tracks(&train, &inventory, Some(&rule), Some(&priority), "en").unwrap_err();
    assert!(matches!(err, EngineError::Configuration(_)));
}

#[test]
fn test_repeated_invocations_identical() {
    let inventory = InventoryBuilder::new()
        .numbered(12, 300)
        .track("III BIS", 300)
        .track("DEPOSITO", 250)
        .build();
    let train = TrainRequest::new("R-10", 200, "REG").with_planned_track("III");
    let rule = twin_allowed_rule();

    let first = run(&train, &inventory, &rule);
    for _ in 0..5 {
        assert_eq!(run(&train, &inventory, &rule), first);
    }
}

#[test]
fn test_italian_justification() {
    let inventory = InventoryBuilder::new().track("V", 300).track("VI", 300).build();
    let train = TrainRequest::new("R-11", 250, "REG").with_planned_track("V");
    let rule = CategoryRuleConfig::default();
    let priority = PriorityConfig::default();

    let result = select_tracks(&train, &inventory, Some(&rule), Some(&priority), "it").unwrap();
    assert_eq!(
        result[0].reason,
        "Marciapiede da 300 m >= lunghezza treno 250 m. \
         Adiacente al binario previsto. \
         Marciapiede identico al previsto."
    );
}
