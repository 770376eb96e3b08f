// ==========================================
// 股道选择引擎 - 性质测试
// ==========================================
// 测试目标: 确定性、可行性、截断、列车长度单调性
// ==========================================


use admissible_tracks::config::{CategoryRuleConfig, PriorityConfig};
use admissible_tracks::domain::{Inventory, TrackRecord, TrainRequest};
use admissible_tracks::engine::{
    build_track_metadata, select_tracks, FeasibilityFilter, PlannedTrackResolver, MAX_ALTERNATIVES,
};
use proptest::prelude::*;
use std::collections::BTreeSet;
use test_helpers::{builtin_priority, builtin_rule, track_names};

const ROMAN: [&str; 25] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII", "XIV", "XV",
    "XVI", "XVII", "XVIII", "XIX", "XX", "XXI", "XXII", "XXIII", "XXIV", "XXV",
];

const FAMILIES: [&str; 5] = ["default", "INV", "PRM", "ES*", "LH"];

/// (序号, 是否 BIS, 站台长度, 功能容量)
fn track_strategy() -> impl Strategy<Value = (usize, bool, u32, u32)> {
    (0usize..25, any::<bool>(), 0u32..600, prop_oneof![Just(0u32), 0u32..600])
}

fn inventory_strategy() -> impl Strategy<Value = Inventory> {
    prop::collection::vec(track_strategy(), 1..24).prop_map(|tracks| {
        let mut inventory = Inventory::new();
        for (index, bis, length, capacity) in tracks {
            let name = if bis {
                format!("{} BIS", ROMAN[index])
            } else {
                ROMAN[index].to_string()
            };
            let mut record = TrackRecord::new(length);
            if capacity > 0 {
                record = record.with_functional_capacity(capacity);
            }
            inventory.insert(name, record);
        }
        inventory
    })
}

fn planned_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        (0usize..25).prop_map(|i| Some(ROMAN[i].to_string())),
        (0usize..25).prop_map(|i| Some(format!("{} BIS", ROMAN[i]))),
    ]
}

fn rule_for(family: usize, twin: bool) -> (CategoryRuleConfig, PriorityConfig) {
    let name = FAMILIES[family];
    let mut rule = builtin_rule(name);
    rule.allow_twin_suffix |= twin;
    let priority = if name == "INV" {
        builtin_priority("INV")
    } else {
        builtin_priority("default")
    };
    (rule, priority)
}

fn train(length: i64, planned: &Option<String>) -> TrainRequest {
    let train = TrainRequest::new("P-1", length, "REG");
    match planned {
        Some(p) => train.with_planned_track(p),
        None => train,
    }
}

/// 按过滤器直接求可行集合
fn feasible_set(
    inventory: &Inventory,
    rule: &CategoryRuleConfig,
    train_length_m: u32,
    planned: &Option<String>,
) -> BTreeSet<String> {
    let metadata = build_track_metadata(inventory).unwrap();
    let planned = PlannedTrackResolver::new(&metadata, inventory).resolve(planned.as_deref());
    let filter = FeasibilityFilter::new(rule, planned.as_ref());
    metadata
        .iter()
        .filter(|(name, meta)| {
            !filter.is_excluded(name, meta) && filter.meets_length(meta, train_length_m)
        })
        .map(|(name, _)| name.clone())
        .collect()
}

proptest! {
    #[test]
    fn prop_selection_is_deterministic(
        inventory in inventory_strategy(),
        length in 1i64..600,
        planned in planned_strategy(),
        family in 0usize..5,
        twin in any::<bool>(),
    ) {
        let (rule, priority) = rule_for(family, twin);
        let request = train(length, &planned);

        let first = select_tracks(&request, &inventory, Some(&rule), Some(&priority), "en").unwrap();
        let second = select_tracks(&request, &inventory, Some(&rule), Some(&priority), "en").unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_suggestions_are_feasible_and_bounded(
        inventory in inventory_strategy(),
        length in 1i64..600,
        planned in planned_strategy(),
        family in 0usize..5,
        twin in any::<bool>(),
    ) {
        let (rule, priority) = rule_for(family, twin);
        let request = train(length, &planned);

        let result = select_tracks(&request, &inventory, Some(&rule), Some(&priority), "en").unwrap();
        let feasible = feasible_set(&inventory, &rule, length as u32, &planned);
        let names = track_names(&result);

        prop_assert!(names.len() <= MAX_ALTERNATIVES);
        prop_assert_eq!(names.len(), feasible.len().min(MAX_ALTERNATIVES));

        let unique: BTreeSet<&String> = names.iter().collect();
        prop_assert_eq!(unique.len(), names.len());

        for name in &names {
            prop_assert!(feasible.contains(name), "{} 不在可行集合中", name);
            prop_assert!(planned.as_deref() != Some(name.as_str()));
        }
        for suggestion in &result {
            prop_assert!(!suggestion.reason.is_empty());
        }
    }

    #[test]
    fn prop_shorter_train_never_loses_options(
        inventory in inventory_strategy(),
        short in 1i64..600,
        extra in 0i64..300,
        planned in planned_strategy(),
        family in 0usize..5,
    ) {
        let (rule, priority) = rule_for(family, false);
        let long = short + extra;

        let short_result = select_tracks(&train(short, &planned), &inventory, Some(&rule), Some(&priority), "en").unwrap();
        let long_result = select_tracks(&train(long, &planned), &inventory, Some(&rule), Some(&priority), "en").unwrap();

        prop_assert!(short_result.len() >= long_result.len());

        let short_feasible = feasible_set(&inventory, &rule, short as u32, &planned);
        let long_feasible = feasible_set(&inventory, &rule, long as u32, &planned);
        prop_assert!(long_feasible.is_subset(&short_feasible));

        if short_result.len() < MAX_ALTERNATIVES {
            let short_names: BTreeSet<String> = track_names(&short_result).into_iter().collect();
            for name in track_names(&long_result) {
                prop_assert!(short_names.contains(&name));
            }
        }
    }
}
