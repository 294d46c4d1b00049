//! Tests for roster-model types.

use std::collections::BTreeMap;

use roster_model::{
    CoRunRule, DatasetKind, DatasetSet, Finding, LoadLimitRule, PatternMatchRule, PhaseWindowRule,
    PrecedenceOverrideRule, Row, Rule, RuleError, RuleKind, Severity, SlotRestrictionRule,
    ValidationResult,
};

fn co_run(tasks: &[&str]) -> Rule {
    Rule::CoRun(CoRunRule {
        tasks: tasks.iter().map(ToString::to_string).collect(),
    })
}

fn pattern(regex: &str, template: &str) -> Rule {
    Rule::PatternMatch(PatternMatchRule {
        regex: regex.to_string(),
        template: template.to_string(),
        params: BTreeMap::new(),
    })
}

// --- Rule invariants ---

#[test]
fn co_run_requires_two_tasks() {
    let error = co_run(&["T1"]).validate().unwrap_err();
    assert_eq!(error.violations().len(), 1);
    assert!(error.to_string().contains("at least 2 tasks"));
    assert!(co_run(&["T1", "T2"]).validate().is_ok());
}

#[test]
fn co_run_reports_every_violation() {
    let error = co_run(&["  "]).validate().unwrap_err();
    assert_eq!(
        error,
        RuleError::Invalid {
            kind: RuleKind::CoRun,
            violations: vec![
                "Co-run rule requires at least 2 tasks".to_string(),
                "Task names cannot be empty".to_string(),
            ],
        }
    );
}

#[test]
fn slot_restriction_and_load_limit_bounds() {
    let slot = Rule::SlotRestriction(SlotRestrictionRule {
        group: " ".to_string(),
        min_common_slots: 0,
    });
    assert_eq!(slot.violations().len(), 2);

    let load = Rule::LoadLimit(LoadLimitRule {
        group: "GroupA".to_string(),
        max_slots_per_phase: 1,
    });
    assert!(load.is_valid());

    let load = Rule::LoadLimit(LoadLimitRule {
        group: "GroupA".to_string(),
        max_slots_per_phase: -3,
    });
    assert_eq!(
        load.violations(),
        vec!["Max slots per phase must be at least 1".to_string()]
    );
}

#[test]
fn phase_window_rejects_zero_phase() {
    let rule = Rule::PhaseWindow(PhaseWindowRule {
        task: "T3".to_string(),
        allowed_phases: vec![1, 0, 2],
    });
    assert_eq!(
        rule.violations(),
        vec!["All phases must be at least 1".to_string()]
    );

    let empty = Rule::PhaseWindow(PhaseWindowRule {
        task: String::new(),
        allowed_phases: vec![],
    });
    assert_eq!(empty.violations().len(), 2);
}

#[test]
fn pattern_match_requires_compilable_regex() {
    let error = pattern("(unclosed", "t").validate().unwrap_err();
    assert_eq!(error.violations().len(), 1);
    assert!(
        error.violations()[0]
            .to_lowercase()
            .contains("invalid regex")
    );

    assert!(pattern("^T[0-9]+$", "t").is_valid());
    assert_eq!(
        pattern("", "").violations(),
        vec![
            "Regex pattern is required".to_string(),
            "Template is required".to_string(),
        ]
    );
}

#[test]
fn precedence_override_bounds() {
    let rule = Rule::PrecedenceOverride(PrecedenceOverrideRule {
        global: vec![],
        specific: vec!["r1".to_string()],
        priority: 0,
    });
    assert_eq!(
        rule.violations(),
        vec![
            "At least one global rule is required".to_string(),
            "Priority must be at least 1".to_string(),
        ]
    );
}

// --- Wire format ---

#[test]
fn rule_serializes_with_type_tag() {
    let rule = Rule::SlotRestriction(SlotRestrictionRule {
        group: "GroupA".to_string(),
        min_common_slots: 2,
    });
    let json = serde_json::to_string_pretty(&rule).expect("serialize rule");
    insta::assert_snapshot!(json, @r#"
    {
      "type": "slotRestriction",
      "group": "GroupA",
      "minCommonSlots": 2
    }
    "#);
}

#[test]
fn rule_deserializes_every_variant() {
    let json = r#"[
        {"type": "coRun", "tasks": ["T1", "T2"]},
        {"type": "slotRestriction", "group": "G", "minCommonSlots": 1},
        {"type": "loadLimit", "group": "G", "maxSlotsPerPhase": 3},
        {"type": "phaseWindow", "task": "T1", "allowedPhases": [1, 2]},
        {"type": "patternMatch", "regex": "^T", "template": "tpl", "params": {"k": 1}},
        {"type": "precedenceOverride", "global": ["g"], "specific": ["s"], "priority": 1}
    ]"#;
    let rules: Vec<Rule> = serde_json::from_str(json).expect("deserialize rules");
    let kinds: Vec<RuleKind> = rules.iter().map(Rule::kind).collect();
    assert_eq!(kinds, RuleKind::ALL.to_vec());
    assert!(rules.iter().all(Rule::is_valid));
}

#[test]
fn unknown_rule_type_fails_to_parse() {
    let result: Result<Rule, _> = serde_json::from_str(r#"{"type": "teleport", "tasks": []}"#);
    assert!(result.is_err());
}

#[test]
fn rule_kind_from_str_is_case_insensitive() {
    assert_eq!("CORUN".parse::<RuleKind>(), Ok(RuleKind::CoRun));
    assert!("nope".parse::<RuleKind>().is_err());
}

// --- Findings and datasets ---

#[test]
fn validation_result_summary_counts_present_types_only() {
    let result = ValidationResult::from_findings(vec![
        Finding::error(1, "ClientID", "Duplicate ClientID: C1"),
        Finding::error(2, "GroupTag", "GroupTag must not be empty"),
        Finding::warning(2, "Skills", "odd"),
    ]);
    assert_eq!(result.error_count(), 2);
    assert_eq!(result.warning_count(), 1);
    assert_eq!(result.findings_for_row(2).count(), 2);

    let empty = ValidationResult::from_findings(vec![]);
    assert!(empty.summary.is_empty());
    let json = serde_json::to_string(&empty).expect("serialize result");
    assert_eq!(json, r#"{"errors":[],"summary":{}}"#);
}

#[test]
fn finding_serializes_severity_as_type() {
    let finding = Finding::header("ClientName", "Missing required column: ClientName");
    let json = serde_json::to_string(&finding).expect("serialize finding");
    assert_eq!(
        json,
        r#"{"row":0,"column":"ClientName","message":"Missing required column: ClientName","type":"error"}"#
    );
    assert_eq!(Severity::parse(" Warning "), Some(Severity::Warning));
}

#[test]
fn dataset_set_completeness() {
    let mut set = DatasetSet::default();
    assert_eq!(set.missing(), DatasetKind::ALL.to_vec());

    let row: Row = [("ClientID".to_string(), "C1".into())].into_iter().collect();
    set.set_rows(DatasetKind::Clients, vec![row.clone()]);
    set.set_rows(DatasetKind::Workers, vec![row.clone()]);
    assert!(!set.is_complete());
    set.set_rows(DatasetKind::Tasks, vec![row]);
    assert!(set.is_complete());
    assert_eq!("task".parse::<DatasetKind>(), Ok(DatasetKind::Tasks));
}
