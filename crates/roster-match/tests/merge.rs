use proptest::prelude::*;
use roster_match::{MergeColumns, MergeEngine, MergeOptions, merge};
use roster_model::{Dataset, MatchKind, MergeLabels, ModelError, SecondaryColumns};
use roster_normalize::NormalizationRules;

fn dataset(columns: &[&str], rows: &[&[&str]]) -> Dataset {
    let mut dataset = Dataset::new(columns.iter().map(|c| c.to_string()).collect());
    for row in rows {
        dataset.push_row(row.iter().map(|v| v.to_string()).collect());
    }
    dataset
}

fn secondary(rows: &[(&str, &str, &str)]) -> Dataset {
    let rows: Vec<Vec<&str>> = rows.iter().map(|(r, n, p)| vec![*r, *n, *p]).collect();
    let refs: Vec<&[&str]> = rows.iter().map(Vec::as_slice).collect();
    dataset(&["RK", "Player", "PTS"], &refs)
}

#[test]
fn single_exact_match_end_to_end() {
    let primary = dataset(&["Name", "Position"], &[&["LeBron James", "F"]]);
    let secondary = secondary(&[("1", "LEBRON JAMES", "38652")]);

    let outcome = merge(&primary, &secondary).unwrap();

    assert_eq!(outcome.merged.schema.columns, vec!["RK", "Name", "PTS", "Position"]);
    assert_eq!(outcome.merged.len(), 1);
    assert_eq!(
        outcome.merged.fields(0),
        vec![
            ("RK", "1"),
            ("Name", "LeBron James"),
            ("PTS", "38652"),
            ("Position", "F")
        ]
    );
    assert_eq!(outcome.merged.records[0].kind, MatchKind::Exact);
    assert!(outcome.unmatched.is_empty());
    assert_eq!(outcome.stats.exact_matches, 1);
    assert_eq!(outcome.stats.fuzzy_matches, 0);
    assert_eq!(outcome.stats.match_percentage, 100.0);
}

#[test]
fn fuzzy_threshold_boundary() {
    let primary = dataset(
        &["Name", "Position"],
        &[&["Anthony Davis", "F-C"], &["Jimmy Butler", "F"]],
    );
    let secondary = secondary(&[
        ("1", "Anthony Edwards", "100"),
        ("2", "Butler Jimmy", "90"),
    ]);

    let outcome = merge(&primary, &secondary).unwrap();

    assert_eq!(outcome.merged.len(), 1);
    let record = &outcome.merged.records[0];
    assert_eq!(record.kind, MatchKind::Fuzzy);
    assert_eq!(record.name(), "Jimmy Butler");
    assert_eq!(record.rank(), "2");

    assert_eq!(outcome.unmatched.len(), 1);
    let missing = &outcome.unmatched[0];
    assert_eq!(missing.name, "Anthony Edwards");
    assert_eq!(missing.canonical_key.as_str(), "anthony edwards");
    assert_eq!(missing.nearest, None);

    assert_eq!(outcome.stats.fuzzy_matches, 1);
    assert_eq!(outcome.stats.unmatched, 1);
    assert_eq!(outcome.stats.match_percentage, 50.0);
}

#[test]
fn collisions_resolve_to_first_primary_row() {
    let primary = dataset(
        &["Name", "Team"],
        &[&["Gary Payton", "SEA"], &["Gary Payton II", "GSW"]],
    );
    let secondary = secondary(&[("5", "Gary Payton", "21813")]);
    let outcome = merge(&primary, &secondary).unwrap();
    assert_eq!(outcome.merged.value(0, "Team"), Some("SEA"));
    assert_eq!(outcome.merged.records[0].primary_row, 0);
}

#[test]
fn merged_columns_skip_internal_key_and_placed_labels() {
    let primary = dataset(
        &["Normalized_Name", "Position", "Name", "PTS", "Born_Date"],
        &[&["kevin durant", "F", "Kevin Durant", "stale", "1988-09-29"]],
    );
    let secondary = secondary(&[("8", "Kevin Durant", "30,571")]);
    let outcome = merge(&primary, &secondary).unwrap();
    assert_eq!(
        outcome.merged.schema.columns,
        vec!["RK", "Name", "PTS", "Position", "Born_Date"]
    );
    assert_eq!(outcome.merged.value(0, "PTS"), Some("30,571"));
}

#[test]
fn blank_secondary_names_stay_unmatched() {
    let primary = dataset(&["Name"], &[&["Tim Duncan"]]);
    let secondary = secondary(&[("1", "", "10"), ("2", "Jr.", "5")]);
    let outcome = merge(&primary, &secondary).unwrap();
    assert!(!outcome.has_matches());
    assert_eq!(outcome.unmatched.len(), 2);
    assert!(outcome.unmatched.iter().all(|u| u.canonical_key.is_empty()));
    assert_eq!(outcome.stats.match_percentage, 0.0);
}

#[test]
fn empty_secondary_reports_zero_percent() {
    let primary = dataset(&["Name"], &[&["Tim Duncan"]]);
    let secondary = secondary(&[]);
    let outcome = merge(&primary, &secondary).unwrap();
    assert_eq!(outcome.stats.total_secondary_rows, 0);
    assert_eq!(outcome.stats.total_primary_rows, 1);
    assert_eq!(outcome.stats.match_percentage, 0.0);
}

#[test]
fn missing_columns_are_reported() {
    let primary = dataset(&["Player Name"], &[]);
    let err = merge(&primary, &secondary(&[])).unwrap_err();
    assert!(matches!(err, ModelError::MissingColumn { ref column, .. } if column == "Name"));

    let primary = dataset(&["Name"], &[]);
    let wrong = dataset(&["Rank", "Player", "PTS"], &[]);
    let err = merge(&primary, &wrong).unwrap_err();
    assert!(matches!(err, ModelError::MissingColumn { ref column, .. } if column == "RK"));
}

#[test]
fn custom_columns_and_labels() {
    let primary = dataset(&["Player", "Pos"], &[&["Chris Paul", "G"]]);
    let secondary = dataset(&["#", "Who", "AST"], &[&["1", "Chris Paul", "12,345"]]);
    let engine = MergeEngine::new(NormalizationRules::builtin()).with_columns(MergeColumns {
        primary_name: "Player".to_string(),
        secondary: SecondaryColumns {
            rank: "#".to_string(),
            name: "Who".to_string(),
            metric: "AST".to_string(),
        },
        labels: Some(MergeLabels {
            rank: "Rank".to_string(),
            metric: "Assists".to_string(),
        }),
    });
    let outcome = engine.merge(&primary, &secondary).unwrap();
    assert_eq!(outcome.merged.schema.columns, vec!["Rank", "Player", "Assists", "Pos"]);
    assert_eq!(outcome.stats.exact_matches, 1);
}

#[test]
fn invalid_threshold_is_rejected() {
    let engine = MergeEngine::new(NormalizationRules::builtin()).with_options(MergeOptions {
        threshold: 0.0,
        ..MergeOptions::default()
    });
    let primary = dataset(&["Name"], &[]);
    let err = engine.merge(&primary, &secondary(&[])).unwrap_err();
    assert_eq!(err, ModelError::InvalidThreshold(0.0));
}

#[test]
fn suggestions_only_annotate_unmatched_rows() {
    let primary = dataset(&["Name"], &[&["Giannis Antetokounmpo"], &["Kyle Lowry"]]);
    let secondary = secondary(&[
        ("1", "Giannis Antetokoumpo", "20000"),
        ("2", "Kyle Lowry", "15000"),
    ]);
    let engine = MergeEngine::new(NormalizationRules::builtin()).with_options(MergeOptions {
        suggest_unmatched: true,
        ..MergeOptions::default()
    });
    let outcome = engine.merge(&primary, &secondary).unwrap();
    assert_eq!(outcome.merged.len(), 1);
    assert_eq!(outcome.unmatched.len(), 1);
    let nearest = outcome.unmatched[0].nearest.as_ref().unwrap();
    assert_eq!(nearest.name, "Giannis Antetokounmpo");
}

#[test]
fn merge_is_deterministic() {
    let primary = dataset(
        &["Name", "Position"],
        &[&["Stephen Curry", "G"], &["Seth Curry", "G"], &["Dell Curry", "G"]],
    );
    let secondary = secondary(&[
        ("3", "Curry Stephen", "1"),
        ("1", "Seth Curry", "2"),
        ("2", "Wardell Curry", "3"),
    ]);
    let first = merge(&primary, &secondary).unwrap();
    let second = merge(&primary, &secondary).unwrap();
    assert_eq!(first, second);
    let order: Vec<usize> = first.merged.records.iter().map(|r| r.secondary_row).collect();
    assert_eq!(order, vec![0, 1]);
}

fn arb_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "LeBron James",
        "LEBRON JAMES",
        "Anthony Davis",
        "Davis Anthony",
        "Gary Payton II",
        "Gary Payton",
        "Jamal Murray",
        "Murray Jamal Jr.",
        "Kevin Love",
        "Kevin Durant",
        "",
        "Jr.",
    ])
    .prop_map(str::to_string)
}

proptest! {
    #[test]
    fn parallel_matches_sequential(
        primary_names in prop::collection::vec(arb_name(), 0..12),
        secondary_names in prop::collection::vec(arb_name(), 0..12),
        threshold in 0.3f64..=1.0,
    ) {
        let primary_rows: Vec<Vec<String>> = primary_names
            .iter()
            .enumerate()
            .map(|(idx, name)| vec![name.clone(), format!("P{idx}")])
            .collect();
        let mut primary = Dataset::new(vec!["Name".to_string(), "Position".to_string()]);
        for row in primary_rows {
            primary.push_row(row);
        }
        let mut secondary = Dataset::new(vec!["RK".to_string(), "Player".to_string(), "PTS".to_string()]);
        for (idx, name) in secondary_names.iter().enumerate() {
            secondary.push_row(vec![(idx + 1).to_string(), name.clone(), "1".to_string()]);
        }

        let rules = NormalizationRules::builtin();
        let options = MergeOptions { threshold, suggest_unmatched: true, ..MergeOptions::default() };
        let sequential = MergeEngine::new(rules)
            .with_options(options.clone())
            .merge(&primary, &secondary)
            .unwrap();
        let parallel = MergeEngine::new(rules)
            .with_options(MergeOptions { parallel: true, ..options })
            .merge(&primary, &secondary)
            .unwrap();

        prop_assert_eq!(&sequential, &parallel);
        prop_assert_eq!(
            sequential.stats.total_matches + sequential.stats.unmatched,
            secondary_names.len()
        );
    }
}
