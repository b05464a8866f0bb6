use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use roster_cli::types::MergeRun;
use roster_ingest::{CheckResult, CheckStatus};
use roster_model::{MatchKind, MatchStats, MergeOutcome, MetricValue, rank_sort_key};

pub fn print_merge(run: &MergeRun, show: usize) {
    match &run.outputs {
        Some(outputs) => {
            println!("Output: {}", outputs.paths.dir.display());
            println!(
                "  {} ({} rows)",
                outputs.paths.merged.display(),
                outputs.merged_rows
            );
            println!(
                "  {} ({} rows)",
                outputs.paths.unmatched.display(),
                outputs.unmatched_rows
            );
            println!("  {}", outputs.paths.stats.display());
        }
        None if run.blocked => println!("Input checks failed: outputs not written"),
        None if !run.outcome.has_matches() => println!("No matches: outputs not written"),
        None => println!("Dry run: outputs not written"),
    }
    for column in &run.format.formatted {
        println!(
            "Formatted {} as {} ({} changed)",
            column.column,
            column.formatter.as_str(),
            column.changed
        );
    }
    if !run.format.dropped.is_empty() {
        println!("Dropped columns: {}", run.format.dropped.join(", "));
    }

    println!("{}", stats_table(&run.outcome.stats));
    if !run.checks.is_empty() {
        println!("{}", checks_table(&run.checks));
    }
    if show > 0 && run.outcome.has_matches() {
        println!("{}", matched_table(&run.outcome, show));
        if let Some(sample) = sample_table(&run.outcome) {
            println!("Top-ranked record:");
            println!("{sample}");
        }
    }
    if !run.outcome.unmatched.is_empty() {
        println!("{}", unmatched_table(&run.outcome));
    }
}

pub fn print_checks(checks: &[CheckResult]) {
    println!("{}", checks_table(checks));
}

pub fn print_keys(keys: &[(String, String)]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Name"), header_cell("Canonical key")]);
    apply_table_style(&mut table);
    for (name, key) in keys {
        let key_cell = if key.is_empty() {
            dim_cell("(empty)")
        } else {
            Cell::new(key)
        };
        table.add_row(vec![Cell::new(name), key_cell]);
    }
    println!("{table}");
}

fn stats_table(stats: &MatchStats) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Statistic"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Secondary rows", stats.total_secondary_rows),
        ("Primary rows", stats.total_primary_rows),
        ("Exact matches", stats.exact_matches),
        ("Fuzzy matches", stats.fuzzy_matches),
        ("Total matches", stats.total_matches),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table.add_row(vec![
        Cell::new("Unmatched"),
        count_cell(stats.unmatched, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Match rate")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{:.1}%", stats.match_percentage)).add_attribute(Attribute::Bold),
    ]);
    table
}

fn checks_table(checks: &[CheckResult]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Status"),
        header_cell("Details"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for check in checks {
        table.add_row(vec![
            Cell::new(check.check),
            status_cell(check.status),
            Cell::new(&check.description),
        ]);
    }
    table
}

/// Matched rows ordered by rank, limited to `limit`.
fn matched_rows(outcome: &MergeOutcome, limit: usize) -> Vec<[String; 4]> {
    let mut records: Vec<_> = outcome.merged.records.iter().collect();
    records.sort_by_key(|record| rank_sort_key(record.rank()));
    records
        .into_iter()
        .take(limit)
        .map(|record| {
            [
                record.rank().to_string(),
                record.name().to_string(),
                MetricValue::parse(record.metric()).to_string(),
                record.kind.as_str().to_string(),
            ]
        })
        .collect()
}

fn matched_table(outcome: &MergeOutcome, limit: usize) -> Table {
    let schema = &outcome.merged.schema;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(schema.rank_label()),
        header_cell(schema.name_label()),
        header_cell(schema.metric_label()),
        header_cell("Match"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for [rank, name, metric, kind] in matched_rows(outcome, limit) {
        let kind_cell = if kind == MatchKind::Fuzzy.as_str() {
            Cell::new(kind).fg(Color::Yellow)
        } else {
            dim_cell(kind)
        };
        table.add_row(vec![Cell::new(rank), Cell::new(name), Cell::new(metric), kind_cell]);
    }
    let hidden = outcome.merged.len().saturating_sub(limit);
    if hidden > 0 {
        table.add_row(vec![
            dim_cell("…"),
            dim_cell(format!("{hidden} more")),
            dim_cell(""),
            dim_cell(""),
        ]);
    }
    table
}

fn unmatched_table(outcome: &MergeOutcome) -> Table {
    let with_suggestions = outcome.unmatched.iter().any(|entry| entry.nearest.is_some());
    let mut header = vec![
        header_cell("Rank"),
        header_cell("Unmatched name"),
        header_cell("Metric"),
        header_cell("Canonical key"),
    ];
    if with_suggestions {
        header.push(header_cell("Nearest"));
        header.push(header_cell("Similarity"));
    }
    let mut table = Table::new();
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let mut entries: Vec<_> = outcome.unmatched.iter().collect();
    entries.sort_by_key(|entry| rank_sort_key(&entry.rank));
    for entry in entries {
        let mut row = vec![
            Cell::new(&entry.rank),
            Cell::new(&entry.name).fg(Color::Yellow),
            Cell::new(MetricValue::parse(&entry.metric)),
            dim_cell(entry.canonical_key.as_str()),
        ];
        if with_suggestions {
            match &entry.nearest {
                Some(nearest) => {
                    row.push(Cell::new(&nearest.name));
                    row.push(Cell::new(format!("{:.3}", nearest.similarity)));
                }
                None => {
                    row.push(dim_cell("-"));
                    row.push(dim_cell("-"));
                }
            }
        }
        table.add_row(row);
    }
    table
}

/// Position of the best-ranked merged record; ties keep the earliest.
fn top_ranked(outcome: &MergeOutcome) -> Option<usize> {
    outcome
        .merged
        .records
        .iter()
        .enumerate()
        .min_by_key(|(_, record)| rank_sort_key(record.rank()))
        .map(|(position, _)| position)
}

/// Field / value view of the best-ranked merged record.
fn sample_table(outcome: &MergeOutcome) -> Option<Table> {
    let fields = outcome.merged.fields(top_ranked(outcome)?);
    if fields.is_empty() {
        return None;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    for (column, value) in fields {
        let value_cell = if value.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(value)
        };
        table.add_row(vec![Cell::new(column), value_cell]);
    }
    Some(table)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: CheckStatus) -> Cell {
    let color = match status {
        CheckStatus::Passed => Color::Green,
        CheckStatus::Warning => Color::Yellow,
        CheckStatus::Error => Color::Red,
    };
    Cell::new(status.as_str())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
