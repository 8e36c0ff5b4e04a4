//! The `cogscreen score` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use cogscreen_core::model::{PartialScores, Subtest, MAX_RAW_SCORE};
use cogscreen_core::results::compute_results;

pub fn execute(scores: PartialScores, json: bool) -> Result<()> {
    scores.validate()?;
    let result = compute_results(&scores);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", breakdown_table(&scores));
    println!(
        "\nTotal: {} ({} of {} raw)",
        result.total_display(),
        result.raw,
        MAX_RAW_SCORE
    );
    println!("{}", result.label());
    println!("\n{}", result.interpretation());
    Ok(())
}

/// Per-subtest scores with the raw total as the last row.
pub fn breakdown_table(scores: &PartialScores) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Subtest", "Score", "Max"]);

    for subtest in Subtest::ALL {
        table.add_row(vec![
            Cell::new(subtest.label()),
            Cell::new(scores.get(subtest)),
            Cell::new(subtest.max_score()),
        ]);
    }
    table.add_row(vec![
        Cell::new("Raw total"),
        Cell::new(scores.raw_total()),
        Cell::new(MAX_RAW_SCORE),
    ]);

    table
}
