//! Console summary of a collection round

use crate::record::CollectionBatch;
use tabled::{builder::Builder, settings::Style};

/// Rows shown in the per-round preview table
pub const PREVIEW_ROWS: usize = 5;

/// Make an ASCII table of the first few records: name, level, min, max
pub fn preview_table(batch: &CollectionBatch) -> tabled::Table {
    let mut builder = Builder::new();
    builder.push_record(vec!["지역명", "실시간 인구 수준", "인구 최소값", "인구 최대값"]);
    for record in batch.records().iter().take(PREVIEW_ROWS) {
        builder.push_record(vec![
            record.area_name.clone(),
            record.congestion_level.clone(),
            record.population_min.clone(),
            record.population_max.clone(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::sharp());
    table
}

/// Prints the round summary to stdout
pub fn print_summary(batch: &CollectionBatch) {
    println!("\n=== Collection Result ===");
    println!("Areas collected: {}", batch.len());
    println!("\nReal-time population by area:");
    println!("{}", preview_table(batch));
}
