//! Danger command - illness danger table for a hospital

use super::Settings;
use anyhow::Result;
use tps::models::AggregationStrategy;
use tps::reporters::{
    danger_rows, format_danger_table, render_json, DangerColumn, DangerSort, OutputFormat,
};

pub fn run(
    settings: &Settings,
    hospital: &str,
    column: u8,
    strategy: AggregationStrategy,
    ascending: bool,
    format: &str,
) -> Result<()> {
    let sort = DangerSort {
        column: DangerColumn::from_index(usize::from(column))?,
        descending: !ascending,
    };
    let format: OutputFormat = format.parse()?;
    print!("{}", render(settings, hospital, sort, strategy, format)?);
    Ok(())
}

/// Danger table (or JSON rows) for a hospital
pub fn render(
    settings: &Settings,
    hospital: &str,
    sort: DangerSort,
    strategy: AggregationStrategy,
    format: OutputFormat,
) -> Result<String> {
    let hospital = settings.data.hospital(hospital)?;
    Ok(match format {
        OutputFormat::Text => format_danger_table(&hospital, sort, strategy)?,
        OutputFormat::Json => {
            let mut json = render_json(&danger_rows(&hospital, sort, strategy)?)?;
            json.push('\n');
            json
        }
    })
}
