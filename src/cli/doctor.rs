//! Doctor command - check reference data and environment

use super::Settings;
use anyhow::Result;
use console::style;
use tps::graph::render::{graphviz_version, GRAPHVIZ_BINARY};

pub fn run(settings: &Settings) -> Result<()> {
    println!("🩺 Two Point Science Doctor\n");
    let data = &settings.data;

    println!(
        "✓ Reference data: {} rooms, {} illnesses, {} hospitals",
        data.rooms().len(),
        data.illnesses().len(),
        data.hospitals().len()
    );

    let documented = data
        .hospitals()
        .iter()
        .filter(|h| !h.illnesses.is_empty())
        .count();
    println!(
        "○ Hospitals with recorded illnesses: {}/{}",
        documented,
        data.hospitals().len()
    );

    let problems = data.validate();
    if problems.is_empty() {
        println!("✓ Reference data is consistent");
    } else {
        println!(
            "{} Reference data has {} problem(s):",
            style("✗").red(),
            problems.len()
        );
        for problem in &problems {
            println!("  - {}", problem);
        }
    }

    match graphviz_version() {
        Some(version) => println!("✓ Graphviz: {}", version),
        None => {
            println!("○ Graphviz: '{}' not found on PATH", GRAPHVIZ_BINARY);
            println!("  Graphs can still be written with --no-render");
        }
    }

    if !problems.is_empty() {
        anyhow::bail!("Reference data failed validation");
    }
    println!("\n✅ All checks passed!");
    Ok(())
}
