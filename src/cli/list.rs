//! Listing commands - hospitals, illnesses and rooms

use super::Settings;
use anyhow::Result;
use console::style;

/// List hospitals with their recorded illness counts
pub fn hospitals(settings: &Settings) -> Result<()> {
    let data = &settings.data;
    println!("\n{} Hospitals ({})\n", style("🏥").bold(), data.hospitals().len());
    for record in data.hospitals() {
        let hospital = data.hospital(&record.name)?;
        if hospital.is_documented() {
            println!(
                "  {} ({} illnesses)",
                style(hospital.name()).cyan(),
                hospital.illness_names().len()
            );
        } else {
            println!(
                "  {} {}",
                style(hospital.name()).cyan(),
                style("(no illnesses recorded)").dim()
            );
        }
    }
    Ok(())
}

/// List illnesses, optionally only those of one hospital
pub fn illnesses(settings: &Settings, hospital: Option<&str>) -> Result<()> {
    let data = &settings.data;
    let views = match hospital {
        Some(name) => data.hospital(name)?.illnesses()?,
        None => data
            .illnesses()
            .iter()
            .map(|record| data.illness(&record.name))
            .collect::<Result<Vec<_>, _>>()?,
    };

    println!("\n{} Illnesses ({})\n", style("🤒").bold(), views.len());
    for illness in views {
        let path = match illness.diagnostic_sequence() {
            Ok(sequence) => sequence.join(" -> "),
            Err(e) => style(e.to_string()).red().to_string(),
        };
        let treatment = match illness.treatment_room() {
            Ok(room) => style(room).green().to_string(),
            Err(e) => style(e.to_string()).red().to_string(),
        };
        println!("  {}", style(illness.name()).cyan().bold());
        println!("    {} => {}", path, treatment);
    }
    Ok(())
}

/// List rooms, optionally only those one hospital uses
pub fn rooms(settings: &Settings, hospital: Option<&str>) -> Result<()> {
    let data = &settings.data;
    let names: Vec<&str> = match hospital {
        Some(name) => data.hospital(name)?.rooms(true)?,
        None => data.rooms().iter().map(|room| room.name.as_str()).collect(),
    };

    println!("\n{} Rooms ({})\n", style("🚪").bold(), names.len());
    for name in names {
        let purpose = data
            .room(name)
            .and_then(|room| room.purpose)
            .map(|purpose| purpose.to_string())
            .unwrap_or_else(|| "Unspecified".to_string());
        println!("  {} {}", style(name).cyan(), style(purpose).dim());
    }
    Ok(())
}
