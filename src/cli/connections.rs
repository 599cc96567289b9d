//! Connections command - per-room counts over a hospital's edges

use super::Settings;
use anyhow::Result;
use tps::graph::{build_edges, count_rooms};
use tps::reporters::{format_room_table, render_json, room_rows, OutputFormat, RoomSort};

pub fn run(
    settings: &Settings,
    hospital: &str,
    room: Option<&str>,
    sort: &str,
    ascending: bool,
    format: &str,
) -> Result<()> {
    let sort = RoomSort {
        key: sort.parse()?,
        descending: !ascending,
    };
    let format: OutputFormat = format.parse()?;
    print!("{}", render(settings, hospital, room, sort, format)?);
    Ok(())
}

/// Room table (or JSON rows) for a hospital
pub fn render(
    settings: &Settings,
    hospital: &str,
    room: Option<&str>,
    sort: RoomSort,
    format: OutputFormat,
) -> Result<String> {
    let hospital = settings.data.hospital(hospital)?;
    let edges = build_edges(&hospital, settings.separate_rooms, room)?;
    let counts = count_rooms(&edges, settings.separate_rooms);

    Ok(match format {
        OutputFormat::Text => format_room_table(&counts, &settings.data, sort)?,
        OutputFormat::Json => {
            let mut json = render_json(&room_rows(&counts, &settings.data, sort))?;
            json.push('\n');
            json
        }
    })
}
