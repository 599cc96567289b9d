//! Illness danger table for a hospital

use super::table::render_table;
use crate::error::{TpsError, TpsResult};
use crate::models::AggregationStrategy;
use crate::reference::{HospitalView, IllnessView};
use serde::Serialize;
use std::cmp::Ordering;

const HEADERS: [&str; 6] = [
    "ILLNESS",
    "TREATMENT ROOM",
    "DIFFICULTY",
    "DEATH CHANCE",
    "HEALTH DECLINE",
    "AGGREGATE",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DangerColumn {
    Illness,
    TreatmentRoom,
    Difficulty,
    DeathChance,
    HealthDecline,
    #[default]
    Aggregate,
}

impl DangerColumn {
    /// Column by its 1-based position in the table
    pub fn from_index(index: usize) -> TpsResult<Self> {
        match index {
            1 => Ok(DangerColumn::Illness),
            2 => Ok(DangerColumn::TreatmentRoom),
            3 => Ok(DangerColumn::Difficulty),
            4 => Ok(DangerColumn::DeathChance),
            5 => Ok(DangerColumn::HealthDecline),
            6 => Ok(DangerColumn::Aggregate),
            _ => Err(TpsError::InvalidArgument(format!(
                "Unknown danger column {}. Valid columns: 1-6",
                index
            ))),
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            DangerColumn::Illness => HEADERS[0],
            DangerColumn::TreatmentRoom => HEADERS[1],
            DangerColumn::Difficulty => HEADERS[2],
            DangerColumn::DeathChance => HEADERS[3],
            DangerColumn::HealthDecline => HEADERS[4],
            DangerColumn::Aggregate => HEADERS[5],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DangerSort {
    pub column: DangerColumn,
    pub descending: bool,
}

impl Default for DangerSort {
    fn default() -> Self {
        Self {
            column: DangerColumn::Aggregate,
            descending: true,
        }
    }
}

/// One illness in the danger table. Percent fields are display strings;
/// the raw scores drive sorting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DangerRow {
    pub illness: String,
    pub treatment_room: String,
    pub difficulty: String,
    pub death_chance: String,
    pub health_decline: String,
    pub aggregate: String,
    #[serde(skip)]
    scores: [f64; 4],
}

impl DangerRow {
    fn from_illness(illness: &IllnessView<'_>, strategy: AggregationStrategy) -> TpsResult<Self> {
        Ok(Self {
            illness: illness.name().to_string(),
            treatment_room: illness.treatment_room()?.to_string(),
            difficulty: illness.difficulty_percent(),
            death_chance: illness.death_percent(),
            health_decline: illness.decline_percent(),
            aggregate: illness.aggregate_percent(strategy),
            scores: [
                illness.difficulty().or_neutral(),
                illness.death().or_neutral(),
                illness.decline().or_neutral(),
                illness.aggregate_danger(strategy),
            ],
        })
    }

    fn cells(self) -> Vec<String> {
        vec![
            self.illness,
            self.treatment_room,
            self.difficulty,
            self.death_chance,
            self.health_decline,
            self.aggregate,
        ]
    }

    fn compare(&self, other: &Self, column: DangerColumn) -> Ordering {
        let score = |index: usize| self.scores[index].total_cmp(&other.scores[index]);
        match column {
            DangerColumn::Illness => self.illness.cmp(&other.illness),
            DangerColumn::TreatmentRoom => self.treatment_room.cmp(&other.treatment_room),
            DangerColumn::Difficulty => score(0),
            DangerColumn::DeathChance => score(1),
            DangerColumn::HealthDecline => score(2),
            DangerColumn::Aggregate => score(3),
        }
    }
}

/// Rows for every illness in the hospital, stably sorted.
///
/// Unknown factors sort as 1.0, matching the aggregate math. Ties keep the
/// hospital's illness order.
pub fn danger_rows(
    hospital: &HospitalView<'_>,
    sort: DangerSort,
    strategy: AggregationStrategy,
) -> TpsResult<Vec<DangerRow>> {
    let illnesses = hospital.illnesses()?;
    if illnesses.is_empty() {
        return Err(TpsError::configuration(
            hospital.name(),
            "is not configured with illnesses",
        ));
    }

    let mut rows = illnesses
        .iter()
        .map(|illness| {
            DangerRow::from_illness(illness, strategy).map_err(|e| e.within(hospital.name()))
        })
        .collect::<TpsResult<Vec<_>>>()?;

    rows.sort_by(|a, b| {
        let ordering = a.compare(b, sort.column);
        if sort.descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    Ok(rows)
}

pub fn format_danger_table(
    hospital: &HospitalView<'_>,
    sort: DangerSort,
    strategy: AggregationStrategy,
) -> TpsResult<String> {
    let cells: Vec<Vec<String>> = danger_rows(hospital, sort, strategy)?
        .into_iter()
        .map(DangerRow::cells)
        .collect();
    render_table(&HEADERS, &cells)
}
