//! Reference data store for Two Point Hospital
//!
//! Rooms, illnesses and hospitals are loaded once (from the embedded dataset
//! or a user-supplied TOML file) and are read-only afterwards. Tables keep
//! the dataset's order because edge sequences and listings depend on it.

mod hospital;
mod illness;

pub use hospital::HospitalView;
pub use illness::IllnessView;

use crate::error::{TpsError, TpsResult};
use crate::models::{Factor, Hospital, Illness, Room};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// The dataset compiled into the binary
const BUILTIN_DATA: &str = include_str!("../../data/two_point_hospital.toml");

/// On-disk layout of a dataset file
#[derive(Debug, Deserialize)]
struct DataFile {
    intake_room: String,
    #[serde(default, rename = "room")]
    rooms: Vec<Room>,
    #[serde(default, rename = "illness")]
    illnesses: Vec<Illness>,
    #[serde(default, rename = "hospital")]
    hospitals: Vec<Hospital>,
}

/// Immutable lookup tables for rooms, illnesses and hospitals
#[derive(Debug, Clone)]
pub struct ReferenceData {
    /// Universal first stop of every diagnostic sequence
    intake_room: String,
    rooms: Vec<Room>,
    illnesses: Vec<Illness>,
    hospitals: Vec<Hospital>,
    room_index: HashMap<String, usize>,
    illness_index: HashMap<String, usize>,
    hospital_index: HashMap<String, usize>,
}

impl ReferenceData {
    /// Build the store from its tables. Fails on duplicate names.
    pub fn new(
        intake_room: impl Into<String>,
        rooms: Vec<Room>,
        illnesses: Vec<Illness>,
        hospitals: Vec<Hospital>,
    ) -> TpsResult<Self> {
        let room_index = build_index("room", rooms.iter().map(|r| r.name.as_str()))?;
        let illness_index = build_index("illness", illnesses.iter().map(|i| i.name.as_str()))?;
        let hospital_index =
            build_index("hospital", hospitals.iter().map(|h| h.name.as_str()))?;

        Ok(Self {
            intake_room: intake_room.into(),
            rooms,
            illnesses,
            hospitals,
            room_index,
            illness_index,
            hospital_index,
        })
    }

    /// The dataset shipped with the binary
    pub fn builtin() -> TpsResult<Self> {
        Self::from_toml_str(BUILTIN_DATA)
    }

    pub fn from_toml_str(content: &str) -> TpsResult<Self> {
        let file: DataFile = toml::from_str(content)?;
        debug!(
            rooms = file.rooms.len(),
            illnesses = file.illnesses.len(),
            hospitals = file.hospitals.len(),
            "Parsed reference data"
        );
        Self::new(file.intake_room, file.rooms, file.illnesses, file.hospitals)
    }

    /// Load a dataset file from disk
    pub fn load(path: &Path) -> TpsResult<Self> {
        info!("Loading reference data from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn intake_room(&self) -> &str {
        &self.intake_room
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn illnesses(&self) -> &[Illness] {
        &self.illnesses
    }

    pub fn hospitals(&self) -> &[Hospital] {
        &self.hospitals
    }

    pub fn room(&self, name: &str) -> Option<&Room> {
        self.room_index.get(name).map(|&i| &self.rooms[i])
    }

    pub fn is_diagnostic_room(&self, name: &str) -> bool {
        self.room(name).is_some_and(Room::is_diagnostic)
    }

    pub fn is_treatment_room(&self, name: &str) -> bool {
        self.room(name).is_some_and(Room::is_treatment)
    }

    pub fn is_dual_purpose(&self, name: &str) -> bool {
        self.room(name).is_some_and(Room::is_dual_purpose)
    }

    /// Validated view of one illness
    pub fn illness(&self, name: &str) -> TpsResult<IllnessView<'_>> {
        if name.is_empty() {
            return Err(TpsError::Validation("Illness name can not be empty".into()));
        }
        let record = self
            .illness_index
            .get(name)
            .map(|&i| &self.illnesses[i])
            .ok_or_else(|| TpsError::Validation(format!("Unknown illness name '{}'", name)))?;
        Ok(IllnessView::new(self, record))
    }

    /// Validated view of one hospital
    pub fn hospital(&self, name: &str) -> TpsResult<HospitalView<'_>> {
        if name.is_empty() {
            return Err(TpsError::Validation("Hospital name can not be empty".into()));
        }
        let record = self
            .hospital_index
            .get(name)
            .map(|&i| &self.hospitals[i])
            .ok_or_else(|| TpsError::Validation(format!("Unknown hospital name '{}'", name)))?;
        Ok(HospitalView::new(self, record))
    }

    /// Room whose name is the longest case-insensitive prefix of `display_name`.
    ///
    /// Display names may carry a ` (diag)` / ` (treat)` suffix, so this is how
    /// a table row finds its room record.
    pub fn lookup_room_prefix(&self, display_name: &str) -> Option<&Room> {
        let needle = display_name.to_lowercase();
        self.rooms
            .iter()
            .filter(|room| needle.starts_with(&room.name.to_lowercase()))
            .max_by_key(|room| room.name.len())
    }

    /// Check every cross reference in the dataset.
    ///
    /// Returns one `Configuration` error per defect; an empty list means the
    /// dataset is consistent.
    pub fn validate(&self) -> Vec<TpsError> {
        let mut problems = Vec::new();

        if !self.is_diagnostic_room(&self.intake_room) {
            problems.push(TpsError::configuration(
                format!("Intake room '{}'", self.intake_room),
                "is not a known diagnostic room",
            ));
        }

        for illness in &self.illnesses {
            if illness.diagnostic.is_empty() {
                problems.push(TpsError::configuration(
                    &illness.name,
                    "is missing a list of diagnostic rooms",
                ));
            }
            for room in &illness.diagnostic {
                if !self.is_diagnostic_room(room) {
                    problems.push(TpsError::configuration(
                        &illness.name,
                        format!("lists '{}' which is not a diagnostic room", room),
                    ));
                }
            }
            match &illness.treatment {
                None => problems.push(TpsError::configuration(
                    &illness.name,
                    "is missing a treatment room",
                )),
                Some(room) if !self.is_treatment_room(room) => {
                    problems.push(TpsError::configuration(
                        &illness.name,
                        format!("is treated in '{}' which is not a treatment room", room),
                    ))
                }
                Some(_) => {}
            }
            for (label, factor) in [
                ("difficulty", illness.difficulty),
                ("death", illness.death),
                ("decline", illness.decline),
            ] {
                if let Factor::Known(value) = factor {
                    if !value.is_finite() || value < 0.0 {
                        problems.push(TpsError::configuration(
                            &illness.name,
                            format!("has an invalid {} value of {}", label, value),
                        ));
                    }
                }
            }
        }

        for hospital in &self.hospitals {
            for illness in &hospital.illnesses {
                if !self.illness_index.contains_key(illness) {
                    problems.push(TpsError::configuration(
                        &hospital.name,
                        format!("lists unknown illness '{}'", illness),
                    ));
                }
            }
        }

        problems
    }
}

fn build_index<'a>(
    kind: &str,
    names: impl Iterator<Item = &'a str>,
) -> TpsResult<HashMap<String, usize>> {
    let mut index = HashMap::new();
    for (position, name) in names.enumerate() {
        if index.insert(name.to_string(), position).is_some() {
            return Err(TpsError::configuration(
                format!("The {} '{}'", kind, name),
                "is defined more than once",
            ));
        }
    }
    Ok(index)
}

#[cfg(test)]
pub(crate) mod tests;
