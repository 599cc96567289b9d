//! Read-only view over one hospital

use super::{IllnessView, ReferenceData};
use crate::error::TpsResult;
use crate::models::Hospital;

/// A hospital record paired with the dataset it came from
#[derive(Debug, Clone, Copy)]
pub struct HospitalView<'a> {
    data: &'a ReferenceData,
    hospital: &'a Hospital,
}

impl<'a> HospitalView<'a> {
    pub(super) fn new(data: &'a ReferenceData, hospital: &'a Hospital) -> Self {
        Self { data, hospital }
    }

    pub fn name(&self) -> &'a str {
        &self.hospital.name
    }

    pub fn data(&self) -> &'a ReferenceData {
        self.data
    }

    pub fn source(&self) -> Option<&'a str> {
        self.hospital.source.as_deref()
    }

    /// Whether anyone has recorded the illnesses for this hospital yet
    pub fn is_documented(&self) -> bool {
        !self.hospital.illnesses.is_empty()
    }

    pub fn illness_names(&self) -> &'a [String] {
        &self.hospital.illnesses
    }

    /// Views for every illness, in hospital order
    pub fn illnesses(&self) -> TpsResult<Vec<IllnessView<'a>>> {
        self.hospital
            .illnesses
            .iter()
            .map(|name| self.data.illness(name))
            .collect()
    }

    /// Distinct diagnostic rooms (intake room included)
    pub fn diagnostic_rooms(&self, sorted: bool) -> TpsResult<Vec<&'a str>> {
        let mut rooms = Vec::new();
        for illness in self.illnesses()? {
            for room in illness.diagnostic_sequence()? {
                push_unique(&mut rooms, room);
            }
        }
        if sorted {
            rooms.sort_unstable();
        }
        Ok(rooms)
    }

    /// Distinct treatment rooms
    pub fn treatment_rooms(&self, sorted: bool) -> TpsResult<Vec<&'a str>> {
        let mut rooms = Vec::new();
        for illness in self.illnesses()? {
            push_unique(&mut rooms, illness.treatment_room()?);
        }
        if sorted {
            rooms.sort_unstable();
        }
        Ok(rooms)
    }

    /// Every room this hospital's illnesses pass through
    pub fn rooms(&self, sorted: bool) -> TpsResult<Vec<&'a str>> {
        let mut rooms = self.diagnostic_rooms(sorted)?;
        for room in self.treatment_rooms(sorted)? {
            push_unique(&mut rooms, room);
        }
        if sorted {
            rooms.sort_unstable();
        }
        Ok(rooms)
    }
}

fn push_unique<'a>(rooms: &mut Vec<&'a str>, room: &'a str) {
    if !rooms.contains(&room) {
        rooms.push(room);
    }
}
