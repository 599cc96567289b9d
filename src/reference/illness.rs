//! Read-only view over one illness

use super::ReferenceData;
use crate::error::{TpsError, TpsResult};
use crate::models::{format_percent, AggregationStrategy, Factor, Illness};

/// An illness record paired with the dataset it came from
#[derive(Debug, Clone, Copy)]
pub struct IllnessView<'a> {
    data: &'a ReferenceData,
    illness: &'a Illness,
}

impl<'a> IllnessView<'a> {
    pub(super) fn new(data: &'a ReferenceData, illness: &'a Illness) -> Self {
        Self { data, illness }
    }

    pub fn name(&self) -> &'a str {
        &self.illness.name
    }

    pub fn data(&self) -> &'a ReferenceData {
        self.data
    }

    /// Diagnostic rooms in visiting order, always starting at the intake room.
    ///
    /// The intake room is prepended only when the stored list doesn't
    /// already contain it.
    pub fn diagnostic_sequence(&self) -> TpsResult<Vec<&'a str>> {
        let stored = &self.illness.diagnostic;
        if stored.is_empty() {
            return Err(TpsError::configuration(
                self.name(),
                "missing a list of diagnostic rooms",
            ));
        }

        let intake = self.data.intake_room();
        let mut sequence = Vec::with_capacity(stored.len() + 1);
        if !stored.iter().any(|room| room == intake) {
            sequence.push(intake);
        }
        sequence.extend(stored.iter().map(String::as_str));

        if let Some(bad) = sequence
            .iter()
            .find(|room| !self.data.is_diagnostic_room(room))
        {
            return Err(TpsError::Validation(format!(
                "'{}' is not a recognized diagnostic room (illness '{}')",
                bad,
                self.name()
            )));
        }

        Ok(sequence)
    }

    /// The room that treats this illness
    pub fn treatment_room(&self) -> TpsResult<&'a str> {
        let room = self
            .illness
            .treatment
            .as_deref()
            .filter(|room| !room.is_empty())
            .ok_or_else(|| TpsError::configuration(self.name(), "missing a treatment room"))?;

        if !self.data.is_treatment_room(room) {
            return Err(TpsError::Validation(format!(
                "'{}' is not a recognized treatment room (illness '{}')",
                room,
                self.name()
            )));
        }
        Ok(room)
    }

    pub fn difficulty(&self) -> Factor {
        self.illness.difficulty
    }

    pub fn death(&self) -> Factor {
        self.illness.death
    }

    pub fn decline(&self) -> Factor {
        self.illness.decline
    }

    pub fn difficulty_percent(&self) -> String {
        self.difficulty().percent()
    }

    pub fn death_percent(&self) -> String {
        self.death().percent()
    }

    pub fn decline_percent(&self) -> String {
        self.decline().percent()
    }

    /// Single danger score; unknown factors count as 1.0
    pub fn aggregate_danger(&self, strategy: AggregationStrategy) -> f64 {
        strategy.combine(self.difficulty(), self.death(), self.decline())
    }

    /// Aggregate as a percentage. Never reports missing data: an illness
    /// with no researched factors aggregates to 100%.
    pub fn aggregate_percent(&self, strategy: AggregationStrategy) -> String {
        format_percent(self.aggregate_danger(strategy))
    }
}
