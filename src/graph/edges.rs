//! Edge builder: the room-to-room moves a patient makes for each illness
//!
//! Edges keep the order of the hospital's illness list and of each
//! diagnostic sequence. Duplicates are kept on purpose: the same move made
//! for several illnesses is more traffic through those rooms.

use crate::error::{TpsError, TpsResult};
use crate::models::Edge;
use crate::reference::{HospitalView, IllnessView, ReferenceData};
use tracing::debug;

/// Suffix for a dual-purpose room used to diagnose
pub const DIAG_SUFFIX: &str = " (diag)";
/// Suffix for a dual-purpose room used to treat
pub const TREAT_SUFFIX: &str = " (treat)";

/// Which role a room plays on an edge endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomRole {
    Diagnosis,
    Treatment,
}

/// Name shown on the graph for `room` in `role`.
///
/// Dual-purpose rooms get a role suffix when `separate_dual_purpose` is set;
/// every other room keeps its plain name.
pub fn display_name(
    data: &ReferenceData,
    room: &str,
    role: RoomRole,
    separate_dual_purpose: bool,
) -> String {
    if separate_dual_purpose && data.is_dual_purpose(room) {
        let suffix = match role {
            RoomRole::Diagnosis => DIAG_SUFFIX,
            RoomRole::Treatment => TREAT_SUFFIX,
        };
        format!("{room}{suffix}")
    } else {
        room.to_string()
    }
}

/// Strip a ` (diag)` / ` (treat)` suffix from a display name
pub fn base_room_name(display_name: &str) -> &str {
    display_name
        .strip_suffix(DIAG_SUFFIX)
        .or_else(|| display_name.strip_suffix(TREAT_SUFFIX))
        .unwrap_or(display_name)
}

/// Edges for a single illness: diagnosis chain, then the treatment move
pub fn build_illness_edges(
    illness: &IllnessView<'_>,
    separate_dual_purpose: bool,
) -> TpsResult<Vec<Edge>> {
    let data = illness.data();
    let sequence = illness.diagnostic_sequence()?;
    let treatment = illness.treatment_room()?;

    let diag = |room: &str| display_name(data, room, RoomRole::Diagnosis, separate_dual_purpose);

    let mut edges = Vec::with_capacity(sequence.len());
    for pair in sequence.windows(2) {
        edges.push(Edge::new(diag(pair[0]), diag(pair[1])));
    }

    // diagnostic_sequence never returns an empty list
    if let Some(&last) = sequence.last() {
        edges.push(Edge::new(
            diag(last),
            display_name(data, treatment, RoomRole::Treatment, separate_dual_purpose),
        ));
    }

    Ok(edges)
}

/// Edges for every illness in a hospital.
///
/// With `focus_room`, only edges touching that room are kept. Display names
/// are generated before filtering, so the focus may be a plain room name
/// (matching all its variants) or an exact display name such as
/// `Ward (treat)`.
pub fn build_edges(
    hospital: &HospitalView<'_>,
    separate_dual_purpose: bool,
    focus_room: Option<&str>,
) -> TpsResult<Vec<Edge>> {
    let illnesses = hospital.illnesses()?;
    if illnesses.is_empty() {
        return Err(TpsError::configuration(
            hospital.name(),
            "is not configured with illnesses",
        ));
    }

    let mut edges = Vec::new();
    for illness in &illnesses {
        let illness_edges = build_illness_edges(illness, separate_dual_purpose)
            .map_err(|e| e.within(hospital.name()))?;
        edges.extend(illness_edges);
    }
    debug!(
        hospital = hospital.name(),
        illnesses = illnesses.len(),
        edges = edges.len(),
        "Built hospital edges"
    );

    Ok(match focus_room {
        Some(focus) => filter_focus(edges, focus),
        None => edges,
    })
}

/// Keep the edges with an endpoint matching `focus`
pub fn filter_focus(edges: Vec<Edge>, focus: &str) -> Vec<Edge> {
    let before = edges.len();
    let kept: Vec<Edge> = edges
        .into_iter()
        .filter(|edge| {
            edge.touches(focus)
                || base_room_name(&edge.from) == focus
                || base_room_name(&edge.to) == focus
        })
        .collect();
    debug!(focus, before, after = kept.len(), "Filtered edges by focus room");
    kept
}
