//! Two Point Science - room graphs for Two Point Hospital
//!
//! Reference data for hospitals, illnesses and rooms, the patient-movement
//! edges derived from it, room and danger tables, and Graphviz output.

pub mod config;
pub mod error;
pub mod graph;
pub mod models;
pub mod reference;
pub mod reporters;

pub use error::{TpsError, TpsResult};
