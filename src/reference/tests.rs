use super::*;
use crate::models::{AggregationStrategy, RoomPurpose};
use tempfile::tempdir;

/// Small synthetic dataset shared by the unit tests.
///
/// "Fixture General" has two illnesses producing three edges:
/// Clamp (GP's Office -> Pharmacy) and Loopy (GP's Office -> Ward -> Ward).
pub(crate) const FIXTURE_TOML: &str = r#"
intake_room = "GP's Office"

[[room]]
name = "GP's Office"
purpose = "Diagnostic"

[[room]]
name = "Cardiology"
purpose = "Diagnostic"

[[room]]
name = "Ward"
purpose = "Both"

[[room]]
name = "Ward Annex"
purpose = "Treatment"

[[room]]
name = "Pharmacy"
purpose = "Treatment"

[[room]]
name = "Psychiatry"
purpose = "Both"

[[room]]
name = "Staff Room"

[[illness]]
name = "Clamp"
diagnostic = ["GP's Office"]
treatment = "Pharmacy"
difficulty = 0.1
death = 0.0
decline = 0.75

[[illness]]
name = "Loopy"
diagnostic = ["Ward"]
treatment = "Ward"
difficulty = 0.6

[[illness]]
name = "Mystery"
diagnostic = ["Cardiology", "Psychiatry"]
treatment = "Psychiatry"

[[illness]]
name = "Hollow"
diagnostic = []
treatment = "Pharmacy"

[[illness]]
name = "Untreatable"
diagnostic = ["Cardiology"]

[[illness]]
name = "Misfiled"
diagnostic = ["Pharmacy"]
treatment = "Cardiology"

[[hospital]]
name = "Fixture General"
illnesses = ["Clamp", "Loopy"]

[[hospital]]
name = "Mind Hill"
illnesses = ["Mystery", "Clamp", "Loopy"]

[[hospital]]
name = "Broken Bay"
illnesses = ["Clamp", "Hollow"]

[[hospital]]
name = "Dry Dock"
illnesses = ["Loopy", "Untreatable"]

[[hospital]]
name = "Empty Fields"
illnesses = []
"#;

pub(crate) fn fixture() -> ReferenceData {
    ReferenceData::from_toml_str(FIXTURE_TOML).expect("fixture data parses")
}

#[test]
fn test_builtin_dataset_loads() {
    let data = ReferenceData::builtin().expect("builtin data");
    assert_eq!(data.rooms().len(), 23);
    assert_eq!(data.illnesses().len(), 86);
    assert_eq!(data.hospitals().len(), 33);
    assert_eq!(data.intake_room(), "GP's Office");
}

#[test]
fn test_builtin_dataset_is_consistent() {
    let data = ReferenceData::builtin().expect("builtin data");
    let problems = data.validate();
    assert!(problems.is_empty(), "unexpected problems: {:?}", problems);
}

#[test]
fn test_builtin_sequences_start_at_intake_once() {
    let data = ReferenceData::builtin().expect("builtin data");
    for record in data.illnesses() {
        let illness = data.illness(&record.name).unwrap();
        let sequence = illness.diagnostic_sequence().unwrap();
        assert_eq!(sequence[0], "GP's Office", "{}", record.name);
        assert_eq!(
            sequence.iter().filter(|r| **r == "GP's Office").count(),
            1,
            "{}",
            record.name
        );
    }
}

#[test]
fn test_intake_room_not_duplicated() {
    let data = fixture();
    let clamp = data.illness("Clamp").unwrap();
    assert_eq!(clamp.diagnostic_sequence().unwrap(), vec!["GP's Office"]);
}

#[test]
fn test_intake_room_prepended() {
    let data = fixture();
    let loopy = data.illness("Loopy").unwrap();
    assert_eq!(
        loopy.diagnostic_sequence().unwrap(),
        vec!["GP's Office", "Ward"]
    );
}

#[test]
fn test_unknown_and_empty_names_rejected() {
    let data = fixture();
    assert!(data.illness("Flu").unwrap_err().is_validation());
    assert!(data.illness("").unwrap_err().is_validation());
    assert!(data.hospital("Nowhere").unwrap_err().is_validation());
    assert!(data.hospital("").unwrap_err().is_validation());
}

#[test]
fn test_empty_diagnostic_list_is_configuration_error() {
    let data = fixture();
    let err = data.illness("Hollow").unwrap().diagnostic_sequence().unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_missing_treatment_is_configuration_error() {
    let data = fixture();
    let err = data.illness("Untreatable").unwrap().treatment_room().unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_wrong_purpose_rooms_rejected() {
    let data = fixture();
    let misfiled = data.illness("Misfiled").unwrap();
    assert!(misfiled.diagnostic_sequence().unwrap_err().is_validation());
    assert!(misfiled.treatment_room().unwrap_err().is_validation());
}

#[test]
fn test_clamp_average_is_28_percent() {
    let data = ReferenceData::builtin().unwrap();
    let clamp = data.illness("Clamp").unwrap();
    let average = clamp.aggregate_danger(AggregationStrategy::Average);
    assert!((average - 0.85 / 3.0).abs() < 1e-9);
    assert_eq!(clamp.aggregate_percent(AggregationStrategy::Average), "28%");
    assert_eq!(clamp.aggregate_percent(AggregationStrategy::Product), "0%");
    assert_eq!(clamp.aggregate_percent(AggregationStrategy::Blended), "14%");
    assert_eq!(clamp.difficulty_percent(), "10%");
    assert_eq!(clamp.death_percent(), "0%");
    assert_eq!(clamp.decline_percent(), "75%");
}

#[test]
fn test_all_unknown_factors_aggregate_to_one() {
    let data = fixture();
    let mystery = data.illness("Mystery").unwrap();
    assert_eq!(mystery.difficulty_percent(), "MISSING DATA");
    for strategy in AggregationStrategy::all() {
        assert_eq!(mystery.aggregate_danger(*strategy), 1.0);
        assert_eq!(mystery.aggregate_percent(*strategy), "100%");
    }
}

#[test]
fn test_partially_unknown_factors_use_neutral_value() {
    let data = fixture();
    let loopy = data.illness("Loopy").unwrap();
    assert!((loopy.aggregate_danger(AggregationStrategy::Product) - 0.6).abs() < 1e-9);
    let expected_average = (0.6 + 1.0 + 1.0) / 3.0;
    assert!((loopy.aggregate_danger(AggregationStrategy::Average) - expected_average).abs() < 1e-9);
}

#[test]
fn test_hospital_room_lists() {
    let data = fixture();
    let hospital = data.hospital("Fixture General").unwrap();
    assert!(hospital.is_documented());
    assert_eq!(
        hospital.diagnostic_rooms(false).unwrap(),
        vec!["GP's Office", "Ward"]
    );
    assert_eq!(
        hospital.treatment_rooms(false).unwrap(),
        vec!["Pharmacy", "Ward"]
    );
    assert_eq!(
        hospital.rooms(true).unwrap(),
        vec!["GP's Office", "Pharmacy", "Ward"]
    );
}

#[test]
fn test_undocumented_hospital() {
    let data = fixture();
    let hospital = data.hospital("Empty Fields").unwrap();
    assert!(!hospital.is_documented());
    assert!(hospital.illnesses().unwrap().is_empty());
}

#[test]
fn test_lookup_room_prefix_prefers_longest() {
    let data = fixture();
    assert_eq!(data.lookup_room_prefix("Ward (treat)").unwrap().name, "Ward");
    assert_eq!(data.lookup_room_prefix("ward (diag)").unwrap().name, "Ward");
    assert_eq!(
        data.lookup_room_prefix("Ward Annex (treat)").unwrap().name,
        "Ward Annex"
    );
    assert!(data.lookup_room_prefix("Surgery").is_none());
}

#[test]
fn test_room_purpose_may_be_absent() {
    let data = fixture();
    let staff = data.room("Staff Room").unwrap();
    assert_eq!(staff.purpose, None);
    assert_eq!(data.room("Ward").unwrap().purpose, Some(RoomPurpose::Both));
}

#[test]
fn test_validate_reports_each_defect() {
    let data = fixture();
    let problems = data.validate();
    let messages: Vec<String> = problems.iter().map(|p| p.to_string()).collect();
    assert!(problems.iter().all(|p| p.is_configuration()));
    assert!(messages.iter().any(|m| m.contains("Hollow")));
    assert!(messages.iter().any(|m| m.contains("Untreatable")));
    assert_eq!(
        messages.iter().filter(|m| m.contains("Misfiled")).count(),
        2
    );
}

#[test]
fn test_duplicate_names_rejected() {
    let rooms = vec![
        Room::new("Ward", RoomPurpose::Both),
        Room::new("Ward", RoomPurpose::Treatment),
    ];
    let err = ReferenceData::new("Ward", rooms, vec![], vec![]).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let err = ReferenceData::from_toml_str("this is [[ not toml").unwrap_err();
    assert!(matches!(err, TpsError::Parse(_)));
}

#[test]
fn test_load_from_file() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("data.toml");
    std::fs::write(&path, FIXTURE_TOML).unwrap();

    let data = ReferenceData::load(&path).expect("load fixture");
    assert_eq!(data.hospitals().len(), 5);
    assert!(matches!(
        ReferenceData::load(&dir.path().join("missing.toml")),
        Err(TpsError::Io(_))
    ));
}
