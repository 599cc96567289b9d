use super::*;
use crate::models::Edge;
use crate::reference::tests::fixture;
use crate::reference::ReferenceData;
use tempfile::tempdir;

fn edges_for(data: &ReferenceData, hospital: &str, separate: bool) -> Vec<Edge> {
    let hospital = data.hospital(hospital).unwrap();
    build_edges(&hospital, separate, None).unwrap()
}

#[test]
fn test_edges_follow_illness_order() {
    let data = fixture();
    let edges = edges_for(&data, "Fixture General", false);
    assert_eq!(
        edges,
        vec![
            Edge::new("GP's Office", "Pharmacy"),
            Edge::new("GP's Office", "Ward"),
            Edge::new("Ward", "Ward"),
        ]
    );
}

#[test]
fn test_separated_dual_purpose_labels() {
    let data = fixture();
    let edges = edges_for(&data, "Fixture General", true);
    assert_eq!(
        edges,
        vec![
            Edge::new("GP's Office", "Pharmacy"),
            Edge::new("GP's Office", "Ward (diag)"),
            Edge::new("Ward (diag)", "Ward (treat)"),
        ]
    );
}

#[test]
fn test_build_edges_is_idempotent() {
    let data = fixture();
    let first = edges_for(&data, "Mind Hill", true);
    let second = edges_for(&data, "Mind Hill", true);
    assert_eq!(first, second);
}

#[test]
fn test_edge_count_matches_sequence_lengths_for_builtin_hospitals() {
    let data = ReferenceData::builtin().unwrap();
    for record in data.hospitals() {
        let hospital = data.hospital(&record.name).unwrap();
        if !hospital.is_documented() {
            continue;
        }
        let expected: usize = hospital
            .illnesses()
            .unwrap()
            .iter()
            .map(|illness| illness.diagnostic_sequence().unwrap().len())
            .sum();
        for separate in [false, true] {
            let edges = build_edges(&hospital, separate, None).unwrap();
            assert_eq!(edges.len(), expected, "{}", record.name);
        }
    }
}

#[test]
fn test_single_illness_edges() {
    let data = fixture();
    let mystery = data.illness("Mystery").unwrap();
    let edges = build_illness_edges(&mystery, true).unwrap();
    assert_eq!(
        edges,
        vec![
            Edge::new("GP's Office", "Cardiology"),
            Edge::new("Cardiology", "Psychiatry (diag)"),
            Edge::new("Psychiatry (diag)", "Psychiatry (treat)"),
        ]
    );
}

#[test]
fn test_focus_room_filters_edges() {
    let data = fixture();
    let hospital = data.hospital("Fixture General").unwrap();

    let pharmacy = build_edges(&hospital, false, Some("Pharmacy")).unwrap();
    assert_eq!(pharmacy, vec![Edge::new("GP's Office", "Pharmacy")]);

    // a plain name matches both role variants
    let ward = build_edges(&hospital, true, Some("Ward")).unwrap();
    assert_eq!(ward.len(), 2);

    let treat_only = build_edges(&hospital, true, Some("Ward (treat)")).unwrap();
    assert_eq!(treat_only, vec![Edge::new("Ward (diag)", "Ward (treat)")]);
}

#[test]
fn test_filter_focus_matches_exact_or_base_name() {
    let edges = vec![
        Edge::new("GP's Office", "Ward (diag)"),
        Edge::new("Ward (diag)", "Ward (treat)"),
        Edge::new("GP's Office", "Pharmacy"),
    ];

    let diag = filter_focus(edges.clone(), "Ward (diag)");
    assert_eq!(diag.len(), 2);
    assert!(diag.iter().all(|edge| edge.touches("Ward (diag)")));

    assert_eq!(filter_focus(edges.clone(), "Ward").len(), 2);
    assert_eq!(
        filter_focus(edges, "Pharmacy"),
        vec![Edge::new("GP's Office", "Pharmacy")]
    );
}

#[test]
fn test_unknown_focus_room_gives_no_edges() {
    let data = fixture();
    let hospital = data.hospital("Fixture General").unwrap();
    assert!(build_edges(&hospital, false, Some("Surgery"))
        .unwrap()
        .is_empty());
}

#[test]
fn test_hospital_without_illnesses_is_configuration_error() {
    let data = fixture();
    let hospital = data.hospital("Empty Fields").unwrap();
    let err = build_edges(&hospital, false, None).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "Configuration error: Empty Fields is not configured with illnesses"
    );
}

#[test]
fn test_incomplete_illness_names_its_hospital() {
    let data = fixture();

    let broken = data.hospital("Broken Bay").unwrap();
    let err = build_edges(&broken, false, None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Configuration error: Broken Bay has an illness, Hollow, missing a list of diagnostic rooms"
    );

    let dry = data.hospital("Dry Dock").unwrap();
    let err = build_edges(&dry, false, None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Configuration error: Dry Dock has an illness, Untreatable, missing a treatment room"
    );
}

#[test]
fn test_base_room_name() {
    assert_eq!(base_room_name("Ward (diag)"), "Ward");
    assert_eq!(base_room_name("Ward (treat)"), "Ward");
    assert_eq!(base_room_name("Pharmacy"), "Pharmacy");
}

#[test]
fn test_counts_total_twice_the_edges() {
    let data = fixture();
    let edges = edges_for(&data, "Fixture General", false);
    let counts = count_rooms(&edges, false);
    assert_eq!(counts.total(), 6);
    assert_eq!(counts.get("GP's Office"), Some(2));
    assert_eq!(counts.get("Pharmacy"), Some(1));
    assert_eq!(counts.get("Ward"), Some(3));
    assert_eq!(
        counts.iter().map(|(room, _)| room).collect::<Vec<_>>(),
        vec!["GP's Office", "Pharmacy", "Ward"]
    );
}

#[test]
fn test_counts_keep_or_fold_role_suffixes() {
    let data = fixture();
    let edges = edges_for(&data, "Fixture General", true);

    let separated = count_rooms(&edges, true);
    assert_eq!(separated.get("Ward (diag)"), Some(2));
    assert_eq!(separated.get("Ward (treat)"), Some(1));
    assert_eq!(separated.get("Ward"), None);

    let folded = count_rooms(&edges, false);
    assert_eq!(folded.get("Ward"), Some(3));
    assert_eq!(folded.len(), 3);
}

#[test]
fn test_same_room_edge_counts_twice() {
    let counts = count_rooms(&[Edge::new("Psychiatry", "Psychiatry")], false);
    assert_eq!(counts.get("Psychiatry"), Some(2));
}

#[test]
fn test_empty_edges_count_nothing() {
    let counts = count_rooms(&[], true);
    assert!(counts.is_empty());
    assert_eq!(counts.total(), 0);
}

#[test]
fn test_room_graph_structure() {
    let data = fixture();
    let edges = edges_for(&data, "Fixture General", false);
    let graph = RoomGraph::from_edges("Fixture General", &edges);

    assert_eq!(graph.name(), "Fixture General");
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 3);
    assert!(!graph.to_dot().contains("Surgery"));
}

#[test]
fn test_parallel_edges_are_kept() {
    let edges = vec![Edge::new("A", "B"), Edge::new("A", "B")];
    let graph = RoomGraph::from_edges("Twice", &edges);
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn test_to_dot() {
    let data = fixture();
    let edges = edges_for(&data, "Fixture General", false);
    let graph = RoomGraph::from_edges("Fixture General", &edges);
    assert_eq!(
        graph.to_dot(),
        "digraph \"Fixture General\" {\n\
         \t\"GP's Office\" -> \"Pharmacy\"\n\
         \t\"GP's Office\" -> \"Ward\"\n\
         \t\"Ward\" -> \"Ward\"\n\
         }\n"
    );
}

#[test]
fn test_to_dot_escapes_quotes_and_backslashes() {
    let graph = RoomGraph::from_edges("Say \"hi\"", &[Edge::new("C:\\Rooms", "Ward")]);
    let dot = graph.to_dot();
    assert!(dot.starts_with("digraph \"Say \\\"hi\\\"\" {\n"));
    assert!(dot.contains("\t\"C:\\\\Rooms\" -> \"Ward\"\n"));
}

#[test]
fn test_engine_and_format_parsing() {
    assert_eq!("NEATO".parse::<Engine>().unwrap(), Engine::Neato);
    assert_eq!("twopi".parse::<Engine>().unwrap(), Engine::Twopi);
    assert!("circle".parse::<Engine>().unwrap_err().is_invalid_argument());

    assert_eq!("svg".parse::<ImageFormat>().unwrap(), ImageFormat::Svg);
    assert!("jpeg".parse::<ImageFormat>().unwrap_err().is_invalid_argument());
    assert_eq!(Engine::default(), Engine::Dot);
    assert_eq!(ImageFormat::default(), ImageFormat::Png);
}

#[test]
fn test_file_stem_replaces_separators() {
    assert_eq!(render::file_stem("Grockle Bay", Engine::Dot), "Grockle Bay (dot)");
    assert_eq!(render::file_stem("A/B\\C", Engine::Fdp), "A_B_C (fdp)");
}

#[test]
fn test_write_graph_source_only() {
    let dir = tempdir().expect("create temp dir");
    let data = fixture();
    let edges = edges_for(&data, "Fixture General", false);
    let graph = RoomGraph::from_edges("Fixture General", &edges);

    let output = write_graph(&graph, dir.path(), "Fixture General", Engine::Sfdp, None).unwrap();
    assert_eq!(output.source, dir.path().join("Fixture General (sfdp).gv"));
    assert_eq!(output.image, None);
    let written = std::fs::read_to_string(&output.source).unwrap();
    assert_eq!(written, graph.to_dot());
}

#[test]
fn test_write_graph_creates_missing_directory() {
    let dir = tempdir().expect("create temp dir");
    let nested = dir.path().join("graphs").join("today");
    let graph = RoomGraph::from_edges("Tiny", &[Edge::new("A", "B")]);

    let output = write_graph(&graph, &nested, "Tiny", Engine::Dot, None).unwrap();
    assert!(output.source.exists());
}
