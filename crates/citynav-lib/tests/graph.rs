mod common;

use citynav_lib::{build_graph, CityRecord, Dataset, DistanceRecord, Error};

use common::romania_graph;

fn city(name: &str, latitude: f64, longitude: f64) -> CityRecord {
    CityRecord {
        name: name.to_string(),
        latitude,
        longitude,
    }
}

fn road(from: &str, to: &str, km: f64) -> DistanceRecord {
    DistanceRecord {
        from: from.to_string(),
        to: to.to_string(),
        km,
    }
}

#[test]
fn fixture_graph_has_expected_shape() {
    let graph = romania_graph();
    assert_eq!(graph.len(), 20);
    assert_eq!(graph.edge_count(), 23);
    assert!(graph.contains("Rimnicu Vilcea"));
    assert_eq!(graph.keys().next(), Some("Arad"));
}

#[test]
fn roads_are_usable_in_both_directions() {
    let graph = romania_graph();
    let arad = graph.node_id("Arad").unwrap();
    let sibiu = graph.node_id("Sibiu").unwrap();
    assert_eq!(graph.edge_weight(arad, sibiu), Some(255.0));
    assert_eq!(graph.edge_weight(sibiu, arad), Some(255.0));

    let bucharest = graph.node_id("Bucharest").unwrap();
    assert_eq!(graph.edge_weight(arad, bucharest), None);
}

#[test]
fn every_road_is_at_least_the_great_circle_distance() {
    let graph = romania_graph();
    for key in graph.keys() {
        let id = graph.node_id(key).unwrap();
        let here = graph.node(id).coordinates;
        for edge in graph.neighbours(id) {
            let there = graph.node(edge.target).coordinates;
            assert!(
                edge.weight >= here.distance_to(&there),
                "{key} -> {} is shorter than the heuristic",
                graph.node(edge.target).key
            );
        }
    }
}

#[test]
fn duplicate_city_fails_the_build() {
    let dataset = Dataset::new(
        vec![city("Arad", 46.18, 21.31), city("Arad", 46.18, 21.31)],
        Vec::new(),
    );
    assert!(matches!(
        build_graph(&dataset),
        Err(Error::DuplicateKey { key }) if key == "Arad"
    ));
}

#[test]
fn road_to_unknown_city_fails_the_build() {
    let dataset = Dataset::new(
        vec![city("Arad", 46.18, 21.31)],
        vec![road("Arad", "Atlantis", 10.0)],
    );
    assert!(matches!(
        build_graph(&dataset),
        Err(Error::UnknownNode { key }) if key == "Atlantis"
    ));
}

#[test]
fn suggestions_are_close_matches() {
    let graph = romania_graph();
    let suggestions = graph.suggest("sibu", 3);
    assert_eq!(suggestions.first().map(String::as_str), Some("Sibiu"));
    assert!(graph.suggest("zzzz", 3).is_empty());
}
