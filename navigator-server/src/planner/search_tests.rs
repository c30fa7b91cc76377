//! Unit tests for route search.

use super::*;
use crate::domain::{BusId, Position, SuggestionKind};
use crate::network::NetworkFile;

fn sid(s: &str) -> StopId {
    StopId::parse(s).unwrap()
}

fn sample() -> (TransitNetwork, Vec<Bus>) {
    NetworkFile::sample().unwrap().into_parts().unwrap()
}

/// The sample stops with only the named sample routes.
fn sample_with_routes(route_ids: &[&str]) -> TransitNetwork {
    let file = NetworkFile::sample().unwrap();
    let routes = file
        .routes
        .into_iter()
        .filter(|r| route_ids.contains(&r.id.as_str()))
        .collect();
    TransitNetwork::new(file.stops, routes).unwrap()
}

fn sample_bus(id: &str) -> Bus {
    let (_, buses) = sample();
    buses.into_iter().find(|b| b.id.as_str() == id).unwrap()
}

fn bus(id: &str, route: &str, index: usize, speed: f64, lat: f64, lng: f64) -> Bus {
    Bus {
        id: BusId::parse(id).unwrap(),
        route_id: RouteId::parse(route).unwrap(),
        current_stop_index: index,
        progress: 0.0,
        speed,
        position: Position::new(lat, lng),
    }
}

/// A line of stops `s0..s{n}` along lat = 0, 10 units apart.
fn line_network(n: usize, routes: Vec<(&str, Vec<&str>)>) -> TransitNetwork {
    let stops = (0..n)
        .map(|i| {
            let id = format!("s{i}");
            Stop::new(sid(&id), id.clone(), Position::new(0.0, i as f64 * 10.0))
        })
        .collect();
    let routes = routes
        .into_iter()
        .map(|(id, stops)| {
            Route::new(
                RouteId::parse(id).unwrap(),
                id,
                stops.into_iter().map(sid).collect(),
            )
        })
        .collect();
    TransitNetwork::new(stops, routes).unwrap()
}

fn find(
    network: &TransitNetwork,
    buses: &[Bus],
    origin: &str,
    destination: &str,
) -> Vec<SuggestedRoute> {
    let config = FinderConfig::default();
    RouteFinder::new(network, &config).find(&sid(origin), &sid(destination), buses)
}

#[test]
fn direct_route_found() {
    let network = sample_with_routes(&["route_A"]);
    let buses = vec![sample_bus("bus_101")];

    let results = find(&network, &buses, "stop_1", "stop_4");

    assert_eq!(results.len(), 1);
    let suggestion = &results[0];
    assert_eq!(suggestion.kind(), SuggestionKind::Direct);

    let leg = suggestion.first_leg();
    assert_eq!(leg.route().id.as_str(), "route_A");
    assert_eq!(leg.start_stop().id.as_str(), "stop_1");
    assert_eq!(leg.end_stop().id.as_str(), "stop_4");
    assert_eq!(leg.bus().id.as_str(), "bus_101");
    // 5 units away at 0.1 per tick = 50, 3 stops * 3 = 9, boarding 5
    assert_eq!(leg.eta(), Eta::Minutes(64));
}

#[test]
fn reverse_direction_is_never_an_estimated_direct() {
    let network = sample_with_routes(&["route_A"]);
    let buses = vec![sample_bus("bus_101")];

    let results = find(&network, &buses, "stop_4", "stop_1");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind(), SuggestionKind::Direct);
    assert_eq!(results[0].first_leg().eta(), Eta::Unavailable);
    assert_eq!(results[0].first_leg().eta().as_signed(), -1);
}

#[test]
fn connecting_route_via_shared_stop() {
    let network = sample_with_routes(&["route_A", "route_C"]);
    let buses = vec![
        sample_bus("bus_101"),
        bus("bus_300", "route_C", 0, 0.08, 5.0, 5.0),
    ];

    let results = find(&network, &buses, "stop_5", "stop_4");

    assert_eq!(results.len(), 1);
    let suggestion = &results[0];
    assert_eq!(suggestion.kind(), SuggestionKind::Connecting);

    let legs = suggestion.legs();
    assert_eq!(legs.len(), 2);
    assert_eq!(legs[0].end_stop().id.as_str(), "stop_2");
    assert_eq!(legs[1].start_stop().id.as_str(), "stop_2");
    assert_eq!(legs[0].route().id.as_str(), "route_C");
    assert_eq!(legs[1].route().id.as_str(), "route_A");
    assert_eq!(legs[0].bus().id.as_str(), "bus_300");
    assert_eq!(legs[1].bus().id.as_str(), "bus_101");

    // 10 / 0.08 = 125, 4 stops * 3 = 12, boarding 5
    assert_eq!(legs[0].eta(), Eta::Minutes(142));
    // 5 / 0.1 = 50, 2 stops * 3 = 6, boarding 5, transfer 5
    assert_eq!(legs[1].eta(), Eta::Minutes(66));
    assert_eq!(suggestion.total_eta(), Eta::Minutes(208));
}

#[test]
fn connection_needs_bus_before_origin() {
    // bus_301 has already passed stop_5 on route_C
    let network = sample_with_routes(&["route_A", "route_C"]);
    let buses = vec![sample_bus("bus_101"), sample_bus("bus_301")];

    assert!(find(&network, &buses, "stop_5", "stop_4").is_empty());
}

#[test]
fn same_stop_returns_nothing() {
    let (network, buses) = sample();
    assert!(find(&network, &buses, "stop_1", "stop_1").is_empty());
}

#[test]
fn unknown_stop_returns_nothing() {
    let (network, buses) = sample();
    assert!(find(&network, &buses, "bogus", "stop_1").is_empty());
    assert!(find(&network, &buses, "stop_1", "bogus").is_empty());
}

#[test]
fn sample_network_direct() {
    let (network, buses) = sample();

    let results = find(&network, &buses, "stop_1", "stop_4");

    // route_C could feed route_A at stop_2, but bus_301 is past stop_1
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind(), SuggestionKind::Direct);
    assert_eq!(results[0].first_leg().bus().id.as_str(), "bus_101");
    assert_eq!(results[0].total_eta(), Eta::Minutes(64));
}

#[test]
fn fallback_when_every_bus_has_passed_origin() {
    let (network, buses) = sample();

    // bus_401 is at the last stop of route_D
    let results = find(&network, &buses, "stop_13", "stop_7");

    assert_eq!(results.len(), 1);
    let leg = results[0].first_leg();
    assert_eq!(leg.route().id.as_str(), "route_D");
    assert_eq!(leg.bus().id.as_str(), "bus_401");
    assert_eq!(leg.eta(), Eta::Unavailable);
}

#[test]
fn fallback_needs_a_bus() {
    let network = sample_with_routes(&["route_A"]);
    assert!(find(&network, &[], "stop_4", "stop_1").is_empty());
}

#[test]
fn no_shared_route_returns_nothing() {
    let (network, buses) = sample();
    // stop_15 is not served by any route
    assert!(find(&network, &buses, "stop_1", "stop_15").is_empty());
}

#[test]
fn nearest_bus_is_assigned() {
    let network = sample_with_routes(&["route_A"]);
    let buses = vec![
        bus("far", "route_A", 0, 0.1, 5.0, 5.0),
        sample_bus("bus_101"),
        sample_bus("bus_102"), // past stop_2
    ];

    let results = find(&network, &buses, "stop_2", "stop_4");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].first_leg().bus().id.as_str(), "bus_101");
}

#[test]
fn distance_tie_goes_to_fewest_stops_remaining() {
    let network = sample_with_routes(&["route_A"]);
    // Both 5 units from stop_2 (5, 15)
    let buses = vec![
        bus("behind", "route_A", 0, 0.1, 5.0, 10.0),
        bus("at_stop", "route_A", 1, 0.1, 5.0, 20.0),
    ];

    let results = find(&network, &buses, "stop_2", "stop_4");

    assert_eq!(results[0].first_leg().bus().id.as_str(), "at_stop");
}

#[test]
fn direct_and_connecting_are_both_offered() {
    let network = line_network(
        3,
        vec![
            ("direct", vec!["s0", "s2"]),
            ("feeder", vec!["s0", "s1"]),
            ("onward", vec!["s1", "s2"]),
        ],
    );
    let buses = vec![
        bus("b_feeder", "feeder", 0, 1.0, 0.0, 0.0),
        bus("b_onward", "onward", 0, 1.0, 0.0, 10.0),
        bus("b_direct", "direct", 0, 0.1, 0.0, 0.0),
    ];

    let results = find(&network, &buses, "s0", "s2");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].kind(), SuggestionKind::Direct);
    assert_eq!(results[1].kind(), SuggestionKind::Connecting);
    assert_eq!(results[1].transfer_stop().unwrap().id.as_str(), "s1");
}

#[test]
fn each_transfer_stop_is_a_separate_connection() {
    let network = line_network(
        4,
        vec![("first", vec!["s0", "s1", "s2"]), ("second", vec!["s1", "s2", "s3"])],
    );
    let buses = vec![
        bus("b1", "first", 0, 1.0, 0.0, 0.0),
        bus("b2", "second", 0, 1.0, 0.0, 10.0),
    ];

    let results = find(&network, &buses, "s0", "s3");

    let transfers: Vec<_> = results
        .iter()
        .map(|s| s.transfer_stop().unwrap().id.to_string())
        .collect();
    assert_eq!(transfers.len(), 2);
    assert!(transfers.contains(&"s1".to_string()));
    assert!(transfers.contains(&"s2".to_string()));
}

#[test]
fn transfer_must_be_reachable_on_second_route() {
    // The onward bus has already passed the transfer stop
    let network = line_network(
        3,
        vec![("feeder", vec!["s0", "s1"]), ("onward", vec!["s1", "s2"])],
    );
    let buses = vec![
        bus("b_feeder", "feeder", 0, 1.0, 0.0, 0.0),
        bus("b_onward", "onward", 1, 1.0, 0.0, 20.0),
    ];

    assert!(find(&network, &buses, "s0", "s2").is_empty());
}

#[test]
fn results_capped_after_ranking() {
    let network = line_network(
        2,
        vec![
            ("r1", vec!["s0", "s1"]),
            ("r2", vec!["s0", "s1"]),
            ("r3", vec!["s0", "s1"]),
            ("r4", vec!["s0", "s1"]),
            ("r5", vec!["s0", "s1"]),
        ],
    );
    // Later routes have faster buses
    let buses = vec![
        bus("b1", "r1", 0, 0.1, 0.0, -50.0),
        bus("b2", "r2", 0, 0.2, 0.0, -50.0),
        bus("b3", "r3", 0, 0.5, 0.0, -50.0),
        bus("b4", "r4", 0, 1.0, 0.0, -50.0),
        bus("b5", "r5", 0, 5.0, 0.0, -50.0),
    ];

    let results = find(&network, &buses, "s0", "s1");

    let routes: Vec<_> = results
        .iter()
        .map(|s| s.first_leg().route().id.to_string())
        .collect();
    assert_eq!(routes, vec!["r5", "r4", "r3"]);
}

#[test]
fn custom_result_cap() {
    let network = line_network(2, vec![("r1", vec!["s0", "s1"]), ("r2", vec!["s0", "s1"])]);
    let buses = vec![
        bus("b1", "r1", 0, 1.0, 0.0, 0.0),
        bus("b2", "r2", 0, 1.0, 0.0, 0.0),
    ];
    let config = FinderConfig::default().with_max_results(1);

    let results = find_suggested_routes(&sid("s0"), &sid("s1"), &network, &buses, &config);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].first_leg().route().id.as_str(), "r1");
}

#[test]
fn buses_on_unknown_routes_are_ignored() {
    let network = sample_with_routes(&["route_A"]);
    let buses = vec![bus("ghost", "route_Z", 0, 0.1, 5.0, 5.0)];

    assert!(find(&network, &buses, "stop_1", "stop_4").is_empty());
}

#[test]
fn inputs_are_not_mutated() {
    let (network, buses) = sample();
    let before = buses.clone();

    let _ = find(&network, &buses, "stop_1", "stop_4");
    let _ = find(&network, &buses, "stop_13", "stop_7");

    assert_eq!(buses, before);
}

#[test]
fn repeated_transfer_stop_is_suggested_once() {
    // s1 appears twice on "first", but it is one transfer
    let network = line_network(
        4,
        vec![("first", vec!["s0", "s1", "s2", "s1"]), ("second", vec!["s1", "s3"])],
    );
    let buses = vec![
        bus("b1", "first", 0, 1.0, 0.0, 0.0),
        bus("b2", "second", 0, 1.0, 0.0, 10.0),
    ];

    let results = find(&network, &buses, "s0", "s3");

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind(), SuggestionKind::Connecting);
    assert_eq!(results[0].transfer_stop().unwrap().id.as_str(), "s1");
}

#[test]
fn fallback_suppressed_when_direct_exists() {
    // "back" runs s1 -> s0, so it would only qualify as a fallback
    let network = line_network(2, vec![("fwd", vec!["s0", "s1"]), ("back", vec!["s1", "s0"])]);
    let buses = vec![
        bus("b_fwd", "fwd", 0, 1.0, 0.0, 0.0),
        bus("b_back", "back", 0, 1.0, 0.0, 10.0),
    ];

    let results = find(&network, &buses, "s0", "s1");

    let found: Vec<_> = results
        .iter()
        .map(|s| (s.first_leg().route().id.to_string(), s.total_eta()))
        .collect();
    // 0 units away, 1 stop * 3, boarding 5
    assert_eq!(found, vec![("fwd".to_string(), Eta::Minutes(8))]);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Sample network with a randomised fleet: each sample bus gets a new
    /// stop index, progress and speed, with its position interpolated
    /// along the route.
    fn random_fleet() -> impl Strategy<Value = Vec<Bus>> {
        let (network, buses) = sample();
        let strategies: Vec<_> = buses
            .into_iter()
            .map(|b| {
                let len = network.route(&b.route_id).unwrap().len();
                (0..len, 0.0..1.0f64, 0.01..1.0f64).prop_map(move |(idx, progress, speed)| {
                    (b.clone(), idx, progress, speed)
                })
            })
            .collect();

        strategies.prop_map(|entries| {
            let (network, _) = sample();
            entries
                .into_iter()
                .map(|(mut b, idx, progress, speed)| {
                    let route = network.route(&b.route_id).unwrap();
                    let from = network.stop(&route.stops[idx]).unwrap();
                    let to = network.stop(&route.stops[(idx + 1) % route.len()]).unwrap();
                    b.current_stop_index = idx;
                    b.progress = progress;
                    b.speed = speed;
                    b.position = from.position.lerp(&to.position, progress);
                    b
                })
                .collect()
        })
    }

    fn stop_name() -> impl Strategy<Value = String> {
        (1..=16u32).prop_map(|n| format!("stop_{n}"))
    }

    fn assert_well_formed(suggestion: &SuggestedRoute) {
        let legs = suggestion.legs();
        match suggestion.kind() {
            SuggestionKind::Direct => assert_eq!(legs.len(), 1),
            SuggestionKind::Connecting => {
                assert_eq!(legs.len(), 2);
                assert_eq!(legs[0].end_stop().id, legs[1].start_stop().id);
            }
        }
        for leg in legs {
            assert!(leg.route().serves(&leg.start_stop().id));
            assert!(leg.route().serves(&leg.end_stop().id));
            assert_eq!(leg.bus().route_id, leg.route().id);
        }
    }

    proptest! {
        #[test]
        fn results_are_well_formed_and_ranked(
            buses in random_fleet(),
            origin in stop_name(),
            destination in stop_name(),
        ) {
            let (network, _) = sample();
            let results = find(&network, &buses, &origin, &destination);

            prop_assert!(results.len() <= FinderConfig::default().max_results);

            if origin == destination {
                prop_assert!(results.is_empty());
            }

            for suggestion in &results {
                assert_well_formed(suggestion);
                prop_assert_eq!(suggestion.first_leg().start_stop().id.as_str(), origin.as_str());
                prop_assert_eq!(
                    suggestion.legs().last().unwrap().end_stop().id.as_str(),
                    destination.as_str()
                );
            }

            // Estimated directs, then estimated connections, then unestimated
            let bands: Vec<u8> = results
                .iter()
                .map(|s| match (s.total_eta().is_available(), s.kind()) {
                    (true, SuggestionKind::Direct) => 0,
                    (true, SuggestionKind::Connecting) => 1,
                    (false, _) => 2,
                })
                .collect();
            prop_assert!(bands.windows(2).all(|w| w[0] <= w[1]));

            for pair in results.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                if a.kind() == b.kind() {
                    if let (Some(x), Some(y)) = (a.total_eta().minutes(), b.total_eta().minutes()) {
                        prop_assert!(x <= y);
                    }
                }
            }
        }

        #[test]
        fn search_is_deterministic(
            buses in random_fleet(),
            origin in stop_name(),
            destination in stop_name(),
        ) {
            let (network, _) = sample();
            let signature = |results: Vec<SuggestedRoute>| -> Vec<(SuggestionKind, Vec<(String, String, String, String, i64)>)> {
                results
                    .iter()
                    .map(|s| {
                        let legs = s
                            .legs()
                            .iter()
                            .map(|l| (
                                l.route().id.to_string(),
                                l.start_stop().id.to_string(),
                                l.end_stop().id.to_string(),
                                l.bus().id.to_string(),
                                l.eta().as_signed(),
                            ))
                            .collect();
                        (s.kind(), legs)
                    })
                    .collect()
            };

            let first = signature(find(&network, &buses, &origin, &destination));
            let second = signature(find(&network, &buses, &origin, &destination));
            prop_assert_eq!(first, second);
        }
    }
}
