use hashbrown::HashSet;
use itertools::Itertools;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skyroute_core::prelude::*;

const L: f64 = DEFAULT_LEO_HEIGHT;
const M: f64 = DEFAULT_MEO_HEIGHT;

/// One cell over everything, level 1 and zero node costs
fn flat_congestion() -> (CongestionMap, NodeCostModel) {
    let mut map = CongestionMap::new();
    map.insert((-10_000.0, -10_000.0), (10_000.0, 10_000.0), 1.0)
        .unwrap();
    (map, NodeCostModel::Scaled { factor: 0.0 })
}

struct Scenario {
    leo: Vec<Position>,
    meo: Vec<Position>,
    congestion: CongestionMap,
    config: RoutingConfig,
}

impl Scenario {
    fn generated(seed: u64, elapsed_ms: f64) -> Self {
        let layout = ConstellationLayout {
            leo: OrbitalShell::leo(200),
            meo: OrbitalShell::meo(50),
            ..ConstellationLayout::default()
        };
        let mut heatmap = CongestionHeatmap::new(HeatmapConfig::default()).unwrap();
        heatmap
            .generate(&mut ChaCha8Rng::seed_from_u64(seed))
            .unwrap();

        Self {
            leo: layout.leo_positions(elapsed_ms),
            meo: layout.meo_positions(elapsed_ms),
            congestion: heatmap.into_map(),
            config: RoutingConfig::default(),
        }
    }

    fn nodes(&self) -> Vec<Position> {
        self.leo.iter().chain(&self.meo).copied().collect()
    }

    fn graph(&self) -> ConstellationGraph {
        build_constellation_graph(&self.nodes(), &self.congestion, &self.config).unwrap()
    }
}

fn endpoints() -> Vec<Position> {
    vec![Position::ground(300.0, 275.0), Position::ground(1475.0, 615.0)]
}

#[test]
fn three_node_chain() {
    let a = Position::new(0.0, 0.0, L);
    let b = Position::new(50.0, 0.0, L);
    let c = Position::new(120.0, 0.0, L);
    let (congestion, node_cost) = flat_congestion();
    let config = RoutingConfig {
        leo_max_reach: 100.0,
        node_cost,
        ..RoutingConfig::default()
    };

    let graph = build_constellation_graph(&[a, b, c], &congestion, &config).unwrap();
    let edges: Vec<Edge> = graph.edges().collect();
    assert_eq!(edges.len(), 2);
    assert_eq!(graph.edge_weight(&a, &b), Some(100.0));
    assert_eq!(graph.edge_weight(&b, &c), Some(140.0));
    assert!(!graph.has_edge(&a, &c));

    let endpoints = [Position::ground(0.0, -5.0), Position::ground(120.0, 5.0)];
    let links = link_endpoints(&endpoints, &[a, b, c], &congestion, &config).unwrap();
    assert_eq!(links[0].node, a);
    assert_eq!(links[1].node, c);

    let route = constellation_routing(&[a, b, c], &[], &endpoints, &congestion, &config).unwrap();
    assert_eq!(route.status, PathStatus::Complete);
    assert_eq!(route.path, vec![a, b, c]);
    assert_eq!(route.cost, 240.0);
    assert_eq!(route.hop_count(), Some(2));
    assert_eq!(route.links, Some((links[0], links[1])));
}

#[test]
fn nodes_outside_congestion_cells_cannot_relay() {
    let a = Position::new(0.0, 0.0, L);
    let b = Position::new(50.0, 0.0, L);
    let c = Position::new(120.0, 0.0, L);
    let config = RoutingConfig {
        leo_max_reach: 100.0,
        ..RoutingConfig::default()
    };
    let endpoints = [Position::ground(0.0, -5.0), Position::ground(120.0, 5.0)];

    let route =
        constellation_routing(&[a, b, c], &[], &endpoints, &CongestionMap::new(), &config)
            .unwrap();

    assert_eq!(route.status, PathStatus::Unreachable);
    assert_eq!(route.path, vec![a, c]);
    assert_eq!(route.cost, f64::INFINITY);
    assert_eq!(route.hop_count(), None);
}

#[test]
fn meo_layer_bridges_leo_gap() {
    // LEO nodes too far apart to link directly, both within MEO reach
    let west = Position::new(0.0, 0.0, L);
    let east = Position::new(300.0, 0.0, L);
    let relay = Position::new(150.0, 0.0, M);
    let (congestion, node_cost) = flat_congestion();
    let config = RoutingConfig {
        node_cost,
        ..RoutingConfig::default()
    };

    let endpoints = [Position::ground(0.0, 0.0), Position::ground(300.0, 0.0)];
    let route =
        constellation_routing(&[west, east], &[relay], &endpoints, &congestion, &config).unwrap();

    assert_eq!(route.path, vec![west, relay, east]);
    assert_eq!(route.cost, 2.0 * 150.0 * 2.5);
}

#[test]
fn congestion_detours_around_hot_node() {
    let a = Position::new(0.0, 0.0, L);
    let hot = Position::new(50.0, 0.0, L);
    let cool = Position::new(50.0, 30.0, L);
    let d = Position::new(100.0, 0.0, L);
    let mut congestion = CongestionMap::new();
    congestion.insert((45.0, -5.0), (55.0, 5.0), 100.0).unwrap();
    congestion.insert((-1000.0, -1000.0), (1000.0, 1000.0), 1.0)
        .unwrap();
    let config = RoutingConfig {
        node_cost: NodeCostModel::Scaled { factor: 1.0 },
        ..RoutingConfig::default()
    };

    let graph = build_constellation_graph(&[a, hot, cool, d], &congestion, &config).unwrap();
    let route = shortest_path(&graph, &a, &d).unwrap();

    assert_eq!(route.path, vec![a, cool, d]);
    assert!(route.is_continuous(&graph));
}

#[test]
fn zero_congestion_keeps_connected_route_complete() {
    // level 0 turns every trailing-distance cost into -1
    let s = Position::new(0.0, 0.0, L);
    let a = Position::new(0.4, 0.0, L);
    let b = Position::new(0.8, 0.0, L);
    let mut congestion = CongestionMap::new();
    congestion.insert((-10.0, -10.0), (10.0, 10.0), 0.0).unwrap();
    let config = RoutingConfig::default();

    let graph = build_constellation_graph(&[s, a, b], &congestion, &config).unwrap();
    assert_eq!(graph.node_cost(&s), Some(-1.0));

    let route = shortest_path(&graph, &s, &b).unwrap();
    assert_eq!(route.status, PathStatus::Complete);
    assert_eq!(route.path, vec![s, a, b]);
    assert!(route.is_continuous(&graph));
    assert!((route.cost - -0.4).abs() < 1e-9);
}

#[test]
fn isolated_destination_is_unreachable() {
    let scenario = Scenario::generated(1, 5_000.0);
    let mut leo = scenario.leo.clone();
    // beyond every reach, so no edge touches it
    let island = Position::new(10_000.0, 10_000.0, L);
    leo.push(island);
    let nodes: Vec<Position> = leo.iter().chain(&scenario.meo).copied().collect();

    let graph = build_constellation_graph(&nodes, &scenario.congestion, &scenario.config).unwrap();
    assert!(graph.neighbors(&island).is_empty());

    let route = shortest_path(&graph, &leo[0], &island).unwrap();
    assert!(!route.is_reachable());
    assert_eq!(route.path, vec![leo[0], island]);
    assert!(!route.is_continuous(&graph));
}

#[test]
fn unknown_nodes_are_rejected() {
    let scenario = Scenario::generated(2, 0.0);
    let graph = scenario.graph();
    let stranger = Position::new(-1.0, -1.0, L);

    let result = shortest_path(&graph, &stranger, &scenario.leo[0]);
    assert!(matches!(result, Err(Error::UnknownNode(p)) if p == stranger));
}

#[test]
fn routing_needs_endpoints() {
    let scenario = Scenario::generated(3, 0.0);
    let result = constellation_routing(
        &scenario.leo,
        &scenario.meo,
        &[],
        &scenario.congestion,
        &scenario.config,
    );
    assert!(matches!(result, Err(Error::NotEnoughEndpoints(0))));
}

#[test]
fn edges_are_symmetric_and_unique() {
    let graph = Scenario::generated(4, 20_000.0).graph();
    let mut seen = HashSet::new();

    for edge in graph.edges() {
        assert!(edge.a < edge.b);
        assert!(seen.insert((edge.a, edge.b)));
        assert!(edge.weight.is_finite() && edge.weight >= 0.0);
        assert!(graph.neighbors(&edge.a).contains(&(edge.b, edge.weight)));
        assert!(graph.neighbors(&edge.b).contains(&(edge.a, edge.weight)));
    }
    assert_eq!(seen.len(), graph.edge_count());
}

#[test]
fn edges_exist_exactly_within_reach() {
    let scenario = Scenario::generated(5, 7_500.0);
    let graph = scenario.graph();
    let config = &scenario.config;

    for (a, b) in scenario.nodes().iter().tuple_combinations() {
        let class = config.classify(a, b);
        let distance = config.link_distance(class, a, b);
        let within = distance <= config.reach(class);

        assert_eq!(graph.has_edge(a, b), within, "{a} - {b}");
        if within {
            let expected = distance * config.multiplier(class);
            assert_eq!(graph.edge_weight(a, b), Some(expected));
        }
    }
}

#[test]
fn node_cost_mapping_covers_every_node() {
    let scenario = Scenario::generated(6, 0.0);
    let graph = scenario.graph();

    assert_eq!(graph.node_costs().count(), scenario.nodes().len());
    // heatmap spans the whole band, so every node can relay
    assert!(graph.node_costs().all(|(_, cost)| cost.is_finite()));
}

#[test]
fn complete_paths_follow_edges() {
    let scenario = Scenario::generated(7, 12_000.0);
    let graph = scenario.graph();
    let links =
        link_endpoints(&endpoints(), &scenario.leo, &scenario.congestion, &scenario.config)
            .unwrap();

    let route = route_between_links(&graph, &links[0], &links[1]).unwrap();
    assert_eq!(route.source(), Some(&links[0].node));
    assert_eq!(route.destination(), Some(&links[1].node));
    if route.is_reachable() {
        assert!(route.is_continuous(&graph));
        assert!(route.cost.is_finite());
    }
}

#[test]
fn builder_is_idempotent() {
    let scenario = Scenario::generated(8, 3_000.0);
    let first = scenario.graph();
    let second = scenario.graph();

    assert_eq!(
        first.edges().collect::<Vec<_>>(),
        second.edges().collect::<Vec<_>>()
    );
    assert_eq!(
        first.node_costs().collect::<Vec<_>>(),
        second.node_costs().collect::<Vec<_>>()
    );
}

#[test]
fn routing_is_deterministic() {
    let scenario = Scenario::generated(9, 45_000.0);
    let run = || {
        constellation_routing(
            &scenario.leo,
            &scenario.meo,
            &endpoints(),
            &scenario.congestion,
            &scenario.config,
        )
        .unwrap()
    };

    assert_eq!(run(), run());
}

#[test]
fn batch_matches_serial() {
    let scenario = Scenario::generated(10, 30_000.0);
    let graph = scenario.graph();
    let pairs = vec![
        (Position::ground(300.0, 275.0), Position::ground(1475.0, 615.0)),
        (Position::ground(100.0, 480.0), Position::ground(900.0, 400.0)),
        (Position::ground(1800.0, 300.0), Position::ground(20.0, 700.0)),
    ];

    let batch = route_pairs(
        &graph,
        &scenario.leo,
        &pairs,
        &scenario.congestion,
        &scenario.config,
    );
    assert_eq!(batch.len(), pairs.len());

    for ((start, end), result) in pairs.iter().zip(batch) {
        let links = link_endpoints(
            &[*start, *end],
            &scenario.leo,
            &scenario.congestion,
            &scenario.config,
        )
        .unwrap();
        let serial = route_between_links(&graph, &links[0], &links[1]).unwrap();
        assert_eq!(result.unwrap(), serial);
    }
}

#[test]
fn route_serializes_to_json() {
    let a = Position::new(0.0, 0.0, L);
    let b = Position::new(50.0, 0.0, L);
    let (congestion, node_cost) = flat_congestion();
    let config = RoutingConfig {
        node_cost,
        ..RoutingConfig::default()
    };
    let graph = build_constellation_graph(&[a, b], &congestion, &config).unwrap();

    let json = shortest_path(&graph, &a, &b).unwrap().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["status"], "complete");
    assert_eq!(value["cost"], 100.0);
    assert_eq!(value["path"][1]["x"], 50.0);
}
