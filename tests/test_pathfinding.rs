mod common;

use common::{assert_contiguous, reference_cost, scramble_weights, visualize_path};
use gridpath::pathfinding::{format_path, path_cost, AStar, Heuristic, SearchConfig};
use gridpath::{find_path, GridGraph, Node, IMPASSABLE};

#[test]
fn test_open_grid() {
    let graph = GridGraph::build(6, 6).unwrap();
    let start = Node::cell(0, 0);
    let dest = Node::cell(5, 5);

    let path = find_path(&graph, start, dest).unwrap().expect("Path should exist");
    println!("{}", visualize_path(&graph, &path));

    assert_eq!(path.start(), Some(start));
    assert_eq!(path.goal(), Some(dest));
    assert_eq!(path.cost, 10);
    assert_eq!(path.len(), 11);
    assert_contiguous(&graph, &path);
}

#[test]
fn test_matches_exhaustive_search_on_scrambled_weights() {
    for seed in 1..=12 {
        let mut graph = GridGraph::build(7, 5).unwrap();
        scramble_weights(&mut graph, seed, 9);

        let start = Node::cell(0, 0);
        let dest = Node::cell(6, 4);
        let path = find_path(&graph, start, dest).unwrap().expect("Path should exist");

        assert_contiguous(&graph, &path);
        assert_eq!(path_cost(&graph, &path.nodes).unwrap(), path.cost);
        assert_eq!(
            Some(path.cost),
            reference_cost(&graph, start, dest),
            "seed {} returned {}",
            seed,
            format_path(&path.nodes)
        );
    }
}

#[test]
fn test_zero_heuristic_and_reopening_agree() {
    let mut graph = GridGraph::build(6, 6).unwrap();
    scramble_weights(&mut graph, 42, 20);
    let (start, dest) = (Node::cell(0, 5), Node::cell(5, 0));

    let configs = [
        SearchConfig::default(),
        SearchConfig {
            heuristic: Heuristic::Zero,
            reopen_closed: false,
        },
        SearchConfig {
            heuristic: Heuristic::Manhattan,
            reopen_closed: true,
        },
    ];
    let costs: Vec<_> = configs
        .iter()
        .map(|c| {
            AStar::new(&graph, *c)
                .find_path(start, dest)
                .unwrap()
                .unwrap()
                .cost
        })
        .collect();

    assert!(costs.iter().all(|&c| c == costs[0]));
    assert_eq!(Some(costs[0]), reference_cost(&graph, start, dest));
}

#[test]
fn test_repeated_searches_are_identical() {
    let mut graph = GridGraph::build(8, 8).unwrap();
    scramble_weights(&mut graph, 7, 3);
    let first = find_path(&graph, Node::cell(1, 1), Node::cell(6, 7)).unwrap();
    for _ in 0..5 {
        assert_eq!(find_path(&graph, Node::cell(1, 1), Node::cell(6, 7)).unwrap(), first);
    }
}

#[test]
fn test_heavy_node_is_detoured() {
    // Only cell (2,2)'s edges are expensive; the route goes around it
    let mut graph = GridGraph::build(5, 5).unwrap();
    let heavy = Node::cell(2, 2);
    let neighbors = graph.neighbors(heavy).to_vec();
    for other in neighbors {
        graph.set_weight(heavy, other, 100).unwrap();
    }

    let path = find_path(&graph, Node::cell(0, 2), Node::cell(4, 2))
        .unwrap()
        .unwrap();
    println!("{}", visualize_path(&graph, &path));
    assert!(!path.nodes.contains(&heavy));
    assert_eq!(Some(path.cost), reference_cost(&graph, Node::cell(0, 2), Node::cell(4, 2)));
}

#[test]
fn test_only_connecting_node_raised_still_routes() {
    // A 3x1 strip has no centers: (1,0) is the only way through
    let mut graph = GridGraph::build(3, 1).unwrap();
    let middle = Node::cell(1, 0);
    graph.set_weight(Node::cell(0, 0), middle, 100).unwrap();
    graph.set_weight(middle, Node::cell(2, 0), 100).unwrap();

    let path = find_path(&graph, Node::cell(0, 0), Node::cell(2, 0))
        .unwrap()
        .expect("Raised weights still allow a path");
    assert_eq!(path.nodes, vec![Node::cell(0, 0), middle, Node::cell(2, 0)]);
    assert_eq!(path.cost, 200);
}

#[test]
fn test_no_path_when_walled_off() {
    let mut graph = GridGraph::build(5, 5).unwrap();
    // Cut every edge touching column x = 2
    for y in 0..5 {
        let cell = Node::cell(2, y);
        let neighbors = graph.neighbors(cell).to_vec();
        for other in neighbors {
            graph.set_weight(cell, other, IMPASSABLE).unwrap();
        }
    }

    let start = Node::cell(0, 0);
    let dest = Node::cell(4, 4);
    assert_eq!(find_path(&graph, start, dest).unwrap(), None);
    assert_eq!(reference_cost(&graph, start, dest), None);

    // Same side of the wall is still reachable
    assert!(find_path(&graph, start, Node::cell(1, 4)).unwrap().is_some());
}

#[test]
fn test_diagonal_moves_go_through_centers() {
    // Axis edges are expensive, so the route has to use centers
    let mut graph = GridGraph::build(4, 4).unwrap();
    let axis: Vec<_> = graph
        .edges()
        .filter(|(a, b, _)| a.is_cell() && b.is_cell())
        .map(|(a, b, _)| (a, b))
        .collect();
    for (a, b) in axis {
        graph.set_weight(a, b, 10).unwrap();
    }

    let path = find_path(&graph, Node::cell(0, 0), Node::cell(3, 3))
        .unwrap()
        .unwrap();
    assert_eq!(
        path.nodes,
        vec![
            Node::cell(0, 0),
            Node::center(0, 0),
            Node::cell(1, 1),
            Node::center(1, 1),
            Node::cell(2, 2),
            Node::center(2, 2),
            Node::cell(3, 3),
        ]
    );
    assert_eq!(path.cost, 6);
}

#[test]
fn test_reopening_recovers_cheaper_route_over_zero_weight_edges() {
    // Zero-weight detour (0,0) -> (1,0) -> (1.5,0.5) -> (1,1) -> (0,1) costs 1,
    // but Manhattan overestimates along it and closes (1,1) too early
    let mut graph = GridGraph::build(3, 2).unwrap();
    graph.set_weight(Node::cell(0, 0), Node::cell(1, 0), 0).unwrap();
    graph.set_weight(Node::cell(1, 0), Node::center(1, 0), 0).unwrap();
    graph.set_weight(Node::cell(1, 1), Node::center(1, 0), 0).unwrap();
    graph.set_weight(Node::cell(0, 0), Node::cell(0, 1), 2).unwrap();

    let (start, dest) = (Node::cell(0, 0), Node::cell(0, 1));
    let expected = reference_cost(&graph, start, dest);
    assert_eq!(expected, Some(1));

    let closed_once = find_path(&graph, start, dest).unwrap().unwrap();
    assert_contiguous(&graph, &closed_once);
    assert_eq!(closed_once.cost, 2);

    let reopening = AStar::new(
        &graph,
        SearchConfig {
            heuristic: Heuristic::Manhattan,
            reopen_closed: true,
        },
    )
    .find_path(start, dest)
    .unwrap()
    .unwrap();
    assert_contiguous(&graph, &reopening);
    assert_eq!(Some(reopening.cost), expected);
    assert_eq!(path_cost(&graph, &reopening.nodes).unwrap(), reopening.cost);
}
