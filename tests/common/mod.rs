#![allow(dead_code)]

use gridpath::pathfinding::Cost;
use gridpath::{GridGraph, Node, Path, IMPASSABLE};
use std::collections::HashMap;

/// Plain O(V^2) Dijkstra used as an independent reference for A*
pub fn reference_cost(graph: &GridGraph, start: Node, goal: Node) -> Option<Cost> {
    let mut dist: HashMap<Node, Cost> = HashMap::new();
    let mut done: Vec<Node> = Vec::new();
    dist.insert(start, 0);

    loop {
        let next = dist
            .iter()
            .filter(|(n, _)| !done.contains(*n))
            .min_by_key(|(n, d)| (**d, **n))
            .map(|(n, d)| (*n, *d));
        let Some((node, d)) = next else {
            return None;
        };
        if node == goal {
            return Some(d);
        }
        done.push(node);
        for &other in graph.neighbors(node) {
            let w = graph.weight(node, other).unwrap();
            if w == IMPASSABLE {
                continue;
            }
            let candidate = d + Cost::from(w);
            let entry = dist.entry(other).or_insert(Cost::MAX);
            if candidate < *entry {
                *entry = candidate;
            }
        }
    }
}

/// Every consecutive pair of the path must be a real edge
pub fn assert_contiguous(graph: &GridGraph, path: &Path) {
    for (a, b) in path.edges() {
        assert!(
            graph.weight(a, b).is_ok(),
            "path jumps from {} to {} without an edge",
            a,
            b
        );
    }
}

/// Deterministic pseudo-random base weights in `1..=max`
pub fn scramble_weights(graph: &mut GridGraph, seed: u64, max: u32) {
    let mut state = seed;
    let mut edges: Vec<(Node, Node)> = graph.edges().map(|(a, b, _)| (a, b)).collect();
    edges.sort();
    for (a, b) in edges {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let w = (state >> 33) as u32 % max + 1;
        graph.set_weight(a, b, w).unwrap();
    }
}

/// Visualize a path on the grid, top row first
pub fn visualize_path(graph: &GridGraph, path: &Path) -> String {
    let mut result = String::new();
    for y in (0..graph.height).rev() {
        for x in 0..graph.width {
            let node = Node::cell(x, y);
            let symbol = if Some(node) == path.start() {
                'S'
            } else if Some(node) == path.goal() {
                'D'
            } else if path.nodes.contains(&node) {
                '*'
            } else {
                '.'
            };
            result.push(symbol);
        }
        result.push('\n');
    }
    result
}
