use crate::error::Result;
use crate::grid::{GridGraph, IMPASSABLE};
use crate::node::Node;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Accumulated path cost
pub type Cost = u64;

/// Estimate of the remaining cost to the goal.
///
/// `Manhattan` never overestimates while every edge weight is at least 1: an
/// axis edge moves one unit, and a cell-to-center hop moves half a unit on
/// each axis. Edges of weight 0 can make it overestimate, in which case the
/// returned path may not be the cheapest. `Zero` turns the search into
/// Dijkstra and is exact for any weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heuristic {
    #[default]
    Manhattan,
    Zero,
}

impl Heuristic {
    pub fn estimate(self, from: Node, goal: Node) -> Cost {
        match self {
            Heuristic::Manhattan => from.manhattan(&goal),
            Heuristic::Zero => 0,
        }
    }
}

/// A* search settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchConfig {
    pub heuristic: Heuristic,
    /// When false (the default) a finalized node is never expanded again,
    /// even if a cheaper route to it turns up later. When true, such a node
    /// is re-opened.
    pub reopen_closed: bool,
}

/// A start-to-goal route, both ends included
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path {
    pub nodes: Vec<Node>,
    pub cost: Cost,
}

impl Path {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn start(&self) -> Option<Node> {
        self.nodes.first().copied()
    }

    pub fn goal(&self) -> Option<Node> {
        self.nodes.last().copied()
    }

    /// Consecutive node pairs
    pub fn edges(&self) -> impl Iterator<Item = (Node, Node)> + '_ {
        self.nodes.windows(2).map(|w| (w[0], w[1]))
    }
}

/// An entry in the open list
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    node: Node,
    g_cost: Cost,
    f_cost: Cost,
    /// Insertion order, breaks ties between equal `f_cost`
    seq: u64,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.seq == other.seq
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other
            .f_cost
            .cmp(&self.f_cost)
            // Tie-breaker: first pushed pops first
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A* over the current weights of a `GridGraph`.
///
/// Every call starts from scratch; nothing is carried between searches.
pub struct AStar<'a> {
    graph: &'a GridGraph,
    config: SearchConfig,
}

impl<'a> AStar<'a> {
    pub fn new(graph: &'a GridGraph, config: SearchConfig) -> Self {
        AStar { graph, config }
    }

    pub fn with_defaults(graph: &'a GridGraph) -> Self {
        Self::new(graph, SearchConfig::default())
    }

    /// Find the cheapest path from `start` to `goal`.
    ///
    /// Returns `Ok(None)` when the goal cannot be reached without crossing an
    /// `IMPASSABLE` edge. Both endpoints must be cells of the graph.
    pub fn find_path(&self, start: Node, goal: Node) -> Result<Option<Path>> {
        self.graph.require_cell(start)?;
        self.graph.require_cell(goal)?;

        let heuristic = self.config.heuristic;
        let mut open = BinaryHeap::new();
        let mut closed: HashSet<Node> = HashSet::new();
        let mut g_costs: HashMap<Node, Cost> = HashMap::new();
        let mut parents: HashMap<Node, Node> = HashMap::new();
        let mut seq = 0u64;
        let mut nodes_expanded = 0usize;

        g_costs.insert(start, 0);
        open.push(OpenNode {
            node: start,
            g_cost: 0,
            f_cost: heuristic.estimate(start, goal),
            seq,
        });

        while let Some(current) = open.pop() {
            // Skip stale entries left behind by later improvements
            if closed.contains(&current.node) || current.g_cost > g_costs[&current.node] {
                continue;
            }

            if current.node == goal {
                let path = reconstruct(&parents, start, goal, current.g_cost);
                debug!(
                    "[AStar] {} -> {}: {} nodes, cost {}, expanded {}",
                    start,
                    goal,
                    path.len(),
                    path.cost,
                    nodes_expanded
                );
                return Ok(Some(path));
            }

            closed.insert(current.node);
            nodes_expanded += 1;
            trace!(
                "[AStar] expand {} g={} f={}",
                current.node,
                current.g_cost,
                current.f_cost
            );

            for &next in self.graph.neighbors(current.node) {
                if !self.config.reopen_closed && closed.contains(&next) {
                    continue;
                }
                let weight = self.graph.weight(current.node, next)?;
                if weight == IMPASSABLE {
                    continue;
                }

                let tentative = current.g_cost + Cost::from(weight);
                let improves = g_costs.get(&next).map_or(true, |&old| tentative < old);
                if improves {
                    g_costs.insert(next, tentative);
                    parents.insert(next, current.node);
                    closed.remove(&next);
                    seq += 1;
                    open.push(OpenNode {
                        node: next,
                        g_cost: tentative,
                        f_cost: tentative + heuristic.estimate(next, goal),
                        seq,
                    });
                }
            }
        }

        debug!(
            "[AStar] {} -> {}: no path after expanding {} nodes",
            start, goal, nodes_expanded
        );
        Ok(None)
    }
}

fn reconstruct(parents: &HashMap<Node, Node>, start: Node, goal: Node, cost: Cost) -> Path {
    let mut nodes = vec![goal];
    let mut current = goal;
    while current != start {
        current = parents[&current];
        nodes.push(current);
    }
    nodes.reverse();
    Path { nodes, cost }
}

/// Find a path with the default search settings
pub fn find_path(graph: &GridGraph, start: Node, goal: Node) -> Result<Option<Path>> {
    AStar::with_defaults(graph).find_path(start, goal)
}

/// Sum of the current weights along `nodes`. Fails if two consecutive nodes
/// are not joined by an edge.
pub fn path_cost(graph: &GridGraph, nodes: &[Node]) -> Result<Cost> {
    nodes
        .windows(2)
        .try_fold(0, |acc: Cost, w| -> Result<Cost> {
            Ok(acc + Cost::from(graph.weight(w[0], w[1])?))
        })
}

/// Format path for display
pub fn format_path(path: &[Node]) -> String {
    if path.is_empty() {
        return "No path".to_string();
    }

    path.iter()
        .map(Node::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
