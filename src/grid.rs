use crate::error::{GridError, Result};
use crate::node::Node;
use serde::Serialize;
use std::collections::HashMap;

/// Edge weight. Unsigned, so a weight can never be negative.
pub type Weight = u32;

/// Weight of every edge right after `build`
pub const DEFAULT_WEIGHT: Weight = 1;

/// An edge at this effective weight is treated as cut by the search
pub const IMPASSABLE: Weight = Weight::MAX;

/// Identifies the obstacle that owns a claim on an edge
pub type ObstacleId = usize;

/// Whether an occupied edge belongs to a moving or a static obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyKind {
    Transient,
    Static,
}

/// One obstacle's contribution to an edge weight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Claim {
    pub obstacle: ObstacleId,
    pub weight: Weight,
    pub kind: OccupancyKind,
}

/// Stored once per unordered node pair, so both directions always agree.
#[derive(Debug, Clone)]
struct Edge {
    base: Weight,
    /// Kept sorted by obstacle id
    claims: Vec<Claim>,
}

impl Edge {
    fn new() -> Self {
        Edge {
            base: DEFAULT_WEIGHT,
            claims: Vec::new(),
        }
    }

    /// Strongest claim; the lowest obstacle id wins a tie
    fn strongest(&self) -> Option<&Claim> {
        self.claims
            .iter()
            .fold(None, |best: Option<&Claim>, c| match best {
                Some(b) if b.weight >= c.weight => Some(b),
                _ => Some(c),
            })
    }

    fn effective(&self) -> Weight {
        match self.strongest() {
            Some(claim) => claim.weight.max(self.base),
            None => self.base,
        }
    }
}

/// Edge state handed to renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeSnapshot {
    pub a: Node,
    pub b: Node,
    pub weight: Weight,
    pub occupancy: Option<OccupancyKind>,
}

fn edge_key(a: Node, b: Node) -> (Node, Node) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Weighted undirected grid graph.
///
/// Holds `width * height` cells joined along the axes, plus one center node
/// per unit square joined to its four corners. Nodes and edges are fixed at
/// `build`; only weights change afterwards.
#[derive(Clone, Debug)]
pub struct GridGraph {
    pub width: i32,
    pub height: i32,
    nodes: Vec<Node>,
    adjacency: HashMap<Node, Vec<Node>>,
    edges: HashMap<(Node, Node), Edge>,
    /// Incremented whenever any effective or base weight changes
    revision: u64,
}

impl GridGraph {
    /// Create the full graph with every edge at `DEFAULT_WEIGHT`
    pub fn build(width: i32, height: i32) -> Result<Self> {
        if width < 1 || height < 1 {
            return Err(GridError::InvalidDimension { width, height });
        }

        let mut graph = GridGraph {
            width,
            height,
            nodes: Vec::new(),
            adjacency: HashMap::new(),
            edges: HashMap::new(),
            revision: 0,
        };

        for y in 0..height {
            for x in 0..width {
                let node = Node::cell(x, y);
                let neighbors = graph.cell_neighbors(x, y);
                for &other in &neighbors {
                    graph.edges.entry(edge_key(node, other)).or_insert_with(Edge::new);
                }
                graph.adjacency.insert(node, neighbors);
                graph.nodes.push(node);
            }
        }

        for y in 0..height - 1 {
            for x in 0..width - 1 {
                let center = Node::center(x, y);
                let corners = vec![
                    Node::cell(x, y),
                    Node::cell(x + 1, y),
                    Node::cell(x, y + 1),
                    Node::cell(x + 1, y + 1),
                ];
                graph.adjacency.insert(center, corners);
                graph.nodes.push(center);
            }
        }

        Ok(graph)
    }

    /// Geometric neighbors of a cell: axis neighbors (right, left, up, down)
    /// followed by the centers of the up to four squares touching it.
    fn cell_neighbors(&self, x: i32, y: i32) -> Vec<Node> {
        let mut out = Vec::with_capacity(8);
        for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            if self.in_bounds(x + dx, y + dy) {
                out.push(Node::cell(x + dx, y + dy));
            }
        }
        for (cx, cy) in [(x, y), (x - 1, y), (x, y - 1), (x - 1, y - 1)] {
            if cx >= 0 && cy >= 0 && cx < self.width - 1 && cy < self.height - 1 {
                out.push(Node::center(cx, cy));
            }
        }
        out
    }

    /// Check if `(x, y)` is a valid cell coordinate
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Fails unless `node` is an integer cell of this graph
    pub fn require_cell(&self, node: Node) -> Result<()> {
        match node {
            Node::Cell { x, y } if self.in_bounds(x, y) => Ok(()),
            _ => Err(GridError::PositionNotInGraph(node)),
        }
    }

    /// All nodes: cells row by row, then centers row by row
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes sharing an edge with `node`, in a fixed order. Empty for nodes
    /// outside the graph.
    pub fn neighbors(&self, node: Node) -> &[Node] {
        self.adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    fn edge(&self, u: Node, v: Node) -> Result<&Edge> {
        self.edges
            .get(&edge_key(u, v))
            .ok_or(GridError::EdgeNotFound(u, v))
    }

    /// Effective weight: the base weight raised by the strongest obstacle claim
    pub fn weight(&self, u: Node, v: Node) -> Result<Weight> {
        self.edge(u, v).map(Edge::effective)
    }

    /// Weight the edge falls back to when no obstacle claims it
    pub fn base_weight(&self, u: Node, v: Node) -> Result<Weight> {
        self.edge(u, v).map(|e| e.base)
    }

    /// Kind of the strongest claim on the edge, if any
    pub fn occupancy(&self, u: Node, v: Node) -> Result<Option<OccupancyKind>> {
        self.edge(u, v).map(|e| e.strongest().map(|c| c.kind))
    }

    /// Set the base weight of an edge (both directions at once)
    pub fn set_weight(&mut self, u: Node, v: Node, w: Weight) -> Result<()> {
        let edge = self
            .edges
            .get_mut(&edge_key(u, v))
            .ok_or(GridError::EdgeNotFound(u, v))?;
        if edge.base != w {
            edge.base = w;
            self.revision += 1;
        }
        Ok(())
    }

    /// Put `claim` on every edge incident to the cell `node`, replacing any
    /// earlier claim by the same obstacle on those edges.
    pub fn occupy(&mut self, node: Node, claim: Claim) -> Result<()> {
        self.require_cell(node)?;
        let mut changed = false;
        let neighbors = self.adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[]);
        for &other in neighbors {
            if let Some(edge) = self.edges.get_mut(&edge_key(node, other)) {
                match edge
                    .claims
                    .binary_search_by_key(&claim.obstacle, |c| c.obstacle)
                {
                    Ok(i) => {
                        if edge.claims[i] != claim {
                            edge.claims[i] = claim;
                            changed = true;
                        }
                    }
                    Err(i) => {
                        edge.claims.insert(i, claim);
                        changed = true;
                    }
                }
            }
        }
        if changed {
            self.revision += 1;
        }
        Ok(())
    }

    /// Drop every claim `obstacle` holds on edges incident to the cell `node`
    pub fn release(&mut self, node: Node, obstacle: ObstacleId) -> Result<()> {
        self.require_cell(node)?;
        let mut changed = false;
        let neighbors = self.adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[]);
        for &other in neighbors {
            if let Some(edge) = self.edges.get_mut(&edge_key(node, other)) {
                if let Ok(i) = edge.claims.binary_search_by_key(&obstacle, |c| c.obstacle) {
                    edge.claims.remove(i);
                    changed = true;
                }
            }
        }
        if changed {
            self.revision += 1;
        }
        Ok(())
    }

    /// Every edge once, as `(a, b, effective weight)` with `a < b`
    pub fn edges(&self) -> impl Iterator<Item = (Node, Node, Weight)> + '_ {
        self.edges.iter().map(|(&(a, b), e)| (a, b, e.effective()))
    }

    /// Sorted copy of all edge states
    pub fn snapshot(&self) -> Vec<EdgeSnapshot> {
        let mut out: Vec<EdgeSnapshot> = self
            .edges
            .iter()
            .map(|(&(a, b), e)| EdgeSnapshot {
                a,
                b,
                weight: e.effective(),
                occupancy: e.strongest().map(|c| c.kind),
            })
            .collect();
        out.sort_by(|l, r| (l.a, l.b).cmp(&(r.a, r.b)));
        out
    }

    /// Get current weight revision number
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
