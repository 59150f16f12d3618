use crate::error::Result;
use crate::grid::{EdgeSnapshot, GridGraph, ObstacleId, OccupancyKind, Weight};
use crate::node::Node;
use crate::obstacle::{Direction, Obstacle};
use crate::pathfinding::{format_path, AStar, Path, SearchConfig};
use log::{debug, info};
use serde::Serialize;

/// Weight an obstacle imposes when none is configured
pub const DEFAULT_OBSTACLE_WEIGHT: Weight = 100;

/// Weight a static obstacle holds on its edges once it has been placed
pub const DEFAULT_STATIC_WEIGHT: Weight = 50;

/// Where an obstacle stood at the end of a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Marker {
    pub obstacle: ObstacleId,
    pub position: Node,
    pub kind: OccupancyKind,
}

/// Outcome of one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// Zero-based tick index
    pub tick: u64,
    /// `None` when the goal was unreachable this tick
    pub path: Option<Path>,
    pub markers: Vec<Marker>,
}

/// What a renderer gets to see after each tick
pub struct Frame<'a> {
    pub report: &'a TickReport,
    graph: &'a GridGraph,
}

impl<'a> Frame<'a> {
    pub fn graph(&self) -> &'a GridGraph {
        self.graph
    }

    pub fn snapshot(&self) -> Vec<EdgeSnapshot> {
        self.graph.snapshot()
    }
}

/// Consumer of per-tick frames. Rendering never feeds back into the
/// simulation.
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);
}

impl<F: FnMut(&Frame<'_>)> Renderer for F {
    fn render(&mut self, frame: &Frame<'_>) {
        self(frame)
    }
}

/// Owns the graph and the obstacle roster and advances them one tick at a
/// time: obstacles move in roster order, static obstacles are re-tagged,
/// then a fresh search runs over the settled weights.
pub struct Simulation {
    graph: GridGraph,
    obstacles: Vec<Obstacle>,
    start: Node,
    goal: Node,
    search: SearchConfig,
    static_weight: Weight,
    tick: u64,
}

impl Simulation {
    /// Create a simulation over `graph`. `start` and `goal` stay fixed for the
    /// whole run and must be cells of the graph.
    pub fn new(graph: GridGraph, start: Node, goal: Node) -> Result<Self> {
        graph.require_cell(start)?;
        graph.require_cell(goal)?;
        Ok(Simulation {
            graph,
            obstacles: Vec::new(),
            start,
            goal,
            search: SearchConfig::default(),
            static_weight: DEFAULT_STATIC_WEIGHT,
            tick: 0,
        })
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_static_weight(mut self, weight: Weight) -> Self {
        self.static_weight = weight;
        self
    }

    /// Add an obstacle to the roster. It takes effect on the next `step`.
    pub fn add_obstacle(
        &mut self,
        speed: u32,
        direction: Direction,
        imposed_weight: Weight,
        position: Node,
    ) -> Result<ObstacleId> {
        self.graph.require_cell(position)?;
        let id = self.obstacles.len();
        let obstacle = Obstacle::new(id, speed, direction, imposed_weight, position)?;
        self.obstacles.push(obstacle);
        Ok(id)
    }

    pub fn graph(&self) -> &GridGraph {
        &self.graph
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn start(&self) -> Node {
        self.start
    }

    pub fn goal(&self) -> Node {
        self.goal
    }

    /// Number of ticks completed so far
    pub fn ticks_elapsed(&self) -> u64 {
        self.tick
    }

    /// Run one tick
    pub fn step(&mut self) -> Result<TickReport> {
        let tick = self.tick;

        for obstacle in &mut self.obstacles {
            obstacle.update(&mut self.graph, self.static_weight)?;
        }

        let markers: Vec<Marker> = self
            .obstacles
            .iter()
            .map(|o| Marker {
                obstacle: o.id,
                position: o.position(),
                kind: o.kind(),
            })
            .collect();

        for obstacle in &self.obstacles {
            obstacle.retag_static(&mut self.graph, self.static_weight)?;
        }

        let path = AStar::new(&self.graph, self.search).find_path(self.start, self.goal)?;
        match &path {
            Some(p) => debug!("tick {}: cost {} via {}", tick, p.cost, format_path(&p.nodes)),
            None => info!("tick {}: no path from {} to {}", tick, self.start, self.goal),
        }

        self.tick += 1;
        Ok(TickReport {
            tick,
            path,
            markers,
        })
    }

    /// Run `ticks` steps, handing each frame to `renderer`. Only the last
    /// report is kept; `None` when `ticks` is zero.
    pub fn run<R: Renderer + ?Sized>(
        &mut self,
        ticks: u64,
        renderer: &mut R,
    ) -> Result<Option<TickReport>> {
        let mut last = None;
        for _ in 0..ticks {
            let report = self.step()?;
            renderer.render(&Frame {
                report: &report,
                graph: &self.graph,
            });
            last = Some(report);
        }
        Ok(last)
    }
}
