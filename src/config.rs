use crate::error::{GridError, Result};
use crate::grid::{GridGraph, Weight};
use crate::node::Node;
use crate::obstacle::Direction;
use crate::pathfinding::{Heuristic, SearchConfig};
use crate::simulation::{Simulation, DEFAULT_OBSTACLE_WEIGHT, DEFAULT_STATIC_WEIGHT};
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

/// Run configuration, read from TOML. Every field has a default; the
/// defaults describe a 6x6 grid with three static and three moving obstacles.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default = "default_obstacles")]
    pub obstacles: Vec<ObstacleConfig>,
    /// Cells whose incident edges get a higher base weight
    #[serde(default)]
    pub terrain: Vec<TerrainConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchSection {
    #[serde(default = "default_start")]
    pub start: [i32; 2],
    #[serde(default = "default_goal")]
    pub goal: [i32; 2],
    #[serde(default)]
    pub heuristic: Heuristic,
    #[serde(default)]
    pub reopen_closed: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_static_occupied")]
    pub static_occupied: Weight,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_ticks")]
    pub ticks: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObstacleConfig {
    #[serde(default)]
    pub speed: u32,
    #[serde(default = "default_direction")]
    pub direction: Direction,
    #[serde(default = "default_obstacle_weight")]
    pub weight: Weight,
    pub position: [i32; 2],
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TerrainConfig {
    pub cell: [i32; 2],
    pub weight: Weight,
}

// Default values
fn default_width() -> i32 { 6 }
fn default_height() -> i32 { 6 }
fn default_start() -> [i32; 2] { [0, 0] }
fn default_goal() -> [i32; 2] { [5, 5] }
fn default_static_occupied() -> Weight { DEFAULT_STATIC_WEIGHT }
fn default_ticks() -> u64 { 52 }
fn default_direction() -> Direction { Direction::Stationary }
fn default_obstacle_weight() -> Weight { DEFAULT_OBSTACLE_WEIGHT }

fn default_obstacles() -> Vec<ObstacleConfig> {
    let fixed = |x, y| ObstacleConfig {
        speed: 0,
        direction: Direction::Stationary,
        weight: DEFAULT_OBSTACLE_WEIGHT,
        position: [x, y],
    };
    let moving = |x, y, direction| ObstacleConfig {
        speed: 1,
        direction,
        weight: DEFAULT_OBSTACLE_WEIGHT,
        position: [x, y],
    };
    vec![
        fixed(4, 0),
        fixed(3, 2),
        fixed(2, 3),
        moving(5, 1, Direction::Left),
        moving(1, 0, Direction::Up),
        moving(4, 1, Direction::Up),
    ]
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            start: default_start(),
            goal: default_goal(),
            heuristic: Heuristic::default(),
            reopen_closed: false,
        }
    }
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            static_occupied: default_static_occupied(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            search: SearchSection::default(),
            weights: WeightsConfig::default(),
            simulation: SimulationConfig::default(),
            obstacles: default_obstacles(),
            terrain: Vec::new(),
        }
    }
}

impl FromStr for Config {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

impl Config {
    /// Load configuration from `path`, or use defaults if the file doesn't exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config = contents.parse()?;
                info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("No {} found, using default configuration", path.display());
                Ok(Config::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            heuristic: self.search.heuristic,
            reopen_closed: self.search.reopen_closed,
        }
    }

    /// Build the graph (with terrain applied) and the simulation with its
    /// obstacle roster
    pub fn build_simulation(&self) -> Result<Simulation> {
        let mut graph = GridGraph::build(self.grid.width, self.grid.height)?;

        for terrain in &self.terrain {
            let cell = Node::cell(terrain.cell[0], terrain.cell[1]);
            graph.require_cell(cell)?;
            let neighbors = graph.neighbors(cell).to_vec();
            for other in neighbors {
                let base = graph.base_weight(cell, other)?;
                graph.set_weight(cell, other, base.max(terrain.weight))?;
            }
        }

        let start = Node::cell(self.search.start[0], self.search.start[1]);
        let goal = Node::cell(self.search.goal[0], self.search.goal[1]);
        let mut simulation = Simulation::new(graph, start, goal)?
            .with_search(self.search_config())
            .with_static_weight(self.weights.static_occupied);

        for obstacle in &self.obstacles {
            simulation.add_obstacle(
                obstacle.speed,
                obstacle.direction,
                obstacle.weight,
                Node::cell(obstacle.position[0], obstacle.position[1]),
            )?;
        }

        Ok(simulation)
    }
}
