pub mod config;
pub mod error;
pub mod grid;
pub mod node;
pub mod obstacle;
pub mod pathfinding;
pub mod simulation;

pub use config::Config;
pub use error::{GridError, Result};
pub use grid::{GridGraph, Weight, DEFAULT_WEIGHT, IMPASSABLE};
pub use node::Node;
pub use obstacle::{Direction, Obstacle};
pub use pathfinding::{find_path, AStar, Path};
pub use simulation::{Frame, Renderer, Simulation, TickReport};
