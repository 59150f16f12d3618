use crate::error::{GridError, Result};
use crate::grid::{Claim, GridGraph, ObstacleId, OccupancyKind, Weight};
use crate::node::Node;
use log::{debug, info, trace};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Heading of an obstacle. `Up` is +y, `Right` is +x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Stationary,
}

impl Direction {
    /// Unit step `(dx, dy)`
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Stationary => (0, 0),
        }
    }
}

impl FromStr for Direction {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            "none" | "stationary" => Ok(Direction::Stationary),
            _ => Err(GridError::UnknownDirection(s.to_string())),
        }
    }
}

impl TryFrom<String> for Direction {
    type Error = GridError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Stationary => "none",
        };
        f.write_str(tag)
    }
}

/// A moving or static obstacle that raises the weights of the edges around
/// the cell it occupies.
#[derive(Clone, Debug)]
pub struct Obstacle {
    pub id: ObstacleId,
    /// Cells travelled per tick
    pub speed: u32,
    pub direction: Direction,
    /// Weight put on incident edges while moving (and on a static obstacle's
    /// first tick)
    pub imposed_weight: Weight,
    position: Node,
    /// Set after the first `update`
    placed: bool,
}

impl Obstacle {
    /// Create an obstacle. `speed == 0` must come with `Direction::Stationary`
    /// and vice versa, and `position` must be an integer cell.
    pub fn new(
        id: ObstacleId,
        speed: u32,
        direction: Direction,
        imposed_weight: Weight,
        position: Node,
    ) -> Result<Self> {
        if (speed == 0) != (direction == Direction::Stationary) {
            return Err(GridError::InvalidMotion {
                speed,
                direction: direction.to_string(),
            });
        }
        if !position.is_cell() {
            return Err(GridError::PositionNotInGraph(position));
        }

        info!(
            "Creating obstacle {} at {} (speed={}, direction={}, weight={})",
            id, position, speed, direction, imposed_weight
        );

        Ok(Obstacle {
            id,
            speed,
            direction,
            imposed_weight,
            position,
            placed: false,
        })
    }

    pub fn position(&self) -> Node {
        self.position
    }

    pub fn is_static(&self) -> bool {
        self.speed == 0
    }

    pub fn kind(&self) -> OccupancyKind {
        if self.is_static() {
            OccupancyKind::Static
        } else {
            OccupancyKind::Transient
        }
    }

    /// Position after one step, or `None` when the step would leave the grid
    pub fn next_position(&self, width: i32, height: i32) -> Option<Node> {
        let Node::Cell { x, y } = self.position else {
            return None;
        };
        let (dx, dy) = self.direction.delta();
        let step = self.speed as i64;
        let nx = x as i64 + dx * step;
        let ny = y as i64 + dy * step;

        if nx >= 0 && nx < width as i64 && ny >= 0 && ny < height as i64 {
            Some(Node::cell(nx as i32, ny as i32))
        } else {
            None
        }
    }

    /// Advance one tick.
    ///
    /// Releases the claims at the current cell, moves (holding position when
    /// the step would leave the grid), then claims the new cell. A static
    /// obstacle that was already placed claims with `static_weight`.
    pub fn update(&mut self, graph: &mut GridGraph, static_weight: Weight) -> Result<()> {
        graph.require_cell(self.position)?;

        graph.release(self.position, self.id)?;

        match self.next_position(graph.width, graph.height) {
            Some(next) if next != self.position => {
                debug!("Obstacle {} moved {} -> {}", self.id, self.position, next);
                self.position = next;
            }
            Some(_) => {}
            None => trace!(
                "Obstacle {} held at {}: moving {} would leave the grid",
                self.id,
                self.position,
                self.direction
            ),
        }

        let weight = if self.is_static() && self.placed {
            static_weight
        } else {
            self.imposed_weight
        };
        graph.occupy(self.position, self.claim(weight))?;
        self.placed = true;
        Ok(())
    }

    /// Re-apply the static-occupied weight at the current cell. No-op for
    /// moving obstacles.
    pub fn retag_static(&self, graph: &mut GridGraph, static_weight: Weight) -> Result<()> {
        if !self.is_static() {
            return Ok(());
        }
        graph.occupy(self.position, self.claim(static_weight))
    }

    fn claim(&self, weight: Weight) -> Claim {
        Claim {
            obstacle: self.id,
            weight,
            kind: self.kind(),
        }
    }
}
