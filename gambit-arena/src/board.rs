//! Grid geometry and maze layouts

use std::fmt;
use std::path::Path;

use anyhow::Context;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Grid cell. `x` grows to the east, `y` grows to the south.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos {
    pub x: i16,
    pub y: i16,
}

impl Pos {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Manhattan distance
    pub fn distance_to(&self, other: Pos) -> u32 {
        let dx = (i32::from(self.x) - i32::from(other.x)).unsigned_abs();
        let dy = (i32::from(self.y) - i32::from(other.y)).unsigned_abs();
        dx + dy
    }

    pub fn step(&self, dir: Direction) -> Pos {
        let (dx, dy) = dir.delta();
        Pos::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// A move on the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Stop,
}

/// Compass moves in generation order
pub const COMPASS: [Direction; 4] = [
    Direction::North,
    Direction::South,
    Direction::East,
    Direction::West,
];

impl Direction {
    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "N",
            Direction::South => "S",
            Direction::East => "E",
            Direction::West => "W",
            Direction::Stop => "-",
        };
        f.write_str(name)
    }
}

// ============================================================================
// MAZE
// ============================================================================

/// Static walls of a layout. Cells outside the grid count as walls.
#[derive(Clone, Debug)]
pub struct Maze {
    width: i16,
    height: i16,
    walls: FxHashSet<Pos>,
}

impl Maze {
    pub fn width(&self) -> i16 {
        self.width
    }

    pub fn height(&self) -> i16 {
        self.height
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        pos.x < 0
            || pos.y < 0
            || pos.x >= self.width
            || pos.y >= self.height
            || self.walls.contains(&pos)
    }

    /// Compass moves from `pos` that stay off walls
    pub fn open_moves(&self, pos: Pos) -> Vec<Direction> {
        COMPASS
            .iter()
            .copied()
            .filter(|&d| !self.is_wall(pos.step(d)))
            .collect()
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

/// Widest and tallest grid accepted; every cell and its neighbours fit in `i16`
pub const MAX_SIDE: usize = i16::MAX as usize;

/// Parsed ASCII layout
///
/// `%` wall, `.` food, `o` capsule, `P` runner, `G` chaser, space empty.
/// Chasers are numbered in reading order.
#[derive(Clone, Debug)]
pub struct Layout {
    pub name: String,
    pub maze: Maze,
    pub runner: Pos,
    pub chasers: Vec<Pos>,
    pub food: Vec<Pos>,
    pub capsules: Vec<Pos>,
}

impl Layout {
    pub fn parse(name: &str, text: &str) -> Result<Self, LayoutError> {
        let lines: Vec<&str> = text
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .filter(|l| !l.trim().is_empty())
            .collect();
        if lines.is_empty() {
            return Err(LayoutError::Empty);
        }

        let width = lines[0].chars().count();
        let height = lines.len();
        if width > MAX_SIDE || height > MAX_SIDE {
            return Err(LayoutError::TooLarge { width, height });
        }
        let mut walls = FxHashSet::default();
        let mut runners = Vec::new();
        let mut chasers = Vec::new();
        let mut food = Vec::new();
        let mut capsules = Vec::new();

        for (y, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(LayoutError::Ragged {
                    line: y + 1,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let pos = Pos::new(x as i16, y as i16);
                match ch {
                    '%' => {
                        walls.insert(pos);
                    }
                    '.' => food.push(pos),
                    'o' => capsules.push(pos),
                    'P' => runners.push(pos),
                    'G' => chasers.push(pos),
                    ' ' => {}
                    other => {
                        return Err(LayoutError::UnknownTile {
                            tile: other,
                            line: y + 1,
                            column: x + 1,
                        })
                    }
                }
            }
        }

        if runners.len() != 1 {
            return Err(LayoutError::RunnerCount(runners.len()));
        }

        Ok(Self {
            name: name.to_string(),
            maze: Maze {
                width: width as i16,
                height: height as i16,
                walls,
            },
            runner: runners[0],
            chasers,
            food,
            capsules,
        })
    }

    /// Load a layout file; the file stem becomes the layout name
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout: {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());
        let layout = Self::parse(&name, &content)
            .with_context(|| format!("Failed to parse layout: {}", path.display()))?;
        Ok(layout)
    }

    /// Built-in layout by name, or a layout file path
    pub fn resolve(name_or_path: &str) -> anyhow::Result<Self> {
        match crate::layouts::builtin(name_or_path) {
            Some(layout) => Ok(layout),
            None => Self::load(Path::new(name_or_path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
%%%%%
%P.G%
%o% %
%%%%%
";

    #[test]
    fn test_parse_layout() {
        let layout = Layout::parse("small", SMALL).unwrap();
        assert_eq!(layout.maze.width(), 5);
        assert_eq!(layout.maze.height(), 4);
        assert_eq!(layout.runner, Pos::new(1, 1));
        assert_eq!(layout.chasers, vec![Pos::new(3, 1)]);
        assert_eq!(layout.food, vec![Pos::new(2, 1)]);
        assert_eq!(layout.capsules, vec![Pos::new(1, 2)]);
    }

    #[test]
    fn test_open_moves() {
        let layout = Layout::parse("small", SMALL).unwrap();
        let maze = &layout.maze;
        assert_eq!(maze.open_moves(Pos::new(1, 1)), vec![Direction::South, Direction::East]);
        assert_eq!(maze.open_moves(Pos::new(3, 1)), vec![Direction::South, Direction::West]);
        assert!(maze.is_wall(Pos::new(-1, 0)));
        assert!(maze.is_wall(Pos::new(5, 1)));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Layout::parse("e", "\n  \n"), Err(LayoutError::Empty)));
        assert!(matches!(
            Layout::parse("r", "%%%\n%P%%\n"),
            Err(LayoutError::Ragged { line: 2, expected: 3, found: 4 })
        ));
        assert!(matches!(
            Layout::parse("u", "%P#%\n"),
            Err(LayoutError::UnknownTile { tile: '#', line: 1, column: 3 })
        ));
        assert!(matches!(Layout::parse("n", "%..%\n"), Err(LayoutError::RunnerCount(0))));
        assert!(matches!(Layout::parse("two", "%PP%\n"), Err(LayoutError::RunnerCount(2))));
    }

    #[test]
    fn test_oversized_layout_rejected() {
        let mut wide = "%".repeat(40_000);
        wide.replace_range(39_990..39_991, "P");
        assert!(matches!(
            Layout::parse("wide", &wide),
            Err(LayoutError::TooLarge { width: 40_000, height: 1 })
        ));

        let tall = "P\n".to_string() + &"%\n".repeat(MAX_SIDE);
        assert!(matches!(
            Layout::parse("tall", &tall),
            Err(LayoutError::TooLarge { width: 1, height }) if height == MAX_SIDE + 1
        ));
    }

    #[test]
    fn test_largest_layout_keeps_positions() {
        let mut row = " ".repeat(MAX_SIDE);
        row.replace_range(MAX_SIDE - 1.., "P");
        let layout = Layout::parse("edge", &row).unwrap();
        assert_eq!(layout.runner, Pos::new(i16::MAX - 1, 0));
        assert_eq!(layout.maze.width(), i16::MAX);
        assert!(!layout.maze.is_wall(layout.runner));
        assert!(layout.maze.is_wall(layout.runner.step(Direction::East)));
        assert_eq!(Pos::new(-1, 0).distance_to(layout.runner), i16::MAX as u32);
    }

    #[test]
    fn test_distance_and_step() {
        let a = Pos::new(1, 1);
        assert_eq!(a.distance_to(Pos::new(4, 3)), 5);
        assert_eq!(a.step(Direction::North), Pos::new(1, 0));
        assert_eq!(a.step(Direction::Stop), a);
    }
}
