use thiserror::Error;

/// Errors raised while parsing an ASCII layout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,

    #[error("line {line} has {found} cells, expected {expected}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown tile '{tile}' at line {line}, column {column}")]
    UnknownTile {
        tile: char,
        line: usize,
        column: usize,
    },

    #[error("layout is {width}x{height}, larger than {max} cells per side", max = i16::MAX)]
    TooLarge { width: usize, height: usize },

    #[error("layout needs exactly one runner 'P', found {0}")]
    RunnerCount(usize),
}
