use super::*;
use thiserror::Error;

/// Reasons a cube description is rejected before any search starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CubeError {
    #[error("expected 54 stickers, got {0}")]
    StickerCount(usize),
    #[error("color {color:?} appears {count} times instead of 9")]
    ColorCount { color: Color, count: usize },
    #[error("the six centers must carry six distinct colors")]
    DuplicateCenter,
    #[error("unrecognized sticker '{0}'")]
    UnknownSticker(char),
    #[error("corner at position {0} matches no cube corner")]
    UnknownCorner(usize),
    #[error("edge at position {0} matches no cube edge")]
    UnknownEdge(usize),
    #[error("corners are not a permutation: some corner appears twice")]
    CornerPermutation,
    #[error("edges are not a permutation: some edge appears twice")]
    EdgePermutation,
    #[error("corner orientations do not sum to 0 mod 3 (twisted corner)")]
    Twist,
    #[error("edge orientations do not sum to 0 mod 2 (flipped edge)")]
    Flip,
    #[error("corner and edge permutation parities differ (swapped pieces)")]
    Parity,
    #[error("move \"{0}\" is not recognized")]
    UnknownMove(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("invalid cube: {0}")]
    InvalidCube(#[from] CubeError),
    #[error("table construction failed: {0}")]
    TableBuild(String),
    #[error("no solution found within the time limit")]
    Timeout,
    #[error("search exhausted its maximum depth on a legal cube")]
    Unsolvable,
}
