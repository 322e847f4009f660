use alloc::string::String;
use thiserror::Error;

use crate::types::{CellCount, Coord2};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("no move is possible at {0:?}")]
    IllegalMove(Coord2),
    #[error("revealed a hazard at {0:?}")]
    HazardHit(Coord2),
    #[error("coordinates {0:?} are outside the board")]
    InvalidCoords(Coord2),
    #[error("board size {0:?} is out of range")]
    InvalidSize(Coord2),
    #[error("hazard count {0} does not fit the board")]
    InvalidHazardCount(CellCount),
    #[error("game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("unknown board shape {0:?}")]
    UnknownShape(String),
    #[error("no scores recorded under mode {0:?}")]
    UnknownMode(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
