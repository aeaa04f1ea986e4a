use std::error::Error;
use std::fmt;

use crate::cells::Cell;

/// Everything that can go wrong building, generating or analysing a maze.
///
/// Argument errors are reported at the call that broke the precondition. State errors
/// (`ElementNotFound`, `EmptyPool`) mean a support structure was misused.
/// `Unreachable` means a maze that was assumed perfect turned out not to be.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MazeError {
    EmptyDimensions,
    ZeroAxisSize { axis: usize },
    DimensionMismatch { expected: usize, actual: usize },
    OutOfBounds(Cell),
    SelfLink(Cell),
    NotAdjacent { from: Cell, to: Cell },
    InvalidSlice,
    InvalidParameter { name: &'static str },
    UnsupportedDimensions { expected: usize, actual: usize },
    UnknownGenerator(String),
    ElementNotFound,
    EmptyPool,
    Unreachable { from: Cell, to: Cell },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDimensions => write!(f, "a maze needs at least one axis"),
            Self::ZeroAxisSize { axis } => write!(f, "axis {} has size zero", axis),
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "expected a {}-dimensional cell, got {} coordinates",
                expected, actual
            ),
            Self::OutOfBounds(cell) => write!(f, "cell {} is outside the maze", cell),
            Self::SelfLink(cell) => write!(f, "cell {} cannot link to itself", cell),
            Self::NotAdjacent { from, to } => {
                write!(f, "cells {} and {} are not grid neighbours", from, to)
            }
            Self::InvalidSlice => write!(f, "slice lower corner exceeds its upper corner"),
            Self::InvalidParameter { name } => write!(f, "parameter `{}` is out of range", name),
            Self::UnsupportedDimensions { expected, actual } => write!(
                f,
                "only {}-dimensional mazes are supported, got {} dimensions",
                expected, actual
            ),
            Self::UnknownGenerator(name) => write!(f, "unknown generator `{}`", name),
            Self::ElementNotFound => write!(f, "element not found in disjoint set"),
            Self::EmptyPool => write!(f, "cannot draw from an empty set"),
            Self::Unreachable { from, to } => write!(
                f,
                "no path from {} to {} in a maze assumed to be connected",
                from, to
            ),
        }
    }
}

impl Error for MazeError {}

pub type Result<T> = ::std::result::Result<T, MazeError>;
