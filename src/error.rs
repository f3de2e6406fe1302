//! Centralized error types for the game.
//!
//! This module defines all error types used throughout the application,
//! providing a consistent error handling approach.

use std::io;
use std::path::PathBuf;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
/// It can represent any error that can occur during startup or game operation.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Error type for asset manifest loading.
#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("Failed to load {path}: {message}")]
    LoadFailed { path: &'static str, message: String },
}

/// Error type for map layout parsing.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("Unknown character in layout: {0:?}")]
    UnknownCharacter(char),

    #[error("Exit character {0:?} has no destination wired for it")]
    UnwiredExit(char),

    #[error("Row {row} is {found} tiles wide, expected {expected}")]
    RowWidth { row: usize, expected: usize, found: usize },
}

/// Errors produced by the save slot.
///
/// These never escalate into [`GameError`]; the menu consumes them and
/// switches to its load-error display instead.
#[derive(thiserror::Error, Debug)]
pub enum SaveError {
    #[error("No save data at {0}")]
    Missing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed value for `{key}`: {value:?}")]
    Malformed { key: &'static str, value: String },

    #[error("Save data is missing `{0}`")]
    MissingField(&'static str),

    #[error("Value for `{key}` is out of range: {value}")]
    OutOfRange { key: &'static str, value: i32 },
}

/// Result type alias for game operations.
pub type GameResult<T> = Result<T, GameError>;
