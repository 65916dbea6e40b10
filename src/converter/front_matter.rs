//! Front matter tracking
//!
//! The exported files open with a `---` delimited metadata block. Everything inside it is
//! replaced by a fixed header, and nothing is converted until the block is closed.

use serde::{Deserialize, Serialize};

pub const DELIMITER: &str = "---";

/// Progress through the front matter block. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrontMatterState {
    /// Opening delimiter not seen yet
    #[default]
    NotStarted,
    /// Inside the block
    InProgress,
    /// Closing delimiter seen, body lines follow
    Done,
}

impl std::fmt::Display for FrontMatterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrontMatterState::NotStarted => write!(f, "not_started"),
            FrontMatterState::InProgress => write!(f, "in_progress"),
            FrontMatterState::Done => write!(f, "done"),
        }
    }
}

/// What to do with a single input line given the front matter state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontMatterAction<'a> {
    /// Write the opening delimiter and the metadata header
    Open,
    /// Discard the line
    Drop,
    /// Copy the line through unchanged
    Keep(&'a str),
    /// Write the closing delimiter
    Close,
    /// The line belongs to the body
    Body(&'a str),
}

impl FrontMatterState {
    /// Feed one line, advancing the state when a delimiter is seen
    pub fn advance<'a>(&mut self, line: &'a str, keep_title: bool) -> FrontMatterAction<'a> {
        match *self {
            FrontMatterState::NotStarted if line == DELIMITER => {
                *self = FrontMatterState::InProgress;
                FrontMatterAction::Open
            }
            FrontMatterState::NotStarted => FrontMatterAction::Drop,
            FrontMatterState::InProgress if line == DELIMITER => {
                *self = FrontMatterState::Done;
                FrontMatterAction::Close
            }
            FrontMatterState::InProgress if keep_title && line.starts_with("title") => {
                FrontMatterAction::Keep(line)
            }
            FrontMatterState::InProgress => FrontMatterAction::Drop,
            FrontMatterState::Done => FrontMatterAction::Body(line),
        }
    }
}
