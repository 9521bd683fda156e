use std::io;

use thiserror::Error as ThisError;

use crate::source::Pos;
use super::StateId;


/// An invalid automaton description.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum BuildError {
	#[error("automaton has no states")]
	NoStates,
	#[error("transition references unknown state {0}")]
	InvalidState(StateId),
	#[error("empty character range {0:?}..={1:?}")]
	EmptyRange(char, char),
	#[error("empty literal")]
	EmptyLiteral,
	/// An automaton accepting the empty string would stall the scanner.
	#[error("automaton accepts the empty string")]
	AcceptsEmpty,
}


/// The kind of scanning error.
#[derive(Debug, ThisError)]
pub enum ErrorKind {
	/// The underlying input failed, including invalid UTF-8.
	#[error("read failure: {0}")]
	Io(#[from] io::Error),
}


/// A scanning error. Scanning errors are fatal, the frame stream ends after them.
#[derive(Debug, ThisError)]
#[error("{pos} - {error}.")]
pub struct Error {
	pub error: ErrorKind,
	pub pos: Pos,
}


impl Error {
	pub fn io(error: io::Error, pos: Pos) -> Self {
		Self { error: ErrorKind::Io(error), pos }
	}
}
