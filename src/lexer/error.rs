use std::time::Duration;

use thiserror::Error as ThisError;

use crate::{scanner, source::Pos};


/// A lexing error. Every error is fatal: the token stream ends after it.
#[derive(Debug, ThisError)]
pub enum Error {
	/// A lexeme matched by an automaton is missing from the table associated with it.
	#[error("{pos} - lexeme {lexeme:?} is missing from the {table} table.")]
	UnknownLexeme {
		table: &'static str,
		lexeme: Box<str>,
		pos: Pos,
	},

	/// A frame references an automaton the grammar has no rule for.
	#[error("{pos} - no rule for automaton {automaton} at depth {depth}.")]
	UnknownRule {
		automaton: usize,
		depth: usize,
		pos: Pos,
	},

	#[error(transparent)]
	Scanner(#[from] scanner::Error),

	#[error("lookahead exceeds {0} frames.")]
	LookaheadOverflow(usize),

	/// The frame source went away without reaching the end of input.
	#[error("frame source disconnected.")]
	Disconnected,

	#[error("no frame within {0:?}.")]
	Timeout(Duration),
}


impl Error {
	/// Whether the error means the automata and the classification tables disagree,
	/// which no change to the input can fix.
	pub fn is_contract_violation(&self) -> bool {
		matches!(self, Error::UnknownLexeme { .. } | Error::UnknownRule { .. })
	}


	/// The position where the error happened, if it relates to the input.
	pub fn pos(&self) -> Option<Pos> {
		match self {
			Error::UnknownLexeme { pos, .. } => Some(*pos),
			Error::UnknownRule { pos, .. } => Some(*pos),
			Error::Scanner(error) => Some(error.pos),
			_ => None,
		}
	}
}
