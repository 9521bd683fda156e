use std::fmt::{self, Display};

use serde::Serialize;


/// A human readable position in the input. Both line and column start at zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Pos {
	pub line: usize,
	pub column: usize,
}


impl Pos {
	pub fn new(line: usize, column: usize) -> Self {
		Self { line, column }
	}


	/// Account for a consumed character.
	pub fn visit(&mut self, input: char) {
		if input == '\n' {
			self.line = self.line.saturating_add(1);
			self.column = 0;
		} else {
			self.column = self.column.saturating_add(1);
		}
	}


	/// Account for every character of a consumed span.
	pub fn visit_str(&mut self, input: &str) {
		for c in input.chars() {
			self.visit(c);
		}
	}
}


impl Display for Pos {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "line {}, column {}", self.line, self.column)
	}
}
