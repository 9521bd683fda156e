use std::fmt::{self, Display};

use super::{Operator, Reserved, TokenKind};
use crate::{lexer::Token, term::color};


impl Display for Operator {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		color::Fg(color::Yellow, self.lexeme()).fmt(f)
	}
}


impl Display for Reserved {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		color::Fg(color::Blue, self.lexeme()).fmt(f)
	}
}


impl Display for TokenKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Operator(op) => write!(f, "operator {}", op),
			Self::Reserved(word) => write!(f, "reserved {}", word),
			Self::Word(word) => write!(f, "word {}", color::Bold(word.escape_debug())),
			Self::IoNumber(number) => write!(f, "io-number {}", color::Fg(color::Magenta, number)),
			Self::Newline => "newline".fmt(f),
		}
	}
}


impl Display for Token<TokenKind> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"{}  {}",
			color::Fg(color::Cyan, format_args!("{}:{}", self.pos.line, self.pos.column)),
			self.kind
		)
	}
}
