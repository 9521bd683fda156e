use serde::Serialize;

use crate::lexer::Table;


/// Control and redirection operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
	/// &&
	AndIf,
	/// ||
	OrIf,
	/// ;;
	DSemi,
	/// <<
	DLess,
	/// <<-
	DLessDash,
	/// <&
	LessAnd,
	/// <>
	LessGreat,
	/// >>
	DGreat,
	/// >&
	GreatAnd,
	/// >|
	Clobber,
	Amp,
	Pipe,
	Semi,
	Less,
	Great,
	LParen,
	RParen,
}


impl Operator {
	pub const fn lexeme(self) -> &'static str {
		match self {
			Self::AndIf => "&&",
			Self::OrIf => "||",
			Self::DSemi => ";;",
			Self::DLess => "<<",
			Self::DLessDash => "<<-",
			Self::LessAnd => "<&",
			Self::LessGreat => "<>",
			Self::DGreat => ">>",
			Self::GreatAnd => ">&",
			Self::Clobber => ">|",
			Self::Amp => "&",
			Self::Pipe => "|",
			Self::Semi => ";",
			Self::Less => "<",
			Self::Great => ">",
			Self::LParen => "(",
			Self::RParen => ")",
		}
	}


	/// Whether the operator redirects a file descriptor, and may follow an io number.
	pub fn is_redirection(self) -> bool {
		matches!(
			self,
			Self::Less
				| Self::Great
				| Self::DLess
				| Self::DGreat
				| Self::LessAnd
				| Self::GreatAnd
				| Self::LessGreat
				| Self::DLessDash
				| Self::Clobber
		)
	}
}


/// Words that are reserved when they appear as a whole word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Reserved {
	If,
	Then,
	Else,
	Elif,
	Fi,
	Do,
	Done,
	Case,
	Esac,
	While,
	Until,
	For,
	Lbrace,
	Rbrace,
	Bang,
	In,
}


impl Reserved {
	pub const fn lexeme(self) -> &'static str {
		match self {
			Self::If => "if",
			Self::Then => "then",
			Self::Else => "else",
			Self::Elif => "elif",
			Self::Fi => "fi",
			Self::Do => "do",
			Self::Done => "done",
			Self::Case => "case",
			Self::Esac => "esac",
			Self::While => "while",
			Self::Until => "until",
			Self::For => "for",
			Self::Lbrace => "{",
			Self::Rbrace => "}",
			Self::Bang => "!",
			Self::In => "in",
		}
	}
}


/// The kind of a shell token, with its payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TokenKind {
	Operator(Operator),
	Reserved(Reserved),
	/// A word, quotes and escapes included verbatim.
	Word(Box<str>),
	/// The file descriptor number preceding a redirection operator.
	IoNumber(Box<str>),
	Newline,
}


impl TokenKind {
	/// The raw text of the token.
	pub fn lexeme(&self) -> &str {
		match self {
			Self::Operator(op) => op.lexeme(),
			Self::Reserved(word) => word.lexeme(),
			Self::Word(word) => word,
			Self::IoNumber(number) => number,
			Self::Newline => "\n",
		}
	}
}


macro_rules! entries {
	($kind:ident => $($variant:ident),+ $(,)?) => {
		[
			$( ($kind::$variant.lexeme(), TokenKind::$kind($kind::$variant)) ),+
		]
	};
}


static OPERATOR_ENTRIES: [(&str, TokenKind); 17] = entries!(
	Operator =>
		AndIf, OrIf, DSemi, DLess, DLessDash, LessAnd, LessGreat, DGreat, GreatAnd, Clobber,
		Amp, Pipe, Semi, Less, Great, LParen, RParen,
);

static RESERVED_ENTRIES: [(&str, TokenKind); 16] = entries!(
	Reserved =>
		If, Then, Else, Elif, Fi, Do, Done, Case, Esac, While, Until, For, Lbrace, Rbrace,
		Bang, In,
);


pub static OPERATORS: Table<TokenKind> = Table::new("operator", &OPERATOR_ENTRIES);

pub static RESERVED: Table<TokenKind> = Table::new("reserved word", &RESERVED_ENTRIES);
