//! The POSIX shell token grammar.

mod fmt;
mod token;
#[cfg(test)]
mod tests;

use once_cell::sync::Lazy;

use crate::{
	lexer::{Grammar, Lexer, Options, Rule},
	scanner::{Automaton, BuildError, Builder, Input, Scanner},
};
pub use token::{Operator, Reserved, TokenKind, OPERATORS, RESERVED};


/// Characters that end an unquoted word.
const DELIMITERS: &str = " \t\n&|;<>()";

const DIGITS: &str = "0123456789";

static GRAMMAR: Lazy<Result<Grammar<TokenKind>, BuildError>> = Lazy::new(build);


/// The shell grammar, shared by every lexer.
pub fn grammar() -> Result<&'static Grammar<TokenKind>, BuildError> {
	GRAMMAR.as_ref().map_err(Clone::clone)
}


/// An inline shell lexer over the input.
pub fn lexer<I>(
	input: I,
	options: Options,
) -> Result<Lexer<'static, Scanner<I>, TokenKind>, BuildError>
where
	I: Input,
{
	let grammar = grammar()?;
	Ok(Lexer::with_options(grammar, grammar.scanner(input), options))
}


fn build() -> Result<Grammar<TokenKind>, BuildError> {
	let io_number = Grammar::new(vec![
		Rule::pass(Automaton::one_or_more(DIGITS)?, |digits| TokenKind::IoNumber(digits.into())),
		Rule::lookup(
			Automaton::literals(redirections())?,
			&OPERATORS
		),
	]);

	Ok(Grammar::new(vec![
		Rule::skip(Automaton::one_or_more(" \t")?),
		Rule::pass(Automaton::literals(["\n"])?, |_| TokenKind::Newline),
		Rule::skip(comment()?),
		Rule::skip(redirection()?).nested(io_number),
		Rule::lookup(Automaton::literals(OPERATORS.lexemes())?, &OPERATORS),
		Rule::lookup(Automaton::literals(RESERVED.lexemes())?, &RESERVED),
		Rule::pass(word()?, |word| TokenKind::Word(word.into())),
	]))
}


/// Lexemes of the operators that may follow an io number.
fn redirections() -> impl Iterator<Item = &'static str> {
	OPERATORS
		.entries()
		.filter_map(
			|(lexeme, kind)| match kind {
				TokenKind::Operator(op) if op.is_redirection() => Some(lexeme),
				_ => None,
			}
		)
}


/// `#` up to the end of the line, the newline excluded.
fn comment() -> Result<Automaton, BuildError> {
	let mut builder = Builder::new();
	let body = builder.state(true);
	builder
		.on(0, '#', body)
		.reject(body, "\n")
		.otherwise(body, body);
	builder.build()
}


/// Digits immediately followed by a redirection operator.
fn redirection() -> Result<Automaton, BuildError> {
	let mut builder = Builder::new();
	let digits = builder.state(false);
	builder
		.any_of(0, DIGITS, digits)
		.any_of(digits, DIGITS, digits);

	for lexeme in redirections() {
		let end = builder.literal(digits, lexeme);
		builder.accept(end);
	}

	builder.build()
}


/// Unquoted characters, single and double quoted strings, and backslash escapes.
fn word() -> Result<Automaton, BuildError> {
	let mut builder = Builder::new();
	let unquoted = builder.state(true);
	let single = builder.state(false);
	let double = builder.state(false);
	let double_escape = builder.state(false);
	let escape = builder.state(false);

	for state in [0, unquoted] {
		builder
			.reject(state, DELIMITERS)
			.on(state, '\'', single)
			.on(state, '"', double)
			.on(state, '\\', escape)
			.otherwise(state, unquoted);
	}

	builder
		.on(single, '\'', unquoted)
		.otherwise(single, single)
		.on(double, '"', unquoted)
		.on(double, '\\', double_escape)
		.otherwise(double, double)
		.otherwise(double_escape, double)
		.otherwise(escape, unquoted);

	builder.build()
}
