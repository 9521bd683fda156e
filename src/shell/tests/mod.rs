use std::{
	collections::HashMap,
	io::{self, BufReader, Read},
	path::Path,
};

use assert_matches::assert_matches;

use super::*;
use crate::{
	lexer::{Error, Token},
	scanner::{Reader, Text},
	source::Pos,
	tests,
};


fn lex(input: &str) -> Vec<TokenKind> {
	lexer(Text::new(input), Options::default())
		.unwrap()
		.map(|token| token.unwrap().kind)
		.collect()
}


fn op(op: Operator) -> TokenKind {
	TokenKind::Operator(op)
}


fn reserved(word: Reserved) -> TokenKind {
	TokenKind::Reserved(word)
}


fn word(word: &str) -> TokenKind {
	TokenKind::Word(word.into())
}


fn io_number(number: &str) -> TokenKind {
	TokenKind::IoNumber(number.into())
}


/// Lex every file in the directory, checking each token against the file contents.
fn test_dir<P, F>(path: P, mut check: F) -> io::Result<()>
where
	P: AsRef<Path>,
	F: FnMut(&Path, &[Result<Token<TokenKind>, Error>]) -> bool,
{
	tests::util::test_dir(
		path,
		move |path, file| {
			let reader = Reader::new(BufReader::new(file));
			let tokens: Vec<_> = lexer(reader, Options::default())
				.map_err(|error| io::Error::new(io::ErrorKind::Other, error))?
				.collect();

			if !check(path, &tokens) {
				panic!("{}: {:#?}", path.display(), tokens);
			}

			Ok(())
		}
	)
}


/// Whether every token's lexeme is found in the text at the token's position.
fn positions_match(path: &Path, tokens: &[Result<Token<TokenKind>, Error>]) -> bool {
	let mut text = String::new();
	if std::fs::File::open(path)
		.and_then(|mut file| file.read_to_string(&mut text))
		.is_err()
	{
		return false;
	}

	let mut offsets = HashMap::new();
	let mut pos = Pos::default();
	for (offset, c) in text.char_indices() {
		offsets.entry(pos).or_insert(offset);
		pos.visit(c);
	}

	tokens
		.iter()
		.all(
			|token| match token {
				Ok(token) => offsets
					.get(&token.pos)
					.map_or(false, |&offset| text[offset ..].starts_with(token.kind.lexeme())),
				Err(_) => false,
			}
		)
}


#[test]
fn test_positive() -> io::Result<()> {
	test_dir(
		"src/shell/tests/data/positive",
		|path, tokens| !tokens.is_empty() && positions_match(path, tokens),
	)
}


#[test]
fn test_negative() -> io::Result<()> {
	test_dir(
		"src/shell/tests/data/negative",
		|_, tokens| matches!(tokens.last(), Some(Err(error)) if !error.is_contract_violation()),
	)
}


#[test]
fn test_grammar_is_shared() {
	let first = grammar().unwrap();
	let second = grammar().unwrap();
	assert!(std::ptr::eq(first, second));
}


#[test]
fn test_empty_input() {
	let mut lexer = lexer(Text::new(""), Options::default()).unwrap();
	assert_matches!(lexer.lex(), None);
}


#[test]
fn test_blank_input() {
	assert_eq!(lex(" \t  # only a comment"), vec![]);
}


#[test]
fn test_concatenated_operators() {
	assert_eq!(
		lex("&&||;;<<<<-<&<>>>>&>|"),
		vec![
			op(Operator::AndIf),
			op(Operator::OrIf),
			op(Operator::DSemi),
			op(Operator::DLess),
			op(Operator::DLessDash),
			op(Operator::LessAnd),
			op(Operator::LessGreat),
			op(Operator::DGreat),
			op(Operator::GreatAnd),
			op(Operator::Clobber),
		]
	);

	assert_eq!(
		lex("&|;<>()"),
		vec![
			op(Operator::Amp),
			op(Operator::Pipe),
			op(Operator::Semi),
			op(Operator::LessGreat),
			op(Operator::LParen),
			op(Operator::RParen),
		]
	);
}


#[test]
fn test_longest_operator() {
	assert_eq!(lex("<<-"), vec![op(Operator::DLessDash)]);
	assert_eq!(lex("<<-<<"), vec![op(Operator::DLessDash), op(Operator::DLess)]);
}


#[test]
fn test_every_table_entry_is_reachable() {
	for lexeme in OPERATORS.lexemes().chain(RESERVED.lexemes()) {
		let kinds = lex(lexeme);
		assert_eq!(kinds.len(), 1, "{}", lexeme);
		assert_eq!(kinds[0].lexeme(), lexeme);
	}
}


#[test]
fn test_reserved_words() {
	assert_eq!(lex("if"), vec![reserved(Reserved::If)]);
	assert_eq!(lex("ifx"), vec![word("ifx")]);
	assert_eq!(lex("xif"), vec![word("xif")]);
	assert_eq!(lex("if\tthen"), vec![reserved(Reserved::If), reserved(Reserved::Then)]);
	assert_eq!(
		lex("{ echo; }"),
		vec![
			reserved(Reserved::Lbrace),
			word("echo"),
			op(Operator::Semi),
			reserved(Reserved::Rbrace),
		]
	);
	assert_eq!(lex("!x ! x"), vec![word("!x"), reserved(Reserved::Bang), word("x")]);
}


#[test]
fn test_io_numbers() {
	assert_eq!(
		lex("cmd 2>&1"),
		vec![word("cmd"), io_number("2"), op(Operator::GreatAnd), word("1")]
	);
	assert_eq!(
		lex("cat 10<<-EOF"),
		vec![word("cat"), io_number("10"), op(Operator::DLessDash), word("EOF")]
	);
	assert_eq!(lex("a2>x"), vec![word("a2"), op(Operator::Great), word("x")]);
	assert_eq!(lex("2 >x"), vec![word("2"), op(Operator::Great), word("x")]);
	assert_eq!(lex("3>|f"), vec![io_number("3"), op(Operator::Clobber), word("f")]);
}


#[test]
fn test_only_redirections_take_io_numbers() {
	for (lexeme, kind) in OPERATORS.entries() {
		let op = match kind {
			TokenKind::Operator(op) => *op,
			_ => panic!("not an operator: {:?}", kind),
		};
		let first = if op.is_redirection() { io_number("2") } else { word("2") };

		assert_eq!(lex(&format!("2{}", lexeme)), vec![first, kind.clone()], "{}", lexeme);
	}
}


#[test]
fn test_quoting() {
	assert_eq!(
		lex(r#"echo 'a b' "c \" d" e\ f"#),
		vec![word("echo"), word("'a b'"), word(r#""c \" d""#), word(r"e\ f")]
	);
	assert_eq!(lex("x'&&'y"), vec![word("x'&&'y")]);
	assert_eq!(lex("'a\nb'"), vec![word("'a\nb'")]);
}


#[test]
fn test_unterminated_quote_is_skipped() {
	assert_eq!(lex("'abc"), vec![word("abc")]);
}


#[test]
fn test_comments() {
	assert_eq!(
		lex("echo a # comment ; if\nfi"),
		vec![word("echo"), word("a"), TokenKind::Newline, reserved(Reserved::Fi)]
	);
	assert_eq!(lex("a#b"), vec![word("a#b")]);
}


#[test]
fn test_newlines() {
	assert_eq!(
		lex("a\n\nb\n"),
		vec![word("a"), TokenKind::Newline, TokenKind::Newline, word("b"), TokenKind::Newline]
	);
}


#[test]
fn test_positions() {
	let positions: Vec<Pos> = lexer(Text::new("if x\n\tthen 2>y\n"), Options::default())
		.unwrap()
		.map(|token| token.unwrap().pos)
		.collect();

	assert_eq!(
		positions,
		vec![
			Pos::new(0, 0),
			Pos::new(0, 3),
			Pos::new(0, 4),
			Pos::new(1, 1),
			Pos::new(1, 6),
			Pos::new(1, 7),
			Pos::new(1, 8),
			Pos::new(1, 9),
		]
	);
}


#[test]
fn test_stop_after_tokens() {
	let input = "a b c d e f g h i j";

	for limit in 1 .. 5 {
		let mut lexer = lexer(Text::new(input), Options::default()).unwrap();
		let mut observed = 0;

		while observed < limit {
			assert_matches!(lexer.lex(), Some(Ok(_)));
			observed += 1;
		}

		lexer.stop();
		observed += lexer.count();

		assert!(observed <= limit + 1);
	}
}


#[test]
fn test_read_failure() {
	let input = Reader::new(&b"echo \xFF"[..]);
	let mut lexer = lexer(input, Options::default()).unwrap();

	assert_matches!(lexer.lex(), Some(Ok(Token { kind: TokenKind::Word(_), .. })));
	assert_matches!(lexer.lex(), Some(Err(Error::Scanner(_))));
	assert_matches!(lexer.lex(), None);
}


#[test]
fn test_display() {
	let token = Token { kind: op(Operator::AndIf), pos: Pos::new(2, 4) };
	assert_eq!(token.to_string(), "2:4  operator &&");
	assert_eq!(word("a\tb").to_string(), "word a\\tb");
	assert_eq!(io_number("2").to_string(), "io-number 2");
	assert_eq!(reserved(Reserved::Esac).to_string(), "reserved esac");
	assert_eq!(TokenKind::Newline.to_string(), "newline");
}


#[test]
fn test_serialize() {
	let token = Token { kind: word("ls"), pos: Pos::new(1, 2) };
	assert_eq!(
		serde_json::to_value(&token).unwrap(),
		serde_json::json!({
			"kind": { "kind": "word", "value": "ls" },
			"pos": { "line": 1, "column": 2 },
		})
	);

	assert_eq!(
		serde_json::to_value(&TokenKind::Newline).unwrap(),
		serde_json::json!({ "kind": "newline" })
	);
}
