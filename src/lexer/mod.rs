//! The consumer side: a pull based token API with multi-level lookahead over a stream of
//! frames.

mod error;
mod grammar;
mod stack;

use serde::Serialize;
use tracing::debug;

use crate::{
	scanner::{Frame, Input, Scanner},
	source::Pos,
};
pub use error::Error;
pub use grammar::{Action, Classifier, Grammar, Rule, Table};
use stack::Stack;


/// A producer of frames, either inline or running on another thread.
pub trait FrameSource {
	/// Get the next frame. `Ok(None)` means no frames will ever follow, because the end of
	/// input was reached or because a stop was requested.
	fn pull(&mut self) -> Result<Option<Frame>, Error>;

	/// Request the producer to stop. At most one further frame may be pulled.
	fn stop(&mut self);
}


impl<I> FrameSource for Scanner<I>
where
	I: Input,
{
	fn pull(&mut self) -> Result<Option<Frame>, Error> {
		Ok(self.next().transpose()?)
	}


	fn stop(&mut self) {
		Scanner::stop(self)
	}
}


impl<S> FrameSource for Box<S>
where
	S: FrameSource + ?Sized,
{
	fn pull(&mut self) -> Result<Option<Frame>, Error> {
		(**self).pull()
	}


	fn stop(&mut self) {
		(**self).stop()
	}
}


/// A classified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<K> {
	pub kind: K,
	pub pos: Pos,
}


/// Lexer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
	/// Maximum number of frames in the lookahead stack, including the current one.
	pub lookahead: usize,
}


impl Default for Options {
	fn default() -> Self {
		Self { lookahead: 16 }
	}
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
	Running,
	/// The sentinel was pulled.
	Drained,
	Stopped,
	Failed,
}


/// A frame in the lookahead stack, with the classifier that owns it.
#[derive(Debug)]
struct Entry<'g, K: 'static> {
	frame: Frame,
	/// `None` for end frames.
	classifier: Option<&'g Classifier<K>>,
}


/// The lexer facade.
///
/// Frames are pulled from the source into a bounded lookahead stack. Level 0 is the
/// current frame, which `lex` classifies into tokens. Deeper levels are materialized by
/// `next_frame` and dropped by `pop`, for parsers that need to peek ahead and then give
/// frames back.
#[derive(Debug)]
pub struct Lexer<'g, S, K: 'static> {
	source: S,
	/// Grammars of the open passes, indexed by frame depth.
	scopes: Vec<&'g Grammar<K>>,
	stack: Stack<Entry<'g, K>>,
	/// Whether the frame at level 0 was already returned by `lex`.
	consumed: bool,
	status: Status,
}


impl<'g, I, K> Lexer<'g, Scanner<I>, K>
where
	I: Input,
	K: 'static,
{
	/// A lexer driving an inline scanner over the input.
	pub fn inline(grammar: &'g Grammar<K>, input: I) -> Self {
		Self::new(grammar, grammar.scanner(input))
	}
}


impl<'g, S, K> Lexer<'g, S, K>
where
	S: FrameSource,
	K: 'static,
{
	pub fn new(grammar: &'g Grammar<K>, source: S) -> Self {
		Self::with_options(grammar, source, Options::default())
	}


	pub fn with_options(grammar: &'g Grammar<K>, source: S, options: Options) -> Self {
		Self {
			source,
			scopes: vec![grammar],
			stack: Stack::new(options.lookahead),
			consumed: false,
			status: Status::Running,
		}
	}


	/// Get the frame at the given lookahead level, pulling frames from the source until
	/// the stack is deep enough. Already materialized levels are returned as is.
	/// Returns `Ok(None)` if the source has no more frames.
	pub fn next_frame(&mut self, level: usize) -> Result<Option<&Frame>, Error> {
		if level >= self.stack.capacity() {
			return Err(Error::LookaheadOverflow(self.stack.capacity()));
		}

		while self.stack.len() <= level {
			match self.pull()? {
				Some(entry) => self.push(entry)?,
				None => return Ok(None),
			}
		}

		Ok(self.stack.get(level).map(|entry| &entry.frame))
	}


	/// Drop the top of the lookahead stack.
	pub fn pop(&mut self) -> Option<Frame> {
		if self.stack.len() == 1 {
			self.consumed = false;
		}

		self.stack.pop().map(|entry| entry.frame)
	}


	/// Number of materialized frames.
	pub fn depth(&self) -> usize {
		self.stack.len()
	}


	pub fn text(&self) -> &str {
		self.stack.top().map_or("", |entry| &entry.frame.text)
	}


	pub fn line(&self) -> usize {
		self.stack.top().map_or(0, |entry| entry.frame.pos.line)
	}


	pub fn column(&self) -> usize {
		self.stack.top().map_or(0, |entry| entry.frame.pos.column)
	}


	/// Request the source to stop, and discard any buffered frames.
	pub fn stop(&mut self) {
		if self.status == Status::Running {
			debug!("lexer stopped");
			self.status = Status::Stopped;
			self.source.stop();
		}

		self.discard();
	}


	fn discard(&mut self) {
		self.stack.clear();
		self.consumed = false;
	}


	/// Pull a frame from the source, resolving its classifier.
	fn pull(&mut self) -> Result<Option<Entry<'g, K>>, Error> {
		if self.status != Status::Running {
			return Ok(None);
		}

		let frame = match self.source.pull() {
			Ok(Some(frame)) => frame,
			Ok(None) => {
				self.status = Status::Stopped;
				return Ok(None);
			}
			Err(error) => return Err(self.fail(error)),
		};

		if frame.is_sentinel() {
			self.status = Status::Drained;
		}

		match self.resolve(&frame) {
			Ok(classifier) => Ok(Some(Entry { frame, classifier })),
			Err(error) => Err(self.fail(error)),
		}
	}


	/// Find the classifier of a frame, tracking the grammars of nested passes.
	fn resolve(&mut self, frame: &Frame) -> Result<Option<&'g Classifier<K>>, Error> {
		let automaton = match frame.automaton {
			Some(automaton) => automaton,
			None => {
				self.scopes.truncate(frame.depth.max(1));
				return Ok(None);
			}
		};

		let unknown = || Error::UnknownRule { automaton, depth: frame.depth, pos: frame.pos };

		let grammar = *self.scopes.get(frame.depth).ok_or_else(unknown)?;
		let classifier = grammar.classifier(automaton).ok_or_else(unknown)?;

		self.scopes.truncate(frame.depth + 1);
		if let Some(nested) = &classifier.nested {
			self.scopes.push(nested);
		}

		Ok(Some(classifier))
	}


	fn push(&mut self, entry: Entry<'g, K>) -> Result<(), Error> {
		if self.stack.push(entry).is_err() {
			let error = Error::LookaheadOverflow(self.stack.capacity());
			return Err(self.fail(error));
		}

		Ok(())
	}


	/// Terminate the token stream. Buffered lookahead is discarded with it.
	fn fail(&mut self, error: Error) -> Error {
		debug!(%error, "lexer failed");
		self.status = Status::Failed;
		self.source.stop();
		self.discard();
		error
	}
}


impl<'g, S, K> Lexer<'g, S, K>
where
	S: FrameSource,
	K: Clone + 'static,
{
	/// Advance to the next token. Frames classified as skipped and nested end frames are
	/// consumed silently. Returns `None` after the end of input, a stop request or an
	/// error.
	pub fn lex(&mut self) -> Option<Result<Token<K>, Error>> {
		loop {
			if self.consumed {
				self.stack.shift();
				self.consumed = false;
			}

			if self.stack.is_empty() {
				match self.pull() {
					Ok(Some(entry)) => {
						if let Err(error) = self.push(entry) {
							return Some(Err(error));
						}
					}
					Ok(None) => return None,
					Err(error) => return Some(Err(error)),
				}
			}

			let entry = self.stack.bottom()?;
			self.consumed = true;

			let classifier = match entry.classifier {
				Some(classifier) => classifier,
				None if entry.frame.is_sentinel() => return None,
				None => continue,
			};

			let frame = &entry.frame;
			let kind = match classifier.action {
				Action::Skip => continue,

				Action::Pass(build) => build(&frame.text),

				Action::Lookup(table) => match table.get(&frame.text) {
					Some(kind) => kind.clone(),
					None => {
						let error = Error::UnknownLexeme {
							table: table.name(),
							lexeme: frame.text.clone(),
							pos: frame.pos,
						};
						return Some(Err(self.fail(error)));
					}
				},
			};

			return Some(Ok(Token { kind, pos: frame.pos }));
		}
	}
}


impl<'g, S, K> Iterator for Lexer<'g, S, K>
where
	S: FrameSource,
	K: Clone + 'static,
{
	type Item = Result<Token<K>, Error>;

	fn next(&mut self) -> Option<Self::Item> {
		self.lex()
	}
}
