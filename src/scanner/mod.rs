//! The scanner drives an ordered family of automata over a character stream, producing
//! frames for the highest-priority longest match at each position.

mod automaton;
mod builder;
mod error;
mod input;

use std::{
	collections::VecDeque,
	sync::{
		atomic::{AtomicBool, Ordering},
		Arc,
	},
};

use serde::Serialize;
use tracing::{debug, trace};

use crate::source::Pos;
pub use automaton::{Automaton, Chain, Edge, Family, State, StateId};
pub use builder::Builder;
pub use error::{BuildError, Error, ErrorKind};
pub use input::{Input, Reader, Text};


/// A matched span, as produced by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
	/// Index of the matching automaton in its family, or `None` for an end frame.
	pub automaton: Option<usize>,
	pub text: Box<str>,
	/// Position of the first matched character.
	pub pos: Pos,
	/// Nesting level of the family that produced the frame, zero for the root family.
	pub depth: usize,
}


impl Frame {
	fn end(pos: Pos, depth: usize) -> Self {
		Self { automaton: None, text: "".into(), pos, depth }
	}


	/// Whether the frame closes a pass, be it nested or the root one.
	pub fn is_end(&self) -> bool {
		self.automaton.is_none()
	}


	/// Whether the frame is the terminal sentinel, closing the root pass.
	pub fn is_sentinel(&self) -> bool {
		self.is_end() && self.depth == 0
	}
}


/// A shared flag requesting the scanner to stop. The scanner only checks it when a match
/// is ready to be handed off.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);


impl StopSignal {
	pub fn new() -> Self {
		Self::default()
	}


	pub fn raise(&self) {
		self.0.store(true, Ordering::SeqCst);
	}


	pub fn is_raised(&self) -> bool {
		self.0.load(Ordering::SeqCst)
	}
}


/// A completed match inside a pass.
#[derive(Debug)]
struct Match {
	automaton: usize,
	text: String,
	pos: Pos,
}


/// A single left to right scan of one input with one family. The root pass reads from the
/// scanner input, nested passes own their whole text up front.
#[derive(Debug)]
struct Pass {
	family: Arc<Family>,
	buffer: VecDeque<char>,
	pos: Pos,
	eof: bool,
	/// Start-of-input transitions only apply before anything was consumed.
	at_start: bool,
}


impl Pass {
	fn root(family: Arc<Family>) -> Self {
		Self {
			family,
			buffer: VecDeque::new(),
			pos: Pos::default(),
			eof: false,
			at_start: true,
		}
	}


	fn nested(family: Arc<Family>, text: &str, pos: Pos) -> Self {
		Self {
			family,
			buffer: text.chars().collect(),
			pos,
			eof: true,
			at_start: true,
		}
	}


	/// The initial set of live (automaton, state) pairs.
	fn start_states(&mut self) -> Vec<(usize, StateId)> {
		let at_start = std::mem::replace(&mut self.at_start, false);

		self.family
			.iter()
			.enumerate()
			.flat_map(
				|(ix, automaton)| {
					let chain: Vec<StateId> = if at_start {
						automaton.start_chain().collect()
					} else {
						vec![0]
					};
					chain.into_iter().map(move |state| (ix, state))
				}
			)
			.collect()
	}


	/// Find the next match. `Ok(None)` means the pass is exhausted.
	fn scan(&mut self, input: &mut dyn Input) -> std::io::Result<Option<Match>> {
		loop {
			let mut live = self.start_states();
			// Best match so far, as (automaton, length).
			let mut best: Option<(usize, usize)> = None;
			let mut consider = |automaton: usize, length: usize| {
				let better = match best {
					_ if length == 0 => false,
					None => true,
					Some((best_ix, best_len)) => {
						length > best_len || (length == best_len && automaton < best_ix)
					}
				};
				if better {
					best = Some((automaton, length));
				}
			};

			let mut length = 0;
			while !live.is_empty() {
				if length == self.buffer.len() && !self.eof {
					match input.read_char()? {
						Some(c) => self.buffer.push_back(c),
						None => self.eof = true,
					}
				}

				if let Some(&c) = self.buffer.get(length) {
					length += 1;
					let family = &self.family;
					live.retain_mut(
						|(ix, state)| match family[*ix].transition(*state, c) {
							Some(next) => {
								*state = next;
								if family[*ix].is_accepting(next) {
									consider(*ix, length);
								}
								true
							}
							None => false,
						}
					);
				} else {
					for (ix, state) in live.drain(..) {
						let automaton = &self.family[ix];
						if automaton.end_chain(state).any(|st| automaton.is_accepting(st)) {
							consider(ix, length);
						}
					}
				}
			}

			match best {
				Some((automaton, length)) => {
					let text: String = self.buffer.drain(.. length).collect();
					let pos = self.pos;
					self.pos.visit_str(&text);
					return Ok(Some(Match { automaton, text, pos }));
				}

				None => {
					// With no live automaton at all, nothing was read yet.
					if self.buffer.is_empty() && !self.eof {
						match input.read_char()? {
							Some(c) => self.buffer.push_back(c),
							None => self.eof = true,
						}
					}

					match self.buffer.pop_front() {
						Some(c) => {
							trace!(?c, pos = %self.pos, "skipping unmatched character");
							self.pos.visit(c);
						}
						None => return Ok(None),
					}
				}
			}
		}
	}
}


/// An input that never yields, for passes that own their text.
struct Exhausted;


impl Input for Exhausted {
	fn read_char(&mut self) -> std::io::Result<Option<char>> {
		Ok(None)
	}
}


/// The producer: a lazy iterator of frames over an input.
///
/// Frames come out in strict input order. When the matching automaton has a nested family,
/// the frame for the whole span is followed by the frames of the nested scan over it, then
/// by a nested end frame. The stream is closed by the sentinel, an end frame at depth zero.
/// After a stop request, a scanning error or the sentinel, the iterator is exhausted. A stop
/// raised after the last match may still let the sentinel through, nothing else.
#[derive(Debug)]
pub struct Scanner<I> {
	input: I,
	passes: Vec<Pass>,
	stop: StopSignal,
}


impl<I> Scanner<I>
where
	I: Input,
{
	pub fn new(family: Arc<Family>, input: I) -> Self {
		Self {
			input,
			passes: vec![Pass::root(family)],
			stop: StopSignal::new(),
		}
	}


	/// The signal that stops this scanner, shareable with other threads.
	pub fn stop_signal(&self) -> StopSignal {
		self.stop.clone()
	}


	pub fn stop(&self) {
		self.stop.raise();
	}


	fn finish(&mut self) {
		self.passes.clear();
	}
}


impl<I> Iterator for Scanner<I>
where
	I: Input,
{
	type Item = Result<Frame, Error>;

	fn next(&mut self) -> Option<Self::Item> {
		let depth = self.passes.len().checked_sub(1)?;
		let pass = self.passes.last_mut()?;

		let result = if depth == 0 {
			pass.scan(&mut self.input)
		} else {
			pass.scan(&mut Exhausted)
		};

		match result {
			Ok(Some(found)) => {
				if self.stop.is_raised() {
					debug!(pos = %found.pos, "scanner stopped");
					self.finish();
					return None;
				}

				trace!(automaton = found.automaton, text = ?found.text, depth, "frame");

				let nested = pass.family[found.automaton].nested().cloned();
				let frame = Frame {
					automaton: Some(found.automaton),
					text: found.text.as_str().into(),
					pos: found.pos,
					depth,
				};

				if let Some(family) = nested {
					self.passes.push(Pass::nested(family, &found.text, found.pos));
				}

				Some(Ok(frame))
			}

			Ok(None) => {
				let pos = pass.pos;

				// Only the sentinel may follow a stop request.
				if depth > 0 && self.stop.is_raised() {
					debug!(%pos, "scanner stopped");
					self.finish();
					return None;
				}

				self.passes.pop();
				if depth == 0 {
					debug!(%pos, "end of input");
				}
				Some(Ok(Frame::end(pos, depth)))
			}

			Err(error) => {
				let pos = pass.pos;
				self.finish();
				Some(Err(Error::io(error, pos)))
			}
		}
	}
}
