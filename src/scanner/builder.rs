use super::{Automaton, BuildError, Edge, State, StateId};


/// Incremental construction of an automaton, one state and transition at a time.
#[derive(Debug, Clone)]
pub struct Builder {
	states: Vec<State>,
	/// First out of range state referenced as a transition source, reported by `build`.
	invalid: Option<StateId>,
}


impl Default for Builder {
	fn default() -> Self {
		Self::new()
	}
}


impl Builder {
	/// Create a builder holding only the initial, non-accepting state 0.
	pub fn new() -> Self {
		Self { states: vec![State::default()], invalid: None }
	}


	/// Add a state, returning its id.
	pub fn state(&mut self, accepting: bool) -> StateId {
		self.states.push(State { accepting, ..State::default() });
		self.states.len() - 1
	}


	pub fn accept(&mut self, state: StateId) -> &mut Self {
		self.with_state(state, |state| state.accepting = true)
	}


	/// Transition on a single character.
	pub fn on(&mut self, from: StateId, input: char, to: StateId) -> &mut Self {
		self.range(from, input, input, to)
	}


	/// Transition on an inclusive character range.
	pub fn range(&mut self, from: StateId, low: char, high: char, to: StateId) -> &mut Self {
		self.edge(from, Edge { low, high, target: Some(to) })
	}


	/// Transition on each character of a set.
	pub fn any_of(&mut self, from: StateId, chars: &str, to: StateId) -> &mut Self {
		for c in chars.chars() {
			self.on(from, c, to);
		}
		self
	}


	/// Kill the branch on each character of a set, taking precedence over `otherwise`.
	pub fn reject(&mut self, from: StateId, chars: &str) -> &mut Self {
		for c in chars.chars() {
			self.edge(from, Edge { low: c, high: c, target: None });
		}
		self
	}


	/// Transition taken on every character not covered by an explicit edge.
	pub fn otherwise(&mut self, from: StateId, to: StateId) -> &mut Self {
		self.with_state(from, |state| state.otherwise = Some(to))
	}


	/// Epsilon transition followed at the start of the input.
	pub fn on_start(&mut self, from: StateId, to: StateId) -> &mut Self {
		self.with_state(from, |state| state.start = Some(to))
	}


	/// Epsilon transition followed at the end of the input.
	pub fn on_end(&mut self, from: StateId, to: StateId) -> &mut Self {
		self.with_state(from, |state| state.end = Some(to))
	}


	/// Spell a literal starting from a state, sharing the single character transitions
	/// already there. Returns the state reached after the last character.
	pub fn literal(&mut self, from: StateId, literal: &str) -> StateId {
		let mut current = from;

		for c in literal.chars() {
			let known = self.states
				.get(current)
				.and_then(
					|state| state.edges
						.iter()
						.find(|edge| edge.low == c && edge.high == c)
						.and_then(|edge| edge.target)
				);

			current = match known {
				Some(next) => next,
				None => {
					let next = self.state(false);
					self.on(current, c, next);
					next
				}
			};
		}

		current
	}


	pub fn build(self) -> Result<Automaton, BuildError> {
		if let Some(state) = self.invalid {
			return Err(BuildError::InvalidState(state));
		}

		Automaton::new(self.states)
	}


	fn edge(&mut self, from: StateId, edge: Edge) -> &mut Self {
		self.with_state(from, |state| state.edges.push(edge))
	}


	fn with_state<F>(&mut self, state: StateId, update: F) -> &mut Self
	where
		F: FnOnce(&mut State),
	{
		match self.states.get_mut(state) {
			Some(state) => update(state),
			None => {
				self.invalid.get_or_insert(state);
			}
		}
		self
	}
}


impl Automaton {
	/// An automaton matching exactly one of the given literals, built as a trie.
	pub fn literals<'a, I>(literals: I) -> Result<Self, BuildError>
	where
		I: IntoIterator<Item = &'a str>,
	{
		let mut builder = Builder::new();

		for literal in literals {
			if literal.is_empty() {
				return Err(BuildError::EmptyLiteral);
			}

			let end = builder.literal(0, literal);
			builder.accept(end);
		}

		builder.build()
	}


	/// An automaton matching one or more characters of the given set.
	pub fn one_or_more(chars: &str) -> Result<Self, BuildError> {
		if chars.is_empty() {
			return Err(BuildError::EmptyLiteral);
		}

		let mut builder = Builder::new();
		let repeat = builder.state(true);
		builder
			.any_of(0, chars, repeat)
			.any_of(repeat, chars, repeat);
		builder.build()
	}
}
