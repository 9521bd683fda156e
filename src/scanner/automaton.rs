use std::sync::Arc;

use super::BuildError;


/// Index of a state inside an automaton. State 0 is always the initial state.
pub type StateId = usize;


/// A transition over an inclusive character range. A `None` target kills the branch,
/// which allows carving exceptions out of a state's fallback transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
	pub low: char,
	pub high: char,
	pub target: Option<StateId>,
}


impl Edge {
	fn contains(&self, input: char) -> bool {
		self.low <= input && input <= self.high
	}
}


/// A single state of an automaton.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
	pub accepting: bool,
	/// Tried in order, the first matching edge wins.
	pub edges: Vec<Edge>,
	/// Taken when no edge covers the input character.
	pub otherwise: Option<StateId>,
	/// Epsilon transition followed only at the start of the input.
	pub start: Option<StateId>,
	/// Epsilon transition followed only at the end of the input.
	pub end: Option<StateId>,
}


/// A deterministic finite automaton, stored as plain data.
#[derive(Debug, Clone)]
pub struct Automaton {
	states: Box<[State]>,
	nested: Option<Arc<Family>>,
}


impl Automaton {
	/// Create an automaton from its states, validating every state reference.
	pub fn new(states: Vec<State>) -> Result<Self, BuildError> {
		if states.is_empty() {
			return Err(BuildError::NoStates);
		}

		let count = states.len();
		let check = |state: Option<StateId>| match state {
			Some(id) if id >= count => Err(BuildError::InvalidState(id)),
			_ => Ok(()),
		};

		for state in &states {
			check(state.otherwise)?;
			check(state.start)?;
			check(state.end)?;
			for edge in &state.edges {
				if edge.low > edge.high {
					return Err(BuildError::EmptyRange(edge.low, edge.high));
				}
				check(edge.target)?;
			}
		}

		let automaton = Self { states: states.into(), nested: None };

		if automaton.start_chain().any(|state| automaton.is_accepting(state)) {
			return Err(BuildError::AcceptsEmpty);
		}

		Ok(automaton)
	}


	/// Attach a family used to re-tokenize the text matched by this automaton.
	pub fn with_nested(mut self, family: Arc<Family>) -> Self {
		self.nested = Some(family);
		self
	}


	pub fn nested(&self) -> Option<&Arc<Family>> {
		self.nested.as_ref()
	}


	pub fn len(&self) -> usize {
		self.states.len()
	}


	pub fn is_accepting(&self, state: StateId) -> bool {
		self.states[state].accepting
	}


	/// The transition function. `None` means the automaton is dead for this branch.
	pub fn transition(&self, state: StateId, input: char) -> Option<StateId> {
		let state = &self.states[state];
		match state.edges.iter().find(|edge| edge.contains(input)) {
			Some(edge) => edge.target,
			None => state.otherwise,
		}
	}


	/// The states reached from state 0 through start-of-input epsilon transitions,
	/// state 0 included. Cycles are cut at the first repeated state.
	pub fn start_chain(&self) -> Chain<'_> {
		Chain::new(self, Some(0), |state| state.start)
	}


	/// The states reached from `state` through end-of-input epsilon transitions,
	/// `state` excluded.
	pub fn end_chain(&self, state: StateId) -> Chain<'_> {
		Chain::new(self, self.states[state].end, |state| state.end)
			.marking(state)
	}
}


/// Iterator over an epsilon chain.
#[derive(Debug)]
pub struct Chain<'a> {
	automaton: &'a Automaton,
	next: Option<StateId>,
	visited: Vec<bool>,
	step: fn(&State) -> Option<StateId>,
}


impl<'a> Chain<'a> {
	fn new(
		automaton: &'a Automaton,
		first: Option<StateId>,
		step: fn(&State) -> Option<StateId>,
	) -> Self {
		Self {
			automaton,
			next: first,
			visited: vec![false; automaton.len()],
			step,
		}
	}


	fn marking(mut self, state: StateId) -> Self {
		self.visited[state] = true;
		self
	}
}


impl<'a> Iterator for Chain<'a> {
	type Item = StateId;

	fn next(&mut self) -> Option<StateId> {
		let state = self.next.take()?;

		if self.visited[state] {
			return None;
		}

		self.visited[state] = true;
		self.next = (self.step)(&self.automaton.states[state]);

		Some(state)
	}
}


/// An ordered collection of automata. The order is the priority: when two automata match
/// the same length, the one with the lower index wins.
#[derive(Debug, Clone, Default)]
pub struct Family {
	automata: Box<[Automaton]>,
}


impl Family {
	pub fn new(automata: Vec<Automaton>) -> Self {
		Self { automata: automata.into() }
	}


	pub fn get(&self, index: usize) -> Option<&Automaton> {
		self.automata.get(index)
	}


	pub fn len(&self) -> usize {
		self.automata.len()
	}


	pub fn is_empty(&self) -> bool {
		self.automata.is_empty()
	}


	pub fn iter(&self) -> impl Iterator<Item = &Automaton> {
		self.automata.iter()
	}
}


impl std::ops::Index<usize> for Family {
	type Output = Automaton;

	fn index(&self, index: usize) -> &Automaton {
		&self.automata[index]
	}
}
