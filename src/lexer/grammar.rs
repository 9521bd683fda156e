use std::{fmt, sync::Arc};

use crate::scanner::{Automaton, Family, Input, Scanner};


/// An exact-match classification table, mapping lexemes to token kinds.
pub struct Table<K: 'static> {
	name: &'static str,
	entries: &'static [(&'static str, K)],
}


impl<K: 'static> Table<K> {
	pub const fn new(name: &'static str, entries: &'static [(&'static str, K)]) -> Self {
		Self { name, entries }
	}


	pub fn name(&self) -> &'static str {
		self.name
	}


	pub fn get(&self, lexeme: &str) -> Option<&K> {
		self.entries
			.iter()
			.find(|(key, _)| *key == lexeme)
			.map(|(_, kind)| kind)
	}


	pub fn lexemes(&self) -> impl Iterator<Item = &'static str> {
		self.entries.iter().map(|(lexeme, _)| *lexeme)
	}


	pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static K)> {
		self.entries.iter().map(|(lexeme, kind)| (*lexeme, kind))
	}
}


impl<K: 'static> fmt::Debug for Table<K> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("Table")
			.field("name", &self.name)
			.field("entries", &self.entries.len())
			.finish()
	}
}


/// What to do with the text of a frame matched by an automaton.
pub enum Action<K: 'static> {
	/// Consume the frame without producing a token.
	Skip,
	/// Look the text up in a table. A miss is a contract violation.
	Lookup(&'static Table<K>),
	/// Build the token kind from the raw text.
	Pass(fn(&str) -> K),
}


impl<K: 'static> Clone for Action<K> {
	fn clone(&self) -> Self {
		*self
	}
}


impl<K: 'static> Copy for Action<K> { }


impl<K: 'static> fmt::Debug for Action<K> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Action::Skip => write!(f, "Skip"),
			Action::Lookup(table) => write!(f, "Lookup({})", table.name),
			Action::Pass(_) => write!(f, "Pass"),
		}
	}
}


/// An automaton together with its action, and optionally the grammar that re-tokenizes
/// its matches.
#[derive(Debug)]
pub struct Rule<K: 'static> {
	automaton: Automaton,
	action: Action<K>,
	nested: Option<Grammar<K>>,
}


impl<K: 'static> Rule<K> {
	pub fn new(automaton: Automaton, action: Action<K>) -> Self {
		Self { automaton, action, nested: None }
	}


	pub fn skip(automaton: Automaton) -> Self {
		Self::new(automaton, Action::Skip)
	}


	pub fn lookup(automaton: Automaton, table: &'static Table<K>) -> Self {
		Self::new(automaton, Action::Lookup(table))
	}


	pub fn pass(automaton: Automaton, build: fn(&str) -> K) -> Self {
		Self::new(automaton, Action::Pass(build))
	}


	/// Re-tokenize every match of this rule with the given grammar.
	pub fn nested(mut self, grammar: Grammar<K>) -> Self {
		self.nested = Some(grammar);
		self
	}
}


/// The classification half of a rule, kept once its automaton joined the family.
#[derive(Debug)]
pub struct Classifier<K: 'static> {
	pub action: Action<K>,
	pub nested: Option<Grammar<K>>,
}


/// An ordered list of rules. The order is the priority of the automata.
#[derive(Debug)]
pub struct Grammar<K: 'static> {
	family: Arc<Family>,
	classifiers: Box<[Classifier<K>]>,
}


impl<K: 'static> Grammar<K> {
	pub fn new(rules: Vec<Rule<K>>) -> Self {
		let mut automata = Vec::with_capacity(rules.len());
		let mut classifiers = Vec::with_capacity(rules.len());

		for Rule { automaton, action, nested } in rules {
			let automaton = match &nested {
				Some(grammar) => automaton.with_nested(grammar.family.clone()),
				None => automaton,
			};

			automata.push(automaton);
			classifiers.push(Classifier { action, nested });
		}

		Self {
			family: Arc::new(Family::new(automata)),
			classifiers: classifiers.into(),
		}
	}


	pub fn family(&self) -> &Arc<Family> {
		&self.family
	}


	/// The classifier for the automaton at the given index.
	pub fn classifier(&self, automaton: usize) -> Option<&Classifier<K>> {
		self.classifiers.get(automaton)
	}


	/// An inline scanner over the input, driven by this grammar's family.
	pub fn scanner<I>(&self, input: I) -> Scanner<I>
	where
		I: Input,
	{
		Scanner::new(self.family.clone(), input)
	}
}
