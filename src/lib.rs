//! A shell front end built on a longest-match automata scanner.
//!
//! The [`scanner`] runs an ordered family of automata over a character stream and
//! produces frames. Frames reach the [`lexer`] either inline or through a [`channel`]
//! from a producer thread. The lexer classifies frames into tokens according to a grammar,
//! such as the POSIX [`shell`] grammar.

pub mod channel;
pub mod lexer;
pub mod scanner;
pub mod shell;
pub mod source;
pub mod term;
#[cfg(test)]
mod tests;
