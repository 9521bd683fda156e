use std::{ffi::OsString, path::PathBuf};

use clap::{clap_app, crate_authors, crate_version, crate_description, value_t};

use slimsh::lexer::Options;


#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
	Help(Box<str>),
	Version(Box<str>),
	Run(Args)
}


#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Args {
	/// Print raw frames instead of tokens.
	pub frames: bool,
	/// Print one JSON object per line.
	pub json: bool,
	/// Run the scanner on a producer thread.
	pub threaded: bool,
	/// Stop after this many tokens.
	pub limit: Option<usize>,
	/// Capacity of the lookahead stack.
	pub lookahead: usize,
	/// The script to read, stdin if absent.
	pub path: Option<PathBuf>,
}


pub fn parse<A, T>(args: A) -> clap::Result<Command>
where
	A: IntoIterator<Item = T>,
	T: Into<OsString> + Clone
{
	let app = clap_app!(
		slimsh =>
			(version: crate_version!())
			(author: crate_authors!())
			(about: crate_description!())
			(@arg frames: --frames "Print the raw frames instead of tokens")
			(@arg json: --json "Print one JSON object per line")
			(@arg threaded: --threaded "Run the scanner on its own thread")
			(@arg limit: --limit +takes_value "Stop after N tokens")
			(@arg lookahead: --lookahead +takes_value "Capacity of the lookahead stack")
			(@arg FILE: "The script to tokenize, stdin when absent")
	);

	let matches = match app.get_matches_from_safe(args) {
		Ok(matches) => matches,

		Err(error) => return match error.kind {
			clap::ErrorKind::HelpDisplayed => Ok(
				Command::Help(error.message.into_boxed_str())
			),
			clap::ErrorKind::VersionDisplayed => Ok(
				Command::Version(error.message.into_boxed_str())
			),
			_ => Err(error)
		}
	};

	let limit = match value_t!(matches, "limit", usize) {
		Ok(0) => return Err(
			clap::Error::value_validation_auto("limit must be at least 1".into())
		),
		Ok(limit) => Some(limit),
		Err(error) if error.kind == clap::ErrorKind::ArgumentNotFound => None,
		Err(error) => return Err(error),
	};

	let lookahead = match value_t!(matches, "lookahead", usize) {
		Ok(0) => return Err(
			clap::Error::value_validation_auto("lookahead must be at least 1".into())
		),
		Ok(lookahead) => lookahead,
		Err(error) if error.kind == clap::ErrorKind::ArgumentNotFound => {
			Options::default().lookahead
		}
		Err(error) => return Err(error),
	};

	Ok(
		Command::Run(
			Args {
				frames: matches.is_present("frames"),
				json: matches.is_present("json"),
				threaded: matches.is_present("threaded"),
				limit,
				lookahead,
				path: matches.value_of_os("FILE").map(PathBuf::from),
			}
		)
	)
}
