mod args;
mod log;

use std::{
	fs::File,
	io::{self, BufReader, BufWriter, Read, Write},
};

use thiserror::Error as ThisError;
use tracing::debug;

use slimsh::{
	channel::Channel,
	lexer::{self, FrameSource, Lexer, Options},
	scanner::{BuildError, Frame, Input, Reader},
	shell,
	term::color,
};
use args::{Args, Command};


#[derive(Debug, ThisError)]
enum Failure {
	#[error("{0}")]
	Io(#[from] io::Error),
	#[error("invalid grammar: {0}")]
	Grammar(#[from] BuildError),
	#[error("{0}")]
	Lexer(#[from] lexer::Error),
	#[error("{0}")]
	Json(#[from] serde_json::Error),
}


fn main() -> ! {
	let command = match args::parse(std::env::args_os()) {
		Ok(command) => command,
		Err(error) => {
			eprint!("{}", error);
			std::process::exit(1)
		}
	};

	let args = match command {
		Command::Run(args) => args,
		Command::Help(msg) | Command::Version(msg) => {
			println!("{}", msg);
			std::process::exit(0)
		},
	};

	if let Err(error) = log::init() {
		eprintln!("failed to initialize logging: {}", error);
	}

	color::enable(!args.json && termion::is_tty(&io::stdout()));

	let exit_code = match run(args) {
		Ok(()) => 0,
		Err(error) => {
			eprintln!("{}: {}", color::Fg(color::Red, "Error"), error);
			2
		}
	};

	std::process::exit(exit_code)
}


fn run(args: Args) -> Result<(), Failure> {
	let input: Box<dyn Read + Send> = match &args.path {
		Some(path) => Box::new(File::open(path)?),
		None => Box::new(io::stdin()),
	};
	let input: Box<dyn Input + Send> = Box::new(Reader::new(BufReader::new(input)));

	let grammar = shell::grammar()?;
	let scanner = grammar.scanner(input);

	debug!(path = ?args.path, threaded = args.threaded, "tokenizing");

	let source: Box<dyn FrameSource> = if args.threaded {
		Box::new(Channel::spawn(scanner)?)
	} else {
		Box::new(scanner)
	};

	let stdout = io::stdout();
	let mut out = BufWriter::new(stdout.lock());

	if args.frames {
		print_frames(source, &args, &mut out)?;
	} else {
		let options = Options { lookahead: args.lookahead };
		let mut lexer = Lexer::with_options(grammar, source, options);
		let mut count = 0;

		while let Some(token) = lexer.lex() {
			let token = token?;

			if args.json {
				serde_json::to_writer(&mut out, &token)?;
				writeln!(out)?;
			} else {
				writeln!(out, "{}", token)?;
			}

			count += 1;
			if args.limit == Some(count) {
				debug!(count, "token limit reached");
				lexer.stop();
			}
		}
	}

	out.flush()?;

	Ok(())
}


fn print_frames<S, W>(mut source: S, args: &Args, out: &mut W) -> Result<(), Failure>
where
	S: FrameSource,
	W: Write,
{
	let mut count = 0;

	while let Some(frame) = source.pull()? {
		if args.json {
			serde_json::to_writer(&mut *out, &frame)?;
			writeln!(out)?;
		} else {
			print_frame(&frame, out)?;
		}

		count += 1;
		if args.limit == Some(count) {
			source.stop();
		}

		if frame.is_sentinel() {
			break;
		}
	}

	Ok(())
}


fn print_frame<W: Write>(frame: &Frame, out: &mut W) -> io::Result<()> {
	let indent = frame.depth * 2;
	let pos = format!("{}:{}", frame.pos.line, frame.pos.column);

	match frame.automaton {
		Some(automaton) => writeln!(
			out,
			"{}  {:indent$}{} {:?}",
			color::Fg(color::Cyan, pos),
			"",
			color::Fg(color::Green, automaton),
			frame.text,
			indent = indent,
		),

		None => writeln!(
			out,
			"{}  {:indent$}{}",
			color::Fg(color::Cyan, pos),
			"",
			color::Fg(color::Magenta, "end"),
			indent = indent,
		),
	}
}
