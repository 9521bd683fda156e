use std::{
	io,
	fs::{self, File},
	path::{Path, PathBuf},
};


/// Run the test over every file under the given directory, relative to the crate root.
/// Files are visited in path order, recursing into subdirectories.
pub fn test_dir<P, F>(path: P, mut test: F) -> io::Result<()>
where
	P: AsRef<Path>,
	F: FnMut(&Path, File) -> io::Result<()>,
{
	let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	dir.push(path);

	fn run<F>(dir: &Path, test: &mut F) -> io::Result<usize>
	where
		F: FnMut(&Path, File) -> io::Result<()>,
	{
		let mut entries = fs::read_dir(dir)?
			.map(|entry| entry.map(|entry| entry.path()))
			.collect::<io::Result<Vec<_>>>()?;
		entries.sort();

		let mut visited = 0;
		for path in entries {
			if path.is_dir() {
				visited += run(&path, test)?;
			} else {
				let file = File::open(&path)?;
				test(&path, file)?;
				visited += 1;
			}
		}

		Ok(visited)
	}

	match run(&dir, &mut test)? {
		0 => Err(io::Error::new(io::ErrorKind::NotFound, format!("no test files in {}", dir.display()))),
		_ => Ok(()),
	}
}
