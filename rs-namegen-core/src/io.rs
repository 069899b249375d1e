use std::path::{Path, PathBuf};

use crate::error::Result;

/// Reads a line-delimited word list.
///
/// Lines are trimmed and lower-cased; blank lines are dropped.
pub(crate) fn read_words<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<String>> {
	let contents = std::fs::read_to_string(path)?;
	Ok(contents
		.lines()
		.map(|line| line.trim().to_lowercase())
		.filter(|word| !word.is_empty())
		.collect())
}

/// Path of the model cache kept beside a lexicon: `data/countries.txt`
/// caches to `data/countries.bin`.
pub(crate) fn cache_path<P: AsRef<Path>>(lexicon_path: P) -> PathBuf {
	lexicon_path.as_ref().with_extension("bin")
}

/// Lists the files matching a glob pattern, sorted by path.
///
/// Directories and unreadable entries are skipped.
pub(crate) fn list_files(pattern: &str) -> Result<Vec<PathBuf>> {
	let mut files: Vec<PathBuf> = glob::glob(pattern)?
		.filter_map(|entry| entry.ok())
		.filter(|path| path.is_file())
		.collect();
	files.sort();
	Ok(files)
}
