use std::fmt;

use serde::{Deserialize, Serialize};

/// A state of the Markov chain.
///
/// `Start` and `End` are sentinels; they never collide with a window
/// because they are not strings.
///
/// The derived ordering (`Start < End < Window`) gives transition rows a
/// stable iteration order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Context {
	Start,
	End,
	Window(String),
}

impl Context {
	/// Builds a window context from a slice of characters.
	pub fn window(chars: &[char]) -> Self {
		Context::Window(chars.iter().collect())
	}

	/// Returns the window text, or `None` for a sentinel.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Context::Window(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the last character of the window.
	pub fn last_char(&self) -> Option<char> {
		self.as_str()?.chars().last()
	}
}

impl fmt::Display for Context {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Context::Start => write!(f, "^"),
			Context::End => write!(f, "$"),
			Context::Window(s) => write!(f, "{s}"),
		}
	}
}

impl From<&str> for Context {
	fn from(value: &str) -> Self {
		Context::Window(value.to_owned())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sentinels_sort_first() {
		assert!(Context::Start < Context::End);
		assert!(Context::End < Context::from(""));
		assert!(Context::from("ab") < Context::from("ac"));
	}

	#[test]
	fn test_last_char() {
		assert_eq!(Context::from("abc").last_char(), Some('c'));
		assert_eq!(Context::from("").last_char(), None);
		assert_eq!(Context::End.last_char(), None);
	}

	#[test]
	fn test_display() {
		assert_eq!(Context::Start.to_string(), "^");
		assert_eq!(Context::End.to_string(), "$");
		assert_eq!(Context::window(&['n', 'a']).to_string(), "na");
	}
}
