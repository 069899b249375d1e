/// Title-cases a string.
///
/// The first letter of every run of letters is upper-cased, the others are
/// lower-cased. Non-letters are kept and end the current run, so
/// `"o'brien isle"` becomes `"O'Brien Isle"`.
pub fn title_case(s: &str) -> String {
	let mut out = String::with_capacity(s.len());
	let mut in_word = false;
	for c in s.chars() {
		if c.is_alphabetic() {
			if in_word {
				out.extend(c.to_lowercase());
			} else {
				out.extend(c.to_uppercase());
			}
			in_word = true;
		} else {
			out.push(c);
			in_word = false;
		}
	}
	out
}
