use std::fs;
use std::path::Path;

pub const COUNTRIES: &[&str] = &[
	"canada", "cuba", "china", "chad", "chile", "colombia", "kenya", "peru", "italy", "mali", "japan",
	"germany", "france", "spain", "norway", "sweden", "finland", "poland", "austria", "brazil",
];

/// Writes a small lexicon tree under `dir`.
pub fn write_data_dir(dir: &Path) {
	fs::write(dir.join("countries.txt"), COUNTRIES.join("\n")).unwrap();
	fs::write(dir.join("animals.txt"), "Fox\nBadger\nOwl\n").unwrap();
	fs::write(dir.join("prefixes.txt"), "ultra\nneo\n").unwrap();

	for (sub, files) in [
		("adjectives", vec![("colors.txt", "red\nblue"), ("moods.txt", "grim\nbold")]),
		("adverbs", vec![("manner.txt", "quietly\nswiftly")]),
		("uncountable_nouns", vec![("weather.txt", "rain\nfog")]),
		("verbs", vec![("motion.txt", "falling\nrising")]),
	] {
		fs::create_dir(dir.join(sub)).unwrap();
		for (name, contents) in files {
			fs::write(dir.join(sub).join(name), contents).unwrap();
		}
	}
}
