use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser};
use log::debug;
use rs_namegen_core::{NameKind, NamegenConfig, Namer};

/// Generate invented names for units, actions, events, properties,
/// conditions and nations.
#[derive(Debug, Parser)]
#[command(name = "rs-namegen", version)]
struct Args {
	/// TOML configuration file
	#[arg(short, long)]
	config: Option<PathBuf>,

	/// Directory holding the lexicons (overrides the configuration)
	#[arg(short, long)]
	data_dir: Option<PathBuf>,

	/// Kind of name to generate; random for every line when omitted
	#[arg(short, long)]
	kind: Option<NameKind>,

	/// Number of names to print
	#[arg(short = 'n', long, default_value_t = 1)]
	count: usize,

	/// Seed for reproducible output
	#[arg(short, long)]
	seed: Option<u64>,

	/// Context length of the nation model
	#[arg(long)]
	state_size: Option<usize>,

	/// Increase log verbosity (-v info, -vv debug)
	#[arg(short, long, action = ArgAction::Count)]
	verbose: u8,
}

impl Args {
	/// Builds the configuration: file (or defaults), then flags on top.
	fn config(&self) -> anyhow::Result<NamegenConfig> {
		let mut config = match &self.config {
			Some(path) => NamegenConfig::from_file(path)
				.with_context(|| format!("failed to read configuration {}", path.display()))?,
			None => NamegenConfig::default(),
		};

		if let Some(data_dir) = &self.data_dir {
			config.data_dir = data_dir.clone();
		}
		if let Some(state_size) = self.state_size {
			config.state_size = state_size;
		}
		if self.seed.is_some() {
			config.seed = self.seed;
		}

		Ok(config)
	}
}

fn init_logger(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		_ => "debug",
	};
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> anyhow::Result<()> {
	let args = Args::parse();
	init_logger(args.verbose);

	let config = args.config()?;
	debug!("configuration: {config:?}");

	let mut rng = config.rng();
	let namer = Namer::from_config(&config, &mut rng)
		.with_context(|| format!("failed to load lexicons from {}", config.data_dir.display()))?;

	for _ in 0..args.count {
		let kind = args.kind.unwrap_or_else(|| NameKind::random(&mut rng));
		let name = namer.name(kind, &mut rng)?;
		println!("{}: {}", kind.label(), name);
	}

	Ok(())
}
