use std::sync::Mutex;

use actix_web::{App, HttpResponse, HttpServer, Responder, get, web};
use anyhow::Context as _;
use log::{error, info};
use rand::rngs::StdRng;
use serde::Deserialize;

use rs_namegen_core::{NameKind, NamegenConfig, Namer};

/// Largest `count` accepted by `/v1/generate`.
const MAX_COUNT: usize = 100;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	kind: Option<String>,
	count: Option<usize>,
}

struct SharedData {
	namer: Namer,
	rng: StdRng,
}

impl GenerateParams {
	/// Requested kind, or `None` for a random kind per name.
	fn kind(&self) -> Result<Option<NameKind>, String> {
		match &self.kind {
			None => Ok(None),
			Some(s) if s.eq_ignore_ascii_case("random") => Ok(None),
			Some(s) => s.parse().map(Some).map_err(|e| format!("{e}")),
		}
	}

	fn count(&self) -> Result<usize, String> {
		match self.count.unwrap_or(1) {
			0 => Err("Count must be at least 1".to_owned()),
			n if n > MAX_COUNT => Err(format!("Count must be at most {MAX_COUNT}")),
			n => Ok(n),
		}
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates `count` names of the requested kind, one per line.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let (kind, count) = match (query.kind(), query.count()) {
		(Ok(kind), Ok(count)) => (kind, count),
		(Err(e), _) | (_, Err(e)) => return HttpResponse::BadRequest().body(e),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Namer lock failed"),
	};
	let SharedData { namer, rng } = &mut *shared_data;

	let mut names = Vec::with_capacity(count);
	for _ in 0..count {
		let kind = kind.unwrap_or_else(|| NameKind::random(rng));
		match namer.name(kind, rng) {
			Ok(name) => names.push(name),
			Err(e) => {
				error!("generation failed: {e}");
				return HttpResponse::InternalServerError().body(e.to_string());
			}
		}
	}

	HttpResponse::Ok().body(names.join("\n"))
}

/// HTTP GET endpoint `/v1/nationality`
#[get("/v1/nationality")]
async fn get_nationality(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Namer lock failed"),
	};
	let SharedData { namer, rng } = &mut *shared_data;

	match namer.nationality(rng) {
		Ok(nationality) => HttpResponse::Ok().body(nationality),
		Err(e) => {
			error!("nationality failed: {e}");
			HttpResponse::InternalServerError().body(e.to_string())
		}
	}
}

#[get("/v1/kinds")]
async fn get_kinds() -> impl Responder {
	let kinds: Vec<&str> = NameKind::ALL.iter().map(|kind| kind.as_str()).collect();
	HttpResponse::Ok().body(kinds.join("\n"))
}

/// Reads the configuration named by `NAMEGEN_CONFIG`, defaults otherwise.
fn load_config() -> anyhow::Result<NamegenConfig> {
	match std::env::var("NAMEGEN_CONFIG") {
		Ok(path) => NamegenConfig::from_file(&path).with_context(|| format!("failed to read configuration {path}")),
		Err(_) => Ok(NamegenConfig::default()),
	}
}

/// Main entry point for the server.
///
/// Builds the namer, wraps it in a `Mutex` together with its RNG,
/// and starts an Actix-web HTTP server.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Lexicons are read from the configured `data_dir`.
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = load_config()?;
	let mut rng = config.rng();
	let namer = Namer::from_config(&config, &mut rng)
		.with_context(|| format!("failed to load lexicons from {}", config.data_dir.display()))?;
	let shared_data = web::Data::new(Mutex::new(SharedData { namer, rng }));

	info!("listening on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.app_data(shared_data.clone())
			.service(get_generated)
			.service(get_nationality)
			.service(get_kinds)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await?;

	Ok(())
}
