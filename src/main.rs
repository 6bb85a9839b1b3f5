use std::{error::Error, net::IpAddr};

use clap::{builder::NonEmptyStringValueParser, Parser};
use diagram_weaver::{ApiService, DiagramWeaver, GroqLlm, DEFAULT_MODEL, GROQ_API_BASE};
use tracing::{debug, info, Level};
use tracing_subscriber::fmt;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// Groq API key.
	#[arg(
		long,
		env = "GROQ_API_KEY",
		hide_env_values = true,
		value_parser = NonEmptyStringValueParser::new()
	)]
	api_key: String,
	/// Base URL of the OpenAI compatible completion API.
	#[arg(long, env = "GROQ_API_BASE", default_value = GROQ_API_BASE)]
	api_base: String,
	/// Model to prompt.
	#[arg(long, env = "GROQ_MODEL", default_value = DEFAULT_MODEL)]
	model: String,
	/// Address to listen on.
	#[arg(long, env = "HOST", default_value = "0.0.0.0")]
	host: IpAddr,
	/// Port to listen on.
	#[arg(long, env = "PORT", default_value_t = 5000)]
	port: u16,
	/// Log level
	#[arg(long, env = "LOG_LEVEL", default_value = "info")]
	log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
	// .env has to be loaded before the arguments since they fall back to the environment
	let dotenv = dotenv::dotenv();

	let args = Args::parse();

	let subscriber = fmt::Subscriber::builder().with_max_level(args.log_level).finish();
	tracing::subscriber::set_global_default(subscriber)?;

	info!(task = "tracing_setup", result = "success", "tracing successfully set up");

	match dotenv {
		Ok(path) => info!(
			task = "dotenv_setup",
			result = "success",
			path = %path.display(),
			"dotenv loaded successfully"
		),
		Err(e) => debug!(task = "dotenv_setup", result = "skipped", "no .env loaded: {}", e),
	}

	let llm = GroqLlm::new(&args.api_key, &args.api_base);
	let weaver = DiagramWeaver::new(llm, args.model);

	ApiService::new(weaver).serve((args.host, args.port).into()).await?;

	Ok(())
}
