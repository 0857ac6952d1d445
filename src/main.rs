use std::io;
use std::process::ExitCode;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use regcalc::{Io, State};

///Interactive calculator with four registers A-D.
///
///Reads commands from stdin, prompts and results go to stdout, logs go to stderr.
#[derive(Parser, Debug)]
#[command(name = "regcalc")]
#[command(version, about, long_about = None)]
struct Cli {
	///Log filter, any tracing EnvFilter directive (e.g. "info", "regcalc=warn")
	#[arg(long, default_value = "debug")]
	log_level: String,

	///Emit logs as JSON lines
	#[arg(long)]
	json_logs: bool,

	///Skip the menu on startup ('m' still prints it)
	#[arg(long)]
	no_menu: bool,
}

fn main() -> ExitCode {
	let cli = Cli::parse();

	let filter = match EnvFilter::try_new(&cli.log_level) {
		Ok(f) => f,
		Err(e) => {
			eprintln!("! Invalid log filter \"{}\": {e}", cli.log_level);
			return ExitCode::FAILURE;
		}
	};
	let logs = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr);	//keep stdout for the session itself
	if cli.json_logs {logs.json().init();}
	else {logs.init();}

	let mut input = io::stdin().lock();
	let mut output = io::stdout();
	let mut st = State::default();
	match regcalc::start(&mut st, &mut Io::new(&mut input, &mut output), !cli.no_menu) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			tracing::error!("Session aborted: {e}");
			ExitCode::FAILURE
		}
	}
}
