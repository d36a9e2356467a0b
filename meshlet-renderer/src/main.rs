use clap::Parser;
use meshlet_renderer::cli_args::{Cli, Command};
use meshlet_renderer::inspect::inspect;
use meshlet_renderer::render::render;

fn main() -> anyhow::Result<()> {
	#[cfg(feature = "profile-with-puffin")]
	let _puffin_server = {
		profiling::puffin::set_scopes_on(true);
		let server_addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
		puffin_http::Server::new(&server_addr)?
	};

	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let cli = Cli::parse();
	match cli.command {
		Command::Inspect(args) => inspect(&args),
		Command::Render(args) => render(&args),
	}
}
