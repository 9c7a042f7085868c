use clap::Parser;

use dork_harvest::{app, cli::Cli, config::Config, utils::init_logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut stdout = std::io::stdout().lock();
    app::start(Config::from_env, &cli, &mut stdout).await?;

    Ok(())
}
