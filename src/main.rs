mod cli;

use clap::Parser;
use cli::{Cli, Commands, ParseArgs};
use parsebox::config::Config;
use parsebox::media::MediaType;
use parsebox::observability;
use std::io::Read;

type AnyError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    observability::init_tracing();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Server(args) => {
            let address = args.address.unwrap_or(config.server.bind_addr);
            parsebox::api::run(config, address).await?
        }
        Commands::Parse(args) => parse(&config, args)?,
        Commands::MediaTypes => {
            for media_type in config.build_registry()?.media_types() {
                println!("{media_type}");
            }
        }
    }

    Ok(())
}

fn parse(config: &Config, args: ParseArgs) -> Result<(), AnyError> {
    let media_type: MediaType = args.content_type.parse()?;
    let registry = config.build_registry()?;

    let data = match args.path {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    let parsed = registry.parse(&data, &media_type)?;
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}
