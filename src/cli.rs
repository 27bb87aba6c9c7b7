use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "parsebox")]
#[command(about = "Decode bytes by media type through a priority-ordered parser registry", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Server(ServerArgs),
    /// Parse a file (or stdin) and print the result as JSON
    Parse(ParseArgs),
    /// List configured media types in priority order
    MediaTypes,
}

#[derive(clap::Args, Debug)]
pub struct ServerArgs {
    /// Address to bind the HTTP server to (overrides server.bind_addr)
    #[arg(long)]
    pub address: Option<SocketAddr>,
}

#[derive(clap::Args, Debug)]
pub struct ParseArgs {
    /// Media type of the input, e.g. application/json
    #[arg(long, short = 't')]
    pub content_type: String,
    /// Input file; reads stdin when omitted
    pub path: Option<PathBuf>,
}
