use clap::{Parser, Subcommand};
use starlink_pop::config::Config;
use starlink_pop::output::print_lookup;
use starlink_pop::{load_lookup_data, logging, lookup, remote_source, server, LookupData};
use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Find the Starlink PoP serving an IP address", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the connection page over HTTP (default)
    Serve {
        /// Address to listen on, overrides STARLINK_POP_LISTEN
        #[arg(short, long)]
        listen: Option<SocketAddr>,
    },
    /// Classify one address and print the result
    Lookup {
        /// IPv4 or IPv6 address
        ip: String,
        /// Local copy of geoip-latest.json
        #[arg(long, requires = "pop_file")]
        geoip_file: Option<PathBuf>,
        /// Local copy of pop.json
        #[arg(long, requires = "geoip_file")]
        pop_file: Option<PathBuf>,
        /// Fetch the feed even if today's cache files exist
        #[arg(long)]
        no_cache: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    logging::init_logging()?;
    log::info!("#Start main()");

    let cli = Cli::parse();
    let mut config = Config::from_env()?;

    match cli.command.unwrap_or(Command::Serve { listen: None }) {
        Command::Serve { listen } => {
            if let Some(listen) = listen {
                config.listen = listen;
            }
            let source = remote_source(&config)?;
            server::serve(config, source).await?;
        }
        Command::Lookup {
            ip,
            geoip_file,
            pop_file,
            no_cache,
        } => {
            let data = match (geoip_file, pop_file) {
                (Some(geoip_path), Some(pop_path)) => LookupData::Files {
                    geoip_path,
                    pop_path,
                },
                _ if no_cache => LookupData::Remote,
                _ => LookupData::Cached,
            };
            let (dataset, pops) = load_lookup_data(&config, &data).await?;
            let result = lookup(Some(ip.as_str()), &dataset, &pops)?;
            print_lookup(&result);
        }
    }

    Ok(())
}
