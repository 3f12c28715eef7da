//! Shakemix CLI
//!
//! # Commands
//!
//! - `mix` - run the mixing pipeline over a seed and print the derived byte
//! - `serve` - host the seed-granting endpoint
//! - `seed` - fetch a seed from the endpoint and print it

use clap::{Parser, Subcommand};
use num_bigint::BigUint;

use shakemix::rpc::server::{SeedServer, SeedServerConfig};
use shakemix::rpc::{
    SeedApiConfig, SeedClient, DEFAULT_API_KEY, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS,
};
use shakemix::{mix, MixError, OsEntropy, PipelineConfig};

#[derive(Parser)]
#[command(name = "shakemix")]
#[command(version = "0.1.0")]
#[command(about = "SHAKE-based entropy mixing pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Seed endpoint URL
    #[arg(long, global = true, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Shared API key for the seed endpoint
    #[arg(long, global = true, default_value = DEFAULT_API_KEY)]
    key: String,

    /// Seed request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the mixing pipeline and print the derived byte
    Mix {
        /// Initial seed (decimal, arbitrary precision; fetched from the
        /// seed endpoint when omitted)
        #[arg(long)]
        initial: Option<String>,

        /// Number of full passes
        #[arg(long, default_value_t = 1)]
        loops: u32,

        /// Randomized multiply repetitions
        #[arg(long, default_value_t = 1)]
        mul_times: u32,

        /// Randomized add repetitions
        #[arg(long, default_value_t = 1)]
        add_times: u32,

        /// SHAKE-256 digest length in hex characters
        #[arg(long, default_value_t = 1024)]
        hash1_len: usize,

        /// Repeated-hashing iteration count
        #[arg(long, default_value_t = 10)]
        hash1_loops: u32,

        /// SHAKE-128 digest length in hex characters
        #[arg(long, default_value_t = 512)]
        hash2_len: usize,

        /// Characters to delete from the shuffled digest
        #[arg(long, default_value_t = 10)]
        remove_chars: usize,

        /// Final digest length in hex characters
        #[arg(long, default_value_t = 2048)]
        hash4_len: usize,

        /// Final divisor (validated non-zero)
        #[arg(long, default_value_t = 8)]
        final_div: u64,
    },

    /// Host the seed-granting endpoint
    Serve {
        /// Port to bind on localhost
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },

    /// Fetch a seed from the endpoint and print it
    Seed,
}

fn main() {
    let cli = Cli::parse();

    let api_config = SeedApiConfig {
        url: cli.api_url.clone(),
        api_key: cli.key.clone(),
        timeout_secs: cli.timeout,
    };

    let result = match cli.command {
        Commands::Mix {
            initial,
            loops,
            mul_times,
            add_times,
            hash1_len,
            hash1_loops,
            hash2_len,
            remove_chars,
            hash4_len,
            final_div,
        } => {
            let config = PipelineConfig {
                loops,
                mul_times,
                add_times,
                hash1_len,
                hash1_loops,
                hash2_len,
                remove_chars,
                hash4_len,
                final_div,
            };
            cmd_mix(initial, &config, &api_config)
        }
        Commands::Serve { port } => cmd_serve(port, cli.key.clone()),
        Commands::Seed => cmd_seed(&api_config),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        let code = e.downcast_ref::<MixError>().map_or(1, MixError::exit_code);
        std::process::exit(code);
    }
}

fn cmd_mix(
    initial: Option<String>,
    config: &PipelineConfig,
    api: &SeedApiConfig,
) -> anyhow::Result<()> {
    let seed = match initial {
        Some(text) => text.parse::<BigUint>().map_err(|_| {
            anyhow::anyhow!("invalid initial seed {text:?}: must be a non-negative decimal integer")
        })?,
        None => {
            println!("Fetching seed from {}...", api.url);
            let client = SeedClient::with_config(api.clone());
            let rt = tokio::runtime::Runtime::new()?;
            let seed = rt.block_on(client.fetch_seed())?;
            println!("Seed: {seed}");
            BigUint::from(seed)
        }
    };

    let result = mix(seed, config, &mut OsEntropy)?;
    println!("Final 0-255 result: {result}");

    Ok(())
}

fn cmd_serve(port: u16, api_key: String) -> anyhow::Result<()> {
    let server = SeedServer::new(SeedServerConfig { port, api_key });
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server.start())
}

fn cmd_seed(api: &SeedApiConfig) -> anyhow::Result<()> {
    let client = SeedClient::with_config(api.clone());
    let rt = tokio::runtime::Runtime::new()?;
    let seed = rt.block_on(client.fetch_seed())?;
    println!("{seed}");
    Ok(())
}
