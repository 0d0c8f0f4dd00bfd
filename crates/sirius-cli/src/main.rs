use clap::{Parser, Subcommand};
use sirius_types::{ClientConfig, NetworkType};
use std::path::PathBuf;

mod commands;

/// Sirius transaction command-line tools.
#[derive(Parser)]
#[command(name = "sirius-cli")]
#[command(about = "Build, sign, hash and inspect Sirius transactions offline")]
#[command(version)]
struct Cli {
    /// Client configuration file (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Network to use (overrides the configuration file).
    #[arg(long)]
    network: Option<NetworkArg>,

    /// Network generation hash, hex (overrides the configuration file).
    #[arg(long)]
    generation_hash: Option<String>,

    /// Increase log output (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug)]
struct NetworkArg(NetworkType);

impl std::str::FromStr for NetworkArg {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String> {
        let network = match s.to_lowercase().as_str() {
            "mainnet" | "main" => Some(NetworkType::MainNet),
            "testnet" | "test" => Some(NetworkType::TestNet),
            _ => NetworkType::from_name(s),
        };
        network.map(NetworkArg).ok_or_else(|| {
            format!(
                "unknown network: {} (use public, publicTest, private, privateTest, mijin or mijinTest)",
                s
            )
        })
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Derive the address of a public key.
    Address {
        /// Public key, hex.
        public_key: String,
    },

    /// Compute the transaction hash of a signed payload.
    Hash {
        /// Payload, hex.
        payload: String,
    },

    /// Check the signature embedded in a signed payload.
    Verify {
        /// Payload, hex.
        payload: String,
    },

    /// Decode a transaction as reported by the REST gateway.
    Decode {
        /// JSON file (reads stdin when omitted).
        file: Option<PathBuf>,
    },

    /// Build and sign a transfer.
    Transfer {
        /// Recipient: a plain address, or `@name` for a namespace alias.
        #[arg(long)]
        recipient: String,

        /// Mosaic as `<id hex>:<amount>`; may be repeated.
        #[arg(long = "mosaic")]
        mosaics: Vec<String>,

        /// Plain text message.
        #[arg(long)]
        message: Option<String>,

        /// Maximum fee (overrides the configuration file).
        #[arg(long)]
        max_fee: Option<u64>,

        /// Deadline, hours from now (overrides the configuration file).
        #[arg(long)]
        deadline_hours: Option<u64>,
    },

    /// Cosign an announced aggregate bonded transaction.
    Cosign {
        /// JSON file with the aggregate (reads stdin when omitted).
        file: Option<PathBuf>,
    },
}

/// Application context shared across commands.
struct AppContext {
    config: ClientConfig,
}

impl AppContext {
    fn from_cli(cli: &Cli) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = match &cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig {
                network_type: NetworkType::MijinTest,
                generation_hash: String::new(),
                default_deadline_hours: 2,
                default_max_fee: 0,
            },
        };
        if let Some(NetworkArg(network_type)) = cli.network {
            config.network_type = network_type;
        }
        if let Some(hash) = &cli.generation_hash {
            config.generation_hash = hash.clone();
        }
        log::debug!("using network {}", config.network_type);
        Ok(Self { config })
    }

    fn generation_hash(&self) -> Result<[u8; 32], Box<dyn std::error::Error>> {
        if self.config.generation_hash.is_empty() {
            return Err("a generation hash is required (--generation-hash or --config)".into());
        }
        Ok(self.config.generation_hash_bytes()?)
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();

    let result = AppContext::from_cli(&cli).and_then(|ctx| match cli.command {
        Commands::Address { public_key } => commands::show_address(&ctx, &public_key),
        Commands::Hash { payload } => commands::hash_payload(&ctx, &payload),
        Commands::Verify { payload } => commands::verify_payload(&ctx, &payload),
        Commands::Decode { file } => commands::decode(file.as_deref()),
        Commands::Transfer {
            recipient,
            mosaics,
            message,
            max_fee,
            deadline_hours,
        } => commands::transfer(&ctx, &recipient, &mosaics, message.as_deref(), max_fee, deadline_hours),
        Commands::Cosign { file } => commands::cosign(file.as_deref()),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
