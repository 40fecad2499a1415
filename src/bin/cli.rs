//! ssdbkv CLI Client
//!
//! Command-line interface for one-shot commands against a store.

use clap::{Parser, Subcommand};
use serde::Serialize;
use ssdbkv::{Client, Config, Direction, Order, Pairs, Range, SetOptions, TcpTransport};
use tracing_subscriber::{fmt, EnvFilter};

/// ssdbkv CLI
#[derive(Parser, Debug)]
#[command(name = "ssdbkv-cli")]
#[command(about = "CLI for SSDB-style key-value stores")]
#[command(version)]
struct Args {
    /// Server address (overrides the config file)
    #[arg(short, long)]
    server: Option<String>,

    /// Password sent with `auth` after connecting
    #[arg(short, long)]
    password: Option<String>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Window arguments shared by range commands
#[derive(clap::Args, Debug)]
struct Window {
    /// Exclusive start ("" = -inf)
    #[arg(long, default_value = "")]
    start: String,

    /// Inclusive end ("" = +inf)
    #[arg(long, default_value = "")]
    end: String,

    /// Maximum number of results
    #[arg(long, default_value = "100")]
    limit: u64,

    /// Walk in reverse order
    #[arg(long)]
    reverse: bool,
}

impl Window {
    fn range(&self) -> Range {
        Range::new(self.start.as_str(), self.end.as_str(), self.limit)
    }

    fn order(&self) -> Order {
        if self.reverse {
            Order::Reverse
        } else {
            Order::Forward
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key
    Get { key: String },

    /// Set a key-value pair
    Set {
        key: String,
        value: String,

        /// Time to live in seconds
        #[arg(long)]
        ttl: Option<i64>,
    },

    /// Delete a key
    Del { key: String },

    /// Check whether a key exists
    Exists { key: String },

    /// Increment a counter
    Incr {
        key: String,

        #[arg(default_value = "1", allow_hyphen_values = true)]
        delta: i64,
    },

    /// Remaining time to live of a key
    Ttl { key: String },

    /// List keys in a window
    Keys {
        #[command(flatten)]
        window: Window,
    },

    /// List key-value pairs in a window
    Scan {
        #[command(flatten)]
        window: Window,
    },

    /// Get a hashmap field
    Hget { name: String, key: String },

    /// Set a hashmap field
    Hset {
        name: String,
        key: String,
        value: String,
    },

    /// Delete a hashmap field
    Hdel { name: String, key: String },

    /// Every field of a hashmap
    Hgetall { name: String },

    /// Number of fields in a hashmap
    Hsize { name: String },

    /// Fields of a hashmap in a window
    Hscan {
        name: String,

        #[command(flatten)]
        window: Window,
    },

    /// Push values onto a queue (back by default)
    Qpush {
        name: String,

        #[arg(required = true)]
        values: Vec<String>,

        /// Push onto the front instead
        #[arg(long)]
        front: bool,
    },

    /// Pop a value from a queue (front by default)
    Qpop {
        name: String,

        /// Pop from the back instead
        #[arg(long)]
        back: bool,
    },

    /// Length of a queue
    Qsize { name: String },

    /// Elements with index in [begin, end]
    Qslice {
        name: String,

        #[arg(default_value = "0", allow_hyphen_values = true)]
        begin: i64,

        #[arg(default_value = "-1", allow_hyphen_values = true)]
        end: i64,
    },
}

/// Result of one command, printable as text or JSON
#[derive(Serialize, Debug)]
#[serde(untagged)]
enum Output {
    Done,
    Text(String),
    Flag(bool),
    Count(i64),
    List(Vec<String>),
    Pairs(Pairs),
}

impl Output {
    fn print_plain(&self) {
        match self {
            Output::Done => println!("ok"),
            Output::Text(s) => println!("{}", s),
            Output::Flag(b) => println!("{}", b),
            Output::Count(n) => println!("{}", n),
            Output::List(items) => {
                for item in items {
                    println!("{}", item);
                }
            }
            Output::Pairs(pairs) => {
                for (key, value) in pairs {
                    println!("{}\t{}", key, value);
                }
            }
        }
    }
}

fn run(client: &mut Client<TcpTransport>, command: Commands) -> ssdbkv::Result<Output> {
    let output = match command {
        Commands::Get { key } => Output::Text(client.get(&key)?),
        Commands::Set { key, value, ttl } => {
            client.set_with(&key, value, SetOptions { ttl })?;
            Output::Done
        }
        Commands::Del { key } => {
            client.del(&key)?;
            Output::Done
        }
        Commands::Exists { key } => Output::Flag(client.exists(&key)?),
        Commands::Incr { key, delta } => Output::Count(client.incr(&key, delta)?),
        Commands::Ttl { key } => Output::Count(client.ttl(&key)?),
        Commands::Keys { window } => Output::List(match window.order() {
            Order::Forward => client.keys(&window.range())?,
            Order::Reverse => client.rkeys(&window.range())?,
        }),
        Commands::Scan { window } => Output::Pairs(match window.order() {
            Order::Forward => client.scan(&window.range())?,
            Order::Reverse => client.rscan(&window.range())?,
        }),
        Commands::Hget { name, key } => Output::Text(client.hget(&name, &key)?),
        Commands::Hset { name, key, value } => {
            client.hset(&name, &key, value)?;
            Output::Done
        }
        Commands::Hdel { name, key } => {
            client.hdel(&name, &key)?;
            Output::Done
        }
        Commands::Hgetall { name } => Output::Pairs(client.hgetall(&name)?),
        Commands::Hsize { name } => Output::Count(client.hsize(&name)?),
        Commands::Hscan { name, window } => {
            Output::Pairs(client.hscan(&name, &window.range(), window.order())?)
        }
        Commands::Qpush {
            name,
            values,
            front,
        } => {
            let direction = if front { Direction::Front } else { Direction::Back };
            Output::Count(client.qpush(&name, values, direction)?)
        }
        Commands::Qpop { name, back } => {
            let direction = if back { Direction::Back } else { Direction::Front };
            Output::Text(client.qpop(&name, direction)?)
        }
        Commands::Qsize { name } => Output::Count(client.qsize(&name)?),
        Commands::Qslice { name, begin, end } => Output::List(client.qslice(&name, begin, end)?),
    };
    Ok(output)
}

fn load_config(args: &Args) -> ssdbkv::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    if let Some(server) = &args.server {
        config.addr = server.clone();
    }
    if let Some(password) = &args.password {
        config.password = Some(password.clone());
    }
    config.validate()?;
    Ok(config)
}

fn main() {
    // Initialize tracing/logging (stderr keeps stdout clean for results)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,ssdbkv=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    };

    tracing::debug!("ssdbkv CLI v{} connecting to {}", ssdbkv::VERSION, config.addr);

    let mut client = match Client::connect(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to connect to {}: {}", config.addr, e);
            std::process::exit(1);
        }
    };

    let json = args.json;
    let result = run(&mut client, args.command);

    if let Err(e) = client.close() {
        tracing::debug!("Error closing connection: {}", e);
    }

    match result {
        Ok(output) if json => match serde_json::to_string(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                tracing::error!("Cannot encode result: {}", e);
                std::process::exit(1);
            }
        },
        Ok(output) => output.print_plain(),
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}
