//! Configuration for the osi-sim application.
//!
//! Handles parsing command-line arguments and filling in defaults
//! (including a time-based seed that is printed so runs are reproducible).
//!
//! # Philosophy
//!
//! The tool should work with ZERO arguments: it then lists the layers and
//! sends the two demo messages through the stack, narrating every step.

use clap::Parser;
use std::path::PathBuf;

/// Messages sent when none are given on the command line.
pub const DEFAULT_MESSAGES: [&str; 2] = ["Hello, OSI Model!", "Important system data"];

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "osi-sim",
    version,
    about = "Educational OSI model simulator: encapsulation and decapsulation through 7 layers"
)]
pub struct Cli {
    /// Message to send through the stack (repeatable; default: two demo messages)
    #[arg(short, long = "message", value_name = "TEXT")]
    pub messages: Vec<String>,

    /// Number of additional generated sample messages
    #[arg(long, default_value_t = 0)]
    pub samples: usize,

    /// Random seed for generated samples (default: time-based)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Don't narrate each layer step
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the seven layers with their descriptions
    #[arg(long)]
    pub layers: bool,

    /// Write the encapsulated packet of the first message as JSON
    #[arg(long, value_name = "PATH")]
    pub dump_packet: Option<PathBuf>,

    /// Load a JSON packet and decapsulate it instead of running round trips
    #[arg(long, value_name = "PATH")]
    pub receive: Option<PathBuf>,

    /// Print resolved configuration
    #[arg(long)]
    pub print_config: bool,

    /// Don't print metrics summary
    #[arg(long)]
    pub no_metrics: bool,
}

/// Complete configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct Config {
    // === Messages ===
    /// Messages given explicitly (or the demo defaults)
    pub messages: Vec<String>,

    /// Extra generated messages
    pub samples: usize,

    /// Seed for generated messages
    pub seed: u64,

    // === Output ===
    /// Narrate every layer step
    pub verbose: bool,

    /// List the layers before running
    pub show_layers: bool,

    /// Where to write the first encapsulated packet
    pub dump_packet: Option<PathBuf>,

    /// Packet file to decapsulate
    pub receive_file: Option<PathBuf>,

    // === Behavior ===
    /// Whether to print detailed config
    pub print_config: bool,

    /// Whether to print detailed metrics summary
    pub print_metrics: bool,
}

impl Config {
    /// Resolve parsed arguments into a configuration.
    pub fn from_cli(cli: Cli) -> Self {
        let using_defaults = cli.messages.is_empty() && cli.samples == 0;
        let messages = if cli.messages.is_empty() && cli.receive.is_none() {
            DEFAULT_MESSAGES.iter().map(|m| m.to_string()).collect()
        } else {
            cli.messages
        };

        let seed = cli.seed.unwrap_or_else(time_seed);

        Config {
            messages,
            samples: cli.samples,
            seed,
            verbose: !cli.quiet,
            // A bare run shows the layer table first, like the classroom demo
            show_layers: cli.layers || (using_defaults && cli.receive.is_none()),
            dump_packet: cli.dump_packet,
            receive_file: cli.receive,
            print_config: cli.print_config,
            print_metrics: !cli.no_metrics,
        }
    }

    /// Parse configuration from command-line arguments.
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Cli::try_parse_from(args).map(Self::from_cli)
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Messages: {}", self.messages.len());
        for message in &self.messages {
            println!("  {:?}", message);
        }
        println!("Generated samples: {}", self.samples);
        println!("Seed: {}", self.seed);
        println!();
        println!("Verbose: {}", self.verbose);
        println!("Show layers: {}", self.show_layers);
        println!(
            "Dump packet: {}",
            self.dump_packet
                .as_ref()
                .map_or("(none)".to_string(), |p| p.display().to_string())
        );
        println!(
            "Receive file: {}",
            self.receive_file
                .as_ref()
                .map_or("(none)".to_string(), |p| p.display().to_string())
        );
        println!();
    }
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
