use anyhow::{bail, Context, Result};
use osi_sim_core::{metrics::Metrics, Layer, Packet, Simulator};
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod input_gen;

use config::Config;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = match Config::from_args(std::env::args_os()) {
        Ok(config) => config,
        Err(e) => e.exit(),
    };

    if config.print_config {
        config.print();
    }

    let sim = Simulator::new();
    let mut metrics = Metrics::new();

    if config.show_layers {
        print_layers(&sim);
    }

    if let Some(path) = &config.receive_file {
        receive_file(&sim, path, config.verbose, &mut metrics)?;
    } else {
        run_round_trips(&sim, &config, &mut metrics)?;
    }

    metrics.complete();

    if config.print_metrics {
        metrics.print_summary();
    }
    metrics.print_result();

    if !metrics.is_clean() {
        bail!("simulation did not complete cleanly");
    }

    Ok(())
}

fn print_layers(sim: &Simulator) {
    println!("\n{}", "=".repeat(70));
    println!("OSI MODEL - 7 LAYERS");
    println!("{}", "=".repeat(70));

    for descriptor in sim.describe_layers() {
        println!("\nLayer {}: {}", descriptor.number, descriptor.name);
        println!("  Description: {}", descriptor.description);
    }
}

fn run_round_trips(sim: &Simulator, config: &Config, metrics: &mut Metrics) -> Result<()> {
    let mut messages = config.messages.clone();
    if config.samples > 0 {
        info!(seed = config.seed, count = config.samples, "generating sample messages");
        messages.extend(input_gen::generate_messages(config.seed, config.samples));
    }

    if let Some(path) = &config.dump_packet {
        let Some(first) = messages.first() else {
            bail!("--dump-packet needs at least one message");
        };
        dump_packet(sim, first, path)?;
    }

    for message in &messages {
        println!("\n{}", "#".repeat(70));
        println!("# OSI LAYER SIMULATOR: {:?}", message);
        println!("{}", "#".repeat(70));

        let outcome = sim.round_trip(message, config.verbose);
        metrics.record_round_trip(message, outcome.as_ref());

        match outcome {
            Ok(round_trip) if round_trip.is_intact() => {
                println!("✓ Transmission succeeded: data received intact");
            }
            Ok(round_trip) => {
                println!(
                    "✗ Transmission failed: sent {:?}, received {:?}",
                    round_trip.sent, round_trip.received
                );
            }
            Err(e) => {
                warn!(error = %e, "round trip aborted");
                println!("✗ Transmission aborted: {e}");
            }
        }
    }

    Ok(())
}

fn dump_packet(sim: &Simulator, message: &str, path: &Path) -> Result<()> {
    let packet = sim.send(message, false);
    let json = packet
        .to_json_pretty()
        .context("failed to render packet")?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write packet to {}", path.display()))?;

    info!(path = %path.display(), layer = ?packet.layer(), depth = packet.depth(), "packet written");
    Ok(())
}

fn receive_file(sim: &Simulator, path: &Path, verbose: bool, metrics: &mut Metrics) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read packet from {}", path.display()))?;
    let packet = Packet::from_json(&text)
        .with_context(|| format!("failed to parse packet in {}", path.display()))?;

    let depth = packet.depth();
    match packet.layer().and_then(Layer::from_number) {
        Some(layer) => info!(depth, "packet claims outermost {layer}"),
        None => warn!(depth, layer = ?packet.layer(), "packet has no known outermost layer"),
    }

    match sim.receive(packet, verbose) {
        Ok(data) => {
            metrics.record_receive(&data, depth);
            println!("Data received: {:?}", data);
        }
        Err(e) => {
            metrics.record_error(&e);
            println!("✗ Receive aborted: {e}");
        }
    }

    Ok(())
}
