#![doc = include_str!("../README.md")]

mod config;
mod telemetry;

use clap::Parser;
use config::{CliArgs, CliConfig, Command};
use snowgen::SnowflakeId;
use std::io::{self, BufWriter, Write};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    telemetry::init_logging()?;
    let config = CliConfig::try_from(args)?;

    match config.command {
        Command::Generate { count } => generate(&config, count),
        Command::Decode { id } => {
            decode(&config, SnowflakeId::from_raw(id));
            Ok(())
        }
    }
}

fn generate(config: &CliConfig, count: u64) -> anyhow::Result<()> {
    let generator = config.generator.build()?;
    tracing::info!(
        datacenter_id = generator.datacenter_id(),
        worker_id = generator.worker_id(),
        epoch = generator.epoch(),
        count,
        "Generating IDs"
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for _ in 0..count {
        writeln!(out, "{}", generator.try_next_id()?)?;
    }
    out.flush()?;
    Ok(())
}

fn decode(config: &CliConfig, id: SnowflakeId) {
    println!("id:            {id}");
    println!("timestamp:     {}", id.timestamp());
    println!("unix_millis:   {}", id.unix_millis(config.generator.epoch));
    println!("datacenter_id: {}", id.datacenter_id());
    println!("worker_id:     {}", id.worker_id());
    println!("sequence:      {}", id.sequence());
}
