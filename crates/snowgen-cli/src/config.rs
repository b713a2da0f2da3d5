use anyhow::{Context, bail};
use clap::Parser;
use snowgen::{CUSTOM_EPOCH, GeneratorConfig};

/// Runtime configuration for the `snowgen` binary.
///
/// Every value may come from a flag or its environment variable. The
/// identifiers must be unique per running instance; that is up to whoever
/// deploys it.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "snowgen",
    version,
    about = "Generate or decode 64-bit Snowflake IDs"
)]
pub struct CliArgs {
    /// Datacenter or cluster identifier, 0 through 31.
    ///
    /// Environment variable: `DATACENTER_ID`
    #[arg(long, env = "DATACENTER_ID", default_value_t = 0, allow_negative_numbers = true)]
    pub datacenter_id: i64,

    /// Machine or process identifier within the datacenter, 0 through 31.
    ///
    /// Environment variable: `WORKER_ID`
    #[arg(long, env = "WORKER_ID", default_value_t = 0, allow_negative_numbers = true)]
    pub worker_id: i64,

    /// Epoch in milliseconds since 1970-01-01 UTC. Must not be in the future.
    ///
    /// Environment variable: `SNOWFLAKE_EPOCH`
    #[arg(long, env = "SNOWFLAKE_EPOCH", default_value_t = CUSTOM_EPOCH)]
    pub epoch: i64,

    /// Number of IDs to print, one per line.
    ///
    /// Environment variable: `ID_COUNT`
    #[arg(short = 'n', long, env = "ID_COUNT", default_value_t = 1)]
    pub count: u64,

    /// Decode this ID into its fields instead of generating.
    #[arg(long, value_name = "ID")]
    pub decode: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate { count: u64 },
    Decode { id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub generator: GeneratorConfig,
    pub command: Command,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let generator = GeneratorConfig {
            datacenter_id: args.datacenter_id,
            worker_id: args.worker_id,
            epoch: args.epoch,
        };

        let command = match args.decode {
            Some(id) => {
                if id < 0 {
                    bail!("cannot decode {id}: Snowflake IDs are never negative");
                }
                Command::Decode { id }
            }
            None => {
                generator
                    .validate()
                    .context("invalid generator configuration")?;
                if args.count == 0 {
                    bail!("ID_COUNT must be greater than 0");
                }
                Command::Generate { count: args.count }
            }
        };

        Ok(Self { generator, command })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<CliConfig> {
        let args =
            CliArgs::try_parse_from(std::iter::once("snowgen").chain(args.iter().copied()))?;
        CliConfig::try_from(args)
    }

    #[test]
    fn defaults_generate_one_id() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.command, Command::Generate { count: 1 });
        assert_eq!(config.generator.epoch, CUSTOM_EPOCH);
    }

    #[test]
    fn flags_set_identity() {
        let config = parse(&["--datacenter-id", "3", "--worker-id", "9", "-n", "10"]).unwrap();
        assert_eq!(config.generator.datacenter_id, 3);
        assert_eq!(config.generator.worker_id, 9);
        assert_eq!(config.command, Command::Generate { count: 10 });
    }

    #[test]
    fn rejects_out_of_range_worker() {
        let err = parse(&["--worker-id", "32"]).unwrap_err();
        assert!(format!("{err:#}").contains("worker id 32"));
    }

    #[test]
    fn rejects_negative_datacenter() {
        let err = parse(&["--datacenter-id", "-1"]).unwrap_err();
        assert!(format!("{err:#}").contains("datacenter id -1"));
    }

    #[test]
    fn rejects_zero_count() {
        assert!(parse(&["--count", "0"]).is_err());
    }

    #[test]
    fn decode_skips_generator_validation() {
        let config = parse(&["--decode", "4194304", "--epoch", "0"]).unwrap();
        assert_eq!(config.command, Command::Decode { id: 4_194_304 });
    }

    #[test]
    fn rejects_negative_decode() {
        assert!(parse(&["--decode=-5"]).is_err());
    }
}
