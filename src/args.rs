use clap::{
    Args,
    Parser,
    Subcommand,
    ValueEnum,
};

use crate::sizing::{DEFAULT_GROWTH_FACTOR, DEFAULT_MIN_CELLS};

mod proc_errors;

pub use proc_errors::{
    ArgError,
    ProcResult,
};

/// Immersed-boundary case preparation tool.
#[derive(Debug, Parser)]
#[command(name = "ibmprep", version)]
pub struct IbmprepCli {
    #[arg(short, long, value_enum, default_value_t = LogLevel::Info, global = true)]
    /// Log level.
    pub log_level: LogLevel,

    #[clap(subcommand)]
    pub sub_command: IbmprepCommand,
}

/// Parser for the subcommands of the ibmprep binary using clap.
#[derive(Debug, Subcommand)]
pub enum IbmprepCommand {
    #[command(name = "run")]
    /// Run a case recipe and save the resulting tree.
    Run(RunArgs),

    #[command(name = "example")]
    /// Print an example case recipe holding every step.
    Example(ExampleArgs),

    #[command(name = "far-field")]
    /// Compute the optimal far-field distance of a body.
    FarField(FarFieldArgs),
}

/// Arguments for the run command.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Path to the case recipe (.json, .toml, .yaml).
    pub case: String,
}

/// Arguments for the example command.
#[derive(Debug, Args)]
pub struct ExampleArgs {
    #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
    /// Recipe format.
    pub format: Format,
}

/// Arguments for the far-field command.
#[derive(Debug, Args)]
pub struct FarFieldArgs {
    #[arg(long)]
    /// Largest extent of the body.
    pub size_max: f64,

    #[arg(long)]
    /// Near-wall spacing.
    pub snear: f64,

    #[arg(long, default_value_t = DEFAULT_MIN_CELLS)]
    /// Cells across the coarsest octree level.
    pub min_cells: u32,

    #[arg(long, default_value_t = DEFAULT_GROWTH_FACTOR)]
    /// Far field size relative to the body, used when no level count is given.
    pub factor: f64,

    #[arg(long)]
    /// Number of octree levels.
    pub levels: Option<u32>,
}

/// Config output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Yaml,
    Json,
    Toml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
impl LogLevel {
    pub fn level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Parse the command line arguments.
pub fn parse_cli_args() -> IbmprepCli {
    IbmprepCli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        IbmprepCli::command().debug_assert();
    }

    #[test]
    fn far_field_defaults() {
        let cli = IbmprepCli::try_parse_from(["ibmprep", "far-field", "--size-max", "1", "--snear", "0.01"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Info);
        match cli.sub_command {
            IbmprepCommand::FarField(args) => {
                assert_eq!(args.min_cells, 21);
                assert_eq!(args.factor, 10.0);
                assert_eq!(args.levels, None);
            },
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn global_log_level_after_subcommand() {
        let cli = IbmprepCli::try_parse_from(["ibmprep", "example", "--format", "toml", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level.level(), tracing::Level::DEBUG);
        assert!(matches!(cli.sub_command, IbmprepCommand::Example(ExampleArgs{format: Format::Toml})));
    }

    #[test]
    fn run_requires_a_case() {
        assert!(IbmprepCli::try_parse_from(["ibmprep", "run"]).is_err());
    }
}
