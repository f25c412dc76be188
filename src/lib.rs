pub mod args;
pub mod io;
pub mod geo_3d;
pub mod tree;
pub mod kernel;
pub mod sampler;
pub mod sizing;
pub mod symmetry;
pub mod ibc;
pub mod faces;
pub mod case;
mod crate_errors;

use tracing::info;

pub use crate_errors::{
    IbmError,
    IbmResult,
    err_str,
};

/// Render the example case recipe in the requested format.
pub fn example_config(format: args::Format) -> IbmResult<String> {
    let cfg = case::CaseConfig::example();
    let rendered = match format {
        args::Format::Yaml => serde_yaml::to_string(&cfg).map_err(args::ArgError::from)?,
        args::Format::Json => serde_json::to_string_pretty(&cfg).map_err(args::ArgError::from)?,
        args::Format::Toml => toml::to_string_pretty(&cfg).map_err(args::ArgError::from)?,
    };
    Ok(rendered)
}

/// Optimal far field from the command line parameters.
pub fn far_field(far_field_args: &args::FarFieldArgs) -> IbmResult<sizing::FarField> {
    Ok(sizing::compute_optimal_far_field(
        far_field_args.size_max,
        far_field_args.snear,
        far_field_args.min_cells,
        far_field_args.factor,
        far_field_args.levels,
    )?)
}

/// Load a case recipe and run it.
pub fn run_case(run_args: &args::RunArgs) -> IbmResult<tree::Node> {
    info!("Loading case recipe: {}", run_args.case);
    let target = case::CaseTarget::from_cfg_file(&run_args.case)?;
    let tree = target.run()?;
    info!("Case written to {}", target.cfg.output_path);
    Ok(tree)
}

/// Run the command given on the command line.
pub fn run_cli(cli: args::IbmprepCli) -> IbmResult<()> {
    match cli.sub_command {
        args::IbmprepCommand::Run(run_args) => {
            let tree = run_case(&run_args)?;
            println!("{} zones written", tree.zones().len());
        },
        args::IbmprepCommand::Example(example_args) => {
            println!("{}", example_config(example_args.format)?);
        },
        args::IbmprepCommand::FarField(far_field_args) => {
            let far_field = far_field(&far_field_args)?;
            println!("dfar: {}", far_field.dfar);
            println!("levels: {}", far_field.levels);
        },
    }
    Ok(())
}
