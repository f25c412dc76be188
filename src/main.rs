use tracing_subscriber::FmtSubscriber;

fn main() {
    // 1. Parse commandline arguments
    let cli = ibmprep::args::parse_cli_args();

    // 2. Initialize logging on stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level.level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Logging disabled: {}", err);
    }

    // 3. Run the command
    if let Err(err) = ibmprep::run_cli(cli) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
