use clap::Parser;
use indicatif::MultiProgress;
use rowfetch::cli::Cli;
use rowfetch::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible. Log lines and progress bars
    // share stderr through the same handle.
    let bars = MultiProgress::new();
    logging::init_logging(cli.verbose, &bars);

    if let Err(err) = cli.run(bars).await {
        eprintln!("rowfetch error: {:#}", err);
        std::process::exit(1);
    }
}
