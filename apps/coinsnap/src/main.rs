mod config;
mod data_fetcher;
mod logging;
mod snapshot;

use clap::Parser;
use config::Args;
use dotenv::dotenv;

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let args = Args::parse();
    logging::init_tracing(&args.log_level, args.log_format)?;

    let rt = tokio::runtime::Runtime::new()?;

    let summary = match rt.block_on(snapshot::run(&args)) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error during snapshot: {:#}", e);
            return Err(e);
        }
    };

    println!(
        "Wrote {} rows for {} coins to {}",
        summary.rows,
        summary.coins - summary.skipped.len(),
        summary.path.display()
    );
    println!("Skipped {} coins", summary.skipped.len());
    if !summary.skipped.is_empty() {
        println!("  {}", summary.skipped.join(", "));
    }

    Ok(())
}
