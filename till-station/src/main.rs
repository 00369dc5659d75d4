use clap::Parser;
use till_station::{setup_environment, Config, JsonStore, PrintService, StationPrinter};

/// Print a sales order or posted invoice on the receipt printer
#[derive(Parser)]
#[command(name = "till-station", version, about)]
struct Args {
    /// Document number to print
    document_no: String,

    /// Catalog file (overrides TILL_STORE_PATH)
    #[arg(long)]
    store: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() {
    // 1. Environment (dotenv, logging)
    setup_environment();

    let args = Args::parse();

    // 2. Configuration
    let mut config = Config::from_env();
    if let Some(store) = args.store {
        config.store_path = store;
    }

    // 3. One print attempt; the condition message is the user-facing output
    if let Err(e) = run(&config, &args.document_no).await {
        tracing::error!(error = %e, "Print failed");
        eprintln!("Failure: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: &Config, document_no: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonStore::load(&config.store_path)?;
    let printer = StationPrinter::from_config(config)?;

    let service = PrintService::new(
        store,
        printer,
        config.letterhead.clone(),
        config.paper_width,
    );
    service.print_document(document_no).await?;

    println!("Printed {}", document_no);
    Ok(())
}
