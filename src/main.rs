use anyhow::Result;
use chrono::Local;
use iso3166scraper::{
    config::Config,
    pipeline,
    report::{self, Summary},
    schema,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    let config = Config::default();

    println!("{}", report::rule());
    println!("ISO 3166-3 Web Scraper - Clean Output Generator");
    println!("{}", report::rule());
    println!();

    // ─── 2) fetch & normalize ────────────────────────────────────────
    let output = match pipeline::scrape(&config, Local::now().date_naive()).await {
        Ok(output) => output,
        Err(e) => {
            error!(error = %e, "scrape failed");
            println!("\n✗ Error: {:#}", e);
            return Err(e);
        }
    };

    for line in report::failure_lines(&output.failures) {
        println!("{}", line);
    }
    println!(
        "✓ Successfully processed {} countries",
        output.dataset.countries.len()
    );

    // ─── 3) write ────────────────────────────────────────────────────
    if let Err(e) = schema::write_dataset(&config.output_path, &output.dataset) {
        error!(error = %e, "write failed");
        println!("\n✗ Error: {:#}", e);
        return Err(e);
    }
    println!(
        "\n✓ Clean data saved to: {}",
        config.output_path.display()
    );

    // ─── 4) report ───────────────────────────────────────────────────
    println!();
    print!("{}", Summary::from_dataset(&output.dataset));
    println!("\n{}", report::rule());
    println!("COMPLETE!");
    println!("{}", report::rule());

    info!("done");
    Ok(())
}
