use clap::Parser;
use price_sdk::PriceClient;

#[derive(Parser)]
#[command(name = "price-cli")]
#[command(about = "Query a running price service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    /// Symbols to quote, e.g. BTC ETH
    #[arg(required = true)]
    tickers: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = PriceClient::new(&cli.url);

    let mut failures = 0;
    for ticker in &cli.tickers {
        match client.fetch_price(ticker).await {
            Ok(quote) => println!("{}\t{}", quote.ticker, quote.price),
            Err(e) => {
                eprintln!("{}\terror: {}", ticker, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} of {} lookups failed", failures, cli.tickers.len()).into());
    }
    Ok(())
}
