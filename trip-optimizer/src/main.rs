use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use trip_optimizer::currency::{
    CachedRateClient, CurrencyPair, RateCacheConfig, RateClientConfig, RateSource,
    SerpApiRateClient,
};
use trip_optimizer::domain::{
    Alternative, Constraints, Profile, format_duration_hours, format_price,
};
use trip_optimizer::ingest::{convert_legs, load_legs};
use trip_optimizer::lodging::{
    DEFAULT_TOP_OFFERS, HotelClient, HotelClientConfig, HotelQuery, StarRange, reference_cost,
};
use trip_optimizer::optimizer::{RouteOptimizer, RouteOutcome, RouteRequest};

/// Exchange rate applied to lodging totals when the rate provider is
/// unreachable.
const DEFAULT_FALLBACK_RATE: f64 = 5.0;

/// Pick the best travel alternative for each scraped route.
#[derive(Parser)]
#[clap(version, about)]
struct Cli {
    /// Scraped-leg JSON files, one route per file
    #[arg(required = true)]
    legs: Vec<PathBuf>,

    /// Optimization profile (cheapest, fastest or balanced)
    #[arg(short, long, default_value = "balanced")]
    profile: Profile,

    /// Travel time ceiling in hours
    #[arg(short = 't', long, default_value_t = 48.0)]
    ceiling: f64,

    /// Total trip budget, lodging included
    #[arg(short, long, default_value_t = 10_000.0)]
    budget: f64,

    /// Lodging destination; enables the stay-cost lookup
    #[arg(long)]
    destination: Option<String>,

    /// Check-in date for the stay (YYYY-MM-DD)
    #[arg(long)]
    check_in: Option<chrono::NaiveDate>,

    /// Length of the stay in nights
    #[arg(long, default_value_t = 3)]
    nights: u32,

    /// Adult guests for the lodging search
    #[arg(long, default_value_t = 2)]
    guests: u8,

    /// Lowest acceptable star rating (1-5)
    #[arg(long)]
    min_stars: Option<u8>,

    /// Highest acceptable star rating (1-5)
    #[arg(long)]
    max_stars: Option<u8>,

    /// Conversion applied to lodging totals, e.g. USD-BRL
    #[arg(long)]
    currency: Option<CurrencyPair>,

    /// Exchange rate used when the rate provider is unreachable
    #[arg(long, default_value_t = DEFAULT_FALLBACK_RATE)]
    fallback_rate: f64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // API key from environment; without it the run still works, just
    // without lodging or exchange-rate enrichment
    let api_key = std::env::var("SERPAPI_API_KEY").unwrap_or_else(|_| {
        eprintln!("Warning: SERPAPI_API_KEY not set. Lodging and exchange rates are skipped.");
        String::new()
    });

    let lodging_cost = stay_cost(&cli, &api_key).await;

    let constraints =
        Constraints::new(cli.ceiling, cli.budget).and_then(|c| c.with_lodging(lodging_cost));
    let constraints = match constraints {
        Ok(constraints) => constraints,
        Err(error) => {
            eprintln!("Invalid constraints: {error}");
            std::process::exit(2);
        }
    };

    // Load every route up front; a bad file leaves an empty route in
    // place so route numbering stays aligned with the arguments
    let mut routes: Vec<Vec<Alternative>> = Vec::with_capacity(cli.legs.len());
    for path in &cli.legs {
        match load_legs(path) {
            Ok(legs) => {
                let (alternatives, warnings) = convert_legs(&legs);
                for warning in &warnings {
                    eprintln!("{}: {warning}", path.display());
                }
                routes.push(alternatives);
            }
            Err(error) => {
                eprintln!("{error}");
                routes.push(Vec::new());
            }
        }
    }

    let requests: Vec<RouteRequest> = routes
        .iter()
        .map(|alternatives| RouteRequest::new(alternatives, cli.profile, constraints))
        .collect();

    let optimizer = RouteOptimizer::default();
    let outcomes = optimizer.optimize_batch(&requests);

    for (route, outcome) in outcomes.iter().enumerate() {
        println!();
        println!("Route {} ({})", route + 1, cli.legs[route].display());

        match outcome {
            RouteOutcome::Selected(result) => {
                let chosen = &result.chosen;
                println!(
                    "  Chosen alternative #{}: {} -> {}",
                    result.chosen_index + 1,
                    chosen.departure(),
                    chosen.arrival()
                );
                println!(
                    "  {} / {} / {} connection(s)",
                    format_duration_hours(chosen.time_hours()),
                    format_price(chosen.price()),
                    chosen.connections()
                );
                if !result.frontier.is_empty() {
                    let indices: Vec<String> = result
                        .frontier
                        .indices()
                        .map(|i| (i + 1).to_string())
                        .collect();
                    println!("  Pareto alternatives: {}", indices.join(", "));
                }
            }
            RouteOutcome::Empty(empty) => println!("  No selection: {}", empty.reason),
        }
    }
}

/// Reference lodging cost for the stay, in the route currency.
///
/// Comes back as 0.0 whenever lodging cannot be priced (no destination,
/// no check-in, no API key, provider failure); the optimizer then works
/// against the plain budget.
async fn stay_cost(cli: &Cli, api_key: &str) -> f64 {
    let Some(destination) = cli.destination.as_deref() else {
        return 0.0;
    };
    let Some(check_in) = cli.check_in else {
        eprintln!("Warning: --destination needs --check-in; skipping lodging.");
        return 0.0;
    };
    if api_key.is_empty() {
        return 0.0;
    }

    let stars = match (cli.min_stars, cli.max_stars) {
        (None, None) => StarRange::any(),
        (min, max) => match StarRange::new(min.unwrap_or(1), max.unwrap_or(5)) {
            Ok(range) => range,
            Err(error) => {
                eprintln!("Invalid star range: {error}");
                return 0.0;
            }
        },
    };

    let client = match HotelClient::new(HotelClientConfig::new(api_key)) {
        Ok(client) => client,
        Err(error) => {
            eprintln!("Could not create the hotel client: {error}");
            return 0.0;
        }
    };

    let query = HotelQuery::new(destination, check_in, cli.nights).with_guests(cli.guests);
    let offers = match client.search_offers(&query).await {
        Ok(offers) => offers,
        Err(error) => {
            eprintln!("Lodging search failed: {error}. Continuing without a stay cost.");
            return 0.0;
        }
    };
    println!("Found {} lodging offers for {destination}", offers.len());

    let cost = reference_cost(&offers, stars, DEFAULT_TOP_OFFERS);

    // Offer totals are quoted in dollars; convert them into the route
    // currency when a pair was given
    match cli.currency {
        Some(pair) => {
            let provider = match SerpApiRateClient::new(RateClientConfig::new(api_key)) {
                Ok(provider) => provider,
                Err(error) => {
                    eprintln!("Could not create the rate client: {error}");
                    return cost * cli.fallback_rate;
                }
            };
            let rates = CachedRateClient::new(provider, &RateCacheConfig::new(cli.fallback_rate));
            let quote = rates.rate(pair).await;
            if quote.source == RateSource::Fallback {
                eprintln!("Warning: using fallback rate {} for {pair}.", quote.rate);
            }
            cost * quote.rate
        }
        None => cost,
    }
}
