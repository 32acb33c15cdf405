use std::sync::Arc;

use clap::{Arg, ArgMatches, Command};
use serde_json::Value;
use tracing::info;

use crate::config::ProviderConfig;
use crate::services::{ItineraryComposer, OpenAiCompletion, OpenAiImages, StructuredClient};
use crate::types::TripParameters;

/// CLI entry point for the tripweaver tool
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from a .env file when present
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = Command::new("tripweaver")
        .version("0.1.0")
        .about("Generate and refine multi-day travel itineraries with structured LLM completions")
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .global(true)
                .help("Provider API key (or set OPENAI_API_KEY)"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .global(true)
                .help("Completion model to use (or set TRIPWEAVER_MODEL)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .global(true)
                .help("Provider base URL (or set OPENAI_BASE_URL)"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("generate")
                .about("Generate a fresh itinerary from trip parameters")
                .arg(Arg::new("origin").long("origin").required(true))
                .arg(
                    Arg::new("destinations")
                        .long("destinations")
                        .required(true)
                        .help("Comma-separated list of destinations"),
                )
                .arg(Arg::new("days").long("days"))
                .arg(Arg::new("budget").long("budget"))
                .arg(Arg::new("currency").long("currency"))
                .arg(Arg::new("group-size").long("group-size"))
                .arg(Arg::new("comfort-level").long("comfort-level"))
                .arg(Arg::new("theme").long("theme"))
                .arg(Arg::new("additional-info").long("additional-info"))
                .arg(Arg::new("stay-pref").long("stay-pref")),
        )
        .subcommand(
            Command::new("update")
                .about("Apply a free-text suggestion to an existing itinerary document")
                .arg(
                    Arg::new("input")
                        .long("input")
                        .value_name("FILE")
                        .required(true)
                        .help("Path to the itinerary document JSON"),
                )
                .arg(
                    Arg::new("suggestion")
                        .long("suggestion")
                        .required(true)
                        .help("Free-text change to apply"),
                ),
        )
        .get_matches();

    let composer = build_composer(&matches)?;

    match matches.subcommand() {
        Some(("generate", sub)) => {
            let params = trip_parameters_from(sub);
            info!(origin = %params.origin, days = params.days, "generating itinerary");
            let document = composer.generate(&params).await?;
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
        Some(("update", sub)) => {
            let path = sub.get_one::<String>("input").unwrap();
            let suggestion = sub.get_one::<String>("suggestion").unwrap();
            let raw = std::fs::read_to_string(path)?;
            let document = serde_json::from_str(&raw)?;
            info!(%path, "updating itinerary");
            let updated = composer.update(document, suggestion).await?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
}

fn build_composer(matches: &ArgMatches) -> Result<ItineraryComposer, Box<dyn std::error::Error>> {
    let mut config = match matches.get_one::<String>("api-key") {
        Some(key) => ProviderConfig::new(key.clone()),
        None => ProviderConfig::from_env()?,
    };
    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model(model.clone());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.clone());
    }

    let completion = StructuredClient::new(Arc::new(OpenAiCompletion::new(config.clone())));
    let images = Arc::new(OpenAiImages::new(config));
    Ok(ItineraryComposer::new(completion, images))
}

fn trip_parameters_from(matches: &ArgMatches) -> TripParameters {
    let mut body = serde_json::Map::new();
    if let Some(origin) = matches.get_one::<String>("origin") {
        body.insert("origin".to_string(), Value::String(origin.clone()));
    }
    if let Some(destinations) = matches.get_one::<String>("destinations") {
        let list: Vec<Value> = destinations
            .split(',')
            .map(|d| Value::String(d.trim().to_string()))
            .collect();
        body.insert("destinations".to_string(), Value::Array(list));
    }
    for (flag, key) in [
        ("days", "days"),
        ("budget", "budget"),
        ("currency", "currency"),
        ("group-size", "groupSize"),
        ("comfort-level", "comfortLevel"),
        ("theme", "theme"),
        ("additional-info", "additionalInfo"),
        ("stay-pref", "stayPref"),
    ] {
        if let Some(value) = matches.get_one::<String>(flag) {
            body.insert(key.to_string(), Value::String(value.clone()));
        }
    }

    // Lenient deserialization supplies the documented defaults
    serde_json::from_value(Value::Object(body)).unwrap_or_default()
}
