use crate::{
    core::planner::ItineraryPlanner,
    services::credentials::{CredentialResolver, ManualKeyStore},
    types::{ItineraryResponse, Locale, TravelInputs, TravelStyle, MAX_DAYS, MIN_DAYS},
    ValidationMode,
};
use anyhow::{bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing::{error, info};

fn command() -> Command {
    Command::new("travel-buddy")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate grounded multi-day travel itineraries with Gemini")
        .subcommand_required(true)
        .subcommand(
            Command::new("plan")
                .about("Generate an itinerary")
                .arg(
                    Arg::new("destination")
                        .short('d')
                        .long("destination")
                        .value_name("PLACE")
                        .required(true)
                        .help("Where to go"),
                )
                .arg(
                    Arg::new("days")
                        .short('n')
                        .long("days")
                        .value_name("DAYS")
                        .value_parser(value_parser!(u32))
                        .default_value("3")
                        .help("Trip length in days (1-14)"),
                )
                .arg(
                    Arg::new("style")
                        .short('s')
                        .long("style")
                        .value_name("STYLE")
                        .default_value("힐링/휴양")
                        .help("힐링/휴양, 관광/명소, 미식/맛집, 쇼핑/도시, 액티비티/운동 (or healing, sightseeing, gourmet, shopping, activity)"),
                )
                .arg(
                    Arg::new("locale")
                        .short('l')
                        .long("locale")
                        .value_name("LOCALE")
                        .default_value("ko")
                        .help("Output language and currency: ko (KRW) or en (USD)"),
                )
                .arg(
                    Arg::new("model")
                        .short('m')
                        .long("model")
                        .value_name("MODEL")
                        .help("Gemini model (or set TRAVEL_BUDDY_MODEL)"),
                )
                .arg(
                    Arg::new("best-effort")
                        .long("best-effort")
                        .action(ArgAction::SetTrue)
                        .help("Accept itineraries that break day numbering, packing, or cost rules"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the itinerary as JSON"),
                ),
        )
        .subcommand(Command::new("test-connection").about("Check that the API key works"))
        .subcommand(
            Command::new("key")
                .about("Manage the manually saved API key")
                .subcommand_required(true)
                .subcommand(
                    Command::new("set")
                        .about("Save a key to the settings file")
                        .arg(Arg::new("key").required(true).index(1)),
                )
                .subcommand(Command::new("clear").about("Remove the saved key"))
                .subcommand(Command::new("status").about("Show which key source is active")),
        )
}

/// CLI entry point for the travel-buddy tool
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = command().get_matches();
    match matches.subcommand() {
        Some(("plan", args)) => plan(args).await?,
        Some(("test-connection", _)) => test_connection().await?,
        Some(("key", args)) => manage_key(args)?,
        _ => unreachable!("clap enforces a subcommand"),
    }

    Ok(())
}

fn parse_inputs(args: &ArgMatches) -> anyhow::Result<TravelInputs> {
    let destination = args
        .get_one::<String>("destination")
        .cloned()
        .unwrap_or_default();
    let days = args.get_one::<u32>("days").copied().unwrap_or(MIN_DAYS);
    if !(MIN_DAYS..=MAX_DAYS).contains(&days) {
        bail!("--days must be between {MIN_DAYS} and {MAX_DAYS}");
    }
    let style: TravelStyle = args
        .get_one::<String>("style")
        .map(String::as_str)
        .unwrap_or_default()
        .parse()?;

    let inputs = TravelInputs::new(destination, days, style);
    inputs.validate()?;
    Ok(inputs)
}

async fn plan(args: &ArgMatches) -> anyhow::Result<()> {
    let inputs = parse_inputs(args)?;
    let locale: Locale = args
        .get_one::<String>("locale")
        .map(String::as_str)
        .unwrap_or("ko")
        .parse()?;
    let validation = if args.get_flag("best-effort") {
        ValidationMode::BestEffort
    } else {
        ValidationMode::Strict
    };

    let mut planner = ItineraryPlanner::from_env()?
        .with_locale(locale)
        .with_validation_mode(validation);
    if let Some(model) = args.get_one::<String>("model") {
        planner = planner.with_model(model.as_str());
    }

    match planner.generate_itinerary(&inputs).await {
        Ok(itinerary) => {
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&itinerary)?);
            } else {
                println!("{}", render_summary(&itinerary, locale));
            }
            info!("itinerary generated");
            Ok(())
        }
        Err(err) => {
            error!(code = err.error_code(), error = %err, "itinerary generation failed");
            eprintln!("{}", err.user_message());
            Err(err.into())
        }
    }
}

async fn test_connection() -> anyhow::Result<()> {
    let planner = ItineraryPlanner::from_env()?;
    if planner.test_connection().await {
        println!("OK");
        Ok(())
    } else {
        bail!("connection test failed; check the API key")
    }
}

fn manage_key(args: &ArgMatches) -> anyhow::Result<()> {
    let store = ManualKeyStore::from_env();
    match args.subcommand() {
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").cloned().unwrap_or_default();
            store
                .save(&key)
                .with_context(|| format!("saving key to {}", store.path().display()))?;
            println!("Saved key to {}", store.path().display());
        }
        Some(("clear", _)) => {
            store.clear()?;
            println!("Removed saved key from {}", store.path().display());
        }
        Some(("status", _)) => print_key_status(&store),
        _ => unreachable!("clap enforces a key subcommand"),
    }
    Ok(())
}

fn print_key_status(store: &ManualKeyStore) {
    let resolver = CredentialResolver::standard();
    println!("Settings file: {}", store.path().display());
    match resolver.active_source() {
        Some(source) => println!("Active key source: {}", source.describe()),
        None => println!("No API key configured"),
    }
}

fn render_summary(itinerary: &ItineraryResponse, locale: Locale) -> String {
    let mut lines = vec![format!("{} ({})", itinerary.destination, itinerary.duration)];

    if let Some(highlights) = &itinerary.real_time_highlights {
        lines.push(format!("  {}", highlights));
    }

    for day in &itinerary.itinerary {
        lines.push(String::new());
        lines.push(format!("Day {} - {}", day.day, day.theme));
        for activity in &day.activities {
            lines.push(format!(
                "  [{}] {} - {}",
                activity.time.label(locale),
                activity.place,
                activity.description
            ));
            lines.push(format!("      {} | {}", activity.address, activity.map_url));
            lines.push(format!("      {}", activity.transport_info));
        }
        lines.push(format!("  Tip: {}", day.local_tip));
        lines.push(format!("  Route: {}", day.efficiency_note));
        lines.push(format!("  Rainy day: {}", day.indoor_alternative));
    }

    let costs = &itinerary.estimated_costs;
    lines.push(String::new());
    lines.push(format!(
        "Costs ({}): food {:.0}, transport {:.0}, activities {:.0}, accommodation {:.0}, total {:.0}",
        costs.currency, costs.food, costs.transport, costs.activities, costs.accommodation, costs.total
    ));
    lines.push(format!("Pack: {}", itinerary.packing_items.join(", ")));

    if let Some(sources) = itinerary.sources.as_ref().filter(|s| !s.is_empty()) {
        lines.push(String::new());
        lines.push("Sources:".to_string());
        for source in sources {
            lines.push(format!("  {} <{}>", source.title, source.uri));
        }
    }

    lines.join("\n")
}
