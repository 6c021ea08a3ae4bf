use crate::{
    types::DATE_FORMAT, ConnectionOverrides, TravelAgent, TravelError, TravelPlan,
    TravelPreferences, TravelSession,
};
use anyhow::{anyhow, Context};
use chrono::{Duration as DateDuration, Local};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::time::Duration;
use tracing::{error, info};

fn command() -> Command {
    Command::new("travel-agent")
        .version("0.1.0")
        .about("Plan a trip with an LLM and manage a simulated booking cart")
        .subcommand_required(true)
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .global(true)
                .help("API key (or set OPENAI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .global(true)
                .help("Chat completion base URL (or set OPENAI_BASE_URL / OPENROUTER_BASE_URL)"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .global(true)
                .help("Model used for plan generation (or set TRAVEL_PLAN_MODEL)"),
        )
        .arg(
            Arg::new("tips-model")
                .long("tips-model")
                .value_name("MODEL")
                .global(true)
                .help("Model used for travel tips (or set TRAVEL_TIPS_MODEL)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .global(true)
                .value_parser(clap::value_parser!(u64))
                .default_value("120")
                .help("Request timeout in seconds"),
        )
        .subcommand(plan_command())
        .subcommand(
            Command::new("tips")
                .about("Get ten essential travel tips for a destination")
                .arg(
                    Arg::new("destination")
                        .help("Destination to get tips for")
                        .required(true)
                        .index(1),
                ),
        )
}

fn plan_command() -> Command {
    Command::new("plan")
        .about("Generate a travel plan and optionally book its suggestions")
        .arg(
            Arg::new("destination")
                .help("Destination, e.g. \"Paris, France\"")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("depart")
                .short('d')
                .long("depart")
                .value_name("YYYY-MM-DD")
                .help("Departure date [default: 30 days from today]"),
        )
        .arg(
            Arg::new("return")
                .short('r')
                .long("return")
                .value_name("YYYY-MM-DD")
                .help("Return date [default: 37 days from today]"),
        )
        .arg(
            Arg::new("budget")
                .short('b')
                .long("budget")
                .value_name("USD")
                .value_parser(clap::value_parser!(f64))
                .default_value("2000")
                .help("Total budget in USD"),
        )
        .arg(
            Arg::new("travelers")
                .short('n')
                .long("travelers")
                .value_name("COUNT")
                .value_parser(clap::value_parser!(u32))
                .default_value("2")
                .help("Number of travelers"),
        )
        .arg(
            Arg::new("accommodation")
                .short('a')
                .long("accommodation")
                .value_name("TYPE")
                .default_value("hotel")
                .help("Accommodation type (hotel, airbnb, hostel, resort, bed & breakfast)"),
        )
        .arg(
            Arg::new("activity")
                .long("activity")
                .value_name("ACTIVITY")
                .action(ArgAction::Append)
                .help("Preferred activity, repeatable"),
        )
        .arg(
            Arg::new("diet")
                .long("diet")
                .value_name("RESTRICTION")
                .action(ArgAction::Append)
                .help("Dietary restriction, repeatable"),
        )
        .arg(
            Arg::new("book-hotel")
                .long("book-hotel")
                .value_name("INDEX")
                .value_parser(clap::value_parser!(usize))
                .action(ArgAction::Append)
                .help("Add the accommodation suggestion at INDEX (0-based) to the cart"),
        )
        .arg(
            Arg::new("book-flight")
                .long("book-flight")
                .value_name("INDEX")
                .value_parser(clap::value_parser!(usize))
                .action(ArgAction::Append)
                .help("Add the flight suggestion at INDEX (0-based) to the cart"),
        )
        .arg(
            Arg::new("checkout")
                .long("checkout")
                .action(ArgAction::SetTrue)
                .help("Simulate confirming every item in the cart"),
        )
        .arg(
            Arg::new("tips")
                .long("tips")
                .action(ArgAction::SetTrue)
                .help("Also fetch travel tips for the destination"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the plan as JSON"),
        )
}

/// CLI entry point for the travel-agent tool
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let matches = command().get_matches();
    let agent = build_agent(&matches)?;

    match matches.subcommand() {
        Some(("plan", plan_matches)) => run_plan(&agent, plan_matches).await,
        Some(("tips", tips_matches)) => {
            let destination = string_arg(tips_matches, "destination")?;
            print_tips(&destination, &agent.get_tips(&destination).await);
            Ok(())
        }
        _ => Err(anyhow!("unknown subcommand")),
    }
}

fn build_agent(matches: &ArgMatches) -> anyhow::Result<TravelAgent> {
    let timeout_seconds = matches.get_one::<u64>("timeout").copied().unwrap_or(120);

    let mut agent = TravelAgent::from_env_with_overrides(ConnectionOverrides {
        api_key: matches.get_one::<String>("api-key").cloned(),
        base_url: matches.get_one::<String>("base-url").cloned(),
        timeout: Some(Duration::from_secs(timeout_seconds)),
    })
    .context("API key is required. Set OPENAI_API_KEY environment variable or use --api-key")?;

    if let Some(model) = matches.get_one::<String>("model") {
        agent = agent.with_plan_model(model.clone());
    }
    if let Some(model) = matches.get_one::<String>("tips-model") {
        agent = agent.with_tips_model(model.clone());
    }

    info!(
        "Using models: plan={} tips={}",
        agent.plan_settings().model,
        agent.tips_settings().model
    );
    Ok(agent)
}

fn string_arg(matches: &ArgMatches, name: &str) -> anyhow::Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| anyhow!("missing argument: {name}"))
}

/// Date argument, or today plus `days_ahead` when omitted
fn date_arg(matches: &ArgMatches, name: &str, days_ahead: i64) -> String {
    matches.get_one::<String>(name).cloned().unwrap_or_else(|| {
        (Local::now().date_naive() + DateDuration::days(days_ahead))
            .format(DATE_FORMAT)
            .to_string()
    })
}

fn list_arg(matches: &ArgMatches, name: &str) -> Vec<String> {
    matches
        .get_many::<String>(name)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn index_arg(matches: &ArgMatches, name: &str) -> Vec<usize> {
    matches
        .get_many::<usize>(name)
        .map(|values| values.copied().collect())
        .unwrap_or_default()
}

async fn run_plan(agent: &TravelAgent, matches: &ArgMatches) -> anyhow::Result<()> {
    let preferences = TravelPreferences {
        destination: string_arg(matches, "destination")?,
        departure_date: date_arg(matches, "depart", 30),
        return_date: date_arg(matches, "return", 37),
        budget: matches.get_one::<f64>("budget").copied().unwrap_or(2000.0),
        travelers: matches.get_one::<u32>("travelers").copied().unwrap_or(2),
        accommodation_type: string_arg(matches, "accommodation")?.to_lowercase(),
        activities: list_arg(matches, "activity"),
        dietary_restrictions: list_arg(matches, "diet"),
    };

    info!("Creating travel plan for {}", preferences.destination);

    let mut session = TravelSession::new();
    let plan = match session.generate_plan(agent, preferences).await {
        Ok(plan) => plan.clone(),
        Err(err) => {
            error!("Error generating travel plan: {}", err);
            if let TravelError::Validation(violations) = &err {
                for violation in violations {
                    eprintln!("  - {violation}");
                }
            }
            return Err(anyhow::Error::from(err).context("Error generating travel plan"));
        }
    };

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }

    for index in index_arg(matches, "book-hotel") {
        let reference = session
            .book_accommodation(index)
            .with_context(|| format!("could not book accommodation #{index}"))?;
        println!("Added to booking cart! Reference: {reference}");
    }
    for index in index_arg(matches, "book-flight") {
        let reference = session
            .book_flight(index)
            .with_context(|| format!("could not book flight #{index}"))?;
        println!("Added to booking cart! Reference: {reference}");
    }

    if !session.cart().is_empty() {
        let summary = session.cart().summary();
        println!("\nBooking Cart");
        println!(
            "Items: {}  Total: ${:.2}",
            summary.total_items, summary.total_cost
        );
        for booking in &summary.bookings {
            println!("  {} {} - ${:.2}", booking.reference, booking.name, booking.price);
        }
    }

    if matches.get_flag("checkout") {
        match session.cart().confirm() {
            Ok(receipt) => {
                println!("\nBooking confirmed!");
                println!("{}", serde_json::to_string_pretty(&receipt)?);
            }
            Err(err) => eprintln!("\n{err}"),
        }
    }

    if matches.get_flag("tips") {
        print_tips(&plan.destination, &agent.get_tips(&plan.destination).await);
    }

    Ok(())
}

fn print_plan(plan: &TravelPlan) {
    println!("\nTravel Plan: {}", plan.destination);
    println!(
        "Estimated Total Cost: ${:.2} | Duration: {} days | Activities Planned: {}",
        plan.estimated_cost,
        plan.duration_days(),
        plan.activity_count()
    );

    println!("\nDaily Itinerary");
    for day in &plan.itinerary {
        println!("  Day {} - {}", day.day, day.date);
        for activity in &day.activities {
            println!("    • {}", activity);
        }
        for meal in &day.meals {
            println!("    🍽 {}", meal);
        }
        println!("    Estimated Daily Cost: ${:.2}", day.estimated_cost);
    }

    println!("\nAccommodation Suggestions");
    for (idx, hotel) in plan.accommodation_suggestions.iter().enumerate() {
        let rating = hotel
            .rating
            .map(|rating| format!("{rating:.1}"))
            .unwrap_or_else(|| "N/A".to_string());
        println!(
            "  [{}] {} ({}) - ${:.2}/night, rating {}, {}",
            idx, hotel.name, hotel.kind, hotel.price_per_night, rating, hotel.location
        );
        if !hotel.amenities.is_empty() {
            println!("      Amenities: {}", hotel.amenities.join(", "));
        }
    }

    println!("\nFlight Suggestions");
    for (idx, flight) in plan.flight_suggestions.iter().enumerate() {
        println!(
            "  [{}] {} with {} - ${:.2} ({} -> {})",
            idx,
            flight.route,
            flight.airline,
            flight.estimated_price,
            flight.departure_time,
            flight.arrival_time
        );
    }

    if !plan.recommendations.is_empty() {
        println!("\nRecommendations");
        for recommendation in &plan.recommendations {
            println!("  💡 {}", recommendation);
        }
    }
}

fn print_tips(destination: &str, tips: &[String]) {
    println!("\nTravel Tips: {}", destination);
    for tip in tips {
        println!("  🎯 {}", tip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        command().debug_assert();
    }

    #[test]
    fn test_plan_arguments() {
        let matches = command()
            .try_get_matches_from([
                "travel-agent",
                "plan",
                "Lisbon",
                "--depart",
                "2026-12-01",
                "--return",
                "2026-12-05",
                "--activity",
                "Food Tours",
                "--activity",
                "Museums",
                "--book-hotel",
                "0",
                "--checkout",
            ])
            .unwrap();

        let (name, plan) = matches.subcommand().unwrap();
        assert_eq!(name, "plan");
        assert_eq!(string_arg(plan, "destination").unwrap(), "Lisbon");
        assert_eq!(list_arg(plan, "activity"), vec!["Food Tours", "Museums"]);
        assert!(list_arg(plan, "diet").is_empty());
        assert_eq!(index_arg(plan, "book-hotel"), vec![0]);
        assert_eq!(plan.get_one::<u32>("travelers").copied(), Some(2));
        assert!(plan.get_flag("checkout"));
        assert!(!plan.get_flag("tips"));
        assert_eq!(date_arg(plan, "depart", 30), "2026-12-01");
    }
}
