use std::process::ExitCode;
use std::sync::Arc;

use route_fare::availability::{
    AvailabilityLookup, FixtureAvailability, LookupError, StaticAvailability,
};
use route_fare::domain::StopId;
use route_fare::route_data::RouteData;
use route_fare::selection::{SelectionConfig, SelectionController};
use tracing_subscriber::EnvFilter;

/// Path to the route JSON file.
const ROUTE_ENV: &str = "ROUTE_FARE_ROUTE";

/// Directory of `{bus_id}.json` availability fixtures.
const FIXTURES_ENV: &str = "ROUTE_FARE_FIXTURES";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [origin, destination, seats] = args.as_slice() else {
        eprintln!("Usage: route-fare <origin> <destination> <seats>");
        eprintln!();
        eprintln!("Environment:");
        eprintln!("  {ROUTE_ENV}     route JSON file (required)");
        eprintln!("  {FIXTURES_ENV}  availability fixture directory");
        return ExitCode::from(2);
    };

    let Ok(seats) = seats.parse::<u32>() else {
        eprintln!("Invalid seat count: {seats}");
        return ExitCode::from(2);
    };

    let Ok(route_path) = std::env::var(ROUTE_ENV) else {
        eprintln!("{ROUTE_ENV} not set");
        return ExitCode::from(2);
    };

    let data = match RouteData::load(&route_path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Failed to load route: {e}");
            return ExitCode::FAILURE;
        }
    };
    let route = match data.to_route() {
        Ok(route) => route,
        Err(e) => {
            eprintln!("Invalid route in {route_path}: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(stops = route.len(), path = %route_path, "loaded route");

    let controller = SelectionController::new(
        Arc::new(route),
        data.bus_id.clone(),
        SelectionConfig::default(),
    );
    let selection = (
        StopId::from(origin.as_str()),
        StopId::from(destination.as_str()),
        seats,
    );

    let view = match std::env::var(FIXTURES_ENV) {
        Ok(dir) => match FixtureAvailability::new(&dir) {
            Ok(lookup) => run(controller, selection, &lookup).await,
            Err(e) => {
                eprintln!("Failed to load fixtures from {dir}: {e}");
                return ExitCode::FAILURE;
            }
        },
        Err(_) => {
            tracing::warn!("{FIXTURES_ENV} not set, availability will show as unavailable");
            let lookup = StaticAvailability::failing(LookupError::Unavailable(
                "no availability source".into(),
            ));
            run(controller, selection, &lookup).await
        }
    };

    match serde_json::to_string_pretty(&view) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to render view: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Replay the form events for one selection and return the final view.
async fn run<L: AvailabilityLookup>(
    mut controller: SelectionController,
    (origin, destination, seats): (StopId, StopId, u32),
    lookup: &L,
) -> route_fare::selection::SelectionView {
    controller.on_origin_change(Some(origin));
    let mut pending = controller.on_destination_change(Some(destination));
    if let Some(ticket) = controller.on_seat_count_change(seats) {
        pending = Some(ticket);
    }

    if let Some(ticket) = pending {
        controller.refresh(ticket, lookup).await;
    }

    controller.view()
}
