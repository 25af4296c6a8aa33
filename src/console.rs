//! Line-oriented front end: one command per line on stdin, state summary on
//! stdout. Stands in for the dashboard's buttons and forms.

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::app_system::SyncError;
use crate::clients::RentalClient;
use crate::domain::{CarStatus, DashboardCards, NewCar, UserKind, View};
use crate::store::Snapshot;

#[derive(Parser, Debug)]
#[command(name = "rental", no_binary_name = true)]
struct ConsoleLine {
    #[command(subcommand)]
    command: ConsoleCommand,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    /// Switch between the admin and customer sessions
    Role,
    /// Open a view (dashboard, browse-cars, manage-cars, manage-users, cart, reservations, my-bookings)
    View { name: String },
    /// Search the catalog
    Cars { text: Option<String>, year: Option<String> },
    /// Refetch reservations (admin)
    Reservations,
    /// Refetch statistics (admin)
    Stats,
    AddCar {
        plate: String,
        make: String,
        model: String,
        year: i32,
        mileage: u32,
        price: f64,
        #[arg(value_parser = parse_status)]
        status: Option<CarStatus>,
    },
    DeleteCar { plate: String },
    #[command(subcommand)]
    Cart(CartCommand),
    Checkout,
    /// Price a rental window without touching the cart
    Estimate { plate: String, start: String, end: String },
    /// Create a batch of demo users
    Users {
        #[arg(value_parser = parse_user_kind)]
        kind: UserKind,
        count: u32,
    },
    Refresh,
    /// Print the current state
    Show,
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CartCommand {
    /// Dates as YYYY-MM-DD
    Add { plate: String, start: String, end: String },
    Remove { index: usize },
}

fn parse_status(raw: &str) -> Result<CarStatus, String> {
    match raw.to_ascii_uppercase().as_str() {
        "AVAILABLE" => Ok(CarStatus::Available),
        "RENTED" => Ok(CarStatus::Rented),
        "MAINTENANCE" => Ok(CarStatus::Maintenance),
        other => Err(format!("unknown car status '{}'", other)),
    }
}

fn parse_user_kind(raw: &str) -> Result<UserKind, String> {
    match raw {
        "customer" => Ok(UserKind::Customer),
        "admin" => Ok(UserKind::Admin),
        other => Err(format!("unknown user type '{}'", other)),
    }
}

impl ConsoleCommand {
    pub fn parse_line(line: &str) -> Result<ConsoleCommand, clap::Error> {
        ConsoleLine::try_parse_from(line.split_whitespace()).map(|parsed| parsed.command)
    }
}

/// Runs one command. Failures have already been turned into notifications,
/// so they are only logged here.
async fn execute(client: &RentalClient, command: ConsoleCommand) -> Result<(), SyncError> {
    match command {
        ConsoleCommand::Role => {
            client.switch_role().await?;
        }
        ConsoleCommand::View { name } => {
            client.show_view(&name).await?;
        }
        ConsoleCommand::Cars { text, year } => {
            client
                .search_cars(text.as_deref().unwrap_or(""), year.as_deref().unwrap_or(""))
                .await?;
        }
        ConsoleCommand::Reservations => {
            client.fetch_reservations().await?;
        }
        ConsoleCommand::Stats => {
            client.fetch_stats().await?;
        }
        ConsoleCommand::AddCar { plate, make, model, year, mileage, price, status } => {
            let mut car = NewCar::new(plate, make, model, year, mileage, price);
            if let Some(status) = status {
                car = car.with_status(status);
            }
            client.add_car(car).await?;
        }
        ConsoleCommand::DeleteCar { plate } => client.delete_car(&plate).await?,
        ConsoleCommand::Cart(CartCommand::Add { plate, start, end }) => {
            client.add_to_cart(&plate, &start, &end).await?;
        }
        ConsoleCommand::Cart(CartCommand::Remove { index }) => {
            client.remove_from_cart(index).await?;
        }
        ConsoleCommand::Checkout => {
            client.place_reservation().await?;
        }
        ConsoleCommand::Estimate { plate, start, end } => {
            let estimate = client.estimate_rental(&plate, &start, &end).await?;
            println!(
                "{}: {} days at ${:.2}/day = {}",
                estimate.plate,
                estimate.days,
                estimate.daily_price,
                estimate.display_total()
            );
        }
        ConsoleCommand::Users { kind, count } => {
            client.create_batch_users(kind, count).await?;
        }
        ConsoleCommand::Refresh => {
            client.refresh().await?;
        }
        ConsoleCommand::Show | ConsoleCommand::Quit => {}
    }
    Ok(())
}

pub fn render(snapshot: &Snapshot) -> String {
    let mut out = Vec::new();
    let tabs: Vec<&str> = snapshot.nav_tabs.iter().map(|t| t.label).collect();
    out.push(format!(
        "[{} | {}] view={} tabs={}",
        snapshot.session.actor_name,
        snapshot.session.role,
        snapshot.view,
        tabs.join(", ")
    ));

    if let Some(dashboard) = &snapshot.dashboard {
        match &dashboard.cards {
            DashboardCards::Admin(stats) => out.push(format!(
                "cars {} ({} available, {} rented) | reservations {} ({} confirmed) | revenue ${:.2}",
                stats.total_cars,
                stats.available_cars,
                stats.rented_cars,
                stats.total_reservations,
                stats.confirmed_reservations,
                stats.total_revenue
            )),
            DashboardCards::Customer { available_cars, cart_items, my_bookings } => out.push(format!(
                "available {} | cart {} | bookings {}",
                available_cars, cart_items, my_bookings
            )),
        }
        out.push(format!(
            "{} (last sync {})",
            dashboard.available_cars_text,
            dashboard.last_sync.format("%H:%M:%S")
        ));
    }

    for car in &snapshot.cars {
        out.push(format!(
            "  car {} {} {} {} ${}/day {:?}",
            car.plate, car.make, car.model, car.year, car.daily_price, car.status
        ));
    }
    for (index, item) in snapshot.cart.iter().enumerate() {
        out.push(format!(
            "  cart[{}] {} {} to {} ${:.2}",
            index, item.plate, item.start_date, item.end_date, item.estimated_price
        ));
    }
    if !snapshot.cart.is_empty() {
        out.push(format!("  cart total {}", snapshot.cart_total));
    }
    if let (View::Reservations, Some(stats)) = (snapshot.view, &snapshot.stats) {
        out.push(format!(
            "  {} reservations, {} confirmed, revenue ${:.2}",
            stats.total_reservations, stats.confirmed_reservations, stats.total_revenue
        ));
    }
    for r in &snapshot.reservations {
        out.push(format!(
            "  reservation #{} {} {} {} to {} ${:.2} {}",
            r.short_id(),
            r.customer_id,
            r.plate,
            r.start_date,
            r.end_date,
            r.total_price,
            r.status
        ));
    }
    if let Some(note) = &snapshot.notification {
        out.push(format!("! {:?}: {}", note.kind, note.message));
    }
    out.join("\n")
}

/// Reads commands until `quit` or end of input. Only a dead store ends the
/// loop early.
pub async fn run_console(client: RentalClient) -> Result<(), SyncError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        let command = match ConsoleCommand::parse_line(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        debug!(?command, "Console command");
        if command == ConsoleCommand::Quit {
            break;
        }
        if let Err(e) = execute(&client, command).await {
            info!(error = %e, "Command did not complete");
            if let SyncError::Store(_) = e {
                return Err(e);
            }
        }
        println!("{}", render(&client.snapshot().await?));
    }
    Ok(())
}
