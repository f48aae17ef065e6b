//! Concierge CLI for the villa reservation service.
//!
//! Lets staff browse the catalog, print the booking calendar and send a test
//! reservation through the configured notification sender without opening
//! the web flow.
//!
//! # Usage
//!
//! ```bash
//! # List villas
//! cargo run --bin concierge -- villas
//!
//! # Two-month calendar starting in April 2025, with a stay marked
//! cargo run --bin concierge -- calendar --month 4 --year 2025 \
//!     --arrival 2025-04-01 --departure 2025-04-05
//!
//! # Send a test reservation request (prompts for guest details)
//! cargo run --bin concierge -- notify-test --villa 1
//! ```
//!
//! # Environment Variables
//!
//! `notify-test` reads the same configuration as the server; see
//! `villa_reservations::config`. Without `MAIL_API_KEY` the request is only
//! logged.

use villa_reservations::application::services::{ReservationService, VillaService};
use villa_reservations::config;
use villa_reservations::domain::booking::BookingSession;
use villa_reservations::domain::calendar::{CalendarDay, WEEKDAY_LABELS};
use villa_reservations::domain::entities::{GuestFormData, Prefix, ReservationPayload, Villa};
use villa_reservations::domain::month_view::{DayMark, DualMonthView, MonthCursor, MonthPanel};
use villa_reservations::domain::range::DateRange;
use villa_reservations::error::AppError;
use villa_reservations::infrastructure::catalog::StaticVillaRepository;
use villa_reservations::server::build_sender;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Select};
use std::sync::Arc;

/// Concierge tool for villa reservations.
#[derive(Parser)]
#[command(name = "concierge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the villa catalog
    Villas,

    /// Print a two-month calendar
    Calendar {
        /// First month shown, 1-12 (default: current month)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Year of the first month (default: current year)
        #[arg(short, long)]
        year: Option<i32>,

        /// Arrival date to mark (YYYY-MM-DD)
        #[arg(long)]
        arrival: Option<NaiveDate>,

        /// Departure date to mark (YYYY-MM-DD)
        #[arg(long, requires = "arrival")]
        departure: Option<NaiveDate>,
    },

    /// Send a test reservation through the configured sender
    NotifyTest {
        /// Villa ID (prompted if omitted)
        #[arg(short, long)]
        villa: Option<u32>,

        /// Arrival date (default: two weeks from today)
        #[arg(long)]
        arrival: Option<NaiveDate>,

        /// Departure date (default: four nights after arrival)
        #[arg(long)]
        departure: Option<NaiveDate>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let villas = VillaService::new(Arc::new(StaticVillaRepository::default()));

    match cli.command {
        Commands::Villas => list_villas(&villas).await?,
        Commands::Calendar {
            month,
            year,
            arrival,
            departure,
        } => print_calendar(month, year, arrival, departure)?,
        Commands::NotifyTest {
            villa,
            arrival,
            departure,
            yes,
        } => notify_test(&villas, villa, arrival, departure, yes).await?,
    }

    Ok(())
}

/// Lists every villa.
///
/// # Output Format
///
/// ```text
/// 🏡 Villas
///
///   ID  Name                 Price              Guests  Bedrooms
///   ───────────────────────────────────────────────────────────
///   1   Villa Aurora         €1,450 / night     6       3
/// ```
async fn list_villas(villas: &VillaService<StaticVillaRepository>) -> Result<()> {
    println!("{}", "🏡 Villas".bright_blue().bold());
    println!();

    let items = villas
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list villas: {}", e))?;

    if items.is_empty() {
        println!("{}", "  Catalog is empty".yellow());
        return Ok(());
    }

    println!(
        "  {:<3} {:<20} {:<18} {:<7} {:<8}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Price".bright_white().bold(),
        "Guests".bright_white().bold(),
        "Bedrooms".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());

    for villa in &items {
        println!(
            "  {:<3} {:<20} {:<18} {:<7} {:<8}",
            villa.id.to_string().bright_black(),
            villa.name.cyan(),
            villa.price,
            villa.max_guests,
            villa.bedrooms
        );
    }

    println!();
    println!("  Total: {}", items.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Prints the two-month view with the selected stay highlighted.
fn print_calendar(
    month: Option<u32>,
    year: Option<i32>,
    arrival: Option<NaiveDate>,
    departure: Option<NaiveDate>,
) -> Result<()> {
    let today = Local::now().date_naive();
    let start = arrival.unwrap_or(today);
    let cursor = MonthCursor::new(
        month.map(|m| m - 1).unwrap_or_else(|| start.month0()),
        year.unwrap_or_else(|| start.year()),
    )?;

    let range = [arrival, departure]
        .into_iter()
        .flatten()
        .fold(DateRange::new(), |range, date| {
            range.select(CalendarDay::from(date))
        });

    if arrival.is_some() && departure.is_some() && !range.is_complete() {
        println!(
            "{}",
            "⚠️  Departure must be after arrival; only the arrival is marked".yellow()
        );
        println!();
    }

    let view = DualMonthView::build(cursor, &range)?;
    for panel in view.panels() {
        print_panel(panel);
    }

    if let (Some(arrival), Some(departure), Some(nights)) =
        (range.arrival(), range.departure(), range.nights())
    {
        println!(
            "  {} → {} ({} nights)",
            arrival.format_long().bright_yellow(),
            departure.format_long().bright_yellow(),
            nights
        );
        println!();
    }

    Ok(())
}

fn print_panel(panel: &MonthPanel) {
    println!("  {}", panel.title.bright_white().bold());
    let header: Vec<String> = WEEKDAY_LABELS.iter().map(|d| format!("{:>4}", d)).collect();
    println!("  {}", header.join("").bright_black());

    for week in &panel.weeks {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                None => "    ".to_string(),
                Some(cell) => {
                    let day = format!("{:>4}", cell.date.day());
                    match cell.mark {
                        DayMark::Arrival | DayMark::Departure => {
                            day.black().on_bright_yellow().to_string()
                        }
                        DayMark::InRange => day.cyan().to_string(),
                        DayMark::Plain => day,
                    }
                }
            })
            .collect();
        println!("  {}", row);
    }
    println!();
}

/// Walks a fresh session through the calendar and details steps.
fn build_payload(
    today: NaiveDate,
    villa: Villa,
    arrival: NaiveDate,
    departure: NaiveDate,
    guest: GuestFormData,
) -> Result<ReservationPayload, AppError> {
    let mut session = BookingSession::new(today);
    session.select_villa(villa)?;
    session.advance()?;
    session.select_date(arrival.day(), arrival.month0(), arrival.year())?;
    session.select_date(departure.day(), departure.month0(), departure.year())?;
    session.advance()?;
    session.update_form(guest)?;
    session.begin_submission()
}

/// Sends one reservation request through the real booking session and sender.
///
/// # Flow
///
/// 1. Pick a villa (or use `--villa`)
/// 2. Apply arrival and departure to a fresh booking session
/// 3. Prompt for guest details
/// 4. Show the payload and confirm (unless `--yes`)
/// 5. Send through the configured sender and print the message ID
async fn notify_test(
    villas: &VillaService<StaticVillaRepository>,
    villa_id: Option<u32>,
    arrival: Option<NaiveDate>,
    departure: Option<NaiveDate>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "✉️  Test Reservation".bright_blue().bold());
    println!();

    let config = config::load_from_env().context("Invalid configuration")?;

    let villa = match villa_id {
        Some(id) => villas
            .get(id)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?,
        None => {
            let items = villas
                .list()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to list villas: {}", e))?;
            let names: Vec<&str> = items.iter().map(|v| v.name.as_str()).collect();
            let index = Select::new()
                .with_prompt("Villa")
                .items(&names)
                .default(0)
                .interact()?;
            items
                .into_iter()
                .nth(index)
                .context("No villa selected")?
        }
    };

    let today = Local::now().date_naive();
    let arrival = arrival.unwrap_or(today + chrono::Days::new(14));
    let departure = departure.unwrap_or(arrival + chrono::Days::new(4));

    let guest = GuestFormData {
        prefix: Prefix::None,
        first_name: Input::new().with_prompt("First name").interact_text()?,
        last_name: Input::new().with_prompt("Last name").interact_text()?,
        email: Input::new().with_prompt("Email").interact_text()?,
        phone: Input::new().with_prompt("Phone").interact_text()?,
        special_request: Input::new()
            .with_prompt("Special request")
            .allow_empty(true)
            .interact_text()?,
    };

    let payload = build_payload(today, villa, arrival, departure, guest)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!();
    println!("{}", "Reservation:".bright_white().bold());
    println!("  Villa:     {}", payload.villa_name.cyan());
    println!("  Arrival:   {}", payload.arrival);
    println!("  Departure: {}", payload.departure);
    println!("  Guests:    {} adults, {} children", payload.adults, payload.children);
    println!("  Name:      {}", payload.name);
    println!();

    let sender = build_sender(&config)?;
    println!("  Sender: {}", sender.kind().bright_yellow());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Send this reservation request?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let service = ReservationService::new(sender, config.notification_timeout());
    let receipt = service
        .send(&payload)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to send: {} ({})", e, e.details()))?;

    println!();
    println!("{}", "✅ Reservation request sent!".green().bold());
    println!("  Message ID: {}", receipt.message_id.bright_yellow());
    println!();

    Ok(())
}
