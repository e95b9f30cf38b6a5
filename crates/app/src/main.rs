//! RendyWS - co-working room booking
//!
//! Command-line front end over the booking ledger in `rendyws-core`.

use clap::Parser;
use rendyws_core::auth::RegistrationForm;
use rendyws_core::{BookingRequest, BookingStatus, Result, RoomFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod state;
mod viewmodel;

use cli::{Cli, Command};
use state::AppState;

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    tracing::info!("Starting RendyWS");

    let app_state = match AppState::new(cli.config.as_deref(), cli.db) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match run(&app_state, cli.command) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(state: &AppState, command: Command) -> Result<String> {
    match command {
        Command::Login { email, password } => viewmodel::auth::login(state, &email, &password),
        Command::Logout => viewmodel::auth::logout(state),
        Command::Whoami => viewmodel::auth::whoami(state),
        Command::Register {
            name,
            email,
            password,
            confirm,
        } => viewmodel::auth::register(
            state,
            &RegistrationForm {
                name,
                email,
                password,
                confirm_password: confirm,
            },
        ),
        Command::Rooms {
            min_price,
            max_price,
            capacity,
            room_type,
            location,
        } => {
            let defaults = RoomFilter::default();
            let filter = RoomFilter {
                min_price: min_price.unwrap_or(defaults.min_price),
                max_price: max_price.unwrap_or(defaults.max_price),
                min_capacity: capacity,
                room_type: room_type.map(Into::into),
                location,
            };
            Ok(viewmodel::rooms::list(state, &filter))
        }
        Command::Room { id, start, end } => viewmodel::rooms::show(state, id, start.zip(end)),
        Command::Book {
            room,
            date,
            start,
            end,
        } => viewmodel::bookings::book(state, &BookingRequest::new(room, date, start, end)),
        Command::Bookings { status } => viewmodel::bookings::list(state, status.map(Into::into)),
        Command::Dashboard => viewmodel::bookings::dashboard(state),
        Command::Review => viewmodel::admin::review(state),
        Command::Approve { id } => viewmodel::admin::decide(state, id, BookingStatus::Approved),
        Command::Reject { id } => viewmodel::admin::decide(state, id, BookingStatus::Rejected),
        Command::Cancel { id } => viewmodel::bookings::cancel(state, id),
        Command::Stats => viewmodel::bookings::stats(state),
    }
}
