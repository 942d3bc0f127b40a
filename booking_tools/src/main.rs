use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::{debug, warn};
use serde_json::json;

use booking_desk::{
    application::{
        commands::dashboard_reservations,
        time::{format_long_date, min_booking_date, parse_booking_date, today_local},
    },
    config::Config,
    connect, logging, AppServices,
};
use booking_features::{
    phone::{
        format_phone_number, normalize_phone_number_with, to_display_format, validate_phone_number,
    },
    slots::{get_day_name, next_bookable_dates, validate_selection, weekday_of},
    ReservationStatus, SlotCategory, StatusFilterSet,
};

#[derive(Parser)]
#[command(name = "booking_tools")]
#[command(version = "0.1.0")]
#[command(about = "Operator tools for the consultation booking desk", long_about = None)]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Phone number helpers
    Phone {
        #[command(subcommand)]
        action: PhoneAction,
    },

    /// Slots offered on a date
    Slots {
        /// YYYY-MM-DD
        date: String,
    },

    /// Checks that a time is offered on a date
    Check {
        /// YYYY-MM-DD
        date: String,
        /// HH:MM
        time: String,
    },

    /// Next dates that can be booked
    Suggest {
        /// First date to consider (default: tomorrow)
        #[arg(short, long)]
        from: Option<String>,

        #[arg(short, long, default_value_t = 5)]
        count: usize,
    },

    /// Lists stored reservations (DATABASE_URL)
    Reservations {
        /// Comma separated statuses, "all", or "" for none (default: all but cancelled)
        #[arg(short, long)]
        status: Option<String>,

        #[arg(short, long)]
        user: Option<String>,
    },
}

#[derive(Subcommand)]
enum PhoneAction {
    /// Canonical number -> display form
    Format { value: String },
    /// Anything -> canonical digits
    Normalize {
        value: String,
        /// Leave values already in display form untouched
        #[arg(long)]
        keep_display: bool,
    },
    /// Exits non-zero for an invalid number
    Validate { value: String },
    /// Anything -> display form where possible
    Display { value: String },
}

fn parse_date(text: &str) -> Result<NaiveDate, String> {
    parse_booking_date(text).ok_or_else(|| format!("invalid date {text:?}, expected YYYY-MM-DD"))
}

fn parse_status_filter(raw: Option<&str>) -> Result<StatusFilterSet, String> {
    let Some(raw) = raw else {
        return Ok(StatusFilterSet::dashboard_default());
    };
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("all") {
        return Ok(StatusFilterSet::select_all());
    }
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<ReservationStatus>().map_err(|e| e.to_string()))
        .collect()
}

fn run_phone(action: PhoneAction, as_json: bool) -> Result<(), String> {
    let (input, output) = match action {
        PhoneAction::Format { value } => {
            let out = format_phone_number(&value);
            (value, json!(out))
        }
        PhoneAction::Normalize { value, keep_display } => {
            let out = normalize_phone_number_with(&value, !keep_display);
            (value, json!(out))
        }
        PhoneAction::Validate { value } => {
            let valid = validate_phone_number(&value);
            if as_json {
                println!("{}", json!({ "input": value, "valid": valid }));
            } else {
                println!("{}", if valid { "valid" } else { "invalid" });
            }
            return if valid { Ok(()) } else { Err(format!("{value:?} is not a valid phone number")) };
        }
        PhoneAction::Display { value } => {
            let out = to_display_format(&value);
            (value, json!(out))
        }
    };

    if as_json {
        println!("{}", json!({ "input": input, "output": output }));
    } else if let Some(text) = output.as_str() {
        println!("{text}");
    }
    Ok(())
}

fn run_slots(date: &str, as_json: bool) -> Result<(), String> {
    let date = parse_date(date)?;
    let category = SlotCategory::from_date(date);
    let day = get_day_name(weekday_of(date));

    if as_json {
        println!(
            "{}",
            json!({ "date": date, "dayName": day, "category": category, "slots": category.time_slots() })
        );
    } else if category.is_bookable() {
        println!("{} ({}): {}", format_long_date(date), category.as_str(), category.time_slots().join(" "));
    } else {
        println!("{}: closed", format_long_date(date));
    }
    Ok(())
}

fn run_check(date: &str, time: &str, as_json: bool) -> Result<(), String> {
    let date = parse_date(date)?;
    let ok = validate_selection(date, time);
    if as_json {
        println!("{}", json!({ "date": date, "time": time, "available": ok }));
    } else if ok {
        println!("{time} is available on {}", format_long_date(date));
    } else {
        println!("{time} is not available on {}", get_day_name(weekday_of(date)));
    }
    Ok(())
}

fn run_suggest(from: Option<&str>, count: usize, as_json: bool) -> Result<(), String> {
    let from = match from {
        Some(text) => parse_date(text)?,
        None => min_booking_date(today_local()),
    };
    let dates = next_bookable_dates(from, count);

    if as_json {
        println!("{}", json!(dates));
    } else {
        for date in dates {
            println!("{date}  {}", format_long_date(date));
        }
    }
    Ok(())
}

async fn run_reservations(
    config: &Config,
    status: Option<&str>,
    user: Option<&str>,
    as_json: bool,
) -> Result<(), String> {
    let filter = parse_status_filter(status)?;
    debug!("status filter {:?}, user {:?}", filter.sorted_statuses(), user);
    let pool = connect(config).await.map_err(|e| e.to_string())?;
    let services = AppServices::new(pool);

    let reservations = dashboard_reservations(&services, &filter, user)
        .await
        .map_err(|e| e.to_string())?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&reservations).map_err(|e| e.to_string())?);
        return Ok(());
    }
    if reservations.is_empty() {
        println!("no reservations");
    }
    for r in &reservations {
        println!(
            "#{:<4} {:<10} {} {}  {} <{}> {}",
            r.id, r.status_label, r.preferred_date_long, r.preferred_time, r.full_name, r.email, r.phone_display
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    let config = Config::from_env();
    logging::init(config.log_format);

    let result = match args.command {
        Commands::Phone { action } => run_phone(action, args.json),
        Commands::Slots { date } => run_slots(&date, args.json),
        Commands::Check { date, time } => run_check(&date, &time, args.json),
        Commands::Suggest { from, count } => run_suggest(from.as_deref(), count, args.json),
        Commands::Reservations { status, user } => {
            run_reservations(&config, status.as_deref(), user.as_deref(), args.json).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            warn!("command failed: {e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
