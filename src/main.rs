use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

mod db;
mod models;
mod report;
mod schedule;
mod stats;

#[derive(Parser)]
#[command(name = "defense-session-tracker")]
#[command(about = "Defense and internship session tracker for academic affairs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed data
    Seed,
    /// Create or update a session; the expected report date is derived
    /// from the start date
    CreateSession {
        #[arg(long)]
        code: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        start_date: NaiveDate,
    },
    /// List sessions with their dates
    Sessions,
    /// Import registrations from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
        #[arg(long)]
        session: String,
    },
    /// Show aggregate statistics for a session
    Stats {
        #[arg(long)]
        session: String,
        #[arg(long)]
        json: bool,
    },
    /// Compute the expected report date for a start date
    Schedule {
        #[arg(long)]
        start_date: NaiveDate,
    },
    /// Generate a markdown report for a session
    Report {
        #[arg(long)]
        session: String,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

async fn connect() -> anyhow::Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL")
        .context("DATABASE_URL must be set to a production Postgres instance")?;

    PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to Postgres")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::InitDb => {
            let pool = connect().await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = connect().await?;
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::CreateSession {
            code,
            title,
            start_date,
        } => {
            let pool = connect().await?;
            let session = db::create_session(&pool, &code, &title, start_date).await?;
            println!(
                "Session {} ready, expected report date {}.",
                session.code, session.expected_report_date
            );
        }
        Commands::Sessions => {
            let pool = connect().await?;
            let sessions = db::list_sessions(&pool).await?;
            if sessions.is_empty() {
                println!("No sessions yet.");
            }
            for session in sessions {
                println!(
                    "- {} ({}) starts {}, expected report date {}",
                    session.code, session.title, session.start_date, session.expected_report_date
                );
            }
        }
        Commands::Import { csv, session } => {
            let pool = connect().await?;
            let inserted = db::import_csv(&pool, &session, &csv).await?;
            println!(
                "Inserted {inserted} registrations into {session} from {}.",
                csv.display()
            );
        }
        Commands::Stats { session, json } => {
            let pool = connect().await?;
            let session = db::find_session(&pool, &session).await?;
            let registrations = db::fetch_registrations(&pool, session.id).await?;
            let stats = stats::aggregate(&registrations);

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }

            println!("Session {}: {} registrations", session.code, stats.student_count);
            println!(
                "- reporting (graduation/internship): {}/{}",
                stats.reporting_graduation_count, stats.reporting_internship_count
            );
            println!("- exempted (graduation): {}", stats.exempted_graduation_count);
            println!(
                "- withdrawn (graduation/internship): {}/{}",
                stats.withdrawn_graduation_count, stats.withdrawn_internship_count
            );
            println!(
                "- distinct projects/companies: {}/{}",
                stats.project_count, stats.internship_company_count
            );
            for summary in stats.supervisor_details.iter() {
                println!(
                    "- {}: {} students across {} projects",
                    summary.name, summary.student_count, summary.project_count
                );
            }
        }
        Commands::Schedule { start_date } => {
            let expected = schedule::expected_report_date(start_date);
            println!("Expected report date: {expected}");
        }
        Commands::Report { session, out } => {
            let pool = connect().await?;
            let session = db::find_session(&pool, &session).await?;
            let registrations = db::fetch_registrations(&pool, session.id).await?;
            let stats = stats::aggregate(&registrations);
            let report = report::build_report(&session, &stats);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
