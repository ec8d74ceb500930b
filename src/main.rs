use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

mod db;
mod errors;
mod filter;
mod grade;
mod models;
mod pagination;
mod report;
mod snapshot;
mod stats;

use filter::FilterCriteria;
use grade::GradeTable;
use models::Activity;

#[derive(Parser)]
#[command(name = "kindness-journal")]
#[command(about = "Activity lists and kindness levels for the classroom kindness journal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load realistic seed activities
    Seed,
    /// Import activities from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Filter and page through activities
    Activities {
        /// Read activities from a JSON snapshot instead of the database
        #[arg(long)]
        json: Option<PathBuf>,
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value = filter::ALL_SENTINEL)]
        subject: String,
        #[arg(long, default_value = filter::ALL_SENTINEL)]
        status: String,
        #[arg(long, default_value = filter::ALL_SENTINEL)]
        assignee: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 5)]
        page_size: usize,
    },
    /// List the subjects and assignees available as filter values
    Options {
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// List activities that are not yet due
    Upcoming {
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Show the kindness level for a score
    Grade {
        #[arg(allow_negative_numbers = true)]
        score: f64,
        /// CSV grade table with letter_grade,class_level,marks columns
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Show the grading system table
    Bands {
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Summarize a student's points and badges
    Stats {
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        scores: Vec<f64>,
        #[arg(long)]
        kindness_level: f64,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
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

async fn load_activities(json: Option<&Path>) -> anyhow::Result<Vec<Activity>> {
    match json {
        Some(path) => snapshot::load_json(path),
        None => {
            let pool = connect().await?;
            db::fetch_activities(&pool).await
        }
    }
}

fn load_table(path: Option<&Path>) -> anyhow::Result<GradeTable> {
    match path {
        Some(path) => GradeTable::from_csv(path),
        None => Ok(GradeTable::kindness()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::InitDb => {
            let pool = connect().await?;
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            let pool = connect().await?;
            let inserted = db::seed(&pool).await?;
            println!("Seed data inserted ({inserted} new activities).");
        }
        Commands::Import { csv } => {
            let pool = connect().await?;
            let inserted = db::import_csv(&pool, &csv).await?;
            println!("Inserted {inserted} activities from {}.", csv.display());
        }
        Commands::Activities {
            json,
            query,
            subject,
            status,
            assignee,
            page,
            page_size,
        } => {
            let criteria = FilterCriteria::from_raw(&query, &subject, &status, &assignee)?;
            let activities = load_activities(json.as_deref()).await?;
            let filtered = filter::filter_activities(&activities, &criteria);
            let current = pagination::paginate(&filtered, page_size, page)?;
            print!("{}", report::render_page(&current, filtered.len(), &criteria));
        }
        Commands::Options { json } => {
            let activities = load_activities(json.as_deref()).await?;

            println!("Subjects:");
            println!("- {}", filter::ALL_SENTINEL);
            for subject in filter::distinct_subjects(&activities) {
                println!("- {subject}");
            }

            println!("Assignees:");
            println!("- {}", filter::ALL_SENTINEL);
            for assignee in filter::distinct_assignees(&activities) {
                println!("- {assignee}");
            }
        }
        Commands::Upcoming { json } => {
            let activities = load_activities(json.as_deref()).await?;
            let upcoming = filter::upcoming(&activities, chrono::Utc::now());

            if upcoming.is_empty() {
                println!("No upcoming activities.");
                return Ok(());
            }

            println!("Upcoming activities:");
            let mut output = String::new();
            for activity in &upcoming {
                report::render_activity_line(&mut output, activity);
            }
            print!("{output}");
        }
        Commands::Grade { score, table } => {
            let table = load_table(table.as_deref())?;
            print!("{}", report::render_grade(score, table.resolve(score)));
        }
        Commands::Bands { table } => {
            let table = load_table(table.as_deref())?;
            print!("{}", report::render_grade_table(&table));
        }
        Commands::Stats {
            scores,
            kindness_level,
        } => {
            let summary = stats::calculate_student_stats(&scores, kindness_level);
            print!("{}", report::render_stats(&summary));
        }
    }

    Ok(())
}
