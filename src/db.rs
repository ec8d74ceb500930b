use anyhow::Context;
use chrono::{DateTime, TimeZone, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{Activity, ActivityStatus};

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

struct NewActivity<'a> {
    title: &'a str,
    subject: Option<&'a str>,
    status: ActivityStatus,
    due_date: DateTime<Utc>,
    description: &'a str,
    assignee: Option<&'a str>,
    source_key: &'a str,
}

async fn insert_activity(pool: &PgPool, activity: &NewActivity<'_>) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO kindness_journal.activities
        (id, title, subject, status, due_date, description, assignee, source_key)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (source_key) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(activity.title)
    .bind(activity.subject)
    .bind(activity.status.as_str())
    .bind(activity.due_date)
    .bind(activity.description)
    .bind(activity.assignee)
    .bind(activity.source_key)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<usize> {
    let due = |year: i32, month: u32, day: u32| {
        Utc.with_ymd_and_hms(year, month, day, 15, 0, 0)
            .single()
            .context("invalid date")
    };

    let activities = vec![
        NewActivity {
            title: "Kindness Tree",
            subject: Some("Art"),
            status: ActivityStatus::Pending,
            due_date: due(2026, 3, 6)?,
            description: "Add a paper leaf for every kind act you notice this week",
            assignee: Some("avery.lee"),
            source_key: "seed-001",
        },
        NewActivity {
            title: "Community Garden Helpers",
            subject: Some("Science"),
            status: ActivityStatus::Graded,
            due_date: due(2026, 2, 13)?,
            description: "Plant seedlings with a buddy and journal how you shared the work",
            assignee: Some("jules.moreno"),
            source_key: "seed-002",
        },
        NewActivity {
            title: "Thank You Cards",
            subject: Some("English"),
            status: ActivityStatus::Submitted,
            due_date: due(2026, 2, 27)?,
            description: "Write a card to someone at school who helped you",
            assignee: Some("kiara.patel"),
            source_key: "seed-003",
        },
        NewActivity {
            title: "Buddy Bench Reflection",
            subject: Some("Health"),
            status: ActivityStatus::Overdue,
            due_date: due(2026, 2, 6)?,
            description: "Describe a time you invited someone to play",
            assignee: Some("avery.lee"),
            source_key: "seed-004",
        },
    ];

    let mut inserted = 0usize;
    for activity in &activities {
        if insert_activity(pool, activity).await? {
            inserted += 1;
        }
    }

    tracing::info!(inserted, "seeded activities");
    Ok(inserted)
}

pub async fn fetch_activities(pool: &PgPool) -> anyhow::Result<Vec<Activity>> {
    let records = sqlx::query(
        "SELECT id, title, subject, status, due_date, description, assignee \
         FROM kindness_journal.activities \
         ORDER BY due_date, title",
    )
    .fetch_all(pool)
    .await?;

    let mut activities = Vec::with_capacity(records.len());

    for row in records {
        let status: String = row.get("status");
        activities.push(Activity {
            id: row.get("id"),
            title: row.get("title"),
            subject: row.get("subject"),
            status: status.parse()?,
            due_date: row.get("due_date"),
            description: row.get("description"),
            assignee: row.get("assignee"),
        });
    }

    tracing::info!(count = activities.len(), "fetched activities from database");
    Ok(activities)
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        title: String,
        subject: Option<String>,
        status: String,
        due_date: DateTime<Utc>,
        #[serde(default)]
        description: String,
        assignee: Option<String>,
        source_key: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let status: ActivityStatus = row
            .status
            .parse()
            .with_context(|| format!("bad status for activity {:?}", row.title))?;
        let source_key = row
            .source_key
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

        let activity = NewActivity {
            title: &row.title,
            subject: row.subject.as_deref().filter(|value| !value.is_empty()),
            status,
            due_date: row.due_date,
            description: &row.description,
            assignee: row.assignee.as_deref().filter(|value| !value.is_empty()),
            source_key: &source_key,
        };

        if insert_activity(pool, &activity).await? {
            inserted += 1;
        } else {
            tracing::debug!(source_key = %source_key, "skipped duplicate activity");
        }
    }

    Ok(inserted)
}
