use std::fmt::Write;

use crate::filter::{FilterCriteria, Selection};
use crate::grade::{star_label, GradeBand, GradeTable};
use crate::models::{Activity, StudentStats};
use crate::pagination::Page;

fn describe_criteria(criteria: &FilterCriteria) -> String {
    if criteria.is_unrestricted() {
        return "all activities".to_string();
    }

    let mut parts = Vec::new();
    let query = criteria.query.trim();
    if !query.is_empty() {
        parts.push(format!("title contains {query:?}"));
    }
    if let Selection::Only(subject) = &criteria.subject {
        parts.push(format!("subject {subject}"));
    }
    if let Selection::Only(status) = &criteria.status {
        parts.push(format!("status {status}"));
    }
    if let Selection::Only(assignee) = &criteria.assignee {
        parts.push(format!("assigned to {assignee}"));
    }
    parts.join(", ")
}

pub fn render_activity_line(output: &mut String, activity: &Activity) {
    let _ = writeln!(
        output,
        "- [{}] {} ({}) due {}",
        activity.status,
        activity.title,
        activity.subject.as_deref().unwrap_or("no subject"),
        activity.due_date.format("%d %b %Y"),
    );
    if !activity.description.is_empty() {
        let _ = writeln!(output, "    {}", activity.description);
    }
}

pub fn render_page(
    page: &Page<'_, Activity>,
    filtered_count: usize,
    criteria: &FilterCriteria,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Activities");
    let _ = writeln!(
        output,
        "Showing {} ({} matching)",
        describe_criteria(criteria),
        filtered_count
    );
    let _ = writeln!(output);

    if page.items.is_empty() {
        let _ = writeln!(output, "No activities found");
        return output;
    }

    for activity in page.items {
        render_activity_line(&mut output, activity);
    }

    let _ = writeln!(output);
    let numbers: Vec<String> = page
        .page_numbers()
        .map(|number| {
            if number == page.effective_page {
                format!("[{number}]")
            } else {
                number.to_string()
            }
        })
        .collect();
    let _ = writeln!(output, "Pages: {}", numbers.join(" "));
    let _ = write!(output, "Page {} of {}", page.effective_page, page.total_pages);
    if page.has_previous() {
        let _ = write!(output, " | previous: --page {}", page.previous_page());
    }
    if page.has_next() {
        let _ = write!(output, " | next: --page {}", page.next_page());
    }
    let _ = writeln!(output);

    output
}

pub fn render_grade(score: f64, band: &GradeBand) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "My Kindness Level: {score}");
    let _ = writeln!(output, "{}", band.letter_grade);
    let _ = writeln!(output, "{} ({})", band.class_level, band.marks());
    let _ = writeln!(output, "{}", star_label(score));
    output
}

pub fn render_grade_table(table: &GradeTable) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Grading System Information");
    for band in table.bands() {
        let _ = writeln!(
            output,
            "- {:<10} {} | {}",
            band.marks(),
            band.class_level,
            band.letter_grade
        );
    }
    output
}

pub fn render_stats(stats: &StudentStats) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Total points: {}", stats.total_points);
    let _ = writeln!(output, "Badges: {}", stats.badges);
    let _ = writeln!(output, "Kindness score: {}", stats.kindness_score);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    use crate::models::ActivityStatus;
    use crate::pagination::paginate;

    fn activity(title: &str) -> Activity {
        Activity {
            id: Uuid::new_v4(),
            title: title.to_string(),
            subject: Some("Art".to_string()),
            status: ActivityStatus::Pending,
            due_date: Utc.with_ymd_and_hms(2026, 3, 6, 15, 0, 0).unwrap(),
            description: String::new(),
            assignee: None,
        }
    }

    #[test]
    fn page_lists_items_and_navigation() {
        let records: Vec<Activity> = (1..=7).map(|n| activity(&format!("Leaf {n}"))).collect();
        let page = paginate(&records, 5, 1).unwrap();
        let criteria = FilterCriteria::new().with_query("leaf");

        let output = render_page(&page, records.len(), &criteria);
        assert!(output.contains("title contains \"leaf\" (7 matching)"));
        assert!(output.contains("- [Pending] Leaf 5 (Art) due 06 Mar 2026"));
        assert!(!output.contains("Leaf 6"));
        assert!(output.contains("Pages: [1] 2"));
        assert!(output.contains("Page 1 of 2 | next: --page 2"));
    }

    #[test]
    fn empty_page_says_nothing_found() {
        let records: Vec<Activity> = Vec::new();
        let page = paginate(&records, 5, 1).unwrap();

        let output = render_page(&page, 0, &FilterCriteria::new());
        assert!(output.contains("Showing all activities (0 matching)"));
        assert!(output.contains("No activities found"));
    }

    #[test]
    fn grade_output_names_band_and_stars() {
        let table = GradeTable::kindness();
        let output = render_grade(92.0, table.resolve(92.0));
        assert!(output.contains("Kindness Hero (90-100)"));
        assert!(output.contains("⭐⭐⭐⭐⭐"));
    }

    #[test]
    fn table_lists_every_band() {
        let output = render_grade_table(&GradeTable::kindness());
        assert_eq!(output.lines().count(), 12);
        assert!(output.contains("Ungraded Kindness Pass"));
    }
}
