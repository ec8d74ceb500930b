use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::errors::{KindnessError, KindnessResult};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && score <= self.max
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeBand {
    pub letter_grade: String,
    pub class_level: String,
    /// `None` marks a fallback-only entry that the range scan skips.
    pub range: Option<ScoreRange>,
}

impl GradeBand {
    pub fn new(letter_grade: &str, class_level: &str, range: Option<ScoreRange>) -> Self {
        Self {
            letter_grade: letter_grade.to_string(),
            class_level: class_level.to_string(),
            range,
        }
    }

    pub fn from_marks(letter_grade: &str, class_level: &str, marks: &str) -> KindnessResult<Self> {
        Ok(Self::new(letter_grade, class_level, parse_marks(marks)?))
    }

    /// Range in `min-max` notation, or `-` for fallback entries.
    pub fn marks(&self) -> String {
        match self.range {
            Some(range) => format!("{}-{}", range.min, range.max),
            None => "-".to_string(),
        }
    }
}

/// Parses `90-100` style notation. Bounds must be non-negative and ordered.
pub fn parse_marks(raw: &str) -> KindnessResult<Option<ScoreRange>> {
    let trimmed = raw.trim();
    if trimmed == "-" {
        return Ok(None);
    }

    let invalid = || KindnessError::InvalidMarks(raw.to_string());
    let (min, max) = trimmed.split_once('-').ok_or_else(invalid)?;
    let min: f64 = min.trim().parse().map_err(|_| invalid())?;
    let max: f64 = max.trim().parse().map_err(|_| invalid())?;

    if !min.is_finite() || !max.is_finite() || min > max {
        return Err(invalid());
    }

    Ok(Some(ScoreRange { min, max }))
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeTable {
    bands: Vec<GradeBand>,
}

impl GradeTable {
    pub fn new(bands: Vec<GradeBand>) -> KindnessResult<Self> {
        if bands.is_empty() {
            return Err(KindnessError::EmptyGradeTable);
        }
        Ok(Self { bands })
    }

    /// The kindness level table shown to students and teachers.
    pub fn kindness() -> Self {
        let band = |letter_grade: &str, class_level: &str, min: f64, max: f64| {
            GradeBand::new(letter_grade, class_level, Some(ScoreRange { min, max }))
        };

        Self {
            bands: vec![
                band("🌟 Amazing Effort!", "Kindness Hero", 90.0, 100.0),
                band("✨ You’re Shining Bright!", "Kindness Champion", 85.0, 89.99),
                band("💪 Keep Growing Strong!", "Kindness Leader", 80.0, 84.99),
                band("🌈 Great Job, Keep It Up!", "Kindness Explorer", 75.0, 79.99),
                band("😊 You’re Doing Well!", "Kindness Starter", 70.0, 74.99),
                band("👍 Keep Practicing!", "Learning Helper", 65.0, 69.99),
                band("🌻 You’re Growing Every Day!", "Kindness Learner", 60.0, 64.99),
                band("💡 You’re Making Progress!", "Kindness Beginner", 55.0, 59.99),
                band("🌱 Let’s Try Again Together!", "Kindness Seedling", 50.0, 54.99),
                GradeBand::new("💗 We Understand You Tried", "Kindness Pass (AG)", None),
                GradeBand::new("🤝 Participation Acknowledged", "Ungraded Kindness Pass", None),
            ],
        }
    }

    /// Loads a table from CSV with `letter_grade,class_level,marks` columns.
    pub fn from_csv(path: &Path) -> anyhow::Result<Self> {
        #[derive(Deserialize)]
        struct CsvRow {
            letter_grade: String,
            class_level: String,
            marks: String,
        }

        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("failed to open grade table {}", path.display()))?;
        let mut bands = Vec::new();

        for result in reader.deserialize::<CsvRow>() {
            let row = result?;
            bands.push(GradeBand::from_marks(&row.letter_grade, &row.class_level, &row.marks)?);
        }

        tracing::debug!(bands = bands.len(), path = %path.display(), "loaded grade table");
        Ok(Self::new(bands)?)
    }

    pub fn bands(&self) -> &[GradeBand] {
        &self.bands
    }

    /// First band whose range holds `score`; the last entry when none does.
    pub fn resolve(&self, score: f64) -> &GradeBand {
        self.bands
            .iter()
            .find(|band| band.range.is_some_and(|range| range.contains(score)))
            .unwrap_or_else(|| self.fallback())
    }

    pub fn fallback(&self) -> &GradeBand {
        // Construction guarantees at least one band.
        &self.bands[self.bands.len() - 1]
    }
}

impl Default for GradeTable {
    fn default() -> Self {
        Self::kindness()
    }
}

/// Star rating from 0 to 5.
pub fn stars(score: f64) -> u8 {
    match score {
        s if s >= 90.0 => 5,
        s if s >= 80.0 => 4,
        s if s >= 70.0 => 3,
        s if s >= 60.0 => 2,
        s if s >= 50.0 => 1,
        _ => 0,
    }
}

pub fn star_label(score: f64) -> String {
    match stars(score) {
        0 => "No Stars".to_string(),
        count => "⭐".repeat(count as usize),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn resolves_top_band() {
        let table = GradeTable::kindness();
        let band = table.resolve(92.0);
        assert_eq!(band.marks(), "90-100");
        assert_eq!(band.class_level, "Kindness Hero");
    }

    #[test]
    fn bounds_are_inclusive() {
        let table = GradeTable::kindness();
        assert_eq!(table.resolve(100.0).class_level, "Kindness Hero");
        assert_eq!(table.resolve(90.0).class_level, "Kindness Hero");
        assert_eq!(table.resolve(89.99).class_level, "Kindness Champion");
        assert_eq!(table.resolve(50.0).marks(), "50-54.99");
        assert_eq!(table.resolve(52.0).marks(), "50-54.99");
    }

    #[test]
    fn unmatched_scores_fall_back_to_last_entry() {
        let table = GradeTable::kindness();
        for score in [-5.0, 49.99, 100.5, 89.995, f64::NAN] {
            assert_eq!(table.resolve(score).class_level, "Ungraded Kindness Pass");
        }
    }

    #[test]
    fn overlapping_ranges_resolve_to_first_listed() {
        let table = GradeTable::new(vec![
            GradeBand::from_marks("Wide", "Wide", "0-100").unwrap(),
            GradeBand::from_marks("Narrow", "Narrow", "40-60").unwrap(),
        ])
        .unwrap();

        assert_eq!(table.resolve(50.0).class_level, "Wide");
        assert_eq!(table.resolve(120.0).class_level, "Narrow");
    }

    #[test]
    fn sentinel_entries_are_never_scanned() {
        let table = GradeTable::new(vec![
            GradeBand::new("Fallback", "Fallback", None),
            GradeBand::from_marks("Pass", "Pass", "50-100").unwrap(),
        ])
        .unwrap();

        assert_eq!(table.resolve(10.0).class_level, "Pass");
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(GradeTable::new(Vec::new()), Err(KindnessError::EmptyGradeTable));
    }

    #[test]
    fn marks_notation_is_parsed_once() {
        assert_eq!(
            parse_marks("85-89.99"),
            Ok(Some(ScoreRange { min: 85.0, max: 89.99 }))
        );
        assert_eq!(parse_marks(" - "), Ok(None));
        assert!(parse_marks("ninety").is_err());
        assert!(parse_marks("90-80").is_err());
        assert!(parse_marks("90-").is_err());
    }

    #[test]
    fn stars_follow_score_thresholds() {
        assert_eq!(stars(95.0), 5);
        assert_eq!(stars(80.0), 4);
        assert_eq!(stars(79.9), 3);
        assert_eq!(stars(60.0), 2);
        assert_eq!(stars(50.0), 1);
        assert_eq!(star_label(49.0), "No Stars");
        assert_eq!(star_label(72.0), "⭐⭐⭐");
    }

    #[test]
    fn loads_table_from_csv() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "letter_grade,class_level,marks").unwrap();
        writeln!(file, "Great,Top,70-100").unwrap();
        writeln!(file, "Tried,Fallback,-").unwrap();
        file.flush().unwrap();

        let table = GradeTable::from_csv(file.path()).unwrap();
        assert_eq!(table.bands().len(), 2);
        assert_eq!(table.resolve(75.0).class_level, "Top");
        assert_eq!(table.resolve(10.0).class_level, "Fallback");
    }

    #[test]
    fn csv_with_bad_marks_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "letter_grade,class_level,marks").unwrap();
        writeln!(file, "Great,Top,high").unwrap();
        file.flush().unwrap();

        assert!(GradeTable::from_csv(file.path()).is_err());
    }
}
