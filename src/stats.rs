use crate::models::StudentStats;

const POINTS_PER_BADGE: f64 = 10.0;

pub fn calculate_student_stats(scores: &[f64], kindness_level: f64) -> StudentStats {
    let total_points: f64 = scores.iter().sum();
    let badges = (total_points / POINTS_PER_BADGE).floor().max(0.0) as u32;

    StudentStats {
        total_points,
        badges,
        kindness_score: format!("{kindness_level}%"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_points_and_awards_badges() {
        let stats = calculate_student_stats(&[30.0, 90.0, 70.0, 100.0], 90.0);
        assert_eq!(stats.total_points, 290.0);
        assert_eq!(stats.badges, 29);
        assert_eq!(stats.kindness_score, "90%");
    }

    #[test]
    fn partial_badges_round_down() {
        let stats = calculate_student_stats(&[9.5, 9.0], 72.5);
        assert_eq!(stats.badges, 1);
        assert_eq!(stats.kindness_score, "72.5%");
    }

    #[test]
    fn no_scores_means_no_badges() {
        let stats = calculate_student_stats(&[], 0.0);
        assert_eq!(stats.total_points, 0.0);
        assert_eq!(stats.badges, 0);
    }

    #[test]
    fn negative_totals_never_yield_badges() {
        assert_eq!(calculate_student_stats(&[-40.0], 10.0).badges, 0);
    }
}
