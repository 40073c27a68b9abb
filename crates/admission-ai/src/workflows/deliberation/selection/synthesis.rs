use crate::workflows::deliberation::domain::MentionBand;

/// 0-100 score synthesis: the reference average mapped onto 0-100, plus the
/// honors bonus and the already-clipped criteria-adequacy bonus, clipped to
/// the scale. Rounding to one decimal is the caller's concern.
pub fn score_global(
    moyenne_simple: f64,
    moyenne_ponderee: Option<f64>,
    mention: Option<&str>,
    adequacy_bonus: f64,
) -> f64 {
    let score_base = moyenne_ponderee.unwrap_or(moyenne_simple) * 5.0;
    let mention_bonus = mention
        .and_then(MentionBand::from_text)
        .map(|band| band.bonus())
        .unwrap_or(0.0);

    (score_base + mention_bonus + adequacy_bonus).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_average_takes_precedence() {
        assert_eq!(score_global(10.0, Some(14.0), None, 0.0), 70.0);
        assert_eq!(score_global(10.0, None, None, 0.0), 50.0);
    }

    #[test]
    fn mention_bonus_follows_the_band_table() {
        assert_eq!(score_global(10.0, None, Some("Très Bien"), 0.0), 60.0);
        // "Assez Bien" hits the earlier "bien" entry.
        assert_eq!(score_global(10.0, None, Some("Assez Bien"), 0.0), 57.0);
        assert_eq!(score_global(10.0, None, Some("Passable"), 0.0), 50.0);
    }

    #[test]
    fn final_score_is_clipped_to_the_scale() {
        assert_eq!(score_global(20.0, None, Some("Très Bien"), 10.0), 100.0);
        assert_eq!(score_global(0.5, None, None, -10.0), 0.0);
    }
}
