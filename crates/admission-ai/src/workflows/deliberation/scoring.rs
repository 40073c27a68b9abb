use std::collections::BTreeMap;

use super::domain::Note;

/// Rounds to two decimal places, the precision used for every reported
/// average.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to one decimal place, the precision used for 0-100 scores.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Coefficient-weighted average over a candidate's graded items, rounded to
/// two decimals. Returns 0 when the items are empty or every coefficient is
/// zero, so a degenerate record never divides by zero.
pub fn weighted_average(notes: &[Note]) -> f64 {
    let mut total_points = 0.0;
    let mut total_coefficients = 0.0;

    for note in notes {
        total_points += note.note * note.coefficient;
        total_coefficients += note.coefficient;
    }

    if total_coefficients > 0.0 {
        round2(total_points / total_coefficients)
    } else {
        0.0
    }
}

/// Average reweighted by a per-subject weight map. Each item picks the first
/// map key matching its subject (case-insensitive, substring in either
/// direction); unmatched items keep a multiplier of 1. Returns `None` when
/// the map or the items are empty, or when every effective weight is zero.
pub fn criteria_weighted_average(notes: &[Note], poids_matieres: &BTreeMap<String, f64>) -> Option<f64> {
    if poids_matieres.is_empty() || notes.is_empty() {
        return None;
    }

    let mut total = 0.0;
    let mut coeffs = 0.0;

    for note in notes {
        let matiere_lower = note.matiere.to_lowercase();
        let mut poids = 1.0;

        for (matiere_critere, poids_critere) in poids_matieres {
            let critere_lower = matiere_critere.to_lowercase();
            if matiere_lower.contains(&critere_lower) || critere_lower.contains(&matiere_lower) {
                poids = *poids_critere;
                break;
            }
        }

        let coeff = note.coefficient * poids;
        total += note.note * coeff;
        coeffs += coeff;
    }

    if coeffs > 0.0 {
        Some(round2(total / coeffs))
    } else {
        None
    }
}
