use crate::workflows::deliberation::domain::Note;

use super::domain::SelectionCriteria;

/// Outcome of the structured criteria checks. The two flags mark the
/// eliminatory conditions so admissibility never re-parses the report
/// strings.
#[derive(Debug, Clone, Default)]
pub struct CriteriaReport {
    pub satisfaits: Vec<String>,
    pub non_satisfaits: Vec<String>,
    pub matiere_requise_absente: bool,
    pub plancher_non_atteint: bool,
}

/// Checks the dossier against the minimum average, the required-subject
/// list, and the per-subject floors. Subject lookup is case-insensitive
/// substring containment; a floor on a subject absent from the transcript
/// reports nothing.
pub fn verify_criteria(
    notes: &[Note],
    moyenne: f64,
    criteres: &SelectionCriteria,
) -> CriteriaReport {
    let mut report = CriteriaReport::default();

    if moyenne >= criteres.moyenne_minimum {
        report.satisfaits.push(format!(
            "Moyenne >= {} ({moyenne:.2})",
            criteres.moyenne_minimum
        ));
    } else {
        report.non_satisfaits.push(format!(
            "Moyenne < {} ({moyenne:.2})",
            criteres.moyenne_minimum
        ));
    }

    if let Some(matieres_requises) = &criteres.matieres_requises {
        let presentes: Vec<String> = notes.iter().map(|n| n.matiere.to_lowercase()).collect();
        for matiere_requise in matieres_requises {
            let requise_lower = matiere_requise.to_lowercase();
            if presentes.iter().any(|m| m.contains(&requise_lower)) {
                report
                    .satisfaits
                    .push(format!("Matière {matiere_requise} présente"));
            } else {
                report
                    .non_satisfaits
                    .push(format!("Matière {matiere_requise} absente"));
                report.matiere_requise_absente = true;
            }
        }
    }

    if let Some(planchers) = &criteres.note_minimum_matiere {
        for (matiere, note_min) in planchers {
            let matiere_lower = matiere.to_lowercase();
            let matching = notes
                .iter()
                .find(|n| n.matiere.to_lowercase().contains(&matiere_lower));
            if let Some(note) = matching {
                if note.note >= *note_min {
                    report
                        .satisfaits
                        .push(format!("{matiere} >= {note_min} ({})", note.note));
                } else {
                    report
                        .non_satisfaits
                        .push(format!("{matiere} < {note_min} ({})", note.note));
                    report.plancher_non_atteint = true;
                }
            }
        }
    }

    report
}

/// Admissibility gate: eliminatory flags short-circuit, then the reference
/// average must meet the minimum, then the synthesized score must reach 50.
pub fn is_admissible(
    report: &CriteriaReport,
    moyenne_reference: f64,
    score_global: f64,
    criteres: &SelectionCriteria,
) -> bool {
    if report.matiere_requise_absente || report.plancher_non_atteint {
        return false;
    }
    if moyenne_reference < criteres.moyenne_minimum {
        return false;
    }
    score_global >= 50.0
}

const FILIERE_SUBJECTS: [(&str, [&str; 4]); 6] = [
    ("informatique", ["math", "info", "physique", "algo"]),
    ("medecine", ["bio", "chimie", "physique", "svt"]),
    ("commerce", ["math", "eco", "anglais", "francais"]),
    ("ingenieur", ["math", "physique", "chimie", "info"]),
    ("droit", ["francais", "histoire", "philo", "anglais"]),
    ("sciences", ["math", "physique", "chimie", "bio"]),
];

const DEFAULT_SUBJECTS: [&str; 2] = ["math", "francais"];

/// Formation-fit score: base 50, adjusted per graded item matching a
/// subject the target track cares about, clipped to [0, 100]. Absent when
/// neither a target track nor a criteria text is supplied.
pub fn formation_fit(notes: &[Note], criteres: &SelectionCriteria) -> Option<f64> {
    if criteres.filiere_cible.is_none() && criteres.criteres_texte.is_none() {
        return None;
    }

    let mut score: f64 = 50.0;

    if let Some(filiere_cible) = &criteres.filiere_cible {
        let filiere_lower = filiere_cible.to_lowercase();
        let matieres_importantes: &[&str] = FILIERE_SUBJECTS
            .iter()
            .find(|(filiere_type, _)| filiere_lower.contains(filiere_type))
            .map(|(_, matieres)| matieres.as_slice())
            .unwrap_or(&DEFAULT_SUBJECTS);

        for note in notes {
            let matiere_lower = note.matiere.to_lowercase();
            if matieres_importantes
                .iter()
                .any(|important| matiere_lower.contains(important))
            {
                if note.note >= 14.0 {
                    score += 15.0;
                } else if note.note >= 12.0 {
                    score += 8.0;
                } else if note.note >= 10.0 {
                    score += 2.0;
                } else {
                    score -= 10.0;
                }
            }
        }
    }

    Some(score.clamp(0.0, 100.0))
}
