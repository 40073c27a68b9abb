use serde::{Deserialize, Serialize};

/// One graded subject on a candidate's record. Scores are on a 0-20 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub matiere: String,
    pub note: f64,
    #[serde(default = "default_coefficient")]
    pub coefficient: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semestre: Option<String>,
}

fn default_coefficient() -> f64 {
    1.0
}

pub fn default_moyenne_minimum() -> f64 {
    10.0
}

/// Final decision for one candidate in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Admis,
    Refuse,
    ListeAttente,
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::Admis => "admis",
            Decision::Refuse => "refuse",
            Decision::ListeAttente => "liste_attente",
        }
    }
}

/// Honors distinction band, resolved by case-insensitive substring match
/// against the declared mention. The table is ordered; the first matching
/// entry wins, so "Assez Bien" resolves to [`MentionBand::Bien`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionBand {
    TresBien,
    Bien,
    AssezBien,
    Passable,
}

impl MentionBand {
    const TABLE: [(&'static str, MentionBand); 4] = [
        ("très bien", MentionBand::TresBien),
        ("bien", MentionBand::Bien),
        ("assez bien", MentionBand::AssezBien),
        ("passable", MentionBand::Passable),
    ];

    pub fn from_text(mention: &str) -> Option<Self> {
        let lower = mention.to_lowercase();
        Self::TABLE
            .iter()
            .find(|(needle, _)| lower.contains(needle))
            .map(|(_, band)| *band)
    }

    pub fn bonus(&self) -> f64 {
        match self {
            MentionBand::TresBien => 10.0,
            MentionBand::Bien => 7.0,
            MentionBand::AssezBien => 4.0,
            MentionBand::Passable => 0.0,
        }
    }

    /// Strength label surfaced in profile analysis, only for the two
    /// highest bands.
    pub fn strength_label(&self) -> Option<&'static str> {
        match self {
            MentionBand::TresBien => Some("Mention Très Bien"),
            MentionBand::Bien => Some("Mention Bien"),
            MentionBand::AssezBien | MentionBand::Passable => None,
        }
    }
}

/// Per-candidate validation failure. Reported on the offending candidate's
/// result; never aborts the rest of the batch.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("note hors barème en {matiere}: {note} (attendu entre 0 et 20)")]
    ScoreOutOfRange { matiere: String, note: f64 },
    #[error("coefficient négatif en {matiere}: {coefficient}")]
    NegativeCoefficient { matiere: String, coefficient: f64 },
    #[error("champ obligatoire manquant: {0}")]
    MissingField(&'static str),
}

/// Validates one candidate's identity and graded items. Every violation is
/// collected so the caller can report them all at once.
pub fn validate_candidate(id: &str, notes: &[Note]) -> Vec<EvaluationError> {
    let mut errors = Vec::new();

    if id.trim().is_empty() {
        errors.push(EvaluationError::MissingField("id"));
    }

    for note in notes {
        if !(0.0..=20.0).contains(&note.note) {
            errors.push(EvaluationError::ScoreOutOfRange {
                matiere: note.matiere.clone(),
                note: note.note,
            });
        }
        if note.coefficient < 0.0 {
            errors.push(EvaluationError::NegativeCoefficient {
                matiere: note.matiere.clone(),
                coefficient: note.coefficient,
            });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(matiere: &str, note: f64, coefficient: f64) -> Note {
        Note {
            matiere: matiere.to_string(),
            note,
            coefficient,
            annee: None,
            semestre: None,
        }
    }

    #[test]
    fn coefficient_defaults_to_one() {
        let parsed: Note =
            serde_json::from_str(r#"{"matiere": "Mathématiques", "note": 15.0}"#).expect("parses");
        assert_eq!(parsed.coefficient, 1.0);
    }

    #[test]
    fn mention_table_is_ordered_first_match_wins() {
        assert_eq!(
            MentionBand::from_text("Mention Très Bien"),
            Some(MentionBand::TresBien)
        );
        // "assez bien" contains "bien", and "bien" sits earlier in the table.
        assert_eq!(MentionBand::from_text("Assez Bien"), Some(MentionBand::Bien));
        assert_eq!(MentionBand::from_text("Passable"), Some(MentionBand::Passable));
        assert_eq!(MentionBand::from_text("sans mention"), None);
    }

    #[test]
    fn validation_collects_all_violations() {
        let errors = validate_candidate(
            "  ",
            &[note("Maths", 25.0, 2.0), note("Physique", 12.0, -1.0)],
        );
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&EvaluationError::MissingField("id")));
    }

    #[test]
    fn validation_accepts_boundary_scores() {
        let errors = validate_candidate("c-1", &[note("Maths", 0.0, 0.0), note("Chimie", 20.0, 4.0)]);
        assert!(errors.is_empty());
    }
}
