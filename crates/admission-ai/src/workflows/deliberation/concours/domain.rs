use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::deliberation::domain::{default_moyenne_minimum, Decision, Note};

/// A candidate sitting the concours, with the graded exam results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcoursCandidate {
    pub id: String,
    pub nom: String,
    pub prenom: String,
    pub notes: Vec<Note>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_naissance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etablissement_origine: Option<String>,
}

/// Deliberation thresholds and capacity for one concours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcoursCriteria {
    #[serde(default)]
    pub note_eliminatoire: Option<f64>,
    #[serde(default = "default_moyenne_minimum")]
    pub moyenne_minimum: f64,
    #[serde(default)]
    pub nombre_places: Option<usize>,
    #[serde(default)]
    pub criteres_specifiques: Option<String>,
    #[serde(default)]
    pub matieres_eliminatoires: Option<Vec<String>>,
}

impl Default for ConcoursCriteria {
    fn default() -> Self {
        Self {
            note_eliminatoire: None,
            moyenne_minimum: default_moyenne_minimum(),
            nombre_places: None,
            criteres_specifiques: None,
            matieres_eliminatoires: None,
        }
    }
}

/// One deliberation request covering a full batch of candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcoursRequest {
    pub candidats: Vec<ConcoursCandidate>,
    pub criteres: ConcoursCriteria,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concours_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concours_nom: Option<String>,
}

/// Per-candidate outcome after ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcoursCandidateResult {
    pub candidat_id: String,
    pub nom: String,
    pub prenom: String,
    pub moyenne: f64,
    pub rang: Option<u32>,
    pub decision: Decision,
    pub admis: bool,
    pub points_forts: Vec<String>,
    pub points_faibles: Vec<String>,
    pub explication: String,
    pub details_notes: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub erreurs: Vec<String>,
}

/// Batch response: the three decision lists stay sorted by rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcoursResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concours_id: Option<String>,
    pub total_candidats: usize,
    pub nombre_admis: usize,
    pub nombre_refuses: usize,
    pub nombre_liste_attente: usize,
    pub liste_admis: Vec<ConcoursCandidateResult>,
    pub liste_attente: Vec<ConcoursCandidateResult>,
    pub liste_refuses: Vec<ConcoursCandidateResult>,
    pub moyenne_generale: f64,
    pub moyenne_admis: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_dernier_admis: Option<f64>,
    pub timestamp: DateTime<Utc>,
    pub criteres_appliques: ConcoursCriteria,
}

/// Quick note entry accepts either a structured note list or a bare
/// subject-to-score map. The variant is resolved once here, at the
/// boundary, so the engine only ever sees [`Note`] values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotesInput {
    Structurees(Vec<Note>),
    ParMatiere(BTreeMap<String, f64>),
}

impl NotesInput {
    pub fn into_notes(self) -> Vec<Note> {
        match self {
            NotesInput::Structurees(notes) => notes,
            NotesInput::ParMatiere(map) => map
                .into_iter()
                .map(|(matiere, note)| Note {
                    matiere,
                    note,
                    coefficient: 1.0,
                    annee: None,
                    semestre: None,
                })
                .collect(),
        }
    }
}

/// Candidate payload accepted by the quick note-entry endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickEntryCandidate {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prenom: String,
    pub notes: NotesInput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criteria_default_minimum_is_ten() {
        let criteres: ConcoursCriteria = serde_json::from_str("{}").expect("parses");
        assert_eq!(criteres.moyenne_minimum, 10.0);
        assert!(criteres.note_eliminatoire.is_none());
        assert!(criteres.nombre_places.is_none());
    }

    #[test]
    fn quick_entry_resolves_subject_map_to_unit_coefficients() {
        let payload = r#"{"id": "C001", "nom": "Rakoto", "prenom": "Jean",
                          "notes": {"Mathématiques": 15.0, "Physique": 12.0}}"#;
        let candidate: QuickEntryCandidate = serde_json::from_str(payload).expect("parses");
        let notes = candidate.notes.into_notes();
        assert_eq!(notes.len(), 2);
        assert!(notes.iter().all(|n| n.coefficient == 1.0));
    }

    #[test]
    fn quick_entry_keeps_structured_notes_untouched() {
        let payload = r#"{"id": "C002", "nom": "Rabe", "prenom": "Noro",
                          "notes": [{"matiere": "Physique", "note": 13.0, "coefficient": 3.0}]}"#;
        let candidate: QuickEntryCandidate = serde_json::from_str(payload).expect("parses");
        let notes = candidate.notes.into_notes();
        assert_eq!(notes[0].coefficient, 3.0);
    }
}
