use std::fmt;

use crate::workflows::deliberation::domain::Note;

use super::domain::ConcoursCriteria;

/// Why a candidate was hard-disqualified. Reported subject and score come
/// from the first below-floor item in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct EliminationReason {
    pub matiere: String,
    pub note: f64,
    pub seuil: f64,
}

impl fmt::Display for EliminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Note éliminatoire en {}: {}/20 (seuil: {})",
            self.matiere, self.note, self.seuil
        )
    }
}

/// Scans the graded items against the configured floor. When an
/// eliminatory-subject set is present only those subjects can disqualify;
/// membership is exact string equality. Without the set, every subject is
/// eliminatory.
pub fn check_elimination(notes: &[Note], criteres: &ConcoursCriteria) -> Option<EliminationReason> {
    let seuil = criteres.note_eliminatoire?;

    for note in notes {
        if note.note >= seuil {
            continue;
        }

        let applies = match &criteres.matieres_eliminatoires {
            Some(matieres) => matieres.contains(&note.matiere),
            None => true,
        };

        if applies {
            return Some(EliminationReason {
                matiere: note.matiere.clone(),
                note: note.note,
                seuil,
            });
        }
    }

    None
}
