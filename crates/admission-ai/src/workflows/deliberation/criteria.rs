use super::domain::Note;

/// Canonical vocabulary the free-text criteria interpreter resolves to.
/// Subject tags drive scoring adjustments; quality tags only document what
/// a criteria text asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalTag {
    Mathematiques,
    Physique,
    Informatique,
    Francais,
    Anglais,
    Chimie,
    Biologie,
    Economie,
    Rigueur,
    Creativite,
    Logique,
    Autonomie,
    TravailEquipe,
}

impl CanonicalTag {
    pub fn label(&self) -> &'static str {
        match self {
            CanonicalTag::Mathematiques => "mathematiques",
            CanonicalTag::Physique => "physique",
            CanonicalTag::Informatique => "informatique",
            CanonicalTag::Francais => "francais",
            CanonicalTag::Anglais => "anglais",
            CanonicalTag::Chimie => "chimie",
            CanonicalTag::Biologie => "biologie",
            CanonicalTag::Economie => "economie",
            CanonicalTag::Rigueur => "rigueur",
            CanonicalTag::Creativite => "creativite",
            CanonicalTag::Logique => "logique",
            CanonicalTag::Autonomie => "autonomie",
            CanonicalTag::TravailEquipe => "travail_equipe",
        }
    }

    pub fn is_subject(&self) -> bool {
        matches!(
            self,
            CanonicalTag::Mathematiques
                | CanonicalTag::Physique
                | CanonicalTag::Informatique
                | CanonicalTag::Francais
                | CanonicalTag::Anglais
                | CanonicalTag::Chimie
                | CanonicalTag::Biologie
                | CanonicalTag::Economie
        )
    }
}

/// Tag to synonym-list mapping. Matching is plain case-insensitive substring
/// containment, in declaration order, so the behavior stays deterministic
/// and the table stays swappable in tests.
#[derive(Debug, Clone)]
pub struct SynonymTable {
    entries: Vec<(CanonicalTag, Vec<&'static str>)>,
}

impl SynonymTable {
    pub fn new(entries: Vec<(CanonicalTag, Vec<&'static str>)>) -> Self {
        Self { entries }
    }

    pub fn subjects(&self) -> impl Iterator<Item = (CanonicalTag, &[&'static str])> {
        self.entries
            .iter()
            .filter(|(tag, _)| tag.is_subject())
            .map(|(tag, synonyms)| (*tag, synonyms.as_slice()))
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::new(vec![
            (
                CanonicalTag::Mathematiques,
                vec![
                    "math",
                    "maths",
                    "mathématique",
                    "mathématiques",
                    "algebre",
                    "analyse",
                    "geometrie",
                ],
            ),
            (
                CanonicalTag::Physique,
                vec!["physique", "phys", "mecanique", "optique", "electricite"],
            ),
            (
                CanonicalTag::Informatique,
                vec!["informatique", "info", "programmation", "algorithme", "code", "dev"],
            ),
            (
                CanonicalTag::Francais,
                vec!["francais", "français", "litterature", "expression", "redaction"],
            ),
            (CanonicalTag::Anglais, vec!["anglais", "english", "langue"]),
            (CanonicalTag::Chimie, vec!["chimie", "chim"]),
            (CanonicalTag::Biologie, vec!["biologie", "bio", "svt"]),
            (
                CanonicalTag::Economie,
                vec!["economie", "eco", "gestion", "comptabilite"],
            ),
            (
                CanonicalTag::Rigueur,
                vec!["rigueur", "rigoureux", "précision", "précis", "méthodique"],
            ),
            (
                CanonicalTag::Creativite,
                vec!["créativité", "créatif", "innovation", "innovant", "original"],
            ),
            (
                CanonicalTag::Logique,
                vec!["logique", "raisonnement", "analytique", "analyse"],
            ),
            (
                CanonicalTag::Autonomie,
                vec!["autonomie", "autonome", "indépendant"],
            ),
            (
                CanonicalTag::TravailEquipe,
                vec!["équipe", "collaboration", "collaboratif", "groupe"],
            ),
        ])
    }
}

/// Deterministic keyword reading of free-text admission criteria. Substring
/// matching can over-trigger on embedded words; that looseness is part of
/// the contract and downstream wording depends on it.
#[derive(Debug, Clone, Default)]
pub struct CriteriaInterpreter {
    table: SynonymTable,
}

impl CriteriaInterpreter {
    pub fn new(table: SynonymTable) -> Self {
        Self { table }
    }

    /// Subject tags whose synonym list hits the criteria text.
    pub fn emphasized_subjects(&self, criteres_texte: &str) -> Vec<CanonicalTag> {
        let lower = criteres_texte.to_lowercase();
        self.table
            .subjects()
            .filter(|(_, synonyms)| synonyms.iter().any(|synonym| lower.contains(synonym)))
            .map(|(tag, _)| tag)
            .collect()
    }

    /// Adequacy adjustment for the dossier score. Each emphasized subject
    /// contributes once, from the first graded item matching its synonym
    /// list, then the total is clipped to [-10, 10].
    pub fn adequacy_bonus(&self, notes: &[Note], criteres_texte: &str) -> f64 {
        let lower = criteres_texte.to_lowercase();
        let mut bonus: f64 = 0.0;

        for (_, synonyms) in self.table.subjects() {
            if !synonyms.iter().any(|synonym| lower.contains(synonym)) {
                continue;
            }

            let matching = notes.iter().find(|note| {
                let matiere_lower = note.matiere.to_lowercase();
                synonyms.iter().any(|synonym| matiere_lower.contains(synonym))
            });

            if let Some(note) = matching {
                if note.note >= 14.0 {
                    bonus += 3.0;
                } else if note.note >= 12.0 {
                    bonus += 1.0;
                } else if note.note < 8.0 {
                    bonus -= 2.0;
                }
            }
        }

        bonus.clamp(-10.0, 10.0)
    }

    /// Dossier-path observations: one strength or weakness per emphasized
    /// subject, labelled with the canonical tag.
    pub fn profile_observations(
        &self,
        notes: &[Note],
        criteres_texte: &str,
    ) -> (Vec<String>, Vec<String>) {
        let lower = criteres_texte.to_lowercase();
        let mut forts = Vec::new();
        let mut faibles = Vec::new();

        for (tag, synonyms) in self.table.subjects() {
            if !synonyms.iter().any(|synonym| lower.contains(synonym)) {
                continue;
            }

            let matching = notes.iter().find(|note| {
                let matiere_lower = note.matiere.to_lowercase();
                synonyms.iter().any(|synonym| matiere_lower.contains(synonym))
            });

            if let Some(note) = matching {
                if note.note >= 12.0 {
                    forts.push(format!(
                        "Bon profil pour le critère '{}' demandé",
                        tag.label()
                    ));
                } else if note.note < 10.0 {
                    faibles.push(format!("Profil à améliorer pour '{}' demandé", tag.label()));
                }
            }
        }

        (forts, faibles)
    }

    /// Concours-path observations against a criteria text that names
    /// priority subjects. Every graded item mentioned in the text (or whose
    /// subject carries a core-discipline keyword) is checked when the text
    /// expresses a priority.
    pub fn priority_observations(
        &self,
        notes: &[Note],
        criteres_texte: &str,
    ) -> (Vec<String>, Vec<String>) {
        const CORE_KEYWORDS: [&str; 4] = ["math", "physique", "info", "français"];
        const PRIORITY_MARKERS: [&str; 3] = ["priorité", "important", "requis"];

        let lower = criteres_texte.to_lowercase();
        let mut forts = Vec::new();
        let mut faibles = Vec::new();

        let has_priority = PRIORITY_MARKERS.iter().any(|marker| lower.contains(marker));

        for note in notes {
            let matiere_lower = note.matiere.to_lowercase();
            let mentioned = lower.contains(&matiere_lower)
                || CORE_KEYWORDS
                    .iter()
                    .any(|keyword| matiere_lower.contains(keyword));

            if mentioned && has_priority {
                if note.note >= 12.0 {
                    forts.push(format!("Répond au critère prioritaire en {}", note.matiere));
                } else if note.note < 10.0 {
                    faibles.push(format!(
                        "Ne répond pas au critère prioritaire en {}",
                        note.matiere
                    ));
                }
            }
        }

        (forts, faibles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(matiere: &str, value: f64) -> Note {
        Note {
            matiere: matiere.to_string(),
            note: value,
            coefficient: 1.0,
            annee: None,
            semestre: None,
        }
    }

    #[test]
    fn emphasized_subjects_follow_the_synonym_table() {
        let interpreter = CriteriaInterpreter::default();
        let tags = interpreter
            .emphasized_subjects("Bonne maîtrise des mathématiques et de l'informatique");
        assert_eq!(
            tags,
            vec![CanonicalTag::Mathematiques, CanonicalTag::Informatique]
        );
    }

    #[test]
    fn adequacy_bonus_scores_first_matching_item_per_tag() {
        let interpreter = CriteriaInterpreter::default();
        let notes = vec![note("Mathématiques", 14.0), note("Informatique", 16.0), note("Physique", 12.0)];
        let bonus = interpreter
            .adequacy_bonus(&notes, "Bonne maîtrise des mathématiques et de l'informatique");
        assert_eq!(bonus, 6.0);
    }

    #[test]
    fn adequacy_bonus_is_clipped() {
        let interpreter = CriteriaInterpreter::default();
        let notes = vec![
            note("Mathématiques", 5.0),
            note("Physique", 4.0),
            note("Informatique", 3.0),
            note("Français", 2.0),
            note("Anglais", 6.0),
            note("Chimie", 5.0),
            note("Biologie", 1.0),
            note("Economie", 0.0),
        ];
        let text = "math physique informatique français anglais chimie biologie economie";
        assert_eq!(interpreter.adequacy_bonus(&notes, text), -10.0);
    }

    #[test]
    fn substring_matching_over_triggers_by_contract() {
        let interpreter = CriteriaInterpreter::default();
        // "langue" sits inside "langueur", still counts for anglais.
        let tags = interpreter.emphasized_subjects("une certaine langueur");
        assert_eq!(tags, vec![CanonicalTag::Anglais]);
    }

    #[test]
    fn priority_observations_require_a_priority_marker() {
        let interpreter = CriteriaInterpreter::default();
        let notes = vec![note("Mathématiques", 15.0), note("Histoire", 7.0)];

        let (forts, faibles) =
            interpreter.priority_observations(&notes, "Niveau en mathématiques requis");
        assert_eq!(forts, vec!["Répond au critère prioritaire en Mathématiques"]);
        assert!(faibles.is_empty());

        let (forts, faibles) = interpreter.priority_observations(&notes, "Mathématiques souhaitées");
        assert!(forts.is_empty());
        assert!(faibles.is_empty());
    }
}
