use super::domain::{MentionBand, Note};

/// Ordered strengths and weaknesses derived from a candidate's record.
/// Both lists are capped at five entries, most salient first.
#[derive(Debug, Clone, Default)]
pub struct ProfileAnalysis {
    pub points_forts: Vec<String>,
    pub points_faibles: Vec<String>,
}

impl ProfileAnalysis {
    pub const MAX_ENTRIES: usize = 5;

    pub fn cap(&mut self) {
        self.points_forts.truncate(Self::MAX_ENTRIES);
        self.points_faibles.truncate(Self::MAX_ENTRIES);
    }
}

/// Bands each graded item, then prepends the overall-average reading, then
/// prepends the honors distinction when one is declared. Assembly order is
/// deterministic; truncation happens later, once interpreter observations
/// have been appended.
pub fn analyze_profile(notes: &[Note], moyenne: f64, mention: Option<&str>) -> ProfileAnalysis {
    let mut analysis = ProfileAnalysis::default();

    for note in notes {
        if note.note >= 14.0 {
            analysis.points_forts.push(format!(
                "Excellente performance en {} ({}/20)",
                note.matiere, note.note
            ));
        } else if note.note >= 12.0 {
            analysis.points_forts.push(format!(
                "Bonne maîtrise de {} ({}/20)",
                note.matiere, note.note
            ));
        } else if note.note < 8.0 {
            analysis
                .points_faibles
                .push(format!("Difficultés en {} ({}/20)", note.matiere, note.note));
        } else if note.note < 10.0 {
            analysis.points_faibles.push(format!(
                "Niveau insuffisant en {} ({}/20)",
                note.matiere, note.note
            ));
        }
    }

    if moyenne >= 16.0 {
        analysis
            .points_forts
            .insert(0, format!("Excellent niveau général (moyenne: {moyenne}/20)"));
    } else if moyenne >= 14.0 {
        analysis
            .points_forts
            .insert(0, format!("Très bon niveau général (moyenne: {moyenne}/20)"));
    } else if moyenne >= 12.0 {
        analysis
            .points_forts
            .insert(0, format!("Bon niveau général (moyenne: {moyenne}/20)"));
    } else if moyenne < 10.0 {
        analysis
            .points_faibles
            .insert(0, format!("Moyenne insuffisante ({moyenne}/20)"));
    }

    if let Some(label) = mention
        .and_then(MentionBand::from_text)
        .and_then(|band| band.strength_label())
    {
        analysis.points_forts.insert(0, label.to_string());
    }

    analysis
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
    fn bands_every_item_and_prepends_the_average() {
        let notes = vec![
            note("Mathématiques", 15.0),
            note("Physique", 12.5),
            note("Histoire", 11.0),
            note("Chimie", 9.0),
            note("Sport", 6.0),
        ];
        let analysis = analyze_profile(&notes, 12.0, None);

        assert_eq!(
            analysis.points_forts,
            vec![
                "Bon niveau général (moyenne: 12/20)",
                "Excellente performance en Mathématiques (15/20)",
                "Bonne maîtrise de Physique (12.5/20)",
            ]
        );
        assert_eq!(
            analysis.points_faibles,
            vec![
                "Niveau insuffisant en Chimie (9/20)",
                "Difficultés en Sport (6/20)",
            ]
        );
    }

    #[test]
    fn mention_lands_ahead_of_grade_derived_entries() {
        let notes = vec![note("Mathématiques", 15.0)];
        let analysis = analyze_profile(&notes, 15.0, Some("Mention Très Bien"));
        assert_eq!(analysis.points_forts[0], "Mention Très Bien");
        assert_eq!(
            analysis.points_forts[1],
            "Très bon niveau général (moyenne: 15/20)"
        );
    }

    #[test]
    fn lower_mentions_add_no_strength() {
        let analysis = analyze_profile(&[], 11.0, Some("Passable"));
        assert!(analysis.points_forts.is_empty());
    }

    #[test]
    fn weak_average_lands_first_among_weaknesses() {
        let notes = vec![note("Chimie", 7.0)];
        let analysis = analyze_profile(&notes, 7.0, None);
        assert_eq!(
            analysis.points_faibles,
            vec!["Moyenne insuffisante (7/20)", "Difficultés en Chimie (7/20)"]
        );
    }
}
