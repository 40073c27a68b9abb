use super::domain::ConcoursCriteria;
use super::elimination::EliminationReason;

/// Assembles the deliberation explanation from the already-computed
/// evaluation facts. Rank clauses are appended later, during capacity
/// allocation, not generated here.
pub fn build_explanation(
    prenom: &str,
    nom: &str,
    moyenne: f64,
    points_forts: &[String],
    points_faibles: &[String],
    elimination: Option<&EliminationReason>,
    criteres: &ConcoursCriteria,
) -> String {
    let nom_complet = format!("{prenom} {nom}");

    if let Some(reason) = elimination {
        return format!("{nom_complet} est éliminé(e). {reason}.");
    }

    let mut parts = vec![format!("{nom_complet} obtient une moyenne de {moyenne}/20.")];

    if moyenne >= criteres.moyenne_minimum {
        if moyenne >= 16.0 {
            parts.push("Excellent dossier, très au-dessus du seuil d'admission.".to_string());
        } else if moyenne >= 14.0 {
            parts.push("Très bon dossier, confortablement au-dessus du seuil.".to_string());
        } else if moyenne >= 12.0 {
            parts.push("Bon dossier, au-dessus du seuil d'admission.".to_string());
        } else {
            parts.push("Dossier recevable, au-dessus du seuil minimum.".to_string());
        }
    } else {
        let deficit = criteres.moyenne_minimum - moyenne;
        parts.push(format!(
            "Moyenne insuffisante, {deficit:.1} points sous le seuil requis de {}.",
            criteres.moyenne_minimum
        ));
    }

    if let Some(fort) = points_forts.first() {
        parts.push(format!("Points forts: {}.", fort.to_lowercase()));
    }

    if let Some(faible) = points_faibles.first() {
        parts.push(format!("Point d'attention: {}.", faible.to_lowercase()));
    }

    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elimination_short_circuits_everything_else() {
        let reason = EliminationReason {
            matiere: "Chimie".to_string(),
            note: 3.0,
            seuil: 5.0,
        };
        let text = build_explanation(
            "Jean",
            "Rakoto",
            14.0,
            &["Très bon niveau général (moyenne: 14/20)".to_string()],
            &[],
            Some(&reason),
            &ConcoursCriteria::default(),
        );
        assert_eq!(
            text,
            "Jean Rakoto est éliminé(e). Note éliminatoire en Chimie: 3/20 (seuil: 5)."
        );
    }

    #[test]
    fn above_threshold_band_and_top_strength_are_cited() {
        let text = build_explanation(
            "Jean",
            "Rakoto",
            14.0,
            &["Très bon niveau général (moyenne: 14/20)".to_string()],
            &["Niveau insuffisant en Chimie (9/20)".to_string()],
            None,
            &ConcoursCriteria::default(),
        );
        assert_eq!(
            text,
            "Jean Rakoto obtient une moyenne de 14/20. \
             Très bon dossier, confortablement au-dessus du seuil. \
             Points forts: très bon niveau général (moyenne: 14/20). \
             Point d'attention: niveau insuffisant en chimie (9/20)."
        );
    }

    #[test]
    fn below_threshold_reports_the_deficit_to_one_decimal() {
        let text = build_explanation(
            "Noro",
            "Rabe",
            8.25,
            &[],
            &[],
            None,
            &ConcoursCriteria::default(),
        );
        assert_eq!(
            text,
            "Noro Rabe obtient une moyenne de 8.25/20. \
             Moyenne insuffisante, 1.8 points sous le seuil requis de 10."
        );
    }
}
