use super::domain::SelectionCriteria;

/// Narrative profile reading for one dossier, assembled from the computed
/// average band and the top strength/weakness.
pub fn profile_summary(
    prenom: &str,
    nom: &str,
    moyenne: f64,
    points_forts: &[String],
    points_faibles: &[String],
    criteres: &SelectionCriteria,
) -> String {
    let mut parties = vec![format!(
        "Le dossier de {prenom} {nom} présente une moyenne de {moyenne:.2}/20."
    )];

    if moyenne >= 14.0 {
        parties.push("C'est un excellent dossier académique.".to_string());
    } else if moyenne >= 12.0 {
        parties.push("Le dossier montre un bon niveau académique.".to_string());
    } else if moyenne >= 10.0 {
        parties.push("Le niveau académique est correct mais pourrait être amélioré.".to_string());
    } else {
        parties.push("Le niveau académique est insuffisant pour cette formation.".to_string());
    }

    if let Some(fort) = points_forts.first() {
        parties.push(format!("Points forts identifiés: {}.", fort.to_lowercase()));
    }

    if let Some(faible) = points_faibles.first() {
        parties.push(format!("Points d'attention: {}.", faible.to_lowercase()));
    }

    if let Some(texte) = &criteres.criteres_texte {
        let extrait: String = texte.chars().take(100).collect();
        parties.push(format!("Évaluation basée sur les critères: '{extrait}...'"));
    }

    parties.join(" ")
}

/// Final recommendation line, banded on the synthesized score for
/// admissible dossiers and citing the first unmet criteria otherwise.
pub fn recommendation(admissible: bool, score: f64, criteres_non_satisfaits: &[String]) -> String {
    if admissible {
        if score >= 80.0 {
            "Dossier fortement recommandé pour admission. Profil excellent correspondant aux attentes."
                .to_string()
        } else if score >= 65.0 {
            "Dossier recommandé pour admission. Bon profil avec quelques axes d'amélioration possibles."
                .to_string()
        } else {
            "Dossier recevable. Admission possible sous réserve des autres candidatures.".to_string()
        }
    } else {
        let raisons = if criteres_non_satisfaits.is_empty() {
            "score insuffisant".to_string()
        } else {
            criteres_non_satisfaits
                .iter()
                .take(2)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };
        format!("Dossier non retenu: {raisons}. Nous encourageons le candidat à renforcer son profil.")
    }
}
