use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::workflows::deliberation::audit::{AuditEvent, AuditSink, PipelineKind};
use crate::workflows::deliberation::criteria::CriteriaInterpreter;
use crate::workflows::deliberation::domain::{validate_candidate, Decision};
use crate::workflows::deliberation::profile::analyze_profile;
use crate::workflows::deliberation::scoring::{
    criteria_weighted_average, round1, round2, weighted_average,
};

use super::admissibility::{formation_fit, is_admissible, verify_criteria};
use super::domain::{
    DossierAnalysis, DossierCandidate, SelectionCriteria, SelectionRequest, SelectionResponse,
};
use super::recommendation::{profile_summary, recommendation};
use super::synthesis::score_global;

/// Orchestrates one dossier selection batch: per-dossier analysis, score
/// ordering, capacity downgrade, statistics, and audit emission.
pub struct DossierSelectionService<S> {
    interpreter: CriteriaInterpreter,
    audit: Arc<S>,
}

impl<S> DossierSelectionService<S>
where
    S: AuditSink + 'static,
{
    pub fn new(audit: Arc<S>) -> Self {
        Self::with_interpreter(CriteriaInterpreter::default(), audit)
    }

    pub fn with_interpreter(interpreter: CriteriaInterpreter, audit: Arc<S>) -> Self {
        Self { interpreter, audit }
    }

    /// Analyses the full batch. Individual dossier failures degrade into
    /// refused analyses with an error list; the batch always completes.
    pub fn analyze(&self, request: &SelectionRequest) -> SelectionResponse {
        info!(
            dossiers = request.dossiers.len(),
            formation_id = request.formation_id.as_deref().unwrap_or("-"),
            "début analyse dossiers"
        );

        let analyses: Vec<DossierAnalysis> = request
            .dossiers
            .iter()
            .map(|dossier| self.analyze_dossier(dossier, &request.criteres))
            .collect();

        let mut indexed: Vec<(usize, DossierAnalysis)> = analyses.into_iter().enumerate().collect();
        indexed.sort_by(|(left_idx, left), (right_idx, right)| {
            right
                .score_global
                .total_cmp(&left.score_global)
                .then(left_idx.cmp(right_idx))
        });
        let mut sorted: Vec<DossierAnalysis> =
            indexed.into_iter().map(|(_, analysis)| analysis).collect();

        if let Some(places) = request.criteres.nombre_places {
            apply_seat_limit(&mut sorted, places);
        }

        let dossiers_admissibles: Vec<DossierAnalysis> =
            sorted.iter().filter(|a| a.admissible).cloned().collect();
        let dossiers_non_admissibles: Vec<DossierAnalysis> =
            sorted.iter().filter(|a| !a.admissible).cloned().collect();

        let moyenne_generale_candidats = if sorted.is_empty() {
            0.0
        } else {
            round2(sorted.iter().map(|a| a.moyenne_calculee).sum::<f64>() / sorted.len() as f64)
        };
        let score_moyen = if sorted.is_empty() {
            0.0
        } else {
            round2(sorted.iter().map(|a| a.score_global).sum::<f64>() / sorted.len() as f64)
        };

        let response = SelectionResponse {
            formation_id: request.formation_id.clone(),
            total_dossiers: sorted.len(),
            nombre_admissibles: dossiers_admissibles.len(),
            nombre_non_admissibles: dossiers_non_admissibles.len(),
            dossiers_admissibles,
            dossiers_non_admissibles,
            moyenne_generale_candidats,
            score_moyen,
            timestamp: Utc::now(),
            criteres_appliques: request.criteres.clone(),
        };

        let event = AuditEvent {
            pipeline: PipelineKind::Selection,
            batch_id: request.formation_id.clone(),
            total: response.total_dossiers,
            retenus: response.nombre_admissibles,
            timestamp: response.timestamp,
        };
        if let Err(error) = self.audit.record(event) {
            warn!(%error, "échec d'enregistrement de l'événement d'audit");
        }

        info!(
            admissibles = response.nombre_admissibles,
            total = response.total_dossiers,
            "analyse terminée"
        );

        response
    }

    fn analyze_dossier(
        &self,
        dossier: &DossierCandidate,
        criteres: &SelectionCriteria,
    ) -> DossierAnalysis {
        let violations = validate_candidate(&dossier.id, &dossier.notes);
        if !violations.is_empty() {
            let erreurs: Vec<String> = violations.iter().map(ToString::to_string).collect();
            warn!(
                candidat_id = %dossier.id,
                erreurs = erreurs.len(),
                "dossier invalide, résultat dégradé"
            );
            return DossierAnalysis {
                candidat_id: dossier.id.clone(),
                nom: dossier.nom.clone(),
                prenom: dossier.prenom.clone(),
                admissible: false,
                decision: Decision::Refuse,
                score_global: 0.0,
                moyenne_calculee: 0.0,
                moyenne_ponderee: None,
                analyse_profil: format!(
                    "Le dossier de {} {} n'a pas pu être analysé: {}.",
                    dossier.prenom,
                    dossier.nom,
                    erreurs.join("; ")
                ),
                points_forts: Vec::new(),
                points_faibles: Vec::new(),
                recommandation:
                    "Dossier non évalué: données invalides. Corrigez le relevé puis soumettez à nouveau."
                        .to_string(),
                adequation_formation: None,
                criteres_satisfaits: Vec::new(),
                criteres_non_satisfaits: Vec::new(),
                erreurs,
            };
        }

        let moyenne_simple = dossier
            .moyenne_generale
            .unwrap_or_else(|| weighted_average(&dossier.notes));
        let moyenne_ponderee = criteres
            .poids_matieres
            .as_ref()
            .and_then(|poids| criteria_weighted_average(&dossier.notes, poids));

        let adequacy_bonus = criteres
            .criteres_texte
            .as_deref()
            .map(|texte| self.interpreter.adequacy_bonus(&dossier.notes, texte))
            .unwrap_or(0.0);

        let score = score_global(
            moyenne_simple,
            moyenne_ponderee,
            dossier.mention.as_deref(),
            adequacy_bonus,
        );

        let report = verify_criteria(&dossier.notes, moyenne_simple, criteres);

        let mut profile = analyze_profile(&dossier.notes, moyenne_simple, dossier.mention.as_deref());
        if let Some(texte) = criteres.criteres_texte.as_deref() {
            let (forts, faibles) = self.interpreter.profile_observations(&dossier.notes, texte);
            profile.points_forts.extend(forts);
            profile.points_faibles.extend(faibles);
        }
        profile.cap();

        let moyenne_reference = moyenne_ponderee.unwrap_or(moyenne_simple);
        let admissible = is_admissible(&report, moyenne_reference, score, criteres);

        let analyse_profil = profile_summary(
            &dossier.prenom,
            &dossier.nom,
            moyenne_simple,
            &profile.points_forts,
            &profile.points_faibles,
            criteres,
        );
        let recommandation = recommendation(admissible, score, &report.non_satisfaits);

        DossierAnalysis {
            candidat_id: dossier.id.clone(),
            nom: dossier.nom.clone(),
            prenom: dossier.prenom.clone(),
            admissible,
            decision: if admissible {
                Decision::Admis
            } else {
                Decision::Refuse
            },
            score_global: round1(score),
            moyenne_calculee: round2(moyenne_simple),
            moyenne_ponderee,
            analyse_profil,
            points_forts: profile.points_forts,
            points_faibles: profile.points_faibles,
            recommandation,
            adequation_formation: formation_fit(&dossier.notes, criteres).map(round1),
            criteres_satisfaits: report.satisfaits,
            criteres_non_satisfaits: report.non_satisfaits,
            erreurs: Vec::new(),
        }
    }
}

/// Seat limit over the score-ordered batch: admissible dossiers beyond the
/// capacity are downgraded to the waitlist. The downgrade is one-way; a
/// dossier never becomes admissible because an earlier one was excluded.
fn apply_seat_limit(analyses: &mut [DossierAnalysis], nombre_places: usize) {
    let mut admis_count = 0usize;
    for analyse in analyses.iter_mut() {
        if !analyse.admissible {
            continue;
        }
        if admis_count < nombre_places {
            admis_count += 1;
        } else {
            analyse.admissible = false;
            analyse.decision = Decision::ListeAttente;
            analyse
                .recommandation
                .push_str(" (Placé en liste d'attente, limite de places atteinte)");
        }
    }
}
