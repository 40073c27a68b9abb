use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::workflows::deliberation::audit::{AuditEvent, AuditSink, PipelineKind};
use crate::workflows::deliberation::criteria::CriteriaInterpreter;
use crate::workflows::deliberation::domain::{validate_candidate, Decision};
use crate::workflows::deliberation::profile::analyze_profile;
use crate::workflows::deliberation::scoring::{round2, weighted_average};

use super::domain::{
    ConcoursCandidate, ConcoursCandidateResult, ConcoursCriteria, ConcoursRequest, ConcoursResponse,
};
use super::elimination::check_elimination;
use super::explanation::build_explanation;
use super::ranking::{apply_capacity, rank_candidates, EvaluatedCandidate};

/// Orchestrates one concours deliberation batch: per-candidate evaluation,
/// ranking, capacity allocation, statistics, and audit emission.
pub struct ConcoursDeliberationService<S> {
    interpreter: CriteriaInterpreter,
    audit: Arc<S>,
}

impl<S> ConcoursDeliberationService<S>
where
    S: AuditSink + 'static,
{
    pub fn new(audit: Arc<S>) -> Self {
        Self::with_interpreter(CriteriaInterpreter::default(), audit)
    }

    pub fn with_interpreter(interpreter: CriteriaInterpreter, audit: Arc<S>) -> Self {
        Self { interpreter, audit }
    }

    /// Runs the full deliberation. Individual candidate failures degrade
    /// into refused results with an error list; the batch always completes.
    pub fn deliberate(&self, request: &ConcoursRequest) -> ConcoursResponse {
        info!(
            candidats = request.candidats.len(),
            concours_id = request.concours_id.as_deref().unwrap_or("-"),
            "début délibération concours"
        );

        let evaluated: Vec<EvaluatedCandidate> = request
            .candidats
            .iter()
            .map(|candidat| self.evaluate_candidate(candidat, &request.criteres))
            .collect();

        let mut ranked = rank_candidates(evaluated);
        apply_capacity(&mut ranked, &request.criteres);

        let results: Vec<ConcoursCandidateResult> =
            ranked.into_iter().map(|candidate| candidate.result).collect();

        let liste_admis: Vec<ConcoursCandidateResult> = results
            .iter()
            .filter(|r| r.decision == Decision::Admis)
            .cloned()
            .collect();
        let liste_attente: Vec<ConcoursCandidateResult> = results
            .iter()
            .filter(|r| r.decision == Decision::ListeAttente)
            .cloned()
            .collect();
        let liste_refuses: Vec<ConcoursCandidateResult> = results
            .iter()
            .filter(|r| r.decision == Decision::Refuse)
            .cloned()
            .collect();

        let moyenne_generale = if results.is_empty() {
            0.0
        } else {
            round2(results.iter().map(|r| r.moyenne).sum::<f64>() / results.len() as f64)
        };
        let moyenne_admis = if liste_admis.is_empty() {
            0.0
        } else {
            round2(liste_admis.iter().map(|r| r.moyenne).sum::<f64>() / liste_admis.len() as f64)
        };
        let note_dernier_admis = liste_admis.last().map(|r| r.moyenne);

        let response = ConcoursResponse {
            concours_id: request.concours_id.clone(),
            total_candidats: results.len(),
            nombre_admis: liste_admis.len(),
            nombre_refuses: liste_refuses.len(),
            nombre_liste_attente: liste_attente.len(),
            liste_admis,
            liste_attente,
            liste_refuses,
            moyenne_generale,
            moyenne_admis,
            note_dernier_admis,
            timestamp: Utc::now(),
            criteres_appliques: request.criteres.clone(),
        };

        let event = AuditEvent {
            pipeline: PipelineKind::Concours,
            batch_id: request.concours_id.clone(),
            total: response.total_candidats,
            retenus: response.nombre_admis,
            timestamp: response.timestamp,
        };
        if let Err(error) = self.audit.record(event) {
            warn!(%error, "échec d'enregistrement de l'événement d'audit");
        }

        info!(
            admis = response.nombre_admis,
            total = response.total_candidats,
            "délibération terminée"
        );

        response
    }

    fn evaluate_candidate(
        &self,
        candidat: &ConcoursCandidate,
        criteres: &ConcoursCriteria,
    ) -> EvaluatedCandidate {
        let violations = validate_candidate(&candidat.id, &candidat.notes);
        if !violations.is_empty() {
            let erreurs: Vec<String> = violations.iter().map(ToString::to_string).collect();
            let explication = format!(
                "{} {} ne peut pas être évalué(e): {}.",
                candidat.prenom,
                candidat.nom,
                erreurs.join("; ")
            );
            warn!(
                candidat_id = %candidat.id,
                erreurs = erreurs.len(),
                "candidature invalide, résultat dégradé"
            );
            return EvaluatedCandidate {
                result: ConcoursCandidateResult {
                    candidat_id: candidat.id.clone(),
                    nom: candidat.nom.clone(),
                    prenom: candidat.prenom.clone(),
                    moyenne: 0.0,
                    rang: None,
                    decision: Decision::Refuse,
                    admis: false,
                    points_forts: Vec::new(),
                    points_faibles: Vec::new(),
                    explication,
                    details_notes: BTreeMap::new(),
                    erreurs,
                },
                eliminated: true,
            };
        }

        let moyenne = weighted_average(&candidat.notes);
        let details_notes: BTreeMap<String, f64> = candidat
            .notes
            .iter()
            .map(|note| (note.matiere.clone(), note.note))
            .collect();

        let mut profile = analyze_profile(&candidat.notes, moyenne, None);
        if let Some(texte) = &criteres.criteres_specifiques {
            let (forts, faibles) = self.interpreter.priority_observations(&candidat.notes, texte);
            profile.points_forts.extend(forts);
            profile.points_faibles.extend(faibles);
        }
        profile.cap();

        let elimination = check_elimination(&candidat.notes, criteres);
        let explication = build_explanation(
            &candidat.prenom,
            &candidat.nom,
            moyenne,
            &profile.points_forts,
            &profile.points_faibles,
            elimination.as_ref(),
            criteres,
        );

        let eliminated = elimination.is_some();
        let (decision, admis) = if eliminated {
            (Decision::Refuse, false)
        } else if moyenne >= criteres.moyenne_minimum {
            (Decision::Admis, true)
        } else {
            (Decision::Refuse, false)
        };

        EvaluatedCandidate {
            result: ConcoursCandidateResult {
                candidat_id: candidat.id.clone(),
                nom: candidat.nom.clone(),
                prenom: candidat.prenom.clone(),
                moyenne,
                rang: None,
                decision,
                admis,
                points_forts: profile.points_forts,
                points_faibles: profile.points_faibles,
                explication,
                details_notes,
                erreurs: Vec::new(),
            },
            eliminated,
        }
    }
}
