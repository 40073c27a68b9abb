use crate::workflows::deliberation::domain::Decision;

use super::domain::{ConcoursCandidateResult, ConcoursCriteria};

/// Per-candidate evaluation carried through ranking. The eliminated flag
/// survives sorting so capacity allocation can skip disqualified candidates
/// without re-parsing their explanation.
#[derive(Debug, Clone)]
pub struct EvaluatedCandidate {
    pub result: ConcoursCandidateResult,
    pub eliminated: bool,
}

/// Waitlist size derived from the seat count: half the capacity, capped at
/// ten positions.
pub fn waitlist_size(places: usize) -> usize {
    (places / 2).min(10)
}

/// Sorts by average descending with the original submission index as the
/// explicit tie-break, then assigns dense ranks 1..N.
pub fn rank_candidates(evaluated: Vec<EvaluatedCandidate>) -> Vec<EvaluatedCandidate> {
    let mut indexed: Vec<(usize, EvaluatedCandidate)> = evaluated.into_iter().enumerate().collect();
    indexed.sort_by(|(left_idx, left), (right_idx, right)| {
        right
            .result
            .moyenne
            .total_cmp(&left.result.moyenne)
            .then(left_idx.cmp(right_idx))
    });

    let mut sorted: Vec<EvaluatedCandidate> =
        indexed.into_iter().map(|(_, candidate)| candidate).collect();
    for (position, candidate) in sorted.iter_mut().enumerate() {
        candidate.result.rang = Some(position as u32 + 1);
    }
    sorted
}

/// Final allocation over the ranked batch.
///
/// Without a capacity the threshold decision stands. With a capacity, seats
/// go to the first `nombre_places` non-eliminated candidates, the following
/// waitlist window keeps only candidates still meeting the minimum average,
/// and everyone else is refused. Eliminated candidates never consume a seat
/// and never leave the refused state; they only gain the rank clause.
pub fn apply_capacity(candidates: &mut [EvaluatedCandidate], criteres: &ConcoursCriteria) {
    let total = candidates.len();

    let Some(places) = criteres.nombre_places else {
        for candidate in candidates.iter_mut() {
            if !candidate.eliminated && candidate.result.moyenne >= criteres.moyenne_minimum {
                candidate.result.decision = Decision::Admis;
                candidate.result.admis = true;
            } else {
                candidate.result.decision = Decision::Refuse;
                candidate.result.admis = false;
            }
        }
        return;
    };

    let attente = waitlist_size(places);
    let mut position = 0usize;

    for candidate in candidates.iter_mut() {
        let rang = candidate.result.rang.unwrap_or(0);

        if candidate.eliminated {
            candidate.result.decision = Decision::Refuse;
            candidate.result.admis = false;
            candidate
                .result
                .explication
                .push_str(&format!(" Classé(e) {rang}/{total}."));
            continue;
        }

        if position < places {
            candidate.result.decision = Decision::Admis;
            candidate.result.admis = true;
            candidate.result.explication.push_str(&format!(
                " Classé(e) {rang}/{total}, admis(e) dans les {places} places."
            ));
        } else if position < places + attente && candidate.result.moyenne >= criteres.moyenne_minimum
        {
            candidate.result.decision = Decision::ListeAttente;
            candidate.result.admis = false;
            candidate.result.explication.push_str(&format!(
                " Classé(e) {rang}/{total}, placé(e) en liste d'attente."
            ));
        } else {
            candidate.result.decision = Decision::Refuse;
            candidate.result.admis = false;
            candidate.result.explication.push_str(&format!(
                " Classé(e) {rang}/{total}, non retenu(e) faute de places."
            ));
        }

        position += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn evaluated(id: &str, moyenne: f64, eliminated: bool) -> EvaluatedCandidate {
        EvaluatedCandidate {
            result: ConcoursCandidateResult {
                candidat_id: id.to_string(),
                nom: id.to_string(),
                prenom: id.to_string(),
                moyenne,
                rang: None,
                decision: if !eliminated && moyenne >= 10.0 {
                    Decision::Admis
                } else {
                    Decision::Refuse
                },
                admis: !eliminated && moyenne >= 10.0,
                points_forts: Vec::new(),
                points_faibles: Vec::new(),
                explication: String::from("Explication."),
                details_notes: BTreeMap::new(),
                erreurs: Vec::new(),
            },
            eliminated,
        }
    }

    fn ids(candidates: &[EvaluatedCandidate]) -> Vec<&str> {
        candidates
            .iter()
            .map(|c| c.result.candidat_id.as_str())
            .collect()
    }

    #[test]
    fn ranks_are_a_dense_permutation_over_the_sorted_order() {
        let ranked = rank_candidates(vec![
            evaluated("a", 9.0, false),
            evaluated("b", 16.0, false),
            evaluated("c", 12.0, false),
        ]);
        assert_eq!(ids(&ranked), vec!["b", "c", "a"]);
        let rangs: Vec<u32> = ranked.iter().filter_map(|c| c.result.rang).collect();
        assert_eq!(rangs, vec![1, 2, 3]);
    }

    #[test]
    fn equal_averages_keep_submission_order() {
        let ranked = rank_candidates(vec![
            evaluated("premier", 12.0, false),
            evaluated("second", 12.0, false),
            evaluated("troisieme", 14.0, false),
        ]);
        assert_eq!(ids(&ranked), vec!["troisieme", "premier", "second"]);
    }

    #[test]
    fn small_capacity_produces_an_empty_waitlist() {
        let mut ranked = rank_candidates(vec![
            evaluated("a", 16.0, false),
            evaluated("b", 12.0, false),
            evaluated("c", 9.0, false),
        ]);
        let criteres = ConcoursCriteria {
            nombre_places: Some(1),
            ..ConcoursCriteria::default()
        };
        apply_capacity(&mut ranked, &criteres);

        assert_eq!(ranked[0].result.decision, Decision::Admis);
        assert_eq!(ranked[1].result.decision, Decision::Refuse);
        assert_eq!(ranked[2].result.decision, Decision::Refuse);
        assert!(ranked[1]
            .result
            .explication
            .ends_with("non retenu(e) faute de places."));
    }

    #[test]
    fn eliminated_candidates_do_not_consume_seats() {
        let mut ranked = rank_candidates(vec![
            evaluated("elimine", 18.0, true),
            evaluated("suivant", 13.0, false),
        ]);
        let criteres = ConcoursCriteria {
            nombre_places: Some(1),
            ..ConcoursCriteria::default()
        };
        apply_capacity(&mut ranked, &criteres);

        assert_eq!(ranked[0].result.decision, Decision::Refuse);
        assert!(ranked[0].result.explication.ends_with("Classé(e) 1/2."));
        assert_eq!(ranked[1].result.decision, Decision::Admis);
    }

    #[test]
    fn waitlist_window_still_checks_the_minimum() {
        let mut ranked = rank_candidates(vec![
            evaluated("a", 15.0, false),
            evaluated("b", 14.0, false),
            evaluated("c", 11.0, false),
            evaluated("d", 8.0, false),
        ]);
        let criteres = ConcoursCriteria {
            nombre_places: Some(2),
            ..ConcoursCriteria::default()
        };
        apply_capacity(&mut ranked, &criteres);

        assert_eq!(ranked[0].result.decision, Decision::Admis);
        assert_eq!(ranked[1].result.decision, Decision::Admis);
        assert_eq!(ranked[2].result.decision, Decision::ListeAttente);
        // Inside the waitlist window but below the minimum average.
        assert_eq!(ranked[3].result.decision, Decision::Refuse);
    }

    #[test]
    fn no_capacity_admission_is_threshold_only() {
        let mut ranked = rank_candidates(vec![
            evaluated("a", 14.0, false),
            evaluated("b", 9.0, false),
            evaluated("c", 17.0, true),
        ]);
        apply_capacity(&mut ranked, &ConcoursCriteria::default());

        let by_id: BTreeMap<&str, Decision> = ranked
            .iter()
            .map(|c| (c.result.candidat_id.as_str(), c.result.decision))
            .collect();
        assert_eq!(by_id["a"], Decision::Admis);
        assert_eq!(by_id["b"], Decision::Refuse);
        assert_eq!(by_id["c"], Decision::Refuse);
    }

    #[test]
    fn waitlist_size_is_half_capacity_capped_at_ten() {
        assert_eq!(waitlist_size(1), 0);
        assert_eq!(waitlist_size(7), 3);
        assert_eq!(waitlist_size(50), 10);
    }
}
