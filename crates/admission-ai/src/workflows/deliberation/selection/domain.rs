use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::deliberation::domain::{default_moyenne_minimum, Decision, Note};

/// One application file: transcript plus declarative record fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DossierCandidate {
    pub id: String,
    pub nom: String,
    pub prenom: String,
    pub notes: Vec<Note>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moyenne_generale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etablissement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filiere_origine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diplome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annee_obtention: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mention: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivation: Option<String>,
}

/// Selection thresholds, weights, and eliminatory requirements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionCriteria {
    #[serde(default = "default_moyenne_minimum")]
    pub moyenne_minimum: f64,
    #[serde(default)]
    pub criteres_texte: Option<String>,
    #[serde(default)]
    pub poids_matieres: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub filiere_cible: Option<String>,
    #[serde(default)]
    pub nombre_places: Option<usize>,
    #[serde(default)]
    pub matieres_requises: Option<Vec<String>>,
    #[serde(default)]
    pub note_minimum_matiere: Option<BTreeMap<String, f64>>,
}

impl Default for SelectionCriteria {
    fn default() -> Self {
        Self {
            moyenne_minimum: default_moyenne_minimum(),
            criteres_texte: None,
            poids_matieres: None,
            filiere_cible: None,
            nombre_places: None,
            matieres_requises: None,
            note_minimum_matiere: None,
        }
    }
}

/// Batch request over one or more dossiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub dossiers: Vec<DossierCandidate>,
    pub criteres: SelectionCriteria,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formation_nom: Option<String>,
}

/// Analysis produced for one dossier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DossierAnalysis {
    pub candidat_id: String,
    pub nom: String,
    pub prenom: String,
    pub admissible: bool,
    pub decision: Decision,
    pub score_global: f64,
    pub moyenne_calculee: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moyenne_ponderee: Option<f64>,
    pub analyse_profil: String,
    pub points_forts: Vec<String>,
    pub points_faibles: Vec<String>,
    pub recommandation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adequation_formation: Option<f64>,
    pub criteres_satisfaits: Vec<String>,
    pub criteres_non_satisfaits: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub erreurs: Vec<String>,
}

/// Batch response: the two lists stay sorted by score descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formation_id: Option<String>,
    pub total_dossiers: usize,
    pub nombre_admissibles: usize,
    pub nombre_non_admissibles: usize,
    pub dossiers_admissibles: Vec<DossierAnalysis>,
    pub dossiers_non_admissibles: Vec<DossierAnalysis>,
    pub moyenne_generale_candidats: f64,
    pub score_moyen: f64,
    pub timestamp: DateTime<Utc>,
    pub criteres_appliques: SelectionCriteria,
}

/// Payload of the single-dossier endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SingleDossierRequest {
    pub dossier: DossierCandidate,
    pub criteres: SelectionCriteria,
}
