use std::collections::BTreeMap;
use std::sync::Arc;

use clap::Args;

use admission_ai::error::AppError;
use admission_ai::workflows::classification::DocumentClassificationService;
use admission_ai::workflows::deliberation::concours::{
    ConcoursCandidate, ConcoursCriteria, ConcoursDeliberationService, ConcoursRequest,
};
use admission_ai::workflows::deliberation::selection::{
    DossierCandidate, DossierSelectionService, SelectionCriteria, SelectionRequest,
};
use admission_ai::workflows::deliberation::Note;

use crate::infra::{MemoryAuditSink, StubDocumentClassifier};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Number of seats for the concours portion of the demo
    #[arg(long, default_value_t = 2)]
    pub(crate) places: usize,
    /// Skip the dossier selection portion of the demo
    #[arg(long)]
    pub(crate) skip_selection: bool,
    /// Skip the document classification portion of the demo
    #[arg(long)]
    pub(crate) skip_classification: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        places,
        skip_selection,
        skip_classification,
    } = args;

    println!("Démonstration du moteur de délibération");

    let audit = Arc::new(MemoryAuditSink::default());

    println!("\nCas 1: délibération de concours ({places} places)");
    let concours_service = ConcoursDeliberationService::new(audit.clone());
    let concours_request = demo_concours_request(places);
    let concours = concours_service.deliberate(&concours_request);

    println!(
        "- {} candidats | {} admis | {} en liste d'attente | {} refusés",
        concours.total_candidats,
        concours.nombre_admis,
        concours.nombre_refuses,
        concours.nombre_liste_attente
    );
    println!(
        "- Moyenne générale {:.2}/20 | moyenne des admis {:.2}/20",
        concours.moyenne_generale, concours.moyenne_admis
    );
    if let Some(note) = concours.note_dernier_admis {
        println!("- Note du dernier admis: {note:.2}/20");
    }
    for result in concours
        .liste_admis
        .iter()
        .chain(concours.liste_attente.iter())
        .chain(concours.liste_refuses.iter())
    {
        let rang = result
            .rang
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {} | {} {} | moyenne {:.2} | {}",
            rang,
            result.prenom,
            result.nom,
            result.moyenne,
            result.decision.label()
        );
        println!("    {}", result.explication);
    }

    if !skip_selection {
        println!("\nCas 2: sélection de dossiers");
        let selection_service = DossierSelectionService::new(audit.clone());
        let selection_request = demo_selection_request();
        let selection = selection_service.analyze(&selection_request);

        println!(
            "- {} dossiers | {} admissibles | score moyen {:.2}/100",
            selection.total_dossiers, selection.nombre_admissibles, selection.score_moyen
        );
        for analysis in selection
            .dossiers_admissibles
            .iter()
            .chain(selection.dossiers_non_admissibles.iter())
        {
            println!(
                "  {} {} | score {:.1}/100 | moyenne {:.2}/20 | {}",
                analysis.prenom,
                analysis.nom,
                analysis.score_global,
                analysis.moyenne_calculee,
                if analysis.admissible {
                    "admissible"
                } else {
                    "non admissible"
                }
            );
            if let Some(fit) = analysis.adequation_formation {
                println!("    Adéquation formation: {fit:.1}/100");
            }
            println!("    {}", analysis.recommandation);
        }
    }

    if !skip_classification {
        println!("\nClassification de documents (backend de démonstration)");
        let classification = DocumentClassificationService::new(StubDocumentClassifier);
        let documents = vec![
            ("releve_notes.png".to_string(), vec![0u8; 2048]),
            ("arrete_admission.pdf".to_string(), vec![0u8; 1025]),
            ("lettre_motivation.docx".to_string(), vec![0u8; 512]),
        ];
        for document in classification.classify_batch(&documents) {
            println!(
                "  {} -> {} (confiance {:.2})",
                document.filename, document.predicted_class, document.confidence
            );
            for error in &document.errors {
                println!("    {error}");
            }
        }
    }

    let events = audit.events();
    println!("\nJournal d'audit: {} lot(s) enregistré(s)", events.len());
    for event in events {
        println!(
            "  {:?} | lot {} | {} retenus / {} dossiers",
            event.pipeline,
            event.batch_id.as_deref().unwrap_or("-"),
            event.retenus,
            event.total
        );
    }

    Ok(())
}

fn note(matiere: &str, value: f64, coefficient: f64) -> Note {
    Note {
        matiere: matiere.to_string(),
        note: value,
        coefficient,
        annee: None,
        semestre: None,
    }
}

fn demo_concours_request(places: usize) -> ConcoursRequest {
    let candidats = vec![
        ConcoursCandidate {
            id: "C001".to_string(),
            nom: "Rakoto".to_string(),
            prenom: "Jean".to_string(),
            notes: vec![
                note("Mathématiques", 15.0, 4.0),
                note("Physique", 12.0, 3.0),
                note("Français", 14.0, 2.0),
            ],
            date_naissance: None,
            etablissement_origine: Some("Lycée Andohalo".to_string()),
        },
        ConcoursCandidate {
            id: "C002".to_string(),
            nom: "Rabe".to_string(),
            prenom: "Voahangy".to_string(),
            notes: vec![
                note("Mathématiques", 17.0, 4.0),
                note("Physique", 15.0, 3.0),
                note("Français", 13.0, 2.0),
            ],
            date_naissance: None,
            etablissement_origine: None,
        },
        ConcoursCandidate {
            id: "C003".to_string(),
            nom: "Andria".to_string(),
            prenom: "Hery".to_string(),
            notes: vec![
                note("Mathématiques", 11.0, 4.0),
                note("Physique", 9.0, 3.0),
                note("Français", 12.0, 2.0),
            ],
            date_naissance: None,
            etablissement_origine: None,
        },
        ConcoursCandidate {
            id: "C004".to_string(),
            nom: "Rasolofo".to_string(),
            prenom: "Tiana".to_string(),
            notes: vec![
                note("Mathématiques", 14.0, 4.0),
                note("Physique", 4.0, 3.0),
                note("Français", 15.0, 2.0),
            ],
            date_naissance: None,
            etablissement_origine: None,
        },
    ];

    ConcoursRequest {
        candidats,
        criteres: ConcoursCriteria {
            note_eliminatoire: Some(5.0),
            moyenne_minimum: 10.0,
            nombre_places: Some(places),
            criteres_specifiques: Some(
                "Priorité aux candidats ayant plus de 12 en mathématiques".to_string(),
            ),
            matieres_eliminatoires: None,
        },
        concours_id: Some("CONCOURS-ENI-2025".to_string()),
        concours_nom: Some("Concours d'entrée en informatique".to_string()),
    }
}

fn demo_selection_request() -> SelectionRequest {
    let mut poids = BTreeMap::new();
    poids.insert("Mathématiques".to_string(), 2.0);
    poids.insert("Informatique".to_string(), 2.0);
    poids.insert("Physique".to_string(), 1.0);

    SelectionRequest {
        dossiers: vec![
            DossierCandidate {
                id: "D001".to_string(),
                nom: "Razafy".to_string(),
                prenom: "Marie".to_string(),
                notes: vec![
                    note("Mathématiques", 14.0, 1.0),
                    note("Informatique", 16.0, 1.0),
                    note("Physique", 12.0, 1.0),
                ],
                moyenne_generale: None,
                etablissement: Some("Université Antananarivo".to_string()),
                filiere_origine: Some("Licence Informatique".to_string()),
                diplome: Some("Licence".to_string()),
                annee_obtention: Some(2024),
                mention: Some("Bien".to_string()),
                experience: None,
                motivation: None,
            },
            DossierCandidate {
                id: "D002".to_string(),
                nom: "Rajaona".to_string(),
                prenom: "Lova".to_string(),
                notes: vec![
                    note("Mathématiques", 9.0, 1.0),
                    note("Informatique", 11.0, 1.0),
                    note("Histoire", 13.0, 1.0),
                ],
                moyenne_generale: None,
                etablissement: None,
                filiere_origine: None,
                diplome: None,
                annee_obtention: None,
                mention: None,
                experience: None,
                motivation: None,
            },
        ],
        criteres: SelectionCriteria {
            moyenne_minimum: 12.0,
            criteres_texte: Some(
                "Bonne maîtrise des mathématiques et de l'informatique, rigueur scientifique"
                    .to_string(),
            ),
            poids_matieres: Some(poids),
            filiere_cible: Some("Master Informatique".to_string()),
            nombre_places: None,
            matieres_requises: None,
            note_minimum_matiere: None,
        },
        formation_id: Some("M1-INFO".to_string()),
        formation_nom: Some("Master 1 Informatique".to_string()),
    }
}
