//! Document classification collaborator.
//!
//! The deliberation workflows consume classification results produced
//! elsewhere; this module only defines the seam. A [`DocumentClassifier`]
//! implementation is injected by the hosting service, and
//! [`DocumentClassificationService`] wraps it with file validation and
//! degraded results so a batch never aborts on one bad document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// File extensions accepted for classification, lowercase, dot included.
pub const SUPPORTED_EXTENSIONS: [&str; 4] = [".png", ".jpg", ".jpeg", ".pdf"];

/// Raw model output for one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    /// Confidence of the predicted label, between 0 and 1.
    pub confidence: f64,
    /// Per-label probability distribution.
    pub probabilities: BTreeMap<String, f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("échec d'inférence: {0}")]
    Inference(String),
}

/// Inference backend. Implementations run the actual model; the service
/// layer never sees anything below this trait.
pub trait DocumentClassifier: Send + Sync {
    fn classify(&self, content: &[u8]) -> Result<Prediction, ClassificationError>;
}

/// Classification outcome for one document. Failures are carried in
/// `errors` with a sentinel `predicted_class` instead of an Err, so batch
/// responses stay positionally aligned with their inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedDocument {
    pub filename: String,
    pub predicted_class: String,
    pub confidence: f64,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Validates and classifies documents through an injected backend.
pub struct DocumentClassificationService<C> {
    classifier: C,
}

impl<C> DocumentClassificationService<C>
where
    C: DocumentClassifier,
{
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    /// Classifies a single document. Unsupported extensions yield an
    /// `unknown` result and backend failures an `error` result; neither
    /// interrupts the caller.
    pub fn classify_document(&self, filename: &str, content: &[u8]) -> ClassifiedDocument {
        let ext = extension(filename);
        if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
            warn!(filename, extension = %ext, "extension non supportée");
            let mut metadata = BTreeMap::new();
            metadata.insert(
                "error".to_string(),
                serde_json::Value::String(format!("Extension non supportée: {ext}")),
            );
            return ClassifiedDocument {
                filename: filename.to_string(),
                predicted_class: "unknown".to_string(),
                confidence: 0.0,
                metadata,
                errors: vec![format!(
                    "Extensions supportées: {}",
                    SUPPORTED_EXTENSIONS.join(", ")
                )],
            };
        }

        match self.classifier.classify(content) {
            Ok(prediction) => {
                let mut metadata = BTreeMap::new();
                metadata.insert(
                    "probabilities".to_string(),
                    serde_json::json!(prediction.probabilities),
                );
                metadata.insert("file_size".to_string(), serde_json::json!(content.len()));
                metadata.insert("file_type".to_string(), serde_json::Value::String(ext));
                ClassifiedDocument {
                    filename: filename.to_string(),
                    predicted_class: prediction.label,
                    confidence: prediction.confidence,
                    metadata,
                    errors: Vec::new(),
                }
            }
            Err(error) => {
                warn!(filename, %error, "classification en échec, résultat dégradé");
                ClassifiedDocument {
                    filename: filename.to_string(),
                    predicted_class: "error".to_string(),
                    confidence: 0.0,
                    metadata: BTreeMap::new(),
                    errors: vec![error.to_string()],
                }
            }
        }
    }

    /// Classifies documents in order; each entry degrades independently.
    pub fn classify_batch(&self, documents: &[(String, Vec<u8>)]) -> Vec<ClassifiedDocument> {
        documents
            .iter()
            .map(|(filename, content)| self.classify_document(filename, content))
            .collect()
    }
}

/// Lowercased extension with its dot; empty when the filename has none.
fn extension(filename: &str) -> String {
    filename
        .rfind('.')
        .map(|idx| filename[idx..].to_lowercase())
        .unwrap_or_default()
}
