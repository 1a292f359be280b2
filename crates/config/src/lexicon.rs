//! Lexicon Configuration
//!
//! Defines the signal catalogue for draft-intent detection: document-type
//! patterns, drafting-verb markers, and casual-conversation markers, each
//! with a weight. Signals are loaded from lexicon.yaml instead of being
//! hardcoded in the classifier; a builtin Colombian catalogue is provided
//! via `Default` so the agent works with no config files present.
//!
//! Validation runs at load time. A misconfigured lexicon (duplicate type
//! ids, weights outside (0, 1]) fails process startup rather than producing
//! silent misclassifications later.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Lexicon configuration loaded from lexicon.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Document-type signals, in declaration order.
    ///
    /// Order matters: it is the final tie-break when two types match with
    /// identical score and pattern length.
    #[serde(default)]
    pub document_types: Vec<DocumentTypeSignal>,
    /// Explicit drafting-imperative markers ("redacta", "hazme un", ...)
    #[serde(default)]
    pub drafting_verbs: Vec<VerbSignal>,
    /// Casual/greeting markers that suppress drafting intent
    #[serde(default)]
    pub casual_markers: Vec<NegativeSignal>,
    /// Confidence composition weights and thresholds
    #[serde(default)]
    pub scoring: ScoringWeights,
}

/// One recognizable document type with its phrase patterns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTypeSignal {
    /// Stable identifier ("contrato", "tutela", "derecho_de_peticion", ...)
    pub id: String,
    /// Case/accent-insensitive phrase matchers for this type
    pub patterns: Vec<WeightedPattern>,
}

/// A phrase matcher with a weight reflecting how unambiguously it implies
/// its document type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightedPattern {
    /// Single word or multi-word phrase, matched at word boundaries
    pub phrase: String,
    /// Weight in (0, 1]
    pub weight: f32,
}

/// A drafting-imperative marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerbSignal {
    /// Verb or verb phrase ("redacta", "necesito un", ...)
    pub phrase: String,
    /// How strongly the verb signals an authoring request vs a mere mention
    pub weight: f32,
}

/// A casual-conversation marker ("hola", "gracias", ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NegativeSignal {
    pub phrase: String,
}

/// Confidence composition weights.
///
/// Single tunable table: recalibration touches only these values, never the
/// matching logic. `type_weight >= verb_weight` so type specificity
/// dominates over a bare imperative.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Multiplier for the winning type score
    #[serde(default = "default_type_weight")]
    pub type_weight: f32,
    /// Multiplier for the strongest verb score
    #[serde(default = "default_verb_weight")]
    pub verb_weight: f32,
    /// Minimum verb weight for a verb-only utterance (no recognized type)
    /// to still count as a drafting request, classified as "otro"
    #[serde(default = "default_verb_only_threshold")]
    pub verb_only_threshold: f32,
}

fn default_type_weight() -> f32 {
    0.7
}

fn default_verb_weight() -> f32 {
    0.3
}

fn default_verb_only_threshold() -> f32 {
    0.8
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            type_weight: default_type_weight(),
            verb_weight: default_verb_weight(),
            verb_only_threshold: default_verb_only_threshold(),
        }
    }
}

/// Errors when loading or validating the lexicon
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("lexicon config not found at {path}: {source}")]
    FileNotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse lexicon config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("duplicate document type id '{0}'")]
    DuplicateType(String),
    #[error("document type '{0}' has no patterns")]
    EmptyPatterns(String),
    #[error("empty phrase in {0}")]
    EmptyPhrase(String),
    #[error("weight {weight} for '{phrase}' is outside (0, 1]")]
    WeightOutOfRange { phrase: String, weight: f32 },
    #[error("type_weight ({type_weight}) must be >= verb_weight ({verb_weight})")]
    WeightOrdering { type_weight: f32, verb_weight: f32 },
}

impl LexiconConfig {
    /// Load and validate a lexicon from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| LexiconError::FileNotFound {
                path: path.as_ref().display().to_string(),
                source: e,
            })?;

        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;

        tracing::debug!(
            path = %path.as_ref().display(),
            types = config.document_types.len(),
            verbs = config.drafting_verbs.len(),
            casual = config.casual_markers.len(),
            "Loaded lexicon config"
        );

        Ok(config)
    }

    /// Get a document-type signal by id
    pub fn document_type(&self, id: &str) -> Option<&DocumentTypeSignal> {
        self.document_types.iter().find(|t| t.id == id)
    }

    /// All document type ids, in declaration order
    pub fn type_ids(&self) -> Vec<&str> {
        self.document_types.iter().map(|t| t.id.as_str()).collect()
    }

    /// Validate the catalogue.
    ///
    /// Checks duplicate type ids, empty phrases, and weight ranges. Called
    /// by `load()` and again by the classifier constructor so a lexicon
    /// assembled in code gets the same fail-fast treatment as one loaded
    /// from disk.
    pub fn validate(&self) -> Result<(), LexiconError> {
        let mut seen = std::collections::HashSet::new();
        for doc_type in &self.document_types {
            if !seen.insert(doc_type.id.as_str()) {
                return Err(LexiconError::DuplicateType(doc_type.id.clone()));
            }
            if doc_type.patterns.is_empty() {
                return Err(LexiconError::EmptyPatterns(doc_type.id.clone()));
            }
            for pattern in &doc_type.patterns {
                check_phrase(&pattern.phrase, &format!("document type '{}'", doc_type.id))?;
                check_weight(&pattern.phrase, pattern.weight)?;
            }
        }

        for verb in &self.drafting_verbs {
            check_phrase(&verb.phrase, "drafting verbs")?;
            check_weight(&verb.phrase, verb.weight)?;
        }

        for marker in &self.casual_markers {
            check_phrase(&marker.phrase, "casual markers")?;
        }

        if self.scoring.type_weight < self.scoring.verb_weight {
            return Err(LexiconError::WeightOrdering {
                type_weight: self.scoring.type_weight,
                verb_weight: self.scoring.verb_weight,
            });
        }

        Ok(())
    }
}

fn check_phrase(phrase: &str, context: &str) -> Result<(), LexiconError> {
    if phrase.trim().is_empty() {
        return Err(LexiconError::EmptyPhrase(context.to_string()));
    }
    Ok(())
}

fn check_weight(phrase: &str, weight: f32) -> Result<(), LexiconError> {
    if weight <= 0.0 || weight > 1.0 {
        return Err(LexiconError::WeightOutOfRange {
            phrase: phrase.to_string(),
            weight,
        });
    }
    Ok(())
}

impl Default for LexiconConfig {
    /// Builtin Colombian legal catalogue.
    ///
    /// `incapacidad` and other niche document types are intentionally left
    /// to lexicon.yaml overrides; the builtin set covers the document types
    /// the drafting pipeline has templates for.
    fn default() -> Self {
        Self {
            document_types: vec![
                doc_type(
                    "contrato",
                    &[("contrato", 1.0), ("acuerdo", 0.6), ("convenio", 0.6)],
                ),
                doc_type("minuta", &[("minuta", 0.95)]),
                doc_type("tutela", &[("tutela", 1.0), ("acción de tutela", 1.0)]),
                doc_type(
                    "derecho_de_peticion",
                    &[("derecho de petición", 1.0), ("petición", 0.7)],
                ),
                doc_type("memorial", &[("memorial", 0.9)]),
                doc_type(
                    "comunicado",
                    &[("comunicado", 0.9), ("oficio", 0.7), ("carta", 0.6)],
                ),
                doc_type(
                    "correo",
                    &[("correo", 0.85), ("email", 0.85), ("e-mail", 0.85)],
                ),
                doc_type("excusa", &[("excusa", 0.8)]),
                doc_type("renuncia", &[("renuncia", 0.9)]),
                doc_type("reclamo", &[("reclamo", 0.85), ("queja", 0.85)]),
            ],
            drafting_verbs: verbs(&[
                ("redacta", 0.9),
                ("redactar", 0.9),
                ("redacción", 0.8),
                ("hazme", 0.9),
                ("elabora", 0.85),
                ("elaborar", 0.85),
                ("prepárame", 0.85),
                ("escribe", 0.8),
                ("escribir", 0.8),
                ("prepara", 0.8),
                ("preparar", 0.8),
                ("genera", 0.75),
                ("generar", 0.75),
                ("crea", 0.75),
                ("crear", 0.75),
                ("diseña", 0.7),
                ("estructura", 0.6),
                ("borrador de", 0.85),
                ("borrador", 0.7),
                ("modelo de", 0.85),
                ("formato de", 0.85),
                ("plantilla de", 0.85),
                ("necesito un", 0.6),
                ("necesito una", 0.6),
                ("necesito", 0.5),
                ("quiero un", 0.6),
                ("quiero una", 0.6),
                // Revision requests go through the same detector
                ("modifica", 0.7),
                ("corrige", 0.7),
                ("reformula", 0.7),
                ("ajusta", 0.65),
                ("actualiza", 0.65),
                ("cambia", 0.6),
                ("mejora", 0.6),
            ]),
            casual_markers: markers(&[
                "hola",
                "buenas",
                "buenos días",
                "buenas tardes",
                "buenas noches",
                "cómo estás",
                "qué tal",
                "gracias",
                "quién eres",
                "adiós",
                "chao",
            ]),
            scoring: ScoringWeights::default(),
        }
    }
}

fn doc_type(id: &str, patterns: &[(&str, f32)]) -> DocumentTypeSignal {
    DocumentTypeSignal {
        id: id.to_string(),
        patterns: patterns
            .iter()
            .map(|&(phrase, weight)| WeightedPattern {
                phrase: phrase.to_string(),
                weight,
            })
            .collect(),
    }
}

fn verbs(entries: &[(&str, f32)]) -> Vec<VerbSignal> {
    entries
        .iter()
        .map(|&(phrase, weight)| VerbSignal {
            phrase: phrase.to_string(),
            weight,
        })
        .collect()
}

fn markers(entries: &[&str]) -> Vec<NegativeSignal> {
    entries
        .iter()
        .map(|&phrase| NegativeSignal {
            phrase: phrase.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicon_deserialization() {
        let yaml = r#"
document_types:
  - id: tutela
    patterns:
      - phrase: tutela
        weight: 1.0
  - id: incapacidad
    patterns:
      - phrase: incapacidad
        weight: 0.9
drafting_verbs:
  - phrase: redacta
    weight: 0.9
casual_markers:
  - phrase: hola
scoring:
  type_weight: 0.7
  verb_weight: 0.3
  verb_only_threshold: 0.8
"#;
        let config: LexiconConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.type_ids(), vec!["tutela", "incapacidad"]);
        assert_eq!(config.document_type("incapacidad").unwrap().patterns.len(), 1);
        assert_eq!(config.scoring.type_weight, 0.7);
    }

    #[test]
    fn test_scoring_defaults_when_omitted() {
        let yaml = r#"
document_types:
  - id: tutela
    patterns:
      - phrase: tutela
        weight: 1.0
"#;
        let config: LexiconConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.scoring.type_weight, 0.7);
        assert_eq!(config.scoring.verb_weight, 0.3);
        assert_eq!(config.scoring.verb_only_threshold, 0.8);
    }

    #[test]
    fn test_default_catalogue_is_valid() {
        let config = LexiconConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.document_type("contrato").is_some());
        assert!(config.document_type("tutela").is_some());
        assert!(config.document_type("derecho_de_peticion").is_some());
        // Left to lexicon.yaml overrides on purpose
        assert!(config.document_type("incapacidad").is_none());
    }

    #[test]
    fn test_duplicate_type_id_rejected() {
        let mut config = LexiconConfig::default();
        config.document_types.push(DocumentTypeSignal {
            id: "contrato".to_string(),
            patterns: vec![WeightedPattern {
                phrase: "contrato laboral".to_string(),
                weight: 0.9,
            }],
        });
        assert!(matches!(
            config.validate(),
            Err(LexiconError::DuplicateType(id)) if id == "contrato"
        ));
    }

    #[test]
    fn test_weight_out_of_range_rejected() {
        let mut config = LexiconConfig::default();
        config.drafting_verbs.push(VerbSignal {
            phrase: "transcribe".to_string(),
            weight: 1.5,
        });
        assert!(matches!(
            config.validate(),
            Err(LexiconError::WeightOutOfRange { weight, .. }) if weight == 1.5
        ));
    }

    #[test]
    fn test_zero_weight_rejected() {
        let mut config = LexiconConfig::default();
        config.document_types[0].patterns.push(WeightedPattern {
            phrase: "pacto".to_string(),
            weight: 0.0,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_patterns_rejected() {
        let mut config = LexiconConfig::default();
        config.document_types.push(DocumentTypeSignal {
            id: "poder".to_string(),
            patterns: vec![],
        });
        assert!(matches!(
            config.validate(),
            Err(LexiconError::EmptyPatterns(id)) if id == "poder"
        ));
    }

    #[test]
    fn test_inverted_scoring_weights_rejected() {
        let mut config = LexiconConfig::default();
        config.scoring.type_weight = 0.2;
        config.scoring.verb_weight = 0.8;
        assert!(matches!(
            config.validate(),
            Err(LexiconError::WeightOrdering { .. })
        ));
    }

    #[test]
    fn test_load_shipped_lexicon() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../config/lexicon.yaml");
        let config = LexiconConfig::load(path).unwrap();
        assert!(config.document_type("tutela").is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let err = LexiconConfig::load("/nonexistent/lexicon.yaml").unwrap_err();
        assert!(matches!(err, LexiconError::FileNotFound { .. }));
    }
}
