//! Text Processing for the Legal Agent
//!
//! This crate provides the text analysis the chat layer consumes:
//! - **Normalization**: lowercase + Spanish accent folding + word-boundary
//!   tokenization, so accented and unaccented legal terms resolve to the
//!   same signal
//! - **Draft-Intent Detection**: deterministic, lexicon-driven detection of
//!   document-drafting requests with a calibrated confidence score
//!
//! # Example
//!
//! ```
//! use legal_agent_text_processing::DraftIntentClassifier;
//!
//! let classifier = DraftIntentClassifier::new();
//! let result = classifier.classify("redacta una tutela de salud");
//!
//! assert!(result.is_draft);
//! assert_eq!(result.doc_type.as_deref(), Some("tutela"));
//! ```

pub mod intent;
pub mod normalize;

pub use intent::{ClassificationResult, DraftIntentClassifier, FALLBACK_TYPE};

// Re-export lexicon types so callers configure the classifier without a
// direct dependency on the config crate.
pub use legal_agent_config::{
    DocumentTypeSignal, LexiconConfig, LexiconError, NegativeSignal, ScoringWeights, VerbSignal,
    WeightedPattern,
};
