//! Configuration for the legal agent's draft-intent detection
//!
//! The lexicon is the single source of truth for which document types,
//! drafting verbs, and casual markers the classifier recognizes. It is
//! loaded once at process start (builtin defaults or a YAML override) and
//! treated as immutable afterwards.
//!
//! Adding a document type is a data change: edit `config/lexicon.yaml` (or
//! extend the `LexiconConfig` value before handing it to the classifier).
//! No matching code changes are required.

pub mod lexicon;

pub use lexicon::{
    DocumentTypeSignal, LexiconConfig, LexiconError, NegativeSignal, ScoringWeights,
    VerbSignal, WeightedPattern,
};
