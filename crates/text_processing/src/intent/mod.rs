//! Draft-Intent Detection
//!
//! Decides whether a user utterance is a request to draft a legal document,
//! which document type it asks for, and how confident that decision is.
//! Deterministic and auditable: every decision traces back to a weighted
//! lexicon entry, with explicit tie-breaking. Actual signals come from the
//! lexicon configuration, not from this module.
//!
//! # Example
//!
//! ```
//! use legal_agent_text_processing::DraftIntentClassifier;
//!
//! let classifier = DraftIntentClassifier::new();
//! let result = classifier.classify("necesito un contrato de arrendamiento");
//!
//! assert!(result.is_draft);
//! assert_eq!(result.doc_type.as_deref(), Some("contrato"));
//! ```

use serde::Serialize;

use legal_agent_config::{LexiconConfig, LexiconError, ScoringWeights};

use crate::normalize;

/// Document type reported for verb-only drafting requests, where the
/// utterance clearly asks for a document but names no recognized type.
pub const FALLBACK_TYPE: &str = "otro";

/// Classification of a single utterance.
///
/// Serializes to the `{ "isDraft", "type", "confidence" }` shape the chat
/// layer consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Whether the utterance requests that a document be drafted
    #[serde(rename = "isDraft")]
    pub is_draft: bool,
    /// Winning document-type identifier. `None` when `is_draft` is false;
    /// `"otro"` for verb-only requests with no recognized type.
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    /// Calibrated confidence in [0, 1]
    pub confidence: f32,
}

impl ClassificationResult {
    fn no_draft() -> Self {
        Self {
            is_draft: false,
            doc_type: None,
            confidence: 0.0,
        }
    }
}

/// A lexicon phrase compiled to folded tokens.
///
/// `char_len` is the phrase length before tokenization; a longer phrase is
/// considered more specific when scores tie.
struct CompiledPattern {
    tokens: Vec<String>,
    weight: f32,
    char_len: usize,
}

struct CompiledType {
    id: String,
    patterns: Vec<CompiledPattern>,
}

/// Lexicon-driven draft-intent classifier.
///
/// Compiles the lexicon once at construction (phrases are folded and
/// tokenized exactly like incoming utterances). The compiled classifier is
/// immutable: `classify` performs no writes, so one instance can be shared
/// behind `Arc` across request handlers without locking.
pub struct DraftIntentClassifier {
    types: Vec<CompiledType>,
    verbs: Vec<CompiledPattern>,
    casual: Vec<Vec<String>>,
    scoring: ScoringWeights,
}

impl DraftIntentClassifier {
    /// Create a classifier over the builtin Colombian lexicon.
    pub fn new() -> Self {
        Self::compile(LexiconConfig::default())
    }

    /// Create a classifier over a caller-supplied lexicon.
    ///
    /// Validates the lexicon first so misconfiguration (duplicate type ids,
    /// weights outside (0, 1]) fails at startup, never during a chat turn.
    pub fn with_lexicon(lexicon: LexiconConfig) -> Result<Self, LexiconError> {
        lexicon.validate()?;
        Ok(Self::compile(lexicon))
    }

    fn compile(lexicon: LexiconConfig) -> Self {
        let types = lexicon
            .document_types
            .iter()
            .map(|doc_type| CompiledType {
                id: doc_type.id.clone(),
                patterns: doc_type
                    .patterns
                    .iter()
                    .filter_map(|p| compile_pattern(&p.phrase, p.weight))
                    .collect(),
            })
            .collect::<Vec<_>>();

        let verbs = lexicon
            .drafting_verbs
            .iter()
            .filter_map(|v| compile_pattern(&v.phrase, v.weight))
            .collect::<Vec<_>>();

        let casual = lexicon
            .casual_markers
            .iter()
            .map(|m| normalize::tokenize(&m.phrase))
            .filter(|tokens| !tokens.is_empty())
            .collect::<Vec<_>>();

        tracing::debug!(
            types = types.len(),
            verbs = verbs.len(),
            casual = casual.len(),
            "Compiled draft-intent lexicon"
        );

        Self {
            types,
            verbs,
            casual,
            scoring: lexicon.scoring,
        }
    }

    /// Classify an utterance.
    ///
    /// Pure and total: any string input, including empty or symbolic-only
    /// text, yields a result and never an error. Calling twice on the same
    /// input yields identical results.
    pub fn classify(&self, text: &str) -> ClassificationResult {
        let tokens = normalize::tokenize(text);
        if tokens.is_empty() {
            return ClassificationResult::no_draft();
        }

        let type_match = self.best_type(&tokens);
        let verb_score = self.best_verb(&tokens);

        // Casual markers suppress drafting intent only when nothing else
        // matched: "hola, redacta una tutela" is still a draft request.
        if type_match.is_none() && verb_score == 0.0 && self.is_casual(&tokens) {
            return ClassificationResult::no_draft();
        }

        let type_score = type_match.map(|(_, score, _)| score).unwrap_or(0.0);
        let confidence = clamp01(
            type_score * self.scoring.type_weight + verb_score * self.scoring.verb_weight,
        );

        let is_draft = type_score > 0.0 || verb_score >= self.scoring.verb_only_threshold;

        let doc_type = if !is_draft {
            None
        } else if let Some((id, _, _)) = type_match {
            Some(id.to_string())
        } else {
            Some(FALLBACK_TYPE.to_string())
        };

        ClassificationResult {
            is_draft,
            doc_type,
            confidence,
        }
    }

    /// Best-matching document type: `(id, score, matched pattern length)`.
    ///
    /// Per-type score is the weight of the best single matching pattern,
    /// not a sum, so near-duplicate patterns of one type neither dilute nor
    /// inflate it. Ties between types resolve to the longer matched phrase,
    /// then to the earlier declared type.
    fn best_type(&self, tokens: &[String]) -> Option<(&str, f32, usize)> {
        let mut winner: Option<(&str, f32, usize)> = None;

        for doc_type in &self.types {
            let best = doc_type
                .patterns
                .iter()
                .filter(|p| contains_phrase(tokens, &p.tokens))
                .map(|p| (p.weight, p.char_len))
                .fold(None::<(f32, usize)>, |acc, (w, len)| match acc {
                    None => Some((w, len)),
                    Some((bw, blen)) if w > bw || (w == bw && len > blen) => Some((w, len)),
                    Some(_) => acc,
                });

            if let Some((score, len)) = best {
                let better = match winner {
                    None => true,
                    Some((_, best_score, best_len)) => {
                        score > best_score || (score == best_score && len > best_len)
                    }
                };
                if better {
                    winner = Some((doc_type.id.as_str(), score, len));
                }
            }
        }

        winner
    }

    /// Weight of the strongest matching drafting verb, 0 if none.
    fn best_verb(&self, tokens: &[String]) -> f32 {
        self.verbs
            .iter()
            .filter(|v| contains_phrase(tokens, &v.tokens))
            .map(|v| v.weight)
            .fold(0.0, f32::max)
    }

    fn is_casual(&self, tokens: &[String]) -> bool {
        self.casual.iter().any(|m| contains_phrase(tokens, m))
    }
}

impl Default for DraftIntentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn compile_pattern(phrase: &str, weight: f32) -> Option<CompiledPattern> {
    let tokens = normalize::tokenize(phrase);
    if tokens.is_empty() {
        tracing::warn!(phrase, "Lexicon phrase has no word content, skipping");
        return None;
    }
    Some(CompiledPattern {
        tokens,
        weight,
        char_len: phrase.chars().count(),
    })
}

/// Contiguous token-subsequence match. Word-boundary semantics fall out of
/// tokenization: "contrato" never matches inside "contratación".
fn contains_phrase(tokens: &[String], phrase: &[String]) -> bool {
    if phrase.is_empty() || phrase.len() > tokens.len() {
        return false;
    }
    tokens
        .windows(phrase.len())
        .any(|window| window.iter().zip(phrase).all(|(a, b)| a == b))
}

fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}
