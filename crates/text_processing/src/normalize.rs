//! Utterance normalization
//!
//! Lowercases, folds Spanish accents, and segments text at Unicode word
//! boundaries. Folding is applied identically to lexicon phrases and user
//! input, so "petición" and "peticion" resolve to the same signal.
//! Punctuation never merges adjacent words: "hola,redacta" still yields two
//! tokens.

use unicode_segmentation::UnicodeSegmentation;

/// Lowercase and fold Spanish accented characters to their base letter.
///
/// `ñ` folds to `n` as well: the folding exists only for comparison, and
/// both sides of every comparison go through it.
pub fn fold(text: &str) -> String {
    text.to_lowercase().chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        _ => c,
    }
}

/// Split an utterance into folded word tokens.
///
/// Empty or non-alphabetic input yields an empty token stream.
pub fn tokenize(text: &str) -> Vec<String> {
    fold(text)
        .unicode_words()
        .map(|w| w.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_accents() {
        assert_eq!(fold("Derecho de Petición"), "derecho de peticion");
        assert_eq!(fold("ACCIÓN DE TUTELA"), "accion de tutela");
        assert_eq!(fold("señor"), "senor");
    }

    #[test]
    fn test_tokenize_strips_punctuation() {
        assert_eq!(
            tokenize("hola, ¿cómo estás?"),
            vec!["hola", "como", "estas"]
        );
    }

    #[test]
    fn test_tokenize_preserves_word_boundaries() {
        // Punctuation separates words, it never glues them together.
        assert_eq!(tokenize("hola,redacta"), vec!["hola", "redacta"]);
        assert_eq!(tokenize("e-mail"), vec!["e", "mail"]);
    }

    #[test]
    fn test_tokenize_collapses_whitespace() {
        assert_eq!(
            tokenize("  redacta   una\t\ntutela "),
            vec!["redacta", "una", "tutela"]
        );
    }

    #[test]
    fn test_tokenize_empty_and_symbolic_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("¿¿?? !!! ---").is_empty());
    }
}
