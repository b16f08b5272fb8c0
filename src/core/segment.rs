//! # Sentence Grouping
//!
//! Splits a block of Arabic or English text on sentence-terminal punctuation
//! and pairs consecutive sentences, so each pair can be translated on its own.
//! Punctuation only, no tokenization.

/// Sentence terminators for Latin and Arabic script.
const TERMINATORS: [char; 5] = ['.', '!', '?', '\u{061F}', '\u{06D4}'];

/// Sentences per group.
const GROUP_SIZE: usize = 2;

/// A run of consecutive sentences shown as one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceGroup {
    pub sentences: Vec<String>,
}

impl SentenceGroup {
    pub fn text(&self) -> String {
        self.sentences.join(" ")
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Splits `text` after every run of terminators. Text after the last
/// terminator becomes a sentence of its own.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if TERMINATORS.contains(&c) {
            // "..." and "?!" stay with their sentence
            while let Some(&next) = chars.peek() {
                if !TERMINATORS.contains(&next) {
                    break;
                }
                current.push(next);
                chars.next();
            }
            push_trimmed(&mut sentences, &current);
            current.clear();
        }
    }
    push_trimmed(&mut sentences, &current);

    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if trimmed.chars().any(|c| !TERMINATORS.contains(&c)) {
        sentences.push(trimmed.to_string());
    }
}

/// Pairs consecutive sentences of `text`. An odd count leaves a final group
/// of one.
pub fn group_sentences(text: &str) -> Vec<SentenceGroup> {
    split_sentences(text)
        .chunks(GROUP_SIZE)
        .map(|chunk| SentenceGroup {
            sentences: chunk.to_vec(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(groups: &[SentenceGroup]) -> Vec<usize> {
        groups.iter().map(SentenceGroup::len).collect()
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(group_sentences("").is_empty());
        assert!(group_sentences("   \n ").is_empty());
    }

    #[test]
    fn test_two_sentences_form_one_group() {
        let groups = group_sentences("Actions are by intentions. Each person gets what they intended.");
        assert_eq!(sizes(&groups), vec![2]);
        assert_eq!(
            groups[0].text(),
            "Actions are by intentions. Each person gets what they intended."
        );
    }

    #[test]
    fn test_three_sentences_form_groups_of_two_and_one() {
        let groups = group_sentences("One. Two! Three?");
        assert_eq!(sizes(&groups), vec![2, 1]);
        assert_eq!(groups[1].sentences, vec!["Three?".to_string()]);
    }

    #[test]
    fn test_trailing_text_without_terminator_is_kept() {
        let sentences = split_sentences("First sentence. then no ending");
        assert_eq!(sentences, vec!["First sentence.", "then no ending"]);
        assert_eq!(sizes(&group_sentences("A. B. C")), vec![2, 1]);
    }

    #[test]
    fn test_terminator_runs_stay_attached() {
        assert_eq!(split_sentences("Wait... What?! Yes."), vec!["Wait...", "What?!", "Yes."]);
    }

    #[test]
    fn test_arabic_terminators_split() {
        let text = "\u{0647}\u{0644} \u{062A}\u{0639}\u{0644}\u{0645}\u{061F} \u{0646}\u{0639}\u{0645}\u{06D4}";
        assert_eq!(split_sentences(text).len(), 2);
    }

    #[test]
    fn test_lone_punctuation_is_not_a_sentence() {
        assert!(split_sentences("... !").is_empty());
    }
}
