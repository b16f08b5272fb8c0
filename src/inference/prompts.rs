//! Prompt text for both operations.
//!
//! The hosted engine gets the schema out of band, so its prompts only ask the
//! question. The local engine has no schema channel; `with_shape` appends the
//! expected JSON layout to the prompt instead.

use super::types::InsightRequest;

const INSIGHT_SHAPE: &str = r#"{"translation": string, "explanation": string, "keyThemes": [string]}"#;

const ISNAD_SHAPE: &str = r#"{"reliability": string, "narrators": [{"name": string, "reliability": string, "bio": string}], "scholarlyNotes": string}"#;

pub fn insight_prompt(request: &InsightRequest) -> String {
    format!(
        "Context: {}\nContent: {}\n\nTranslate the above content to {} accurately. \
         Also provide a brief spiritual or historical explanation (tafsir/context) \
         and extract key themes. Return the result in JSON format.",
        request.context,
        request.text,
        request.language.name()
    )
}

pub fn isnad_prompt(chain: &str, text: &str) -> String {
    format!(
        "Hadith Text: {text}\nIsnad: {chain}\n\nAnalyze this Chain of Narration (Isnad). \
         Identify the narrators, their reliability according to Ilm al-Rijal, and provide \
         scholarly notes on the authenticity. Return in JSON."
    )
}

fn with_shape(prompt: String, shape: &str) -> String {
    format!(
        "{prompt}\n\nRespond with a single JSON object and nothing else, exactly in this shape:\n{shape}"
    )
}

pub fn local_insight_prompt(request: &InsightRequest) -> String {
    with_shape(insight_prompt(request), INSIGHT_SHAPE)
}

pub fn local_isnad_prompt(chain: &str, text: &str) -> String {
    with_shape(isnad_prompt(chain, text), ISNAD_SHAPE)
}
