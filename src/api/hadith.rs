//! Hadith text service client (fawazahmed0 hadith-api shape).
//!
//! The Arabic and English editions of a collection are fetched concurrently
//! and paired by index. Failures never propagate: the caller gets an empty
//! list, which reads the same as a collection with no data.

use futures::join;
use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;

use super::{ApiError, get_json};
use crate::core::model::{Grading, Narration};

pub const DEFAULT_HADITH_BASE_URL: &str = "https://cdn.jsdelivr.net/gh/fawazahmed0/hadith-api@1";

/// Upper bound on narrations loaded per collection.
pub const MAX_NARRATIONS: usize = 40;

/// Words of Arabic text used as a stand-in narrator chain.
const ISNAD_FALLBACK_WORDS: usize = 15;

const ARABIC_UNAVAILABLE: &str = "النص العربي غير متوفر";
const ENGLISH_UNAVAILABLE: &str = "No translation available";

#[derive(Deserialize, Debug, Default)]
struct EditionFile {
    #[serde(default)]
    hadiths: Vec<ApiHadith>,
}

#[derive(Deserialize, Debug, Default, Clone)]
struct ApiHadith {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, alias = "bookNumber")]
    book: Option<Value>,
    #[serde(default, alias = "hadithNumber", alias = "hadithnumber")]
    hadith_number: Option<Value>,
    #[serde(default)]
    grades: Vec<ApiGrade>,
    #[serde(default)]
    reference: Option<ApiReference>,
}

#[derive(Deserialize, Debug, Clone)]
struct ApiGrade {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    grade: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
struct ApiReference {
    #[serde(default)]
    book: Option<Value>,
}

/// Renders a JSON string or number as text. Empty strings and zero count as
/// missing.
fn value_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn non_empty(text: Option<&String>) -> Option<&str> {
    text.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// "bukhari" → "Bukhari"
fn display_collection(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// First words of the Arabic text, which usually opens with the chain.
pub fn fallback_isnad(arabic: &str) -> Option<String> {
    let words: Vec<&str> = arabic.split_whitespace().take(ISNAD_FALLBACK_WORDS).collect();
    if words.is_empty() {
        return None;
    }
    Some(format!("{}...", words.join(" ")))
}

/// Pairs English entries with Arabic entries by index, capped at
/// `MAX_NARRATIONS`.
fn pair_editions(collection: &str, arabic: &[ApiHadith], english: &[ApiHadith]) -> Vec<Narration> {
    let display = display_collection(collection);

    english
        .iter()
        .take(MAX_NARRATIONS)
        .enumerate()
        .map(|(index, eng)| {
            let arabic_text = arabic
                .get(index)
                .and_then(|ara| non_empty(ara.text.as_ref()))
                .map(str::to_string);
            let first_grade = eng.grades.first();

            Narration {
                id: format!("{collection}-{index}"),
                collection: display.clone(),
                book_number: value_text(eng.book.as_ref()).unwrap_or_else(|| "1".to_string()),
                hadith_number: value_text(eng.hadith_number.as_ref())
                    .unwrap_or_else(|| (index + 1).to_string()),
                isnad: arabic_text.as_deref().and_then(fallback_isnad),
                arabic_text: arabic_text.unwrap_or_else(|| ARABIC_UNAVAILABLE.to_string()),
                english_text: non_empty(eng.text.as_ref())
                    .unwrap_or(ENGLISH_UNAVAILABLE)
                    .to_string(),
                secondary_translation: None,
                grading: first_grade
                    .and_then(|g| g.grade.as_deref())
                    .map(Grading::parse)
                    .unwrap_or_default(),
                graded_by: first_grade
                    .and_then(|g| non_empty(g.name.as_ref()))
                    .unwrap_or("Scholarship")
                    .to_string(),
                chapter_title: eng
                    .reference
                    .as_ref()
                    .and_then(|r| value_text(r.book.as_ref()))
                    .map(|book| format!("Book {book}"))
                    .unwrap_or_else(|| "Chapter".to_string()),
            }
        })
        .collect()
}

pub struct HadithClient {
    base_url: String,
    client: reqwest::Client,
}

impl HadithClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_HADITH_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_edition(&self, lang: &str, collection: &str) -> Result<EditionFile, ApiError> {
        let url = format!("{}/editions/{}-{}.json", self.base_url, lang, collection);
        get_json(&self.client, &url).await
    }

    /// Fetches up to `MAX_NARRATIONS` narrations of a collection.
    ///
    /// Returns an empty list on any failure.
    pub async fn fetch_narrations(&self, collection: &str) -> Vec<Narration> {
        let (arabic, english) = join!(
            self.fetch_edition("ara", collection),
            self.fetch_edition("eng", collection)
        );

        match (arabic, english) {
            (Ok(arabic), Ok(english)) => {
                let narrations = pair_editions(collection, &arabic.hadiths, &english.hadiths);
                info!(
                    "Fetched {} narrations from {} ({} upstream)",
                    narrations.len(),
                    collection,
                    english.hadiths.len()
                );
                narrations
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!("Hadith fetch for {collection} failed: {e}");
                Vec::new()
            }
        }
    }
}
