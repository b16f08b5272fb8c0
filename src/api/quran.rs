//! Quran text service client (alquran.cloud API shape).
//!
//! Verses are fetched as one combined request for two editions: the original
//! script (`quran-simple`) and a translation. The two `ayahs` arrays are
//! zipped by position.

use log::{info, warn};
use serde::Deserialize;

use super::{ApiError, get_json};
use crate::core::model::{Chapter, TranslationLang, Verse};

pub const DEFAULT_QURAN_BASE_URL: &str = "https://api.alquran.cloud/v1";

/// Edition holding the original Arabic text.
const ORIGINAL_EDITION: &str = "quran-simple";

#[derive(Deserialize, Debug)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize, Debug)]
struct Edition {
    ayahs: Vec<ApiAyah>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct ApiAyah {
    number: u32,
    text: String,
    number_in_surah: u32,
    #[serde(default)]
    juz: u32,
}

/// Pairs original and translated ayahs position by position.
///
/// Assumes both editions list verses in the same order. A length mismatch is
/// reported rather than re-aligned.
fn zip_editions(original: Vec<ApiAyah>, translation: Vec<ApiAyah>) -> Result<Vec<Verse>, ApiError> {
    if original.len() != translation.len() {
        return Err(ApiError::Mismatch {
            original: original.len(),
            translation: translation.len(),
        });
    }

    Ok(original
        .into_iter()
        .zip(translation)
        .map(|(ayah, translated)| Verse {
            number: ayah.number,
            number_in_chapter: ayah.number_in_surah,
            text: ayah.text,
            translated_text: Some(translated.text),
            juz: ayah.juz,
        })
        .collect())
}

pub struct QuranClient {
    base_url: String,
    client: reqwest::Client,
}

impl QuranClient {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            base_url: base_url.unwrap_or_else(|| DEFAULT_QURAN_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    /// Fetches the list of all chapters.
    pub async fn fetch_chapters(&self) -> Result<Vec<Chapter>, ApiError> {
        let url = format!("{}/surah", self.base_url);
        let envelope: Envelope<Vec<Chapter>> = get_json(&self.client, &url).await?;
        info!("Fetched {} chapters", envelope.data.len());
        Ok(envelope.data)
    }

    /// Fetches a chapter's verses with their translation in `lang`.
    pub async fn fetch_verses(
        &self,
        chapter: u32,
        lang: TranslationLang,
    ) -> Result<Vec<Verse>, ApiError> {
        let url = format!(
            "{}/surah/{}/editions/{},{}",
            self.base_url,
            chapter,
            ORIGINAL_EDITION,
            lang.edition()
        );
        let envelope: Envelope<Vec<Edition>> = get_json(&self.client, &url).await?;

        let mut editions = envelope.data.into_iter();
        let (Some(original), Some(translation)) = (editions.next(), editions.next()) else {
            warn!("Chapter {chapter}: expected two editions in response");
            return Err(ApiError::Parse("expected two editions".to_string()));
        };

        let verses = zip_editions(original.ayahs, translation.ayahs)?;
        info!(
            "Fetched chapter {} ({} verses, {})",
            chapter,
            verses.len(),
            lang.edition()
        );
        Ok(verses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ayah(number: u32, text: &str) -> ApiAyah {
        ApiAyah {
            number,
            text: text.to_string(),
            number_in_surah: number,
            juz: 1,
        }
    }

    #[test]
    fn test_zip_editions_pairs_positionally() {
        let original = vec![ayah(1, "a1"), ayah(2, "a2"), ayah(3, "a3")];
        let translation = vec![ayah(1, "t1"), ayah(2, "t2"), ayah(3, "t3")];

        let verses = zip_editions(original, translation).unwrap();

        assert_eq!(verses.len(), 3);
        for (i, verse) in verses.iter().enumerate() {
            let n = i + 1;
            assert_eq!(verse.number_in_chapter, n as u32);
            assert_eq!(verse.text, format!("a{n}"));
            assert_eq!(verse.translated_text.as_deref(), Some(format!("t{n}").as_str()));
        }
    }

    #[test]
    fn test_zip_editions_rejects_length_mismatch() {
        let original = vec![ayah(1, "a1"), ayah(2, "a2")];
        let translation = vec![ayah(1, "t1")];

        let result = zip_editions(original, translation);

        assert!(matches!(
            result,
            Err(ApiError::Mismatch {
                original: 2,
                translation: 1
            })
        ));
    }

    #[test]
    fn test_ayah_missing_juz_defaults() {
        let json = r#"{"number": 8, "text": "x", "numberInSurah": 1}"#;
        let parsed: ApiAyah = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.juz, 0);
    }
}
