//! # Domain Model
//!
//! The entities Nur reads and displays. Everything here is plain data:
//! chapters and verses from the Quran service, narrations from the Hadith
//! service, and the static collection metadata the hub is built from.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A numbered division of the Quran (surah).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub number: u32,
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
    pub number_of_ayahs: u32,
    #[serde(default)]
    pub revelation_type: String,
}

/// A numbered line within a chapter (ayah).
#[derive(Debug, Clone, PartialEq)]
pub struct Verse {
    /// Ordinal across the whole Quran.
    pub number: u32,
    pub number_in_chapter: u32,
    pub text: String,
    pub translated_text: Option<String>,
    pub juz: u32,
}

/// Authenticity verdict attached to a narration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Grading {
    #[default]
    Sahih,
    Hasan,
    Daif,
    Mawdu,
    Unknown,
}

impl Grading {
    /// Lenient parse of an upstream grade string.
    ///
    /// Upstream grades come as free text ("Sahih", "Hasan Sahih", "Da'if",
    /// "Maudu"...). The strongest qualifier wins: a "Hasan Sahih" grade
    /// counts as sound.
    pub fn parse(raw: &str) -> Grading {
        let normalized: String = raw
            .chars()
            .filter(|c| c.is_alphabetic() || c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        if normalized.contains("sahih") {
            Grading::Sahih
        } else if normalized.contains("hasan") {
            Grading::Hasan
        } else if normalized.contains("daif") || normalized.contains("weak") {
            Grading::Daif
        } else if normalized.contains("mawdu")
            || normalized.contains("maudu")
            || normalized.contains("fabricated")
        {
            Grading::Mawdu
        } else {
            Grading::Unknown
        }
    }

    /// Plain-language label for display.
    pub fn label(self) -> &'static str {
        match self {
            Grading::Sahih => "Authentic",
            Grading::Hasan => "Good",
            Grading::Daif => "Weak",
            Grading::Mawdu => "Fabricated",
            Grading::Unknown => "Unknown",
        }
    }

    pub fn term(self) -> &'static str {
        match self {
            Grading::Sahih => "Sahih",
            Grading::Hasan => "Hasan",
            Grading::Daif => "Da'if",
            Grading::Mawdu => "Mawdu",
            Grading::Unknown => "Unknown",
        }
    }
}

/// A single hadith with its Arabic text, English translation and grading.
#[derive(Debug, Clone, PartialEq)]
pub struct Narration {
    /// `"{collection}-{index}"`
    pub id: String,
    pub collection: String,
    pub book_number: String,
    pub hadith_number: String,
    pub arabic_text: String,
    pub english_text: String,
    /// Filled in by an AI translation while the Tamil preference is active.
    /// Lives only as long as the narration list does.
    pub secondary_translation: Option<String>,
    pub grading: Grading,
    pub graded_by: String,
    pub isnad: Option<String>,
    pub chapter_title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CollectionCategory {
    Primary,
    Fiqh,
    Grading,
    NarratorBiography,
    Moral,
}

impl CollectionCategory {
    /// Display order in the collection hub.
    pub const ALL: [CollectionCategory; 5] = [
        CollectionCategory::Primary,
        CollectionCategory::Fiqh,
        CollectionCategory::Grading,
        CollectionCategory::NarratorBiography,
        CollectionCategory::Moral,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CollectionCategory::Primary => "Primary",
            CollectionCategory::Fiqh => "Fiqh",
            CollectionCategory::Grading => "Grading",
            CollectionCategory::NarratorBiography => "Narrator Biography",
            CollectionCategory::Moral => "Moral",
        }
    }
}

/// Accent colour for a collection. Mapped to a terminal colour by the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTheme {
    Amber,
    Cyan,
    Indigo,
    Rose,
    Violet,
    Emerald,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionSize {
    Count(u32),
    Descriptive(&'static str),
}

impl CollectionSize {
    pub fn describe(self) -> String {
        match self {
            CollectionSize::Count(n) => format!("{n} narrations"),
            CollectionSize::Descriptive(s) => s.to_string(),
        }
    }
}

/// Static metadata for a hadith collection or reference work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    pub id: &'static str,
    pub name: &'static str,
    pub author: Option<&'static str>,
    pub description: &'static str,
    pub size: CollectionSize,
    pub category: CollectionCategory,
    pub theme: ColorTheme,
    /// Reference works without an online edition link straight to a document.
    pub document_url: Option<&'static str>,
}

/// An external reading resource (PDF libraries and the like).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resource {
    pub title: &'static str,
    pub url: &'static str,
    pub category: &'static str,
}

/// Language that translations and AI answers are produced in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationLang {
    #[default]
    English,
    Tamil,
}

impl TranslationLang {
    /// Quran service translation edition.
    pub fn edition(self) -> &'static str {
        match self {
            TranslationLang::English => "en.sahih",
            TranslationLang::Tamil => "ta.tamil",
        }
    }

    /// Language name as written into AI prompts.
    pub fn name(self) -> &'static str {
        match self {
            TranslationLang::English => "English",
            TranslationLang::Tamil => "Tamil",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            TranslationLang::English => "en",
            TranslationLang::Tamil => "ta",
        }
    }

    pub fn toggled(self) -> TranslationLang {
        match self {
            TranslationLang::English => TranslationLang::Tamil,
            TranslationLang::Tamil => TranslationLang::English,
        }
    }
}
