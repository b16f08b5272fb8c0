//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::Engine;
use crate::core::model::{Chapter, Grading, Narration, TranslationLang, Verse};
use crate::core::state::App;

/// Creates a test App with English and the hosted engine.
pub fn test_app() -> App {
    App::new(TranslationLang::English, Engine::Gemini)
}

pub fn chapter(number: u32, name: &str) -> Chapter {
    Chapter {
        number,
        name: format!("سورة {number}"),
        english_name: name.to_string(),
        english_name_translation: format!("The {name}"),
        number_of_ayahs: 3,
        revelation_type: "Meccan".to_string(),
    }
}

pub fn verse(n: u32) -> Verse {
    Verse {
        number: n,
        number_in_chapter: n,
        text: format!("آية {n}"),
        translated_text: Some(format!("Verse {n}.")),
        juz: 1,
    }
}

pub fn narration(index: usize) -> Narration {
    Narration {
        id: format!("bukhari-{index}"),
        collection: "Bukhari".to_string(),
        book_number: "1".to_string(),
        hadith_number: (index + 1).to_string(),
        arabic_text: "حدثنا الحميدي قال حدثنا سفيان".to_string(),
        english_text: "Actions are judged by intentions. Everyone gets what they intended.".to_string(),
        secondary_translation: None,
        grading: Grading::Sahih,
        graded_by: "Scholarship".to_string(),
        isnad: Some("حدثنا الحميدي...".to_string()),
        chapter_title: "Book 1".to_string(),
    }
}
