//! # Catalog
//!
//! Static metadata for the hadith collections and the external resource
//! library. Defined at compile time and never mutated.

use crate::core::model::{
    Collection, CollectionCategory, CollectionSize, ColorTheme, Resource,
};

pub const COLLECTIONS: &[Collection] = &[
    Collection {
        id: "bukhari",
        name: "Sahih al-Bukhari",
        author: Some("Muhammad al-Bukhari"),
        description: "Most authentic collection of Prophetic narrations.",
        size: CollectionSize::Count(7563),
        category: CollectionCategory::Primary,
        theme: ColorTheme::Amber,
        document_url: None,
    },
    Collection {
        id: "muslim",
        name: "Sahih Muslim",
        author: Some("Muslim ibn al-Hajjaj"),
        description: "Renowned for its rigorous isnad verification.",
        size: CollectionSize::Count(3033),
        category: CollectionCategory::Primary,
        theme: ColorTheme::Amber,
        document_url: None,
    },
    Collection {
        id: "abudawud",
        name: "Sunan Abi Dawud",
        author: Some("Abu Dawud al-Sijistani"),
        description: "Focused on legal (Fiqh) narrations.",
        size: CollectionSize::Count(5274),
        category: CollectionCategory::Primary,
        theme: ColorTheme::Amber,
        document_url: None,
    },
    Collection {
        id: "tirmidhi",
        name: "Jami` at-Tirmidhi",
        author: Some("Abu Isa at-Tirmidhi"),
        description: "Known for categorization and grading notes.",
        size: CollectionSize::Count(3956),
        category: CollectionCategory::Primary,
        theme: ColorTheme::Amber,
        document_url: None,
    },
    Collection {
        id: "nasai",
        name: "Sunan an-Nasa'i",
        author: Some("Ahmad an-Nasa'i"),
        description: "Detailed in ritual practices.",
        size: CollectionSize::Count(5758),
        category: CollectionCategory::Primary,
        theme: ColorTheme::Amber,
        document_url: None,
    },
    Collection {
        id: "ibnmajah",
        name: "Sunan Ibn Majah",
        author: Some("Ibn Majah al-Qazwini"),
        description: "The sixth of the major collections.",
        size: CollectionSize::Count(4341),
        category: CollectionCategory::Primary,
        theme: ColorTheme::Amber,
        document_url: None,
    },
    Collection {
        id: "bulugh",
        name: "Bulugh al-Maram",
        author: Some("Ibn Hajar al-Asqalani"),
        description: "Hadith used for Islamic jurisprudence (Fiqh).",
        size: CollectionSize::Count(1596),
        category: CollectionCategory::Fiqh,
        theme: ColorTheme::Cyan,
        document_url: None,
    },
    Collection {
        id: "daraqutni",
        name: "Sunan al-Daraqutni",
        author: Some("Ali ibn Umar al-Daraqutni"),
        description: "Specialized in isnad criticism.",
        size: CollectionSize::Count(4898),
        category: CollectionCategory::Grading,
        theme: ColorTheme::Indigo,
        document_url: None,
    },
    Collection {
        id: "tahdhib",
        name: "Tahdhib al-Tahdhib",
        author: Some("Ibn Hajar al-Asqalani"),
        description: "Biographical dictionary of hadith transmitters.",
        size: CollectionSize::Descriptive("12 volumes"),
        category: CollectionCategory::NarratorBiography,
        theme: ColorTheme::Violet,
        document_url: Some("https://archive.org/details/tahdhib-al-tahdhib"),
    },
    Collection {
        id: "taqrib",
        name: "Taqrib al-Tahdhib",
        author: Some("Ibn Hajar al-Asqalani"),
        description: "Concise narrator gradings, one line per transmitter.",
        size: CollectionSize::Descriptive("1 volume"),
        category: CollectionCategory::NarratorBiography,
        theme: ColorTheme::Violet,
        document_url: Some("https://archive.org/details/taqrib-al-tahdhib"),
    },
    Collection {
        id: "riyad",
        name: "Riyad as-Salihin",
        author: Some("Yahya ibn Sharaf an-Nawawi"),
        description: "Moral and spiritual guidance.",
        size: CollectionSize::Count(1896),
        category: CollectionCategory::Moral,
        theme: ColorTheme::Rose,
        document_url: None,
    },
];

pub const RESOURCES: &[Resource] = &[
    Resource {
        title: "King Fahd Complex (Arabic PDFs)",
        url: "https://www.pdfquran.com",
        category: "Quran",
    },
    Resource {
        title: "Quran Hayat HQ Downloads",
        url: "https://quranhayat.com/pdf/",
        category: "Quran",
    },
    Resource {
        title: "Kutub al-Sittah PDFs",
        url: "https://surahquran.com/pdf-hadith-books.html",
        category: "Hadith",
    },
    Resource {
        title: "Archive.org Hadith Collection",
        url: "https://archive.org/details/all-hadith-books-pdf",
        category: "Hadith",
    },
    Resource {
        title: "Fiqh & Adillah (Archive)",
        url: "https://archive.org/details/fia2_20200228",
        category: "Fiqh",
    },
    Resource {
        title: "Isnad & Matan Analysis",
        url: "https://www.scribd.com/document/806521352/Isnad-and-Matan",
        category: "Research",
    },
];

/// Looks up a collection by its id.
pub fn find_collection(id: &str) -> Option<&'static Collection> {
    COLLECTIONS.iter().find(|c| c.id == id)
}

/// Buckets the catalog by category, in display order. Empty categories are
/// left out.
pub fn collections_by_category() -> Vec<(CollectionCategory, Vec<&'static Collection>)> {
    CollectionCategory::ALL
        .iter()
        .filter_map(|&category| {
            let books: Vec<&'static Collection> = COLLECTIONS
                .iter()
                .filter(|c| c.category == category)
                .collect();
            (!books.is_empty()).then_some((category, books))
        })
        .collect()
}

/// Flattened hub order: the collections exactly as the hub lists them.
pub fn hub_order() -> Vec<&'static Collection> {
    collections_by_category()
        .into_iter()
        .flat_map(|(_, books)| books)
        .collect()
}
