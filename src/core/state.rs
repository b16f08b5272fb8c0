//! # Application State
//!
//! Core view state for Nur. This module contains domain logic only -
//! no TUI-specific types. Presentation state (list cursors, scroll offsets)
//! lives in the `tui` module.
//!
//! ```text
//! App
//! ├── screen / previous_screen     // which view is showing
//! ├── chapters                     // chapter index, fetched at startup
//! ├── selected_chapter, verses     // open chapter
//! ├── active_collection, narrations// open hadith collection
//! ├── document                     // what the document viewer shows
//! ├── loading: Loading             // per-slice busy flags
//! ├── overlay: Overlay             // AI translation / isnad modal
//! ├── notice: Option<String>       // user-visible failure alert
//! ├── language, engine             // preferences
//! └── generations: Generations     // per-slice request counters
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::Engine;
use crate::core::model::{Chapter, Collection, Narration, Resource, TranslationLang, Verse};
use crate::inference::{AiInsight, IsnadAnalysis};

/// The fixed set of screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Home,
    ChapterList,
    ChapterDetail,
    CollectionHub,
    NarrationList,
    ResourceList,
    DocumentViewer,
}

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Home => "Sacred Nur",
            Screen::ChapterList => "Noble Quran",
            Screen::ChapterDetail => "Surah",
            Screen::CollectionHub => "Hadith Collections",
            Screen::NarrationList => "Narrations",
            Screen::ResourceList => "Resources",
            Screen::DocumentViewer => "Document",
        }
    }
}

/// The modal layered over the current screen.
///
/// Exactly one of these is live, so an insight and an isnad study can never
/// both be on display.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Overlay {
    #[default]
    None,
    Translating {
        context: String,
    },
    Insight {
        context: String,
        insight: AiInsight,
    },
    AnalyzingIsnad {
        narration: usize,
    },
    IsnadResult {
        narration: usize,
        analysis: IsnadAnalysis,
    },
}

impl Overlay {
    pub fn is_open(&self) -> bool {
        !matches!(self, Overlay::None)
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Overlay::Translating { .. } | Overlay::AnalyzingIsnad { .. }
        )
    }
}

/// What produced the text of an insight request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightOrigin {
    Verse(usize),
    /// Narration id, so a cached translation lands on the right entry even
    /// if the list was reordered.
    Narration(String),
    Fragment,
}

/// What the document viewer is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Collection(&'static Collection),
    Resource(&'static Resource),
}

impl Document {
    pub fn title(&self) -> &'static str {
        match self {
            Document::Collection(c) => c.name,
            Document::Resource(r) => r.title,
        }
    }

    pub fn url(&self) -> Option<&'static str> {
        match self {
            Document::Collection(c) => c.document_url,
            Document::Resource(r) => Some(r.url),
        }
    }
}

/// Request counters, one per state slice. A response carries the counter
/// value from when it was requested and is dropped if the slice has moved on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Generations {
    pub chapters: u64,
    pub verses: u64,
    pub narrations: u64,
    pub overlay: u64,
}

/// Fetches in flight, one flag per list slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Loading {
    pub chapters: bool,
    pub verses: bool,
    pub narrations: bool,
}

impl Loading {
    pub fn any(&self) -> bool {
        self.chapters || self.verses || self.narrations
    }
}

pub struct App {
    pub screen: Screen,
    pub previous_screen: Option<Screen>,
    pub status_message: String,
    pub chapters: Vec<Chapter>,
    pub selected_chapter: Option<Chapter>,
    pub verses: Vec<Verse>,
    pub active_collection: Option<&'static Collection>,
    pub narrations: Vec<Narration>,
    pub document: Option<Document>,
    pub loading: Loading,
    pub overlay: Overlay,
    /// Origin of the insight request currently in flight.
    pub insight_origin: Option<InsightOrigin>,
    /// Language the in-flight insight was requested in.
    pub insight_language: TranslationLang,
    pub notice: Option<String>,
    pub language: TranslationLang,
    pub engine: Engine,
    pub generations: Generations,
}

impl App {
    pub fn new(language: TranslationLang, engine: Engine) -> Self {
        Self {
            screen: Screen::Home,
            previous_screen: None,
            status_message: String::from("Welcome to Nur"),
            chapters: Vec::new(),
            selected_chapter: None,
            verses: Vec::new(),
            active_collection: None,
            narrations: Vec::new(),
            document: None,
            loading: Loading::default(),
            overlay: Overlay::None,
            insight_origin: None,
            insight_language: language,
            notice: None,
            language,
            engine,
            generations: Generations::default(),
        }
    }

    /// Switches screens, remembering where we came from.
    pub fn go_to(&mut self, screen: Screen) {
        if screen != self.screen {
            self.previous_screen = Some(self.screen);
            self.screen = screen;
        }
    }

    pub fn is_translating(&self) -> bool {
        matches!(self.overlay, Overlay::Translating { .. })
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self.overlay, Overlay::AnalyzingIsnad { .. })
    }
}
