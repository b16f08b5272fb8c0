//! # Actions
//!
//! Everything that can happen in Nur becomes an `Action`.
//! User opens a chapter? That's `Action::OpenChapter(index)`.
//! The Quran service answers? That's `Action::VersesLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` naming the remote call to make next.
//! No I/O here. The TUI runs the effect and feeds the result back in.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Every fetch follows the same template: mark busy, bump the slice's
//! generation, return the effect. The result action carries the generation it
//! was issued with; if the slice has moved on since, the result is dropped.

use log::{debug, info, warn};

use crate::Engine;
use crate::api::ApiError;
use crate::core::catalog::{RESOURCES, find_collection};
use crate::core::model::{Chapter, Narration, TranslationLang, Verse};
use crate::core::state::{App, Document, InsightOrigin, Overlay, Screen};
use crate::inference::{AiInsight, EngineError, InsightRequest, IsnadAnalysis};

/// Stand-in chain when a narration has none.
pub const MISSING_CHAIN: &str = "Chain not provided";

#[derive(Debug)]
pub enum Action {
    Navigate(Screen),
    Back,
    LoadChapters,
    ChaptersLoaded {
        generation: u64,
        result: Result<Vec<Chapter>, ApiError>,
    },
    OpenChapter(usize),
    /// Re-fetch the open chapter in the current language.
    ReloadTranslation,
    VersesLoaded {
        generation: u64,
        result: Result<Vec<Verse>, ApiError>,
    },
    OpenCollection(String),
    NarrationsLoaded {
        generation: u64,
        narrations: Vec<Narration>,
    },
    OpenResource(usize),
    ExplainVerse(usize),
    ExplainNarration(usize),
    RequestInsight {
        text: String,
        context: String,
        origin: InsightOrigin,
    },
    InsightReady {
        generation: u64,
        result: Result<AiInsight, EngineError>,
    },
    AnalyzeIsnad(usize),
    IsnadReady {
        generation: u64,
        result: Result<IsnadAnalysis, EngineError>,
    },
    DismissOverlay,
    DismissNotice,
    ToggleLanguage,
    ToggleEngine,
    Quit,
}

/// Side effects requested by `update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchChapters {
        generation: u64,
    },
    FetchVerses {
        generation: u64,
        chapter: u32,
        language: TranslationLang,
    },
    FetchNarrations {
        generation: u64,
        collection: &'static str,
    },
    FetchInsight {
        generation: u64,
        request: InsightRequest,
    },
    FetchIsnad {
        generation: u64,
        chain: String,
        text: String,
    },
    EngineChanged(Engine),
}

/// Where `Back` leads from each screen.
fn parent_screen(app: &App) -> Screen {
    match app.screen {
        Screen::Home | Screen::ChapterList | Screen::CollectionHub | Screen::ResourceList => {
            Screen::Home
        }
        Screen::ChapterDetail => Screen::ChapterList,
        Screen::NarrationList => Screen::CollectionHub,
        Screen::DocumentViewer => match app.document {
            Some(Document::Resource(_)) => Screen::ResourceList,
            Some(Document::Collection(_)) => Screen::CollectionHub,
            None => Screen::Home,
        },
    }
}

fn fetch_chapters(app: &mut App) -> Effect {
    app.loading.chapters = true;
    app.generations.chapters += 1;
    Effect::FetchChapters {
        generation: app.generations.chapters,
    }
}

fn fetch_verses(app: &mut App, chapter: u32) -> Effect {
    app.verses.clear();
    app.loading.verses = true;
    app.generations.verses += 1;
    Effect::FetchVerses {
        generation: app.generations.verses,
        chapter,
        language: app.language,
    }
}

/// Replaces whatever the overlay shows with a fresh insight request.
fn request_insight(app: &mut App, text: String, context: String, origin: InsightOrigin) -> Effect {
    app.generations.overlay += 1;
    app.insight_origin = Some(origin);
    app.insight_language = app.language;
    app.overlay = Overlay::Translating {
        context: context.clone(),
    };
    Effect::FetchInsight {
        generation: app.generations.overlay,
        request: InsightRequest {
            text,
            context,
            language: app.language,
        },
    }
}

fn close_overlay(app: &mut App) {
    // Anything still in flight for the old overlay is now stale
    app.generations.overlay += 1;
    app.overlay = Overlay::None;
    app.insight_origin = None;
}

fn is_stale(slice: &str, generation: u64, current: u64) -> bool {
    if generation != current {
        debug!("Dropping stale {slice} response (generation {generation}, current {current})");
        return true;
    }
    false
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Navigate(screen) => {
            app.go_to(screen);
            if screen == Screen::ChapterList && app.chapters.is_empty() && !app.loading.chapters {
                return fetch_chapters(app);
            }
            Effect::None
        }
        Action::Back => {
            if app.notice.is_some() {
                app.notice = None;
            } else if app.overlay.is_open() {
                close_overlay(app);
            } else {
                let parent = parent_screen(app);
                app.go_to(parent);
            }
            Effect::None
        }
        Action::LoadChapters => fetch_chapters(app),
        Action::ChaptersLoaded { generation, result } => {
            if is_stale("chapters", generation, app.generations.chapters) {
                return Effect::None;
            }
            app.loading.chapters = false;
            match result {
                Ok(chapters) => {
                    info!("Loaded {} chapters", chapters.len());
                    app.chapters = chapters;
                }
                Err(e) => {
                    warn!("Chapter list failed: {e}");
                    app.notice = Some(format!("Could not load the chapter list.\n{e}"));
                }
            }
            Effect::None
        }
        Action::OpenChapter(index) => {
            let Some(chapter) = app.chapters.get(index).cloned() else {
                warn!("OpenChapter: no chapter at index {index}");
                return Effect::None;
            };
            info!("Opening chapter {} ({})", chapter.number, chapter.english_name);
            let number = chapter.number;
            app.selected_chapter = Some(chapter);
            app.go_to(Screen::ChapterDetail);
            fetch_verses(app, number)
        }
        Action::ReloadTranslation => match app.selected_chapter.as_ref().map(|c| c.number) {
            Some(number) => {
                app.status_message = format!("Reloading in {}", app.language.name());
                fetch_verses(app, number)
            }
            None => Effect::None,
        },
        Action::VersesLoaded { generation, result } => {
            if is_stale("verses", generation, app.generations.verses) {
                return Effect::None;
            }
            app.loading.verses = false;
            match result {
                Ok(verses) => app.verses = verses,
                Err(e) => {
                    warn!("Verse fetch failed: {e}");
                    app.notice = Some(format!("Translation load failed.\n{e}"));
                    if app.screen == Screen::ChapterDetail {
                        let back_to = app.previous_screen.unwrap_or(Screen::ChapterList);
                        app.go_to(back_to);
                    }
                }
            }
            Effect::None
        }
        Action::OpenCollection(id) => {
            let Some(collection) = find_collection(&id) else {
                warn!("OpenCollection: unknown collection {id}");
                app.notice = Some(format!("Unknown collection: {id}"));
                return Effect::None;
            };
            if collection.document_url.is_some() {
                app.document = Some(Document::Collection(collection));
                app.go_to(Screen::DocumentViewer);
                return Effect::None;
            }

            info!("Opening collection {}", collection.id);
            app.active_collection = Some(collection);
            app.narrations.clear();
            app.loading.narrations = true;
            app.generations.narrations += 1;
            app.go_to(Screen::NarrationList);
            Effect::FetchNarrations {
                generation: app.generations.narrations,
                collection: collection.id,
            }
        }
        Action::NarrationsLoaded {
            generation,
            narrations,
        } => {
            if is_stale("narrations", generation, app.generations.narrations) {
                return Effect::None;
            }
            app.loading.narrations = false;
            if narrations.is_empty() {
                app.status_message = "No narrations available".to_string();
            }
            app.narrations = narrations;
            Effect::None
        }
        Action::OpenResource(index) => {
            match RESOURCES.get(index) {
                Some(resource) => {
                    app.document = Some(Document::Resource(resource));
                    app.go_to(Screen::DocumentViewer);
                }
                None => warn!("OpenResource: no resource at index {index}"),
            }
            Effect::None
        }
        Action::ExplainVerse(index) => {
            let Some(verse) = app.verses.get(index) else {
                return Effect::None;
            };
            let chapter_name = app
                .selected_chapter
                .as_ref()
                .map(|c| c.english_name.as_str())
                .unwrap_or("the Quran");
            let context = format!("Verse {} of {}", verse.number_in_chapter, chapter_name);
            let text = verse.text.clone();
            request_insight(app, text, context, InsightOrigin::Verse(index))
        }
        Action::ExplainNarration(index) => {
            let Some(narration) = app.narrations.get(index) else {
                return Effect::None;
            };
            let context = format!("Hadith from {}", narration.collection);
            let text = narration.arabic_text.clone();
            let origin = InsightOrigin::Narration(narration.id.clone());
            request_insight(app, text, context, origin)
        }
        Action::RequestInsight {
            text,
            context,
            origin,
        } => request_insight(app, text, context, origin),
        Action::InsightReady { generation, result } => {
            if is_stale("insight", generation, app.generations.overlay) {
                return Effect::None;
            }
            let context = match &app.overlay {
                Overlay::Translating { context } => context.clone(),
                _ => String::new(),
            };
            match result {
                Ok(insight) => {
                    if let Some(InsightOrigin::Narration(id)) = &app.insight_origin
                        && app.insight_language == TranslationLang::Tamil
                        && let Some(narration) = app.narrations.iter_mut().find(|n| &n.id == id)
                    {
                        narration.secondary_translation = Some(insight.translation.clone());
                    }
                    app.overlay = Overlay::Insight { context, insight };
                }
                Err(e) => {
                    warn!("Insight failed: {e}");
                    app.notice = Some(format!("AI insight failed.\n{e}"));
                    close_overlay(app);
                }
            }
            Effect::None
        }
        Action::AnalyzeIsnad(index) => {
            let Some(narration) = app.narrations.get(index) else {
                return Effect::None;
            };
            let chain = narration
                .isnad
                .clone()
                .unwrap_or_else(|| MISSING_CHAIN.to_string());
            let text = narration.arabic_text.clone();

            app.generations.overlay += 1;
            app.insight_origin = None;
            app.overlay = Overlay::AnalyzingIsnad { narration: index };
            Effect::FetchIsnad {
                generation: app.generations.overlay,
                chain,
                text,
            }
        }
        Action::IsnadReady { generation, result } => {
            if is_stale("isnad", generation, app.generations.overlay) {
                return Effect::None;
            }
            let Overlay::AnalyzingIsnad { narration } = app.overlay else {
                debug!("Dropping isnad response: overlay is no longer analyzing");
                return Effect::None;
            };
            match result {
                Ok(analysis) => {
                    app.overlay = Overlay::IsnadResult {
                        narration,
                        analysis,
                    }
                }
                Err(e) => {
                    warn!("Isnad analysis failed: {e}");
                    app.notice = Some(format!("Chain study failed.\n{e}"));
                    close_overlay(app);
                }
            }
            Effect::None
        }
        Action::DismissOverlay => {
            close_overlay(app);
            Effect::None
        }
        Action::DismissNotice => {
            app.notice = None;
            Effect::None
        }
        Action::ToggleLanguage => {
            // Preference only. Loaded verses keep their translation until
            // the user reloads.
            app.language = app.language.toggled();
            app.status_message = format!("Translation: {}", app.language.name());
            Effect::None
        }
        Action::ToggleEngine => {
            app.engine = app.engine.next();
            app.status_message = format!("AI engine: {}", app.engine.label());
            Effect::EngineChanged(app.engine)
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::NarratorRecord;
    use crate::test_support::{chapter, narration, test_app, verse};

    fn insight() -> AiInsight {
        AiInsight {
            translation: "translated".to_string(),
            explanation: "explained".to_string(),
            key_themes: vec!["mercy".to_string()],
        }
    }

    fn analysis() -> IsnadAnalysis {
        IsnadAnalysis {
            reliability: "Sahih".to_string(),
            narrators: vec![NarratorRecord {
                name: "Al-Humaydi".to_string(),
                reliability: "Thiqah".to_string(),
                bio: "Companion of al-Shafi'i".to_string(),
            }],
            scholarly_notes: "Connected chain".to_string(),
        }
    }

    fn app_with_chapters() -> App {
        let mut app = test_app();
        app.chapters = vec![chapter(1, "Al-Faatiha"), chapter(2, "Al-Baqara")];
        app.screen = Screen::ChapterList;
        app
    }

    fn app_with_narrations() -> App {
        let mut app = test_app();
        app.narrations = vec![narration(0), narration(1)];
        app.screen = Screen::NarrationList;
        app
    }

    #[test]
    fn test_navigate_to_empty_chapter_list_fetches() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Navigate(Screen::ChapterList));
        assert_eq!(effect, Effect::FetchChapters { generation: 1 });
        assert!(app.loading.chapters);
        assert_eq!(app.screen, Screen::ChapterList);
    }

    #[test]
    fn test_navigate_to_loaded_chapter_list_does_not_fetch() {
        let mut app = app_with_chapters();
        app.screen = Screen::Home;
        let effect = update(&mut app, Action::Navigate(Screen::ChapterList));
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn test_chapters_loaded_stores_list() {
        let mut app = test_app();
        let Effect::FetchChapters { generation } = update(&mut app, Action::LoadChapters) else {
            panic!("expected FetchChapters");
        };
        update(
            &mut app,
            Action::ChaptersLoaded {
                generation,
                result: Ok(vec![chapter(1, "Al-Faatiha")]),
            },
        );
        assert_eq!(app.chapters.len(), 1);
        assert!(!app.loading.chapters);
    }

    #[test]
    fn test_chapters_failure_sets_notice() {
        let mut app = test_app();
        update(&mut app, Action::LoadChapters);
        update(
            &mut app,
            Action::ChaptersLoaded {
                generation: 1,
                result: Err(ApiError::Network("offline".to_string())),
            },
        );
        assert!(app.notice.as_deref().unwrap().contains("offline"));
        assert!(!app.loading.chapters);
    }

    #[test]
    fn test_open_chapter_marks_busy_and_switches_screen() {
        let mut app = app_with_chapters();
        app.verses = vec![verse(1)];

        let effect = update(&mut app, Action::OpenChapter(1));

        assert_eq!(
            effect,
            Effect::FetchVerses {
                generation: 1,
                chapter: 2,
                language: TranslationLang::English,
            }
        );
        assert!(app.loading.verses);
        assert!(app.verses.is_empty());
        assert_eq!(app.screen, Screen::ChapterDetail);
        assert_eq!(app.selected_chapter.as_ref().unwrap().english_name, "Al-Baqara");
    }

    #[test]
    fn test_open_chapter_out_of_range_is_ignored() {
        let mut app = app_with_chapters();
        assert_eq!(update(&mut app, Action::OpenChapter(9)), Effect::None);
        assert_eq!(app.screen, Screen::ChapterList);
    }

    #[test]
    fn test_verses_loaded_fills_state() {
        let mut app = app_with_chapters();
        update(&mut app, Action::OpenChapter(0));
        update(
            &mut app,
            Action::VersesLoaded {
                generation: 1,
                result: Ok(vec![verse(1), verse(2), verse(3)]),
            },
        );
        assert_eq!(app.verses.len(), 3);
        assert!(!app.loading.verses);
    }

    #[test]
    fn test_verse_failure_reverts_to_previous_screen() {
        let mut app = app_with_chapters();
        update(&mut app, Action::OpenChapter(0));
        update(
            &mut app,
            Action::VersesLoaded {
                generation: 1,
                result: Err(ApiError::Mismatch {
                    original: 3,
                    translation: 2,
                }),
            },
        );
        assert_eq!(app.screen, Screen::ChapterList);
        assert!(app.notice.as_deref().unwrap().starts_with("Translation load failed"));
        assert!(!app.loading.verses);
    }

    #[test]
    fn test_stale_verses_are_dropped() {
        let mut app = app_with_chapters();
        update(&mut app, Action::OpenChapter(0)); // generation 1
        update(&mut app, Action::Back);
        update(&mut app, Action::OpenChapter(1)); // generation 2

        // The first chapter's response lands late
        update(
            &mut app,
            Action::VersesLoaded {
                generation: 1,
                result: Ok(vec![verse(1)]),
            },
        );
        assert!(app.verses.is_empty());
        assert!(app.loading.verses);

        update(
            &mut app,
            Action::VersesLoaded {
                generation: 2,
                result: Ok(vec![verse(1), verse(2)]),
            },
        );
        assert_eq!(app.verses.len(), 2);
        assert!(!app.loading.verses);
    }

    #[test]
    fn test_toggle_language_does_not_refetch() {
        let mut app = app_with_chapters();
        update(&mut app, Action::OpenChapter(0));
        update(
            &mut app,
            Action::VersesLoaded {
                generation: 1,
                result: Ok(vec![verse(1), verse(2)]),
            },
        );
        let verses_before = app.verses.clone();

        let effect = update(&mut app, Action::ToggleLanguage);

        assert_eq!(effect, Effect::None);
        assert_eq!(app.language, TranslationLang::Tamil);
        assert_eq!(app.verses, verses_before);
        assert!(!app.loading.verses);
        assert_eq!(app.generations.verses, 1);
    }

    #[test]
    fn test_reload_translation_uses_new_language() {
        let mut app = app_with_chapters();
        update(&mut app, Action::OpenChapter(0));
        update(&mut app, Action::ToggleLanguage);

        let effect = update(&mut app, Action::ReloadTranslation);

        assert_eq!(
            effect,
            Effect::FetchVerses {
                generation: 2,
                chapter: 1,
                language: TranslationLang::Tamil,
            }
        );
    }

    #[test]
    fn test_reload_without_chapter_is_noop() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::ReloadTranslation), Effect::None);
    }

    #[test]
    fn test_open_collection_fetches_narrations() {
        let mut app = test_app();
        app.narrations = vec![narration(0)];

        let effect = update(&mut app, Action::OpenCollection("bukhari".to_string()));

        assert_eq!(
            effect,
            Effect::FetchNarrations {
                generation: 1,
                collection: "bukhari",
            }
        );
        assert!(app.narrations.is_empty());
        assert_eq!(app.screen, Screen::NarrationList);
        assert_eq!(app.active_collection.map(|c| c.id), Some("bukhari"));
    }

    #[test]
    fn test_open_document_collection_shows_viewer() {
        let mut app = test_app();
        app.screen = Screen::CollectionHub;

        let effect = update(&mut app, Action::OpenCollection("tahdhib".to_string()));

        assert_eq!(effect, Effect::None);
        assert_eq!(app.screen, Screen::DocumentViewer);
        assert!(app.document.and_then(|d| d.url()).is_some());

        update(&mut app, Action::Back);
        assert_eq!(app.screen, Screen::CollectionHub);
    }

    #[test]
    fn test_open_unknown_collection_sets_notice() {
        let mut app = test_app();
        assert_eq!(
            update(&mut app, Action::OpenCollection("nope".to_string())),
            Effect::None
        );
        assert!(app.notice.is_some());
    }

    #[test]
    fn test_empty_narrations_are_accepted() {
        let mut app = test_app();
        update(&mut app, Action::OpenCollection("riyad".to_string()));
        update(
            &mut app,
            Action::NarrationsLoaded {
                generation: 1,
                narrations: Vec::new(),
            },
        );
        assert!(!app.loading.narrations);
        assert_eq!(app.screen, Screen::NarrationList);
        assert_eq!(app.status_message, "No narrations available");
    }

    #[test]
    fn test_stale_narrations_are_dropped() {
        let mut app = test_app();
        update(&mut app, Action::OpenCollection("bukhari".to_string()));
        update(&mut app, Action::OpenCollection("muslim".to_string()));
        update(
            &mut app,
            Action::NarrationsLoaded {
                generation: 1,
                narrations: vec![narration(0)],
            },
        );
        assert!(app.narrations.is_empty());
        assert!(app.loading.narrations);
    }

    #[test]
    fn test_chapter_result_leaves_narration_fetch_busy() {
        let mut app = test_app();
        let Effect::FetchChapters { generation } = update(&mut app, Action::LoadChapters) else {
            panic!("expected FetchChapters");
        };
        update(&mut app, Action::OpenCollection("bukhari".to_string()));

        update(
            &mut app,
            Action::ChaptersLoaded {
                generation,
                result: Ok(vec![chapter(1, "Al-Faatiha")]),
            },
        );

        assert_eq!(app.screen, Screen::NarrationList);
        assert!(!app.loading.chapters);
        assert!(app.loading.narrations);
        assert!(app.narrations.is_empty());
    }

    #[test]
    fn test_chapter_list_fetches_while_narrations_busy() {
        let mut app = test_app();
        update(&mut app, Action::LoadChapters);
        update(
            &mut app,
            Action::ChaptersLoaded {
                generation: 1,
                result: Err(ApiError::Network("offline".to_string())),
            },
        );
        update(&mut app, Action::DismissNotice);
        update(&mut app, Action::Navigate(Screen::CollectionHub));
        update(&mut app, Action::OpenCollection("bukhari".to_string()));
        update(&mut app, Action::Back);
        update(&mut app, Action::Back);

        let effect = update(&mut app, Action::Navigate(Screen::ChapterList));

        assert_eq!(effect, Effect::FetchChapters { generation: 2 });
        assert!(app.loading.chapters);
        assert!(app.loading.narrations);
    }

    #[test]
    fn test_open_resource() {
        let mut app = test_app();
        app.screen = Screen::ResourceList;
        update(&mut app, Action::OpenResource(0));
        assert_eq!(app.screen, Screen::DocumentViewer);
        assert_eq!(app.document.map(|d| d.title()), Some(RESOURCES[0].title));

        update(&mut app, Action::Back);
        assert_eq!(app.screen, Screen::ResourceList);
    }

    #[test]
    fn test_explain_verse_builds_context() {
        let mut app = app_with_chapters();
        update(&mut app, Action::OpenChapter(0));
        update(
            &mut app,
            Action::VersesLoaded {
                generation: 1,
                result: Ok(vec![verse(1), verse(2)]),
            },
        );

        let effect = update(&mut app, Action::ExplainVerse(1));

        let Effect::FetchInsight { request, .. } = effect else {
            panic!("expected FetchInsight, got {effect:?}");
        };
        assert_eq!(request.context, "Verse 2 of Al-Faatiha");
        assert_eq!(request.text, "آية 2");
        assert!(app.is_translating());
        // Screen doesn't change for overlay actions
        assert_eq!(app.screen, Screen::ChapterDetail);
    }

    #[test]
    fn test_insight_request_clears_isnad_result() {
        let mut app = app_with_narrations();
        update(&mut app, Action::AnalyzeIsnad(0));
        let generation = app.generations.overlay;
        update(
            &mut app,
            Action::IsnadReady {
                generation,
                result: Ok(analysis()),
            },
        );
        assert!(matches!(app.overlay, Overlay::IsnadResult { .. }));

        update(&mut app, Action::ExplainNarration(1));

        assert!(matches!(app.overlay, Overlay::Translating { .. }));
        assert!(app.is_translating());
        assert!(!app.is_analyzing());
    }

    #[test]
    fn test_isnad_request_clears_insight_result() {
        let mut app = app_with_narrations();
        update(&mut app, Action::ExplainNarration(0));
        let generation = app.generations.overlay;
        update(
            &mut app,
            Action::InsightReady {
                generation,
                result: Ok(insight()),
            },
        );
        assert!(matches!(app.overlay, Overlay::Insight { .. }));

        let effect = update(&mut app, Action::AnalyzeIsnad(1));

        assert!(matches!(effect, Effect::FetchIsnad { .. }));
        assert_eq!(app.overlay, Overlay::AnalyzingIsnad { narration: 1 });
    }

    #[test]
    fn test_late_isnad_result_does_not_replace_new_insight() {
        let mut app = app_with_narrations();
        update(&mut app, Action::AnalyzeIsnad(0));
        let isnad_generation = app.generations.overlay;
        update(&mut app, Action::ExplainNarration(0));

        update(
            &mut app,
            Action::IsnadReady {
                generation: isnad_generation,
                result: Ok(analysis()),
            },
        );

        assert!(app.is_translating());
    }

    #[test]
    fn test_dismissed_overlay_ignores_late_result() {
        let mut app = app_with_narrations();
        update(&mut app, Action::ExplainNarration(0));
        let generation = app.generations.overlay;
        update(&mut app, Action::DismissOverlay);

        update(
            &mut app,
            Action::InsightReady {
                generation,
                result: Ok(insight()),
            },
        );

        assert_eq!(app.overlay, Overlay::None);
    }

    #[test]
    fn test_insight_failure_closes_overlay_with_notice() {
        let mut app = app_with_narrations();
        update(&mut app, Action::ExplainNarration(0));
        let generation = app.generations.overlay;
        update(
            &mut app,
            Action::InsightReady {
                generation,
                result: Err(EngineError::Network("connection refused".to_string())),
            },
        );
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.notice.as_deref().unwrap().contains("connection refused"));
    }

    #[test]
    fn test_isnad_failure_closes_overlay_with_notice() {
        let mut app = app_with_narrations();
        update(&mut app, Action::AnalyzeIsnad(0));
        let generation = app.generations.overlay;
        update(
            &mut app,
            Action::IsnadReady {
                generation,
                result: Err(EngineError::Parse("bad json".to_string())),
            },
        );
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.notice.as_deref().unwrap().starts_with("Chain study failed"));
    }

    #[test]
    fn test_isnad_result_without_pending_analysis_is_dropped() {
        let mut app = app_with_narrations();
        update(&mut app, Action::ExplainNarration(1));
        let generation = app.generations.overlay;

        let effect = update(
            &mut app,
            Action::IsnadReady {
                generation,
                result: Ok(analysis()),
            },
        );

        assert_eq!(effect, Effect::None);
        assert!(app.is_translating());
    }

    #[test]
    fn test_missing_chain_uses_placeholder() {
        let mut app = app_with_narrations();
        app.narrations[0].isnad = None;
        let effect = update(&mut app, Action::AnalyzeIsnad(0));
        let Effect::FetchIsnad { chain, .. } = effect else {
            panic!("expected FetchIsnad");
        };
        assert_eq!(chain, MISSING_CHAIN);
    }

    #[test]
    fn test_tamil_insight_is_cached_on_narration() {
        let mut app = app_with_narrations();
        update(&mut app, Action::ToggleLanguage);
        update(&mut app, Action::ExplainNarration(1));
        let generation = app.generations.overlay;
        update(
            &mut app,
            Action::InsightReady {
                generation,
                result: Ok(insight()),
            },
        );
        assert_eq!(
            app.narrations[1].secondary_translation.as_deref(),
            Some("translated")
        );
        assert!(app.narrations[0].secondary_translation.is_none());
    }

    #[test]
    fn test_english_insight_is_not_cached() {
        let mut app = app_with_narrations();
        update(&mut app, Action::ExplainNarration(0));
        let generation = app.generations.overlay;
        update(
            &mut app,
            Action::InsightReady {
                generation,
                result: Ok(insight()),
            },
        );
        assert!(app.narrations[0].secondary_translation.is_none());
    }

    #[test]
    fn test_fragment_request_carries_text() {
        let mut app = test_app();
        let effect = update(
            &mut app,
            Action::RequestInsight {
                text: "One. Two.".to_string(),
                context: "Fragment of Verse 1".to_string(),
                origin: InsightOrigin::Fragment,
            },
        );
        let Effect::FetchInsight { request, generation } = effect else {
            panic!("expected FetchInsight");
        };
        assert_eq!(generation, 1);
        assert_eq!(request.text, "One. Two.");
        assert_eq!(request.language, TranslationLang::English);
    }

    #[test]
    fn test_back_closes_notice_then_overlay_then_screen() {
        let mut app = app_with_narrations();
        update(&mut app, Action::ExplainNarration(0));
        app.notice = Some("oops".to_string());

        update(&mut app, Action::Back);
        assert!(app.notice.is_none());
        assert!(app.overlay.is_open());

        update(&mut app, Action::Back);
        assert!(!app.overlay.is_open());
        assert_eq!(app.screen, Screen::NarrationList);

        update(&mut app, Action::Back);
        assert_eq!(app.screen, Screen::CollectionHub);

        update(&mut app, Action::Back);
        assert_eq!(app.screen, Screen::Home);
    }

    #[test]
    fn test_toggle_engine_requests_rebuild() {
        let mut app = test_app();
        assert_eq!(
            update(&mut app, Action::ToggleEngine),
            Effect::EngineChanged(Engine::Ollama)
        );
        assert_eq!(app.engine, Engine::Ollama);
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
