use schemars::JsonSchema;
use schemars::r#gen::SchemaSettings;
use serde::{Deserialize, Serialize};

use crate::core::model::TranslationLang;

/// Translation plus commentary for a verse, narration or fragment.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AiInsight {
    pub translation: String,
    pub explanation: String,
    #[serde(alias = "key_themes", alias = "themes")]
    pub key_themes: Vec<String>,
}

/// One transmitter in a narrator chain.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
pub struct NarratorRecord {
    pub name: String,
    pub reliability: String,
    #[serde(alias = "biography")]
    pub bio: String,
}

/// Verdict on a narrator chain, narrator by narrator.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IsnadAnalysis {
    pub reliability: String,
    pub narrators: Vec<NarratorRecord>,
    #[serde(alias = "scholarly_notes", alias = "notes")]
    pub scholarly_notes: String,
}

/// Everything an engine needs to produce an `AiInsight`.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightRequest {
    pub text: String,
    /// Where the text comes from, e.g. "Verse 3 of Al-Faatiha".
    pub context: String,
    pub language: TranslationLang,
}

/// JSON schema for `T` with every subschema inlined, the form structured
/// output endpoints accept.
pub fn response_schema<T: JsonSchema>() -> serde_json::Value {
    let settings = SchemaSettings::draft07().with(|s| {
        s.inline_subschemas = true;
        s.meta_schema = None;
    });
    let schema = settings.into_generator().into_root_schema_for::<T>();
    serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
}
