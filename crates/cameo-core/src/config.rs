//! Application configuration.
//!
//! Loaded from `config.toml`; every field has a default so a missing or
//! partial file still yields a working configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::persona::PersonaKind;

/// Hosted voice-pipeline settings.
///
/// These identify the external speech services a dialogue driver should
/// connect; nothing in this crate interprets them beyond passing them
/// through. Defaults match the shipped demo stack.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Speech-to-text model id.
    pub stt_model: String,
    /// Language model id.
    pub llm_model: String,
    /// Overrides the persona's voice when set.
    pub tts_voice: Option<String>,
    /// Delivery style for synthesis.
    pub tts_style: String,
    /// Turn-detection model family.
    pub turn_detection: String,
    /// Noise-cancellation profile.
    pub noise_cancellation: String,
    /// Start generating a reply before the turn fully closes.
    pub preemptive_generation: bool,
    /// Pace synthesized speech to sentence boundaries.
    pub text_pacing: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stt_model: "nova-3".to_string(),
            llm_model: "gemini-2.5-flash".to_string(),
            tts_voice: None,
            tts_style: "Conversation".to_string(),
            turn_detection: "multilingual".to_string(),
            noise_cancellation: "bvc".to_string(),
            preemptive_generation: true,
            text_pacing: true,
        }
    }
}

/// File names for the reference catalogs.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CatalogFiles {
    pub faq: String,
    pub groceries: String,
    pub storefront: String,
    pub cases: String,
    pub topics: String,
}

impl Default for CatalogFiles {
    fn default() -> Self {
        Self {
            faq: "faq.json".to_string(),
            groceries: "groceries.json".to_string(),
            storefront: "storefront.json".to_string(),
            cases: "cases.json".to_string(),
            topics: "topics.json".to_string(),
        }
    }
}

/// Top-level application configuration.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RootConfig {
    /// Persona to run when none is named on the command line.
    pub default_persona: PersonaKind,
    /// Overrides the platform data directory when set.
    pub data_dir: Option<PathBuf>,
    /// Directory searched first for catalog files, before `./data` and
    /// the platform data directory.
    pub catalog_dir: Option<PathBuf>,
    pub pipeline: PipelineConfig,
    pub catalogs: CatalogFiles,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            default_persona: PersonaKind::GameMaster,
            data_dir: None,
            catalog_dir: None,
            pipeline: PipelineConfig::default(),
            catalogs: CatalogFiles::default(),
        }
    }
}
