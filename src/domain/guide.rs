//! AI care guide: prompt construction and the fallback texts shown when the
//! generative-language API does not deliver one.

use serde::{Deserialize, Serialize};

/// Shown when the API answered but no guide text could be found.
pub const GUIDE_FALLBACK: &str = "Could not generate guide.";

/// Shown when the API could not be reached or did not answer with JSON.
pub const GUIDE_CONNECTION_FALLBACK: &str =
    "Error connecting to AI. Please check internet or API key.";

pub const GUIDE_WORD_LIMIT: u32 = 200;

pub const GUIDE_SECTIONS: [&str; 4] = [
    "💧 Irrigation Strategy",
    "🐛 Pest Control",
    "🧪 Fertilizer Tips",
    "🚜 Harvesting Advice",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareGuide {
    pub text: String,
}

impl CareGuide {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn fallback() -> Self {
        Self::new(GUIDE_FALLBACK)
    }

    pub fn connection_fallback() -> Self {
        Self::new(GUIDE_CONNECTION_FALLBACK)
    }
}

/// Build the agronomist prompt for a recommended crop.
pub fn build_prompt(crop: &str) -> String {
    let headings = GUIDE_SECTIONS
        .iter()
        .enumerate()
        .map(|(i, section)| format!("{}. {}", i + 1, section))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are an expert agronomist. The user has been recommended to grow '{crop}' \
         based on their soil conditions.\n\n\
         Provide a concise, practical care guide (max {GUIDE_WORD_LIMIT} words) \
         using these exact headings:\n\
         {headings}\n\n\
         Keep the tone encouraging for a farmer."
    )
}
