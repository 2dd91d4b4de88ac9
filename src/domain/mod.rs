//! Domain types for the crop recommendation page.

pub mod chat;
pub mod guide;
pub mod landing;
pub mod prediction;
pub mod soil;

// Re-export commonly used types
pub use chat::{ChatMessage, Role};
pub use guide::CareGuide;
pub use prediction::{Prediction, PredictionResult};
pub use soil::{SoilForm, SoilFormError, SoilSample};
