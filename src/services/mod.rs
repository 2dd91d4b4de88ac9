//! Service layer modules for external integrations.
//!
//! Contains clients for the prediction service and the generative-language
//! API, plus the reply source behind the assistant chat.

pub mod error;
pub mod guide_client;
pub mod prediction_client;
pub mod responder;

pub use error::ClientError;
pub use guide_client::GuideClient;
pub use prediction_client::PredictionClient;
pub use responder::{CannedResponses, ResponseSource};
