use serde::{Deserialize, Serialize};

pub const GREETING: &str = "Hello! I'm your AI Agronomist, powered by advanced AI. Ask me anything \
about farming, crops, soil management, or agricultural best practices. I'm here to help you grow!";

/// Replies the simulated assistant chooses from.
pub const CANNED_REPLIES: [&str; 4] = [
    "Great question! For optimal crop yield, it's important to maintain balanced NPK levels in \
     your soil. Regular soil testing every 6 months is recommended to track nutrient levels.",
    "Based on your query, I recommend focusing on crop rotation to maintain soil health. This \
     practice helps prevent nutrient depletion and reduces pest buildup.",
    "For sustainable farming, consider implementing drip irrigation systems. They can reduce \
     water usage by up to 60% while improving crop yields significantly.",
    "Organic pest management includes companion planting, neem oil sprays, and introducing \
     beneficial insects. These methods are environmentally friendly and cost-effective.",
];

pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "How do I improve soil nitrogen levels?",
    "Best practices for rice cultivation?",
    "How to manage crop pests organically?",
    "When is the best time to plant wheat?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn greeting() -> Self {
        Self::assistant(GREETING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_role_and_serialize_lowercase() {
        let question = ChatMessage::user("When should I irrigate?");
        assert_eq!(question.role, Role::User);
        assert_eq!(ChatMessage::greeting().role, Role::Assistant);
        assert_eq!(ChatMessage::greeting().content, GREETING);

        let json = serde_json::to_value(&question).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "When should I irrigate?"}));
    }
}
