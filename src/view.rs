//! HTML rendering of the landing page.

use minijinja::{context, Environment};
use uuid::Uuid;

use crate::domain::chat::SUGGESTED_QUESTIONS;
use crate::domain::landing::{PRODUCT_NAME, SOIL_FIELDS, STATS};
use crate::flows::PageState;

const INDEX: &str = "index.html";

/// Compiled page templates. The `.html` name turns on auto-escaping.
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(INDEX, include_str!("../templates/index.html"))?;
        Ok(Self { env })
    }

    pub fn render_page(&self, session_id: Uuid, page: &PageState) -> Result<String, minijinja::Error> {
        self.env.get_template(INDEX)?.render(context! {
            product_name => PRODUCT_NAME,
            session_id => session_id.to_string(),
            stats => STATS,
            fields => SOIL_FIELDS,
            suggested_questions => SUGGESTED_QUESTIONS,
            page => page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CareGuide, ChatMessage, Prediction, SoilForm};

    fn render(page: &PageState) -> String {
        Templates::new()
            .unwrap()
            .render_page(Uuid::nil(), page)
            .unwrap()
    }

    #[test]
    fn empty_page_has_form_and_greeting() {
        let html = render(&PageState::default());
        assert!(html.contains("Predict Best Crop"));
        assert!(html.contains("/sessions/00000000-0000-0000-0000-000000000000/predict"));
        assert!(html.contains("Prediction Accuracy"));
        assert!(html.contains("I&#x27;m your AI Agronomist") || html.contains("I'm your AI Agronomist"));
        assert!(!html.contains("Recommended Crop"));
        assert!(!html.contains("http-equiv=\"refresh\""));
    }

    #[test]
    fn result_offers_guide_until_one_exists() {
        let mut page = PageState::default();
        let ticket = page.prediction.begin_submit(SoilForm::default()).unwrap();
        page.prediction.finish_submit(
            ticket,
            Ok(Prediction {
                crop: "chickpea".into(),
                description: None,
            }),
        );

        let html = render(&page);
        assert!(html.contains("chickpea"));
        assert!(html.contains("98% confidence"));
        assert!(html.contains("Generate AI Care Guide"));

        let guide = page.prediction.begin_guide().unwrap();
        page.prediction.finish_guide(guide, CareGuide::new("Water deeply."));

        let html = render(&page);
        assert!(html.contains("Water deeply."));
        assert!(!html.contains("Generate AI Care Guide"));
    }

    #[test]
    fn user_text_is_escaped() {
        let mut page = PageState::default();
        page.assistant.begin_send("<script>alert(1)</script>");
        page.assistant.finish_send(ChatMessage::assistant("ok"));

        let html = render(&page);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn pending_reply_refreshes_page() {
        let mut page = PageState::default();
        page.assistant.begin_send("hello");
        assert!(render(&page).contains("http-equiv=\"refresh\""));
    }
}
