/// A single text display the game pushes updates into.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TextLabel {
    text: String,
    visible: bool,
}

impl TextLabel {
    /// Creates a visible label showing `text`.
    #[must_use]
    pub fn shown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visible: true,
        }
    }

    /// Creates an empty, hidden label.
    #[must_use]
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// The three text handles the game writes to. Any of them may be absent,
/// in which case updates to it are skipped.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct HudLabels {
    pub score: Option<TextLabel>,
    pub high_score: Option<TextLabel>,
    pub banner: Option<TextLabel>,
}

impl HudLabels {
    /// All three labels attached; the banner starts hidden.
    #[must_use]
    pub fn attached() -> Self {
        Self {
            score: Some(TextLabel::shown(score_text(0))),
            high_score: Some(TextLabel::shown(high_score_text(0))),
            banner: Some(TextLabel::hidden()),
        }
    }

    /// No labels attached.
    #[must_use]
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn show_score(&mut self, score: u32) {
        if let Some(label) = &mut self.score {
            label.set_text(score_text(score));
        }
    }

    pub fn show_high_score(&mut self, high_score: u32) {
        if let Some(label) = &mut self.high_score {
            label.set_text(high_score_text(high_score));
        }
    }

    pub fn show_banner(&mut self, text: &str) {
        if let Some(label) = &mut self.banner {
            label.set_text(text);
            label.set_visible(true);
        }
    }

    pub fn hide_banner(&mut self) {
        if let Some(label) = &mut self.banner {
            label.set_visible(false);
        }
    }
}

#[must_use]
pub fn score_text(score: u32) -> String {
    format!("SCORE: {score}")
}

#[must_use]
pub fn high_score_text(high_score: u32) -> String {
    format!("HIGH SCORE: {high_score}")
}
