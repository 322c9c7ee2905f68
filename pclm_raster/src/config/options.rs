use serde::Deserialize;

/// Per-job options, already extracted from the option string.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct JobOptions {
    /// `print-color-mode`
    pub print_color_mode: Option<String>,
    /// `FINAL_CONTENT_TYPE` of the filter chain.
    pub final_content_type: Option<String>,
    /// `media-class` (or `MediaClass`)
    pub media_class: Option<String>,
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

impl JobOptions {
    /// 1-bit output uses a fixed threshold instead of dithering.
    pub fn bi_level(&self) -> bool {
        self.print_color_mode.as_deref().is_some_and(|mode| {
            mode.get(..8)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("bi-level"))
        })
    }

    pub fn content_type_is_pwg(&self) -> bool {
        self.final_content_type
            .as_deref()
            .is_some_and(|content_type| contains_ignore_case(content_type, "pwg"))
    }

    /// `None` when no media class was given.
    pub fn media_class_is_pwg(&self) -> Option<bool> {
        self.media_class
            .as_deref()
            .map(|class| contains_ignore_case(class, "pwg"))
    }
}
