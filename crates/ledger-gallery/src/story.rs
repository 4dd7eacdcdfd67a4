//! What the gallery shows for one storyteller record.

use crate::record::Record;
use serde::Serialize;

pub const CARD_THEME_LIMIT: usize = 2;
pub const FALLBACK_NAME: &str = "Storyteller";

mod fields {
    pub const NAME: &str = "Name";
    pub const PROJECT: &str = "Project";
    pub const LOCATION: &str = "Location";
    pub const PERSONAL_QUOTE: &str = "Personal Quote";
    pub const THEMES: &str = "Website themes";
    pub const CARD_IMAGE: &str = "File Profile Image";
    pub const PROFILE_IMAGE: &str = "Profile Image";
    pub const BIO: &str = "Bio";
    pub const REFLECTION: &str = "Empathy Ledger Reflection";
    pub const VIDEO: &str = "Video Embed";
}

fn owned(s: Option<&str>) -> Option<String> {
    s.map(str::to_string)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryCard {
    pub id: String,
    pub image_url: Option<String>,
    pub name: Option<String>,
    pub project: Option<String>,
    pub location: Option<String>,
    pub personal_quote: Option<String>,
    /// At most [`CARD_THEME_LIMIT`].
    pub themes: Vec<String>,
}

impl StoryCard {
    pub fn from_record(record: &Record) -> Self {
        let mut themes = record.text_list(fields::THEMES).unwrap_or_default();
        themes.truncate(CARD_THEME_LIMIT);
        Self {
            id: record.id.clone(),
            image_url: owned(record.first_attachment_url(fields::CARD_IMAGE)),
            name: owned(record.text(fields::NAME)),
            project: owned(record.text(fields::PROJECT)),
            location: owned(record.text(fields::LOCATION)),
            personal_quote: owned(record.text(fields::PERSONAL_QUOTE)),
            themes,
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(FALLBACK_NAME)
    }

    pub fn aria_label(&self) -> String {
        format!("View details for {}", self.display_name())
    }
}

/// Story video. Hosts render `Raw` as-is; it is not sanitized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum VideoEmbed {
    Iframe { src: String },
    Raw(String),
}

impl VideoEmbed {
    pub fn parse(value: &str) -> Self {
        if value.contains("youtube.com") || value.contains("vimeo.com") {
            VideoEmbed::Iframe {
                src: value.replacen("watch?v=", "embed/", 1),
            }
        } else {
            VideoEmbed::Raw(value.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDetail {
    pub id: String,
    pub image_url: Option<String>,
    pub name: Option<String>,
    pub project: Option<String>,
    pub location: Option<String>,
    pub personal_quote: Option<String>,
    /// Every theme of a multi-select field; a lone string is not shown here.
    pub themes: Vec<String>,
    pub bio: Option<String>,
    pub reflection: Option<String>,
    pub video: Option<VideoEmbed>,
}

impl StoryDetail {
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            image_url: owned(record.first_attachment_url(fields::PROFILE_IMAGE)),
            name: owned(record.text(fields::NAME)),
            project: owned(record.text(fields::PROJECT)),
            location: owned(record.text(fields::LOCATION)),
            personal_quote: owned(record.text(fields::PERSONAL_QUOTE)),
            themes: record
                .field(fields::THEMES)
                .and_then(|v| v.strict_text_list())
                .unwrap_or_default(),
            bio: owned(record.text(fields::BIO)),
            reflection: owned(record.text(fields::REFLECTION)),
            video: record.text(fields::VIDEO).map(VideoEmbed::parse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(fields: serde_json::Value) -> Record {
        serde_json::from_value(json!({ "id": "recA", "fields": fields })).expect("record")
    }

    #[test]
    fn card_keeps_two_themes_and_the_card_image() {
        let card = StoryCard::from_record(&record(json!({
            "Name": "Uncle Ray",
            "Project": "Oonchiumpa",
            "File Profile Image": [{ "url": "https://img/card.jpg" }],
            "Profile Image": [{ "url": "https://img/profile.jpg" }],
            "Website themes": ["Country", "Family", "Healing"],
        })));
        assert_eq!(card.image_url.as_deref(), Some("https://img/card.jpg"));
        assert_eq!(card.themes, vec!["Country", "Family"]);
        assert_eq!(card.aria_label(), "View details for Uncle Ray");
    }

    #[test]
    fn card_without_name_uses_fallback() {
        let card = StoryCard::from_record(&record(json!({ "Website themes": "Healing" })));
        assert_eq!(card.display_name(), FALLBACK_NAME);
        assert_eq!(card.themes, vec!["Healing"]);
        assert_eq!(card.image_url, None);
    }

    #[test]
    fn detail_shows_every_listed_theme_and_the_profile_image() {
        let detail = StoryDetail::from_record(&record(json!({
            "Profile Image": [{ "url": "https://img/profile.jpg" }],
            "Website themes": ["Country", "Family", "Healing"],
            "Bio": "Grew up on country.",
        })));
        assert_eq!(detail.image_url.as_deref(), Some("https://img/profile.jpg"));
        assert_eq!(detail.themes.len(), 3);
        assert_eq!(detail.bio.as_deref(), Some("Grew up on country."));
        assert_eq!(detail.video, None);
    }

    #[test]
    fn youtube_watch_links_become_embeds() {
        assert_eq!(
            VideoEmbed::parse("https://www.youtube.com/watch?v=abc123"),
            VideoEmbed::Iframe {
                src: "https://www.youtube.com/embed/abc123".to_string()
            }
        );
        assert!(matches!(VideoEmbed::parse("https://vimeo.com/42"), VideoEmbed::Iframe { .. }));
        assert_eq!(
            VideoEmbed::parse("<video src=\"x.mp4\"></video>"),
            VideoEmbed::Raw("<video src=\"x.mp4\"></video>".to_string())
        );
    }
}
