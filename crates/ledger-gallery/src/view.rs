use crate::record::Record;
use crate::story::{StoryCard, StoryDetail};
use serde::Serialize;

/// Everything the gallery renders from. Published by the loader.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GalleryState {
    pub records: Vec<Record>,
    pub loading: bool,
    pub error: Option<String>,
    /// Record id whose detail modal is open.
    pub selected: Option<String>,
}

impl GalleryState {
    pub fn selected_detail(&self) -> Option<StoryDetail> {
        let id = self.selected.as_deref()?;
        self.records
            .iter()
            .find(|r| r.id == id)
            .map(StoryDetail::from_record)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "content", rename_all = "camelCase")]
pub enum GalleryView {
    Loading,
    Error(String),
    Empty,
    Cards(Vec<StoryCard>),
}

impl GalleryView {
    /// `limit` of `None` shows every record.
    pub fn from_state(state: &GalleryState, limit: Option<usize>) -> Self {
        if state.loading {
            return GalleryView::Loading;
        }
        if let Some(err) = &state.error {
            return GalleryView::Error(err.clone());
        }
        if state.records.is_empty() {
            return GalleryView::Empty;
        }
        let take = limit.unwrap_or(state.records.len());
        GalleryView::Cards(
            state
                .records
                .iter()
                .take(take)
                .map(StoryCard::from_record)
                .collect(),
        )
    }

    pub fn cards(&self) -> &[StoryCard] {
        match self {
            GalleryView::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn message(&self) -> Option<String> {
        match self {
            GalleryView::Loading => Some("Loading stories…".to_string()),
            GalleryView::Error(err) => Some(format!("Error: {err}")),
            GalleryView::Empty => Some("No stories found.".to_string()),
            GalleryView::Cards(_) => None,
        }
    }
}
