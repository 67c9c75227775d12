//! Render-agnostic reply produced for every inbound event.

use serde::{Deserialize, Serialize};

/// Which fixed keyboard the gateway should present with a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReplySurface {
    #[default]
    None,
    Menu,
    GenderChoice,
    BrowseActions,
}

impl ReplySurface {
    /// Button labels for this surface, left to right.
    pub fn buttons(&self) -> &'static [&'static str] {
        match self {
            ReplySurface::None => &[],
            ReplySurface::Menu => &["1", "2", "3"],
            ReplySurface::GenderChoice => &["Guy", "Girl"],
            ReplySurface::BrowseActions => &["❤️", "👎", "💤"],
        }
    }
}

/// Prefix marking a gateway storage handle in a stored photo reference.
pub const STORAGE_HANDLE_PREFIX: &str = "file_id:";

/// Photo attached to a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PhotoRef {
    /// Opaque handle the gateway can resend without downloading.
    Handle(String),
    /// Fully-qualified URL the gateway fetches.
    Url(String),
}

impl PhotoRef {
    /// Classifies a stored photo reference; blank references yield `None`.
    pub fn parse(raw: &str) -> Option<PhotoRef> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return Some(PhotoRef::Url(raw.to_string()));
        }
        let handle = raw.strip_prefix(STORAGE_HANDLE_PREFIX).unwrap_or(raw).trim();
        (!handle.is_empty()).then(|| PhotoRef::Handle(handle.to_string()))
    }
}

/// Text + optional photo + keyboard hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Output {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<PhotoRef>,
    #[serde(default)]
    pub surface: ReplySurface,
}

impl Output {
    /// Plain text reply without a keyboard.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_surface(mut self, surface: ReplySurface) -> Self {
        self.surface = surface;
        self
    }

    pub fn with_photo(mut self, photo: Option<PhotoRef>) -> Self {
        self.photo = photo;
        self
    }

    /// Prepends a fragment, separated by a blank line when text exists.
    pub fn prefixed(mut self, fragment: &str) -> Self {
        self.text = if self.text.is_empty() {
            fragment.to_string()
        } else {
            format!("{}\n\n{}", fragment, self.text)
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod photo_ref {
        use super::*;

        #[test]
        fn urls_are_recognised() {
            assert_eq!(
                PhotoRef::parse("https://cdn.example.com/p/1.jpg"),
                Some(PhotoRef::Url("https://cdn.example.com/p/1.jpg".to_string()))
            );
            assert!(matches!(PhotoRef::parse("http://x/y"), Some(PhotoRef::Url(_))));
        }

        #[test]
        fn storage_prefix_is_stripped() {
            assert_eq!(
                PhotoRef::parse("file_id:AgACAgIAAx"),
                Some(PhotoRef::Handle("AgACAgIAAx".to_string()))
            );
        }

        #[test]
        fn bare_value_is_treated_as_handle() {
            assert_eq!(
                PhotoRef::parse("photos/15.jpg"),
                Some(PhotoRef::Handle("photos/15.jpg".to_string()))
            );
        }

        #[test]
        fn blank_references_are_dropped() {
            assert_eq!(PhotoRef::parse(""), None);
            assert_eq!(PhotoRef::parse("   "), None);
            assert_eq!(PhotoRef::parse("file_id:"), None);
        }
    }

    mod output {
        use super::*;

        #[test]
        fn prefixed_separates_with_blank_line() {
            let out = Output::text("card").prefixed("It's a match!");
            assert_eq!(out.text, "It's a match!\n\ncard");
        }

        #[test]
        fn prefixed_on_empty_text_uses_fragment_only() {
            let out = Output::default().prefixed("It's a match!");
            assert_eq!(out.text, "It's a match!");
        }

        #[test]
        fn surface_serializes_snake_case() {
            let json = serde_json::to_value(Output::text("x").with_surface(ReplySurface::BrowseActions)).unwrap();
            assert_eq!(json["surface"], "browse_actions");
            assert!(json.get("photo").is_none());
        }
    }

    #[test]
    fn every_surface_but_none_has_buttons() {
        assert!(ReplySurface::None.buttons().is_empty());
        assert_eq!(ReplySurface::Menu.buttons().len(), 3);
        assert_eq!(ReplySurface::GenderChoice.buttons(), &["Guy", "Girl"]);
        assert_eq!(ReplySurface::BrowseActions.buttons().len(), 3);
    }
}
