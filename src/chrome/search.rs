//! Client-side search overlay.
//!
//! Opening the overlay activates the search wrapper and form, dims the page
//! behind a body-level overlay class, and focuses the query input. Closing
//! removes all of it. Escape closes the overlay while it is active.

use super::page::{ElementId, Page};

/// Class marking the wrapper and form as active.
pub const ACTIVE_CLASS: &str = "active";
/// Body class dimming the page behind the overlay.
pub const OVERLAY_CLASS: &str = "search-overlay";

/// The search overlay's element handles.
#[derive(Debug, Clone, Copy)]
pub struct SearchOverlay {
    wrapper: ElementId,
    form: ElementId,
    input: ElementId,
    body: ElementId,
}

impl SearchOverlay {
    /// Resolve the overlay from conventional markup: a `search-wrapper`
    /// element containing a `search-form` with a `search-field` input, and
    /// the body. Returns `None` when any piece is missing so pages without
    /// search skip the behavior silently.
    pub fn from_page(page: &Page) -> Option<Self> {
        Some(Self {
            wrapper: page.first_by_class("search-wrapper")?,
            form: page.first_by_class("search-form")?,
            input: page.first_by_class("search-field")?,
            body: page.by_tag("body").first().copied()?,
        })
    }

    pub fn is_active(&self, page: &Page) -> bool {
        page.get(self.form).has_class(ACTIVE_CLASS)
    }

    /// Open the overlay and focus the query input.
    pub fn open(&self, page: &mut Page) {
        page.get_mut(self.wrapper).add_class(ACTIVE_CLASS);
        page.get_mut(self.form).add_class(ACTIVE_CLASS);
        page.get_mut(self.body).add_class(OVERLAY_CLASS);
        page.focus(self.input);
    }

    /// Close the overlay.
    pub fn close(&self, page: &mut Page) {
        page.get_mut(self.wrapper).remove_class(ACTIVE_CLASS);
        page.get_mut(self.form).remove_class(ACTIVE_CLASS);
        page.get_mut(self.body).remove_class(OVERLAY_CLASS);
    }

    /// Keyboard dispatch while the overlay is active. Accepts the legacy
    /// `"Esc"` spelling alongside `"Escape"`. Returns whether the key closed
    /// the overlay.
    pub fn handle_key(&self, page: &mut Page, key: &str) -> bool {
        if self.is_active(page) && matches!(key, "Escape" | "Esc") {
            self.close(page);
            return true;
        }
        false
    }
}
