//! Collapsible navigation toggle.
//!
//! The narrow-viewport nav sits behind a toggle button; clicking it flips the
//! `collapse` class on the collapsible element. The toggle moves exactly one
//! class token per click, in either direction.

use super::page::{ElementId, Page};

/// Class controlling the collapsed state.
pub const COLLAPSE_CLASS: &str = "collapse";

/// Handle a click on the nav toggle. Returns whether the element is
/// collapsed afterwards.
pub fn on_toggle_click(page: &mut Page, collapsible: ElementId) -> bool {
    page.get_mut(collapsible).toggle_class(COLLAPSE_CLASS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chrome::page::Element;

    #[test]
    fn click_flips_exactly_one_class() {
        let mut page = Page::new();
        let nav = page.insert(Element::new("nav").with_class("collapse"));

        assert!(!on_toggle_click(&mut page, nav));
        assert_eq!(page.get(nav).classes().len(), 0);

        assert!(on_toggle_click(&mut page, nav));
        assert_eq!(page.get(nav).classes(), [COLLAPSE_CLASS]);
    }

    #[test]
    fn other_classes_survive_toggling() {
        let mut page = Page::new();
        let nav = page.insert(Element::new("nav").with_class("site-nav").with_class("collapse"));

        on_toggle_click(&mut page, nav);
        assert!(page.get(nav).has_class("site-nav"));
        on_toggle_click(&mut page, nav);
        assert!(page.get(nav).has_class("site-nav"));
        assert!(page.get(nav).has_class(COLLAPSE_CLASS));
    }
}
