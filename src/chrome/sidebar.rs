//! Slide-out sidebar menu.
//!
//! The sidebar slides in over a fade backdrop. Opening adds the `slide`
//! class to the panel, its toggle, and the backdrop, swaps the open icon for
//! the close icon, and hides the header search icon; clicking the backdrop
//! reverses all of it.
//!
//! While the sidebar is open, single-key shortcuts activate its nav links:
//! digits `1`–`5` the primary list, `g` and `t` the first and third entries
//! of the secondary list, and `s` trades the sidebar for the search overlay.

use super::page::{ElementId, Page};
use super::search::SearchOverlay;

/// Class marking the slid-in state on panel, toggle, and backdrop.
pub const SLIDE_CLASS: &str = "slide";

/// What a sidebar keystroke activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// A nav link was triggered; navigation is the caller's business.
    Link(ElementId),
    /// The sidebar closed and the search overlay opened.
    Search,
}

/// The sidebar's element handles plus its two nav link lists.
#[derive(Debug, Clone)]
pub struct Sidebar {
    panel: ElementId,
    toggle: ElementId,
    backdrop: ElementId,
    open_icon: ElementId,
    close_icon: ElementId,
    search_icon: ElementId,
    primary_links: Vec<ElementId>,
    secondary_links: Vec<ElementId>,
}

impl Sidebar {
    /// Resolve the sidebar from conventional markup ids: `sidebar`, `slide`,
    /// `fade`, `open`, `close`, `search`. Nav links come from the panel's
    /// two lists in document order. Returns `None` when any piece is missing
    /// so pages without the sidebar skip the behavior silently.
    pub fn from_page(page: &Page) -> Option<Self> {
        let panel = page.by_id("sidebar")?;
        let lists = page.descendants_by_tag(panel, "ul");
        let links_of = |list: Option<&ElementId>| {
            list.map(|&l| page.descendants_by_tag(l, "a"))
                .unwrap_or_default()
        };

        Some(Self {
            panel,
            toggle: page.by_id("slide")?,
            backdrop: page.by_id("fade")?,
            open_icon: page.by_id("open")?,
            close_icon: page.by_id("close")?,
            search_icon: page.by_id("search")?,
            primary_links: links_of(lists.first()),
            secondary_links: links_of(lists.get(1)),
        })
    }

    pub fn is_open(&self, page: &Page) -> bool {
        page.get(self.panel).has_class(SLIDE_CLASS)
    }

    /// Handle a click on the sidebar toggle: slide the panel in.
    pub fn open(&self, page: &mut Page) {
        for id in [self.panel, self.toggle, self.backdrop] {
            page.get_mut(id).add_class(SLIDE_CLASS);
        }
        page.get_mut(self.open_icon).hide();
        page.get_mut(self.search_icon).hide();
        page.get_mut(self.close_icon).show();
    }

    /// Handle a click on the fade backdrop: slide the panel out.
    pub fn close(&self, page: &mut Page) {
        for id in [self.panel, self.toggle, self.backdrop] {
            page.get_mut(id).remove_class(SLIDE_CLASS);
        }
        page.get_mut(self.open_icon).show();
        page.get_mut(self.search_icon).show();
        page.get_mut(self.close_icon).hide();
    }

    /// Keyboard dispatch while the sidebar is open. Keys follow the DOM
    /// `KeyboardEvent.key` values. Returns what was activated, if anything.
    pub fn handle_key(
        &self,
        page: &mut Page,
        search: &SearchOverlay,
        key: &str,
    ) -> Option<Activation> {
        if !self.is_open(page) {
            return None;
        }
        match key {
            "1" | "2" | "3" | "4" | "5" => {
                let index = key.parse::<usize>().ok()? - 1;
                self.primary_links.get(index).copied().map(Activation::Link)
            }
            "g" => self.secondary_links.first().copied().map(Activation::Link),
            "t" => self.secondary_links.get(2).copied().map(Activation::Link),
            "s" => {
                self.close(page);
                search.open(page);
                Some(Activation::Search)
            }
            _ => None,
        }
    }
}
