//! Equal-height pass for the recent-posts columns.
//!
//! Multi-column teasers on the index page get ragged bottoms when titles and
//! excerpts wrap differently. The fix is a measure-then-apply pass: find the
//! tallest element of a matched set and pin every member to that height.
//!
//! The invariant is that the applied height is the maximum *rendered* height
//! of the matched set at the time of the call — the pass reads fresh
//! measurements on every invocation and keeps no state between calls.

use super::page::Page;
use crate::config::ChromeConfig;

/// Equalize all `tag` elements inside the container with id `container_id`.
///
/// Elements with a zero rendered height (collapsed, not laid out yet) are
/// ignored when measuring but still receive the computed height. Returns the
/// applied height, or `None` when the container is absent — pages without
/// the column block skip the pass silently.
pub fn equalize(page: &mut Page, container_id: &str, tag: &str) -> Option<u32> {
    let container = page.by_id(container_id)?;
    let members = page.descendants_by_tag(container, tag);

    let tallest = members
        .iter()
        .map(|&id| page.get(id).offset_height())
        .filter(|&h| h > 0)
        .max()
        .unwrap_or(0);

    for id in members {
        page.get_mut(id).set_height(tallest);
    }
    Some(tallest)
}

/// Run the equal-height pass for every configured tag, in order.
pub fn equalize_all(page: &mut Page, chrome: &ChromeConfig) {
    for tag in &chrome.equalize_tags {
        equalize(page, &chrome.equalize_container, tag);
    }
}
