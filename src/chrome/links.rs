//! External-link targeting.
//!
//! Anchors pointing off-host open in a new browsing context. An anchor is
//! external when its href parses to an absolute URL whose host differs from
//! the page host; relative links, fragment links, and scheme-only hrefs like
//! `mailto:` are left untouched.

use super::page::Page;
use url::Url;

/// Target attribute applied to external anchors.
pub const BLANK_TARGET: &str = "_blank";

/// Apply `target="_blank"` to every external anchor. Returns the number of
/// anchors retargeted. Pages without a host skip the pass.
pub fn retarget_external(page: &mut Page) -> usize {
    let Some(host) = page.host().map(str::to_string) else {
        return 0;
    };

    let mut retargeted = 0;
    for id in page.anchors() {
        let Some(href) = page.get(id).href() else {
            continue;
        };
        let Ok(link) = Url::parse(href) else {
            continue; // relative or fragment href — same document, same host
        };
        match link.host_str() {
            Some(link_host) if link_host != host => {
                page.get_mut(id).set_target(BLANK_TARGET);
                retargeted += 1;
            }
            _ => {}
        }
    }
    retargeted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chrome::page::Element;

    fn page_with_anchors(hrefs: &[&str]) -> Page {
        let mut page = Page::with_host("blog.example.com");
        for href in hrefs {
            page.insert(Element::new("a").with_href(*href));
        }
        page
    }

    #[test]
    fn offhost_anchors_get_blank_target() {
        let mut page = page_with_anchors(&[
            "https://github.com/someone/repo",
            "http://other.example.org/post",
        ]);
        assert_eq!(retarget_external(&mut page), 2);
        for id in page.anchors() {
            assert_eq!(page.get(id).target(), Some(BLANK_TARGET));
        }
    }

    #[test]
    fn samehost_and_relative_anchors_untouched() {
        let mut page = page_with_anchors(&[
            "https://blog.example.com/about.html",
            "/archive.html",
            "#top",
            "mailto:author@example.com",
        ]);
        assert_eq!(retarget_external(&mut page), 0);
        for id in page.anchors() {
            assert_eq!(page.get(id).target(), None);
        }
    }

    #[test]
    fn anchors_without_href_are_skipped() {
        let mut page = Page::with_host("blog.example.com");
        page.insert(Element::new("a").with_id("slide"));
        assert_eq!(retarget_external(&mut page), 0);
    }

    #[test]
    fn hostless_page_skips_the_pass() {
        let mut page = Page::new();
        page.insert(Element::new("a").with_href("https://github.com/"));
        assert_eq!(retarget_external(&mut page), 0);
    }
}
