//! Contact harvesting.
//!
//! Two independent discovery passes over one document, results unioned:
//! an attribute pass over anchor hrefs (mailto addresses, LinkedIn profile
//! links resolved against the page base) and a text pass scanning the
//! document's visible text with the same email pattern plus a LinkedIn URL
//! pattern. Script and style contents are not visible text and are skipped.
//! Deduplication is by exact string equality — ordered sets keep the result
//! deterministic.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

/// Email shape: local part `@` domain `.` tld, ASCII word/dot/hyphen/plus.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("email pattern")
});

/// Same shape anchored, for validating a whole mailto address.
static EMAIL_EXACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("email pattern")
});

/// LinkedIn personal-profile URLs appearing in plain text.
static PROFILE_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(?:www\.)?linkedin\.com/in/[A-Za-z0-9_%\-]+/?").expect("profile pattern")
});

/// Path marker identifying a personal LinkedIn profile href.
const PROFILE_PATH_MARKER: &str = "linkedin.com/in/";

/// Mail-link scheme prefix on anchor hrefs.
const MAILTO_SCHEME: &str = "mailto:";

// ---------------------------------------------------------------------------
// ContactSet
// ---------------------------------------------------------------------------

/// Deduplicated contact identifiers harvested from one or more documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSet {
    /// Email addresses.
    pub emails: BTreeSet<String>,
    /// Professional-network profile URLs.
    pub profile_links: BTreeSet<String>,
}

impl ContactSet {
    /// Union `other` into `self`.
    pub fn merge(&mut self, other: ContactSet) {
        self.emails.extend(other.emails);
        self.profile_links.extend(other.profile_links);
    }

    /// Whether both sets are empty.
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.profile_links.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Harvesting
// ---------------------------------------------------------------------------

/// Scan `doc` for emails and profile links, resolving relative profile
/// hrefs against `base_url`. Deterministic and idempotent.
pub fn harvest(doc: &Html, base_url: &Url) -> ContactSet {
    let mut contacts = ContactSet::default();
    harvest_anchors(doc, base_url, &mut contacts);
    harvest_text(doc, &mut contacts);
    contacts
}

/// Attribute pass: inspect every anchor's href.
fn harvest_anchors(doc: &Html, base_url: &Url, contacts: &mut ContactSet) {
    let anchor_sel = Selector::parse("a[href]").expect("static selector");

    for el in doc.select(&anchor_sel) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };

        if let Some(rest) = href.strip_prefix(MAILTO_SCHEME) {
            // Address portion only — drop any ?subject=... query
            let address = rest.split('?').next().unwrap_or_default().trim();
            if EMAIL_EXACT_RE.is_match(address) {
                contacts.emails.insert(address.to_string());
            }
        } else if href.contains(PROFILE_PATH_MARKER) {
            // Already-absolute hrefs pass through `join` unchanged;
            // root-relative ones pick up the page origin.
            if let Ok(resolved) = base_url.join(href) {
                contacts.profile_links.insert(resolved.to_string());
            }
        }
    }
}

/// Text pass: scan the document's visible text with the global patterns.
fn harvest_text(doc: &Html, contacts: &mut ContactSet) {
    let mut text = String::new();
    collect_visible_text(doc.root_element(), &mut text);

    for m in EMAIL_RE.find_iter(&text) {
        contacts.emails.insert(m.as_str().to_string());
    }
    for m in PROFILE_URL_RE.find_iter(&text) {
        contacts.profile_links.insert(m.as_str().to_string());
    }
}

/// Accumulate the text under `el`, skipping `<script>`/`<style>` subtrees
/// whose contents are never visible on the page.
fn collect_visible_text(el: scraper::ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_el) = scraper::ElementRef::wrap(child) {
            let name = child_el.value().name();
            if name != "script" && name != "style" {
                collect_visible_text(child_el, out);
            }
        }
    }
}
