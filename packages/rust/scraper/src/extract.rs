//! Field extraction from a parsed job listing page.
//!
//! Every field is pulled out by an isolated selector operation: a missing
//! node, missing attribute, or malformed value downgrades that one field to
//! absent and never aborts the rest of the record. The selectors match by
//! visible markup (`data-test` attributes, exact badge text), so they are
//! the first thing to break when the source markup changes — the tests pin
//! the contracts down.

use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Characters that mark a budget-bearing node.
const CURRENCY_SYMBOLS: [char; 3] = ['$', '€', '£'];

/// Exact badge text signalling a verified payment method.
const PAYMENT_VERIFIED_TEXT: &str = "Payment verified";

/// Label text of the node carrying the hire-rate figure.
const HIRE_RATE_LABEL: &str = "Hire rate";

// ---------------------------------------------------------------------------
// JobFields
// ---------------------------------------------------------------------------

/// Skeleton fields extracted from one listing document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub skills: Vec<String>,
    pub budget: Option<String>,
    pub client_name: Option<String>,
    /// Absolute URL — relative hrefs are resolved against the page origin.
    pub client_profile_url: Option<String>,
    pub client_location: Option<String>,
    pub payment_verified: bool,
    pub hire_rate_percent: Option<u8>,
}

/// Extract all skeleton fields from `doc`, resolving relative hrefs
/// against `base_url`.
pub fn extract_fields(doc: &Html, base_url: &Url) -> JobFields {
    JobFields {
        title: first_text(doc, "h1"),
        description: first_text(doc, r#"section[data-test="job-description"]"#),
        skills: all_texts(doc, r#"a[data-test="skill-tag"]"#),
        budget: extract_budget(doc),
        client_name: first_text(doc, r#"div[data-test="client-name"]"#),
        client_profile_url: extract_client_profile_url(doc, base_url),
        client_location: first_text(doc, r#"div[data-test="client-location"]"#),
        payment_verified: has_exact_text(doc, "span", PAYMENT_VERIFIED_TEXT),
        hire_rate_percent: extract_hire_rate(doc),
    }
}

// ---------------------------------------------------------------------------
// Per-field helpers — each yields absent on any fault
// ---------------------------------------------------------------------------

/// First element matching `selector`, or `None` on no match or a bad selector.
fn select_first<'a>(doc: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel).next()
}

/// Collapsed visible text of the first element matching `selector`.
fn first_text(doc: &Html, selector: &str) -> Option<String> {
    let text = collapsed_text(select_first(doc, selector)?);
    (!text.is_empty()).then_some(text)
}

/// Collapsed text of every element matching `selector`, in document order.
fn all_texts(doc: &Html, selector: &str) -> Vec<String> {
    let Ok(sel) = Selector::parse(selector) else {
        return Vec::new();
    };
    doc.select(&sel)
        .map(collapsed_text)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Element text with inter-element whitespace collapsed to single spaces.
fn collapsed_text(el: ElementRef<'_>) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First emphasized/bold node whose text contains a currency symbol.
/// First match wins — no fixed-price vs. hourly distinction.
fn extract_budget(doc: &Html) -> Option<String> {
    let sel = Selector::parse("strong, b").ok()?;
    doc.select(&sel)
        .map(collapsed_text)
        .find(|t| t.contains(CURRENCY_SYMBOLS))
}

/// Href of an anchor inside the client-name block, resolved to absolute.
fn extract_client_profile_url(doc: &Html, base_url: &Url) -> Option<String> {
    let block = select_first(doc, r#"div[data-test="client-name"]"#)?;
    let anchor_sel = Selector::parse("a[href]").ok()?;
    let href = block
        .select(&anchor_sel)
        .next()?
        .value()
        .attr("href")?;
    base_url.join(href).ok().map(|u| u.to_string())
}

/// Whether any `tag` element's collapsed text equals `needle` exactly.
fn has_exact_text(doc: &Html, tag: &str, needle: &str) -> bool {
    let Ok(sel) = Selector::parse(tag) else {
        return false;
    };
    doc.select(&sel).any(|el| collapsed_text(el) == needle)
}

/// The integer immediately preceding the first `%` after the hire-rate
/// label, in the text of the node containing that label. The label anchors
/// the scan: an ancestor wrapper's text may carry unrelated percentages
/// before it. Absent if the node is missing, no `%` follows the label,
/// no digits precede it, or the value falls outside 0–100.
fn extract_hire_rate(doc: &Html) -> Option<u8> {
    let sel = Selector::parse("div").ok()?;
    let text = doc
        .select(&sel)
        .map(collapsed_text)
        .find(|t| t.contains(HIRE_RATE_LABEL))?;

    let after_label = &text[text.find(HIRE_RATE_LABEL)? + HIRE_RATE_LABEL.len()..];
    let percent_pos = after_label.find('%')?;
    let digits: String = after_label[..percent_pos]
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    digits.parse::<u8>().ok().filter(|rate| *rate <= 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    fn base() -> Url {
        Url::parse("https://example.test/jobs/~0123").unwrap()
    }

    const FULL_PAGE: &str = r#"<html><body>
        <h1>Rust backend engineer</h1>
        <section data-test="job-description">
            <p>Build a   scraping</p>
            <p>pipeline in Rust.</p>
        </section>
        <a data-test="skill-tag" href="/skills/rust">Rust</a>
        <a data-test="skill-tag" href="/skills/tokio">Tokio</a>
        <strong>Hourly</strong>
        <strong>$500</strong>
        <div data-test="client-name">Acme Corp <a href="/freelancers/~01abc123">profile</a></div>
        <div data-test="client-location">Berlin, Germany</div>
        <span>Payment verified</span>
        <div>Hire rate 75%</div>
    </body></html>"#;

    #[test]
    fn extracts_every_field_from_full_page() {
        let doc = parse(FULL_PAGE);
        let fields = extract_fields(&doc, &base());

        assert_eq!(fields.title.as_deref(), Some("Rust backend engineer"));
        assert_eq!(
            fields.description.as_deref(),
            Some("Build a scraping pipeline in Rust.")
        );
        assert_eq!(fields.skills, vec!["Rust", "Tokio"]);
        assert_eq!(fields.budget.as_deref(), Some("$500"));
        assert_eq!(fields.client_name.as_deref(), Some("Acme Corp profile"));
        assert_eq!(
            fields.client_profile_url.as_deref(),
            Some("https://example.test/freelancers/~01abc123")
        );
        assert_eq!(fields.client_location.as_deref(), Some("Berlin, Germany"));
        assert!(fields.payment_verified);
        assert_eq!(fields.hire_rate_percent, Some(75));
    }

    #[test]
    fn empty_page_degrades_every_field_to_absent() {
        let doc = parse("<html><body><p>nothing here</p></body></html>");
        let fields = extract_fields(&doc, &base());

        assert_eq!(fields, JobFields::default());
        assert!(fields.skills.is_empty());
        assert!(!fields.payment_verified);
    }

    #[test]
    fn one_broken_field_does_not_affect_others() {
        // No h1, no budget, but the rest is intact
        let doc = parse(
            r#"<html><body>
            <a data-test="skill-tag">Python</a>
            <div data-test="client-location">Remote</div>
            <span>Payment verified</span>
            </body></html>"#,
        );
        let fields = extract_fields(&doc, &base());

        assert!(fields.title.is_none());
        assert!(fields.budget.is_none());
        assert_eq!(fields.skills, vec!["Python"]);
        assert_eq!(fields.client_location.as_deref(), Some("Remote"));
        assert!(fields.payment_verified);
    }

    #[test]
    fn budget_takes_first_currency_match() {
        let doc = parse("<html><body><strong>Fixed</strong><strong>€200</strong><strong>$900</strong></body></html>");
        assert_eq!(extract_budget(&doc).as_deref(), Some("€200"));
    }

    #[test]
    fn payment_verified_requires_exact_badge_text() {
        let doc = parse("<html><body><span>Payment verified soon</span></body></html>");
        let fields = extract_fields(&doc, &base());
        assert!(!fields.payment_verified);

        let doc = parse("<html><body><span>  Payment   verified </span></body></html>");
        let fields = extract_fields(&doc, &base());
        assert!(fields.payment_verified);
    }

    #[test]
    fn hire_rate_parses_integer_before_percent() {
        let doc = parse("<html><body><div>Hire rate: 62% (24 hires)</div></body></html>");
        assert_eq!(extract_hire_rate(&doc), Some(62));
    }

    #[test]
    fn hire_rate_absent_without_percent_or_digits() {
        let doc = parse("<html><body><div>Hire rate n/a</div></body></html>");
        assert_eq!(extract_hire_rate(&doc), None);

        let doc = parse("<html><body><div>Hire rate %</div></body></html>");
        assert_eq!(extract_hire_rate(&doc), None);
    }

    #[test]
    fn hire_rate_ignores_percentages_before_the_label() {
        // The outer wrapper is the first div whose text contains the label;
        // the service-fee figure precedes it and must not win.
        let doc = parse(
            "<html><body><div>\
            <div>Service fee 10%</div>\
            <div>Hire rate 75%</div>\
            </div></body></html>",
        );
        assert_eq!(extract_hire_rate(&doc), Some(75));
    }

    #[test]
    fn hire_rate_rejects_values_over_100() {
        let doc = parse("<html><body><div>Hire rate 250%</div></body></html>");
        assert_eq!(extract_hire_rate(&doc), None);
    }

    #[test]
    fn absolute_profile_href_left_unchanged() {
        let doc = parse(
            r#"<html><body><div data-test="client-name">
            <a href="https://other.test/client/9">Client</a>
            </div></body></html>"#,
        );
        let fields = extract_fields(&doc, &base());
        assert_eq!(
            fields.client_profile_url.as_deref(),
            Some("https://other.test/client/9")
        );
    }

    #[test]
    fn client_block_without_anchor_yields_name_only() {
        let doc = parse(r#"<html><body><div data-test="client-name">Solo Client</div></body></html>"#);
        let fields = extract_fields(&doc, &base());
        assert_eq!(fields.client_name.as_deref(), Some("Solo Client"));
        assert!(fields.client_profile_url.is_none());
    }

    #[test]
    fn skills_preserve_document_order() {
        let doc = parse(
            r#"<html><body>
            <a data-test="skill-tag">Zig</a>
            <a data-test="skill-tag">Ada</a>
            <a data-test="skill-tag">C</a>
            </body></html>"#,
        );
        let fields = extract_fields(&doc, &base());
        assert_eq!(fields.skills, vec!["Zig", "Ada", "C"]);
    }
}
