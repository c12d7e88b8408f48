//! Contact enrichment orchestrator.
//!
//! Given the contacts harvested from a primary listing page and the client's
//! profile URL, attempt one additional fetch and union the profile page's
//! contacts in. A failed profile fetch is a soft condition: logged, swallowed,
//! and the primary contacts are returned untouched. No retries.

use tracing::{debug, warn};
use url::Url;

use joblens_scraper::{ContactSet, PageFetcher, harvest};

/// Harvest the client-profile page at `profile_url` and merge its contacts
/// into `contacts`. Returns `contacts` unchanged on any fetch failure.
pub async fn enrich_contacts(
    fetcher: &PageFetcher,
    mut contacts: ContactSet,
    profile_url: &Url,
) -> ContactSet {
    match fetcher.fetch(profile_url).await {
        Ok(fetched) => {
            let secondary = {
                let doc = fetched.parse();
                harvest(&doc, &fetched.url)
            };
            debug!(
                url = %profile_url,
                emails = secondary.emails.len(),
                links = secondary.profile_links.len(),
                "profile page harvested"
            );
            contacts.merge(secondary);
            contacts
        }
        Err(e) => {
            warn!(url = %profile_url, error = %e, "profile fetch failed, keeping primary contacts");
            contacts
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use joblens_shared::{AppConfig, ScrapeConfig};
    use scraper::Html;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher(timeout_secs: u64) -> PageFetcher {
        let mut config = ScrapeConfig::from(&AppConfig::default());
        config.timeout_secs = timeout_secs;
        PageFetcher::new(&config).unwrap()
    }

    fn primary_contacts() -> ContactSet {
        let doc = Html::parse_document(r#"<a href="mailto:jane@example.com">m</a>"#);
        harvest(&doc, &Url::parse("https://example.test/jobs/1").unwrap())
    }

    #[tokio::test]
    async fn merges_profile_page_contacts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/client/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"<html><body>
                <a href="mailto:client@corp.example">mail</a>
                <p>https://linkedin.com/in/client</p>
                </body></html>"#,
            ))
            .mount(&server)
            .await;

        let profile_url = Url::parse(&format!("{}/client/profile", server.uri())).unwrap();
        let merged = enrich_contacts(&fetcher(5), primary_contacts(), &profile_url).await;

        assert!(merged.emails.contains("jane@example.com"));
        assert!(merged.emails.contains("client@corp.example"));
        assert!(merged.profile_links.contains("https://linkedin.com/in/client"));
    }

    #[tokio::test]
    async fn non_2xx_profile_fetch_is_swallowed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let profile_url = Url::parse(&server.uri()).unwrap();
        let result = enrich_contacts(&fetcher(5), primary_contacts(), &profile_url).await;

        assert_eq!(result, primary_contacts());
    }

    #[tokio::test]
    async fn timed_out_profile_fetch_is_swallowed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&server)
            .await;

        let profile_url = Url::parse(&server.uri()).unwrap();
        let result = enrich_contacts(&fetcher(1), primary_contacts(), &profile_url).await;

        assert_eq!(result, primary_contacts());
    }
}
