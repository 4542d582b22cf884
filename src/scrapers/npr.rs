//! NPR section page parser.
//!
//! NPR section listings (e.g. <https://www.npr.org/sections/world/>) render
//! each story as an `<article class="item">` card:
//!
//! ```html
//! <article class="item">
//!   <div class="item-info">
//!     <h2 class="title"><a href="https://www.npr.org/2025/...">Headline</a></h2>
//!     <p class="teaser"><time>May 6, 2025</time>Teaser text</p>
//!   </div>
//! </article>
//! ```
//!
//! Every card yields one [`NewArticle`]. Missing pieces are left as `None`
//! rather than rejecting the card.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::models::NewArticle;
use crate::utils::non_empty_text;

static CARD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("article.item").expect("valid card selector"));
static HEADLINE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2").expect("valid headline selector"));
static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2 a[href]").expect("valid link selector"));
static TEASER_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.teaser").expect("valid teaser selector"));

/// Extract one [`NewArticle`] per listing card in `html`.
///
/// Relative links are resolved against `base`. A page with no matching cards
/// yields an empty vector.
#[instrument(level = "info", skip_all, fields(%base))]
pub fn parse_listing(html: &str, base: &Url) -> Vec<NewArticle> {
    let document = Html::parse_document(html);
    let articles: Vec<NewArticle> = document
        .select(&CARD_SELECTOR)
        .map(|card| parse_card(card, base))
        .collect();

    if articles.is_empty() {
        warn!("No listing cards matched; page layout may have changed");
    }
    debug!(count = articles.len(), "Parsed NPR listing");
    articles
}

fn parse_card(card: ElementRef<'_>, base: &Url) -> NewArticle {
    NewArticle {
        title: non_empty_text(&collect_text(card, &HEADLINE_SELECTOR)),
        link: card
            .select(&LINK_SELECTOR)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| resolve_link(base, href)),
        summary: non_empty_text(&collect_text(card, &TEASER_SELECTOR)),
    }
}

/// Concatenated text of every element under `root` matching `selector`.
fn collect_text(root: ElementRef<'_>, selector: &Selector) -> String {
    root.select(selector)
        .flat_map(|element| element.text())
        .collect::<Vec<_>>()
        .join(" ")
}

fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    match base.join(href) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(e) => {
            warn!(%href, error = %e, "Unresolvable card link; keeping it verbatim");
            Some(href.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <html><body>
          <article class="item">
            <div class="item-info">
              <h2 class="title">
                <a href="https://www.npr.org/2025/05/06/first-story">First
                   headline</a>
              </h2>
              <p class="teaser"><time>May 6, 2025 &bull;</time> First teaser.</p>
            </div>
          </article>
          <article class="item">
            <h2 class="title"><a href="/2025/05/06/second-story">Second headline</a></h2>
            <p class="teaser">Second teaser.</p>
          </article>
          <article class="promo">
            <h2><a href="/ignored">Not a listing card</a></h2>
          </article>
        </body></html>
    "#;

    fn base() -> Url {
        Url::parse("https://www.npr.org/sections/world/").unwrap()
    }

    #[test]
    fn test_parse_listing_extracts_every_card() {
        let articles = parse_listing(LISTING, &base());
        assert_eq!(articles.len(), 2);

        assert_eq!(articles[0].title.as_deref(), Some("First headline"));
        assert_eq!(
            articles[0].link.as_deref(),
            Some("https://www.npr.org/2025/05/06/first-story")
        );
        assert_eq!(
            articles[0].summary.as_deref(),
            Some("May 6, 2025 • First teaser.")
        );
    }

    #[test]
    fn test_parse_listing_resolves_relative_links() {
        let articles = parse_listing(LISTING, &base());
        assert_eq!(
            articles[1].link.as_deref(),
            Some("https://www.npr.org/2025/05/06/second-story")
        );
        assert_eq!(articles[1].summary.as_deref(), Some("Second teaser."));
    }

    #[test]
    fn test_parse_listing_keeps_cards_with_missing_fields() {
        let html = r#"
            <article class="item"><h2>Headline without link</h2></article>
            <article class="item"><p class="teaser">Teaser only</p></article>
        "#;
        let articles = parse_listing(html, &base());

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title.as_deref(), Some("Headline without link"));
        assert_eq!(articles[0].link, None);
        assert_eq!(articles[0].summary, None);
        assert_eq!(articles[1].title, None);
        assert_eq!(articles[1].summary.as_deref(), Some("Teaser only"));
    }

    #[test]
    fn test_parse_listing_without_cards_is_empty() {
        let html = "<html><body><h2>No cards here</h2></body></html>";
        assert!(parse_listing(html, &base()).is_empty());
    }

    #[test]
    fn test_resolve_link_ignores_blank_href() {
        assert_eq!(resolve_link(&base(), "   "), None);
    }
}
