use chrono::{DateTime, Utc};
use ps_core::{Article, Result};
use scraper::{ElementRef, Html, Selector};

/// Parse an arXiv Atom feed into articles, in feed order.
///
/// The feed is run through the HTML parser rather than an XML one: every tag
/// the entries use (`entry`, `id`, `title`, `summary`, `published`) survives
/// the HTML tree-building rules, and the parser handles entity decoding for
/// us. Entries missing a link, title, or timestamp are skipped with a
/// warning rather than failing the whole feed.
pub fn parse_feed(feed: &str) -> Result<Vec<Article>> {
    let document = Html::parse_document(feed);
    let entry_sel = Selector::parse("entry").unwrap();
    let id_sel = Selector::parse("id").unwrap();
    let title_sel = Selector::parse("title").unwrap();
    let summary_sel = Selector::parse("summary").unwrap();
    let published_sel = Selector::parse("published").unwrap();

    let mut articles = Vec::new();
    for entry in document.select(&entry_sel) {
        let Some(link) = first_text(entry, &id_sel) else {
            tracing::warn!("skipping feed entry without an id");
            continue;
        };
        let Some(title) = first_text(entry, &title_sel) else {
            tracing::warn!("skipping feed entry without a title: {}", link);
            continue;
        };
        let description = first_text(entry, &summary_sel).unwrap_or_default();
        let Some(published_raw) = first_text(entry, &published_sel) else {
            tracing::warn!("skipping feed entry without a timestamp: {}", link);
            continue;
        };
        let published = match DateTime::parse_from_rfc3339(&published_raw) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(e) => {
                tracing::warn!("bad timestamp {:?} in {}: {}", published_raw, link, e);
                continue;
            }
        };

        articles.push(Article {
            title: collapse_whitespace(&title),
            description,
            link,
            published,
        });
    }

    Ok(articles)
}

fn first_text(entry: ElementRef, selector: &Selector) -> Option<String> {
    entry
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}

// arXiv wraps titles across lines with leading indentation.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
