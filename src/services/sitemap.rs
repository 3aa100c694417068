//! sitemaps.org rendering.

use anyhow::{Context, Result};
use serde::Serialize;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Public routes that exist regardless of the catalog content.
pub const STATIC_ROUTES: &[(&str, &str, &str)] = &[
    ("/", "daily", "1.0"),
    ("/movies", "daily", "0.9"),
    ("/series", "daily", "0.9"),
    ("/new", "daily", "0.8"),
    ("/suggest", "weekly", "0.6"),
    ("/about", "monthly", "0.3"),
    ("/contact", "monthly", "0.3"),
    ("/faq", "monthly", "0.3"),
    ("/help", "monthly", "0.3"),
    ("/privacy", "yearly", "0.2"),
    ("/terms", "yearly", "0.2"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapEntry {
    pub path: String,
    pub lastmod: Option<String>,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

impl SitemapEntry {
    #[must_use]
    pub fn watch(slug: &str, updated_at: String) -> Self {
        Self {
            path: format!("/watch/{slug}"),
            lastmod: Some(updated_at),
            changefreq: "weekly",
            priority: "0.7",
        }
    }
}

#[must_use]
pub fn static_entries() -> Vec<SitemapEntry> {
    STATIC_ROUTES
        .iter()
        .map(|(path, changefreq, priority)| SitemapEntry {
            path: (*path).to_string(),
            lastmod: None,
            changefreq,
            priority,
        })
        .collect()
}

#[derive(Serialize)]
#[serde(rename = "urlset")]
struct UrlSet<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'static str,
    url: Vec<Url<'a>>,
}

#[derive(Serialize)]
struct Url<'a> {
    loc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    lastmod: Option<&'a str>,
    changefreq: &'a str,
    priority: &'a str,
}

/// Renders `entries` as an XML sitemap rooted at `base_url`.
pub fn render(base_url: &str, entries: &[SitemapEntry]) -> Result<String> {
    let base = base_url.trim_end_matches('/');

    let urlset = UrlSet {
        xmlns: SITEMAP_NS,
        url: entries
            .iter()
            .map(|entry| Url {
                loc: format!("{base}{}", entry.path),
                lastmod: entry.lastmod.as_deref(),
                changefreq: entry.changefreq,
                priority: entry.priority,
            })
            .collect(),
    };

    let body = quick_xml::se::to_string(&urlset).context("Failed to serialize sitemap")?;

    Ok(format!(r#"<?xml version="1.0" encoding="UTF-8"?>{body}"#))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_static_and_watch_routes() {
        let mut entries = static_entries();
        entries.push(SitemapEntry::watch(
            "the-matrix",
            "2026-01-02T03:04:05.000000Z".to_string(),
        ));

        let xml = render("https://movio.example/", &entries).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?><urlset"#));
        assert!(xml.contains(SITEMAP_NS));
        assert!(xml.contains("<loc>https://movio.example/</loc>"));
        assert!(xml.contains("<loc>https://movio.example/terms</loc>"));
        assert!(xml.contains("<loc>https://movio.example/watch/the-matrix</loc>"));
        assert!(xml.contains("<lastmod>2026-01-02T03:04:05.000000Z</lastmod>"));
        assert_eq!(xml.matches("<url>").count(), STATIC_ROUTES.len() + 1);
    }
}
