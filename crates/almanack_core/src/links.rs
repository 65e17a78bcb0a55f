use chrono::{DateTime, Datelike, Utc};
use url::Url;

/// Origin of the public news site.
pub const PUBLIC_ORIGIN: &str = "https://www.spotlightpa.org";
/// Origin of the admin console itself, used in notification emails.
pub const ADMIN_ORIGIN: &str = "https://almanack.data.spotlightpa.org";
/// Wire-service composer, where the upstream copy of a story is edited.
pub const ARC_COMPOSER_ORIGIN: &str = "https://pmn.arcpublishing.com/composer/edit";

/// Resolves a site-relative URL against the public origin.
pub fn to_abs(rel: &str) -> String {
    if rel.is_empty() {
        return String::new();
    }
    match Url::parse(PUBLIC_ORIGIN).and_then(|base| base.join(rel)) {
        Ok(url) => url.to_string(),
        Err(_) => rel.to_string(),
    }
}

/// Strips the public origin from an absolute URL; other URLs pass through.
pub fn to_rel(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    match parsed.host_str() {
        Some("www.spotlightpa.org" | "spotlightpa.org") => parsed.path().to_string(),
        _ => url.to_string(),
    }
}

/// Link to the wire composer for a story id.
pub fn arc_url(id: &str) -> String {
    format!("{ARC_COMPOSER_ORIGIN}/{id}/")
}

/// Extracts the slug from a canonical URL of the form `/dir/<slug>-<suffix>`.
pub fn pubslug(canonical_url: &str) -> String {
    let Some(stop) = canonical_url.rfind('-') else {
        return String::new();
    };
    let Some(start) = canonical_url[..stop].rfind('/') else {
        return String::new();
    };
    canonical_url[start + 1..stop].to_string()
}

/// `news/YYYY/MM` for the given publication date.
pub fn news_dir(date: &DateTime<Utc>) -> String {
    format!("news/{}/{:02}", date.year(), date.month())
}

/// Canonical public URL for a news story, empty without a slug or date.
pub fn pub_url(slug: &str, date: Option<&DateTime<Utc>>) -> String {
    match (slug, date) {
        ("", _) | (_, None) => String::new(),
        (slug, Some(date)) => format!("{PUBLIC_ORIGIN}/{}/{slug}/", news_dir(date)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn abs_and_rel() {
        assert_eq!(to_abs("/news/x/"), "https://www.spotlightpa.org/news/x/");
        assert_eq!(to_abs(""), "");
        assert_eq!(to_rel("https://spotlightpa.org/a/b/"), "/a/b/");
        assert_eq!(to_rel("https://example.com/a/"), "https://example.com/a/");
        assert_eq!(to_rel("not a url"), "not a url");
    }

    #[test]
    fn pubslug_from_canonical() {
        assert_eq!(pubslug("/news/2020/05/budget-deal-ABC123"), "budget-deal");
        assert_eq!(pubslug("/nodash"), "");
        assert_eq!(pubslug("no-slash"), "");
    }

    #[test]
    fn pub_url_needs_slug_and_date() {
        let d = Utc.with_ymd_and_hms(2020, 5, 9, 12, 0, 0).unwrap();
        assert_eq!(
            pub_url("budget", Some(&d)),
            "https://www.spotlightpa.org/news/2020/05/budget/"
        );
        assert_eq!(pub_url("", Some(&d)), "");
        assert_eq!(pub_url("budget", None), "");
    }
}
