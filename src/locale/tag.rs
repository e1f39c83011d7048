//! Language-tag shaped strings.
//!
//! Only the narrow `ll` / `ll-RR` shape is recognized. Anything longer
//! (scripts, numeric regions, variants) is not treated as a tag.

/// A `language[-REGION]` tag with two-letter subtags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageTag<'a> {
    base: &'a str,
    region: Option<&'a str>,
}

impl<'a> LanguageTag<'a> {
    /// Parse a path segment such as `en`, `EN`, `en-US` or `pt-br`.
    pub fn parse(segment: &'a str) -> Option<Self> {
        let (base, region) = match segment.split_once('-') {
            Some((base, region)) => (base, Some(region)),
            None => (segment, None),
        };

        if !is_alpha2(base) {
            return None;
        }
        if let Some(region) = region {
            if !is_alpha2(region) {
                return None;
            }
        }

        Some(Self { base, region })
    }

    /// Base subtag lower-cased, e.g. `"en"` for `"EN-us"`.
    pub fn base(&self) -> String {
        self.base.to_ascii_lowercase()
    }

    pub fn region(&self) -> Option<&'a str> {
        self.region
    }
}

fn is_alpha2(s: &str) -> bool {
    s.len() == 2 && s.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Primary entry of an `Accept-Language` header.
///
/// The first comma-separated item with its parameters (`;q=`) removed,
/// trimmed and lower-cased. `None` when the header has no usable entry.
pub fn accept_language_primary(header: &str) -> Option<String> {
    let first = header.split(',').next()?;
    let tag = first.split(';').next().unwrap_or(first).trim();
    if tag.is_empty() || tag == "*" {
        return None;
    }
    Some(tag.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        let tag = LanguageTag::parse("en-US").unwrap();
        assert_eq!(tag.base(), "en");
        assert_eq!(tag.region(), Some("US"));

        assert_eq!(LanguageTag::parse("FR").unwrap().base(), "fr");
        assert!(LanguageTag::parse("fr").unwrap().region().is_none());
    }

    #[test]
    fn test_rejects_non_tags() {
        for segment in ["", "e", "eng", "about", "es-419", "zh-Hant", "en-", "-US", "e1", "en_US"] {
            assert!(LanguageTag::parse(segment).is_none(), "{segment} should not parse");
        }
    }

    #[test]
    fn test_accept_language_primary() {
        assert_eq!(
            accept_language_primary("en-US,en;q=0.9,es;q=0.8").as_deref(),
            Some("en-us")
        );
        assert_eq!(accept_language_primary(" es ;q=1").as_deref(), Some("es"));
        assert_eq!(accept_language_primary("*"), None);
        assert_eq!(accept_language_primary(""), None);
    }
}
