//! Static redirect rule table.
//!
//! Declarative fallback rules for the hosting platform's routing layer,
//! derived from the same locale set as [`LocaleRouter`] so the two cannot
//! disagree on the default or the supported locales.
//!
//! Order for each path class (root first, then unprefixed paths):
//! cookie rules per non-default locale, then `Accept-Language` rules per
//! non-default locale, then the default locale. First match wins.

use serde::Serialize;

use crate::locale::{accept_language_primary, Locale, LocaleSet};
use crate::routing::matcher::SkipPredicate;
use crate::routing::router::LocaleRouter;

/// Redirect status used by every rule.
pub const RULE_STATUS: u16 = 308;

/// Which paths a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathClass {
    /// Exactly `/`.
    Root,
    /// Any other path whose first segment is not a supported locale and
    /// which is not excluded by the skip predicate.
    Unprefixed,
}

/// Signal a rule inspects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Preference cookie equals the value.
    Cookie { name: String, value: String },
    /// Primary `Accept-Language` tag starts with the prefix.
    AcceptLanguage { prefix: String },
    Always,
}

/// One match/redirect pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectRule {
    pub source: PathClass,
    pub condition: Condition,
    pub destination: String,
    pub status: u16,
    #[serde(skip)]
    pub locale: Locale,
}

/// Request signals the table evaluates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleInput<'a> {
    pub path: &'a str,
    pub cookie: Option<&'a str>,
    pub accept_language: Option<&'a str>,
}

/// Ordered rule set.
#[derive(Debug, Clone, Serialize)]
pub struct RuleTable {
    cookie_name: String,
    rules: Vec<RedirectRule>,
}

impl RuleTable {
    /// Derive the table from the locale set.
    pub fn from_locales(locales: &LocaleSet, cookie_name: &str) -> Self {
        let mut rules = Vec::new();
        for source in [PathClass::Root, PathClass::Unprefixed] {
            for locale in locales.non_default() {
                rules.push(rule(
                    source,
                    Condition::Cookie {
                        name: cookie_name.to_string(),
                        value: locale.code().to_string(),
                    },
                    locale,
                ));
            }
            for locale in locales.non_default() {
                rules.push(rule(
                    source,
                    Condition::AcceptLanguage {
                        prefix: locale.code().to_string(),
                    },
                    locale,
                ));
            }
            rules.push(rule(source, Condition::Always, locales.default_locale()));
        }

        Self {
            cookie_name: cookie_name.to_string(),
            rules,
        }
    }

    pub fn rules(&self) -> &[RedirectRule] {
        &self.rules
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// First rule matching the input, or `None` when the table does not
    /// apply (locale-prefixed or skipped paths).
    pub fn evaluate(
        &self,
        input: &RuleInput<'_>,
        locales: &LocaleSet,
        skip: &SkipPredicate,
    ) -> Option<&RedirectRule> {
        let class = classify(input.path, locales, skip)?;
        let primary = input.accept_language.and_then(accept_language_primary);

        self.rules
            .iter()
            .filter(|r| r.source == class)
            .find(|r| match &r.condition {
                Condition::Cookie { value, .. } => input.cookie == Some(value.as_str()),
                Condition::AcceptLanguage { prefix } => primary
                    .as_deref()
                    .is_some_and(|tag| tag.starts_with(prefix.as_str())),
                Condition::Always => true,
            })
    }

    /// Serialize the table for the hosting platform.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn rule(source: PathClass, condition: Condition, locale: &Locale) -> RedirectRule {
    RedirectRule {
        source,
        condition,
        destination: locale.home_path(),
        status: RULE_STATUS,
        locale: locale.clone(),
    }
}

fn classify(path: &str, locales: &LocaleSet, skip: &SkipPredicate) -> Option<PathClass> {
    if path == "/" {
        return Some(PathClass::Root);
    }
    if skip.should_skip(path) {
        return None;
    }
    let first = path
        .strip_prefix('/')
        .unwrap_or(path)
        .split('/')
        .next()
        .unwrap_or("");
    if locales.contains(first) {
        None
    } else {
        Some(PathClass::Unprefixed)
    }
}

/// A way in which the rule table and the edge router disagree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsistencyError {
    #[error("rule table default '{table}' differs from router default '{router}'")]
    DefaultMismatch { table: String, router: String },

    #[error("rule table destination '{0}' is not a supported locale home")]
    UnknownDestination(String),

    #[error("rule destination '{0}' would be redirected again by the router")]
    RedirectLoop(String),

    #[error("for '{path}' with cookie {cookie:?} the table sends '{table}' but the router sends '{router}'")]
    Divergent {
        path: String,
        cookie: Option<String>,
        table: String,
        router: String,
    },
}

/// Check the joint invariant between the router and the rule table.
///
/// Returns every violation found.
pub fn verify_consistency(
    router: &LocaleRouter,
    table: &RuleTable,
) -> Result<(), Vec<ConsistencyError>> {
    let locales = router.locales();
    let mut errors = Vec::new();

    let router_default = locales.default_locale().home_path();
    for r in table.rules.iter().filter(|r| r.condition == Condition::Always) {
        if r.destination != router_default {
            errors.push(ConsistencyError::DefaultMismatch {
                table: r.destination.clone(),
                router: router_default.clone(),
            });
        }
    }

    for r in &table.rules {
        if !locales.iter().any(|l| l.home_path() == r.destination) {
            errors.push(ConsistencyError::UnknownDestination(r.destination.clone()));
        }
        if !router.decide(&r.destination, None, None).is_pass_through() {
            errors.push(ConsistencyError::RedirectLoop(r.destination.clone()));
        }
    }

    // Without Accept-Language the table only sees the cookie, like the router.
    let mut cookies: Vec<Option<&str>> = vec![None, Some("zz")];
    cookies.extend(locales.iter().map(|l| Some(l.code())));

    for path in ["/", "/about", "/contact/form", "/zz-yy/x"] {
        for cookie in &cookies {
            let input = RuleInput {
                path,
                cookie: *cookie,
                accept_language: None,
            };
            let Some(rule) = table.evaluate(&input, locales, router.skip_predicate()) else {
                continue;
            };
            let Some(redirect) = router.decide(path, None, *cookie).redirect().cloned() else {
                continue;
            };
            // Tag normalization keeps the rest of the path; only compare home redirects.
            if redirect.path().matches('/').count() > 1 {
                continue;
            }
            if redirect.path() != rule.destination {
                errors.push(ConsistencyError::Divergent {
                    path: path.to_string(),
                    cookie: cookie.map(String::from),
                    table: rule.destination.clone(),
                    router: redirect.location.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GateConfig, SkipConfig};

    fn setup() -> (LocaleRouter, RuleTable) {
        let router = LocaleRouter::from_config(&GateConfig::default()).unwrap();
        let table = RuleTable::from_locales(router.locales(), "LOCALE_PREF");
        (router, table)
    }

    fn eval<'a>(
        router: &LocaleRouter,
        table: &'a RuleTable,
        path: &str,
        cookie: Option<&str>,
        accept_language: Option<&str>,
    ) -> Option<&'a str> {
        let input = RuleInput {
            path,
            cookie,
            accept_language,
        };
        table
            .evaluate(&input, router.locales(), router.skip_predicate())
            .map(|r| r.destination.as_str())
    }

    #[test]
    fn test_two_locales_produce_six_rules() {
        let (_, table) = setup();
        let rules = table.rules();
        assert_eq!(rules.len(), 6);

        assert_eq!(rules[0].source, PathClass::Root);
        assert_eq!(
            rules[0].condition,
            Condition::Cookie {
                name: "LOCALE_PREF".into(),
                value: "en".into()
            }
        );
        assert_eq!(rules[0].destination, "/en");
        assert_eq!(rules[1].condition, Condition::AcceptLanguage { prefix: "en".into() });
        assert_eq!(rules[2].condition, Condition::Always);
        assert_eq!(rules[2].destination, "/es");
        assert_eq!(rules[3].source, PathClass::Unprefixed);
        assert!(rules.iter().all(|r| r.status == 308));
    }

    #[test]
    fn test_root_rules() {
        let (router, table) = setup();
        assert_eq!(eval(&router, &table, "/", Some("en"), None), Some("/en"));
        assert_eq!(eval(&router, &table, "/", None, Some("en-US,es;q=0.5")), Some("/en"));
        assert_eq!(eval(&router, &table, "/", None, Some("es-ES,en;q=0.9")), Some("/es"));
        assert_eq!(eval(&router, &table, "/", Some("es"), Some("en")), Some("/en"));
        assert_eq!(eval(&router, &table, "/", None, None), Some("/es"));
    }

    #[test]
    fn test_unprefixed_rules_go_home() {
        let (router, table) = setup();
        assert_eq!(eval(&router, &table, "/about", Some("en"), None), Some("/en"));
        assert_eq!(eval(&router, &table, "/about", None, Some("en")), Some("/en"));
        assert_eq!(eval(&router, &table, "/about/team", None, None), Some("/es"));
    }

    #[test]
    fn test_table_ignores_prefixed_and_skipped_paths() {
        let (router, table) = setup();
        assert_eq!(eval(&router, &table, "/es/servicios", Some("en"), None), None);
        assert_eq!(eval(&router, &table, "/en", None, None), None);
        assert_eq!(eval(&router, &table, "/api/contact", None, None), None);
        assert_eq!(eval(&router, &table, "/robots.txt", Some("en"), None), None);
    }

    #[test]
    fn test_consistency_holds_for_derived_table() {
        let (router, table) = setup();
        assert_eq!(verify_consistency(&router, &table), Ok(()));
    }

    #[test]
    fn test_consistency_holds_for_other_locale_sets() {
        let mut config = GateConfig::default();
        config.locales.supported = vec!["en".into(), "de".into(), "fr".into()];
        config.locales.default = "de".into();
        let router = LocaleRouter::from_config(&config).unwrap();
        let table = RuleTable::from_locales(router.locales(), "lang");
        assert_eq!(table.rules().len(), 10);
        assert_eq!(verify_consistency(&router, &table), Ok(()));
    }

    #[test]
    fn test_consistency_detects_drift() {
        let (router, _) = setup();
        let drifted = LocaleSet::new(&["es", "en"], "en").unwrap();
        let table = RuleTable::from_locales(&drifted, "LOCALE_PREF");

        let errors = verify_consistency(&router, &table).unwrap_err();
        assert!(errors.contains(&ConsistencyError::DefaultMismatch {
            table: "/en".into(),
            router: "/es".into(),
        }));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConsistencyError::Divergent { .. })));
    }

    #[test]
    fn test_consistency_detects_loop() {
        let router = LocaleRouter::new(
            LocaleSet::new(&["es", "en"], "es").unwrap(),
            SkipPredicate::from_config(&SkipConfig::default()),
        );
        let other = LocaleSet::new(&["es", "pt"], "es").unwrap();
        let table = RuleTable::from_locales(&other, "LOCALE_PREF");

        let errors = verify_consistency(&router, &table).unwrap_err();
        assert!(errors.contains(&ConsistencyError::UnknownDestination("/pt".into())));
        assert!(errors.contains(&ConsistencyError::RedirectLoop("/pt".into())));
    }

    #[test]
    fn test_json_export() {
        let (_, table) = setup();
        let json: serde_json::Value = serde_json::from_str(&table.to_json().unwrap()).unwrap();
        assert_eq!(json["cookie_name"], "LOCALE_PREF");
        assert_eq!(json["rules"][0]["source"], "root");
        assert_eq!(json["rules"][0]["condition"]["type"], "cookie");
        assert_eq!(json["rules"][0]["condition"]["value"], "en");
        assert_eq!(json["rules"][5]["destination"], "/es");
        assert!(json["rules"][0].get("locale").is_none());
    }
}
