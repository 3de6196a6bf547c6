use crate::common_types::DeviceModelId;
use crate::registry::{ModelRegistry, RegistryEntry};
use serde::Serialize;
use url::Url;

/// Whitespace as browsers define it for `\s`: Unicode `White_Space` without NEL (U+0085),
/// plus the byte order mark (U+FEFF) that OCR engines and copied labels sometimes carry.
fn is_label_whitespace(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// Strips every whitespace character and uppercases the rest.
///
/// OCR output and registry identifiers both go through this before they are compared,
/// so `"sp d3303x-e "` and `"SPD3303X-E"` normalize to the same string.
pub fn normalize_text(text: &str) -> String {
    text.chars()
        .filter(|c| !is_label_whitespace(*c))
        .flat_map(char::to_uppercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MatchPolicy {
    /// The first registry entry, in declaration order, found in the text
    #[default]
    First,
    /// The longest identifier found in the text, ties resolved by declaration order
    Longest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelMatch {
    pub model_id: DeviceModelId,
    pub url: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum ModelMatcherResult {
    Matched(ModelMatch),
    NoMatch,
}

impl ModelMatcherResult {
    pub fn matched(&self) -> Option<&ModelMatch> {
        match self {
            ModelMatcherResult::Matched(model_match) => Some(model_match),
            ModelMatcherResult::NoMatch => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModelMatcher<'a> {
    registry: &'a ModelRegistry,
    policy: MatchPolicy,
}

impl<'a> ModelMatcher<'a> {
    pub fn new(registry: &'a ModelRegistry, policy: MatchPolicy) -> Self {
        ModelMatcher { registry, policy }
    }

    pub fn matches(&self, recognized_text: &str) -> ModelMatcherResult {
        let normalized_text = normalize_text(recognized_text);
        let mut candidates = self
            .registry
            .entries()
            .iter()
            .filter(|entry| normalized_text.contains(entry.normalized_id()));

        let found = match self.policy {
            MatchPolicy::First => candidates.next(),
            MatchPolicy::Longest => {
                candidates.fold(None::<&RegistryEntry>, |best, entry| match best {
                    Some(best_entry) if best_entry.normalized_len() >= entry.normalized_len() => {
                        Some(best_entry)
                    }
                    _ => Some(entry),
                })
            }
        };

        match found {
            Some(entry) => ModelMatcherResult::Matched(ModelMatch {
                model_id: entry.model_id.clone(),
                url: entry.url.clone(),
            }),
            None => ModelMatcherResult::NoMatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rvstruct::ValueStruct;

    fn single_model_registry() -> ModelRegistry {
        ModelRegistry::from_entries([("SPD3303X-E", "https://example.com/a")]).unwrap()
    }

    fn matched_url(result: &ModelMatcherResult) -> Option<String> {
        result.matched().map(|m| m.url.to_string())
    }

    #[test]
    fn test_matches_noisy_ocr_text() {
        let registry = single_model_registry();
        let matcher = ModelMatcher::new(&registry, MatchPolicy::First);

        let result = matcher.matches("sp d3303x-e ");
        let model_match = result.matched().unwrap();
        assert_eq!(model_match.model_id.value(), "SPD3303X-E");
        assert_eq!(model_match.url.as_str(), "https://example.com/a");
    }

    #[test]
    fn test_no_match_for_unrelated_and_empty_text() {
        let registry = single_model_registry();
        let matcher = ModelMatcher::new(&registry, MatchPolicy::First);

        assert_eq!(
            matcher.matches("completely unrelated text"),
            ModelMatcherResult::NoMatch
        );
        assert_eq!(matcher.matches(""), ModelMatcherResult::NoMatch);
        assert_eq!(matcher.matches(" \n\t "), ModelMatcherResult::NoMatch);
    }

    #[test]
    fn test_model_inside_label_noise() {
        let registry = single_model_registry();
        let matcher = ModelMatcher::new(&registry, MatchPolicy::First);

        let text = "SIGLENT\nProgrammable DC Power Supply\nModel: SPD3303X-E  220V~ 50/60Hz";
        assert_eq!(
            matched_url(&matcher.matches(text)).as_deref(),
            Some("https://example.com/a")
        );
    }

    #[test]
    fn test_first_declared_entry_wins() {
        let registry = ModelRegistry::from_entries([
            ("SPD3303X", "https://example.com/short"),
            ("SPD3303X-E", "https://example.com/long"),
        ])
        .unwrap();

        let first = ModelMatcher::new(&registry, MatchPolicy::First);
        assert_eq!(
            matched_url(&first.matches("SPD3303X-E")).as_deref(),
            Some("https://example.com/short")
        );

        let longest = ModelMatcher::new(&registry, MatchPolicy::Longest);
        assert_eq!(
            matched_url(&longest.matches("SPD3303X-E")).as_deref(),
            Some("https://example.com/long")
        );
        assert_eq!(
            matched_url(&longest.matches("SPD3303X")).as_deref(),
            Some("https://example.com/short")
        );
    }

    #[test]
    fn test_longest_policy_keeps_declaration_order_on_ties() {
        let registry = ModelRegistry::from_entries([
            ("AB-1", "https://example.com/ab"),
            ("CD-2", "https://example.com/cd"),
        ])
        .unwrap();
        let matcher = ModelMatcher::new(&registry, MatchPolicy::Longest);
        assert_eq!(
            matched_url(&matcher.matches("cd-2 ab-1")).as_deref(),
            Some("https://example.com/ab")
        );
    }

    #[test]
    fn test_registry_identifier_is_normalized() {
        let registry =
            ModelRegistry::from_entries([("sdg 1032x", "https://example.com/sdg")]).unwrap();
        let matcher = ModelMatcher::new(&registry, MatchPolicy::First);
        let result = matcher.matches("SDG1032X");
        assert_eq!(result.matched().unwrap().model_id.value(), "sdg 1032x");
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("sp d3303x-e "), "SPD3303X-E");
        assert_eq!(normalize_text("a\tb\nc\r\u{a0}d"), "ABCD");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_normalize_text_follows_browser_whitespace() {
        assert_eq!(normalize_text("SPD\u{feff}3303X-E"), "SPD3303X-E");
        assert_eq!(normalize_text("SPD\u{2028}3303X\u{3000}-E"), "SPD3303X-E");
        assert_eq!(normalize_text("SPD\u{85}3303X-E"), "SPD\u{85}3303X-E");
    }

    #[test]
    fn test_byte_order_mark_inside_identifier_matches() {
        let registry = single_model_registry();
        let matcher = ModelMatcher::new(&registry, MatchPolicy::Longest);
        assert_eq!(
            matched_url(&matcher.matches("\u{feff}spd3303x\u{feff}-e")).as_deref(),
            Some("https://example.com/a")
        );
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(text in "\\PC*") {
            let once = normalize_text(&text);
            prop_assert_eq!(normalize_text(&once), once);
        }

        #[test]
        fn matching_ignores_case_and_inserted_whitespace(
            prefix in "[a-z0-9 ]{0,12}",
            suffix in "[a-z0-9 ]{0,12}",
            lowercase in any::<bool>(),
            gaps in proptest::collection::vec(0usize..3, 10),
        ) {
            let registry = single_model_registry();
            let matcher = ModelMatcher::new(&registry, MatchPolicy::First);
            let identifier = if lowercase { "spd3303x-e" } else { "SPD3303X-E" };
            let spaced: String = identifier
                .chars()
                .zip(gaps.iter())
                .map(|(c, gap)| format!("{}{}", c, " ".repeat(*gap)))
                .collect();
            let text = format!("{}{}{}", prefix, spaced, suffix);
            prop_assert_eq!(
                matched_url(&matcher.matches(&text)),
                Some("https://example.com/a".to_string())
            );
        }

        #[test]
        fn text_without_identifier_never_matches(text in "[G-Z ]{0,40}") {
            let registry =
                ModelRegistry::from_entries([("ABC-123", "https://example.com/abc")]).unwrap();
            let matcher = ModelMatcher::new(&registry, MatchPolicy::First);
            prop_assert_eq!(matcher.matches(&text), ModelMatcherResult::NoMatch);
        }
    }
}
