use strsim::jaro_winkler;
use tracing::warn;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Normalize a user-supplied name: trimmed, lowercase, `-` and spaces as `_`.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase().replace(['-', ' '], "_")
}

/// Closest known name to `input`, if any is similar enough.
pub fn closest_name<'a>(input: &str, known: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let input = normalize_name(input);
    known
        .into_iter()
        .map(|name| (name, jaro_winkler(name, &input)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(name, _)| name)
}

/// A closed set of named options that falls back to a default on unknown input.
pub trait NamedVariant: Copy + Default + 'static {
    /// What the option describes, for log messages.
    const KIND: &'static str;

    /// Every variant, in display order.
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    /// Variant used when a name is given but not recognized.
    fn unknown_fallback() -> Self {
        Self::default()
    }

    /// Exact lookup after normalization.
    fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize_name(name);
        Self::ALL.iter().copied().find(|v| v.name() == wanted)
    }

    /// Lenient lookup: missing or blank input gives the default silently,
    /// unknown input gives `unknown_fallback` with a warning.
    fn resolve(name: Option<&str>) -> Self {
        let Some(name) = name.filter(|n| !n.trim().is_empty()) else {
            return Self::default();
        };

        if let Some(variant) = Self::from_name(name) {
            return variant;
        }

        let fallback = Self::unknown_fallback();
        match closest_name(name, Self::ALL.iter().map(|v| v.name())) {
            Some(suggestion) => warn!(
                kind = Self::KIND,
                input = name,
                suggestion,
                fallback = fallback.name(),
                "unknown {}, did you mean '{}'?",
                Self::KIND,
                suggestion
            ),
            None => warn!(
                kind = Self::KIND,
                input = name,
                fallback = fallback.name(),
                "unknown {}, using default",
                Self::KIND
            ),
        }
        fallback
    }

    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Very-Active "), "very_active");
        assert_eq!(normalize_name("High Protein"), "high_protein");
    }

    #[test]
    fn test_closest_name() {
        let known = ["sedentary", "light", "moderate", "active", "very_active"];
        assert_eq!(closest_name("moderat", known), Some("moderate"));
        assert_eq!(closest_name("zzzz", known), None);
    }
}
