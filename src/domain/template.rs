//! Template interpolation and slug sanitation
//!
//! Interpolation is a plain find-replace over an enumerable key set. A
//! placeholder with no matching key stays verbatim in the output so a
//! malformed template is visibly broken instead of silently wrong.

use crate::domain::dimension::{DimensionAxis, DimensionValue};

/// The substitution keys available to one combo's templates.
///
/// For every selected dimension value two keys exist: the axis name mapping
/// to the value id (`platform` -> `instagram`) and the `_label` variant
/// mapping to the display label (`platform_label` -> `Instagram`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateContext {
    entries: Vec<(String, String)>,
}

impl TemplateContext {
    pub fn from_selection(selection: &[(DimensionAxis, &DimensionValue)]) -> Self {
        let mut context = Self::default();
        for (axis, value) in selection {
            context.insert(axis.as_str(), &value.id);
            context.insert(&axis.label_key(), &value.label);
        }
        context
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.entries.push((key.to_string(), value.to_string()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Substitute every `{key}` occurrence. Unknown placeholders are left
    /// verbatim, never dropped.
    pub fn interpolate(&self, template: &str) -> String {
        let mut output = template.to_string();
        for (key, value) in &self.entries {
            let placeholder = format!("{{{key}}}");
            if output.contains(&placeholder) {
                output = output.replace(&placeholder, value);
            }
        }
        output
    }
}

/// A named slug-derivation strategy a blueprint may register instead of a
/// template. The unconditional sanitation in [`slugify`] still applies to
/// its output.
pub trait SlugTransform: Send + Sync {
    fn transform(&self, context: &TemplateContext) -> String;
}

/// Normalize a raw slug candidate: lowercase, whitespace runs become a
/// single dash, anything outside `[a-z0-9-]` is stripped, dash runs are
/// collapsed and the ends trimmed.
pub fn slugify(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_dash = false;

    for ch in raw.chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_dash = !slug.is_empty();
            continue;
        }
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() {
            if pending_dash {
                slug.push('-');
                pending_dash = false;
            }
            slug.push(ch);
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dimension::DimensionValue;
    use proptest::prelude::*;

    fn context() -> TemplateContext {
        let platform = DimensionValue::new("instagram", "Instagram");
        let format = DimensionValue::new("story", "Story");
        TemplateContext::from_selection(&[
            (DimensionAxis::Platform, &platform),
            (DimensionAxis::Format, &format),
        ])
    }

    #[test]
    fn interpolates_ids_and_labels() {
        let ctx = context();
        assert_eq!(
            ctx.interpolate("{platform}-{format}-resizer"),
            "instagram-story-resizer"
        );
        assert_eq!(
            ctx.interpolate("{platform_label} {format_label} Resizer"),
            "Instagram Story Resizer"
        );
    }

    #[test]
    fn unknown_placeholder_stays_verbatim() {
        let ctx = context();
        assert_eq!(
            ctx.interpolate("{platform}-{codec}-export"),
            "instagram-{codec}-export"
        );
    }

    #[test]
    fn keys_enumerate_both_variants() {
        let ctx = context();
        let keys: Vec<&str> = ctx.keys().collect();
        assert_eq!(
            keys,
            vec!["platform", "platform_label", "format", "format_label"]
        );
    }

    #[test]
    fn slugify_handles_messy_labels() {
        assert_eq!(slugify("Twitter/X Header"), "twitterx-header");
        assert_eq!(slugify("  Cover   Photo  "), "cover-photo");
        assert_eq!(slugify("1080 x 1080 (Square)"), "1080-x-1080-square");
        assert_eq!(slugify("already-clean"), "already-clean");
    }

    proptest! {
        #[test]
        fn slugify_output_is_always_clean(raw in ".*") {
            let slug = slugify(&raw);
            prop_assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
        }
    }
}
