//! Built-in blueprint configuration
//!
//! The site's startup blueprint set. These definitions are data wiring only;
//! all expansion behavior lives in the application layer. Register them once
//! at startup via [`register_builtin_blueprints`].

use serde_json::json;
use std::sync::Arc;

use crate::domain::blueprint::{Blueprint, BlueprintDefaults, LinkRules, SearchIntent, SlugPattern};
use crate::domain::cluster::{AxisCluster, FixedCluster};
use crate::domain::dimension::{DimensionArray, DimensionAxis, DimensionValue};
use crate::domain::registry::{BlueprintRegistry, RegistryError};

/// Register every built-in blueprint. Fails fast on a duplicate or
/// structurally invalid definition.
pub fn register_builtin_blueprints(registry: &BlueprintRegistry) -> Result<(), RegistryError> {
    registry.register(social_image_resizer_blueprint())?;
    registry.register(fitness_calculator_blueprint())?;
    Ok(())
}

/// Social image resizer family: platform x format, one shell per pair
/// (e.g. `instagram-story-resizer`), clustered per platform.
pub fn social_image_resizer_blueprint() -> Blueprint {
    let platforms = DimensionArray::new(
        DimensionAxis::Platform,
        vec![
            DimensionValue::new("instagram", "Instagram").with_variations(&["ig", "insta"]),
            DimensionValue::new("tiktok", "TikTok"),
            DimensionValue::new("youtube", "YouTube").with_variations(&["yt"]),
            DimensionValue::new("x", "X (Twitter)").with_variations(&["twitter"]),
            DimensionValue::new("linkedin", "LinkedIn"),
            DimensionValue::new("pinterest", "Pinterest"),
            DimensionValue::new("facebook", "Facebook").with_variations(&["fb"]),
        ],
    );

    let formats = DimensionArray::new(
        DimensionAxis::Format,
        vec![
            DimensionValue::new("post", "Post")
                .with_config("width", json!(1080))
                .with_config("height", json!(1080)),
            DimensionValue::new("story", "Story")
                .with_config("width", json!(1080))
                .with_config("height", json!(1920)),
            DimensionValue::new("profile", "Profile Picture")
                .with_config("width", json!(400))
                .with_config("height", json!(400)),
            DimensionValue::new("cover", "Cover Photo")
                .with_config("width", json!(1640))
                .with_config("height", json!(624)),
            DimensionValue::new("thumbnail", "Thumbnail")
                .with_config("width", json!(1280))
                .with_config("height", json!(720)),
        ],
    );

    Blueprint {
        id: "social-image-resizer".into(),
        engine_id: "image-resizer".into(),
        segment: "social-media".into(),
        slug_pattern: SlugPattern::template("{platform}-{format}-resizer"),
        title_pattern: "{platform_label} {format_label} Resizer".into(),
        keyword_pattern: "{platform_label} {format_label} size".into(),
        description_pattern:
            "Resize any image to the exact {platform_label} {format_label} dimensions.".into(),
        dimensions: vec![platforms, formats],
        cluster_resolver: Arc::new(AxisCluster::new(DimensionAxis::Platform, "images")),
        link_rules: LinkRules {
            max_related: 6,
            cluster_siblings: true,
            cross_engine: false,
        },
        defaults: BlueprintDefaults {
            priority: 7,
            is_indexed: true,
            in_directory: true,
            search_intent: SearchIntent::Transactional,
        },
        input_type: "image".into(),
        output_type: "image".into(),
    }
}

/// Fitness calculator family: one shell per topic (e.g. `bmi-calculator`),
/// all in a single health cluster.
pub fn fitness_calculator_blueprint() -> Blueprint {
    let topics = DimensionArray::new(
        DimensionAxis::Topic,
        vec![
            DimensionValue::new("bmi", "BMI").with_variations(&["body mass index"]),
            DimensionValue::new("bmr", "BMR").with_variations(&["basal metabolic rate"]),
            DimensionValue::new("tdee", "TDEE"),
            DimensionValue::new("calorie-deficit", "Calorie Deficit"),
            DimensionValue::new("protein-intake", "Protein Intake"),
            DimensionValue::new("water-intake", "Water Intake"),
        ],
    );

    Blueprint {
        id: "fitness-calculator".into(),
        engine_id: "calculator".into(),
        segment: "health".into(),
        slug_pattern: SlugPattern::template("{topic}-calculator"),
        title_pattern: "{topic_label} Calculator".into(),
        keyword_pattern: "{topic_label} calculator".into(),
        description_pattern:
            "Work out your {topic_label} in seconds with this free calculator.".into(),
        dimensions: vec![topics],
        cluster_resolver: Arc::new(FixedCluster("health-calculators".into())),
        link_rules: LinkRules {
            max_related: 8,
            cluster_siblings: true,
            cross_engine: true,
        },
        defaults: BlueprintDefaults {
            priority: 8,
            is_indexed: true,
            in_directory: true,
            search_intent: SearchIntent::Informational,
        },
        input_type: "form".into(),
        output_type: "number".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::expansion::generate_all_shells;
    use std::collections::HashSet;

    #[test]
    fn builtin_blueprints_register_cleanly() {
        let registry = BlueprintRegistry::new();
        register_builtin_blueprints(&registry).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.get("social-image-resizer").is_some());
        assert!(registry.get("fitness-calculator").is_some());
        assert_eq!(registry.by_engine("image-resizer").len(), 1);
    }

    #[test]
    fn resizer_matrix_expands_to_full_cardinality() {
        let blueprint = social_image_resizer_blueprint();
        let shells = generate_all_shells(&blueprint);

        assert_eq!(shells.len(), 7 * 5);
        assert_eq!(shells.len(), blueprint.expected_combo_count());
    }

    #[test]
    fn every_builtin_slug_is_unique_and_clean() {
        let registry = BlueprintRegistry::new();
        register_builtin_blueprints(&registry).unwrap();

        let pattern = regex::Regex::new("^[a-z0-9-]+$").unwrap();
        for blueprint in registry.all() {
            let shells = generate_all_shells(&blueprint);
            let slugs: HashSet<&str> = shells.iter().map(|s| s.slug.as_str()).collect();

            assert_eq!(slugs.len(), shells.len(), "{} has colliding slugs", blueprint.id);
            for slug in slugs {
                assert!(pattern.is_match(slug), "bad slug: {slug}");
            }
        }
    }

    #[test]
    fn resizer_shells_cluster_per_platform() {
        let shells = generate_all_shells(&social_image_resizer_blueprint());
        let instagram: Vec<_> = shells
            .iter()
            .filter(|s| s.slug.starts_with("instagram-"))
            .collect();

        assert_eq!(instagram.len(), 5);
        assert!(instagram
            .iter()
            .all(|s| s.cluster_slug.as_deref() == Some("instagram-images")));
    }

    #[test]
    fn calculator_shells_share_the_fixed_cluster() {
        let shells = generate_all_shells(&fitness_calculator_blueprint());

        assert_eq!(shells.len(), 6);
        assert!(shells
            .iter()
            .all(|s| s.cluster_slug.as_deref() == Some("health-calculators")));
        assert!(shells.iter().any(|s| s.slug == "bmi-calculator"));
    }
}
