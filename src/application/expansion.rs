//! Cartesian expansion engine and shell materializer
//!
//! Pure functions from a blueprint definition to concrete page records. No
//! side effects, no I/O; safe to call repeatedly and concurrently. Running
//! an expansion twice with no blueprint change yields an identical,
//! identically ordered list — the sync pipeline's idempotency rests on this.

use chrono::Utc;

use crate::domain::blueprint::Blueprint;
use crate::domain::combo::CartesianCombo;
use crate::domain::dimension::{DimensionAxis, DimensionValue};
use crate::domain::shell::{DimensionSnapshot, GeneratedShell, ShellStatus};
use crate::domain::template::{slugify, TemplateContext};

/// Fixed suffix appended to every materialized meta description.
const META_DESCRIPTION_SUFFIX: &str = "Free online tool, no sign-up required.";

/// Expand a blueprint into one combo per dimension-value tuple.
///
/// The first declared axis varies slowest, so output order is the
/// lexicographic order of per-axis value indices. A blueprint with zero
/// dimensions generates nothing; that is a deliberate no-op, not an error.
pub fn generate_combos(blueprint: &Blueprint) -> Vec<CartesianCombo> {
    if blueprint.dimensions.is_empty() {
        return Vec::new();
    }

    let mut selections: Vec<Vec<(DimensionAxis, &DimensionValue)>> = vec![Vec::new()];
    for array in &blueprint.dimensions {
        let mut extended = Vec::with_capacity(selections.len() * array.values.len());
        for prefix in &selections {
            for value in &array.values {
                let mut selection = prefix.clone();
                selection.push((array.axis, value));
                extended.push(selection);
            }
        }
        selections = extended;
    }

    selections
        .iter()
        .map(|selection| build_combo(blueprint, selection))
        .collect()
}

fn build_combo(
    blueprint: &Blueprint,
    selection: &[(DimensionAxis, &DimensionValue)],
) -> CartesianCombo {
    let context = TemplateContext::from_selection(selection);

    // A registered transform wins over the slug template; sanitation applies
    // to both paths.
    let raw_slug = match &blueprint.slug_pattern.transform {
        Some(transform) => transform.transform(&context),
        None => context.interpolate(&blueprint.slug_pattern.template),
    };

    CartesianCombo {
        dimensions: selection
            .iter()
            .map(|(axis, value)| (*axis, (*value).clone()))
            .collect(),
        slug: slugify(&raw_slug),
        name: context.interpolate(&blueprint.title_pattern),
        primary_keyword: context.interpolate(&blueprint.keyword_pattern),
        description: context.interpolate(&blueprint.description_pattern),
        engine_id: blueprint.engine_id.clone(),
        segment: blueprint.segment.clone(),
    }
}

/// Materialize one combo into a full catalog candidate.
///
/// Always proposes a brand-new draft stamped with the current time; the
/// decision to persist or publish belongs to the sync pipeline's caller.
pub fn combo_to_shell(combo: &CartesianCombo, blueprint: &Blueprint) -> GeneratedShell {
    let cluster_slug = blueprint.cluster_resolver.resolve(combo);

    GeneratedShell {
        slug: combo.slug.clone(),
        name: combo.name.clone(),
        engine_type: blueprint.engine_id.clone(),
        segment: blueprint.segment.clone(),
        priority: blueprint.defaults.priority,
        is_indexed: blueprint.defaults.is_indexed,
        in_directory: blueprint.defaults.in_directory,
        cluster_slug,
        primary_keyword: combo.primary_keyword.clone(),
        secondary_keywords: secondary_keywords(&combo.primary_keyword),
        search_intent: blueprint.defaults.search_intent,
        h1: combo.name.clone(),
        meta_description: format!(
            "{} {META_DESCRIPTION_SUFFIX}",
            combo.description.trim_end()
        ),
        intro_copy: combo.description.clone(),
        link_rules: blueprint.link_rules.clone(),
        dimensions: DimensionSnapshot::from(combo),
        created_at: Utc::now(),
        status: ShellStatus::Draft,
    }
}

pub fn generate_all_shells(blueprint: &Blueprint) -> Vec<GeneratedShell> {
    generate_combos(blueprint)
        .iter()
        .map(|combo| combo_to_shell(combo, blueprint))
        .collect()
}

/// Deterministic keyword variants, identical across all blueprints.
fn secondary_keywords(primary: &str) -> Vec<String> {
    vec![
        format!("{primary} free"),
        format!("{primary} online"),
        format!("best {primary}"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::blueprint::{BlueprintDefaults, LinkRules, SearchIntent, SlugPattern};
    use crate::domain::cluster::{AxisCluster, Unclustered};
    use crate::domain::dimension::DimensionArray;
    use crate::domain::template::SlugTransform;
    use rstest::rstest;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn platform_values(ids: &[(&str, &str)]) -> Vec<DimensionValue> {
        ids.iter()
            .map(|(id, label)| DimensionValue::new(*id, *label))
            .collect()
    }

    fn resizer_blueprint(dimensions: Vec<DimensionArray>) -> Blueprint {
        Blueprint {
            id: "social-resizer".into(),
            engine_id: "image-resizer".into(),
            segment: "social-media".into(),
            slug_pattern: SlugPattern::template("{platform}-resizer"),
            title_pattern: "{platform_label} Resizer".into(),
            keyword_pattern: "{platform_label} image size".into(),
            description_pattern: "Resize any image for {platform_label}.".into(),
            dimensions,
            cluster_resolver: Arc::new(AxisCluster::new(DimensionAxis::Platform, "images")),
            link_rules: LinkRules::default(),
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

    fn single_axis_blueprint() -> Blueprint {
        resizer_blueprint(vec![DimensionArray::new(
            DimensionAxis::Platform,
            platform_values(&[("instagram", "Instagram"), ("tiktok", "TikTok")]),
        )])
    }

    #[test]
    fn example_scenario_two_platforms() {
        let shells = generate_all_shells(&single_axis_blueprint());

        let slugs: Vec<&str> = shells.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, vec!["instagram-resizer", "tiktok-resizer"]);
    }

    #[rstest]
    #[case(&[2], 2)]
    #[case(&[2, 3], 6)]
    #[case(&[2, 3, 4], 24)]
    #[case(&[5, 0], 0)]
    fn cardinality_is_product_of_axis_sizes(#[case] sizes: &[usize], #[case] expected: usize) {
        let axes = [
            DimensionAxis::Platform,
            DimensionAxis::Format,
            DimensionAxis::Size,
        ];
        let dimensions: Vec<DimensionArray> = sizes
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let values = (0..n)
                    .map(|j| DimensionValue::new(format!("v{i}-{j}"), format!("V{i} {j}")))
                    .collect();
                DimensionArray::new(axes[i], values)
            })
            .collect();

        let blueprint = resizer_blueprint(dimensions);
        assert_eq!(generate_combos(&blueprint).len(), expected);
        assert_eq!(blueprint.expected_combo_count(), expected);
    }

    #[test]
    fn zero_dimensions_generates_nothing() {
        let blueprint = resizer_blueprint(Vec::new());
        assert!(generate_combos(&blueprint).is_empty());
        assert!(generate_all_shells(&blueprint).is_empty());
    }

    #[test]
    fn expansion_is_deterministic() {
        let blueprint = single_axis_blueprint();
        let first = generate_all_shells(&blueprint);
        let second = generate_all_shells(&blueprint);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.slug, b.slug);
            assert_eq!(a.name, b.name);
            assert_eq!(a.primary_keyword, b.primary_keyword);
            assert_eq!(a.dimensions, b.dimensions);
        }
    }

    #[test]
    fn first_axis_varies_slowest() {
        let blueprint = resizer_blueprint(vec![
            DimensionArray::new(
                DimensionAxis::Platform,
                platform_values(&[("instagram", "Instagram"), ("tiktok", "TikTok")]),
            ),
            DimensionArray::new(
                DimensionAxis::Format,
                platform_values(&[("post", "Post"), ("story", "Story")]),
            ),
        ]);

        let combos = generate_combos(&blueprint);
        let pairs: Vec<(&str, &str)> = combos
            .iter()
            .map(|c| {
                (
                    c.value_for(DimensionAxis::Platform).unwrap().id.as_str(),
                    c.value_for(DimensionAxis::Format).unwrap().id.as_str(),
                )
            })
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("instagram", "post"),
                ("instagram", "story"),
                ("tiktok", "post"),
                ("tiktok", "story"),
            ]
        );
    }

    #[test]
    fn messy_labels_never_leak_into_slugs() {
        let blueprint = resizer_blueprint(vec![DimensionArray::new(
            DimensionAxis::Platform,
            vec![DimensionValue::new("Twitter/X Feed", "Twitter/X")],
        )]);

        let combos = generate_combos(&blueprint);
        let pattern = regex::Regex::new("^[a-z0-9-]+$").unwrap();
        assert_eq!(combos[0].slug, "twitterx-feed-resizer");
        assert!(pattern.is_match(&combos[0].slug));
    }

    #[test]
    fn slug_transform_takes_precedence_over_template() {
        struct PlatformOnly;
        impl SlugTransform for PlatformOnly {
            fn transform(&self, context: &TemplateContext) -> String {
                format!("Resize {}!", context.get("platform").unwrap_or_default())
            }
        }

        let mut blueprint = single_axis_blueprint();
        blueprint.slug_pattern =
            SlugPattern::template("{platform}-resizer").with_transform(Arc::new(PlatformOnly));

        let combos = generate_combos(&blueprint);
        // Transform output is still sanitized.
        assert_eq!(combos[0].slug, "resize-instagram");
    }

    #[test]
    fn materializer_fills_derived_fields() {
        let blueprint = single_axis_blueprint();
        let shells = generate_all_shells(&blueprint);
        let shell = &shells[0];

        assert_eq!(shell.status, ShellStatus::Draft);
        assert_eq!(shell.cluster_slug.as_deref(), Some("instagram-images"));
        assert_eq!(
            shell.secondary_keywords,
            vec![
                "Instagram image size free",
                "Instagram image size online",
                "best Instagram image size",
            ]
        );
        assert_eq!(
            shell.meta_description,
            "Resize any image for Instagram. Free online tool, no sign-up required."
        );
        assert_eq!(shell.h1, shell.name);
        assert_eq!(shell.dimensions.platform.as_deref(), Some("Instagram"));
        assert_eq!(shell.search_intent, SearchIntent::Transactional);
        assert_eq!(shell.priority, 7);
    }

    #[test]
    fn unresolved_cluster_stays_none() {
        let mut blueprint = single_axis_blueprint();
        blueprint.cluster_resolver = Arc::new(Unclustered);

        let shells = generate_all_shells(&blueprint);
        assert!(shells.iter().all(|s| s.cluster_slug.is_none()));
    }

    #[test]
    fn slugs_are_unique_within_one_expansion() {
        let mut blueprint = resizer_blueprint(vec![
            DimensionArray::new(
                DimensionAxis::Platform,
                platform_values(&[
                    ("instagram", "Instagram"),
                    ("tiktok", "TikTok"),
                    ("youtube", "YouTube"),
                ]),
            ),
            DimensionArray::new(
                DimensionAxis::Format,
                platform_values(&[("post", "Post"), ("story", "Story"), ("cover", "Cover")]),
            ),
        ]);
        blueprint.slug_pattern = SlugPattern::template("{platform}-{format}-resizer");

        let combos = generate_combos(&blueprint);
        let unique: HashSet<&str> = combos.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(unique.len(), combos.len());
    }
}
