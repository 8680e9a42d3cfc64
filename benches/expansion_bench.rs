use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pagematrix::application::expansion::{generate_all_shells, generate_combos};
use pagematrix::catalog::social_image_resizer_blueprint;
use pagematrix::domain::blueprint::Blueprint;
use pagematrix::domain::dimension::{DimensionArray, DimensionAxis, DimensionValue};

/// Three-axis matrix in the hundreds-of-shells range, the realistic upper
/// end for one blueprint family.
fn wide_blueprint() -> Blueprint {
    let mut blueprint = social_image_resizer_blueprint();
    let sizes = DimensionArray::new(
        DimensionAxis::Size,
        (0..12)
            .map(|i| DimensionValue::new(format!("size-{i}"), format!("Size {i}")))
            .collect(),
    );
    blueprint.dimensions.push(sizes);
    blueprint
}

fn bench_expansion(c: &mut Criterion) {
    let builtin = social_image_resizer_blueprint();
    let wide = wide_blueprint();

    c.bench_function("generate_combos_builtin_35", |b| {
        b.iter(|| generate_combos(black_box(&builtin)))
    });

    c.bench_function("generate_all_shells_wide_420", |b| {
        b.iter(|| generate_all_shells(black_box(&wide)))
    });
}

criterion_group!(benches, bench_expansion);
criterion_main!(benches);
