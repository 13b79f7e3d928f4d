use criterion::{black_box, criterion_group, criterion_main, Criterion};

use estimator::descriptor::{DisasterDescriptor, DisasterGroup};
use estimator::estimate::estimate_impact;
use estimator::features::{CategoryEncoder, FeatureEncoders, FEATURE_NAMES};
use estimator::model::{GradientBoostedTrees, PopulationModel, RegressionTree, TreeNode};

/// A representative ensemble: 200 depth-2 trees over the numeric features
/// and a vocabulary in the size range of the EM-DAT country list.
fn representative_model() -> PopulationModel {
    let names: Vec<String> = (0..180).map(|i| format!("Country {i}")).collect();
    let trees = (0..200usize)
        .map(|i| {
            let feature = [0u8, 8, 1, 5][i % 4];
            let threshold = 1970.0 + (i as f64 * 7.3) % 130.0;
            RegressionTree {
                nodes: vec![
                    TreeNode::Split {
                        feature,
                        threshold,
                        left: 1,
                        right: 2,
                    },
                    TreeNode::Leaf {
                        value: (i as f64 % 19.0) - 9.0,
                    },
                    TreeNode::Leaf {
                        value: (i as f64 % 11.0) - 5.0,
                    },
                ],
            }
        })
        .collect();

    PopulationModel {
        schema: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        encoders: FeatureEncoders {
            country: CategoryEncoder::new(names),
            region: CategoryEncoder::new(["South Asia", "East Asia", "Western Europe"]),
            continent: CategoryEncoder::new(["Asia", "Europe", "Africa"]),
            subgroup: CategoryEncoder::new(["Hydrological", "Geophysical", "Meteorological"]),
            disaster_type: CategoryEncoder::new(["Flood", "Earthquake", "Storm"]),
            subtype: CategoryEncoder::new(["Flash flood", "Ground movement", "Tropical cyclone"]),
        },
        regressor: GradientBoostedTrees {
            base_score: 12_000.0,
            trees,
        },
    }
}

fn bench_predict(c: &mut Criterion) {
    let model = representative_model();
    let descriptor = DisasterDescriptor {
        year: 2025,
        country: "Country 121".to_string(),
        region: "South Asia".to_string(),
        continent: "Asia".to_string(),
        group: DisasterGroup::Natural,
        subgroup: "Hydrological".to_string(),
        disaster_type: "Flood".to_string(),
        subtype: "Flash flood".to_string(),
        magnitude: 7.5,
    };

    c.bench_function("predict_single_row", |b| {
        b.iter(|| estimate_impact(black_box(&model), black_box(&descriptor)))
    });
}

criterion_group!(benches, bench_predict);
criterion_main!(benches);
