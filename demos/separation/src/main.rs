#[macro_use]
extern crate log;

use std::time::Instant;

use dialoguer::{theme::ColorfulTheme, Select};
use lda::{tidy, FeatureMatrix, LdaFitter, LdaParams};
use lda_plot::{plot_classes, ClassGather};
use nalgebra::DMatrix;
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};

const SEED: u64 = 0;
const SAMPLES_PER_CLASS: usize = 100;

fn main() {
    pretty_env_logger::init();

    let data_sets = vec![
        "two blobs",
        "three blobs in 4d",
        "three classes, 100 features, 60 samples",
    ];
    let e = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select data set")
        .items(&data_sets)
        .default(0)
        .interact()
        .unwrap();

    let mut rng = StdRng::seed_from_u64(SEED);
    let (features, labels, regularization_coeff, filename) = match e {
        0 => {
            let centers = vec![vec![0.0, 0.0], vec![3.0, 1.0]];
            let (features, labels) = blobs(&mut rng, &centers, 1.0, SAMPLES_PER_CLASS);
            (features, labels, 0.1, "img/two_blobs.png")
        }
        1 => {
            let centers = vec![
                vec![0.0, 0.0, 0.0, 0.0],
                vec![2.0, 2.0, 0.0, 1.0],
                vec![-1.0, 3.0, 1.0, 0.0],
            ];
            let (features, labels) = blobs(&mut rng, &centers, 0.8, SAMPLES_PER_CLASS);
            (features, labels, 0.1, "img/three_blobs.png")
        }
        2 => {
            // more features than samples, the within-class scatter is singular
            let centers: Vec<Vec<f64>> = (0..3)
                .map(|c| (0..100).map(|j| if j % 3 == c { 0.5 } else { 0.0 }).collect())
                .collect();
            let (features, labels) = blobs(&mut rng, &centers, 1.0, 20);
            (features, labels, 0.5, "img/wide.png")
        }
        _ => panic!("invalid data set selection"),
    };
    info!(
        "got {} samples with {} features, regularization_coeff: {}",
        features.nsamples(),
        features.nfeatures(),
        regularization_coeff
    );

    let fitter = LdaFitter::with_params(LdaParams {
        regularization_coeff,
        ..Default::default()
    });
    let t0 = Instant::now();
    let model = fitter.fit(&features, &labels).unwrap();
    info!("fit done in: {}ms", t0.elapsed().as_millis());

    for row in tidy::eigenvalues(&model) {
        info!(
            "{}: eigenvalue {:.4}, proportion {:.4}",
            row.component, row.eigenvalue, row.proportion
        );
    }

    let projection = model.project(&features).unwrap();
    let coordinates = projection.coordinates();
    let mut gather = ClassGather::default();
    for (i, label) in labels.iter().enumerate() {
        // a single component is plotted against the sample index
        let y = if coordinates.ncols() > 1 { coordinates[(i, 1)] } else { i as f64 };
        gather.push(label, coordinates[(i, 0)], y);
    }

    std::fs::create_dir_all("img").unwrap();
    plot_classes(&gather.into_series(), "LDA projection", filename, (2160, 2160)).unwrap();
}

/// Isotropic gaussian clusters around `centers`, `n` samples each
fn blobs(
    rng: &mut StdRng,
    centers: &[Vec<f64>],
    sd: f64,
    n: usize,
) -> (FeatureMatrix, Vec<String>) {
    let dim = centers[0].len();
    let noise = Normal::new(0.0, sd).unwrap();
    let mut values: Vec<f64> = Vec::with_capacity(centers.len() * n * dim);
    let mut labels: Vec<String> = Vec::with_capacity(centers.len() * n);
    for (c, center) in centers.iter().enumerate() {
        for _ in 0..n {
            values.extend(center.iter().map(|m| m + noise.sample(rng)));
            labels.push(format!("class_{}", c));
        }
    }

    let data = DMatrix::from_row_slice(labels.len(), dim, &values);
    let names: Vec<String> = (1..=dim).map(|j| format!("f{}", j)).collect();
    let features = FeatureMatrix::with_names(data, names).unwrap();

    (features, labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blobs_are_reproducible_from_the_seed() {
        let centers = vec![vec![0.0, 0.0], vec![10.0, -10.0]];
        let (first, labels) = blobs(&mut StdRng::seed_from_u64(SEED), &centers, 0.5, 50);
        let (second, _) = blobs(&mut StdRng::seed_from_u64(SEED), &centers, 0.5, 50);

        assert_eq!(first.data(), second.data());
        assert_eq!(labels.len(), 100);
        assert_eq!(labels[0], "class_0");
        assert_eq!(labels[99], "class_1");

        // samples scatter around their own center
        let data = first.data();
        let mean_of = |rows: std::ops::Range<usize>, j: usize| {
            rows.clone().map(|i| data[(i, j)]).sum::<f64>() / rows.len() as f64
        };
        assert!(mean_of(0..50, 0).abs() < 0.5);
        assert!((mean_of(50..100, 1) + 10.0).abs() < 0.5);
    }
}
