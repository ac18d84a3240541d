use crate::generator::template::{eeg_wave, sigmoid};
use crate::workflow::loader::{
    ANIMATION_FILE, CONFUSION_FILE, ROC_FILE, SEGMENT_FILE, SERIES_FILE,
};
use anyhow::Context;
use eegviscore::records::{Electrode, Model, RocCurve, RocTable};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for generating a synthetic EEG dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub samples: usize,
    pub segments: usize,
    pub animation_samples: usize,
    pub rate_hz: f64,
    /// Peak amplitude of the artifact noise added to the raw channels.
    pub noise: f64,
    /// Resolution key the ROC curves are stored under.
    pub resolution: usize,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            samples: 400,
            segments: 160,
            animation_samples: 201,
            rate_hz: 256.0,
            noise: 18.0,
            resolution: 1,
            seed: 0,
        }
    }
}

/// One synthetic segment: two features, the true label and a score per model.
#[derive(Debug, Clone)]
struct SyntheticSegment {
    feature1: f64,
    feature2: f64,
    positive: bool,
    scores: [f64; 4],
}

impl SyntheticSegment {
    fn predicted(&self, model: Model) -> bool {
        self.scores[model.index()] >= 0.5
    }
}

/// Separation strength per model, in `Model` order. Boosting doubles as the ensemble.
const MODEL_WEIGHTS: [f64; 4] = [0.9, 1.2, 1.5, 1.7];

fn electrode_phase(electrode: Electrode) -> f64 {
    match electrode {
        Electrode::Tp9 => 0.0,
        Electrode::Af7 => 0.7,
        Electrode::Af8 => 1.9,
        Electrode::Tp10 => 2.6,
    }
}

fn series_table(config: &GeneratorConfig, rng: &mut StdRng, length: usize) -> Vec<Vec<String>> {
    let waves: Vec<Vec<f64>> = Electrode::ALL
        .iter()
        .map(|&e| eeg_wave(length, config.rate_hz, electrode_phase(e)))
        .collect();
    (0..length)
        .map(|i| {
            let mut fields = Vec::with_capacity(waves.len() * 2);
            for wave in &waves {
                let jitter = if config.noise > 0.0 {
                    rng.gen_range(-config.noise..config.noise)
                } else {
                    0.0
                };
                fields.push(format!("{:.3}", wave[i] + jitter));
                fields.push(format!("{:.3}", wave[i]));
            }
            fields
        })
        .collect()
}

fn series_header() -> Vec<String> {
    Electrode::ALL
        .iter()
        .flat_map(|e| [e.raw_column(), e.clean_column()])
        .collect()
}

fn build_segments(config: &GeneratorConfig, rng: &mut StdRng) -> Vec<SyntheticSegment> {
    (0..config.segments)
        .map(|_| {
            let positive = rng.gen_bool(0.5);
            let center = if positive { 1.0 } else { -1.0 };
            let feature1 = center + rng.gen_range(-2.0..2.0);
            let feature2 = center * 0.5 + rng.gen_range(-1.5..1.5);
            let mut scores = [0.0; 4];
            for (score, weight) in scores.iter_mut().zip(MODEL_WEIGHTS) {
                let evidence = weight * (feature1 + feature2) + rng.gen_range(-1.0..1.0);
                *score = sigmoid(evidence);
            }
            SyntheticSegment {
                feature1,
                feature2,
                positive,
                scores,
            }
        })
        .collect()
}

fn flag(value: bool) -> String {
    let digit = if value { "1" } else { "0" };
    digit.to_string()
}

/// Sweeps the decision threshold from high to low score. Tied scores move
/// together so the curve never steps inside a tie.
pub fn roc_curve(scores: &[f64], positives: &[bool]) -> RocCurve {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    let total_pos = positives.iter().filter(|p| **p).count() as f64;
    let total_neg = positives.len() as f64 - total_pos;
    let rate = |count: f64, total: f64| if total > 0.0 { count / total } else { 0.0 };

    let mut fpr = vec![0.0];
    let mut tpr = vec![0.0];
    let (mut tp, mut fp) = (0.0, 0.0);
    for (position, &index) in order.iter().enumerate() {
        if positives[index] {
            tp += 1.0;
        } else {
            fp += 1.0;
        }
        let tie_follows = order
            .get(position + 1)
            .map_or(false, |&next| scores[next] == scores[index]);
        if !tie_follows {
            fpr.push(rate(fp, total_neg));
            tpr.push(rate(tp, total_pos));
        }
    }
    let auc = fpr
        .windows(2)
        .zip(tpr.windows(2))
        .map(|(x, y)| (x[1] - x[0]) * (y[1] + y[0]) / 2.0)
        .sum();
    RocCurve { fpr, tpr, auc }
}

fn write_csv(path: &Path, header: &[String], rows: &[Vec<String>]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))
}

/// Writes the five dataset files into `dir` and returns their paths.
pub fn write_dataset(dir: &Path, config: &GeneratorConfig) -> anyhow::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let header = series_header();

    let series_path = dir.join(SERIES_FILE);
    let series = series_table(config, &mut rng, config.samples);
    write_csv(&series_path, &header, &series)?;

    let animation_path = dir.join(ANIMATION_FILE);
    let animation = series_table(config, &mut rng, config.animation_samples);
    write_csv(&animation_path, &header, &animation)?;

    let segments = build_segments(config, &mut rng);
    let segment_path = dir.join(SEGMENT_FILE);
    let segment_header: Vec<String> = ["feature1", "feature2", "label", "rf", "nn", "logreg", "ensemble"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let segment_rows: Vec<Vec<String>> = segments
        .iter()
        .map(|s| {
            vec![
                format!("{:.4}", s.feature1),
                format!("{:.4}", s.feature2),
                flag(s.positive),
                flag(s.predicted(Model::RandomForest)),
                flag(s.predicted(Model::NeuralNetwork)),
                flag(s.predicted(Model::LogisticRegression)),
                flag(s.predicted(Model::BoostingMethod)),
            ]
        })
        .collect();
    write_csv(&segment_path, &segment_header, &segment_rows)?;

    let positives: Vec<bool> = segments.iter().map(|s| s.positive).collect();
    let mut table = RocTable::new();
    let mut confusion_rows = Vec::with_capacity(Model::ALL.len());
    for model in Model::ALL {
        let scores: Vec<f64> = segments.iter().map(|s| s.scores[model.index()]).collect();
        table.insert(config.resolution, model.index(), roc_curve(&scores, &positives));

        let mut counts = [0usize; 4];
        for segment in &segments {
            let slot = match (segment.positive, segment.predicted(model)) {
                (true, true) => 0,
                (false, false) => 1,
                (false, true) => 2,
                (true, false) => 3,
            };
            counts[slot] += 1;
        }
        confusion_rows.push(counts.iter().map(|c| c.to_string()).collect());
    }

    let roc_path = dir.join(ROC_FILE);
    let document = serde_json::to_string_pretty(&table).context("serializing ROC table")?;
    fs::write(&roc_path, document).with_context(|| format!("writing {}", roc_path.display()))?;

    let confusion_path = dir.join(CONFUSION_FILE);
    let confusion_header: Vec<String> = ["tp", "tn", "fp", "fn"].iter().map(|s| s.to_string()).collect();
    write_csv(&confusion_path, &confusion_header, &confusion_rows)?;

    log::info!(
        "generated {} samples and {} segments in {}",
        config.samples,
        config.segments,
        dir.display()
    );
    Ok(vec![
        series_path,
        roc_path,
        segment_path,
        confusion_path,
        animation_path,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::loader::{read_csv, read_roc};
    use tempfile::tempdir;

    #[test]
    fn perfect_ranking_has_unit_auc() {
        let curve = roc_curve(&[0.9, 0.8, 0.3, 0.1], &[true, true, false, false]);
        assert_eq!(curve.fpr, vec![0.0, 0.0, 0.0, 0.5, 1.0]);
        assert_eq!(curve.tpr, vec![0.0, 0.5, 1.0, 1.0, 1.0]);
        assert_eq!(curve.auc, 1.0);
    }

    #[test]
    fn tied_scores_move_together() {
        let curve = roc_curve(&[0.5, 0.5], &[true, false]);
        assert_eq!(curve.fpr, vec![0.0, 1.0]);
        assert_eq!(curve.tpr, vec![0.0, 1.0]);
        assert_eq!(curve.auc, 0.5);
    }

    #[test]
    fn dataset_tables_agree_with_each_other() {
        let dir = tempdir().unwrap();
        let config = GeneratorConfig {
            samples: 50,
            segments: 40,
            seed: 7,
            ..Default::default()
        };
        let paths = write_dataset(dir.path(), &config).unwrap();
        assert_eq!(paths.len(), 5);

        let series = read_csv(&dir.path().join(SERIES_FILE)).unwrap();
        assert_eq!(series.len(), 50);
        assert!(series[0].contains_key("CLEAN_TP10"));

        let confusion = read_csv(&dir.path().join(CONFUSION_FILE)).unwrap();
        assert_eq!(confusion.len(), 4);
        for row in &confusion {
            let total: usize = ["tp", "tn", "fp", "fn"]
                .iter()
                .map(|k| row[*k].parse::<usize>().unwrap())
                .sum();
            assert_eq!(total, 40);
        }

        let roc = read_roc(&dir.path().join(ROC_FILE)).unwrap();
        assert_eq!(roc.first_resolution(), Some(1));
        let curve = roc.curve(1, Model::BoostingMethod.index()).unwrap();
        assert_eq!(curve.fpr.len(), curve.tpr.len());
        assert!(curve.auc > 0.5 && curve.auc <= 1.0);
    }

    #[test]
    fn same_seed_gives_same_dataset() {
        let (a, b) = (tempdir().unwrap(), tempdir().unwrap());
        let config = GeneratorConfig {
            samples: 20,
            segments: 10,
            seed: 3,
            ..Default::default()
        };
        write_dataset(a.path(), &config).unwrap();
        write_dataset(b.path(), &config).unwrap();
        let read = |dir: &Path| fs::read_to_string(dir.join(SEGMENT_FILE)).unwrap();
        assert_eq!(read(a.path()), read(b.path()));
    }
}
