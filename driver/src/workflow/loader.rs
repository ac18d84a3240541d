use anyhow::Context;
use eegviscore::records::{RocTable, Row};
use eegviscore::ScrollVis;
use std::fs;
use std::path::Path;

pub const SERIES_FILE: &str = "allDataRawClean_subset.csv";
pub const ROC_FILE: &str = "roc.json";
pub const SEGMENT_FILE: &str = "segmentData.csv";
pub const CONFUSION_FILE: &str = "confusionMatrix.csv";
pub const ANIMATION_FILE: &str = "generated_EEG_data.csv";

/// Reads a header-first CSV document into rows keyed by column name.
/// Fields and headers are trimmed; a row with the wrong field count is an error.
pub fn parse_csv(text: &str) -> anyhow::Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for (number, record) in reader.deserialize::<Row>().enumerate() {
        rows.push(record.with_context(|| format!("reading record {}", number + 1))?);
    }
    Ok(rows)
}

pub fn read_csv(path: &Path) -> anyhow::Result<Vec<Row>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_csv(&text).with_context(|| format!("parsing {}", path.display()))
}

pub fn read_roc(path: &Path) -> anyhow::Result<RocTable> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    RocTable::from_json(&text).with_context(|| format!("parsing {}", path.display()))
}

/// The four inputs the scene needs plus the optional header-animation table.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub series: Vec<Row>,
    pub roc: RocTable,
    pub segments: Vec<Row>,
    pub confusion: Vec<Row>,
    pub animation: Option<Vec<Row>>,
}

impl Dataset {
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let animation_path = dir.join(ANIMATION_FILE);
        let animation = if animation_path.exists() {
            Some(read_csv(&animation_path)?)
        } else {
            log::warn!(
                "{} not found, header animation disabled",
                animation_path.display()
            );
            None
        };
        Ok(Self {
            series: read_csv(&dir.join(SERIES_FILE))?,
            roc: read_roc(&dir.join(ROC_FILE))?,
            segments: read_csv(&dir.join(SEGMENT_FILE))?,
            confusion: read_csv(&dir.join(CONFUSION_FILE))?,
            animation,
        })
    }

    /// Hands every table to `vis` and performs the first render.
    pub fn install(self, vis: &mut ScrollVis) -> anyhow::Result<()> {
        vis.set_roc_data(self.roc);
        vis.set_segment_data(self.segments);
        vis.set_confusion_matrix_data(self.confusion);
        if let Some(rows) = self.animation.as_deref() {
            vis.set_animation_data(rows)
                .context("building header animation")?;
        }
        vis.render(self.series).context("rendering scene")?;
        Ok(())
    }
}
