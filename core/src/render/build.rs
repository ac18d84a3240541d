use serde::Serialize;

use crate::math::color::{MUTED, PALETTE};
use crate::math::format::format_percent;
use crate::math::scale::{BandScale, LinearScale};
use crate::math::stats::StatsHelper;
use crate::prelude::VisConfig;
use crate::records::{Electrode, Model, RocPoint, SegmentRecord, TimeSeriesPoint};
use crate::render::redraw::{apply_model, roc_path};
use crate::scene::path::{line_path, polyline_length};
use crate::scene::{AxisSpec, ElementId, Scene, Tag};
use crate::scoring::NormalizedMatrix;

/// Horizontal/vertical offset shared by the series, bounds and segment layers.
pub const PLOT_SHIFT: (f64, f64) = (40.0, -20.0);
pub const SEGMENT_BOUNDS: usize = 20;

/// Everything the currently selected model contributes to the scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelView {
    pub model: Model,
    pub roc: Vec<RocPoint>,
    pub auc: f64,
    pub matrix: NormalizedMatrix,
}

/// Shaped records bound to the scene.
#[derive(Debug, Clone)]
pub struct SceneData {
    pub electrode: Electrode,
    pub series: Vec<TimeSeriesPoint>,
    pub segments: Vec<SegmentRecord>,
    pub model: ModelView,
}

#[derive(Debug, Clone, Copy)]
pub struct Scales {
    pub x_series: LinearScale,
    pub y_series: LinearScale,
    pub x_roc: LinearScale,
    pub y_roc: LinearScale,
    pub x_features: LinearScale,
    pub y_features: LinearScale,
    pub x_cells: BandScale,
    pub y_cells: BandScale,
}

impl Scales {
    pub fn new(config: &VisConfig, series: &[TimeSeriesPoint], segments: &[SegmentRecord]) -> Self {
        let (w, h) = (config.width, config.height);
        let indices: Vec<f64> = series.iter().map(|p| p.index as f64).collect();
        let feature1: Vec<f64> = segments.iter().map(|s| s.feature1).collect();
        let feature2: Vec<f64> = segments.iter().map(|s| s.feature2).collect();
        Self {
            x_series: LinearScale::from_extent(StatsHelper::extent(&indices), (0.0, w)),
            y_series: LinearScale::new((-300.0, 300.0), (h, 0.0)),
            x_roc: LinearScale::new((0.0, 1.05), (0.0, 260.0)),
            y_roc: LinearScale::new((0.0, 1.05), (260.0, 0.0)),
            x_features: LinearScale::from_extent(StatsHelper::extent(&feature1), (0.0, w)),
            y_features: LinearScale::from_extent(StatsHelper::extent(&feature2), (h, 0.0)),
            x_cells: BandScale::new(2, (320.0, 580.0), 0.05),
            y_cells: BandScale::new(2, (0.0, 260.0), 0.05),
        }
    }
}

/// Derived geometry of the electrode series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesGeometry {
    pub raw_path: String,
    pub clean_path: String,
    pub trace_length: f64,
    pub mean_y: f64,
}

impl SeriesGeometry {
    pub fn new(series: &[TimeSeriesPoint], scales: &Scales) -> Self {
        let raw: Vec<(f64, f64)> = series
            .iter()
            .map(|p| (scales.x_series.scale(p.index as f64), scales.y_series.scale(p.raw)))
            .collect();
        let clean: Vec<(f64, f64)> = series
            .iter()
            .map(|p| (scales.x_series.scale(p.index as f64), scales.y_series.scale(p.clean)))
            .collect();
        let cleaned: Vec<f64> = series.iter().map(|p| p.clean).collect();
        let mean = StatsHelper::mean(&cleaned).unwrap_or(0.0);
        Self {
            raw_path: line_path(&raw),
            clean_path: line_path(&clean),
            trace_length: polyline_length(&raw),
            mean_y: scales.y_series.scale(mean),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellHandle {
    pub group: ElementId,
    pub count: ElementId,
}

/// Elements the redraw paths touch directly.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneHandles {
    pub group: ElementId,
    pub series_line: ElementId,
    pub segments: Vec<ElementId>,
    pub roc_curve: ElementId,
    pub auc_label: ElementId,
    pub cells: [[CellHandle; 2]; 2],
}

fn shift() -> String {
    format!("translate({}, {})", PLOT_SHIFT.0, PLOT_SHIFT.1)
}

fn label(scene: &mut Scene, parent: ElementId, classes: &str, text: &str) -> ElementId {
    scene
        .append(parent, Tag::Text)
        .class(classes)
        .attr("text-anchor", "middle")
        .attr("fill", MUTED)
        .attr("opacity", 0.0)
        .text(text)
        .id()
}

fn rotated_label(scene: &mut Scene, parent: ElementId, classes: &str, text: &str, x: f64, y: f64) {
    let id = label(scene, parent, classes, text);
    scene.set_attr(id, "transform", "rotate(-90)");
    scene.set_attr(id, "x", x);
    scene.set_attr(id, "y", y);
    scene.set_attr(id, "dy", "1em");
}

fn axis_group(scene: &mut Scene, parent: ElementId, classes: &str, transform: String, axis: AxisSpec) -> ElementId {
    let group = scene
        .append(parent, Tag::Group)
        .class(classes)
        .attr("transform", transform)
        .id();
    axis.draw(scene, group);
    scene.set_attr(group, "fill", MUTED);
    scene.set_attr(group, "opacity", 0.0);
    group
}

/// Builds every layer of the scene under a fresh group appended to the root.
pub fn build_scene(
    scene: &mut Scene,
    config: &VisConfig,
    data: &SceneData,
    scales: &Scales,
    geometry: &SeriesGeometry,
) -> SceneHandles {
    let (w, h) = (config.width, config.height);
    let margin = config.margin;
    let root = scene.root();
    let g = scene
        .append(root, Tag::Group)
        .class("vis")
        .attr("transform", format!("translate({},{})", margin.left, margin.top))
        .id();

    // time series
    let length = geometry.trace_length;
    let series_line = scene
        .append(g, Tag::Path)
        .class("raw line")
        .attr("d", geometry.raw_path.as_str())
        .attr("transform", shift())
        .attr("fill", "none")
        .attr("stroke", PALETTE[0])
        .attr("opacity", 0.0)
        .attr("stroke-dasharray", format!("{} {}", length, length))
        .attr("stroke-dashoffset", length)
        .id();
    let x_axis = axis_group(
        scene,
        g,
        "raw axis axis--x",
        format!("translate(40,{})", h - 20.0),
        AxisSpec::bottom(scales.x_series, 0),
    );
    scene.set_attr(x_axis, "stroke", MUTED);
    axis_group(scene, g, "raw axis axis--y", shift(), AxisSpec::left(scales.y_series, 10));
    let time = label(scene, g, "raw axis label", "Time");
    scene.set_attr(
        time,
        "transform",
        format!("translate({} ,{})", 20.0 + w / 2.0, h + margin.top + 20.0),
    );
    rotated_label(scene, g, "raw axis label", "Frequency", 20.0 - h / 2.0, 10.0 - margin.left);
    let title = label(scene, g, "raw chartTitle", &format!("Electrode {}", data.electrode));
    scene.set_attr(title, "transform", format!("translate({} ,40)", 20.0 + w / 2.0));

    // segment bounds
    for i in 0..SEGMENT_BOUNDS {
        let x = i as f64 * w / SEGMENT_BOUNDS as f64;
        scene
            .append(g, Tag::Path)
            .class("bounds")
            .attr("d", line_path(&[(x, h), (x, 0.0)]))
            .attr("transform", shift())
            .attr("stroke", MUTED)
            .attr("opacity", 0.0)
            .attr("stroke-dasharray", format!("{} {}", h, h))
            .attr("stroke-dashoffset", h);
    }

    // segments as points
    scene
        .append(g, Tag::Path)
        .class("annotation")
        .attr("d", "M55 260 V 300 H 200")
        .attr("stroke", MUTED)
        .attr("fill", "none")
        .attr("opacity", 0.0);
    scene
        .append(g, Tag::Text)
        .class("annotation")
        .attr("fill", MUTED)
        .attr("transform", "translate(215, 300)")
        .attr("opacity", 0.0)
        .text("Each data point has 105 features!");
    let segments = data
        .segments
        .iter()
        .map(|segment| {
            scene
                .append(g, Tag::Circle)
                .class("timeSeg")
                .key(segment.index.to_string())
                .attr("cx", segment_strip_x(segment.index, w))
                .attr("cy", geometry.mean_y)
                .attr("r", config.circle_radius)
                .attr("fill", PALETTE[10])
                .attr("opacity", 0.0)
                .attr("transform", shift())
                .id()
        })
        .collect();
    let dm_x = axis_group(
        scene,
        g,
        "dimReduced axis axis--x",
        format!("translate(40,{})", h - 20.0),
        AxisSpec::bottom(scales.x_features, 0),
    );
    scene.set_attr(dm_x, "stroke", MUTED);
    axis_group(scene, g, "dimReduced axis axis--y", shift(), AxisSpec::left(scales.y_features, 0));
    let f1 = label(scene, g, "dimReduced axis label", "Feature 1");
    scene.set_attr(
        f1,
        "transform",
        format!("translate({} ,{})", 20.0 + w / 2.0, h + margin.top + 20.0),
    );
    rotated_label(scene, g, "dimReduced axis label", "Feature 2", 20.0 - h / 2.0, 10.0 - margin.left);

    // roc curve
    axis_group(
        scene,
        g,
        "roc axis axis--x",
        format!("translate(40,{})", h / 2.0),
        AxisSpec::bottom(scales.x_roc, 10),
    );
    axis_group(scene, g, "roc axis axis--y", "translate(40,0)".to_string(), AxisSpec::left(scales.y_roc, 10));
    let fpr = label(scene, g, "roc axis label", "False Positive Rate");
    scene.set_attr(
        fpr,
        "transform",
        format!("translate({} ,{})", 20.0 + w / 4.0, h / 2.0 + 40.0),
    );
    rotated_label(scene, g, "roc axis label", "True Positive Rate", margin.top - h / 4.0, 10.0 - margin.left);
    scene
        .append(g, Tag::Text)
        .class("roc text")
        .attr("x", 220.0)
        .attr("y", 250.0)
        .attr("fill", PALETTE[9])
        .attr("opacity", 0.0)
        .text("AUC: ");
    scene
        .append(g, Tag::Path)
        .class("roc guide")
        .attr("d", line_path(&[(0.0, 260.0), (260.0, 0.0)]))
        .attr("transform", "translate(40,0)")
        .attr("stroke", "grey")
        .attr("stroke-dasharray", "3, 3")
        .attr("opacity", 0.0);

    // confusion matrix
    let cells = build_cells(scene, g, scales);
    let cm_labels = [
        ("Actual +", 240.0 + w / 4.0),
        ("Actual -", 360.0 + w / 4.0),
    ];
    for (text, x) in cm_labels {
        let id = label(scene, g, "cm axis label", text);
        scene.set_attr(id, "transform", format!("translate({} ,{})", x, h / 2.0 + 40.0));
    }
    rotated_label(scene, g, "cm axis label", "Predicted +", -60.0, 590.0);
    rotated_label(scene, g, "cm axis label", "Predicted -", -180.0, 590.0);
    for id in scene.select_all(g, "cm") {
        scene.set_attr(id, "opacity", 0.0);
    }

    let roc_curve = scene
        .append(g, Tag::Path)
        .class("roc curve")
        .attr("d", roc_path(&data.model.roc, scales))
        .attr("fill", "none")
        .attr("stroke", PALETTE[10])
        .attr("stroke-width", 2.0)
        .attr("opacity", 0.0)
        .attr("transform", "translate(40, 0)")
        .id();
    let auc_label = scene
        .append(g, Tag::Text)
        .class("roc text")
        .attr("id", "auc")
        .attr("x", 260.0)
        .attr("y", 250.0)
        .attr("fill", PALETTE[6])
        .attr("opacity", 0.0)
        .text(format_percent(data.model.auc))
        .id();

    let handles = SceneHandles {
        group: g,
        series_line,
        segments,
        roc_curve,
        auc_label,
        cells,
    };
    apply_model(scene, &handles, scales, &data.model, 0);
    handles
}

/// Horizontal slot of a segment when laid along the series strip.
pub fn segment_strip_x(index: usize, width: f64) -> f64 {
    index as f64 * (width / SEGMENT_BOUNDS as f64) + width / (2 * SEGMENT_BOUNDS) as f64
}

fn build_cells(scene: &mut Scene, g: ElementId, scales: &Scales) -> [[CellHandle; 2]; 2] {
    let bandwidth = scales.x_cells.bandwidth();
    let band_height = scales.y_cells.bandwidth();
    let handle = |scene: &mut Scene, row_group: ElementId, col: usize| {
        let x = scales.x_cells.position(col).unwrap_or_default();
        let group = scene
            .append(row_group, Tag::Group)
            .class("cm cell")
            .attr("transform", format!("translate({}, 0)", x))
            .id();
        scene
            .append(group, Tag::Rect)
            .attr("width", bandwidth)
            .attr("height", band_height)
            .attr("stroke-width", 0.0);
        let count = scene
            .append(group, Tag::Text)
            .class("cm count")
            .attr("dy", ".32em")
            .attr("x", bandwidth / 2.0)
            .attr("y", band_height / 2.0)
            .attr("text-anchor", "middle")
            .attr("opacity", 1.0)
            .attr("fill", "black")
            .text("0.00")
            .id();
        CellHandle { group, count }
    };
    let mut rows = Vec::with_capacity(2);
    for row in 0..2 {
        let y = scales.y_cells.position(row).unwrap_or_default();
        let row_group = scene
            .append(g, Tag::Group)
            .class("cm row")
            .attr("transform", format!("translate(0,{})", y))
            .id();
        rows.push([handle(scene, row_group, 0), handle(scene, row_group, 1)]);
    }
    [rows[0], rows[1]]
}
