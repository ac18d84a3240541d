use crate::math::color::cell_fill;
use crate::math::format::{format_percent, to_precision};
use crate::records::RocPoint;
use crate::render::build::{ModelView, Scales, SceneHandles};
use crate::scene::path::line_path;
use crate::scene::Scene;

/// Path data for a ROC curve in the ROC panel's coordinates.
pub fn roc_path(points: &[RocPoint], scales: &Scales) -> String {
    let projected: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (scales.x_roc.scale(p.fpr), scales.y_roc.scale(p.tpr)))
        .collect();
    line_path(&projected)
}

/// Updates the ROC curve, AUC caption and confusion cells in place.
pub fn apply_model(
    scene: &mut Scene,
    handles: &SceneHandles,
    scales: &Scales,
    view: &ModelView,
    duration_ms: u64,
) {
    scene
        .transition(&[handles.roc_curve], duration_ms)
        .attr("d", roc_path(&view.roc, scales));
    scene.set_text(handles.auc_label, format_percent(view.auc));

    for (row, cells) in handles.cells.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            scene.set_attr(cell.group, "fill", cell_fill(view.matrix.value(row, col)));
            scene.set_text(cell.count, to_precision(view.matrix.count(row, col) as f64, 3));
        }
    }
}
