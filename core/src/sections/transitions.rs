use crate::math::color::{MISCLASSIFIED_STROKE, PALETTE};
use crate::render::build::{segment_strip_x, PLOT_SHIFT};
use crate::render::SceneContext;
use crate::scene::AttrValue;
use crate::sections::{SectionHandler, SectionState};

const SEGMENT_MOVE_MS: u64 = 1200;

impl SectionHandler for SceneContext {
    fn enter(&mut self, state: SectionState, _index: usize) {
        match state {
            SectionState::Hidden => self.fade_group(0.0),
            SectionState::Pipeline => self.show_pipeline(),
            SectionState::RawSeries => self.show_raw(),
            SectionState::CleanSeries => self.show_clean(),
            SectionState::SegmentBounds => self.draw_bounds(),
            SectionState::SegmentsAsPoints => self.show_segments(),
            SectionState::FeatureSpace => self.show_feature_space(),
            SectionState::AllSegmentsGrid => self.show_all_segments(),
            SectionState::ClassificationOverlay => self.show_classifications(),
            SectionState::RocAndConfusion => self.show_roc(),
        }
    }
}

impl SceneContext {
    fn show_pipeline(&mut self) {
        self.ticker.reset();
        self.fade_group(1.0);
        self.fade("raw", 0.0, 0);
        self.fade("pipeline", 1.0, 0);
    }

    fn show_raw(&mut self) {
        self.fade("pipeline", 0.0, 0);
        self.ticker.clear();
        self.fade("raw", 1.0, 300);
        let lines = self.elements("line");
        self.scene
            .transition(&lines, 1200)
            .attr("d", self.geometry.raw_path.as_str())
            .attr("stroke", PALETTE[0]);
        self.scene
            .transition(&lines, 3000)
            .attr("stroke-dashoffset", 0.0);
    }

    fn show_clean(&mut self) {
        let lines = self.elements("line");
        self.scene
            .transition(&lines, 1200)
            .attr("d", self.geometry.clean_path.as_str())
            .attr("stroke", PALETTE[10])
            .attr("opacity", 1.0);
        self.fade("raw", 1.0, 1200);
        self.fade("bounds", 0.0, 0);
    }

    fn draw_bounds(&mut self) {
        self.fade("raw", 1.0, 0);
        let bounds = self.elements("bounds");
        self.scene
            .transition(&bounds, 3000)
            .attr("opacity", 0.5)
            .attr("stroke-dashoffset", 0.0);
        self.fade("chartTitle", 0.0, 0);
        self.fade("timeSeg", 0.0, 0);
        self.fade("annotation", 0.0, 0);
    }

    fn show_segments(&mut self) {
        self.fade("bounds", 0.0, 1800);
        let width = self.config.width;
        let mean_y = self.geometry.mean_y;
        let segments = self.handles.segments.clone();
        self.scene
            .transition(&segments, SEGMENT_MOVE_MS)
            .attr_with("cx", |i, _| segment_strip_x(i, width).into())
            .attr("cy", mean_y)
            .attr("stroke", "black")
            .attr("opacity", 1.0);
        self.fade("annotation", 1.0, SEGMENT_MOVE_MS);
        self.fade("raw", 0.0, 600);
        self.fade("dimReduced", 0.0, SEGMENT_MOVE_MS);
    }

    fn show_feature_space(&mut self) {
        self.fade("dimReduced", 1.0, SEGMENT_MOVE_MS);
        self.fade("annotation", 0.0, SEGMENT_MOVE_MS);
        let records = &self.data.segments;
        let scales = &self.scales;
        let segments = self.handles.segments.clone();
        self.scene
            .transition(&segments, SEGMENT_MOVE_MS)
            .attr_with("cx", |i, _| {
                (scales.x_features.scale(records[i].feature1) + PLOT_SHIFT.0).into()
            })
            .attr_with("cy", |i, _| scales.y_features.scale(records[i].feature2).into())
            .attr_with("fill", |i, _| AttrValue::from(&records[i].fill_color))
            .attr("stroke", "black")
            .attr("opacity", 0.6);
    }

    fn show_all_segments(&mut self) {
        self.fade("annotation", 0.0, SEGMENT_MOVE_MS);
        self.move_segments_to_grid(|_| "black");
        self.fade("dimReduced", 0.0, SEGMENT_MOVE_MS);
    }

    fn show_classifications(&mut self) {
        self.move_segments_to_grid(|misclassified| {
            if misclassified {
                MISCLASSIFIED_STROKE
            } else {
                "black"
            }
        });
        self.fade("roc", 0.0, 300);
        self.fade("cm", 0.0, 300);
    }

    fn show_roc(&mut self) {
        self.fade_group(1.0);
        self.fade("timeSeg", 0.0, 0);
        self.fade("roc", 1.0, 300);
        self.fade("cm", 1.0, 300);
    }

    fn move_segments_to_grid<F>(&mut self, stroke: F)
    where
        F: Fn(bool) -> &'static str,
    {
        let records = &self.data.segments;
        let segments = self.handles.segments.clone();
        self.scene
            .transition(&segments, SEGMENT_MOVE_MS)
            .attr_with("cx", |i, _| (records[i].layout.x - 20.0).into())
            .attr_with("cy", |i, _| (records[i].layout.y + 50.0).into())
            .attr_with("stroke", |i, _| stroke(records[i].is_misclassified()).into())
            .attr_with("fill", |i, _| AttrValue::from(&records[i].fill_color))
            .attr("opacity", 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures::fixture;
    use crate::sections::SectionMachine;

    fn context() -> SceneContext {
        let (config, data) = fixture();
        SceneContext::new(config, data)
    }

    fn all_visible(context: &SceneContext, class: &str) -> bool {
        let ids = context.elements(class);
        !ids.is_empty() && ids.iter().all(|&id| context.scene.is_visible(id))
    }

    fn all_hidden(context: &SceneContext, class: &str) -> bool {
        context
            .elements(class)
            .iter()
            .all(|&id| !context.scene.is_visible(id))
    }

    fn settle_at(context: &mut SceneContext, machine: &mut SectionMachine, index: usize) {
        machine.activate(index, context);
        context.scene.settle();
    }

    #[test]
    fn pipeline_then_raw_swaps_visible_layers() {
        let mut context = context();
        let mut machine = SectionMachine::default();
        settle_at(&mut context, &mut machine, 1);
        assert!(all_visible(&context, "pipeline"));
        assert!(all_hidden(&context, "raw"));
        assert!(context.ticker.is_running());

        settle_at(&mut context, &mut machine, 2);
        assert!(all_hidden(&context, "pipeline"));
        assert!(all_visible(&context, "raw"));
        assert!(!context.ticker.is_running());
        let line = context.handles.series_line;
        assert_eq!(context.scene.number(line, "stroke-dashoffset"), Some(0.0));
    }

    #[test]
    fn clean_series_recolors_the_line() {
        let mut context = context();
        let mut machine = SectionMachine::default();
        settle_at(&mut context, &mut machine, 3);
        let line = context.handles.series_line;
        let d = context.scene.attr(line, "d").unwrap().render();
        assert_eq!(d, context.geometry.clean_path);
        assert_eq!(
            context.scene.attr(line, "stroke").unwrap().render(),
            PALETTE[10]
        );
    }

    #[test]
    fn segments_collapse_onto_the_series_strip() {
        let mut context = context();
        let mut machine = SectionMachine::default();
        settle_at(&mut context, &mut machine, 5);
        let width = context.config.width;
        for (i, &id) in context.handles.segments.iter().enumerate() {
            assert_eq!(context.scene.number(id, "cx"), Some(segment_strip_x(i, width)));
            assert_eq!(context.scene.number(id, "cy"), Some(context.geometry.mean_y));
            assert_eq!(context.scene.attr(id, "stroke").unwrap().render(), "black");
            assert_eq!(context.scene.number(id, "opacity"), Some(1.0));
        }
        assert!(all_visible(&context, "timeSeg"));
        assert!(all_visible(&context, "annotation"));
        assert!(all_hidden(&context, "raw"));
        assert!(all_hidden(&context, "bounds"));
    }

    #[test]
    fn all_segments_fill_the_grid() {
        let mut context = context();
        let mut machine = SectionMachine::default();
        settle_at(&mut context, &mut machine, 7);
        for (i, &id) in context.handles.segments.iter().enumerate() {
            let layout = context.data.segments[i].layout;
            assert_eq!(context.scene.number(id, "cx"), Some(layout.x - 20.0));
            assert_eq!(context.scene.number(id, "cy"), Some(layout.y + 50.0));
            assert_eq!(context.scene.attr(id, "stroke").unwrap().render(), "black");
            assert_eq!(context.scene.number(id, "opacity"), Some(1.0));
        }
        assert!(all_hidden(&context, "dimReduced"));
        assert!(all_hidden(&context, "annotation"));
        assert!(!context.elements("dimReduced").is_empty());
    }

    #[test]
    fn feature_space_places_segments_by_features() {
        let mut context = context();
        let mut machine = SectionMachine::default();
        settle_at(&mut context, &mut machine, 6);
        let last = *context.handles.segments.last().unwrap();
        assert_eq!(context.scene.number(last, "cx"), Some(640.0));
        assert_eq!(context.scene.number(last, "cy"), Some(520.0));
        assert_eq!(context.scene.number(last, "opacity"), Some(0.6));
        assert!(all_visible(&context, "dimReduced"));
        assert!(all_hidden(&context, "annotation"));
    }

    #[test]
    fn classification_highlights_misclassified_segments() {
        let mut context = context();
        let mut machine = SectionMachine::default();
        settle_at(&mut context, &mut machine, 8);
        let strokes: Vec<String> = context
            .handles
            .segments
            .iter()
            .map(|&id| context.scene.attr(id, "stroke").unwrap().render())
            .collect();
        assert_eq!(strokes[0], "black");
        assert_eq!(strokes[1], MISCLASSIFIED_STROKE);
        let first = context.handles.segments[0];
        assert_eq!(context.scene.number(first, "cx"), Some(-20.0));
        assert_eq!(context.scene.number(first, "cy"), Some(50.0));
        assert!(all_hidden(&context, "roc"));
    }

    #[test]
    fn roc_section_shows_curve_and_matrix_only() {
        let mut context = context();
        let mut machine = SectionMachine::default();
        settle_at(&mut context, &mut machine, 9);
        assert!(all_visible(&context, "roc"));
        assert!(all_visible(&context, "cm"));
        assert!(all_hidden(&context, "timeSeg"));
        assert!(all_hidden(&context, "raw"));

        settle_at(&mut context, &mut machine, 10);
        assert!(!context.scene.is_visible(context.handles.group));
    }

    #[test]
    fn scrolling_back_to_bounds_hides_segments() {
        let mut context = context();
        let mut machine = SectionMachine::default();
        settle_at(&mut context, &mut machine, 7);
        settle_at(&mut context, &mut machine, 4);
        assert!(all_hidden(&context, "timeSeg"));
        assert!(all_hidden(&context, "annotation"));
        assert!(all_visible(&context, "raw line"));
        let bounds = context.elements("bounds");
        assert!(bounds
            .iter()
            .all(|&id| context.scene.number(id, "opacity") == Some(0.5)));
    }
}
