use crate::math::format::{fmt_number, tick_label};
use crate::math::scale::LinearScale;
use crate::scene::element::{ElementId, Scene, Tag};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orient {
    Bottom,
    Left,
}

#[derive(Debug, Clone, Copy)]
pub struct AxisSpec {
    pub orient: Orient,
    pub scale: LinearScale,
    /// Approximate tick count; zero draws only the domain line.
    pub ticks: usize,
}

impl AxisSpec {
    pub fn bottom(scale: LinearScale, ticks: usize) -> Self {
        Self {
            orient: Orient::Bottom,
            scale,
            ticks,
        }
    }

    pub fn left(scale: LinearScale, ticks: usize) -> Self {
        Self {
            orient: Orient::Left,
            scale,
            ticks,
        }
    }

    /// Draws the domain line and ticks into `group`, which the caller has
    /// already positioned.
    pub fn draw(&self, scene: &mut Scene, group: ElementId) {
        let anchor = match self.orient {
            Orient::Bottom => "middle",
            Orient::Left => "end",
        };
        scene.set_attr(group, "fill", "none");
        scene.set_attr(group, "font-size", 10.0);
        scene.set_attr(group, "font-family", "sans-serif");
        scene.set_attr(group, "text-anchor", anchor);

        let (r0, r1) = self.scale.range;
        let domain = match self.orient {
            Orient::Bottom => format!(
                "M{},{}V0H{}V{}",
                fmt_number(r0),
                TICK_SIZE,
                fmt_number(r1),
                TICK_SIZE
            ),
            Orient::Left => format!(
                "M-{},{}H0V{}H-{}",
                TICK_SIZE,
                fmt_number(r0),
                fmt_number(r1),
                TICK_SIZE
            ),
        };
        scene
            .append(group, Tag::Path)
            .class("domain")
            .attr("stroke", "currentColor")
            .attr("d", domain);

        let step = self.scale.tick_step(self.ticks.max(1));
        for value in self.scale.ticks(self.ticks) {
            let offset = self.scale.scale(value);
            let transform = match self.orient {
                Orient::Bottom => format!("translate({},0)", fmt_number(offset)),
                Orient::Left => format!("translate(0,{})", fmt_number(offset)),
            };
            let tick = scene
                .append(group, Tag::Group)
                .class("tick")
                .attr("opacity", 1.0)
                .attr("transform", transform)
                .id();
            let (line_axis, text_axis, dy) = match self.orient {
                Orient::Bottom => ("y2", "y", "0.71em"),
                Orient::Left => ("x2", "x", "0.32em"),
            };
            let sign = match self.orient {
                Orient::Bottom => 1.0,
                Orient::Left => -1.0,
            };
            scene
                .append(tick, Tag::Line)
                .attr("stroke", "currentColor")
                .attr(line_axis, sign * TICK_SIZE);
            scene
                .append(tick, Tag::Text)
                .attr("fill", "currentColor")
                .attr(text_axis, sign * (TICK_SIZE + TICK_PADDING))
                .attr("dy", dy)
                .text(tick_label(value, step));
        }
    }
}
