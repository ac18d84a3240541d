use serde::Serialize;
use std::collections::BTreeMap;

use crate::math::format::fmt_number;
use crate::scene::timeline::{Ease, Frame, Timeline, Tween};

pub type ElementId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tag {
    Svg,
    Group,
    Path,
    Text,
    Circle,
    Rect,
    Line,
    Defs,
    ClipPath,
}

impl Tag {
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Svg => "svg",
            Tag::Group => "g",
            Tag::Path => "path",
            Tag::Text => "text",
            Tag::Circle => "circle",
            Tag::Rect => "rect",
            Tag::Line => "line",
            Tag::Defs => "defs",
            Tag::ClipPath => "clipPath",
        }
    }
}

/// Attribute value; numbers stay numeric so transitions can interpolate them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl AttrValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(value) => Some(*value),
            AttrValue::Text(text) => text.trim().parse().ok(),
        }
    }

    pub fn render(&self) -> String {
        match self {
            AttrValue::Number(value) => fmt_number(*value),
            AttrValue::Text(text) => text.clone(),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        AttrValue::Text(value.clone())
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub tag: Tag,
    pub classes: Vec<String>,
    pub attrs: BTreeMap<String, AttrValue>,
    pub text: Option<String>,
    pub key: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: Tag, parent: Option<ElementId>) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            text: None,
            key: None,
            parent,
            children: Vec::new(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// True when the element carries every whitespace-separated class in `selector`.
    pub fn matches(&self, selector: &str) -> bool {
        let mut wanted = selector.split_whitespace().peekable();
        wanted.peek().is_some() && wanted.all(|class| self.has_class(class))
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

/// Retained element tree plus the timeline animating its attributes.
#[derive(Debug, Clone)]
pub struct Scene {
    elements: BTreeMap<ElementId, Element>,
    root: ElementId,
    next_id: ElementId,
    timeline: Timeline,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        let mut root = Element::new(Tag::Svg, None);
        root.attrs.insert("width".into(), width.into());
        root.attrs.insert("height".into(), height.into());
        root.attrs
            .insert("xmlns".into(), "http://www.w3.org/2000/svg".into());
        let mut elements = BTreeMap::new();
        elements.insert(0, root);
        Self {
            elements,
            root: 0,
            next_id: 1,
            timeline: Timeline::default(),
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Appends a new child to `parent`; a missing parent yields a detached element.
    pub fn append(&mut self, parent: ElementId, tag: Tag) -> ElementBuilder<'_> {
        let id = self.next_id;
        self.next_id += 1;
        let attached = match self.elements.get_mut(&parent) {
            Some(node) => {
                node.children.push(id);
                Some(parent)
            }
            None => None,
        };
        self.elements.insert(id, Element::new(tag, attached));
        ElementBuilder { scene: self, id }
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(&id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn attr(&self, id: ElementId, name: &str) -> Option<&AttrValue> {
        self.elements.get(&id)?.attrs.get(name)
    }

    pub fn number(&self, id: ElementId, name: &str) -> Option<f64> {
        self.attr(id, name)?.as_number()
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id)?.text.as_deref()
    }

    /// Sets an attribute immediately, superseding any running transition on it.
    pub fn set_attr(&mut self, id: ElementId, name: &str, value: impl Into<AttrValue>) {
        self.timeline.cancel(id, name);
        self.write_attr(id, name, value.into());
    }

    fn write_attr(&mut self, id: ElementId, name: &str, value: AttrValue) {
        if let Some(node) = self.elements.get_mut(&id) {
            node.attrs.insert(name.to_string(), value);
        }
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(node) = self.elements.get_mut(&id) {
            node.text = Some(text.into());
        }
    }

    /// Descendants of `scope` (excluding `scope`) matching `selector`, in document order.
    pub fn select_all(&self, scope: ElementId, selector: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack: Vec<ElementId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(node) = self.elements.get(&id) {
                if node.matches(selector) {
                    found.push(id);
                }
                stack.extend(node.children.iter().rev().copied());
            }
        }
        found
    }

    /// Removes `id` and its whole subtree.
    pub fn remove(&mut self, id: ElementId) {
        if id == self.root {
            return;
        }
        if let Some(parent) = self.elements.get(&id).and_then(|node| node.parent) {
            if let Some(parent_node) = self.elements.get_mut(&parent) {
                parent_node.children.retain(|child| *child != id);
            }
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.elements.remove(&current) {
                stack.extend(node.children);
            }
            self.timeline.cancel_element(current);
        }
    }

    /// Starts a transition over `ids`; zero duration applies values at once.
    pub fn transition(&mut self, ids: &[ElementId], duration_ms: u64) -> Transition<'_> {
        Transition {
            scene: self,
            ids: ids.to_vec(),
            duration_ms,
            ease: Ease::default(),
        }
    }

    pub fn is_exiting(&self, id: ElementId) -> bool {
        self.timeline.is_removal_pending(id)
    }

    /// Product of the `opacity` attributes along the ancestor chain.
    pub fn effective_opacity(&self, id: ElementId) -> f64 {
        let mut opacity = 1.0;
        let mut current = Some(id);
        while let Some(node_id) = current {
            match self.elements.get(&node_id) {
                Some(node) => {
                    if let Some(value) = node.attrs.get("opacity").and_then(AttrValue::as_number) {
                        opacity *= value;
                    }
                    current = node.parent;
                }
                None => return 0.0,
            }
        }
        opacity
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.effective_opacity(id) > 0.0
    }

    pub fn now_ms(&self) -> u64 {
        self.timeline.now_ms()
    }

    pub fn pending_transitions(&self) -> usize {
        self.timeline.pending()
    }

    /// Moves the clock forward and writes interpolated values.
    pub fn advance(&mut self, delta_ms: u64) {
        let frame = self.timeline.advance(delta_ms);
        self.apply(frame);
    }

    /// Runs every pending transition to completion.
    pub fn settle(&mut self) {
        let frame = self.timeline.finish();
        self.apply(frame);
    }

    fn apply(&mut self, frame: Frame) {
        for (id, name, value) in frame.updates {
            self.write_attr(id, &name, value);
        }
        for id in frame.removals {
            self.remove(id);
        }
    }

    pub fn to_svg(&self) -> String {
        crate::scene::svg::render(self)
    }
}

pub struct ElementBuilder<'a> {
    scene: &'a mut Scene,
    id: ElementId,
}

impl<'a> ElementBuilder<'a> {
    pub fn class(self, classes: &str) -> Self {
        if let Some(node) = self.scene.elements.get_mut(&self.id) {
            node.classes
                .extend(classes.split_whitespace().map(str::to_string));
        }
        self
    }

    pub fn attr(self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.scene.write_attr(self.id, name, value.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.scene.set_text(self.id, text);
        self
    }

    pub fn key(self, key: impl Into<String>) -> Self {
        if let Some(node) = self.scene.elements.get_mut(&self.id) {
            node.key = Some(key.into());
        }
        self
    }

    pub fn id(self) -> ElementId {
        self.id
    }
}

pub struct Transition<'a> {
    scene: &'a mut Scene,
    ids: Vec<ElementId>,
    duration_ms: u64,
    ease: Ease,
}

impl<'a> Transition<'a> {
    /// Applies to attributes scheduled after this call.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn attr(self, name: &str, value: impl Into<AttrValue>) -> Self {
        let value = value.into();
        self.attr_with(name, |_, _| value.clone())
    }

    /// Per-element target computed from the element's position in the selection.
    pub fn attr_with<F>(self, name: &str, mut target: F) -> Self
    where
        F: FnMut(usize, ElementId) -> AttrValue,
    {
        let start_ms = self.scene.timeline.now_ms();
        for (position, &id) in self.ids.iter().enumerate() {
            if !self.scene.contains(id) {
                continue;
            }
            let to = target(position, id);
            if self.duration_ms == 0 {
                self.scene.set_attr(id, name, to);
                continue;
            }
            let from = self
                .scene
                .attr(id, name)
                .cloned()
                .unwrap_or_else(|| default_from(name, &to));
            self.scene.timeline.schedule(Tween {
                element: id,
                attr: name.to_string(),
                from,
                to,
                start_ms,
                duration_ms: self.duration_ms,
                ease: self.ease,
            });
        }
        self
    }

    /// Removes the elements once the transition has run its course.
    pub fn remove(self) -> Self {
        let due = self.scene.timeline.now_ms().saturating_add(self.duration_ms);
        let ids = self.ids.clone();
        for id in ids {
            if self.duration_ms == 0 {
                self.scene.remove(id);
            } else {
                self.scene.timeline.schedule_removal(id, due);
            }
        }
        self
    }
}

/// Starting value for an attribute that was never set.
fn default_from(name: &str, to: &AttrValue) -> AttrValue {
    match (name, to) {
        ("opacity", _) => AttrValue::Number(1.0),
        (_, AttrValue::Number(_)) => AttrValue::Number(0.0),
        (_, other) => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scene() -> (Scene, ElementId, ElementId, ElementId) {
        let mut scene = Scene::new(100.0, 50.0);
        let root = scene.root();
        let group = scene.append(root, Tag::Group).class("layer").id();
        let a = scene
            .append(group, Tag::Circle)
            .class("raw line")
            .attr("opacity", 0.0)
            .id();
        let b = scene.append(group, Tag::Text).class("raw label").text("Time").id();
        (scene, group, a, b)
    }

    #[test]
    fn select_all_requires_every_class() {
        let (scene, group, a, b) = sample_scene();
        assert_eq!(scene.select_all(group, "raw"), vec![a, b]);
        assert_eq!(scene.select_all(scene.root(), "raw line"), vec![a]);
        assert!(scene.select_all(group, "").is_empty());
        assert!(scene.select_all(group, "layer").is_empty());
    }

    #[test]
    fn zero_duration_transition_applies_immediately() {
        let (mut scene, group, a, _) = sample_scene();
        scene.transition(&[a], 0).attr("opacity", 1.0);
        assert_eq!(scene.number(a, "opacity"), Some(1.0));
        scene.transition(&[group], 0).attr("opacity", 0.0);
        assert!(!scene.is_visible(a));
        assert_eq!(scene.pending_transitions(), 0);
    }

    #[test]
    fn timed_transition_reaches_target_after_settle() {
        let (mut scene, _, a, _) = sample_scene();
        scene.transition(&[a], 300).attr("opacity", 1.0);
        assert_eq!(scene.number(a, "opacity"), Some(0.0));
        scene.advance(150);
        let halfway = scene.number(a, "opacity").unwrap();
        assert!(halfway > 0.0 && halfway < 1.0);
        scene.settle();
        assert_eq!(scene.number(a, "opacity"), Some(1.0));
        assert_eq!(scene.pending_transitions(), 0);
    }

    #[test]
    fn later_transition_supersedes_earlier_one() {
        let (mut scene, _, a, _) = sample_scene();
        scene.transition(&[a], 1000).attr("opacity", 1.0);
        scene.transition(&[a], 0).attr("opacity", 0.25);
        scene.settle();
        assert_eq!(scene.number(a, "opacity"), Some(0.25));
    }

    #[test]
    fn removal_drops_subtree_and_pending_tweens() {
        let (mut scene, group, a, b) = sample_scene();
        scene.transition(&[a], 500).attr("opacity", 1.0);
        scene.remove(group);
        assert!(!scene.contains(a));
        assert!(!scene.contains(b));
        assert_eq!(scene.pending_transitions(), 0);
        assert!(scene.children(scene.root()).is_empty());
    }

    #[test]
    fn scheduled_removal_happens_when_transition_ends() {
        let (mut scene, _, _, b) = sample_scene();
        scene.transition(&[b], 750).attr("x", 900.0).remove();
        assert!(scene.is_exiting(b));
        scene.advance(700);
        assert!(scene.contains(b));
        scene.advance(50);
        assert!(!scene.contains(b));
    }
}
