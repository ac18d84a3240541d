use std::collections::{BTreeMap, VecDeque};

use crate::scene::element::{ElementId, Scene};

/// Outcome of matching desired keys against the keyed children of a parent.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DataJoin {
    /// Datum positions with no existing element.
    pub enter: Vec<usize>,
    /// Datum position paired with the element that already shows it.
    pub update: Vec<(usize, ElementId)>,
    /// Elements whose key is no longer wanted, in document order.
    pub exit: Vec<ElementId>,
}

impl DataJoin {
    /// Matches `keys` against children of `parent` that carry `selector`.
    /// Duplicate keys pair up in document order; elements already on their
    /// way out are ignored.
    pub fn compute<K: AsRef<str>>(scene: &Scene, parent: ElementId, selector: &str, keys: &[K]) -> Self {
        let existing: Vec<ElementId> = scene
            .children(parent)
            .iter()
            .copied()
            .filter(|&id| !scene.is_exiting(id))
            .filter(|&id| scene.get(id).map_or(false, |node| node.matches(selector)))
            .collect();

        let mut by_key: BTreeMap<&str, VecDeque<ElementId>> = BTreeMap::new();
        for &id in &existing {
            if let Some(key) = scene.get(id).and_then(|node| node.key.as_deref()) {
                by_key.entry(key).or_default().push_back(id);
            }
        }

        let mut join = DataJoin::default();
        for (position, key) in keys.iter().enumerate() {
            match by_key.get_mut(key.as_ref()).and_then(VecDeque::pop_front) {
                Some(id) => join.update.push((position, id)),
                None => join.enter.push(position),
            }
        }
        let kept: Vec<ElementId> = join.update.iter().map(|(_, id)| *id).collect();
        join.exit = existing
            .into_iter()
            .filter(|id| !kept.contains(id))
            .collect();
        join
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::element::Tag;

    fn keyed(scene: &mut Scene, parent: ElementId, key: &str) -> ElementId {
        scene.append(parent, Tag::Text).class("pipeline").key(key).id()
    }

    #[test]
    fn keys_split_into_enter_update_exit() {
        let mut scene = Scene::new(10.0, 10.0);
        let root = scene.root();
        let a = keyed(&mut scene, root, "A");
        let b = keyed(&mut scene, root, "B");
        let join = DataJoin::compute(&scene, root, "pipeline", &["B", "C"]);
        assert_eq!(join.update, vec![(0, b)]);
        assert_eq!(join.enter, vec![1]);
        assert_eq!(join.exit, vec![a]);
    }

    #[test]
    fn duplicate_keys_pair_in_order() {
        let mut scene = Scene::new(10.0, 10.0);
        let root = scene.root();
        let first = keyed(&mut scene, root, "L");
        let second = keyed(&mut scene, root, "L");
        let join = DataJoin::compute(&scene, root, "pipeline", &["L", "L", "L"]);
        assert_eq!(join.update, vec![(0, first), (1, second)]);
        assert_eq!(join.enter, vec![2]);
        assert!(join.exit.is_empty());
    }

    #[test]
    fn exiting_elements_are_not_reused() {
        let mut scene = Scene::new(10.0, 10.0);
        let root = scene.root();
        let a = keyed(&mut scene, root, "A");
        scene.transition(&[a], 750).attr("x", 900.0).remove();
        let join = DataJoin::compute(&scene, root, "pipeline", &["A"]);
        assert_eq!(join.enter, vec![0]);
        assert!(join.exit.is_empty());
    }
}
