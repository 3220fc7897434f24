use egui::{Pos2, Rect};
use log::debug;

use crate::element::Element;
use crate::id_generator::ItemId;

/// Owns every item in the scene.
///
/// Items are kept in insertion order. Stacking order is `(z, insertion
/// index)`, so items with equal z stack in the order they were added. Query
/// results list the topmost item first.
#[derive(Debug, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Items in insertion order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: ItemId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn get(&self, id: ItemId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    pub fn add(&mut self, element: Element) {
        debug!("document: add {} {}", element.kind_name(), element.id());
        self.elements.push(element);
    }

    /// Insert at an insertion-order slot, clamped to the end.
    pub fn insert_at(&mut self, index: usize, element: Element) {
        let index = index.min(self.elements.len());
        debug!("document: insert {} at {}", element.id(), index);
        self.elements.insert(index, element);
    }

    /// Remove an item, returning it together with the slot it occupied.
    pub fn remove(&mut self, id: ItemId) -> Option<(usize, Element)> {
        let index = self.index_of(id)?;
        debug!("document: remove {}", id);
        Some((index, self.elements.remove(index)))
    }

    /// Items bottom-most first.
    pub fn stacking_order(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        // stable: equal z keeps insertion order
        ordered.sort_by(|a, b| a.z().total_cmp(&b.z()));
        ordered
    }

    /// Items containing `point`, topmost first.
    pub fn items_at(&self, point: Pos2) -> Vec<ItemId> {
        self.stacking_order()
            .into_iter()
            .rev()
            .filter(|e| e.contains_scene_point(point))
            .map(Element::id)
            .collect()
    }

    pub fn top_item_at(&self, point: Pos2) -> Option<ItemId> {
        self.stacking_order()
            .into_iter()
            .rev()
            .find(|e| e.contains_scene_point(point))
            .map(Element::id)
    }

    /// Items whose scene bounds intersect `rect`, topmost first.
    pub fn items_in_rect(&self, rect: Rect) -> Vec<ItemId> {
        self.stacking_order()
            .into_iter()
            .rev()
            .filter(|e| e.intersects_scene_rect(rect))
            .map(Element::id)
            .collect()
    }

    pub fn selected(&self) -> Option<ItemId> {
        self.elements.iter().find(|e| e.is_selected()).map(Element::id)
    }

    /// Mark `id` as the only selected item. Returns `false` if it is missing
    /// or not selectable.
    pub fn set_selected(&mut self, id: ItemId) -> bool {
        let selectable = self.get(id).is_some_and(Element::is_selectable);
        if !selectable {
            return false;
        }
        for element in &mut self.elements {
            let selected = element.id() == id;
            element.set_selected(selected);
        }
        true
    }

    pub fn clear_selected(&mut self) {
        for element in &mut self.elements {
            element.set_selected(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{factory, Outline};
    use egui::{Color32, Vec2};

    fn square(at: Pos2) -> Element {
        factory::create_rectangle(
            Rect::from_min_size(at, Vec2::splat(20.0)),
            Color32::RED,
            Outline::new(Color32::BLACK, 1.0),
        )
    }

    #[test]
    fn later_items_stack_on_top() {
        let mut doc = Document::new();
        let a = square(Pos2::ZERO);
        let b = square(Pos2::new(10.0, 10.0));
        let (a_id, b_id) = (a.id(), b.id());
        doc.add(a);
        doc.add(b);
        assert_eq!(doc.items_at(Pos2::new(15.0, 15.0)), vec![b_id, a_id]);

        doc.get_mut(a_id).unwrap().set_z(0.1);
        assert_eq!(doc.top_item_at(Pos2::new(15.0, 15.0)), Some(a_id));
    }

    #[test]
    fn remove_reports_slot() {
        let mut doc = Document::new();
        let ids: Vec<_> = (0..3)
            .map(|i| {
                let e = square(Pos2::new(i as f32 * 50.0, 0.0));
                let id = e.id();
                doc.add(e);
                id
            })
            .collect();
        let (slot, removed) = doc.remove(ids[1]).unwrap();
        assert_eq!(slot, 1);
        doc.insert_at(slot, removed);
        assert_eq!(doc.index_of(ids[1]), Some(1));
    }

    #[test]
    fn selection_is_exclusive() {
        let mut doc = Document::new();
        let a = square(Pos2::ZERO);
        let b = square(Pos2::new(50.0, 0.0));
        let (a_id, b_id) = (a.id(), b.id());
        doc.add(a);
        doc.add(b);
        doc.set_selected(a_id);
        doc.set_selected(b_id);
        assert_eq!(doc.selected(), Some(b_id));
        assert!(!doc.get(a_id).unwrap().is_selected());
    }
}
