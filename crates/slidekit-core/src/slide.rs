//! Slide document and selection state.

use crate::config::SlideConfig;
use crate::error::{SlideError, SlideResult};
use crate::patch::ShapePatch;
use crate::shapes::{Shape, ShapeData, ShapeId};
use kurbo::{Point, Rect};
use std::collections::HashSet;
use std::fmt;

/// A change notification sent to subscribers after each store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlideEvent {
    Added(ShapeId),
    Patched(ShapeId),
    Removed(ShapeId),
    SelectionChanged(Option<ShapeId>),
}

/// Handle returned by [`Slide::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&SlideEvent)>;

/// The scene store: an ordered list of shapes plus a single selection.
///
/// Later items paint on top of earlier ones. The store is the sole owner of
/// its shapes and the only place identifiers are minted. Mutations run
/// synchronously and notify subscribers before returning.
pub struct Slide {
    items: Vec<Shape>,
    selected: Option<ShapeId>,
    config: SlideConfig,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for Slide {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Slide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slide")
            .field("items", &self.items)
            .field("selected", &self.selected)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Slide {
    /// Create an empty slide with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SlideConfig::default())
    }

    pub fn with_config(config: SlideConfig) -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            config,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn config(&self) -> &SlideConfig {
        &self.config
    }

    /// Register a listener for store mutations.
    pub fn subscribe(&mut self, listener: impl FnMut(&SlideEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, event: SlideEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    /// Append a new shape on top of the others and return its fresh id.
    pub fn add(&mut self, data: impl Into<ShapeData>) -> ShapeId {
        let shape = Shape::with_new_id(data.into());
        let id = shape.id().clone();
        log::debug!("add {} shape {}", shape.kind(), id);
        self.items.push(shape);
        self.notify(SlideEvent::Added(id.clone()));
        id
    }

    /// Shallow-merge `patch` into the shape with `id`.
    ///
    /// A missing id is silently ignored: callers may race with a removal.
    /// A patch for another variant is rejected and the shape is left as is.
    pub fn patch(&mut self, id: &ShapeId, patch: impl Into<ShapePatch>) -> SlideResult<()> {
        let patch = patch.into();
        let Some(shape) = self.items.iter_mut().find(|s| s.id() == id) else {
            log::debug!("patch ignored, no shape {}", id);
            return Ok(());
        };
        if let Err(e) = patch.apply(shape.data_mut()) {
            log::warn!("patch rejected for shape {}: {}", id, e);
            return Err(e);
        }
        self.notify(SlideEvent::Patched(id.clone()));
        Ok(())
    }

    /// Remove a shape. Clears the selection if it pointed at this shape.
    /// Returns the removed shape, or `None` if the id was unknown.
    pub fn remove(&mut self, id: &ShapeId) -> Option<Shape> {
        let index = self.items.iter().position(|s| s.id() == id)?;
        let shape = self.items.remove(index);
        self.notify(SlideEvent::Removed(id.clone()));
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
            self.notify(SlideEvent::SelectionChanged(None));
        }
        Some(shape)
    }

    /// Point the selection at `id`, or clear it with `None`.
    ///
    /// The id is not validated; a dangling selection simply resolves to no
    /// shape in [`Slide::selected_shape`].
    pub fn select(&mut self, id: Option<ShapeId>) {
        self.selected = id.clone();
        self.notify(SlideEvent::SelectionChanged(id));
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.select(None);
    }

    /// The raw selection pointer, possibly dangling.
    pub fn selected(&self) -> Option<&ShapeId> {
        self.selected.as_ref()
    }

    /// The selected shape, if the selection points at an existing one.
    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.as_ref().and_then(|id| self.get(id))
    }

    pub fn is_selected(&self, id: &ShapeId) -> bool {
        self.selected_shape().is_some_and(|s| s.id() == id)
    }

    /// Shapes in paint order (back to front).
    pub fn items(&self) -> &[Shape] {
        &self.items
    }

    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.items.iter().find(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the bounding box of all shapes.
    pub fn bounds(&self) -> Option<Rect> {
        self.items
            .iter()
            .map(Shape::bounds)
            .reduce(|acc, b| acc.union(b))
    }

    /// Find shapes at a point, front to back, for click selection.
    pub fn shapes_at(&self, point: Point, tolerance: f64) -> Vec<ShapeId> {
        self.items
            .iter()
            .rev()
            .filter(|s| s.hit_test(point, tolerance))
            .map(|s| s.id().clone())
            .collect()
    }

    /// Serialize the shape list as the pretty-printed export document.
    pub fn to_json(&self) -> SlideResult<String> {
        Ok(serde_json::to_string_pretty(&self.items)?)
    }

    /// Rebuild a slide from an exported shape list. Nothing is selected.
    pub fn from_json(json: &str) -> SlideResult<Self> {
        Self::from_json_with_config(json, SlideConfig::default())
    }

    pub fn from_json_with_config(json: &str, config: SlideConfig) -> SlideResult<Self> {
        let items: Vec<Shape> = serde_json::from_str(json)?;
        let mut seen = HashSet::with_capacity(items.len());
        for shape in &items {
            if !seen.insert(shape.id()) {
                return Err(SlideError::DuplicateId(shape.id().clone()));
            }
        }
        let mut slide = Self::with_config(config);
        slide.items = items;
        Ok(slide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::{CirclePatch, RectPatch};
    use crate::shapes::{Circle, Rectangle, ShapeKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rect_at(x: f64, y: f64) -> Rectangle {
        Rectangle::new(Point::new(x, y), 100.0, 50.0, "#4f46e5")
    }

    #[test]
    fn test_slide_creation() {
        let slide = Slide::new();
        assert!(slide.is_empty());
        assert_eq!(slide.selected(), None);
    }

    #[test]
    fn test_add_assigns_unique_ids_in_order() {
        let mut slide = Slide::new();
        let a = slide.add(rect_at(0.0, 0.0));
        let b = slide.add(Circle::new(Point::new(5.0, 5.0), 3.0, "#000"));
        assert_ne!(a, b);
        assert_eq!(slide.len(), 2);
        assert_eq!(slide.items()[0].id(), &a);
        assert_eq!(slide.items()[1].kind(), ShapeKind::Circle);
    }

    #[test]
    fn test_patch_missing_id_is_noop() {
        let mut slide = Slide::new();
        slide.add(rect_at(0.0, 0.0));
        let before = slide.items().to_vec();
        slide
            .patch(&ShapeId::generate(), ShapePatch::position(9.0, 9.0))
            .unwrap();
        assert_eq!(slide.items(), &before[..]);
    }

    #[test]
    fn test_patch_keeps_variant() {
        let mut slide = Slide::new();
        let id = slide.add(rect_at(0.0, 0.0));
        let result = slide.patch(&id, CirclePatch { radius: Some(4.0), ..Default::default() });
        assert!(matches!(result, Err(SlideError::VariantMismatch { .. })));
        assert_eq!(slide.get(&id).unwrap().kind(), ShapeKind::Rect);

        slide
            .patch(&id, RectPatch { height: Some(75.0), ..Default::default() })
            .unwrap();
        let ShapeData::Rect(r) = slide.get(&id).unwrap().data() else { panic!() };
        assert!((r.height - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_remove_selected_clears_selection() {
        let mut slide = Slide::new();
        let id = slide.add(rect_at(0.0, 0.0));
        slide.select(Some(id.clone()));
        assert!(slide.remove(&id).is_some());
        assert_eq!(slide.selected(), None);
        assert!(slide.is_empty());
    }

    #[test]
    fn test_remove_other_keeps_selection() {
        let mut slide = Slide::new();
        let a = slide.add(rect_at(0.0, 0.0));
        let b = slide.add(rect_at(10.0, 10.0));
        slide.select(Some(a.clone()));
        slide.remove(&b);
        assert_eq!(slide.selected(), Some(&a));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut slide = Slide::new();
        slide.add(rect_at(0.0, 0.0));
        assert!(slide.remove(&ShapeId::generate()).is_none());
        assert_eq!(slide.len(), 1);
    }

    #[test]
    fn test_dangling_selection_resolves_to_nothing() {
        let mut slide = Slide::new();
        let ghost = ShapeId::generate();
        slide.select(Some(ghost.clone()));
        assert_eq!(slide.selected(), Some(&ghost));
        assert!(slide.selected_shape().is_none());
        assert!(!slide.is_selected(&ghost));
    }

    #[test]
    fn test_subscribers_see_every_mutation() {
        let mut slide = Slide::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let sub = slide.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        let id = slide.add(rect_at(0.0, 0.0));
        slide.select(Some(id.clone()));
        slide.patch(&id, ShapePatch::position(1.0, 1.0)).unwrap();
        slide.remove(&id);

        assert_eq!(
            *events.borrow(),
            vec![
                SlideEvent::Added(id.clone()),
                SlideEvent::SelectionChanged(Some(id.clone())),
                SlideEvent::Patched(id.clone()),
                SlideEvent::Removed(id),
                SlideEvent::SelectionChanged(None),
            ]
        );

        assert!(slide.unsubscribe(sub));
        assert!(!slide.unsubscribe(sub));
        slide.add(rect_at(0.0, 0.0));
        assert_eq!(events.borrow().len(), 5);
    }

    #[test]
    fn test_shapes_at_point_front_to_back() {
        let mut slide = Slide::new();
        let back = slide.add(rect_at(0.0, 0.0));
        let front = slide.add(rect_at(50.0, 0.0));
        assert_eq!(
            slide.shapes_at(Point::new(75.0, 25.0), 0.0),
            vec![front, back.clone()]
        );
        assert_eq!(slide.shapes_at(Point::new(10.0, 25.0), 0.0), vec![back]);
        assert!(slide.shapes_at(Point::new(500.0, 500.0), 0.0).is_empty());
    }

    #[test]
    fn test_bounds_union() {
        let mut slide = Slide::new();
        assert!(slide.bounds().is_none());
        slide.add(rect_at(0.0, 0.0));
        slide.add(rect_at(200.0, 100.0));
        let bounds = slide.bounds().unwrap();
        assert!((bounds.x1 - 300.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_export_import() {
        let mut slide = Slide::new();
        let id = slide.add(rect_at(120.0, 120.0));
        slide.select(Some(id));

        let json = slide.to_json().unwrap();
        assert!(json.starts_with('['));

        let loaded = Slide::from_json(&json).unwrap();
        assert_eq!(loaded.items(), slide.items());
        assert_eq!(loaded.selected(), None);
    }

    #[test]
    fn test_import_editor_document_with_short_ids() {
        let json = r##"[
            {"id":"V1StGXR8_Z5jdHi6B-myT","type":"rect","x":120,"y":120,"width":160,"height":90,"fill":"#4f46e5"},
            {"id":"Uakgb_J5m9g-0JDMbcJqL","type":"circle","x":260,"y":260,"radius":60,"fill":"#10b981"}
        ]"##;
        let mut slide = Slide::from_json(json).unwrap();
        let id = ShapeId::from("V1StGXR8_Z5jdHi6B-myT");
        assert_eq!(slide.len(), 2);
        assert_eq!(slide.get(&id).unwrap().kind(), ShapeKind::Rect);

        slide.patch(&id, ShapePatch::position(0.0, 0.0)).unwrap();
        let exported: serde_json::Value = serde_json::from_str(&slide.to_json().unwrap()).unwrap();
        assert_eq!(exported[0]["id"], "V1StGXR8_Z5jdHi6B-myT");
        assert_eq!(exported[1]["id"], "Uakgb_J5m9g-0JDMbcJqL");
    }

    #[test]
    fn test_import_rejects_duplicate_ids() {
        let mut slide = Slide::new();
        slide.add(rect_at(0.0, 0.0));
        let one = serde_json::to_value(&slide.items()[0]).unwrap();
        let json = serde_json::to_string(&vec![one.clone(), one]).unwrap();
        assert!(matches!(Slide::from_json(&json), Err(SlideError::DuplicateId(_))));
    }
}
