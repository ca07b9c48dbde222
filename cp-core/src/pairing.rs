//! # Pairing Engine
//!
//! The drag-and-drop game: a fixed pool of elements, a stage with two slots,
//! and a match button that is live only while both slots are filled.
//!
//! ```text
//! drag end ──overlaps stage?──yes──> add_to_stage ──full?──> evict nearest, then place
//!                  │
//!                  └──no──> remove_from_stage (back to resting position)
//! ```
//!
//! The engine never touches the DOM. Callers feed it bounding boxes and
//! pointer deltas, then mirror [`DraggableElement::offset`] and
//! [`PairingEngine::match_enabled`] back onto the page.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    CompletionSignal, CoreError, CoreResult, DraggableElement, ElementId, GameConfig, MatchRule,
    Offset, Rect,
};

/// One of the two fixed stage positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// First position, filled when the stage is empty.
    A,
    /// Second position.
    B,
}

impl Slot {
    /// Both slots, in fill order.
    pub const ALL: [Slot; 2] = [Slot::A, Slot::B];

    /// CSS class of the slot marker.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::A => "position-a",
            Self::B => "position-b",
        }
    }
}

/// Stage geometry, measured when the pairing screen is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageLayout {
    /// The whole drop zone.
    pub stage: Rect,
    /// Slot A marker.
    pub slot_a: Rect,
    /// Slot B marker.
    pub slot_b: Rect,
}

impl StageLayout {
    /// Bounding box of `slot`.
    #[must_use]
    pub fn slot_rect(&self, slot: Slot) -> Rect {
        match slot {
            Slot::A => self.slot_a,
            Slot::B => self.slot_b,
        }
    }
}

/// Transient success card content.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessNotice {
    /// Card heading.
    pub title: String,
    /// Card body.
    pub message: String,
    /// How long the card stays visible.
    pub dismiss_after: Duration,
}

impl SuccessNotice {
    fn for_pair(first: ElementId, second: ElementId, dismiss_after: Duration) -> Self {
        Self {
            title: "匹配成功！".to_string(),
            message: format!("元素 {first} 和元素 {second} 形成了完美的组合！"),
            dismiss_after,
        }
    }
}

/// Result of pressing the match button with two elements staged.
#[derive(Debug, Clone, PartialEq)]
pub struct PairingOutcome {
    /// Element placed first.
    pub first: ElementId,
    /// Element placed second.
    pub second: ElementId,
    /// Whether the match rule accepted the pair.
    pub matched: bool,
    /// Card to show on success.
    pub notice: Option<SuccessNotice>,
}

/// The pairing game state machine.
#[derive(Debug)]
pub struct PairingEngine {
    elements: Vec<DraggableElement>,
    layout: StageLayout,
    /// Staged ids in placement order; at most two.
    staged: Vec<ElementId>,
    rule: MatchRule,
    notice_duration: Duration,
    completed: CompletionSignal<(ElementId, ElementId)>,
}

impl PairingEngine {
    /// Create an engine over elements resting at the given rects.
    #[must_use]
    pub fn new(
        layout: StageLayout,
        elements: impl IntoIterator<Item = (ElementId, Rect)>,
        rule: MatchRule,
        notice_duration: Duration,
    ) -> Self {
        let elements: Vec<_> = elements
            .into_iter()
            .map(|(id, resting)| DraggableElement::new(id, resting))
            .collect();
        tracing::debug!("Pairing engine laid out with {} elements", elements.len());
        Self {
            elements,
            layout,
            staged: Vec::with_capacity(2),
            rule,
            notice_duration,
            completed: CompletionSignal::new(),
        }
    }

    /// Create an engine using the rule and timings from `config`.
    #[must_use]
    pub fn from_config(
        config: &GameConfig,
        layout: StageLayout,
        elements: impl IntoIterator<Item = (ElementId, Rect)>,
    ) -> Self {
        Self::new(
            layout,
            elements,
            config.match_rule.clone(),
            config.success_notice_duration(),
        )
    }

    /// Register the completion listener; receives both ids in staging order.
    pub fn on_complete(&mut self, listener: impl FnMut((ElementId, ElementId)) + 'static) {
        self.completed.connect(listener);
    }

    /// Reset to an empty stage with every element at rest.
    pub fn start(&mut self) {
        self.staged.clear();
        for element in &mut self.elements {
            element.reset();
        }
        self.completed.rearm();
        tracing::debug!("Pairing started");
    }

    /// Replace the measured geometry.
    ///
    /// Called once the pairing screen is visible and its boxes can be
    /// measured. Staged elements are re-centred on their slots.
    ///
    /// # Errors
    ///
    /// Returns an error if `resting` names an id outside the pool.
    pub fn relayout(
        &mut self,
        layout: StageLayout,
        resting: impl IntoIterator<Item = (ElementId, Rect)>,
    ) -> CoreResult<()> {
        self.layout = layout;
        for (id, rect) in resting {
            self.element_mut(id)?.set_resting(rect);
        }
        for id in self.staged.clone() {
            if let Some(slot) = self.element_ref(id)?.slot() {
                let offset = self.centering_offset(id, slot)?;
                self.element_mut(id)?.place(slot, offset);
            }
        }
        tracing::debug!("Pairing relaid out, stage {:?}", self.layout.stage);
        Ok(())
    }

    /// Apply a pointer delta to an element being dragged.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the pool.
    pub fn on_drag_move(&mut self, id: ElementId, dx: f64, dy: f64) -> CoreResult<Offset> {
        let element = self.element_mut(id)?;
        let offset = element.offset().moved_by(dx, dy);
        element.set_offset(offset);
        Ok(offset)
    }

    /// Route a finished drag: onto the stage if `final_rect` overlaps it,
    /// otherwise off it.
    ///
    /// A staged element dropped back on the stage returns to its slot.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the pool.
    pub fn on_drag_end(&mut self, id: ElementId, final_rect: Rect) -> CoreResult<()> {
        if final_rect.overlaps(&self.layout.stage) {
            if let Some(slot) = self.element(id).and_then(DraggableElement::slot) {
                let offset = self.centering_offset(id, slot)?;
                self.element_mut(id)?.place(slot, offset);
                return Ok(());
            }
            self.stage_element(id, final_rect)
        } else {
            self.remove_from_stage(id).map(|_| ())
        }
    }

    /// Put an element on the stage from where it currently is.
    ///
    /// No-op if it is already staged. With both slots taken, the staged
    /// element nearest to the incoming one is sent back first.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the pool.
    pub fn add_to_stage(&mut self, id: ElementId) -> CoreResult<()> {
        let current = self.element_ref(id)?.current_rect();
        self.stage_element(id, current)
    }

    /// Take an element off the stage and back to its resting position.
    ///
    /// Returns whether the element was staged.
    ///
    /// # Errors
    ///
    /// Returns an error if `id` is not in the pool.
    pub fn remove_from_stage(&mut self, id: ElementId) -> CoreResult<bool> {
        self.element_ref(id)?;
        let Some(index) = self.staged.iter().position(|&staged| staged == id) else {
            return Ok(false);
        };
        self.staged.remove(index);
        self.element_mut(id)?.reset();
        tracing::debug!("Element {id} left the stage ({} staged)", self.staged.len());
        Ok(true)
    }

    /// Evaluate the staged pair.
    ///
    /// Returns `None` unless exactly two elements are staged. On a match the
    /// completion signal fires (once per [`start`](Self::start)).
    pub fn evaluate_match(&mut self) -> Option<PairingOutcome> {
        let &[first, second] = self.staged.as_slice() else {
            return None;
        };

        let matched = self.rule.matches(first, second);
        let notice = matched.then(|| SuccessNotice::for_pair(first, second, self.notice_duration));
        if matched {
            tracing::info!("Matched {first} + {second}");
            self.completed.emit((first, second));
        } else {
            tracing::debug!("No match for {first} + {second}");
        }

        Some(PairingOutcome {
            first,
            second,
            matched,
            notice,
        })
    }

    /// Whether the match button should be live.
    #[must_use]
    pub fn match_enabled(&self) -> bool {
        self.staged.len() == 2
    }

    /// Staged ids in placement order.
    #[must_use]
    pub fn staged(&self) -> &[ElementId] {
        &self.staged
    }

    /// Whether `id` is on the stage.
    #[must_use]
    pub fn is_staged(&self, id: ElementId) -> bool {
        self.staged.contains(&id)
    }

    /// Look up an element.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&DraggableElement> {
        self.elements.iter().find(|element| element.id == id)
    }

    /// All elements in pool order.
    pub fn elements(&self) -> impl Iterator<Item = &DraggableElement> {
        self.elements.iter()
    }

    /// Stage geometry.
    #[must_use]
    pub fn layout(&self) -> &StageLayout {
        &self.layout
    }

    fn stage_element(&mut self, id: ElementId, incoming: Rect) -> CoreResult<()> {
        self.element_ref(id)?;
        if self.is_staged(id) {
            return Ok(());
        }

        if self.staged.len() >= 2 {
            if let Some(nearest) = self.nearest_staged(&incoming) {
                tracing::debug!("Stage full, evicting {nearest} for {id}");
                self.remove_from_stage(nearest)?;
            }
        }

        let slot = if self.staged.is_empty() {
            Slot::A
        } else {
            self.vacant_slot()
        };
        let offset = self.centering_offset(id, slot)?;
        self.element_mut(id)?.place(slot, offset);
        self.staged.push(id);

        tracing::debug!(
            "Element {id} staged in {:?} ({} staged)",
            slot,
            self.staged.len()
        );
        Ok(())
    }

    /// Staged element whose centre is closest to `incoming`'s centre.
    /// Ties go to the earliest placed.
    fn nearest_staged(&self, incoming: &Rect) -> Option<ElementId> {
        let mut nearest = None;
        let mut min_distance = f64::INFINITY;
        for &id in &self.staged {
            let Some(element) = self.element(id) else {
                continue;
            };
            let distance = incoming.center_distance(&element.current_rect());
            if distance < min_distance {
                min_distance = distance;
                nearest = Some(id);
            }
        }
        nearest
    }

    fn vacant_slot(&self) -> Slot {
        Slot::ALL
            .into_iter()
            .find(|&slot| {
                !self
                    .staged
                    .iter()
                    .any(|&id| self.element(id).and_then(DraggableElement::slot) == Some(slot))
            })
            .unwrap_or(Slot::B)
    }

    fn centering_offset(&self, id: ElementId, slot: Slot) -> CoreResult<Offset> {
        let resting = self.element_ref(id)?.resting_rect();
        Ok(resting.offset_to_center_on(&self.layout.slot_rect(slot)))
    }

    fn element_ref(&self, id: ElementId) -> CoreResult<&DraggableElement> {
        self.element(id).ok_or(CoreError::UnknownElement(id))
    }

    fn element_mut(&mut self, id: ElementId) -> CoreResult<&mut DraggableElement> {
        self.elements
            .iter_mut()
            .find(|element| element.id == id)
            .ok_or(CoreError::UnknownElement(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ten 50px elements in a row at y=400, stage above them.
    fn engine() -> PairingEngine {
        let layout = StageLayout {
            stage: Rect::new(50.0, 50.0, 300.0, 150.0),
            slot_a: Rect::new(70.0, 75.0, 100.0, 100.0),
            slot_b: Rect::new(230.0, 75.0, 100.0, 100.0),
        };
        let elements = (1..=10).map(|i| {
            (
                ElementId::new(i),
                Rect::new(f64::from(i) * 60.0, 400.0, 50.0, 50.0),
            )
        });
        PairingEngine::new(
            layout,
            elements,
            MatchRule::Adjacent,
            Duration::from_millis(3000),
        )
    }

    fn id(n: u32) -> ElementId {
        ElementId::new(n)
    }

    #[test]
    fn first_element_takes_slot_a() {
        let mut engine = engine();
        engine.add_to_stage(id(3)).expect("stage 3");

        let element = engine.element(id(3)).expect("element 3");
        assert_eq!(element.slot(), Some(Slot::A));
        assert_eq!(
            element.current_rect().center(),
            engine.layout().slot_a.center()
        );
        assert!(!engine.match_enabled());
    }

    #[test]
    fn second_element_takes_slot_b_and_enables_match() {
        let mut engine = engine();
        engine.add_to_stage(id(3)).expect("stage 3");
        engine.add_to_stage(id(4)).expect("stage 4");

        assert_eq!(engine.staged(), &[id(3), id(4)]);
        assert_eq!(engine.element(id(4)).and_then(DraggableElement::slot), Some(Slot::B));
        assert!(engine.match_enabled());
    }

    #[test]
    fn vacated_slot_a_is_refilled() {
        let mut engine = engine();
        engine.add_to_stage(id(3)).expect("stage 3");
        engine.add_to_stage(id(4)).expect("stage 4");
        engine.remove_from_stage(id(3)).expect("remove 3");
        engine.add_to_stage(id(5)).expect("stage 5");

        assert_eq!(engine.element(id(5)).and_then(DraggableElement::slot), Some(Slot::A));
        assert_eq!(engine.element(id(4)).and_then(DraggableElement::slot), Some(Slot::B));
    }

    #[test]
    fn unknown_element_is_an_error() {
        let mut engine = engine();
        assert!(matches!(
            engine.add_to_stage(id(42)),
            Err(CoreError::UnknownElement(_))
        ));
        assert!(engine.on_drag_move(id(0), 1.0, 1.0).is_err());
    }

    #[test]
    fn drag_move_accumulates() {
        let mut engine = engine();
        engine.on_drag_move(id(1), 5.0, -3.0).expect("move");
        let offset = engine.on_drag_move(id(1), 2.0, 1.0).expect("move");
        assert_eq!(offset, Offset::new(7.0, -2.0));
    }

    #[test]
    fn drop_outside_stage_of_free_element_keeps_position() {
        let mut engine = engine();
        engine.on_drag_move(id(2), 10.0, 10.0).expect("move");
        let rect = engine.element(id(2)).expect("element").current_rect();
        engine.on_drag_end(id(2), rect).expect("drop");

        assert!(!engine.is_staged(id(2)));
        assert_eq!(
            engine.element(id(2)).map(DraggableElement::offset),
            Some(Offset::new(10.0, 10.0))
        );
    }

    #[test]
    fn staged_element_dropped_on_stage_snaps_back() {
        let mut engine = engine();
        engine.add_to_stage(id(6)).expect("stage 6");
        let placed = engine.element(id(6)).expect("element").offset();

        engine.on_drag_move(id(6), 12.0, 8.0).expect("move");
        let rect = engine.element(id(6)).expect("element").current_rect();
        engine.on_drag_end(id(6), rect).expect("drop");

        assert_eq!(engine.staged(), &[id(6)]);
        assert_eq!(engine.element(id(6)).map(DraggableElement::offset), Some(placed));
    }

    #[test]
    fn mismatch_reports_without_notice() {
        let mut engine = engine();
        engine.add_to_stage(id(1)).expect("stage 1");
        engine.add_to_stage(id(5)).expect("stage 5");

        let outcome = engine.evaluate_match().expect("two staged");
        assert!(!outcome.matched);
        assert!(outcome.notice.is_none());
    }

    #[test]
    fn evaluate_requires_two_staged() {
        let mut engine = engine();
        assert!(engine.evaluate_match().is_none());
        engine.add_to_stage(id(1)).expect("stage 1");
        assert!(engine.evaluate_match().is_none());
    }

    #[test]
    fn relayout_recenters_staged_elements() {
        let mut engine = engine();
        engine.add_to_stage(id(2)).expect("stage 2");

        let moved = StageLayout {
            stage: Rect::new(0.0, 0.0, 300.0, 150.0),
            slot_a: Rect::new(20.0, 25.0, 100.0, 100.0),
            slot_b: Rect::new(180.0, 25.0, 100.0, 100.0),
        };
        engine
            .relayout(moved, [(id(2), Rect::new(0.0, 300.0, 50.0, 50.0))])
            .expect("relayout");

        let two = engine.element(id(2)).expect("element 2");
        assert_eq!(two.resting_rect(), Rect::new(0.0, 300.0, 50.0, 50.0));
        assert_eq!(two.current_rect().center(), (70.0, 75.0));
    }

    #[test]
    fn relayout_rejects_unknown_ids() {
        let mut engine = engine();
        let layout = *engine.layout();
        let result = engine.relayout(layout, [(id(99), Rect::new(0.0, 0.0, 1.0, 1.0))]);
        assert!(matches!(result, Err(CoreError::UnknownElement(_))));
    }
}
