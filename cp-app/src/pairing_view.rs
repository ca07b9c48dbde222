//! Pairing screen: draggable element tiles, the two-slot stage, the match
//! button and the success card.
//!
//! Pointer events feed [`PairingEngine`]; after every change the engine's
//! offsets and button state are mirrored back onto the page.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use cp_core::{
    DraggableElement, ElementId, GameConfig, Offset, PairingEngine, Rect, Slot, StageLayout,
    SuccessNotice,
};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Event, HtmlAudioElement, HtmlElement, PointerEvent};

use crate::dom::{self, listen, set_class, ElementBuilder};
use crate::error::{AppError, AppResult, JsResultExt};

const DRAGGING_CLASS: &str = "dragging";
const SHOW_CLASS: &str = "show";

/// CSS `transform` for an element offset.
#[must_use]
pub fn transform_css(offset: Offset) -> String {
    if offset.is_zero() {
        "none".to_string()
    } else {
        format!("translate({}px, {}px)", offset.x, offset.y)
    }
}

/// Viewport rect of a rendered element.
fn rect_of(element: &HtmlElement) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

fn client_point(event: &PointerEvent) -> (f64, f64) {
    (f64::from(event.client_x()), f64::from(event.client_y()))
}

/// Pointer currently dragging a tile.
#[derive(Debug, Clone, Copy)]
struct DragState {
    id: ElementId,
    pointer_id: i32,
    last: (f64, f64),
}

/// Pairing screen bound to its container.
pub struct PairingView {
    engine: RefCell<PairingEngine>,
    document: Document,
    config: Rc<GameConfig>,
    tiles: Vec<(ElementId, HtmlElement)>,
    stage: HtmlElement,
    slots: Vec<(Slot, HtmlElement)>,
    match_button: HtmlElement,
    success_card: HtmlElement,
    drag: Cell<Option<DragState>>,
}

impl PairingView {
    /// Build the pairing screen inside `container`.
    ///
    /// Geometry is measured later, in [`start`](Self::start), once the
    /// screen is visible.
    ///
    /// # Errors
    ///
    /// Returns an error if the DOM rejects an element or a listener.
    pub fn mount(
        document: &Document,
        container: &HtmlElement,
        config: &Rc<GameConfig>,
    ) -> AppResult<Rc<Self>> {
        container.set_inner_html("");

        let mut tiles = Vec::new();
        for id in config.element_ids() {
            let tile = ElementBuilder::new("div")
                .class(format!("_{id} element"))
                .data("id", id.to_string())
                .attr("aria-label", config.catalog.label(id))
                .style("touch-action", "none")
                .build(document)?;
            container.append_child(&tile).js_context("appendChild")?;
            tiles.push((id, tile));
        }

        let stage = ElementBuilder::new("div").class("stage").build(document)?;
        let mut slots = Vec::with_capacity(Slot::ALL.len());
        for slot in Slot::ALL {
            let marker = ElementBuilder::new("div")
                .class(format!("stage-position {}", slot.class_name()))
                .build(document)?;
            stage.append_child(&marker).js_context("appendChild")?;
            slots.push((slot, marker));
        }
        container.append_child(&stage).js_context("appendChild")?;

        let match_button = ElementBuilder::new("button")
            .class("match-button inactive")
            .text("匹配")
            .build(document)?;
        container
            .append_child(&match_button)
            .js_context("appendChild")?;

        let success_card = ElementBuilder::new("div")
            .class("success-card")
            .build(document)?;
        container
            .append_child(&success_card)
            .js_context("appendChild")?;

        let unmeasured = StageLayout {
            stage: Rect::default(),
            slot_a: Rect::default(),
            slot_b: Rect::default(),
        };
        let engine = PairingEngine::from_config(
            config,
            unmeasured,
            tiles.iter().map(|(id, _)| (*id, Rect::default())),
        );

        let view = Rc::new(Self {
            engine: RefCell::new(engine),
            document: document.clone(),
            config: Rc::clone(config),
            tiles,
            stage,
            slots,
            match_button,
            success_card,
            drag: Cell::new(None),
        });
        Self::wire(&view)?;
        Ok(view)
    }

    fn wire(view: &Rc<Self>) -> AppResult<()> {
        for (id, tile) in &view.tiles {
            let id = *id;

            let handle = Rc::clone(view);
            listen(tile, "pointerdown", move |event| {
                if let Some(event) = event.dyn_ref::<PointerEvent>() {
                    handle.drag_start(id, event);
                }
            })?;

            let handle = Rc::clone(view);
            listen(tile, "pointermove", move |event| {
                if let Some(event) = event.dyn_ref::<PointerEvent>() {
                    if let Err(err) = handle.drag_move(event) {
                        tracing::warn!("Drag move failed: {err}");
                    }
                }
            })?;

            for end in ["pointerup", "pointercancel"] {
                let handle = Rc::clone(view);
                listen(tile, end, move |event| {
                    if let Some(event) = event.dyn_ref::<PointerEvent>() {
                        if let Err(err) = handle.drag_end(event) {
                            tracing::warn!("Drag end failed: {err}");
                        }
                    }
                })?;
            }
        }

        let handle = Rc::clone(view);
        listen(&view.match_button, "click", move |_: Event| {
            if let Err(err) = handle.evaluate() {
                tracing::warn!("Match evaluation failed: {err}");
            }
        })?;

        let handle = Rc::clone(view);
        listen(&*dom::window()?, "resize", move |_| {
            if let Err(err) = handle.remeasure() {
                tracing::warn!("Pairing relayout failed: {err}");
            }
        })?;
        Ok(())
    }

    /// Register the pairing-complete listener; receives both ids.
    pub fn on_complete(&self, listener: impl FnMut((ElementId, ElementId)) + 'static) {
        self.engine.borrow_mut().on_complete(listener);
    }

    /// Reset to an empty stage and measure the now-visible screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be updated.
    pub fn start(&self) -> AppResult<()> {
        self.engine.borrow_mut().start();
        self.drag.set(None);
        set_class(&self.success_card, SHOW_CLASS, false);
        // Clear the previous round's transforms before reading resting boxes.
        self.sync()?;
        self.remeasure()?;
        tracing::info!("Pairing screen ready");
        Ok(())
    }

    /// Measure stage, slots and tile resting boxes from the page.
    fn remeasure(&self) -> AppResult<()> {
        let slot_rect = |wanted: Slot| {
            self.slots
                .iter()
                .find(|(slot, _)| *slot == wanted)
                .map(|(_, marker)| rect_of(marker))
                .unwrap_or_default()
        };
        let layout = StageLayout {
            stage: rect_of(&self.stage),
            slot_a: slot_rect(Slot::A),
            slot_b: slot_rect(Slot::B),
        };

        let mut engine = self.engine.borrow_mut();
        let resting: Vec<_> = self
            .tiles
            .iter()
            .map(|(id, tile)| {
                let offset = engine
                    .element(*id)
                    .map_or(Offset::ZERO, DraggableElement::offset);
                let undo = Offset::new(-offset.x, -offset.y);
                (*id, rect_of(tile).translated(undo))
            })
            .collect();
        engine.relayout(layout, resting)?;
        drop(engine);
        self.sync()
    }

    fn drag_start(&self, id: ElementId, event: &PointerEvent) {
        event.prevent_default();
        let Some(tile) = self.tile(id) else {
            return;
        };
        if let Err(err) = tile.set_pointer_capture(event.pointer_id()) {
            tracing::debug!("Pointer capture refused: {err:?}");
        }
        set_class(tile, DRAGGING_CLASS, true);
        self.drag.set(Some(DragState {
            id,
            pointer_id: event.pointer_id(),
            last: client_point(event),
        }));
    }

    fn drag_move(&self, event: &PointerEvent) -> AppResult<()> {
        let Some(mut drag) = self.drag.get() else {
            return Ok(());
        };
        if drag.pointer_id != event.pointer_id() {
            return Ok(());
        }

        let (x, y) = client_point(event);
        let offset =
            self.engine
                .borrow_mut()
                .on_drag_move(drag.id, x - drag.last.0, y - drag.last.1)?;
        drag.last = (x, y);
        self.drag.set(Some(drag));

        let tile = self
            .tile(drag.id)
            .ok_or_else(|| AppError::MissingElement(format!("tile {}", drag.id)))?;
        tile.style()
            .set_property("transform", &transform_css(offset))
            .js_context("style.setProperty")
    }

    fn drag_end(&self, event: &PointerEvent) -> AppResult<()> {
        let Some(drag) = self.drag.get() else {
            return Ok(());
        };
        if drag.pointer_id != event.pointer_id() {
            return Ok(());
        }
        self.drag.set(None);

        let tile = self
            .tile(drag.id)
            .ok_or_else(|| AppError::MissingElement(format!("tile {}", drag.id)))?;
        set_class(tile, DRAGGING_CLASS, false);

        let final_rect = rect_of(tile);
        self.engine.borrow_mut().on_drag_end(drag.id, final_rect)?;
        self.sync()
    }

    /// Mirror engine offsets and match-button state onto the page.
    fn sync(&self) -> AppResult<()> {
        let engine = self.engine.borrow();
        for (id, tile) in &self.tiles {
            let offset = engine
                .element(*id)
                .map_or(Offset::ZERO, DraggableElement::offset);
            tile.style()
                .set_property("transform", &transform_css(offset))
                .js_context("style.setProperty")?;
        }

        let enabled = engine.match_enabled();
        set_class(&self.match_button, "active", enabled);
        set_class(&self.match_button, "inactive", !enabled);
        Ok(())
    }

    fn evaluate(&self) -> AppResult<()> {
        let outcome = self.engine.borrow_mut().evaluate_match();
        let Some(outcome) = outcome else {
            return Ok(());
        };
        if let Some(notice) = outcome.notice {
            self.show_notice(&notice)?;
            self.play_success_sound();
        }
        Ok(())
    }

    fn show_notice(&self, notice: &SuccessNotice) -> AppResult<()> {
        self.success_card.set_inner_html("");
        let title = ElementBuilder::new("h3")
            .text(notice.title.as_str())
            .build(&self.document)?;
        let message = ElementBuilder::new("p")
            .text(notice.message.as_str())
            .build(&self.document)?;
        self.success_card
            .append_child(&title)
            .js_context("appendChild")?;
        self.success_card
            .append_child(&message)
            .js_context("appendChild")?;
        set_class(&self.success_card, SHOW_CLASS, true);

        let card = self.success_card.clone();
        let millis = u32::try_from(notice.dismiss_after.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || set_class(&card, SHOW_CLASS, false)).forget();
        Ok(())
    }

    fn play_success_sound(&self) {
        let played = HtmlAudioElement::new_with_src(&self.config.success_sound)
            .and_then(|audio| audio.play());
        let promise = match played {
            Ok(promise) => promise,
            Err(err) => {
                tracing::warn!("Success sound failed: {err:?}");
                return;
            }
        };
        // Rejected when the browser blocks autoplay.
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                tracing::warn!("Success sound blocked: {err:?}");
            }
        });
    }

    fn tile(&self, id: ElementId) -> Option<&HtmlElement> {
        self.tiles
            .iter()
            .find(|(tile_id, _)| *tile_id == id)
            .map(|(_, tile)| tile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_offset_clears_transform() {
        assert_eq!(transform_css(Offset::ZERO), "none");
    }

    #[test]
    fn offset_becomes_translate() {
        assert_eq!(
            transform_css(Offset::new(12.5, -40.0)),
            "translate(12.5px, -40px)"
        );
    }
}
