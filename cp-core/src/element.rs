//! Draggable elements - the pieces the player pairs up.

use serde::{Deserialize, Serialize};

use crate::{Offset, Rect, Slot};

/// Numeric identity of an element (1-based in the reference pool).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(u32);

impl ElementId {
    /// Create an element id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The raw numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for ElementId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// An element in the pairing pool.
///
/// The resting rect only changes when the engine is laid out again;
/// everything the player does is expressed as `offset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraggableElement {
    /// Identity.
    pub id: ElementId,
    /// Bounding box at initialisation, with no offset applied.
    resting: Rect,
    /// Translation since the last placement.
    offset: Offset,
    /// Stage slot currently held, if any.
    slot: Option<Slot>,
}

impl DraggableElement {
    /// Create a free element resting at `resting`.
    #[must_use]
    pub fn new(id: ElementId, resting: Rect) -> Self {
        Self {
            id,
            resting,
            offset: Offset::ZERO,
            slot: None,
        }
    }

    /// Bounding box at initialisation.
    #[must_use]
    pub fn resting_rect(&self) -> Rect {
        self.resting
    }

    /// Current translation.
    #[must_use]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Current bounding box (resting rect plus offset).
    #[must_use]
    pub fn current_rect(&self) -> Rect {
        self.resting.translated(self.offset)
    }

    /// Slot held on the stage.
    #[must_use]
    pub fn slot(&self) -> Option<Slot> {
        self.slot
    }

    /// Whether the element sits on the stage.
    #[must_use]
    pub fn is_staged(&self) -> bool {
        self.slot.is_some()
    }

    pub(crate) fn set_resting(&mut self, resting: Rect) {
        self.resting = resting;
    }

    pub(crate) fn set_offset(&mut self, offset: Offset) {
        self.offset = offset;
    }

    pub(crate) fn place(&mut self, slot: Slot, offset: Offset) {
        self.slot = Some(slot);
        self.offset = offset;
    }

    /// Back to the resting position, off the stage.
    pub(crate) fn reset(&mut self) {
        self.slot = None;
        self.offset = Offset::ZERO;
    }
}
