//! # Chem CP Core
//!
//! Game logic for the chemistry pairing mini-game, free of any DOM or canvas
//! dependency so the same state machines run under native tests and in the
//! browser.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  cp-core                    │
//! ├─────────────────────────────────────────────┤
//! │  Story Controller │  Pairing Engine         │
//! │  - Stages         │  - Draggable elements   │
//! │  - Dialog cursor  │  - Two-slot stage       │
//! │                   │  - Match evaluation     │
//! ├─────────────────────────────────────────────┤
//! │  App Flow         │  Catalog / Config       │
//! │  - Screen order   │  - Element labels       │
//! │  - Signals        │  - Poster recipes       │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod element;
pub mod error;
pub mod flow;
pub mod geometry;
pub mod pairing;
pub mod signal;
pub mod story;

pub use catalog::{ElementCatalog, ElementSpec, PosterData, Recipe};
pub use config::{GameConfig, MatchRule};
pub use element::{DraggableElement, ElementId};
pub use error::{CoreError, CoreResult};
pub use flow::{AppFlow, Screen};
pub use geometry::{Offset, Rect};
pub use pairing::{PairingEngine, PairingOutcome, Slot, StageLayout, SuccessNotice};
pub use signal::CompletionSignal;
pub use story::{Dialog, DialogPosition, Stage, StoryController, StoryState};

/// Core crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
