//! # Chem CP Renderer
//!
//! Lays out and draws the shareable poster. Drawing goes through the
//! [`PosterBackend`] trait so the same layout code drives a browser canvas
//! and the headless [`RecordingBackend`] used in tests.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  PosterData (cp-core)                       │
//! ├─────────────────────────────────────────────┤
//! │  PosterRenderer + PosterConfig              │
//! │  - background, title, badges                │
//! │  - reaction, wrapped usage, share marker    │
//! ├──────────────────────┬──────────────────────┤
//! │ Canvas2D (cp-app)    │ RecordingBackend     │
//! └──────────────────────┴──────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod error;
pub mod export;
pub mod layout;
pub mod poster;
pub mod wrap;

pub use backend::{
    recording::{DrawOp, RecordingBackend},
    PosterBackend, TextAlign, TextBaseline, TextStyle,
};
pub use error::{RenderError, RenderResult};
pub use export::{ExportFormat, ExportSettings};
pub use layout::canvas_size;
pub use poster::{PosterConfig, PosterRenderer};
pub use wrap::wrap_text;
