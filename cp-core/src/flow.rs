//! Screen sequencing for the app shell.

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// The four screens, in the only order the player sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    /// Asset preload placeholder.
    Loading,
    /// Dialog intro.
    Story,
    /// Drag-and-drop game.
    Pairing,
    /// Shareable poster.
    Poster,
}

impl Screen {
    /// All screens in flow order.
    pub const ALL: [Screen; 4] = [Screen::Loading, Screen::Story, Screen::Pairing, Screen::Poster];

    /// DOM id of the screen container.
    #[must_use]
    pub const fn container_id(self) -> &'static str {
        match self {
            Self::Loading => "loading-screen",
            Self::Story => "story-screen",
            Self::Pairing => "pairing-screen",
            Self::Poster => "poster-screen",
        }
    }

    /// The screen that follows this one.
    #[must_use]
    pub const fn next(self) -> Option<Screen> {
        match self {
            Self::Loading => Some(Self::Story),
            Self::Story => Some(Self::Pairing),
            Self::Pairing => Some(Self::Poster),
            Self::Poster => None,
        }
    }
}

/// Tracks which screen is active. Strictly forward, never cancelled.
#[derive(Debug, Clone)]
pub struct AppFlow {
    current: Screen,
}

impl AppFlow {
    /// Start on the loading screen.
    #[must_use]
    pub fn new() -> Self {
        Self {
            current: Screen::Loading,
        }
    }

    /// Active screen.
    #[must_use]
    pub fn current(&self) -> Screen {
        self.current
    }

    /// Move to `to`, which must directly follow the current screen.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] for backward, repeated or
    /// skipping transitions.
    pub fn advance_to(&mut self, to: Screen) -> CoreResult<()> {
        if self.current.next() != Some(to) {
            return Err(CoreError::InvalidTransition {
                from: self.current,
                to,
            });
        }
        tracing::info!("Screen {:?} -> {:?}", self.current, to);
        self.current = to;
        Ok(())
    }

    /// Whether the flow reached the last screen.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.current.next().is_none()
    }
}

impl Default for AppFlow {
    fn default() -> Self {
        Self::new()
    }
}
