//! Linear dialog story shown before the pairing game.
//!
//! ```text
//! Idle --start()--> Showing(0) --next()--> Showing(1) ... Showing(last) --next()--> Complete
//! ```

use serde::{Deserialize, Serialize};

use crate::{CompletionSignal, CoreError, CoreResult};

/// Where a dialog bubble sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogPosition {
    /// Left-aligned bubble.
    Left,
    /// Right-aligned bubble.
    Right,
    /// Centred bubble.
    Center,
}

impl DialogPosition {
    /// CSS class used for the bubble.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Center => "center",
        }
    }
}

/// One line of dialog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dialog {
    /// Speaking character.
    pub character: String,
    /// What they say.
    pub text: String,
    /// Bubble placement.
    pub position: DialogPosition,
}

impl Dialog {
    /// Create a dialog line.
    #[must_use]
    pub fn new(character: &str, text: &str, position: DialogPosition) -> Self {
        Self {
            character: character.to_string(),
            text: text.to_string(),
            position,
        }
    }
}

/// One step of the story: a background and its dialog lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// Background image file name.
    pub background: String,
    /// Dialog lines in display order.
    pub dialogs: Vec<Dialog>,
}

/// Story controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoryState {
    /// Not started.
    Idle,
    /// Showing the stage at this index.
    Showing(usize),
    /// Past the last stage.
    Complete,
}

/// The stages shipped with the game.
#[must_use]
pub fn default_stages() -> Vec<Stage> {
    use DialogPosition::{Center, Left, Right};

    vec![
        Stage {
            background: "lab_intro.webp".to_string(),
            dialogs: vec![
                Dialog::new("博士", "元素们因单身不稳定，请帮它们配对！", Left),
                Dialog::new("钠(Na)", "我易燃易爆炸，需要冷静的伴侣...", Right),
            ],
        },
        Stage {
            background: "elements_meet.webp".to_string(),
            dialogs: vec![
                Dialog::new("氯(Cl)", "我能灭火，但独自有毒...", Left),
                Dialog::new("氢(H)", "我轻盈自由，寻找能稳定我的伙伴", Right),
            ],
        },
        Stage {
            background: "pairing_intro.webp".to_string(),
            dialogs: vec![Dialog::new(
                "氧(O)",
                "滑动我们，创造奇妙的化学爱情！",
                Center,
            )],
        },
    ]
}

/// Walks the player through the story stages.
#[derive(Debug)]
pub struct StoryController {
    stages: Vec<Stage>,
    state: StoryState,
    completed: CompletionSignal<()>,
}

impl StoryController {
    /// Create a controller over `stages`.
    ///
    /// # Errors
    ///
    /// Returns an error if `stages` is empty.
    pub fn new(stages: Vec<Stage>) -> CoreResult<Self> {
        if stages.is_empty() {
            return Err(CoreError::InvalidConfig(
                "story needs at least one stage".to_string(),
            ));
        }
        Ok(Self {
            stages,
            state: StoryState::Idle,
            completed: CompletionSignal::new(),
        })
    }

    /// Register the completion listener.
    pub fn on_complete(&mut self, listener: impl FnMut(()) + 'static) {
        self.completed.connect(listener);
    }

    /// Show the first stage. Restarts the story from any state.
    pub fn start(&mut self) -> &Stage {
        self.state = StoryState::Showing(0);
        self.completed.rearm();
        tracing::debug!("Story started with {} stages", self.stages.len());
        &self.stages[0]
    }

    /// Advance to the next stage.
    ///
    /// Returns the stage to render, or `None` once the story is complete.
    /// Past the last stage the completion signal fires exactly once; calls
    /// while idle or complete do nothing.
    pub fn next(&mut self) -> Option<&Stage> {
        let StoryState::Showing(index) = self.state else {
            return None;
        };

        let following = index + 1;
        if following < self.stages.len() {
            self.state = StoryState::Showing(following);
            tracing::debug!("Story stage {following}");
            self.stages.get(following)
        } else {
            self.state = StoryState::Complete;
            tracing::info!("Story complete");
            self.completed.emit(());
            None
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> StoryState {
        self.state
    }

    /// Stage being shown, if any.
    #[must_use]
    pub fn current_stage(&self) -> Option<&Stage> {
        match self.state {
            StoryState::Showing(index) => self.stages.get(index),
            StoryState::Idle | StoryState::Complete => None,
        }
    }

    /// Number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}
