//! Game configuration.
//!
//! Every field has a default matching the shipped game, so a JSON document
//! only needs the keys it wants to override.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::story::default_stages;
use crate::{CoreError, CoreResult, ElementCatalog, ElementId, Stage};

/// Rule deciding whether two staged elements form a valid pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchRule {
    /// Ids that differ by exactly one match.
    #[default]
    Adjacent,
    /// Only the listed unordered pairs match.
    Pairs {
        /// Matching id pairs.
        pairs: Vec<[u32; 2]>,
    },
}

impl MatchRule {
    /// Apply the rule.
    #[must_use]
    pub fn matches(&self, a: ElementId, b: ElementId) -> bool {
        let (a, b) = (a.get(), b.get());
        match self {
            Self::Adjacent => a.abs_diff(b) == 1,
            Self::Pairs { pairs } => pairs.iter().any(|&pair| pair == [a, b] || pair == [b, a]),
        }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of draggable elements, ids `1..=element_count`.
    pub element_count: u32,
    /// Pairing rule.
    pub match_rule: MatchRule,
    /// How long the success card stays up, in milliseconds.
    pub success_notice_ms: u64,
    /// Simulated asset preload delay, in milliseconds.
    pub preload_delay_ms: u64,
    /// Audio cue played on a successful match.
    pub success_sound: String,
    /// Base path for story backgrounds.
    pub image_base: String,
    /// Story stages.
    pub stages: Vec<Stage>,
    /// Labels and poster recipes.
    pub catalog: ElementCatalog,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            element_count: 10,
            match_rule: MatchRule::Adjacent,
            success_notice_ms: 3000,
            preload_delay_ms: 1500,
            success_sound: "/sounds/success.mp3".to_string(),
            image_base: "public/images".to_string(),
            stages: default_stages(),
            catalog: ElementCatalog::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the result fails
    /// [`validate`](Self::validate).
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> CoreResult<()> {
        if self.element_count < 2 {
            return Err(CoreError::InvalidConfig(format!(
                "element_count must be at least 2, got {}",
                self.element_count
            )));
        }
        if self.stages.is_empty() {
            return Err(CoreError::InvalidConfig(
                "at least one story stage is required".to_string(),
            ));
        }
        let in_pool = |id: u32| (1..=self.element_count).contains(&id);
        if let MatchRule::Pairs { pairs } = &self.match_rule {
            if let Some(pair) = pairs.iter().find(|pair| !pair.iter().all(|&id| in_pool(id))) {
                return Err(CoreError::InvalidConfig(format!(
                    "match pair {pair:?} is outside the element pool"
                )));
            }
        }
        if let Some(recipe) = self
            .catalog
            .recipes
            .iter()
            .find(|recipe| !recipe.pair.iter().all(|&id| in_pool(id)))
        {
            return Err(CoreError::InvalidConfig(format!(
                "recipe {:?} is outside the element pool",
                recipe.pair
            )));
        }
        Ok(())
    }

    /// Element ids in the pool.
    pub fn element_ids(&self) -> impl Iterator<Item = ElementId> {
        (1..=self.element_count).map(ElementId::new)
    }

    /// Success card lifetime.
    #[must_use]
    pub fn success_notice_duration(&self) -> Duration {
        Duration::from_millis(self.success_notice_ms)
    }

    /// Preload delay.
    #[must_use]
    pub fn preload_delay(&self) -> Duration {
        Duration::from_millis(self.preload_delay_ms)
    }

    /// URL of a story background.
    #[must_use]
    pub fn background_url(&self, file: &str) -> String {
        format!("{}/{file}", self.image_base.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.element_ids().count(), 10);
        assert_eq!(config.success_notice_duration(), Duration::from_millis(3000));
        assert_eq!(config.preload_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{"success_notice_ms": 1000}"#).expect("parse");
        assert_eq!(config.success_notice_ms, 1000);
        assert_eq!(config.element_count, 10);
        assert_eq!(config.match_rule, MatchRule::Adjacent);
        assert_eq!(config.stages.len(), 3);
    }

    #[test]
    fn recipes_outside_pool_are_rejected() {
        // Default recipes reach id 10.
        let result = GameConfig::from_json(r#"{"element_count": 4}"#);
        assert!(matches!(result, Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn explicit_pairs_rule_parses() {
        let json = r#"{"match_rule": {"type": "pairs", "pairs": [[2, 3], [1, 9]]}}"#;
        let config = GameConfig::from_json(json).expect("parse");
        assert!(config.match_rule.matches(ElementId::new(9), ElementId::new(1)));
        assert!(!config.match_rule.matches(ElementId::new(1), ElementId::new(2)));
    }

    #[test]
    fn adjacent_rule() {
        let rule = MatchRule::Adjacent;
        assert!(rule.matches(ElementId::new(3), ElementId::new(4)));
        assert!(rule.matches(ElementId::new(4), ElementId::new(3)));
        assert!(!rule.matches(ElementId::new(3), ElementId::new(5)));
        assert!(!rule.matches(ElementId::new(3), ElementId::new(3)));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        assert!(matches!(
            GameConfig::from_json("{ nope"),
            Err(CoreError::Serialization(_))
        ));
    }

    #[test]
    fn background_url_joins_base() {
        let config = GameConfig {
            image_base: "assets/".to_string(),
            ..GameConfig::default()
        };
        assert_eq!(config.background_url("a.webp"), "assets/a.webp");
    }
}
