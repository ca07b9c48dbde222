//! Element labels and the recipes that turn a matched pair into poster content.

use serde::{Deserialize, Serialize};

use crate::ElementId;

/// Display data for one element in the pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    /// Element id in the pool.
    pub id: u32,
    /// Chemical symbol drawn on the poster badge.
    pub symbol: String,
    /// Chinese name.
    pub name: String,
}

/// Poster content for one unordered pair of elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// The two element ids, in any order.
    pub pair: [u32; 2],
    /// Reaction line.
    pub reaction: String,
    /// Usage paragraphs.
    pub usage: Vec<String>,
}

impl Recipe {
    fn covers(&self, a: u32, b: u32) -> bool {
        self.pair == [a, b] || self.pair == [b, a]
    }
}

/// Everything the poster needs for one matched pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosterData {
    /// Badge labels, in staging order.
    pub elements: Vec<String>,
    /// Reaction line.
    pub reaction: String,
    /// Usage paragraphs.
    pub usage: Vec<String>,
}

/// Lookup table from element ids to labels and from pairs to recipes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementCatalog {
    /// Known elements.
    pub elements: Vec<ElementSpec>,
    /// Known pairings.
    pub recipes: Vec<Recipe>,
}

impl ElementCatalog {
    /// Badge label for `id`, falling back to the bare number.
    #[must_use]
    pub fn label(&self, id: ElementId) -> String {
        self.elements
            .iter()
            .find(|spec| spec.id == id.get())
            .map_or_else(|| id.to_string(), |spec| spec.symbol.clone())
    }

    /// Recipe for the unordered pair `(a, b)`.
    #[must_use]
    pub fn recipe(&self, a: ElementId, b: ElementId) -> Option<&Recipe> {
        self.recipes
            .iter()
            .find(|recipe| recipe.covers(a.get(), b.get()))
    }

    /// Poster content for a matched pair.
    #[must_use]
    pub fn poster_data(&self, first: ElementId, second: ElementId) -> PosterData {
        let left = self.label(first);
        let right = self.label(second);

        match self.recipe(first, second) {
            Some(recipe) => PosterData {
                elements: vec![left, right],
                reaction: recipe.reaction.clone(),
                usage: recipe.usage.clone(),
            },
            None => {
                tracing::debug!("No recipe for {first}+{second}, using generic poster text");
                PosterData {
                    reaction: format!("{left} + {right}"),
                    usage: vec![format!("{left} 和 {right} 是一对默契的化学CP")],
                    elements: vec![left, right],
                }
            }
        }
    }
}

fn spec(id: u32, symbol: &str, name: &str) -> ElementSpec {
    ElementSpec {
        id,
        symbol: symbol.to_string(),
        name: name.to_string(),
    }
}

fn recipe(pair: [u32; 2], reaction: &str, usage: &[&str]) -> Recipe {
    Recipe {
        pair,
        reaction: reaction.to_string(),
        usage: usage.iter().map(|line| (*line).to_string()).collect(),
    }
}

impl Default for ElementCatalog {
    /// Ten elements ordered so that every adjacent pair forms a compound or alloy.
    fn default() -> Self {
        Self {
            elements: vec![
                spec(1, "H", "氢"),
                spec(2, "Cl", "氯"),
                spec(3, "Na", "钠"),
                spec(4, "O", "氧"),
                spec(5, "C", "碳"),
                spec(6, "S", "硫"),
                spec(7, "Zn", "锌"),
                spec(8, "Cu", "铜"),
                spec(9, "Sn", "锡"),
                spec(10, "Pb", "铅"),
            ],
            recipes: vec![
                recipe(
                    [1, 2],
                    "H₂ + Cl₂ → 2HCl",
                    &["胃酸的主要成分，帮助消化每一顿美食", "为金属表面除锈，让旧物焕然一新"],
                ),
                recipe(
                    [2, 3],
                    "2Na + Cl₂ → 2NaCl",
                    &["餐桌上的食盐，让生活有滋有味", "生理盐水的主角，默默守护健康"],
                ),
                recipe(
                    [3, 4],
                    "4Na + O₂ → 2Na₂O",
                    &["一见面就迫不及待地结合", "制造玻璃和陶瓷釉料的好帮手"],
                ),
                recipe(
                    [4, 5],
                    "C + O₂ → CO₂",
                    &["让汽水冒出快乐的气泡", "植物光合作用的甜蜜原料"],
                ),
                recipe(
                    [5, 6],
                    "C + 2S → CS₂",
                    &["优秀的溶剂，溶解一切隔阂", "制造粘胶纤维，织出柔软衣裳"],
                ),
                recipe(
                    [6, 7],
                    "Zn + S → ZnS",
                    &["夜光材料，在黑暗中为你发光", "荧光屏里闪烁的小星星"],
                ),
                recipe(
                    [7, 8],
                    "Cu + Zn → 黄铜",
                    &["铸成小号和萨克斯，奏响金色旋律", "门把手和钥匙，守护每一个家"],
                ),
                recipe(
                    [8, 9],
                    "Cu + Sn → 青铜",
                    &["铸造古代礼器，见证千年文明", "敲响钟声，传递悠远的思念"],
                ),
                recipe(
                    [9, 10],
                    "Sn + Pb → 焊锡",
                    &["把电子元件紧紧连在一起", "熔点低，一点温暖就能融化"],
                ),
            ],
        }
    }
}
