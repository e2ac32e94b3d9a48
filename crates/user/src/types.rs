use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Self-reported activity level from user settings
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

/// Profile-level user data consumed by the scorer.
///
/// `dietary_preferences` are soft signals (tag names the user likes seeing);
/// hard restrictions live on [`UserSettings`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub level: u32,
    pub dietary_preferences: Vec<String>,
}

/// Settings-level user data: hard dietary restrictions and calorie targeting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserSettings {
    pub dietary_restrictions: Vec<DietaryRestriction>,
    pub daily_calorie_target: Option<u32>,
    pub activity_level: ActivityLevel,
}

/// One day of the user's calorie log
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CalorieLog {
    pub consumed: u32,
    pub goal: Option<u32>,
}

/// Hard dietary restriction vocabulary.
///
/// Restrictions are inclusion requirements: a recipe must carry the matching
/// tag to be shown at all. The vocabulary splits into a lifestyle-preference
/// set (vegan, keto, ...) and an allergen/compliance set (nut-free, halal,
/// ...); both behave identically in filtering, the split only matters to
/// settings UI grouping.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantArray,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum DietaryRestriction {
    Vegetarian,
    Vegan,
    Pescatarian,
    Keto,
    Paleo,
    LowCarb,
    Mediterranean,
    GlutenFree,
    DairyFree,
    NutFree,
    SoyFree,
    EggFree,
    ShellfishFree,
    Halal,
    Kosher,
}

/// Legacy restriction ids still present in older user settings rows.
///
/// Maps old spellings to the canonical kebab-case id understood by
/// [`DietaryRestriction::parse`].
const RESTRICTION_ALIASES: &[(&str, DietaryRestriction)] = &[
    ("no-gluten", DietaryRestriction::GlutenFree),
    ("lactose-free", DietaryRestriction::DairyFree),
    ("no-dairy", DietaryRestriction::DairyFree),
    ("no-nuts", DietaryRestriction::NutFree),
    ("no-eggs", DietaryRestriction::EggFree),
    ("no-soy", DietaryRestriction::SoyFree),
    ("no-shellfish", DietaryRestriction::ShellfishFree),
    ("ketogenic", DietaryRestriction::Keto),
    ("plant-based", DietaryRestriction::Vegan),
];

impl DietaryRestriction {
    /// Canonical tag name a recipe must carry to satisfy this restriction
    pub fn tag_name(&self) -> &'static str {
        match self {
            DietaryRestriction::Vegetarian => "vegetarian",
            DietaryRestriction::Vegan => "vegan",
            DietaryRestriction::Pescatarian => "pescatarian",
            DietaryRestriction::Keto => "keto",
            DietaryRestriction::Paleo => "paleo",
            DietaryRestriction::LowCarb => "low-carb",
            DietaryRestriction::Mediterranean => "mediterranean",
            DietaryRestriction::GlutenFree => "gluten-free",
            DietaryRestriction::DairyFree => "dairy-free",
            DietaryRestriction::NutFree => "nut-free",
            DietaryRestriction::SoyFree => "soy-free",
            DietaryRestriction::EggFree => "egg-free",
            DietaryRestriction::ShellfishFree => "shellfish-free",
            DietaryRestriction::Halal => "halal",
            DietaryRestriction::Kosher => "kosher",
        }
    }

    /// Whether this restriction is a lifestyle preference (vegan, keto, ...)
    /// as opposed to an allergen/compliance rule
    pub fn is_lifestyle(&self) -> bool {
        matches!(
            self,
            DietaryRestriction::Vegetarian
                | DietaryRestriction::Vegan
                | DietaryRestriction::Pescatarian
                | DietaryRestriction::Keto
                | DietaryRestriction::Paleo
                | DietaryRestriction::LowCarb
                | DietaryRestriction::Mediterranean
        )
    }

    /// Parse a restriction id, tolerating legacy spellings.
    ///
    /// Input is lowercased and underscores/spaces become hyphens before
    /// matching, so `"Gluten_Free"`, `"gluten free"` and `"gluten-free"` all
    /// resolve. Unknown ids return `None`; callers decide whether to skip or
    /// reject.
    pub fn parse(raw: &str) -> Option<DietaryRestriction> {
        let normalized = raw.trim().to_lowercase().replace(['_', ' '], "-");
        if let Ok(restriction) = normalized.parse::<DietaryRestriction>() {
            return Some(restriction);
        }
        RESTRICTION_ALIASES
            .iter()
            .find(|(alias, _)| *alias == normalized)
            .map(|(_, restriction)| *restriction)
    }
}
