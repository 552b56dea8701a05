//! Situational bonuses and the capability that aggregates them
//!
//! Bonuses are registered under feature ids. Three key shapes exist:
//! - `id` - applies to everything under that feature
//! - `id/qualifier` - applies to one named target (qualifier lower-cased)
//! - `id*` - applies to targets whose name, specialization and categories
//!   satisfy the bonus criteria

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Feature id for bonuses to a named skill
pub const SKILL_NAME_ID: &str = "skill.name";
/// Feature id for bonuses to a named spell
pub const SPELL_NAME_ID: &str = "spell.name";
/// Feature id for bonuses to a spell college
pub const SPELL_COLLEGE_ID: &str = "spell.college";
/// Feature id for bonuses to a spell power source
pub const SPELL_POWER_SOURCE_ID: &str = "spell.power_source";

/// A single lookup against the bonus registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BonusKey {
    Exact {
        id: String,
    },
    Qualified {
        id: String,
        qualifier: String,
    },
    /// Matches when the bonus criteria accept any of `names`
    Wildcard {
        id: String,
        names: Vec<String>,
        specialization: Option<String>,
    },
}

impl BonusKey {
    pub fn exact(id: &str) -> Self {
        BonusKey::Exact { id: id.to_string() }
    }

    pub fn qualified(id: &str, qualifier: &str) -> Self {
        BonusKey::Qualified {
            id: id.to_string(),
            qualifier: qualifier.to_string(),
        }
    }

    pub fn wildcard(id: &str, name: &str, specialization: Option<&str>) -> Self {
        BonusKey::Wildcard {
            id: id.to_string(),
            names: vec![name.to_string()],
            specialization: specialization.map(str::to_string),
        }
    }

    /// Wildcard lookup for a target known by several names, e.g. a spell's colleges
    pub fn wildcard_any(id: &str, names: &[String]) -> Self {
        BonusKey::Wildcard {
            id: id.to_string(),
            names: names.to_vec(),
            specialization: None,
        }
    }

    /// Registry key this lookup reads from
    pub fn feature_id(&self) -> String {
        match self {
            BonusKey::Exact { id } => id.to_lowercase(),
            BonusKey::Qualified { id, qualifier } => {
                format!("{}/{}", id, qualifier).to_lowercase()
            }
            BonusKey::Wildcard { id, .. } => format!("{}*", id).to_lowercase(),
        }
    }
}

/// Amount and explanation returned for one key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BonusContribution {
    pub amount: i32,
    pub explanation: Option<String>,
}

impl BonusContribution {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Anything that can answer bonus lookups for a character
pub trait BonusAggregator {
    fn bonus_for(&self, key: &BonusKey, categories: &[String]) -> BonusContribution;
}

/// Case-insensitive string test used by wildcard bonuses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "compare", content = "qualifier", rename_all = "snake_case")]
pub enum StringCriteria {
    #[default]
    Any,
    Is(String),
    IsNot(String),
    Contains(String),
    DoesNotContain(String),
    StartsWith(String),
    EndsWith(String),
}

impl StringCriteria {
    pub fn matches(&self, value: &str) -> bool {
        let value = value.to_lowercase();
        match self {
            StringCriteria::Any => true,
            StringCriteria::Is(q) => value == q.to_lowercase(),
            StringCriteria::IsNot(q) => value != q.to_lowercase(),
            StringCriteria::Contains(q) => value.contains(&q.to_lowercase()),
            StringCriteria::DoesNotContain(q) => !value.contains(&q.to_lowercase()),
            StringCriteria::StartsWith(q) => value.starts_with(&q.to_lowercase()),
            StringCriteria::EndsWith(q) => value.ends_with(&q.to_lowercase()),
        }
    }

    /// Match against a list of values
    ///
    /// An empty list is tested as the empty string. Negated criteria must hold
    /// for every entry; the others for at least one.
    pub fn matches_list(&self, values: &[String]) -> bool {
        if values.is_empty() {
            return self.matches("");
        }
        if self.is_negated() {
            values.iter().all(|v| self.matches(v))
        } else {
            values.iter().any(|v| self.matches(v))
        }
    }

    fn is_negated(&self) -> bool {
        matches!(
            self,
            StringCriteria::IsNot(_) | StringCriteria::DoesNotContain(_)
        )
    }
}

/// A bonus registered on a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    /// What grants the bonus (trait, equipment, ...); shown in tooltips
    pub source: String,
    /// Feature id, possibly qualified (`id/qualifier`) or wildcard (`id*`)
    pub feature: String,
    pub amount: i32,
    #[serde(default)]
    pub name: StringCriteria,
    #[serde(default)]
    pub specialization: StringCriteria,
    #[serde(default)]
    pub categories: StringCriteria,
}

impl Bonus {
    pub fn new(source: &str, feature: &str, amount: i32) -> Self {
        Self {
            source: source.to_string(),
            feature: feature.to_string(),
            amount,
            name: StringCriteria::Any,
            specialization: StringCriteria::Any,
            categories: StringCriteria::Any,
        }
    }

    pub fn with_name(mut self, criteria: StringCriteria) -> Self {
        self.name = criteria;
        self
    }

    pub fn with_specialization(mut self, criteria: StringCriteria) -> Self {
        self.specialization = criteria;
        self
    }

    pub fn with_categories(mut self, criteria: StringCriteria) -> Self {
        self.categories = criteria;
        self
    }

    /// Tooltip line for this bonus
    pub fn explanation(&self) -> String {
        format!("{} [{:+}]", self.source, self.amount)
    }

    fn matches_wildcard(
        &self,
        names: &[String],
        specialization: Option<&str>,
        categories: &[String],
    ) -> bool {
        self.name.matches_list(names)
            && self.specialization.matches(specialization.unwrap_or(""))
            && self.categories.matches_list(categories)
    }
}

/// Bonuses indexed by lower-cased feature id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Bonus>", into = "Vec<Bonus>")]
pub struct BonusRegistry {
    features: AHashMap<String, Vec<Bonus>>,
}

impl BonusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.features
            .entry(bonus.feature.to_lowercase())
            .or_default()
            .push(bonus);
    }

    pub fn with(mut self, bonus: Bonus) -> Self {
        self.add(bonus);
        self
    }

    pub fn len(&self) -> usize {
        self.features.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

impl From<Vec<Bonus>> for BonusRegistry {
    fn from(bonuses: Vec<Bonus>) -> Self {
        let mut registry = BonusRegistry::new();
        for bonus in bonuses {
            registry.add(bonus);
        }
        registry
    }
}

impl From<BonusRegistry> for Vec<Bonus> {
    fn from(registry: BonusRegistry) -> Self {
        let mut bonuses: Vec<Bonus> = registry.features.values().flatten().cloned().collect();
        bonuses.sort_by(|a, b| a.feature.cmp(&b.feature).then(a.source.cmp(&b.source)));
        bonuses
    }
}

impl BonusAggregator for BonusRegistry {
    fn bonus_for(&self, key: &BonusKey, categories: &[String]) -> BonusContribution {
        let Some(list) = self.features.get(&key.feature_id()) else {
            return BonusContribution::none();
        };

        let matching: Vec<&Bonus> = match key {
            BonusKey::Exact { .. } | BonusKey::Qualified { .. } => list.iter().collect(),
            BonusKey::Wildcard {
                names,
                specialization,
                ..
            } => list
                .iter()
                .filter(|b| b.matches_wildcard(names, specialization.as_deref(), categories))
                .collect(),
        };

        if matching.is_empty() {
            return BonusContribution::none();
        }

        BonusContribution {
            amount: matching.iter().map(|b| b.amount).sum(),
            explanation: Some(
                matching
                    .iter()
                    .map(|b| b.explanation())
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
        }
    }
}

/// Lookups for a skill: its qualified name and the skill wildcard
pub fn skill_bonus_keys(name: &str, specialization: Option<&str>) -> Vec<BonusKey> {
    vec![
        BonusKey::qualified(SKILL_NAME_ID, name),
        BonusKey::wildcard(SKILL_NAME_ID, name, specialization),
    ]
}

/// Lookups for a spell: college, power source and name, each exact, qualified and wildcard
///
/// College bonuses are matched against every college of the spell. Each
/// qualified college is looked up once, and one wildcard lookup covers all
/// colleges, so a bonus is never counted twice.
pub fn spell_bonus_keys(name: &str, colleges: &[String], power_source: &str) -> Vec<BonusKey> {
    let mut keys = vec![BonusKey::exact(SPELL_COLLEGE_ID)];
    let mut seen: Vec<String> = Vec::with_capacity(colleges.len());
    for college in colleges {
        let lower = college.to_lowercase();
        if !seen.contains(&lower) {
            keys.push(BonusKey::qualified(SPELL_COLLEGE_ID, college));
            seen.push(lower);
        }
    }
    keys.push(BonusKey::wildcard_any(SPELL_COLLEGE_ID, colleges));

    for (id, qualifier) in [(SPELL_POWER_SOURCE_ID, power_source), (SPELL_NAME_ID, name)] {
        keys.push(BonusKey::exact(id));
        keys.push(BonusKey::qualified(id, qualifier));
        keys.push(BonusKey::wildcard(id, qualifier, None));
    }
    keys
}
