//! Load character sheets from TOML files

use crate::core::error::{ProficiencyError, Result};
use crate::sheet::Character;
use std::fs;
use std::path::Path;

/// Load and validate a character sheet
pub fn load_sheet(path: &Path) -> Result<Character> {
    let content = fs::read_to_string(path)?;
    let character = parse_sheet(&content)?;
    tracing::info!(
        "Loaded {} from {}: {} skills, {} spells, {} ritual spells, {} bonuses",
        character.name,
        path.display(),
        character.skills.len(),
        character.spells.len(),
        character.ritual_spells.len(),
        character.bonuses.len()
    );
    Ok(character)
}

/// Parse and validate a character sheet from TOML text
pub fn parse_sheet(content: &str) -> Result<Character> {
    let mut character: Character = toml::from_str(content)?;
    character.normalize_attributes();
    validate_sheet(&character)?;
    Ok(character)
}

/// Reject entries the resolvers would refuse anyway
fn validate_sheet(character: &Character) -> Result<()> {
    let points = character
        .skills
        .iter()
        .map(|s| s.points)
        .chain(character.spells.iter().map(|s| s.points))
        .chain(character.ritual_spells.iter().map(|s| s.points));
    for value in points {
        crate::skills::normalize_points(value)?;
    }

    for spell in &character.ritual_spells {
        if spell.prerequisite_count < 0 {
            return Err(ProficiencyError::InvalidInput {
                field: "prerequisite_count",
                value: spell.prerequisite_count,
                reason: "prerequisite spell count must not be negative",
            });
        }
    }

    Ok(())
}
