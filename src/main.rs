//! GURPS Proficiency - Entry Point
//!
//! Loads a character sheet, resolves every skill, spell and Ritual Magic
//! spell on it, and prints the levels as a text table or JSON.

use clap::Parser;
use gurps_proficiency::core::config::{set_config, EngineConfig};
use gurps_proficiency::core::error::Result;
use gurps_proficiency::sheet::{load_sheet, Character};
use gurps_proficiency::skills::{format_level, format_relative_level, SkillLevel};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Resolve skill and spell levels for a character sheet
#[derive(Parser, Debug)]
#[command(name = "gurps-proficiency")]
#[command(about = "Resolve skill, spell and Ritual Magic spell levels for a character sheet")]
struct Args {
    /// Character sheet (TOML)
    sheet: PathBuf,

    /// Engine configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Print the bonus breakdown under each entry
    #[arg(long)]
    tooltips: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// One resolved row of the report
#[derive(Debug, Serialize)]
struct ReportRow {
    kind: &'static str,
    name: String,
    difficulty: String,
    points: i32,
    relative: String,
    #[serde(flatten)]
    level: SkillLevel,
}

/// JSON output structure
#[derive(Debug, Serialize)]
struct Report {
    character: String,
    template: bool,
    rows: Vec<ReportRow>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "gurps_proficiency=debug"
    } else {
        "gurps_proficiency=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &args.config {
        let config = EngineConfig::load(path)?;
        if set_config(config).is_err() {
            tracing::warn!("Engine config already initialized; ignoring {}", path.display());
        }
    }

    let character = load_sheet(&args.sheet)?;
    let report = build_report(&character)?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        other => {
            if other != "text" {
                tracing::warn!("Unknown format {:?}, falling back to text", other);
            }
            print_text(&report, args.tooltips);
        }
    }

    Ok(())
}

/// Resolve every entry on the sheet
///
/// Each list is resolved in parallel.
fn build_report(character: &Character) -> Result<Report> {
    let skills = character
        .skills
        .par_iter()
        .map(|skill| -> Result<ReportRow> {
            let level = skill.resolve(&character.context())?;
            Ok(ReportRow {
                kind: "skill",
                name: skill.full_name(),
                difficulty: format!("{}/{}", skill.attribute.to_uppercase(), skill.difficulty),
                points: skill.points,
                relative: format_relative_level(&skill.attribute.to_uppercase(), &level),
                level,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let spells = character
        .spells
        .par_iter()
        .map(|spell| -> Result<ReportRow> {
            let level = spell.resolve(&character.context())?;
            Ok(ReportRow {
                kind: "spell",
                name: spell.name.clone(),
                difficulty: format!("{}/{}", spell.attribute.to_uppercase(), spell.difficulty),
                points: spell.points,
                relative: format_relative_level(&spell.attribute.to_uppercase(), &level),
                level,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let ritual_spells = character
        .ritual_spells
        .par_iter()
        .map(|spell| -> Result<ReportRow> {
            let level = spell.resolve(&character.context())?;
            Ok(ReportRow {
                kind: "ritual",
                name: spell.name.clone(),
                difficulty: spell.difficulty.to_string(),
                points: spell.points,
                relative: format_relative_level(&spell.base_skill, &level),
                level,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut rows = skills;
    rows.extend(spells);
    rows.extend(ritual_spells);

    Ok(Report {
        character: character.name.clone(),
        template: character.template,
        rows,
    })
}

fn print_text(report: &Report, tooltips: bool) {
    println!("\n=== {} ===", report.character);
    if report.template {
        println!("(template - no levels)");
    }
    println!();
    println!(
        "{:<7} {:<32} {:<7} {:>4} {:>6}  {}",
        "Kind", "Name", "Diff", "Pts", "Level", "Relative"
    );
    for row in &report.rows {
        println!(
            "{:<7} {:<32} {:<7} {:>4} {:>6}  {}",
            row.kind,
            row.name,
            row.difficulty,
            row.points,
            format_level(&row.level),
            row.relative
        );
        if tooltips {
            for line in row.level.tooltip.lines() {
                println!("        {}", line);
            }
        }
    }
    println!();
}
