//! GURPS Proficiency - skill and spell level resolution for character sheets

pub mod core;
pub mod sheet;
pub mod skills;
