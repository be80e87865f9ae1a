//! Resource definition validation: unique routing keys and self-consistent fields.

use crate::config::types::{ResourceDef, CREATED_AT};
use crate::error::ConfigError;
use chrono::Utc;
use std::collections::HashSet;

pub fn validate(resources: &[ResourceDef]) -> Result<(), ConfigError> {
    let mut path_segments = HashSet::new();
    let mut collections = HashSet::new();

    for r in resources {
        if !path_segments.insert(r.path_segment.as_str()) {
            return Err(ConfigError::DuplicatePathSegment(r.path_segment.clone()));
        }
        if !collections.insert(r.collection.as_str()) {
            return Err(ConfigError::DuplicateCollection(r.collection.clone()));
        }

        let mut names = HashSet::new();
        for f in &r.fields {
            for input in f.input_names() {
                if input == CREATED_AT || !names.insert(input) {
                    return Err(ConfigError::DuplicateField {
                        resource: r.name.clone(),
                        field: input.to_string(),
                    });
                }
            }
        }

        if r.required_fields().next().is_none() {
            return Err(ConfigError::NoRequiredFields(r.name.clone()));
        }

        if let Some(sort) = &r.sort {
            if sort.field != CREATED_AT && r.field(&sort.field).is_none() {
                return Err(ConfigError::UnknownSortField {
                    resource: r.name.clone(),
                    field: sort.field.clone(),
                });
            }
        }

        if let Some(seed) = r.seed {
            validate_seed(r, seed)?;
        }
    }

    Ok(())
}

fn validate_seed(r: &ResourceDef, seed: crate::config::SeedFn) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidSeed {
        resource: r.name.clone(),
        reason,
    };
    let samples = seed(Utc::now()).map_err(|e| invalid(e.to_string()))?;
    if samples.is_empty() {
        return Err(invalid("seed produced no samples".into()));
    }
    for doc in &samples {
        for f in r.required_fields() {
            if !doc.contains_key(&f.name) {
                return Err(invalid(format!("sample lacks '{}'", f.name)));
            }
        }
        if !doc.contains_key(CREATED_AT) {
            return Err(invalid(format!("sample lacks '{}'", CREATED_AT)));
        }
    }
    Ok(())
}
