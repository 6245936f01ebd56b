//! The JSON input bundle: one configuration plus one dog.

use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::dog::Dog;
use crate::error::{ModelError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub config: Configuration,
    pub dog: Dog,
}

impl Snapshot {
    /// Parse and validate a snapshot.
    pub fn from_json(text: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(text)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Structural checks the engine relies on: every configured name is
    /// non-blank and every date window is ordered. Dangling references
    /// from runs into the configuration are allowed; the engine skips them.
    pub fn validate(&self) -> Result<()> {
        require_name("dog", &self.dog.call_name, "call name")?;
        for venue in &self.config.venues {
            require_name("venue", &venue.name, "configuration")?;
            for division in &venue.divisions {
                require_name("division", &division.name, &venue.name)?;
                for level in &division.levels {
                    require_name("level", &level.name, &format!("{}/{}", venue.name, division.name))?;
                }
            }
            for event in &venue.events {
                require_name("event", &event.name, &venue.name)?;
                for method in &event.scorings {
                    method.valid.validate()?;
                }
            }
            for multi_q in &venue.multi_qs {
                require_name("multiQ", &multi_q.name, &venue.name)?;
                multi_q.valid.validate()?;
            }
        }
        for def in &self.config.other_points {
            require_name("other points", &def.name, "configuration")?;
        }
        Ok(())
    }
}

fn require_name(kind: &'static str, name: &str, context: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ModelError::BlankName {
            kind,
            context: context.to_string(),
        });
    }
    Ok(())
}
