// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use mappatura_domain::{
    Representative, Territory, TerritoryData, validate_representative, validate_territory,
};
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;

/// Reference data loaded into an empty database.
///
/// The JSON layout is the territory tables side by side with the
/// representatives:
///
/// ```json
/// { "regions": [], "provinces": [], "municipalities": [],
///   "districts": [], "sections": [], "representatives": [] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Territorial tables.
    #[serde(flatten)]
    pub territory: TerritoryData,
    /// Representative candidates.
    #[serde(default)]
    pub representatives: Vec<Representative>,
}

impl ReferenceData {
    /// Parses reference data from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks the structural rules of the territory and every representative.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), PersistenceError> {
        let territory: Territory = Territory::new(self.territory.clone());
        validate_territory(&territory)
            .map_err(|e| PersistenceError::InvalidReferenceData(e.to_string()))?;

        let mut seen = std::collections::HashSet::new();
        for representative in &self.representatives {
            if !seen.insert(representative.id) {
                return Err(PersistenceError::InvalidReferenceData(format!(
                    "duplicate representative identifier {}",
                    representative.id
                )));
            }
            validate_representative(&territory, representative)
                .map_err(|e| PersistenceError::InvalidReferenceData(e.to_string()))?;
        }
        Ok(())
    }
}
