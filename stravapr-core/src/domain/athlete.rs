use super::ids::{AthleteId, GearId};
use serde::{Deserialize, Serialize};

/// A bike owned by the athlete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bike {
    pub id: GearId,
    pub name: String,
}

/// The authenticated athlete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    pub id: AthleteId,
    /// Empty when the profile lists no bikes.
    pub bikes: Vec<Bike>,
}

impl Athlete {
    pub fn new(id: AthleteId) -> Self {
        Self {
            id,
            bikes: Vec::new(),
        }
    }

    pub fn with_bike(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.bikes.push(Bike {
            id: GearId::new(id),
            name: name.into(),
        });
        self
    }
}
