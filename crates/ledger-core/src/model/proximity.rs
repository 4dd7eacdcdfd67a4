use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityCategory {
    Foundation,
    Intermediary,
    Community,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityEntity {
    pub id: String,
    pub name: String,
    pub category: EntityCategory,
    pub size: f64,
    pub color: String,
}

/// Entities grouped the way they are drawn: funders, go-betweens, communities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProximityEntities {
    #[serde(default)]
    pub foundations: Vec<ProximityEntity>,
    #[serde(default)]
    pub intermediaries: Vec<ProximityEntity>,
    #[serde(default)]
    pub communities: Vec<ProximityEntity>,
}

impl ProximityEntities {
    pub fn iter(&self) -> impl Iterator<Item = &ProximityEntity> {
        self.foundations
            .iter()
            .chain(self.intermediaries.iter())
            .chain(self.communities.iter())
    }

    pub fn get(&self, id: &str) -> Option<&ProximityEntity> {
        self.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.foundations.len() + self.intermediaries.len() + self.communities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityConnection {
    pub source: String,
    pub target: String,
    pub strength: f64,
    #[serde(default = "default_direct")]
    pub direct: bool,
}

fn default_direct() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthChange {
    pub source: String,
    pub target: String,
    pub new_strength: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityIntervention {
    pub id: String,
    pub name: String,
    pub description: String,
    pub impact: f64,
    #[serde(default)]
    pub transformations: Vec<StrengthChange>,
}
