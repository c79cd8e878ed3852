use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One area reference inside a track sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaCollection {
    #[serde(rename = "name")]
    pub area_name: String,
}

impl AreaCollection {
    pub fn new(area_name: impl Into<String>) -> Self {
        Self {
            area_name: area_name.into(),
        }
    }
}

/// Ordered path through the area graph. Entry order is the travel order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NtracsTrack {
    #[serde(default)]
    pub areas: Vec<AreaCollection>,
}

impl NtracsTrack {
    pub fn contains_area(&self, area_id: &str) -> bool {
        self.areas.iter().any(|entry| entry.area_name == area_id)
    }
}

pub type TrackMap = IndexMap<String, Rc<NtracsTrack>>;
