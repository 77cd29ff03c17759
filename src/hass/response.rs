use crate::model::{EntityState, StateSnapshot};
use serde::Deserialize;

/* Element of `GET /api/states` */
#[derive(Deserialize)]
pub struct StateRecord {
    pub entity_id: String,
    #[serde(flatten)]
    pub state: EntityState,
}

#[derive(Deserialize)]
#[serde(transparent)]
pub struct GetStates {
    pub data: Vec<StateRecord>,
}

impl From<GetStates> for StateSnapshot {
    fn from(response: GetStates) -> Self {
        response
            .data
            .into_iter()
            .map(|record| (record.entity_id, record.state))
            .collect()
    }
}
