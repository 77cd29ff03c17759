pub type Endpoint = str;

pub const STATES: &Endpoint = "/api/states";
