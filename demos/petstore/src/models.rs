use garde::Validate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
    Bird,
}

/// A pet known to the store.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct Pet {
    pub id: u64,
    pub name: String,
    pub species: Species,
    /// Free-form tag, e.g. a collar color.
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct NewPet {
    #[garde(length(min = 1, max = 64))]
    pub name: String,
    #[garde(skip)]
    pub species: Species,
    #[garde(length(max = 32))]
    pub tag: Option<String>,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct ListParams {
    /// Maximum number of pets to return.
    #[garde(range(min = 1, max = 100))]
    pub limit: Option<u32>,
    #[garde(skip)]
    pub species: Option<Species>,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct PetId {
    /// Pet identifier.
    #[garde(range(min = 1))]
    pub id: u64,
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct ErrorBody {
    pub error: String,
}
