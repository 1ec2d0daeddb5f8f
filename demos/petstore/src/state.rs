use crate::models::{NewPet, Pet};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct PetStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    pets: BTreeMap<u64, Pet>,
}

impl PetStore {
    pub async fn list(&self) -> Vec<Pet> {
        self.inner.read().await.pets.values().cloned().collect()
    }

    pub async fn get(&self, id: u64) -> Option<Pet> {
        self.inner.read().await.pets.get(&id).cloned()
    }

    pub async fn insert(&self, new: NewPet) -> Pet {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let pet = Pet {
            id: inner.next_id,
            name: new.name,
            species: new.species,
            tag: new.tag,
        };
        inner.pets.insert(pet.id, pet.clone());
        pet
    }

    pub async fn remove(&self, id: u64) -> Option<Pet> {
        self.inner.write().await.pets.remove(&id)
    }
}
