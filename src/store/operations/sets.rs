use crate::model::VocabSet;
use crate::store::keys;
use crate::store::{Store, StoreError};

impl Store {
    /// Idempotent overwrite of the owner's whole collection, last write wins.
    pub fn save_sets(&self, owner_id: &str, sets: &[VocabSet]) -> Result<(), StoreError> {
        let key = keys::sets_key(owner_id);
        self.sets.insert(key.as_bytes(), Self::serialize(&sets)?)?;
        Ok(())
    }

    pub fn load_sets(&self, owner_id: &str) -> Result<Vec<VocabSet>, StoreError> {
        let key = keys::sets_key(owner_id);
        match self.sets.get(key.as_bytes())? {
            Some(raw) => Ok(Self::deserialize(&raw)?),
            None => Ok(Vec::new()),
        }
    }
}
