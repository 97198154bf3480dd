// Name-keyed registry of actuated and passive bodies, built once at startup.

use std::collections::BTreeMap;

use crate::domain::errors::SimError;
use crate::domain::ports::SimBody;

pub type BoxedBody<P> = Box<dyn SimBody<P>>;

/// Owns every body handle for the lifetime of the process.
///
/// Names are unique across both maps. Iteration is sorted by name, which
/// gives snapshots a stable order without tracking insertion.
pub struct EntityRegistry<P> {
    actuated: BTreeMap<String, BoxedBody<P>>,
    passive: BTreeMap<String, BoxedBody<P>>,
}

impl<P> Default for EntityRegistry<P> {
    fn default() -> Self {
        Self {
            actuated: BTreeMap::new(),
            passive: BTreeMap::new(),
        }
    }
}

impl<P> EntityRegistry<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_actuated(&mut self, body: BoxedBody<P>) -> Result<(), SimError> {
        let name = self.claim_name(body.name())?;
        self.actuated.insert(name, body);
        Ok(())
    }

    pub fn insert_passive(&mut self, body: BoxedBody<P>) -> Result<(), SimError> {
        let name = self.claim_name(body.name())?;
        self.passive.insert(name, body);
        Ok(())
    }

    fn claim_name(&self, name: &str) -> Result<String, SimError> {
        if self.actuated.contains_key(name) || self.passive.contains_key(name) {
            return Err(SimError::DuplicateBody(name.to_string()));
        }
        Ok(name.to_string())
    }

    pub fn actuated(&self, name: &str) -> Option<&dyn SimBody<P>> {
        self.actuated.get(name).map(|b| b.as_ref())
    }

    // Actuated bodies shadow passive ones, though names never collide.
    pub fn lookup(&self, name: &str) -> Option<&dyn SimBody<P>> {
        self.actuated
            .get(name)
            .or_else(|| self.passive.get(name))
            .map(|b| b.as_ref())
    }

    /// Every body in snapshot order: actuated first, then passive.
    pub fn iter(&self) -> impl Iterator<Item = &dyn SimBody<P>> {
        self.actuated
            .values()
            .chain(self.passive.values())
            .map(|b| b.as_ref())
    }

    pub fn len(&self) -> usize {
        self.actuated.len() + self.passive.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{TallyCar, TallyProp, TallyWorld};

    fn registry() -> EntityRegistry<TallyWorld> {
        let mut registry = EntityRegistry::new();
        registry
            .insert_passive(Box::new(TallyProp::new("crate", 1)))
            .expect("expected insert");
        registry
            .insert_actuated(Box::new(TallyCar::new("zeta", 0)))
            .expect("expected insert");
        registry
            .insert_actuated(Box::new(TallyCar::new("alpha", 2)))
            .expect("expected insert");
        registry
    }

    #[test]
    fn when_iterating_then_actuated_bodies_come_before_passive_in_name_order() {
        let registry = registry();
        let names: Vec<&str> = registry.iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["alpha", "zeta", "crate"]);
    }

    #[test]
    fn when_name_is_reused_across_maps_then_insert_returns_duplicate_body() {
        let mut registry = registry();
        let result = registry.insert_passive(Box::new(TallyProp::new("alpha", 3)));
        assert_eq!(result, Err(SimError::DuplicateBody("alpha".to_string())));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn when_lookup_targets_passive_body_then_it_is_found() {
        let registry = registry();
        assert_eq!(registry.lookup("crate").map(|b| b.name()), Some("crate"));
        assert!(registry.actuated("crate").is_none());
        assert!(registry.lookup("ghost").is_none());
    }
}
