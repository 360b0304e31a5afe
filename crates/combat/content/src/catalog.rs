//! In-memory stat catalog.

use std::collections::HashMap;

use combat_core::env::{
    ConsumableDefinition, EquipmentDefinition, PassiveDefinition, SkillDefinition, StatCatalog,
};
use combat_core::state::{ItemId, PassiveId, SkillId};

/// Lookup tables for everything the stat aggregator and resolver read.
///
/// Filled programmatically with the `with_*` builders or from RON files via
/// [`crate::loaders::CatalogLoader`]. Lookups stay tolerant by the trait's
/// contract: an id the catalog does not know simply resolves to `None`.
#[derive(Debug, Default)]
pub struct ContentCatalog {
    equipment: HashMap<ItemId, EquipmentDefinition>,
    skills: HashMap<SkillId, SkillDefinition>,
    passives: HashMap<PassiveId, PassiveDefinition>,
    consumables: HashMap<ItemId, ConsumableDefinition>,
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_equipment(mut self, def: EquipmentDefinition) -> Self {
        self.equipment.insert(def.id, def);
        self
    }

    pub fn with_skill(mut self, def: SkillDefinition) -> Self {
        self.skills.insert(def.id, def);
        self
    }

    pub fn with_passive(mut self, def: PassiveDefinition) -> Self {
        self.passives.insert(def.id, def);
        self
    }

    pub fn with_consumable(mut self, def: ConsumableDefinition) -> Self {
        self.consumables.insert(def.id, def);
        self
    }

    pub fn extend_equipment(&mut self, defs: impl IntoIterator<Item = EquipmentDefinition>) {
        self.equipment.extend(defs.into_iter().map(|d| (d.id, d)));
    }

    pub fn extend_skills(&mut self, defs: impl IntoIterator<Item = SkillDefinition>) {
        self.skills.extend(defs.into_iter().map(|d| (d.id, d)));
    }

    pub fn extend_passives(&mut self, defs: impl IntoIterator<Item = PassiveDefinition>) {
        self.passives.extend(defs.into_iter().map(|d| (d.id, d)));
    }

    pub fn extend_consumables(&mut self, defs: impl IntoIterator<Item = ConsumableDefinition>) {
        self.consumables.extend(defs.into_iter().map(|d| (d.id, d)));
    }

    pub fn len(&self) -> usize {
        self.equipment.len() + self.skills.len() + self.passives.len() + self.consumables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StatCatalog for ContentCatalog {
    fn equipment(&self, id: ItemId) -> Option<&EquipmentDefinition> {
        self.equipment.get(&id)
    }

    fn skill(&self, id: SkillId) -> Option<&SkillDefinition> {
        self.skills.get(&id)
    }

    fn passive(&self, id: PassiveId) -> Option<&PassiveDefinition> {
        self.passives.get(&id)
    }

    fn consumable(&self, id: ItemId) -> Option<&ConsumableDefinition> {
        self.consumables.get(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::action::ActionProfile;
    use combat_core::stats::{Bonus, StatKind};

    #[test]
    fn known_ids_resolve_and_unknown_ids_miss() {
        let catalog = ContentCatalog::new()
            .with_equipment(EquipmentDefinition {
                id: ItemId(1),
                name: "rusty blade".into(),
                bonuses: vec![combat_core::env::StatBonus {
                    stat: StatKind::Attack,
                    bonus: Bonus::Flat(3),
                }],
            })
            .with_skill(SkillDefinition {
                id: SkillId(7),
                name: "ember".into(),
                profile: ActionProfile::physical(90),
            });

        assert!(catalog.equipment(ItemId(1)).is_some());
        assert!(catalog.equipment(ItemId(2)).is_none());
        assert_eq!(catalog.skill(SkillId(7)).unwrap().name, "ember");
        assert!(catalog.passive(PassiveId(1)).is_none());
        assert_eq!(catalog.len(), 2);
    }
}
