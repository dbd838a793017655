// src/dedup/planner.rs

use crate::domain::property::{GroupKey, Property, PropertyField};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A set of properties sharing one normalized key, sorted so the survivor
/// comes first and the losers follow in merge order.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    pub key: GroupKey,
    pub members: Vec<Property>,
}

/// What merging one group will do, computed before anything is written.
#[derive(Debug, Clone)]
pub struct MergePlan {
    pub key: GroupKey,
    /// Survivor with every missing field already filled in.
    pub merged: Property,
    /// Fields that differ from the survivor as stored.
    pub filled: Vec<PropertyField>,
    pub losers: Vec<Property>,
}

/// Survivor ordering: higher completeness, then APN present, then the
/// lexicographically smaller id.
pub fn survivor_order(a: &Property, b: &Property) -> Ordering {
    b.completeness()
        .cmp(&a.completeness())
        .then_with(|| b.apn.is_some().cmp(&a.apn.is_some()))
        .then_with(|| a.id.cmp(&b.id))
}

/// Groups properties by normalized key and keeps only groups with more than
/// one member. Groups come back in key order so runs are reproducible.
pub fn find_duplicate_groups(properties: Vec<Property>) -> Vec<DuplicateGroup> {
    let mut by_key: BTreeMap<GroupKey, Vec<Property>> = BTreeMap::new();
    for prop in properties {
        by_key.entry(prop.group_key()).or_default().push(prop);
    }

    by_key
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(key, mut members)| {
            members.sort_by(survivor_order);
            DuplicateGroup { key, members }
        })
        .collect()
}

impl DuplicateGroup {
    pub fn survivor(&self) -> &Property {
        &self.members[0]
    }

    /// Folds the losers into the survivor in sorted order; the first loser
    /// with a value for a field wins that field.
    pub fn plan(&self) -> MergePlan {
        let mut merged = self.survivor().clone();
        let mut filled = Vec::new();
        let losers: Vec<Property> = self.members[1..].to_vec();

        for loser in &losers {
            filled.extend(merged.fill_missing_from(loser));
        }

        MergePlan {
            key: self.key.clone(),
            merged,
            filled,
            losers,
        }
    }
}
