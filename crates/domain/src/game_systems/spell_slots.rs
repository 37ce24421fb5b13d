//! Canonical spell slot progressions, one per caster family.
//!
//! Each table is keyed by character-level thresholds. A character uses the
//! entry with the highest threshold at or below their level. Spell level 0
//! holds the number of cantrips known.

use super::tables::SlotTable;

type Thresholds = &'static [(u8, &'static [(u8, u8)])];

const FULL_CASTER: Thresholds = &[
    (1, &[(0, 3), (1, 2)]),
    (2, &[(0, 3), (1, 3)]),
    (3, &[(0, 3), (1, 4), (2, 2)]),
    (5, &[(0, 4), (1, 4), (2, 3), (3, 2)]),
    (7, &[(0, 4), (1, 4), (2, 3), (3, 3), (4, 1)]),
    (9, &[(0, 4), (1, 4), (2, 3), (3, 3), (4, 3), (5, 1)]),
    (11, &[(0, 5), (1, 4), (2, 3), (3, 3), (4, 3), (5, 2), (6, 1)]),
    (13, &[(0, 5), (1, 4), (2, 3), (3, 3), (4, 3), (5, 2), (6, 1), (7, 1)]),
    (15, &[(0, 5), (1, 4), (2, 3), (3, 3), (4, 3), (5, 2), (6, 1), (7, 1), (8, 1)]),
    (
        17,
        &[(0, 5), (1, 4), (2, 3), (3, 3), (4, 3), (5, 2), (6, 1), (7, 1), (8, 1), (9, 1)],
    ),
];

// Half casters have no cantrips and no slots before level 5.
const HALF_CASTER: Thresholds = &[
    (5, &[(1, 4), (2, 2)]),
    (9, &[(1, 4), (2, 3), (3, 2)]),
    (13, &[(1, 4), (2, 3), (3, 3), (4, 2)]),
    (17, &[(1, 4), (2, 3), (3, 3), (4, 3), (5, 2)]),
];

// Pact magic: few slots, all at the highest available level.
const PACT_CASTER: Thresholds = &[
    (1, &[(0, 2), (1, 1)]),
    (3, &[(0, 2), (2, 2)]),
    (5, &[(0, 3), (3, 2)]),
    (7, &[(0, 3), (4, 2)]),
    (9, &[(0, 3), (5, 2)]),
    (11, &[(0, 4), (5, 3)]),
    (17, &[(0, 4), (5, 4)]),
];

fn build(thresholds: Thresholds) -> SlotTable {
    thresholds
        .iter()
        .map(|(level, slots)| (*level, slots.iter().copied().collect()))
        .collect()
}

/// Wizard, cleric, druid, bard, sorcerer.
pub fn full_caster() -> SlotTable {
    build(FULL_CASTER)
}

/// Paladin, ranger.
pub fn half_caster() -> SlotTable {
    build(HALF_CASTER)
}

/// Warlock.
pub fn pact_caster() -> SlotTable {
    build(PACT_CASTER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::SpellSlots;

    /// No count at any spell level drops as character level rises.
    fn counts_never_drop(table: &SlotTable) -> bool {
        let entries: Vec<&SpellSlots> = table.values().collect();
        entries.windows(2).all(|pair| {
            pair[0]
                .iter()
                .all(|(level, count)| pair[1].get(level).copied().unwrap_or(0) >= *count)
        })
    }

    /// Pact slots move up a level instead of accumulating, so cantrips, slot
    /// level and slot count are checked on their own.
    fn pact_never_drops(table: &SlotTable) -> bool {
        let entries: Vec<(u8, u8, u8)> = table
            .values()
            .map(|slots| {
                let cantrips = slots.get(&0).copied().unwrap_or(0);
                let (level, count) = slots
                    .iter()
                    .filter(|(level, _)| **level > 0)
                    .map(|(level, count)| (*level, *count))
                    .max()
                    .unwrap_or((0, 0));
                (cantrips, level, count)
            })
            .collect();
        entries.windows(2).all(|pair| {
            pair[1].0 >= pair[0].0 && pair[1].1 >= pair[0].1 && pair[1].2 >= pair[0].2
        })
    }

    #[test]
    fn tables_grow_with_level() {
        assert!(counts_never_drop(&full_caster()));
        assert!(counts_never_drop(&half_caster()));
        assert!(pact_never_drops(&pact_caster()));
    }

    #[test]
    fn shrinking_table_is_detected() {
        let shrinking: SlotTable = [
            (1, SpellSlots::from([(0, 5), (1, 4)])),
            (2, SpellSlots::from([(0, 1), (1, 1), (2, 1)])),
        ]
        .into_iter()
        .collect();

        assert!(!counts_never_drop(&shrinking));
        assert!(!pact_never_drops(&shrinking));
    }

    #[test]
    fn full_caster_first_level() {
        let table = full_caster();
        let first = &table[&1];
        assert_eq!(first.get(&0), Some(&3));
        assert_eq!(first.get(&1), Some(&2));
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn full_caster_capstone_has_ninth_level_slot() {
        let table = full_caster();
        assert_eq!(table[&17].get(&9), Some(&1));
    }

    #[test]
    fn half_caster_starts_at_five_without_cantrips() {
        let table = half_caster();
        assert_eq!(table.keys().next(), Some(&5));
        assert!(table.values().all(|slots| !slots.contains_key(&0)));
    }

    #[test]
    fn pact_slots_sit_at_one_level() {
        let table = pact_caster();
        for slots in table.values() {
            let leveled = slots.keys().filter(|level| **level > 0).count();
            assert_eq!(leveled, 1);
        }
    }
}
