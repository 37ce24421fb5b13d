//! Spell catalog: every known spell, indexed by name and by class.
//!
//! The catalog is built once (from CSV or from fixtures) and is immutable
//! afterwards. Lookups are trimmed and case-insensitive.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io;
use thiserror::Error;

use crate::entities::{spell_key, Spell, SpellLevel};
use crate::value_objects::CharacterClass;

/// Failure to read a spell source. Malformed individual rows are skipped,
/// not reported.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read spell source: {0}")]
    Io(#[from] io::Error),

    #[error("malformed spell CSV: {0}")]
    Csv(String),

    #[error("spell CSV header is missing the '{0}' column")]
    MissingColumn(&'static str),
}

impl From<csv::Error> for CatalogLoadError {
    fn from(err: csv::Error) -> Self {
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(io) => Self::Io(io),
            _ => Self::Csv(message),
        }
    }
}

/// Supplementary spell data from the reference cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellDetail {
    pub name: String,
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub level: u8,
}

/// Column positions resolved from the CSV header.
struct Columns {
    name: usize,
    level: usize,
    classes: usize,
    school: Option<usize>,
    range: Option<usize>,
}

impl Columns {
    fn from_header(header: &csv::StringRecord) -> Result<Self, CatalogLoadError> {
        let find = |candidates: &[&str]| {
            header
                .iter()
                .position(|col| candidates.contains(&col.trim().to_lowercase().as_str()))
        };

        Ok(Self {
            name: find(&["name", "spell"]).ok_or(CatalogLoadError::MissingColumn("name"))?,
            level: find(&["level"]).ok_or(CatalogLoadError::MissingColumn("level"))?,
            classes: find(&["class", "classes"])
                .ok_or(CatalogLoadError::MissingColumn("classes"))?,
            school: find(&["school"]),
            range: find(&["range"]),
        })
    }

    /// Parse one data row. Rows without a name or with a level outside 0-9
    /// yield `None`.
    fn parse(&self, record: &csv::StringRecord) -> Option<Spell> {
        let name = record.get(self.name)?.trim();
        if name.is_empty() {
            return None;
        }
        let level = parse_level(record.get(self.level)?)?;

        let classes = record
            .get(self.classes)
            .unwrap_or_default()
            .split(',')
            .filter_map(|class| class.trim().parse::<CharacterClass>().ok());

        let mut spell = Spell::new(name, level).with_classes(classes);
        spell.school = optional_field(record, self.school);
        spell.range = optional_field(record, self.range);
        Some(spell)
    }
}

fn parse_level(raw: &str) -> Option<SpellLevel> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("cantrip") {
        return Some(SpellLevel::Cantrip);
    }
    raw.parse::<u8>().ok().and_then(|n| SpellLevel::try_from(n).ok())
}

fn optional_field(record: &csv::StringRecord, column: Option<usize>) -> Option<String> {
    column
        .and_then(|idx| record.get(idx))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Immutable spell lookup, shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct SpellCatalog {
    spells: Vec<Spell>,
    by_name: HashMap<String, usize>,
    by_class: HashMap<CharacterClass, Vec<Spell>>,
}

impl SpellCatalog {
    /// Load from CSV with a header row naming at least `name`, `level` and
    /// `class` (or `classes`). `school` and `range` are optional.
    ///
    /// The class column is a comma-separated list; class names are matched
    /// case-insensitively and unknown classes are ignored. Rows that are not
    /// valid UTF-8 are skipped.
    pub fn from_csv_reader<R: io::Read>(reader: R) -> Result<Self, CatalogLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let columns = Columns::from_header(csv_reader.headers()?)?;

        let mut spells = Vec::new();
        for record in csv_reader.byte_records() {
            let Ok(record) = csv::StringRecord::from_byte_record(record?) else {
                continue;
            };
            if let Some(spell) = columns.parse(&record) {
                spells.push(spell);
            }
        }

        Ok(Self::from_spells(spells))
    }

    /// Build from already-parsed spells. A repeated name keeps the first
    /// entry and merges the class lists.
    pub fn from_spells(spells: impl IntoIterator<Item = Spell>) -> Self {
        let mut merged: Vec<Spell> = Vec::new();
        let mut by_name: HashMap<String, usize> = HashMap::new();

        for spell in spells {
            match by_name.get(&spell.key()) {
                Some(&idx) => {
                    let existing = &mut merged[idx];
                    for class in spell.classes {
                        if !existing.classes.contains(&class) {
                            existing.classes.push(class);
                        }
                    }
                }
                None => {
                    by_name.insert(spell.key(), merged.len());
                    merged.push(spell);
                }
            }
        }

        let mut by_class: HashMap<CharacterClass, Vec<Spell>> = HashMap::new();
        for spell in &merged {
            for class in &spell.classes {
                by_class.entry(*class).or_default().push(spell.clone());
            }
        }

        Self {
            spells: merged,
            by_name,
            by_class,
        }
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Spell> {
        self.by_name
            .get(&spell_key(name))
            .and_then(|idx| self.spells.get(*idx))
    }

    pub fn class_has_spell(&self, class: CharacterClass, name: &str) -> bool {
        self.find_by_name(name)
            .is_some_and(|spell| spell.classes.contains(&class))
    }

    /// Spells on a class's list, in source order.
    pub fn spells_for_class(&self, class: CharacterClass) -> &[Spell] {
        self.by_class.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Fill in missing school and range from reference details.
    pub fn enrich(self, details: &[SpellDetail]) -> Self {
        let details: HashMap<String, &SpellDetail> = details
            .iter()
            .map(|detail| (spell_key(&detail.name), detail))
            .collect();

        let spells = self.spells.into_iter().map(|mut spell| {
            if let Some(detail) = details.get(&spell.key()) {
                if spell.school.is_none() && !detail.school.trim().is_empty() {
                    spell.school = Some(detail.school.trim().to_string());
                }
                if spell.range.is_none() && !detail.range.trim().is_empty() {
                    spell.range = Some(detail.range.trim().to_string());
                }
            }
            spell
        });

        Self::from_spells(spells.collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
name,level,class,school,range
Fire Bolt,0,\"Sorcerer, Wizard\",Evocation,120 feet
Magic Missile,1,Wizard,Evocation,120 feet
Cure Wounds,1,\"Bard, Cleric, Druid, Paladin, Ranger\",Evocation,Touch
Fireball,3,\"Sorcerer, Wizard\",Evocation,150 feet
Vicious Mockery,0,Bard,Enchantment,60 feet
Eldritch Blast,0,\"Warlock, Artificer\",Evocation,120 feet
Broken Row,x,Wizard,,
Too High,12,Wizard,,
,1,Wizard,,
";

    fn sample() -> SpellCatalog {
        SpellCatalog::from_csv_reader(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn loads_rows_and_skips_bad_ones() {
        let catalog = sample();
        assert_eq!(catalog.len(), 6);
        assert!(catalog.find_by_name("Broken Row").is_none());
        assert!(catalog.find_by_name("Too High").is_none());
    }

    #[test]
    fn find_by_name_is_case_insensitive() {
        let catalog = sample();
        let spell = catalog.find_by_name("  fireball ").unwrap();
        assert_eq!(spell.name, "Fireball");
        assert_eq!(spell.level, SpellLevel::Level(3));
        assert_eq!(spell.school.as_deref(), Some("Evocation"));
        assert_eq!(spell.range.as_deref(), Some("150 feet"));
    }

    #[test]
    fn class_index() {
        let catalog = sample();
        assert!(catalog.class_has_spell(CharacterClass::Wizard, "magic missile"));
        assert!(!catalog.class_has_spell(CharacterClass::Cleric, "Magic Missile"));
        assert!(!catalog.class_has_spell(CharacterClass::Wizard, "Wish"));

        let bard: Vec<_> = catalog
            .spells_for_class(CharacterClass::Bard)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(bard, vec!["Cure Wounds", "Vicious Mockery"]);
        assert!(catalog.spells_for_class(CharacterClass::Fighter).is_empty());
    }

    #[test]
    fn unknown_class_is_dropped_but_spell_stays_findable() {
        let catalog = sample();
        let blast = catalog.find_by_name("Eldritch Blast").unwrap();
        assert_eq!(blast.classes, vec![CharacterClass::Warlock]);
    }

    #[test]
    fn header_columns_can_be_reordered_and_optional_columns_omitted() {
        let csv = "Classes,Name,Level\nCleric,Bless,1\n";
        let catalog = SpellCatalog::from_csv_reader(csv.as_bytes()).unwrap();
        let bless = catalog.find_by_name("bless").unwrap();
        assert_eq!(bless.level, SpellLevel::Level(1));
        assert_eq!(bless.school, None);
        assert!(catalog.class_has_spell(CharacterClass::Cleric, "Bless"));
    }

    #[test]
    fn missing_required_column_fails() {
        let csv = "name,class\nBless,Cleric\n";
        let err = SpellCatalog::from_csv_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogLoadError::MissingColumn("level")));
    }

    #[test]
    fn empty_source_fails_on_missing_header() {
        let err = SpellCatalog::from_csv_reader("".as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogLoadError::MissingColumn(_)));
    }

    #[test]
    fn unreadable_source_is_an_io_error() {
        struct Broken;
        impl io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
            }
        }

        let err = SpellCatalog::from_csv_reader(Broken).unwrap_err();
        assert!(matches!(err, CatalogLoadError::Io(_)));
    }

    #[test]
    fn skips_rows_with_invalid_utf8() {
        let csv: &[u8] = b"name,level,class\n\
            Magic Missile,1,Wizard\n\
            Caf\xe9 Spell,1,Wizard\n\
            Fireball,3,Wizard\n";
        let catalog = SpellCatalog::from_csv_reader(csv).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.find_by_name("Magic Missile").is_some());
        assert!(catalog.find_by_name("Fireball").is_some());
    }

    #[test]
    fn repeated_names_merge_classes() {
        let catalog = SpellCatalog::from_spells([
            Spell::new("Light", SpellLevel::Cantrip).with_classes([CharacterClass::Cleric]),
            Spell::new("LIGHT", SpellLevel::Cantrip).with_classes([CharacterClass::Wizard]),
        ]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.class_has_spell(CharacterClass::Wizard, "light"));
        assert!(catalog.class_has_spell(CharacterClass::Cleric, "light"));
        assert_eq!(catalog.find_by_name("light").unwrap().name, "Light");
    }

    #[test]
    fn enrich_fills_only_missing_fields() {
        let catalog = SpellCatalog::from_spells([
            Spell::new("Shield", SpellLevel::Level(1)).with_classes([CharacterClass::Wizard]),
            Spell::new("Sleep", SpellLevel::Level(1))
                .with_classes([CharacterClass::Wizard])
                .with_school("Enchantment"),
        ]);
        let details = vec![
            SpellDetail {
                name: "shield".to_string(),
                school: "Abjuration".to_string(),
                range: "Self".to_string(),
                level: 1,
            },
            SpellDetail {
                name: "Sleep".to_string(),
                school: "Illusion".to_string(),
                range: "90 feet".to_string(),
                level: 1,
            },
        ];

        let catalog = catalog.enrich(&details);
        let shield = catalog.find_by_name("Shield").unwrap();
        assert_eq!(shield.school.as_deref(), Some("Abjuration"));
        assert_eq!(shield.range.as_deref(), Some("Self"));

        let sleep = catalog.find_by_name("Sleep").unwrap();
        assert_eq!(sleep.school.as_deref(), Some("Enchantment"));
        assert_eq!(sleep.range.as_deref(), Some("90 feet"));
        assert_eq!(
            catalog.spells_for_class(CharacterClass::Wizard)[0].school.as_deref(),
            Some("Abjuration")
        );
    }
}
