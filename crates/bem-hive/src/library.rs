//! Construction and material library.
//!
//! Constructions are text definitions `Construction, <name>, <layer>...;` and
//! are looked up case-insensitively. Materials are whitespace-separated
//! `<modifier> <type> <name>` headers followed by three counted argument
//! groups (strings, integers, reals) and are looked up by exact name.

use std::collections::{BTreeMap, BTreeSet};

use bem_engine::{AIR_WALL_CONSTRUCTION, DefinitionKind, DefinitionLibrary, Registration};

#[derive(Debug, Clone, Default)]
pub struct MemoryLibrary {
    constructions: BTreeMap<String, String>,
    materials: BTreeMap<String, String>,
}

impl MemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library seeded with the air wall construction.
    pub fn with_defaults() -> Self {
        let mut library = Self::new();
        library.constructions.insert(
            construction_key(AIR_WALL_CONSTRUCTION),
            format!("Construction,\n    {AIR_WALL_CONSTRUCTION},\n    Air Wall Material;"),
        );
        library
    }

    pub fn construction(&self, name: &str) -> Option<&str> {
        self.constructions
            .get(&construction_key(name))
            .map(String::as_str)
    }

    pub fn material(&self, name: &str) -> Option<&str> {
        self.materials.get(name.trim()).map(String::as_str)
    }

    pub fn construction_count(&self) -> usize {
        self.constructions.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

impl DefinitionLibrary for MemoryLibrary {
    fn exists(&self, kind: DefinitionKind, name: &str) -> bool {
        match kind {
            DefinitionKind::Construction => self.construction(name).is_some(),
            DefinitionKind::Material => self.material(name).is_some(),
        }
    }

    fn canonical_name(&self, kind: DefinitionKind, definition: &str) -> Option<String> {
        match kind {
            DefinitionKind::Construction => construction_name(definition),
            DefinitionKind::Material => material_name(definition),
        }
    }

    fn register(
        &mut self,
        kind: DefinitionKind,
        definition: &str,
        overwrite: bool,
    ) -> Registration {
        let Some(name) = self.canonical_name(kind, definition) else {
            tracing::debug!(kind = kind.library_name(), "malformed definition");
            return Registration {
                added: false,
                name: String::new(),
            };
        };

        let (table, key) = match kind {
            DefinitionKind::Construction => (&mut self.constructions, construction_key(&name)),
            DefinitionKind::Material => (&mut self.materials, name.clone()),
        };
        if table.contains_key(&key) && !overwrite {
            return Registration { added: false, name };
        }
        table.insert(key, definition.trim().to_string());
        tracing::debug!(kind = kind.library_name(), %name, "definition registered");
        Registration { added: true, name }
    }

    fn material_names(&self) -> BTreeSet<String> {
        self.materials.keys().cloned().collect()
    }
}

fn construction_key(name: &str) -> String {
    name.trim().to_uppercase()
}

fn construction_name(definition: &str) -> Option<String> {
    let mut fields = definition.split(',');
    let head = fields.next()?.trim();
    if !head.eq_ignore_ascii_case("construction") {
        return None;
    }
    let name = fields.next()?.trim().trim_end_matches(';').trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn material_name(definition: &str) -> Option<String> {
    let tokens: Vec<&str> = definition.split_whitespace().collect();
    let [_modifier, _kind, name, rest @ ..] = tokens.as_slice() else {
        return None;
    };

    let mut rest = rest.iter();
    let strings: usize = rest.next()?.parse().ok()?;
    for _ in 0..strings {
        rest.next()?;
    }
    let ints: usize = rest.next()?.parse().ok()?;
    for _ in 0..ints {
        rest.next()?.parse::<i64>().ok()?;
    }
    let reals: usize = rest.next()?.parse().ok()?;
    for _ in 0..reals {
        rest.next()?.parse::<f64>().ok()?;
    }
    if rest.next().is_some() {
        return None;
    }
    Some((*name).to_string())
}
