//! The instruction dictionary
//!
//! Instructions are kept in a `BTreeMap` keyed by their lower-case name, so iterating the
//! dictionary always yields the same order and every generated file is reproducible byte
//! for byte.
use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

use glob::Pattern;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use tracing::debug;

use crate::error::EncodingError;
use crate::instruction::Instruction;

/// Pseudo-instructions that the C header always carries, even when pseudo-instructions
/// are otherwise left out
pub const EMITTED_PSEUDO_OPS: &[&str] = &[
    "pause",
    "prefetch_i",
    "prefetch_r",
    "prefetch_w",
    "rstsa16",
    "rstsa32",
    "slli_rv32",
    "srai_rv32",
    "srli32_u",
    "srli_rv32",
    "umax32",
];

/// Which instructions of a table to keep
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    /// Glob patterns matched against the extension names, e.g. `rv*` or `rv64_?`
    pub extensions: &'a [String],
    /// Keep every pseudo-instruction
    pub include_pseudo: bool,
    /// Pseudo-instructions kept even when `include_pseudo` is off
    pub include_pseudo_ops: &'a [&'a str],
}

/// Entries of a JSON table in document order, repeated names included
struct TableEntries(Vec<(String, Instruction)>);

impl<'de> Deserialize<'de> for TableEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = TableEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping instruction names to records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Instruction>()? {
                    entries.push(entry);
                }
                Ok(TableEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Sorted mapping from instruction name to instruction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstructionDictionary {
    instructions: BTreeMap<String, Instruction>,
}

impl InstructionDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary, failing on the first duplicate name
    pub fn from_instructions(
        instructions: impl IntoIterator<Item = Instruction>,
    ) -> Result<Self, EncodingError> {
        let mut dictionary = Self::new();
        for instruction in instructions {
            dictionary.insert(instruction)?;
        }
        Ok(dictionary)
    }

    /// Parse a table in the `instr_dict.json` layout: an object from name to record
    ///
    /// A name appearing twice in the object is rejected like any other duplicate.
    pub fn from_json(json: &str) -> Result<Self, EncodingError> {
        Self::from_entries(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, EncodingError> {
        Self::from_entries(serde_json::from_reader(reader)?)
    }

    fn from_entries(TableEntries(entries): TableEntries) -> Result<Self, EncodingError> {
        Self::from_instructions(entries.into_iter().map(|(name, mut instruction)| {
            instruction.name = name;
            instruction
        }))
    }

    /// Insert an instruction, names are compared case-insensitively
    pub fn insert(&mut self, mut instruction: Instruction) -> Result<(), EncodingError> {
        instruction.name = instruction.name.to_lowercase();
        if self.instructions.contains_key(&instruction.name) {
            return Err(EncodingError::DuplicateInstruction(instruction.name));
        }
        self.instructions.insert(instruction.name.clone(), instruction);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Instruction> {
        self.instructions.get(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instructions in name order
    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.instructions.keys().map(String::as_str)
    }

    /// Keep the instructions matching `selection`
    pub fn select(&self, selection: &Selection<'_>) -> Result<Self, EncodingError> {
        let patterns = selection
            .extensions
            .iter()
            .map(|glob| Pattern::new(glob).map_err(|_| EncodingError::InvalidGlob(glob.clone())))
            .collect::<Result<Vec<_>, _>>()?;

        let instructions: BTreeMap<String, Instruction> = self
            .instructions
            .iter()
            .filter(|(name, instruction)| {
                !instruction.is_pseudo()
                    || selection.include_pseudo
                    || selection.include_pseudo_ops.contains(&name.as_str())
            })
            .filter(|(_, instruction)| {
                instruction
                    .extension
                    .iter()
                    .any(|extension| patterns.iter().any(|pattern| pattern.matches(extension)))
            })
            .map(|(name, instruction)| (name.clone(), instruction.clone()))
            .collect();

        debug!(
            "Selected {} of {} instructions for extensions {:?}",
            instructions.len(),
            self.instructions.len(),
            selection.extensions
        );

        Ok(Self { instructions })
    }

    /// Canonical JSON form: sorted, pretty-printed, `match`/`mask` left out
    pub fn to_json_pretty(&self) -> Result<String, EncodingError> {
        let mut json = serde_json::to_string_pretty(&self.instructions)?;
        json.push('\n');
        Ok(json)
    }

    /// Every validation problem found in the dictionary
    pub fn problems(&self) -> Vec<EncodingError> {
        self.iter().filter_map(|instruction| instruction.validate().err()).collect()
    }
}

impl<'a> IntoIterator for &'a InstructionDictionary {
    type Item = &'a Instruction;
    type IntoIter = std::collections::btree_map::Values<'a, String, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.values()
    }
}
