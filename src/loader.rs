//! This module provides the `MachineLoader` struct, responsible for loading machine
//! definitions from files and strings, and for parsing raw tape text into symbols.
//!
//! A definition is a JSON document: a nested mapping keyed by state then by symbol,
//! each rule a `[write, delta, next_state]` triple, plus `start`/`blank`/`tape`
//! metadata. The engine itself never touches the persisted format.

use crate::types::{MachineError, Program, Symbol};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension recognized when scanning a directory for definitions.
const DEFINITION_EXTENSION: &str = "json";

/// `MachineLoader` is a utility struct for loading machine definitions.
/// It provides methods to load definitions from individual files, from string
/// content, and to discover all definition files within a directory.
pub struct MachineLoader;

impl MachineLoader {
    /// Loads a single machine definition from the specified file path.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if the file is successfully read and parsed.
    /// * `Err(MachineError::FileError)` if the file cannot be read.
    /// * `Err(MachineError::ParseError)` if the content is not a valid definition.
    pub fn load_program(path: &Path) -> Result<Program, MachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Self::load_program_from_string(&content)
    }

    /// Loads a single machine definition from the provided string content.
    ///
    /// The definition is accepted as given: beyond being well-formed JSON of
    /// the right shape, no table analysis is performed, and malformedness
    /// (an absent `start` state, rules leading nowhere) surfaces lazily
    /// during execution.
    pub fn load_program_from_string(content: &str) -> Result<Program, MachineError> {
        serde_json::from_str(content).map_err(|e| MachineError::ParseError(e.to_string()))
    }

    /// Loads all machine definition files (`.json` extension) from a directory.
    ///
    /// Directories and files with other extensions are skipped. Each element
    /// of the result reports either a loaded definition with its path or the
    /// error that file produced.
    pub fn load_programs(directory: &Path) -> Vec<Result<(PathBuf, Program), MachineError>> {
        if !directory.exists() {
            return vec![Err(MachineError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(MachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(MachineError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                // Skip directories and non-definition files
                if path.is_dir()
                    || path
                        .extension()
                        .is_none_or(|ext| ext != DEFINITION_EXTENSION)
                {
                    return None;
                }

                match Self::load_program(&path) {
                    Ok(program) => Some(Ok((path, program))),
                    Err(e) => Some(Err(MachineError::FileError(format!(
                        "Failed to load definition from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}

/// Parses raw tape text into a symbol sequence.
///
/// Text containing whitespace is split into whitespace-delimited tokens, so
/// multi-character symbols can be written out (`1 0 ERROR0`). Otherwise each
/// character is one symbol, matching the compact form (`11010100_11011000`).
pub fn parse_tape(text: &str) -> Vec<Symbol> {
    if text.chars().any(char::is_whitespace) {
        text.split_whitespace().map(Symbol::from).collect()
    } else {
        text.chars().map(Symbol::from).collect()
    }
}
