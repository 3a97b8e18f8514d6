//! Generation pipeline
//!
//! Selects the requested extensions out of the full table, persists the canonical
//! `instr_dict.json`, then runs every requested backend in [`Backend`] order. Each backend
//! writes its file (and runs its formatter) before the next one starts. The first error
//! aborts the run; files written up to that point are left in place.
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use riscv_encoding::{InstructionDictionary, Selection, EMITTED_PSEUDO_OPS};
use tracing::{info, warn};

use crate::emit::Backend;
use crate::error::CodegenError;
use crate::marker::GeneratedBy;

/// Canonical dictionary written on every run
pub const INSTR_DICT_FILE: &str = "instr_dict.json";

/// What to generate and where
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Extension globs, e.g. `rv_i` or `rv*`
    pub extensions: Vec<String>,
    /// Keep pseudo-instructions
    pub include_pseudo: bool,
    /// Backends to run, duplicates are ignored
    pub backends: Vec<Backend>,
    /// Directory receiving every generated file
    pub out_dir: PathBuf,
    /// Run external formatters on the files that have one
    pub format: bool,
    pub generated_by: GeneratedBy,
}

impl GenerateOptions {
    pub fn new(extensions: Vec<String>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            extensions,
            include_pseudo: false,
            backends: Vec::new(),
            out_dir: out_dir.into(),
            format: true,
            generated_by: GeneratedBy::current_process(),
        }
    }

    pub fn with_backends(mut self, backends: impl IntoIterator<Item = Backend>) -> Self {
        self.backends.extend(backends);
        self
    }
}

fn write_file(path: &Path, contents: &str) -> Result<PathBuf, CodegenError> {
    fs::write(path, contents)
        .map_err(|source| CodegenError::Io { path: path.to_path_buf(), source })?;
    Ok(path.to_path_buf())
}

/// Run the pipeline over `table`, returning the paths written in order
pub fn generate(
    table: &InstructionDictionary,
    options: &GenerateOptions,
) -> Result<Vec<PathBuf>, CodegenError> {
    if options.extensions.is_empty() {
        warn!("No extensions selected, the generated files will not contain any instruction");
    }

    let dictionary = table.select(&Selection {
        extensions: &options.extensions,
        include_pseudo: options.include_pseudo,
        include_pseudo_ops: &[],
    })?;
    for problem in dictionary.problems() {
        warn!("{}", problem);
    }

    fs::create_dir_all(&options.out_dir)
        .map_err(|source| CodegenError::Io { path: options.out_dir.clone(), source })?;

    let instr_dict = dictionary.to_json_pretty()?;
    let mut written = vec![write_file(&options.out_dir.join(INSTR_DICT_FILE), &instr_dict)?];

    let backends: BTreeSet<Backend> = options.backends.iter().copied().collect();
    for backend in backends {
        let source = match backend {
            // The C header never carries pseudo-instructions besides the emitted ones
            Backend::C => {
                let c_dictionary = table.select(&Selection {
                    extensions: &options.extensions,
                    include_pseudo: false,
                    include_pseudo_ops: EMITTED_PSEUDO_OPS,
                })?;
                backend.render(&c_dictionary, &options.generated_by)?
            }
            _ => backend.render(&dictionary, &options.generated_by)?,
        };

        let path = write_file(&options.out_dir.join(backend.file_name()), &source)?;
        if options.format {
            if let Some(formatter) = backend.formatter() {
                formatter.run(&path);
            }
        }

        info!("{} generated successfully", backend.file_name());
        written.push(path);
    }

    Ok(written)
}
