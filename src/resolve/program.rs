//! Loading processor programs
//!
//! A program is either inline lines or a path. Paths ending in `.mlogx` are
//! handed to a [`ProgramCompiler`]; any other path is read as plain lines.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::document::ProgramSource;
use crate::template::ConstantTable;

/// Extension of source files that need compiling
pub const COMPILED_EXTENSION: &str = ".mlogx";

/// A failure reported by a program compiler
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CompileError {
    pub message: String,
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that can occur while producing a program's code
#[derive(Debug, Error)]
pub enum ProgramError {
    #[error("Path \"{}\" does not exist.", path.display())]
    NotFound { path: PathBuf },

    #[error("Path \"{}\" is not a file.", path.display())]
    NotAFile { path: PathBuf },

    #[error("Failed to read program {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to compile program {}: {source}", path.display())]
    Compile {
        path: PathBuf,
        #[source]
        source: CompileError,
    },
}

/// Compiles higher-level program source into processor code
pub trait ProgramCompiler: Send + Sync {
    /// Compile `source` lines from a file in `directory`.
    ///
    /// `constants` are the schematic's constants, available to the program.
    fn compile(
        &self,
        source: &[String],
        directory: &Path,
        constants: &ConstantTable,
    ) -> Result<Vec<String>, CompileError>;
}

/// Compiler used when none is configured; refuses every program
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCompiler;

impl ProgramCompiler for NoCompiler {
    fn compile(
        &self,
        _source: &[String],
        _directory: &Path,
        _constants: &ConstantTable,
    ) -> Result<Vec<String>, CompileError> {
        Err(CompileError::new("no program compiler is configured"))
    }
}

/// Produce the code lines for a program
pub fn load_program(
    program: &ProgramSource,
    base_dir: &Path,
    compiler: &dyn ProgramCompiler,
    constants: &ConstantTable,
) -> Result<Vec<String>, ProgramError> {
    match program {
        ProgramSource::Lines(lines) => Ok(lines.clone()),
        ProgramSource::Path(relative) => {
            let path = base_dir.join(relative);
            let lines = read_lines(&path)?;
            if relative.ends_with(COMPILED_EXTENSION) {
                info!("Compiling program {}", path.display());
                let directory = path.parent().unwrap_or(base_dir);
                compiler
                    .compile(&lines, directory, constants)
                    .map_err(|source| ProgramError::Compile { path, source })
            } else {
                debug!(path = %path.display(), lines = lines.len(), "read program file");
                Ok(lines)
            }
        }
    }
}

/// Read a file as lines split on `\n` or `\r\n`, keeping a trailing empty line
fn read_lines(path: &Path) -> Result<Vec<String>, ProgramError> {
    if !path.exists() {
        return Err(ProgramError::NotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_file() {
        return Err(ProgramError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|source| ProgramError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
        .collect())
}
