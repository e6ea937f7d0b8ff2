// Author: Dustin Pilgrim
// License: MIT

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::ast::{Layer, Node};
use crate::parser::{ParseOptions, Parser};
use crate::writer::render;
use crate::NdfError;

mod access;
mod conversion;

/// An owned, preprocessed NDF document plus the path it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct NdfDocument {
    root: Node,
    source: Option<PathBuf>,
}

impl NdfDocument {
    /// Load an NDF file. A leading `~/` is expanded to the home directory.
    ///
    /// # Example
    /// ```no_run
    /// # use ndf_cfg::NdfDocument;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let doc = NdfDocument::from_file("~/.config/game/items.ndf")?;
    /// let damage: u32 = doc.get("Sword.Damage")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, NdfError> {
        Self::from_file_with_options(path, &ParseOptions::default())
    }

    pub fn from_file_with_options<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Self, NdfError> {
        let path = resolve_path(path.as_ref())?;

        let content = fs::read_to_string(&path).map_err(|e| {
            NdfError::file_error(
                format!("Failed to read file: {}", e),
                path.to_string_lossy().to_string(),
                500,
            )
        })?;

        let mut doc = Self::parse_with(&content, options)?;
        info!(
            "Loaded {} ({} top-level layer(s))",
            path.display(),
            doc.root.layer_count()
        );
        doc.source = Some(path);
        Ok(doc)
    }

    /// Load from the primary path first; if that file can't be read, try the fallback.
    pub fn from_file_with_fallback<P: AsRef<Path>>(primary: P, fallback: P) -> Result<Self, NdfError> {
        match Self::from_file(&primary) {
            Ok(doc) => Ok(doc),
            Err(NdfError::FileError { message, .. }) => {
                debug!(
                    "Primary document {} unavailable ({}), trying {}",
                    primary.as_ref().display(),
                    message,
                    fallback.as_ref().display()
                );
                Self::from_file(&fallback).map_err(|e| match e {
                    NdfError::FileError { message, .. } => NdfError::FileError {
                        message: format!(
                            "Failed to load document from primary path '{}' or fallback path '{}': {}",
                            primary.as_ref().display(),
                            fallback.as_ref().display(),
                            message
                        ),
                        path: format!(
                            "{} (fallback: {})",
                            primary.as_ref().display(),
                            fallback.as_ref().display()
                        ),
                        hint: Some("Check that at least one of the files exists".into()),
                        code: Some(500),
                    },
                    other => other,
                })
            }
            Err(other) => Err(other),
        }
    }

    /// Parse NDF text (no file I/O) with default options.
    pub fn from_str(content: &str) -> Result<Self, NdfError> {
        Self::parse_with(content, &ParseOptions::default())
    }

    pub fn parse_with(content: &str, options: &ParseOptions) -> Result<Self, NdfError> {
        let root = Parser::with_options(content, *options).parse_node()?;
        Ok(Self { root, source: None })
    }

    pub fn from_root(root: Node) -> Self {
        Self { root, source: None }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    pub fn layers(&self) -> &[Layer] {
        self.root.layers()
    }

    /// Path this document was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn to_ndf_string(&self, pretty: bool) -> String {
        render(&self.root, 0, pretty)
    }

    /// Write the document in pretty form, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), NdfError> {
        self.write_to(path.as_ref(), true)
    }

    pub fn save_compact<P: AsRef<Path>>(&self, path: P) -> Result<(), NdfError> {
        self.write_to(path.as_ref(), false)
    }

    fn write_to(&self, path: &Path, pretty: bool) -> Result<(), NdfError> {
        let path = resolve_path(path)?;
        fs::write(&path, self.to_ndf_string(pretty)).map_err(|e| {
            NdfError::file_error(
                format!("Failed to write file: {}", e),
                path.to_string_lossy().to_string(),
                501,
            )
        })?;
        info!("Saved {}", path.display());
        Ok(())
    }
}

/// Expand a leading `~/` to the home directory.
fn resolve_path(path: &Path) -> Result<PathBuf, NdfError> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home = dirs::home_dir().ok_or_else(|| NdfError::FileError {
                message: "Could not determine home directory for ~ expansion".into(),
                path: path.to_string_lossy().to_string(),
                hint: Some("Set HOME or use an absolute path".into()),
                code: Some(502),
            })?;
            Ok(home.join(rest))
        }
        Err(_) => Ok(path.to_path_buf()),
    }
}
