//! Generated artifacts: one source file or an ordered set of named files.

use indexmap::IndexMap;
use serde::Serialize;

/// Result of a generation command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Artifact {
    /// A single source file
    #[serde(rename_all = "camelCase")]
    Single { file_name: String, content: String },
    /// Several source files keyed by relative path, in generation order
    Files { files: IndexMap<String, String> },
}

impl Artifact {
    pub fn single(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Single {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// Iterate over `(relative path, content)` pairs
    pub fn files(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        match self {
            Self::Single { file_name, content } => {
                Box::new(std::iter::once((file_name.as_str(), content.as_str())))
            }
            Self::Files { files } => Box::new(files.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
        }
    }

    pub fn file_names(&self) -> Vec<&str> {
        self.files().map(|(name, _)| name).collect()
    }

    /// Content of the file at `name`, if present
    pub fn get(&self, name: &str) -> Option<&str> {
        self.files()
            .find(|(file_name, _)| *file_name == name)
            .map(|(_, content)| content)
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Single { .. } => 1,
            Self::Files { files } => files.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
