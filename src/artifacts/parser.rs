use crate::error::FamilyResult;
use crate::lineage::Family;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Declarative description of a family tree.
///
/// Batches are replayed in order through `Family::set_children`, so every
/// mother must appear as the founder or in an earlier batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyFile {
    pub founder: String,
    #[serde(default)]
    pub children: Vec<ChildBatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildBatch {
    pub mother: String,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    /// `.json` files are JSON, everything else is read as YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileFormat::Json,
            _ => FileFormat::Yaml,
        }
    }
}

impl FamilyFile {
    /// The tree used by the reference demonstration
    pub fn sample() -> Self {
        let batch = |mother: &str, names: &[&str]| ChildBatch {
            mother: mother.to_string(),
            names: names.iter().map(|name| name.to_string()).collect(),
        };

        Self {
            founder: "a".to_string(),
            children: vec![
                batch("a", &["b", "c"]),
                batch("b", &["d", "e"]),
                batch("c", &["f", "g"]),
                batch("d", &["h", "i"]),
                batch("e", &["j", "k"]),
                batch("f", &["l", "m"]),
                batch("g", &["n", "o", "p", "q"]),
            ],
        }
    }

    /// Load a tree description, picking the format from the file extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading family tree from: {:?}", path);

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read family tree from {:?}", path))?;

        Self::parse(&content, FileFormat::from_path(path))
            .with_context(|| format!("Failed to parse family tree {:?}", path))
    }

    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        let file: Self = match format {
            FileFormat::Yaml => serde_yaml::from_str(content)?,
            FileFormat::Json => serde_json::from_str(content)?,
        };
        Ok(file)
    }

    pub fn render(&self, format: FileFormat) -> Result<String> {
        let content = match format {
            FileFormat::Yaml => serde_yaml::to_string(self)?,
            FileFormat::Json => serde_json::to_string_pretty(self)?,
        };
        Ok(content)
    }

    /// Write the description, picking the format from the file extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = self.render(FileFormat::from_path(path))?;

        fs::write(path, content)
            .with_context(|| format!("Failed to write family tree to {:?}", path))?;
        Ok(())
    }

    /// Replay the batches into a new `Family`
    pub fn build(&self) -> FamilyResult<Family> {
        let mut family = Family::new(self.founder.clone());

        for batch in &self.children {
            family.set_children(&batch.mother, batch.names.as_slice())?;
        }

        info!(
            "Built family rooted at {} with {} members",
            self.founder,
            family.len()
        );
        Ok(family)
    }

    /// Describe an existing family, one batch per member with children
    pub fn from_family(family: &Family) -> FamilyResult<Self> {
        let mut children = Vec::new();

        for name in family.names() {
            let names = family.children_of(name)?;
            if !names.is_empty() {
                children.push(ChildBatch {
                    mother: name.to_string(),
                    names: names.into_iter().map(String::from).collect(),
                });
            }
        }

        Ok(Self {
            founder: family.root().name().to_string(),
            children,
        })
    }
}
