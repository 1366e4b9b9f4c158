use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use skillmatch_core::{Result, SkillmatchError};

use crate::extract::{CompiledTriggers, ExtractedSignals, extract};

/// Parsed contents of a skill's JSON metadata file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillMetadata {
    /// Optional declared name. The directory name is authoritative.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub triggers: Option<TriggerSet>,
    /// The `capabilities` field; its shape decides the dialect.
    #[serde(default)]
    pub capabilities: Option<Dialect>,
}

/// Regex trigger lists, by confidence tier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerSet {
    #[serde(default)]
    pub high_confidence: Vec<String>,
    #[serde(default)]
    pub medium_confidence: Vec<String>,
}

/// One capability entry of a legacy-dialect skill.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilityObject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub solves: Vec<String>,
}

/// Schema dialect, carried with its capability payload.
///
/// `Slim` stores capability names only; its keywords and solves statements live
/// as labeled lines in the prose document. `Legacy` nests them per capability.
/// An empty array deserializes as `Slim`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dialect {
    Slim(Vec<String>),
    Legacy(Vec<CapabilityObject>),
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Slim(_) => "slim",
            Dialect::Legacy(_) => "legacy",
        }
    }
}

/// A skill directory read from the registry.
///
/// File contents are read once at load time and kept for the life of the
/// registry snapshot. A metadata file that is missing or does not parse is kept
/// as an error string so the validator can report it. Extracted signals and
/// compiled trigger patterns are computed on first use and then reused.
#[derive(Debug, Clone)]
pub struct Skill {
    /// Directory name (kebab-case).
    pub name: String,
    /// Parent directory relative to the registry root, `/`-joined.
    pub category: Option<String>,
    pub dir: PathBuf,
    pub metadata_path: PathBuf,
    pub document_path: PathBuf,
    metadata: std::result::Result<SkillMetadata, String>,
    document: Option<String>,
    signals: OnceLock<ExtractedSignals>,
    triggers: OnceLock<CompiledTriggers>,
}

impl Skill {
    /// Read a skill directory from disk.
    pub fn read(
        dir: &Path,
        category: Option<String>,
        metadata_file: &str,
        document_file: &str,
    ) -> Self {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let metadata_path = dir.join(metadata_file);
        let document_path = dir.join(document_file);

        let metadata = match std::fs::read_to_string(&metadata_path) {
            Ok(raw) => SkillMetadata::parse(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(format!("{metadata_file} is missing"))
            }
            Err(e) => Err(format!("{metadata_file} is unreadable: {e}")),
        };
        let document = std::fs::read_to_string(&document_path).ok();

        Self {
            name,
            category,
            dir: dir.to_path_buf(),
            metadata_path,
            document_path,
            metadata,
            document,
            signals: OnceLock::new(),
            triggers: OnceLock::new(),
        }
    }

    /// Build a skill from in-memory contents.
    pub fn from_parts(
        name: impl Into<String>,
        category: Option<String>,
        metadata: std::result::Result<SkillMetadata, String>,
        document: Option<String>,
    ) -> Self {
        let name = name.into();
        let dir = PathBuf::from(&name);
        Self {
            metadata_path: dir.join("metadata.json"),
            document_path: dir.join("SKILL.md"),
            name,
            category,
            dir,
            metadata,
            document,
            signals: OnceLock::new(),
            triggers: OnceLock::new(),
        }
    }

    /// The parsed metadata, or `MalformedMetadata`.
    pub fn metadata(&self) -> Result<&SkillMetadata> {
        self.metadata
            .as_ref()
            .map_err(|reason| SkillmatchError::MalformedMetadata {
                path: self.metadata_path.clone(),
                reason: reason.clone(),
            })
    }

    /// Detect the schema dialect from the shape of `capabilities`.
    pub fn dialect(&self) -> Result<&Dialect> {
        let metadata = self.metadata()?;
        metadata
            .capabilities
            .as_ref()
            .ok_or_else(|| SkillmatchError::MalformedMetadata {
                path: self.metadata_path.clone(),
                reason: "capabilities must be an array of strings or an array of objects".into(),
            })
    }

    /// The prose document text, if the file exists.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// `category/name`, or the bare name for skills directly under the root.
    /// Unique within a registry even when names are not.
    pub fn qualified_name(&self) -> String {
        match &self.category {
            Some(category) => format!("{category}/{}", self.name),
            None => self.name.clone(),
        }
    }

    /// The skill's extracted signals, computed once per snapshot.
    pub fn signals(&self) -> &ExtractedSignals {
        self.signals.get_or_init(|| extract(self))
    }

    /// The skill's trigger patterns compiled once per snapshot.
    pub fn triggers(&self) -> &CompiledTriggers {
        self.triggers
            .get_or_init(|| CompiledTriggers::compile(self.signals()))
    }

    /// Description from the metadata; empty when the metadata is malformed.
    pub fn description(&self) -> &str {
        self.metadata
            .as_ref()
            .map(|m| m.description.as_str())
            .unwrap_or("")
    }
}

impl SkillMetadata {
    /// Parse metadata JSON. The error is kept as text for later reporting.
    pub fn parse(raw: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| e.to_string())
    }
}
