use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::definition::Skill;

/// File names that identify a skill directory.
#[derive(Debug, Clone)]
pub struct RegistryLayout {
    pub metadata_file: String,
    pub document_file: String,
}

impl Default for RegistryLayout {
    fn default() -> Self {
        Self {
            metadata_file: "metadata.json".into(),
            document_file: "SKILL.md".into(),
        }
    }
}

/// An immutable snapshot of every skill under a registry root.
///
/// A skill directory is any directory holding the metadata file or the prose
/// document. Skills may sit under any number of category folders; the folders
/// between the root and the skill become its category. Directories inside a
/// skill are not searched further.
pub struct SkillRegistry {
    root: PathBuf,
    layout: RegistryLayout,
    /// In traversal order (sorted by file name at every level).
    skills: Vec<Skill>,
    duplicates: BTreeMap<String, Vec<PathBuf>>,
}

impl SkillRegistry {
    /// Walk the registry root and read every skill once.
    pub fn load(root: &Path, layout: RegistryLayout) -> skillmatch_core::Result<Self> {
        if !root.is_dir() {
            return Err(skillmatch_core::SkillmatchError::Registry(format!(
                "registry root {} is not a directory",
                root.display()
            )));
        }

        let dirs = Self::discover(root, &layout);
        let skills: Vec<Skill> = dirs
            .into_par_iter()
            .map(|(dir, category)| {
                Skill::read(&dir, category, &layout.metadata_file, &layout.document_file)
            })
            .collect();

        let mut registry = Self {
            root: root.to_path_buf(),
            layout,
            skills: Vec::new(),
            duplicates: BTreeMap::new(),
        };
        for skill in skills {
            registry.register(skill);
        }

        info!(root = ?registry.root, skills = registry.count(), "registry loaded");
        Ok(registry)
    }

    /// An empty registry (for programmatic registration).
    pub fn new_empty(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            layout: RegistryLayout::default(),
            skills: Vec::new(),
            duplicates: BTreeMap::new(),
        }
    }

    /// Append a skill. A name already present is recorded as a duplicate;
    /// the earlier skill keeps winning `resolve`.
    pub fn register(&mut self, skill: Skill) {
        if let Some(first) = self.skills.iter().find(|s| s.name == skill.name) {
            warn!(
                skill = %skill.name,
                first = ?first.dir,
                duplicate = ?skill.dir,
                "duplicate skill name, first match wins"
            );
            let entry = self
                .duplicates
                .entry(skill.name.clone())
                .or_insert_with(|| vec![first.dir.clone()]);
            entry.push(skill.dir.clone());
        } else {
            debug!(skill = %skill.name, category = ?skill.category, "registered skill");
        }
        self.skills.push(skill);
    }

    fn discover(root: &Path, layout: &RegistryLayout) -> Vec<(PathBuf, Option<String>)> {
        let mut found = Vec::new();
        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_hidden(e));

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable registry entry");
                    continue;
                }
            };
            if !entry.file_type().is_dir() {
                continue;
            }

            let dir = entry.path();
            let is_skill = dir.join(&layout.metadata_file).is_file()
                || dir.join(&layout.document_file).is_file();
            if is_skill {
                found.push((dir.to_path_buf(), category_of(root, dir)));
                walker.skip_current_dir();
            }
        }
        found
    }

    /// Resolve a skill name to its definition. First match in traversal order wins.
    pub fn resolve(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.name == name)
    }

    /// All skills, in traversal order.
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    /// All skills sorted by name, then category.
    pub fn list(&self) -> Vec<&Skill> {
        let mut skills: Vec<_> = self.skills.iter().collect();
        skills.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.category.cmp(&b.category)));
        skills
    }

    /// Names that occur more than once, with every directory that carries them.
    pub fn duplicates(&self) -> &BTreeMap<String, Vec<PathBuf>> {
        &self.duplicates
    }

    pub fn count(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> &RegistryLayout {
        &self.layout
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

fn category_of(root: &Path, dir: &Path) -> Option<String> {
    let parent = dir.parent()?.strip_prefix(root).ok()?;
    let parts: Vec<String> = parent
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
