use thiserror::Error;

use pagesmith_compose::{Section, SectionKind, SectionLayout};

use crate::section_id;

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("no section with id {0}")]
    UnknownSection(String),
    #[error("index {index} out of range for {len} sections")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Editor-side CRUD over a configuration's section list.
///
/// All operations are synchronous and local; nothing here talks to storage.
/// The caller reads back [`SectionBuilder::sections`] and persists it with a
/// debounced save. After every mutation, `order` is renumbered to match
/// array position: dense, zero-based, the single source of truth for render
/// sequence.
#[derive(Debug, Default)]
pub struct SectionBuilder {
    sections: Vec<Section>,
    /// The section currently open in the editor panel, if any.
    selected: Option<String>,
}

impl SectionBuilder {
    pub fn new(sections: Vec<Section>) -> Self {
        let mut builder = Self {
            sections,
            selected: None,
        };
        // Repair sparse or stale order values from older saves.
        builder.renumber();
        builder
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.sections
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Open a section in the editor panel.
    pub fn select(&mut self, id: &str) -> Result<(), BuilderError> {
        if !self.sections.iter().any(|s| s.id == id) {
            return Err(BuilderError::UnknownSection(id.to_string()));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    /// Append a new section of `kind` with seeded content, the builder's
    /// default layout, a fresh id, and `order = len`. Returns the new id.
    pub fn add(&mut self, kind: SectionKind) -> String {
        let id = section_id::generate();
        self.sections.push(Section {
            id: id.clone(),
            name: kind.display_name().to_string(),
            order: self.sections.len() as i32,
            enabled: true,
            content: kind.default_content(),
            layout: SectionLayout::default(),
            visibility: None,
        });
        id
    }

    /// Remove-and-reinsert move, then renumber every section to its new
    /// array index.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), BuilderError> {
        let len = self.sections.len();
        if from >= len {
            return Err(BuilderError::IndexOutOfRange { index: from, len });
        }
        if to >= len {
            return Err(BuilderError::IndexOutOfRange { index: to, len });
        }
        let section = self.sections.remove(from);
        self.sections.insert(to, section);
        self.renumber();
        Ok(())
    }

    /// Flip a section's enabled flag. Returns the new value. No
    /// renumbering: disabled sections keep their place in the sequence.
    pub fn toggle_enabled(&mut self, id: &str) -> Result<bool, BuilderError> {
        let section = self
            .sections
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| BuilderError::UnknownSection(id.to_string()))?;
        section.enabled = !section.enabled;
        Ok(section.enabled)
    }

    /// Deep-copy a section under a fresh id, name suffixed " - Copy",
    /// appended at the end, not adjacent to the original. Returns the new id.
    pub fn duplicate(&mut self, id: &str) -> Result<String, BuilderError> {
        let source = self
            .sections
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| BuilderError::UnknownSection(id.to_string()))?;
        let mut copy = source.clone();
        copy.id = section_id::generate();
        copy.name = format!("{} - Copy", copy.name);
        copy.order = self.sections.len() as i32;
        let new_id = copy.id.clone();
        self.sections.push(copy);
        Ok(new_id)
    }

    /// Remove a section and renumber the rest. The caller confirms with the
    /// operator before calling this. If the deleted
    /// section was open in the editor panel, the selection is cleared so no
    /// dangling reference survives.
    pub fn delete(&mut self, id: &str) -> Result<(), BuilderError> {
        let index = self
            .sections
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| BuilderError::UnknownSection(id.to_string()))?;
        self.sections.remove(index);
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        self.renumber();
        Ok(())
    }

    fn renumber(&mut self) {
        for (i, section) in self.sections.iter_mut().enumerate() {
            section.order = i as i32;
        }
    }
}
