// WHY: Explicit reader state owned by the presentation layer
// Holds the loaded guide list and the current selection between catalog reloads

use tracing::debug;

use crate::catalog::GuideEntry;

/// Outcome of selecting a guide by file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<'a> {
    /// Empty key: nothing selected, caller shows a placeholder
    Cleared,
    /// Guide found and now current
    Guide(&'a GuideEntry),
    /// File is not in the loaded list, caller should reload the catalog
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct ReaderSession {
    guides: Vec<GuideEntry>,
    current_file: Option<String>,
}

impl ReaderSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn guides(&self) -> &[GuideEntry] {
        &self.guides
    }

    pub fn current_file(&self) -> Option<&str> {
        self.current_file.as_deref()
    }

    pub fn current(&self) -> Option<&GuideEntry> {
        let file = self.current_file.as_deref()?;
        self.guides.iter().find(|g| g.file == file)
    }

    /// Replace the guide list and return the guide to load next
    ///
    /// A previous selection is kept across reloads. When that file is gone
    /// nothing is returned and the stale selection stays in place. Without a
    /// previous selection the first guide is chosen.
    pub fn refresh(&mut self, guides: Vec<GuideEntry>) -> Option<&GuideEntry> {
        self.guides = guides;

        let target = match self.current_file.as_deref() {
            Some(file) => self.guides.iter().find(|g| g.file == file),
            None => self.guides.first(),
        };

        match target {
            Some(guide) => {
                debug!("Session targets {}", guide.file);
                self.current_file = Some(guide.file.clone());
                Some(guide)
            }
            None => {
                debug!("Session refresh found no guide to load");
                None
            }
        }
    }

    /// Select a guide by file name
    pub fn select(&mut self, file: &str) -> Selection<'_> {
        if file.is_empty() {
            self.current_file = None;
            return Selection::Cleared;
        }

        match self.guides.iter().find(|g| g.file == file) {
            Some(guide) => {
                self.current_file = Some(guide.file.clone());
                Selection::Guide(guide)
            }
            None => Selection::Stale,
        }
    }
}
