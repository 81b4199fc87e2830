use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// File name of the guide catalog inside a library root
pub const CATALOG_FILE_NAME: &str = "list.json";

/// One selectable guide: display name plus the document file it points at
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GuideEntry {
    pub name: String,
    pub file: String,
}

impl GuideEntry {
    pub fn new(name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }

    /// File name without the `.txt` extension
    pub fn stem(&self) -> &str {
        let len = self.file.len();
        if len >= 4 && self.file.is_char_boundary(len - 4) && self.file[len - 4..].eq_ignore_ascii_case(".txt") {
            &self.file[..len - 4]
        } else {
            &self.file
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        let name = value.get("name")?.as_str()?;
        let file = value.get("file")?.as_str()?;
        if name.is_empty() || file.is_empty() || !has_txt_extension(file) {
            return None;
        }
        Some(Self::new(name, file))
    }
}

fn has_txt_extension(file: &str) -> bool {
    file.to_ascii_lowercase().ends_with(".txt")
}

/// Parse catalog JSON into the list of valid guides
///
/// Accepts a bare array, `{"list": [...]}` or `{"guides": [...]}`. Entries
/// without a non-empty `name` and a `.txt` `file` are skipped.
pub fn parse_catalog(json: &str) -> Result<Vec<GuideEntry>> {
    let document: Value = serde_json::from_str(json).context("Catalog is not valid JSON")?;

    let items = match &document {
        Value::Array(items) => items,
        Value::Object(map) => match (map.get("list"), map.get("guides")) {
            (Some(Value::Array(items)), _) => items,
            (_, Some(Value::Array(items))) => items,
            _ => bail!("Catalog must be an array or an object with a `list` or `guides` array"),
        },
        _ => bail!("Catalog must be an array or an object with a `list` or `guides` array"),
    };

    let guides: Vec<GuideEntry> = items
        .iter()
        .filter_map(|item| {
            let entry = GuideEntry::from_value(item);
            if entry.is_none() {
                debug!("Skipping invalid catalog entry: {}", item);
            }
            entry
        })
        .collect();

    info!("Catalog parsed: {} valid of {} entries", guides.len(), items.len());
    Ok(guides)
}

/// Look a guide up by file name first, then by display name
pub fn find_guide<'a>(guides: &'a [GuideEntry], key: &str) -> Option<&'a GuideEntry> {
    guides
        .iter()
        .find(|g| g.file == key)
        .or_else(|| guides.iter().find(|g| g.name == key))
}
