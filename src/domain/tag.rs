//! Tag management list

use serde::{Deserialize, Serialize};

use crate::domain::contrast::HexColor;
use crate::domain::error::DomainResult;

/// A user-defined tag as owned by the data layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    /// `#RRGGBB`
    pub color: String,
    #[serde(default)]
    pub usage_count: u32,
}

impl Tag {
    /// Only unused tags offer a delete affordance.
    pub fn can_delete(&self) -> bool {
        self.usage_count == 0
    }
}

/// One line of the tag list, with its badge colors resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRow {
    pub id: String,
    pub name: String,
    pub background: HexColor,
    pub foreground: HexColor,
    pub usage_count: u32,
    pub deletable: bool,
}

/// Build tag rows, keeping input order.
///
/// `filter` matches names case-insensitively; blank filters match all.
pub fn present_tags(tags: &[Tag], filter: Option<&str>) -> DomainResult<Vec<TagRow>> {
    let needle = filter
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_lowercase);

    tags.iter()
        .filter(|tag| match &needle {
            Some(needle) => tag.name.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .map(|tag| {
            let background = HexColor::parse(&tag.color)?;
            Ok(TagRow {
                id: tag.id.clone(),
                name: tag.name.clone(),
                background,
                foreground: background.contrasting_text(),
                usage_count: tag.usage_count,
                deletable: tag.can_delete(),
            })
        })
        .collect()
}
