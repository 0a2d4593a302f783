//! View parameters and the derived page they produce.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::{Comment, CommentId};

/// Sortable columns, each mapped to an explicit field accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Id,
    Name,
    Email,
    Body,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Id, SortKey::Name, SortKey::Email, SortKey::Body];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Id => "ID",
            SortKey::Name => "Name",
            SortKey::Email => "Email",
            SortKey::Body => "Body",
        }
    }

    pub fn compare(self, a: &Comment, b: &Comment) -> std::cmp::Ordering {
        match self {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Email => a.email.cmp(&b.email),
            SortKey::Body => a.body.cmp(&b.body),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            "email" => Ok(SortKey::Email),
            "body" => Ok(SortKey::Body),
            other => Err(format!("unknown sort column '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Rows per page. `All` resolves to the filtered row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSize {
    Fixed(usize),
    All,
}

/// Selector value standing for "show every row".
pub const PAGE_SIZE_ALL_SENTINEL: i64 = -1;

pub const PAGE_SIZE_CHOICES: [PageSize; 5] = [
    PageSize::Fixed(5),
    PageSize::Fixed(10),
    PageSize::Fixed(20),
    PageSize::Fixed(50),
    PageSize::All,
];

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Fixed(10)
    }
}

impl PageSize {
    /// Maps a selector value onto a page size. Zero and negative values
    /// other than the sentinel are rejected.
    pub fn from_selector(value: i64) -> Option<Self> {
        if value == PAGE_SIZE_ALL_SENTINEL {
            return Some(PageSize::All);
        }
        usize::try_from(value)
            .ok()
            .filter(|size| *size > 0)
            .map(PageSize::Fixed)
    }

    /// Concrete slice length for a filtered row count.
    pub fn resolve(self, filtered_len: usize) -> usize {
        match self {
            PageSize::Fixed(size) => size,
            PageSize::All => filtered_len,
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSize::Fixed(size) => write!(f, "{size}"),
            PageSize::All => f.write_str("All"),
        }
    }
}

impl FromStr for PageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(PageSize::All);
        }
        let value: i64 = trimmed
            .parse()
            .map_err(|_| format!("invalid page size '{trimmed}'"))?;
        PageSize::from_selector(value).ok_or_else(|| format!("invalid page size '{trimmed}'"))
    }
}

/// Every input the derived view depends on besides the full set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewParams {
    pub search_term: String,
    pub sort: Option<SortSpec>,
    /// 1-indexed.
    pub page: usize,
    pub page_size: PageSize,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort: None,
            page: 1,
            page_size: PageSize::default(),
        }
    }
}

impl ViewParams {
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_sort(mut self, key: SortKey, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec { key, direction });
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }
}

/// The rows currently shown plus the aggregates the footer reports.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DerivedView {
    pub rows: Vec<Comment>,
    /// Filtered, pre-page row count.
    pub total_items: usize,
    /// Always at least 1.
    pub page_count: usize,
    pub effective_page_size: usize,
    /// Widened so any page of `i64` ids sums without overflow.
    pub sum_of_visible_ids: i128,
}

impl DerivedView {
    pub fn visible_ids(&self) -> impl Iterator<Item = CommentId> + '_ {
        self.rows.iter().map(|row| row.id)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
