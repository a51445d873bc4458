use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a server-side paginated list, as returned by every list endpoint.
///
/// Only `content`, `total_elements`, `total_pages`, `first`, `last` and
/// `number_of_elements` drive the list screens; `pageable` and `sort` are kept
/// verbatim for consumers that need them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
    #[serde(default)]
    pub number_of_elements: u32,
    #[serde(default)]
    pub empty: bool,
    #[serde(default)]
    pub pageable: Value,
    #[serde(default)]
    pub sort: Value,
}

impl<T> PageResult<T> {
    /// Build a page the way the backend would for `content` at `number` of a
    /// list holding `total_elements` rows.
    pub fn new(content: Vec<T>, number: u32, size: u32, total_elements: u64) -> Self {
        let total_pages = if size == 0 {
            0
        } else {
            u32::try_from(total_elements.div_ceil(u64::from(size))).unwrap_or(u32::MAX)
        };
        let number_of_elements = u32::try_from(content.len()).unwrap_or(u32::MAX);
        Self {
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            number,
            size,
            first: number == 0,
            last: total_pages == 0 || number.saturating_add(1) >= total_pages,
            number_of_elements,
            pageable: Value::Null,
            sort: Value::Null,
        }
    }

    /// True when this page holds no rows.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// True when the page index lies beyond the last page, which happens after
    /// deleting the only row of the final page.
    pub fn is_past_end(&self) -> bool {
        self.number > 0 && self.number >= self.total_pages
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            first: self.first,
            last: self.last,
            number_of_elements: self.number_of_elements,
            empty: self.empty,
            pageable: self.pageable,
            sort: self.sort,
        }
    }
}

impl PageResult<Value> {
    /// Typed view of the rows.
    pub fn decode<U: DeserializeOwned>(&self) -> Result<PageResult<U>, serde_json::Error> {
        let content = self
            .content
            .iter()
            .cloned()
            .map(serde_json::from_value)
            .collect::<Result<Vec<U>, _>>()?;
        Ok(PageResult {
            content,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
            first: self.first,
            last: self.last,
            number_of_elements: self.number_of_elements,
            empty: self.empty,
            pageable: self.pageable.clone(),
            sort: self.sort.clone(),
        })
    }
}
