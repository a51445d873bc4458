use std::fmt;

use crate::models::ResourceKind;
use crate::pagination::PaginationState;

/// Identity of one cached page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    pub kind: ResourceKind,
    pub page: u32,
    pub size: u32,
    pub sort: String,
}

impl QueryKey {
    pub fn new(kind: ResourceKind, state: &PaginationState) -> Self {
        Self {
            kind,
            page: state.page,
            size: state.size,
            sort: state.sort.clone(),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}?page={}&size={}&sort={}",
            self.kind, self.page, self.size, self.sort
        )
    }
}
