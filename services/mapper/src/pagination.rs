use std::ops::Deref;

use crate::item::Item;

/// Every result of a query or scan, across all the pages it took to read them.
#[derive(Clone, Debug, PartialEq)]
pub struct PaginatedList<T> {
    items: Vec<T>,
    pages: usize,
}

impl<T> PaginatedList<T> {
    pub fn new(items: Vec<T>, pages: usize) -> Self {
        PaginatedList { items, pages }
    }

    /// Number of requests it took to read the whole list.
    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Deref for PaginatedList<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

/// A single page of query results.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryResultPage<T> {
    pub results: Vec<T>,
    /// Where the next page starts; `None` on the last page.
    pub last_evaluated_key: Option<Item>,
    pub count: i32,
    pub scanned_count: i32,
}

/// A single page of scan results.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanResultPage<T> {
    pub results: Vec<T>,
    pub last_evaluated_key: Option<Item>,
    pub count: i32,
    pub scanned_count: i32,
}
