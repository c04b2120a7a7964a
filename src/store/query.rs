use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Product;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;

/// Raw listing parameters as they arrive in the query string.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub category: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    /// Build from decoded query pairs. A repeated key keeps its first value.
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            category: first_value(pairs, "category").map(str::to_string),
            page: first_value(pairs, "page").map(str::to_string),
            limit: first_value(pairs, "limit").map(str::to_string),
        }
    }

    /// Empty `category` means no filter.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    pub fn page(&self) -> usize {
        parse_positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE)
    }

    pub fn limit(&self) -> usize {
        parse_positive(self.limit.as_deref()).unwrap_or(DEFAULT_LIMIT)
    }
}

/// First value sent for `key`, if any.
pub fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Reads the leading integer of the value, so `"3.7"` is 3 and `"2abc"` is 2.
/// Absent, non-numeric and non-positive values all fall back to the default.
fn parse_positive(raw: Option<&str>) -> Option<usize> {
    let s = raw?.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if negative || digits == 0 {
        return None;
    }
    // Overflowing numerals saturate: the page is simply past the end.
    let n = rest[..digits].parse::<usize>().unwrap_or(usize::MAX);
    Some(n).filter(|n| *n > 0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub data: Vec<Product>,
}

impl Page {
    /// Slice `[(page-1)*limit, (page-1)*limit+limit)` out of `filtered`,
    /// clamped to its bounds.
    pub fn slice(filtered: Vec<Product>, page: usize, limit: usize) -> Self {
        let total = filtered.len();
        let start = page.saturating_sub(1).saturating_mul(limit);
        let data = filtered.into_iter().skip(start).take(limit).collect();
        Self {
            total,
            page,
            limit,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub total: usize,
    pub data: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total: usize,
    pub counts_by_category: BTreeMap<String, usize>,
}

impl CatalogStats {
    pub fn from_products<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let mut total = 0;
        let mut counts_by_category = BTreeMap::new();
        for product in products {
            total += 1;
            *counts_by_category.entry(product.category.clone()).or_insert(0) += 1;
        }
        Self {
            total,
            counts_by_category,
        }
    }
}

/// Case-insensitive substring match on the product name.
pub fn name_matches(product: &Product, needle_lower: &str) -> bool {
    product.name.to_lowercase().contains(needle_lower)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>) -> ListQuery {
        ListQuery {
            category: None,
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn defaults_apply_for_missing_or_junk_values() {
        let q = query(None, None);
        assert_eq!((q.page(), q.limit()), (1, 10));

        let q = query(Some("abc"), Some(""));
        assert_eq!((q.page(), q.limit()), (1, 10));

        let q = query(Some("0"), Some("-3"));
        assert_eq!((q.page(), q.limit()), (1, 10));

        let q = query(Some("3"), Some(" 25 "));
        assert_eq!((q.page(), q.limit()), (3, 25));

        let q = query(Some("3.7"), Some("2abc"));
        assert_eq!((q.page(), q.limit()), (3, 2));

        let q = query(Some("+4"), Some("1x"));
        assert_eq!((q.page(), q.limit()), (4, 1));

        let q = query(Some("x1"), Some("-0"));
        assert_eq!((q.page(), q.limit()), (1, 10));
    }

    #[test]
    fn repeated_keys_keep_the_first_value() {
        let pairs: Vec<(String, String)> = [("page", "2"), ("category", "tools"), ("page", "5")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let q = ListQuery::from_pairs(&pairs);
        assert_eq!(q.page(), 2);
        assert_eq!(q.limit(), 10);
        assert_eq!(q.category(), Some("tools"));
        assert_eq!(first_value(&pairs, "missing"), None);
    }

    #[test]
    fn empty_category_is_no_filter() {
        let q = ListQuery {
            category: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(q.category(), None);
    }

    #[test]
    fn slice_out_of_range_is_empty_not_error() {
        let page = Page::slice(Vec::new(), 5, 10);
        assert_eq!(page.total, 0);
        assert!(page.data.is_empty());

        let page = Page::slice(Vec::new(), usize::MAX, usize::MAX);
        assert!(page.data.is_empty());
    }
}
