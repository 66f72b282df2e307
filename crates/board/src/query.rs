use chrono::NaiveDate;
use postboard_types::post::{Category, PostsParams};

use super::sort::Sort;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }
}

/// Everything that decides which sequence of pages is fetched.
/// Two descriptors that compare equal share a query key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryDescriptor {
    pub search: Option<String>,
    pub category: Option<Category>,
    pub sort: Option<Sort>,
    pub date_range: DateRange,
    pub page_size: u32,
}

impl QueryDescriptor {
    pub fn new(page_size: u32) -> Self {
        Self {
            search: None,
            category: None,
            sort: None,
            date_range: DateRange::default(),
            page_size,
        }
    }

    /// Blank text clears the search.
    pub fn with_search(self, text: &str) -> Self {
        let search = if text.trim().is_empty() {
            None
        } else {
            Some(text.to_string())
        };
        Self { search, ..self }
    }

    pub fn with_category(self, category: Option<Category>) -> Self {
        Self { category, ..self }
    }

    pub fn with_sort(self, sort: Option<Sort>) -> Self {
        Self { sort, ..self }
    }

    pub fn with_date_range(self, date_range: DateRange) -> Self {
        Self { date_range, ..self }
    }

    /// Request parameters for the page after `cursor`, or the first page.
    pub fn params(&self, cursor: Option<&str>) -> PostsParams {
        PostsParams {
            limit: Some(self.page_size),
            prev_cursor: None,
            next_cursor: cursor.map(str::to_string),
            sort: self.sort.map(|s| s.field),
            order: self.sort.map(|s| s.order),
            category: self.category,
            search: self.search.clone(),
            from: self.date_range.from,
            to: self.date_range.to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postboard_types::post::{SortField, SortOrder};

    #[test]
    fn test_unsorted_sends_no_order() {
        let params = QueryDescriptor::new(10).params(None);
        assert_eq!(params.limit, Some(10));
        assert!(params.sort.is_none());
        assert!(params.order.is_none());
        assert!(params.next_cursor.is_none());
    }

    #[test]
    fn test_params_carry_every_filter() {
        let d = QueryDescriptor::new(20)
            .with_search("rust")
            .with_category(Some(Category::Notice))
            .with_sort(Some(Sort::new(SortField::Title, SortOrder::Asc)))
            .with_date_range(DateRange::new(NaiveDate::from_ymd_opt(2025, 1, 1), None));
        let params = d.params(Some("c1"));
        assert_eq!(params.search.as_deref(), Some("rust"));
        assert_eq!(params.category, Some(Category::Notice));
        assert_eq!(params.sort, Some(SortField::Title));
        assert_eq!(params.order, Some(SortOrder::Asc));
        assert_eq!(params.next_cursor.as_deref(), Some("c1"));
        assert_eq!(params.from, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert!(params.to.is_none());
    }

    #[test]
    fn test_blank_search_equals_no_search() {
        let base = QueryDescriptor::new(10);
        assert_eq!(base.clone().with_search("   "), base);
        assert_ne!(base.clone().with_search("a"), base);
    }
}
