use postboard_types::post::{SortField, SortOrder};

/// An active sort: only one field is sorted at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Next state after clicking `field`:
    /// unsorted -> desc -> asc -> unsorted. A different field starts over at desc.
    pub fn cycle(current: Option<Sort>, field: SortField) -> Option<Sort> {
        match current {
            Some(sort) if sort.field == field => match sort.order {
                SortOrder::Desc => Some(Sort::new(field, SortOrder::Asc)),
                SortOrder::Asc => None,
            },
            _ => Some(Sort::new(field, SortOrder::Desc)),
        }
    }

    /// Order shown on the header of `field`, if it is the sorted one.
    pub fn order_of(current: Option<Sort>, field: SortField) -> Option<SortOrder> {
        current.filter(|s| s.field == field).map(|s| s.order)
    }
}
