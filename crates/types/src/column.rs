/// Static description of one post table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSpec {
    pub id: &'static str,
    pub header: &'static str,
    pub min_size: u32,
}

pub const POST_COLUMNS: [ColumnSpec; 5] = [
    ColumnSpec {
        id: "category",
        header: "Category",
        min_size: 80,
    },
    ColumnSpec {
        id: "title",
        header: "Title",
        min_size: 120,
    },
    ColumnSpec {
        id: "body",
        header: "Body",
        min_size: 150,
    },
    ColumnSpec {
        id: "tags",
        header: "Tags",
        min_size: 100,
    },
    ColumnSpec {
        id: "createdAt",
        header: "Created",
        min_size: 90,
    },
];

pub fn column(id: &str) -> Option<&'static ColumnSpec> {
    POST_COLUMNS.iter().find(|c| c.id == id)
}
