#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Category {
    pub(crate) id: i64,
    pub(crate) title: String,
}

impl Category {
    /// Find a category by exact title in a slice.
    pub(crate) fn find_by_title<'a>(categories: &'a [Category], title: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.title == title)
    }

    /// Find a category by ID in a slice.
    pub(crate) fn find_by_id(categories: &[Category], id: i64) -> Option<&Category> {
        categories.iter().find(|c| c.id == id)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}
