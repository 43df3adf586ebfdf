/// Expense categories offered by the category picker.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Main expenses",
    "Products",
    "Car",
    "Self care",
    "Child care",
    "Household products",
    "Education",
    "Leisure",
    "Other expenses",
    "Entertainment",
];

/// Cycles through [`EXPENSE_CATEGORIES`], starting from the transaction's
/// current category.
///
/// A category that is not in the list is kept as the current value until the
/// user moves the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPicker {
    index: Option<usize>,
    current: Option<String>,
}

impl CategoryPicker {
    pub fn new(current: Option<&str>) -> Self {
        let index = current.and_then(|c| {
            EXPENSE_CATEGORIES
                .iter()
                .position(|known| known.eq_ignore_ascii_case(c))
        });
        Self {
            index,
            current: current.map(str::to_string),
        }
    }

    pub fn current(&self) -> Option<&str> {
        match self.index {
            Some(idx) => Some(EXPENSE_CATEGORIES[idx]),
            None => self.current.as_deref(),
        }
    }

    /// Moves to the next category and returns it.
    pub fn next(&mut self) -> &'static str {
        let idx = match self.index {
            Some(idx) => (idx + 1) % EXPENSE_CATEGORIES.len(),
            None => 0,
        };
        self.select(idx)
    }

    /// Moves to the previous category and returns it.
    pub fn prev(&mut self) -> &'static str {
        let idx = match self.index {
            Some(0) | None => EXPENSE_CATEGORIES.len() - 1,
            Some(idx) => idx - 1,
        };
        self.select(idx)
    }

    fn select(&mut self, idx: usize) -> &'static str {
        self.index = Some(idx);
        let category = EXPENSE_CATEGORIES[idx];
        self.current = Some(category.to_string());
        category
    }
}
