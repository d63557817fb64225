//! Core category domain types.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, RecordId};

/// A validated, non-empty category name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyCategoryName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for CategoryName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryName::new(s)
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A grouping for transactions, either for income (e.g., 'Salary') or for
/// expenses (e.g., 'Groceries').
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// The ID the API assigned to the category.
    pub id: RecordId,
    /// The display name.
    pub name: CategoryName,
    /// Whether the category holds income (`true`) or expenses (`false`).
    pub is_income: bool,
    /// The user who owns the category.
    pub user_id: RecordId,
    /// Kept for compatibility with the API's category records, always
    /// created empty.
    #[serde(default)]
    pub transaction_ids: Vec<RecordId>,
}

/// The request body for creating a category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCategory {
    /// The display name.
    pub name: CategoryName,
    /// Always empty for a new category.
    pub transaction_ids: Vec<RecordId>,
    /// Whether the category holds income (`true`) or expenses (`false`).
    pub is_income: bool,
    /// The user who will own the category.
    pub user_id: RecordId,
}

impl NewCategory {
    /// Create the request body for a category owned by `user_id`.
    pub fn new(name: CategoryName, is_income: bool, user_id: RecordId) -> Self {
        Self {
            name,
            transaction_ids: Vec::new(),
            is_income,
            user_id,
        }
    }
}

/// Form data for category creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryFormData {
    pub name: String,
    pub kind: CategoryKind,
}

/// Which side of the ledger a category is on, as submitted by the category form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    pub fn is_income(self) -> bool {
        self == CategoryKind::Income
    }
}
