//! Categories group transactions into kinds of income or expense, e.g. "Salary" or "Food".

mod create;
mod domain;
mod list;

pub use create::{create_category_endpoint, get_new_category_page};
pub use domain::{Category, CategoryName, NewCategory};
pub use list::get_categories_page;
