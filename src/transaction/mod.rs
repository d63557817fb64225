//! Transactions: the domain types exchanged with the API and the pages for
//! listing, creating, editing and deleting them.

mod create;
mod delete;
mod domain;
mod edit;
mod form;
mod list;

pub use create::{create_transaction_endpoint, get_new_transaction_page};
pub use delete::delete_transaction_endpoint;
pub use domain::{NewTransaction, Transaction, validate_amount};
pub use edit::{edit_transaction_endpoint, get_edit_transaction_page};
pub use list::get_transactions_page;
