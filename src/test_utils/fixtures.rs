use serde_json::json;

use crate::{RecordId, User, test_utils::MockApi};

/// The user that owns the records created by [seed_categories].
pub(crate) fn test_user() -> User {
    User {
        id: RecordId::from(1),
        username: "alice".to_owned(),
    }
}

/// Seed the test user, an income category "Salary" (ID 1) and an expense
/// category "Food" (ID 2).
pub(crate) fn seed_categories(api: &MockApi) {
    api.seed("users", json!({"username": "alice", "password": "hunter2"}));
    api.seed(
        "categories",
        json!({"name": "Salary", "is_income": true, "user_id": 1, "transaction_ids": []}),
    );
    api.seed(
        "categories",
        json!({"name": "Food", "is_income": false, "user_id": 1, "transaction_ids": []}),
    );
}
