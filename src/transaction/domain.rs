//! Core transaction domain types.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, RecordId};

pub(crate) mod date_format {
    //! Dates are exchanged with the API as "YYYY-MM-DD" strings.
    //!
    //! Older records may hold a full date-time string, e.g.
    //! "2024-03-05T10:00:00.000Z", in which case only the date part is read.
    use serde::{Deserialize, Deserializer, Serializer};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    pub const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let formatted = date
            .format(DATE_FORMAT)
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let date_part = s.get(..10).unwrap_or(&s);
        Date::parse(date_part, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

mod amount_format {
    //! Amounts may arrive as JSON numbers or as numeric strings, since form
    //! values were historically posted to the API without conversion.
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAmount {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawAmount::deserialize(deserializer)? {
            RawAmount::Number(amount) => Ok(amount),
            RawAmount::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|error| serde::de::Error::custom(format!("invalid amount {text:?}: {error}"))),
        }
    }
}

/// A dated record of money coming in or going out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID the API assigned to the transaction.
    pub id: RecordId,
    /// The user who owns the transaction.
    pub user_id: RecordId,
    /// When the transaction happened.
    #[serde(with = "date_format")]
    pub date: Date,
    /// Whether the transaction is income (`true`) or an expense (`false`).
    pub is_income: bool,
    /// The non-negative amount of money.
    #[serde(deserialize_with = "amount_format::deserialize")]
    pub amount: f64,
    /// A free-form note.
    #[serde(default)]
    pub memo: String,
    /// The category the transaction belongs to.
    pub category_id: RecordId,
}

/// The request body for creating a transaction or replacing an existing one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    /// The user who owns the transaction.
    pub user_id: RecordId,
    /// When the transaction happened.
    #[serde(with = "date_format")]
    pub date: Date,
    /// Whether the transaction is income (`true`) or an expense (`false`).
    pub is_income: bool,
    /// The non-negative amount of money.
    pub amount: f64,
    /// A free-form note.
    pub memo: String,
    /// The category the transaction belongs to.
    pub category_id: RecordId,
}

/// Check that `amount` can be recorded on a transaction.
///
/// # Errors
///
/// Returns [Error::InvalidAmount] if `amount` is negative, infinite or NaN.
pub fn validate_amount(amount: f64) -> Result<f64, Error> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount(amount))
    }
}
