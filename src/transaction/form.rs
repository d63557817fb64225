//! The form used to create and edit transactions.

use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    Category, RecordId,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The data submitted by the transaction form.
///
/// Whether the transaction is income is not part of the form, it is taken
/// from the chosen category.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionForm {
    #[serde(with = "crate::transaction::domain::date_format")]
    pub date: Date,
    pub amount: f64,
    #[serde(default)]
    pub memo: String,
    pub category_id: RecordId,
}

/// The values the form is filled in with.
pub struct TransactionFormDefaults<'a> {
    pub date: Date,
    pub amount: Option<f64>,
    pub memo: &'a str,
    pub category_id: Option<&'a RecordId>,
}

/// Where the form is sent and how.
pub enum FormTarget<'a> {
    /// `hx-post` to the given endpoint.
    Create(&'a str),
    /// `hx-put` to the given endpoint.
    Update(&'a str),
}

pub fn transaction_form(
    target: FormTarget<'_>,
    defaults: &TransactionFormDefaults<'_>,
    income_categories: &[Category],
    expense_categories: &[Category],
    submit_label: &str,
) -> Markup {
    let (hx_post, hx_put) = match target {
        FormTarget::Create(endpoint) => (Some(endpoint), None),
        FormTarget::Update(endpoint) => (None, Some(endpoint)),
    };
    let amount = defaults.amount.map(|amount| format!("{amount:.2}"));
    let category_option = |category: &Category| {
        let is_selected = defaults.category_id == Some(&category.id);

        html! {
            option value=(category.id) selected[is_selected] { (category.name) }
        }
    };

    html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    id="date"
                    type="date"
                    name="date"
                    value=(defaults.date)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    id="amount"
                    type="number"
                    name="amount"
                    min="0"
                    step="0.01"
                    placeholder="0.00"
                    value=[amount]
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    id="category_id"
                    name="category_id"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" disabled selected[defaults.category_id.is_none()]
                    {
                        "Select a category"
                    }

                    @if !income_categories.is_empty() {
                        optgroup label="Income"
                        {
                            @for category in income_categories {
                                (category_option(category))
                            }
                        }
                    }

                    @if !expense_categories.is_empty() {
                        optgroup label="Expenses"
                        {
                            @for category in expense_categories {
                                (category_option(category))
                            }
                        }
                    }
                }
            }

            div
            {
                label for="memo" class=(FORM_LABEL_STYLE) { "Memo" }

                input
                    id="memo"
                    type="text"
                    name="memo"
                    placeholder="Memo"
                    value=(defaults.memo)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_label) }
        }
    }
}
