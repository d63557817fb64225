//! Cards showing the month's total income, total expenses and net income.

use maud::{Markup, html};

use crate::{MonthlySummary, html::format_currency};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

fn summary_card(title: &str, amount: f64, amount_style: &str) -> Markup {
    html! {
        div class=(CARD_STYLE)
        {
            dt class="text-sm text-gray-600 dark:text-gray-400" { (title) }
            dd class={"text-2xl font-semibold " (amount_style)} { (format_currency(amount)) }
        }
    }
}

/// Renders the totals for the month in `summary`.
///
/// Net income is coloured red when the month's expenses exceed its income.
pub(super) fn summary_cards_view(summary: &MonthlySummary) -> Markup {
    let net_style = if summary.net_income < 0.0 {
        "text-red-600 dark:text-red-400"
    } else {
        "text-green-600 dark:text-green-400"
    };

    html! {
        dl
            data-summary
            class="grid grid-cols-1 sm:grid-cols-3 gap-4 w-full max-w-4xl mb-8"
        {
            (summary_card("Income", summary.total_income, "text-gray-900 dark:text-white"))
            (summary_card("Expenses", summary.total_expense, "text-gray-900 dark:text-white"))
            (summary_card("Net Income", summary.net_income, net_style))
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{Month, MonthlySummary, dashboard::cards::summary_cards_view};

    fn summary(total_income: f64, total_expense: f64) -> MonthlySummary {
        MonthlySummary {
            month: Month::new(2024, time::Month::March),
            income: Vec::new(),
            expenses: Vec::new(),
            total_income,
            total_expense,
            net_income: total_income - total_expense,
        }
    }

    fn net_income_class(summary: &MonthlySummary) -> String {
        let html = Html::parse_fragment(&summary_cards_view(summary).into_string());

        html.select(&Selector::parse("dd").unwrap())
            .nth(2)
            .and_then(|dd| dd.value().attr("class"))
            .unwrap_or_default()
            .to_owned()
    }

    #[test]
    fn negative_net_income_is_red() {
        let class = net_income_class(&summary(10.0, 25.0));

        assert!(class.contains("text-red-600"), "got class {class:?}");
    }

    #[test]
    fn positive_net_income_is_green() {
        let class = net_income_class(&summary(25.0, 10.0));

        assert!(class.contains("text-green-600"), "got class {class:?}");
    }
}
