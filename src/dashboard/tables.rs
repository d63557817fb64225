//! The per-category breakdown tables on the dashboard.

use maud::{Markup, html};

use crate::{
    CategorySummary, endpoints,
    html::{LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
};

/// A table with one row per category and the sum of its transactions,
/// followed by a footer with `total`.
pub(super) fn category_totals_table(
    title: &str,
    categories: &[CategorySummary],
    total: f64,
) -> Markup {
    html! {
        section
        {
            h2 class="text-xl font-semibold mb-2" { (title) }

            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                    }
                }

                tbody
                {
                    @for category in categories {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE)
                            {
                                a
                                    href={(endpoints::TRANSACTIONS_VIEW) "?category_id=" (category.id)}
                                    class=(LINK_STYLE)
                                {
                                    (category.name)
                                }
                            }
                            td class={(TABLE_CELL_STYLE) " text-right"} { (format_currency(category.total)) }
                        }
                    }
                }

                tfoot
                {
                    tr class="font-semibold text-gray-900 dark:text-white"
                    {
                        th scope="row" class=(TABLE_CELL_STYLE) { "Total" }
                        td class={(TABLE_CELL_STYLE) " text-right"} { (format_currency(total)) }
                    }
                }
            }
        }
    }
}
