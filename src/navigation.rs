//! This file defines the navigation bar shown at the top of every page for logged-in users.

use maud::{Markup, html};

use crate::{endpoints, html::APP_NAME};

/// A link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-blue-700 rounded-sm lg:bg-transparent
        lg:text-blue-700 lg:p-0 dark:text-white lg:dark:text-blue-500"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
        lg:hover:bg-transparent lg:border-0 lg:hover:text-blue-700 lg:p-0
        dark:text-white lg:dark:hover:text-blue-500 dark:hover:bg-gray-700
        dark:hover:text-white lg:dark:hover:bg-transparent"
        };

        html!(
            a
                href=(self.url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        )
    }
}

pub struct NavBar<'a> {
    username: &'a str,
    links: Vec<Link<'a>>,
}

impl<'a> NavBar<'a> {
    /// Get the navigation bar for `username`.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str, username: &'a str) -> NavBar<'a> {
        let links = [
            (endpoints::DASHBOARD_VIEW, "Dashboard"),
            (endpoints::TRANSACTIONS_VIEW, "Transactions"),
            (endpoints::CATEGORIES_VIEW, "Categories"),
        ]
        .into_iter()
        .map(|(url, title)| Link {
            url,
            title,
            is_current: active_endpoint == url,
        })
        .chain(std::iter::once(Link {
            url: endpoints::LOG_OUT,
            title: "Log out",
            is_current: false,
        }))
        .collect();

        NavBar { username, links }
    }

    pub fn into_html(self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a
                        href=(endpoints::ROOT)
                        class="flex items-center space-x-3 rtl:space-x-reverse"
                    {
                        span
                            class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            (APP_NAME)
                        }
                    }

                    span class="text-sm text-gray-500 dark:text-gray-400" { (self.username) }

                    div class="w-full lg:block lg:w-auto"
                    {
                        ul
                            class="font-medium flex flex-col p-4 lg:p-0 mt-4
                            border border-gray-100 rounded bg-gray-50
                            lg:flex-row lg:space-x-8 rtl:space-x-reverse lg:mt-0
                            lg:border-0 lg:bg-white dark:bg-gray-800
                            lg:dark:bg-gray-900 dark:border-gray-700"
                        {
                            @for link in self.links {
                                li { (link.into_html()) }
                            }
                        }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod nav_bar_tests {
    use crate::{endpoints, navigation::NavBar};

    #[test]
    fn set_active_endpoint() {
        let cases = [
            (endpoints::DASHBOARD_VIEW, true),
            (endpoints::TRANSACTIONS_VIEW, true),
            (endpoints::CATEGORIES_VIEW, true),
            (endpoints::ROOT, false),
            (endpoints::NEW_CATEGORY_VIEW, false),
            (endpoints::LOG_IN_VIEW, false),
            (endpoints::LOG_OUT, false),
        ];

        for (endpoint, should_be_active) in cases {
            let nav_bar = NavBar::new(endpoint, "alice");

            for link in nav_bar.links {
                let want = should_be_active && link.url == endpoint;
                assert_eq!(
                    link.is_current, want,
                    "link {} for endpoint {endpoint}: want is_current={want}",
                    link.url
                );
            }
        }
    }

    #[test]
    fn shows_username() {
        let html = NavBar::new(endpoints::DASHBOARD_VIEW, "alice")
            .into_html()
            .into_string();

        assert!(html.contains("alice"));
    }
}
