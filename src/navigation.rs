//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::{endpoints, theme::Theme};

/// Template for a link in the navigation bar.
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

        html!( a href=(self.url) class=(style) { (self.title) } )
    }
}

pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
    theme_toggle: Option<(Theme, String)>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![Link {
            url: endpoints::DASHBOARD_VIEW,
            title: "Dashboard",
            is_current: active_endpoint == endpoints::DASHBOARD_VIEW,
        }];

        NavBar {
            links,
            theme_toggle: None,
        }
    }

    /// Add a button that flips the colour theme and reloads `redirect_url`.
    pub fn with_theme_toggle(mut self, theme: Theme, redirect_url: &str) -> Self {
        self.theme_toggle = Some((theme, redirect_url.to_owned()));
        self
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
                        href="/"
                        class="flex items-center space-x-3 rtl:space-x-reverse"
                    {
                        img
                            src="/static/favicon-128x128.png"
                            alt="Outlay Logo"
                            class="h-8"
                        ;

                        span
                            class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            "Outlay"
                        }
                    }

                    div class="flex items-center gap-6"
                    {
                        ul
                            class="font-medium flex flex-row space-x-8 rtl:space-x-reverse"
                        {
                            @for link in self.links.into_iter() {
                                li { (link.into_html()) }
                            }
                        }

                        @if let Some((theme, redirect_url)) = self.theme_toggle {
                            (theme_toggle_button(theme, &redirect_url))
                        }
                    }
                }
            }
        )
    }
}

/// A button that posts to the theme toggle endpoint.
///
/// The whole page is re-rendered after the toggle, so the button does not
/// swap any content itself.
fn theme_toggle_button(theme: Theme, redirect_url: &str) -> Markup {
    let toggle_url = endpoints::with_redirect(endpoints::TOGGLE_THEME, redirect_url);

    html!(
        button
            type="button"
            hx-post=(toggle_url)
            hx-target-error="#alert-container"
            data-theme-toggle
            title=(theme.toggle_label())
            class="py-2 px-3 text-sm font-medium text-gray-900 bg-white rounded
                border border-gray-200 hover:bg-gray-100 dark:bg-gray-800
                dark:text-gray-400 dark:border-gray-600 dark:hover:text-white
                dark:hover:bg-gray-700 cursor-pointer"
        {
            @match theme {
                Theme::Dark => "Light mode",
                Theme::Light => "Dark mode",
            }
        }
    )
}
