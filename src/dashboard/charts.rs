//! Chart generation and rendering for the dashboard.
//!
//! This module turns the derived month report into ECharts visualizations:
//! - **Daily Spending**: bar chart of per-day totals within the selected month
//! - **Spending by Category**: pie chart of per-category totals
//! - **Month over Month**: the selected month's total next to the previous month's
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    datatype::DataPointItem,
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, JsFunction, Tooltip, Trigger,
    },
    series::{Pie, bar::Bar},
};
use maud::{Markup, PreEscaped, html};
use time::Date;

use crate::{dashboard::report::Comparison, html::HeadElement, period::Period};

/// The bar color for the daily spending chart.
const DAILY_BAR_COLOR: &str = "rgba(60, 176, 253, 0.6)";

/// The slice colors for the category pie chart, cycled when there are more
/// categories than colors.
const CATEGORY_PALETTE: [&str; 4] = ["#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0"];

/// The bar colors for the month over month chart: previous month, then the
/// selected month.
const COMPARISON_COLORS: [&str; 2] = ["#f97316", "#22c55e"];

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
///
/// # Arguments
/// * `charts` - The charts to render containers for
///
/// # Returns
/// Maud markup containing a grid of chart container divs.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
///
/// # Arguments
/// * `charts` - The charts to generate initialization scripts for
///
/// # Returns
/// HeadElement containing the initialization JavaScript.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Splits the per-day totals into parallel label and value lists.
///
/// Labels are day-of-month numbers in the order of the source pairs, so the
/// same ledger always produces the same chart configuration.
pub(super) fn daily_series(daily_totals: &[(Date, f64)]) -> (Vec<String>, Vec<f64>) {
    let labels = daily_totals
        .iter()
        .map(|(date, _)| date.day().to_string())
        .collect();
    let values = daily_totals.iter().map(|(_, total)| *total).collect();

    (labels, values)
}

/// Splits the per-category totals into parallel label and value lists,
/// keeping the order of the source pairs.
pub(super) fn category_series(category_totals: &[(String, f64)]) -> (Vec<String>, Vec<f64>) {
    let labels = category_totals
        .iter()
        .map(|(category, _)| category.clone())
        .collect();
    let values = category_totals.iter().map(|(_, total)| *total).collect();

    (labels, values)
}

/// Shapes the month comparison into a two-bar series, previous month first.
pub(super) fn comparison_series(comparison: &Comparison) -> (Vec<String>, Vec<f64>) {
    let labels = vec!["Previous Month".to_owned(), "Current Month".to_owned()];
    let values = vec![comparison.previous_total, comparison.current_total];

    (labels, values)
}

pub(super) fn daily_chart(daily_totals: &[(Date, f64)], period: Period) -> Chart {
    let (labels, values) = daily_series(daily_totals);

    Chart::new()
        .title(Title::new().text("Daily Spending").subtext(period.label()))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Bar::new()
                .name("Spent")
                .item_style(ItemStyle::new().color(DAILY_BAR_COLOR))
                .data(values),
        )
}

pub(super) fn category_chart(category_totals: &[(String, f64)], period: Period) -> Chart {
    let data: Vec<DataPointItem> = category_totals
        .iter()
        .enumerate()
        .map(|(index, (category, total))| {
            DataPointItem::new(*total)
                .name(category.as_str())
                .item_style(ItemStyle::new().color(CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()]))
        })
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Spending by Category")
                .subtext(period.label()),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("1%"))
        .series(Pie::new().name("Categories").radius("55%").data(data))
}

pub(super) fn comparison_chart(comparison: &Comparison, period: Period) -> Chart {
    let (labels, values) = comparison_series(comparison);
    let data: Vec<DataPointItem> = values
        .iter()
        .zip(COMPARISON_COLORS)
        .map(|(value, color)| DataPointItem::new(*value).item_style(ItemStyle::new().color(color)))
        .collect();

    Chart::new()
        .title(Title::new().text("Month over Month").subtext(period.label()))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Total Spent").data(data))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod charts_tests {
    use time::macros::date;

    use crate::dashboard::report::Comparison;

    use super::{category_series, comparison_series, daily_series};

    #[test]
    fn daily_series_keeps_source_order_and_numbers_the_days() {
        let daily_totals = vec![
            (date!(2024 - 01 - 20), 30.0),
            (date!(2024 - 01 - 05), 100.0),
            (date!(2024 - 01 - 12), 50.0),
        ];

        let (labels, values) = daily_series(&daily_totals);

        assert_eq!(labels, vec!["20", "5", "12"]);
        assert_eq!(values, vec![30.0, 100.0, 50.0]);
    }

    #[test]
    fn category_series_keeps_source_order() {
        let category_totals = vec![("Food".to_owned(), 125.0), ("Rent".to_owned(), 50.0)];

        let (labels, values) = category_series(&category_totals);

        assert_eq!(labels, vec!["Food", "Rent"]);
        assert_eq!(values, vec![125.0, 50.0]);
    }

    #[test]
    fn comparison_series_puts_the_previous_month_first() {
        let comparison = Comparison {
            previous_total: 200.0,
            current_total: 150.0,
            difference: -50.0,
            percent_change: -25.0,
        };

        let (labels, values) = comparison_series(&comparison);

        assert_eq!(labels, vec!["Previous Month", "Current Month"]);
        assert_eq!(values, vec![200.0, 150.0]);
    }
}
