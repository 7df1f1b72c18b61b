use leptos::*;
use valentis_core::chart::AreaChart;
use valentis_core::dto::{DepartmentHeat, ForecastPoint};
use valentis_core::format::{format_currency, format_number};
use valentis_core::views;

/// Projected risk against projected collections, as two filled areas.
#[component]
pub fn ForecastChart(points: Vec<ForecastPoint>) -> impl IntoView {
    let Some(chart) = AreaChart::layout(&points) else {
        return ().into_view();
    };

    let grid = chart
        .y_ticks
        .iter()
        .map(|tick| {
            view! {
                <g class="chart__tick">
                    <line x1=chart.left x2=chart.right y1=tick.y y2=tick.y stroke-dasharray="3 3"></line>
                    <text x={chart.left - 8.0} y={tick.y + 4.0} text-anchor="end">{tick.label.clone()}</text>
                </g>
            }
        })
        .collect_view();
    let months = chart
        .months
        .iter()
        .map(|m| {
            view! {
                <text class="chart__month" x=m.x y={chart.baseline + 18.0} text-anchor="middle">
                    {m.label.clone()}
                </text>
            }
        })
        .collect_view();

    view! {
        <div class="chart-container">
            <h3>"Revenue at Risk: 6 Month Forecast"</h3>
            <svg class="chart" viewBox=AreaChart::view_box() preserveAspectRatio="none">
                <defs>
                    <linearGradient id="riskGrad" x1="0" y1="0" x2="0" y2="1">
                        <stop offset="5%" stop-color="#f87171" stop-opacity="0.3"></stop>
                        <stop offset="95%" stop-color="#f87171" stop-opacity="0"></stop>
                    </linearGradient>
                    <linearGradient id="collectGrad" x1="0" y1="0" x2="0" y2="1">
                        <stop offset="5%" stop-color="#34d399" stop-opacity="0.3"></stop>
                        <stop offset="95%" stop-color="#34d399" stop-opacity="0"></stop>
                    </linearGradient>
                </defs>
                {grid}
                <path class="chart__area" d=chart.risk.area.clone() fill="url(#riskGrad)"></path>
                <path class="chart__line" d=chart.risk.line.clone() stroke="#f87171" fill="none"></path>
                <path class="chart__area" d=chart.collections.area.clone() fill="url(#collectGrad)"></path>
                <path class="chart__line" d=chart.collections.line.clone() stroke="#34d399" fill="none"></path>
                {months}
            </svg>
            <div class="chart__legend">
                <span class="chart__legend-item chart__legend-item--risk">"Projected Risk"</span>
                <span class="chart__legend-item chart__legend-item--collections">"Projected Collections"</span>
            </div>
        </div>
    }
    .into_view()
}

/// One cell per department, tinted by severity.
#[component]
pub fn HeatmapGrid(cells: Vec<DepartmentHeat>) -> impl IntoView {
    if cells.is_empty() {
        return ().into_view();
    }
    let cells = cells
        .into_iter()
        .map(|cell| {
            let tone = views::severity_tone(cell.severity).modifier();
            view! {
                <div class=format!("heatmap-cell heatmap-cell--{}", cell.severity.as_str())>
                    <div class="heatmap-cell__dept">{cell.department.clone()}</div>
                    <Metric label="Avg Balance" value=format_currency(cell.avg_balance)/>
                    <Metric label="Avg DPD" value=format!("{} days", format_number(cell.avg_days_past_due))/>
                    <Metric label="High Risk %" value=format!("{}%", format_number(cell.high_risk_pct))/>
                    <Metric label="Refunds" value=cell.refund_count.to_string()/>
                    <Metric label="Chargebacks" value=cell.chargeback_count.to_string()/>
                    <div class=format!("heatmap-cell__score heatmap-cell__score--{tone}")>
                        {format_number(cell.risk_score)}
                    </div>
                </div>
            }
        })
        .collect_view();
    view! { <div class="heatmap-grid">{cells}</div> }.into_view()
}

#[component]
fn Metric(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="heatmap-cell__metric">
            <span>{label}</span>
            <span>{value}</span>
        </div>
    }
}
