use factor_core::format::{fmt_coefficient, fmt_p_value, fmt_stat};
use factor_core::model::{FactorCoefficient, ModelResult, ModelStats};
use leptos::*;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
use chart_render::{draw_line_chart, draw_scatter_chart, BarChart, ChartTheme, LineSeries};
#[cfg(target_arch = "wasm32")]
use factor_core::series::{trailing_mean, MA_WINDOW};
#[cfg(target_arch = "wasm32")]
use gloo_timers::future::TimeoutFuture;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::spawn_local;

/// Result panels: the two statistics tables plus the three chart regions.
/// Tables render reactively from the result signal; charts are rebuilt one
/// tick after each new result, once their canvases are in the DOM, and the
/// previous bar chart is destroyed first so its frame loop and timers stop.
#[component]
pub fn ResultsView(result: RwSignal<Option<ModelResult>>) -> impl IntoView {
    #[cfg(target_arch = "wasm32")]
    {
        let bar_chart: Rc<RefCell<Option<BarChart>>> = Rc::new(RefCell::new(None));
        let bar_for_effect = bar_chart.clone();
        create_effect(move |_| {
            let Some(model) = result.get() else {
                return;
            };
            let bar = bar_for_effect.clone();
            spawn_local(async move {
                // The canvases exist only after this render flushes.
                TimeoutFuture::new(0).await;
                if let Some(previous) = bar.borrow_mut().take() {
                    previous.destroy();
                }
                match build_charts(&model) {
                    Ok(chart) => *bar.borrow_mut() = Some(chart),
                    Err(err) => web_sys::console::error_1(&err),
                }
            });
        });
        on_cleanup(move || {
            if let Some(chart) = bar_chart.borrow_mut().take() {
                chart.destroy();
            }
        });
    }

    let visible = move || {
        if result.get().is_some() {
            "block"
        } else {
            "none"
        }
    };

    view! {
        <section id="model-stats-container" class="panel" style:display=visible>
            <h5>"模型统计"</h5>
            <table class="stats-table">
                <tbody id="model-stats-body">
                    {move || result.get().map(|model| stats_rows(&model.stats_data))}
                </tbody>
            </table>
            <h5>"因子系数"</h5>
            <table class="stats-table">
                <thead>
                    <tr>
                        <th>"因子"</th>
                        <th>"系数"</th>
                        <th>"标准误"</th>
                        <th>"t 统计量"</th>
                        <th>"p 值"</th>
                    </tr>
                </thead>
                <tbody id="coefficients-body">
                    {move || result.get().map(|model| coefficient_rows(&model.stats_data.coefficients))}
                </tbody>
            </table>
        </section>
        <section id="charts-container" class="panel hidden-chart" style:display=visible>
            <h5>"因子组合解释力 (R²)"</h5>
            <canvas id="r2_chart" class="chart-canvas"></canvas>
        </section>
        <section id="line-container" class="panel" style:display=visible>
            <h5>"真实 vs 预测收益"</h5>
            <canvas id="line_chart" class="chart-canvas"></canvas>
        </section>
        <section id="scatter-container" class="panel" style:display=visible>
            <h5>"因子散点图"</h5>
            <div id="scatter_charts" class="scatter-grid">
                {move || result.get().map(|model| scatter_cells(&model))}
            </div>
        </section>
    }
}

/// Five summary rows, in fixed order.
fn stats_rows(stats: &ModelStats) -> View {
    let rows = [
        ("R²", fmt_stat(stats.r_squared)),
        ("调整后 R²", fmt_stat(stats.adj_r_squared)),
        ("F 统计量", fmt_stat(stats.f_statistic)),
        ("p 值", fmt_p_value(stats.p_value)),
        ("观测数", stats.num_observations.to_string()),
    ];
    rows.into_iter()
        .map(|(name, value)| {
            view! {
                <tr>
                    <td>{name}</td>
                    <td>{value}</td>
                </tr>
            }
        })
        .collect_view()
}

/// One row per factor, five formatted columns.
fn coefficient_rows(coefficients: &[FactorCoefficient]) -> View {
    coefficients
        .iter()
        .map(|coef| {
            view! {
                <tr>
                    <td>{coef.factor.clone()}</td>
                    <td>{fmt_coefficient(coef.coefficient)}</td>
                    <td>{fmt_coefficient(coef.std_error)}</td>
                    <td>{fmt_stat(coef.t_statistic)}</td>
                    <td>{fmt_p_value(coef.p_value)}</td>
                </tr>
            }
        })
        .collect_view()
}

/// One generated cell per scatter factor key, heading plus canvas.
fn scatter_cells(model: &ModelResult) -> View {
    model
        .scatter
        .keys()
        .map(|factor| {
            let canvas_id = format!("scatter_{factor}");
            view! {
                <div class="scatter-cell">
                    <h6>{factor.clone()}</h6>
                    <canvas id=canvas_id class="chart-canvas scatter-canvas"></canvas>
                </div>
            }
        })
        .collect_view()
}

#[cfg(target_arch = "wasm32")]
fn build_charts(model: &ModelResult) -> Result<BarChart, JsValue> {
    let theme = ChartTheme::default();

    let bar = BarChart::new(
        "r2_chart",
        &model.r2_chart.factors,
        &model.r2_chart.scores,
        theme.clone(),
    )?;
    bar.observe("charts-container")?;

    let ma_true = trailing_mean(&model.line_chart.y_true, MA_WINDOW);
    let ma_pred = trailing_mean(&model.line_chart.y_pred, MA_WINDOW);
    let series = [
        LineSeries {
            name: "真实".to_string(),
            points: model.line_chart.y_true.iter().copied().map(Some).collect(),
        },
        LineSeries {
            name: "预测".to_string(),
            points: model.line_chart.y_pred.iter().copied().map(Some).collect(),
        },
        LineSeries {
            name: "真实(滑动平均)".to_string(),
            points: ma_true,
        },
        LineSeries {
            name: "预测(滑动平均)".to_string(),
            points: ma_pred,
        },
    ];
    draw_line_chart("line_chart", &model.line_chart.dates, &series, &theme)?;

    for (factor, scatter) in &model.scatter {
        let points: Vec<(f64, f64)> = scatter
            .x
            .iter()
            .copied()
            .zip(scatter.y.iter().copied())
            .collect();
        draw_scatter_chart(&format!("scatter_{factor}"), &points, factor, "超额收益", &theme)?;
    }

    Ok(bar)
}
