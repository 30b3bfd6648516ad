//! Canvas charts for the factorlab result views: an animated bar chart with
//! a one-shot scroll-triggered highlight pulse, a gapped multi-series line
//! chart, and per-factor scatter charts.
//!
//! Only the bar chart owns runtime resources (a requestAnimationFrame loop,
//! the pulse timer, the visibility observer); it follows the handle pattern
//! of `Rc<RefCell<Inner>>` plus a `destroyed` flag the frame loop observes.
//! `destroy` stops the loop, cancels the pending downplay timer and
//! disconnects the observer, so no callback can touch a torn-down chart.
//! Line and scatter charts render once and hold nothing.

pub mod plot;

/// Chart color and font configuration. Every series and axis color lives
/// here rather than inline in the draw calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartTheme {
    pub background: String,
    pub grid: String,
    pub axis: String,
    pub text: String,
    pub bar: String,
    pub bar_highlight: String,
    pub scatter: String,
    pub line_series: [String; 4],
    pub font: String,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            grid: "rgba(0, 0, 0, 0.08)".to_string(),
            axis: "#8a93a2".to_string(),
            text: "#2c3a4f".to_string(),
            bar: "#5b9bd5".to_string(),
            bar_highlight: "#7ab8e8".to_string(),
            scatter: "#d94e5d".to_string(),
            line_series: [
                "#5470c6".to_string(),
                "#91cc75".to_string(),
                "#fac858".to_string(),
                "#ee6666".to_string(),
            ],
            font: "12px 'Inter', sans-serif".to_string(),
        }
    }
}

/// One line-chart series; `None` points render as gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<Option<f64>>,
}

#[cfg(target_arch = "wasm32")]
mod canvas {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_timers::callback::Timeout;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, IntersectionObserver,
        IntersectionObserverEntry, IntersectionObserverInit,
    };

    use crate::plot::{
        bar_progress, bar_slots, extent, segments, tick_label, ticks, LinearScale, Margins,
        PULSE_DOWNPLAY_MS,
    };
    use crate::{ChartTheme, LineSeries};

    fn document() -> Result<Document, JsValue> {
        web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))
    }

    fn canvas_context(
        canvas_id: &str,
    ) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), JsValue> {
        let element = document()?
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas not found"))?;
        let canvas: HtmlCanvasElement = element
            .dyn_into()
            .map_err(|_| JsValue::from_str("element is not a canvas"))?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        // Fit the backing store to the rendered size.
        let rect = canvas.get_bounding_client_rect();
        canvas.set_width(rect.width().max(1.0) as u32);
        canvas.set_height(rect.height().max(1.0) as u32);
        Ok((canvas, ctx))
    }

    fn clear_surface(ctx: &CanvasRenderingContext2d, width: f64, height: f64, theme: &ChartTheme) {
        ctx.set_fill_style_str(&theme.background);
        ctx.fill_rect(0.0, 0.0, width, height);
    }

    fn draw_polyline(ctx: &CanvasRenderingContext2d, points: &[(f64, f64)], color: &str, width: f64) {
        if points.len() < 2 {
            return;
        }
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(width);
        ctx.begin_path();
        ctx.move_to(points[0].0, points[0].1);
        for p in points.iter().skip(1) {
            ctx.line_to(p.0, p.1);
        }
        ctx.stroke();
    }

    fn draw_dot(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64, color: &str) {
        ctx.set_fill_style_str(color);
        ctx.begin_path();
        ctx.arc(x, y, radius, 0.0, std::f64::consts::TAU).ok();
        ctx.fill();
    }

    fn draw_frame_axes(
        ctx: &CanvasRenderingContext2d,
        margins: &Margins,
        width: f64,
        height: f64,
        theme: &ChartTheme,
    ) {
        ctx.set_stroke_style_str(&theme.axis);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        ctx.move_to(margins.left, margins.top);
        ctx.line_to(margins.left, height - margins.bottom);
        ctx.line_to(width - margins.right, height - margins.bottom);
        ctx.stroke();
    }

    fn draw_y_grid(
        ctx: &CanvasRenderingContext2d,
        margins: &Margins,
        width: f64,
        scale: &LinearScale,
        tick_values: &[f64],
        theme: &ChartTheme,
    ) {
        ctx.set_font(&theme.font);
        ctx.set_text_align("right");
        for &tick in tick_values {
            let y = scale.map(tick);
            ctx.set_stroke_style_str(&theme.grid);
            ctx.set_line_width(1.0);
            ctx.begin_path();
            ctx.move_to(margins.left, y);
            ctx.line_to(width - margins.right, y);
            ctx.stroke();
            ctx.set_fill_style_str(&theme.axis);
            ctx.fill_text(&tick_label(tick), margins.left - 6.0, y + 3.0).ok();
        }
    }

    // ---------- bar chart -----------------------------------------------------

    struct BarInner {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        labels: Vec<String>,
        scores: Vec<f64>,
        theme: ChartTheme,
        started_at: Option<f64>,
        highlight: bool,
        destroyed: bool,
    }

    impl BarInner {
        fn frame(&mut self, timestamp: f64) {
            let started = *self.started_at.get_or_insert(timestamp);
            self.draw(timestamp - started);
        }

        fn draw(&self, elapsed: f64) {
            let width = self.canvas.width() as f64;
            let height = self.canvas.height() as f64;
            let ctx = &self.ctx;
            // Combination labels stack up to five lines under the axis.
            let margins = Margins {
                bottom: 68.0,
                ..Margins::default()
            };
            let plot_left = margins.left;
            let plot_right = width - margins.right;
            let plot_top = margins.top;
            let plot_bottom = height - margins.bottom;

            clear_surface(ctx, width, height, &self.theme);

            // Explanatory power is a share: the axis is pinned to [0, 1].
            let y_scale = LinearScale::new((0.0, 1.0), (plot_bottom, plot_top));
            draw_y_grid(ctx, &margins, width, &y_scale, &ticks(0.0, 1.0, 6), &self.theme);

            let slots = bar_slots(self.scores.len(), plot_right - plot_left);
            let color = if self.highlight {
                &self.theme.bar_highlight
            } else {
                &self.theme.bar
            };
            ctx.set_fill_style_str(color);
            for (i, ((center, bar_width), score)) in slots.iter().zip(&self.scores).enumerate() {
                let progress = bar_progress(elapsed, i);
                if progress <= 0.0 {
                    continue;
                }
                let full_height = plot_bottom - y_scale.map(score.clamp(0.0, 1.0));
                // The elastic overshoot may exceed the axis; keep it on canvas.
                let bar_height = (full_height * progress).min(plot_bottom - plot_top);
                ctx.fill_rect(
                    plot_left + center - bar_width / 2.0,
                    plot_bottom - bar_height,
                    *bar_width,
                    bar_height,
                );
            }

            ctx.set_font(&self.theme.font);
            ctx.set_text_align("center");
            ctx.set_fill_style_str(&self.theme.text);
            for ((center, _), label) in slots.iter().zip(&self.labels) {
                for (line_no, line) in label.lines().enumerate() {
                    ctx.fill_text(line, plot_left + center, plot_bottom + 14.0 + line_no as f64 * 12.0)
                        .ok();
                }
            }

            draw_frame_axes(ctx, &margins, width, height, &self.theme);
        }
    }

    /// Animated R² bar chart. Owns its frame loop, pulse timer and
    /// visibility observer; all three stop at `destroy`.
    pub struct BarChart {
        inner: Rc<RefCell<BarInner>>,
        downplay: Rc<RefCell<Option<Timeout>>>,
        observer: Rc<RefCell<Option<IntersectionObserver>>>,
    }

    impl BarChart {
        pub fn new(
            canvas_id: &str,
            labels: &[String],
            scores: &[f64],
            theme: ChartTheme,
        ) -> Result<Self, JsValue> {
            let (canvas, ctx) = canvas_context(canvas_id)?;
            let inner = Rc::new(RefCell::new(BarInner {
                canvas,
                ctx,
                labels: labels.to_vec(),
                scores: scores.to_vec(),
                theme,
                started_at: None,
                highlight: false,
                destroyed: false,
            }));
            start_frame_loop(inner.clone());
            Ok(Self {
                inner,
                downplay: Rc::new(RefCell::new(None)),
                observer: Rc::new(RefCell::new(None)),
            })
        }

        /// Arm the one-shot visibility trigger: the first time the container
        /// scrolls into view it gains the `show-chart` class and the bars
        /// pulse (highlight now, downplay 1.5 s later). The observer then
        /// unobserves and disconnects; it is never re-armed.
        pub fn observe(&self, container_id: &str) -> Result<(), JsValue> {
            let target = document()?
                .get_element_by_id(container_id)
                .ok_or_else(|| JsValue::from_str("observe target not found"))?;

            let inner = self.inner.clone();
            let downplay = self.downplay.clone();
            let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::wrap(
                Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
                    for entry in entries.iter() {
                        let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                            continue;
                        };
                        if !entry.is_intersecting() {
                            continue;
                        }
                        let _ = entry.target().class_list().add_1("show-chart");
                        inner.borrow_mut().highlight = true;
                        let pulse_inner = inner.clone();
                        *downplay.borrow_mut() = Some(Timeout::new(PULSE_DOWNPLAY_MS, move || {
                            let mut chart = pulse_inner.borrow_mut();
                            if !chart.destroyed {
                                chart.highlight = false;
                            }
                        }));
                        observer.unobserve(&entry.target());
                        observer.disconnect();
                    }
                }),
            );

            let options = IntersectionObserverInit::new();
            options.set_threshold(&JsValue::from_f64(0.3));
            let observer =
                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
            observer.observe(&target);
            callback.forget();
            *self.observer.borrow_mut() = Some(observer);
            Ok(())
        }

        /// Stop the frame loop, cancel a pending downplay and disconnect the
        /// observer.
        pub fn destroy(&self) {
            self.inner.borrow_mut().destroyed = true;
            // Dropping a pending Timeout cancels it.
            *self.downplay.borrow_mut() = None;
            if let Some(observer) = self.observer.borrow_mut().take() {
                observer.disconnect();
            }
        }
    }

    fn start_frame_loop(inner: Rc<RefCell<BarInner>>) {
        let f = Rc::new(RefCell::new(None::<Closure<dyn FnMut(f64)>>));
        let g = f.clone();

        *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            let mut should_continue = true;
            {
                let mut chart = inner.borrow_mut();
                if chart.destroyed {
                    should_continue = false;
                } else {
                    chart.frame(timestamp);
                }
            }

            if should_continue {
                let window = web_sys::window().unwrap();
                window
                    .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref())
                    .unwrap();
            }
        }) as Box<dyn FnMut(f64)>));

        let window = web_sys::window().unwrap();
        window
            .request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            .unwrap();
    }

    // ---------- line chart ----------------------------------------------------

    /// Draw the true/predicted line chart with its smoothed companions.
    /// Renders once; gaps in a series break the polyline.
    pub fn draw_line_chart(
        canvas_id: &str,
        dates: &[String],
        series: &[LineSeries],
        theme: &ChartTheme,
    ) -> Result<(), JsValue> {
        let (canvas, ctx) = canvas_context(canvas_id)?;
        let width = canvas.width() as f64;
        let height = canvas.height() as f64;
        let margins = Margins::default();
        let plot_left = margins.left;
        let plot_right = width - margins.right;
        let plot_bottom = height - margins.bottom;
        // Room for the legend row above the plot.
        let plot_top = margins.top + 18.0;

        clear_surface(&ctx, width, height, theme);

        let n = dates.len();
        let (y_lo, y_hi) = extent(
            series
                .iter()
                .flat_map(|s| s.points.iter().copied().flatten()),
        );
        let pad = (y_hi - y_lo) * 0.05;
        let y_scale = LinearScale::new((y_lo - pad, y_hi + pad), (plot_bottom, plot_top));
        let x_scale = LinearScale::new((0.0, (n.max(2) - 1) as f64), (plot_left, plot_right));

        draw_y_grid(
            &ctx,
            &margins,
            width,
            &y_scale,
            &ticks(y_lo - pad, y_hi + pad, 6),
            theme,
        );

        // Sparse date labels along the x axis.
        ctx.set_text_align("center");
        ctx.set_fill_style_str(&theme.axis);
        if n > 0 {
            let step = (n / 6).max(1);
            for i in (0..n).step_by(step) {
                ctx.fill_text(&dates[i], x_scale.map(i as f64), plot_bottom + 14.0)
                    .ok();
            }
        }

        for (series_no, s) in series.iter().enumerate() {
            let color = &theme.line_series[series_no % theme.line_series.len()];
            for (start, run) in segments(&s.points) {
                let points: Vec<(f64, f64)> = run
                    .iter()
                    .enumerate()
                    .map(|(j, v)| (x_scale.map((start + j) as f64), y_scale.map(*v)))
                    .collect();
                if points.len() == 1 {
                    draw_dot(&ctx, points[0].0, points[0].1, 2.0, color);
                } else {
                    draw_polyline(&ctx, &points, color, 1.5);
                }
            }
        }

        // Legend: swatch + name per series, left to right.
        ctx.set_font(&theme.font);
        ctx.set_text_align("left");
        let mut legend_x = plot_left;
        let legend_y = margins.top + 4.0;
        for (series_no, s) in series.iter().enumerate() {
            let color = &theme.line_series[series_no % theme.line_series.len()];
            ctx.set_fill_style_str(color);
            ctx.fill_rect(legend_x, legend_y - 4.0, 12.0, 4.0);
            ctx.set_fill_style_str(&theme.text);
            ctx.fill_text(&s.name, legend_x + 16.0, legend_y).ok();
            let name_width = ctx
                .measure_text(&s.name)
                .map(|m| m.width())
                .unwrap_or(s.name.chars().count() as f64 * 12.0);
            legend_x += 16.0 + name_width + 16.0;
        }

        draw_frame_axes(&ctx, &margins, width, height, theme);
        Ok(())
    }

    // ---------- scatter chart -------------------------------------------------

    /// Draw one factor's (factor value, excess return) scatter. Renders once.
    pub fn draw_scatter_chart(
        canvas_id: &str,
        points: &[(f64, f64)],
        x_name: &str,
        y_name: &str,
        theme: &ChartTheme,
    ) -> Result<(), JsValue> {
        let (canvas, ctx) = canvas_context(canvas_id)?;
        let width = canvas.width() as f64;
        let height = canvas.height() as f64;
        let margins = Margins::default();
        let plot_left = margins.left;
        let plot_right = width - margins.right;
        let plot_top = margins.top;
        let plot_bottom = height - margins.bottom;

        clear_surface(&ctx, width, height, theme);

        let (x_lo, x_hi) = extent(points.iter().map(|p| p.0));
        let (y_lo, y_hi) = extent(points.iter().map(|p| p.1));
        let x_pad = (x_hi - x_lo) * 0.05;
        let y_pad = (y_hi - y_lo) * 0.05;
        let x_scale = LinearScale::new((x_lo - x_pad, x_hi + x_pad), (plot_left, plot_right));
        let y_scale = LinearScale::new((y_lo - y_pad, y_hi + y_pad), (plot_bottom, plot_top));

        draw_y_grid(
            &ctx,
            &margins,
            width,
            &y_scale,
            &ticks(y_lo - y_pad, y_hi + y_pad, 6),
            theme,
        );

        ctx.set_text_align("center");
        ctx.set_fill_style_str(&theme.axis);
        for tick in ticks(x_lo - x_pad, x_hi + x_pad, 5) {
            ctx.fill_text(&tick_label(tick), x_scale.map(tick), plot_bottom + 14.0)
                .ok();
        }

        for (x, y) in points {
            draw_dot(&ctx, x_scale.map(*x), y_scale.map(*y), 2.0, &theme.scatter);
        }

        // Axis names, echarts-style: x at the lower right, y above the axis.
        ctx.set_fill_style_str(&theme.text);
        ctx.set_text_align("right");
        ctx.fill_text(x_name, plot_right, height - 6.0).ok();
        ctx.set_text_align("left");
        ctx.fill_text(y_name, 4.0, plot_top - 8.0).ok();

        draw_frame_axes(&ctx, &margins, width, height, theme);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use canvas::{draw_line_chart, draw_scatter_chart, BarChart};
