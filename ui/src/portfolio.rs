use factor_core::portfolio::{
    build_portfolio, preset, rows_from_holdings, PortfolioRow, PortfolioSummary, DEFAULT_ROWS,
    PRESETS,
};
use leptos::*;

use crate::state::use_app_ctx;

/// One rendered row. Per-row signals mean any edit recomputes the derived
/// portfolio synchronously; ids come from a component-local counter and
/// only key the `<For/>` list.
#[derive(Clone, Copy)]
struct RowEntry {
    id: u32,
    code: RwSignal<String>,
    weight: RwSignal<String>,
}

/// Dynamic list-of-rows editor mapping security codes to weights.
///
/// Keeps `summary` (and through it the hidden `#portfolio` field and the
/// total-weight indicator) in sync with the visible rows on every change.
/// Suggestions come from the injected catalog through one datalist per
/// editor instance.
#[component]
pub fn PortfolioEditor(
    /// Derived portfolio state, shared with the submit controller.
    summary: RwSignal<PortfolioSummary>,
    /// Instance-scoped id of the suggestion datalist.
    #[prop(default = "stock-codes")]
    list_id: &'static str,
) -> impl IntoView {
    let catalog = use_app_ctx().catalog;
    let rows = create_rw_signal::<Vec<RowEntry>>(Vec::new());
    let next_id = create_rw_signal(0u32);

    let make_row = move |initial: &PortfolioRow| -> RowEntry {
        let id = next_id.get_untracked();
        next_id.set(id + 1);
        RowEntry {
            id,
            code: create_rw_signal(initial.code.clone()),
            weight: create_rw_signal(initial.weight.clone()),
        }
    };

    let add_row = move |_| {
        rows.update(|list| list.push(make_row(&PortfolioRow::default())));
    };

    let remove_row = move |id: u32| {
        rows.update(|list| list.retain(|row| row.id != id));
    };

    let replace_rows = move |template: Vec<PortfolioRow>| {
        rows.update(|list| {
            list.clear();
            list.extend(template.iter().map(|row| make_row(row)));
        });
    };

    // Fully eager: every row mutation or keystroke rederives the mapping,
    // so the hidden payload is never stale.
    create_effect(move |_| {
        let snapshot: Vec<PortfolioRow> = rows
            .get()
            .iter()
            .map(|row| PortfolioRow::new(row.code.get(), row.weight.get()))
            .collect();
        summary.set(build_portfolio(&snapshot));
    });

    // Seed defaults once the catalog settles, if nothing else filled the
    // table first; the form is never submittable-but-empty on first load.
    create_effect(move |_| {
        if !catalog.get().is_settled() {
            return;
        }
        if rows.get_untracked().is_empty() {
            replace_rows(rows_from_holdings(DEFAULT_ROWS));
        }
    });

    let on_preset_change = move |ev: ev::Event| {
        let name = event_target_value(&ev);
        if let Some(chosen) = preset(&name) {
            replace_rows(rows_from_holdings(chosen.holdings));
        }
    };

    view! {
        <div class="portfolio-editor">
            <div class="portfolio-toolbar">
                <label for="portfolio-preset-selector">"预设组合"</label>
                <select id="portfolio-preset-selector" on:change=on_preset_change>
                    <option value="">"自定义"</option>
                    {PRESETS
                        .iter()
                        .map(|p| view! { <option value=p.name>{p.name}</option> })
                        .collect_view()}
                </select>
            </div>
            <table class="portfolio-table">
                <thead>
                    <tr>
                        <th>"股票代码"</th>
                        <th>"权重"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody id="portfolio-table-body">
                    <For each=move || rows.get() key=|row| row.id let:row>
                        <tr>
                            <td>
                                <input
                                    type="text"
                                    class="stock-input"
                                    placeholder="输入或选择股票代码"
                                    list=list_id
                                    prop:value=move || row.code.get()
                                    on:input=move |ev| row.code.set(event_target_value(&ev))
                                />
                            </td>
                            <td>
                                <input
                                    type="number"
                                    class="stock-weight"
                                    placeholder="例如: 0.5"
                                    step="0.01"
                                    min="0"
                                    max="1"
                                    prop:value=move || row.weight.get()
                                    on:input=move |ev| row.weight.set(event_target_value(&ev))
                                />
                            </td>
                            <td class="text-center">
                                <button
                                    type="button"
                                    class="delete-stock"
                                    on:click=move |_| remove_row(row.id)
                                >
                                    "×"
                                </button>
                            </td>
                        </tr>
                    </For>
                </tbody>
            </table>
            <datalist id=list_id>
                {move || {
                    catalog.with(|catalog| {
                        catalog
                            .securities()
                            .iter()
                            .map(|s| view! { <option value=s.code.clone()></option> })
                            .collect_view()
                    })
                }}
            </datalist>
            <div class="portfolio-footer">
                <button type="button" id="add-stock-btn" on:click=add_row>
                    "+ 添加股票"
                </button>
                <span class="total-weight-label">
                    "权重合计: "
                    <span
                        id="total-weight"
                        class=move || summary.get().balance().indicator_class()
                    >
                        {move || summary.get().total_label()}
                    </span>
                </span>
            </div>
            <input type="hidden" id="portfolio" name="portfolio" prop:value=move || summary.get().to_json()/>
        </div>
    }
}
