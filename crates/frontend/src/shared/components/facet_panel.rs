use crate::shared::state::use_filter_store;
use leptos::prelude::*;

/// Collapsible filter panel wrapping the facet groups of one listing page.
///
/// Shows an active-filter badge in the header and removable chips for the
/// current selection below the groups.
#[component]
pub fn FilterPanel(
    /// Whether the panel body is expanded
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    /// Fired after a selection change made from inside the panel (chip
    /// removal, reset); the page syncs the URL and schedules a refresh
    #[prop(into)]
    on_change: Callback<()>,

    /// Facet groups and the price slider
    children: ChildrenFn,
) -> impl IntoView {
    let store = use_filter_store();

    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    let active_count = move || store.with(|s| s.active_filter_count());

    let chips = move || {
        store.with(|s| {
            let mut chips: Vec<(String, String)> = s
                .selected_filters
                .iter()
                .flat_map(|(facet, values)| {
                    values.iter().map(move |value| (facet.clone(), value.clone()))
                })
                .collect();
            chips.sort();
            chips
        })
    };

    let reset = move |_| {
        store.update(|s| s.reset_filters());
        on_change.run(());
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div class="filter-panel-header__left" on:click=toggle_expanded>
                    <span class=move || {
                        if is_expanded.get() {
                            "filter-panel__chevron filter-panel__chevron--expanded"
                        } else {
                            "filter-panel__chevron"
                        }
                    }>"▾"</span>
                    <span class="filter-panel__title">"Filters"</span>
                    {move || {
                        let count = active_count();
                        if count > 0 {
                            view! {
                                <span class="badge badge--primary">{count}</span>
                            }.into_any()
                        } else {
                            view! { <></> }.into_any()
                        }
                    }}
                </div>
                <button class="button button--secondary filter-panel__reset" on:click=reset>
                    "Reset all"
                </button>
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">
                    {children()}
                    <div class="filter-panel__tags">
                        {move || {
                            chips()
                                .into_iter()
                                .map(|(facet, value)| {
                                    let label = format!("{facet}: {value}");
                                    let on_remove = Callback::new(move |_| {
                                        store.update(|s| s.toggle_filter(&facet, &value));
                                        on_change.run(());
                                    });
                                    view! { <FilterTag label=label on_remove=on_remove /> }
                                })
                                .collect_view()
                        }}
                    </div>
                </div>
            </div>
        </div>
    }
}

/// One facet's checkbox list with display counts.
#[component]
pub fn FacetGroup(
    /// Backend facet name, e.g. "category"
    facet: &'static str,

    /// Heading shown above the value list
    #[prop(into)]
    title: String,

    /// Fired after a value is toggled
    #[prop(into)]
    on_change: Callback<()>,
) -> impl IntoView {
    let store = use_filter_store();

    let values = move || {
        store.with(|s| {
            s.facet(facet)
                .map(|f| f.values.clone())
                .unwrap_or_default()
        })
    };
    let loaded = move || store.with(|s| s.facet_init);

    view! {
        <div class="facet-group">
            <div class="facet-group__title">{title}</div>
            {move || {
                if !loaded() {
                    // facet_init distinguishes "not yet loaded" from "loaded
                    // but empty"; the skeleton only covers the former.
                    view! { <div class="facet-group__skeleton"></div> }.into_any()
                } else {
                    values()
                        .into_iter()
                        .map(|value| {
                            let name = value.name.clone();
                            view! {
                                <label class="facet-group__value">
                                    <input
                                        type="checkbox"
                                        prop:checked=value.selected
                                        on:change=move |_| {
                                            store.update(|s| s.toggle_filter(facet, &name));
                                            on_change.run(());
                                        }
                                    />
                                    <span class="facet-group__name">{value.name.clone()}</span>
                                    <span class="facet-group__count">{value.count.to_string()}</span>
                                </label>
                            }
                        })
                        .collect_view()
                        .into_any()
                }
            }}
        </div>
    }
}

/// One removable chip for an active facet selection.
#[component]
pub fn FilterTag(
    /// Tag label
    #[prop(into)]
    label: String,

    /// Callback when remove is clicked
    on_remove: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <button
                class="filter-tag__remove"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                "\u{00d7}"
            </button>
        </div>
    }
}
