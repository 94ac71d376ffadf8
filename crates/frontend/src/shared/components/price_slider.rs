use crate::shared::state::use_filter_store;
use leptos::prelude::*;

/// Dual-input price range control.
///
/// `price_bounds` sizes the inputs; the chosen sub-range lands in
/// `selected_price_range`. Choosing the full bounds clears the range again,
/// so the URL and the search request never carry a filter that filters
/// nothing.
#[component]
pub fn PriceSlider(
    /// Fired after the range changes
    #[prop(into)]
    on_change: Callback<()>,
) -> impl IntoView {
    let store = use_filter_store();

    let bounds = move || store.with(|s| s.price_bounds);
    let current = move || store.with(|s| s.selected_price_range.unwrap_or(s.price_bounds));

    let commit = move |min: f64, max: f64| {
        store.update(|s| {
            let (lo, hi) = s.price_bounds;
            let min = min.clamp(lo, hi);
            let max = max.clamp(lo, hi);
            let range = (min.min(max), max.max(min));
            s.set_price_range(if range == (lo, hi) { None } else { Some(range) });
        });
        on_change.run(());
    };

    view! {
        <div class="price-slider">
            <div class="price-slider__label">
                {move || {
                    let (min, max) = current();
                    format!("Price: {min:.0} - {max:.0}")
                }}
            </div>
            <input
                type="range"
                min=move || bounds().0.to_string()
                max=move || bounds().1.to_string()
                prop:value=move || current().0.to_string()
                on:change=move |ev| {
                    if let Ok(min) = event_target_value(&ev).parse::<f64>() {
                        commit(min, current().1);
                    }
                }
            />
            <input
                type="range"
                min=move || bounds().0.to_string()
                max=move || bounds().1.to_string()
                prop:value=move || current().1.to_string()
                on:change=move |ev| {
                    if let Ok(max) = event_target_value(&ev).parse::<f64>() {
                        commit(current().0, max);
                    }
                }
            />
        </div>
    }
}
