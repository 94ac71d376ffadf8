pub mod facet_panel;
pub mod price_slider;
