mod state;
mod widget;

pub use widget::StoreList;
