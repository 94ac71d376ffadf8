use crate::domain::products::ui::list::ProductList;
use crate::domain::stores::ui::list::StoreList;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes, A};
use leptos_router::path;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <nav class="top-nav">
                <A href="/stores">"Stores"</A>
                <A href="/products">"Products"</A>
            </nav>
            <main>
                <Routes fallback=|| view! { <p>"Not found."</p> }>
                    <Route path=path!("/") view=StoreList />
                    <Route path=path!("/stores") view=StoreList />
                    <Route path=path!("/products") view=ProductList />
                </Routes>
            </main>
        </Router>
    }
}
