use crate::store::SessionStore;
use leptos::*;
use leptos_router::use_location;
use valentis_core::routes::{self, sidebar_class, NavIcon, NAV_LINKS};

fn nav_icon(icon: NavIcon) -> impl IntoView {
    let shape = match icon {
        NavIcon::Grid => view! {
            <rect x="3" y="3" width="7" height="9"></rect>
            <rect x="14" y="3" width="7" height="5"></rect>
            <rect x="14" y="12" width="7" height="9"></rect>
            <rect x="3" y="16" width="7" height="5"></rect>
        }
        .into_view(),
        NavIcon::Upload => view! {
            <path d="M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4"></path>
            <polyline points="17 8 12 3 7 8"></polyline>
            <line x1="12" y1="3" x2="12" y2="15"></line>
        }
        .into_view(),
        NavIcon::Alert => view! {
            <path d="M12 3 2 21h20z"></path>
            <line x1="12" y1="9" x2="12" y2="13"></line>
            <line x1="12" y1="17" x2="12.01" y2="17"></line>
        }
        .into_view(),
        NavIcon::Pulse => view! { <polyline points="22 12 18 12 15 21 9 3 6 12 2 12"></polyline> }.into_view(),
        NavIcon::Card => view! {
            <rect x="2" y="5" width="20" height="14" rx="2"></rect>
            <line x1="2" y1="10" x2="22" y2="10"></line>
        }
        .into_view(),
        NavIcon::Gear => view! {
            <circle cx="12" cy="12" r="3"></circle>
            <circle cx="12" cy="12" r="8" stroke-dasharray="4 2"></circle>
        }
        .into_view(),
    };
    view! {
        <svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor"
            stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            {shape}
        </svg>
    }
}

/// Collapsible navigation; clicking the logo toggles it.
#[component]
pub fn Sidebar(#[prop(into)] open: Signal<bool>, on_toggle: Callback<()>) -> impl IntoView {
    let location = use_location();
    let links = NAV_LINKS
        .iter()
        .map(|link| {
            let class = move || {
                if location.pathname.with(|path| routes::is_nav_active(link.to, path)) {
                    "sidebar__link sidebar__link--active"
                } else {
                    "sidebar__link"
                }
            };
            view! {
                <a href=link.to class=class>
                    <span class="sidebar__icon">{nav_icon(link.icon)}</span>
                    <span class="sidebar__link-text">{link.label}</span>
                </a>
            }
        })
        .collect_view();

    view! {
        <aside class={move || sidebar_class(open.get())}>
            <div class="sidebar__logo" on:click=move |_| on_toggle.call(())>
                <div class="sidebar__logo-icon">"V"</div>
                <h2>"Valentis"</h2>
            </div>
            <nav>{links}</nav>
        </aside>
    }
}

#[component]
pub fn Header(session: SessionStore) -> impl IntoView {
    let location = use_location();
    let title = move || location.pathname.with(|path| routes::page_title(path));
    view! {
        <header class="header">
            <div class="header__title">
                <h1>{title}</h1>
            </div>
            <div class="header__actions">
                {move || session.user().map(|user| view! { <span class="header__user">{user.name}</span> })}
                <button class="btn btn--outline" on:click=move |_| session.logout()>
                    "Logout"
                </button>
            </div>
        </header>
    }
}
