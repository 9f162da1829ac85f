//! Dashboard page handlers
//!
//! `/` renders the page selected in the navigation cookie; `/nav/:page`
//! changes that selection. `/pages/:page` renders a page directly and
//! leaves the selection alone.

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::{debug, info};

use crate::error::DashboardError;
use crate::navigation::{Page, NAV_COOKIE};
use crate::AppState;

fn render(state: &AppState, page: Page) -> Result<Html<String>, DashboardError> {
    let document = state.cache.get()?;
    let html = state.renderer.render_document_page(&document, page)?;
    debug!(page = %page, bytes = html.len(), "Rendered dashboard page");
    Ok(Html(html))
}

/// Renders the page stored in the session cookie
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> Result<Html<String>, DashboardError> {
    let page = Page::from_cookie(jar.get(NAV_COOKIE).map(|c| c.value()));
    render(&state, page)
}

/// Stores the selected page and sends the browser back to `/`
pub async fn navigate(Path(page): Path<String>, jar: CookieJar) -> Result<(CookieJar, Redirect), DashboardError> {
    let page: Page = page.parse()?;
    let cookie = Cookie::build((NAV_COOKIE, page.slug()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    Ok((jar.add(cookie), Redirect::to("/")))
}

/// Renders a page without touching the session
pub async fn show_page(
    State(state): State<AppState>,
    Path(page): Path<String>,
) -> Result<Html<String>, DashboardError> {
    render(&state, page.parse()?)
}

/// Reloads the report document from disk
pub async fn refresh(State(state): State<AppState>) -> Result<Redirect, DashboardError> {
    state.cache.refresh()?;
    info!(path = %state.cache.path().display(), "Report document refreshed");
    Ok(Redirect::to("/"))
}
