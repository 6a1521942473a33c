//! Plain-text page renderers.

pub mod calculator;
pub mod home;
pub mod weather;

use std::fmt::Write;

use crate::navigation::Navigation;
use crate::router::Route;

/// Title bar plus the link list; links are only listed while the menu is open.
pub fn render_header(nav: &Navigation, current: Route) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==  [{}]", nav.title(), current.path());

    if nav.is_mobile_menu_open() {
        for link in nav.links() {
            let marker = if link.route == current { '*' } else { ' ' };
            let _ = writeln!(out, " {} {:<12} go {}", marker, link.label, link.route.path());
        }
    }
    out
}
