use std::fmt::Write;

use crate::navigation::Navigation;

pub fn render(nav: &Navigation) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Welcome to {}.", nav.title());
    let _ = writeln!(out);
    for link in nav.links().iter().skip(1) {
        let _ = writeln!(out, "  {:<12} go {}", link.label, link.route.path());
    }
    out
}
