//! Text front end for ManyApps: navigation, routing, pages and the shell
//! event loop.

pub mod app_services;
mod error_mapping;
pub mod navigation;
pub mod pages;
pub mod router;
pub mod services;
pub mod shell;

pub use app_services::AppServices;
pub use navigation::{NavLink, Navigation, NAV_LINKS};
pub use router::Route;
pub use shell::{Command, Shell};
