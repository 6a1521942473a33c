//! Path-based routing between the app's pages.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Route {
    #[default]
    Home,
    Calculator,
    Weather,
}

impl Route {
    /// Resolve a path to a page. Unknown paths redirect to [`Route::Home`].
    pub fn resolve(path: &str) -> Self {
        match path.trim().trim_matches('/') {
            "" => Route::Home,
            "calculator" => Route::Calculator,
            "weather" => Route::Weather,
            other => {
                tracing::debug!("Unknown route /{}, redirecting home", other);
                Route::Home
            }
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Calculator => "/calculator",
            Route::Weather => "/weather",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
