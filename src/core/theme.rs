#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value persisted under the theme storage key.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(v: &str) -> Option<Self> {
        match v.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Any saved value wins, and only `"dark"` means dark. With nothing saved,
    /// follow `prefers-color-scheme`.
    pub fn resolve(saved: Option<&str>, system_prefers_dark: bool) -> Self {
        match saved.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => Theme::parse(v).unwrap_or(Theme::Light),
            None if system_prefers_dark => Theme::Dark,
            None => Theme::Light,
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Font Awesome icon on the toggle: the sun switches back to light.
    pub fn icon_class(self) -> &'static str {
        match self {
            Theme::Light => "fas fa-moon",
            Theme::Dark => "fas fa-sun",
        }
    }
}
