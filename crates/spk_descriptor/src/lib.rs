use serde::{Deserialize, Serialize};

/// Describes a shellpack customization descriptor file
///
/// Loaded once from `shellpack.config.json` or `shellpack.config.toml` at the
/// project root. Every field is optional; an absent field means the
/// corresponding resource inside the shell is left untouched.
#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct PackConfig {
    /// The launcher name of the application
    ///
    /// Example: `Acme Notes`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// The splash screen background color
    ///
    /// Example: `#2A2E32`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splash_background: Option<String>,

    /// Theme palette color overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorOverrides>,

    /// The launcher icon file path relative to the project folder
    ///
    /// Example: `icon.png`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_icon: Option<String>,

    /// The splash screen logo file path relative to the project folder
    ///
    /// Example: `assets/logo.png`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splash_logo: Option<String>,

    /// Inset overrides for the splash screen logo layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splash_insets: Option<SplashInsets>,

    /// Glob patterns excluded when embedding the project tree
    /// If provided, this fully replaces the built-in default set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excludes: Option<Vec<String>>,
}

/// Theme palette color overrides, each independently optional
///
/// Values must be valid XML text content; no escaping is applied when they are
/// substituted into the shell's resource files.
#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct ColorOverrides {
    /// Example: `#3F51B5`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,

    /// Example: `#303F9F`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_dark: Option<String>,

    /// Example: `#FF4081`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

/// Splash screen logo insets, each independently optional
///
/// Example values: `24dp`, `0dp`
#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct SplashInsets {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<String>,
}

impl PackConfig {
    /// Whether any branding field is set.
    pub fn has_branding(&self) -> bool {
        self.app_name.is_some()
            || self.splash_background.is_some()
            || self.colors.is_some()
            || self.app_icon.is_some()
            || self.splash_logo.is_some()
            || self.splash_insets.is_some()
    }

    /// The exclusion set in effect for this descriptor.
    ///
    /// A user-supplied `excludes` list fully replaces the defaults; there is no
    /// merging.
    pub fn effective_excludes(&self) -> Vec<String> {
        match &self.excludes {
            Some(patterns) => patterns.clone(),
            None => default_excludes(),
        }
    }
}

/// Returns the built-in default exclusion set: dependency caches, the tool's
/// own install directory, and previously produced package artifacts.
pub fn default_excludes() -> Vec<String> {
    vec![
        "node_modules".to_string(),
        "shellpack".to_string(),
        "*.apk".to_string(),
        "*.idsig".to_string(),
    ]
}
