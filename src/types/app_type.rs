use serde::{Deserialize, Serialize};

/// The hosted application a window is currently displaying.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum AppType {
    #[default]
    Home,
    Word,
    Excel,
    Powerpoint,
    Outlook,
    Onedrive,
    Onenote,
    Teams,
}

impl AppType {
    pub const ALL: [AppType; 8] = [
        AppType::Home,
        AppType::Word,
        AppType::Excel,
        AppType::Powerpoint,
        AppType::Outlook,
        AppType::Onedrive,
        AppType::Onenote,
        AppType::Teams,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppType::Home => "home",
            AppType::Word => "word",
            AppType::Excel => "excel",
            AppType::Powerpoint => "powerpoint",
            AppType::Outlook => "outlook",
            AppType::Onedrive => "onedrive",
            AppType::Onenote => "onenote",
            AppType::Teams => "teams",
        }
    }

    /// Human-readable name, used in window titles and the tray menu.
    pub fn display_name(&self) -> &'static str {
        match self {
            AppType::Home => "Microsoft 365",
            AppType::Word => "Word",
            AppType::Excel => "Excel",
            AppType::Powerpoint => "PowerPoint",
            AppType::Outlook => "Outlook",
            AppType::Onedrive => "OneDrive",
            AppType::Onenote => "OneNote",
            AppType::Teams => "Teams",
        }
    }

    /// Parses an app name as given on the command line or by a hotkey binding.
    ///
    /// Accepts the canonical names plus a few generic aliases (`mail`, `docs`,
    /// `sheets`, `slides`, `notes`, `drive`, `chat`). Returns `None` for anything else.
    pub fn from_arg(value: &str) -> Option<Self> {
        let app = match value.trim().trim_start_matches('-').to_ascii_lowercase().as_str() {
            "home" => AppType::Home,
            "word" | "docs" => AppType::Word,
            "excel" | "sheets" => AppType::Excel,
            "powerpoint" | "slides" => AppType::Powerpoint,
            "outlook" | "mail" => AppType::Outlook,
            "onedrive" | "drive" | "storage" => AppType::Onedrive,
            "onenote" | "notes" => AppType::Onenote,
            "teams" | "chat" => AppType::Teams,
            _ => return None,
        };
        Some(app)
    }
}

impl From<String> for AppType {
    fn from(value: String) -> Self {
        AppType::from_arg(&value).unwrap_or_default()
    }
}

impl std::fmt::Display for AppType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
