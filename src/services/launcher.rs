//! App launcher routing.
//!
//! Maps a hosted app and an account to the web entry point a new window loads.
//! Personal accounts go to consumer hosts, work accounts to tenant hosts.

use crate::types::account::AccountType;
use crate::types::app_type::AppType;

const SUITE_HOST: &str = "https://www.microsoft365.com";

/// Returns the entry URL for `app` under `account`.
pub fn launch_url(app: AppType, account: AccountType) -> String {
    let auth = match account {
        AccountType::Personal => 1,
        AccountType::Work => 2,
    };

    match (app, account) {
        (AppType::Home, _) => format!("{SUITE_HOST}/?auth={auth}"),
        (AppType::Word, _) => format!("{SUITE_HOST}/launch/word?auth={auth}"),
        (AppType::Excel, _) => format!("{SUITE_HOST}/launch/excel?auth={auth}"),
        (AppType::Powerpoint, _) => format!("{SUITE_HOST}/launch/powerpoint?auth={auth}"),
        (AppType::Outlook, AccountType::Personal) => "https://outlook.live.com/mail/".to_string(),
        (AppType::Outlook, AccountType::Work) => "https://outlook.office.com/mail/".to_string(),
        (AppType::Onedrive, AccountType::Personal) => "https://onedrive.live.com/".to_string(),
        (AppType::Onedrive, AccountType::Work) => format!("{SUITE_HOST}/launch/onedrive?auth={auth}"),
        (AppType::Onenote, _) => format!("https://www.onenote.com/notebooks?auth={auth}"),
        (AppType::Teams, AccountType::Personal) => "https://teams.live.com/".to_string(),
        (AppType::Teams, AccountType::Work) => "https://teams.microsoft.com/".to_string(),
    }
}

/// Resolves the URL for a new window: an explicit URL wins, then a custom home
/// URL for the home app, then the launcher URL.
pub fn resolve_url(
    app: AppType,
    account: AccountType,
    explicit: Option<&str>,
    custom_home: Option<&str>,
) -> String {
    if let Some(url) = explicit.map(str::trim).filter(|u| !u.is_empty()) {
        return url.to_string();
    }
    if app == AppType::Home {
        if let Some(url) = custom_home.map(str::trim).filter(|u| !u.is_empty()) {
            return url.to_string();
        }
    }
    launch_url(app, account)
}
