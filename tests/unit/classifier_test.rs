//! Table tests for the app-type classifier.

use rstest::rstest;
use suiteshell::services::classifier::classify;
use suiteshell::services::launcher::launch_url;
use suiteshell::types::account::AccountType;
use suiteshell::types::app_type::AppType;

#[rstest]
#[case("https://www.microsoft365.com/launch/word?auth=2", "", AppType::Word)]
#[case("https://word.office.com/we/wordeditorframe.aspx", "", AppType::Word)]
#[case("https://www.office.com/launch/excel?auth=1", "", AppType::Excel)]
#[case("https://excel.officeapps.live.com/x/_layouts/xlviewerinternal.aspx", "", AppType::Excel)]
#[case("https://www.microsoft365.com/launch/powerpoint", "", AppType::Powerpoint)]
#[case("https://outlook.office.com/mail/inbox", "", AppType::Outlook)]
#[case("https://outlook.live.com/calendar/", "", AppType::Outlook)]
#[case("https://www.onenote.com/notebooks", "", AppType::Onenote)]
#[case("https://teams.microsoft.com/_#/conversations", "", AppType::Teams)]
#[case("https://teams.live.com/v2/", "", AppType::Teams)]
#[case("https://onedrive.live.com/?id=root", "", AppType::Onedrive)]
#[case("https://contoso-my.sharepoint.com/personal/me/_layouts/15/onedrive.aspx", "", AppType::Onedrive)]
#[case("https://www.microsoft365.com/?auth=1", "Microsoft 365", AppType::Home)]
#[case("about:blank", "", AppType::Home)]
#[case("", "", AppType::Home)]
fn classifies_by_url(#[case] url: &str, #[case] title: &str, #[case] expected: AppType) {
    assert_eq!(classify(url, title), expected);
}

#[rstest]
#[case("Budget 2024.xlsx", AppType::Excel)]
#[case("export.csv", AppType::Excel)]
#[case("Quarterly Review.pptx", AppType::Powerpoint)]
#[case("Letter.docx", AppType::Word)]
#[case("Old Memo.doc", AppType::Word)]
fn document_title_overrides_storage_url(#[case] title: &str, #[case] expected: AppType) {
    let url = "https://contoso-my.sharepoint.com/:x:/r/personal/me/_layouts/15/Doc.aspx";
    assert_eq!(classify(url, title), expected);
}

#[test]
fn onedrive_url_with_presentation_is_powerpoint() {
    assert_eq!(
        classify("https://onedrive.live.com/edit?resid=1&file=Deck.pptx", ""),
        AppType::Powerpoint
    );
}

#[test]
fn classification_ignores_case() {
    assert_eq!(classify("HTTPS://OUTLOOK.OFFICE.COM/MAIL/", ""), AppType::Outlook);
    assert_eq!(classify("https://example.com/", "REPORT.XLSX"), AppType::Excel);
}

#[test]
fn app_hosts_win_over_document_hints() {
    // An Outlook attachment preview named like a spreadsheet is still Outlook.
    assert_eq!(
        classify("https://outlook.office.com/mail/deeplink", "invoice.xlsx"),
        AppType::Outlook
    );
}

#[test]
fn title_alone_does_not_select_an_app_host() {
    assert_eq!(classify("https://www.microsoft365.com/", "Outlook"), AppType::Home);
}

#[test]
fn every_launch_url_classifies_back_to_its_app() {
    for account in [AccountType::Personal, AccountType::Work] {
        for app in AppType::ALL {
            assert_eq!(
                classify(&launch_url(app, account), ""),
                app,
                "launch url for {app} ({account}) misclassified"
            );
        }
    }
}
