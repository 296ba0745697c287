//! App-Type Classifier.
//!
//! Infers which hosted application a window shows from its URL and title.
//! Rules are checked in priority order and the first match wins; when nothing
//! matches the window is `Home`.

use crate::types::app_type::AppType;

/// Which input a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Url,
    Either,
}

struct Rule {
    app: AppType,
    source: Source,
    needles: &'static [&'static str],
}

/// Priority-ordered rules. Order is significant: a OneDrive URL showing a
/// `.pptx` document is PowerPoint because extension hints precede the OneDrive rule.
const RULES: &[Rule] = &[
    Rule {
        app: AppType::Word,
        source: Source::Url,
        needles: &["/launch/word", "word.office", "/word"],
    },
    Rule {
        app: AppType::Excel,
        source: Source::Url,
        needles: &["/launch/excel", "excel.office", "/excel"],
    },
    Rule {
        app: AppType::Powerpoint,
        source: Source::Url,
        needles: &["/launch/powerpoint", "powerpoint.office", "/powerpoint"],
    },
    Rule {
        app: AppType::Outlook,
        source: Source::Url,
        needles: &["outlook"],
    },
    Rule {
        app: AppType::Onenote,
        source: Source::Url,
        needles: &["onenote"],
    },
    Rule {
        app: AppType::Teams,
        source: Source::Url,
        needles: &["teams.", "/teams"],
    },
    Rule {
        app: AppType::Word,
        source: Source::Either,
        needles: &[".docx", ".doc"],
    },
    Rule {
        app: AppType::Excel,
        source: Source::Either,
        needles: &[".xlsx", ".xls", ".csv"],
    },
    Rule {
        app: AppType::Powerpoint,
        source: Source::Either,
        needles: &[".pptx", ".ppt"],
    },
    Rule {
        app: AppType::Onedrive,
        source: Source::Url,
        needles: &["onedrive", "sharepoint", "/files"],
    },
];

/// Classifies a window by its current `url` and document `title`.
pub fn classify(url: &str, title: &str) -> AppType {
    let url = url.to_ascii_lowercase();
    let title = title.to_ascii_lowercase();

    RULES
        .iter()
        .find(|rule| {
            rule.needles.iter().any(|needle| match rule.source {
                Source::Url => url.contains(needle),
                Source::Either => url.contains(needle) || title.contains(needle),
            })
        })
        .map(|rule| rule.app)
        .unwrap_or(AppType::Home)
}
