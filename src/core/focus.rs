// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Konsole appends `<N>` plus a LEFT-TO-RIGHT MARK to secondary sessions.
const KONSOLE_SESSION_MARKER: &str = ">\u{200E}";

const BROWSER_TITLE: &str = "Google Chrome";

/// Separator between title segments: one symbol surrounded by spaces (" — ", " - ").
static SEGMENT_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" [^\w\s] ").expect("separator pattern is valid"));

static MAIL_TAB: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.+ - (\S+@\S+ - (?:\S+ Mail|Gmail) - Google Chrome)$")
        .expect("mail tab pattern is valid")
});

/// Identity of whatever currently holds the user's attention.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FocusKey(String);

impl FocusKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FocusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collapse a window-manager title into a stable focus key.
///
/// Titles that match none of the known noisy shapes pass through untouched.
pub fn normalize(desktop: i32, title: &str) -> FocusKey {
    let shortname = SEGMENT_SEPARATOR.split(title).last().unwrap_or(title);

    let window = if shortname.ends_with(KONSOLE_SESSION_MARKER) {
        title.rsplit_once(' ').map_or(title, |(head, _)| head)
    } else if shortname != BROWSER_TITLE {
        shortname
    } else {
        MAIL_TAB
            .captures(title)
            .and_then(|caps| caps.get(1))
            .map_or(title, |m| m.as_str())
    };

    FocusKey(format!("{desktop} {window}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_tab_keeps_account() {
        let key = normalize(3, "Inbox - me@x.com - Gmail - Google Chrome");
        assert_eq!(key.as_str(), "3 me@x.com - Gmail - Google Chrome");

        let key = normalize(1, "Re: lunch? - work@corp.example - Corp Mail - Google Chrome");
        assert_eq!(key.as_str(), "1 work@corp.example - Corp Mail - Google Chrome");
    }

    #[test]
    fn test_unrecognized_title_passes_through() {
        assert_eq!(normalize(3, "Random App").as_str(), "3 Random App");
    }

    #[test]
    fn test_last_segment_wins() {
        assert_eq!(
            normalize(2, "notes.md — ~/src/focustrack — Kate").as_str(),
            "2 Kate"
        );
        assert_eq!(
            normalize(1, "Rust Docs - Mozilla Firefox").as_str(),
            "1 Mozilla Firefox"
        );
    }

    #[test]
    fn test_hyphenated_words_are_not_separators() {
        assert_eq!(normalize(1, "emacs-nox").as_str(), "1 emacs-nox");
    }

    #[test]
    fn test_other_browser_tab_falls_back_to_raw_title() {
        assert_eq!(
            normalize(4, "Rust Playground - Google Chrome").as_str(),
            "4 Rust Playground - Google Chrome"
        );
    }

    #[test]
    fn test_konsole_secondary_session_strips_suffix() {
        let title = "~ : vim — Konsole <2>\u{200E}";
        assert_eq!(normalize(1, title).as_str(), "1 ~ : vim — Konsole");
    }

    #[test]
    fn test_same_session_different_subject_collapses() {
        let a = normalize(2, "Meeting notes - me@x.com - Gmail - Google Chrome");
        let b = normalize(2, "Invoice #42 - me@x.com - Gmail - Google Chrome");
        assert_eq!(a, b);
    }
}
