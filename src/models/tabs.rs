//! Game interface tabs and their default hotkeys.

/// Every tab id a tab-icon button can be configured with, paired with the
/// key the game binds to it by default. `None` means the tab has no hotkey.
pub const TAB_KEYS: &[(&str, Option<&str>)] = &[
    ("combat", Some("f1")),
    ("skills", Some("f2")),
    ("quests", Some("f3")),
    ("inventory", Some("escape")),
    ("equipment", Some("f4")),
    ("prayer", Some("f5")),
    ("magic", Some("f6")),
    ("clan", Some("f7")),
    ("friends", Some("f8")),
    ("account", Some("f9")),
    ("logout", None),
    ("settings", Some("f10")),
    ("emotes", Some("f11")),
    ("music", Some("f12")),
];

/// Default hotkey for `tab_id`, if the tab has one.
pub fn default_key_for_tab(tab_id: &str) -> Option<&'static str> {
    TAB_KEYS
        .iter()
        .find(|(id, _)| *id == tab_id)
        .and_then(|(_, key)| *key)
}
