//! Two-state icon renderers: prayer toggles and interface tabs.

use super::frame::{Frame, Placement};
use crate::models::{PrayerIconSettings, StateSnapshot, TabIconSettings};

pub const PRAYER_BACKGROUND: &str = "prayers/background";
pub const PRAYER_BACKGROUND_ACTIVE: &str = "prayers/background_active";
pub const TAB_BACKGROUND: &str = "tabs/background";
pub const TAB_BACKGROUND_ACTIVE: &str = "tabs/background_active";

pub fn prayer_asset(prayer_id: &str) -> String {
    format!("prayers/{}", prayer_id)
}

pub fn tab_asset(tab_id: &str) -> String {
    format!("tabs/{}", tab_id)
}

/// Prayer button: the glow layer sits on top of the plain background only
/// while the configured prayer is active.
pub fn prayer_icon(snapshot: &StateSnapshot, settings: &PrayerIconSettings) -> Frame {
    let active = snapshot.is_prayer_active(&settings.prayer_id);
    let mut frame = Frame::new().with_image(PRAYER_BACKGROUND, Placement::Stretch);
    if active {
        frame = frame.with_image(PRAYER_BACKGROUND_ACTIVE, Placement::Stretch);
    }
    frame
        .with_image(prayer_asset(&settings.prayer_id), Placement::Centered)
        .with_state(u8::from(active))
}

/// Tab button: swaps the background while the tab has focus.
pub fn tab_icon(snapshot: &StateSnapshot, settings: &TabIconSettings) -> Frame {
    let active = snapshot.is_tab_active(&settings.tab_id);
    let background = if active {
        TAB_BACKGROUND_ACTIVE
    } else {
        TAB_BACKGROUND
    };
    Frame::new()
        .with_image(background, Placement::Stretch)
        .with_image(tab_asset(&settings.tab_id), Placement::Centered)
        .with_state(u8::from(active))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Player;

    fn snapshot(prayers: &[&str], tab: Option<&str>) -> StateSnapshot {
        StateSnapshot {
            player: Some(Player::default()),
            active_prayers: Some(prayers.iter().map(|p| p.to_string()).collect()),
            active_tab: tab.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_prayer_icon_active() {
        let frame = prayer_icon(
            &snapshot(&["protect_from_melee", "piety"], None),
            &PrayerIconSettings::default(),
        );
        assert_eq!(
            frame.assets().collect::<Vec<_>>(),
            vec![
                PRAYER_BACKGROUND,
                PRAYER_BACKGROUND_ACTIVE,
                "prayers/protect_from_melee"
            ]
        );
        assert_eq!(frame.state, Some(1));
    }

    #[test]
    fn test_prayer_icon_inactive() {
        let frame = prayer_icon(&snapshot(&["piety"], None), &PrayerIconSettings::default());
        assert_eq!(
            frame.assets().collect::<Vec<_>>(),
            vec![PRAYER_BACKGROUND, "prayers/protect_from_melee"]
        );
        assert_eq!(frame.state, Some(0));
    }

    #[test]
    fn test_tab_icon_swaps_background() {
        let settings = TabIconSettings::default();
        let active = tab_icon(&snapshot(&[], Some("inventory")), &settings);
        let inactive = tab_icon(&snapshot(&[], Some("combat")), &settings);

        assert_eq!(
            active.assets().collect::<Vec<_>>(),
            vec![TAB_BACKGROUND_ACTIVE, "tabs/inventory"]
        );
        assert_eq!(active.state, Some(1));
        assert_eq!(
            inactive.assets().collect::<Vec<_>>(),
            vec![TAB_BACKGROUND, "tabs/inventory"]
        );
        assert_eq!(inactive.state, Some(0));
    }

    #[test]
    fn test_logged_out_icons_are_inactive() {
        let mut stale = snapshot(&["protect_from_melee"], Some("inventory"));
        stale.player = None;

        assert_eq!(
            prayer_icon(&stale, &PrayerIconSettings::default()),
            prayer_icon(&StateSnapshot::logged_out(), &PrayerIconSettings::default())
        );
        assert_eq!(
            tab_icon(&stale, &TabIconSettings::default()),
            tab_icon(&StateSnapshot::logged_out(), &TabIconSettings::default())
        );
        assert_eq!(tab_icon(&stale, &TabIconSettings::default()).state, Some(0));
    }
}
