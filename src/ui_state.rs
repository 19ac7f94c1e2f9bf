//! Menu and overlay state for the window shell.
//!
//! Keys arrive as held state every frame. [`KeyLatch`] turns them into single
//! presses that only re-arm once the key has been released, so holding Escape
//! does not flicker the menu.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    Driving,
    #[default]
    EscapeMenu,
    MusicMenu,
    EnlargedMinimap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Keys the menus react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiKey {
    Escape,
    Stats,
    Minimap,
    Restart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Restart,
    ChangeTheme,
    Music,
    Quit,
    TripSnapshot,
}

impl MenuItem {
    pub const ALL: [MenuItem; 5] = [
        MenuItem::Restart,
        MenuItem::ChangeTheme,
        MenuItem::Music,
        MenuItem::Quit,
        MenuItem::TripSnapshot,
    ];

    /// Button label; the restart button reads "Start" before the first drive.
    pub fn label(self, started: bool) -> &'static str {
        match self {
            MenuItem::Restart if !started => "Start",
            MenuItem::Restart => "Restart",
            MenuItem::ChangeTheme => "Change Theme",
            MenuItem::Music => "Music",
            MenuItem::Quit => "Quit",
            MenuItem::TripSnapshot => "Trip Snapshot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicItem {
    PlayPause,
    NextSong,
    PreviousSong,
    Back,
}

impl MusicItem {
    pub const ALL: [MusicItem; 4] = [
        MusicItem::PlayPause,
        MusicItem::NextSong,
        MusicItem::PreviousSong,
        MusicItem::Back,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MusicItem::PlayPause => "Play/Pause",
            MusicItem::NextSong => "Next Song",
            MusicItem::PreviousSong => "Previous Song",
            MusicItem::Back => "Back",
        }
    }
}

/// Effects of a UI interaction that reach outside the menu state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    Restart,
    Quit,
    ThemeChanged(Theme),
    TripSnapshot,
    TogglePlayback,
    NextSong,
    PreviousSong,
}

/// Edge detector over held keys.
#[derive(Debug, Default)]
pub struct KeyLatch<K> {
    held: HashSet<K>,
}

impl<K: Eq + std::hash::Hash + Copy> KeyLatch<K> {
    pub fn new() -> Self {
        KeyLatch {
            held: HashSet::new(),
        }
    }

    /// Feeds the current state of `key`. Returns true only on the frame the
    /// key goes down.
    pub fn pressed(&mut self, key: K, down: bool) -> bool {
        down && self.held.insert(key)
    }

    /// Returns true on the frame the key comes back up.
    pub fn released(&mut self, key: K, down: bool) -> bool {
        !down && self.held.remove(&key)
    }
}

#[derive(Debug)]
pub struct UiState {
    mode: UiMode,
    show_stats: bool,
    theme: Theme,
    started: bool,
    latch: KeyLatch<UiKey>,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    /// The game opens on the escape menu with a "Start" button.
    pub fn new() -> Self {
        UiState {
            mode: UiMode::EscapeMenu,
            show_stats: false,
            theme: Theme::Dark,
            started: false,
            latch: KeyLatch::new(),
        }
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn show_stats(&self) -> bool {
        self.show_stats
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// True while a menu covers the road; the simulation must not advance.
    pub fn paused(&self) -> bool {
        matches!(self.mode, UiMode::EscapeMenu | UiMode::MusicMenu)
    }

    fn set_mode(&mut self, mode: UiMode) {
        if self.mode != mode {
            crate::debug_ui!("Mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
    }

    /// Feeds the held state of one key for this frame.
    pub fn handle_key(&mut self, key: UiKey, down: bool) -> Option<UiCommand> {
        if self.latch.pressed(key, down) {
            return self.on_press(key);
        }
        if self.latch.released(key, down) && key == UiKey::Escape {
            // The first escape release arms the "Restart" label
            self.started = true;
        }
        None
    }

    fn on_press(&mut self, key: UiKey) -> Option<UiCommand> {
        match key {
            UiKey::Escape => {
                let next = match self.mode {
                    UiMode::MusicMenu | UiMode::EnlargedMinimap | UiMode::EscapeMenu => {
                        UiMode::Driving
                    }
                    UiMode::Driving => UiMode::EscapeMenu,
                };
                self.set_mode(next);
                None
            }
            UiKey::Stats => {
                self.show_stats = !self.show_stats;
                None
            }
            UiKey::Minimap => match self.mode {
                UiMode::EscapeMenu => {
                    self.set_mode(UiMode::MusicMenu);
                    None
                }
                UiMode::MusicMenu => Some(UiCommand::TogglePlayback),
                UiMode::Driving | UiMode::EnlargedMinimap => {
                    self.toggle_enlarged_minimap();
                    self.show_stats = false;
                    None
                }
            },
            UiKey::Restart if self.mode == UiMode::EscapeMenu => self.select(MenuItem::Restart),
            UiKey::Restart => None,
        }
    }

    fn toggle_enlarged_minimap(&mut self) {
        let next = if self.mode == UiMode::EnlargedMinimap {
            UiMode::Driving
        } else {
            UiMode::EnlargedMinimap
        };
        self.set_mode(next);
    }

    /// Clicking the corner minimap while driving enlarges it (or shrinks it back).
    pub fn minimap_clicked(&mut self) {
        if matches!(self.mode, UiMode::Driving | UiMode::EnlargedMinimap) {
            self.toggle_enlarged_minimap();
        }
    }

    /// Activates an escape menu button. Ignored outside the escape menu.
    pub fn select(&mut self, item: MenuItem) -> Option<UiCommand> {
        if self.mode != UiMode::EscapeMenu {
            return None;
        }
        match item {
            MenuItem::Restart => {
                self.started = true;
                self.set_mode(UiMode::Driving);
                Some(UiCommand::Restart)
            }
            MenuItem::ChangeTheme => {
                self.theme = self.theme.toggled();
                Some(UiCommand::ThemeChanged(self.theme))
            }
            MenuItem::Music => {
                self.set_mode(UiMode::MusicMenu);
                None
            }
            MenuItem::Quit => Some(UiCommand::Quit),
            MenuItem::TripSnapshot => Some(UiCommand::TripSnapshot),
        }
    }

    /// Activates a music menu button. Ignored outside the music menu.
    pub fn select_music(&mut self, item: MusicItem) -> Option<UiCommand> {
        if self.mode != UiMode::MusicMenu {
            return None;
        }
        match item {
            MusicItem::PlayPause => Some(UiCommand::TogglePlayback),
            MusicItem::NextSong => Some(UiCommand::NextSong),
            MusicItem::PreviousSong => Some(UiCommand::PreviousSong),
            MusicItem::Back => {
                self.set_mode(UiMode::EscapeMenu);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap(ui: &mut UiState, key: UiKey) -> Option<UiCommand> {
        let cmd = ui.handle_key(key, true);
        ui.handle_key(key, false);
        cmd
    }

    #[test]
    fn test_starts_paused_in_escape_menu() {
        let ui = UiState::new();
        assert_eq!(ui.mode(), UiMode::EscapeMenu);
        assert!(ui.paused());
        assert!(!ui.started());
        assert_eq!(MenuItem::Restart.label(ui.started()), "Start");
    }

    #[test]
    fn test_escape_toggles_menu_and_arms_restart_label() {
        let mut ui = UiState::new();
        tap(&mut ui, UiKey::Escape);
        assert_eq!(ui.mode(), UiMode::Driving);
        assert!(!ui.paused());
        assert!(ui.started());
        assert_eq!(MenuItem::Restart.label(ui.started()), "Restart");

        tap(&mut ui, UiKey::Escape);
        assert_eq!(ui.mode(), UiMode::EscapeMenu);
    }

    #[test]
    fn test_held_key_fires_once() {
        let mut ui = UiState::new();
        ui.handle_key(UiKey::Escape, true);
        for _ in 0..30 {
            ui.handle_key(UiKey::Escape, true);
        }
        assert_eq!(ui.mode(), UiMode::Driving);
        ui.handle_key(UiKey::Escape, false);
        ui.handle_key(UiKey::Escape, true);
        assert_eq!(ui.mode(), UiMode::EscapeMenu);
    }

    #[test]
    fn test_escape_closes_overlays_first() {
        let mut ui = UiState::new();
        tap(&mut ui, UiKey::Escape); // driving
        tap(&mut ui, UiKey::Minimap);
        assert_eq!(ui.mode(), UiMode::EnlargedMinimap);
        assert!(!ui.paused());
        tap(&mut ui, UiKey::Escape);
        assert_eq!(ui.mode(), UiMode::Driving);

        tap(&mut ui, UiKey::Escape); // escape menu
        tap(&mut ui, UiKey::Minimap); // music menu
        assert_eq!(ui.mode(), UiMode::MusicMenu);
        assert!(ui.paused());
        tap(&mut ui, UiKey::Escape);
        assert_eq!(ui.mode(), UiMode::Driving);
    }

    #[test]
    fn test_minimap_toggle_hides_stats() {
        let mut ui = UiState::new();
        tap(&mut ui, UiKey::Escape);
        tap(&mut ui, UiKey::Stats);
        assert!(ui.show_stats());
        tap(&mut ui, UiKey::Minimap);
        assert!(!ui.show_stats());
        assert_eq!(ui.mode(), UiMode::EnlargedMinimap);
    }

    #[test]
    fn test_m_in_music_menu_toggles_playback() {
        let mut ui = UiState::new();
        ui.select(MenuItem::Music);
        assert_eq!(tap(&mut ui, UiKey::Minimap), Some(UiCommand::TogglePlayback));
        assert_eq!(ui.mode(), UiMode::MusicMenu);
    }

    #[test]
    fn test_restart_key_only_in_escape_menu() {
        let mut ui = UiState::new();
        assert_eq!(tap(&mut ui, UiKey::Restart), Some(UiCommand::Restart));
        assert_eq!(ui.mode(), UiMode::Driving);
        assert_eq!(tap(&mut ui, UiKey::Restart), None);
    }

    #[test]
    fn test_menu_items() {
        let mut ui = UiState::new();
        assert_eq!(
            ui.select(MenuItem::ChangeTheme),
            Some(UiCommand::ThemeChanged(Theme::Light))
        );
        assert_eq!(ui.theme(), Theme::Light);
        assert_eq!(ui.select(MenuItem::TripSnapshot), Some(UiCommand::TripSnapshot));
        assert_eq!(ui.select(MenuItem::Quit), Some(UiCommand::Quit));
        assert_eq!(ui.select(MenuItem::Music), None);
        assert_eq!(ui.mode(), UiMode::MusicMenu);
        // Escape menu buttons do nothing while the music menu is up
        assert_eq!(ui.select(MenuItem::Quit), None);
    }

    #[test]
    fn test_music_menu_items() {
        let mut ui = UiState::new();
        assert_eq!(ui.select_music(MusicItem::NextSong), None);
        ui.select(MenuItem::Music);
        assert_eq!(ui.select_music(MusicItem::NextSong), Some(UiCommand::NextSong));
        assert_eq!(ui.select_music(MusicItem::PreviousSong), Some(UiCommand::PreviousSong));
        assert_eq!(ui.select_music(MusicItem::PlayPause), Some(UiCommand::TogglePlayback));
        assert_eq!(ui.select_music(MusicItem::Back), None);
        assert_eq!(ui.mode(), UiMode::EscapeMenu);
    }

    #[test]
    fn test_minimap_click_ignored_in_menus() {
        let mut ui = UiState::new();
        ui.minimap_clicked();
        assert_eq!(ui.mode(), UiMode::EscapeMenu);
        tap(&mut ui, UiKey::Escape);
        ui.minimap_clicked();
        assert_eq!(ui.mode(), UiMode::EnlargedMinimap);
        ui.minimap_clicked();
        assert_eq!(ui.mode(), UiMode::Driving);
    }

    #[test]
    fn test_key_latch() {
        let mut latch = KeyLatch::new();
        assert!(latch.pressed(1, true));
        assert!(!latch.pressed(1, true));
        assert!(latch.released(1, false));
        assert!(!latch.released(1, false));
        assert!(latch.pressed(1, true));
    }
}
