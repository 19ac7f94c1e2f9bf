use crate::render::Renderer;
use carsim::config::{SONG_CHANGE_COOLDOWN, VIEW_HEIGHT, VIEW_WIDTH, VOLUME_CHANGE_COOLDOWN};
use carsim::cooldown::GateAction;
use carsim::hud::TripSnapshot;
use carsim::motion::MotionOutcome;
use carsim::playlist::Playlist;
use carsim::simulation::Simulation;
use carsim::types::{Controls, FrameInput, Point};
use carsim::ui_state::{UiCommand, UiKey, UiMode, UiState};
use carsim::viewport::Viewport;
use log::info;
use macroquad::prelude::{KeyCode, get_frame_time, is_key_down, next_frame};

const UI_KEYS: [(UiKey, KeyCode); 4] = [
    (UiKey::Escape, KeyCode::Escape),
    (UiKey::Stats, KeyCode::Tab),
    (UiKey::Minimap, KeyCode::M),
    (UiKey::Restart, KeyCode::R),
];

const MUSIC_KEYS: [(GateAction, KeyCode); 4] = [
    (GateAction::PreviousSong, KeyCode::Left),
    (GateAction::NextSong, KeyCode::Right),
    (GateAction::VolumeUp, KeyCode::Up),
    (GateAction::VolumeDown, KeyCode::Down),
];

/// Owns the simulation and everything the player can poke at around it.
pub struct Game {
    pub sim: Simulation,
    pub ui: UiState,
    pub playlist: Playlist,
    pub viewport: Viewport,
    quit: bool,
}

impl Game {
    pub fn new(sim: Simulation, playlist: Playlist) -> Self {
        let mut viewport = Viewport::new(Point::new(VIEW_WIDTH, VIEW_HEIGHT));
        viewport.follow(sim.vehicle.position, sim.mask().size());
        Game {
            sim,
            ui: UiState::new(),
            playlist,
            viewport,
            quit: false,
        }
    }

    pub async fn run(&mut self, renderer: &mut Renderer) {
        info!("Starting main loop...");

        while !self.should_quit() {
            let mut commands: Vec<UiCommand> = UI_KEYS
                .iter()
                .filter_map(|&(key, code)| self.ui.handle_key(key, is_key_down(code)))
                .collect();
            commands.extend(self.poll_mouse(renderer));

            for command in commands {
                if let UiCommand::ThemeChanged(theme) = command {
                    renderer.apply_theme(theme);
                }
                self.apply_command(command);
            }

            if self.ui.mode() == UiMode::MusicMenu {
                for (action, code) in MUSIC_KEYS {
                    if is_key_down(code) {
                        self.adjust_music(action);
                    }
                }
            }

            let input = Self::sample_input();
            self.update(&input, get_frame_time() as f64);

            renderer.draw_frame(&self.sim, &self.viewport, &self.ui, &self.playlist);
            next_frame().await;
        }

        info!("Exiting Car Simulation.");
    }

    fn sample_input() -> FrameInput {
        FrameInput {
            controls: Controls {
                forward: is_key_down(KeyCode::W),
                backward: is_key_down(KeyCode::S),
                turn_left: is_key_down(KeyCode::A),
                turn_right: is_key_down(KeyCode::D),
            },
            refuel: is_key_down(KeyCode::F),
        }
    }

    fn poll_mouse(&mut self, renderer: &Renderer) -> Option<UiCommand> {
        let pos = Renderer::mouse_clicked()?;
        match self.ui.mode() {
            UiMode::EscapeMenu => renderer
                .menu_item_at(pos)
                .and_then(|item| self.ui.select(item)),
            UiMode::MusicMenu => renderer
                .music_item_at(pos)
                .and_then(|item| self.ui.select_music(item)),
            UiMode::Driving | UiMode::EnlargedMinimap => {
                if renderer.minimap().contains(Renderer::mouse_point(pos)) {
                    self.ui.minimap_clicked();
                }
                None
            }
        }
    }

    /// Advances the car by one frame and keeps the camera on it.
    pub fn update(&mut self, input: &FrameInput, dt: f64) -> Option<MotionOutcome> {
        let outcome = self.sim.step(input, dt, self.ui.paused());
        if outcome.is_some() {
            self.viewport
                .follow(self.sim.vehicle.position, self.sim.mask().size());
            carsim::debug_view!(
                frame = self.sim.frame(),
                "View centered at ({:.1}, {:.1})",
                self.viewport.center.x,
                self.viewport.center.y
            );
        }
        outcome
    }

    /// Carries out a UI command. Theme changes only need the renderer, which
    /// the caller handles.
    pub fn apply_command(&mut self, command: UiCommand) {
        match command {
            UiCommand::Restart => {
                self.sim.restart();
                self.viewport
                    .follow(self.sim.vehicle.position, self.sim.mask().size());
            }
            UiCommand::Quit => self.quit = true,
            UiCommand::ThemeChanged(theme) => info!("Theme set to {:?}", theme),
            UiCommand::TripSnapshot => {
                info!("Trip snapshot: {}", TripSnapshot::capture(&self.sim.vehicle));
            }
            UiCommand::TogglePlayback => {
                let playing = self.playlist.toggle_playing();
                info!("Music {}", if playing { "playing" } else { "paused" });
            }
            UiCommand::NextSong => {
                self.playlist.next();
            }
            UiCommand::PreviousSong => {
                self.playlist.previous();
            }
        }
    }

    /// Applies a held music key, at most once per cooldown window.
    pub fn adjust_music(&mut self, action: GateAction) {
        let cooldown = match action {
            GateAction::PreviousSong | GateAction::NextSong => SONG_CHANGE_COOLDOWN,
            GateAction::VolumeUp | GateAction::VolumeDown => VOLUME_CHANGE_COOLDOWN,
            GateAction::Refuel => return,
        };
        if !self.sim.action_ready(action, cooldown) {
            return;
        }
        match action {
            GateAction::PreviousSong => {
                self.playlist.previous();
            }
            GateAction::NextSong => {
                self.playlist.next();
            }
            GateAction::VolumeUp => {
                self.playlist.volume_up();
            }
            GateAction::VolumeDown => {
                self.playlist.volume_down();
            }
            GateAction::Refuel => {}
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carsim::road_mask::RoadMask;
    use carsim::ui_state::MenuItem;
    use carsim::vehicle::Vehicle;

    fn open_road(width: usize, height: usize) -> RoadMask {
        let bytes = [128u8, 128, 128, 255].repeat(width * height);
        RoadMask::from_rgba(width, height, &bytes).unwrap()
    }

    fn game() -> Game {
        let sim = Simulation::new(open_road(4000, 3000), Point::new(2000.0, 1500.0)).unwrap();
        let playlist = Playlist::new(vec!["a".into(), "b".into(), "c".into()]).unwrap();
        Game::new(sim, playlist)
    }

    fn drive(game: &mut Game) {
        game.ui.select(MenuItem::Restart);
        assert_eq!(game.ui.mode(), UiMode::Driving);
    }

    #[test]
    fn test_menu_pauses_simulation() {
        let mut game = game();
        assert!(game.update(&FrameInput::forward(), 0.1).is_none());
        assert_eq!(game.sim.vehicle.speed, 0.0);
        assert_eq!(game.sim.frame(), 0);
    }

    #[test]
    fn test_viewport_follows_car() {
        let mut game = game();
        drive(&mut game);
        for _ in 0..10 {
            game.update(&FrameInput::forward(), 0.1);
        }
        assert!(game.sim.vehicle.position.x > 2000.0);
        assert_eq!(game.viewport.center, game.sim.vehicle.position);
    }

    #[test]
    fn test_restart_command_resets_car() {
        let mut game = game();
        drive(&mut game);
        for _ in 0..5 {
            game.update(&FrameInput::forward(), 0.1);
        }
        game.apply_command(UiCommand::Restart);
        assert_eq!(game.sim.vehicle, Vehicle::new(Point::new(2000.0, 1500.0), 0.0));
        assert_eq!(game.viewport.center, Point::new(2000.0, 1500.0));
    }

    #[test]
    fn test_car_drawn_at_view_center_away_from_edges() {
        let mut game = game();
        drive(&mut game);
        game.update(&FrameInput::forward(), 0.1);
        let screen = game.viewport.world_to_screen(game.sim.vehicle.position);
        assert_eq!(screen, Point::new(VIEW_WIDTH / 2.0, VIEW_HEIGHT / 2.0));
        assert_eq!(game.sim.vehicle.start(), Point::new(2000.0, 1500.0));
    }

    #[test]
    fn test_quit_command() {
        let mut game = game();
        assert!(!game.should_quit());
        game.apply_command(UiCommand::Quit);
        assert!(game.should_quit());
    }

    #[test]
    fn test_playlist_commands() {
        let mut game = game();
        game.apply_command(UiCommand::NextSong);
        assert_eq!(game.playlist.current(), "b");
        game.apply_command(UiCommand::PreviousSong);
        game.apply_command(UiCommand::PreviousSong);
        assert_eq!(game.playlist.current(), "c");
        let playing = game.playlist.is_playing();
        game.apply_command(UiCommand::TogglePlayback);
        assert_ne!(game.playlist.is_playing(), playing);
    }

    #[test]
    fn test_held_music_key_is_rate_limited() {
        let mut game = game();
        let volume = game.playlist.volume();
        game.adjust_music(GateAction::VolumeUp);
        game.adjust_music(GateAction::VolumeUp);
        assert_eq!(game.playlist.volume(), (volume + 5.0).min(100.0));
    }
}
