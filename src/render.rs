use carsim::config::{CAR_LENGTH, CAR_WIDTH, ENLARGED_MINIMAP_SCALE};
use carsim::hud::HudStats;
use carsim::playlist::Playlist;
use carsim::simulation::Simulation;
use carsim::types::Point;
use carsim::ui_state::{MenuItem, MusicItem, Theme, UiMode, UiState};
use carsim::vehicle::Vehicle;
use carsim::viewport::{Minimap, Viewport};
use macroquad::prelude::*;

const BUTTON_WIDTH: f32 = 300.0;
const BUTTON_HEIGHT: f32 = 50.0;
const BUTTON_SPACING: f32 = 70.0;
const STAT_WIDTH: f32 = 180.0;
const STAT_HEIGHT: f32 = 40.0;
const STAT_SPACING: f32 = 10.0;
const CAR_DOT_RADIUS: f32 = 3.0;

// Conversion helpers
fn to_vec2(p: Point) -> Vec2 {
    vec2(p.x as f32, p.y as f32)
}

fn to_point(v: Vec2) -> Point {
    Point::new(v.x as f64, v.y as f64)
}

fn screen_size() -> Point {
    Point::new(screen_width() as f64, screen_height() as f64)
}

// Colors that change with the theme
#[derive(Debug, Clone, Copy)]
struct Palette {
    overlay: Color,
    outline: Color,
    button: Color,
    info_box: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        let (overlay, outline) = match theme {
            Theme::Dark => (Color::from_rgba(0, 0, 0, 150), WHITE),
            Theme::Light => (Color::from_rgba(175, 175, 175, 150), BLACK),
        };
        Palette {
            overlay,
            outline,
            button: Color::from_rgba(100, 100, 200, 255),
            info_box: Color::from_rgba(100, 100, 200, 180),
        }
    }
}

// Draws the map, the car and the overlays using macroquad
pub struct Renderer {
    map: Texture2D,
    palette: Palette,
    menu_buttons: Vec<(Rect, MenuItem)>,
    music_buttons: Vec<(Rect, MusicItem)>,
}

impl Renderer {
    pub fn new(map: Texture2D, theme: Theme) -> Self {
        map.set_filter(FilterMode::Linear);
        let mut renderer = Renderer {
            map,
            palette: Palette::for_theme(theme),
            menu_buttons: Vec::new(),
            music_buttons: Vec::new(),
        };
        renderer.apply_theme(theme);
        renderer
    }

    /// Rebuilds the overlay widgets for a theme. Called at startup and on
    /// every theme change.
    pub fn apply_theme(&mut self, theme: Theme) {
        self.palette = Palette::for_theme(theme);

        let center_x = screen_width() / 2.0;
        let center_y = screen_height() / 2.0;
        let button_x = center_x - BUTTON_WIDTH / 2.0;

        self.menu_buttons = MenuItem::ALL
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let y = center_y - 100.0 + i as f32 * BUTTON_SPACING;
                (Rect::new(button_x, y, BUTTON_WIDTH, BUTTON_HEIGHT), *item)
            })
            .collect();

        self.music_buttons = MusicItem::ALL
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let y = center_y - 30.0 + i as f32 * BUTTON_SPACING;
                (Rect::new(button_x, y, BUTTON_WIDTH, BUTTON_HEIGHT), *item)
            })
            .collect();
    }

    /// The small minimap in the corner, in screen coordinates.
    pub fn minimap(&self) -> Minimap {
        Minimap::anchored_top_right(screen_size())
    }

    pub fn menu_item_at(&self, pos: Vec2) -> Option<MenuItem> {
        self.menu_buttons
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, item)| *item)
    }

    pub fn music_item_at(&self, pos: Vec2) -> Option<MusicItem> {
        self.music_buttons
            .iter()
            .find(|(rect, _)| rect.contains(pos))
            .map(|(_, item)| *item)
    }

    pub fn draw_frame(
        &self,
        sim: &Simulation,
        viewport: &Viewport,
        ui: &UiState,
        playlist: &Playlist,
    ) {
        clear_background(BLACK);

        // World space: the camera window follows the clamped viewport
        set_camera(&Camera2D {
            target: to_vec2(viewport.center),
            zoom: vec2(2.0 / viewport.size.x as f32, 2.0 / viewport.size.y as f32),
            ..Default::default()
        });
        draw_texture(&self.map, 0.0, 0.0, WHITE);

        // Screen space: the window is exactly one view wide and high
        set_default_camera();
        Self::draw_car(&sim.vehicle, viewport);
        let map_size = sim.mask().size();

        if ui.show_stats() {
            self.draw_stats(&HudStats::from_vehicle(&sim.vehicle));
        }

        match ui.mode() {
            UiMode::EnlargedMinimap => {
                let minimap = Minimap::centered(screen_size(), map_size, ENLARGED_MINIMAP_SCALE);
                self.draw_minimap(&minimap, &sim.vehicle, map_size);
            }
            _ => self.draw_minimap(&self.minimap(), &sim.vehicle, map_size),
        }

        match ui.mode() {
            UiMode::EscapeMenu => self.draw_escape_menu(ui.started()),
            UiMode::MusicMenu => self.draw_music_menu(playlist),
            UiMode::Driving | UiMode::EnlargedMinimap => {}
        }
    }

    fn draw_car(vehicle: &Vehicle, viewport: &Viewport) {
        let pos = to_vec2(viewport.world_to_screen(vehicle.position));
        draw_rectangle_ex(
            pos.x,
            pos.y,
            CAR_LENGTH,
            CAR_WIDTH,
            DrawRectangleParams {
                offset: vec2(0.5, 0.5),
                rotation: vehicle.facing.to_radians() as f32,
                color: BLUE,
            },
        );
    }

    fn draw_minimap(&self, minimap: &Minimap, vehicle: &Vehicle, map_size: Point) {
        let origin = to_vec2(minimap.origin);
        let size = to_vec2(minimap.size);
        draw_rectangle(
            origin.x - 2.0,
            origin.y - 2.0,
            size.x + 4.0,
            size.y + 4.0,
            Color::from_rgba(50, 50, 50, 200),
        );
        draw_texture_ex(
            &self.map,
            origin.x,
            origin.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(size),
                ..Default::default()
            },
        );
        let dot = to_vec2(minimap.world_to_minimap(vehicle.position, map_size));
        draw_circle(dot.x, dot.y, CAR_DOT_RADIUS, RED);
    }

    fn draw_button(&self, rect: &Rect, label: &str, font_size: f32) {
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, self.palette.button);
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, self.palette.outline);
        let dims = measure_text(label, None, font_size as u16, 1.0);
        draw_text(
            label,
            rect.x + (rect.w - dims.width) / 2.0,
            rect.y + (rect.h + dims.height) / 2.0,
            font_size,
            WHITE,
        );
    }

    fn draw_stats(&self, stats: &HudStats) {
        let x = 20.0;
        let mut y = 20.0;
        for line in stats.lines() {
            let rect = Rect::new(x, y, STAT_WIDTH, STAT_HEIGHT);
            draw_rectangle(rect.x, rect.y, rect.w, rect.h, self.palette.button);
            draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, self.palette.outline);
            draw_text(&line, rect.x + 10.0, rect.y + 25.0, 18.0, WHITE);
            y += STAT_HEIGHT + STAT_SPACING;
        }
    }

    fn draw_overlay(&self) {
        draw_rectangle(0.0, 0.0, screen_width(), screen_height(), self.palette.overlay);
    }

    fn draw_escape_menu(&self, started: bool) {
        self.draw_overlay();
        for (rect, item) in &self.menu_buttons {
            self.draw_button(rect, item.label(started), 25.0);
        }
    }

    fn draw_music_menu(&self, playlist: &Playlist) {
        self.draw_overlay();

        let center_x = screen_width() / 2.0;
        let center_y = screen_height() / 2.0;
        let box_rect = Rect::new(center_x - 200.0, center_y - 220.0, 400.0, 180.0);
        draw_rectangle(box_rect.x, box_rect.y, box_rect.w, box_rect.h, self.palette.info_box);
        draw_rectangle_lines(
            box_rect.x,
            box_rect.y,
            box_rect.w,
            box_rect.h,
            2.0,
            self.palette.outline,
        );

        let status = if playlist.is_playing() { "Playing" } else { "Paused" };
        let lines = [
            ("Music Menu".to_string(), 30.0, center_y - 190.0),
            (format!("Volume: {}%", playlist.volume() as i32), 22.0, center_y - 140.0),
            (format!("Current Song: {}", playlist.current()), 22.0, center_y - 105.0),
            (status.to_string(), 22.0, center_y - 70.0),
        ];
        for (text, size, y) in lines {
            let dims = measure_text(&text, None, size as u16, 1.0);
            draw_text(&text, center_x - dims.width / 2.0, y, size, WHITE);
        }

        for (rect, item) in &self.music_buttons {
            self.draw_button(rect, item.label(), 22.0);
        }
    }

    pub fn mouse_clicked() -> Option<Vec2> {
        is_mouse_button_pressed(MouseButton::Left).then(|| Vec2::from(mouse_position()))
    }

    pub fn mouse_point(pos: Vec2) -> Point {
        to_point(pos)
    }
}
