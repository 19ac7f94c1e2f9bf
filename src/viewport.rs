//! Camera clamping and minimap coordinate mapping.

use crate::config;
use crate::types::Point;

fn clamp_axis(center: f64, extent: f64, map_extent: f64) -> f64 {
    let half = extent / 2.0;
    let mut center = center;
    if center - half < 0.0 {
        center = half;
    }
    if center + half > map_extent {
        center = map_extent - half;
    }
    center
}

/// Adjusts a view center so a `view_size` window stays inside `map_size`.
/// Each axis is handled on its own. If the view is larger than the map on an
/// axis, the far edge wins.
pub fn clamp_center(center: Point, view_size: Point, map_size: Point) -> Point {
    Point::new(
        clamp_axis(center.x, view_size.x, map_size.x),
        clamp_axis(center.y, view_size.y, map_size.y),
    )
}

/// The world-space window currently on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Point,
    pub size: Point,
}

impl Viewport {
    pub fn new(size: Point) -> Self {
        Viewport {
            center: Point::new(size.x / 2.0, size.y / 2.0),
            size,
        }
    }

    /// Recenters on `target` and pulls the window back inside the map.
    pub fn follow(&mut self, target: Point, map_size: Point) {
        self.center = clamp_center(target, self.size, map_size);
    }

    pub fn top_left(&self) -> Point {
        Point::new(
            self.center.x - self.size.x / 2.0,
            self.center.y - self.size.y / 2.0,
        )
    }

    /// Converts a world position into window-relative coordinates.
    pub fn world_to_screen(&self, world: Point) -> Point {
        world - self.top_left()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(Point::new(config::VIEW_WIDTH, config::VIEW_HEIGHT))
    }
}

/// A scaled-down picture of the whole map drawn in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Minimap {
    pub origin: Point, // Top-left corner on screen
    pub size: Point,
}

impl Minimap {
    pub fn new(origin: Point, size: Point) -> Self {
        Minimap { origin, size }
    }

    /// The default minimap in the top-right corner of a `frame_size` screen.
    pub fn anchored_top_right(frame_size: Point) -> Self {
        let size = Point::new(config::MINIMAP_WIDTH, config::MINIMAP_HEIGHT);
        let origin = Point::new(
            frame_size.x - size.x - config::MINIMAP_MARGIN,
            config::MINIMAP_MARGIN,
        );
        Minimap { origin, size }
    }

    /// A minimap of the whole map scaled by `scale`, centered in the frame.
    pub fn centered(frame_size: Point, map_size: Point, scale: f64) -> Self {
        let size = Point::new(map_size.x * scale, map_size.y * scale);
        let origin = Point::new(
            (frame_size.x - size.x) / 2.0,
            (frame_size.y - size.y) / 2.0,
        );
        Minimap { origin, size }
    }

    pub fn world_to_minimap(&self, world: Point, map_size: Point) -> Point {
        Point::new(
            (world.x / map_size.x) * self.size.x + self.origin.x,
            (world.y / map_size.y) * self.size.y + self.origin.y,
        )
    }

    pub fn minimap_to_world(&self, screen: Point, map_size: Point) -> Point {
        Point::new(
            (screen.x - self.origin.x) / self.size.x * map_size.x,
            (screen.y - self.origin.y) / self.size.y * map_size.y,
        )
    }

    pub fn contains(&self, screen: Point) -> bool {
        screen.x >= self.origin.x
            && screen.x <= self.origin.x + self.size.x
            && screen.y >= self.origin.y
            && screen.y <= self.origin.y + self.size.y
    }
}
