use crate::config;
use crate::error::SimError;
use log::info;

/// State behind the music menu. Nothing here plays audio; the overlay just
/// shows what would be playing.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    songs: Vec<String>,
    index: usize,
    volume: f32,
    playing: bool,
}

impl Playlist {
    pub fn new(songs: Vec<String>) -> Result<Self, SimError> {
        if songs.is_empty() {
            return Err(SimError::EmptyPlaylist);
        }
        Ok(Playlist {
            songs,
            index: 0,
            volume: config::DEFAULT_VOLUME,
            playing: true,
        })
    }

    pub fn current(&self) -> &str {
        &self.songs[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn next(&mut self) -> &str {
        self.index = (self.index + 1) % self.songs.len();
        info!("Now playing '{}'", self.current());
        self.current()
    }

    pub fn previous(&mut self) -> &str {
        self.index = (self.index + self.songs.len() - 1) % self.songs.len();
        info!("Now playing '{}'", self.current());
        self.current()
    }

    pub fn toggle_playing(&mut self) -> bool {
        self.playing = !self.playing;
        self.playing
    }

    pub fn volume_up(&mut self) -> f32 {
        self.volume = (self.volume + config::VOLUME_STEP).min(100.0);
        self.volume
    }

    pub fn volume_down(&mut self) -> f32 {
        self.volume = (self.volume - config::VOLUME_STEP).max(0.0);
        self.volume
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Playlist {
            songs: config::DEFAULT_SONGS.iter().map(|s| s.to_string()).collect(),
            index: 0,
            volume: config::DEFAULT_VOLUME,
            playing: true,
        }
    }
}
