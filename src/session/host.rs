//! Playback engine seen from the edit session
//!
//! The waveform player owns audio, zoom and seeking. The session only reads
//! the playhead and answers with viewport requests the player carries out.

use serde::{Deserialize, Serialize};

/// Read-only view of the waveform player
pub trait PlaybackHost {
    /// Track length in seconds
    fn duration(&self) -> f64;

    /// Playhead position in seconds
    fn current_time(&self) -> f64;

    fn is_playing(&self) -> bool;

    /// Playhead position as a fraction of the track (0 when the length is unknown)
    fn progress(&self) -> f64 {
        let duration = self.duration();
        if duration > 0.0 {
            (self.current_time() / duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Where the player should scroll after a mode change
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SeekTarget {
    /// Jump back to the start (the playhead was parked at the end)
    Start,
    /// Keep the playhead and centre the view on it
    Center { progress: f64 },
}

/// Zoom and seek the player should apply after toggling edit mode
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ViewportChange {
    /// Multiplier for the current pixels-per-second
    pub zoom_factor: f64,
    pub seek: SeekTarget,
}

impl ViewportChange {
    pub fn for_toggle(host: &dyn PlaybackHost, entering_edit: bool, zoom_factor: f64) -> Self {
        let zoom_factor = if entering_edit { zoom_factor } else { 1.0 / zoom_factor };
        let duration = host.duration();
        let seek = if duration <= 0.0 || host.current_time() >= duration {
            SeekTarget::Start
        } else {
            SeekTarget::Center {
                progress: host.progress(),
            }
        };
        Self { zoom_factor, seek }
    }
}

/// Fixed player state, used by tests and headless callers
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StaticPlayback {
    pub duration: f64,
    pub current_time: f64,
    pub playing: bool,
}

impl StaticPlayback {
    pub fn paused_at(duration: f64, current_time: f64) -> Self {
        Self {
            duration,
            current_time,
            playing: false,
        }
    }

    pub fn playing_at(duration: f64, current_time: f64) -> Self {
        Self {
            duration,
            current_time,
            playing: true,
        }
    }
}

impl PlaybackHost for StaticPlayback {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_viewport_centres_on_playhead() {
        let host = StaticPlayback::paused_at(10.0, 2.5);
        let change = ViewportChange::for_toggle(&host, true, 2.0);
        assert_eq!(change.zoom_factor, 2.0);
        assert_eq!(change.seek, SeekTarget::Center { progress: 0.25 });
    }

    #[test]
    fn test_toggle_viewport_at_track_end_seeks_to_start() {
        let host = StaticPlayback::paused_at(10.0, 10.0);
        let change = ViewportChange::for_toggle(&host, false, 2.0);
        assert_eq!(change.zoom_factor, 0.5);
        assert_eq!(change.seek, SeekTarget::Start);
    }
}
