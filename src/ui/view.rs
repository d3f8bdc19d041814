use super::utils::format_clock;
use crate::app::state::PlaybackSnapshot;
use crate::catalog::Track;
use crate::engine::{EngineState, RepeatMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIcon {
    Play,
    Pause,
}

impl PlayIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            PlayIcon::Play => "▶",
            PlayIcon::Pause => "⏸",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatIcon {
    Off,
    Track,
    Queue,
}

impl RepeatIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            RepeatIcon::Off | RepeatIcon::Queue => "🔁",
            RepeatIcon::Track => "🔂",
        }
    }

    /// Off shares the queue glyph but is drawn muted.
    pub fn is_lit(self) -> bool {
        self != RepeatIcon::Off
    }
}

impl From<RepeatMode> for RepeatIcon {
    fn from(mode: RepeatMode) -> Self {
        match mode {
            RepeatMode::Off => RepeatIcon::Off,
            RepeatMode::Track => RepeatIcon::Track,
            RepeatMode::Queue => RepeatIcon::Queue,
        }
    }
}

/// Everything the now-playing widgets draw, derived from the latest snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlayingView {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub ratio: f64,
    pub elapsed: String,
    pub remaining: String,
    pub play_icon: PlayIcon,
    pub repeat_icon: RepeatIcon,
    pub buffering: bool,
}

impl NowPlayingView {
    pub fn build(
        snapshot: &PlaybackSnapshot,
        track: Option<&Track>,
        repeat: RepeatMode,
        drag: Option<f64>,
    ) -> Self {
        let duration = if snapshot.duration.is_finite() {
            snapshot.duration.max(0.0)
        } else {
            0.0
        };
        let position = drag.unwrap_or(snapshot.position);
        let shown = if position.is_finite() {
            position.clamp(0.0, duration)
        } else {
            0.0
        };
        let ratio = if duration > 0.0 { shown / duration } else { 0.0 };

        let (title, artist, album) = match track {
            Some(t) => (t.title.clone(), t.artist.clone(), t.album.clone()),
            None => ("Not Playing".to_string(), String::new(), None),
        };

        Self {
            title,
            artist,
            album,
            ratio,
            elapsed: format_clock(shown),
            remaining: format!("-{}", format_clock(duration - shown)),
            play_icon: if snapshot.state == EngineState::Playing {
                PlayIcon::Pause
            } else {
                PlayIcon::Play
            },
            repeat_icon: repeat.into(),
            buffering: snapshot.state == EngineState::Buffering,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(state: EngineState, position: f64, duration: f64) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state,
            position,
            duration,
            current_index: Some(0),
        }
    }

    fn track() -> Track {
        Track {
            id: "a".to_string(),
            title: "Alpha".to_string(),
            artist: "Ann".to_string(),
            album: Some("Firsts".to_string()),
            artwork: None,
            url: "/music/a.mp3".to_string(),
            duration: None,
        }
    }

    #[test]
    fn test_times_and_ratio() {
        let view = NowPlayingView::build(
            &snapshot(EngineState::Playing, 65.0, 200.0),
            Some(&track()),
            RepeatMode::Off,
            None,
        );
        assert_eq!(view.title, "Alpha");
        assert_eq!(view.artist, "Ann");
        assert_eq!(view.elapsed, "01:05");
        assert_eq!(view.remaining, "-02:15");
        assert!((view.ratio - 0.325).abs() < 1e-9);
        assert_eq!(view.play_icon, PlayIcon::Pause);
    }

    #[test]
    fn test_zero_duration_is_empty_bar() {
        let view = NowPlayingView::build(
            &snapshot(EngineState::Ready, 3.0, 0.0),
            Some(&track()),
            RepeatMode::Off,
            None,
        );
        assert_eq!(view.ratio, 0.0);
        assert_eq!(view.elapsed, "00:00");
        assert_eq!(view.remaining, "-00:00");
    }

    #[test]
    fn test_position_past_duration_clamps() {
        let view = NowPlayingView::build(
            &snapshot(EngineState::Playing, 250.0, 200.0),
            None,
            RepeatMode::Off,
            None,
        );
        assert_eq!(view.ratio, 1.0);
        assert_eq!(view.remaining, "-00:00");
        assert_eq!(view.title, "Not Playing");
    }

    #[test]
    fn test_pause_icon_only_while_playing() {
        for state in [
            EngineState::Idle,
            EngineState::Ready,
            EngineState::Paused,
            EngineState::Stopped,
            EngineState::Buffering,
            EngineState::Error,
        ] {
            let view = NowPlayingView::build(&snapshot(state, 0.0, 10.0), None, RepeatMode::Off, None);
            assert_eq!(view.play_icon, PlayIcon::Play, "{state:?}");
        }
    }

    #[test]
    fn test_repeat_icon_per_mode() {
        let icon = |mode| NowPlayingView::build(&PlaybackSnapshot::default(), None, mode, None).repeat_icon;
        assert_eq!(icon(RepeatMode::Off), RepeatIcon::Off);
        assert_eq!(icon(RepeatMode::Track), RepeatIcon::Track);
        assert_eq!(icon(RepeatMode::Queue), RepeatIcon::Queue);
        assert!(!RepeatIcon::Off.is_lit());
        assert_eq!(RepeatIcon::Track.glyph(), "🔂");
    }

    #[test]
    fn test_drag_value_overrides_position() {
        let view = NowPlayingView::build(
            &snapshot(EngineState::Playing, 10.0, 100.0),
            Some(&track()),
            RepeatMode::Off,
            Some(50.0),
        );
        assert_eq!(view.ratio, 0.5);
        assert_eq!(view.elapsed, "00:50");
    }
}
