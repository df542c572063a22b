//! Client-side settings: where the API lives and how the carousel behaves.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dto::game::GameRecord;

const DEVELOP_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_COVER: &str = "/images/default-cover.svg";

/// Which side picks the random game. A deployment uses exactly one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickLocus {
    /// Ask `GET /api/games/random` and locate the result in the loaded pool.
    #[default]
    Server,
    /// Pick uniformly from the already loaded pool.
    Local,
}

/// Timing, geometry and appearance of the draw carousel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawConfig {
    /// Total spin time.
    pub duration_ms: u64,
    /// Full laps over the pool before landing.
    pub extra_cycles: u32,
    /// Pause on the landed card before the settle callback fires.
    pub settle_delay_ms: u64,
    pub frame_interval_ms: u64,
    /// Cards drawn on each side of the centre.
    pub visible_range: u32,
    pub card_width_rpx: f64,
    pub card_height_rpx: f64,
    /// Fraction of a card hidden under its neighbour.
    pub card_overlap: f64,
    /// Scale of cards two spacings or more away from the centre.
    pub min_scale: f64,
    /// Opacity reached two spacings away from the centre.
    pub edge_opacity: f64,
    pub opacity_floor: f64,
    /// Cards scaled above this show their name label.
    pub label_scale_threshold: f64,
    /// Asset used when a cover is missing or fails to load.
    pub default_cover: String,
    pub pick_locus: PickLocus,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            duration_ms: 3_500,
            extra_cycles: 3,
            settle_delay_ms: 500,
            frame_interval_ms: 16,
            visible_range: 5,
            card_width_rpx: 440.0,
            card_height_rpx: 640.0,
            card_overlap: 0.4,
            min_scale: 0.7,
            edge_opacity: 0.4,
            opacity_floor: 0.1,
            label_scale_threshold: 0.8,
            default_cover: DEFAULT_COVER.to_owned(),
            pick_locus: PickLocus::Server,
        }
    }
}

impl DrawConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Frame period, never below one millisecond.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }
}

/// Build flavour of the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseChannel {
    /// Local development build talking to a server on this machine.
    #[default]
    Develop,
    Trial,
    Release,
}

/// Connection settings for the draw client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub channel: ReleaseChannel,
    /// Origin used by trial and release builds.
    pub deployed_base_url: String,
    pub draw: DrawConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            channel: ReleaseChannel::Develop,
            deployed_base_url: "https://your-cloud-host.com".to_owned(),
            draw: DrawConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Server origin for the current channel, without trailing slash.
    pub fn base_url(&self) -> &str {
        match self.channel {
            ReleaseChannel::Develop => DEVELOP_BASE_URL,
            ReleaseChannel::Trial | ReleaseChannel::Release => {
                self.deployed_base_url.trim_end_matches('/')
            }
        }
    }

    /// Absolute URL of an API path such as `/games/random`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url())
    }

    /// Turn a stored media path into an absolute URL.
    ///
    /// Absolute `http(s)` URLs are returned unchanged and empty paths stay empty.
    pub fn resolve_media_url(&self, path: &str) -> String {
        if path.is_empty() || path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        format!("{}{path}", self.base_url())
    }

    /// Resolve every media reference of a received record.
    pub fn resolve_record_media(&self, mut game: GameRecord) -> GameRecord {
        game.cover_image = game
            .cover_image
            .filter(|path| !path.is_empty())
            .map(|path| self.resolve_media_url(&path));
        game.images = game
            .images
            .iter()
            .map(|path| self.resolve_media_url(path))
            .collect();
        for video in &mut game.videos {
            video.url = self.resolve_media_url(&video.url);
        }
        game
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_selects_the_origin() {
        let mut config = ClientConfig {
            deployed_base_url: "https://draw.example.com/".into(),
            ..ClientConfig::default()
        };
        assert_eq!(config.api_url("/games"), "http://localhost:3000/api/games");

        config.channel = ReleaseChannel::Release;
        assert_eq!(config.base_url(), "https://draw.example.com");
        assert_eq!(
            config.resolve_media_url("/uploads/images/a.png"),
            "https://draw.example.com/uploads/images/a.png"
        );
    }

    #[test]
    fn absolute_and_empty_media_paths_pass_through() {
        let config = ClientConfig::default();
        assert_eq!(config.resolve_media_url(""), "");
        assert_eq!(
            config.resolve_media_url("https://cdn.example.com/x.png"),
            "https://cdn.example.com/x.png"
        );
    }

    #[test]
    fn partial_draw_config_keeps_defaults() {
        let config: DrawConfig =
            serde_json::from_str(r#"{ "duration_ms": 1000, "pick_locus": "local" }"#).unwrap();
        assert_eq!(config.duration(), Duration::from_secs(1));
        assert_eq!(config.extra_cycles, 3);
        assert_eq!(config.pick_locus, PickLocus::Local);
    }
}
