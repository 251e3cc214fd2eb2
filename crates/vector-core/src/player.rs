use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::errors::VectorError;
use crate::scene::AnimatedVectorData;
use crate::surface::DrawingSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    /// Plays to the end and holds the last frame.
    Once,
    #[default]
    Loop,
    /// Plays forward then backward, repeatedly.
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub repeat: RepeatMode,
    /// Multiplier applied to every `advance` step.
    pub speed: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            repeat: RepeatMode::Loop,
            speed: 1.0,
        }
    }
}

impl PlayerConfig {
    pub fn from_json(json: &str) -> Result<Self, VectorError> {
        let config: PlayerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), VectorError> {
        if !self.speed.is_finite() || self.speed <= 0.0 {
            return Err(VectorError::InvalidSpeed(self.speed));
        }
        Ok(())
    }
}

/// Drives an [`AnimatedVectorData`] through wall-clock time.
#[derive(Debug, Clone)]
pub struct VectorPlayer {
    data: AnimatedVectorData,
    config: PlayerConfig,
    elapsed: Duration,
}

impl VectorPlayer {
    pub fn new(data: AnimatedVectorData) -> Self {
        Self {
            data,
            config: PlayerConfig::default(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn with_config(
        data: AnimatedVectorData,
        config: PlayerConfig,
    ) -> Result<Self, VectorError> {
        config.validate()?;
        Ok(Self {
            data,
            config,
            elapsed: Duration::ZERO,
        })
    }

    pub fn data(&self) -> &AnimatedVectorData {
        &self.data
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn seek(&mut self, time: Duration) {
        self.elapsed = time;
    }

    pub fn advance(&mut self, dt: Duration) {
        let step = Duration::try_from_secs_f64(dt.as_secs_f64() * self.config.speed as f64)
            .unwrap_or(Duration::MAX);
        self.elapsed = self.elapsed.saturating_add(step);

        // Keep looping playback within one period.
        let period = match self.config.repeat {
            RepeatMode::Once => return,
            RepeatMode::Loop => self.data.duration,
            RepeatMode::Reverse => self.data.duration.saturating_mul(2),
        };
        if !period.is_zero() && self.elapsed >= period {
            let wrapped = self.elapsed.as_secs_f64() % period.as_secs_f64();
            self.elapsed = Duration::try_from_secs_f64(wrapped).unwrap_or(Duration::ZERO);
            debug!(elapsed = ?self.elapsed, "[Player] wrapped");
        }
    }

    /// Scene progress for the current time, always within `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.data.duration.is_zero() {
            return match self.config.repeat {
                RepeatMode::Once => 1.0,
                _ => 0.0,
            };
        }

        let cycles = self.elapsed.as_secs_f64() / self.data.duration.as_secs_f64();
        let progress = match self.config.repeat {
            RepeatMode::Once => cycles.min(1.0),
            RepeatMode::Loop => cycles.fract(),
            RepeatMode::Reverse => {
                let phase = cycles % 2.0;
                if phase <= 1.0 {
                    phase
                } else {
                    2.0 - phase
                }
            }
        };
        progress as f32
    }

    pub fn is_finished(&self) -> bool {
        self.config.repeat == RepeatMode::Once && self.elapsed >= self.data.duration
    }

    pub fn paint<S: DrawingSurface>(&self, surface: &mut S) -> Result<(), S::Error> {
        self.data.paint(
            surface,
            self.data.viewport_size,
            self.progress(),
            self.data.duration,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::RootVectorElement;
    use kurbo::Size;

    fn player(repeat: RepeatMode, speed: f32) -> VectorPlayer {
        let data = AnimatedVectorData::new(
            RootVectorElement::default(),
            Duration::from_secs(2),
            Size::new(10.0, 10.0),
        );
        VectorPlayer::with_config(data, PlayerConfig { repeat, speed }).unwrap()
    }

    #[test]
    fn test_config_from_json() {
        let config = PlayerConfig::from_json(r#"{"repeat": "reverse", "speed": 2.0}"#).unwrap();
        assert_eq!(config.repeat, RepeatMode::Reverse);
        assert_eq!(config.speed, 2.0);

        assert_eq!(PlayerConfig::from_json("{}").unwrap(), PlayerConfig::default());
        assert!(matches!(
            PlayerConfig::from_json(r#"{"speed": 0.0}"#),
            Err(VectorError::InvalidSpeed(_))
        ));
        assert!(matches!(
            PlayerConfig::from_json(r#"{"repeat": 3}"#),
            Err(VectorError::Config(_))
        ));
    }

    #[test]
    fn test_once_clamps_and_finishes() {
        let mut p = player(RepeatMode::Once, 1.0);
        p.advance(Duration::from_secs(1));
        assert_eq!(p.progress(), 0.5);
        assert!(!p.is_finished());
        p.advance(Duration::from_secs(5));
        assert_eq!(p.progress(), 1.0);
        assert!(p.is_finished());
    }

    #[test]
    fn test_loop_wraps() {
        let mut p = player(RepeatMode::Loop, 1.0);
        p.advance(Duration::from_millis(2500));
        assert_eq!(p.elapsed(), Duration::from_millis(500));
        assert!((p.progress() - 0.25).abs() < 1e-6);
        assert!(!p.is_finished());
    }

    #[test]
    fn test_reverse_ping_pongs() {
        let mut p = player(RepeatMode::Reverse, 1.0);
        p.seek(Duration::from_millis(3000));
        assert!((p.progress() - 0.5).abs() < 1e-6);
        p.seek(Duration::from_millis(3500));
        assert!((p.progress() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_speed_scales_time() {
        let mut p = player(RepeatMode::Once, 2.0);
        p.advance(Duration::from_millis(500));
        assert_eq!(p.elapsed(), Duration::from_secs(1));
    }

    #[test]
    fn test_rejects_invalid_speed() {
        let data = player(RepeatMode::Loop, 1.0).data().clone();
        for speed in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(VectorPlayer::with_config(
                data.clone(),
                PlayerConfig {
                    repeat: RepeatMode::Loop,
                    speed
                }
            )
            .is_err());
        }
    }
}
