use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, error::GeolocationError, model::Coordinates};

/// Source of the user's current position.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Position taken from the `[location]` table of the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredLocator {
    position: Option<Coordinates>,
}

impl ConfiguredLocator {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.location)
    }
}

#[async_trait]
impl Geolocator for ConfiguredLocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let pos = self.position.ok_or(GeolocationError::Unsupported)?;

        let valid = (-90.0..=90.0).contains(&pos.latitude)
            && (-180.0..=180.0).contains(&pos.longitude);
        if !valid {
            return Err(GeolocationError::Unavailable(format!(
                "coordinates out of range: {}, {}",
                pos.latitude, pos.longitude
            )));
        }

        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_location_is_unsupported() {
        let err = ConfiguredLocator::default().current_position().await.unwrap_err();
        assert_eq!(err, GeolocationError::Unsupported);
    }

    #[tokio::test]
    async fn configured_location_is_returned() {
        let mut cfg = Config::default();
        cfg.set_location(48.85, 2.35);

        let pos = ConfiguredLocator::from_config(&cfg).current_position().await.unwrap();
        assert_eq!(pos, Coordinates { latitude: 48.85, longitude: 2.35 });
    }

    #[tokio::test]
    async fn out_of_range_location_is_unavailable() {
        let locator = ConfiguredLocator::new(Some(Coordinates { latitude: 123.0, longitude: 0.0 }));
        let err = locator.current_position().await.unwrap_err();
        assert!(matches!(err, GeolocationError::Unavailable(_)));
    }
}
