use rand::Rng;

/// Lower-cased condition names that get a particle overlay.
pub const PRECIPITATING: [&str; 4] = ["rain", "drizzle", "thunderstorm", "snow"];

const HEAVY_COUNT: usize = 100;
const LIGHT_COUNT: usize = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    RainDrop,
    SnowFlake,
}

impl ParticleKind {
    /// CSS class carried by each particle element.
    pub fn class_name(&self) -> &'static str {
        match self {
            ParticleKind::RainDrop => "rain-drop",
            ParticleKind::SnowFlake => "snow-flake",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Horizontal position, percent of the viewport width.
    pub left_pct: f64,
    pub duration_secs: f64,
    pub delay_secs: f64,
    /// Snowflakes only, in pixels.
    pub size_px: Option<f64>,
}

/// The overlay currently on screen. Replaced wholesale on every change.
#[derive(Debug, Clone, PartialEq)]
pub struct Precipitation {
    pub kind: ParticleKind,
    pub particles: Vec<Particle>,
}

impl Precipitation {
    /// Build an overlay for a lower-cased condition name, or `None` for dry
    /// conditions.
    pub fn for_condition<R: Rng + ?Sized>(condition: &str, rng: &mut R) -> Option<Self> {
        if !PRECIPITATING.contains(&condition) {
            return None;
        }

        let count = if condition.contains("rain") || condition == "thunderstorm" {
            HEAVY_COUNT
        } else {
            LIGHT_COUNT
        };
        let kind = if condition.contains("snow") {
            ParticleKind::SnowFlake
        } else {
            ParticleKind::RainDrop
        };

        let particles = (0..count)
            .map(|_| Particle {
                left_pct: rng.gen_range(0.0..100.0),
                duration_secs: rng.gen_range(1.0..3.0),
                delay_secs: rng.gen_range(0.0..2.0),
                size_px: (kind == ParticleKind::SnowFlake).then(|| rng.gen_range(4.0..8.0)),
            })
            .collect();

        Some(Self { kind, particles })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
