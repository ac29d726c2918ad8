/// Fixed thresholds for one classifier. Set once at construction.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Number of samples requested from the feed per classification.
    pub trend_window_size: usize,

    /// Minimum step between adjacent samples (°C or %RH) that counts toward
    /// a trend. Smaller steps leave the trend counters untouched.
    pub derivative_threshold: f32,

    /// Run length needed for the "increasing" trend flag.
    pub min_increasing_samples: u32,

    /// Run length needed for the "decreasing" trend flag.
    pub min_decreasing_samples: u32,

    /// Largest step in peak acceleration still considered motionless.
    pub acceleration_derivative_threshold: f32,

    /// Run length of motionless steps after which the probe is judged
    /// still. Must be below `trend_window_size` to ever trigger.
    pub min_stable_samples: u32,

    /// Probe temperature above ambient (°C) for the temperature threshold.
    pub temp_threshold: f32,

    /// Absolute probe humidity (%RH) for the humidity threshold. Not
    /// relative to ambient.
    pub humidity_threshold: f32,

    /// Probe temperature must exceed ambient by at least this much (°C) or
    /// the probe is vetoed out of the mouth.
    pub minimum_temperature_threshold: f32,

    /// Probe humidity must exceed ambient by at least this much (%RH) or
    /// the probe is vetoed out of the mouth.
    pub minimum_humidity_threshold: f32,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            trend_window_size: 10,
            derivative_threshold: 0.3,
            min_increasing_samples: 3,
            min_decreasing_samples: 3,
            acceleration_derivative_threshold: 0.05,
            min_stable_samples: 6,
            temp_threshold: 5.0,
            humidity_threshold: 80.0,
            minimum_temperature_threshold: 2.0,
            minimum_humidity_threshold: 5.0,
        }
    }
}
