use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ClassifyError;
use super::config::ClassifierConfig;
use super::state::{DecisionInputs, DecisionReason, MouthState};
use super::stillness::is_still;
use super::threshold::{ThresholdResult, evaluate_thresholds};
use super::trend::{TrendResult, analyze_trends};
use crate::tracing::prelude::*;
use crate::types::{Ambient, Baseline, Sample, SampleWindow};

/// Everything one classification looked at, plus its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ClassificationResult {
    pub state: MouthState,
    pub reason: DecisionReason,
    /// Newest sample in the window.
    pub current: Sample,
    pub ambient: Ambient,
    pub trends: TrendResult,
    pub thresholds: ThresholdResult,
    pub still: bool,
}

impl ClassificationResult {
    pub fn in_mouth(&self) -> bool {
        self.state.is_in_mouth()
    }
}

/// Run all analyses over `window` and decide the next state.
///
/// Pure: the caller owns `previous` and stores the returned state. Fails
/// without touching anything when the baseline is incomplete.
pub fn classify(
    window: &SampleWindow,
    baseline: &Baseline,
    previous: MouthState,
    config: &ClassifierConfig,
) -> Result<ClassificationResult, ClassifyError> {
    let ambient = baseline.resolve()?;
    let current = *window.current();

    let trends = analyze_trends(
        &window.temperatures_oldest_first(),
        &window.humidities_oldest_first(),
        config,
    );
    let thresholds = evaluate_thresholds(current.temperature, current.humidity, &ambient, config);
    let still = is_still(window, config);

    let decision = MouthState::decide(
        &DecisionInputs {
            trends: &trends,
            thresholds,
            temperature: current.temperature,
            humidity: current.humidity,
            ambient,
            still,
        },
        previous,
        config,
    );

    Ok(ClassificationResult {
        state: decision.state,
        reason: decision.reason,
        current,
        ambient,
        trends,
        thresholds,
        still,
    })
}

/// Per-probe classification context.
///
/// Holds the two pieces of state that outlive a single call: the last
/// decision, which drives hysteresis, and the cached ambient baseline.
#[derive(Debug, Clone)]
pub struct Session {
    config: ClassifierConfig,
    previous: MouthState,
    baseline: Baseline,
    classifications: u64,
}

impl Session {
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            previous: MouthState::OutOfMouth,
            baseline: Baseline::default(),
            classifications: 0,
        }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// The last decision, `OutOfMouth` before the first one.
    pub fn previous(&self) -> MouthState {
        self.previous
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    pub fn set_baseline(&mut self, baseline: Baseline) {
        self.baseline = baseline;
    }

    /// Number of successful classifications so far.
    pub fn classifications(&self) -> u64 {
        self.classifications
    }

    /// Classify `window` and remember the outcome for the next call.
    ///
    /// On error the previous decision is left as it was.
    pub fn classify(
        &mut self,
        window: &SampleWindow,
    ) -> Result<ClassificationResult, ClassifyError> {
        let result = classify(window, &self.baseline, self.previous, &self.config)?;

        if result.state != self.previous {
            info!(
                previous_state = %self.previous,
                new_state = %result.state,
                reason = %result.reason,
                "Mouth state changed"
            );
        }

        debug!(
            temp_c = %result.current.temperature,
            humidity_pct = %result.current.humidity,
            ambient_temp_c = %result.ambient.temperature,
            ambient_humidity_pct = %result.ambient.humidity,
            increasing = result.trends.increasing,
            decreasing = result.trends.decreasing,
            temperature_met = result.thresholds.temperature_met,
            humidity_met = result.thresholds.humidity_met,
            still = result.still,
            state = %result.state,
            reason = %result.reason,
            samples = window.len(),
            "Classification"
        );

        self.previous = result.state;
        self.classifications += 1;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Acceleration;

    const AMBIENT_TEMP_C: f32 = 22.0;
    const AMBIENT_HUMIDITY_PCT: f32 = 40.0;

    fn sample(temperature: f32, humidity: f32, peak: f32) -> Sample {
        Sample {
            temperature,
            humidity,
            acceleration: Acceleration {
                x: 0.1,
                y: 0.2,
                z: 0.9,
                peak_acceleration: peak,
            },
        }
    }

    /// Steady readings with enough motion to never count as still.
    fn steady_window(temperature: f32, humidity: f32) -> SampleWindow {
        let samples = [1.0, 1.5, 1.0, 1.5]
            .into_iter()
            .map(|peak| sample(temperature, humidity, peak))
            .collect();
        SampleWindow::from_oldest_first(samples).unwrap()
    }

    fn session() -> Session {
        let mut session = Session::new(ClassifierConfig::default());
        session.set_baseline(Baseline::new(AMBIENT_TEMP_C, AMBIENT_HUMIDITY_PCT));
        session
    }

    #[test]
    fn should_fail_without_baseline() {
        let mut session = Session::new(ClassifierConfig::default());

        let result = session.classify(&steady_window(35.0, 85.0));

        assert_eq!(result, Err(ClassifyError::MissingBaseline));
        assert_eq!(session.classifications(), 0);
    }

    #[test]
    fn should_keep_previous_state_on_failure() {
        let mut session = session();
        session.classify(&steady_window(35.0, 85.0)).unwrap();
        assert_eq!(session.previous(), MouthState::InMouth);

        session.set_baseline(Baseline::default());
        assert!(session.classify(&steady_window(35.0, 85.0)).is_err());

        assert_eq!(session.previous(), MouthState::InMouth);
    }

    #[test]
    fn should_start_out_of_mouth() {
        let session = Session::new(ClassifierConfig::default());

        assert_eq!(session.previous(), MouthState::OutOfMouth);
    }

    #[test]
    fn should_enter_when_both_thresholds_met() {
        let mut session = session();

        let result = session.classify(&steady_window(35.0, 85.0)).unwrap();

        assert!(result.in_mouth());
        assert_eq!(result.reason, DecisionReason::ThresholdsMet);
        assert_eq!(session.previous(), MouthState::InMouth);
    }

    #[test]
    fn should_hold_across_calls_on_single_threshold() {
        let mut in_mouth = session();
        in_mouth.classify(&steady_window(35.0, 85.0)).unwrap();

        let held = in_mouth.classify(&steady_window(35.0, 70.0)).unwrap();
        assert_eq!(held.state, MouthState::InMouth);
        assert_eq!(held.reason, DecisionReason::Holding);

        let mut fresh = session();
        let not_entered = fresh.classify(&steady_window(35.0, 70.0)).unwrap();
        assert_eq!(not_entered.state, MouthState::OutOfMouth);
    }

    #[test]
    fn should_exit_on_warming_window_per_literal_sign_convention() {
        // Oldest to newest warming steps land in the "decreasing" counter,
        // and a decreasing trend forces the probe out.
        let samples = [30.0, 30.5, 31.2, 32.0, 33.1]
            .into_iter()
            .zip([1.0, 1.5, 1.0, 1.5, 1.0])
            .map(|(temp, peak)| sample(temp, 85.0, peak))
            .collect();
        let window = SampleWindow::from_oldest_first(samples).unwrap();
        let mut session = session();

        let result = session.classify(&window).unwrap();

        assert_eq!(result.trends.counts.temp_decreasing, 4);
        assert_eq!(result.trends.counts.temp_increasing, 0);
        assert_eq!(result.state, MouthState::OutOfMouth);
        assert_eq!(result.reason, DecisionReason::DecreasingTrend);
    }

    #[test]
    fn should_report_no_trend_or_stillness_for_single_sample() {
        let window = SampleWindow::from_newest_first(vec![sample(35.0, 85.0, 1.0)]).unwrap();

        let result = classify(
            &window,
            &Baseline::new(AMBIENT_TEMP_C, AMBIENT_HUMIDITY_PCT),
            MouthState::OutOfMouth,
            &ClassifierConfig::default(),
        )
        .unwrap();

        assert_eq!(result.trends, TrendResult::default());
        assert!(!result.still);
        assert_eq!(result.state, MouthState::InMouth);
    }

    #[test]
    fn should_leave_probe_out_when_still() {
        let samples = (0..10).map(|_| sample(35.0, 85.0, 1.0)).collect();
        let window = SampleWindow::from_newest_first(samples).unwrap();
        let mut session = session();

        let result = session.classify(&window).unwrap();

        assert!(result.still);
        assert_eq!(result.state, MouthState::OutOfMouth);
        assert_eq!(result.reason, DecisionReason::Still);
    }

    #[test]
    fn should_echo_current_sample_and_ambient() {
        let samples = vec![sample(36.0, 90.0, 1.5), sample(35.0, 85.0, 1.0)];
        let window = SampleWindow::from_newest_first(samples).unwrap();
        let mut session = session();

        let result = session.classify(&window).unwrap();

        assert_eq!(result.current, sample(36.0, 90.0, 1.5));
        assert_eq!(
            result.ambient,
            Ambient {
                temperature: AMBIENT_TEMP_C,
                humidity: AMBIENT_HUMIDITY_PCT
            }
        );
    }
}
