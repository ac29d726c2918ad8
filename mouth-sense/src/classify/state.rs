use serde::{Deserialize, Serialize};
use strum::Display;
use utoipa::ToSchema;

use super::config::ClassifierConfig;
use super::threshold::ThresholdResult;
use super::trend::TrendResult;
use crate::types::Ambient;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Display, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MouthState {
    #[default]
    OutOfMouth,
    InMouth,
}

impl MouthState {
    pub fn is_in_mouth(self) -> bool {
        matches!(self, MouthState::InMouth)
    }
}

/// Which rule settled a decision, in priority order.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Display, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DecisionReason {
    /// Probe is not warmer than ambient by the minimum margin.
    TooCold,
    /// Probe is not more humid than ambient by the minimum margin.
    TooDry,
    /// Probe has not moved across the window.
    Still,
    DecreasingTrend,
    IncreasingTrend,
    ThresholdsMet,
    /// One threshold still met while already in the mouth.
    Holding,
    /// Nothing pointed to the mouth.
    NoEvidence,
}

/// Everything one decision looks at besides the previous state.
#[derive(Debug, Clone, Copy)]
pub struct DecisionInputs<'a> {
    pub trends: &'a TrendResult,
    pub thresholds: ThresholdResult,
    pub temperature: f32,
    pub humidity: f32,
    pub ambient: Ambient,
    pub still: bool,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Decision {
    pub state: MouthState,
    pub reason: DecisionReason,
}

impl MouthState {
    /// Decide the next state. The first matching rule wins:
    ///
    /// 1. Too cold or too dry relative to ambient, or motionless: out.
    /// 2. Decreasing trend: out.
    /// 3. Increasing trend: in.
    /// 4. Both thresholds met: in.
    /// 5. One threshold met and previously in: stay in.
    /// 6. Otherwise: out.
    pub fn decide(
        inputs: &DecisionInputs<'_>,
        previous: MouthState,
        config: &ClassifierConfig,
    ) -> Decision {
        use DecisionReason::*;
        use MouthState::*;

        let (state, reason) = if inputs.temperature - config.minimum_temperature_threshold
            < inputs.ambient.temperature
        {
            (OutOfMouth, TooCold)
        } else if inputs.humidity - config.minimum_humidity_threshold < inputs.ambient.humidity {
            (OutOfMouth, TooDry)
        } else if inputs.still {
            (OutOfMouth, Still)
        } else if inputs.trends.decreasing {
            (OutOfMouth, DecreasingTrend)
        } else if inputs.trends.increasing {
            (InMouth, IncreasingTrend)
        } else if inputs.thresholds.both() {
            (InMouth, ThresholdsMet)
        } else if inputs.thresholds.either() && previous.is_in_mouth() {
            (InMouth, Holding)
        } else {
            (OutOfMouth, NoEvidence)
        };

        Decision { state, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::TrendCounts;
    use test_case::test_case;

    const AMBIENT: Ambient = Ambient {
        temperature: 22.0,
        humidity: 40.0,
    };

    const NO_TREND: TrendResult = TrendResult {
        increasing: false,
        decreasing: false,
        counts: TrendCounts {
            temp_increasing: 0,
            temp_decreasing: 0,
            humidity_increasing: 0,
            humidity_decreasing: 0,
        },
    };

    fn thresholds(temperature_met: bool, humidity_met: bool) -> ThresholdResult {
        ThresholdResult {
            temperature_met,
            humidity_met,
        }
    }

    /// Warm, humid, moving, no trend, no thresholds.
    fn inputs(trends: &TrendResult) -> DecisionInputs<'_> {
        DecisionInputs {
            trends,
            thresholds: thresholds(false, false),
            temperature: 35.0,
            humidity: 85.0,
            ambient: AMBIENT,
            still: false,
        }
    }

    fn decide(inputs: &DecisionInputs<'_>, previous: MouthState) -> Decision {
        MouthState::decide(inputs, previous, &ClassifierConfig::default())
    }

    #[test_case(false, false, false; "no trend")]
    #[test_case(true, false, false; "increasing")]
    #[test_case(false, true, false; "decreasing")]
    #[test_case(true, true, true; "both thresholds")]
    fn should_veto_when_still(increasing: bool, decreasing: bool, both_thresholds: bool) {
        let trends = TrendResult {
            increasing,
            decreasing,
            ..NO_TREND
        };
        let inputs = DecisionInputs {
            still: true,
            thresholds: thresholds(both_thresholds, both_thresholds),
            ..inputs(&trends)
        };

        for previous in [MouthState::OutOfMouth, MouthState::InMouth] {
            let decision = decide(&inputs, previous);
            assert_eq!(decision.state, MouthState::OutOfMouth);
            assert_eq!(decision.reason, DecisionReason::Still);
        }
    }

    #[test]
    fn should_veto_when_not_warmer_than_ambient_by_margin() {
        let trends = TrendResult {
            increasing: true,
            ..NO_TREND
        };
        // 23.9 - 2.0 < 22.0
        let inputs = DecisionInputs {
            temperature: 23.9,
            thresholds: thresholds(true, true),
            ..inputs(&trends)
        };

        let decision = decide(&inputs, MouthState::InMouth);

        assert_eq!(decision.state, MouthState::OutOfMouth);
        assert_eq!(decision.reason, DecisionReason::TooCold);
    }

    #[test]
    fn should_veto_when_not_more_humid_than_ambient_by_margin() {
        // 44.0 - 5.0 < 40.0
        let inputs = DecisionInputs {
            humidity: 44.0,
            thresholds: thresholds(true, true),
            ..inputs(&NO_TREND)
        };

        let decision = decide(&inputs, MouthState::InMouth);

        assert_eq!(decision.state, MouthState::OutOfMouth);
        assert_eq!(decision.reason, DecisionReason::TooDry);
    }

    #[test]
    fn should_pass_floor_exactly_at_margin() {
        // 24.0 - 2.0 == 22.0 and 45.0 - 5.0 == 40.0 are not below ambient
        let inputs = DecisionInputs {
            temperature: 24.0,
            humidity: 45.0,
            thresholds: thresholds(true, true),
            ..inputs(&NO_TREND)
        };

        let decision = decide(&inputs, MouthState::OutOfMouth);

        assert_eq!(decision.state, MouthState::InMouth);
    }

    #[test]
    fn should_exit_on_decreasing_trend_despite_thresholds() {
        let trends = TrendResult {
            increasing: true,
            decreasing: true,
            ..NO_TREND
        };
        let inputs = DecisionInputs {
            thresholds: thresholds(true, true),
            ..inputs(&trends)
        };

        let decision = decide(&inputs, MouthState::InMouth);

        assert_eq!(decision.state, MouthState::OutOfMouth);
        assert_eq!(decision.reason, DecisionReason::DecreasingTrend);
    }

    #[test]
    fn should_enter_on_increasing_trend() {
        let trends = TrendResult {
            increasing: true,
            ..NO_TREND
        };

        let decision = decide(&inputs(&trends), MouthState::OutOfMouth);

        assert_eq!(decision.state, MouthState::InMouth);
        assert_eq!(decision.reason, DecisionReason::IncreasingTrend);
    }

    #[test]
    fn should_enter_when_both_thresholds_met() {
        let inputs = DecisionInputs {
            thresholds: thresholds(true, true),
            ..inputs(&NO_TREND)
        };

        let decision = decide(&inputs, MouthState::OutOfMouth);

        assert_eq!(decision.state, MouthState::InMouth);
        assert_eq!(decision.reason, DecisionReason::ThresholdsMet);
    }

    #[test_case(true, false; "temperature only")]
    #[test_case(false, true; "humidity only")]
    fn should_hold_in_mouth_on_single_threshold(temperature_met: bool, humidity_met: bool) {
        let inputs = DecisionInputs {
            thresholds: thresholds(temperature_met, humidity_met),
            ..inputs(&NO_TREND)
        };

        let held = decide(&inputs, MouthState::InMouth);
        assert_eq!(held.state, MouthState::InMouth);
        assert_eq!(held.reason, DecisionReason::Holding);

        let not_entered = decide(&inputs, MouthState::OutOfMouth);
        assert_eq!(not_entered.state, MouthState::OutOfMouth);
        assert_eq!(not_entered.reason, DecisionReason::NoEvidence);
    }

    #[test]
    fn should_default_to_out_of_mouth() {
        let decision = decide(&inputs(&NO_TREND), MouthState::InMouth);

        assert_eq!(decision.state, MouthState::OutOfMouth);
        assert_eq!(decision.reason, DecisionReason::NoEvidence);
    }
}
