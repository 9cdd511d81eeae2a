//! Critical-condition classification
//!
//! Pure threshold rules over a single vital-sign reading. No I/O: the vitals
//! service fetches the latest test and persists the verdict.

use tracing::warn;

use crate::entities::test_record::VitalKind;

/// Classify a reading against the per-kind thresholds.
///
/// A value that fails numeric parsing classifies as not critical and logs a
/// data-quality warning. Creation-side validation (`validate_value`) rejects
/// such values up front, so this branch only fires for data that bypassed
/// the service layer.
pub fn is_critical(kind: VitalKind, value: &str) -> bool {
    match kind {
        VitalKind::BloodPressure => match parse_blood_pressure(value) {
            Some((systolic, diastolic)) => {
                systolic > 180.0 || systolic < 90.0 || diastolic > 120.0 || diastolic < 60.0
            }
            None => {
                warn!("Unparseable blood pressure value '{}', classifying as not critical", value);
                false
            }
        },
        VitalKind::RespiratoryRate => match parse_number(value) {
            Some(rate) => rate > 30.0 || rate < 12.0,
            None => {
                warn!("Unparseable respiratory rate '{}', classifying as not critical", value);
                false
            }
        },
        VitalKind::BloodOxygenLevel => match parse_number(value) {
            Some(level) => level < 90.0,
            None => {
                warn!("Unparseable blood oxygen level '{}', classifying as not critical", value);
                false
            }
        },
        VitalKind::HeartbeatRate => match parse_number(value) {
            Some(rate) => rate > 100.0 || rate < 60.0,
            None => {
                warn!("Unparseable heartbeat rate '{}', classifying as not critical", value);
                false
            }
        },
    }
}

/// Check that a value is well-formed for its kind, for creation-time
/// validation
pub fn validate_value(kind: VitalKind, value: &str) -> Result<(), String> {
    match kind {
        VitalKind::BloodPressure => parse_blood_pressure(value).map(|_| ()).ok_or_else(|| {
            format!(
                "Blood pressure value must be 'systolic/diastolic', got '{}'",
                value
            )
        }),
        _ => parse_number(value)
            .map(|_| ())
            .ok_or_else(|| format!("{} value must be numeric, got '{}'", kind, value)),
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_blood_pressure(value: &str) -> Option<(f64, f64)> {
    let (systolic, diastolic) = value.split_once('/')?;
    Some((parse_number(systolic)?, parse_number(diastolic)?))
}
