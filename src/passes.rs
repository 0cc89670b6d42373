use crate::errors::PassError;
use crate::models::{
    Direction, Measurement, Pass, PassKind, Passes, Settings, Stamp,
};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampOutcome {
    pub added: bool,
    pub stamp_count: u32,
    /// True exactly when this append crossed the target. One-shot: undo never
    /// re-arms it for a count already reached.
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemoveOutcome {
    pub removed: bool,
    pub stamp_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementOutcome {
    pub stamps_earned: i64,
    pub total_stamps: u32,
    pub start_value: f64,
    pub current_value: f64,
    pub diff: f64,
    pub completed: bool,
}

fn pass_mut<'a>(passes: &'a mut Passes, id: &str) -> Result<&'a mut Pass, PassError> {
    passes
        .get_mut(id)
        .ok_or_else(|| PassError::NotFound(id.to_string()))
}

fn signed_diff(start: f64, value: f64, direction: Direction) -> f64 {
    match direction {
        Direction::Decrease => start - value,
        Direction::Increase => value - start,
    }
}

fn baseline(settings: &Settings, id: &str) -> Option<f64> {
    settings.start_values.get(id).copied().flatten()
}

/// Appends one stamp to a simple pass. Refuses (added == false) once the
/// sequence is at or over target, so the target crossing happens exactly once
/// per round.
pub fn add_stamp(
    passes: &mut Passes,
    id: &str,
    now: DateTime<Utc>,
) -> Result<StampOutcome, PassError> {
    let pass = pass_mut(passes, id)?;
    let target = pass.target;
    let PassKind::Simple(state) = &mut pass.kind else {
        return Err(PassError::WrongType(id.to_string()));
    };

    let count = state.stamps.len() as u32;
    if count >= target {
        return Ok(StampOutcome {
            added: false,
            stamp_count: count,
            completed: false,
        });
    }

    state.stamps.push(Stamp {
        id: count + 1,
        timestamp: now,
    });
    let count = count + 1;
    Ok(StampOutcome {
        added: true,
        stamp_count: count,
        completed: count >= target,
    })
}

/// Pops the most recent stamp. Undo never re-triggers a completion award.
pub fn remove_stamp(passes: &mut Passes, id: &str) -> Result<RemoveOutcome, PassError> {
    let pass = pass_mut(passes, id)?;
    let PassKind::Simple(state) = &mut pass.kind else {
        return Err(PassError::WrongType(id.to_string()));
    };

    let removed = state.stamps.pop().is_some();
    Ok(RemoveOutcome {
        removed,
        stamp_count: state.stamps.len() as u32,
    })
}

/// Records a reading against the configured baseline. A reading that regressed
/// past the baseline is rejected with the negative diff and nothing is
/// appended; a reading that merely yields fewer stamps than before is accepted
/// with a negative `stamps_earned`.
pub fn add_measurement(
    passes: &mut Passes,
    settings: &Settings,
    id: &str,
    value: f64,
    now: DateTime<Utc>,
) -> Result<MeasurementOutcome, PassError> {
    let pass = pass_mut(passes, id)?;
    let target = pass.target;
    let PassKind::Measurement(state) = &mut pass.kind else {
        return Err(PassError::WrongType(id.to_string()));
    };

    let start = baseline(settings, id)
        .ok_or_else(|| PassError::NoBaseline("Kein Startwert gesetzt".to_string()))?;

    let diff = signed_diff(start, value, state.direction);
    if diff < 0.0 {
        let reason = match state.direction {
            Direction::Decrease => "Wert ist höher als Startwert",
            Direction::Increase => "Wert ist niedriger als Startwert",
        };
        return Err(PassError::WrongDirection {
            diff,
            reason: reason.to_string(),
        });
    }

    let new_stamps = diff.floor() as u32;
    let previous = state.current_stamps;
    let earned = i64::from(new_stamps) - i64::from(previous);

    state.measurements.push(Measurement {
        value,
        timestamp: now,
        stamps_earned: earned,
    });
    state.current_stamps = new_stamps;

    Ok(MeasurementOutcome {
        stamps_earned: earned,
        total_stamps: new_stamps,
        start_value: start,
        current_value: value,
        diff,
        completed: previous < target && new_stamps >= target,
    })
}

/// Pops the most recent reading and recomputes `current_stamps` from the new
/// latest one. The recomputation uses the baseline as configured now, not as
/// it was when the reading was recorded; if the baseline changed in between,
/// history is silently re-based (kept for compatibility with existing data).
pub fn remove_measurement(
    passes: &mut Passes,
    settings: &Settings,
    id: &str,
) -> Result<RemoveOutcome, PassError> {
    let pass = pass_mut(passes, id)?;
    let PassKind::Measurement(state) = &mut pass.kind else {
        return Err(PassError::WrongType(id.to_string()));
    };

    if state.measurements.pop().is_none() {
        return Ok(RemoveOutcome {
            removed: false,
            stamp_count: state.current_stamps,
        });
    }

    state.current_stamps = match (state.measurements.last(), baseline(settings, id)) {
        (Some(last), Some(start)) => {
            let diff = signed_diff(start, last.value, state.direction);
            diff.max(0.0).floor() as u32
        }
        _ => 0,
    };

    Ok(RemoveOutcome {
        removed: true,
        stamp_count: state.current_stamps,
    })
}

pub fn stamp_count(pass: &Pass) -> u32 {
    match &pass.kind {
        PassKind::Simple(state) => state.stamps.len() as u32,
        PassKind::Measurement(state) => state.current_stamps,
    }
}

/// Latest recorded reading, if any.
pub fn current_value(pass: &Pass) -> Option<f64> {
    match &pass.kind {
        PassKind::Measurement(state) => state.measurements.last().map(|m| m.value),
        PassKind::Simple(_) => None,
    }
}

/// Progress percentage, clamped at 100 when the count overshoots the target.
/// Callers guarantee target > 0 (the catalog and import validation enforce it).
pub fn progress(pass: &Pass) -> f64 {
    let count = stamp_count(pass);
    (f64::from(count) / f64::from(pass.target) * 100.0).min(100.0)
}

pub fn progress_text(pass: &Pass) -> String {
    let count = stamp_count(pass);
    match &pass.kind {
        PassKind::Simple(_) => format!("{count}/{} Stempel", pass.target),
        PassKind::Measurement(state) => format!("{count}/{} {}", pass.target, state.unit),
    }
}

pub fn is_complete(pass: &Pass) -> bool {
    stamp_count(pass) >= pass.target
}

/// Whether measurement input should be offered at all for this pass.
pub fn is_measurement_enabled(settings: &Settings, id: &str) -> bool {
    baseline(settings, id).is_some()
}

/// Clears progress and opens the next round. The only way back to in-progress
/// after completion; must be invoked explicitly.
pub fn reset_pass(passes: &mut Passes, id: &str) -> Result<u32, PassError> {
    let pass = pass_mut(passes, id)?;
    match &mut pass.kind {
        PassKind::Simple(state) => state.stamps.clear(),
        PassKind::Measurement(state) => {
            state.measurements.clear();
            state.current_stamps = 0;
        }
    }
    pass.completed_rounds += 1;
    Ok(pass.completed_rounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MeasurementState, SimpleState};
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 1, 8, 30, 0).unwrap()
    }

    fn simple_pass(id: &str, target: u32) -> Pass {
        Pass {
            id: id.to_string(),
            name: id.to_string(),
            icon: "👣".to_string(),
            target,
            kind: PassKind::Simple(SimpleState::default()),
            completed_rounds: 0,
        }
    }

    fn measurement_pass(id: &str, direction: Direction, target: u32) -> Pass {
        Pass {
            id: id.to_string(),
            name: id.to_string(),
            icon: "📏".to_string(),
            target,
            kind: PassKind::Measurement(MeasurementState {
                direction,
                unit: "cm".to_string(),
                measurements: Vec::new(),
                current_stamps: 0,
            }),
            completed_rounds: 0,
        }
    }

    fn passes_with(pass: Pass) -> Passes {
        let mut passes = BTreeMap::new();
        passes.insert(pass.id.clone(), pass);
        passes
    }

    fn settings_with(id: &str, start: f64) -> Settings {
        let mut settings = Settings::default();
        settings.start_values.insert(id.to_string(), Some(start));
        settings
    }

    #[test]
    fn stamping_to_target_completes_exactly_once() {
        let mut passes = passes_with(simple_pass("walk", 5));
        for round in 1..=4 {
            let outcome = add_stamp(&mut passes, "walk", now()).unwrap();
            assert!(outcome.added);
            assert_eq!(outcome.stamp_count, round);
            assert!(!outcome.completed);
        }
        let fifth = add_stamp(&mut passes, "walk", now()).unwrap();
        assert!(fifth.added);
        assert!(fifth.completed);
        assert!(is_complete(&passes["walk"]));

        // At target the sixth stamp is refused and cannot complete again.
        let sixth = add_stamp(&mut passes, "walk", now()).unwrap();
        assert!(!sixth.added);
        assert!(!sixth.completed);
        assert_eq!(stamp_count(&passes["walk"]), 5);
    }

    #[test]
    fn add_stamp_rejects_wrong_type_and_unknown_ids() {
        let mut passes = passes_with(measurement_pass("waist", Direction::Decrease, 10));
        assert_eq!(
            add_stamp(&mut passes, "waist", now()),
            Err(PassError::WrongType("waist".to_string()))
        );
        assert_eq!(
            add_stamp(&mut passes, "nope", now()),
            Err(PassError::NotFound("nope".to_string()))
        );
    }

    #[test]
    fn remove_stamp_restores_prior_length_and_never_goes_negative() {
        let mut passes = passes_with(simple_pass("walk", 5));
        add_stamp(&mut passes, "walk", now()).unwrap();
        add_stamp(&mut passes, "walk", now()).unwrap();

        let undo = remove_stamp(&mut passes, "walk").unwrap();
        assert!(undo.removed);
        assert_eq!(undo.stamp_count, 1);

        remove_stamp(&mut passes, "walk").unwrap();
        let empty = remove_stamp(&mut passes, "walk").unwrap();
        assert!(!empty.removed);
        assert_eq!(empty.stamp_count, 0);
    }

    #[test]
    fn decrease_pass_earns_stamps_and_completes_once() {
        let mut passes = passes_with(measurement_pass("waist", Direction::Decrease, 10));
        let settings = settings_with("waist", 100.0);

        let first = add_measurement(&mut passes, &settings, "waist", 95.0, now()).unwrap();
        assert_eq!(first.total_stamps, 5);
        assert_eq!(first.stamps_earned, 5);
        assert!(!first.completed);

        let second = add_measurement(&mut passes, &settings, "waist", 90.0, now()).unwrap();
        assert_eq!(second.total_stamps, 10);
        assert_eq!(second.stamps_earned, 5);
        assert!(second.completed);

        // Further readings at or past the target do not re-complete.
        let third = add_measurement(&mut passes, &settings, "waist", 89.0, now()).unwrap();
        assert_eq!(third.total_stamps, 11);
        assert!(!third.completed);
    }

    #[test]
    fn wrong_direction_reading_reports_diff_and_mutates_nothing() {
        let mut passes = passes_with(measurement_pass("chest", Direction::Increase, 5));
        let settings = settings_with("chest", 80.0);

        let err = add_measurement(&mut passes, &settings, "chest", 79.0, now()).unwrap_err();
        match err {
            PassError::WrongDirection { diff, reason } => {
                assert_eq!(diff, -1.0);
                assert_eq!(reason, "Wert ist niedriger als Startwert");
            }
            other => panic!("expected WrongDirection, got {other:?}"),
        }

        let PassKind::Measurement(state) = &passes["chest"].kind else {
            unreachable!()
        };
        assert!(state.measurements.is_empty());
        assert_eq!(state.current_stamps, 0);
    }

    #[test]
    fn measurement_without_baseline_fails() {
        let mut passes = passes_with(measurement_pass("waist", Direction::Decrease, 10));
        let settings = Settings::default();
        assert_eq!(
            add_measurement(&mut passes, &settings, "waist", 95.0, now()),
            Err(PassError::NoBaseline("Kein Startwert gesetzt".to_string()))
        );
        assert!(!is_measurement_enabled(&settings, "waist"));
        assert!(is_measurement_enabled(&settings_with("waist", 1.0), "waist"));
    }

    #[test]
    fn fractional_diff_floors_and_regression_earns_negative() {
        let mut passes = passes_with(measurement_pass("waist", Direction::Decrease, 10));
        let settings = settings_with("waist", 100.0);

        let reading = add_measurement(&mut passes, &settings, "waist", 96.4, now()).unwrap();
        assert_eq!(reading.total_stamps, 3);

        // Back toward the baseline but not past it: accepted, negative earned.
        let regress = add_measurement(&mut passes, &settings, "waist", 98.0, now()).unwrap();
        assert_eq!(regress.total_stamps, 2);
        assert_eq!(regress.stamps_earned, -1);
    }

    #[test]
    fn remove_measurement_recomputes_from_current_baseline() {
        let mut passes = passes_with(measurement_pass("waist", Direction::Decrease, 10));
        let settings = settings_with("waist", 100.0);
        add_measurement(&mut passes, &settings, "waist", 95.0, now()).unwrap();
        add_measurement(&mut passes, &settings, "waist", 92.0, now()).unwrap();

        let undo = remove_measurement(&mut passes, &settings, "waist").unwrap();
        assert!(undo.removed);
        assert_eq!(undo.stamp_count, 5);

        // A baseline edit after the fact re-bases the remaining history.
        let rebased = settings_with("waist", 98.0);
        add_measurement(&mut passes, &rebased, "waist", 92.0, now()).unwrap();
        let undo = remove_measurement(&mut passes, &rebased, "waist").unwrap();
        assert_eq!(undo.stamp_count, 3);

        let last = remove_measurement(&mut passes, &rebased, "waist").unwrap();
        assert!(last.removed);
        assert_eq!(last.stamp_count, 0);

        let empty = remove_measurement(&mut passes, &rebased, "waist").unwrap();
        assert!(!empty.removed);
    }

    #[test]
    fn reset_clears_progress_and_counts_the_round() {
        let mut passes = passes_with(measurement_pass("waist", Direction::Decrease, 10));
        let settings = settings_with("waist", 100.0);
        // Overshoot the target before resetting.
        add_measurement(&mut passes, &settings, "waist", 88.0, now()).unwrap();
        assert_eq!(stamp_count(&passes["waist"]), 12);
        assert_eq!(progress(&passes["waist"]), 100.0);

        let rounds = reset_pass(&mut passes, "waist").unwrap();
        assert_eq!(rounds, 1);
        assert_eq!(stamp_count(&passes["waist"]), 0);
        assert!(!is_complete(&passes["waist"]));

        let rounds = reset_pass(&mut passes, "waist").unwrap();
        assert_eq!(rounds, 2);
    }

    #[test]
    fn progress_text_names_the_unit() {
        let mut passes = passes_with(simple_pass("walk", 5));
        add_stamp(&mut passes, "walk", now()).unwrap();
        assert_eq!(progress_text(&passes["walk"]), "1/5 Stempel");
        assert_eq!(progress(&passes["walk"]), 20.0);

        let measurement = measurement_pass("waist", Direction::Decrease, 10);
        assert_eq!(progress_text(&measurement), "0/10 cm");
    }
}
