//! Whole-game properties of the day-step engine.
//!
//! These tests drive full sessions through the public API and check the
//! invariants that must hold after every tick: clamped metrics, aligned
//! history, exactly-once delayed effects, time-gated endings, and
//! deterministic replay.

// Integration tests use unwrap extensively for clarity -- panicking
// on failure is the correct behavior in test code.
#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]

use directive_core::catalog::{EVENT_DAYS, event_for_day};
use directive_core::config::DirectiveConfig;
use directive_core::decision::ScriptedChoices;
use directive_core::runner::{self, NoOpCallback, PlaythroughEndReason};
use directive_core::session::Session;
use directive_core::tick::TickError;
use directive_types::{Ending, TickResult};

const EPS: f64 = 1e-9;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

fn fresh_session() -> Session {
    let mut session = Session::new(&DirectiveConfig::default());
    session.start_game();
    session
}

/// Every script over the catalog: for each event day, each choice index
/// plus "no decision".
fn all_scripts() -> Vec<Vec<(u32, Option<usize>)>> {
    let mut scripts: Vec<Vec<(u32, Option<usize>)>> = vec![Vec::new()];
    for day in EVENT_DAYS {
        let count = event_for_day(day).unwrap().choices.len();
        let options: Vec<Option<usize>> =
            std::iter::once(None).chain((0..count).map(Some)).collect();
        scripts = scripts
            .into_iter()
            .flat_map(|prefix| {
                options.iter().map(move |&option| {
                    let mut next = prefix.clone();
                    next.push((day, option));
                    next
                })
            })
            .collect();
    }
    scripts
}

fn choice_for(script: &[(u32, Option<usize>)], day: u32) -> Option<usize> {
    script
        .iter()
        .find(|(d, _)| *d == day)
        .and_then(|(_, option)| *option)
}

/// Play `days` ticks following `script`, returning every tick result.
fn play(session: &mut Session, script: &[(u32, Option<usize>)], days: u32) -> Vec<TickResult> {
    (0..days)
        .map(|_| {
            let day = session.day();
            session.advance(choice_for(script, day)).unwrap()
        })
        .collect()
}

#[test]
fn catalog_covers_every_combination() {
    // 4 options on day 1, 3 on each later event day.
    assert_eq!(all_scripts().len(), 4 * 3 * 3 * 3);
}

#[test]
fn invariants_hold_after_every_tick_for_every_script() {
    for script in all_scripts() {
        let mut session = fresh_session();
        for n in 1..=40_u32 {
            let day = session.day();
            let result = session.advance(choice_for(&script, day)).unwrap();
            let state = session.state();

            // Clamp invariant.
            assert!(state.is_normalized(), "script {script:?} day {day}");

            // Day strictly increases by one.
            assert_eq!(result.day, day);
            assert_eq!(state.day, day + 1);

            // History alignment.
            let history = session.history_data();
            assert!(history.is_aligned());
            assert_eq!(history.len(), n as usize);
            for (i, &logged) in history.day.iter().enumerate() {
                assert_eq!(logged as usize, i + 1);
            }

            // No retained effect is already due.
            assert!(
                state.delayed_effects.iter().all(|e| e.trigger_day > day),
                "script {script:?} day {day}: stale delayed effect"
            );

            // No ending before day 25.
            if day < 25 {
                assert!(result.ending.is_none(), "script {script:?} day {day}");
            }
        }
    }
}

#[test]
fn release_scenario_on_day_one() {
    let mut session = Session::new(&DirectiveConfig::default());
    let briefing = session.start_game();
    assert_eq!(briefing.day, 1);
    assert_eq!(briefing.event.as_ref().unwrap().choices.len(), 3);

    let trust_before = session.state().trust;
    let infection_before = session.state().infection;
    let result = session.make_choice(0).unwrap();

    assert_eq!(result.applied_choice.unwrap().text, "Release preliminary data");
    assert!(approx(session.state().trust, trust_before + 0.05));
    assert!(approx(session.state().infection, infection_before + 0.01));
    assert_eq!(session.day(), 2);
    assert_eq!(session.history_data().len(), 1);
}

#[test]
fn sell_patents_scenario_on_day_five() {
    let mut session = fresh_session();
    for _ in 1..5 {
        session.pass_day();
    }
    assert_eq!(session.day(), 5);

    let cost_before = session.state().cumulative_cost;
    let infection = session.state().infection;
    let result = session.make_choice(1).unwrap();

    // Natural progression adds infection * 50 before the -200.
    assert!(approx(
        session.state().cumulative_cost,
        cost_before + infection * 50.0 - 200.0
    ));
    assert!(session.state().flag("sold_patents"));
    assert_eq!(
        session.state().flags.get("sold_patents").copied(),
        Some(true)
    );
    assert_eq!(result.delayed_effects_fired, 0);
    assert!(session.state().delayed_effects.iter().any(|e| e.trigger_day == 13));

    // Mortality is untouched until the effect fires on day 13.
    let mut mortality_before = session.state().mortality;
    while session.day() < 13 {
        let result = session.pass_day();
        assert_eq!(result.delayed_effects_fired, 0);
        assert!(approx(session.state().mortality, mortality_before));
    }
    mortality_before = session.state().mortality;
    let day13 = session.pass_day();
    assert_eq!(day13.day, 13);
    assert_eq!(day13.delayed_effects_fired, 1);
    assert!(approx(session.state().mortality, mortality_before + 0.04));
    assert!(session.state().delayed_effects.is_empty());

    // And it never fires again.
    for _ in 0..10 {
        let result = session.pass_day();
        assert_eq!(result.delayed_effects_fired, 0);
        assert!(approx(session.state().mortality, mortality_before + 0.04));
    }
}

#[test]
fn delayed_unrest_fires_exactly_once_on_day_eight() {
    let mut session = fresh_session();
    session.make_choice(2).unwrap();
    let results = play(&mut session, &[], 20);

    let unrest: Vec<f64> = results.iter().map(|r| r.metrics.unrest).collect();
    // results[0] is day 2; day 8 is index 6.
    for value in &unrest[..6] {
        assert!(approx(*value, 0.1));
    }
    for value in &unrest[6..] {
        assert!(approx(*value, 0.35));
    }
    let fired: usize = results.iter().map(|r| r.delayed_effects_fired).sum();
    assert_eq!(fired, 1);
}

#[test]
fn delayed_announcement_scales_infection_on_day_six() {
    let mut session = fresh_session();
    session.make_choice(1).unwrap();
    assert!(approx(session.state().infection, 0.02));
    play(&mut session, &[], 4);
    assert_eq!(session.day(), 6);
    assert!(approx(session.state().infection, 0.02));
    session.pass_day();
    assert!(approx(session.state().infection, 0.036));
}

#[test]
fn invalid_index_is_rejected_without_mutation() {
    let mut session = fresh_session();
    session.make_choice(1).unwrap();
    for _ in 2..5 {
        session.pass_day();
    }
    assert_eq!(session.day(), 5);

    let state_before = session.state().clone();
    let err = session.make_choice(2).unwrap_err();
    assert_eq!(
        err,
        TickError::InvalidChoiceIndex {
            day: 5,
            index: 2,
            available: 2
        }
    );
    assert_eq!(session.state(), &state_before);

    // A valid retry succeeds.
    assert!(session.make_choice(0).is_ok());
}

#[test]
fn choice_on_a_quiet_day_is_rejected_without_mutation() {
    let mut session = fresh_session();
    session.pass_day();
    let state_before = session.state().clone();
    let err = session.make_choice(0).unwrap_err();
    assert!(matches!(
        err,
        TickError::InvalidChoiceIndex {
            day: 2,
            available: 0,
            ..
        }
    ));
    assert_eq!(session.state(), &state_before);
}

#[test]
fn replay_is_bit_identical() {
    let script = vec![(1, Some(1)), (5, Some(0)), (12, Some(1)), (20, Some(1))];
    let mut a = fresh_session();
    let mut b = fresh_session();
    for _ in 0..35 {
        let day = a.day();
        let ra = a.advance(choice_for(&script, day)).unwrap();
        let rb = b.advance(choice_for(&script, day)).unwrap();
        assert_eq!(ra, rb);
        assert_eq!(a.state(), b.state());
    }
    assert_eq!(a.history_data(), b.history_data());
}

#[test]
fn undecided_game_reaches_controlled_eradication_on_day_25() {
    let mut session = fresh_session();
    let results = play(&mut session, &[], 25);
    assert!(results[..24].iter().all(|r| r.ending.is_none()));
    assert_eq!(results[24].day, 25);
    assert_eq!(results[24].ending, Some(Ending::ControlledEradication));
}

#[test]
fn broken_trust_ends_in_generational_trauma() {
    let config = DirectiveConfig::default();
    let mut session = Session::new(&config);
    session.start_game();
    let mut source = ScriptedChoices::from_pairs(&[(1, 2), (5, 0), (12, 0), (20, 1)]);
    let result =
        runner::run_playthrough(&mut session, &mut source, 60, &mut NoOpCallback).unwrap();

    assert_eq!(
        result.end_reason,
        PlaythroughEndReason::Ending(Ending::GenerationalTrauma)
    );
    assert_eq!(result.total_days, 25);
    let state = session.state();
    assert!(state.trust < 0.2);
    assert!(state.flag("censored_media"));
    assert!(state.flag("weaponized_quarantine"));
}

#[test]
fn engine_keeps_ticking_after_an_ending() {
    let mut session = fresh_session();
    play(&mut session, &[], 25);
    assert_eq!(session.ending(), Some(Ending::ControlledEradication));
    let result = session.pass_day();
    assert_eq!(result.day, 26);
    assert_eq!(session.history_data().len(), 26);
}

#[test]
fn tick_result_serializes_for_the_presentation_layer() {
    let mut session = fresh_session();
    let result = session.make_choice(2).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["day"], 1);
    assert_eq!(json["progression_applied"], true);
    assert_eq!(json["applied_choice"]["index"], 2);
    assert_eq!(json["next_day"], 2);
    assert!(json["next_event"].is_null());
    assert!(json["ending"].is_null());
}
