use rampart_core::components::Oscillation;
use rampart_core::constants::*;
use rampart_core::enums::AttackerPhase;
use rampart_core::tuning::AttackerTuning;
use rampart_core::types::Difficulty;

use crate::fsm::{evaluate, on_depleted, oscillate, AttackerContext};
use crate::profiles::{boss_profile, growth_multiplier, profile_for, regular_profile};

fn make_context(phase: AttackerPhase, is_boss: bool, x: f64, health: f64) -> AttackerContext {
    AttackerContext {
        phase,
        is_boss,
        x,
        lateral_speed: -1.0,
        health,
        fade_steps_remaining: if phase == AttackerPhase::Dying { 3 } else { 0 },
        fade_steps_total: if is_boss { BOSS_FADE_STEPS } else { 0 },
        defense_line_x: 200.0,
    }
}

#[test]
fn test_alive_moves_left() {
    let update = evaluate(&make_context(AttackerPhase::Alive, false, 500.0, 50.0));
    assert_eq!(update.new_phase, AttackerPhase::Alive);
    assert!(!update.phase_changed);
    assert!(update.new_x < 500.0, "x must strictly decrease while alive");
}

#[test]
fn test_reaching_defense_line() {
    let update = evaluate(&make_context(AttackerPhase::Alive, false, 200.5, 50.0));
    assert_eq!(update.new_phase, AttackerPhase::ReachedDefender);
    assert!(update.breached());
}

#[test]
fn test_regular_depletes_immediately() {
    let update = evaluate(&make_context(AttackerPhase::Alive, false, 500.0, 0.0));
    assert_eq!(update.new_phase, AttackerPhase::Depleted);
    assert_eq!(update.new_x, 500.0);
}

#[test]
fn test_boss_enters_dying_then_depletes() {
    let (phase, fade) = on_depleted(true, BOSS_FADE_STEPS);
    assert_eq!(phase, AttackerPhase::Dying);
    assert_eq!(fade, BOSS_FADE_STEPS);

    let mut ctx = make_context(AttackerPhase::Dying, true, 700.0, 0.0);
    ctx.fade_steps_remaining = fade;
    let mut steps = 0;
    loop {
        let update = evaluate(&ctx);
        steps += 1;
        assert_eq!(update.new_x, 700.0, "dying boss must stay put");
        ctx.phase = update.new_phase;
        ctx.fade_steps_remaining = update.fade_steps_remaining;
        if update.new_phase == AttackerPhase::Depleted {
            break;
        }
        assert!(steps < 1000);
    }
    assert_eq!(steps, BOSS_FADE_STEPS);
}

#[test]
fn test_terminal_phases_are_sticky() {
    for phase in [AttackerPhase::Depleted, AttackerPhase::ReachedDefender] {
        let update = evaluate(&make_context(phase, false, 100.0, 0.0));
        assert_eq!(update.new_phase, phase);
        assert!(!update.phase_changed);
    }
}

#[test]
fn test_oscillation_stays_within_amplitude() {
    let mut osc = Oscillation {
        base_y: 300.0,
        amplitude: 20.0,
        phase: 0.0,
        phase_step: 0.05,
    };
    for _ in 0..500 {
        let (next, y) = oscillate(&osc);
        assert!((y - 300.0).abs() <= 20.0 + 1e-9);
        osc = next;
    }
    assert!((osc.phase - 25.0).abs() < 1e-6);
}

#[test]
fn test_growth_per_wave() {
    let t = AttackerTuning::default();
    assert!((growth_multiplier(1, &t) - 1.1).abs() < 1e-9);
    assert!((growth_multiplier(10, &t) - 2.0).abs() < 1e-9);
}

#[test]
fn test_difficulty_scales_regular_only_through_multipliers() {
    let t = AttackerTuning::default();
    let base = regular_profile(3, Difficulty::default(), &t);
    let hard = regular_profile(
        3,
        Difficulty {
            speed: 1.4,
            health: 1.6,
        },
        &t,
    );
    assert!((hard.health / base.health - 1.6).abs() < 1e-9);
    assert!((hard.lateral_speed / base.lateral_speed - 1.4).abs() < 1e-9);
    assert_eq!(hard.size, base.size);
}

#[test]
fn test_boss_stronger_and_slower_every_wave() {
    let t = AttackerTuning::default();
    for wave in 1..=60 {
        let regular = regular_profile(wave, Difficulty::default(), &t);
        let boss = boss_profile(wave, &t);
        assert!(boss.health > regular.health, "wave {wave}");
        assert!(boss.contact_damage > regular.contact_damage, "wave {wave}");
        assert!(boss.size.width > regular.size.width, "wave {wave}");
        assert!(
            boss.lateral_speed.abs() < regular.lateral_speed.abs(),
            "boss must be slower on wave {wave}"
        );
        assert!(boss.lateral_speed < 0.0);
        assert!(boss.phase_step < regular.phase_step);
    }
}

#[test]
fn test_difficulty_never_reaches_bosses() {
    let t = AttackerTuning::default();
    let capped = Difficulty {
        speed: 1.0 + DIFFICULTY_SPEED_CAP,
        health: 1.0 + DIFFICULTY_HEALTH_CAP,
    };
    let easy = profile_for(10, true, Difficulty::default(), &t);
    let hard = profile_for(10, true, capped, &t);
    assert_eq!(easy, hard);

    // 100 base health, +100% growth at wave 10, x3 boss multiplier.
    assert!((hard.health - 600.0).abs() < 1e-9);
    assert!((hard.lateral_speed + 0.7).abs() < 1e-9);
}

#[test]
fn test_profile_for_dispatch() {
    let t = AttackerTuning::default();
    let d = Difficulty::default();
    assert_eq!(profile_for(5, true, d, &t), boss_profile(5, &t));
    assert_eq!(profile_for(4, false, d, &t), regular_profile(4, d, &t));
    assert_eq!(profile_for(4, false, d, &t).fade_steps, 0);
}
