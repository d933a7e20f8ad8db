use gridchart_rs::core::Resolution;
use gridchart_rs::interaction::{ResolutionBehavior, ResolutionController, ResolutionMode};
use proptest::prelude::*;

fn auto_controller(delay: u64) -> ResolutionController {
    let mut controller = ResolutionController::new(ResolutionBehavior {
        auto_upgrade: true,
        upgrade_delay_ms: delay,
        initial: Resolution::Preview,
    });
    controller.reset(0);
    controller
}

#[test]
fn upgrade_waits_for_full_delay_after_reset() {
    let mut controller = auto_controller(1_000);
    assert_eq!(controller.tier(), Resolution::Preview);
    assert_eq!(controller.pending_upgrade_at(), Some(1_000));

    controller.reset(600);
    assert_eq!(controller.poll(1_000), None);
    assert_eq!(controller.poll(1_600), Some(Resolution::Normal));
}

#[test]
fn turning_auto_upgrade_off_pins_current_tier() {
    let mut controller = auto_controller(100);
    assert_eq!(controller.poll(100), Some(Resolution::Normal));

    controller.set_auto_upgrade(false, 150);
    assert_eq!(
        controller.mode(),
        ResolutionMode::Manual {
            tier: Resolution::Normal
        }
    );
    assert_eq!(controller.poll(10_000), None);

    controller.set_auto_upgrade(true, 200);
    assert_eq!(controller.poll(300), Some(Resolution::High));
}

#[test]
fn lifting_global_override_resumes_from_global_tier() {
    let mut controller = auto_controller(100);
    controller.set_global_resolution(Some(Resolution::High), 50);
    assert!(!controller.set_resolution(Resolution::Preview));
    assert_eq!(controller.tier(), Resolution::High);

    controller.set_global_resolution(None, 60);
    assert_eq!(
        controller.mode(),
        ResolutionMode::Auto {
            tier: Resolution::High
        }
    );
    assert_eq!(controller.poll(160), Some(Resolution::Full));
}

#[test]
fn behavior_defaults_follow_documented_values() {
    let behavior: ResolutionBehavior = serde_json::from_str("{}").expect("defaults");
    assert_eq!(behavior, ResolutionBehavior::default());
    assert!(behavior.auto_upgrade);
    assert_eq!(behavior.upgrade_delay_ms, 1_000);
    assert_eq!(behavior.initial, Resolution::Preview);
}

proptest! {
    #[test]
    fn auto_upgrade_tiers_never_decrease(
        delay in 1u64..2_000,
        steps in proptest::collection::vec(0u64..3_000, 1..40),
    ) {
        let mut controller = auto_controller(delay);
        let mut now = 0;
        let mut previous = controller.tier();
        for step in steps {
            now += step;
            controller.poll(now);
            let tier = controller.tier();
            prop_assert!(tier >= previous);
            previous = tier;
        }
    }
}
