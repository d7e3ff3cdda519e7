//=========================================================================
// Combine Scenarios
//=========================================================================
//
// End-to-end contact sequences through `CombineEngine::on_contact`.
//
//=========================================================================

mod common;

use aetheric_fusion::prelude::*;
use common::RecordingHost;
use glam::{Quat, Vec3};

//--- Helpers -------------------------------------------------------------

fn metal_pair(settings: CombineSettings) -> (CombineEngine, RecordingHost, ObjectId, ObjectId) {
    let mut ids = IdAllocator::new();
    let a = ids.allocate();
    let b = ids.allocate();

    let mut engine = CombineEngine::new();
    engine
        .register(Combinable::new(a).with_tag("Metal").with_settings(settings.clone()))
        .unwrap();
    engine
        .register(Combinable::new(b).with_combine_with_tag("Metal").with_settings(settings))
        .unwrap();

    let mut host = RecordingHost::default();
    host.place(a, Vec3::ZERO);
    host.place(b, Vec3::new(2.0, 0.0, 0.0));
    (engine, host, a, b)
}

//--- Scenarios -----------------------------------------------------------

#[test]
fn metal_pair_combines_once_and_is_destroyed() {
    let (mut engine, mut host, a, b) = metal_pair(CombineSettings::default().with_result("Alloy"));

    let first = engine.on_contact(&mut host, ContactEvent::new(a, b, 1.0));
    let second = engine.on_contact(&mut host, ContactEvent::new(b, a, 1.1));

    let event = first.combined().unwrap();
    assert_eq!(event.position, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(event.orientation, Quat::IDENTITY);
    assert_eq!(event.state, CombineState::Consumed);
    assert!(!second.is_combined());

    assert_eq!(host.spawned_templates(), vec!["Alloy"]);
    assert_eq!(host.spawned[0].position, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(host.destroyed, vec![a, b]);
    assert!(engine.store().state(a).is_none());
    assert!(engine.store().state(b).is_none());
}

#[test]
fn duplicate_reports_inside_window_combine_exactly_once() {
    // Keep the originals alive and skip the eligibility gate so only the
    // cooldown stands between the duplicates and a second combine.
    let settings = CombineSettings::default()
        .with_result("Alloy")
        .with_destroy_originals(false)
        .with_require_both_initial(false);
    let (mut engine, mut host, a, b) = metal_pair(settings);

    let combined = (0..10)
        .map(|i| {
            let contact = ContactEvent::new(a, b, 0.01 * i as f64);
            if i % 2 == 0 { contact } else { contact.mirrored() }
        })
        .filter(|&contact| engine.on_contact(&mut host, contact).is_combined())
        .count();

    assert_eq!(combined, 1);
    assert_eq!(host.spawned.len(), 1);
    assert_eq!(engine.cooldowns().len(), 1);
}

#[test]
fn contact_after_cooldown_is_a_new_decision() {
    let settings = CombineSettings::default()
        .with_result("Alloy")
        .with_destroy_originals(false)
        .with_require_both_initial(false)
        .with_pair_cooldown(0.2);
    let (mut engine, mut host, a, b) = metal_pair(settings);

    assert!(engine.on_contact(&mut host, ContactEvent::new(a, b, 0.0)).is_combined());
    assert_eq!(
        engine.on_contact(&mut host, ContactEvent::new(a, b, 0.2)),
        ContactOutcome::Suppressed
    );
    assert!(engine.on_contact(&mut host, ContactEvent::new(b, a, 0.25)).is_combined());
    assert_eq!(host.spawned.len(), 2);
}

#[test]
fn non_destructive_combine_is_refused_by_eligibility_afterwards() {
    let (mut engine, mut host, a, b) =
        metal_pair(CombineSettings::default().with_destroy_originals(false));

    let outcome = engine.on_contact(&mut host, ContactEvent::new(a, b, 0.0));
    assert_eq!(outcome.combined().map(|e| e.state), Some(CombineState::Spent));
    assert!(host.destroyed.is_empty());
    assert_eq!(engine.store().state(a), Some(CombineState::Spent));
    assert_eq!(engine.store().state(b), Some(CombineState::Spent));

    assert_eq!(
        engine.on_contact(&mut host, ContactEvent::new(a, b, 5.0)),
        ContactOutcome::Rejected(Rejection::NotInitial)
    );
}

#[test]
fn spawn_offset_shifts_the_midpoint() {
    let settings = CombineSettings::default()
        .with_result("Alloy")
        .with_spawn_offset(Vec3::new(0.0, 1.0, 0.0));
    let (mut engine, mut host, a, b) = metal_pair(settings);

    engine.on_contact(&mut host, ContactEvent::new(a, b, 0.0));
    assert_eq!(host.spawned[0].position, Vec3::new(1.0, 1.0, 0.0));
}

#[test]
fn bounds_fall_back_to_origin() {
    let (mut engine, mut host, a, b) = metal_pair(CombineSettings::default().with_result("Alloy"));
    host.bounds.remove(&b);
    host.origins.insert(b, Vec3::new(0.0, 0.0, 4.0));

    engine.on_contact(&mut host, ContactEvent::new(a, b, 0.0));
    assert_eq!(host.spawned[0].position, Vec3::new(0.0, 0.0, 2.0));
}

#[test]
fn speed_gate_uses_relative_velocity() {
    let settings = CombineSettings::default().with_min_relative_speed(2.0);
    let (mut engine, mut host, a, b) = metal_pair(settings);
    host.velocities.insert(a, Vec3::new(0.5, 0.0, 0.0));
    host.velocities.insert(b, Vec3::new(-0.5, 0.0, 0.0));

    assert!(matches!(
        engine.on_contact(&mut host, ContactEvent::new(a, b, 0.0)),
        ContactOutcome::Rejected(Rejection::TooSlow { .. })
    ));

    host.velocities.insert(a, Vec3::new(1.5, 0.0, 0.0));
    host.velocities.insert(b, Vec3::new(-1.5, 0.0, 0.0));
    assert!(engine.on_contact(&mut host, ContactEvent::new(a, b, 0.1)).is_combined());
}

#[test]
fn zero_speed_threshold_never_checks_speed() {
    let (mut engine, mut host, a, b) = metal_pair(CombineSettings::default());
    // Neither object has a velocity: the host reports them as kinematic.
    assert!(engine.on_contact(&mut host, ContactEvent::new(a, b, 0.0)).is_combined());
}

#[test]
fn key_recipe_matches_regardless_of_tags() {
    let mut engine = CombineEngine::new();
    let a = ObjectId::new(0, 0);
    let b = ObjectId::new(1, 0);
    engine.register(Combinable::new(a).with_my_key("Metal").with_tag("Wood")).unwrap();
    engine
        .register(Combinable::new(b).with_combine_with_key("Metal").with_combine_with_tag("Stone"))
        .unwrap();

    let mut host = RecordingHost::default();
    assert!(engine.on_contact(&mut host, ContactEvent::new(b, a, 0.0)).is_combined());
}

#[test]
fn missing_result_template_still_destroys_and_spawns_particle() {
    let settings = CombineSettings::default().with_result("Ghost").with_particle("Sparks");
    let (mut engine, mut host, a, b) = metal_pair(settings);
    host.missing_templates.push("Ghost".to_string());

    let outcome = engine.on_contact(&mut host, ContactEvent::new(a, b, 0.0));
    let event = outcome.combined().unwrap();

    assert!(!event.result_spawned);
    assert!(event.particle_spawned);
    assert_eq!(host.spawned_templates(), vec!["Sparks"]);
    assert_eq!(host.destroyed.len(), 2);
}

#[test]
fn recycled_slot_is_not_suppressed_by_stale_cooldown() {
    let settings = CombineSettings::default().with_result("Alloy").with_pair_cooldown(5.0);
    let mut ids = IdAllocator::new();
    let a = ids.allocate();
    let b = ids.allocate();

    let mut engine = CombineEngine::new();
    let mut host = RecordingHost::default();
    for (id, tag) in [(a, "Metal"), (b, "")] {
        let c = Combinable::new(id).with_tag(tag).with_combine_with_tag("Metal");
        engine.register(c.with_settings(settings.clone())).unwrap();
    }
    assert!(engine.on_contact(&mut host, ContactEvent::new(a, b, 0.0)).is_combined());

    // Both slots come back with a new generation well inside the window.
    ids.release(a);
    ids.release(b);
    let c = ids.allocate();
    let d = ids.allocate();
    assert_eq!((c.index(), d.index()), (b.index(), a.index()));

    engine
        .register(Combinable::new(c).with_tag("Metal").with_settings(settings.clone()))
        .unwrap();
    engine
        .register(Combinable::new(d).with_combine_with_tag("Metal").with_settings(settings))
        .unwrap();

    assert!(engine.on_contact(&mut host, ContactEvent::new(c, d, 0.5)).is_combined());
    assert_eq!(host.spawned.len(), 2);
}

#[test]
fn archetypes_drive_the_combine() {
    let archetypes = Archetypes::from_json(
        r#"{
            "ore":   { "tag": "Metal" },
            "forge": {
                "combine_with_tag": "Metal",
                "settings": { "result_template": "Ingot", "spawn_offset": [0.0, 0.5, 0.0] }
            }
        }"#,
    )
    .unwrap();

    let ore = ObjectId::new(0, 0);
    let forge = ObjectId::new(1, 0);
    let mut engine = CombineEngine::new();
    engine.register(archetypes.instantiate("ore", ore).unwrap()).unwrap();
    engine.register(archetypes.instantiate("forge", forge).unwrap()).unwrap();

    let mut host = RecordingHost::default();
    host.place(ore, Vec3::ZERO);
    host.place(forge, Vec3::new(0.0, 0.0, 2.0));

    // The ore reports; it has no template of its own, so the forge's is used.
    // The spawn offset comes from the reporting side.
    engine.on_contact(&mut host, ContactEvent::new(ore, forge, 0.0));
    assert_eq!(host.spawned_templates(), vec!["Ingot"]);
    assert_eq!(host.spawned[0].position, Vec3::new(0.0, 0.0, 1.0));
}
