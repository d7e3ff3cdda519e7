//=========================================================================
// Runtime
//=========================================================================
//
// Threaded engine: contacts reported over the channel are decided on the
// logic thread, combines come back as events, and shutdown returns the
// host.
//
//=========================================================================

mod common;

use std::time::Duration;

use aetheric_fusion::prelude::*;
use common::RecordingHost;
use glam::Vec3;

const A: ObjectId = ObjectId::new(0, 0);
const B: ObjectId = ObjectId::new(1, 0);
const C: ObjectId = ObjectId::new(2, 0);
const D: ObjectId = ObjectId::new(3, 0);
const TIMEOUT: Duration = Duration::from_secs(5);

fn host() -> RecordingHost {
    let mut host = RecordingHost::default();
    host.place(A, Vec3::ZERO);
    host.place(B, Vec3::new(2.0, 0.0, 0.0));
    host
}

fn metal(id: ObjectId, tag: &str, with_tag: &str) -> Combinable {
    Combinable::new(id)
        .with_tag(tag)
        .with_combine_with_tag(with_tag)
        .with_settings(CombineSettings::default().with_result("Alloy"))
}

#[test]
fn duplicate_reports_produce_one_event() {
    let handle = EngineBuilder::new()
        .with_tps(240.0)
        .build()
        .init(|engine| {
            engine.register(metal(A, "Metal", "")).unwrap();
            engine.register(metal(B, "", "Metal")).unwrap();
        })
        .start(host());

    let contact = ContactEvent::new(A, B, 0.0);
    handle.report_contacts(vec![contact, contact.mirrored()]).unwrap();

    let event = handle.events().recv_timeout(TIMEOUT).unwrap();
    assert_eq!(event.pair, PairKey::new(A, B));
    assert_eq!(event.position, Vec3::new(1.0, 0.0, 0.0));

    let host = handle.shutdown().unwrap();
    assert_eq!(host.spawned_templates(), vec!["Alloy"]);
    assert_eq!(host.destroyed, vec![A, B]);
}

#[test]
fn registration_over_channel_precedes_contacts() {
    let handle = EngineBuilder::new().build().start(host());

    handle.register(metal(A, "Metal", "")).unwrap();
    handle.register(metal(B, "", "Metal")).unwrap();
    handle.report_contact(ContactEvent::new(B, A, 0.0)).unwrap();

    let event = handle.events().recv_timeout(TIMEOUT).unwrap();
    assert_eq!(event.reporter, B);
    assert_eq!(event.state, CombineState::Consumed);

    handle.shutdown().unwrap();
}

#[test]
fn unregistered_object_no_longer_combines() {
    let handle = EngineBuilder::new()
        .build()
        .init(|engine| {
            engine.register(metal(A, "Metal", "")).unwrap();
            engine.register(metal(B, "", "Metal")).unwrap();
        })
        .start(host());

    handle.unregister(B).unwrap();
    handle.report_contact(ContactEvent::new(A, B, 0.0)).unwrap();

    // Shutdown is applied after everything sent before it.
    let events = handle.events().clone();
    let host = handle.shutdown().unwrap();
    assert!(events.try_recv().is_err());
    assert!(host.spawned.is_empty());
}

#[test]
fn contacts_from_another_thread_are_decided() {
    let handle = EngineBuilder::new()
        .build()
        .init(|engine| {
            engine.register(metal(A, "Metal", "")).unwrap();
            engine.register(metal(B, "", "Metal")).unwrap();
        })
        .start(host());

    let sender = handle.sender();
    std::thread::spawn(move || {
        sender
            .send(HostEvent::Contacts(vec![ContactEvent::new(A, B, 0.0)]))
            .unwrap();
    })
    .join()
    .unwrap();

    assert!(handle.events().recv_timeout(TIMEOUT).is_ok());
    handle.shutdown().unwrap();
}

#[test]
fn shutdown_with_nothing_reported_returns_host() {
    let handle = EngineBuilder::new().build().start(RecordingHost::default());
    let host = handle.shutdown().unwrap();
    assert!(host.spawned.is_empty());
}

#[test]
fn unread_events_are_capped_at_capacity() {
    let handle = EngineBuilder::new()
        .with_event_capacity(1)
        .build()
        .init(|engine| {
            engine.register(metal(A, "Metal", "")).unwrap();
            engine.register(metal(B, "", "Metal")).unwrap();
            engine.register(metal(C, "Metal", "")).unwrap();
            engine.register(metal(D, "", "Metal")).unwrap();
        })
        .start(host());

    // Both pairs combine in one tick; only one event fits.
    handle
        .report_contacts(vec![ContactEvent::new(A, B, 0.0), ContactEvent::new(C, D, 0.0)])
        .unwrap();

    let events = handle.events().clone();
    let host = handle.shutdown().unwrap();

    assert_eq!(host.destroyed, vec![A, B, C, D]);
    assert_eq!(events.try_iter().count(), 1);
}
