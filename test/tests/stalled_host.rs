/// A host that never answers, or answers late, leaves the loader waiting
/// without sending anything it was not allowed to send.
use vml_client::{ClientConfig, Pending, Phase, Uploader};
use vml_shared::{Command, EntityKind, HostEvent};
use vml_test::{documents, parse, upload, upload_stepwise, FakeHost};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn nothing_is_sent_before_the_connection_is_accepted() {
    init_logger();
    let document = parse(documents::EVERY_KIND);
    let mut host = FakeHost::new().silent();
    let mut steps = 0;
    upload_stepwise(&document, &mut host, 50, |_| steps += 1);

    assert_eq!(steps, 0);
    assert_eq!(host.commands().len(), 1);
    assert!(matches!(host.commands()[0], Command::Connect { .. }));
}

#[test]
fn a_busy_uploader_refuses_to_step() {
    init_logger();
    let document = parse(documents::EVERY_KIND);
    let config = ClientConfig::default();
    let mut uploader = Uploader::new(&document, &config);
    uploader.connect(&config.name, &config.password, &config.address);
    uploader.handle_event(HostEvent::ConnectAccept {
        avatar: 0,
        address: config.address.clone(),
    });
    uploader.start_phase(Phase::Assets);

    assert!(uploader.step());
    assert_eq!(uploader.tracker().state(), Pending::EntityCreate);
    for _ in 0..5 {
        assert!(!uploader.step());
    }

    let created: Vec<EntityKind> = uploader
        .take_outgoing_commands()
        .into_iter()
        .filter_map(|command| match command {
            Command::CreateEntity { kind } => Some(kind),
            _ => None,
        })
        .collect();
    assert_eq!(created, vec![EntityKind::Audio]);
}

#[test]
fn a_slow_host_still_gets_everything() {
    init_logger();
    let host = upload(documents::EVERY_KIND, FakeHost::new().with_latency(3));
    assert_eq!(host.created_entities().count(), 7);
    for name in ["lamp", "shade", "cube", "readme", "fade", "checker", "click"] {
        assert!(host.entity_named(name).is_some(), "{} missing", name);
    }
}
