/// Upload a document and read the scene back from the host.
use std::collections::BTreeMap;

use vml_shared::EntityKind;
use vml_test::{documents, upload, Delivery, FakeHost};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn scene(host: &FakeHost) -> BTreeMap<String, (EntityKind, Vec<String>)> {
    host.created_entities()
        .filter_map(|(_, entity)| {
            let kind = entity.kind?;
            let name = entity.name.clone()?;
            Some((name, (kind, entity.subresources.keys().cloned().collect())))
        })
        .collect()
}

fn expected() -> BTreeMap<String, (EntityKind, Vec<String>)> {
    let entries: [(&str, EntityKind, &[&str]); 7] = [
        ("lamp", EntityKind::Object, &[]),
        ("shade", EntityKind::Material, &[]),
        ("cube", EntityKind::Geometry, &["polygon", "vertex"]),
        ("readme", EntityKind::Text, &["body"]),
        ("fade", EntityKind::Curve, &["alpha"]),
        ("checker", EntityKind::Bitmap, &["gray"]),
        ("click", EntityKind::Audio, &["left"]),
    ];
    entries
        .into_iter()
        .map(|(name, kind, subresources)| {
            (
                name.to_string(),
                (kind, subresources.iter().map(|name| name.to_string()).collect()),
            )
        })
        .collect()
}

#[test]
fn host_holds_the_document() {
    init_logger();
    let host = upload(documents::EVERY_KIND, FakeHost::new());
    assert_eq!(scene(&host), expected());
    assert_eq!(host.created_entities().count(), 7);
}

#[test]
fn delivery_order_does_not_matter() {
    init_logger();
    for delivery in [
        Delivery::Reversed,
        Delivery::Shuffled(1),
        Delivery::Shuffled(2),
        Delivery::Shuffled(3),
    ] {
        let host = upload(documents::EVERY_KIND, FakeHost::with_delivery(delivery));
        assert_eq!(scene(&host), expected(), "{:?}", delivery);
    }
}

#[test]
fn other_clients_entities_are_ignored() {
    init_logger();
    let host = upload(
        documents::EVERY_KIND,
        FakeHost::with_delivery(Delivery::Reversed).with_foreign_traffic(),
    );
    assert_eq!(scene(&host), expected());
    for command in host.commands() {
        if let Some(entity) = command.entity() {
            let owned = host.created_entities().any(|(id, _)| id == entity);
            assert!(owned, "{:?} addresses an entity we did not create", command);
        }
    }
}
