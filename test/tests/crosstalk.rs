/// Acknowledgments for another client's entity arrive in the middle of our
/// own batches. They must neither resolve our names nor release the tracker.
use vml_client::Pending;
use vml_shared::{Command, Fragment, VertexValue};
use vml_test::{documents, parse, upload, upload_stepwise, Delivery, FakeHost};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn layers_keep_their_own_ids() {
    init_logger();
    let host = upload(documents::GEOMETRY_LAYERS, FakeHost::new().with_crosstalk());
    let (mesh, entity) = host.entity_named("mesh").expect("mesh uploaded");
    let pos = entity.subresources["pos"];
    let normal = entity.subresources["normal"];
    let info = entity.tag_groups["info"];

    for command in host.commands() {
        match command {
            Command::SetVertex {
                entity,
                layer,
                index: 0,
                value: VertexValue::Xyz([x, ..]),
            } => {
                assert_eq!(*entity, mesh);
                let expected = if *x == 1.0 { pos } else { normal };
                assert_eq!(*layer, expected);
            }
            Command::CreateTag { entity, group, .. } => assert_eq!((*entity, *group), (mesh, info)),
            _ => {}
        }
    }
}

#[test]
fn fragments_keep_their_own_ids() {
    init_logger();
    for delivery in [Delivery::InOrder, Delivery::Reversed] {
        let host = upload(
            documents::TEXTURED_MATERIAL,
            FakeHost::with_delivery(delivery).with_crosstalk(),
        );
        let (_, painted) = host.entity_named("painted").expect("material uploaded");
        let texture = painted
            .fragments
            .iter()
            .find(|(_, value)| matches!(value, Fragment::Texture { .. }))
            .map(|(id, _)| *id)
            .expect("texture fragment");
        let output = painted
            .fragments
            .values()
            .find(|value| matches!(value, Fragment::Output { .. }))
            .expect("output fragment");
        assert_eq!(
            output,
            &Fragment::Output {
                label: "color".to_string(),
                front: Some(texture),
                back: None,
            },
            "{:?}",
            delivery
        );
    }
}

#[test]
fn payloads_keep_their_own_ids() {
    init_logger();
    let host = upload(&documents::media_payloads(), FakeHost::new().with_crosstalk());
    let (_, bitmap) = host.entity_named("checker").expect("bitmap uploaded");
    let (_, audio) = host.entity_named("click").expect("audio uploaded");
    let (_, curve) = host.entity_named("path").expect("curve uploaded");

    let mut seen = 0;
    for command in host.commands() {
        match command {
            Command::SetTile { layer, .. } => {
                assert_eq!(*layer, bitmap.subresources["gray"]);
                seen += 1;
            }
            Command::SetAudioBlock { buffer, .. } => {
                assert_eq!(*buffer, audio.subresources["mono"]);
                seen += 1;
            }
            Command::SetCurveKey { curve: id, .. } => {
                assert_eq!(*id, curve.subresources["xy"]);
                seen += 1;
            }
            _ => {}
        }
    }
    assert_eq!(seen, 4);
}

#[test]
fn foreign_acknowledgments_never_release_a_batch() {
    init_logger();
    let mut source = documents::media_payloads();
    source.truncate(source.rfind("</vml>").expect("closing tag"));
    source.push_str(&documents::GEOMETRY_LAYERS["<vml>".len()..].replace("n1", "n5"));
    let document = parse(&source);

    for latency in 0..3 {
        let mut host = FakeHost::new().with_crosstalk().with_latency(latency);
        let mut violations = Vec::new();
        upload_stepwise(&document, &mut host, 10_000, |attempt| {
            if attempt.stepped && (attempt.state != Pending::None || attempt.count != 0) {
                violations.push(attempt);
            }
        });
        assert!(violations.is_empty(), "{:?}", violations);
        assert_eq!(host.created_entities().count(), 4);
    }
}
