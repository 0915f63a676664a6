/// Material fragments reference each other by document id; the host only
/// ever sees its own fragment ids.
use vml_shared::{Command, Fragment, FragmentId};
use vml_test::{documents, upload, Delivery, FakeHost};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn fragment_sets(host: &FakeHost) -> Vec<(FragmentId, Fragment)> {
    host.commands()
        .iter()
        .filter_map(|command| match command {
            Command::CreateFragment {
                fragment: Some(fragment),
                value,
                ..
            } => Some((*fragment, value.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn output_front_points_at_the_texture() {
    init_logger();
    for delivery in [Delivery::InOrder, Delivery::Reversed] {
        let host = upload(documents::TEXTURED_MATERIAL, FakeHost::with_delivery(delivery));
        let (paint, _) = host.entity_named("paint").expect("bitmap uploaded");
        let (_, painted) = host.entity_named("painted").expect("material uploaded");

        let sets = fragment_sets(&host);
        assert_eq!(sets.len(), 2, "{:?}", delivery);
        let (texture, texture_value) = &sets[0];
        assert_eq!(
            texture_value,
            &Fragment::Texture {
                bitmap: Some(paint),
                layers: [
                    "col_r".to_string(),
                    "col_g".to_string(),
                    "col_b".to_string()
                ],
                mapping: None,
            }
        );
        let (output, output_value) = &sets[1];
        assert_ne!(texture, output);
        assert_eq!(
            output_value,
            &Fragment::Output {
                label: "color".to_string(),
                front: Some(*texture),
                back: None,
            }
        );
        assert_eq!(painted.fragments.get(output), Some(output_value));
    }
}

#[test]
fn every_fragment_is_created_before_any_is_filled() {
    init_logger();
    let host = upload(documents::TEXTURED_MATERIAL, FakeHost::new());
    let requests: Vec<Option<FragmentId>> = host
        .commands()
        .iter()
        .filter_map(|command| match command {
            Command::CreateFragment { fragment, .. } => Some(*fragment),
            _ => None,
        })
        .collect();
    assert_eq!(requests.len(), 4);
    assert!(requests[..2].iter().all(Option::is_none));
    assert!(requests[2..].iter().all(Option::is_some));
}

#[test]
fn references_only_name_created_fragments() {
    init_logger();
    let host = upload(documents::EVERY_KIND, FakeHost::with_delivery(Delivery::Shuffled(5)));
    let (_, shade) = host.entity_named("shade").expect("material uploaded");
    for (_, value) in fragment_sets(&host) {
        for reference in value.fragment_refs() {
            assert!(
                shade.fragments.contains_key(&reference),
                "{:?} refers to unknown fragment {}",
                value,
                reference
            );
        }
    }
}
