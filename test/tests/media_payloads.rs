/// Pixel tiles, audio blocks and curve keys travel in the ids the host gave
/// their layer, buffer or curve; malformed entries are dropped one by one.
use vml_shared::{AudioSamples, Command, CurveKey, TilePixels};
use vml_test::{documents, upload, Delivery, FakeHost};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn tiles_reach_their_layer() {
    init_logger();
    let host = upload(&documents::media_payloads(), FakeHost::new());
    let (checker, bitmap) = host.entity_named("checker").expect("bitmap uploaded");
    let gray = bitmap.subresources["gray"];

    let tiles: Vec<&Command> = host
        .commands()
        .iter()
        .filter(|command| matches!(command, Command::SetTile { .. }))
        .collect();
    assert_eq!(
        tiles,
        vec![&Command::SetTile {
            entity: checker,
            layer: gray,
            tile_x: 1,
            tile_y: 0,
            z: 0,
            pixels: TilePixels::Uint8((0..64).collect()),
        }]
    );
}

#[test]
fn audio_blocks_reach_their_buffer() {
    init_logger();
    let host = upload(&documents::media_payloads(), FakeHost::new());
    let (click, audio) = host.entity_named("click").expect("audio uploaded");
    let mono = audio.subresources["mono"];

    let blocks: Vec<&Command> = host
        .commands()
        .iter()
        .filter(|command| matches!(command, Command::SetAudioBlock { .. }))
        .collect();
    assert_eq!(
        blocks,
        vec![&Command::SetAudioBlock {
            entity: click,
            buffer: mono,
            index: 3,
            samples: AudioSamples::Int8(vec![-5; 1024]),
        }]
    );
}

#[test]
fn curve_keys_are_numbered_in_document_order() {
    init_logger();
    for delivery in [Delivery::InOrder, Delivery::Reversed] {
        let host = upload(&documents::media_payloads(), FakeHost::with_delivery(delivery));
        let (path, curve) = host.entity_named("path").expect("curve uploaded");
        let xy = curve.subresources["xy"];

        let keys: Vec<CurveKey> = host
            .commands()
            .iter()
            .filter_map(|command| match command {
                Command::SetCurveKey { entity, curve, key } if *entity == path && *curve == xy => {
                    Some(key.clone())
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            keys,
            vec![
                CurveKey {
                    key: 0,
                    pos: 0.5,
                    value: vec![1.0, 2.0],
                    pre_value: vec![0.0, 0.0],
                    pre_pos: vec![1, 1],
                    post_value: vec![3.0, 4.0],
                    post_pos: vec![2, 2],
                },
                CurveKey {
                    key: 1,
                    pos: 3.0,
                    value: vec![5.0, 6.0],
                    pre_value: vec![7.0, 8.0],
                    pre_pos: vec![3, 3],
                    post_value: vec![9.0, 10.0],
                    post_pos: vec![4, 4],
                },
            ],
            "{:?}",
            delivery
        );
    }
}
