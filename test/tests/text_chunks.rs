/// Text longer than one command can carry is split into pieces with explicit
/// offsets.
use vml_client::ClientConfig;
use vml_shared::{Command, TEXT_CHUNK_SIZE};
use vml_test::{documents, upload, upload_with, FakeHost};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn pieces(host: &FakeHost) -> Vec<(u32, u32, String)> {
    host.commands()
        .iter()
        .filter_map(|command| match command {
            Command::SetText {
                pos, length, text, ..
            } => Some((*pos, *length, text.clone())),
            _ => None,
        })
        .collect()
}

#[test]
fn long_text_is_chunked() {
    init_logger();
    let source = documents::long_text(3000, 'a');
    let host = upload(&source, FakeHost::new());

    let pieces = pieces(&host);
    let offsets: Vec<(u32, u32)> = pieces.iter().map(|(pos, length, _)| (*pos, *length)).collect();
    let size = TEXT_CHUNK_SIZE as u32;
    assert_eq!(offsets, vec![(0, size), (size, size), (2 * size, 3000 - 2 * size)]);

    let (_, story) = host.entity_named("story").expect("text uploaded");
    let buffer = story.subresources["body"];
    assert_eq!(story.texts[&buffer], "a".repeat(3000));
}

#[test]
fn chunks_never_split_a_character() {
    init_logger();
    let source = documents::long_text(1000, 'é');
    let host = upload(&source, FakeHost::new());

    let pieces = pieces(&host);
    assert!(pieces.len() > 1);
    for (_, length, text) in &pieces {
        assert_eq!(*length as usize, text.len());
        assert!(text.len() <= TEXT_CHUNK_SIZE);
    }
    let (_, story) = host.entity_named("story").expect("text uploaded");
    let joined: String = pieces.into_iter().map(|(_, _, text)| text).collect();
    assert_eq!(joined, "é".repeat(1000));
    assert_eq!(story.texts.values().next(), Some(&joined));
}

#[test]
fn chunk_size_comes_from_config() {
    init_logger();
    let config = ClientConfig {
        text_chunk_size: 4,
        ..ClientConfig::default()
    };
    let host = upload_with(&documents::long_text(10, 'z'), FakeHost::new(), config);
    let offsets: Vec<(u32, u32)> = pieces(&host)
        .iter()
        .map(|(pos, length, _)| (*pos, *length))
        .collect();
    assert_eq!(offsets, vec![(0, 4), (4, 4), (8, 2)]);
}

#[test]
fn language_is_sent() {
    init_logger();
    let host = upload(documents::EVERY_KIND, FakeHost::new());
    let (readme, _) = host.entity_named("readme").expect("text uploaded");
    assert!(host.commands().contains(&Command::SetTextLanguage {
        entity: readme,
        language: "en".to_string(),
    }));
}
