use log::{debug, trace, warn};

use vml_shared::{AudioBlockType, AudioSamples, BufferId, Command, ElementId, EntityId};

use crate::upload::{
    pending::{Pending, SubresourceKind},
    scan,
    uploader::Uploader,
};

const BUFFER_PREFIX: &str = "buffer-";

impl<'d> Uploader<'d> {
    pub(crate) fn process_audio(&mut self, element: ElementId, entity: EntityId) -> bool {
        let document = self.document;
        let name = document.name(element);
        if name == "buffers" {
            for buffer in document.children_prefixed(element, BUFFER_PREFIX) {
                let Some(buffer_name) = document.attribute(buffer, "name") else {
                    warn!("audio buffer without a name in entity {}", entity);
                    continue;
                };
                let type_name = &document.name(buffer)[BUFFER_PREFIX.len()..];
                let Some(block_type) = AudioBlockType::from_name(type_name) else {
                    warn!(
                        "audio buffer \"{}\" has unknown sample type \"{}\"",
                        buffer_name, type_name
                    );
                    continue;
                };
                let Some(frequency) = document
                    .attribute(buffer, "frequency")
                    .and_then(scan::number::<f64>)
                else {
                    warn!(
                        "audio buffer \"{}\" has no usable frequency, skipping it",
                        buffer_name
                    );
                    continue;
                };
                debug!(
                    "audio buffer \"{}\" of {} samples at {} Hz",
                    buffer_name, type_name, frequency
                );
                if !self.names.request(buffer_name) {
                    warn!("audio buffer \"{}\" declared twice in entity {}", buffer_name, entity);
                    continue;
                }
                self.send(Command::CreateAudioBuffer {
                    entity,
                    name: buffer_name.to_string(),
                    block_type,
                    frequency,
                });
                self.tracker
                    .begin(Pending::SubresourceCreate(SubresourceKind::Buffer), true);
            }
            self.traversal.advance();
        } else if name.starts_with(BUFFER_PREFIX) {
            let buffer_name = document.attribute(element, "name").unwrap_or("");
            let type_name = &name[BUFFER_PREFIX.len()..];
            match (
                self.names.get(buffer_name),
                AudioBlockType::from_name(type_name),
            ) {
                (Some(buffer), Some(block_type)) => {
                    self.send_blocks(element, entity, buffer, block_type)
                }
                _ => warn!(
                    "unknown audio buffer \"{}\" in entity {}, skipping it",
                    buffer_name, entity
                ),
            }
            self.traversal.skip_subtree(document, element);
        } else {
            return false;
        }
        true
    }

    fn send_blocks(
        &mut self,
        element: ElementId,
        entity: EntityId,
        buffer: BufferId,
        block_type: AudioBlockType,
    ) {
        let document = self.document;
        let blocks = document
            .children_named(element, "blocks")
            .flat_map(|blocks| document.children_named(blocks, "block"));
        for block in blocks {
            let Some(index) = document
                .attribute(block, "index")
                .and_then(scan::number::<u32>)
            else {
                warn!("audio block without an index in buffer {}.{}", entity, buffer);
                continue;
            };
            match block_samples(block_type, document.text(block).unwrap_or("")) {
                Some(samples) => {
                    trace!("audio block {}.{}.{}", entity, buffer, index);
                    self.send(Command::SetAudioBlock {
                        entity,
                        buffer,
                        index,
                        samples,
                    });
                }
                None => warn!(
                    "audio block {} of buffer {}.{} needs {} {} samples, skipping it",
                    index,
                    entity,
                    buffer,
                    block_type.block_size(),
                    block_type.name()
                ),
            }
        }
    }
}

/// One full block of samples. 24-bit samples travel widened to 32 bits but
/// must fit in 24.
fn block_samples(block_type: AudioBlockType, text: &str) -> Option<AudioSamples> {
    let size = block_type.block_size();
    match block_type {
        AudioBlockType::Int8 => scan::exactly(text, size).map(AudioSamples::Int8),
        AudioBlockType::Int16 => scan::exactly(text, size).map(AudioSamples::Int16),
        AudioBlockType::Int24 => scan::exactly::<i32>(text, size)
            .filter(|samples| {
                samples
                    .iter()
                    .all(|sample| (-(1 << 23)..(1 << 23)).contains(sample))
            })
            .map(AudioSamples::Int24),
        AudioBlockType::Int32 => scan::exactly(text, size).map(AudioSamples::Int32),
        AudioBlockType::Real32 => scan::exactly(text, size).map(AudioSamples::Real32),
        AudioBlockType::Real64 => scan::exactly(text, size).map(AudioSamples::Real64),
    }
}
