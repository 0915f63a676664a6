use log::{debug, warn};

use vml_shared::{BufferId, Command, ElementId, EntityId};

use crate::upload::{
    pending::{Pending, SubresourceKind},
    scan,
    uploader::Uploader,
};

impl<'d> Uploader<'d> {
    pub(crate) fn process_text(&mut self, element: ElementId, entity: EntityId) -> bool {
        let document = self.document;
        match document.name(element) {
            "language" => {
                let language = document.text(element).unwrap_or("");
                debug!("text entity {} is in \"{}\"", entity, language);
                self.send(Command::SetTextLanguage {
                    entity,
                    language: language.to_string(),
                });
                self.traversal.skip_subtree(document, element);
            }
            "buffers" => {
                for buffer in document.children_named(element, "buffer") {
                    let Some(name) = document.attribute(buffer, "name") else {
                        warn!("text buffer without a name in entity {}", entity);
                        continue;
                    };
                    if !self.names.request(name) {
                        warn!("text buffer \"{}\" declared twice in entity {}", name, entity);
                        continue;
                    }
                    self.send(Command::CreateTextBuffer {
                        entity,
                        name: name.to_string(),
                    });
                    self.tracker
                        .begin(Pending::SubresourceCreate(SubresourceKind::Buffer), true);
                }
                self.traversal.advance();
            }
            "buffer" => {
                let name = document.attribute(element, "name").unwrap_or("");
                match self.names.get(name) {
                    Some(buffer) => {
                        if let Some(text) = document.text(element) {
                            self.send_text(entity, buffer, text);
                        }
                    }
                    None => warn!(
                        "unknown text buffer \"{}\" in entity {}, skipping it",
                        name, entity
                    ),
                }
                self.traversal.skip_subtree(document, element);
            }
            _ => return false,
        }
        true
    }

    /// Long texts go out in several commands, each no longer than the
    /// configured chunk size.
    fn send_text(&mut self, entity: EntityId, buffer: BufferId, text: &str) {
        for (pos, chunk) in scan::chunks(text, self.text_chunk_size) {
            let (Ok(pos), Ok(length)) = (u32::try_from(pos), u32::try_from(chunk.len())) else {
                warn!("text of buffer {}.{} is too long, truncating it", entity, buffer);
                return;
            };
            self.send(Command::SetText {
                entity,
                buffer,
                pos,
                length,
                text: chunk.to_string(),
            });
        }
    }
}
