use log::warn;

use vml_shared::{Command, ElementId, EntityId, TagType, TagValue, TAG_BLOB_MAX};

use crate::upload::{
    pending::{GroupKind, Pending},
    scan,
    uploader::Uploader,
};

impl<'d> Uploader<'d> {
    /// Elements every entity kind may carry: tag groups and their tags.
    pub(crate) fn process_common(&mut self, element: ElementId, entity: EntityId) -> bool {
        let document = self.document;
        match document.name(element) {
            "tags" => {
                for group in document.children_named(element, "taggroup") {
                    let Some(name) = document.attribute(group, "name") else {
                        warn!("tag group without a name in entity {}", entity);
                        continue;
                    };
                    if !self.tag_groups.request(name) {
                        warn!("tag group \"{}\" declared twice in entity {}", name, entity);
                        continue;
                    }
                    self.send(Command::CreateTagGroup {
                        entity,
                        name: name.to_string(),
                    });
                    self.tracker.begin(Pending::GroupCreate(GroupKind::Tag), true);
                }
                self.traversal.advance();
            }
            "taggroup" => {
                let name = document.attribute(element, "name").unwrap_or("");
                match self.tag_groups.get(name) {
                    Some(group) => {
                        for tag in document.children_prefixed(element, "tag-") {
                            if let Some(command) = self.tag_command(tag, entity, group) {
                                self.send(command);
                            }
                        }
                    }
                    None => warn!(
                        "unknown tag group \"{}\" in entity {}, skipping its tags",
                        name, entity
                    ),
                }
                self.traversal.skip_subtree(document, element);
            }
            "tag" => {
                warn!("tag outside of a tag group in entity {}, skipping it", entity);
                self.traversal.skip_subtree(document, element);
            }
            _ => return false,
        }
        true
    }

    fn tag_command(&self, tag: ElementId, entity: EntityId, group: u16) -> Option<Command> {
        let document = self.document;
        let type_name = &document.name(tag)["tag-".len()..];
        let Some(name) = document.attribute(tag, "name") else {
            warn!("{} tag without a name in entity {}", type_name, entity);
            return None;
        };
        let Some(tag_type) = TagType::from_name(type_name) else {
            warn!("ignoring tag \"{}\" of unsupported type \"{}\"", name, type_name);
            return None;
        };
        let text = document.text(tag).unwrap_or("");

        let value = match tag_type {
            TagType::Boolean => Some(TagValue::Boolean(text == "true" || text == "1")),
            TagType::Uint32 => Some(TagValue::Uint32(scan::number(text).unwrap_or(0))),
            TagType::Real64 => scan::number(text).map(TagValue::Real64),
            TagType::String => Some(TagValue::String(text.to_string())),
            TagType::Real64Vec3 => scan::array(text).map(TagValue::Real64Vec3),
            TagType::Link => scan::ordinal(text, 'n')
                .and_then(|ordinal| self.entity_ids.get(ordinal))
                .map(TagValue::Link),
            TagType::Animation => self.entity_ref(tag, "curve").map(|curve| {
                let bound = |child| {
                    document
                        .eval_single(tag, child)
                        .and_then(scan::number)
                        .unwrap_or(0)
                };
                TagValue::Animation {
                    curve,
                    start: bound("start"),
                    end: bound("end"),
                }
            }),
            TagType::Blob => Some(TagValue::Blob(scan::leading(text, TAG_BLOB_MAX))),
        };

        match value {
            Some(value) => Some(Command::CreateTag {
                entity,
                group,
                name: name.to_string(),
                value,
            }),
            None => {
                warn!(
                    "could not read value \"{}\" of {} tag \"{}\", skipping it",
                    text, type_name, name
                );
                None
            }
        }
    }
}
