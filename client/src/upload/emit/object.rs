use log::{debug, warn};

use vml_shared::{Command, ElementId, EntityId, MethodParam, MethodParamType, METHOD_PARAMS_MAX};

use crate::upload::{
    pending::{GroupKind, Pending},
    scan,
    uploader::Uploader,
};

impl<'d> Uploader<'d> {
    pub(crate) fn process_object(&mut self, element: ElementId, entity: EntityId) -> bool {
        let document = self.document;
        match document.name(element) {
            "transform" => {
                if let Some(text) = document.eval_single(element, "position") {
                    match scan::array(text) {
                        Some(position) => self.send(Command::ObjectSetPosition { entity, position }),
                        None => warn!("malformed position \"{}\" in object {}", text, entity),
                    }
                }
                if let Some(text) = document.eval_single(element, "rotation") {
                    match scan::array(text) {
                        Some(rotation) => self.send(Command::ObjectSetRotation { entity, rotation }),
                        None => warn!("malformed rotation \"{}\" in object {}", text, entity),
                    }
                }
                if let Some(text) = document.eval_single(element, "scale") {
                    match scan::array(text) {
                        Some(scale) => self.send(Command::ObjectSetScale { entity, scale }),
                        None => warn!("malformed scale \"{}\" in object {}", text, entity),
                    }
                }
                self.traversal.skip_subtree(document, element);
            }
            "light" => {
                let text = document.text(element).unwrap_or("");
                match scan::array(text) {
                    Some(color) => self.send(Command::ObjectSetLight { entity, color }),
                    None => warn!("malformed light color \"{}\" in object {}", text, entity),
                }
                self.traversal.skip_subtree(document, element);
            }
            "links" => {
                self.send_links(element, entity);
                self.traversal.skip_subtree(document, element);
            }
            "methodgroups" => {
                for group in document.children_named(element, "methodgroup") {
                    let Some(name) = document.attribute(group, "name") else {
                        warn!("method group without a name in object {}", entity);
                        continue;
                    };
                    debug!("creating method group \"{}\" in object {}", name, entity);
                    if !self.names.request(name) {
                        warn!("method group \"{}\" declared twice in object {}", name, entity);
                        continue;
                    }
                    self.send(Command::CreateMethodGroup {
                        entity,
                        name: name.to_string(),
                    });
                    self.tracker
                        .begin(Pending::GroupCreate(GroupKind::Method), true);
                }
                self.traversal.advance();
            }
            "methodgroup" => {
                let name = document.attribute(element, "name").unwrap_or("");
                match self.names.get(name) {
                    Some(group) => {
                        for method in document.children_named(element, "method") {
                            if let Some(command) = self.method_command(method, entity, group) {
                                self.send(command);
                            }
                        }
                    }
                    None => warn!(
                        "no id for method group \"{}\" in object {}, skipping its methods",
                        name, entity
                    ),
                }
                self.traversal.skip_subtree(document, element);
            }
            _ => return false,
        }
        true
    }

    fn send_links(&mut self, links: ElementId, entity: EntityId) {
        let document = self.document;
        let mut link: u16 = 0;
        for element in document.children_named(links, "link") {
            let Some(reference) = document.attribute(element, "node") else {
                warn!("link without a node attribute in object {}", entity);
                continue;
            };
            let Some(ordinal) = scan::ordinal(reference, 'n') else {
                warn!("malformed link target \"{}\" in object {}", reference, entity);
                continue;
            };
            let Some(target_entity) = self.entity_ids.get(ordinal) else {
                warn!(
                    "link to undeclared entity n{} in object {}, skipping it",
                    ordinal, entity
                );
                continue;
            };
            let target = document
                .attribute(element, "target")
                .and_then(scan::number)
                .unwrap_or(0);
            self.send(Command::ObjectSetLink {
                entity,
                link,
                target_entity,
                label: document.attribute(element, "label").unwrap_or("").to_string(),
                target,
            });
            link += 1;
        }
    }

    /// A method is only created when every one of its parameters is valid.
    fn method_command(&self, method: ElementId, entity: EntityId, group: u16) -> Option<Command> {
        let document = self.document;
        let name = document.attribute(method, "name").unwrap_or("");
        let mut params = Vec::new();
        for param in document.children_named(method, "param") {
            let param_name = document.attribute(param, "name");
            let param_type = document
                .attribute(param, "type")
                .and_then(MethodParamType::from_name);
            match (param_name, param_type) {
                (Some(param_name), Some(param_type)) => params.push(MethodParam {
                    name: param_name.to_string(),
                    param_type,
                }),
                _ => {
                    warn!(
                        "invalid parameter in method \"{}\" of object {}, skipping the method",
                        name, entity
                    );
                    return None;
                }
            }
        }
        if params.len() > METHOD_PARAMS_MAX {
            warn!("method \"{}\" has too many parameters, skipping it", name);
            return None;
        }
        debug!(
            "creating method {}.{} \"{}\" with {} parameters",
            entity,
            group,
            name,
            params.len()
        );
        Some(Command::CreateMethod {
            entity,
            group,
            name: name.to_string(),
            params,
        })
    }
}
