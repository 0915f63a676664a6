use log::{debug, trace, warn};

use vml_shared::{
    BoneId, Command, ElementId, EntityId, GeometryLayerType, LayerId, PolygonValue, VertexValue,
};

use crate::upload::{
    pending::{Pending, SubresourceKind},
    scan,
    uploader::Uploader,
};

const LAYER_PREFIX: &str = "layer-";

impl<'d> Uploader<'d> {
    pub(crate) fn process_geometry(&mut self, element: ElementId, entity: EntityId) -> bool {
        let document = self.document;
        let name = document.name(element);
        match name {
            "layers" => {
                for layer in document.children_prefixed(element, LAYER_PREFIX) {
                    let Some(layer_name) = document.attribute(layer, "name") else {
                        warn!("geometry layer without a name in entity {}", entity);
                        continue;
                    };
                    let type_name = &document.name(layer)[LAYER_PREFIX.len()..];
                    let Some(layer_type) = GeometryLayerType::from_name(type_name) else {
                        warn!("unknown geometry layer type \"{}\" in entity {}", type_name, entity);
                        continue;
                    };
                    // the host's default layers are already known by now
                    if !self.names.request(layer_name) {
                        trace!("geometry layer \"{}\" already exists", layer_name);
                        continue;
                    }
                    self.send(Command::CreateGeometryLayer {
                        entity,
                        name: layer_name.to_string(),
                        layer_type,
                    });
                    self.tracker
                        .begin(Pending::SubresourceCreate(SubresourceKind::Layer), true);
                }
                self.traversal.advance();
            }
            "vertexcrease" | "edgecrease" => {
                let layer = document.attribute(element, "layer").unwrap_or("").to_string();
                let default = document
                    .attribute(element, "default")
                    .and_then(scan::number)
                    .unwrap_or(u32::MAX);
                debug!("{} of entity {} set to \"{}\" ({})", name, entity, layer, default);
                self.send(if name == "vertexcrease" {
                    Command::SetVertexCrease {
                        entity,
                        layer,
                        default,
                    }
                } else {
                    Command::SetEdgeCrease {
                        entity,
                        layer,
                        default,
                    }
                });
                self.traversal.skip_subtree(document, element);
            }
            "bones" => {
                self.send_bones(element, entity);
                self.traversal.skip_subtree(document, element);
            }
            _ if name.starts_with(LAYER_PREFIX) => {
                let layer_name = document.attribute(element, "name").unwrap_or("");
                let type_name = &name[LAYER_PREFIX.len()..];
                match (
                    self.names.get(layer_name),
                    GeometryLayerType::from_name(type_name),
                ) {
                    (Some(layer), Some(layer_type)) => {
                        self.send_layer_contents(element, entity, layer, layer_type)
                    }
                    (None, _) => warn!(
                        "unknown geometry layer \"{}\" in entity {}, skipping it",
                        layer_name, entity
                    ),
                    (_, None) => warn!(
                        "unknown geometry layer type \"{}\" in entity {}, skipping it",
                        type_name, entity
                    ),
                }
                self.traversal.skip_subtree(document, element);
            }
            _ => return false,
        }
        true
    }

    /// Vertices carry their own index; polygons are numbered in order of the
    /// ones that parse.
    fn send_layer_contents(
        &mut self,
        element: ElementId,
        entity: EntityId,
        layer: LayerId,
        layer_type: GeometryLayerType,
    ) {
        let document = self.document;
        let item_name = if layer_type.is_vertex() { "v" } else { "p" };
        let mut index: u32 = 0;
        for item in document.children_named(element, item_name) {
            let Some(text) = document.text(item) else {
                continue;
            };
            let command = if layer_type.is_vertex() {
                vertex_value(layer_type, text).map(|(index, value)| Command::SetVertex {
                    entity,
                    layer,
                    index,
                    value,
                })
            } else {
                polygon_value(layer_type, text).map(|value| Command::SetPolygon {
                    entity,
                    layer,
                    index,
                    value,
                })
            };
            match command {
                Some(command) => {
                    self.send(command);
                    index += 1;
                }
                None => warn!(
                    "could not parse {} \"{}\" in layer {} of entity {}",
                    item_name, text, layer, entity
                ),
            }
        }
    }

    /// Bones use their position in the list as id, so no acknowledgment is
    /// needed.
    fn send_bones(&mut self, bones: ElementId, entity: EntityId) {
        let document = self.document;
        for (index, bone) in document.children_named(bones, "bone").enumerate() {
            let Ok(id) = BoneId::try_from(index) else {
                warn!("too many bones in entity {}, ignoring the rest", entity);
                break;
            };
            let child = |name| document.eval_single(bone, name).unwrap_or("").to_string();
            let parent = document
                .eval_single(bone, "parent")
                .and_then(|text| scan::ordinal(text, 'b'))
                .and_then(|ordinal| BoneId::try_from(ordinal).ok());
            self.send(Command::CreateBone {
                entity,
                bone: id,
                weight: child("weight"),
                reference: child("reference"),
                parent,
                position_label: child("pos-label"),
                rotation_label: child("rot-label"),
            });
        }
    }
}

fn vertex_value(layer_type: GeometryLayerType, text: &str) -> Option<(u32, VertexValue)> {
    match layer_type {
        GeometryLayerType::VertexXyz => {
            scan::indexed::<f64, 3>(text).map(|(index, xyz)| (index, VertexValue::Xyz(xyz)))
        }
        GeometryLayerType::VertexUint32 => {
            scan::indexed::<u32, 1>(text).map(|(index, [value])| (index, VertexValue::Uint32(value)))
        }
        GeometryLayerType::VertexReal => {
            scan::indexed::<f64, 1>(text).map(|(index, [value])| (index, VertexValue::Real(value)))
        }
        _ => None,
    }
}

fn polygon_value(layer_type: GeometryLayerType, text: &str) -> Option<PolygonValue> {
    match layer_type {
        GeometryLayerType::PolygonCornerUint32 => {
            // the fourth corner is optional; triangles leave it unset
            let corners: Vec<u32> = scan::leading(text, 4);
            if corners.len() < 3 {
                return None;
            }
            Some(PolygonValue::CornerUint32([
                corners[0],
                corners[1],
                corners[2],
                corners.get(3).copied().unwrap_or(u32::MAX),
            ]))
        }
        GeometryLayerType::PolygonCornerReal => scan::array(text).map(PolygonValue::CornerReal),
        GeometryLayerType::PolygonFaceUint8 => scan::number(text).map(PolygonValue::FaceUint8),
        GeometryLayerType::PolygonFaceUint32 => scan::number(text).map(PolygonValue::FaceUint32),
        GeometryLayerType::PolygonFaceReal => scan::number(text).map(PolygonValue::FaceReal),
        _ => None,
    }
}
