use log::{debug, warn};

use vml_shared::{
    BitmapLayerType, Command, ElementId, EntityId, LayerId, TilePixels, TILE_PIXELS,
};

use crate::upload::{
    pending::{Pending, SubresourceKind},
    scan,
    uploader::Uploader,
};

const LAYER_PREFIX: &str = "layer-";

impl<'d> Uploader<'d> {
    pub(crate) fn process_bitmap(&mut self, element: ElementId, entity: EntityId) -> bool {
        let document = self.document;
        let name = document.name(element);
        match name {
            "dimensions" => {
                let text = document.text(element).unwrap_or("");
                match scan::array::<u16, 3>(text) {
                    Some([width, height, depth]) => {
                        debug!("bitmap {} is {}x{}x{}", entity, width, height, depth);
                        self.send(Command::SetBitmapDimensions {
                            entity,
                            width,
                            height,
                            depth,
                        });
                    }
                    None => warn!("malformed dimensions \"{}\" in bitmap {}", text, entity),
                }
                self.traversal.skip_subtree(document, element);
            }
            "layers" => {
                for layer in document.children_prefixed(element, LAYER_PREFIX) {
                    let Some(layer_name) = document.attribute(layer, "name") else {
                        warn!("bitmap layer without a name in entity {}", entity);
                        continue;
                    };
                    let type_name = &document.name(layer)[LAYER_PREFIX.len()..];
                    let Some(layer_type) = BitmapLayerType::from_name(type_name) else {
                        warn!("unknown bitmap layer type \"{}\" in entity {}", type_name, entity);
                        continue;
                    };
                    if !self.names.request(layer_name) {
                        warn!("bitmap layer \"{}\" declared twice in entity {}", layer_name, entity);
                        continue;
                    }
                    self.send(Command::CreateBitmapLayer {
                        entity,
                        name: layer_name.to_string(),
                        layer_type,
                    });
                    self.tracker
                        .begin(Pending::SubresourceCreate(SubresourceKind::Layer), true);
                }
                self.traversal.advance();
            }
            _ if name.starts_with(LAYER_PREFIX) => {
                let layer_name = document.attribute(element, "name").unwrap_or("");
                let type_name = &name[LAYER_PREFIX.len()..];
                match (
                    self.names.get(layer_name),
                    BitmapLayerType::from_name(type_name),
                ) {
                    (_, Some(BitmapLayerType::Uint1)) => warn!(
                        "cannot read 1-bit pixel data of layer \"{}\" in bitmap {}",
                        layer_name, entity
                    ),
                    (Some(layer), Some(layer_type)) => {
                        self.send_tiles(element, entity, layer, layer_type)
                    }
                    (None, _) => warn!(
                        "unknown bitmap layer \"{}\" in entity {}, skipping it",
                        layer_name, entity
                    ),
                    (_, None) => warn!(
                        "unknown bitmap layer type \"{}\" in entity {}, skipping it",
                        type_name, entity
                    ),
                }
                self.traversal.skip_subtree(document, element);
            }
            _ => return false,
        }
        true
    }

    fn send_tiles(
        &mut self,
        element: ElementId,
        entity: EntityId,
        layer: LayerId,
        layer_type: BitmapLayerType,
    ) {
        let document = self.document;
        let tiles = document
            .children_named(element, "tiles")
            .flat_map(|tiles| document.children_named(tiles, "tile"));
        for tile in tiles {
            let coordinate = |name| document.attribute(tile, name).and_then(scan::number::<u16>);
            let (Some(tile_x), Some(tile_y), Some(z), Some(text)) = (
                coordinate("tile_x"),
                coordinate("tile_y"),
                coordinate("tile_z"),
                document.text(tile),
            ) else {
                warn!("incomplete tile in layer {} of bitmap {}", layer, entity);
                continue;
            };
            match tile_pixels(layer_type, text) {
                Some(pixels) => self.send(Command::SetTile {
                    entity,
                    layer,
                    tile_x,
                    tile_y,
                    z,
                    pixels,
                }),
                None => warn!(
                    "malformed pixels in tile ({},{},{}) of bitmap {}, expected {} values",
                    tile_x, tile_y, z, entity, TILE_PIXELS
                ),
            }
        }
    }
}

/// Pixels of one tile, row-major.
fn tile_pixels(layer_type: BitmapLayerType, text: &str) -> Option<TilePixels> {
    match layer_type {
        BitmapLayerType::Uint1 => None,
        BitmapLayerType::Uint8 => scan::exactly(text, TILE_PIXELS).map(TilePixels::Uint8),
        BitmapLayerType::Uint16 => scan::exactly(text, TILE_PIXELS).map(TilePixels::Uint16),
        BitmapLayerType::Real32 => scan::exactly(text, TILE_PIXELS).map(TilePixels::Real32),
        BitmapLayerType::Real64 => scan::exactly(text, TILE_PIXELS).map(TilePixels::Real64),
    }
}
