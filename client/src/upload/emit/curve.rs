use std::str::FromStr;

use log::{debug, warn};

use vml_shared::{Command, CurveId, CurveKey, Document, ElementId, EntityId, CURVE_DIMENSIONS_MAX};

use crate::upload::{
    pending::{Pending, SubresourceKind},
    scan,
    uploader::Uploader,
};

const CURVE_PREFIX: &str = "curve-";

impl<'d> Uploader<'d> {
    pub(crate) fn process_curve(&mut self, element: ElementId, entity: EntityId) -> bool {
        let document = self.document;
        let name = document.name(element);
        if name == "curves" {
            for curve in document.children_prefixed(element, CURVE_PREFIX) {
                let Some(curve_name) = document.attribute(curve, "name") else {
                    warn!("curve without a name in entity {}", entity);
                    continue;
                };
                let Some(dimensions) = curve_dimensions(document.name(curve)) else {
                    warn!(
                        "curve \"{}\" in entity {} has an unsupported dimension count",
                        curve_name, entity
                    );
                    continue;
                };
                if !self.names.request(curve_name) {
                    warn!("curve \"{}\" declared twice in entity {}", curve_name, entity);
                    continue;
                }
                self.send(Command::CreateCurve {
                    entity,
                    name: curve_name.to_string(),
                    dimensions,
                });
                self.tracker
                    .begin(Pending::SubresourceCreate(SubresourceKind::Curve), true);
            }
            self.traversal.advance();
        } else if name.starts_with(CURVE_PREFIX) {
            let curve_name = document.attribute(element, "name").unwrap_or("");
            match (self.names.get(curve_name), curve_dimensions(name)) {
                (Some(curve), Some(dimensions)) => {
                    self.send_keys(element, entity, curve, dimensions)
                }
                _ => warn!(
                    "unknown curve \"{}\" in entity {}, skipping its keys",
                    curve_name, entity
                ),
            }
            self.traversal.skip_subtree(document, element);
        } else {
            return false;
        }
        true
    }

    fn send_keys(&mut self, element: ElementId, entity: EntityId, curve: CurveId, dimensions: u8) {
        let document = self.document;
        let mut key_id: u32 = 0;
        for key in document.children_named(element, "key") {
            let pos = document
                .attribute(key, "pos")
                .and_then(scan::number)
                .unwrap_or(0.0);
            match read_key(document, key, usize::from(dimensions)) {
                Some(values) => {
                    debug!("key {} of curve {}.{} at {}", key_id, entity, curve, pos);
                    self.send(Command::SetCurveKey {
                        entity,
                        curve,
                        key: CurveKey { key: key_id, pos, ..values },
                    });
                    key_id += 1;
                }
                None => warn!(
                    "malformed key at {} in curve {}.{}, expected {} values per child",
                    pos, entity, curve, dimensions
                ),
            }
        }
    }
}

/// Dimension count encoded in a `curve-<N>d` element name.
fn curve_dimensions(name: &str) -> Option<u8> {
    let dimensions = scan::leading_digits(name.strip_prefix(CURVE_PREFIX)?)?;
    u8::try_from(dimensions)
        .ok()
        .filter(|dimensions| (1..=CURVE_DIMENSIONS_MAX).contains(dimensions))
}

/// Every child must carry exactly one value per dimension.
fn read_key(document: &Document, key: ElementId, dimensions: usize) -> Option<CurveKey> {
    fn values<T: FromStr>(
        document: &Document,
        key: ElementId,
        name: &str,
        dimensions: usize,
    ) -> Option<Vec<T>> {
        scan::exactly(document.eval_single(key, name)?, dimensions)
    }

    Some(CurveKey {
        key: 0,
        pos: 0.0,
        value: values(document, key, "value", dimensions)?,
        pre_value: values(document, key, "pre-value", dimensions)?,
        pre_pos: values(document, key, "pre-pos", dimensions)?,
        post_value: values(document, key, "post-value", dimensions)?,
        post_pos: values(document, key, "post-pos", dimensions)?,
    })
}
