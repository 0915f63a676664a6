use log::{debug, warn};

use vml_shared::{
    BlendType, Command, ElementId, EntityId, Fragment, FragmentId, FragmentType, LightType,
    NoiseType, RampChannel, RampPoint, RampType, RAMP_POINTS_MAX,
};

use crate::upload::{
    pending::{Pending, SubresourceKind},
    scan,
    uploader::Uploader,
};

const FRAGMENT_PREFIX: &str = "fragment-";

impl<'d> Uploader<'d> {
    /// Fragments are uploaded in two rounds: first every fragment of the
    /// material is created empty so the host assigns ids, then each one is
    /// set again with its references translated through those ids.
    pub(crate) fn process_material(&mut self, element: ElementId, entity: EntityId) -> bool {
        let document = self.document;
        let name = document.name(element);
        if name == "fragments" {
            self.fragments.clear();
            for fragment in document.children_prefixed(element, FRAGMENT_PREFIX) {
                let type_name = &document.name(fragment)[FRAGMENT_PREFIX.len()..];
                let Some(fragment_type) = FragmentType::from_name(type_name) else {
                    warn!("unknown fragment type \"{}\" in material {}", type_name, entity);
                    continue;
                };
                let Some(ordinal) = document
                    .attribute(fragment, "id")
                    .and_then(|id| scan::ordinal(id, 'f'))
                else {
                    warn!("{} fragment without a usable id in material {}", type_name, entity);
                    continue;
                };
                if !self.fragments.reserve(ordinal, fragment_type) {
                    warn!("fragment f{} declared twice in material {}", ordinal, entity);
                    continue;
                }
                self.send(Command::CreateFragment {
                    entity,
                    fragment: None,
                    value: Fragment::cleared(fragment_type),
                });
                self.tracker
                    .begin(Pending::SubresourceCreate(SubresourceKind::Fragment), true);
            }
            self.traversal.advance();
        } else if name.starts_with(FRAGMENT_PREFIX) {
            let ordinal = document
                .attribute(element, "id")
                .and_then(|id| scan::ordinal(id, 'f'));
            match ordinal.and_then(|ordinal| self.fragments.get(ordinal)) {
                Some(fragment) => match self.read_fragment(element) {
                    Some(value) => {
                        debug!(
                            "setting {} fragment {} of material {}",
                            value.fragment_type().name(),
                            fragment,
                            entity
                        );
                        self.send(Command::CreateFragment {
                            entity,
                            fragment: Some(fragment),
                            value,
                        });
                    }
                    None => warn!(
                        "could not read <{}> {:?} in material {}, skipping it",
                        name,
                        document.attribute(element, "id"),
                        entity
                    ),
                },
                None => warn!(
                    "<{}> {:?} in material {} has no host id, skipping it",
                    name,
                    document.attribute(element, "id"),
                    entity
                ),
            }
            self.traversal.skip_subtree(document, element);
        } else {
            return false;
        }
        true
    }

    /// Build the full fragment described by `element`, with every reference
    /// translated to a host id.
    fn read_fragment(&self, element: ElementId) -> Option<Fragment> {
        let document = self.document;
        let fragment_type =
            FragmentType::from_name(&document.name(element)[FRAGMENT_PREFIX.len()..])?;
        let child = |name| document.eval_single(element, name);
        let real = |name| child(name).and_then(scan::number).unwrap_or(0.0);
        let string = |name| child(name).unwrap_or("").to_string();
        let triple = |red, green, blue| [string(red), string(green), string(blue)];
        let link = |name| self.fragment_ref(element, name);

        let fragment = match fragment_type {
            FragmentType::Color => Fragment::Color {
                color: scan::array(child("color")?)?,
            },
            FragmentType::Light => Fragment::Light {
                light_type: self.symbol(element, "type", LightType::from_name)?,
                normal_falloff: real("normal_falloff"),
                brdf: self.entity_ref(element, "brdf"),
                brdf_layers: triple("brdf_r", "brdf_g", "brdf_b"),
            },
            FragmentType::Reflection => Fragment::Reflection {
                normal_falloff: real("normal_falloff"),
            },
            FragmentType::Transparency => Fragment::Transparency {
                normal_falloff: real("normal_falloff"),
                refraction_index: real("refraction_index"),
            },
            FragmentType::Volume => Fragment::Volume {
                diffusion: real("diffusion"),
                color: child("col").and_then(scan::array).unwrap_or([0.0; 3]),
                lighting: link("color"),
            },
            FragmentType::Geometry => Fragment::Geometry {
                layers: triple("layer_r", "layer_g", "layer_b"),
            },
            FragmentType::Texture => Fragment::Texture {
                bitmap: self.entity_ref(element, "bitmap"),
                layers: triple("layer_r", "layer_g", "layer_b"),
                mapping: link("mapping"),
            },
            FragmentType::Noise => Fragment::Noise {
                noise_type: self.symbol(element, "type", NoiseType::from_name)?,
                mapping: link("mapping"),
            },
            FragmentType::Blender => Fragment::Blender {
                blend_type: self.symbol(element, "type", BlendType::from_name)?,
                data_a: link("data_a"),
                data_b: link("data_b"),
                control: link("control"),
            },
            FragmentType::Matrix => Fragment::Matrix {
                matrix: scan::array(child("matrix")?)?,
                data: link("data"),
            },
            FragmentType::Ramp => Fragment::Ramp {
                ramp_type: self.symbol(element, "type", RampType::from_name)?,
                channel: self.symbol(element, "channel", RampChannel::from_name)?,
                mapping: link("mapping"),
                points: self.ramp_points(element)?,
            },
            FragmentType::Animation => Fragment::Animation {
                label: string("label"),
            },
            FragmentType::Alternative => Fragment::Alternative {
                alt_a: link("alt_a"),
                alt_b: link("alt_b"),
            },
            FragmentType::Output => Fragment::Output {
                label: string("label"),
                front: link("front"),
                back: link("back"),
            },
        };
        Some(fragment)
    }

    /// Host id of fragment reference `name` (an `f3` value). A reference to a
    /// fragment that was never created is dropped.
    fn fragment_ref(&self, element: ElementId, name: &str) -> Option<FragmentId> {
        let text = self.document.eval_single(element, name)?;
        let resolved = scan::ordinal(text, 'f').and_then(|ordinal| self.fragments.get(ordinal));
        if resolved.is_none() {
            warn!("unresolved fragment reference \"{}\" in <{}>", text, name);
        }
        resolved
    }

    fn symbol<T>(
        &self,
        element: ElementId,
        name: &str,
        lookup: fn(&str) -> Option<T>,
    ) -> Option<T> {
        let text = self.document.eval_single(element, name);
        let value = text.and_then(lookup);
        if value.is_none() {
            warn!("unknown {} \"{}\" in fragment", name, text.unwrap_or(""));
        }
        value
    }

    fn ramp_points(&self, element: ElementId) -> Option<Vec<RampPoint>> {
        let document = self.document;
        let mut points = Vec::new();
        let elements = document
            .children_named(element, "ramp")
            .flat_map(|ramp| document.children_named(ramp, "ramppoint"));
        for point in elements {
            let Some(text) = document.text(point) else {
                continue;
            };
            let Some(color) = scan::array(text) else {
                warn!("malformed ramp point \"{}\", expected three values", text);
                continue;
            };
            if points.len() == RAMP_POINTS_MAX {
                warn!("ramp has more than {} points, ignoring the rest", RAMP_POINTS_MAX);
                break;
            }
            points.push(RampPoint {
                pos: document
                    .attribute(point, "pos")
                    .and_then(scan::number)
                    .unwrap_or(0.0),
                color,
            });
        }
        (!points.is_empty()).then_some(points)
    }
}
