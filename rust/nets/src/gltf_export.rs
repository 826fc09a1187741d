// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! glTF 2.0 export of the assembled model
//!
//! One node and mesh per flattened panel, positioned in world space, with
//! one material per media. All geometry shares a single buffer embedded as a
//! base64 data URI.

use crate::error::{Error, Result};
use base64::Engine;
use gltf::json;
use json::validation::Checked::Valid;
use json::validation::USize64;
use papercraft_core::{flatten, PanelGroup};
use rustc_hash::{FxHashMap, FxHasher};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const MESH_FILE_NAME: &str = "mesh.gltf";

const DATA_URI_PREFIX: &str = "data:application/octet-stream;base64,";

/// Buffer target and element type of one accessor
struct ElementLayout {
    target: json::buffer::Target,
    component_type: json::accessor::ComponentType,
    kind: json::accessor::Type,
}

const VEC3_FLOAT: ElementLayout = ElementLayout {
    target: json::buffer::Target::ArrayBuffer,
    component_type: json::accessor::ComponentType::F32,
    kind: json::accessor::Type::Vec3,
};

const SCALAR_INDEX: ElementLayout = ElementLayout {
    target: json::buffer::Target::ElementArrayBuffer,
    component_type: json::accessor::ComponentType::U32,
    kind: json::accessor::Type::Scalar,
};

/// Stable colour for a media name
fn media_color(name: &str) -> [f32; 4] {
    let mut hasher = FxHasher::default();
    name.hash(&mut hasher);
    let h = hasher.finish();
    // Keep colours light so panel edges stay visible
    let channel = |shift: u32| 0.5 + ((h >> shift) & 0xff) as f32 / 510.0;
    [channel(0), channel(8), channel(16), 1.0]
}

fn media_material(name: &str) -> json::Material {
    json::Material {
        name: Some(name.to_string()),
        double_sided: true,
        pbr_metallic_roughness: json::material::PbrMetallicRoughness {
            base_color_factor: json::material::PbrBaseColorFactor(media_color(name)),
            metallic_factor: json::material::StrengthFactor(0.0),
            roughness_factor: json::material::StrengthFactor(0.9),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Build the glTF document for every panel in the tree
pub fn gltf_document(group: &PanelGroup) -> Result<json::Root> {
    let mut root = json::Root {
        asset: json::Asset {
            version: "2.0".to_string(),
            generator: Some(concat!("papercraft-nets ", env!("CARGO_PKG_VERSION")).to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    // Every view points at buffer 0, pushed once its length is known
    let buffer = json::Index::new(0);
    let mut bytes: Vec<u8> = Vec::new();
    let mut nodes = Vec::new();
    let mut material_index: FxHashMap<String, json::Index<json::Material>> =
        FxHashMap::default();

    for entry in flatten(group) {
        let mesh = entry.world_shape.tessellate()?;
        if mesh.is_empty() {
            debug!(panel = %entry.panel.name, "skipping empty panel mesh");
            continue;
        }

        let media_name = &entry.panel.media.sheet().name;
        let material = match material_index.get(media_name) {
            Some(index) => *index,
            None => {
                let index = root.push(media_material(media_name));
                material_index.insert(media_name.clone(), index);
                index
            }
        };

        let (min, max) = mesh.bounds();
        let position = push_accessor(
            &mut root,
            (buffer, &mut bytes),
            f32_bytes(&mesh.positions),
            &VEC3_FLOAT,
            mesh.vertex_count(),
            Some((vec![min.x, min.y, min.z], vec![max.x, max.y, max.z])),
        );
        let normal = push_accessor(
            &mut root,
            (buffer, &mut bytes),
            f32_bytes(&mesh.normals),
            &VEC3_FLOAT,
            mesh.vertex_count(),
            None,
        );
        let indices = push_accessor(
            &mut root,
            (buffer, &mut bytes),
            mesh.indices.iter().flat_map(|i| i.to_le_bytes()).collect(),
            &SCALAR_INDEX,
            mesh.indices.len(),
            None,
        );

        let attributes = BTreeMap::from([
            (Valid(json::mesh::Semantic::Positions), position),
            (Valid(json::mesh::Semantic::Normals), normal),
        ]);
        let mesh = root.push(json::Mesh {
            extensions: Default::default(),
            extras: Default::default(),
            name: Some(entry.panel.name.clone()),
            primitives: vec![json::mesh::Primitive {
                attributes,
                extensions: Default::default(),
                extras: Default::default(),
                indices: Some(indices),
                material: Some(material),
                mode: Valid(json::mesh::Mode::Triangles),
                targets: None,
            }],
            weights: None,
        });
        nodes.push(root.push(json::Node {
            mesh: Some(mesh),
            name: Some(entry.panel.name),
            ..Default::default()
        }));
    }

    root.push(json::Buffer {
        byte_length: USize64::from(bytes.len()),
        extensions: Default::default(),
        extras: Default::default(),
        name: None,
        uri: Some(format!(
            "{}{}",
            DATA_URI_PREFIX,
            base64::engine::general_purpose::STANDARD.encode(&bytes)
        )),
    });
    let scene = root.push(json::Scene {
        extensions: Default::default(),
        extras: Default::default(),
        name: Some(group.name.clone()),
        nodes,
    });
    root.scene = Some(scene);

    Ok(root)
}

fn f32_bytes(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Append `data` to the shared buffer behind a new view and accessor
fn push_accessor(
    root: &mut json::Root,
    (buffer, bytes): (json::Index<json::Buffer>, &mut Vec<u8>),
    data: Vec<u8>,
    layout: &ElementLayout,
    count: usize,
    bounds: Option<(Vec<f32>, Vec<f32>)>,
) -> json::Index<json::Accessor> {
    let view = root.push(json::buffer::View {
        buffer,
        byte_length: USize64::from(data.len()),
        byte_offset: Some(USize64::from(bytes.len())),
        byte_stride: None,
        extensions: Default::default(),
        extras: Default::default(),
        name: None,
        target: Some(Valid(layout.target)),
    });
    bytes.extend(data);

    let (min, max) = bounds.unzip();
    root.push(json::Accessor {
        buffer_view: Some(view),
        byte_offset: Some(USize64(0)),
        count: USize64::from(count),
        component_type: Valid(json::accessor::GenericComponentType(layout.component_type)),
        extensions: Default::default(),
        extras: Default::default(),
        type_: Valid(layout.kind),
        min: min.map(json::Value::from),
        max: max.map(json::Value::from),
        name: None,
        normalized: false,
        sparse: None,
    })
}

/// Write `{output_dir}/mesh.gltf`
pub fn export_mesh(group: &PanelGroup, output_dir: &Path) -> Result<PathBuf> {
    let root = gltf_document(group)?;

    std::fs::create_dir_all(output_dir).map_err(Error::io(output_dir))?;
    let path = output_dir.join(MESH_FILE_NAME);
    let text = json::serialize::to_string(&root)?;
    std::fs::write(&path, text).map_err(Error::io(&path))?;

    info!(
        group = %group.name,
        meshes = root.meshes.len(),
        path = %path.display(),
        "exported mesh"
    );
    Ok(path)
}
