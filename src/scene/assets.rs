//! Mesh library and static scene loading
//!
//! Mesh blob: `pnc.` vertices, `str0` names, `idx0` name/vertex ranges.
//! Scene blob: `str0` names, `scn0` placed instances.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, bail};
use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3};

use super::Transform;
use super::chunk::read_chunk;
use crate::renderer::vertex::MeshVertex;

/// A contiguous run of vertices in the mesh library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mesh {
    pub start: u32,
    pub count: u32,
}

/// `idx0` record
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct IndexEntry {
    name_begin: u32,
    name_end: u32,
    vertex_begin: u32,
    vertex_end: u32,
}

/// `scn0` record; rotation is stored x, y, z, w
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SceneEntry {
    pub name_begin: u32,
    pub name_end: u32,
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

const _: () = assert!(std::mem::size_of::<SceneEntry>() == 48);

/// Resolve `[begin, end)` in the string table
fn name_in(strings: &[u8], begin: u32, end: u32) -> anyhow::Result<String> {
    let (begin, end) = (begin as usize, end as usize);
    if !(begin <= end && end <= strings.len()) {
        bail!(
            "index entry has out-of-range name begin/end ({}..{} of {})",
            begin,
            end,
            strings.len()
        );
    }
    String::from_utf8(strings[begin..end].to_vec()).context("mesh name is not UTF-8")
}

fn open(path: &Path) -> anyhow::Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Named meshes plus the shared vertex buffer they index into
#[derive(Debug, Clone, Default)]
pub struct MeshLibrary {
    pub vertices: Vec<MeshVertex>,
    meshes: HashMap<String, Mesh>,
}

impl MeshLibrary {
    /// Build a library from already-resolved ranges (no vertex data)
    pub fn from_meshes<I, S>(meshes: I) -> Self
    where
        I: IntoIterator<Item = (S, Mesh)>,
        S: Into<String>,
    {
        Self {
            vertices: Vec::new(),
            meshes: meshes.into_iter().map(|(n, m)| (n.into(), m)).collect(),
        }
    }

    /// Load a mesh blob from disk
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let library = Self::read(&mut open(path)?)
            .with_context(|| format!("failed to load meshes from {}", path.display()))?;
        log::info!("Loaded {} meshes from {}", library.len(), path.display());
        Ok(library)
    }

    /// Parse a mesh blob
    pub fn read<R: Read>(reader: &mut R) -> anyhow::Result<Self> {
        let vertices: Vec<MeshVertex> = read_chunk(reader, b"pnc.")?;
        let strings: Vec<u8> = read_chunk(reader, b"str0")?;
        let index: Vec<IndexEntry> = read_chunk(reader, b"idx0")?;

        let mut meshes = HashMap::with_capacity(index.len());
        for entry in &index {
            let name = name_in(&strings, entry.name_begin, entry.name_end)?;
            if !(entry.vertex_begin <= entry.vertex_end
                && entry.vertex_end as usize <= vertices.len())
            {
                bail!(
                    "mesh '{}' has out-of-range vertex range {}..{} of {}",
                    name,
                    entry.vertex_begin,
                    entry.vertex_end,
                    vertices.len()
                );
            }
            let mesh = Mesh {
                start: entry.vertex_begin,
                count: entry.vertex_end - entry.vertex_begin,
            };
            if meshes.insert(name.clone(), mesh).is_some() {
                log::warn!("Mesh '{}' defined twice, keeping the last", name);
            }
        }

        Ok(Self { vertices, meshes })
    }

    pub fn get(&self, name: &str) -> anyhow::Result<Mesh> {
        self.meshes
            .get(name)
            .copied()
            .with_context(|| format!("no mesh named '{}'", name))
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

/// An object placement read from a scene blob
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub mesh: String,
    pub transform: Transform,
}

/// Load placements from a scene blob on disk
pub fn load_placements(path: impl AsRef<Path>) -> anyhow::Result<Vec<Placement>> {
    let path = path.as_ref();
    read_placements(&mut open(path)?)
        .with_context(|| format!("failed to load scene from {}", path.display()))
}

/// Parse a scene blob
pub fn read_placements<R: Read>(reader: &mut R) -> anyhow::Result<Vec<Placement>> {
    let strings: Vec<u8> = read_chunk(reader, b"str0")?;
    let entries: Vec<SceneEntry> = read_chunk(reader, b"scn0")?;

    entries
        .iter()
        .map(|entry| {
            Ok(Placement {
                mesh: name_in(&strings, entry.name_begin, entry.name_end)?,
                transform: Transform {
                    position: Vec3::from_array(entry.position),
                    rotation: Quat::from_array(entry.rotation),
                    scale: Vec3::from_array(entry.scale),
                },
            })
        })
        .collect()
}
