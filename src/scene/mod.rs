//! Presentation contract: placed objects, camera and asset loading
//!
//! The simulation never touches this directly; `Game` copies transforms into
//! the objects it owns handles to, and a `Renderer` draws whatever is here.

pub mod assets;
pub mod chunk;

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

pub use assets::{Mesh, MeshLibrary, Placement, load_placements, read_placements};

/// Position, rotation and scale of an object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Object-to-world matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Index of an object in a `Scene`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(usize);

/// A mesh instance placed in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub mesh: Mesh,
    pub transform: Transform,
}

/// Perspective camera with an infinite far plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub transform: Transform,
    /// Vertical field of view (radians)
    pub fovy: f32,
    pub aspect: f32,
    pub near: f32,
}

impl Camera {
    pub fn new(fovy: f32, aspect: f32, near: f32) -> Self {
        Self {
            transform: Transform::default(),
            fovy,
            aspect,
            near,
        }
    }

    /// World-to-camera matrix (ignores transform scale)
    pub fn view(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.transform.rotation, self.transform.position).inverse()
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_infinite_rh(self.fovy, self.aspect, self.near)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

/// Everything the renderer draws this frame
#[derive(Debug, Clone)]
pub struct Scene {
    meshes: MeshLibrary,
    objects: Vec<SceneObject>,
    pub camera: Camera,
}

impl Scene {
    pub fn new(meshes: MeshLibrary, camera: Camera) -> Self {
        Self {
            meshes,
            objects: Vec::new(),
            camera,
        }
    }

    /// Instantiate a named mesh from the library
    pub fn add_object(
        &mut self,
        mesh_name: &str,
        position: Vec3,
        rotation: Quat,
        scale: Vec3,
    ) -> anyhow::Result<ObjectHandle> {
        let mesh = self.meshes.get(mesh_name)?;
        self.objects.push(SceneObject {
            name: mesh_name.to_string(),
            mesh,
            transform: Transform {
                position,
                rotation,
                scale,
            },
        });
        Ok(ObjectHandle(self.objects.len() - 1))
    }

    /// Instantiate every placement from a scene blob
    pub fn add_placements(&mut self, placements: &[Placement]) -> anyhow::Result<()> {
        for p in placements {
            let t = p.transform;
            self.add_object(&p.mesh, t.position, t.rotation, t.scale)?;
        }
        Ok(())
    }

    /// Swap the mesh an existing object draws
    pub fn set_mesh(&mut self, handle: ObjectHandle, mesh_name: &str) -> anyhow::Result<()> {
        let mesh = self.meshes.get(mesh_name)?;
        let obj = &mut self.objects[handle.0];
        obj.name = mesh_name.to_string();
        obj.mesh = mesh;
        Ok(())
    }

    pub fn object(&self, handle: ObjectHandle) -> &SceneObject {
        &self.objects[handle.0]
    }

    /// Mutable transform of an object this scene handed out
    pub fn transform_mut(&mut self, handle: ObjectHandle) -> &mut Transform {
        &mut self.objects[handle.0].transform
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn meshes(&self) -> &MeshLibrary {
        &self.meshes
    }
}
