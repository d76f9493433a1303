//! Render submission
//!
//! A `Renderer` receives the finished scene once per frame. The native build
//! has no GPU surface, so the bundled renderer only builds the draw list.

pub mod vertex;

use glam::{Mat3, Mat4};

use crate::scene::{Mesh, Scene};

/// One object's worth of draw state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub mesh: Mesh,
    /// Model-view-projection
    pub mvp: Mat4,
    /// Inverse-transpose of the model-view, for normals
    pub itmv: Mat3,
}

/// Build the per-object draw list for the scene's current camera
pub fn draw_list(scene: &Scene) -> Vec<DrawCall> {
    let view = scene.camera.view();
    let projection = scene.camera.projection();
    scene
        .objects()
        .iter()
        .map(|obj| {
            let mv = view * obj.transform.matrix();
            DrawCall {
                mesh: obj.mesh,
                mvp: projection * mv,
                itmv: Mat3::from_mat4(mv).inverse().transpose(),
            }
        })
        .collect()
}

/// Consumer of finished frames
pub trait Renderer {
    /// Called once per frame after every transform is final
    fn submit(&mut self, scene: &Scene) -> anyhow::Result<()>;
}

/// Renderer without an output surface
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub last_draws: Vec<DrawCall>,
}

impl Renderer for HeadlessRenderer {
    fn submit(&mut self, scene: &Scene) -> anyhow::Result<()> {
        self.last_draws = draw_list(scene);
        self.frames += 1;
        log::trace!("Frame {}: {} draw calls", self.frames, self.last_draws.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Camera, MeshLibrary};
    use glam::{Quat, Vec3};

    #[test]
    fn test_headless_renderer_builds_draw_list() {
        let meshes = MeshLibrary::from_meshes([("Ball", Mesh { start: 0, count: 12 })]);
        let mut scene = Scene::new(meshes, Camera::new(0.7, 2.0, 0.01));
        scene
            .add_object("Ball", Vec3::new(0.0, 0.0, -3.0), Quat::IDENTITY, Vec3::ONE)
            .unwrap();

        let mut renderer = HeadlessRenderer::default();
        renderer.submit(&scene).unwrap();
        renderer.submit(&scene).unwrap();

        assert_eq!(renderer.frames, 2);
        assert_eq!(renderer.last_draws.len(), 1);
        let draw = renderer.last_draws[0];
        assert_eq!(draw.mesh.count, 12);
        assert!(draw.itmv.is_finite());
        // Object straight ahead lands at the centre of the screen
        let clip = draw.mvp * glam::Vec4::W;
        assert!((clip.x / clip.w).abs() < 1e-5);
    }
}
