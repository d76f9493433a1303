//! Spin Table entry point
//!
//! Loads settings and asset blobs, then drives the game from an input script.

use anyhow::Context;

use spin_table::Game;
use spin_table::Settings;
use spin_table::platform::{FrameClock, InputScript};
use spin_table::renderer::{HeadlessRenderer, Renderer};
use spin_table::scene::{Camera, MeshLibrary, Scene, load_placements};

fn build_scene(settings: &Settings) -> anyhow::Result<Scene> {
    let meshes = MeshLibrary::load(&settings.assets.meshes)?;
    let camera = Camera::new(
        settings.fovy(),
        settings.window.aspect(),
        settings.camera.near,
    );
    let mut scene = Scene::new(meshes, camera);

    let placements = load_placements(&settings.assets.scene)?;
    scene
        .add_placements(&placements)
        .context("failed to place static scene")?;
    log::info!(
        "Scene ready: {} meshes, {} static objects",
        scene.meshes().len(),
        scene.objects().len()
    );
    Ok(scene)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Spin Table starting...");

    let settings = Settings::load()?;
    let scene = build_scene(&settings)?;
    let mut game = Game::new(scene, &settings)?;
    let mut renderer = HeadlessRenderer::default();

    let Some(script_path) = settings.input_script.as_ref() else {
        log::warn!("No input script configured and no window backend available; exiting");
        return Ok(());
    };
    let script = InputScript::load(script_path)?;

    // Scripted elapsed times stand in for the wall clock, but still obey the cap
    let mut clock = FrameClock::new(settings.max_frame_elapsed);
    for (input, elapsed) in script.snapshots() {
        let elapsed = match elapsed {
            Some(elapsed) => clock.clamp(elapsed),
            None => clock.tick(),
        };
        let outcome = game.frame(&input, elapsed)?;
        if outcome.quit {
            break;
        }
        renderer.submit(&game.scene)?;
    }

    log::info!(
        "Finished after {} frames. Score: left {} - right {}",
        renderer.frames,
        game.score.left,
        game.score.right
    );
    Ok(())
}
