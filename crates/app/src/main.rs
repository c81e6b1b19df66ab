//! Entry point: load a mesh, animate a scene headlessly, report draw statistics.

use std::path::PathBuf;

use anyhow::{Context, Result};
use corelib::{
    input::{AppState, InputEvent, MenuAction},
    scene::{OrbitScene, Scene, TurntableScene},
};
use renderer::{Renderer, ShaderSources};

const DEFAULT_MESH: &str = "assets/models/cube.obj";
const DEFAULT_SHADER_DIR: &str = "assets/shaders";
const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SceneKind {
    /// Loaded mesh spinning in place.
    Mesh,
    /// Loaded mesh as a planet with an orbiting moon.
    Orbit,
}

#[derive(Clone, Debug, PartialEq)]
struct Config {
    mesh_path: PathBuf,
    shader_dir: PathBuf,
    scene: SceneKind,
    frames: u32,
    seed: Option<u64>,
    rotate: bool,
    width: u32,
    height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mesh_path: PathBuf::from(DEFAULT_MESH),
            shader_dir: PathBuf::from(DEFAULT_SHADER_DIR),
            scene: SceneKind::Mesh,
            frames: 120,
            seed: None,
            rotate: false,
            width: 640,
            height: 480,
        }
    }
}

impl Config {
    // Accept: [MESH_PATH] --scene=mesh|orbit --frames=N --seed=N --size=WxH --shaders=DIR --rotate
    fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut cfg = Config::default();
        let mut positional_seen = false;

        for arg in args {
            if let Some(val) = arg.strip_prefix("--scene=") {
                cfg.scene = match val.to_ascii_lowercase().as_str() {
                    "mesh" => SceneKind::Mesh,
                    "orbit" | "moons" => SceneKind::Orbit,
                    other => {
                        log::warn!("Unknown scene '{}', falling back to mesh.", other);
                        SceneKind::Mesh
                    }
                };
            } else if let Some(val) = arg.strip_prefix("--frames=") {
                match val.parse::<u32>() {
                    Ok(n) => cfg.frames = n,
                    Err(_) => log::warn!("Ignoring invalid frame count '{}'", val),
                }
            } else if let Some(val) = arg.strip_prefix("--seed=") {
                match val.parse::<u64>() {
                    Ok(n) => cfg.seed = Some(n),
                    Err(_) => log::warn!("Ignoring invalid seed '{}'", val),
                }
            } else if let Some(val) = arg.strip_prefix("--size=") {
                if let Some((sw, sh)) = val.split_once('x').or_else(|| val.split_once('X')) {
                    if let (Ok(w), Ok(h)) = (sw.parse::<u32>(), sh.parse::<u32>()) {
                        cfg.width = w.max(1);
                        cfg.height = h.max(1);
                    }
                }
            } else if let Some(val) = arg.strip_prefix("--shaders=") {
                cfg.shader_dir = PathBuf::from(val);
            } else if arg == "--rotate" {
                cfg.rotate = true;
            } else if arg.starts_with("--") {
                log::warn!("Ignoring unknown flag '{}'", arg);
            } else if !positional_seen {
                cfg.mesh_path = PathBuf::from(arg);
                positional_seen = true;
            }
        }
        cfg
    }
}

fn run(cfg: &Config) -> Result<()> {
    let mesh = match cfg.seed {
        Some(seed) => asset::obj::load_obj_from_path_seeded(&cfg.mesh_path, seed),
        None => asset::obj::load_obj_from_path(&cfg.mesh_path),
    }
    .with_context(|| format!("Failed to load mesh {}", cfg.mesh_path.display()))?;

    if let Some((lo, hi)) = mesh.bounds() {
        log::info!("Mesh bounds: {:?} .. {:?}", lo, hi);
    } else {
        log::warn!("Mesh {} has no faces", cfg.mesh_path.display());
    }

    let shaders = ShaderSources::load(
        cfg.shader_dir.join("vs.glsl"),
        cfg.shader_dir.join("fs.glsl"),
    )?;
    let mut renderer = Renderer::new(shaders, cfg.width, cfg.height)?;
    let mesh_id = renderer.add_mesh(&mesh)?;

    let mut state = AppState::new(cfg.width, cfg.height);
    if cfg.rotate {
        state.handle(InputEvent::Menu(MenuAction::StartRotation));
    }
    let mut scene: Box<dyn Scene> = match cfg.scene {
        SceneKind::Mesh => Box::new(TurntableScene::new(mesh_id)),
        SceneKind::Orbit => Box::new(OrbitScene::new(mesh_id)),
    };

    let mut drawn = 0u64;
    for frame in 0..cfg.frames {
        if state.quit_requested {
            log::info!("Quit requested at frame {}", frame);
            break;
        }
        scene.tick(FRAME_DT, &state);
        renderer.resize(state.width, state.height);
        let commands = renderer.frame(scene.world())?;
        drawn += commands.total_vertices();
        log::debug!(
            "Frame {}: {} draw(s), {} vertices",
            frame,
            commands.draws.len(),
            commands.total_vertices()
        );
    }

    if cfg.scene == SceneKind::Orbit {
        log::info!("{}", state.orbit.label());
    }
    log::info!(
        "Rendered {} frame(s) of {} triangles; {} vertices submitted",
        cfg.frames,
        mesh.triangle_count(),
        drawn
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = Config::from_args(std::env::args().skip(1));
    log::info!(
        "Starting orbitmesh. Mesh: {}, scene={:?}, frames={}, window_size={}x{}",
        cfg.mesh_path.display(),
        cfg.scene,
        cfg.frames,
        cfg.width,
        cfg.height
    );

    if let Err(err) = run(&cfg) {
        log::error!("{:#}", err);
        return Err(err);
    }

    log::info!("Graceful shutdown. Bye!");
    Ok(())
}
