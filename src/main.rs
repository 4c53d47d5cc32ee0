use std::env;
use std::path::PathBuf;

use log::info;
use rasterkit::camera::clamp_zeta;
use rasterkit::colors;
use rasterkit::prelude::*;
use rasterkit::scene::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH};

const USAGE: &str = "usage: rasterkit <mesh.obj> <out.png> \
[--mode wireframe|rasterized] [--size WxH] [--radius R] [--zeta Z] [--phi P] [--color RRGGBB]";

struct Options {
    input: PathBuf,
    output: PathBuf,
    mode: RenderMode,
    width: u32,
    height: u32,
    radius: Option<f32>,
    zeta: Option<f32>,
    phi: Option<f32>,
    color: u32,
}

fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("invalid size {value:?}, expected WxH"))?;
    let w = w.parse::<u32>().map_err(|e| format!("invalid width: {e}"))?;
    let h = h.parse::<u32>().map_err(|e| format!("invalid height: {e}"))?;
    if w == 0 || h == 0 {
        return Err("canvas size must be non-zero".to_string());
    }
    Ok((w, h))
}

fn parse_f32(flag: &str, value: &str) -> Result<f32, String> {
    value
        .parse::<f32>()
        .map_err(|e| format!("invalid value for {flag}: {e}"))
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut positional = Vec::new();
    let mut options = Options {
        input: PathBuf::new(),
        output: PathBuf::new(),
        mode: RenderMode::default(),
        width: DEFAULT_CANVAS_WIDTH,
        height: DEFAULT_CANVAS_HEIGHT,
        radius: None,
        zeta: None,
        phi: None,
        color: colors::FOREGROUND,
    };

    while let Some(arg) = args.next() {
        if !arg.starts_with("--") {
            positional.push(arg);
            continue;
        }
        let value = args
            .next()
            .ok_or_else(|| format!("missing value for {arg}\n{USAGE}"))?;
        match arg.as_str() {
            "--mode" => options.mode = value.parse()?,
            "--size" => (options.width, options.height) = parse_size(&value)?,
            "--radius" => options.radius = Some(parse_f32(&arg, &value)?),
            "--zeta" => options.zeta = Some(parse_f32(&arg, &value)?),
            "--phi" => options.phi = Some(parse_f32(&arg, &value)?),
            "--color" => {
                options.color = colors::parse_hex(&value)
                    .ok_or_else(|| format!("invalid color {value:?}, expected RRGGBB"))?
            }
            _ => return Err(format!("unknown option {arg}\n{USAGE}")),
        }
    }

    match <[String; 2]>::try_from(positional) {
        Ok([input, output]) => {
            options.input = input.into();
            options.output = output.into();
            Ok(options)
        }
        Err(_) => Err(USAGE.to_string()),
    }
}

fn main() -> Result<(), String> {
    env_logger::init();

    let options = parse_args(env::args().skip(1))?;

    let mut engine = Engine::new(options.width, options.height);
    engine.set_render_mode(options.mode);
    engine.set_colors(options.color, colors::BACKGROUND);
    engine
        .load_model(&options.input)
        .map_err(|e| e.to_string())?;

    let camera = &mut engine.scene_mut().camera;
    if let Some(radius) = options.radius {
        camera.radius = radius.clamp(camera.z_near, camera.z_far);
    }
    if let Some(zeta) = options.zeta {
        camera.zeta = clamp_zeta(zeta);
    }
    if let Some(phi) = options.phi {
        camera.phi = phi.rem_euclid(std::f32::consts::TAU);
    }

    let image = engine.frame().to_image();
    image
        .save(&options.output)
        .map_err(|e| format!("failed to write {}: {e}", options.output.display()))?;

    info!(
        "wrote {}x{} {} frame to {}",
        options.width,
        options.height,
        options.mode,
        options.output.display()
    );
    Ok(())
}
