/*
 *  main.rs
 *
 *  segoverlay - segmentation mask overlay
 *  (c) 2020-26 Stuart Hunter
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use anyhow::{bail, Context, Result};
use clap::Parser;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use env_logger::Env;
use log::{info, warn};
use serde::Serialize;
use tiny_skia::{Color, Pixmap};

use segoverlay::config::{self, Cli};
use segoverlay::{ColorLabel, OverlayView, UpdateOutcome};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// JSON shape for `--labels-json`
#[derive(Serialize)]
struct LabelRecord<'a> {
    index: usize,
    label: &'a str,
    color: String,
}

impl<'a> From<&'a ColorLabel> for LabelRecord<'a> {
    fn from(l: &'a ColorLabel) -> Self {
        Self {
            index: l.class_index,
            label: l.label,
            color: format!("#{:02x}{:02x}{:02x}", l.color.r(), l.color.g(), l.color.b()),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli)?;

    let level = cfg.log_level.clone().unwrap_or_else(|| "info".into());
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    info!("{} v.{} built {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), BUILD_DATE);

    if cli.dump_config {
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        return Ok(());
    }

    let Some(mask_path) = cli.mask.as_ref() else {
        bail!("--mask is required");
    };
    let (Some(mask_w), Some(mask_h)) = (cli.mask_width, cli.mask_height) else {
        bail!("--mask-width and --mask-height are required");
    };

    let mask = std::fs::read(mask_path)
        .with_context(|| format!("reading mask {}", mask_path.display()))?;

    let overlay_cfg = cfg.overlay.clone().unwrap_or_default();
    // an unconfigured view shows the mask 1:1
    let view_w = overlay_cfg.view_width.unwrap_or(mask_w);
    let view_h = overlay_cfg.view_height.unwrap_or(mask_h);
    let background = overlay_cfg
        .background
        .as_deref()
        .and_then(config::parse_hex_rgb)
        .unwrap_or(Rgb888::BLACK);

    let mut view = OverlayView::with_view_size(view_w, view_h);
    view.set_running_mode(overlay_cfg.running_mode.unwrap_or_default());

    match view.update(&mask, mask_w, mask_h)? {
        UpdateOutcome::Installed(plan) => info!(
            "Mask {}x{} scaled x{:.3} to {}x{} for {}x{} view ({:?})",
            mask_w, mask_h, plan.factor, plan.width, plan.height, view_w, view_h, view.running_mode()
        ),
        UpdateOutcome::Skipped => warn!("View size {}x{} unusable, overlay not updated", view_w, view_h),
    }

    let mut canvas = Pixmap::new(view_w, view_h)
        .with_context(|| format!("allocating {}x{} canvas", view_w, view_h))?;
    canvas.fill(Color::from_rgba8(background.r(), background.g(), background.b(), 255));

    if view.take_redraw() {
        view.draw(&mut canvas);
    }

    canvas
        .save_png(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    info!("Wrote {}", cli.output.display());

    if cli.labels_json {
        let records: Vec<LabelRecord> = view.labels().iter().map(LabelRecord::from).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    }

    Ok(())
}
