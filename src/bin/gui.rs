// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use eframe::egui::{IconData, ViewportBuilder};
use pagegrid::config::options::{DemoPage, LaunchOptions};
use pagegrid::gui;

fn app_icon() -> Option<IconData> {
    let rgba = image::load_from_memory(include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/assets/pagegrid.png"
    )))
    .ok()?
    .to_rgba8();
    let (w, h) = rgba.dimensions();
    Some(IconData { rgba: rgba.into_raw(), width: w, height: h })
}

/// gui [PAGE.html] [--url LOCATION] [--demo listings|booking]
fn parse_args() -> Result<LaunchOptions, String> {
    let mut launch = LaunchOptions::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--url" => {
                launch.url = Some(args.next().ok_or("--url needs a value")?);
            }
            "--demo" => match args.next().as_deref() {
                Some("listings") => launch.demo = Some(DemoPage::Listings),
                Some("booking") => launch.demo = Some(DemoPage::Booking),
                other => return Err(format!("unknown demo {other:?}")),
            },
            other if !other.starts_with('-') => {
                launch.page = Some(other.into());
            }
            other => return Err(format!("unknown option {other}")),
        }
    }
    Ok(launch)
}

fn main() {
    let launch = match parse_args() {
        Ok(l) => l,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let mut viewport = ViewportBuilder::default();
    if let Some(icon) = app_icon() {
        // eframe 0.32: icon set via viewport builder
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    if let Err(e) = gui::run(options, launch) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
