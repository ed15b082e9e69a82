/*!
 * Desktop viewer for endpoint-chart
 *
 * Shows the configured chart with:
 * - a "Bar Chart" switch between line and grouped-bar presentation
 * - hover tooltips listing every series at the category under the pointer
 * - a download button saving the current frame as chart.png
 */

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use std::path::PathBuf;

use endpoint_chart::export::{EXPORT_FILE_NAME, default_download_dir};
use endpoint_chart::images::load_rgba;
use endpoint_chart::{ChartConfig, ChartHost, ChartKind};

#[derive(Parser, Debug)]
#[command(name = "endpoint-chart-gui", version, about = "Interactive endpoint chart viewer")]
struct Cli {
    /// JSON config; the built-in dataset is used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Directory the download button writes chart.png to.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(p) => ChartConfig::load(p).with_context(|| format!("loading {}", p.display()))?,
        None => ChartConfig::default(),
    };
    let out_dir = cli.out_dir.unwrap_or_else(default_download_dir);

    let (w, h) = (config.width as f32, config.height as f32);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([w + 40.0, h + 120.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("endpoint-chart"),
        ..Default::default()
    };

    eframe::run_native(
        "endpoint-chart",
        options,
        Box::new(move |cc| Ok(Box::new(ChartApp::new(cc, config, out_dir)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

/// Main application state
struct ChartApp {
    host: ChartHost,
    out_dir: PathBuf,
    logo: Option<egui::TextureHandle>,
    chart: Option<egui::TextureHandle>,
    /// Kind of the frame currently uploaded to `chart`.
    uploaded: Option<ChartKind>,

    status_message: String,
    error_message: String,
}

impl ChartApp {
    fn new(cc: &eframe::CreationContext<'_>, config: ChartConfig, out_dir: PathBuf) -> Self {
        let logo = match load_rgba(&config.assets.logo_path()) {
            Ok(img) => {
                let size = [img.width() as usize, img.height() as usize];
                let image = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
                Some(cc.egui_ctx.load_texture("logo", image, egui::TextureOptions::LINEAR))
            }
            Err(err) => {
                log::debug!("logo unavailable: {}", err);
                None
            }
        };

        Self {
            host: ChartHost::new(config),
            out_dir,
            logo,
            chart: None,
            uploaded: None,
            status_message: String::new(),
            error_message: String::new(),
        }
    }

    /// Re-render when stale and upload the frame as a texture.
    fn refresh_chart(&mut self, ctx: &egui::Context) {
        let was_stale = self.host.is_stale() || self.chart.is_none();
        let frame = match self.host.render() {
            Ok(frame) => frame,
            Err(err) => {
                self.error_message = format!("Failed to render chart: {}", err);
                return;
            }
        };
        if !was_stale && self.uploaded == Some(frame.kind) {
            return;
        }
        let size = [frame.width() as usize, frame.height() as usize];
        let image = egui::ColorImage::from_rgb(size, &frame.pixels);
        match &mut self.chart {
            Some(tex) => tex.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.chart = Some(ctx.load_texture("chart", image, egui::TextureOptions::LINEAR))
            }
        }
        self.uploaded = Some(frame.kind);
    }

    fn download(&mut self) {
        match self.host.export(&self.out_dir) {
            Ok(Some(path)) => {
                self.status_message = format!("Saved {}", path.display());
                self.error_message.clear();
            }
            Ok(None) => {}
            Err(err) => {
                self.error_message = format!("Failed to save {}: {}", EXPORT_FILE_NAME, err);
                self.status_message.clear();
            }
        }
    }
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh_chart(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(logo) = &self.logo {
                    ui.image((logo.id(), egui::vec2(40.0, 40.0)));
                }
                ui.heading("Endpoint Chart");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button("Download")
                        .on_hover_text(format!("Save as {}", EXPORT_FILE_NAME))
                        .clicked()
                    {
                        self.download();
                    }

                    let mut bar = self.host.kind() == ChartKind::Bar;
                    if ui.checkbox(&mut bar, "Bar Chart").changed() {
                        self.host.set_kind(if bar { ChartKind::Bar } else { ChartKind::Line });
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(tex) = &self.chart {
                let size = tex.size_vec2();
                let response =
                    ui.add(egui::Image::new((tex.id(), size)).sense(egui::Sense::hover()));
                if let Some(pointer) = response.hover_pos() {
                    let rel = pointer - response.rect.min;
                    if let Some(tip) = self.host.tooltip_at((rel.x as i32, rel.y as i32)) {
                        response.on_hover_ui_at_pointer(|ui| {
                            ui.strong(&tip.title);
                            for line in &tip.lines {
                                ui.label(line);
                            }
                        });
                    }
                }
            }

            ui.add_space(10.0);

            if !self.status_message.is_empty() {
                ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
            }

            if !self.error_message.is_empty() {
                ui.colored_label(egui::Color32::RED, &self.error_message);
            }
        });

        // A kind change made this pass shows up on the next one.
        if self.host.is_stale() {
            ctx.request_repaint();
        }
    }
}
