use eframe::egui;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc;

use wordlens::cloud::{CloudLayout, WordCloud};
use wordlens::engine::pipeline::{
    analyze, load_source, Analysis, Document, SourceError, SourceRequest,
};
use wordlens::export::save_preview;
use wordlens::net::image::ImageLoader;
use wordlens::render::chart::{Chart, ChartStyle};
use wordlens::render::{self, RenderOptions};
use wordlens::text::frequency::{TokenCount, MAX_TOP_WORDS};

/// Everything produced by one background load.
struct LoadedPage {
    document: Document,
    analysis: Analysis,
    cloud: Option<CloudLayout>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Url,
    File,
    Upload,
}

fn main() {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "WordLens — fetch · segment · count · visualize",
        options,
        Box::new(|cc| {
            // Register a CJK-capable font so Chinese tokens render
            let mut fonts = egui::FontDefinitions::default();
            let font_paths = [
                "C:\\Windows\\Fonts\\simhei.ttf",
                "C:\\Windows\\Fonts\\msyh.ttc",
                "/System/Library/Fonts/PingFang.ttc",
                "/System/Library/Fonts/STHeiti Light.ttc",
                "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
                "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
            ];
            for path in &font_paths {
                if let Ok(data) = std::fs::read(path) {
                    fonts
                        .font_data
                        .insert("cjk".to_owned(), egui::FontData::from_owned(data));
                    fonts
                        .families
                        .get_mut(&egui::FontFamily::Proportional)
                        .unwrap()
                        .push("cjk".to_owned());
                    fonts
                        .families
                        .get_mut(&egui::FontFamily::Monospace)
                        .unwrap()
                        .push("cjk".to_owned());
                    break;
                }
            }
            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(WordLensApp::default()))
        }),
    )
    .expect("Failed to start WordLens");
}

struct WordLensApp {
    source_kind: SourceKind,
    url_input: String,
    path_input: String,
    upload: Option<(String, Vec<u8>)>,
    page: Option<LoadedPage>,
    error: Option<String>,
    loading: bool,
    load_rx: Option<mpsc::Receiver<Result<LoadedPage, SourceError>>>,
    options: RenderOptions,
    /// Tokens unchecked in the word filter list
    excluded_words: HashSet<String>,
    save_path: String,
    save_status: Option<Result<String, String>>,
    dark_mode: bool,
    image_loader: ImageLoader,
    image_textures: HashMap<String, egui::TextureHandle>,
}

impl Default for WordLensApp {
    fn default() -> Self {
        Self {
            source_kind: SourceKind::Url,
            url_input: String::from("https://example.com"),
            path_input: String::new(),
            upload: None,
            page: None,
            error: None,
            loading: false,
            load_rx: None,
            options: RenderOptions::default(),
            excluded_words: HashSet::new(),
            save_path: String::from("preview.txt"),
            save_status: None,
            dark_mode: false,
            image_loader: ImageLoader::new(),
            image_textures: HashMap::new(),
        }
    }
}

impl WordLensApp {
    fn request(&self) -> Option<SourceRequest> {
        match self.source_kind {
            SourceKind::Url => {
                let url = self.url_input.trim();
                (!url.is_empty()).then(|| SourceRequest::RemoteUrl(url.to_string()))
            }
            SourceKind::File => {
                let path = self.path_input.trim();
                (!path.is_empty()).then(|| SourceRequest::LocalPath(PathBuf::from(path)))
            }
            SourceKind::Upload => self.upload.as_ref().map(|(name, bytes)| {
                SourceRequest::Upload {
                    name: name.clone(),
                    bytes: bytes.clone(),
                }
            }),
        }
    }

    fn start_load(&mut self, ctx: &egui::Context) {
        if self.loading {
            return;
        }
        let Some(request) = self.request() else {
            self.error = Some("Choose a source first".to_string());
            return;
        };

        self.loading = true;
        self.error = None;
        self.save_status = None;
        self.image_textures.clear();

        let (tx, rx) = mpsc::channel();
        self.load_rx = Some(rx);
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let result = load_source(&request).map(|document| {
                let analysis = analyze(&document);
                let cloud = WordCloud::default().generate(&document.text);
                LoadedPage {
                    document,
                    analysis,
                    cloud,
                }
            });
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    fn check_load(&mut self) {
        if let Some(rx) = &self.load_rx {
            if let Ok(result) = rx.try_recv() {
                match result {
                    Ok(page) => {
                        self.excluded_words.clear();
                        self.page = Some(page);
                        self.error = None;
                    }
                    Err(e) => {
                        self.error = Some(e.to_string());
                        self.page = None;
                    }
                }
                self.loading = false;
                self.load_rx = None;
            }
        }
    }

    /// Dropped files become the uploaded-buffer origin.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };

        let name = file
            .path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.name.clone());

        let bytes = if let Some(bytes) = file.bytes {
            Some(bytes.to_vec())
        } else if let Some(path) = &file.path {
            match std::fs::read(path) {
                Ok(bytes) => Some(bytes),
                Err(e) => {
                    self.error = Some(format!("[file] {}: {}", path.display(), e));
                    None
                }
            }
        } else {
            None
        };

        if let Some(bytes) = bytes {
            self.source_kind = SourceKind::Upload;
            self.upload = Some((name, bytes));
            self.start_load(ctx);
        }
    }

    fn draw_toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);
            ui.radio_value(&mut self.source_kind, SourceKind::Url, "URL");
            ui.radio_value(&mut self.source_kind, SourceKind::File, "File path");
            ui.radio_value(&mut self.source_kind, SourceKind::Upload, "Dropped file");
            ui.separator();

            match self.source_kind {
                SourceKind::Url => {
                    let response = ui.add_sized(
                        [ui.available_width() - 120.0, 24.0],
                        egui::TextEdit::singleline(&mut self.url_input)
                            .hint_text("Enter URL...")
                            .font(egui::TextStyle::Monospace),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        self.start_load(ctx);
                    }
                }
                SourceKind::File => {
                    let response = ui.add_sized(
                        [ui.available_width() - 120.0, 24.0],
                        egui::TextEdit::singleline(&mut self.path_input)
                            .hint_text("Enter a local file path...")
                            .font(egui::TextStyle::Monospace),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        self.start_load(ctx);
                    }
                }
                SourceKind::Upload => {
                    match &self.upload {
                        Some((name, bytes)) => {
                            ui.monospace(format!("{} ({} bytes)", name, bytes.len()));
                        }
                        None => {
                            ui.weak("Drop a text file anywhere in the window");
                        }
                    }
                }
            }

            if ui.button("Load").clicked() {
                self.start_load(ctx);
            }

            // Dark mode toggle
            let dark_label = if self.dark_mode { "\u{263E}" } else { "\u{2600}" };
            if ui.button(dark_label).clicked() {
                self.dark_mode = !self.dark_mode;
            }
        });
    }

    fn draw_settings(&mut self, ui: &mut egui::Ui) {
        ui.heading("Settings");
        ui.separator();

        ui.add(
            egui::Slider::new(&mut self.options.top_n, 1..=MAX_TOP_WORDS).text("words"),
        );
        ui.checkbox(&mut self.options.show_word_cloud, "Show word cloud");
        ui.checkbox(&mut self.options.show_chart, "Show chart");

        egui::ComboBox::from_label("Chart style")
            .selected_text(self.options.chart_style.label())
            .show_ui(ui, |ui| {
                for style in ChartStyle::ALL {
                    ui.selectable_value(&mut self.options.chart_style, style, style.label());
                }
            });

        ui.horizontal(|ui| {
            ui.label("Cloud background");
            ui.color_edit_button_srgba(&mut self.options.cloud_background);
        });

        // Word filter (checked = included in the chart)
        if let Some(page) = &self.page {
            if !page.analysis.ranked.is_empty() {
                ui.separator();
                ui.heading("Words");
                egui::ScrollArea::vertical().max_height(240.0).show(ui, |ui| {
                    for entry in page.analysis.ranked.iter().take(self.options.top_n) {
                        let mut on = !self.excluded_words.contains(&entry.token);
                        if ui
                            .checkbox(&mut on, format!("{} ({})", entry.token, entry.count))
                            .changed()
                        {
                            if on {
                                self.excluded_words.remove(&entry.token);
                            } else {
                                self.excluded_words.insert(entry.token.clone());
                            }
                        }
                    }
                });
            }
        }

        if let Some(page) = &self.page {
            ui.separator();
            ui.heading("Stats");
            if let Some(status) = page.document.fetch_status {
                ui.label(format!("HTTP: {}", status));
            }
            ui.label(format!("Distinct tokens: {}", page.analysis.ranked.len()));
            if let Some(cloud) = &page.cloud {
                ui.label(format!("Cloud words: {}", cloud.words.len()));
            }
            if !page.analysis.images.is_empty() {
                ui.label(format!(
                    "Images: {} ({} loaded, {} pending)",
                    page.analysis.images.len(),
                    self.image_loader.loaded_count(),
                    self.image_loader.pending_count(),
                ));
            }
        }
    }

    fn draw_content(&mut self, ui: &mut egui::Ui) {
        if self.loading {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        }

        if let Some(ref error) = self.error {
            ui.colored_label(egui::Color32::RED, error);
            return;
        }

        if self.page.is_none() {
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(100.0);
                    ui.heading("WordLens");
                    ui.label("Fetch a page, open a file, or drop one here");
                    ui.add_space(20.0);
                    ui.label("Enter a URL and press Enter");
                });
            });
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            self.draw_page(ui);
        });
    }

    fn draw_page(&mut self, ui: &mut egui::Ui) {
        let Some(page) = &self.page else {
            return;
        };

        if !page.analysis.title.is_empty() {
            ui.heading(&page.analysis.title);
            ui.separator();
        }

        // Slice the ranking to the configured top-N, minus unchecked words
        let filtered: Vec<TokenCount> = page
            .analysis
            .ranked
            .iter()
            .take(self.options.top_n)
            .filter(|e| !self.excluded_words.contains(&e.token))
            .cloned()
            .collect();

        if self.options.show_chart {
            match Chart::build(self.options.chart_style, &filtered) {
                Some(chart) => {
                    ui.strong("Word frequency");
                    render::chart::draw(ui, &chart);
                }
                None => {
                    ui.weak("No tokens to chart");
                }
            }
            ui.add_space(8.0);
        }

        if self.options.show_word_cloud {
            match &page.cloud {
                Some(layout) => {
                    ui.strong("Word cloud");
                    render::cloud::draw(ui, layout, self.options.cloud_background);
                }
                None => {
                    ui.weak("No words for a cloud");
                }
            }
            ui.add_space(8.0);
        }

        ui.strong("Text preview");
        let mut preview = page.analysis.preview.as_str();
        ui.add(
            egui::TextEdit::multiline(&mut preview)
                .desired_rows(10)
                .desired_width(f32::INFINITY)
                .font(egui::TextStyle::Monospace),
        );

        let mut save_clicked = false;
        ui.horizontal(|ui| {
            ui.label("Save to");
            ui.add_sized(
                [240.0, 20.0],
                egui::TextEdit::singleline(&mut self.save_path),
            );
            if ui.button("Save text").clicked() {
                save_clicked = true;
            }
            match &self.save_status {
                Some(Ok(msg)) => {
                    ui.colored_label(egui::Color32::from_rgb(0, 180, 0), msg);
                }
                Some(Err(msg)) => {
                    ui.colored_label(egui::Color32::RED, msg);
                }
                None => {}
            }
        });
        if save_clicked {
            self.save_status = Some(
                match save_preview(Path::new(&self.save_path), &page.analysis.preview) {
                    Ok(()) => Ok(format!("Saved to {}", self.save_path)),
                    Err(e) => Err(e.to_string()),
                },
            );
        }

        self.draw_gallery(ui);
    }

    fn draw_gallery(&mut self, ui: &mut egui::Ui) {
        let Some(page) = &self.page else {
            return;
        };
        if page.analysis.images.is_empty() {
            return;
        }

        ui.add_space(8.0);
        ui.strong("Captured images");

        let avail = ui.available_width();
        for url in &page.analysis.images {
            self.image_loader.request(url);

            if let Some(tex) = self.image_textures.get(url) {
                ui.add(egui::Image::new(tex).max_width(avail));
            } else if let Some(err) = self.image_loader.error(url) {
                ui.colored_label(
                    egui::Color32::from_rgb(255, 80, 80),
                    format!("Could not load {}: {}", url, err),
                );
            } else {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.weak(url);
                });
            }
        }
    }
}

impl eframe::App for WordLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load();
        self.handle_dropped_files(ctx);

        // Apply dark/light visuals
        if self.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // Poll image loader and convert completed images to textures
        self.image_loader.poll();
        {
            let urls: Vec<String> = self.image_loader.loaded_urls();
            for url in urls {
                if self.image_textures.contains_key(&url) {
                    continue;
                }
                if let Some(data) = self.image_loader.get(&url) {
                    let image = egui::ColorImage::from_rgba_unmultiplied(
                        [data.width as usize, data.height as usize],
                        &data.rgba,
                    );
                    let tex = ctx.load_texture(
                        format!("img_{}", url),
                        image,
                        egui::TextureOptions::LINEAR,
                    );
                    self.image_textures.insert(url, tex);
                }
            }
        }

        // Keep polling while background work is in flight
        if self.loading || self.image_loader.pending_count() > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        // Top toolbar
        let ctx_clone = ctx.clone();
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, &ctx_clone);
        });

        // Settings side panel
        egui::SidePanel::right("settings")
            .default_width(240.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.draw_settings(ui);
                });
            });

        // Main content area
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_content(ui);
        });
    }
}
