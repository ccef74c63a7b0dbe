use eframe::egui;
use poll_promise::Promise;
use rfd::FileDialog;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use img_b64_tag::progress::ProgressSink;
use img_b64_tag::sink::{ClipboardSink, DisplaySink};
use img_b64_tag::{Config, Home};

fn main() -> eframe::Result<()> {
    env_logger::init();
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Image Tags",
        options,
        Box::new(|_cc| Box::new(TagGui::default())),
    )
}

struct TagGui {
    inputs: Vec<String>,
    settings_path: String,
    status: String,
    summary: Vec<String>,
    logs: Vec<String>,
    processing: bool,
    receiver: Option<Receiver<WorkerMessage>>,
    file_dialog: Option<Promise<Option<Vec<PathBuf>>>>,
    settings_dialog: Option<Promise<Option<PathBuf>>>,
}

impl Default for TagGui {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            settings_path: String::new(),
            status: "Ready.".into(),
            summary: Vec::new(),
            logs: Vec::new(),
            processing: false,
            receiver: None,
            file_dialog: None,
            settings_dialog: None,
        }
    }
}

enum WorkerMessage {
    Log(String),
    Copy(String),
    Summary(Vec<String>),
    Error(String),
    Finished(Result<(), String>),
}

impl TagGui {
    fn poll_worker(&mut self, ctx: &egui::Context) {
        let mut disconnect = false;
        if let Some(rx) = &self.receiver {
            loop {
                match rx.try_recv() {
                    Ok(msg) => match msg {
                        WorkerMessage::Log(line) => {
                            self.logs.push(line);
                            const MAX_LOGS: usize = 500;
                            if self.logs.len() > MAX_LOGS {
                                let drain = self.logs.len() - MAX_LOGS;
                                self.logs.drain(0..drain);
                            }
                        }
                        WorkerMessage::Copy(text) => {
                            let len = text.len();
                            ctx.output_mut(|out| out.copied_text = text);
                            self.logs.push(format!("Copied {len} bytes to the clipboard"));
                        }
                        WorkerMessage::Summary(lines) => self.summary = lines,
                        WorkerMessage::Error(err) => self.summary = vec![err],
                        WorkerMessage::Finished(result) => {
                            self.processing = false;
                            self.status = match result {
                                Ok(()) => "Finished.".into(),
                                Err(err) => format!("Error: {err}"),
                            };
                            disconnect = true;
                            break;
                        }
                    },
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        disconnect = true;
                        self.processing = false;
                        self.status = "Worker stopped unexpectedly.".into();
                        break;
                    }
                }
            }
        }

        if disconnect {
            self.receiver = None;
        }
    }

    fn poll_dialogs(&mut self) {
        if let Some(Some(paths)) = ready_result(&mut self.file_dialog) {
            for path in paths {
                self.add_input_path(path);
            }
        }

        if let Some(Some(path)) = ready_result(&mut self.settings_dialog) {
            self.settings_path = path.display().to_string();
        }
    }

    fn add_input_path(&mut self, path: PathBuf) {
        self.inputs.push(path.display().to_string());
    }

    fn build_config(&self) -> Config {
        let inputs: Vec<PathBuf> = self
            .inputs
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .collect();

        let settings_path = {
            let trimmed = self.settings_path.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(PathBuf::from(trimmed))
            }
        };

        Config {
            inputs,
            settings_path,
            quiet: true,
        }
    }

    fn start_processing(&mut self) {
        if self.processing {
            self.status = "A conversion is already running.".into();
            return;
        }

        let config = self.build_config();
        let (tx, rx) = mpsc::channel();
        self.receiver = Some(rx);
        self.logs.clear();
        self.summary.clear();
        self.status = "Encoding...".into();
        self.processing = true;

        thread::spawn(move || {
            let home = Home::from_env();
            let mut clipboard = GuiSink::new(tx.clone());
            let mut display = GuiSink::new(tx.clone());
            let mut progress = GuiSink::new(tx.clone());
            let result = img_b64_tag::run_with_progress(
                config,
                &home,
                &mut clipboard,
                &mut display,
                &mut progress,
            )
            .map(|_| ())
            .map_err(|err| format!("{err:#}"));
            let _ = tx.send(WorkerMessage::Finished(result));
        });
    }
}

impl eframe::App for TagGui {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker(ctx);
        self.poll_dialogs();

        if ctx.input(|i| i.key_pressed(egui::Key::Escape))
            || ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::Q))
        {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Image Tags");
            ui.label("Pick images to turn into <img> tags with inline base64 data.");

            ui.separator();
            ui.label("Inputs:");

            ui.horizontal(|ui| {
                if ui.button("Add files").clicked() {
                    self.file_dialog = Some(spawn_file_dialog());
                }
            });

            let mut remove_idx = None;
            for (idx, input) in self.inputs.iter_mut().enumerate() {
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(input);
                    if ui.button("Remove").clicked() {
                        remove_idx = Some(idx);
                    }
                });
            }
            if let Some(idx) = remove_idx {
                self.inputs.remove(idx);
            }

            ui.separator();
            ui.horizontal(|ui| {
                ui.label("Settings file:");
                ui.text_edit_singleline(&mut self.settings_path);
                if ui.button("Choose...").clicked() {
                    self.settings_dialog = Some(spawn_settings_dialog());
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!self.processing, egui::Button::new("Convert and copy"))
                    .clicked()
                {
                    self.start_processing();
                }
                if ui.button("Clear").clicked() {
                    self.summary.clear();
                    self.logs.clear();
                }
            });

            ui.separator();
            ui.label(format!("Status: {}", self.status));

            egui::CollapsingHeader::new("Summary")
                .default_open(true)
                .show(ui, |ui| {
                    egui::ScrollArea::vertical()
                        .id_source("summary")
                        .max_height(240.0)
                        .show(ui, |ui| {
                            for line in &self.summary {
                                ui.label(line);
                            }
                        });
                });

            egui::CollapsingHeader::new("Logs")
                .default_open(false)
                .show(ui, |ui| {
                    egui::ScrollArea::vertical()
                        .id_source("logs")
                        .max_height(160.0)
                        .show(ui, |ui| {
                            for line in &self.logs {
                                ui.label(line);
                            }
                        });
                });
        });

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

fn ready_result<T: Clone + Send + 'static>(slot: &mut Option<Promise<T>>) -> Option<T> {
    let ready = slot.as_ref().and_then(|promise| promise.ready().cloned());
    if ready.is_some() {
        *slot = None;
    }
    ready
}

fn spawn_file_dialog() -> Promise<Option<Vec<PathBuf>>> {
    Promise::spawn_thread("pick_files_dialog", || {
        FileDialog::new()
            .add_filter(
                "Images",
                &["png", "jpg", "jpeg", "gif", "webp", "tga", "tpic", "vda", "vst", "icb"],
            )
            .pick_files()
    })
}

fn spawn_settings_dialog() -> Promise<Option<PathBuf>> {
    Promise::spawn_thread("pick_settings_dialog", || {
        FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
    })
}

/// Forwards everything the pipeline emits to the UI thread.
struct GuiSink {
    tx: Sender<WorkerMessage>,
}

impl GuiSink {
    fn new(tx: Sender<WorkerMessage>) -> Self {
        Self { tx }
    }

    fn send(&self, msg: WorkerMessage) {
        let _ = self.tx.send(msg);
    }

    fn log(&self, msg: impl Into<String>) {
        self.send(WorkerMessage::Log(msg.into()));
    }
}

impl ClipboardSink for GuiSink {
    fn copy_text(&mut self, text: &str) -> anyhow::Result<()> {
        self.send(WorkerMessage::Copy(text.to_string()));
        Ok(())
    }
}

impl DisplaySink for GuiSink {
    fn show(&mut self, _title: &str, body: &str) -> anyhow::Result<()> {
        self.send(WorkerMessage::Summary(
            body.lines().map(str::to_string).collect(),
        ));
        Ok(())
    }

    fn show_error(&mut self, message: &str) -> anyhow::Result<()> {
        self.send(WorkerMessage::Error(message.to_string()));
        Ok(())
    }
}

impl ProgressSink for GuiSink {
    fn start_file(&mut self, path: &Path) {
        self.log(format!("Encoding {}", path.display()));
    }

    fn finish_file(&mut self, path: &Path, tag_len: usize) {
        self.log(format!("Done {} ({} bytes)", path.display(), tag_len));
    }

    fn fail_file(&mut self, path: &Path, reason: &str) {
        self.log(format!("Skipped {}: {}", path.display(), reason));
    }

    fn finish(&mut self, done: usize, failed: usize) {
        self.log(format!("{done} tag(s) built, {failed} failed"));
    }
}
