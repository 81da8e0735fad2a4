// src/gui/app.rs
use std::{
    error::Error,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    thread,
    time::Duration,
};

use eframe::egui;
use egui_extras::DatePickerButton;

use crate::{
    config::state::AppState,
    controller::{Controller, StartError, TabId},
    scrape::{LiveSource, PageSource},
    specs::STAKE_ESPORTS,
};

use super::progress::GuiProgress;

const LIVE_TAB: TabId = TabId(0);

pub fn run() -> Result<(), Box<dyn Error>> {
    let state = AppState::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([state.gui.window_w as f32, state.gui.window_h as f32]),
        ..Default::default()
    };

    eframe::run_native(
        "Bet Extractor",
        options,
        Box::new(move |_cc| Ok(Box::new(App::new(state)))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // output text field UX (we map this <-> ExportOptions)
    out_path_text: String,
    out_path_dirty: bool,

    // status/progress (the extraction thread writes here)
    status: Arc<Mutex<String>>,
    busy: Arc<AtomicBool>,

    controller: Arc<Mutex<Controller>>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let status = Arc::new(Mutex::new(s!("Idle")));

        let mut controller = Controller::new(&STAKE_ESPORTS);
        controller.register_tab(
            LIVE_TAB,
            Arc::new(|| LiveSource::open(&STAKE_ESPORTS).map(|s| Box::new(s) as Box<dyn PageSource>)),
            GuiProgress::factory(Arc::clone(&status)),
        );

        logf!("Init: GUI up, default window {:?}", state.options.scrape);

        Self {
            out_path_text: s!(),
            out_path_dirty: false,
            state,
            status,
            busy: Arc::new(AtomicBool::new(false)),
            controller: Arc::new(Mutex::new(controller)),
        }
    }

    fn status(&self, msg: impl Into<String>) {
        *self.status.lock().unwrap() = msg.into();
    }

    fn start_extraction(&mut self) {
        if self.out_path_dirty {
            self.state.options.export.set_path(&self.out_path_text);
            self.out_path_dirty = false;
        }

        let scrape = self.state.options.scrape.clone();
        if scrape.start_date > scrape.end_date {
            // Same pre-check the controller does; catch it before spawning.
            self.status("Start date cannot be after end date");
            return;
        }

        self.busy.store(true, Ordering::SeqCst);
        self.status("Starting extraction…");
        logf!("Extract: begin {} → {}", scrape.start_date, scrape.end_date);

        let controller = Arc::clone(&self.controller);
        let status = Arc::clone(&self.status);
        let busy = Arc::clone(&self.busy);
        let export = self.state.options.export.clone();

        thread::spawn(move || {
            let result = controller.lock().unwrap().start_extraction(
                LIVE_TAB,
                scrape.start_date,
                scrape.end_date,
                &export,
            );

            let msg = match result {
                Ok(summary) => format!(
                    "Done: {} bets → {}",
                    summary.count,
                    summary.path.display()
                ),
                Err(StartError::NoRecords) => s!("No bets found in the requested range"),
                Err(e) => {
                    loge!("Extract: {e}");
                    format!("Error: {e}")
                }
            };

            *status.lock().unwrap() = msg;
            busy.store(false, Ordering::SeqCst);
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let busy = self.busy.load(Ordering::SeqCst);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Bet history export");
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("From");
                ui.add(
                    DatePickerButton::new(&mut self.state.options.scrape.start_date)
                        .id_salt("start-date"),
                );
                ui.label("to");
                ui.add(
                    DatePickerButton::new(&mut self.state.options.scrape.end_date)
                        .id_salt("end-date"),
                );
            });

            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label("Output");
                let hint = self
                    .state
                    .options
                    .export
                    .out_path(
                        self.state.options.scrape.start_date,
                        self.state.options.scrape.end_date,
                    )
                    .to_string_lossy()
                    .into_owned();
                let edit = egui::TextEdit::singleline(&mut self.out_path_text).hint_text(hint);
                if ui.add(edit).changed() {
                    self.out_path_dirty = true;
                }
            });

            ui.add_space(8.0);
            if ui
                .add_enabled(!busy, egui::Button::new("Extract"))
                .clicked()
            {
                self.start_extraction();
            }

            ui.add_space(8.0);
            ui.separator();
            ui.label(self.status.lock().unwrap().clone());
        });

        if busy {
            // keep the status line fresh while the worker runs
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }
}
