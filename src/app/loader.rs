use std::{
    path::{Path, PathBuf},
    sync::mpsc::{self, Receiver},
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use eframe::egui;

use crate::image_utils::{decode_image, resize_to_display, to_color_image, LoadedSlide};
use crate::ui::fit_within;

pub const LOADING_STATUS: &str = "Loading images, please wait...";
pub const READY_STATUS: &str = "Drag to change image";

/// Where the load currently stands. A failed or timed-out load is terminal;
/// the slider never sits in `Loading` forever.
pub enum LoadPhase {
    Loading,
    Ready,
    Failed(String),
}

struct SlideResult {
    index: usize,
    result: Result<LoadedSlide>,
}

/// Decodes every source concurrently and releases the ordered slide set in
/// one piece once the last decode lands. All accounting happens on the UI
/// thread via `poll()`; workers only ever push onto the channel.
pub struct Loader {
    done_rx: Receiver<SlideResult>,
    slots: Vec<Option<LoadedSlide>>,
    completed: usize,
    deadline: Instant,
    phase: LoadPhase,
    slides: Option<Vec<LoadedSlide>>,
}

impl Loader {
    pub fn new(sources: &[PathBuf], viewport: egui::Vec2, timeout: Duration) -> Self {
        let (done_tx, done_rx) = mpsc::channel();
        for (index, source) in sources.iter().cloned().enumerate() {
            let tx = done_tx.clone();
            thread::spawn(move || {
                let result = load_slide(index, &source, viewport);
                // A closed channel means the slider is gone; the result is
                // simply discarded.
                let _ = tx.send(SlideResult { index, result });
            });
        }
        Self {
            done_rx,
            slots: (0..sources.len()).map(|_| None).collect(),
            completed: 0,
            deadline: Instant::now() + timeout,
            phase: LoadPhase::Loading,
            slides: None,
        }
    }

    /// Drains finished decodes and advances the phase. Completions arrive in
    /// any order and land in per-index slots; the set only becomes
    /// observable once every slot is filled.
    pub fn poll(&mut self) {
        if !matches!(self.phase, LoadPhase::Loading) {
            return;
        }

        while let Ok(done) = self.done_rx.try_recv() {
            match done.result {
                Ok(slide) => {
                    let slot = &mut self.slots[done.index];
                    if slot.is_none() {
                        *slot = Some(slide);
                        self.completed += 1;
                    }
                }
                Err(err) => {
                    self.phase = LoadPhase::Failed(format!("{err:#}"));
                    return;
                }
            }
        }

        if self.completed == self.slots.len() {
            self.slides = Some(self.slots.drain(..).flatten().collect());
            self.phase = LoadPhase::Ready;
        } else if Instant::now() >= self.deadline {
            self.phase = LoadPhase::Failed(format!(
                "Timed out loading images ({}/{} finished)",
                self.completed,
                self.slots.len()
            ));
        }
    }

    pub fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    /// Hands out the complete ordered slide set, once. `None` until every
    /// source has decoded, and `None` again afterwards.
    pub fn take_slides(&mut self) -> Option<Vec<LoadedSlide>> {
        self.slides.take()
    }

    pub fn status_line(&self) -> &str {
        match &self.phase {
            LoadPhase::Loading => LOADING_STATUS,
            LoadPhase::Ready => READY_STATUS,
            LoadPhase::Failed(message) => message,
        }
    }
}

fn load_slide(index: usize, source: &Path, viewport: egui::Vec2) -> Result<LoadedSlide> {
    let bytes =
        std::fs::read(source).with_context(|| format!("Unable to read {}", source.display()))?;
    let image = decode_image(&bytes, source)?;
    drop(bytes);

    let natural_size = egui::vec2(image.width() as f32, image.height() as f32);
    let (display_size, _scale) = fit_within(natural_size, viewport);
    let width = display_size.x.round().max(1.0) as u32;
    let height = display_size.y.round().max(1.0) as u32;
    let rgba = resize_to_display(&image, width, height)?;

    Ok(LoadedSlide {
        index,
        natural_size,
        display_size,
        pixels: to_color_image(&rgba),
    })
}
