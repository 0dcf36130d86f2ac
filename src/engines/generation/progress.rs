use serde::Serialize;
use std::io::Write;
use std::sync::mpsc::Sender;

/// Snapshot published once per completed generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationReport {
    pub generation: usize,
    pub best_score: f64,
    pub median_score: f64,
    pub best_program_rendered: String,
}

/// Read-only observer of a run. Nothing it does changes the run.
pub trait ProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_program_evaluated(&mut self, _evaluated: usize, _total: usize) {}

    fn on_generation_complete(&mut self, report: &GenerationReport);
}

impl ProgressCallback for () {
    fn on_generation_complete(&mut self, _report: &GenerationReport) {}
}

impl<C: ProgressCallback + ?Sized> ProgressCallback for &mut C {
    fn on_generation_start(&mut self, generation: usize) {
        (**self).on_generation_start(generation);
    }

    fn on_program_evaluated(&mut self, evaluated: usize, total: usize) {
        (**self).on_program_evaluated(evaluated, total);
    }

    fn on_generation_complete(&mut self, report: &GenerationReport) {
        (**self).on_generation_complete(report);
    }
}

/// Logs each generation at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("Generation {} starting", generation);
    }

    fn on_generation_complete(&mut self, report: &GenerationReport) {
        log::info!(
            "Generation: {}\nBest Score: {:.2}\nMedian score: {:.2}\nBest program: {}\n",
            report.generation,
            report.best_score,
            report.median_score,
            report.best_program_rendered
        );
    }
}

// For handing progress to another thread
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    ProgramEvaluated { evaluated: usize, total: usize },
    GenerationComplete(GenerationReport),
}

#[derive(Debug)]
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_program_evaluated(&mut self, evaluated: usize, total: usize) {
        let _ = self
            .sender
            .send(ProgressMessage::ProgramEvaluated { evaluated, total });
    }

    fn on_generation_complete(&mut self, report: &GenerationReport) {
        let _ = self
            .sender
            .send(ProgressMessage::GenerationComplete(report.clone()));
    }
}

/// Writes one JSON object per generation, newline separated.
#[derive(Debug)]
pub struct JsonLinesProgressCallback<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesProgressCallback<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ProgressCallback for JsonLinesProgressCallback<W> {
    fn on_generation_complete(&mut self, report: &GenerationReport) {
        let written = serde_json::to_writer(&mut self.writer, report)
            .map_err(std::io::Error::from)
            .and_then(|_| self.writer.write_all(b"\n"));
        if let Err(e) = written {
            log::warn!("Failed to write progress for generation {}: {}", report.generation, e);
        }
    }
}
