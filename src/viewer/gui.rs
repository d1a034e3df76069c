use eframe::{egui, NativeOptions};
use tracing::info;

use super::TableViewer;
use crate::config::ViewerConfig;
use crate::error::{LogParserError, LogResult};
use crate::model::ParsedTable;

const ROW_HEIGHT: f32 = 20.0;

/// Desktop window with a two-way scrollable grid
pub struct WindowViewer {
    config: ViewerConfig,
}

impl WindowViewer {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

struct TableApp {
    headings: Vec<String>,
    rows: Vec<Vec<String>>,
    column_width: f32,
}

impl eframe::App for TableApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(format!("{} rows", self.rows.len()));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
                egui::Grid::new("log_table")
                    .striped(true)
                    .min_col_width(self.column_width)
                    .max_col_width(self.column_width)
                    .show(ui, |ui| {
                        for heading in &self.headings {
                            ui.add_sized(
                                [self.column_width, ROW_HEIGHT],
                                egui::Label::new(egui::RichText::new(heading).strong()),
                            );
                        }
                        ui.end_row();

                        for row in &self.rows {
                            for cell in row {
                                ui.add_sized([self.column_width, ROW_HEIGHT], egui::Label::new(cell.as_str()));
                            }
                            ui.end_row();
                        }
                    });
            });
        });
    }
}

impl TableViewer for WindowViewer {
    fn show(&mut self, table: &ParsedTable) -> LogResult<()> {
        info!(rows = table.row_count(), "Opening viewer window");

        let options = NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([self.config.window_width, self.config.window_height])
                .with_resizable(true)
                .with_title(&self.config.title),
            ..Default::default()
        };

        let app = TableApp {
            headings: table.display_headings(),
            rows: table.rows().to_vec(),
            column_width: f32::from(self.config.column_width),
        };

        // Blocks until the window is closed
        eframe::run_native(&self.config.title, options, Box::new(move |_cc| Ok(Box::new(app))))
            .map_err(|e| LogParserError::viewer(e.to_string()))
    }
}
