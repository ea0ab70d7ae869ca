use eframe::egui::Ui;
use egui_plot::{Corner, Legend, Line, LineStyle, MarkerShape, Plot, PlotPoints, Points};

use crate::figure::TraceKind;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Training plot (central panel)
// ---------------------------------------------------------------------------

/// Render the figure of the last pipeline run in the central panel.
pub fn training_plot(ui: &mut Ui, state: &AppState) {
    let output = match &state.output {
        Some(out) => out,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a training log to view trends  (File → Open…)");
            });
            return;
        }
    };
    let figure = &output.figure;

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(figure.title.as_str());
    });

    Plot::new("training_plot")
        .legend(Legend::default().position(Corner::LeftTop))
        .x_axis_label(figure.x_label.as_str())
        .y_axis_label(figure.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for trace in state.visible.iter().flat_map(|&l| figure.traces_for(l)) {
                match trace.kind {
                    TraceKind::LinesMarkers => {
                        let color = state.colors.color_for(trace.label);
                        // Same name, so the legend groups line and markers.
                        plot_ui.line(
                            Line::new(plot_points(&trace.points))
                                .name(&trace.name)
                                .color(color)
                                .width(2.0),
                        );
                        plot_ui.points(
                            Points::new(plot_points(&trace.points))
                                .name(&trace.name)
                                .color(color)
                                .shape(MarkerShape::Circle)
                                .filled(true)
                                .radius(4.0),
                        );
                    }
                    TraceKind::DashedLine => {
                        plot_ui.line(
                            Line::new(plot_points(&trace.points))
                                .name(&trace.name)
                                .color(state.colors.trend_color_for(trace.label))
                                .style(LineStyle::dashed_loose())
                                .width(1.5),
                        );
                    }
                }
            }
        });
}

fn plot_points(points: &[[f64; 2]]) -> PlotPoints {
    points.iter().copied().collect()
}
