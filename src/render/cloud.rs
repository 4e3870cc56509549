//! Word-cloud painting.
//!
//! Takes a computed `CloudLayout` and paints it over the configured
//! background, scaled to the available panel width. Word colors cycle the
//! palette that stays readable over the chosen background.

use egui::{Align2, Color32, FontId, Pos2, Sense, Vec2};

use crate::cloud::CloudLayout;
use crate::render::palette_for;

/// Paint the layout into the current panel.
pub fn draw(ui: &mut egui::Ui, layout: &CloudLayout, background: Color32) {
    let avail = ui.available_width();
    let scale = (avail / layout.width).min(1.0);
    let size = Vec2::new(layout.width * scale, layout.height * scale);

    let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, background);

    let palette = palette_for(background);
    for word in &layout.words {
        let center = Pos2::new(
            rect.left() + (word.x + word.width * 0.5) * scale,
            rect.top() + (word.y + word.height * 0.5) * scale,
        );
        painter.text(
            center,
            Align2::CENTER_CENTER,
            &word.text,
            FontId::proportional(word.font_size * scale),
            palette[word.color_index % palette.len()],
        );
    }
}
