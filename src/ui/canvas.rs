use eframe::egui::{self, ColorImage, Rect, Sense, TextureHandle, TextureOptions, Ui, Vec2};
use image::DynamicImage;

use crate::state::{Command, Viewer};

// ---------------------------------------------------------------------------
// Texture cache
// ---------------------------------------------------------------------------

/// GPU copy of the viewer's image, tagged with the surface revision it was
/// uploaded for.
#[derive(Default)]
pub struct ImageTexture {
    revision: Option<u64>,
    handle: Option<TextureHandle>,
}

impl ImageTexture {
    /// Re-upload when the viewer rebuilt its surface since the last frame.
    pub fn sync(&mut self, ctx: &egui::Context, viewer: &Viewer) {
        let revision = viewer.surface().revision();
        if self.revision == Some(revision) {
            return;
        }
        self.revision = Some(revision);
        self.handle = viewer.image().map(|image| upload(ctx, image));
    }
}

fn upload(ctx: &egui::Context, image: &DynamicImage) -> TextureHandle {
    let max_side = ctx.input(|i| i.max_texture_side) as u32;

    // The texture is only a preview; the surface keeps the full pixel size.
    let rgba = if image.width() > max_side || image.height() > max_side {
        image.thumbnail(max_side, max_side).to_rgba8()
    } else {
        image.to_rgba8()
    };

    let size = [rgba.width() as usize, rgba.height() as usize];
    let color_image = ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
    ctx.load_texture("coreavor_image", color_image, TextureOptions::LINEAR)
}

// ---------------------------------------------------------------------------
// Central image view
// ---------------------------------------------------------------------------

/// Draw the image at the surface scale inside a scroll area (for panning).
///
/// Returns the viewport size the image is fitted against.
pub fn image_view(
    ui: &mut Ui,
    viewer: &Viewer,
    texture: &ImageTexture,
    commands: &mut Vec<Command>,
) -> [f32; 2] {
    let viewport = ui.available_size();

    if viewer.current_file().is_none() {
        let response = ui
            .centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open an image to view it  (Image → Open…)");
            })
            .response
            .interact(Sense::click());
        if response.double_clicked() {
            commands.push(Command::DoubleClick);
        }
        return [viewport.x, viewport.y];
    }

    let [w, h] = viewer.surface().scaled_size();
    let content = Vec2::new(w, h);

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            let area = content.max(ui.available_size());
            let (rect, response) = ui.allocate_exact_size(area, Sense::click());

            if let Some(handle) = &texture.handle {
                let image_rect = Rect::from_center_size(rect.center(), content);
                egui::Image::new((handle.id(), content)).paint_at(ui, image_rect);
            }

            if response.double_clicked() {
                commands.push(Command::DoubleClick);
            }
        });

    [viewport.x, viewport.y]
}
