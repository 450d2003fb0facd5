use eframe::egui::{self, Color32, Key, KeyboardShortcut, Modifiers, RichText, Ui};

use crate::data::model::{Direction, zoom_label};
use crate::state::{Command, Viewer};
use crate::ui::shell::InfoDialog;

const OPEN: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::O);
const SAVE: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::S);
const EXIT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::Q);

// ---------------------------------------------------------------------------
// Top bar – menus and navigation toolbar
// ---------------------------------------------------------------------------

/// Render the menu bar. Clicked entries are appended to `commands`.
pub fn top_bar(ui: &mut Ui, commands: &mut Vec<Command>) {
    let ctx = ui.ctx().clone();

    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("Image", |ui: &mut Ui| {
            let open = Some(ctx.format_shortcut(&OPEN));
            let save = Some(ctx.format_shortcut(&SAVE));
            let exit = Some(ctx.format_shortcut(&EXIT));
            menu_item(ui, commands, "Open…", open, Command::Open(None));
            menu_item(ui, commands, "Save", save, Command::Save);
            menu_item(ui, commands, "Save As…", None, Command::SaveAs);
            ui.separator();
            menu_item(ui, commands, "Print…", None, Command::Print);
            let wallpaper = Command::SetAsDesktopBackground;
            menu_item(ui, commands, "Set as Desktop Background", None, wallpaper);
            let folder = Command::OpenContainingFolder;
            menu_item(ui, commands, "Open Containing Folder", None, folder);
            menu_item(ui, commands, "Properties", None, Command::Properties);
            ui.separator();
            menu_item(ui, commands, "Exit", exit, Command::Exit);
        });

        ui.menu_button("Edit", |ui: &mut Ui| {
            menu_item(ui, commands, "Rotate", Some("R".into()), Command::Rotate(90));
            menu_item(ui, commands, "Move to Trash", None, Command::Trash);
        });

        ui.menu_button("View", |ui: &mut Ui| {
            menu_item(ui, commands, "Zoom In", Some("+".into()), Command::ZoomIn);
            menu_item(ui, commands, "Zoom Out", Some("-".into()), Command::ZoomOut);
            menu_item(ui, commands, "Fullscreen", Some("F11".into()), Command::Fullscreen);
        });

        ui.menu_button("Help", |ui: &mut Ui| {
            menu_item(ui, commands, "About", None, Command::About);
        });

        ui.separator();

        if ui.button("◀ Previous").clicked() {
            commands.push(Command::Navigate(Direction::Previous));
        }
        if ui.button("Next ▶").clicked() {
            commands.push(Command::Navigate(Direction::Next));
        }
    });
}

fn menu_item(
    ui: &mut Ui,
    commands: &mut Vec<Command>,
    label: &str,
    shortcut: Option<String>,
    command: Command,
) {
    let mut button = egui::Button::new(label);
    if let Some(text) = shortcut {
        button = button.shortcut_text(text);
    }
    if ui.add(button).clicked() {
        commands.push(command);
        ui.close_menu();
    }
}

// ---------------------------------------------------------------------------
// Keyboard shortcuts
// ---------------------------------------------------------------------------

/// Translate this frame's key presses into commands.
pub fn shortcuts(ctx: &egui::Context, commands: &mut Vec<Command>) {
    ctx.input_mut(|input| {
        if input.consume_shortcut(&OPEN) {
            commands.push(Command::Open(None));
        }
        if input.consume_shortcut(&SAVE) {
            commands.push(Command::Save);
        }
        if input.consume_shortcut(&EXIT) {
            commands.push(Command::Exit);
        }

        let plain = [
            (Key::ArrowLeft, Command::Navigate(Direction::Previous)),
            (Key::ArrowRight, Command::Navigate(Direction::Next)),
            (Key::Plus, Command::ZoomIn),
            (Key::Equals, Command::ZoomIn),
            (Key::Minus, Command::ZoomOut),
            (Key::R, Command::Rotate(90)),
            (Key::F11, Command::Fullscreen),
        ];
        for (key, command) in plain {
            if input.consume_key(Modifiers::NONE, key) {
                commands.push(command);
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Status bar
// ---------------------------------------------------------------------------

pub fn status_bar(ui: &mut Ui, viewer: &Viewer, error: Option<&str>) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(viewer.status());
        if let Some(msg) = error {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
        if viewer.current_file().is_some() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
                ui.label(zoom_label(viewer.surface().scale(), viewer.zoom_steps()));
            });
        }
    });
}

// ---------------------------------------------------------------------------
// Informational dialog
// ---------------------------------------------------------------------------

/// Show `dialog` until the user dismisses it.
pub fn info_dialog(ctx: &egui::Context, dialog: &mut Option<InfoDialog>) {
    let Some(info) = dialog else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new(info.title.as_str())
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui: &mut Ui| {
            ui.label(info.body.as_str());
            ui.add_space(8.0);
            ui.vertical_centered(|ui: &mut Ui| {
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });
        });

    if dismissed {
        *dialog = None;
    }
}
