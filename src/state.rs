use std::path::{Path, PathBuf};

use image::DynamicImage;

use crate::config::ViewerConfig;
use crate::data::loader;
use crate::data::model::{Direction, FileProperties, display_name, file_size, status_line};
use crate::data::siblings;
use crate::error::{Result, ViewerError};
use crate::presenter::{Presenter, WindowMode};
use crate::surface::{DisplaySurface, ZoomSteps};

const ABOUT_TITLE: &str = "Coreavor";
const ABOUT_TEXT: &str = "Simple image viewer";

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Everything the user (or the window) can ask the viewer to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(Option<PathBuf>),
    Save,
    SaveAs,
    Print,
    SetAsDesktopBackground,
    OpenContainingFolder,
    Properties,
    Exit,
    Rotate(i32),
    Trash,
    ZoomIn,
    ZoomOut,
    Fullscreen,
    About,
    Navigate(Direction),
    Resized([f32; 2]),
    DoubleClick,
}

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// The viewer controller, independent of rendering.
pub struct Viewer {
    config: ViewerConfig,

    /// Absolute path of the shown file (None until something is opened).
    current_file: Option<PathBuf>,

    /// Decoded pixels. None before the first open and after a failed decode.
    image: Option<DynamicImage>,

    zoom: ZoomSteps,

    surface: DisplaySurface,

    /// Status bar text.
    status: String,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        let zoom = ZoomSteps::new(config.min_zoom_step, config.max_zoom_step);
        Self {
            config,
            current_file: None,
            image: None,
            zoom,
            surface: DisplaySurface::default(),
            status: String::new(),
        }
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    pub fn image(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    pub fn surface(&self) -> &DisplaySurface {
        &self.surface
    }

    pub fn zoom_steps(&self) -> i32 {
        self.zoom.steps()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Dispatch a single command.
    pub fn handle(&mut self, command: Command, presenter: &mut dyn Presenter) -> Result<()> {
        match command {
            Command::Open(path) => self.open(path, presenter),
            Command::Save => {
                self.save()?;
            }
            Command::SaveAs
            | Command::Print
            | Command::SetAsDesktopBackground
            | Command::Trash => {
                log::debug!("{command:?} is not implemented");
            }
            Command::OpenContainingFolder => self.open_containing_folder(presenter)?,
            Command::Properties => {
                if let Some(props) = self.properties() {
                    log::debug!("properties: {props}");
                }
            }
            Command::Exit => presenter.request_exit(),
            Command::Rotate(degrees) => self.rotate(degrees)?,
            Command::ZoomIn => self.zoom_in(),
            Command::ZoomOut => self.zoom_out(),
            Command::Fullscreen => self.toggle_fullscreen(presenter),
            Command::About => presenter.show_message(ABOUT_TITLE, ABOUT_TEXT),
            Command::Navigate(direction) => self.navigate(direction, presenter)?,
            Command::Resized(viewport) => self.resized(viewport),
            Command::DoubleClick => self.double_click(presenter),
        }
        Ok(())
    }

    /// Open `path`, or ask the presenter for one. Cancelling changes nothing.
    pub fn open(&mut self, path: Option<PathBuf>, presenter: &mut dyn Presenter) {
        let path = match path {
            Some(path) => path,
            None => match presenter.pick_image_file(&self.config.default_dir) {
                Some(path) => path,
                None => return,
            },
        };

        self.current_file = Some(std::path::absolute(&path).unwrap_or(path));
        self.show(presenter);
    }

    /// Load the current file and present it fitted to the viewport.
    pub fn show(&mut self, presenter: &mut dyn Presenter) {
        let Some(path) = self.current_file.clone() else {
            return;
        };

        self.image = match loader::load_image(&path) {
            Ok(image) => {
                log::info!("Loaded {} ({}x{})", path.display(), image.width(), image.height());
                Some(image)
            }
            Err(e) => {
                log::warn!("Failed to decode image: {e:#}");
                None
            }
        };

        self.rebuild_surface();
        self.scale_to_fit(presenter.viewport_size());

        let name = display_name(&path);
        presenter.set_title(&name);
        self.status = status_line(&name, self.surface.size(), file_size(&path));
    }

    /// Reset the transform to the fit-to-window scale and the zoom counter to 0.
    pub fn scale_to_fit(&mut self, viewport: [f32; 2]) {
        self.surface.fit_to(viewport);
        self.zoom.reset();
    }

    pub fn zoom_in(&mut self) {
        if self.zoom.step_in() {
            self.surface.scale_by(self.config.zoom_factor);
        }
    }

    pub fn zoom_out(&mut self) {
        if self.zoom.step_out() {
            self.surface.scale_by(1.0 / self.config.zoom_factor);
        }
    }

    /// Step to the previous / next image of the current file's directory.
    pub fn navigate(&mut self, direction: Direction, presenter: &mut dyn Presenter) -> Result<()> {
        let current = self.current_file.as_deref().ok_or(ViewerError::NoCurrentFile)?;
        let target = siblings::neighbour(current, direction)?;
        self.open(Some(target), presenter);
        Ok(())
    }

    /// Rotate clockwise by a multiple of 90°. No-op without an image.
    pub fn rotate(&mut self, degrees: i32) -> Result<()> {
        let Some(image) = self.image.as_mut() else {
            return Ok(());
        };

        *image = match degrees.rem_euclid(360) {
            0 => return Ok(()),
            90 => image.rotate90(),
            180 => image.rotate180(),
            270 => image.rotate270(),
            _ => return Err(ViewerError::UnsupportedRotation(degrees)),
        };
        self.rebuild_surface();
        Ok(())
    }

    /// Write the image back to the current file.
    ///
    /// Returns `false` without touching the disk when there is no file or no
    /// image.
    pub fn save(&self) -> Result<bool> {
        let (Some(path), Some(image)) = (&self.current_file, &self.image) else {
            return Ok(false);
        };
        loader::save_image(image, path)?;
        log::info!("Saved {}", path.display());
        Ok(true)
    }

    pub fn properties(&self) -> Option<FileProperties> {
        self.current_file.as_deref().map(FileProperties::of)
    }

    pub fn open_containing_folder(&self, presenter: &mut dyn Presenter) -> Result<()> {
        let Some(dir) = self.current_file.as_deref().and_then(Path::parent) else {
            return Ok(());
        };
        presenter.open_folder(dir)?;
        Ok(())
    }

    pub fn toggle_fullscreen(&mut self, presenter: &mut dyn Presenter) {
        let mode = match presenter.window_mode() {
            WindowMode::Fullscreen => WindowMode::Normal,
            _ => WindowMode::Fullscreen,
        };
        presenter.set_window_mode(mode);
        // Hosts that apply the mode asynchronously report the new size later
        // through `resized`, which fits again.
        self.scale_to_fit(presenter.viewport_size());
    }

    pub fn resized(&mut self, viewport: [f32; 2]) {
        log::debug!("viewport resized to {viewport:?}");
        self.scale_to_fit(viewport);
    }

    pub fn double_click(&mut self, presenter: &mut dyn Presenter) {
        let mode = match presenter.window_mode() {
            WindowMode::Fullscreen => WindowMode::Maximized,
            _ => WindowMode::Fullscreen,
        };
        presenter.set_window_mode(mode);
    }

    fn rebuild_surface(&mut self) {
        let size = self
            .image
            .as_ref()
            .map(|img| [img.width(), img.height()])
            .unwrap_or([0, 0]);
        self.surface.rebuild(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};
    use std::fs;
    use tempfile::{TempDir, tempdir};

    /// Presenter that records what the viewer asked of it.
    struct FakePresenter {
        viewport: [f32; 2],
        pick: Option<PathBuf>,
        picked_from: Option<PathBuf>,
        title: Option<String>,
        messages: Vec<(String, String)>,
        opened_folders: Vec<PathBuf>,
        mode: WindowMode,
        /// Viewport reported once the window goes fullscreen.
        fullscreen_viewport: Option<[f32; 2]>,
        exit_requested: bool,
    }

    impl FakePresenter {
        fn new(viewport: [f32; 2]) -> Self {
            Self {
                viewport,
                pick: None,
                picked_from: None,
                title: None,
                messages: Vec::new(),
                opened_folders: Vec::new(),
                mode: WindowMode::Normal,
                fullscreen_viewport: None,
                exit_requested: false,
            }
        }
    }

    impl Presenter for FakePresenter {
        fn viewport_size(&self) -> [f32; 2] {
            self.viewport
        }

        fn pick_image_file(&mut self, start_dir: &Path) -> Option<PathBuf> {
            self.picked_from = Some(start_dir.to_path_buf());
            self.pick.clone()
        }

        fn set_title(&mut self, title: &str) {
            self.title = Some(title.to_string());
        }

        fn show_message(&mut self, title: &str, body: &str) {
            self.messages.push((title.to_string(), body.to_string()));
        }

        fn open_folder(&mut self, dir: &Path) -> anyhow::Result<()> {
            self.opened_folders.push(dir.to_path_buf());
            Ok(())
        }

        fn window_mode(&self) -> WindowMode {
            self.mode
        }

        fn set_window_mode(&mut self, mode: WindowMode) {
            self.mode = mode;
            if let (WindowMode::Fullscreen, Some(size)) = (mode, self.fullscreen_viewport) {
                self.viewport = size;
            }
        }

        fn request_exit(&mut self) {
            self.exit_requested = true;
        }
    }

    fn viewer() -> Viewer {
        Viewer::new(ViewerConfig {
            default_dir: PathBuf::from("/pictures"),
            ..ViewerConfig::default()
        })
    }

    fn write_png(dir: &TempDir, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.path().join(name);
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
            .save_with_format(&path, image::ImageFormat::Png)
            .expect("failed to write fixture");
        path
    }

    #[test]
    fn cancelled_open_changes_nothing() {
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);

        viewer.handle(Command::Open(None), &mut presenter).unwrap();

        assert_eq!(presenter.picked_from.as_deref(), Some(Path::new("/pictures")));
        assert!(viewer.current_file().is_none());
        assert!(viewer.image().is_none());
        assert!(presenter.title.is_none());
        assert_eq!(viewer.status(), "");
    }

    #[test]
    fn open_from_dialog_shows_image() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = write_png(&temp_dir, "cat.png", 40, 30);
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);
        presenter.pick = Some(path.clone());

        viewer.handle(Command::Open(None), &mut presenter).unwrap();

        assert_eq!(viewer.current_file(), Some(path.as_path()));
        assert_eq!(viewer.surface().size(), [40, 30]);
        assert_eq!(viewer.surface().scale(), 1.0);
        assert_eq!(presenter.title.as_deref(), Some("cat.png"));
        let bytes = fs::metadata(&path).unwrap().len();
        assert_eq!(viewer.status(), format!("cat.png 40x30px {bytes} B"));
    }

    #[test]
    fn large_image_is_fitted_to_viewport() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = write_png(&temp_dir, "wide.png", 1000, 100);
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);

        viewer.handle(Command::Open(Some(path)), &mut presenter).unwrap();

        assert_eq!(viewer.surface().scale(), 0.5);
    }

    #[test]
    fn undecodable_file_shows_empty_image() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("broken.png");
        fs::write(&path, b"0123456789").unwrap();
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);

        viewer.handle(Command::Open(Some(path)), &mut presenter).unwrap();

        assert!(viewer.image().is_none());
        assert_eq!(viewer.surface().size(), [0, 0]);
        assert_eq!(viewer.status(), "broken.png 0x0px 10 B");
        assert_eq!(presenter.title.as_deref(), Some("broken.png"));
    }

    #[test]
    fn zoom_is_bounded_and_reset_by_new_image() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = write_png(&temp_dir, "a.png", 10, 10);
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);
        viewer.open(Some(path.clone()), &mut presenter);

        for _ in 0..13 {
            viewer.handle(Command::ZoomIn, &mut presenter).unwrap();
        }
        assert_eq!(viewer.zoom_steps(), 12);
        let expected = 1.2f32.powi(12);
        assert!((viewer.surface().scale() - expected).abs() < 1e-3);

        viewer.open(Some(path), &mut presenter);
        assert_eq!(viewer.zoom_steps(), 0);
        assert_eq!(viewer.surface().scale(), 1.0);

        for _ in 0..9 {
            viewer.handle(Command::ZoomOut, &mut presenter).unwrap();
        }
        assert_eq!(viewer.zoom_steps(), -8);
        let expected = 1.2f32.powi(-8);
        assert!((viewer.surface().scale() - expected).abs() < 1e-4);
    }

    #[test]
    fn rotate_swaps_dimensions_and_four_turns_round_trip() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = write_png(&temp_dir, "tall.png", 3, 7);
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);
        viewer.open(Some(path), &mut presenter);

        viewer.handle(Command::Rotate(90), &mut presenter).unwrap();
        assert_eq!(viewer.surface().size(), [7, 3]);

        for _ in 0..3 {
            viewer.handle(Command::Rotate(90), &mut presenter).unwrap();
        }
        assert_eq!(viewer.surface().size(), [3, 7]);
        assert_eq!(viewer.image().unwrap().dimensions(), (3, 7));
    }

    #[test]
    fn rotate_without_image_is_noop() {
        let mut viewer = viewer();
        let revision = viewer.surface().revision();

        viewer.rotate(90).unwrap();

        assert_eq!(viewer.surface().revision(), revision);
    }

    #[test]
    fn rotate_rejects_odd_angles() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = write_png(&temp_dir, "a.png", 2, 2);
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);
        viewer.open(Some(path), &mut presenter);

        let err = viewer.rotate(45).unwrap_err();
        assert!(matches!(err, ViewerError::UnsupportedRotation(45)));
        assert!(viewer.rotate(-90).is_ok());
    }

    #[test]
    fn save_without_file_writes_nothing() {
        let viewer = viewer();
        assert!(!viewer.save().unwrap());
    }

    #[test]
    fn save_writes_rotated_image_back() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = write_png(&temp_dir, "photo.png", 5, 2);
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);
        viewer.open(Some(path.clone()), &mut presenter);
        viewer.rotate(90).unwrap();

        assert!(viewer.save().unwrap());

        let reloaded = loader::load_image(&path).unwrap();
        assert_eq!(reloaded.dimensions(), (2, 5));
    }

    #[test]
    fn save_with_failed_decode_leaves_file_alone() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("broken.png");
        fs::write(&path, b"junk").unwrap();
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);
        viewer.open(Some(path.clone()), &mut presenter);

        assert!(!viewer.save().unwrap());
        assert_eq!(fs::read(&path).unwrap(), b"junk");
    }

    #[test]
    fn navigate_walks_sorted_siblings_with_wrap() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let a = write_png(&temp_dir, "a.jpg", 4, 4);
        let b = write_png(&temp_dir, "b.png", 4, 4);
        let c = write_png(&temp_dir, "c.gif", 4, 4);
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);
        viewer.open(Some(b), &mut presenter);

        viewer.handle(Command::Navigate(Direction::Next), &mut presenter).unwrap();
        assert_eq!(viewer.current_file(), Some(c.as_path()));

        viewer.handle(Command::Navigate(Direction::Next), &mut presenter).unwrap();
        assert_eq!(viewer.current_file(), Some(a.as_path()));
        assert_eq!(presenter.title.as_deref(), Some("a.jpg"));

        viewer.handle(Command::Navigate(Direction::Previous), &mut presenter).unwrap();
        assert_eq!(viewer.current_file(), Some(c.as_path()));
    }

    #[test]
    fn navigate_resets_zoom() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let a = write_png(&temp_dir, "a.png", 4, 4);
        write_png(&temp_dir, "b.png", 4, 4);
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);
        viewer.open(Some(a), &mut presenter);
        viewer.zoom_in();
        viewer.zoom_in();

        viewer.navigate(Direction::Next, &mut presenter).unwrap();

        assert_eq!(viewer.zoom_steps(), 0);
    }

    #[test]
    fn navigate_without_file_fails() {
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);

        let err = viewer.navigate(Direction::Next, &mut presenter).unwrap_err();
        assert!(matches!(err, ViewerError::NoCurrentFile));
    }

    #[test]
    fn navigate_from_unlisted_file_keeps_state() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        write_png(&temp_dir, "a.png", 4, 4);
        let odd = write_png(&temp_dir, "odd.bmp.data", 4, 4);
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);
        viewer.open(Some(odd.clone()), &mut presenter);

        let err = viewer.navigate(Direction::Next, &mut presenter).unwrap_err();

        assert!(matches!(err, ViewerError::NotFound(_)));
        assert_eq!(viewer.current_file(), Some(odd.as_path()));
    }

    #[test]
    fn resize_refits_and_resets_zoom() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = write_png(&temp_dir, "a.png", 800, 600);
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([1000.0, 1000.0]);
        viewer.open(Some(path), &mut presenter);
        viewer.zoom_in();

        viewer.handle(Command::Resized([400.0, 600.0]), &mut presenter).unwrap();

        assert_eq!(viewer.surface().scale(), 0.5);
        assert_eq!(viewer.zoom_steps(), 0);
    }

    #[test]
    fn oversized_svg_shows_empty_image() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("huge.svg");
        fs::write(
            &path,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="200000" height="200000"/>"#,
        )
        .unwrap();
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);

        viewer.handle(Command::Open(Some(path)), &mut presenter).unwrap();

        assert!(viewer.image().is_none());
        assert_eq!(viewer.surface().size(), [0, 0]);
        assert!(viewer.status().starts_with("huge.svg 0x0px "));
    }

    #[test]
    fn fullscreen_fits_against_new_viewport() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = write_png(&temp_dir, "a.png", 800, 600);
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([400.0, 600.0]);
        presenter.fullscreen_viewport = Some([1600.0, 1200.0]);
        viewer.open(Some(path), &mut presenter);
        assert_eq!(viewer.surface().scale(), 0.5);
        viewer.zoom_out();

        viewer.handle(Command::Fullscreen, &mut presenter).unwrap();

        assert_eq!(viewer.surface().scale(), 1.0);
        assert_eq!(viewer.zoom_steps(), 0);
    }

    #[test]
    fn fullscreen_toggles_and_double_click_alternates_with_maximized() {
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);

        viewer.handle(Command::Fullscreen, &mut presenter).unwrap();
        assert_eq!(presenter.mode, WindowMode::Fullscreen);
        viewer.handle(Command::Fullscreen, &mut presenter).unwrap();
        assert_eq!(presenter.mode, WindowMode::Normal);

        viewer.handle(Command::DoubleClick, &mut presenter).unwrap();
        assert_eq!(presenter.mode, WindowMode::Fullscreen);
        viewer.handle(Command::DoubleClick, &mut presenter).unwrap();
        assert_eq!(presenter.mode, WindowMode::Maximized);
    }

    #[test]
    fn containing_folder_is_parent_of_current_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = write_png(&temp_dir, "a.png", 2, 2);
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);

        viewer.handle(Command::OpenContainingFolder, &mut presenter).unwrap();
        assert!(presenter.opened_folders.is_empty());

        viewer.open(Some(path), &mut presenter);
        viewer.handle(Command::OpenContainingFolder, &mut presenter).unwrap();
        assert_eq!(presenter.opened_folders, [temp_dir.path().to_path_buf()]);
    }

    #[test]
    fn about_exit_and_stubs() {
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);

        let stubs = [
            Command::SaveAs,
            Command::Print,
            Command::SetAsDesktopBackground,
            Command::Trash,
        ];
        for stub in stubs {
            viewer.handle(stub, &mut presenter).unwrap();
        }
        assert!(viewer.current_file().is_none());

        viewer.handle(Command::About, &mut presenter).unwrap();
        let about = ("Coreavor".to_string(), "Simple image viewer".to_string());
        assert_eq!(presenter.messages, [about]);

        viewer.handle(Command::Exit, &mut presenter).unwrap();
        assert!(presenter.exit_requested);
    }

    #[test]
    fn properties_report_path_and_size() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = write_png(&temp_dir, "a.png", 2, 2);
        let mut viewer = viewer();
        let mut presenter = FakePresenter::new([500.0, 400.0]);
        assert!(viewer.properties().is_none());

        viewer.open(Some(path.clone()), &mut presenter);

        let props = viewer.properties().unwrap();
        assert_eq!(props.path, path);
        assert_eq!(props.size_bytes, fs::metadata(&path).unwrap().len());
    }
}
