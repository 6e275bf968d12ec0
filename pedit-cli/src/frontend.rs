//! Presentation adapter: drives an `ImageEditor` on behalf of a front end
//!
//! The editor holds no UI state. A [`Session`] pairs it with the view state
//! and settings, and talks to whatever renders it through [`Frontend`].

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use pedit_core::{EditError, Operation};
use pedit_io::{ErrorKind, ImageBuffer, ImageEditor};
use tracing::{error, warn};

use crate::settings::EditorSettings;
use crate::view::ViewState;

pub const OPEN_FAILED: &str = "Unable to open image.";
pub const NOTHING_TO_SAVE: &str = "There is no image to save.";
pub const SAVE_FAILED: &str = "Unable to save image.";

/// What a session needs from the thing presenting it
pub trait Frontend {
    /// A new image is ready to be shown
    fn notify_image_loaded(&mut self, buffer: &ImageBuffer);

    fn notify_error(&mut self, message: &str);

    /// Ask for a file to open, `None` when the user cancels
    fn request_open_path(&mut self) -> Option<PathBuf>;

    /// Ask for a file to save to, `None` when the user cancels
    fn request_save_path(&mut self) -> Option<PathBuf>;
}

/// Toolbar actions whose exact effect comes from the settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    RotateCw,
    RotateCcw,
    FlipHorizontal,
    FlipVertical,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::RotateCw => "rotate-cw",
            Action::RotateCcw => "rotate-ccw",
            Action::FlipHorizontal => "flip-horizontal",
            Action::FlipVertical => "flip-vertical",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "rotate-cw" => Ok(Action::RotateCw),
            "rotate-ccw" => Ok(Action::RotateCcw),
            "flip-horizontal" | "flip-h" => Ok(Action::FlipHorizontal),
            "flip-vertical" | "flip-v" => Ok(Action::FlipVertical),
            other => Err(EditError::invalid(format!("unknown action '{other}'"))),
        }
    }
}

/// One command-line edit: a settings-driven action or a plain operation
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Action(Action),
    Operation(Operation),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Action(action) => fmt::Display::fmt(action, f),
            Step::Operation(operation) => fmt::Display::fmt(operation, f),
        }
    }
}

impl FromStr for Step {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<Action>() {
            Ok(action) => Ok(Step::Action(action)),
            Err(_) => s.parse().map(Step::Operation),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    editor: ImageEditor,
    view: ViewState,
    settings: EditorSettings,
}

impl Session {
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            editor: ImageEditor::new(),
            view: ViewState::new(settings.zoom_factor),
            settings,
        }
    }

    pub fn editor(&self) -> &ImageEditor {
        &self.editor
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Open the file the front end picks. Returns whether an image was loaded.
    pub fn open_image<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> bool {
        let Some(path) = frontend.request_open_path() else {
            return false;
        };

        match self.editor.load(&path) {
            Ok(()) => {
                let (width, height) = self.editor.buffer().dimensions();
                self.view.image_loaded(width, height);
                frontend.notify_image_loaded(self.editor.buffer());
                true
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "open failed");
                frontend.notify_error(OPEN_FAILED);
                false
            }
        }
    }

    /// Save to the file the front end picks. Returns whether a file was written.
    pub fn save_image<F: Frontend + ?Sized>(&mut self, frontend: &mut F) -> bool {
        if !self.editor.is_loaded() {
            frontend.notify_error(NOTHING_TO_SAVE);
            return false;
        }
        let Some(path) = frontend.request_save_path() else {
            return false;
        };

        match self.editor.save(&path) {
            Ok(()) => true,
            Err(err) => {
                error!(path = %path.display(), error = %err, "save failed");
                let message = match err.kind() {
                    ErrorKind::EmptyImage => NOTHING_TO_SAVE,
                    _ => SAVE_FAILED,
                };
                frontend.notify_error(message);
                false
            }
        }
    }

    /// Apply one operation, enforcing the slider ranges from the settings
    pub fn apply(&mut self, operation: &Operation) -> pedit_io::Result<()> {
        self.check_sliders(operation)?;
        self.editor.apply(operation)?;

        let (width, height) = self.editor.buffer().dimensions();
        self.view.image_resized(width, height);
        Ok(())
    }

    pub fn perform(&mut self, action: Action) -> pedit_io::Result<()> {
        match action {
            Action::RotateCw => self.rotate_cw(),
            Action::RotateCcw => self.rotate_ccw(),
            Action::FlipHorizontal => self.flip_horizontal(),
            Action::FlipVertical => self.flip_vertical(),
        }
    }

    pub fn run(&mut self, step: &Step) -> pedit_io::Result<()> {
        match step {
            Step::Action(action) => self.perform(*action),
            Step::Operation(operation) => self.apply(operation),
        }
    }

    pub fn rotate_cw(&mut self) -> pedit_io::Result<()> {
        let degrees = f64::from(self.settings.rotation_direction.cw);
        self.apply(&Operation::Rotate { degrees })
    }

    pub fn rotate_ccw(&mut self) -> pedit_io::Result<()> {
        let degrees = f64::from(self.settings.rotation_direction.ccw);
        self.apply(&Operation::Rotate { degrees })
    }

    pub fn flip_horizontal(&mut self) -> pedit_io::Result<()> {
        let axis = self
            .settings
            .horizontal_flip()
            .ok_or_else(|| EditError::invalid("horizontal reflection is not a flip"))?;
        self.apply(&Operation::Flip { axis })
    }

    pub fn flip_vertical(&mut self) -> pedit_io::Result<()> {
        let axis = self
            .settings
            .vertical_flip()
            .ok_or_else(|| EditError::invalid("vertical reflection is not a flip"))?;
        self.apply(&Operation::Flip { axis })
    }

    pub fn zoom_in(&mut self) -> Option<f64> {
        self.view.zoom_in()
    }

    pub fn zoom_out(&mut self) -> Option<f64> {
        self.view.zoom_out()
    }

    pub fn normal_size(&mut self) {
        self.view.normal_size();
    }

    /// Zoom for a mouse wheel delta; other deltas are ignored
    pub fn wheel(&mut self, delta: i32) -> Option<f64> {
        if delta == self.settings.mousewheel_up {
            self.zoom_in()
        } else if delta == self.settings.mousewheel_down {
            self.zoom_out()
        } else {
            None
        }
    }

    fn check_sliders(&self, operation: &Operation) -> pedit_io::Result<()> {
        let (name, amount, range) = match *operation {
            Operation::Brightness { amount } => {
                ("brightness", amount, self.settings.brightness_range())
            }
            Operation::Contrast { amount } => ("contrast", amount, self.settings.contrast_range()),
            _ => return Ok(()),
        };

        if !range.contains(&amount) {
            warn!(operation = name, amount, "outside slider range");
            return Err(EditError::invalid(format!(
                "{name} {amount} outside slider range [{}, {}]",
                range.start(),
                range.end()
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pedit_core::{PixelGrid, Rgba};
    use tempfile::TempDir;

    /// Front end that answers with fixed paths and records what it is told
    #[derive(Default)]
    struct Scripted {
        open: Option<PathBuf>,
        save: Option<PathBuf>,
        loaded: Vec<(u32, u32)>,
        errors: Vec<String>,
    }

    impl Frontend for Scripted {
        fn notify_image_loaded(&mut self, buffer: &ImageBuffer) {
            self.loaded.push(buffer.dimensions());
        }

        fn notify_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }

        fn request_open_path(&mut self) -> Option<PathBuf> {
            self.open.clone()
        }

        fn request_save_path(&mut self) -> Option<PathBuf> {
            self.save.clone()
        }
    }

    fn write_png(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("in.png");
        let editor = ImageEditor::with_buffer(ImageBuffer::from_grid(PixelGrid::filled(
            4,
            2,
            Rgba::rgb(30, 60, 90),
        )));
        editor.save(&path).unwrap();
        path
    }

    #[test]
    fn test_open_cancel_is_silent() {
        let mut session = Session::new(EditorSettings::default());
        let mut frontend = Scripted::default();

        assert!(!session.open_image(&mut frontend));
        assert!(frontend.errors.is_empty());
        assert!(!session.view().actions().save);
    }

    #[test]
    fn test_open_failure_message() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new(EditorSettings::default());
        let mut frontend = Scripted {
            open: Some(dir.path().join("missing.png")),
            ..Default::default()
        };

        assert!(!session.open_image(&mut frontend));
        assert_eq!(frontend.errors, vec![OPEN_FAILED.to_string()]);
    }

    #[test]
    fn test_open_enables_actions() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new(EditorSettings::default());
        let mut frontend = Scripted {
            open: Some(write_png(&dir)),
            ..Default::default()
        };

        assert!(session.open_image(&mut frontend));
        assert_eq!(frontend.loaded, vec![(4, 2)]);
        assert!(session.view().actions().zoom_in);
        assert_eq!(session.view().displayed_size(), Some((4, 2)));
    }

    #[test]
    fn test_save_messages() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new(EditorSettings::default());
        let mut frontend = Scripted {
            save: Some(dir.path().join("out.png")),
            ..Default::default()
        };

        assert!(!session.save_image(&mut frontend));
        assert_eq!(frontend.errors, vec![NOTHING_TO_SAVE.to_string()]);

        frontend.open = Some(write_png(&dir));
        assert!(session.open_image(&mut frontend));

        frontend.save = Some(dir.path().join("out.unknown"));
        assert!(!session.save_image(&mut frontend));
        assert_eq!(frontend.errors.last().unwrap(), SAVE_FAILED);

        frontend.save = Some(dir.path().join("out.bmp"));
        assert!(session.save_image(&mut frontend));
        assert!(dir.path().join("out.bmp").exists());

        frontend.save = None;
        assert!(!session.save_image(&mut frontend));
        assert_eq!(frontend.errors.len(), 2);
    }

    #[test]
    fn test_actions_use_settings() {
        let dir = TempDir::new().unwrap();
        let mut settings = EditorSettings::default();
        settings.brightness_min_value = -10;
        settings.brightness_max_value = 10;
        settings.mousewheel_up = 15;
        let mut session = Session::new(settings);
        let mut frontend = Scripted {
            open: Some(write_png(&dir)),
            ..Default::default()
        };
        session.open_image(&mut frontend);

        session.rotate_cw().unwrap();
        assert_eq!(session.editor().buffer().dimensions(), (2, 4));
        assert_eq!(session.view().displayed_size(), Some((2, 4)));
        session.rotate_ccw().unwrap();
        session.flip_vertical().unwrap();
        session.flip_horizontal().unwrap();
        assert_eq!(
            session.editor().buffer().current(),
            session.editor().buffer().original()
        );

        let err = session.apply(&Operation::Brightness { amount: 50 }).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        session.apply(&Operation::Brightness { amount: 10 }).unwrap();

        assert_eq!(session.wheel(15), Some(1.25));
        assert_eq!(session.wheel(120), None);
        assert_eq!(session.wheel(-120), Some(0.75));
    }

    #[test]
    fn test_step_parsing() {
        assert_eq!("rotate-cw".parse::<Step>().unwrap(), Step::Action(Action::RotateCw));
        assert_eq!("flip-v".parse::<Step>().unwrap(), Step::Action(Action::FlipVertical));
        assert_eq!(
            "rotate:cw".parse::<Step>().unwrap(),
            Step::Operation(Operation::Rotate { degrees: 90.0 })
        );
        assert_eq!(Step::Action(Action::FlipHorizontal).to_string(), "flip-horizontal");
        assert!("spin".parse::<Step>().is_err());
    }

    #[test]
    fn test_run_actions_follow_settings() {
        let dir = TempDir::new().unwrap();
        let mut settings = EditorSettings::default();
        settings.rotation_direction.cw = -90;
        settings.reflection_direction.horizontal = [1.0, -1.0];
        let mut session = Session::new(settings);
        let mut frontend = Scripted {
            open: Some(write_png(&dir)),
            ..Default::default()
        };
        session.open_image(&mut frontend);

        // Horizontal action configured as a vertical flip
        session.run(&Step::Action(Action::FlipHorizontal)).unwrap();
        session
            .run(&"flip:v".parse::<Step>().unwrap())
            .unwrap();
        assert_eq!(
            session.editor().buffer().current(),
            session.editor().buffer().original()
        );

        // Clockwise configured as -90 undoes an explicit rotate:90
        session.run(&Step::Operation(Operation::Rotate { degrees: 90.0 })).unwrap();
        session.run(&Step::Action(Action::RotateCw)).unwrap();
        assert_eq!(
            session.editor().buffer().current(),
            session.editor().buffer().original()
        );
    }

    #[test]
    fn test_normal_size_after_wheel() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new(EditorSettings::default());
        let mut frontend = Scripted {
            open: Some(write_png(&dir)),
            ..Default::default()
        };
        session.open_image(&mut frontend);

        assert_eq!(session.wheel(120), Some(1.25));
        assert_eq!(session.view().displayed_size(), Some((5, 3)));
        session.normal_size();
        assert_eq!(session.view().displayed_size(), Some((4, 2)));
    }
}
