//! Overlay surfaces and display geometry

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::{OVERLAY_GLYPH_WIDTH, OVERLAY_LINE_HEIGHT};

use super::OverlayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// A physical display detected at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Display {
    pub name: String,
    pub bounds: Rect,
    pub primary: bool,
}

impl Display {
    pub fn new(name: impl Into<String>, bounds: Rect, primary: bool) -> Self {
        Self {
            name: name.into(),
            bounds,
            primary,
        }
    }
}

/// Estimate the size of a label rendered in the overlay font
pub fn estimate_text_size(text: &str) -> Size {
    let lines = text.lines().count().max(1) as u32;
    let widest = text.lines().map(|line| line.chars().count()).max().unwrap_or(0) as u32;
    Size {
        width: widest * OVERLAY_GLYPH_WIDTH,
        height: lines * OVERLAY_LINE_HEIGHT,
    }
}

/// A full-screen, always-on-top window covering one display
pub trait OverlaySurface: Send {
    fn display(&self) -> &Display;

    fn show(&mut self) -> Result<(), OverlayError>;

    fn hide(&mut self) -> Result<(), OverlayError>;

    fn is_visible(&self) -> bool;

    fn set_text(&mut self, text: &str);

    fn text(&self) -> &str;

    /// Move the label's top-left corner, relative to the surface
    fn place_label(&mut self, origin: Point);

    fn label_origin(&self) -> Option<Point>;

    fn measure_text(&self, text: &str) -> Size {
        estimate_text_size(text)
    }

    /// Release any window resources. The surface is not used afterwards.
    fn release(&mut self) {}
}

/// Surface that tracks overlay state without drawing anything.
///
/// The daemon uses it on every display; the HTTP API exposes its state so a
/// renderer can follow along.
#[derive(Debug)]
pub struct HeadlessSurface {
    display: Display,
    visible: bool,
    text: String,
    label_origin: Option<Point>,
}

impl HeadlessSurface {
    pub fn new(display: Display) -> Self {
        Self {
            display,
            visible: false,
            text: String::new(),
            label_origin: None,
        }
    }
}

impl OverlaySurface for HeadlessSurface {
    fn display(&self) -> &Display {
        &self.display
    }

    fn show(&mut self) -> Result<(), OverlayError> {
        if !self.visible {
            info!("Overlay shown on {}", self.display.name);
        }
        self.visible = true;
        Ok(())
    }

    fn hide(&mut self) -> Result<(), OverlayError> {
        if self.visible {
            info!("Overlay hidden on {}", self.display.name);
        }
        self.visible = false;
        Ok(())
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_text(&mut self, text: &str) {
        debug!("Overlay text on {}: {:?}", self.display.name, text);
        self.text = text.to_string();
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn place_label(&mut self, origin: Point) {
        self.label_origin = Some(origin);
    }

    fn label_origin(&self) -> Option<Point> {
        self.label_origin
    }

    fn release(&mut self) {
        self.visible = false;
        self.text.clear();
        self.label_origin = None;
    }
}
