// Drawing seam for the particle field. The simulation only talks to the
// Surface trait, CanvasRenderer is the browser implementation on top of
// the canvas 2d context.

use crate::color::Color;
use crate::error::{Error, Result};
use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub trait Surface {
    fn resize(&mut self, width: f64, height: f64);
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color) -> Result<()>;
    fn stroke_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        opacity: f64,
        width: f64,
    );
}

pub struct CanvasRenderer {
    pub canvas: HtmlCanvasElement,
    pub context: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    // Grabs the 2d context from the canvas, fails if the canvas has none to give
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(|_| Error::ContextUnavailable)?
            .ok_or(Error::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| Error::ContextUnavailable)?;
        debug!(
            "2d context ready on {}x{} canvas",
            canvas.width(),
            canvas.height()
        );
        Ok(CanvasRenderer { canvas, context })
    }

    pub fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    pub fn height(&self) -> f64 {
        self.canvas.height() as f64
    }
}

impl Surface for CanvasRenderer {
    fn resize(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color) -> Result<()> {
        self.context.begin_path();
        self.context
            .arc(center[0], center[1], radius, 0.0, std::f64::consts::PI * 2.0)
            .map_err(|err| Error::Draw(format!("{:?}", err)))?;
        self.context
            .set_fill_style(&JsValue::from_str(&color.to_css()));
        self.context.fill();
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        color: Color,
        opacity: f64,
        width: f64,
    ) {
        self.context
            .set_stroke_style(&JsValue::from_str(&color.to_css_with_opacity(opacity)));
        self.context.set_line_width(width);
        self.context.begin_path();
        self.context.move_to(from[0], from[1]);
        self.context.line_to(to[0], to[1]);
        self.context.stroke();
    }
}

#[cfg(test)]
pub mod recording {
    // Surface double that records draw calls instead of rasterizing them

    use super::Surface;
    use crate::color::Color;
    use crate::error::Result;

    #[derive(Clone, Debug, PartialEq)]
    pub enum DrawCall {
        Clear { width: f64, height: f64 },
        Circle { center: [f64; 2], radius: f64, color: Color },
        Line {
            from: [f64; 2],
            to: [f64; 2],
            color: Color,
            opacity: f64,
            width: f64,
        },
    }

    #[derive(Default)]
    pub struct RecordingSurface {
        pub size: (f64, f64),
        pub calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        pub fn circles(&self) -> Vec<&DrawCall> {
            self.calls
                .iter()
                .filter(|call| matches!(call, DrawCall::Circle { .. }))
                .collect()
        }

        pub fn lines(&self) -> Vec<&DrawCall> {
            self.calls
                .iter()
                .filter(|call| matches!(call, DrawCall::Line { .. }))
                .collect()
        }

        pub fn lines_to(&self, point: [f64; 2]) -> usize {
            self.calls
                .iter()
                .filter(|call| match call {
                    DrawCall::Line { to, .. } => *to == point,
                    _ => false,
                })
                .count()
        }
    }

    impl Surface for RecordingSurface {
        fn resize(&mut self, width: f64, height: f64) {
            self.size = (width, height);
        }

        fn clear(&mut self, width: f64, height: f64) {
            self.calls.clear();
            self.calls.push(DrawCall::Clear { width, height });
        }

        fn fill_circle(&mut self, center: [f64; 2], radius: f64, color: Color) -> Result<()> {
            self.calls.push(DrawCall::Circle {
                center,
                radius,
                color,
            });
            Ok(())
        }

        fn stroke_line(
            &mut self,
            from: [f64; 2],
            to: [f64; 2],
            color: Color,
            opacity: f64,
            width: f64,
        ) {
            self.calls.push(DrawCall::Line {
                from,
                to,
                color,
                opacity,
                width,
            });
        }
    }
}
