//! Diagnostic top-down PNG renderer.
//!
//! Stands in for the external photoreal renderer: rasterizes the belt and
//! item footprints as flat colored rectangles through the camera plan's
//! viewing area. Good enough to verify layout, framing, and sequencing
//! without a host application.
use std::path::Path;

use conveyor_scene::belt::BeltSpec;
use conveyor_scene::camera::CameraPlan;
use conveyor_scene::error::{Error, Result};
use conveyor_scene::layout::{ItemPlacement, Rgba};
use conveyor_scene::render::FrameRenderer;
use conveyor_scene::timeline::FrameEntry;
use image::{Rgb, RgbImage};

const BACKGROUND: Rgba = Rgba::new(0.05, 0.05, 0.05, 1.0);

/// Flat-color orthographic renderer over the camera's viewing area.
pub struct PngFrameRenderer {
    belt: BeltSpec,
    belt_color: Rgba,
    items: Vec<ItemPlacement>,
    camera: CameraPlan,
}

impl PngFrameRenderer {
    pub fn new(
        belt: BeltSpec,
        belt_color: Rgba,
        mut items: Vec<ItemPlacement>,
        camera: CameraPlan,
    ) -> Self {
        // Later paint order draws on top.
        items.sort_by_key(|item| item.paint_order);
        Self {
            belt,
            belt_color,
            items,
            camera,
        }
    }

    /// Rasterize one frame at the given belt offset.
    fn rasterize(&self, belt_offset: f32) -> RgbImage {
        let (res_x, res_y) = self.camera.resolution;
        let mut img = RgbImage::from_pixel(res_x, res_y, to_pixel(BACKGROUND));

        // Belt slab.
        self.fill_world_rect(
            &mut img,
            belt_offset,
            0.0,
            self.belt.length / 2.0,
            self.belt.width / 2.0,
            self.belt_color,
        );

        // Items ride the belt: world position composes the belt offset.
        for item in &self.items {
            let half = item.size / 2.0;
            self.fill_world_rect(
                &mut img,
                item.position.x + belt_offset,
                item.position.y,
                half,
                half,
                item.material.base_color(),
            );
        }

        img
    }

    /// Fill an axis-aligned world rectangle, clipped to the image.
    ///
    /// The sensor's horizontal axis spans the belt width (world y) unless
    /// the camera plan swapped axes, in which case it spans world x.
    fn fill_world_rect(
        &self,
        img: &mut RgbImage,
        cx: f32,
        cy: f32,
        half_x: f32,
        half_y: f32,
        color: Rgba,
    ) {
        let (res_x, res_y) = self.camera.resolution;
        let (view_w, view_h) = (self.camera.view_width, self.camera.view_height);

        // (world extent along sensor horizontal, along sensor vertical)
        let (hc, hh, vc, vh) = if self.camera.axis_swap {
            (cx, half_x, cy, half_y)
        } else {
            (cy, half_y, cx, half_x)
        };

        let u0 = ((hc - hh) / view_w + 0.5) * res_x as f32;
        let u1 = ((hc + hh) / view_w + 0.5) * res_x as f32;
        let v0 = ((vc - vh) / view_h + 0.5) * res_y as f32;
        let v1 = ((vc + vh) / view_h + 0.5) * res_y as f32;

        let x0 = u0.floor().max(0.0) as u32;
        let x1 = (u1.ceil().min(res_x as f32) as u32).min(res_x);
        let y0 = v0.floor().max(0.0) as u32;
        let y1 = (v1.ceil().min(res_y as f32) as u32).min(res_y);

        let pixel = to_pixel(color);
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, pixel);
            }
        }
    }
}

impl FrameRenderer for PngFrameRenderer {
    fn render(&mut self, entry: &FrameEntry, out_path: &Path) -> Result<()> {
        let img = self.rasterize(entry.belt_offset);
        img.save(out_path).map_err(|e| Error::Render {
            frame: entry.frame,
            message: e.to_string(),
        })?;
        Ok(())
    }
}

fn to_pixel(color: Rgba) -> Rgb<u8> {
    Rgb([
        (color.r.clamp(0.0, 1.0) * 255.0) as u8,
        (color.g.clamp(0.0, 1.0) * 255.0) as u8,
        (color.b.clamp(0.0, 1.0) * 255.0) as u8,
    ])
}
