use std::f32::consts::TAU;

use egui::Pos2;
use rand::Rng;

use crate::pixel_buffer::PixelBuffer;
use crate::renderer::{Compositing, Renderer};
use crate::session::ToolSession;

/// Samples per pointer move, per unit of brush size.
pub const SPRAY_DENSITY: u32 = 5;

/// Scatters `size * SPRAY_DENSITY` opaque single-pixel dots uniformly over the
/// disc of radius `size` around `center`.
pub fn spray<R: Rng>(
    session: &ToolSession,
    center: Pos2,
    buffer: &mut PixelBuffer,
    rng: &mut R,
) -> usize {
    let radius = session.size.as_f32();
    let samples = session.size.get() * SPRAY_DENSITY;
    let mut renderer = Renderer::new(buffer, session.color.opaque(), Compositing::SourceOver);

    for _ in 0..samples {
        let r = radius * rng.r#gen::<f32>().sqrt();
        let angle = rng.r#gen::<f32>() * TAU;
        let x = center.x + angle.cos() * r;
        let y = center.y + angle.sin() * r;
        renderer.plot(x.floor() as i32, y.floor() as i32);
    }

    renderer.painted()
}
