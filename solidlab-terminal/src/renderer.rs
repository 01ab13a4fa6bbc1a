/// ASCII rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3};
use solidlab_core::lighting::{GridHelper, Lighting};
use solidlab_core::{Camera, Mesh, Triangle};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

const GRID_CHAR: char = '·';
/// Points sampled along each grid line
const GRID_SAMPLES: usize = 96;

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    /// Character at a cell, for inspection
    pub fn char_at(&self, x: usize, y: usize) -> char {
        self.char_buffer[y * self.width + x]
    }

    /// Number of cells covered by anything but blank space
    pub fn coverage(&self) -> usize {
        self.char_buffer.iter().filter(|c| **c != ' ').count()
    }

    pub fn render_mesh(
        &mut self,
        mesh: &Mesh,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        lighting: &Lighting,
    ) {
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, model_matrix, camera, lighting);
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        lighting: &Lighting,
    ) {
        // Project vertices to screen space
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match camera.project_to_screen(
                &vertex.position,
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) {
                Some(coords) => *slot = coords,
                None => return, // Triangle is clipped
            }
        }

        // Shade with the face normal in world space
        let normal = model_matrix.transform_vector(&triangle.calculate_normal());
        let [a, b, c] = triangle.vertices.map(|v| v.position.coords);
        let centroid = model_matrix.transform_point(&Point3::from((a + b + c) / 3.0));
        let brightness = lighting.shade(&centroid, &normal);

        // Map brightness to character
        let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
        let char_index = char_index.clamp(1, LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];

        self.rasterize_triangle(&screen_coords, character, shade_color(character));
    }

    /// Draw the ground grid behind whatever is already in the depth buffer
    pub fn render_grid(&mut self, grid: &GridHelper, camera: &Camera) {
        let identity = Matrix4::identity();
        for (start, end) in grid.lines() {
            for i in 0..=GRID_SAMPLES {
                let t = i as f32 / GRID_SAMPLES as f32;
                let point = start + (end - start) * t;
                if let Some((x, y, depth)) =
                    camera.project_to_screen(&point, &identity, self.width as u32, self.height as u32)
                {
                    self.plot(x as i32, y as i32, depth, GRID_CHAR, Color::DarkGrey);
                }
            }
        }
    }

    fn plot(&mut self, x: i32, y: i32, depth: f32, character: char, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
            self.color_buffer[idx] = color;
        }
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char, color: Color) {
        let [v0, v1, v2] = *coords;

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        // Scanline rasterization
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                // Barycentric coordinates
                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                        self.plot(x, y, depth, character, color);
                    }
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(0, y as u16))?;
            let mut current = None;
            for x in 0..self.width {
                let idx = y * self.width + x;
                let color = self.color_buffer[idx];
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(self.char_buffer[idx]))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Color based on character intensity
fn shade_color(c: char) -> Color {
    match c {
        ' ' | '.' | ':' => Color::DarkBlue,
        '-' | '=' => Color::Blue,
        '+' | '*' => Color::Cyan,
        '#' | '%' | '@' => Color::White,
        _ => Color::White,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use solidlab_core::{MeshDescriptor, Solid};

    fn camera(width: usize, height: usize) -> Camera {
        Camera::with_aspect(width as f32 / (height as f32 * 2.0))
    }

    #[test]
    fn test_barycentric_inside_and_degenerate() {
        let (w0, w1, w2) = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (1.0, 1.0)).unwrap();
        assert!(w0 > 0.0 && w1 > 0.0 && w2 > 0.0);
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-6);
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 1.0)).is_none());
    }

    #[test]
    fn test_mesh_covers_screen_centre() {
        let (w, h) = (80, 40);
        let mut renderer = AsciiRenderer::new(w, h);
        let mesh = MeshDescriptor::new(Solid::Sphere { radius: 1.0 }).build();
        renderer.render_mesh(&mesh, &Matrix4::identity(), &camera(w, h), &Lighting::default());

        assert_ne!(renderer.char_at(w / 2, h / 2), ' ');
        assert_eq!(renderer.char_at(0, 0), ' ');
    }

    #[test]
    fn test_mesh_occludes_grid() {
        let (w, h) = (80, 40);
        let mut renderer = AsciiRenderer::new(w, h);
        let cam = camera(w, h);
        let mesh = MeshDescriptor::new(Solid::Cube { width: 2.0, height: 2.0, depth: 2.0 }).build();
        renderer.render_mesh(&mesh, &Matrix4::identity(), &cam, &Lighting::default());
        renderer.render_grid(&GridHelper::default(), &cam);

        assert_ne!(renderer.char_at(w / 2, h / 2), GRID_CHAR);
        assert!(renderer.char_buffer.contains(&GRID_CHAR));

        renderer.clear();
        assert_eq!(renderer.coverage(), 0);
    }

    #[test]
    fn test_draw_writes_every_cell() {
        let renderer = AsciiRenderer::new(4, 2);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches(' ').count(), 8);
    }
}
