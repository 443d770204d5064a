use raylib::prelude::*;
use raylib::core::texture::RaylibTexture2D; // ← trait que trae .update_texture()

/// Receives the vertical runs produced by a column cast.
pub trait SpanSink {
    /// Solid run on `column` covering rows `start..end`.
    fn write_span(&mut self, column: u32, start: u32, end: u32, color: Color);

    /// Occlusion bound after step `step` of the current column.
    fn occlusion(&mut self, _step: u32, _ymin: u32) {}
}

pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        let bg = Color::BLACK;
        Self {
            color_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
        }
    }

    /// Resets every pixel to `color` and remembers it as the background.
    pub fn fill_background(&mut self, color: Color) {
        self.background_color = color;
        self.color_buffer.fill(color);
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    /// Column `x` from top to bottom.
    pub fn column(&self, x: u32) -> impl Iterator<Item = Color> + '_ {
        (0..self.height).map(move |y| self.get_pixel(x, y))
    }

    /// The finished image, row-major RGBA.
    #[inline]
    pub fn present(&self) -> &[Color] {
        &self.color_buffer
    }

    /// Sube los píxeles a una textura persistente del mismo tamaño.
    pub fn upload_to_texture(&self, tex: &mut Texture2D) -> Result<(), String> {
        // &[Color] → &[u8] (RGBA8) sin copiar
        let byte_len = self.color_buffer.len() * std::mem::size_of::<Color>();
        let bytes: &[u8] = unsafe {
            std::slice::from_raw_parts(self.color_buffer.as_ptr() as *const u8, byte_len)
        };
        tex.update_texture(bytes).map_err(|e| format!("{e:?}"))
    }
}

impl SpanSink for Framebuffer {
    #[inline]
    fn write_span(&mut self, column: u32, start: u32, end: u32, color: Color) {
        if column >= self.width {
            return;
        }
        let end = end.min(self.height);
        let w = self.width as usize;
        let mut idx = start as usize * w + column as usize;
        for _ in start..end {
            self.color_buffer[idx] = color;
            idx += w;
        }
    }
}
