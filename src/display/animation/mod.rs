//! Per-channel animated ("dynamic") symbol.
//!
//! The animation advances once per refresh frame. Every `period` frames the
//! channel bitmap is cleared and the glyph is XOR-drawn at the current
//! position, pixels falling outside the matrix are clipped. The position
//! then moves by the velocity; after `steps` moves it jumps back to the origin.
use crate::core::MATRIX_ROWS;
use crate::display::glyphs::Bitmap;

/// Animation parameters, as staged by the dynamic symbol commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationConfig {
    pub glyph: u8,
    /// Frames between two draws; `0` disables the animation.
    pub period: u16,
    /// Moves before returning to the origin.
    pub steps: u16,
    pub dx: i16,
    pub dy: i16,
    pub start_x: i16,
    pub start_y: i16,
}

impl AnimationConfig {
    pub const fn new() -> Self {
        Self {
            glyph: 0,
            period: 0,
            steps: 0,
            dx: 0,
            dy: 0,
            start_x: 0,
            start_y: 0,
        }
    }
}

/// Running animation state of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimatedSymbol {
    config: AnimationConfig,
    period_counter: u16,
    step_counter: u16,
    x: i16,
    y: i16,
}

impl AnimatedSymbol {
    pub const DISABLED: AnimatedSymbol = AnimatedSymbol {
        config: AnimationConfig::new(),
        period_counter: 0,
        step_counter: 0,
        x: 0,
        y: 0,
    };

    /// Start a new animation; the first frame draws at the origin.
    pub fn configure(&mut self, config: &AnimationConfig) {
        *self = Self {
            config: *config,
            period_counter: 0,
            step_counter: config.steps,
            x: config.start_x,
            y: config.start_y,
        };
    }

    /// Stop animating; the bitmap keeps whatever was drawn last.
    pub fn disable(&mut self) {
        self.config.period = 0;
    }

    pub const fn is_active(&self) -> bool {
        self.config.period != 0
    }

    pub const fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Position of the next draw.
    pub const fn position(&self) -> (i16, i16) {
        (self.x, self.y)
    }

    /// Advance by one frame. Returns `true` when `screen` was redrawn.
    pub fn tick(&mut self, screen: &mut Bitmap, glyph: &Bitmap) -> bool {
        if !self.is_active() {
            return false;
        }
        if self.period_counter != 0 {
            self.period_counter -= 1;
            return false;
        }
        self.period_counter = self.config.period - 1;

        *screen = [0; MATRIX_ROWS];
        xor_draw(screen, glyph, self.x, self.y);

        self.x = self.x.wrapping_add(self.config.dx);
        self.y = self.y.wrapping_add(self.config.dy);
        if self.step_counter != 0 {
            self.step_counter -= 1;
        } else {
            self.step_counter = self.config.steps;
            self.x = self.config.start_x;
            self.y = self.config.start_y;
        }
        true
    }
}

/// XOR `glyph` into `screen` with its top-left corner at (`x`, `y`), clipping
/// everything outside the matrix.
pub fn xor_draw(screen: &mut Bitmap, glyph: &Bitmap, x: i16, y: i16) {
    for (row, bits) in glyph.iter().enumerate() {
        let target_row = row as i32 + y as i32;
        if !(0..MATRIX_ROWS as i32).contains(&target_row) {
            continue;
        }
        for col in 0..MATRIX_ROWS {
            let target_col = col as i32 + x as i32;
            if (0..MATRIX_ROWS as i32).contains(&target_col) {
                screen[target_row as usize] ^= ((bits >> col) & 1) << target_col;
            }
        }
    }
}
