//! Display pipeline: bitmap buffers, glyphs, animation, rotation, row scan
//! and the idle demo.
//!
//! [`DisplayContext`] is the single owner of the two channel bitmaps, their
//! animations and the mutable glyph table. The receive task writes into it
//! through the command router while the main loop scans it; each operation
//! takes the lock once, so a row is never observed half-written, but a frame
//! may show rows from before and after a command.
pub mod animation;
pub mod glyphs;
pub mod idle;
pub mod rotation;
pub mod scan;

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, Ordering};

use critical_section::Mutex;

use crate::core::{Channel, ColorSelect};
use animation::{AnimatedSymbol, AnimationConfig};
use glyphs::{Bitmap, GlyphTable, RemapTable};

struct DisplayState {
    screens: [Bitmap; 2],
    animations: [AnimatedSymbol; 2],
    glyphs: GlyphTable,
}

/// Shared display state.
pub struct DisplayContext {
    state: Mutex<RefCell<DisplayState>>,
    idle_mode: AtomicBool,
    remap: RemapTable,
}

impl Default for DisplayContext {
    fn default() -> Self {
        Self::new(RemapTable::IDENTITY)
    }
}

impl DisplayContext {
    /// Blank screens, no animation, built-in font, idle mode off.
    pub const fn new(remap: RemapTable) -> Self {
        Self {
            state: Mutex::new(RefCell::new(DisplayState {
                screens: [[0; 8]; 2],
                animations: [AnimatedSymbol::DISABLED; 2],
                glyphs: GlyphTable::new(),
            })),
            idle_mode: AtomicBool::new(false),
            remap,
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut DisplayState) -> R) -> R {
        critical_section::with(|cs| f(&mut self.state.borrow_ref_mut(cs)))
    }

    pub fn remap(&self) -> &RemapTable {
        &self.remap
    }

    pub fn idle_mode(&self) -> bool {
        self.idle_mode.load(Ordering::Acquire)
    }

    pub fn set_idle_mode(&self, enabled: bool) {
        self.idle_mode.store(enabled, Ordering::Release);
    }

    //==============================================================================WRITES
    /// Show glyph `code` (after remapping) on the selected channels, stopping
    /// their animations. Out-of-range glyphs are ignored; returns whether
    /// anything was written.
    pub fn set_symbol(&self, code: u8, color: ColorSelect) -> bool {
        let index = self.remap.resolve(code);
        self.with_state(|state| {
            let Some(glyph) = state.glyphs.get(index).copied() else {
                return false;
            };
            for channel in Channel::ALL {
                if color.includes(channel) {
                    state.animations[channel.index()].disable();
                    state.screens[channel.index()] = glyph;
                }
            }
            true
        })
    }

    /// Overwrite one channel bitmap, stopping its animation.
    pub fn load_channel(&self, channel: Channel, rows: &Bitmap) {
        self.with_state(|state| {
            state.animations[channel.index()].disable();
            state.screens[channel.index()] = *rows;
        })
    }

    /// Start an animation on the selected channels. Ignored when the glyph
    /// index is outside the table.
    pub fn set_animated_symbol(&self, config: &AnimationConfig, color: ColorSelect) -> bool {
        self.with_state(|state| {
            if state.glyphs.get(config.glyph).is_none() {
                return false;
            }
            for channel in Channel::ALL {
                if color.includes(channel) {
                    state.animations[channel.index()].configure(config);
                }
            }
            true
        })
    }

    /// Overwrite four rows of a glyph in the mutable table.
    pub fn write_glyph_rows(&self, glyph: u8, first_row: usize, rows: &[u8; 4]) -> bool {
        self.with_state(|state| state.glyphs.write_rows(glyph, first_row, rows))
    }

    /// Advance both channel animations by one frame.
    pub fn tick_animations(&self) {
        self.with_state(|state| {
            let DisplayState {
                screens,
                animations,
                glyphs,
            } = state;
            for (screen, animation) in screens.iter_mut().zip(animations.iter_mut()) {
                if let Some(glyph) = glyphs.get(animation.config().glyph) {
                    animation.tick(screen, glyph);
                }
            }
        })
    }

    //==============================================================================READS
    pub fn screen(&self, channel: Channel) -> Bitmap {
        self.with_state(|state| state.screens[channel.index()])
    }

    /// Red and green bitmaps read under one lock.
    pub fn snapshot(&self) -> (Bitmap, Bitmap) {
        self.with_state(|state| {
            (
                state.screens[Channel::Red.index()],
                state.screens[Channel::Green.index()],
            )
        })
    }

    pub fn animation(&self, channel: Channel) -> AnimatedSymbol {
        self.with_state(|state| state.animations[channel.index()])
    }

    pub fn glyph(&self, index: u8) -> Option<Bitmap> {
        self.with_state(|state| state.glyphs.get(index).copied())
    }
}
