//! Applies decoded display commands to the [`DisplayContext`].
//!
//! The dynamic symbol is configured in four frames: SET1..SET3 fill a staging
//! area and SET4 commits it. Staged fields are not versioned: a lost middle
//! frame silently commits whatever was staged before.
use crate::core::Channel;
use crate::display::animation::AnimationConfig;
use crate::display::DisplayContext;
use crate::error::CommandError;
use crate::protocol::messages::Command;
use crate::protocol::transport::can_frame::CanFrame;

#[derive(Debug, Default)]
pub struct CommandRouter {
    staged: AnimationConfig,
}

impl CommandRouter {
    pub const fn new() -> Self {
        Self {
            staged: AnimationConfig::new(),
        }
    }

    /// Animation fields collected so far.
    pub fn staged(&self) -> &AnimationConfig {
        &self.staged
    }

    /// Decode `frame` and apply it. Frames that do not decode change nothing,
    /// except that SET_SYMBOL and DYN_SYMBOL_SET4 leave idle mode before their
    /// color byte is checked.
    pub fn dispatch(
        &mut self,
        frame: &CanFrame,
        display: &DisplayContext,
    ) -> Result<Command, CommandError> {
        let command = Command::decode(frame).inspect_err(|err| {
            if let CommandError::InvalidColor { .. } = err {
                display.set_idle_mode(false);
            }
        })?;
        self.apply(&command, display);
        Ok(command)
    }

    pub fn apply(&mut self, command: &Command, display: &DisplayContext) {
        match *command {
            Command::SetSymbol { code, color } => {
                display.set_idle_mode(false);
                if !display.set_symbol(code, color) {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("Glyph {} out of range", code);
                }
            }
            Command::SetSymbolPattern { glyph, half, rows } => {
                display.write_glyph_rows(glyph, half.first_row(), &rows);
            }
            Command::DynSymbolSet1 {
                glyph,
                period,
                steps,
            } => {
                self.staged.glyph = glyph;
                self.staged.period = period;
                self.staged.steps = steps;
            }
            Command::DynSymbolSet2 { dx, dy } => {
                self.staged.dx = dx;
                self.staged.dy = dy;
            }
            Command::DynSymbolSet3 { start_x, start_y } => {
                self.staged.start_x = start_x;
                self.staged.start_y = start_y;
            }
            Command::DynSymbolSet4 { color } => {
                display.set_idle_mode(false);
                display.set_animated_symbol(&self.staged, color);
            }
            Command::SetRedScreen(rows) => {
                display.set_idle_mode(false);
                display.load_channel(Channel::Red, &rows);
            }
            Command::SetGreenScreen(rows) => {
                display.set_idle_mode(false);
                display.load_channel(Channel::Green, &rows);
            }
        }
    }
}
