//! Receive-side task: pops inbound frames in arrival order and hands them to
//! the [`CommandRouter`].
use crate::display::DisplayContext;
use crate::error::TransportError;
use crate::protocol::managment::command_router::CommandRouter;
use crate::protocol::messages::Command;
use crate::protocol::transport::context::TransportContext;
use crate::protocol::transport::traits::node_timer::NodeTimer;
use crate::protocol::transport::RECEIVE_POLL_TIMEOUT_MS;

pub struct ReceiveRunner<'a, T, const P: usize, const TXQ: usize, const RXQ: usize>
where
    T: NodeTimer,
{
    transport: &'a TransportContext<P, TXQ, RXQ>,
    display: &'a DisplayContext,
    timer: T,
    router: CommandRouter,
}

impl<'a, T, const P: usize, const TXQ: usize, const RXQ: usize> ReceiveRunner<'a, T, P, TXQ, RXQ>
where
    T: NodeTimer,
{
    pub fn new(
        transport: &'a TransportContext<P, TXQ, RXQ>,
        display: &'a DisplayContext,
        timer: T,
    ) -> Self {
        Self {
            transport,
            display,
            timer,
            router: CommandRouter::new(),
        }
    }

    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    /// Wait up to `timeout_ms` for one frame and apply it.
    ///
    /// `Ok(None)` means a frame arrived but was not a display command.
    pub async fn run_once(&mut self, timeout_ms: u32) -> Result<Option<Command>, TransportError> {
        let frame = self.transport.receive(timeout_ms, &mut self.timer).await?;
        match self.router.dispatch(&frame, self.display) {
            Ok(command) => Ok(Some(command)),
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("Frame {:#X} ignored: {}", frame.id.raw(), _err);
                Ok(None)
            }
        }
    }

    /// Receive loop. Never returns.
    pub async fn run(&mut self) {
        loop {
            // An empty queue is the normal idle case.
            let _ = self.run_once(RECEIVE_POLL_TIMEOUT_MS).await;
        }
    }
}
