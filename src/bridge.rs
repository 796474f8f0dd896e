//! The event multiplexer at the heart of the port: one poll(2) loop
//! over the control stream and the device, dispatching to exactly one
//! handler per readiness bit.
//!
//! Priority within one wake is fixed: parent commands first, then
//! device input, then device hangup. A hangup that arrives together
//! with other events is still honored after they are serviced once.

use std::os::fd::AsFd;

use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};

use crate::device::Handle;
use crate::framing::{self, FrameReader, Pump};
use crate::proto::{event, Command, MAX_REPORT_SIZE};

/// Outcome of draining the control stream once.
enum ControlFlow {
    Continue,
    ParentClosed,
}

/// Bridges one HID device to the parent process. `control` carries
/// inbound command frames, `events` outbound event frames; both are
/// plain descriptors so tests can substitute pipes for the real
/// standard streams.
pub struct Bridge<C: AsFd, E: AsFd> {
    control: C,
    events: E,
    device: Handle,
    frames: FrameReader,
}

impl<C: AsFd, E: AsFd> Bridge<C, E> {
    pub fn new(control: C, device: Handle, events: E) -> Self {
        Self {
            control,
            events,
            device,
            frames: FrameReader::new(),
        }
    }

    /// Run until the device hangs up or the parent closes the control
    /// stream. Both are clean shutdowns; every other failure surfaces
    /// as an error and terminates the process with it.
    pub fn run(&mut self) -> crate::Result<()> {
        tracing::info!("bridge running");
        loop {
            let (control, device) = self.wait()?;

            if control.intersects(PollFlags::POLLIN | PollFlags::POLLHUP) {
                if let ControlFlow::ParentClosed = self.service_control()? {
                    return Ok(());
                }
            }
            if device.contains(PollFlags::POLLIN) {
                self.relay_input()?;
            }
            if device.intersects(PollFlags::POLLHUP | PollFlags::POLLERR) {
                self.report_closed()?;
                tracing::info!("bridge exiting after device hangup");
                return Ok(());
            }
        }
    }

    /// Block until either descriptor has something for us. Interrupted
    /// waits simply start over.
    fn wait(&self) -> crate::Result<(PollFlags, PollFlags)> {
        loop {
            let mut fds = [
                PollFd::new(self.control.as_fd(), PollFlags::POLLIN),
                PollFd::new(
                    self.device.as_fd(),
                    PollFlags::POLLIN | PollFlags::POLLPRI | PollFlags::POLLHUP,
                ),
            ];
            match poll(&mut fds, PollTimeout::NONE) {
                Ok(_) => {
                    let control = fds[0].revents().unwrap_or(PollFlags::empty());
                    let device = fds[1].revents().unwrap_or(PollFlags::empty());
                    return Ok((control, device));
                }
                Err(Errno::EINTR) => continue,
                Err(errno) => return Err(std::io::Error::from(errno).into()),
            }
        }
    }

    fn service_control(&mut self) -> crate::Result<ControlFlow> {
        let frames = match self.frames.pump(&self.control)? {
            Pump::Frames(frames) => frames,
            Pump::Eof => {
                tracing::info!("control stream closed, shutting down");
                return Ok(ControlFlow::ParentClosed);
            }
        };
        for frame in frames {
            self.dispatch(&frame)?;
        }
        Ok(ControlFlow::Continue)
    }

    fn dispatch(&mut self, body: &[u8]) -> crate::Result<()> {
        match Command::decode(body)? {
            Command::DescriptorRequest => self.handle_descriptor_request(),
            Command::Output(report) => self.handle_output(&report),
            Command::Unknown(tag) => {
                tracing::debug!(tag, "ignoring unknown command tag");
                Ok(())
            }
        }
    }

    /// Fire-and-forget device write; the parent gets no reply.
    fn handle_output(&mut self, report: &[u8]) -> crate::Result<()> {
        tracing::trace!(len = report.len(), "output report");
        self.device.write_report(report)?;
        Ok(())
    }

    /// Always answers, even when the kernel queries degrade, so the
    /// parent never hangs waiting for a descriptor.
    fn handle_descriptor_request(&mut self) -> crate::Result<()> {
        let descriptor = self.device.report_descriptor();
        tracing::debug!(len = descriptor.len(), "descriptor request");
        framing::send(&self.events, &event::descriptor_reply(&descriptor))?;
        Ok(())
    }

    fn relay_input(&mut self) -> crate::Result<()> {
        let mut buf = [0u8; MAX_REPORT_SIZE];
        let n = self.device.read_report(&mut buf)?;
        if n == 0 {
            // Some devices signal readiness with nothing to deliver.
            tracing::trace!("empty device read, nothing to relay");
            return Ok(());
        }
        tracing::trace!(len = n, "input report");
        framing::send(&self.events, &event::input_report(&buf[..n]))?;
        Ok(())
    }

    fn report_closed(&mut self) -> crate::Result<()> {
        tracing::info!("device hangup, notifying parent");
        framing::send(&self.events, &event::device_closed())?;
        Ok(())
    }
}
