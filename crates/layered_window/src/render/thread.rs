//! Dedicated render thread

use std::io;
use std::thread::{self, JoinHandle};

use log::error;

use super::render_loop::{RenderLoop, RenderReport};
use super::surface::RenderSurface;
use crate::error::{RenderError, RenderResult};

/// Handle to a running render loop
pub struct RenderThread {
    handle: Option<JoinHandle<RenderResult<RenderReport>>>,
    outcome: Option<RenderResult<RenderReport>>,
}

impl RenderThread {
    /// Spawn the render thread
    pub fn spawn<S>(name: impl Into<String>, render_loop: RenderLoop<S>) -> io::Result<Self>
    where
        S: RenderSurface + 'static,
    {
        let handle = thread::Builder::new()
            .name(name.into())
            .spawn(move || render_loop.run())?;

        Ok(Self {
            handle: Some(handle),
            outcome: None,
        })
    }

    /// Whether the loop has exited
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// How the loop ended, or `None` while it is still running
    ///
    /// Collects the thread's result the first time it is seen finished.
    pub fn status(&mut self) -> Option<RenderResult<RenderReport>> {
        if self.outcome.is_none() && self.is_finished() {
            self.outcome = self.handle.take().map(join_handle);
        }
        self.outcome.clone()
    }

    /// Wait for the render thread to finish
    ///
    /// The caller is responsible for clearing the run flag first.
    pub fn join(mut self) -> RenderResult<RenderReport> {
        match self.handle.take() {
            Some(handle) => join_handle(handle),
            None => self.outcome.take().unwrap_or(Err(RenderError::ThreadPanicked)),
        }
    }
}

fn join_handle(handle: JoinHandle<RenderResult<RenderReport>>) -> RenderResult<RenderReport> {
    handle.join().unwrap_or_else(|_| {
        error!("render thread panicked");
        Err(RenderError::ThreadPanicked)
    })
}
