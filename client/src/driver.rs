use log::{info, trace};

use vml_shared::{Command, Document, Session};

use crate::{
    client_config::ClientConfig,
    error::ClientError,
    upload::{Phase, Uploader},
};

/// Runs an [`Uploader`] against a [`Session`]: connect, upload every asset,
/// then every object, wait for the host to catch up and say goodbye.
pub struct Driver<S: Session> {
    session: S,
    config: ClientConfig,
}

impl<S: Session> Driver<S> {
    pub fn new(session: S, config: ClientConfig) -> Self {
        Self { session, config }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }

    /// Upload `document`. Blocks until the host has acknowledged every
    /// creation request; a host that never answers stalls the run.
    pub fn run(&mut self, document: &Document) -> Result<(), ClientError> {
        let mut uploader = Uploader::new(document, &self.config);
        uploader.connect(
            &self.config.name,
            &self.config.password,
            &self.config.address,
        );
        self.flush(&mut uploader)?;
        while !uploader.is_connected() {
            self.pump(&mut uploader)?;
        }

        for phase in [Phase::Assets, Phase::Objects] {
            uploader.start_phase(phase);
            loop {
                self.pump(&mut uploader)?;
                if uploader.is_idle() && uploader.is_finished() {
                    break;
                }
                if uploader.step() {
                    self.flush(&mut uploader)?;
                }
            }
            info!("{:?} pass complete", phase);
        }

        while self.session.outstanding() >= self.config.drain_threshold {
            trace!("{} units still queued at the host", self.session.outstanding());
            self.pump(&mut uploader)?;
        }
        info!(
            "uploaded {} entities, disconnecting",
            uploader.entity_ids().resolved().count()
        );
        self.session.send(Command::Terminate {
            message: "All done, exiting".to_string(),
        })?;
        Ok(())
    }

    /// Poll once, apply whatever arrived and send the replies.
    fn pump(&mut self, uploader: &mut Uploader) -> Result<(), ClientError> {
        for event in self.session.poll(self.config.poll_timeout)? {
            uploader.handle_event(event);
        }
        self.flush(uploader)
    }

    fn flush(&mut self, uploader: &mut Uploader) -> Result<(), ClientError> {
        for command in uploader.take_outgoing_commands() {
            self.session.send(command)?;
        }
        Ok(())
    }
}
