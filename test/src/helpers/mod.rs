pub mod fake_host;

pub use fake_host::{Delivery, FakeHost, HostEntity};

use std::time::Duration;

use vml_client::{ClientConfig, Driver, Pending, Phase, Uploader};
use vml_shared::{Document, Session};

pub fn parse(source: &str) -> Document {
    let mut document = Document::new();
    if let Err(error) = document.load_str(source) {
        panic!("fixture should parse: {}", error);
    }
    document
}

/// Upload `source` to `host` with the real driver and hand the host back for
/// inspection.
pub fn upload(source: &str, host: FakeHost) -> FakeHost {
    upload_with(source, host, ClientConfig::default())
}

pub fn upload_with(source: &str, host: FakeHost, config: ClientConfig) -> FakeHost {
    let document = parse(source);
    let mut driver = Driver::new(host, config);
    if let Err(error) = driver.run(&document) {
        panic!("upload failed: {}", error);
    }
    driver.into_session()
}

/// The tracker as it stood when the uploader was offered a step, and whether
/// the uploader took it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepAttempt {
    pub state: Pending,
    pub count: usize,
    pub stepped: bool,
}

/// Drive an uploader the way the driver does, reporting every step it is
/// offered after the connection is accepted. Gives up after `max_polls`
/// polls.
pub fn upload_stepwise<F>(document: &Document, host: &mut FakeHost, max_polls: usize, mut observe: F)
where
    F: FnMut(StepAttempt),
{
    let config = ClientConfig::default();
    let mut uploader = Uploader::new(document, &config);
    uploader.connect(&config.name, &config.password, &config.address);
    let mut polls = 0;
    let mut phases = [Phase::Assets, Phase::Objects].into_iter();
    let mut connected = false;
    loop {
        for command in uploader.take_outgoing_commands() {
            if host.send(command).is_err() {
                return;
            }
        }
        if polls == max_polls {
            return;
        }
        polls += 1;
        for event in host.poll(Duration::ZERO).unwrap_or_default() {
            uploader.handle_event(event);
        }
        if !connected {
            if !uploader.is_connected() {
                continue;
            }
            connected = true;
            if let Some(phase) = phases.next() {
                uploader.start_phase(phase);
            }
        }
        if uploader.is_idle() && uploader.is_finished() {
            match phases.next() {
                Some(phase) => uploader.start_phase(phase),
                None => return,
            }
        }
        let (state, count) = (uploader.tracker().state(), uploader.tracker().count());
        let stepped = uploader.step();
        observe(StepAttempt {
            state,
            count,
            stepped,
        });
    }
}
