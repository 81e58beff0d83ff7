//! Test doubles: a manually advanced clock and a scripted transport

use super::{Clock, HttpResponse, Transport};
use crate::error::{NetworkErrorKind, ProbeError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Clock that only moves when told to. `sleep` advances it instantly.
pub(crate) struct ManualClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
    slept: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
            slept: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn advance(&self, duration: Duration) {
        *self.elapsed.lock().unwrap() += duration;
    }

    /// Every pause requested through `sleep`, in order
    pub(crate) fn sleeps(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.elapsed.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
        self.advance(duration);
    }
}

/// A request the scripted transport received
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedRequest {
    pub method: &'static str,
    pub url: String,
    pub content_type: Option<String>,
    pub body_len: usize,
}

struct Step {
    delay: Duration,
    outcome: Result<HttpResponse, ProbeError>,
}

/// Transport answering from a queue. Each answer advances the shared clock
/// by its delay, which is what the probes observe as round-trip time.
pub(crate) struct ScriptedTransport {
    clock: Arc<ManualClock>,
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new(clock: Arc<ManualClock>) -> Self {
        Self {
            clock,
            steps: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn respond(self, delay: Duration, response: HttpResponse) -> Self {
        self.push(delay, Ok(response))
    }

    pub(crate) fn respond_status(self, delay_ms: u64, status_code: u16) -> Self {
        let response = HttpResponse::with_body(status_code, Vec::new());
        self.respond(Duration::from_millis(delay_ms), response)
    }

    pub(crate) fn fail(self, delay: Duration, error: ProbeError) -> Self {
        self.push(delay, Err(error))
    }

    fn push(self, delay: Duration, outcome: Result<HttpResponse, ProbeError>) -> Self {
        self.steps.lock().unwrap().push_back(Step { delay, outcome });
        self
    }

    pub(crate) fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn remaining(&self) -> usize {
        self.steps.lock().unwrap().len()
    }

    fn answer(&self, request: RecordedRequest) -> Result<HttpResponse, ProbeError> {
        self.requests.lock().unwrap().push(request);
        let step = self.steps.lock().unwrap().pop_front();
        match step {
            Some(step) => {
                self.clock.advance(step.delay);
                step.outcome
            }
            None => Err(ProbeError::network(NetworkErrorKind::Other, "no scripted response left")),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, ProbeError> {
        self.answer(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            content_type: None,
            body_len: 0,
        })
    }

    async fn get_discard(&self, url: &str) -> Result<HttpResponse, ProbeError> {
        self.answer(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            content_type: None,
            body_len: 0,
        })
        .map(|response| HttpResponse::discarded(response.status_code, response.bytes_received))
    }

    async fn post(
        &self,
        url: &str,
        content_type: &str,
        payload: Vec<u8>,
    ) -> Result<HttpResponse, ProbeError> {
        self.answer(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            content_type: Some(content_type.to_string()),
            body_len: payload.len(),
        })
    }
}
