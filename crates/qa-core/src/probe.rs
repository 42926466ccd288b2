use std::time::Duration;

// ---------------------------------------------------------------------------
// ProbeOutcome
// ---------------------------------------------------------------------------

/// Result of one HTTP GET. Network failures (DNS, refused connection,
/// timeout) collapse into `Unreachable`; they are check failures, never
/// program errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Status(u16),
    Unreachable,
}

impl ProbeOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ProbeOutcome::Status(200))
    }

    /// Three-digit code for report lines; `000` is the unreachable sentinel.
    pub fn code(&self) -> String {
        match self {
            ProbeOutcome::Status(code) => format!("{code:03}"),
            ProbeOutcome::Unreachable => "000".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Probe trait + HTTP implementation
// ---------------------------------------------------------------------------

/// Seam for the reachability phases so they can be unit-tested without a
/// network.
pub trait Probe {
    fn get(&self, url: &str) -> ProbeOutcome;
}

pub struct HttpProbe {
    agent: ureq::Agent,
}

impl HttpProbe {
    pub fn new(connect_timeout: Duration, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(connect_timeout)
            .timeout(timeout)
            .user_agent(concat!("qa-check/", env!("CARGO_PKG_VERSION")))
            .build();
        Self { agent }
    }
}

impl Probe for HttpProbe {
    fn get(&self, url: &str) -> ProbeOutcome {
        match self.agent.get(url).call() {
            Ok(response) => ProbeOutcome::Status(response.status()),
            Err(ureq::Error::Status(code, _)) => ProbeOutcome::Status(code),
            Err(ureq::Error::Transport(err)) => {
                tracing::debug!(%url, error = %err, "probe transport error");
                ProbeOutcome::Unreachable
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
