//! Synthesis session state machine.
//!
//! One `SessionClient` owns exactly one duplex channel for the lifetime of
//! one session. All outbound calls and the receive loop take `&mut self`,
//! so the single-logical-writer precondition is enforced structurally;
//! there is no internal locking and no shared state across sessions.

use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::chunk::ChunkAssembler;
use crate::config::SessionConfig;
use crate::envelope::{self, ClientEnvelope, ServerEnvelope};
use crate::error::SessionError;
use crate::transport::DuplexChannel;
use crate::validation::validate_input_fragment;

/// Session lifecycle. Transitions are monotonic: once a terminal state is
/// reached the session accepts no further input and no further audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Connecting,
    ConfiguringSession,
    AwaitingConfigAck,
    Streaming,
    AwaitingFinishAck,
    Completed,
    Failed,
}

/// How the receive loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// A terminal `session-complete` envelope was received.
    Complete,
    /// The channel closed without a terminal envelope. The caller decides
    /// whether the partial audio is usable.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOutcome {
    pub bytes_produced: u64,
    pub completion: Completion,
}

impl SessionOutcome {
    /// Audio duration implied by the byte count under the session's
    /// format parameters. Synthesis output is mono.
    pub fn duration(&self, config: &SessionConfig) -> std::time::Duration {
        let byte_rate = config.sample_rate as u64 * config.encoding.bits_per_sample() as u64 / 8;
        if byte_rate == 0 {
            return std::time::Duration::ZERO;
        }
        std::time::Duration::from_secs_f64(self.bytes_produced as f64 / byte_rate as f64)
    }
}

#[derive(Debug)]
pub struct SessionClient<C: DuplexChannel> {
    channel: C,
    config: SessionConfig,
    state: SessionState,
    bytes_produced: u64,
}

impl<C: DuplexChannel> SessionClient<C> {
    /// Send the configure envelope and block until the matching
    /// `session-ready` acknowledgment, a server error, or the configured
    /// deadline. Frames that do not decode, and non-terminal envelopes
    /// other than the acknowledgment, are skipped while waiting.
    pub async fn open(config: SessionConfig, mut channel: C) -> Result<Self, SessionError> {
        let frame = envelope::encode(&ClientEnvelope::SessionConfigure {
            voice: config.voice.clone(),
            output_encoding: config.encoding,
            sample_rate: config.sample_rate,
        })?;
        channel.send(frame).await?;

        let deadline = config.handshake_timeout();
        let await_ready = async {
            loop {
                match channel.recv().await {
                    Some(Ok(frame)) => match envelope::decode(&frame) {
                        Ok(ServerEnvelope::SessionReady) => return Ok(()),
                        Ok(ServerEnvelope::SessionError { message }) => {
                            return Err(SessionError::ServerReported { message })
                        }
                        Ok(other) => {
                            debug!(?other, "ignoring envelope while awaiting session-ready");
                        }
                        Err(e) => {
                            debug!(error = %e, "skipping undecodable frame");
                        }
                    },
                    Some(Err(e)) => return Err(e),
                    None => {
                        return Err(SessionError::Connection(
                            "channel closed during handshake".to_string(),
                        ))
                    }
                }
            }
        };

        match timeout(deadline, await_ready).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(SessionError::HandshakeTimeout { waited: deadline }),
        }

        info!(
            voice = %config.voice,
            sample_rate = config.sample_rate,
            "session ready"
        );
        Ok(Self {
            channel,
            config,
            state: SessionState::Streaming,
            bytes_produced: 0,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Cumulative raw audio bytes produced by completed receive loops.
    pub fn bytes_produced(&self) -> u64 {
        self.bytes_produced
    }

    /// Send one text fragment. Fire-and-forget: no per-message
    /// acknowledgment is expected.
    pub async fn stream_text(&mut self, text: &str) -> Result<(), SessionError> {
        self.ensure_streaming()?;
        validate_input_fragment(text)?;
        let frame = envelope::encode(&ClientEnvelope::InputAppend {
            text: text.to_string(),
        })?;
        self.channel.send(frame).await
    }

    /// Signal that no further text input will follow.
    pub async fn commit(&mut self) -> Result<(), SessionError> {
        self.ensure_streaming()?;
        let frame = envelope::encode(&ClientEnvelope::InputCommit)?;
        self.channel.send(frame).await
    }

    /// Request graceful termination; audio keeps flowing until the server
    /// sends its terminal envelope.
    pub async fn finish(&mut self) -> Result<(), SessionError> {
        self.ensure_streaming()?;
        let frame = envelope::encode(&ClientEnvelope::SessionFinish)?;
        self.channel.send(frame).await?;
        self.state = SessionState::AwaitingFinishAck;
        Ok(())
    }

    /// The sole reader. Each `audio-delta` is decoded and written to the
    /// sink in strict arrival order; the loop terminates exactly once on a
    /// terminal envelope or on channel closure. No fragment is accepted
    /// after a terminal envelope because the loop has already returned.
    pub async fn receive<W: std::io::Write>(
        &mut self,
        sink: W,
    ) -> Result<SessionOutcome, SessionError> {
        match self.state {
            SessionState::Streaming | SessionState::AwaitingFinishAck => {}
            state => return Err(SessionError::InvalidState(state)),
        }

        let mut assembler = ChunkAssembler::new(sink);
        loop {
            match self.channel.recv().await {
                Some(Ok(frame)) => match envelope::decode(&frame) {
                    Ok(ServerEnvelope::AudioDelta { audio }) => {
                        let n = assembler.append(&audio).map_err(|e| {
                            self.state = SessionState::Failed;
                            e
                        })?;
                        debug!(bytes = n, total = assembler.bytes_written(), "audio delta");
                    }
                    Ok(ServerEnvelope::SessionComplete) => {
                        self.state = SessionState::Completed;
                        let bytes = assembler.finalize()?;
                        self.bytes_produced += bytes;
                        info!(bytes, "session complete");
                        return Ok(SessionOutcome {
                            bytes_produced: bytes,
                            completion: Completion::Complete,
                        });
                    }
                    Ok(ServerEnvelope::SessionError { message }) => {
                        self.state = SessionState::Failed;
                        return Err(SessionError::ServerReported { message });
                    }
                    Ok(ServerEnvelope::SessionReady) => {
                        debug!("duplicate session-ready ignored");
                    }
                    Err(e) => {
                        debug!(error = %e, "skipping undecodable frame");
                    }
                },
                Some(Err(e)) => {
                    self.state = SessionState::Failed;
                    return Err(e);
                }
                None => {
                    self.state = SessionState::Failed;
                    let bytes = assembler.finalize()?;
                    self.bytes_produced += bytes;
                    warn!(bytes, "channel closed before a terminal envelope");
                    return Ok(SessionOutcome {
                        bytes_produced: bytes,
                        completion: Completion::Cancelled,
                    });
                }
            }
        }
    }

    /// Abort the session and release the channel. Any receive loop still
    /// blocked on this channel observes the closure and reports a
    /// `Cancelled` outcome.
    pub async fn cancel(&mut self) -> Result<(), SessionError> {
        self.state = SessionState::Failed;
        self.channel.close().await
    }

    fn ensure_streaming(&self) -> Result<(), SessionError> {
        if self.state == SessionState::Streaming {
            Ok(())
        } else {
            Err(SessionError::InvalidState(self.state))
        }
    }
}
