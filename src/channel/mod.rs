//! Running the scanner on a producer thread, handing frames off through a rendezvous
//! channel.


use std::{
	io,
	sync::mpsc::{self, Receiver, RecvTimeoutError},
	thread::{self, JoinHandle},
	time::Duration,
};

use tracing::debug;

use crate::{
	lexer::{Error, FrameSource},
	scanner::{self, Frame, Input, Scanner, StopSignal},
};


type Handoff = Result<Frame, scanner::Error>;


/// The consumer end of a scanner running on its own thread.
///
/// The channel has no buffer: the producer blocks on each frame until the consumer pulls
/// it. Stopping raises the scanner's stop signal and hangs up, which releases a producer
/// blocked on a handoff. A producer blocked reading its input is not interrupted.
#[derive(Debug)]
pub struct Channel {
	frames: Option<Receiver<Handoff>>,
	stop: StopSignal,
	producer: Option<JoinHandle<()>>,
	/// Bound on every pull, if any.
	timeout: Option<Duration>,
	/// Whether the producer delivered its last item, the sentinel or an error.
	finished: bool,
}


impl Channel {
	/// Move the scanner to a new producer thread.
	pub fn spawn<I>(scanner: Scanner<I>) -> io::Result<Self>
	where
		I: Input + Send + 'static,
	{
		let stop = scanner.stop_signal();
		let (sender, receiver) = mpsc::sync_channel::<Handoff>(0);

		let producer = thread::Builder::new()
			.name("scanner".into())
			.spawn(
				move || {
					debug!("producer started");

					for item in scanner {
						if sender.send(item).is_err() {
							debug!("consumer hung up");
							return;
						}
					}

					debug!("producer finished");
				}
			)?;

		Ok(Self {
			frames: Some(receiver),
			stop,
			producer: Some(producer),
			timeout: None,
			finished: false,
		})
	}


	/// Bound every pull by the given time.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}


	/// Pull a frame, waiting no longer than the given time. On timeout the producer keeps
	/// running, and the frame it was producing is delivered by a later pull.
	pub fn pull_within(&mut self, timeout: Duration) -> Result<Option<Frame>, Error> {
		self.receive(Some(timeout))
	}


	fn receive(&mut self, timeout: Option<Duration>) -> Result<Option<Frame>, Error> {
		let frames = match &self.frames {
			Some(frames) => frames,
			None => return Ok(None),
		};

		let item = match timeout {
			Some(timeout) => match frames.recv_timeout(timeout) {
				Ok(item) => Some(item),
				Err(RecvTimeoutError::Timeout) => return Err(Error::Timeout(timeout)),
				Err(RecvTimeoutError::Disconnected) => None,
			},

			None => frames.recv().ok(),
		};

		match item {
			Some(Ok(frame)) => {
				if frame.is_sentinel() {
					self.finished = true;
				}
				Ok(Some(frame))
			}

			Some(Err(error)) => {
				self.finished = true;
				Err(error.into())
			}

			None => {
				self.frames = None;

				if self.finished || self.stop.is_raised() {
					Ok(None)
				} else {
					Err(Error::Disconnected)
				}
			}
		}
	}
}


impl FrameSource for Channel {
	fn pull(&mut self) -> Result<Option<Frame>, Error> {
		self.receive(self.timeout)
	}


	fn stop(&mut self) {
		if self.frames.take().is_some() {
			debug!("stopping producer");
			self.stop.raise();
		}
	}
}


impl Drop for Channel {
	fn drop(&mut self) {
		FrameSource::stop(self);

		// Only a producer that is done can be joined without blocking.
		if self.finished {
			if let Some(producer) = self.producer.take() {
				if producer.join().is_err() {
					debug!("producer panicked");
				}
			}
		}
	}
}
