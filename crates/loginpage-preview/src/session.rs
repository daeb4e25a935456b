//! Runs a `PreviewStateController` on its own task.
//!
//! Edits are queued over a channel and applied in order. The displayed
//! snapshot is published on a watch channel, so any number of renderers can
//! follow it. The task ends when every `PreviewSession` handle is dropped.

use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::time::Instant;

use loginpage_types::prelude::*;

use crate::controller::{Draft, PreviewStateController};

type EditFn = Box<dyn FnOnce(&mut Draft) + Send>;

enum Command {
	Edit(EditFn),
	Refresh,
	Draft(oneshot::Sender<Draft>),
}

#[derive(Clone, Debug)]
pub struct PreviewSession {
	tx: flume::Sender<Command>,
	displayed: watch::Receiver<Draft>,
}

impl PreviewSession {
	/// Spawns the session task on the current runtime
	pub fn spawn(draft: Draft, debounce: Duration) -> PreviewSession {
		let (tx, rx) = flume::unbounded();
		let (displayed_tx, displayed) = watch::channel(draft.clone());
		let controller = PreviewStateController::new(draft, debounce);
		tokio::spawn(run(controller, rx, displayed_tx));
		PreviewSession { tx, displayed }
	}

	pub fn edit<F>(&self, f: F) -> ClResult<()>
	where
		F: FnOnce(&mut Draft) + Send + 'static,
	{
		self.send(Command::Edit(Box::new(f)))
	}

	pub fn set_live(&self, live: bool) -> ClResult<()> {
		self.edit(move |draft| draft.preview.live = live)
	}

	pub fn refresh(&self) -> ClResult<()> {
		self.send(Command::Refresh)
	}

	/// Current draft, after every edit queued before this call
	pub async fn draft(&self) -> ClResult<Draft> {
		let (tx, rx) = oneshot::channel();
		self.send(Command::Draft(tx))?;
		rx.await.map_err(|_| Error::Internal("preview session closed".into()))
	}

	/// Snapshot the preview currently shows
	pub fn displayed(&self) -> Draft {
		self.displayed.borrow().clone()
	}

	/// Receiver that is notified whenever the displayed snapshot changes
	pub fn subscribe(&self) -> watch::Receiver<Draft> {
		self.displayed.clone()
	}

	fn send(&self, cmd: Command) -> ClResult<()> {
		self.tx.send(cmd).map_err(|_| Error::Internal("preview session closed".into()))
	}
}

async fn wait_until(deadline: Option<Instant>) {
	match deadline {
		Some(deadline) => tokio::time::sleep_until(deadline).await,
		None => std::future::pending().await,
	}
}

async fn run(
	mut controller: PreviewStateController,
	rx: flume::Receiver<Command>,
	displayed_tx: watch::Sender<Draft>,
) {
	debug!("preview session started");
	loop {
		let changed = tokio::select! {
			cmd = rx.recv_async() => match cmd {
				Ok(Command::Edit(f)) => controller.edit(f, Instant::now()),
				Ok(Command::Refresh) => controller.request_refresh(Instant::now()),
				Ok(Command::Draft(reply)) => {
					let _ = reply.send(controller.draft().clone());
					false
				}
				Err(_) => break,
			},
			() = wait_until(controller.next_deadline()) => controller.poll(Instant::now()),
		};
		if changed {
			displayed_tx.send_replace(controller.displayed().clone());
		}
	}
	debug!(propagations = controller.propagations(), "preview session ended");
}


// vim: ts=4
