//! In-process communicator: one thread per worker, one channel inbox per worker.
//!
//! Messages are matched on (source, tag) the way MPI matches them: an
//! envelope that arrives while the worker waits for a different one is parked
//! and handed out later, in arrival order. A shared abort flag lets any worker
//! release every peer blocked in a receive.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use super::{Comm, Tag};
use crate::error::{HeatError, Result};

// How often a blocked receive re-checks the abort flag.
const ABORT_POLL: Duration = Duration::from_millis(20);

struct Envelope {
    src: usize,
    tag: Tag,
    payload: Vec<f64>,
}

pub struct LocalComm {
    rank: usize,
    peers: Vec<Sender<Envelope>>,
    inbox: Receiver<Envelope>,
    parked: RefCell<VecDeque<Envelope>>,
    aborted: Arc<AtomicBool>,
}

impl LocalComm {
    /// Creates a connected group of `size` communicators, one per worker.
    ///
    /// Element `k` of the returned vector has rank `k`; each is meant to be
    /// moved into its own thread.
    pub fn universe(size: usize) -> Vec<LocalComm> {
        let (senders, inboxes): (Vec<_>, Vec<_>) = (0..size).map(|_| mpsc::channel()).unzip();
        let aborted = Arc::new(AtomicBool::new(false));
        inboxes
            .into_iter()
            .enumerate()
            .map(|(rank, inbox)| LocalComm {
                rank,
                peers: senders.clone(),
                inbox,
                parked: RefCell::new(VecDeque::new()),
                aborted: Arc::clone(&aborted),
            })
            .collect()
    }

    fn check_aborted(&self) -> Result<()> {
        if self.aborted.load(Ordering::Acquire) {
            Err(HeatError::Aborted)
        } else {
            Ok(())
        }
    }

    fn take_matching(&self, src: usize, tag: Tag) -> Result<Envelope> {
        let mut parked = self.parked.borrow_mut();
        if let Some(pos) = parked.iter().position(|e| e.src == src && e.tag == tag) {
            if let Some(env) = parked.remove(pos) {
                return Ok(env);
            }
        }
        loop {
            self.check_aborted()?;
            match self.inbox.recv_timeout(ABORT_POLL) {
                Ok(env) if env.src == src && env.tag == tag => return Ok(env),
                Ok(env) => parked.push_back(env),
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(HeatError::Comm(format!(
                        "inbox of worker {} disconnected",
                        self.rank
                    )));
                }
            }
        }
    }
}

impl Comm for LocalComm {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.peers.len()
    }

    fn send_or_skip(&self, dest: Option<usize>, tag: Tag, buf: &[f64]) -> Result<()> {
        let Some(dest) = dest else { return Ok(()) };
        self.check_aborted()?;
        let peer = self
            .peers
            .get(dest)
            .ok_or_else(|| HeatError::Comm(format!("no worker with id {dest}")))?;
        peer.send(Envelope { src: self.rank, tag, payload: buf.to_vec() })
            .map_err(|_| HeatError::Comm(format!("worker {dest} is gone")))
    }

    fn receive_or_skip(&self, src: Option<usize>, tag: Tag, buf: &mut [f64]) -> Result<bool> {
        let Some(src) = src else { return Ok(false) };
        let env = self.take_matching(src, tag)?;
        if env.payload.len() != buf.len() {
            return Err(HeatError::Comm(format!(
                "worker {} expected {} values tagged {:?} from {src}, got {}",
                self.rank,
                buf.len(),
                tag,
                env.payload.len()
            )));
        }
        buf.copy_from_slice(&env.payload);
        Ok(true)
    }

    fn abort(&self) {
        self.aborted.store(true, Ordering::Release);
    }
}
