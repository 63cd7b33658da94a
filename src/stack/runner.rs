//! Threaded stack runner (std only).

use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::axis::AxisDrive;
use crate::camera::Shutter;
use crate::clock::Clock;
use crate::config::{StackPlan, SystemSettings};
use crate::error::{Error, HardwareError};

use super::control::StackControl;
use super::sequencer::{Rig, StackOutcome, StackSequencer};

type Finished<A, C> = Option<(Rig<A, C>, StackOutcome)>;

/// A stack run executing on its own thread.
///
/// The rig is moved onto the thread for the duration of the run and handed
/// back by [`join`](Self::join).
pub struct StackRunner<A, C>
where
    A: AxisDrive + Send + 'static,
    C: Shutter + Send + 'static,
{
    handle: JoinHandle<Finished<A, C>>,
}

impl<A, C> StackRunner<A, C>
where
    A: AxisDrive + Send + 'static,
    C: Shutter + Send + 'static,
{
    /// Start the sequencer thread. `control` must already be armed.
    ///
    /// # Errors
    ///
    /// Returns the rig together with `HardwareError::TaskSpawn` if the
    /// thread cannot be created.
    pub fn spawn<K>(
        rig: Rig<A, C>,
        plan: StackPlan,
        settings: SystemSettings,
        control: Arc<StackControl>,
        clock: K,
    ) -> Result<Self, (Rig<A, C>, Error)>
    where
        K: Clock + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel::<Rig<A, C>>(1);
        let task_control = Arc::clone(&control);

        let spawned = thread::Builder::new()
            .name("auto_stack".into())
            .spawn(move || {
                let mut rig = rx.recv().ok()?;
                let outcome = StackSequencer::new(&task_control, clock).run(&mut rig, &plan, &settings);
                Some((rig, outcome))
            });

        let handle = match spawned {
            Ok(handle) => handle,
            Err(_) => {
                control.finish();
                return Err((rig, HardwareError::TaskSpawn.into()));
            }
        };

        if let Err(mpsc::SendError(rig)) = tx.send(rig) {
            control.finish();
            return Err((rig, HardwareError::TaskSpawn.into()));
        }

        Ok(Self { handle })
    }

    /// Whether the sequencer thread has exited.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the thread and take the rig back.
    ///
    /// Returns `None` if the thread panicked; the rig is lost with it.
    pub fn join(self) -> Option<(Rig<A, C>, StackOutcome)> {
        match self.handle.join() {
            Ok(finished) => finished,
            Err(_) => {
                error!("stack task panicked, rig lost");
                None
            }
        }
    }
}
