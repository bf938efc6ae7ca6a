//! ISR-safe PHY wrapper using critical sections.
//!
//! [`SharedXgbePhy`] binds the AN interrupt to the state machine. The
//! interrupt handler only masks the line and queues a relay task; the
//! worker loop ([`SharedXgbePhy::run_pending`]) runs the relay, which
//! flushes any negotiation still pending and queues a fresh one. The
//! negotiation runs with the PHY locked and unmasks the line when done, so
//! an interrupt arriving meanwhile coalesces into exactly one further run.

use super::primitives::CriticalSectionCell;
use super::workqueue::{AnWork, WorkQueue};
use crate::error::{ConfigError, Result};
use crate::hal::irq::IrqLine;
use crate::internal::log::debug;
use crate::phy::autoneg::AnCycle;
use crate::phy::generic::{AnWorker, LinkStatus, PhyDriver};

/// ISR-safe PHY wrapper using critical sections.
///
/// All PHY access goes through `critical_section::with()`, disabling
/// interrupts for the duration of the closure. This is the per-device lock.
///
/// # Example
///
/// ```ignore
/// static PHY: StaticCell<SharedXgbePhy<MyPhy, MyIrq>> = StaticCell::new();
/// let phy = PHY.init(SharedXgbePhy::new(xgbe, irq));
///
/// phy.soft_reset()?;
/// phy.config_init()?;
/// phy.config_aneg()?;
///
/// #[interrupt]
/// fn XGBE_AN() {
///     phy.on_interrupt();
/// }
///
/// // Worker task
/// loop {
///     phy.run_pending();
/// }
/// ```
pub struct SharedXgbePhy<P, I> {
    phy: CriticalSectionCell<P>,
    queue: CriticalSectionCell<WorkQueue>,
    irq: I,
    irq_allocated: CriticalSectionCell<bool>,
}

impl<P, I: IrqLine> SharedXgbePhy<P, I> {
    /// Wrap a probed PHY and its AN interrupt line
    pub const fn new(phy: P, irq: I) -> Self {
        Self {
            phy: CriticalSectionCell::new(phy),
            queue: CriticalSectionCell::new(WorkQueue::new()),
            irq,
            irq_allocated: CriticalSectionCell::new(false),
        }
    }

    /// Execute a closure with exclusive access to the PHY.
    ///
    /// Interrupts are disabled for the duration of the closure.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut P) -> R,
    {
        self.phy.with(f)
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut P) -> R,
    {
        self.phy.try_with(f)
    }

    /// The AN interrupt line
    pub const fn irq(&self) -> &I {
        &self.irq
    }

    /// Whether the interrupt line has been claimed
    pub fn irq_allocated(&self) -> bool {
        self.irq_allocated.with(|allocated| *allocated)
    }

    /// Whether deferred work is waiting
    pub fn has_pending(&self) -> bool {
        self.queue.with(|queue| !queue.is_empty())
    }

    /// AN interrupt handler body
    ///
    /// Masks the line and queues the relay. A relay already pending absorbs
    /// this interrupt, so the mask taken here is released at once.
    pub fn on_interrupt(&self) {
        self.irq.disable();
        let queued = self.queue.with(|queue| queue.queue(AnWork::Relay));
        if !queued {
            self.irq.enable();
        }
    }

    /// Claim the interrupt line unless already claimed
    fn request_irq(&self) -> Result<()> {
        if self.irq_allocated() {
            return Ok(());
        }
        self.irq
            .request()
            .map_err(|_| ConfigError::IrqUnavailable)?;
        self.irq_allocated.with(|allocated| *allocated = true);
        debug!("AN interrupt line claimed");
        Ok(())
    }
}

impl<P: AnWorker, I: IrqLine> SharedXgbePhy<P, I> {
    /// Run deferred work until the queue is empty
    ///
    /// Returns the number of tasks run.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Some(work) = self.queue.with(WorkQueue::start_next) {
            match work {
                AnWork::Relay => self.relay(),
                AnWork::Negotiate => {
                    self.negotiate();
                }
            }
            self.queue.with(WorkQueue::finish);
            ran += 1;
        }
        ran
    }

    fn relay(&self) {
        // A negotiation still pending is flushed before queuing the next
        if self.queue.with(|queue| queue.cancel(AnWork::Negotiate)) {
            self.negotiate();
        }
        self.queue.with(|queue| queue.queue(AnWork::Negotiate));
    }

    fn negotiate(&self) -> AnCycle {
        self.phy.with(|phy| {
            let cycle = phy.an_state_machine();
            self.irq.enable();
            cycle
        })
    }

    /// Detach: drain queued work, release the interrupt line and hand
    /// back the PHY
    ///
    /// Draining comes first since a negotiation unmasks the line.
    pub fn remove(self) -> P {
        self.run_pending();
        if self.irq_allocated() {
            self.irq.free();
        }
        self.phy.into_inner()
    }
}

impl<P: PhyDriver, I: IrqLine> SharedXgbePhy<P, I> {
    /// See [`PhyDriver::soft_reset`]
    pub fn soft_reset(&self) -> Result<()> {
        self.phy.with(PhyDriver::soft_reset)
    }

    /// Claim the interrupt line (once), then [`PhyDriver::config_init`]
    pub fn config_init(&self) -> Result<()> {
        self.request_irq()?;
        self.phy.with(PhyDriver::config_init)
    }

    /// [`PhyDriver::config_aneg`] with the AN interrupt masked
    pub fn config_aneg(&self) -> Result<()> {
        self.phy.with(|phy| {
            self.irq.disable();
            let result = phy.config_aneg();
            self.irq.enable();
            result
        })
    }

    /// See [`PhyDriver::aneg_done`]
    pub fn aneg_done(&self) -> bool {
        self.phy.with(|phy| phy.aneg_done())
    }

    /// See [`PhyDriver::read_status`]
    pub fn read_status(&self) -> Result<LinkStatus> {
        self.phy.with(PhyDriver::read_status)
    }

    /// See [`PhyDriver::suspend`]
    pub fn suspend(&self) -> Result<()> {
        self.phy.with(PhyDriver::suspend)
    }

    /// See [`PhyDriver::resume`]
    pub fn resume(&self) -> Result<()> {
        self.phy.with(PhyDriver::resume)
    }
}
