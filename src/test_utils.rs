//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the XGBE PHY driver
//! on the host without hardware access.
//!
//! Mocks keep their state behind `Arc<Mutex<_>>` so a clone handed to the
//! driver and the clone kept by the test see the same registers, and so a
//! PHY built on them can move to another thread.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use std::boxed::Box;
use std::collections::{HashMap, HashSet, VecDeque};
use std::string::{String, ToString};
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::vec::Vec;

use crate::config::{DeviceProperties, PhyConfig, SerdesChannel, SpeedSet};
use crate::error::{IoError, Result};
use crate::hal::irq::IrqLine;
use crate::hal::mdio::MdioBus;
use crate::hal::mmio::SerdesRegs;
use crate::internal::mmd_regs::{an, ctrl1, devs, fec, mmd, pma, reg, stat1};
use crate::internal::serdes_regs::cmu;
use crate::phy::xgbe::XgbePhy;
use crate::serdes::cmu::SerdesCmu;

type RegKey = (u8, u8, u16);

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// =============================================================================
// Mock MDIO Bus
// =============================================================================

#[derive(Debug, Default)]
struct MdioState {
    registers: HashMap<RegKey, u16>,
    queued: HashMap<RegKey, VecDeque<u16>>,
    self_clearing: HashMap<RegKey, u16>,
    failing_reads: HashSet<RegKey>,
    failing_writes: HashSet<RegKey>,
    read_log: Vec<RegKey>,
    write_log: Vec<(u8, u8, u16, u16)>,
}

/// Mock Clause 45 MDIO bus for testing PHY drivers without hardware
///
/// Registers are keyed by (phy_addr, mmd, reg) and read back as 0 until set.
///
/// # Example
///
/// ```ignore
/// let mdio = MockMdioBus::new();
/// mdio.setup_xgbe(0);
/// mdio.set_link(0, true);
///
/// let mut phy = XgbePhy::probe(0, mdio.clone(), lane, &CMU, delay, config)?;
/// assert!(phy.update_link()?);
/// ```
#[derive(Debug, Default, Clone)]
pub struct MockMdioBus {
    state: Arc<Mutex<MdioState>>,
}

impl MockMdioBus {
    /// Create a new mock MDIO bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register value
    pub fn set_register(&self, phy_addr: u8, mmd: u8, reg: u16, value: u16) {
        lock(&self.state).registers.insert((phy_addr, mmd, reg), value);
    }

    /// Get the current value of a register (for test verification)
    pub fn get_register(&self, phy_addr: u8, mmd: u8, reg: u16) -> Option<u16> {
        lock(&self.state).registers.get(&(phy_addr, mmd, reg)).copied()
    }

    /// Get all writes that have been made
    pub fn get_writes(&self) -> Vec<(u8, u8, u16, u16)> {
        lock(&self.state).write_log.clone()
    }

    /// Get all reads that have been made
    pub fn get_reads(&self) -> Vec<(u8, u8, u16)> {
        lock(&self.state).read_log.clone()
    }

    /// Values written to one register, oldest first
    pub fn writes_to(&self, phy_addr: u8, mmd: u8, reg: u16) -> Vec<u16> {
        lock(&self.state)
            .write_log
            .iter()
            .filter(|w| (w.0, w.1, w.2) == (phy_addr, mmd, reg))
            .map(|w| w.3)
            .collect()
    }

    /// Number of reads of one register
    pub fn reads_of(&self, phy_addr: u8, mmd: u8, reg: u16) -> usize {
        lock(&self.state)
            .read_log
            .iter()
            .filter(|r| **r == (phy_addr, mmd, reg))
            .count()
    }

    /// Clear the write log
    pub fn clear_writes(&self) {
        lock(&self.state).write_log.clear();
    }

    /// Clear the read log
    pub fn clear_reads(&self) {
        lock(&self.state).read_log.clear();
    }

    /// Return `values` from the next reads of a register, then its stored value
    pub fn queue_reads(&self, phy_addr: u8, mmd: u8, reg: u16, values: &[u16]) {
        lock(&self.state)
            .queued
            .entry((phy_addr, mmd, reg))
            .or_default()
            .extend(values.iter().copied());
    }

    /// Bits in `mask` never stick when written (e.g. a reset bit)
    pub fn set_self_clearing(&self, phy_addr: u8, mmd: u8, reg: u16, mask: u16) {
        lock(&self.state)
            .self_clearing
            .insert((phy_addr, mmd, reg), mask);
    }

    /// Make every bit of the register stick again
    pub fn clear_self_clearing(&self, phy_addr: u8, mmd: u8, reg: u16) {
        lock(&self.state).self_clearing.remove(&(phy_addr, mmd, reg));
    }

    /// Fail every subsequent read of a register
    pub fn fail_reads(&self, phy_addr: u8, mmd: u8, reg: u16) {
        lock(&self.state).failing_reads.insert((phy_addr, mmd, reg));
    }

    /// Fail every subsequent write of a register
    pub fn fail_writes(&self, phy_addr: u8, mmd: u8, reg: u16) {
        lock(&self.state).failing_writes.insert((phy_addr, mmd, reg));
    }

    /// Setup for an XGBE PHY in KR mode, link down, FEC capable
    pub fn setup_xgbe(&self, phy_addr: u8) {
        self.set_register(phy_addr, mmd::PCS, reg::DEVID1, 0x7996);
        self.set_register(phy_addr, mmd::PCS, reg::DEVID2, 0xced0);

        let devices = devs::PMAPMD | devs::PCS | devs::AN;
        self.set_register(phy_addr, mmd::PCS, reg::DEVS1, devices as u16);
        self.set_register(phy_addr, mmd::PCS, reg::DEVS2, (devices >> 16) as u16);

        self.set_register(phy_addr, mmd::PCS, reg::CTRL1, ctrl1::SPEED_10G);
        self.set_register(phy_addr, mmd::PCS, reg::CTRL2, 0);
        self.set_register(phy_addr, mmd::PCS, reg::STAT1, 0);
        self.set_self_clearing(phy_addr, mmd::PCS, reg::CTRL1, ctrl1::RESET);

        self.set_register(phy_addr, mmd::PMAPMD, pma::FEC_ABILITY, fec::ENABLE | fec::FORWARD);
    }

    /// Set the link partner base page (words 1, 2 and 3)
    pub fn set_link_partner(&self, phy_addr: u8, base: u16, tech: u16, fec: u16) {
        self.set_register(phy_addr, mmd::AN, an::LPA, base);
        self.set_register(phy_addr, mmd::AN, an::LPA + 1, tech);
        self.set_register(phy_addr, mmd::AN, an::LPA + 2, fec);
    }

    /// Set the PCS link status bit
    pub fn set_link(&self, phy_addr: u8, up: bool) {
        let value = if up { stat1::LSTATUS } else { 0 };
        self.set_register(phy_addr, mmd::PCS, reg::STAT1, value);
    }

    /// Latch AN interrupt bits
    pub fn raise_an_interrupt(&self, phy_addr: u8, bits: u16) {
        let mut state = lock(&self.state);
        *state.registers.entry((phy_addr, mmd::AN, an::INT)).or_default() |= bits;
    }
}

impl MdioBus for MockMdioBus {
    fn read(&mut self, phy_addr: u8, mmd: u8, reg: u16) -> Result<u16> {
        let key = (phy_addr, mmd, reg);
        let mut state = lock(&self.state);
        state.read_log.push(key);

        if state.failing_reads.contains(&key) {
            return Err(IoError::PhyError.into());
        }
        if let Some(value) = state.queued.get_mut(&key).and_then(VecDeque::pop_front) {
            return Ok(value);
        }
        // Return from register map (default 0 if not set)
        Ok(state.registers.get(&key).copied().unwrap_or(0))
    }

    fn write(&mut self, phy_addr: u8, mmd: u8, reg: u16, value: u16) -> Result<()> {
        let key = (phy_addr, mmd, reg);
        let mut state = lock(&self.state);

        if state.failing_writes.contains(&key) {
            return Err(IoError::PhyError.into());
        }
        state.write_log.push((phy_addr, mmd, reg, value));

        let clearing = state.self_clearing.get(&key).copied().unwrap_or(0);
        state.registers.insert(key, value & !clearing);
        Ok(())
    }
}

// =============================================================================
// Mock SerDes Windows
// =============================================================================

/// Which SerDes window an access went to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Cmu,
    Lane(u8),
}

/// One recorded SerDes register write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerdesAccess {
    pub window: Window,
    pub offset: u16,
    pub value: u16,
}

/// Ordered write log shared by every window of one chip
#[derive(Debug, Default, Clone)]
pub struct SerdesLog {
    entries: Arc<Mutex<Vec<SerdesAccess>>>,
}

impl SerdesLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write, oldest first
    pub fn writes(&self) -> Vec<SerdesAccess> {
        lock(&self.entries).clone()
    }

    /// Values written to one register of one window
    pub fn writes_to(&self, window: Window, offset: u16) -> Vec<u16> {
        lock(&self.entries)
            .iter()
            .filter(|w| w.window == window && w.offset == offset)
            .map(|w| w.value)
            .collect()
    }

    pub fn clear(&self) {
        lock(&self.entries).clear();
    }

    fn record(&self, access: SerdesAccess) {
        lock(&self.entries).push(access);
    }
}

#[derive(Debug, Default)]
struct SerdesState {
    registers: HashMap<u16, u16>,
    queued: HashMap<u16, VecDeque<u16>>,
    reads: HashMap<u16, usize>,
    stuck: bool,
}

/// Mock SerDes register window
///
/// A CMU window reports every lane ready in REG15 until told otherwise.
#[derive(Debug, Clone)]
pub struct MockSerdes {
    window: Window,
    log: SerdesLog,
    state: Arc<Mutex<SerdesState>>,
}

impl MockSerdes {
    /// CMU window recording into `log`
    pub fn cmu(log: &SerdesLog) -> Self {
        Self::with_window(log, Window::Cmu)
    }

    /// RXTX window of lane `channel` recording into `log`
    pub fn lane(log: &SerdesLog, channel: u8) -> Self {
        Self::with_window(log, Window::Lane(channel))
    }

    fn with_window(log: &SerdesLog, window: Window) -> Self {
        Self {
            window,
            log: log.clone(),
            state: Arc::new(Mutex::new(SerdesState::default())),
        }
    }

    /// Set a register value without logging a write
    pub fn set_register(&self, offset: u16, value: u16) {
        lock(&self.state).registers.insert(offset, value);
    }

    /// Return `values` from the next reads of a register
    pub fn queue_reads(&self, offset: u16, values: &[u16]) {
        lock(&self.state)
            .queued
            .entry(offset)
            .or_default()
            .extend(values.iter().copied());
    }

    /// Make the CMU ready register read 0 forever
    pub fn set_stuck(&self, stuck: bool) {
        lock(&self.state).stuck = stuck;
    }

    /// Number of reads of a register
    pub fn reads_of(&self, offset: u16) -> usize {
        lock(&self.state).reads.get(&offset).copied().unwrap_or(0)
    }
}

impl SerdesRegs for MockSerdes {
    fn read(&mut self, offset: u16) -> u16 {
        let mut state = lock(&self.state);
        *state.reads.entry(offset).or_default() += 1;

        let ready_reg = self.window == Window::Cmu && offset == cmu::REG15;
        if ready_reg && state.stuck {
            return 0;
        }
        if let Some(value) = state.queued.get_mut(&offset).and_then(VecDeque::pop_front) {
            return value;
        }
        match state.registers.get(&offset) {
            Some(value) => *value,
            None if ready_reg => 0xffff,
            None => 0,
        }
    }

    fn write(&mut self, offset: u16, value: u16) {
        self.log.record(SerdesAccess {
            window: self.window,
            offset,
            value,
        });
        lock(&self.state).registers.insert(offset, value);
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting. Clones share
/// the counter.
#[derive(Debug, Default, Clone)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: Arc<AtomicU64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        self.total_ns.load(Ordering::SeqCst)
    }

    /// Get total microseconds that were "delayed"
    pub fn total_us(&self) -> u64 {
        self.total_ns() / 1_000
    }

    /// Get total milliseconds that were "delayed"
    pub fn total_ms(&self) -> u64 {
        self.total_ns() / 1_000_000
    }

    /// Reset the delay counter
    pub fn reset(&self) {
        self.total_ns.store(0, Ordering::SeqCst);
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.fetch_add(u64::from(ns), Ordering::SeqCst);
    }
}

// =============================================================================
// Mock Interrupt Line
// =============================================================================

/// Mock interrupt line counting requests and tracking mask depth
#[derive(Debug, Default)]
pub struct MockIrq {
    requests: AtomicU32,
    frees: AtomicU32,
    disables: AtomicU32,
    depth: AtomicI32,
    fail_request: AtomicBool,
    freed: AtomicBool,
    enables_after_free: AtomicU32,
}

impl MockIrq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `request` fail
    pub fn fail_requests(&self) {
        self.fail_request.store(true, Ordering::SeqCst);
    }

    pub fn requests(&self) -> u32 {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn frees(&self) -> u32 {
        self.frees.load(Ordering::SeqCst)
    }

    /// Total `disable` calls
    pub fn disables(&self) -> u32 {
        self.disables.load(Ordering::SeqCst)
    }

    /// Outstanding `disable` calls not yet matched by `enable`
    pub fn depth(&self) -> i32 {
        self.depth.load(Ordering::SeqCst)
    }

    pub fn is_enabled(&self) -> bool {
        self.depth() == 0
    }

    /// `enable` calls made on the line after it was freed
    pub fn enables_after_free(&self) -> u32 {
        self.enables_after_free.load(Ordering::SeqCst)
    }
}

impl IrqLine for MockIrq {
    fn request(&self) -> Result<()> {
        if self.fail_request.load(Ordering::SeqCst) {
            return Err(IoError::InvalidState.into());
        }
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn free(&self) {
        self.frees.fetch_add(1, Ordering::SeqCst);
        self.freed.store(true, Ordering::SeqCst);
    }

    fn disable(&self) {
        self.disables.fetch_add(1, Ordering::SeqCst);
        self.depth.fetch_add(1, Ordering::SeqCst);
    }

    fn enable(&self) {
        if self.freed.load(Ordering::SeqCst) {
            self.enables_after_free.fetch_add(1, Ordering::SeqCst);
        }
        self.depth.fetch_sub(1, Ordering::SeqCst);
    }
}

// =============================================================================
// Mock Device Properties
// =============================================================================

/// Mock firmware property store
#[derive(Debug, Default, Clone)]
pub struct MockProperties {
    scalars: HashMap<String, u32>,
    arrays: HashMap<String, Vec<u32>>,
}

impl MockProperties {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_u32(mut self, name: &str, value: u32) -> Self {
        self.scalars.insert(name.to_string(), value);
        self
    }

    #[must_use]
    pub fn with_array(mut self, name: &str, values: &[u32]) -> Self {
        self.arrays.insert(name.to_string(), values.to_vec());
        self
    }
}

impl DeviceProperties for MockProperties {
    fn read_u32(&self, name: &str) -> Option<u32> {
        self.scalars.get(name).copied()
    }

    fn read_u32_array(&self, name: &str, out: &mut [u32]) -> Option<usize> {
        let values = self.arrays.get(name)?;
        for (slot, value) in out.iter_mut().zip(values) {
            *slot = *value;
        }
        Some(values.len())
    }
}

// =============================================================================
// PHY Fixture
// =============================================================================

/// MDIO address used by [`Fixture`]
pub const PHY_ADDR: u8 = 0;

/// PHY type built by [`Fixture`]
pub type TestPhy = XgbePhy<'static, MockMdioBus, MockSerdes, MockSerdes, MockDelay>;

/// Mocks for one XGBE PHY on its own SerDes lane
///
/// The fields are the test's handles onto the mocks the PHY owns.
pub struct Fixture {
    pub mdio: MockMdioBus,
    pub log: SerdesLog,
    pub cmu: MockSerdes,
    pub cmu_lock: &'static SerdesCmu<MockSerdes>,
    pub lane: MockSerdes,
    pub delay: MockDelay,
    channel: SerdesChannel,
}

impl Fixture {
    /// XGBE PHY on lane 0 with its own CMU
    pub fn new() -> Self {
        let log = SerdesLog::new();
        let cmu = MockSerdes::cmu(&log);
        let cmu_lock: &'static SerdesCmu<MockSerdes> =
            Box::leak(Box::new(SerdesCmu::new(cmu.clone())));
        Self::build(log, cmu, cmu_lock, 0)
    }

    /// Another PHY on lane `channel` behind the same CMU as `other`
    pub fn sharing(other: &Fixture, channel: u8) -> Self {
        Self::build(other.log.clone(), other.cmu.clone(), other.cmu_lock, channel)
    }

    fn build(
        log: SerdesLog,
        cmu: MockSerdes,
        cmu_lock: &'static SerdesCmu<MockSerdes>,
        channel: u8,
    ) -> Self {
        let mdio = MockMdioBus::new();
        mdio.setup_xgbe(PHY_ADDR);
        Self {
            mdio,
            lane: MockSerdes::lane(&log, channel),
            log,
            cmu,
            cmu_lock,
            delay: MockDelay::new(),
            channel: SerdesChannel::new(u32::from(channel)).unwrap(),
        }
    }

    pub fn channel(&self) -> SerdesChannel {
        self.channel
    }

    /// Default configuration for this fixture's lane
    pub fn config(&self) -> PhyConfig {
        PhyConfig::new(self.channel, SpeedSet::default())
    }

    /// Probe with `config`
    pub fn probe(&self, config: PhyConfig) -> TestPhy {
        XgbePhy::probe(
            PHY_ADDR,
            self.mdio.clone(),
            self.lane.clone(),
            self.cmu_lock,
            self.delay.clone(),
            config,
        )
        .unwrap_or_else(|e| panic!("probe failed: {e}"))
    }

    /// Probed with the default configuration
    pub fn phy(&self) -> TestPhy {
        self.probe(self.config())
    }

    /// Probed and through `config_init`
    pub fn initialized(&self) -> TestPhy {
        let mut phy = self.phy();
        phy.config_init().unwrap();
        phy
    }

    /// Forget every MDIO and SerDes access so far
    pub fn clear_logs(&self) {
        self.mdio.clear_writes();
        self.mdio.clear_reads();
        self.log.clear();
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Test Assertions
// =============================================================================

/// Assert that a register was written with a specific value
#[macro_export]
macro_rules! assert_reg_written {
    ($mdio:expr, $phy:expr, $mmd:expr, $reg:expr, $value:expr) => {
        let writes = $mdio.get_writes();
        assert!(
            writes
                .iter()
                .any(|w| w.0 == $phy && w.1 == $mmd && w.2 == $reg && w.3 == $value),
            "Expected write to PHY {} MMD {} reg {:#x} with value 0x{:04X}, but got: {:?}",
            $phy,
            $mmd,
            $reg,
            $value,
            writes
        );
    };
}

/// Assert that a register was written (any value)
#[macro_export]
macro_rules! assert_reg_written_any {
    ($mdio:expr, $phy:expr, $mmd:expr, $reg:expr) => {
        let writes = $mdio.get_writes();
        assert!(
            writes
                .iter()
                .any(|w| w.0 == $phy && w.1 == $mmd && w.2 == $reg),
            "Expected write to PHY {} MMD {} reg {:#x}, but got: {:?}",
            $phy,
            $mmd,
            $reg,
            writes
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::delay::DelayNs;

    #[test]
    fn mock_mdio_read_write() {
        let mut mdio = MockMdioBus::new();

        // Initially reads 0
        assert_eq!(mdio.read(0, 1, 0x96).unwrap(), 0);

        mdio.set_register(0, 1, 0x96, 0x1234);
        assert_eq!(mdio.read(0, 1, 0x96).unwrap(), 0x1234);

        // Write updates the value
        mdio.write(0, 1, 0x96, 0x5678).unwrap();
        assert_eq!(mdio.read(0, 1, 0x96).unwrap(), 0x5678);

        // Write is logged
        assert_eq!(mdio.get_writes(), [(0, 1, 0x96, 0x5678)]);
        assert_eq!(mdio.reads_of(0, 1, 0x96), 3);
    }

    #[test]
    fn mock_mdio_mmds_are_separate() {
        let mut mdio = MockMdioBus::new();

        mdio.set_register(0, 3, 0, 0x1111);
        mdio.set_register(0, 7, 0, 0x2222);

        assert_eq!(mdio.read(0, 3, 0).unwrap(), 0x1111);
        assert_eq!(mdio.read(0, 7, 0).unwrap(), 0x2222);
    }

    #[test]
    fn mock_mdio_queued_and_self_clearing() {
        let mut mdio = MockMdioBus::new();
        mdio.set_register(0, 3, 1, 0x0004);
        mdio.queue_reads(0, 3, 1, &[0]);

        assert_eq!(mdio.read(0, 3, 1).unwrap(), 0);
        assert_eq!(mdio.read(0, 3, 1).unwrap(), 0x0004);

        mdio.set_self_clearing(0, 3, 0, 0x8000);
        mdio.write(0, 3, 0, 0x8040).unwrap();
        assert_eq!(mdio.get_register(0, 3, 0), Some(0x0040));
        assert_reg_written!(mdio, 0, 3, 0, 0x8040);
    }

    #[test]
    fn mock_mdio_clones_share_state() {
        let mdio = MockMdioBus::new();
        let mut clone = mdio.clone();

        clone.write(1, 7, 0x8002, 0x0001).unwrap();

        assert_eq!(mdio.get_register(1, 7, 0x8002), Some(0x0001));
        assert_reg_written_any!(mdio, 1, 7, 0x8002);
    }

    #[test]
    fn mock_mdio_injected_failures() {
        let mut mdio = MockMdioBus::new();
        mdio.fail_writes(0, 1, 0xab);

        assert!(mdio.write(0, 1, 0xab, 1).is_err());
        assert!(mdio.get_writes().is_empty());
        assert_eq!(mdio.get_register(0, 1, 0xab), None);
    }

    #[test]
    fn mock_delay_tracking() {
        let mut delay = MockDelay::new();

        delay.delay_ns(1000);
        delay.delay_ns(2000);

        assert_eq!(delay.total_ns(), 3000);
        assert_eq!(delay.total_us(), 3);
        assert_eq!(delay.total_ms(), 0); // Less than 1ms

        delay.delay_ns(1_000_000);
        assert_eq!(delay.total_ms(), 1);
    }

    #[test]
    fn mock_serdes_cmu_ready_default() {
        let log = SerdesLog::new();
        let mut cmu_regs = MockSerdes::cmu(&log);
        let mut lane = MockSerdes::lane(&log, 0);

        assert_eq!(cmu_regs.read(cmu::REG15), 0xffff);
        assert_eq!(lane.read(cmu::REG15), 0);

        cmu_regs.set_stuck(true);
        assert_eq!(cmu_regs.read(cmu::REG15), 0);
        assert_eq!(cmu_regs.reads_of(cmu::REG15), 2);
    }

    #[test]
    fn mock_serdes_log_is_ordered_across_windows() {
        let log = SerdesLog::new();
        let mut cmu_regs = MockSerdes::cmu(&log);
        let mut lane = MockSerdes::lane(&log, 3);

        cmu_regs.write(cmu::REG16, 1);
        lane.write(0x0c, 2);

        let windows: Vec<Window> = log.writes().iter().map(|w| w.window).collect();
        assert_eq!(windows, [Window::Cmu, Window::Lane(3)]);
    }

    #[test]
    fn mock_irq_depth() {
        let irq = MockIrq::new();
        irq.disable();
        irq.disable();
        irq.enable();
        assert_eq!(irq.depth(), 1);
        assert!(!irq.is_enabled());
        irq.enable();
        assert!(irq.is_enabled());
        assert_eq!(irq.disables(), 2);
    }

    #[test]
    fn mock_mdio_xgbe_setup() {
        let mut mdio = MockMdioBus::new();
        mdio.setup_xgbe(0);

        assert_eq!(mdio.read(0, mmd::PCS, reg::DEVID1).unwrap(), 0x7996);
        assert_eq!(mdio.read(0, mmd::PCS, reg::STAT1).unwrap() & stat1::LSTATUS, 0);

        mdio.set_link(0, true);
        assert_ne!(mdio.read(0, mmd::PCS, reg::STAT1).unwrap() & stat1::LSTATUS, 0);
    }
}
